//! Result and error types for Esperar.

use thiserror::Error;

/// Result type for Esperar operations
pub type EsperarResult<T> = Result<T, EsperarError>;

/// Errors that can terminate a wait
#[derive(Debug, Error)]
pub enum EsperarError {
    /// Condition did not become true within the configured timeout
    #[error("Condition {}was not fulfilled within {elapsed_ms} ms", alias_clause(.alias))]
    Timeout {
        /// Alias attached to the wait specification, if any
        alias: Option<String>,
        /// Elapsed time in milliseconds when the deadline was detected
        elapsed_ms: u64,
    },

    /// A watched background thread panicked while the wait was in flight
    #[error("Uncaught panic on thread '{thread}' propagated to awaiting thread: {message}")]
    UncaughtPanic {
        /// Label of the thread the panic escaped from
        thread: String,
        /// Rendered panic message
        message: String,
    },

    /// Evaluating the condition itself failed
    #[error("Condition evaluation failed: {message}")]
    ConditionEvaluation {
        /// Error message
        message: String,
    },

    /// The proxy target exposes no interceptable interface
    #[error("Cannot create a proxy for {type_name}: no interceptable interfaces")]
    CannotCreateProxy {
        /// Fully qualified name of the offending type
        type_name: String,
    },
}

fn alias_clause(alias: &Option<String>) -> String {
    match alias {
        Some(alias) => format!("with alias '{alias}' "),
        None => String::new(),
    }
}
