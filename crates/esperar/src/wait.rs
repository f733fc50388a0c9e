//! Wait Mechanisms
//!
//! Fluent wait specifications over a sleep-based polling engine.
//!
//! ## Toyota Way Application
//!
//! - **Jidoka**: background-thread faults stop the wait instead of hiding
//!   behind a timeout
//! - **Heijunka**: a fixed per-tick check order keeps failure modes
//!   deterministic
//! - **Muda**: no initial sleep, so an already-true condition returns
//!   immediately
//!
//! The per-tick order is: evaluate the condition, consult the panic slot,
//! check the deadline, sleep one poll interval. Callers may rely on this
//! order to know which failure mode wins in borderline timing.

use crate::condition::{Condition, FnCondition, ValueCondition};
use crate::defaults;
use crate::interval::Interval;
use crate::proxy::RecordedCall;
use crate::result::{EsperarError, EsperarResult};
use crate::uncaught;
use std::time::Instant;
use tracing::{debug, trace};

// =============================================================================
// WAIT SPECIFICATION
// =============================================================================

/// A fluent wait specification seeded from the process-wide defaults.
///
/// Builder calls accumulate overrides; exactly one terminal call
/// (`until*`) consumes the specification and blocks the calling thread
/// until a terminal outcome. The specification is immutable once the loop
/// starts.
#[derive(Debug, Clone)]
pub struct Wait {
    poll_interval: Interval,
    timeout: Interval,
    alias: Option<String>,
    catch_uncaught: bool,
}

impl Default for Wait {
    fn default() -> Self {
        Self::new()
    }
}

impl Wait {
    /// Create a wait specification snapshotting the current defaults
    #[must_use]
    pub fn new() -> Self {
        Self {
            poll_interval: defaults::default_poll_interval(),
            timeout: defaults::default_timeout(),
            alias: None,
            catch_uncaught: defaults::is_catching_uncaught_panics(),
        }
    }

    /// Attach a human-readable alias surfaced in timeout errors
    #[must_use]
    pub fn with_alias(mut self, alias: impl Into<String>) -> Self {
        self.alias = Some(alias.into());
        self
    }

    /// Override the timeout
    #[must_use]
    pub fn at_most(mut self, timeout: impl Into<Interval>) -> Self {
        self.timeout = timeout.into();
        self
    }

    /// Override the poll interval
    #[must_use]
    pub fn with_poll_interval(mut self, interval: impl Into<Interval>) -> Self {
        self.poll_interval = interval.into();
        self
    }

    /// Wait without a deadline
    #[must_use]
    pub fn forever(mut self) -> Self {
        self.timeout = Interval::FOREVER;
        self
    }

    /// Override the panic-catching flag snapshotted from the defaults
    #[must_use]
    pub fn catch_uncaught_panics(mut self, catch: bool) -> Self {
        self.catch_uncaught = catch;
        self
    }

    /// Configured timeout
    #[must_use]
    pub fn timeout(&self) -> Interval {
        self.timeout
    }

    /// Configured poll interval
    #[must_use]
    pub fn poll_interval(&self) -> Interval {
        self.poll_interval
    }

    /// Configured alias, if any
    #[must_use]
    pub fn alias(&self) -> Option<&str> {
        self.alias.as_deref()
    }

    /// Whether this wait propagates watched-thread panics
    #[must_use]
    pub fn catches_uncaught_panics(&self) -> bool {
        self.catch_uncaught
    }

    /// Block until `predicate` returns true.
    ///
    /// # Errors
    ///
    /// Returns [`EsperarError::Timeout`] if the predicate never holds
    /// within the configured timeout, or [`EsperarError::UncaughtPanic`]
    /// if panic catching is enabled and a watched thread panicked
    /// mid-wait.
    pub fn until(self, predicate: impl FnMut() -> bool) -> EsperarResult<()> {
        let mut condition = FnCondition::new(predicate, "boolean predicate");
        self.run(&mut condition)
    }

    /// Block until `condition` evaluates to true.
    ///
    /// # Errors
    ///
    /// Same terminal outcomes as [`Wait::until`], plus any error raised by
    /// the condition's own evaluation, which aborts immediately.
    pub fn until_condition(self, mut condition: impl Condition) -> EsperarResult<()> {
        self.run(&mut condition)
    }

    /// Block until the produced value satisfies `matches`, returning the
    /// matched value.
    ///
    /// # Errors
    ///
    /// Same terminal outcomes as [`Wait::until`].
    pub fn until_value<T, P, M>(self, producer: P, matches: M) -> EsperarResult<T>
    where
        P: FnMut() -> T,
        M: FnMut(&T) -> bool,
    {
        let mut condition = ValueCondition::new(producer, matches);
        self.run(&mut condition)?;
        finish_value(condition.into_value())
    }

    /// Block until the recorded call's return value satisfies `matches`,
    /// replaying the call against the live target on every tick.
    ///
    /// # Errors
    ///
    /// Same terminal outcomes as [`Wait::until`].
    pub fn until_call<T, R, M>(self, call: RecordedCall<T, R>, matches: M) -> EsperarResult<R>
    where
        T: ?Sized,
        M: FnMut(&R) -> bool,
    {
        let description = call.description();
        let mut condition =
            ValueCondition::with_description(move || call.invoke(), matches, description);
        self.run(&mut condition)?;
        finish_value(condition.into_value())
    }

    fn run<C: Condition>(&self, condition: &mut C) -> EsperarResult<()> {
        let timeout = self.timeout.to_duration();
        let poll_interval = self.poll_interval.to_duration();
        let start = Instant::now();
        debug!(
            condition = %condition.description(),
            timeout = %self.timeout,
            poll_interval = %self.poll_interval,
            alias = self.alias.as_deref(),
            "wait started"
        );

        loop {
            if condition.evaluate()? {
                debug!(
                    elapsed_ms = start.elapsed().as_millis() as u64,
                    "condition fulfilled"
                );
                uncaught::clear();
                return Ok(());
            }

            if self.catch_uncaught {
                if let Some(caught) = uncaught::take() {
                    debug!(thread = %caught.thread, "propagating watched-thread panic");
                    return Err(EsperarError::UncaughtPanic {
                        thread: caught.thread,
                        message: caught.message,
                    });
                }
            }

            let elapsed = start.elapsed();
            if elapsed >= timeout {
                debug!(
                    elapsed_ms = elapsed.as_millis() as u64,
                    "wait timed out"
                );
                return Err(EsperarError::Timeout {
                    alias: self.alias.clone(),
                    elapsed_ms: elapsed.as_millis() as u64,
                });
            }

            trace!("condition not fulfilled, sleeping one poll interval");
            std::thread::sleep(poll_interval);
        }
    }
}

fn finish_value<T>(value: Option<T>) -> EsperarResult<T> {
    value.ok_or_else(|| EsperarError::ConditionEvaluation {
        message: "value condition fulfilled without producing a value".to_string(),
    })
}

// =============================================================================
// ENTRY POINTS
// =============================================================================

/// Start a wait specification seeded from the process-wide defaults
#[must_use]
pub fn wait() -> Wait {
    Wait::new()
}

/// Start an aliased wait specification; the alias appears in timeout
/// errors
#[must_use]
pub fn wait_with_alias(alias: impl Into<String>) -> Wait {
    Wait::new().with_alias(alias)
}

/// Start a wait specification bounded by `timeout`
#[must_use]
pub fn wait_at_most(timeout: impl Into<Interval>) -> Wait {
    Wait::new().at_most(timeout)
}

/// Start a wait specification with an overridden poll interval
#[must_use]
pub fn with_poll_interval(interval: impl Into<Interval>) -> Wait {
    Wait::new().with_poll_interval(interval)
}

/// Start a wait specification with an overridden timeout
#[must_use]
pub fn with_timeout(timeout: impl Into<Interval>) -> Wait {
    Wait::new().at_most(timeout)
}

/// Enable panic catching globally and continue fluently into a wait
#[must_use]
pub fn catching_uncaught_panics() -> Catching {
    defaults::catch_uncaught_panics();
    Catching
}

/// Fluent continuation returned by [`catching_uncaught_panics`]
#[derive(Debug, Clone, Copy)]
pub struct Catching;

impl Catching {
    /// Fluent connector
    #[must_use]
    pub fn and(self) -> Self {
        self
    }

    /// Begin the wait specification
    #[must_use]
    pub fn wait(self) -> Wait {
        Wait::new()
    }
}

// =============================================================================
// TESTS
// =============================================================================
