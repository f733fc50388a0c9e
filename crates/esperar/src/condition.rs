//! Condition abstraction for the polling engine.
//!
//! Conditions come in two forms: a self-contained boolean check
//! ([`FnCondition`], [`TryFnCondition`]) and a value producer paired with a
//! match predicate ([`ValueCondition`]). All forms must be safe to evaluate
//! any number of times; evaluation failures abort the wait and surface to
//! the caller rather than being swallowed.

use crate::result::EsperarResult;
use std::fmt;

/// Trait for conditions polled by the engine
pub trait Condition {
    /// Evaluate the condition once.
    ///
    /// # Errors
    ///
    /// Returns an error if the evaluation itself fails. The wait aborts
    /// immediately and the error reaches the caller unretried.
    fn evaluate(&mut self) -> EsperarResult<bool>;

    /// Get description for error messages and logs
    fn description(&self) -> String;
}

// =============================================================================
// FUNCTION CONDITIONS
// =============================================================================

/// A function-based condition
pub struct FnCondition<F: FnMut() -> bool> {
    func: F,
    description: String,
}

impl<F: FnMut() -> bool> FnCondition<F> {
    /// Create a new function condition
    pub fn new(func: F, description: impl Into<String>) -> Self {
        Self {
            func,
            description: description.into(),
        }
    }
}

impl<F: FnMut() -> bool> Condition for FnCondition<F> {
    fn evaluate(&mut self) -> EsperarResult<bool> {
        Ok((self.func)())
    }

    fn description(&self) -> String {
        self.description.clone()
    }
}

impl<F: FnMut() -> bool> fmt::Debug for FnCondition<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnCondition")
            .field("description", &self.description)
            .finish_non_exhaustive()
    }
}

/// A fallible condition whose evaluation may error
pub struct TryFnCondition<F: FnMut() -> EsperarResult<bool>> {
    func: F,
    description: String,
}

impl<F: FnMut() -> EsperarResult<bool>> TryFnCondition<F> {
    /// Create a new fallible condition
    pub fn new(func: F, description: impl Into<String>) -> Self {
        Self {
            func,
            description: description.into(),
        }
    }
}

impl<F: FnMut() -> EsperarResult<bool>> Condition for TryFnCondition<F> {
    fn evaluate(&mut self) -> EsperarResult<bool> {
        (self.func)()
    }

    fn description(&self) -> String {
        self.description.clone()
    }
}

impl<F: FnMut() -> EsperarResult<bool>> fmt::Debug for TryFnCondition<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TryFnCondition")
            .field("description", &self.description)
            .finish_non_exhaustive()
    }
}

// =============================================================================
// VALUE CONDITION
// =============================================================================

/// A producer-plus-matcher condition retaining the last produced value
pub struct ValueCondition<P, M, T>
where
    P: FnMut() -> T,
    M: FnMut(&T) -> bool,
{
    producer: P,
    matches: M,
    description: String,
    last: Option<T>,
}

impl<P, M, T> ValueCondition<P, M, T>
where
    P: FnMut() -> T,
    M: FnMut(&T) -> bool,
{
    /// Create a value condition with a generic description
    pub fn new(producer: P, matches: M) -> Self {
        Self::with_description(producer, matches, "produced value")
    }

    /// Create a value condition with an explicit description
    pub fn with_description(producer: P, matches: M, description: impl Into<String>) -> Self {
        Self {
            producer,
            matches,
            description: description.into(),
            last: None,
        }
    }

    /// Consume the condition, yielding the value observed on the last tick
    #[must_use]
    pub fn into_value(self) -> Option<T> {
        self.last
    }
}

impl<P, M, T> Condition for ValueCondition<P, M, T>
where
    P: FnMut() -> T,
    M: FnMut(&T) -> bool,
{
    fn evaluate(&mut self) -> EsperarResult<bool> {
        let value = (self.producer)();
        let fulfilled = (self.matches)(&value);
        self.last = Some(value);
        Ok(fulfilled)
    }

    fn description(&self) -> String {
        self.description.clone()
    }
}

impl<P, M, T> fmt::Debug for ValueCondition<P, M, T>
where
    P: FnMut() -> T,
    M: FnMut(&T) -> bool,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ValueCondition")
            .field("description", &self.description)
            .finish_non_exhaustive()
    }
}
