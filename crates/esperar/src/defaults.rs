//! Process-wide default configuration.
//!
//! Defaults seed every newly created wait specification at creation time.
//! An explicit [`reset`] restores the built-ins and clears any captured
//! background panic, so no timeout, poll-interval, or panic-catching
//! configuration leaks across independent test cases.
//!
//! All of this state is process-wide. Concurrent mutation from parallel
//! test threads is the caller's responsibility to serialize; tests are
//! expected to run sequentially with respect to these globals.

use crate::interval::Interval;
use crate::uncaught;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{PoisonError, RwLock};

/// Built-in default timeout: wait indefinitely unless overridden
pub const BUILT_IN_TIMEOUT: Interval = Interval::FOREVER;

/// Built-in default poll interval (100ms)
pub const BUILT_IN_POLL_INTERVAL: Interval = Interval::ONE_HUNDRED_MILLISECONDS;

static DEFAULT_TIMEOUT: RwLock<Interval> = RwLock::new(BUILT_IN_TIMEOUT);
static DEFAULT_POLL_INTERVAL: RwLock<Interval> = RwLock::new(BUILT_IN_POLL_INTERVAL);
static CATCH_UNCAUGHT: AtomicBool = AtomicBool::new(false);

/// Set the default timeout applied to every subsequently created wait
/// specification. Specifications already created keep their snapshot.
pub fn set_default_timeout(timeout: impl Into<Interval>) {
    *DEFAULT_TIMEOUT
        .write()
        .unwrap_or_else(PoisonError::into_inner) = timeout.into();
}

/// Set the default poll interval applied to every subsequently created
/// wait specification.
pub fn set_default_poll_interval(interval: impl Into<Interval>) {
    *DEFAULT_POLL_INTERVAL
        .write()
        .unwrap_or_else(PoisonError::into_inner) = interval.into();
}

/// Current default timeout
#[must_use]
pub fn default_timeout() -> Interval {
    *DEFAULT_TIMEOUT.read().unwrap_or_else(PoisonError::into_inner)
}

/// Current default poll interval
#[must_use]
pub fn default_poll_interval() -> Interval {
    *DEFAULT_POLL_INTERVAL
        .read()
        .unwrap_or_else(PoisonError::into_inner)
}

/// Propagate panics captured from watched background threads into every
/// subsequently created wait specification
pub fn catch_uncaught_panics() {
    CATCH_UNCAUGHT.store(true, Ordering::SeqCst);
}

/// Whether watched-thread panics are currently propagated to awaiting
/// threads
#[must_use]
pub fn is_catching_uncaught_panics() -> bool {
    CATCH_UNCAUGHT.load(Ordering::SeqCst)
}

/// Restore all defaults to their built-in values and clear any captured
/// background panic. Intended to run between independent test cases.
pub fn reset() {
    set_default_timeout(BUILT_IN_TIMEOUT);
    set_default_poll_interval(BUILT_IN_POLL_INTERVAL);
    CATCH_UNCAUGHT.store(false, Ordering::SeqCst);
    uncaught::clear();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interval::TimeUnit;
    use crate::uncaught::CaughtPanic;

    #[test]
    fn test_built_ins() {
        let _guard = crate::testing::global_state_guard();
        reset();
        assert_eq!(default_timeout(), BUILT_IN_TIMEOUT);
        assert_eq!(default_poll_interval(), BUILT_IN_POLL_INTERVAL);
        assert!(!is_catching_uncaught_panics());
    }

    #[test]
    fn test_setters_are_visible_to_accessors() {
        let _guard = crate::testing::global_state_guard();
        reset();
        set_default_timeout((20, TimeUnit::Millis));
        set_default_poll_interval(Interval::FIFTY_MILLISECONDS);
        assert_eq!(default_timeout(), Interval::of(20, TimeUnit::Millis));
        assert_eq!(default_poll_interval(), Interval::FIFTY_MILLISECONDS);
        reset();
    }

    #[test]
    fn test_reset_restores_built_ins() {
        let _guard = crate::testing::global_state_guard();
        set_default_timeout(Interval::ONE_SECOND);
        set_default_poll_interval((1, TimeUnit::Millis));
        catch_uncaught_panics();
        reset();
        assert_eq!(default_timeout(), BUILT_IN_TIMEOUT);
        assert_eq!(default_poll_interval(), BUILT_IN_POLL_INTERVAL);
        assert!(!is_catching_uncaught_panics());
    }

    #[test]
    fn test_reset_clears_captured_panic() {
        let _guard = crate::testing::global_state_guard();
        uncaught::capture(CaughtPanic {
            thread: "stale".to_string(),
            message: "left over from a previous wait".to_string(),
        });
        assert!(uncaught::has_captured());
        reset();
        assert!(!uncaught::has_captured());
    }
}
