//! Esperar: fluent condition synchronization for concurrent tests.
//!
//! Esperar (Spanish: "to wait") blocks a test thread until an
//! asynchronously produced effect becomes observable, or fails after a
//! deadline. A wait specification is built fluently on top of process-wide
//! defaults, then terminated with a condition that the polling engine
//! re-evaluates at a configured cadence until it holds, the timeout
//! elapses, or a fault from a watched background thread aborts it.
//!
//! # Example
//!
//! ```
//! use esperar::{wait, Interval};
//! use std::sync::atomic::{AtomicUsize, Ordering};
//! use std::sync::Arc;
//!
//! let counter = Arc::new(AtomicUsize::new(0));
//! let updated = Arc::clone(&counter);
//! let worker = esperar::spawn_watched(move || updated.store(1, Ordering::SeqCst));
//!
//! let observed = Arc::clone(&counter);
//! wait()
//!     .at_most(Interval::ONE_SECOND)
//!     .until(move || observed.load(Ordering::SeqCst) == 1)
//!     .expect("counter to be updated");
//!
//! assert_eq!(counter.load(Ordering::SeqCst), 1);
//! worker.join().unwrap();
//! ```
//!
//! This is a cooperative polling mechanism, not an event-driven
//! notification system; it makes no sub-millisecond wake-latency
//! guarantees.

#![warn(missing_docs)]

mod condition;
mod defaults;
mod interval;
mod proxy;
mod result;
mod uncaught;
mod wait;

pub use condition::{Condition, FnCondition, TryFnCondition, ValueCondition};
pub use defaults::{
    catch_uncaught_panics, default_poll_interval, default_timeout, is_catching_uncaught_panics,
    reset, set_default_poll_interval, set_default_timeout, BUILT_IN_POLL_INTERVAL,
    BUILT_IN_TIMEOUT,
};
pub use interval::{Interval, TimeUnit};
pub use proxy::{call_to, CallProxy, Proxyable, RecordedCall};
pub use result::{EsperarError, EsperarResult};
pub use uncaught::{spawn_watched, CaughtPanic};
pub use wait::{
    catching_uncaught_panics, wait, wait_at_most, wait_with_alias, with_poll_interval,
    with_timeout, Catching, Wait,
};
