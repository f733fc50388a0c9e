//! Deferred method-call recording for poll conditions.
//!
//! [`call_to`] wraps a shared object in a capability-checked stand-in so a
//! single method invocation can be recorded once, without executing it, and
//! replayed against the live object on every poll tick. This is the
//! closure-capture rendition of a reflective dynamic proxy: the recorded
//! closure owns the call's arguments, the target is shared, and the check
//! for an interceptable interface happens at proxy-creation time, never
//! during polling.

use crate::result::{EsperarError, EsperarResult};
use std::fmt;
use std::sync::Arc;

/// Trait for objects that can stand behind a call-recording proxy.
///
/// The interface list is the object's interceptable capability set. An
/// empty list marks a sealed concrete type that exposes nothing to
/// intercept; [`call_to`] rejects such targets.
pub trait Proxyable {
    /// Names of the interfaces this object can be intercepted through
    fn interfaces(&self) -> &'static [&'static str];
}

/// Build a call-recording proxy around `target`.
///
/// # Errors
///
/// Returns [`EsperarError::CannotCreateProxy`] naming the offending type
/// when `target` exposes no interceptable interface.
pub fn call_to<T>(target: Arc<T>) -> EsperarResult<CallProxy<T>>
where
    T: Proxyable + ?Sized,
{
    if target.interfaces().is_empty() {
        return Err(EsperarError::CannotCreateProxy {
            type_name: std::any::type_name::<T>().to_string(),
        });
    }
    Ok(CallProxy { target })
}

/// A capability-checked stand-in that records one method invocation
pub struct CallProxy<T: ?Sized> {
    target: Arc<T>,
}

impl<T: Proxyable + ?Sized> CallProxy<T> {
    /// Record `method` for replay on every poll tick.
    ///
    /// The closure owns the call's arguments; the target is only
    /// referenced, never invoked, at record time.
    pub fn record<R>(
        self,
        method: &'static str,
        call: impl Fn(&T) -> R + 'static,
    ) -> RecordedCall<T, R> {
        RecordedCall {
            target: self.target,
            method,
            call: Box::new(call),
        }
    }
}

impl<T: ?Sized> fmt::Debug for CallProxy<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CallProxy").finish_non_exhaustive()
    }
}

/// A single recorded invocation, replayable against the live target
pub struct RecordedCall<T: ?Sized, R> {
    target: Arc<T>,
    method: &'static str,
    call: Box<dyn Fn(&T) -> R>,
}

impl<T: ?Sized, R> RecordedCall<T, R> {
    /// Replay the recorded invocation against the real object
    #[must_use]
    pub fn invoke(&self) -> R {
        (self.call)(&self.target)
    }

    /// The recorded method name
    #[must_use]
    pub fn method(&self) -> &'static str {
        self.method
    }

    /// Description used in logs, e.g. `FakeRepository.value()`
    #[must_use]
    pub fn description(&self) -> String {
        format!("{}.{}()", short_type_name::<T>(), self.method)
    }
}

impl<T: ?Sized, R> fmt::Debug for RecordedCall<T, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RecordedCall")
            .field("method", &self.method)
            .finish_non_exhaustive()
    }
}

/// Last path segment of a type name
fn short_type_name<T: ?Sized>() -> &'static str {
    let full = std::any::type_name::<T>();
    full.rsplit("::").next().unwrap_or(full)
}
