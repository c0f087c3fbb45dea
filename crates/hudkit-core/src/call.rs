//! Callable contexts for widget callbacks.
//!
//! A [`ContextCall`] wraps a closure together with an optional
//! [`CallContext`]. The context models the lifetime of whatever owns the
//! callback (a screen, a script module, a session); once it is dropped the
//! call becomes inert and running it does nothing.
//!
//! Deferred dispatch goes through [`WeakCall`], which does not keep the call
//! alive. If the owner of the strong reference (usually a widget) releases it
//! before the task queue drains, the deferred run is silently dropped.
//!
//! ```
//! use hudkit_core::call::{CallContext, ContextCall};
//!
//! let context = CallContext::new();
//! let call = ContextCall::with_context(&context, |count: &mut u32| *count += 1);
//! let weak = ContextCall::downgrade(&call);
//!
//! let mut count = 0;
//! assert!(weak.run(&mut count));
//! drop(context);
//! assert!(!weak.run(&mut count));
//! assert_eq!(count, 1);
//! ```

use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

use crate::logging::targets;

struct ContextState;

/// Liveness token for a group of callbacks.
///
/// Dropping the context (or calling [`CallContext::expire`]) turns every
/// [`ContextCall`] created with it into a no-op.
pub struct CallContext {
    state: Rc<ContextState>,
}

impl CallContext {
    /// Create a new, live context.
    pub fn new() -> Self {
        Self {
            state: Rc::new(ContextState),
        }
    }

    /// Explicitly end the context.
    pub fn expire(self) {}

    fn downgrade(&self) -> Weak<ContextState> {
        Rc::downgrade(&self.state)
    }
}

impl Default for CallContext {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for CallContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CallContext")
            .field("calls", &Rc::weak_count(&self.state))
            .finish()
    }
}

type BoxedCall<T> = Box<dyn FnMut(&mut T) + 'static>;

/// A callback bound to an optional [`CallContext`].
///
/// Calls are shared through `Rc` so a widget can hold the strong reference
/// while deferred tasks hold only a [`WeakCall`].
pub struct ContextCall<T: 'static> {
    context: Option<Weak<ContextState>>,
    call: RefCell<BoxedCall<T>>,
}

impl<T: 'static> ContextCall<T> {
    /// Create a call that is not tied to any context.
    pub fn new<F>(call: F) -> Rc<Self>
    where
        F: FnMut(&mut T) + 'static,
    {
        Rc::new(Self {
            context: None,
            call: RefCell::new(Box::new(call)),
        })
    }

    /// Create a call that becomes inert when `context` is dropped.
    pub fn with_context<F>(context: &CallContext, call: F) -> Rc<Self>
    where
        F: FnMut(&mut T) + 'static,
    {
        Rc::new(Self {
            context: Some(context.downgrade()),
            call: RefCell::new(Box::new(call)),
        })
    }

    /// Create a weak reference for deferred dispatch.
    pub fn downgrade(this: &Rc<Self>) -> WeakCall<T> {
        WeakCall {
            inner: Rc::downgrade(this),
        }
    }

    /// Whether the owning context has gone away.
    pub fn is_expired(&self) -> bool {
        self.context
            .as_ref()
            .is_some_and(|context| context.strong_count() == 0)
    }

    /// Run the call against `target`.
    ///
    /// Returns `false` without running if the context has expired, or if the
    /// call is already running further up the stack.
    pub fn run(&self, target: &mut T) -> bool {
        if self.is_expired() {
            tracing::trace!(target: targets::CALL, "skipping call with expired context");
            return false;
        }
        let Ok(mut call) = self.call.try_borrow_mut() else {
            tracing::warn!(target: targets::CALL, "ignoring reentrant invocation of a context call");
            return false;
        };
        (*call)(target);
        true
    }
}

impl<T: 'static> fmt::Debug for ContextCall<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ContextCall")
            .field("has_context", &self.context.is_some())
            .field("expired", &self.is_expired())
            .finish()
    }
}

/// A non-owning reference to a [`ContextCall`].
pub struct WeakCall<T: 'static> {
    inner: Weak<ContextCall<T>>,
}

impl<T: 'static> WeakCall<T> {
    /// Run the referenced call if it is still alive.
    ///
    /// Returns `true` only if the closure actually ran.
    pub fn run(&self, target: &mut T) -> bool {
        match self.inner.upgrade() {
            Some(call) => call.run(target),
            None => {
                tracing::trace!(target: targets::CALL, "dropping weak call to released callback");
                false
            }
        }
    }

    /// Whether the referenced call is still held by someone.
    pub fn is_alive(&self) -> bool {
        self.inner
            .upgrade()
            .is_some_and(|call| !call.is_expired())
    }
}

impl<T: 'static> Clone for WeakCall<T> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<T: 'static> fmt::Debug for WeakCall<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WeakCall")
            .field("alive", &self.is_alive())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_call_without_context_runs() {
        let call = ContextCall::new(|v: &mut Vec<u8>| v.push(1));
        let mut v = Vec::new();
        assert!(call.run(&mut v));
        assert!(call.run(&mut v));
        assert_eq!(v, vec![1, 1]);
    }

    #[test]
    fn test_expired_context_is_inert() {
        let context = CallContext::new();
        let call = ContextCall::with_context(&context, |v: &mut i32| *v += 1);
        let mut v = 0;
        assert!(call.run(&mut v));
        context.expire();
        assert!(call.is_expired());
        assert!(!call.run(&mut v));
        assert_eq!(v, 1);
    }

    #[test]
    fn test_weak_call_dropped_with_strong_ref() {
        let call = ContextCall::new(|v: &mut i32| *v += 1);
        let weak = ContextCall::downgrade(&call);
        assert!(weak.is_alive());
        drop(call);
        assert!(!weak.is_alive());
        let mut v = 0;
        assert!(!weak.run(&mut v));
        assert_eq!(v, 0);
    }

    #[test]
    fn test_reentrant_run_is_refused() {
        struct Target {
            call: Option<Rc<ContextCall<Target>>>,
            inner_result: Option<bool>,
        }
        let call = ContextCall::new(|t: &mut Target| {
            if t.inner_result.is_none() {
                let again = t.call.clone().expect("call set");
                t.inner_result = Some(false);
                let ran = again.run(t);
                t.inner_result = Some(ran);
            }
        });
        let mut target = Target {
            call: Some(call.clone()),
            inner_result: None,
        };
        assert!(call.run(&mut target));
        assert_eq!(target.inner_result, Some(false));
    }
}
