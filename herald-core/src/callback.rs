//! # Listener Callbacks
//!
//! A [`Callback`] is the invocable half of a listener registration. It is
//! reference counted: cloning a callback yields a handle with the same
//! identity, and that identity is what the emitter matches on when a
//! listener is removed.
//!
//! # Bound Callbacks
//!
//! [`Callback::bound`] pairs a function with a shared receiver. The receiver
//! is held weakly, so registering a listener never keeps its owner alive.
//! Once the receiver is dropped the callback is no longer invocable: the
//! emitter refuses to register it and drops existing registrations of it
//! when their event is dispatched.
//!
//! # Contexts
//!
//! A [`Context`] is an opaque identity token attached to a registration. It
//! lets a caller remove "every listener I registered" without keeping the
//! individual callbacks around.

use crate::error::ListenerResult;
use std::{
    fmt,
    rc::{Rc, Weak},
    sync::atomic::{AtomicU64, Ordering},
};

static NEXT_CONTEXT: AtomicU64 = AtomicU64::new(1);

/// An opaque identity token attached to a listener registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Context(ContextKind);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum ContextKind {
    Token(u64),
    Receiver(usize),
}

impl Context {
    /// Create a fresh token, distinct from every other context.
    pub fn new() -> Self {
        Self(ContextKind::Token(
            NEXT_CONTEXT.fetch_add(1, Ordering::Relaxed),
        ))
    }

    /// The context identifying a shared receiver.
    ///
    /// Two calls on clones of the same `Rc` return equal contexts. The
    /// context is derived from the receiver's address: once every clone has
    /// been dropped, a later `Rc` allocated at that address yields an equal
    /// context, so a filter built from it also matches registrations left
    /// behind by the dropped receiver. Bound listeners of a dropped receiver
    /// are removed by the next dispatch of their event; use [`Context::new`]
    /// when a context must never be reused.
    pub fn of<T: ?Sized>(receiver: &Rc<T>) -> Self {
        Self(ContextKind::Receiver(
            Rc::as_ptr(receiver) as *const () as usize,
        ))
    }
}

impl Default for Context {
    fn default() -> Self {
        Self::new()
    }
}

/// Object-safe view of a callback implementation.
trait DynCallback<A: ?Sized> {
    /// Invoke the callback.
    fn call_dyn(&self, args: &A) -> ListenerResult;

    /// Whether the callback can currently be invoked.
    fn is_invocable(&self) -> bool {
        true
    }

    /// The context the callback is bound to, if any.
    fn context(&self) -> Option<Context> {
        None
    }
}

struct FnCallback<F>(F);

impl<A, F> DynCallback<A> for FnCallback<F>
where
    A: ?Sized,
    F: Fn(&A) -> ListenerResult,
{
    fn call_dyn(&self, args: &A) -> ListenerResult {
        (self.0)(args)
    }
}

struct BoundCallback<T, F> {
    receiver: Weak<T>,
    context: Context,
    f: F,
}

impl<A, T, F> DynCallback<A> for BoundCallback<T, F>
where
    A: ?Sized,
    F: Fn(&T, &A) -> ListenerResult,
{
    fn call_dyn(&self, args: &A) -> ListenerResult {
        match self.receiver.upgrade() {
            Some(receiver) => (self.f)(&receiver, args),
            None => Ok(()),
        }
    }

    fn is_invocable(&self) -> bool {
        self.receiver.strong_count() > 0
    }

    fn context(&self) -> Option<Context> {
        Some(self.context)
    }
}

/// A shared, identity-carrying listener callback.
///
/// # Example
///
/// ```rust,ignore
/// let log = Callback::infallible(|line: &String| println!("{line}"));
/// emitter.on("line", log.clone())?;
/// emitter.off(&"line", &log);
/// ```
pub struct Callback<A: ?Sized> {
    inner: Rc<dyn DynCallback<A>>,
}

impl<A: ?Sized + 'static> Callback<A> {
    /// Wrap a fallible function.
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(&A) -> ListenerResult + 'static,
    {
        Self {
            inner: Rc::new(FnCallback(f)),
        }
    }

    /// Wrap a function that cannot fail.
    pub fn infallible<F>(f: F) -> Self
    where
        F: Fn(&A) + 'static,
    {
        Self::new(move |args: &A| {
            f(args);
            Ok(())
        })
    }

    /// Bind a function to a weakly held receiver.
    ///
    /// Invoking the callback after the receiver is gone does nothing.
    pub fn bound<T, F>(receiver: &Rc<T>, f: F) -> Self
    where
        T: 'static,
        F: Fn(&T, &A) -> ListenerResult + 'static,
    {
        Self {
            inner: Rc::new(BoundCallback {
                receiver: Rc::downgrade(receiver),
                context: Context::of(receiver),
                f,
            }),
        }
    }
}

impl<A: ?Sized> Callback<A> {
    /// Invoke the callback.
    pub fn call(&self, args: &A) -> ListenerResult {
        self.inner.call_dyn(args)
    }

    /// Whether the callback can currently be invoked.
    pub fn is_invocable(&self) -> bool {
        self.inner.is_invocable()
    }

    /// The receiver context of a bound callback.
    pub fn context(&self) -> Option<Context> {
        self.inner.context()
    }

    /// Whether `self` and `other` are handles to the same callback.
    pub fn same(&self, other: &Callback<A>) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }
}

impl<A: ?Sized> Clone for Callback<A> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<A: ?Sized> PartialEq for Callback<A> {
    fn eq(&self, other: &Self) -> bool {
        self.same(other)
    }
}

impl<A: ?Sized> Eq for Callback<A> {}

impl<A: ?Sized> fmt::Debug for Callback<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Callback")
            .field("ptr", &(Rc::as_ptr(&self.inner) as *const ()))
            .field("context", &self.context())
            .finish()
    }
}
