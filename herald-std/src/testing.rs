//! Testing utilities for Herald.
//!
//! This module provides helpers that make assertions about dispatch order
//! and batch delivery easier.
//!
//! # Features
//!
//! - [`CallLog`]: A shared, ordered record of labelled invocations
//! - [`RecordingListener`]: A listener that records the args it receives
//! - [`RecordingObserver`]: An observer that records delivered batches
//! - [`failing_listener`]: A listener that always fails

use herald_core::{BoxError, Callback, Observe, ObserverId};
use std::{cell::RefCell, rc::Rc};

// ============================================================================
// Call Log
// ============================================================================

/// A shared, ordered record of labelled invocations.
///
/// # Example
///
/// ```rust,ignore
/// let log = CallLog::new();
/// emitter.on_with_priority("x", log.listener("late"), 10)?;
/// emitter.on_with_priority("x", log.listener("early"), -10)?;
/// emitter.dispatch(&"x", &())?;
/// assert_eq!(log.entries(), ["early", "late"]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct CallLog {
    entries: Rc<RefCell<Vec<String>>>,
}

impl CallLog {
    /// Create an empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a label.
    pub fn push(&self, label: impl Into<String>) {
        self.entries.borrow_mut().push(label.into());
    }

    /// Get a copy of the recorded labels.
    pub fn entries(&self) -> Vec<String> {
        self.entries.borrow().clone()
    }

    /// Check if nothing was recorded.
    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }

    /// Clear all recorded labels.
    pub fn clear(&self) {
        self.entries.borrow_mut().clear();
    }

    /// A callback that appends `label` to this log whenever it runs.
    pub fn listener<A: ?Sized + 'static>(&self, label: &str) -> Callback<A> {
        let log = self.clone();
        let label = label.to_string();
        Callback::infallible(move |_: &A| log.push(label.clone()))
    }
}

// ============================================================================
// Recording Listener
// ============================================================================

/// A listener that records every argument it is called with.
///
/// # Example
///
/// ```rust,ignore
/// let recorder = RecordingListener::<u32>::new();
/// emitter.on("count", recorder.callback())?;
/// emitter.dispatch(&"count", &3)?;
/// assert_eq!(recorder.calls(), [3]);
/// ```
pub struct RecordingListener<A: Clone> {
    calls: Rc<RefCell<Vec<A>>>,
    callback: Callback<A>,
}

impl<A: Clone + 'static> RecordingListener<A> {
    /// Create a new recording listener.
    pub fn new() -> Self {
        let calls = Rc::new(RefCell::new(Vec::new()));
        let sink = calls.clone();
        let callback = Callback::infallible(move |args: &A| sink.borrow_mut().push(args.clone()));
        Self { calls, callback }
    }

    /// The callback to register. Every clone shares the same identity.
    pub fn callback(&self) -> Callback<A> {
        self.callback.clone()
    }

    /// Get the recorded arguments.
    pub fn calls(&self) -> Vec<A> {
        self.calls.borrow().clone()
    }

    /// Get the number of times the listener was called.
    pub fn call_count(&self) -> usize {
        self.calls.borrow().len()
    }
}

impl<A: Clone + 'static> Default for RecordingListener<A> {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Recording Observer
// ============================================================================

/// An observer that records every batch delivered to it.
pub struct RecordingObserver<T: Clone> {
    batches: Rc<RefCell<Vec<Vec<T>>>>,
}

impl<T: Clone + 'static> RecordingObserver<T> {
    /// Create a recorder that is not attached to anything yet.
    pub fn new() -> Self {
        Self {
            batches: Rc::new(RefCell::new(Vec::new())),
        }
    }

    /// Add this recorder as an observer of `observable`.
    pub fn attach(&self, observable: &impl Observe<[T]>) -> ObserverId {
        let sink = self.batches.clone();
        observable.add_observer(move |batch: &[T]| sink.borrow_mut().push(batch.to_vec()))
    }

    /// Get the recorded batches.
    pub fn batches(&self) -> Vec<Vec<T>> {
        self.batches.borrow().clone()
    }

    /// Get the number of deliveries.
    pub fn count(&self) -> usize {
        self.batches.borrow().len()
    }
}

impl<T: Clone + 'static> Default for RecordingObserver<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone> Clone for RecordingObserver<T> {
    fn clone(&self) -> Self {
        Self {
            batches: self.batches.clone(),
        }
    }
}

// ============================================================================
// Failing Listener
// ============================================================================

/// A listener that fails with `message` every time it runs.
pub fn failing_listener<A: ?Sized + 'static>(message: &str) -> Callback<A> {
    let message = message.to_string();
    Callback::new(move |_: &A| Err(BoxError::from(message.clone())))
}
