//! Error types for Herald.
//!
//! - [`EmitterError`] - Errors raised by listener registration and dispatch
//! - [`BoxError`] - The type-erased failure a listener may return
//!
//! Observables define no error kinds of their own: a failing transaction body
//! hands its own error straight back to the caller.

use thiserror::Error;

/// A boxed error type for dynamic error handling.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// The value returned by every listener callback.
pub type ListenerResult = Result<(), BoxError>;

/// Errors that can occur while registering or dispatching listeners.
#[derive(Error, Debug)]
pub enum EmitterError {
    /// The callback passed to `register` cannot be invoked.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// A listener failed and aborted the rest of the dispatch pass.
    #[error("listener for event `{event}` failed")]
    Listener {
        /// Debug rendering of the event being dispatched.
        event: String,
        /// The error returned by the listener.
        #[source]
        source: BoxError,
    },
}

impl EmitterError {
    /// Wrap a listener failure raised while dispatching `event`.
    pub fn listener(event: impl std::fmt::Debug, source: BoxError) -> Self {
        EmitterError::Listener {
            event: format!("{event:?}"),
            source,
        }
    }

    /// Returns `true` if this is an [`EmitterError::InvalidArgument`].
    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, EmitterError::InvalidArgument(_))
    }

    /// Consume the error and return the listener failure, if any.
    pub fn into_listener_error(self) -> Option<BoxError> {
        match self {
            EmitterError::Listener { source, .. } => Some(source),
            EmitterError::InvalidArgument(_) => None,
        }
    }
}
