//! # herald-core
//!
//! Core vocabulary for the Herald event dispatch primitives.
//!
//! This crate has minimal dependencies and is meant to be imported by code
//! that registers listeners or observers without needing the
//! implementations in `herald-std`.
//!
//! # Contents
//!
//! - [`Callback`] / [`Context`] - Identity-carrying listener callbacks
//! - [`Priority`] - The ordering scale for listeners
//! - [`EventName`] / [`Symbol`] - Event identifiers
//! - [`Observe`] / [`ObserverId`] - Observer registration
//!
//! # Error Types
//!
//! - [`EmitterError`] - Registration and dispatch errors
//! - [`BoxError`] - Type-erased listener failure

#![deny(clippy::wildcard_imports)]
#![warn(missing_docs)]

mod callback;
mod error;
mod event;
mod observe;
mod priority;

// Re-exports
pub use callback::{Callback, Context};
pub use error::{BoxError, EmitterError, ListenerResult};
pub use event::{EventName, Symbol};
pub use observe::{Observe, ObserverId};
pub use priority::Priority;
