//! # herald-std
//!
//! Standard implementations for the Herald event dispatch primitives.
//!
//! This crate provides:
//! - **Listener registry**: [`Emitter`], with [`ListenerMeta`] / [`ListenerFilter`]
//! - **Observables**: [`Observable`], [`TransactionObservable`], [`ObserverList`]
//! - **Testing helpers**: [`testing`]
//!
//! With the `tracing` feature (on by default) registration, dispatch and
//! transaction outcomes are reported through `tracing`.

#![deny(clippy::wildcard_imports)]
#![warn(missing_docs)]

// Re-export core vocabulary
pub use herald_core;

// Modules
pub mod emitter;
pub mod observable;
pub mod testing;

pub use emitter::{Emitter, ListenerFilter, ListenerMeta};
pub use observable::{Observable, ObserverList, TransactionObservable};
