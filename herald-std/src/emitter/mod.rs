//! Priority-ordered listener registry.
//!
//! [`Emitter`] maps event names to listeners, dispatching each event to its
//! listeners in ascending priority order. Registration metadata lives in
//! [`ListenerMeta`]; [`ListenerFilter`] narrows removals.

pub mod meta;
pub mod registry;

pub use meta::{ListenerFilter, ListenerMeta};
pub use registry::Emitter;
