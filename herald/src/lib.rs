//! # herald - In-Process Event Dispatch
//!
//! `herald` provides two independent, single-threaded dispatch primitives:
//!
//! - [`Emitter`]: a registry mapping event names to listeners that fire in
//!   ascending priority order, with once-only listeners and safe mutation
//!   while an event is being dispatched.
//! - [`TransactionObservable`]: an observable that buffers the values
//!   invoked inside a (sync or async) scope and delivers them as a single
//!   batch when the scope succeeds, or drops them when it fails.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use herald::prelude::*;
//!
//! let emitter = Emitter::<&str, String>::new();
//! emitter.on_with_priority("saved", Callback::infallible(|path| println!("index {path}")), Priority::LOW)?;
//! emitter.on_with_priority("saved", Callback::infallible(|path| println!("audit {path}")), Priority::HIGH)?;
//! emitter.dispatch(&"saved", &"notes.md".to_string())?; // audit, then index
//!
//! let changes = TransactionObservable::<u32>::new();
//! changes.add_observer(|batch: &[u32]| println!("{batch:?}"));
//! changes.run_scope(|| {
//!     changes.invoke(1);
//!     changes.invoke(2);
//!     Ok::<_, std::convert::Infallible>(())
//! })?; // one delivery: [1, 2]
//! ```

#![deny(clippy::wildcard_imports)]
#![warn(missing_docs)]

pub use herald_core::{
    // Error types
    BoxError,
    // Callbacks
    Callback,
    Context,
    EmitterError,
    // Events
    EventName,
    ListenerResult,
    // Observers
    Observe,
    ObserverId,
    Priority,
    Symbol,
};

// Listener registry
pub use herald_std::emitter::{Emitter, ListenerFilter, ListenerMeta};

// Observables
pub use herald_std::observable::{Observable, ObserverList, TransactionObservable};

/// Listener registry module.
pub mod emitter {
    pub use herald_std::emitter::{Emitter, ListenerFilter, ListenerMeta};
}

/// Observables module.
pub mod observable {
    pub use herald_std::observable::{Observable, ObserverList, TransactionObservable};
}

/// Testing utilities.
pub mod testing {
    pub use herald_std::testing::{CallLog, RecordingListener, RecordingObserver, failing_listener};
}

/// Prelude module - common imports for Herald.
///
/// # Usage
///
/// ```rust,ignore
/// use herald::prelude::*;
/// ```
pub mod prelude {
    pub use crate::{
        BoxError, Callback, Context, Emitter, EmitterError, ListenerFilter, ListenerMeta,
        ListenerResult, Observable, Observe, Priority, Symbol, TransactionObservable,
    };
}
