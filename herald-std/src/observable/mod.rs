//! Observer lists and the observables built on them.
//!
//! - [`Observable`] delivers every value immediately.
//! - [`TransactionObservable`] batches values invoked inside a scope and
//!   delivers them together when the scope succeeds.

pub mod observable;
pub mod observer_list;
pub mod transaction;

pub use observable::Observable;
pub use observer_list::ObserverList;
pub use transaction::TransactionObservable;
