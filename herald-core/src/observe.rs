//! Observer registration.

/// Identifies an observer added to an observable.
///
/// Returned by [`Observe::add_observer`] and passed back to
/// [`Observe::remove_observer`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObserverId(u64);

impl ObserverId {
    /// Wrap a raw id.
    pub const fn from_raw(raw: u64) -> Self {
        Self(raw)
    }
}

/// Something observers can subscribe to.
///
/// `Item` is what each observer receives: a single value for a plain
/// observable, a slice for one that delivers batches.
pub trait Observe<Item: ?Sized> {
    /// Add an observer; it is called after every observer added before it.
    fn add_observer<F>(&self, observer: F) -> ObserverId
    where
        F: Fn(&Item) + 'static;

    /// Remove a previously added observer. Returns whether it was removed.
    fn remove_observer(&self, id: ObserverId) -> bool;
}
