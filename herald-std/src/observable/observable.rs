//! Pass-through observable.

use super::observer_list::ObserverList;
use herald_core::{Observe, ObserverId};

/// A plain observable: every invoke reaches every observer right away.
#[derive(Debug)]
pub struct Observable<T> {
    observers: ObserverList<T>,
}

impl<T> Observable<T> {
    /// Create an observable without observers.
    pub fn new() -> Self {
        Self {
            observers: ObserverList::new(),
        }
    }

    /// Deliver `value` to every observer in the order they were added.
    pub fn invoke(&self, value: &T) {
        self.observers.notify(value);
    }

    /// Number of observers.
    pub fn observer_count(&self) -> usize {
        self.observers.len()
    }
}

impl<T> Observe<T> for Observable<T> {
    fn add_observer<F>(&self, observer: F) -> ObserverId
    where
        F: Fn(&T) + 'static,
    {
        self.observers.add_observer(observer)
    }

    fn remove_observer(&self, id: ObserverId) -> bool {
        self.observers.remove_observer(id)
    }
}

impl<T> Default for Observable<T> {
    fn default() -> Self {
        Self::new()
    }
}
