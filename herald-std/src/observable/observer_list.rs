//! Ordered observer storage shared by the observables.

use herald_core::{Observe, ObserverId};
use std::{
    cell::{Cell, RefCell},
    fmt,
    rc::Rc,
};

/// An ordered list of observers.
///
/// Notification works on a snapshot taken when it starts and no borrow is
/// held while observers run, so an observer may add or remove observers:
/// additions wait for the next notification, removals take effect from the
/// next one.
pub struct ObserverList<Item: ?Sized> {
    observers: RefCell<Vec<(ObserverId, Rc<dyn Fn(&Item)>)>>,
    next_id: Cell<u64>,
}

impl<Item: ?Sized> ObserverList<Item> {
    /// Create an empty list.
    pub fn new() -> Self {
        Self {
            observers: RefCell::new(Vec::new()),
            next_id: Cell::new(1),
        }
    }

    /// Call every observer with `item`, in the order they were added.
    pub fn notify(&self, item: &Item) {
        let snapshot: Vec<Rc<dyn Fn(&Item)>> = self
            .observers
            .borrow()
            .iter()
            .map(|(_, observer)| Rc::clone(observer))
            .collect();
        for observer in snapshot {
            observer(item);
        }
    }

    /// Number of observers.
    pub fn len(&self) -> usize {
        self.observers.borrow().len()
    }

    /// Check if the list has no observers.
    pub fn is_empty(&self) -> bool {
        self.observers.borrow().is_empty()
    }
}

impl<Item: ?Sized> Observe<Item> for ObserverList<Item> {
    fn add_observer<F>(&self, observer: F) -> ObserverId
    where
        F: Fn(&Item) + 'static,
    {
        let id = ObserverId::from_raw(self.next_id.get());
        self.next_id.set(self.next_id.get() + 1);
        self.observers.borrow_mut().push((id, Rc::new(observer)));
        id
    }

    fn remove_observer(&self, id: ObserverId) -> bool {
        let mut observers = self.observers.borrow_mut();
        match observers.iter().position(|(oid, _)| *oid == id) {
            Some(index) => {
                observers.remove(index);
                true
            }
            None => false,
        }
    }
}

impl<Item: ?Sized> Default for ObserverList<Item> {
    fn default() -> Self {
        Self::new()
    }
}

impl<Item: ?Sized> fmt::Debug for ObserverList<Item> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ObserverList")
            .field("len", &self.len())
            .finish()
    }
}
