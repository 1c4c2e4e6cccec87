//! Priority-ordered listener registry.

use super::meta::{ListenerFilter, ListenerMeta};
use herald_core::{Callback, EmitterError, EventName};
use std::{
    cell::{Cell, RefCell},
    collections::HashMap,
    fmt,
    rc::Rc,
};

/// A listener entry with associated metadata.
struct Entry<A: ?Sized> {
    callback: Callback<A>,
    meta: ListenerMeta,
    /// Set once the entry has left its slot.
    detached: Cell<bool>,
}

/// A registry mapping event names to listeners ordered by priority.
///
/// Every method takes `&self`, so a listener may register or remove
/// listeners on the emitter that is currently dispatching to it. The
/// emitter is single-threaded (`!Send`, `!Sync`).
///
/// # Invariants
///
/// - Each slot is sorted by priority ascending; equal priorities keep
///   registration order.
/// - A slot with no listeners does not exist, so [`Emitter::event_names`]
///   never reports an event without listeners.
///
/// # Example
/// ```ignore
/// let emitter = Emitter::<&str, u32>::new();
/// emitter
///     .on("tick", Callback::infallible(|n| println!("tick {n}")))?
///     .on_with_priority("tick", Callback::infallible(|_| println!("first")), Priority::HIGH)?;
///
/// assert!(emitter.dispatch(&"tick", &1)?);
/// ```
pub struct Emitter<K, A: ?Sized> {
    slots: RefCell<HashMap<K, Vec<Rc<Entry<A>>>>>,
}

impl<K: EventName, A: ?Sized> Emitter<K, A> {
    /// Create an empty emitter.
    pub fn new() -> Self {
        Self {
            slots: RefCell::new(HashMap::new()),
        }
    }

    /// Register a listener with the given metadata.
    ///
    /// Fails with [`EmitterError::InvalidArgument`] and leaves the emitter
    /// untouched if the callback cannot be invoked. When `meta` carries no
    /// context, the callback's own receiver context is recorded.
    pub fn register(
        &self,
        event: K,
        callback: Callback<A>,
        mut meta: ListenerMeta,
    ) -> Result<&Self, EmitterError> {
        if !callback.is_invocable() {
            return Err(EmitterError::InvalidArgument(format!(
                "listener for event `{event:?}` is bound to a dropped receiver"
            )));
        }
        if meta.context.is_none() {
            meta.context = callback.context();
        }

        #[cfg(feature = "tracing")]
        tracing::trace!(?event, priority = meta.priority, once = meta.once, "register listener");

        let mut slots = self.slots.borrow_mut();
        let slot = slots.entry(event).or_default();
        slot.push(Rc::new(Entry {
            callback,
            meta,
            detached: Cell::new(false),
        }));
        // Stable: equal priorities keep registration order.
        slot.sort_by_key(|e| e.meta.priority);
        Ok(self)
    }

    /// Register a listener with the default priority.
    pub fn on(&self, event: K, callback: Callback<A>) -> Result<&Self, EmitterError> {
        self.register(event, callback, ListenerMeta::new())
    }

    /// Alias of [`Emitter::on`].
    pub fn add_listener(&self, event: K, callback: Callback<A>) -> Result<&Self, EmitterError> {
        self.on(event, callback)
    }

    /// Register a listener with an explicit priority.
    pub fn on_with_priority(
        &self,
        event: K,
        callback: Callback<A>,
        priority: impl Into<herald_core::Priority>,
    ) -> Result<&Self, EmitterError> {
        self.register(event, callback, ListenerMeta::new().with_priority(priority))
    }

    /// Register a listener that is removed right before its first invocation.
    pub fn once(&self, event: K, callback: Callback<A>) -> Result<&Self, EmitterError> {
        self.register(event, callback, ListenerMeta::new().once())
    }

    /// Remove every registration of `callback` on `event` that passes `filter`.
    ///
    /// Removing nothing is not an error.
    pub fn unregister(&self, event: &K, callback: &Callback<A>, filter: ListenerFilter) -> &Self {
        #[cfg(feature = "tracing")]
        let before = self.listener_count(event);

        self.detach_where(event, |e| {
            e.callback.same(callback) && filter.matches(&e.meta)
        });

        #[cfg(feature = "tracing")]
        tracing::trace!(
            ?event,
            removed = before - self.listener_count(event),
            "unregister listener"
        );
        self
    }

    /// Remove every registration of `callback` on `event`.
    pub fn off(&self, event: &K, callback: &Callback<A>) -> &Self {
        self.unregister(event, callback, ListenerFilter::new())
    }

    /// Alias of [`Emitter::off`].
    pub fn remove_listener(&self, event: &K, callback: &Callback<A>) -> &Self {
        self.off(event, callback)
    }

    /// Remove the listeners of one event, or of every event when `None`.
    pub fn remove_all_listeners(&self, event: Option<&K>) -> &Self {
        let mut slots = self.slots.borrow_mut();
        let dropped: Vec<Vec<Rc<Entry<A>>>> = match event {
            Some(event) => slots.remove(event).into_iter().collect(),
            None => slots.drain().map(|(_, slot)| slot).collect(),
        };
        drop(slots);

        for entry in dropped.iter().flatten() {
            entry.detached.set(true);
        }
        self
    }

    /// Invoke every listener of `event` in priority order.
    ///
    /// Returns `Ok(false)` without touching any state when the event has no
    /// listeners, `Ok(true)` once at least one listener was invoked.
    ///
    /// The pass runs over the listeners present when it starts:
    /// - listeners added during the pass wait for the next dispatch;
    /// - listeners removed during the pass are skipped if not reached yet;
    /// - a `once` listener leaves the registry before it is invoked, so it
    ///   never fires twice, even under re-entrant dispatch;
    /// - a bound listener whose receiver was dropped is removed instead of
    ///   invoked.
    ///
    /// A failing listener aborts the pass; the remaining listeners are not
    /// invoked and the failure is returned as [`EmitterError::Listener`].
    pub fn dispatch(&self, event: &K, args: &A) -> Result<bool, EmitterError> {
        let snapshot = match self.slots.borrow().get(event) {
            Some(slot) if !slot.is_empty() => slot.clone(),
            _ => return Ok(false),
        };

        #[cfg(feature = "tracing")]
        tracing::trace!(?event, listeners = snapshot.len(), "dispatch");

        let mut invoked = false;
        for entry in &snapshot {
            if entry.detached.get() {
                continue;
            }
            if !entry.callback.is_invocable() {
                #[cfg(feature = "tracing")]
                tracing::trace!(?event, "dropping listener with dead receiver");
                self.detach_where(event, |e| Rc::ptr_eq(e, entry));
                continue;
            }
            if entry.meta.once {
                self.detach_where(event, |e| Rc::ptr_eq(e, entry));
            }
            invoked = true;
            if let Err(source) = entry.callback.call(args) {
                #[cfg(feature = "tracing")]
                tracing::warn!(?event, error = %source, "listener failed, aborting dispatch");
                return Err(EmitterError::listener(event, source));
            }
        }
        Ok(invoked)
    }

    /// Alias of [`Emitter::dispatch`].
    pub fn emit(&self, event: &K, args: &A) -> Result<bool, EmitterError> {
        self.dispatch(event, args)
    }

    /// The events that currently have listeners, in no particular order.
    pub fn event_names(&self) -> Vec<K> {
        self.slots.borrow().keys().cloned().collect()
    }

    /// The callbacks registered for `event`, in dispatch order.
    pub fn listeners(&self, event: &K) -> Vec<Callback<A>> {
        self.slots
            .borrow()
            .get(event)
            .map(|slot| slot.iter().map(|e| e.callback.clone()).collect())
            .unwrap_or_default()
    }

    /// The number of listeners registered for `event`.
    pub fn listener_count(&self, event: &K) -> usize {
        self.slots.borrow().get(event).map_or(0, Vec::len)
    }

    /// Check if no event has listeners.
    pub fn is_empty(&self) -> bool {
        self.slots.borrow().is_empty()
    }

    /// Detach the entries of `event` selected by `pred`, deleting the slot
    /// if it ends up empty.
    fn detach_where(&self, event: &K, mut pred: impl FnMut(&Rc<Entry<A>>) -> bool) {
        let mut slots = self.slots.borrow_mut();
        let Some(slot) = slots.get_mut(event) else {
            return;
        };

        slot.retain(|e| {
            let hit = pred(e);
            if hit {
                e.detached.set(true);
            }
            !hit
        });
        if slot.is_empty() {
            slots.remove(event);
        }
    }
}

impl<K: EventName, A: ?Sized> Default for Emitter<K, A> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: EventName, A: ?Sized> fmt::Debug for Emitter<K, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let slots = self.slots.borrow();
        f.debug_map()
            .entries(slots.iter().map(|(event, slot)| (event, slot.len())))
            .finish()
    }
}
