//! Transactional observable.
//!
//! Values invoked while a scope is open are buffered and released to the
//! observers as one batch when the outermost scope succeeds. A failing scope
//! drops everything it buffered.

use super::observer_list::ObserverList;
use herald_core::{Observe, ObserverId};
use std::{cell::RefCell, fmt, future::Future};

type Buffer<T> = RefCell<Option<Vec<T>>>;

/// Closes the transaction buffer when dropped.
///
/// Only the outermost scope holds a guard, so the buffer is reset on every
/// exit path of that scope: success, error, panic or a dropped future.
struct ScopeGuard<'a, T> {
    transaction: &'a Buffer<T>,
}

impl<'a, T> ScopeGuard<'a, T> {
    /// Open a buffer, or return `None` if one is already open.
    fn open(transaction: &'a Buffer<T>) -> Option<Self> {
        let mut slot = transaction.borrow_mut();
        if slot.is_some() {
            return None;
        }
        *slot = Some(Vec::new());
        Some(Self { transaction })
    }

    /// Close the buffer and hand back what it collected.
    fn commit(self) -> Vec<T> {
        self.transaction.borrow_mut().take().unwrap_or_default()
    }
}

impl<T> Drop for ScopeGuard<'_, T> {
    fn drop(&mut self) {
        self.transaction.borrow_mut().take();
    }
}

/// An observable that batches values invoked inside a transaction scope.
///
/// Observers receive slices. Outside any scope every invoke is delivered
/// right away; inside a scope values accumulate and are flushed once, in
/// invocation order, when the outermost scope completes successfully.
///
/// # Example
/// ```ignore
/// let changes = TransactionObservable::<u32>::new();
/// changes.add_observer(|batch: &[u32]| println!("{batch:?}"));
///
/// changes.run_scope(|| {
///     changes.invoke(1);
///     changes.invoke(2);
///     Ok::<_, Infallible>(())
/// })?; // prints [1, 2]
/// ```
pub struct TransactionObservable<T> {
    observers: ObserverList<[T]>,
    transaction: Buffer<T>,
}

impl<T> TransactionObservable<T> {
    /// Create an idle observable without observers.
    pub fn new() -> Self {
        Self {
            observers: ObserverList::new(),
            transaction: RefCell::new(None),
        }
    }

    /// Buffer `value` if a scope is open, otherwise deliver `[value]` now.
    pub fn invoke(&self, value: T) {
        if let Some(buffer) = self.transaction.borrow_mut().as_mut() {
            buffer.push(value);
            return;
        }
        self.observers.notify(&[value]);
    }

    /// Buffer `values` if a scope is open, otherwise deliver them now as one
    /// batch. An empty batch is never delivered.
    ///
    /// `values` is drained before the buffer is touched, so the iterator may
    /// itself query or invoke this observable.
    pub fn invoke_many(&self, values: impl IntoIterator<Item = T>) {
        let mut batch: Vec<T> = values.into_iter().collect();
        if let Some(buffer) = self.transaction.borrow_mut().as_mut() {
            buffer.append(&mut batch);
            return;
        }
        if !batch.is_empty() {
            self.observers.notify(&batch);
        }
    }

    /// Run `body` as a transaction.
    ///
    /// Nested inside another scope, `body` simply runs and its values join
    /// the enclosing buffer. As the outermost scope, a successful `body`
    /// flushes the buffer as one batch (if non-empty) and an `Err` discards
    /// it; the error is returned unchanged.
    pub fn run_scope<R, E>(&self, body: impl FnOnce() -> Result<R, E>) -> Result<R, E> {
        let Some(guard) = ScopeGuard::open(&self.transaction) else {
            return body();
        };
        let result = body();
        self.settle(guard, result)
    }

    /// Run an asynchronous `body` as a transaction.
    ///
    /// Same contract as [`TransactionObservable::run_scope`]. The scope stays
    /// open while `body` is suspended, so values invoked by any other task
    /// sharing this observable in the meantime land in the same buffer, and
    /// a scope started while this one is open behaves as nested.
    ///
    /// Dropping the returned future before it completes closes the scope
    /// without delivering anything.
    pub async fn run_scope_async<R, E, F, Fut>(&self, body: F) -> Result<R, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<R, E>>,
    {
        let Some(guard) = ScopeGuard::open(&self.transaction) else {
            return body().await;
        };
        let result = body().await;
        self.settle(guard, result)
    }

    /// Whether a transaction scope is currently open.
    pub fn in_transaction(&self) -> bool {
        self.transaction.borrow().is_some()
    }

    /// Number of values buffered by the open transaction.
    pub fn pending(&self) -> usize {
        self.transaction.borrow().as_ref().map_or(0, Vec::len)
    }

    /// Number of observers.
    pub fn observer_count(&self) -> usize {
        self.observers.len()
    }

    fn settle<R, E>(&self, guard: ScopeGuard<'_, T>, result: Result<R, E>) -> Result<R, E> {
        match result {
            Ok(value) => {
                let batch = guard.commit();
                #[cfg(feature = "tracing")]
                tracing::debug!(values = batch.len(), "transaction committed");
                if !batch.is_empty() {
                    self.observers.notify(&batch);
                }
                Ok(value)
            }
            Err(err) => {
                #[cfg(feature = "tracing")]
                tracing::debug!(values = self.pending(), "transaction failed, discarding");
                drop(guard);
                Err(err)
            }
        }
    }
}

impl<T> Observe<[T]> for TransactionObservable<T> {
    fn add_observer<F>(&self, observer: F) -> ObserverId
    where
        F: Fn(&[T]) + 'static,
    {
        self.observers.add_observer(observer)
    }

    fn remove_observer(&self, id: ObserverId) -> bool {
        self.observers.remove_observer(id)
    }
}

impl<T> Default for TransactionObservable<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for TransactionObservable<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TransactionObservable")
            .field("observers", &self.observers.len())
            .field("pending", &self.transaction.borrow().as_ref().map(Vec::len))
            .finish()
    }
}
