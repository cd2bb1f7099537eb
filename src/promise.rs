//! Executor-backed promises and their one-shot settlement handles.

use std::any::Any;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::Arc;
use std::thread;

use crate::cell::Cell;
use crate::{Rejection, Thenable};

/// A computation running on its own thread that will settle exactly once,
/// either with an ordered set of success values or with a [`Rejection`].
///
/// Cloning a `Promise` clones a handle to the same settlement, so several
/// threads can observe one computation.
///
/// # Examples
///
/// ```
/// use promise_join::{Promise, Thenable};
/// use std::thread;
///
/// let sum = Promise::<i32, String>::new(|resolve, _reject| {
///     resolve.resolve(vec![2 + 2]);
/// });
///
/// let watcher = {
///     let sum = sum.clone();
///     thread::spawn(move || {
///         sum.observe(
///             |values| assert_eq!(values, [4]),
///             |rejection| panic!("{rejection}"),
///         );
///     })
/// };
/// watcher.join().expect("The watcher thread has panicked");
/// ```
pub struct Promise<T, E> {
    cell: Arc<Cell<T, E>>,
}

/// One-shot success handle bound to a single promise. `resolve` consumes
/// the handle, so the same handle can never deliver two outcomes.
pub struct Resolver<T, E> {
    cell: Arc<Cell<T, E>>,
}

/// One-shot failure handle, the counterpart of [`Resolver`].
pub struct Rejecter<T, E> {
    cell: Arc<Cell<T, E>>,
}

impl<T, E> Resolver<T, E> {
    /// Settles the promise as succeeded with `values`, preserving their
    /// order. Ignored if the promise has already settled.
    pub fn resolve(self, values: Vec<T>) {
        self.cell.settle(Ok(values));
    }
}

impl<T, E> Rejecter<T, E> {
    /// Settles the promise as failed with `values`. Ignored if the
    /// promise has already settled.
    pub fn reject(self, values: Vec<E>) {
        self.cell.settle(Err(Rejection::Values(values)));
    }
}

impl<T, E> Drop for Resolver<T, E> {
    fn drop(&mut self) {
        // When the executor is unwinding, the spawn wrapper settles with
        // the panic description; stand aside so that wins over `Dropped`.
        if !thread::panicking() {
            self.cell.handle_dropped();
        }
    }
}

impl<T, E> Drop for Rejecter<T, E> {
    fn drop(&mut self) {
        if !thread::panicking() {
            self.cell.handle_dropped();
        }
    }
}

impl<T, E> Promise<T, E>
where
    T: Send + 'static,
    E: Send + 'static,
{
    /// Starts `executor` on a new thread, handing it the one-shot
    /// [`Resolver`]/[`Rejecter`] pair for this promise, and returns
    /// immediately.
    ///
    /// The executor signals failure only by calling its reject handle. If
    /// it panics instead, the panic is caught and the promise settles as
    /// [`Rejection::Panic`]; if it returns without touching either
    /// handle, the promise settles as [`Rejection::Dropped`]. Either way
    /// an observer can never block forever on a finished executor.
    pub fn new<X>(executor: X) -> Self
    where
        X: FnOnce(Resolver<T, E>, Rejecter<T, E>) + Send + 'static,
    {
        let cell = Cell::new();
        cell.handle_created();
        cell.handle_created();
        let resolver = Resolver { cell: cell.clone() };
        let rejecter = Rejecter { cell: cell.clone() };
        let outcome = cell.clone();
        thread::spawn(move || {
            let run = catch_unwind(AssertUnwindSafe(|| executor(resolver, rejecter)));
            if let Err(payload) = run {
                outcome.settle(Err(Rejection::Panic(panic_description(payload.as_ref()))));
            }
        });
        Promise { cell }
    }
}

impl<T, E> Promise<T, E> {
    /// A promise settled by whoever holds the cell, used by combinators
    /// that drive settlement themselves instead of through an executor.
    pub(crate) fn from_cell(cell: Arc<Cell<T, E>>) -> Self {
        Promise { cell }
    }
}

impl<T: Clone, E: Clone> Thenable<T, E> for Promise<T, E> {
    fn observe<S, F>(&self, on_success: S, on_failure: F)
    where
        S: FnOnce(Vec<T>),
        F: FnOnce(Rejection<E>),
    {
        match self.cell.wait() {
            Ok(values) => on_success(values),
            Err(rejection) => on_failure(rejection),
        }
    }
}

impl<T, E> Clone for Promise<T, E> {
    fn clone(&self) -> Self {
        Promise {
            cell: self.cell.clone(),
        }
    }
}

fn panic_description(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_owned()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic payload".to_owned()
    }
}
