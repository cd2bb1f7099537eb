//! The settlement cell: a single-assignment, multi-reader slot shared by a
//! promise, its settlement handles, and every observer.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Condvar, Mutex};

use crate::Rejection;

/// Outcome stored by a settled cell.
pub(crate) type Outcome<T, E> = Result<Vec<T>, Rejection<E>>;

/// The first `settle` wins and is broadcast to every waiter, present or
/// future; later settle calls are silently ignored. Waiters sleep on a
/// condvar while the cell is pending, so waiting costs no processor time.
pub(crate) struct Cell<T, E> {
    slot: Mutex<Option<Outcome<T, E>>>,
    settled: Condvar,
    handles: AtomicUsize,
}

impl<T, E> Cell<T, E> {
    pub(crate) fn new() -> Arc<Self> {
        Arc::new(Cell {
            slot: Mutex::new(None),
            settled: Condvar::new(),
            handles: AtomicUsize::new(0),
        })
    }

    /// Records the outcome unless one is already recorded, then wakes
    /// every waiter.
    pub(crate) fn settle(&self, outcome: Outcome<T, E>) {
        let mut slot = self.slot.lock().unwrap();
        if slot.is_none() {
            *slot = Some(outcome);
            self.settled.notify_all();
        }
    }

    /// One more live settlement handle is bound to this cell.
    pub(crate) fn handle_created(&self) {
        self.handles.fetch_add(1, Ordering::SeqCst);
    }

    /// A settlement handle went away. Once the last one is gone nobody can
    /// settle the cell anymore, so it settles itself as dropped rather
    /// than leaving waiters stuck.
    pub(crate) fn handle_dropped(&self) {
        if self.handles.fetch_sub(1, Ordering::SeqCst) == 1 {
            self.settle(Err(Rejection::Dropped));
        }
    }
}

impl<T: Clone, E: Clone> Cell<T, E> {
    /// Blocks until the cell is settled and returns a copy of the
    /// outcome. Safe to call from any number of threads, before or after
    /// settlement; every caller sees the same outcome.
    pub(crate) fn wait(&self) -> Outcome<T, E> {
        let mut slot = self.slot.lock().unwrap();
        loop {
            if let Some(outcome) = slot.as_ref() {
                return outcome.clone();
            }
            slot = self.settled.wait(slot).unwrap();
        }
    }
}

#[cfg(test)]
mod tests {
    use std::thread;
    use std::time::Duration;

    use super::Cell;
    use crate::Rejection;

    #[test]
    fn first_settlement_wins() {
        let cell = Cell::<i32, i32>::new();
        cell.settle(Ok(vec![1]));
        cell.settle(Err(Rejection::Values(vec![2])));
        assert_eq!(cell.wait(), Ok(vec![1]));
    }

    #[test]
    fn waiters_before_and_after_settlement_agree() {
        let cell = Cell::<String, ()>::new();
        let early = {
            let cell = cell.clone();
            thread::spawn(move || cell.wait())
        };
        thread::sleep(Duration::from_millis(20));
        cell.settle(Ok(vec!["ready".to_string()]));
        assert_eq!(early.join().unwrap(), Ok(vec!["ready".to_string()]));
        // A latecomer reads the same outcome without blocking forever.
        assert_eq!(cell.wait(), Ok(vec!["ready".to_string()]));
    }

    #[test]
    fn last_handle_drop_settles_as_dropped() {
        let cell = Cell::<(), ()>::new();
        cell.handle_created();
        cell.handle_created();
        cell.handle_dropped();
        cell.handle_dropped();
        assert_eq!(cell.wait(), Err(Rejection::Dropped));
    }

    #[test]
    fn handle_drop_after_settlement_changes_nothing() {
        let cell = Cell::<i32, ()>::new();
        cell.handle_created();
        cell.settle(Ok(vec![9]));
        cell.handle_dropped();
        assert_eq!(cell.wait(), Ok(vec![9]));
    }
}
