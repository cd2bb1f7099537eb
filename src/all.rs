//! The join combinator: merge an ordered collection of promises into one.

use std::sync::mpsc;
use std::thread;

use crate::cell::Cell;
use crate::promise::Promise;
use crate::{Rejection, Thenable};

/// A child's settlement, tagged with its input position.
enum ChildSettled<T, E> {
    Success(usize, Vec<T>),
    Failure(usize, Rejection<E>),
}

/// Joins `children` into one derived [`Promise`].
///
/// The join succeeds once every child has succeeded, with every child's
/// value-set concatenated in input order (not completion order). It fails
/// fast on the first child failure, propagating that child's
/// [`Rejection`] verbatim; children that are still running keep running,
/// but their outcomes are discarded. An empty collection resolves
/// immediately with no values.
///
/// One observer thread watches each child and reports over a channel to a
/// driver thread, which sleeps in `recv` between settlements. When
/// several children have already failed by the time the driver picks a
/// failure, the lowest input index wins, so the reported failure is
/// deterministic rather than a race between siblings.
///
/// # Examples
///
/// ```
/// use promise_join::{all, Promise, Thenable};
///
/// let a = Promise::<i32, String>::from_fn(|| vec![1]);
/// let b = Promise::<i32, String>::from_fn(|| vec![2, 3]);
///
/// all(vec![a, b]).observe(
///     |values| assert_eq!(values, [1, 2, 3]),
///     |rejection| panic!("{rejection}"),
/// );
/// ```
pub fn all<P, T, E>(children: Vec<P>) -> Promise<T, E>
where
    P: Thenable<T, E> + Send + 'static,
    T: Clone + Send + 'static,
    E: Clone + Send + 'static,
{
    let cell = Cell::new();
    let joined = cell.clone();
    let count = children.len();
    let (events, settled) = mpsc::channel();

    for (index, child) in children.into_iter().enumerate() {
        let on_success = events.clone();
        let on_failure = events.clone();
        thread::spawn(move || {
            child.observe(
                move |values| {
                    // The driver may have failed fast and hung up.
                    let _ = on_success.send(ChildSettled::Success(index, values));
                },
                move |rejection| {
                    let _ = on_failure.send(ChildSettled::Failure(index, rejection));
                },
            );
        });
    }
    drop(events);

    thread::spawn(move || {
        let mut slots: Vec<Option<Vec<T>>> = (0..count).map(|_| None).collect();
        let mut succeeded = 0;

        while succeeded < count {
            match settled.recv() {
                Ok(ChildSettled::Success(index, values)) => {
                    slots[index] = Some(values);
                    succeeded += 1;
                }
                Ok(ChildSettled::Failure(index, rejection)) => {
                    joined.settle(Err(lowest_failure(index, rejection, &settled)));
                    return;
                }
                // Every observer hung up without reporting, which takes a
                // panicking observer callback. Same outcome as a promise
                // nobody can settle anymore.
                Err(mpsc::RecvError) => {
                    joined.settle(Err(Rejection::Dropped));
                    return;
                }
            }
        }

        let values = slots.into_iter().flatten().flatten().collect();
        joined.settle(Ok(values));
    });

    Promise::from_cell(cell)
}

/// Input-order tie-break: among the failures already delivered by the
/// time the first one is seen, pick the lowest-index one.
fn lowest_failure<T, E>(
    index: usize,
    rejection: Rejection<E>,
    settled: &mpsc::Receiver<ChildSettled<T, E>>,
) -> Rejection<E> {
    let mut first = (index, rejection);
    while let Ok(event) = settled.try_recv() {
        if let ChildSettled::Failure(contender, rejection) = event {
            if contender < first.0 {
                first = (contender, rejection);
            }
        }
    }
    first.1
}
