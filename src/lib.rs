//! Thread-backed promises in the executor style. A [`Promise`] is created
//! from a function that receives one-shot resolve and reject handles, runs
//! on its own thread, and settles exactly once with an ordered set of
//! success values or an ordered set of failure values. Observers block
//! until settlement; any number of them, early or late, see the same
//! outcome.
//!
//! [`all()`] joins a collection of promises into one derived promise that
//! succeeds with every child's values concatenated in input order, or
//! fails fast with the first child failure.
//!
//! # Examples
//!
//! ```
//! use promise_join::{all, Promise, Thenable};
//!
//! let hello = Promise::<String, ()>::new(|resolve, _reject| {
//!     resolve.resolve(vec!["hello".into()]);
//! });
//! let world = Promise::<String, ()>::new(|resolve, _reject| {
//!     resolve.resolve(vec!["world".into()]);
//! });
//!
//! all(vec![hello, world]).observe(
//!     |values| assert_eq!(values, ["hello", "world"]),
//!     |rejection| panic!("unexpected failure: {rejection}"),
//! );
//! ```

mod cell;

pub mod all;
pub mod promise;
pub mod returned;

pub use all::all;
pub use promise::{Promise, Rejecter, Resolver};
pub use returned::Returned;

use thiserror::Error;

/// Why a promise failed.
///
/// `Values` is the ordinary case: the executor called its reject handle.
/// The other two variants give a defined, observable outcome to failure
/// modes that would otherwise leave the promise pending forever.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Rejection<E> {
    /// The executor rejected with these values.
    #[error("promise rejected")]
    Values(Vec<E>),
    /// The executor panicked. The payload description stands in for the
    /// reject call the executor never got to make.
    #[error("promise executor panicked: {0}")]
    Panic(String),
    /// Every settlement handle was dropped while the promise was pending.
    #[error("promise dropped without settling")]
    Dropped,
}

/// The capability shared by [`Promise`] and anything promise-shaped:
/// block until the outcome is known, then hand it to exactly one of two
/// callbacks. [`all()`] accepts any `Thenable`, so joins compose.
pub trait Thenable<T, E> {
    /// Blocks the calling thread until settlement, then invokes
    /// `on_success` with the success values or `on_failure` with the
    /// rejection. Exactly one of the two fires, exactly once, per call.
    fn observe<S, F>(&self, on_success: S, on_failure: F)
    where
        S: FnOnce(Vec<T>),
        F: FnOnce(Rejection<E>);
}
