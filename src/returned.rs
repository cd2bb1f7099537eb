//! The function adapter: build a promise from a plain zero-argument
//! callable by classifying what it returns.

use crate::promise::Promise;

/// Classified return shape of a callable handed to [`Promise::from_fn`].
///
/// The shape is picked statically through the `From` conversions below,
/// one per supported return type, so a callable's settlement convention
/// is visible at the call site.
pub enum Returned<T, E> {
    /// The callable produced nothing; the promise resolves with the
    /// empty value-set.
    Nothing,
    /// One fallible value: `Ok` resolves with it, `Err` rejects with it.
    Checked(Result<T, E>),
    /// Several values; the promise resolves with all of them in order.
    Values(Vec<T>),
}

impl<T, E> From<()> for Returned<T, E> {
    fn from((): ()) -> Self {
        Returned::Nothing
    }
}

impl<T, E> From<Result<T, E>> for Returned<T, E> {
    fn from(checked: Result<T, E>) -> Self {
        Returned::Checked(checked)
    }
}

impl<T, E> From<Vec<T>> for Returned<T, E> {
    fn from(values: Vec<T>) -> Self {
        Returned::Values(values)
    }
}

impl<T, E> Promise<T, E>
where
    T: Send + 'static,
    E: Send + 'static,
{
    /// Builds a promise that runs `f` on its own thread and settles from
    /// the shape of its return value, per [`Returned`].
    ///
    /// # Examples
    ///
    /// ```
    /// use promise_join::{Promise, Thenable};
    ///
    /// let parsed = Promise::<i32, std::num::ParseIntError>::from_fn(|| "42".parse::<i32>());
    /// parsed.observe(
    ///     |values| assert_eq!(values, [42]),
    ///     |rejection| panic!("{rejection}"),
    /// );
    /// ```
    pub fn from_fn<X, R>(f: X) -> Self
    where
        X: FnOnce() -> R + Send + 'static,
        R: Into<Returned<T, E>>,
    {
        Promise::new(move |resolve, reject| match f().into() {
            Returned::Nothing => resolve.resolve(Vec::new()),
            Returned::Checked(Ok(value)) => resolve.resolve(vec![value]),
            Returned::Checked(Err(error)) => reject.reject(vec![error]),
            Returned::Values(values) => resolve.resolve(values),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::Returned;

    #[test]
    fn return_shapes_classify_statically() {
        assert!(matches!(Returned::<i32, String>::from(()), Returned::Nothing));
        assert!(matches!(
            Returned::<i32, String>::from(Ok(1)),
            Returned::Checked(Ok(1))
        ));
        assert!(matches!(
            Returned::<i32, String>::from(vec![1, 2]),
            Returned::Values(_)
        ));
    }
}
