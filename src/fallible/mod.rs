//! Fallible container: success or a typed failure
//!
//! `Fallible<A, E>` is either `Success(A)` or `Failure(E)`. The failure payload
//! is ordinary data; it is never a panic and it flows through `bind` chains
//! untouched until someone inspects it.
//!
//! The algebra mirrors [`Optional`](crate::Optional): `map`, `bind`, `map2`,
//! `map3`, `zip`, `zip3`, `fold`, plus `map_err` for the failure channel. Two
//! collection policies live in [`collect`]:
//!
//! - **fail-fast** ([`Fallible::sequence`]): the first failure wins;
//! - **accumulate** ([`Fallible::hoard`], [`collect::collect`]): every input is
//!   evaluated and all failures are returned in input order.
//!
//! # Examples
//!
//! ```
//! use eddy::Fallible;
//!
//! fn parse(s: &str) -> Fallible<i32, String> {
//!     Fallible::catch(|| s.parse::<i32>()).map_err(|e| format!("{s}: {e}"))
//! }
//!
//! assert_eq!(parse("4").map2(parse("5"), |a, b| a * b), Fallible::Success(20));
//! assert!(parse("four").map2(parse("5"), |a, b| a * b).is_failure());
//! ```
//!
//! ## Fail-fast versus accumulate
//!
//! ```
//! use eddy::Fallible;
//!
//! let inputs = || vec![
//!     Fallible::success(5),
//!     Fallible::failure("one"),
//!     Fallible::failure("two"),
//! ];
//!
//! assert_eq!(Fallible::sequence_vec(inputs()), Fallible::Failure("one"));
//! assert_eq!(Fallible::hoard(inputs()), Fallible::Failure(vec!["one", "two"]));
//! ```

pub mod collect;

pub use collect::{
    collect, collect_nested, hoard_all, hoard_combined, hoard_indexed, sequence_all, FallibleHoard,
    FallibleSequence,
};

use crate::error::{ExtractFailureError, ExtractSuccessError};

/// Success with a value, or failure with a typed payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Fallible<A, E> {
    /// The computation succeeded.
    Success(A),
    /// The computation failed with a domain value.
    Failure(E),
}

impl<A, E> Fallible<A, E> {
    /// Wrap a success value.
    #[inline]
    pub fn success(value: A) -> Self {
        Fallible::Success(value)
    }

    /// Wrap a failure payload.
    #[inline]
    pub fn failure(error: E) -> Self {
        Fallible::Failure(error)
    }

    /// Lift a std `Result`.
    #[inline]
    pub fn from_result(result: Result<A, E>) -> Self {
        match result {
            Ok(value) => Fallible::Success(value),
            Err(error) => Fallible::Failure(error),
        }
    }

    /// Run a `Result`-returning closure and lift its outcome.
    ///
    /// # Examples
    ///
    /// ```
    /// use eddy::Fallible;
    ///
    /// let parsed = Fallible::catch(|| "12".parse::<u8>());
    /// assert_eq!(parsed.value(), Ok(&12));
    /// ```
    pub fn catch<F>(f: F) -> Self
    where
        F: FnOnce() -> Result<A, E>,
    {
        Fallible::from_result(f())
    }

    /// Back to a std `Result`.
    #[inline]
    pub fn into_result(self) -> Result<A, E> {
        match self {
            Fallible::Success(value) => Ok(value),
            Fallible::Failure(error) => Err(error),
        }
    }

    /// True for `Success`.
    #[inline]
    pub fn is_success(&self) -> bool {
        matches!(self, Fallible::Success(_))
    }

    /// True for `Failure`.
    #[inline]
    pub fn is_failure(&self) -> bool {
        matches!(self, Fallible::Failure(_))
    }

    /// Borrow both channels.
    #[inline]
    pub fn as_ref(&self) -> Fallible<&A, &E> {
        match self {
            Fallible::Success(value) => Fallible::Success(value),
            Fallible::Failure(error) => Fallible::Failure(error),
        }
    }

    /// Borrow the success payload, or fail with [`ExtractSuccessError`].
    pub fn value(&self) -> Result<&A, ExtractSuccessError<&E>> {
        match self {
            Fallible::Success(value) => Ok(value),
            Fallible::Failure(error) => Err(ExtractSuccessError::new(error)),
        }
    }

    /// Take the success payload, or fail with [`ExtractSuccessError`].
    pub fn into_value(self) -> Result<A, ExtractSuccessError<E>> {
        match self {
            Fallible::Success(value) => Ok(value),
            Fallible::Failure(error) => Err(ExtractSuccessError::new(error)),
        }
    }

    /// Borrow the failure payload, or fail with [`ExtractFailureError`].
    pub fn error(&self) -> Result<&E, ExtractFailureError<&A>> {
        match self {
            Fallible::Success(value) => Err(ExtractFailureError::new(value)),
            Fallible::Failure(error) => Ok(error),
        }
    }

    /// Take the failure payload, or fail with [`ExtractFailureError`].
    pub fn into_error(self) -> Result<E, ExtractFailureError<A>> {
        match self {
            Fallible::Success(value) => Err(ExtractFailureError::new(value)),
            Fallible::Failure(error) => Ok(error),
        }
    }

    /// Take the success payload.
    ///
    /// # Panics
    ///
    /// Panics with the [`ExtractSuccessError`] message on `Failure`.
    #[track_caller]
    pub fn unwrap(self) -> A
    where
        E: std::fmt::Debug,
    {
        match self.into_value() {
            Ok(value) => value,
            Err(err) => panic!("{}", err),
        }
    }

    /// Take the failure payload.
    ///
    /// # Panics
    ///
    /// Panics with the [`ExtractFailureError`] message on `Success`.
    #[track_caller]
    pub fn unwrap_failure(self) -> E
    where
        A: std::fmt::Debug,
    {
        match self.into_error() {
            Ok(error) => error,
            Err(err) => panic!("{}", err),
        }
    }

    /// The success payload, or `default`.
    #[inline]
    pub fn get_or_else(self, default: A) -> A {
        match self {
            Fallible::Success(value) => value,
            Fallible::Failure(_) => default,
        }
    }

    /// Transform the success payload.
    #[inline]
    pub fn map<B, F>(self, f: F) -> Fallible<B, E>
    where
        F: FnOnce(A) -> B,
    {
        match self {
            Fallible::Success(value) => Fallible::Success(f(value)),
            Fallible::Failure(error) => Fallible::Failure(error),
        }
    }

    /// Transform the failure payload only.
    #[inline]
    pub fn map_err<E2, F>(self, f: F) -> Fallible<A, E2>
    where
        F: FnOnce(E) -> E2,
    {
        match self {
            Fallible::Success(value) => Fallible::Success(value),
            Fallible::Failure(error) => Fallible::Failure(f(error)),
        }
    }

    /// Transform both channels.
    #[inline]
    pub fn bimap<B, E2, F, G>(self, on_success: F, on_failure: G) -> Fallible<B, E2>
    where
        F: FnOnce(A) -> B,
        G: FnOnce(E) -> E2,
    {
        match self {
            Fallible::Success(value) => Fallible::Success(on_success(value)),
            Fallible::Failure(error) => Fallible::Failure(on_failure(error)),
        }
    }

    /// Chain a computation that may fail. The failure payload passes through
    /// unchanged and `f` is not called.
    #[inline]
    pub fn bind<B, F>(self, f: F) -> Fallible<B, E>
    where
        F: FnOnce(A) -> Fallible<B, E>,
    {
        match self {
            Fallible::Success(value) => f(value),
            Fallible::Failure(error) => Fallible::Failure(error),
        }
    }

    /// Collapse both cases into one value.
    #[inline]
    pub fn fold<B, S, F>(self, on_success: S, on_failure: F) -> B
    where
        S: FnOnce(A) -> B,
        F: FnOnce(E) -> B,
    {
        match self {
            Fallible::Success(value) => on_success(value),
            Fallible::Failure(error) => on_failure(error),
        }
    }

    /// `self` on success, otherwise `replacement`.
    #[inline]
    pub fn or_else<E2>(self, replacement: Fallible<A, E2>) -> Fallible<A, E2> {
        match self {
            Fallible::Success(value) => Fallible::Success(value),
            Fallible::Failure(_) => replacement,
        }
    }

    /// Recover from a failure by computing a new fallible from it.
    #[inline]
    pub fn recover<E2, F>(self, f: F) -> Fallible<A, E2>
    where
        F: FnOnce(E) -> Fallible<A, E2>,
    {
        match self {
            Fallible::Success(value) => Fallible::Success(value),
            Fallible::Failure(error) => f(error),
        }
    }

    /// Exchange the two channels.
    #[inline]
    pub fn swap(self) -> Fallible<E, A> {
        match self {
            Fallible::Success(value) => Fallible::Failure(value),
            Fallible::Failure(error) => Fallible::Success(error),
        }
    }

    /// Combine two fallibles. The first failure, in argument order, wins.
    #[inline]
    pub fn map2<B, C, F>(self, other: Fallible<B, E>, f: F) -> Fallible<C, E>
    where
        F: FnOnce(A, B) -> C,
    {
        match (self, other) {
            (Fallible::Success(a), Fallible::Success(b)) => Fallible::Success(f(a, b)),
            (Fallible::Failure(e), _) | (_, Fallible::Failure(e)) => Fallible::Failure(e),
        }
    }

    /// Combine three fallibles. The first failure, in argument order, wins.
    #[inline]
    pub fn map3<B, C, D, F>(
        self,
        second: Fallible<B, E>,
        third: Fallible<C, E>,
        f: F,
    ) -> Fallible<D, E>
    where
        F: FnOnce(A, B, C) -> D,
    {
        match (self, second, third) {
            (Fallible::Success(a), Fallible::Success(b), Fallible::Success(c)) => {
                Fallible::Success(f(a, b, c))
            }
            (Fallible::Failure(e), _, _)
            | (_, Fallible::Failure(e), _)
            | (_, _, Fallible::Failure(e)) => Fallible::Failure(e),
        }
    }

    /// Pair two success payloads.
    #[inline]
    pub fn zip<B>(self, other: Fallible<B, E>) -> Fallible<(A, B), E> {
        self.map2(other, |a, b| (a, b))
    }

    /// Triple three success payloads. Every operand must succeed.
    #[inline]
    pub fn zip3<B, C>(
        self,
        second: Fallible<B, E>,
        third: Fallible<C, E>,
    ) -> Fallible<(A, B, C), E> {
        self.map3(second, third, |a, b, c| (a, b, c))
    }
}

impl<A, E> Fallible<Fallible<A, E>, E> {
    /// Remove one level of nesting.
    #[inline]
    pub fn flatten(self) -> Fallible<A, E> {
        self.bind(|inner| inner)
    }
}

impl<A, E> From<Result<A, E>> for Fallible<A, E> {
    fn from(result: Result<A, E>) -> Self {
        Fallible::from_result(result)
    }
}

impl<A, E> From<Fallible<A, E>> for Result<A, E> {
    fn from(fallible: Fallible<A, E>) -> Self {
        fallible.into_result()
    }
}

impl<A, E> FromIterator<Fallible<A, E>> for Fallible<Vec<A>, E> {
    fn from_iter<I: IntoIterator<Item = Fallible<A, E>>>(iter: I) -> Self {
        Fallible::sequence(iter)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_result_roundtrip() {
        assert_eq!(Fallible::from(Ok::<_, &str>(1)), Fallible::Success(1));
        assert_eq!(Fallible::<i32, _>::from(Err("e")), Fallible::Failure("e"));
        assert_eq!(Result::from(Fallible::<i32, &str>::failure("e")), Err("e"));
    }

    #[test]
    fn test_extraction_errors() {
        let failed = Fallible::<i32, &str>::failure("bad");
        assert_eq!(failed.into_value(), Err(ExtractSuccessError::new("bad")));

        let succeeded = Fallible::<i32, &str>::success(3);
        assert_eq!(succeeded.into_error(), Err(ExtractFailureError::new(3)));
        assert_eq!(succeeded.value(), Ok(&3));
        assert_eq!(Fallible::<i32, &str>::failure("x").error(), Ok(&"x"));
    }

    #[test]
    #[should_panic(expected = "attempted to extract a success value from a failure")]
    fn test_unwrap_failure_panics() {
        Fallible::<i32, &str>::failure("bad").unwrap();
    }

    #[test]
    #[should_panic(expected = "attempted to extract a failure value from a success")]
    fn test_unwrap_failure_on_success_panics() {
        Fallible::<i32, &str>::success(1).unwrap_failure();
    }

    #[test]
    fn test_map_err_leaves_success() {
        let ok = Fallible::<_, &str>::success(1).map_err(|e| e.len());
        assert_eq!(ok, Fallible::Success(1));

        let err = Fallible::<i32, _>::failure("four").map_err(|e| e.len());
        assert_eq!(err, Fallible::Failure(4));
    }

    #[test]
    fn test_bind_short_circuits() {
        let mut called = false;
        let result = Fallible::<i32, _>::failure("stop").bind(|x| {
            called = true;
            Fallible::success(x)
        });
        assert_eq!(result, Fallible::Failure("stop"));
        assert!(!called);
    }

    #[test]
    fn test_map2_first_failure_wins() {
        let a = Fallible::<i32, _>::failure("first");
        let b = Fallible::<i32, _>::failure("second");
        assert_eq!(a.map2(b, |x, y| x + y), Fallible::Failure("first"));
    }

    #[test]
    fn test_zip3_requires_every_success() {
        let ok = Fallible::<_, &str>::success(1)
            .zip3(Fallible::success(2), Fallible::success(3));
        assert_eq!(ok, Fallible::Success((1, 2, 3)));

        let middle = Fallible::<i32, &str>::success(1)
            .zip3(Fallible::<i32, _>::failure("mid"), Fallible::success(3));
        assert_eq!(middle, Fallible::Failure("mid"));

        let first = Fallible::<i32, &str>::failure("head")
            .zip3(Fallible::<i32, _>::success(2), Fallible::<i32, _>::success(3));
        assert_eq!(first, Fallible::Failure("head"));
    }

    #[test]
    fn test_recover_and_or_else() {
        let recovered = Fallible::<i32, &str>::failure("x").recover(|_| Fallible::<_, ()>::success(0));
        assert_eq!(recovered, Fallible::Success(0));
        assert_eq!(
            Fallible::<i32, &str>::failure("x").or_else(Fallible::<i32, u8>::failure(7)),
            Fallible::Failure(7)
        );
    }

    #[test]
    fn test_fold_and_swap() {
        assert_eq!(Fallible::<i32, &str>::success(2).fold(|v| v * 2, |_| 0), 4);
        assert_eq!(Fallible::<i32, &str>::failure("e").swap(), Fallible::Success("e"));
    }

    #[test]
    fn test_flatten() {
        let nested: Fallible<Fallible<i32, &str>, &str> = Fallible::success(Fallible::failure("in"));
        assert_eq!(nested.flatten(), Fallible::Failure("in"));
    }
}
