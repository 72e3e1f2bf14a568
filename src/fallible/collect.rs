//! Collectors: turn many fallibles into one
//!
//! | Collector | Policy | Failure shape |
//! |---|---|---|
//! | [`Fallible::sequence`] | fail-fast | the first failure |
//! | [`Fallible::hoard`] | accumulate | every failure, in input order |
//! | [`hoard_combined`] | accumulate | failures merged with [`Semigroup`] |
//! | [`hoard_indexed`] | accumulate | [`ShapeErrors`] located by position |
//! | [`collect`] | accumulate, keyed | [`ShapeErrors`] located by key |
//!
//! The accumulating collectors always consume the whole input; fail-fast ones
//! stop pulling from the iterator at the first failure.
//!
//! # Examples
//!
//! ```
//! use eddy::fallible::collect;
//! use eddy::Fallible;
//! use std::collections::BTreeMap;
//!
//! let form = vec![
//!     ("name", Fallible::success("Ada".to_string())),
//!     ("email", Fallible::failure("must contain @")),
//!     ("city", Fallible::failure("required")),
//! ];
//!
//! let result: Fallible<BTreeMap<_, _>, _> = collect(form);
//! assert_eq!(
//!     result.unwrap_failure().messages(),
//!     vec!["[email]: must contain @", "[city]: required"]
//! );
//! ```

use std::fmt::Display;

use super::Fallible;
use crate::error::{ShapeError, ShapeErrors};
use crate::Semigroup;

impl<A, E> Fallible<A, E> {
    /// Turn a collection of fallibles into a fallible collection, fail-fast.
    ///
    /// Returns the first failure met; later elements are not pulled from the
    /// iterator. On success the payloads keep input order.
    pub fn sequence<I, C>(iter: I) -> Fallible<C, E>
    where
        I: IntoIterator<Item = Fallible<A, E>>,
        C: FromIterator<A>,
    {
        iter.into_iter()
            .map(Fallible::into_result)
            .collect::<Result<C, E>>()
            .into()
    }

    /// [`sequence`](Self::sequence) into a `Vec`.
    pub fn sequence_vec<I>(iter: I) -> Fallible<Vec<A>, E>
    where
        I: IntoIterator<Item = Fallible<A, E>>,
    {
        Fallible::sequence(iter)
    }

    /// Map each element to a fallible and sequence the results, fail-fast.
    pub fn traverse<T, I, F, C>(iter: I, mut f: F) -> Fallible<C, E>
    where
        I: IntoIterator<Item = T>,
        F: FnMut(T) -> Fallible<A, E>,
        C: FromIterator<A>,
    {
        iter.into_iter()
            .map(|item| f(item).into_result())
            .collect::<Result<C, E>>()
            .into()
    }

    /// Evaluate every fallible and keep all failures.
    ///
    /// Success with every payload only if every input succeeded; otherwise
    /// failure with every failure payload in input order. Successful inputs
    /// contribute nothing to the failure list.
    ///
    /// # Examples
    ///
    /// ```
    /// use eddy::Fallible;
    ///
    /// let result = Fallible::hoard(vec![
    ///     Fallible::success(5),
    ///     Fallible::failure("one"),
    ///     Fallible::failure("two"),
    /// ]);
    /// assert_eq!(result, Fallible::Failure(vec!["one", "two"]));
    /// ```
    pub fn hoard<I>(iter: I) -> Fallible<Vec<A>, Vec<E>>
    where
        I: IntoIterator<Item = Fallible<A, E>>,
    {
        let mut successes = Vec::new();
        let mut failures = Vec::new();

        for fallible in iter {
            match fallible {
                Fallible::Success(value) => successes.push(value),
                Fallible::Failure(error) => failures.push(error),
            }
        }

        if failures.is_empty() {
            Fallible::Success(successes)
        } else {
            Fallible::Failure(failures)
        }
    }
}

/// Accumulate like [`Fallible::hoard`], merging failures with their [`Semigroup`].
///
/// Useful when each failure is already a list: the result is the flat
/// concatenation of every list, in input order.
///
/// # Examples
///
/// ```
/// use eddy::fallible::hoard_combined;
/// use eddy::Fallible;
///
/// let result = hoard_combined(vec![
///     Fallible::<i32, _>::failure(vec!["a", "b"]),
///     Fallible::success(1),
///     Fallible::failure(vec!["c"]),
/// ]);
/// assert_eq!(result, Fallible::Failure(vec!["a", "b", "c"]));
/// ```
pub fn hoard_combined<A, E, I>(iter: I) -> Fallible<Vec<A>, E>
where
    I: IntoIterator<Item = Fallible<A, E>>,
    E: Semigroup,
{
    let mut successes = Vec::new();
    let mut failure: Option<E> = None;

    for fallible in iter {
        match fallible {
            Fallible::Success(value) => successes.push(value),
            Fallible::Failure(error) => {
                failure = Some(match failure {
                    Some(acc) => acc.combine(error),
                    None => error,
                });
            }
        }
    }

    match failure {
        Some(error) => Fallible::Failure(error),
        None => Fallible::Success(successes),
    }
}

/// Accumulate every failure as a [`ShapeError`] located at its input position.
///
/// # Examples
///
/// ```
/// use eddy::fallible::hoard_indexed;
/// use eddy::Fallible;
///
/// let result = hoard_indexed(vec![
///     Fallible::success(1),
///     Fallible::failure("not a number"),
/// ]);
/// assert_eq!(result.unwrap_failure().to_string(), "[1]: not a number");
/// ```
pub fn hoard_indexed<A, E, I>(iter: I) -> Fallible<Vec<A>, ShapeErrors>
where
    I: IntoIterator<Item = Fallible<A, E>>,
    E: Display,
{
    hoard_combined(iter.into_iter().enumerate().map(|(index, fallible)| {
        fallible.map_err(|error| ShapeErrors::from(ShapeError::at_index(index, error.to_string())))
    }))
}

/// Accumulate a record of keyed fallibles into a record of successes.
///
/// Every failure becomes a [`ShapeError`] prefixed by its key. The output record
/// can be any collection built from `(key, value)` pairs (`BTreeMap`,
/// `HashMap`, `Vec<(K, A)>`, ...). Failure order follows input order.
pub fn collect<K, A, E, I, C>(record: I) -> Fallible<C, ShapeErrors>
where
    I: IntoIterator<Item = (K, Fallible<A, E>)>,
    K: Display,
    E: Display,
    C: FromIterator<(K, A)>,
{
    collect_nested(record.into_iter().map(|(key, fallible)| {
        let fallible = fallible.map_err(|error| ShapeErrors::from(ShapeError::new(error.to_string())));
        (key, fallible)
    }))
}

/// Like [`collect`] for fields that are themselves records.
///
/// Each field's [`ShapeErrors`] are nested under its key, so paths come out as
/// `[outer.inner]: reason`.
///
/// # Examples
///
/// ```
/// use eddy::error::{ShapeError, ShapeErrors};
/// use eddy::fallible::collect_nested;
/// use eddy::Fallible;
///
/// let address: Fallible<String, ShapeErrors> =
///     Fallible::failure(ShapeError::at_key("zip", "required").into());
///
/// let result: Fallible<Vec<_>, _> = collect_nested(vec![("address", address)]);
/// assert_eq!(result.unwrap_failure().to_string(), "[address.zip]: required");
/// ```
pub fn collect_nested<K, A, I, C>(record: I) -> Fallible<C, ShapeErrors>
where
    I: IntoIterator<Item = (K, Fallible<A, ShapeErrors>)>,
    K: Display,
    C: FromIterator<(K, A)>,
{
    let mut fields = Vec::new();
    let mut errors = ShapeErrors::new();

    for (key, fallible) in record {
        match fallible {
            Fallible::Success(value) => fields.push((key, value)),
            Fallible::Failure(inner) => errors = errors.combine(inner.nest(key.to_string())),
        }
    }

    if errors.is_empty() {
        Fallible::Success(fields.into_iter().collect())
    } else {
        Fallible::Failure(errors)
    }
}

/// Fail-fast combination of a tuple of fallibles (arity 1 to 12).
///
/// # Examples
///
/// ```
/// use eddy::fallible::sequence_all;
/// use eddy::Fallible;
///
/// let ok = sequence_all((Fallible::<_, &str>::success(1), Fallible::success("x")));
/// assert_eq!(ok, Fallible::Success((1, "x")));
///
/// let first = sequence_all((
///     Fallible::<i32, _>::failure("a"),
///     Fallible::<i32, _>::failure("b"),
/// ));
/// assert_eq!(first, Fallible::Failure("a"));
/// ```
pub fn sequence_all<T, E>(fallibles: T) -> Fallible<T::Output, E>
where
    T: FallibleSequence<E>,
{
    fallibles.sequence_all()
}

/// Accumulating combination of a tuple of fallibles (arity 1 to 12).
///
/// # Examples
///
/// ```
/// use eddy::fallible::hoard_all;
/// use eddy::Fallible;
///
/// let result = hoard_all((
///     Fallible::<i32, _>::failure("a"),
///     Fallible::<&str, _>::success("ok"),
///     Fallible::<u8, _>::failure("c"),
/// ));
/// assert_eq!(result, Fallible::Failure(vec!["a", "c"]));
/// ```
pub fn hoard_all<T, E>(fallibles: T) -> Fallible<T::Output, Vec<E>>
where
    T: FallibleHoard<E>,
{
    fallibles.hoard_all()
}

/// Tuples of fallibles with a fail-fast combination.
pub trait FallibleSequence<E> {
    /// The tuple of success payloads.
    type Output;

    /// Success if every element succeeds, otherwise the first failure.
    fn sequence_all(self) -> Fallible<Self::Output, E>;
}

/// Tuples of fallibles with an accumulating combination.
pub trait FallibleHoard<E> {
    /// The tuple of success payloads.
    type Output;

    /// Success if every element succeeds, otherwise every failure in order.
    fn hoard_all(self) -> Fallible<Self::Output, Vec<E>>;
}

macro_rules! impl_fallible_tuple {
    ($($T:ident),+) => {
        impl<E, $($T),+> FallibleSequence<E> for ($(Fallible<$T, E>,)+) {
            type Output = ($($T,)+);

            #[allow(non_snake_case)]
            fn sequence_all(self) -> Fallible<Self::Output, E> {
                let ($($T,)+) = self;
                $(
                    let $T = match $T {
                        Fallible::Success(value) => value,
                        Fallible::Failure(error) => return Fallible::Failure(error),
                    };
                )+
                Fallible::Success(($($T,)+))
            }
        }

        impl<E, $($T),+> FallibleHoard<E> for ($(Fallible<$T, E>,)+) {
            type Output = ($($T,)+);

            #[allow(non_snake_case)]
            fn hoard_all(self) -> Fallible<Self::Output, Vec<E>> {
                let ($($T,)+) = self;
                let mut failures = Vec::new();
                $(
                    let $T = match $T {
                        Fallible::Success(value) => Some(value),
                        Fallible::Failure(error) => {
                            failures.push(error);
                            None
                        }
                    };
                )+
                match ($($T,)+) {
                    ($(Some($T),)+) => Fallible::Success(($($T,)+)),
                    _ => Fallible::Failure(failures),
                }
            }
        }
    };
}

impl_fallible_tuple!(T1);
impl_fallible_tuple!(T1, T2);
impl_fallible_tuple!(T1, T2, T3);
impl_fallible_tuple!(T1, T2, T3, T4);
impl_fallible_tuple!(T1, T2, T3, T4, T5);
impl_fallible_tuple!(T1, T2, T3, T4, T5, T6);
impl_fallible_tuple!(T1, T2, T3, T4, T5, T6, T7);
impl_fallible_tuple!(T1, T2, T3, T4, T5, T6, T7, T8);
impl_fallible_tuple!(T1, T2, T3, T4, T5, T6, T7, T8, T9);
impl_fallible_tuple!(T1, T2, T3, T4, T5, T6, T7, T8, T9, T10);
impl_fallible_tuple!(T1, T2, T3, T4, T5, T6, T7, T8, T9, T10, T11);
impl_fallible_tuple!(T1, T2, T3, T4, T5, T6, T7, T8, T9, T10, T11, T12);
