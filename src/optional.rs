//! Optional container: a value that may be absent
//!
//! `Optional<A>` is either `Present(A)` or `Absent`. It carries the same
//! information as `Option<A>` but exposes the container algebra shared by every
//! family in this crate (`map`, `bind`, `map2`, `zip`, fail-fast `sequence`),
//! and it is the inner container of [`DeferredOptional`](crate::DeferredOptional).
//!
//! This module only holds the pure algebra. Conversions to other families
//! (`to_fallible`, `to_deferred`) live in
//! [`bridge`](crate::bridge).
//!
//! # Examples
//!
//! ```
//! use eddy::Optional;
//!
//! let total = Optional::present(2)
//!     .map2(Optional::present(3), |a, b| a + b)
//!     .filter(|n| *n > 4);
//! assert_eq!(total, Optional::Present(5));
//!
//! let missing = Optional::present(2).map2(Optional::<i32>::absent(), |a, b| a + b);
//! assert!(missing.is_absent());
//! ```
//!
//! ## Fail-fast sequencing
//!
//! ```
//! use eddy::Optional;
//!
//! let all = Optional::sequence_vec(vec![Optional::present(1), Optional::present(2)]);
//! assert_eq!(all, Optional::Present(vec![1, 2]));
//!
//! let one_missing = Optional::sequence_vec(vec![Optional::present(1), Optional::absent()]);
//! assert_eq!(one_missing, Optional::Absent);
//! ```

use crate::error::EmptyValueError;

/// Presence or absence of a value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Optional<A> {
    /// A value is present.
    Present(A),
    /// No value.
    Absent,
}

impl<A> Default for Optional<A> {
    fn default() -> Self {
        Optional::Absent
    }
}

impl<A> Optional<A> {
    /// Wrap a present value.
    #[inline]
    pub fn present(value: A) -> Self {
        Optional::Present(value)
    }

    /// The absent value.
    #[inline]
    pub fn absent() -> Self {
        Optional::Absent
    }

    /// Coerce a nullable value: `Some` becomes `Present`, `None` becomes `Absent`.
    #[inline]
    pub fn from_option(option: Option<A>) -> Self {
        match option {
            Some(value) => Optional::Present(value),
            None => Optional::Absent,
        }
    }

    /// Back to a std `Option`.
    #[inline]
    pub fn into_option(self) -> Option<A> {
        match self {
            Optional::Present(value) => Some(value),
            Optional::Absent => None,
        }
    }

    /// True for `Present`.
    #[inline]
    pub fn is_present(&self) -> bool {
        matches!(self, Optional::Present(_))
    }

    /// True for `Absent`.
    #[inline]
    pub fn is_absent(&self) -> bool {
        matches!(self, Optional::Absent)
    }

    /// Borrow the payload.
    #[inline]
    pub fn as_ref(&self) -> Optional<&A> {
        match self {
            Optional::Present(value) => Optional::Present(value),
            Optional::Absent => Optional::Absent,
        }
    }

    /// Borrow the payload, or fail with [`EmptyValueError`].
    ///
    /// # Examples
    ///
    /// ```
    /// use eddy::{Optional, EmptyValueError};
    ///
    /// assert_eq!(Optional::present(7).value(), Ok(&7));
    /// assert_eq!(Optional::<i32>::absent().value(), Err(EmptyValueError));
    /// ```
    pub fn value(&self) -> Result<&A, EmptyValueError> {
        match self {
            Optional::Present(value) => Ok(value),
            Optional::Absent => Err(EmptyValueError),
        }
    }

    /// Take the payload, or fail with [`EmptyValueError`].
    pub fn into_value(self) -> Result<A, EmptyValueError> {
        match self {
            Optional::Present(value) => Ok(value),
            Optional::Absent => Err(EmptyValueError),
        }
    }

    /// Take the payload.
    ///
    /// # Panics
    ///
    /// Panics with the [`EmptyValueError`] message when `Absent`.
    #[track_caller]
    pub fn unwrap(self) -> A {
        match self {
            Optional::Present(value) => value,
            Optional::Absent => panic!("{}", EmptyValueError),
        }
    }

    /// The payload, or `default` when absent.
    #[inline]
    pub fn get_or_else(self, default: A) -> A {
        match self {
            Optional::Present(value) => value,
            Optional::Absent => default,
        }
    }

    /// The payload, or a lazily computed default when absent.
    #[inline]
    pub fn get_or_else_with<F>(self, default: F) -> A
    where
        F: FnOnce() -> A,
    {
        match self {
            Optional::Present(value) => value,
            Optional::Absent => default(),
        }
    }

    /// Transform the payload.
    #[inline]
    pub fn map<B, F>(self, f: F) -> Optional<B>
    where
        F: FnOnce(A) -> B,
    {
        match self {
            Optional::Present(value) => Optional::Present(f(value)),
            Optional::Absent => Optional::Absent,
        }
    }

    /// Chain a computation that may itself be absent.
    ///
    /// `f` is never called on `Absent`.
    ///
    /// # Examples
    ///
    /// ```
    /// use eddy::Optional;
    ///
    /// let half = |n: i32| if n % 2 == 0 { Optional::present(n / 2) } else { Optional::absent() };
    /// assert_eq!(Optional::present(8).bind(half).bind(half), Optional::Present(2));
    /// assert_eq!(Optional::present(6).bind(half).bind(half), Optional::Absent);
    /// ```
    #[inline]
    pub fn bind<B, F>(self, f: F) -> Optional<B>
    where
        F: FnOnce(A) -> Optional<B>,
    {
        match self {
            Optional::Present(value) => f(value),
            Optional::Absent => Optional::Absent,
        }
    }

    /// Keep the payload only if it satisfies `predicate`.
    #[inline]
    pub fn filter<P>(self, predicate: P) -> Self
    where
        P: FnOnce(&A) -> bool,
    {
        match self {
            Optional::Present(value) => {
                if predicate(&value) {
                    Optional::Present(value)
                } else {
                    Optional::Absent
                }
            }
            Optional::Absent => Optional::Absent,
        }
    }

    /// Collapse both cases into one value.
    #[inline]
    pub fn fold<B, N, P>(self, on_absent: N, on_present: P) -> B
    where
        N: FnOnce() -> B,
        P: FnOnce(A) -> B,
    {
        match self {
            Optional::Present(value) => on_present(value),
            Optional::Absent => on_absent(),
        }
    }

    /// `self` if present, otherwise `replacement`.
    #[inline]
    pub fn or_else(self, replacement: Optional<A>) -> Self {
        match self {
            Optional::Present(value) => Optional::Present(value),
            Optional::Absent => replacement,
        }
    }

    /// `self` if present, otherwise the result of `replacement`.
    #[inline]
    pub fn or_else_with<F>(self, replacement: F) -> Self
    where
        F: FnOnce() -> Optional<A>,
    {
        match self {
            Optional::Present(value) => Optional::Present(value),
            Optional::Absent => replacement(),
        }
    }

    /// True when present and the payload satisfies `predicate`.
    pub fn exists<P>(&self, predicate: P) -> bool
    where
        P: FnOnce(&A) -> bool,
    {
        match self {
            Optional::Present(value) => predicate(value),
            Optional::Absent => false,
        }
    }

    /// True when present and equal to `candidate`.
    pub fn contains(&self, candidate: &A) -> bool
    where
        A: PartialEq,
    {
        self.exists(|value| value == candidate)
    }

    /// Run `f` on the payload, if any.
    pub fn for_each<F>(self, f: F)
    where
        F: FnOnce(A),
    {
        if let Optional::Present(value) = self {
            f(value);
        }
    }

    /// Combine two optionals. Absent if either is absent.
    #[inline]
    pub fn map2<B, C, F>(self, other: Optional<B>, f: F) -> Optional<C>
    where
        F: FnOnce(A, B) -> C,
    {
        match (self, other) {
            (Optional::Present(a), Optional::Present(b)) => Optional::Present(f(a, b)),
            _ => Optional::Absent,
        }
    }

    /// Combine three optionals. Absent if any is absent.
    #[inline]
    pub fn map3<B, C, D, F>(self, second: Optional<B>, third: Optional<C>, f: F) -> Optional<D>
    where
        F: FnOnce(A, B, C) -> D,
    {
        match (self, second, third) {
            (Optional::Present(a), Optional::Present(b), Optional::Present(c)) => {
                Optional::Present(f(a, b, c))
            }
            _ => Optional::Absent,
        }
    }

    /// Pair two payloads.
    #[inline]
    pub fn zip<B>(self, other: Optional<B>) -> Optional<(A, B)> {
        self.map2(other, |a, b| (a, b))
    }

    /// Triple three payloads. Every operand must be present.
    ///
    /// # Examples
    ///
    /// ```
    /// use eddy::Optional;
    ///
    /// assert_eq!(
    ///     Optional::present(1).zip3(Optional::present('b'), Optional::present("c")),
    ///     Optional::Present((1, 'b', "c"))
    /// );
    /// assert!(Optional::<i32>::absent()
    ///     .zip3(Optional::present(2), Optional::present(3))
    ///     .is_absent());
    /// ```
    #[inline]
    pub fn zip3<B, C>(self, second: Optional<B>, third: Optional<C>) -> Optional<(A, B, C)> {
        self.map3(second, third, |a, b, c| (a, b, c))
    }

    /// Turn a collection of optionals into an optional collection.
    ///
    /// Stops at the first `Absent`; later elements are not pulled from the
    /// iterator. Payload order follows input order.
    pub fn sequence<I, C>(iter: I) -> Optional<C>
    where
        I: IntoIterator<Item = Optional<A>>,
        C: FromIterator<A>,
    {
        iter.into_iter()
            .map(Optional::into_option)
            .collect::<Option<C>>()
            .into()
    }

    /// [`sequence`](Self::sequence) into a `Vec`.
    pub fn sequence_vec<I>(iter: I) -> Optional<Vec<A>>
    where
        I: IntoIterator<Item = Optional<A>>,
    {
        Optional::sequence(iter)
    }

    /// Map each element to an optional and sequence the results, fail-fast.
    ///
    /// `f` is not called for elements after the first absent result.
    pub fn traverse<T, I, F, C>(iter: I, mut f: F) -> Optional<C>
    where
        I: IntoIterator<Item = T>,
        F: FnMut(T) -> Optional<A>,
        C: FromIterator<A>,
    {
        iter.into_iter()
            .map(|item| f(item).into_option())
            .collect::<Option<C>>()
            .into()
    }
}

impl<A> Optional<Optional<A>> {
    /// Remove one level of nesting.
    #[inline]
    pub fn flatten(self) -> Optional<A> {
        self.bind(|inner| inner)
    }
}

impl<A> From<Option<A>> for Optional<A> {
    fn from(option: Option<A>) -> Self {
        Optional::from_option(option)
    }
}

impl<A> From<Optional<A>> for Option<A> {
    fn from(optional: Optional<A>) -> Self {
        optional.into_option()
    }
}

impl<A> FromIterator<Optional<A>> for Optional<Vec<A>> {
    fn from_iter<I: IntoIterator<Item = Optional<A>>>(iter: I) -> Self {
        Optional::sequence(iter)
    }
}

/// Combine a tuple of optionals (arity 1 to 12) into an optional tuple.
///
/// # Examples
///
/// ```
/// use eddy::{optional, Optional};
///
/// let all = optional::all((Optional::present(1), Optional::present("two")));
/// assert_eq!(all, Optional::Present((1, "two")));
/// ```
pub fn all<T>(optionals: T) -> Optional<T::Output>
where
    T: OptionalAll,
{
    optionals.all_present()
}

/// Tuples of optionals that can be combined into one optional tuple.
pub trait OptionalAll {
    /// The tuple of payloads.
    type Output;

    /// Present only if every element is present.
    fn all_present(self) -> Optional<Self::Output>;
}

macro_rules! impl_optional_all {
    ($($T:ident),+) => {
        impl<$($T),+> OptionalAll for ($(Optional<$T>,)+) {
            type Output = ($($T,)+);

            #[allow(non_snake_case)]
            fn all_present(self) -> Optional<Self::Output> {
                let ($($T,)+) = self;
                match ($($T,)+) {
                    ($(Optional::Present($T),)+) => Optional::Present(($($T,)+)),
                    #[allow(unreachable_patterns)]
                    _ => Optional::Absent,
                }
            }
        }
    };
}

impl_optional_all!(T1);
impl_optional_all!(T1, T2);
impl_optional_all!(T1, T2, T3);
impl_optional_all!(T1, T2, T3, T4);
impl_optional_all!(T1, T2, T3, T4, T5);
impl_optional_all!(T1, T2, T3, T4, T5, T6);
impl_optional_all!(T1, T2, T3, T4, T5, T6, T7);
impl_optional_all!(T1, T2, T3, T4, T5, T6, T7, T8);
impl_optional_all!(T1, T2, T3, T4, T5, T6, T7, T8, T9);
impl_optional_all!(T1, T2, T3, T4, T5, T6, T7, T8, T9, T10);
impl_optional_all!(T1, T2, T3, T4, T5, T6, T7, T8, T9, T10, T11);
impl_optional_all!(T1, T2, T3, T4, T5, T6, T7, T8, T9, T10, T11, T12);
