//! Associative combination of failure payloads
//!
//! The accumulating collectors ([`hoard_combined`](crate::fallible::hoard_combined),
//! [`DeferredFallible::hoard_combined`](crate::DeferredFallible::hoard_combined))
//! merge every failure they meet instead of stopping at the first one. What
//! "merge" means is given by the failure type's `Semigroup` instance.
//!
//! # Laws
//!
//! `combine` must be associative:
//! ```text
//! a.combine(b).combine(c) == a.combine(b.combine(c))
//! ```
//! Order is significant. Collectors always combine left to right in input
//! order, so `Vec` and `String` failures come out in the order they were met.
//!
//! # Examples
//!
//! ```
//! use eddy::Semigroup;
//!
//! assert_eq!(vec!["one"].combine(vec!["two"]), vec!["one", "two"]);
//! assert_eq!("a".to_string().combine("b".to_string()), "ab");
//! ```

use std::collections::VecDeque;

use crate::Optional;

/// A type with an associative, order-preserving `combine`.
///
/// `combine` takes both operands by value; clone first if you need to keep them.
pub trait Semigroup: Sized {
    /// Combine `self` (left) with `other` (right).
    fn combine(self, other: Self) -> Self;
}

impl<T> Semigroup for Vec<T> {
    #[inline]
    fn combine(mut self, other: Self) -> Self {
        self.extend(other);
        self
    }
}

impl<T> Semigroup for VecDeque<T> {
    #[inline]
    fn combine(mut self, other: Self) -> Self {
        self.extend(other);
        self
    }
}

impl Semigroup for String {
    #[inline]
    fn combine(mut self, other: Self) -> Self {
        self.push_str(&other);
        self
    }
}

// Absent is the identity; two present payloads are combined.
impl<S: Semigroup> Semigroup for Optional<S> {
    fn combine(self, other: Self) -> Self {
        match (self, other) {
            (Optional::Present(a), Optional::Present(b)) => Optional::Present(a.combine(b)),
            (Optional::Present(a), Optional::Absent) => Optional::Present(a),
            (Optional::Absent, other) => other,
        }
    }
}

macro_rules! impl_semigroup_tuple {
    ($($idx:tt $T:ident),+) => {
        impl<$($T: Semigroup),+> Semigroup for ($($T,)+) {
            #[inline]
            fn combine(self, other: Self) -> Self {
                (
                    $(self.$idx.combine(other.$idx)),+
                )
            }
        }
    };
}

impl_semigroup_tuple!(0 T1, 1 T2);
impl_semigroup_tuple!(0 T1, 1 T2, 2 T3);
impl_semigroup_tuple!(0 T1, 1 T2, 2 T3, 3 T4);
