//! Testing utilities for code built on eddy's containers
//!
//! Assertion macros that panic with the offending payload, and (behind the
//! `proptest` feature) `Arbitrary` implementations for [`Optional`] and
//! [`Fallible`].
//!
//! # Examples
//!
//! ```rust
//! use eddy::{assert_absent, assert_failure, assert_present, assert_success, Fallible, Optional};
//!
//! let value = assert_present!(Optional::present(42));
//! assert_eq!(value, 42);
//! assert_absent!(Optional::<i32>::absent());
//!
//! let ok = assert_success!(Fallible::<_, String>::success("done"));
//! assert_eq!(ok, "done");
//! let err = assert_failure!(Fallible::<i32, _>::failure("bad input"));
//! assert_eq!(err, "bad input");
//! ```

#[cfg(feature = "proptest")]
use crate::{Fallible, Optional};

/// Assert that an optional is present and evaluate to its value.
///
/// # Example
///
/// ```rust
/// use eddy::{assert_present, Optional};
///
/// assert_eq!(assert_present!(Optional::present("x")), "x");
/// ```
#[macro_export]
macro_rules! assert_present {
    ($optional:expr) => {
        match $optional {
            $crate::Optional::Present(value) => value,
            $crate::Optional::Absent => {
                panic!("Expected Present, got Absent");
            }
        }
    };
}

/// Assert that an optional is absent.
///
/// # Example
///
/// ```rust
/// use eddy::{assert_absent, Optional};
///
/// assert_absent!(Optional::<u8>::absent());
/// ```
#[macro_export]
macro_rules! assert_absent {
    ($optional:expr) => {
        match $optional {
            $crate::Optional::Absent => {}
            $crate::Optional::Present(value) => {
                panic!("Expected Absent, got Present: {:?}", value);
            }
        }
    };
}

/// Assert that a fallible succeeds and evaluate to its value.
///
/// # Example
///
/// ```rust
/// use eddy::{assert_success, Fallible};
///
/// let value = assert_success!(Fallible::<_, String>::success(42));
/// assert_eq!(value, 42);
/// ```
#[macro_export]
macro_rules! assert_success {
    ($fallible:expr) => {
        match $fallible {
            $crate::Fallible::Success(value) => value,
            $crate::Fallible::Failure(error) => {
                panic!("Expected Success, got Failure: {:?}", error);
            }
        }
    };
}

/// Assert that a fallible fails and evaluate to its failure payload.
///
/// # Example
///
/// ```rust
/// use eddy::{assert_failure, Fallible};
///
/// let error = assert_failure!(Fallible::<i32, _>::failure("oops"));
/// assert_eq!(error, "oops");
/// ```
#[macro_export]
macro_rules! assert_failure {
    ($fallible:expr) => {
        match $fallible {
            $crate::Fallible::Failure(error) => error,
            $crate::Fallible::Success(value) => {
                panic!("Expected Failure, got Success: {:?}", value);
            }
        }
    };
}

/// Assert that a fallible fails with exactly the expected payload.
///
/// Meant for accumulating collectors, where the payload is a list.
///
/// # Example
///
/// ```rust
/// use eddy::{assert_failures, Fallible};
///
/// let hoarded = Fallible::hoard(vec![
///     Fallible::<i32, _>::failure("one"),
///     Fallible::failure("two"),
/// ]);
/// assert_failures!(hoarded, vec!["one", "two"]);
/// ```
#[macro_export]
macro_rules! assert_failures {
    ($fallible:expr, $expected:expr) => {
        match $fallible {
            $crate::Fallible::Failure(errors) => {
                assert_eq!(errors, $expected);
            }
            $crate::Fallible::Success(value) => {
                panic!(
                    "Expected Failure with errors {:?}, got Success: {:?}",
                    $expected, value
                );
            }
        }
    };
}

#[cfg(feature = "proptest")]
use proptest::prelude::*;

#[cfg(feature = "proptest")]
impl<A> Arbitrary for Optional<A>
where
    A: Arbitrary + 'static,
{
    type Parameters = A::Parameters;
    type Strategy = BoxedStrategy<Self>;

    fn arbitrary_with(args: Self::Parameters) -> Self::Strategy {
        prop_oneof![
            1 => Just(()).prop_map(|_| Optional::Absent),
            3 => any_with::<A>(args).prop_map(Optional::Present),
        ]
        .boxed()
    }
}

#[cfg(feature = "proptest")]
impl<A, E> Arbitrary for Fallible<A, E>
where
    A: Arbitrary + 'static,
    E: Arbitrary + 'static,
{
    type Parameters = (A::Parameters, E::Parameters);
    type Strategy = BoxedStrategy<Self>;

    fn arbitrary_with(args: Self::Parameters) -> Self::Strategy {
        let (a_params, e_params) = args;
        prop_oneof![
            any_with::<A>(a_params).prop_map(Fallible::Success),
            any_with::<E>(e_params).prop_map(Fallible::Failure),
        ]
        .boxed()
    }
}
