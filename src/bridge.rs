//! Conversions between container families
//!
//! `optional`, `fallible` and `deferred` know nothing about each other; every
//! crossing from one family to another lives here. Converting a composed
//! container only touches its inner sync container, never the deferral.
//!
//! # Examples
//!
//! ```
//! use eddy::{Fallible, Optional};
//!
//! assert_eq!(Optional::present(1).to_fallible("missing"), Fallible::success(1));
//! assert_eq!(Optional::<i32>::absent().to_fallible("missing"), Fallible::failure("missing"));
//! assert_eq!(Fallible::<i32, &str>::failure("boom").to_optional(), Optional::absent());
//! ```

use crate::{Deferred, DeferredFallible, DeferredOptional, Fallible, Optional};

impl<A> Optional<A> {
    /// `Present(a)` becomes `Success(a)`; `Absent` becomes `Failure(error)`.
    pub fn to_fallible<E>(self, error: E) -> Fallible<A, E> {
        match self {
            Optional::Present(value) => Fallible::Success(value),
            Optional::Absent => Fallible::Failure(error),
        }
    }

    /// Like [`to_fallible`](Self::to_fallible) with a lazily built failure.
    pub fn to_fallible_with<E, F>(self, error: F) -> Fallible<A, E>
    where
        F: FnOnce() -> E,
    {
        match self {
            Optional::Present(value) => Fallible::Success(value),
            Optional::Absent => Fallible::Failure(error()),
        }
    }
}

impl<A: Send + 'static> Optional<A> {
    /// Lift into an already-resolved [`DeferredOptional`].
    pub fn to_deferred(self) -> DeferredOptional<A> {
        DeferredOptional::new(Deferred::resolved(self))
    }
}

impl<A, E> Fallible<A, E> {
    /// Keep the success, drop the failure payload.
    pub fn to_optional(self) -> Optional<A> {
        match self {
            Fallible::Success(value) => Optional::Present(value),
            Fallible::Failure(_) => Optional::Absent,
        }
    }
}

impl<A, E> Fallible<A, E>
where
    A: Send + 'static,
    E: Send + 'static,
{
    /// Lift into an already-resolved [`DeferredFallible`].
    pub fn to_deferred(self) -> DeferredFallible<A, E> {
        DeferredFallible::new(Deferred::resolved(self))
    }
}

impl<A: Send + 'static> Deferred<A> {
    /// The eventual value, always present.
    pub fn to_deferred_optional(self) -> DeferredOptional<A> {
        DeferredOptional::new(self.map(Optional::Present))
    }

    /// The eventual value, always a success.
    pub fn to_deferred_fallible<E>(self) -> DeferredFallible<A, E>
    where
        E: Send + 'static,
    {
        DeferredFallible::new(self.map(Fallible::Success))
    }
}

impl<A: Send + 'static, E: Send + 'static> Deferred<Result<A, E>> {
    /// Reinterpret a deferred `Result` as a [`DeferredFallible`].
    pub fn into_deferred_fallible(self) -> DeferredFallible<A, E> {
        DeferredFallible::new(self.map(Fallible::from_result))
    }
}

impl<A: Send + 'static> DeferredOptional<A> {
    /// Absence becomes `Failure(error)`.
    ///
    /// # Examples
    ///
    /// ```
    /// use eddy::{DeferredOptional, Fallible};
    ///
    /// # tokio_test::block_on(async {
    /// let lookup = DeferredOptional::<u32>::absent().to_deferred_fallible("user not found");
    /// assert_eq!(lookup.await, Fallible::failure("user not found"));
    /// # });
    /// ```
    pub fn to_deferred_fallible<E>(self, error: E) -> DeferredFallible<A, E>
    where
        E: Send + 'static,
    {
        DeferredFallible::new(self.into_deferred().map(move |optional| optional.to_fallible(error)))
    }
}

impl<A, E> DeferredFallible<A, E>
where
    A: Send + 'static,
    E: Send + 'static,
{
    /// Failure becomes absence; the failure payload is dropped.
    pub fn to_deferred_optional(self) -> DeferredOptional<A> {
        DeferredOptional::new(self.into_deferred().map(Fallible::to_optional))
    }
}
