//! Deferred optional container and its normalization from every accepted shape

use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};

use futures::future::{BoxFuture, FutureExt};

use super::Payload;
use crate::{Deferred, Optional};

/// A deferred optional value: `Deferred<Optional<A>>` with its own algebra.
///
/// # Examples
///
/// ```
/// use eddy::{DeferredOptional, Optional};
///
/// # tokio_test::block_on(async {
/// let result = DeferredOptional::present(4)
///     .bind(|n| Optional::present(n * 10))
///     .map(|n| n + 2);
/// assert_eq!(result.await, Optional::present(42));
///
/// let skipped = DeferredOptional::<i32>::absent().map(|n| n + 1);
/// assert_eq!(skipped.await, Optional::absent());
/// # });
/// ```
#[must_use = "a DeferredOptional does nothing unless awaited"]
pub struct DeferredOptional<A> {
    inner: Deferred<Optional<A>>,
}

impl<A> fmt::Debug for DeferredOptional<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("DeferredOptional").field(&self.inner).finish()
    }
}

impl<A> Future for DeferredOptional<A> {
    type Output = Optional<A>;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Optional<A>> {
        Pin::new(&mut self.inner).poll(cx)
    }
}

impl<A: Send + 'static> DeferredOptional<A> {
    /// Wrap a deferred that already resolves to an `Optional`.
    pub fn new(inner: Deferred<Optional<A>>) -> Self {
        DeferredOptional { inner }
    }

    /// Resolved to `Present(value)`.
    pub fn present(value: A) -> Self {
        DeferredOptional::new(Deferred::resolved(Optional::Present(value)))
    }

    /// Resolved to `Absent`.
    pub fn absent() -> Self {
        DeferredOptional::new(Deferred::resolved(Optional::Absent))
    }

    /// Normalize any accepted shape. See [the module docs](crate::composed).
    pub fn from_shape(shape: impl Into<OptionalShape<A>>) -> Self {
        shape.into().normalize()
    }

    /// The underlying `Deferred<Optional<A>>`.
    pub fn into_deferred(self) -> Deferred<Optional<A>> {
        self.inner
    }

    /// The underlying boxed future.
    pub fn into_inner(self) -> BoxFuture<'static, Optional<A>> {
        self.inner.into_inner()
    }

    /// Transform a present value once resolved.
    pub fn map<B, F>(self, f: F) -> DeferredOptional<B>
    where
        B: Send + 'static,
        F: FnOnce(A) -> B + Send + 'static,
    {
        DeferredOptional::new(self.inner.map(|optional| optional.map(f)))
    }

    /// Chain a step that may itself be absent or deferred.
    ///
    /// The result of `f` is normalized, so it may be a `DeferredOptional`, an
    /// `Optional`, a `Deferred<Optional<_>>` or any other [`OptionalShape`].
    /// On `Absent`, `f` is never called.
    pub fn bind<B, S, F>(self, f: F) -> DeferredOptional<B>
    where
        B: Send + 'static,
        S: Into<OptionalShape<B>>,
        F: FnOnce(A) -> S + Send + 'static,
    {
        DeferredOptional::new(self.inner.bind(move |optional| match optional {
            Optional::Present(value) => {
                let next: DeferredOptional<B> = DeferredOptional::from_shape(f(value));
                next.into_deferred()
            }
            Optional::Absent => Deferred::resolved(Optional::Absent),
        }))
    }

    /// Combine with another optional shape.
    ///
    /// Sequential: `other` is only resolved once `self` is present.
    pub fn map2<B, C, F>(self, other: impl Into<OptionalShape<B>>, f: F) -> DeferredOptional<C>
    where
        B: Send + 'static,
        C: Send + 'static,
        F: FnOnce(A, B) -> C + Send + 'static,
    {
        let other = DeferredOptional::from_shape(other);
        self.bind(move |a| other.map(move |b| f(a, b)))
    }

    /// Combine with two other optional shapes, left to right.
    pub fn map3<B, C, D, F>(
        self,
        second: impl Into<OptionalShape<B>>,
        third: impl Into<OptionalShape<C>>,
        f: F,
    ) -> DeferredOptional<D>
    where
        B: Send + 'static,
        C: Send + 'static,
        D: Send + 'static,
        F: FnOnce(A, B, C) -> D + Send + 'static,
    {
        self.map2(second, |a, b| (a, b))
            .map2(third, move |(a, b), c| f(a, b, c))
    }

    /// Pair with another optional shape.
    pub fn zip<B>(self, other: impl Into<OptionalShape<B>>) -> DeferredOptional<(A, B)>
    where
        B: Send + 'static,
    {
        self.map2(other, |a, b| (a, b))
    }

    /// Triple with two other optional shapes. Present only if all three are.
    pub fn zip3<B, C>(
        self,
        second: impl Into<OptionalShape<B>>,
        third: impl Into<OptionalShape<C>>,
    ) -> DeferredOptional<(A, B, C)>
    where
        B: Send + 'static,
        C: Send + 'static,
    {
        self.map3(second, third, |a, b, c| (a, b, c))
    }

    /// Keep a present value only if `predicate` holds.
    pub fn filter<P>(self, predicate: P) -> Self
    where
        P: FnOnce(&A) -> bool + Send + 'static,
    {
        DeferredOptional::new(self.inner.map(|optional| optional.filter(predicate)))
    }

    /// Fall back to `replacement` when absent.
    pub fn or_else(self, replacement: impl Into<OptionalShape<A>>) -> Self {
        let replacement = DeferredOptional::from_shape(replacement);
        DeferredOptional::new(self.inner.bind(move |optional| match optional {
            Optional::Present(value) => Deferred::resolved(Optional::Present(value)),
            Optional::Absent => replacement.into_deferred(),
        }))
    }

    /// Fall back to a lazily built replacement when absent.
    pub fn or_else_with<S, F>(self, replacement: F) -> Self
    where
        S: Into<OptionalShape<A>>,
        F: FnOnce() -> S + Send + 'static,
    {
        DeferredOptional::new(self.inner.bind(move |optional| match optional {
            Optional::Present(value) => Deferred::resolved(Optional::Present(value)),
            Optional::Absent => {
                let next: DeferredOptional<A> = DeferredOptional::from_shape(replacement());
                next.into_deferred()
            }
        }))
    }

    /// Resolve to the present value or `default`.
    pub fn get_or_else(self, default: A) -> Deferred<A> {
        self.inner.map(move |optional| optional.get_or_else(default))
    }

    /// Normalize every element, resolve them all concurrently, then apply the
    /// fail-fast `Optional` sequence.
    pub fn sequence<S, I, C>(iter: I) -> DeferredOptional<C>
    where
        I: IntoIterator<Item = S>,
        S: Into<OptionalShape<A>>,
        C: FromIterator<A> + Send + 'static,
    {
        let pending = iter
            .into_iter()
            .map(|shape| DeferredOptional::from_shape(shape).into_deferred());
        DeferredOptional::new(Deferred::sequence_vec(pending).map(Optional::sequence))
    }

    /// [`sequence`](Self::sequence) into a `Vec`.
    pub fn sequence_vec<S, I>(iter: I) -> DeferredOptional<Vec<A>>
    where
        I: IntoIterator<Item = S>,
        S: Into<OptionalShape<A>>,
    {
        DeferredOptional::sequence(iter)
    }

    /// Map each element to an optional shape, then [`sequence`](Self::sequence).
    pub fn traverse<T, S, I, F, C>(iter: I, f: F) -> DeferredOptional<C>
    where
        I: IntoIterator<Item = T>,
        F: FnMut(T) -> S,
        S: Into<OptionalShape<A>>,
        C: FromIterator<A> + Send + 'static,
    {
        DeferredOptional::sequence(iter.into_iter().map(f))
    }
}

impl<A> From<Deferred<Optional<A>>> for DeferredOptional<A> {
    fn from(inner: Deferred<Optional<A>>) -> Self {
        DeferredOptional { inner }
    }
}

impl<A> From<DeferredOptional<A>> for Deferred<Optional<A>> {
    fn from(composed: DeferredOptional<A>) -> Self {
        composed.inner
    }
}

/// Every shape accepted where a [`DeferredOptional`] is expected.
pub enum OptionalShape<A> {
    /// Already canonical.
    Composed(DeferredOptional<A>),
    /// A plain deferred whose payload may or may not be wrapped.
    Deferred(Deferred<Payload<A, Optional<A>>>),
    /// The native boxed future, payload as above.
    Native(BoxFuture<'static, Payload<A, Optional<A>>>),
    /// The sync container.
    Sync(Optional<A>),
    /// A bare value.
    Raw(A),
}

impl<A> fmt::Debug for OptionalShape<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            OptionalShape::Composed(_) => "Composed",
            OptionalShape::Deferred(_) => "Deferred",
            OptionalShape::Native(_) => "Native",
            OptionalShape::Sync(_) => "Sync",
            OptionalShape::Raw(_) => "Raw",
        };
        write!(f, "OptionalShape::{}", name)
    }
}

impl<A: Send + 'static> OptionalShape<A> {
    /// A bare value.
    pub fn raw(value: A) -> Self {
        OptionalShape::Raw(value)
    }

    /// A deferred bare value.
    pub fn deferred(deferred: Deferred<A>) -> Self {
        OptionalShape::Deferred(deferred.map(Payload::Raw))
    }

    /// A future resolving to a bare value.
    pub fn future<F>(future: F) -> Self
    where
        F: Future<Output = A> + Send + 'static,
    {
        OptionalShape::Native(future.map(Payload::Raw).boxed())
    }

    /// Coerce to the canonical [`DeferredOptional`].
    pub fn normalize(self) -> DeferredOptional<A> {
        match self {
            OptionalShape::Composed(composed) => composed,
            OptionalShape::Deferred(deferred) => DeferredOptional::new(
                deferred.map(|payload| payload.into_container(Optional::Present)),
            ),
            OptionalShape::Native(future) => OptionalShape::Deferred(Deferred::from(future)).normalize(),
            OptionalShape::Sync(optional) => DeferredOptional::new(Deferred::resolved(optional)),
            OptionalShape::Raw(value) => OptionalShape::Sync(Optional::Present(value)).normalize(),
        }
    }
}

impl<A> From<DeferredOptional<A>> for OptionalShape<A> {
    fn from(composed: DeferredOptional<A>) -> Self {
        OptionalShape::Composed(composed)
    }
}

impl<A: Send + 'static> From<Deferred<Optional<A>>> for OptionalShape<A> {
    fn from(deferred: Deferred<Optional<A>>) -> Self {
        OptionalShape::Deferred(deferred.map(Payload::Wrapped))
    }
}

impl<A: Send + 'static> From<BoxFuture<'static, Optional<A>>> for OptionalShape<A> {
    fn from(future: BoxFuture<'static, Optional<A>>) -> Self {
        OptionalShape::Native(future.map(Payload::Wrapped).boxed())
    }
}

impl<A> From<Optional<A>> for OptionalShape<A> {
    fn from(optional: Optional<A>) -> Self {
        OptionalShape::Sync(optional)
    }
}
