//! Deferred fallible container and its normalization from every accepted shape

use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};

use futures::future::{BoxFuture, FutureExt};

use super::Payload;
use crate::{Deferred, Fallible, Semigroup};

/// A deferred fallible value: `Deferred<Fallible<A, E>>` with its own algebra.
///
/// The failure payload travels through every short-circuit untouched.
///
/// # Examples
///
/// ```
/// use eddy::{DeferredFallible, Fallible};
///
/// # tokio_test::block_on(async {
/// let parsed = DeferredFallible::<_, String>::success("21")
///     .bind(|s| Fallible::from_result(s.parse::<i32>().map_err(|e| e.to_string())))
///     .map(|n| n * 2);
/// assert_eq!(parsed.await, Fallible::success(42));
/// # });
/// ```
#[must_use = "a DeferredFallible does nothing unless awaited"]
pub struct DeferredFallible<A, E> {
    inner: Deferred<Fallible<A, E>>,
}

impl<A, E> fmt::Debug for DeferredFallible<A, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("DeferredFallible").field(&self.inner).finish()
    }
}

impl<A, E> Future for DeferredFallible<A, E> {
    type Output = Fallible<A, E>;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Fallible<A, E>> {
        Pin::new(&mut self.inner).poll(cx)
    }
}

impl<A, E> DeferredFallible<A, E>
where
    A: Send + 'static,
    E: Send + 'static,
{
    /// Wrap a deferred that already resolves to a `Fallible`.
    pub fn new(inner: Deferred<Fallible<A, E>>) -> Self {
        DeferredFallible { inner }
    }

    /// Resolved to `Success(value)`.
    pub fn success(value: A) -> Self {
        DeferredFallible::new(Deferred::resolved(Fallible::Success(value)))
    }

    /// Resolved to `Failure(error)`.
    pub fn failure(error: E) -> Self {
        DeferredFallible::new(Deferred::resolved(Fallible::Failure(error)))
    }

    /// Adopt a future that resolves to a `Result`.
    pub fn from_result_future<F>(future: F) -> Self
    where
        F: Future<Output = Result<A, E>> + Send + 'static,
    {
        DeferredFallible::new(Deferred::from_future(future.map(Fallible::from_result)))
    }

    /// Normalize any accepted shape. See [the module docs](crate::composed).
    pub fn from_shape(shape: impl Into<FallibleShape<A, E>>) -> Self {
        shape.into().normalize()
    }

    /// The underlying `Deferred<Fallible<A, E>>`.
    pub fn into_deferred(self) -> Deferred<Fallible<A, E>> {
        self.inner
    }

    /// The underlying boxed future.
    pub fn into_inner(self) -> BoxFuture<'static, Fallible<A, E>> {
        self.inner.into_inner()
    }

    /// Transform a success once resolved.
    pub fn map<B, F>(self, f: F) -> DeferredFallible<B, E>
    where
        B: Send + 'static,
        F: FnOnce(A) -> B + Send + 'static,
    {
        DeferredFallible::new(self.inner.map(|fallible| fallible.map(f)))
    }

    /// Transform only the failure channel.
    pub fn map_err<E2, F>(self, f: F) -> DeferredFallible<A, E2>
    where
        E2: Send + 'static,
        F: FnOnce(E) -> E2 + Send + 'static,
    {
        DeferredFallible::new(self.inner.map(|fallible| fallible.map_err(f)))
    }

    /// Chain a step that may itself fail or be deferred.
    ///
    /// The result of `f` is normalized. On `Failure`, `f` is never called and
    /// the same failure payload is passed on.
    pub fn bind<B, S, F>(self, f: F) -> DeferredFallible<B, E>
    where
        B: Send + 'static,
        S: Into<FallibleShape<B, E>>,
        F: FnOnce(A) -> S + Send + 'static,
    {
        DeferredFallible::new(self.inner.bind(move |fallible| match fallible {
            Fallible::Success(value) => {
                let next: DeferredFallible<B, E> = DeferredFallible::from_shape(f(value));
                next.into_deferred()
            }
            Fallible::Failure(error) => Deferred::resolved(Fallible::Failure(error)),
        }))
    }

    /// Combine with another fallible shape.
    ///
    /// Sequential: `other` is only resolved once `self` has succeeded.
    pub fn map2<B, C, F>(self, other: impl Into<FallibleShape<B, E>>, f: F) -> DeferredFallible<C, E>
    where
        B: Send + 'static,
        C: Send + 'static,
        F: FnOnce(A, B) -> C + Send + 'static,
    {
        let other = DeferredFallible::from_shape(other);
        self.bind(move |a| other.map(move |b| f(a, b)))
    }

    /// Combine with two other fallible shapes, left to right.
    pub fn map3<B, C, D, F>(
        self,
        second: impl Into<FallibleShape<B, E>>,
        third: impl Into<FallibleShape<C, E>>,
        f: F,
    ) -> DeferredFallible<D, E>
    where
        B: Send + 'static,
        C: Send + 'static,
        D: Send + 'static,
        F: FnOnce(A, B, C) -> D + Send + 'static,
    {
        self.map2(second, |a, b| (a, b))
            .map2(third, move |(a, b), c| f(a, b, c))
    }

    /// Pair with another fallible shape.
    pub fn zip<B>(self, other: impl Into<FallibleShape<B, E>>) -> DeferredFallible<(A, B), E>
    where
        B: Send + 'static,
    {
        self.map2(other, |a, b| (a, b))
    }

    /// Triple with two other fallible shapes. Succeeds only if all three do.
    pub fn zip3<B, C>(
        self,
        second: impl Into<FallibleShape<B, E>>,
        third: impl Into<FallibleShape<C, E>>,
    ) -> DeferredFallible<(A, B, C), E>
    where
        B: Send + 'static,
        C: Send + 'static,
    {
        self.map3(second, third, |a, b, c| (a, b, c))
    }

    /// Replace a failure by a fallback computed from it.
    pub fn recover<E2, S, F>(self, f: F) -> DeferredFallible<A, E2>
    where
        E2: Send + 'static,
        S: Into<FallibleShape<A, E2>>,
        F: FnOnce(E) -> S + Send + 'static,
    {
        DeferredFallible::new(self.inner.bind(move |fallible| match fallible {
            Fallible::Success(value) => Deferred::resolved(Fallible::Success(value)),
            Fallible::Failure(error) => {
                let next: DeferredFallible<A, E2> = DeferredFallible::from_shape(f(error));
                next.into_deferred()
            }
        }))
    }

    /// Replace a failure by `replacement`, discarding the failure payload.
    pub fn or_else<E2>(self, replacement: impl Into<FallibleShape<A, E2>>) -> DeferredFallible<A, E2>
    where
        E2: Send + 'static,
    {
        let replacement = DeferredFallible::from_shape(replacement);
        self.recover(move |_| replacement)
    }

    /// Resolve to the success value or `default`.
    pub fn get_or_else(self, default: A) -> Deferred<A> {
        self.inner.map(move |fallible| fallible.get_or_else(default))
    }

    /// Normalize every element, resolve them all concurrently, then apply the
    /// fail-fast `Fallible` sequence: the first failure in input order wins.
    pub fn sequence<S, I, C>(iter: I) -> DeferredFallible<C, E>
    where
        I: IntoIterator<Item = S>,
        S: Into<FallibleShape<A, E>>,
        C: FromIterator<A> + Send + 'static,
    {
        let pending = iter
            .into_iter()
            .map(|shape| DeferredFallible::from_shape(shape).into_deferred());
        DeferredFallible::new(Deferred::sequence_vec(pending).map(Fallible::sequence))
    }

    /// [`sequence`](Self::sequence) into a `Vec`.
    pub fn sequence_vec<S, I>(iter: I) -> DeferredFallible<Vec<A>, E>
    where
        I: IntoIterator<Item = S>,
        S: Into<FallibleShape<A, E>>,
    {
        DeferredFallible::sequence(iter)
    }

    /// Map each element to a fallible shape, then [`sequence`](Self::sequence).
    pub fn traverse<T, S, I, F, C>(iter: I, f: F) -> DeferredFallible<C, E>
    where
        I: IntoIterator<Item = T>,
        F: FnMut(T) -> S,
        S: Into<FallibleShape<A, E>>,
        C: FromIterator<A> + Send + 'static,
    {
        DeferredFallible::sequence(iter.into_iter().map(f))
    }

    /// Resolve every element concurrently and accumulate every failure.
    ///
    /// # Examples
    ///
    /// ```
    /// use eddy::{DeferredFallible, Fallible};
    ///
    /// # tokio_test::block_on(async {
    /// let result = DeferredFallible::hoard(vec![
    ///     Fallible::success(5),
    ///     Fallible::failure("one"),
    ///     Fallible::failure("two"),
    /// ]);
    /// assert_eq!(result.await, Fallible::failure(vec!["one", "two"]));
    /// # });
    /// ```
    pub fn hoard<S, I>(iter: I) -> DeferredFallible<Vec<A>, Vec<E>>
    where
        I: IntoIterator<Item = S>,
        S: Into<FallibleShape<A, E>>,
    {
        let pending = iter
            .into_iter()
            .map(|shape| DeferredFallible::from_shape(shape).into_deferred());
        DeferredFallible::new(Deferred::sequence_vec(pending).map(Fallible::hoard))
    }

    /// Like [`hoard`](Self::hoard), merging failures with their [`Semigroup`].
    pub fn hoard_combined<S, I>(iter: I) -> DeferredFallible<Vec<A>, E>
    where
        I: IntoIterator<Item = S>,
        S: Into<FallibleShape<A, E>>,
        E: Semigroup,
    {
        let pending = iter
            .into_iter()
            .map(|shape| DeferredFallible::from_shape(shape).into_deferred());
        DeferredFallible::new(Deferred::sequence_vec(pending).map(crate::fallible::hoard_combined))
    }
}

impl<A, E> From<Deferred<Fallible<A, E>>> for DeferredFallible<A, E> {
    fn from(inner: Deferred<Fallible<A, E>>) -> Self {
        DeferredFallible { inner }
    }
}

impl<A, E> From<DeferredFallible<A, E>> for Deferred<Fallible<A, E>> {
    fn from(composed: DeferredFallible<A, E>) -> Self {
        composed.inner
    }
}

/// Every shape accepted where a [`DeferredFallible`] is expected.
pub enum FallibleShape<A, E> {
    /// Already canonical.
    Composed(DeferredFallible<A, E>),
    /// A plain deferred whose payload may or may not be wrapped.
    Deferred(Deferred<Payload<A, Fallible<A, E>>>),
    /// The native boxed future, payload as above.
    Native(BoxFuture<'static, Payload<A, Fallible<A, E>>>),
    /// The sync container.
    Sync(Fallible<A, E>),
    /// A bare value.
    Raw(A),
}

impl<A, E> fmt::Debug for FallibleShape<A, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FallibleShape::Composed(_) => "Composed",
            FallibleShape::Deferred(_) => "Deferred",
            FallibleShape::Native(_) => "Native",
            FallibleShape::Sync(_) => "Sync",
            FallibleShape::Raw(_) => "Raw",
        };
        write!(f, "FallibleShape::{}", name)
    }
}

impl<A, E> FallibleShape<A, E>
where
    A: Send + 'static,
    E: Send + 'static,
{
    /// A bare value.
    pub fn raw(value: A) -> Self {
        FallibleShape::Raw(value)
    }

    /// A deferred bare value.
    pub fn deferred(deferred: Deferred<A>) -> Self {
        FallibleShape::Deferred(deferred.map(Payload::Raw))
    }

    /// A future resolving to a bare value.
    pub fn future<F>(future: F) -> Self
    where
        F: Future<Output = A> + Send + 'static,
    {
        FallibleShape::Native(future.map(Payload::Raw).boxed())
    }

    /// Coerce to the canonical [`DeferredFallible`].
    pub fn normalize(self) -> DeferredFallible<A, E> {
        match self {
            FallibleShape::Composed(composed) => composed,
            FallibleShape::Deferred(deferred) => DeferredFallible::new(
                deferred.map(|payload| payload.into_container(Fallible::Success)),
            ),
            FallibleShape::Native(future) => FallibleShape::Deferred(Deferred::from(future)).normalize(),
            FallibleShape::Sync(fallible) => DeferredFallible::new(Deferred::resolved(fallible)),
            FallibleShape::Raw(value) => FallibleShape::Sync(Fallible::Success(value)).normalize(),
        }
    }
}

impl<A, E> From<DeferredFallible<A, E>> for FallibleShape<A, E> {
    fn from(composed: DeferredFallible<A, E>) -> Self {
        FallibleShape::Composed(composed)
    }
}

impl<A, E> From<Deferred<Fallible<A, E>>> for FallibleShape<A, E>
where
    A: Send + 'static,
    E: Send + 'static,
{
    fn from(deferred: Deferred<Fallible<A, E>>) -> Self {
        FallibleShape::Deferred(deferred.map(Payload::Wrapped))
    }
}

impl<A, E> From<BoxFuture<'static, Fallible<A, E>>> for FallibleShape<A, E>
where
    A: Send + 'static,
    E: Send + 'static,
{
    fn from(future: BoxFuture<'static, Fallible<A, E>>) -> Self {
        FallibleShape::Native(future.map(Payload::Wrapped).boxed())
    }
}

impl<A, E> From<Fallible<A, E>> for FallibleShape<A, E> {
    fn from(fallible: Fallible<A, E>) -> Self {
        FallibleShape::Sync(fallible)
    }
}

impl<A, E> From<Result<A, E>> for FallibleShape<A, E> {
    fn from(result: Result<A, E>) -> Self {
        FallibleShape::Sync(Fallible::from_result(result))
    }
}
