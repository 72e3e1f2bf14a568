//! Deferred container: a value available after a suspension
//!
//! `Deferred<A>` wraps a boxed, `Send` future and resolves exactly once to an
//! `A`. It is itself a [`Future`], so it can be `.await`ed directly, and
//! [`into_inner`](Deferred::into_inner) hands back the underlying future for
//! code that wants the raw primitive.
//!
//! Like every future, a `Deferred` is lazy: nothing runs until it is polled.
//! Combinators that take several operands (`map2`, `zip`, `zip3`,
//! [`sequence`](Deferred::sequence), [`all`]) poll all of them together, so
//! independent work overlaps; results always follow argument order,
//! whatever order the operands finish in.
//!
//! # Examples
//!
//! ```
//! use eddy::Deferred;
//! use std::time::Duration;
//!
//! # tokio_test::block_on(async {
//! let slow = Deferred::sleep(Duration::from_millis(5)).map(|_| 2);
//! let fast = Deferred::resolved(3);
//!
//! assert_eq!(slow.map2(fast, |a, b| a * b).await, 6);
//! # });
//! ```
//!
//! ## Order preservation
//!
//! ```
//! use eddy::Deferred;
//! use std::time::Duration;
//!
//! # tokio_test::block_on(async {
//! let after = |ms, value| Deferred::sleep(Duration::from_millis(ms)).map(move |_| value);
//! let all = Deferred::sequence_vec(vec![after(30, 1), after(10, 2), after(20, 3)]);
//! assert_eq!(all.await, vec![1, 2, 3]);
//! # });
//! ```

use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};
use std::time::Duration;

use futures::future::{BoxFuture, FutureExt, Shared};

/// A single-resolution asynchronous value.
#[must_use = "a Deferred does nothing unless awaited"]
pub struct Deferred<A> {
    inner: BoxFuture<'static, A>,
}

impl<A> fmt::Debug for Deferred<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Deferred")
            .field("inner", &"<future>")
            .finish()
    }
}

impl<A> Future for Deferred<A> {
    type Output = A;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<A> {
        self.inner.as_mut().poll(cx)
    }
}

impl<A: Send + 'static> Deferred<A> {
    /// An already-resolved deferred.
    pub fn resolved(value: A) -> Self {
        Deferred {
            inner: futures::future::ready(value).boxed(),
        }
    }

    /// Adopt any `Send` future.
    pub fn from_future<F>(future: F) -> Self
    where
        F: Future<Output = A> + Send + 'static,
    {
        Deferred {
            inner: future.boxed(),
        }
    }

    /// A deferred whose value is computed by `f` on first poll.
    pub fn from_fn<F>(f: F) -> Self
    where
        F: FnOnce() -> A + Send + 'static,
    {
        Deferred::from_future(futures::future::lazy(|_| f()))
    }

    /// Normalize any accepted shape (another deferred, a raw boxed future, a
    /// plain value) into a `Deferred`.
    ///
    /// Idempotent: a `Deferred` comes back unchanged.
    pub fn from_shape(shape: impl Into<DeferredShape<A>>) -> Self {
        shape.into().normalize()
    }

    /// Give back the underlying future.
    pub fn into_inner(self) -> BoxFuture<'static, A> {
        self.inner
    }

    /// Transform the eventual value.
    pub fn map<B, F>(self, f: F) -> Deferred<B>
    where
        F: FnOnce(A) -> B + Send + 'static,
        B: Send + 'static,
    {
        Deferred {
            inner: self.inner.map(f).boxed(),
        }
    }

    /// Chain a dependent asynchronous step.
    ///
    /// `f` may return another `Deferred`, a raw `BoxFuture`, or a
    /// [`DeferredShape`]; it is normalized before being awaited.
    ///
    /// # Examples
    ///
    /// ```
    /// use eddy::Deferred;
    /// use futures::FutureExt;
    ///
    /// # tokio_test::block_on(async {
    /// let chained = Deferred::resolved(20)
    ///     .bind(|n| Deferred::resolved(n + 1))
    ///     .bind(|n| async move { n * 2 }.boxed());
    /// assert_eq!(chained.await, 42);
    /// # });
    /// ```
    pub fn bind<B, S, F>(self, f: F) -> Deferred<B>
    where
        F: FnOnce(A) -> S + Send + 'static,
        S: Into<DeferredShape<B>>,
        B: Send + 'static,
    {
        Deferred::from_future(async move {
            let value = self.inner.await;
            let next: Deferred<B> = Deferred::from_shape(f(value));
            next.await
        })
    }

    /// Combine with another deferred. Both are polled concurrently.
    pub fn map2<B, C, F>(self, other: Deferred<B>, f: F) -> Deferred<C>
    where
        B: Send + 'static,
        C: Send + 'static,
        F: FnOnce(A, B) -> C + Send + 'static,
    {
        Deferred::from_future(async move {
            let (a, b) = futures::join!(self.inner, other.inner);
            f(a, b)
        })
    }

    /// Combine with two other deferreds. All three are polled concurrently.
    pub fn map3<B, C, D, F>(self, second: Deferred<B>, third: Deferred<C>, f: F) -> Deferred<D>
    where
        B: Send + 'static,
        C: Send + 'static,
        D: Send + 'static,
        F: FnOnce(A, B, C) -> D + Send + 'static,
    {
        Deferred::from_future(async move {
            let (a, b, c) = futures::join!(self.inner, second.inner, third.inner);
            f(a, b, c)
        })
    }

    /// Pair with another deferred, concurrently.
    pub fn zip<B>(self, other: Deferred<B>) -> Deferred<(A, B)>
    where
        B: Send + 'static,
    {
        self.map2(other, |a, b| (a, b))
    }

    /// Triple with two other deferreds, concurrently.
    pub fn zip3<B, C>(self, second: Deferred<B>, third: Deferred<C>) -> Deferred<(A, B, C)>
    where
        B: Send + 'static,
        C: Send + 'static,
    {
        self.map3(second, third, |a, b, c| (a, b, c))
    }

    /// Run every deferred concurrently and collect the results in input order.
    pub fn sequence<I, C>(iter: I) -> Deferred<C>
    where
        I: IntoIterator<Item = Deferred<A>>,
        C: FromIterator<A> + Send + 'static,
    {
        let pending: Vec<_> = iter.into_iter().map(Deferred::into_inner).collect();
        Deferred::from_future(async move {
            futures::future::join_all(pending)
                .await
                .into_iter()
                .collect::<C>()
        })
    }

    /// [`sequence`](Self::sequence) into a `Vec`.
    pub fn sequence_vec<I>(iter: I) -> Deferred<Vec<A>>
    where
        I: IntoIterator<Item = Deferred<A>>,
    {
        Deferred::sequence(iter)
    }

    /// Map each element to a deferred and run them all concurrently.
    pub fn traverse<T, I, F, C>(iter: I, f: F) -> Deferred<C>
    where
        I: IntoIterator<Item = T>,
        F: FnMut(T) -> Deferred<A>,
        C: FromIterator<A> + Send + 'static,
    {
        Deferred::sequence(iter.into_iter().map(f))
    }

    /// A clonable handle that resolves the underlying future once and hands
    /// every clone the same value.
    ///
    /// # Examples
    ///
    /// ```
    /// use eddy::Deferred;
    ///
    /// # tokio_test::block_on(async {
    /// let shared = Deferred::from_fn(|| "computed once".to_string()).share();
    /// let first = shared.deferred();
    /// let second = shared.deferred();
    /// assert_eq!(first.await, second.await);
    /// # });
    /// ```
    pub fn share(self) -> SharedDeferred<A>
    where
        A: Clone + Sync,
    {
        SharedDeferred {
            inner: self.inner.shared(),
        }
    }
}

impl Deferred<()> {
    /// Resolve after `duration`. The only source of timed suspension.
    pub fn sleep(duration: Duration) -> Self {
        Deferred::from_future(tokio::time::sleep(duration))
    }
}

impl<A: Send + 'static> Deferred<Deferred<A>> {
    /// Collapse a nested deferred.
    pub fn flatten(self) -> Deferred<A> {
        self.bind(|inner| inner)
    }
}

impl<A: Send + 'static> From<BoxFuture<'static, A>> for Deferred<A> {
    fn from(future: BoxFuture<'static, A>) -> Self {
        Deferred { inner: future }
    }
}

/// A resolved-once deferred value that can be handed out many times.
///
/// Created by [`Deferred::share`].
pub struct SharedDeferred<A> {
    inner: Shared<BoxFuture<'static, A>>,
}

impl<A> fmt::Debug for SharedDeferred<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SharedDeferred")
            .field("inner", &"<shared future>")
            .finish()
    }
}

impl<A> Clone for SharedDeferred<A>
where
    A: Clone,
{
    fn clone(&self) -> Self {
        SharedDeferred {
            inner: self.inner.clone(),
        }
    }
}

impl<A> SharedDeferred<A>
where
    A: Clone + Send + Sync + 'static,
{
    /// A fresh `Deferred` over the shared resolution.
    pub fn deferred(&self) -> Deferred<A> {
        Deferred::from_future(self.inner.clone())
    }

    /// The value, if some handle has already driven the resolution.
    pub fn peek(&self) -> Option<&A> {
        self.inner.peek()
    }
}

/// Shapes accepted wherever a `Deferred` is expected.
///
/// `Deferred`s and raw boxed futures convert with `From`; plain values go
/// through [`DeferredShape::raw`]. [`normalize`](DeferredShape::normalize) is
/// the single place that turns any of them into a `Deferred`.
pub enum DeferredShape<A> {
    /// Already canonical.
    Deferred(Deferred<A>),
    /// The raw future primitive.
    Native(BoxFuture<'static, A>),
    /// A plain value, resolved immediately.
    Raw(A),
}

impl<A> fmt::Debug for DeferredShape<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeferredShape::Deferred(_) => f.write_str("DeferredShape::Deferred"),
            DeferredShape::Native(_) => f.write_str("DeferredShape::Native"),
            DeferredShape::Raw(_) => f.write_str("DeferredShape::Raw"),
        }
    }
}

impl<A: Send + 'static> DeferredShape<A> {
    /// A plain value.
    pub fn raw(value: A) -> Self {
        DeferredShape::Raw(value)
    }

    /// Any `Send` future.
    pub fn future<F>(future: F) -> Self
    where
        F: Future<Output = A> + Send + 'static,
    {
        DeferredShape::Native(future.boxed())
    }

    /// Coerce to the canonical `Deferred`.
    pub fn normalize(self) -> Deferred<A> {
        match self {
            DeferredShape::Deferred(deferred) => deferred,
            DeferredShape::Native(future) => Deferred { inner: future },
            DeferredShape::Raw(value) => Deferred::resolved(value),
        }
    }
}

impl<A> From<Deferred<A>> for DeferredShape<A> {
    fn from(deferred: Deferred<A>) -> Self {
        DeferredShape::Deferred(deferred)
    }
}

impl<A> From<BoxFuture<'static, A>> for DeferredShape<A> {
    fn from(future: BoxFuture<'static, A>) -> Self {
        DeferredShape::Native(future)
    }
}

/// Run a tuple of deferreds (arity 2 to 12) concurrently into one tuple.
///
/// # Examples
///
/// ```
/// use eddy::{deferred, Deferred};
///
/// # tokio_test::block_on(async {
/// let all = deferred::all((Deferred::resolved(1), Deferred::resolved("two")));
/// assert_eq!(all.await, (1, "two"));
/// # });
/// ```
pub fn all<T>(deferreds: T) -> Deferred<T::Output>
where
    T: DeferredAll,
{
    deferreds.join_all()
}

/// Tuples of deferreds that can be joined concurrently.
pub trait DeferredAll {
    /// The tuple of resolved values.
    type Output: Send + 'static;

    /// Poll every element together; resolve once all have resolved.
    fn join_all(self) -> Deferred<Self::Output>;
}

macro_rules! impl_deferred_all {
    ($($T:ident),+) => {
        impl<$($T: Send + 'static),+> DeferredAll for ($(Deferred<$T>,)+) {
            type Output = ($($T,)+);

            #[allow(non_snake_case)]
            fn join_all(self) -> Deferred<Self::Output> {
                let ($($T,)+) = self;
                Deferred::from_future(async move {
                    let ($($T,)+) = futures::join!($($T),+);
                    ($($T,)+)
                })
            }
        }
    };
}

impl_deferred_all!(T1, T2);
impl_deferred_all!(T1, T2, T3);
impl_deferred_all!(T1, T2, T3, T4);
impl_deferred_all!(T1, T2, T3, T4, T5);
impl_deferred_all!(T1, T2, T3, T4, T5, T6);
impl_deferred_all!(T1, T2, T3, T4, T5, T6, T7);
impl_deferred_all!(T1, T2, T3, T4, T5, T6, T7, T8);
impl_deferred_all!(T1, T2, T3, T4, T5, T6, T7, T8, T9);
impl_deferred_all!(T1, T2, T3, T4, T5, T6, T7, T8, T9, T10);
impl_deferred_all!(T1, T2, T3, T4, T5, T6, T7, T8, T9, T10, T11);
impl_deferred_all!(T1, T2, T3, T4, T5, T6, T7, T8, T9, T10, T11, T12);

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::VecDeque;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};

    fn after<A: Send + 'static>(ms: u64, value: A) -> Deferred<A> {
        Deferred::sleep(Duration::from_millis(ms)).map(move |_| value)
    }

    #[tokio::test]
    async fn test_resolved_and_map() {
        assert_eq!(Deferred::resolved(2).map(|x| x + 1).await, 3);
    }

    #[tokio::test]
    async fn test_lazy_until_polled() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = calls.clone();
        let deferred = Deferred::from_fn(move || counter.fetch_add(1, Ordering::SeqCst));
        assert_eq!(calls.load(Ordering::SeqCst), 0);
        deferred.await;
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_bind_accepts_native_future() {
        let result = Deferred::resolved(5)
            .bind(|n| -> BoxFuture<'static, i32> { async move { n * 3 }.boxed() })
            .await;
        assert_eq!(result, 15);
    }

    #[tokio::test]
    async fn test_bind_accepts_raw_shape() {
        let result = Deferred::resolved(5).bind(|n| DeferredShape::raw(n + 1)).await;
        assert_eq!(result, 6);
    }

    #[tokio::test]
    async fn test_map2_runs_concurrently() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let first_log = log.clone();
        let second_log = log.clone();

        let first = Deferred::sleep(Duration::from_millis(20)).map(move |_| {
            first_log.lock().unwrap().push("first");
            1
        });
        let second = Deferred::sleep(Duration::from_millis(5)).map(move |_| {
            second_log.lock().unwrap().push("second");
            2
        });

        assert_eq!(first.zip(second).await, (1, 2));
        // the shorter sleep finished first, so both were in flight together
        assert_eq!(*log.lock().unwrap(), vec!["second", "first"]);
    }

    #[tokio::test]
    async fn test_zip3_keeps_argument_order() {
        let result = after(15, 'a').zip3(after(1, 'b'), after(8, 'c')).await;
        assert_eq!(result, ('a', 'b', 'c'));
    }

    #[tokio::test]
    async fn test_sequence_preserves_input_order() {
        let result = Deferred::sequence_vec(vec![after(30, 1), after(10, 2), after(20, 3)]).await;
        assert_eq!(result, vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn test_sequence_into_list() {
        let result: VecDeque<i32> =
            Deferred::sequence(vec![Deferred::resolved(1), Deferred::resolved(2)]).await;
        assert_eq!(result, VecDeque::from(vec![1, 2]));
    }

    #[tokio::test]
    async fn test_traverse() {
        let result: Vec<usize> = Deferred::traverse(vec!["a", "bb"], |s| Deferred::resolved(s.len())).await;
        assert_eq!(result, vec![1, 2]);
    }

    #[tokio::test]
    async fn test_flatten() {
        let nested = Deferred::resolved(Deferred::resolved(9));
        assert_eq!(nested.flatten().await, 9);
    }

    #[tokio::test]
    async fn test_from_shape_is_idempotent() {
        let deferred = Deferred::from_shape(Deferred::resolved(4));
        let again = Deferred::from_shape(deferred);
        assert_eq!(again.await, 4);
    }

    #[tokio::test]
    async fn test_into_inner_interop() {
        let inner = Deferred::resolved("raw").into_inner();
        assert_eq!(inner.await, "raw");
    }

    #[tokio::test]
    async fn test_share_resolves_once() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = calls.clone();
        let shared = Deferred::from_fn(move || {
            counter.fetch_add(1, Ordering::SeqCst);
            7
        })
        .share();

        assert_eq!(shared.peek(), None);
        assert_eq!(shared.deferred().await, 7);
        assert_eq!(shared.clone().deferred().await, 7);
        assert_eq!(shared.peek(), Some(&7));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_tuple_all() {
        let result = all((after(10, 1u8), after(1, "x"), Deferred::resolved(2.5))).await;
        assert_eq!(result, (1u8, "x", 2.5));
    }
}
