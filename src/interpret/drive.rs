//! Drivers: run a [`Routine`] to a single container.

use super::{Routine, Step};
use crate::{
    Deferred, DeferredFallible, DeferredOptional, DeferredShape, Fallible, FallibleShape, Optional,
    OptionalShape,
};

/// Drive a routine that yields optionals.
///
/// Yields may be anything convertible into an `Optional` (`Option` included).
/// The first `Absent` ends the routine; it is not resumed again.
pub fn drive_optional<R, P, Y>(mut routine: R) -> Optional<R::Output>
where
    R: Routine<Payload = P, Yield = Y>,
    Y: Into<Optional<P>>,
{
    let mut step = routine.start();
    let mut position = 0usize;
    loop {
        match step {
            Step::Complete(value) => {
                tracing::trace!(family = "optional", step = position, "computation completed");
                return Optional::Present(value);
            }
            Step::Yielded(container) => match Into::<Optional<P>>::into(container) {
                Optional::Present(payload) => {
                    tracing::trace!(family = "optional", step = position, "resuming with payload");
                    step = routine.resume(payload);
                }
                Optional::Absent => {
                    tracing::trace!(family = "optional", step = position, "short-circuit on absent");
                    return Optional::Absent;
                }
            },
        }
        position += 1;
    }
}

/// Drive a routine that yields fallibles.
///
/// Yields may be anything convertible into a `Fallible` (`Result` included).
/// The first failure is returned as-is and the routine is not resumed again.
pub fn drive_fallible<R, P, Y, E>(mut routine: R) -> Fallible<R::Output, E>
where
    R: Routine<Payload = P, Yield = Y>,
    Y: Into<Fallible<P, E>>,
{
    let mut step = routine.start();
    let mut position = 0usize;
    loop {
        match step {
            Step::Complete(value) => {
                tracing::trace!(family = "fallible", step = position, "computation completed");
                return Fallible::Success(value);
            }
            Step::Yielded(container) => match Into::<Fallible<P, E>>::into(container) {
                Fallible::Success(payload) => {
                    tracing::trace!(family = "fallible", step = position, "resuming with payload");
                    step = routine.resume(payload);
                }
                Fallible::Failure(error) => {
                    tracing::trace!(family = "fallible", step = position, "short-circuit on failure");
                    return Fallible::Failure(error);
                }
            },
        }
        position += 1;
    }
}

/// Drive a routine that yields deferreds.
///
/// Nothing runs until the result is awaited. Each yielded shape is normalized
/// and resolved before the routine is resumed.
///
/// # Examples
///
/// ```
/// use eddy::interpret::{self, Step};
/// use eddy::Deferred;
///
/// # tokio_test::block_on(async {
/// let mut seen = Vec::new();
/// let routine = interpret::from_fn(move |payload: Option<&'static str>| {
///     seen.extend(payload);
///     match seen.len() {
///         0 => Step::Yielded(Deferred::resolved("a")),
///         1 => Step::Yielded(Deferred::resolved("b")),
///         _ => Step::Complete(seen.concat()),
///     }
/// });
/// assert_eq!(interpret::drive_deferred(routine).await, "ab");
/// # });
/// ```
pub fn drive_deferred<R, P, Y>(mut routine: R) -> Deferred<R::Output>
where
    R: Routine<Payload = P, Yield = Y> + Send + 'static,
    R::Output: Send + 'static,
    P: Send + 'static,
    Y: Into<DeferredShape<P>> + Send + 'static,
{
    Deferred::from_future(async move {
        let mut step = routine.start();
        let mut position = 0usize;
        loop {
            match step {
                Step::Complete(value) => {
                    tracing::trace!(family = "deferred", step = position, "computation completed");
                    return value;
                }
                Step::Yielded(container) => {
                    tracing::trace!(family = "deferred", step = position, "suspended");
                    let payload = Deferred::from_shape(container).await;
                    tracing::trace!(family = "deferred", step = position, "resuming with payload");
                    step = routine.resume(payload);
                }
            }
            position += 1;
        }
    })
}

/// Drive a routine that yields deferred optionals.
///
/// Yields are normalized through [`OptionalShape`], so a routine may suspend
/// on `Optional`s, `Deferred<Optional<_>>`s or `DeferredOptional`s alike.
pub fn drive_deferred_optional<R, P, Y>(mut routine: R) -> DeferredOptional<R::Output>
where
    R: Routine<Payload = P, Yield = Y> + Send + 'static,
    R::Output: Send + 'static,
    P: Send + 'static,
    Y: Into<OptionalShape<P>> + Send + 'static,
{
    DeferredOptional::new(Deferred::from_future(async move {
        let mut step = routine.start();
        let mut position = 0usize;
        loop {
            match step {
                Step::Complete(value) => {
                    tracing::trace!(family = "deferred_optional", step = position, "computation completed");
                    return Optional::Present(value);
                }
                Step::Yielded(container) => {
                    tracing::trace!(family = "deferred_optional", step = position, "suspended");
                    match DeferredOptional::from_shape(container).await {
                        Optional::Present(payload) => {
                            tracing::trace!(
                                family = "deferred_optional",
                                step = position,
                                "resuming with payload"
                            );
                            step = routine.resume(payload);
                        }
                        Optional::Absent => {
                            tracing::trace!(
                                family = "deferred_optional",
                                step = position,
                                "short-circuit on absent"
                            );
                            return Optional::Absent;
                        }
                    }
                }
            }
            position += 1;
        }
    }))
}

/// Drive a routine that yields deferred fallibles.
///
/// Yields are normalized through [`FallibleShape`]. The first failure is
/// passed through unchanged.
pub fn drive_deferred_fallible<R, P, Y, E>(mut routine: R) -> DeferredFallible<R::Output, E>
where
    R: Routine<Payload = P, Yield = Y> + Send + 'static,
    R::Output: Send + 'static,
    P: Send + 'static,
    E: Send + 'static,
    Y: Into<FallibleShape<P, E>> + Send + 'static,
{
    DeferredFallible::new(Deferred::from_future(async move {
        let mut step = routine.start();
        let mut position = 0usize;
        loop {
            match step {
                Step::Complete(value) => {
                    tracing::trace!(family = "deferred_fallible", step = position, "computation completed");
                    return Fallible::Success(value);
                }
                Step::Yielded(container) => {
                    tracing::trace!(family = "deferred_fallible", step = position, "suspended");
                    match DeferredFallible::from_shape(container).await {
                        Fallible::Success(payload) => {
                            tracing::trace!(
                                family = "deferred_fallible",
                                step = position,
                                "resuming with payload"
                            );
                            step = routine.resume(payload);
                        }
                        Fallible::Failure(error) => {
                            tracing::trace!(
                                family = "deferred_fallible",
                                step = position,
                                "short-circuit on failure"
                            );
                            return Fallible::Failure(error);
                        }
                    }
                }
            }
            position += 1;
        }
    }))
}
