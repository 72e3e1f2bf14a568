//! Computation expressions: linear code over suspending containers
//!
//! Three surfaces, one semantics. Each suspension point is resolved before the
//! next one is requested, payloads arrive in suspension order, and the first
//! absence or failure ends the computation without resuming it again.
//!
//! - [`Routine`]: an explicit resumable routine. It yields a container at each
//!   suspension ([`Step::Yielded`]) and receives that container's payload on
//!   resume, until it [completes](Step::Complete). The `drive_*` functions
//!   run a routine to one final container, normalizing every yielded value
//!   first.
//! - [`Do`]: a fluent builder that binds named steps into an accumulating
//!   record (`let_`), runs side-effecting steps (`do_`), and finishes with
//!   `return_` or `ignore`.
//! - [`chain!`](crate::chain): do-notation over `bind`, for steps whose
//!   payload types differ.
//!
//! # Example
//!
//! ```
//! use eddy::interpret::{self, Step};
//! use eddy::Fallible;
//!
//! let mut total = 0;
//! let mut position = 0;
//! let routine = interpret::from_fn(move |payload: Option<i32>| {
//!     total += payload.unwrap_or(0);
//!     position += 1;
//!     match position {
//!         1 => Step::Yielded(Fallible::<_, String>::success(5)),
//!         2 => Step::Yielded(Fallible::success(10)),
//!         3 => Step::Yielded(Fallible::success(15)),
//!         _ => Step::Complete(total),
//!     }
//! });
//!
//! assert_eq!(interpret::drive_fallible(routine), Fallible::success(30));
//! ```

mod builder;
mod drive;
mod macros;
mod record;

use std::marker::PhantomData;

pub use builder::{Do, DoDeferred, DoDeferredFallible, DoDeferredOptional, DoFallible, DoOptional};
pub use drive::{drive_deferred, drive_deferred_fallible, drive_deferred_optional, drive_fallible, drive_optional};
pub use record::Append;

/// One advance of a [`Routine`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step<Y, R> {
    /// Suspended on a container; resume with its payload.
    Yielded(Y),
    /// Finished with the final value.
    Complete(R),
}

impl<Y, R> Step<Y, R> {
    /// Whether the routine has finished.
    pub fn is_complete(&self) -> bool {
        matches!(self, Step::Complete(_))
    }
}

/// A resumable routine that suspends on containers.
///
/// The driver calls [`start`](Routine::start) once and then
/// [`resume`](Routine::resume) with the payload of every container the routine
/// yields, for as long as those containers are present/successful.
pub trait Routine {
    /// What the routine receives on resume.
    type Payload;
    /// What the routine suspends on.
    type Yield;
    /// The final value.
    type Output;

    /// Run up to the first suspension point.
    fn start(&mut self) -> Step<Self::Yield, Self::Output>;

    /// Continue with the payload of the last yielded container.
    fn resume(&mut self, payload: Self::Payload) -> Step<Self::Yield, Self::Output>;
}

/// A [`Routine`] backed by a closure.
///
/// Created by [`from_fn`].
pub struct FnRoutine<F, P> {
    f: F,
    _payload: PhantomData<fn(P)>,
}

impl<F, P> std::fmt::Debug for FnRoutine<F, P> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FnRoutine").finish_non_exhaustive()
    }
}

/// Build a routine from a closure.
///
/// The closure receives `None` on start and `Some(payload)` on every resume.
pub fn from_fn<P, Y, O, F>(f: F) -> FnRoutine<F, P>
where
    F: FnMut(Option<P>) -> Step<Y, O>,
{
    FnRoutine {
        f,
        _payload: PhantomData,
    }
}

impl<P, Y, O, F> Routine for FnRoutine<F, P>
where
    F: FnMut(Option<P>) -> Step<Y, O>,
{
    type Payload = P;
    type Yield = Y;
    type Output = O;

    fn start(&mut self) -> Step<Y, O> {
        (self.f)(None)
    }

    fn resume(&mut self, payload: P) -> Step<Y, O> {
        (self.f)(Some(payload))
    }
}
