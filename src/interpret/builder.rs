//! Fluent `let_` / `do_` / `return_` builders
//!
//! A builder carries a record (a flat tuple, starting from `()`) inside its
//! family's container. `let_` runs a step that sees the record so far and
//! appends the step's payload as a new field; `do_` runs a step for its effect
//! and keeps the record; `return_` maps the final record and `ignore`
//! discards it. Steps run one after the other, and the first absence or
//! failure skips every later step.
//!
//! # Examples
//!
//! ```
//! use eddy::interpret::Do;
//! use eddy::Fallible;
//!
//! let total = Do::fallible::<String>()
//!     .let_(|_| Fallible::success(3))
//!     .let_(|(first,)| Fallible::success(first * 2))
//!     .return_(|(first, second)| first + second);
//!
//! assert_eq!(total, Fallible::success(9));
//! ```
//!
//! Deferred builders accept any shape their family normalizes:
//!
//! ```
//! use eddy::interpret::Do;
//! use eddy::{Deferred, Optional, OptionalShape};
//!
//! # tokio_test::block_on(async {
//! let greeting = Do::deferred_optional()
//!     .let_(|_| OptionalShape::raw("hello"))
//!     .let_(|_| Deferred::resolved(Optional::present("world")))
//!     .return_(|(a, b)| format!("{a} {b}"));
//!
//! assert_eq!(greeting.await, Optional::present("hello world".to_string()));
//! # });
//! ```

use super::Append;
use crate::{
    Deferred, DeferredFallible, DeferredOptional, DeferredShape, Fallible, FallibleShape, Optional,
    OptionalShape,
};

/// Entry point for the fluent builders.
#[derive(Debug, Clone, Copy, Default)]
pub struct Do;

impl Do {
    /// Start an `Optional` computation.
    pub fn optional() -> DoOptional<()> {
        DoOptional {
            state: Optional::Present(()),
        }
    }

    /// Start a `Fallible` computation with failure type `E`.
    pub fn fallible<E>() -> DoFallible<(), E> {
        DoFallible {
            state: Fallible::Success(()),
        }
    }

    /// Start a `Deferred` computation.
    pub fn deferred() -> DoDeferred<()> {
        DoDeferred {
            state: Deferred::resolved(()),
        }
    }

    /// Start a `DeferredOptional` computation.
    pub fn deferred_optional() -> DoDeferredOptional<()> {
        DoDeferredOptional {
            state: DeferredOptional::present(()),
        }
    }

    /// Start a `DeferredFallible` computation with failure type `E`.
    pub fn deferred_fallible<E: Send + 'static>() -> DoDeferredFallible<(), E> {
        DoDeferredFallible {
            state: DeferredFallible::success(()),
        }
    }
}

/// Builder over [`Optional`]. Created by [`Do::optional`].
#[derive(Debug, Clone, PartialEq)]
#[must_use]
pub struct DoOptional<R> {
    state: Optional<R>,
}

impl<R> DoOptional<R> {
    /// Bind the step's payload as the next record field.
    pub fn let_<B, S, F>(self, f: F) -> DoOptional<R::Output>
    where
        R: Append<B>,
        S: Into<Optional<B>>,
        F: FnOnce(&R) -> S,
    {
        DoOptional {
            state: self.state.bind(|record| {
                let next: Optional<B> = f(&record).into();
                next.map(|field| record.append(field))
            }),
        }
    }

    /// Run a step for its effect; its payload is discarded.
    pub fn do_<B, S, F>(self, f: F) -> Self
    where
        S: Into<Optional<B>>,
        F: FnOnce(&R) -> S,
    {
        DoOptional {
            state: self.state.bind(|record| {
                let next: Optional<B> = f(&record).into();
                next.map(|_| record)
            }),
        }
    }

    /// Map the final record.
    pub fn return_<B, F>(self, f: F) -> Optional<B>
    where
        F: FnOnce(R) -> B,
    {
        self.state.map(f)
    }

    /// Discard the final record.
    pub fn ignore(self) -> Optional<()> {
        self.state.map(|_| ())
    }

    /// The final record as-is.
    pub fn finish(self) -> Optional<R> {
        self.state
    }
}

/// Builder over [`Fallible`]. Created by [`Do::fallible`].
#[derive(Debug, Clone, PartialEq)]
#[must_use]
pub struct DoFallible<R, E> {
    state: Fallible<R, E>,
}

impl<R, E> DoFallible<R, E> {
    /// Bind the step's payload as the next record field.
    pub fn let_<B, S, F>(self, f: F) -> DoFallible<R::Output, E>
    where
        R: Append<B>,
        S: Into<Fallible<B, E>>,
        F: FnOnce(&R) -> S,
    {
        DoFallible {
            state: self.state.bind(|record| {
                let next: Fallible<B, E> = f(&record).into();
                next.map(|field| record.append(field))
            }),
        }
    }

    /// Run a step for its effect; its payload is discarded.
    pub fn do_<B, S, F>(self, f: F) -> Self
    where
        S: Into<Fallible<B, E>>,
        F: FnOnce(&R) -> S,
    {
        DoFallible {
            state: self.state.bind(|record| {
                let next: Fallible<B, E> = f(&record).into();
                next.map(|_| record)
            }),
        }
    }

    /// Map the final record.
    pub fn return_<B, F>(self, f: F) -> Fallible<B, E>
    where
        F: FnOnce(R) -> B,
    {
        self.state.map(f)
    }

    /// Discard the final record.
    pub fn ignore(self) -> Fallible<(), E> {
        self.state.map(|_| ())
    }

    /// The final record as-is.
    pub fn finish(self) -> Fallible<R, E> {
        self.state
    }
}

/// Builder over [`Deferred`]. Created by [`Do::deferred`].
#[derive(Debug)]
#[must_use]
pub struct DoDeferred<R> {
    state: Deferred<R>,
}

impl<R: Send + 'static> DoDeferred<R> {
    /// Bind the step's resolved value as the next record field.
    pub fn let_<B, S, F>(self, f: F) -> DoDeferred<R::Output>
    where
        R: Append<B>,
        R::Output: Send + 'static,
        B: Send + 'static,
        S: Into<DeferredShape<B>>,
        F: FnOnce(&R) -> S + Send + 'static,
    {
        DoDeferred {
            state: self.state.bind(move |record| {
                let next: Deferred<B> = Deferred::from_shape(f(&record));
                next.map(move |field| record.append(field))
            }),
        }
    }

    /// Run a step and wait for it before any later step; its value is discarded.
    pub fn do_<B, S, F>(self, f: F) -> Self
    where
        B: Send + 'static,
        S: Into<DeferredShape<B>>,
        F: FnOnce(&R) -> S + Send + 'static,
    {
        DoDeferred {
            state: self.state.bind(move |record| {
                let next: Deferred<B> = Deferred::from_shape(f(&record));
                next.map(move |_| record)
            }),
        }
    }

    /// Map the final record.
    pub fn return_<B, F>(self, f: F) -> Deferred<B>
    where
        B: Send + 'static,
        F: FnOnce(R) -> B + Send + 'static,
    {
        self.state.map(f)
    }

    /// Discard the final record.
    pub fn ignore(self) -> Deferred<()> {
        self.state.map(|_| ())
    }

    /// The final record as-is.
    pub fn finish(self) -> Deferred<R> {
        self.state
    }
}

/// Builder over [`DeferredOptional`]. Created by [`Do::deferred_optional`].
#[derive(Debug)]
#[must_use]
pub struct DoDeferredOptional<R> {
    state: DeferredOptional<R>,
}

impl<R: Send + 'static> DoDeferredOptional<R> {
    /// Bind the step's payload as the next record field.
    pub fn let_<B, S, F>(self, f: F) -> DoDeferredOptional<R::Output>
    where
        R: Append<B>,
        R::Output: Send + 'static,
        B: Send + 'static,
        S: Into<OptionalShape<B>>,
        F: FnOnce(&R) -> S + Send + 'static,
    {
        DoDeferredOptional {
            state: self.state.bind(move |record| {
                let next: DeferredOptional<B> = DeferredOptional::from_shape(f(&record));
                next.map(move |field| record.append(field))
            }),
        }
    }

    /// Run a step and wait for it before any later step; its payload is discarded.
    pub fn do_<B, S, F>(self, f: F) -> Self
    where
        B: Send + 'static,
        S: Into<OptionalShape<B>>,
        F: FnOnce(&R) -> S + Send + 'static,
    {
        DoDeferredOptional {
            state: self.state.bind(move |record| {
                let next: DeferredOptional<B> = DeferredOptional::from_shape(f(&record));
                next.map(move |_| record)
            }),
        }
    }

    /// Map the final record.
    pub fn return_<B, F>(self, f: F) -> DeferredOptional<B>
    where
        B: Send + 'static,
        F: FnOnce(R) -> B + Send + 'static,
    {
        self.state.map(f)
    }

    /// Discard the final record.
    pub fn ignore(self) -> DeferredOptional<()> {
        self.state.map(|_| ())
    }

    /// The final record as-is.
    pub fn finish(self) -> DeferredOptional<R> {
        self.state
    }
}

/// Builder over [`DeferredFallible`]. Created by [`Do::deferred_fallible`].
#[derive(Debug)]
#[must_use]
pub struct DoDeferredFallible<R, E> {
    state: DeferredFallible<R, E>,
}

impl<R, E> DoDeferredFallible<R, E>
where
    R: Send + 'static,
    E: Send + 'static,
{
    /// Bind the step's payload as the next record field.
    pub fn let_<B, S, F>(self, f: F) -> DoDeferredFallible<R::Output, E>
    where
        R: Append<B>,
        R::Output: Send + 'static,
        B: Send + 'static,
        S: Into<FallibleShape<B, E>>,
        F: FnOnce(&R) -> S + Send + 'static,
    {
        DoDeferredFallible {
            state: self.state.bind(move |record| {
                let next: DeferredFallible<B, E> = DeferredFallible::from_shape(f(&record));
                next.map(move |field| record.append(field))
            }),
        }
    }

    /// Run a step and wait for it before any later step; its payload is discarded.
    pub fn do_<B, S, F>(self, f: F) -> Self
    where
        B: Send + 'static,
        S: Into<FallibleShape<B, E>>,
        F: FnOnce(&R) -> S + Send + 'static,
    {
        DoDeferredFallible {
            state: self.state.bind(move |record| {
                let next: DeferredFallible<B, E> = DeferredFallible::from_shape(f(&record));
                next.map(move |_| record)
            }),
        }
    }

    /// Map the final record.
    pub fn return_<B, F>(self, f: F) -> DeferredFallible<B, E>
    where
        B: Send + 'static,
        F: FnOnce(R) -> B + Send + 'static,
    {
        self.state.map(f)
    }

    /// Discard the final record.
    pub fn ignore(self) -> DeferredFallible<(), E> {
        self.state.map(|_| ())
    }

    /// The final record as-is.
    pub fn finish(self) -> DeferredFallible<R, E> {
        self.state
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};
    use std::time::Duration;

    #[test]
    fn test_optional_builder_short_circuits() {
        let mut calls = 0;
        let result = Do::optional()
            .let_(|_| Optional::present(1))
            .let_(|_| Optional::<i32>::absent())
            .do_(|_| {
                calls += 1;
                Optional::present(())
            })
            .return_(|(a, b)| a + b);
        assert_eq!(result, Optional::absent());
        assert_eq!(calls, 0);
    }

    #[test]
    fn test_optional_builder_accepts_option() {
        let result = Do::optional().let_(|_| Some(2)).let_(|(n,)| Some(n * 5)).finish();
        assert_eq!(result, Optional::present((2, 10)));
    }

    #[test]
    fn test_fallible_builder_do_keeps_record() {
        let result = Do::fallible::<&str>()
            .let_(|_| Ok(4))
            .do_(|(n,)| if *n > 0 { Fallible::success(()) } else { Fallible::failure("negative") })
            .return_(|(n,)| n);
        assert_eq!(result, Fallible::success(4));
    }

    #[test]
    fn test_fallible_builder_failure_payload() {
        let result = Do::fallible::<&str>()
            .let_(|_| Fallible::<i32, _>::failure("first"))
            .let_(|_| Fallible::<i32, _>::failure("second"))
            .ignore();
        assert_eq!(result, Fallible::failure("first"));
    }

    #[tokio::test]
    async fn test_deferred_builder_do_completes_before_next_step() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let slow = log.clone();
        let next = log.clone();

        let result = Do::deferred()
            .do_(move |_| {
                Deferred::sleep(Duration::from_millis(10)).map(move |_| slow.lock().unwrap().push("slow"))
            })
            .let_(move |_| {
                next.lock().unwrap().push("next");
                Deferred::resolved(1)
            })
            .return_(|(n,)| n);

        assert_eq!(result.await, 1);
        assert_eq!(*log.lock().unwrap(), vec!["slow", "next"]);
    }

    #[tokio::test]
    async fn test_deferred_fallible_builder() {
        let result = Do::deferred_fallible::<String>()
            .let_(|_| FallibleShape::raw(2))
            .let_(|(a,)| Fallible::success(a * 3))
            .let_(|(a, b)| Deferred::resolved(Fallible::success(a + b)))
            .return_(|(a, b, c)| a + b + c);
        assert_eq!(result.await, Fallible::success(16));
    }

    #[tokio::test]
    async fn test_deferred_optional_builder_absent() {
        let result = Do::deferred_optional()
            .let_(|_| Optional::<i32>::absent())
            .ignore();
        assert_eq!(result.await, Optional::absent());
    }
}
