//! Observing values as they flow through a chain
//!
//! Two tools:
//!
//! - `trace(logger, label)` on every container logs the container (or, for the
//!   deferred families, its eventual value) through an explicit [`Logger`] and
//!   passes it on unchanged. Nothing is written to a global stream; the
//!   caller picks the sink.
//! - `instrument(span)` on the deferred families polls the inner future inside
//!   a [`tracing::Span`], following the usual `tracing::Instrument` pattern.
//!
//! # Example
//!
//! ```rust
//! use eddy::trace::CaptureLogger;
//! use eddy::Optional;
//!
//! let logger = CaptureLogger::new();
//! let doubled = Optional::present(21)
//!     .trace(&logger, "input")
//!     .map(|n| n * 2)
//!     .trace(&logger, "doubled");
//!
//! assert_eq!(doubled, Optional::present(42));
//! assert_eq!(logger.lines(), vec!["input: Present(21)", "doubled: Present(42)"]);
//! ```

use std::fmt::Debug;
use std::sync::{Arc, Mutex, PoisonError};

use tracing::{Instrument, Level, Span};

use crate::{Deferred, DeferredFallible, DeferredOptional, Fallible, Optional};

/// A sink for labelled values.
pub trait Logger {
    /// Record `value` under `label`.
    fn log(&self, label: &str, value: &dyn Debug);
}

impl<L: Logger + ?Sized> Logger for &L {
    fn log(&self, label: &str, value: &dyn Debug) {
        (**self).log(label, value)
    }
}

impl<L: Logger + ?Sized> Logger for Arc<L> {
    fn log(&self, label: &str, value: &dyn Debug) {
        (**self).log(label, value)
    }
}

impl<L: Logger + ?Sized> Logger for Box<L> {
    fn log(&self, label: &str, value: &dyn Debug) {
        (**self).log(label, value)
    }
}

/// Forwards every value to a `tracing` event.
///
/// Events carry `label` and `value` fields and are emitted at `DEBUG` unless
/// configured otherwise.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TracingLogger {
    level: Level,
}

impl TracingLogger {
    /// Log at `DEBUG`.
    pub fn new() -> Self {
        TracingLogger { level: Level::DEBUG }
    }

    /// Log at `level`.
    pub fn with_level(level: Level) -> Self {
        TracingLogger { level }
    }

    /// The level events are emitted at.
    pub fn level(&self) -> Level {
        self.level
    }
}

impl Default for TracingLogger {
    fn default() -> Self {
        Self::new()
    }
}

impl Logger for TracingLogger {
    fn log(&self, label: &str, value: &dyn Debug) {
        // event levels must be constants at the callsite
        if self.level == Level::ERROR {
            tracing::error!(label, value = ?value, "trace");
        } else if self.level == Level::WARN {
            tracing::warn!(label, value = ?value, "trace");
        } else if self.level == Level::INFO {
            tracing::info!(label, value = ?value, "trace");
        } else if self.level == Level::DEBUG {
            tracing::debug!(label, value = ?value, "trace");
        } else {
            tracing::trace!(label, value = ?value, "trace");
        }
    }
}

/// Discards everything.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NoopLogger;

impl Logger for NoopLogger {
    fn log(&self, _label: &str, _value: &dyn Debug) {}
}

/// Records every line as `label: value`. Clones share the same buffer.
#[derive(Debug, Clone, Default)]
pub struct CaptureLogger {
    lines: Arc<Mutex<Vec<String>>>,
}

impl CaptureLogger {
    /// An empty capture buffer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything recorded so far, oldest first.
    pub fn lines(&self) -> Vec<String> {
        self.lines
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Drop everything recorded so far.
    pub fn clear(&self) {
        self.lines
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }
}

impl Logger for CaptureLogger {
    fn log(&self, label: &str, value: &dyn Debug) {
        self.lines
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(format!("{}: {:?}", label, value));
    }
}

impl<A: Debug> Optional<A> {
    /// Log this optional under `label` and pass it on.
    pub fn trace<L: Logger>(self, logger: &L, label: &str) -> Self {
        logger.log(label, &self);
        self
    }
}

impl<A: Debug, E: Debug> Fallible<A, E> {
    /// Log this fallible under `label` and pass it on.
    pub fn trace<L: Logger>(self, logger: &L, label: &str) -> Self {
        logger.log(label, &self);
        self
    }
}

impl<A: Debug + Send + 'static> Deferred<A> {
    /// Log the resolved value under `label` and pass it on.
    pub fn trace<L>(self, logger: L, label: impl Into<String>) -> Self
    where
        L: Logger + Send + 'static,
    {
        let label = label.into();
        self.map(move |value| {
            logger.log(&label, &value);
            value
        })
    }

    /// Poll this deferred inside `span`.
    ///
    /// ```rust
    /// use eddy::Deferred;
    ///
    /// # tokio_test::block_on(async {
    /// let value = Deferred::resolved(1)
    ///     .instrument(tracing::info_span!("load", id = 7))
    ///     .await;
    /// assert_eq!(value, 1);
    /// # });
    /// ```
    pub fn instrument(self, span: Span) -> Self {
        Deferred::from_future(self.into_inner().instrument(span))
    }
}

impl<A: Debug + Send + 'static> DeferredOptional<A> {
    /// Log the resolved optional under `label` and pass it on.
    pub fn trace<L>(self, logger: L, label: impl Into<String>) -> Self
    where
        L: Logger + Send + 'static,
    {
        DeferredOptional::new(self.into_deferred().trace(logger, label))
    }

    /// Poll this deferred optional inside `span`.
    pub fn instrument(self, span: Span) -> Self {
        DeferredOptional::new(self.into_deferred().instrument(span))
    }
}

impl<A, E> DeferredFallible<A, E>
where
    A: Debug + Send + 'static,
    E: Debug + Send + 'static,
{
    /// Log the resolved fallible under `label` and pass it on.
    pub fn trace<L>(self, logger: L, label: impl Into<String>) -> Self
    where
        L: Logger + Send + 'static,
    {
        DeferredFallible::new(self.into_deferred().trace(logger, label))
    }

    /// Poll this deferred fallible inside `span`.
    pub fn instrument(self, span: Span) -> Self {
        DeferredFallible::new(self.into_deferred().instrument(span))
    }
}
