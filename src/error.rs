//! Error types raised by the containers and collectors
//!
//! Two kinds of error live here:
//!
//! - **Extraction errors** ([`EmptyValueError`], [`ExtractSuccessError`],
//!   [`ExtractFailureError`]) are programmer errors: asking an `Absent` for its
//!   payload, or a `Failure` for its success value. Every extraction method has a
//!   `Result`-returning form; the panicking helpers (`unwrap`, `unwrap_failure`)
//!   panic with these errors' messages.
//! - **Shape errors** ([`ShapeError`], [`ShapeErrors`]) are data. Accumulating
//!   collectors use them to report every malformed element at once, located by
//!   position (`[2]: reason`) or by key (`[email]: reason`). Nested locations are
//!   joined with `.` (`[user.email]: reason`).
//!
//! Domain failures carried by `Fallible::Failure` are never converted into any
//! of these types; they propagate by value.
//!
//! # Examples
//!
//! ```
//! use eddy::{Optional, EmptyValueError};
//!
//! let absent = Optional::<i32>::absent();
//! assert_eq!(absent.into_value(), Err(EmptyValueError));
//! ```
//!
//! ```
//! use eddy::error::{ShapeError, ShapeErrors};
//!
//! let errors = ShapeErrors::from(ShapeError::at_key("email", "must contain @"))
//!     .nest("user");
//! assert_eq!(errors.to_string(), "[user.email]: must contain @");
//! ```

use std::error::Error as StdError;
use std::fmt;

use crate::Semigroup;

/// Raised when the payload of an `Absent` container is requested.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct EmptyValueError;

impl fmt::Display for EmptyValueError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("attempted to extract a value from an absent container")
    }
}

impl StdError for EmptyValueError {}

/// Raised when the success payload of a `Failure` is requested.
///
/// Keeps the failure payload so the caller can still inspect what went wrong.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractSuccessError<E> {
    failure: E,
}

impl<E> ExtractSuccessError<E> {
    /// Wrap the failure payload that was found instead of a success.
    pub fn new(failure: E) -> Self {
        ExtractSuccessError { failure }
    }

    /// The failure payload that was found.
    pub fn failure(&self) -> &E {
        &self.failure
    }

    /// Take back the failure payload.
    pub fn into_failure(self) -> E {
        self.failure
    }
}

impl<E: fmt::Debug> fmt::Display for ExtractSuccessError<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "attempted to extract a success value from a failure: {:?}",
            self.failure
        )
    }
}

impl<E: fmt::Debug> StdError for ExtractSuccessError<E> {}

/// Raised when the failure payload of a `Success` is requested.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractFailureError<A> {
    success: A,
}

impl<A> ExtractFailureError<A> {
    /// Wrap the success payload that was found instead of a failure.
    pub fn new(success: A) -> Self {
        ExtractFailureError { success }
    }

    /// The success payload that was found.
    pub fn success(&self) -> &A {
        &self.success
    }

    /// Take back the success payload.
    pub fn into_success(self) -> A {
        self.success
    }
}

impl<A: fmt::Debug> fmt::Display for ExtractFailureError<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "attempted to extract a failure value from a success: {:?}",
            self.success
        )
    }
}

impl<A: fmt::Debug> StdError for ExtractFailureError<A> {}

/// One structural mismatch, located by a path of indices and keys.
///
/// Rendered as `[path]: reason` with path segments joined by `.`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ShapeError {
    path: Vec<String>,
    reason: String,
}

impl ShapeError {
    /// A mismatch with no location yet.
    pub fn new(reason: impl Into<String>) -> Self {
        ShapeError {
            path: Vec::new(),
            reason: reason.into(),
        }
    }

    /// A mismatch at a position in an ordered collection.
    pub fn at_index(index: usize, reason: impl Into<String>) -> Self {
        ShapeError::new(reason).nest(index.to_string())
    }

    /// A mismatch at a named field of a record.
    pub fn at_key(key: impl fmt::Display, reason: impl Into<String>) -> Self {
        ShapeError::new(reason).nest(key.to_string())
    }

    /// Prefix the location with an outer segment.
    pub fn nest(mut self, segment: impl Into<String>) -> Self {
        self.path.insert(0, segment.into());
        self
    }

    /// Location segments, outermost first.
    pub fn path(&self) -> &[String] {
        &self.path
    }

    /// The human-readable reason.
    pub fn reason(&self) -> &str {
        &self.reason
    }
}

impl fmt::Display for ShapeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.path.is_empty() {
            f.write_str(&self.reason)
        } else {
            write!(f, "[{}]: {}", self.path.join("."), self.reason)
        }
    }
}

impl StdError for ShapeError {}

/// An ordered list of [`ShapeError`]s, accumulated by the hoarding collectors.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ShapeErrors(Vec<ShapeError>);

impl ShapeErrors {
    /// No errors.
    pub fn new() -> Self {
        ShapeErrors(Vec::new())
    }

    /// Append one error.
    pub fn push(&mut self, error: ShapeError) {
        self.0.push(error);
    }

    /// Prefix every error's location with an outer segment.
    pub fn nest(self, segment: impl Into<String>) -> Self {
        let segment = segment.into();
        ShapeErrors(
            self.0
                .into_iter()
                .map(|error| error.nest(segment.clone()))
                .collect(),
        )
    }

    /// Number of errors.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True when nothing was recorded.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate in recording order.
    pub fn iter(&self) -> std::slice::Iter<'_, ShapeError> {
        self.0.iter()
    }

    /// Rendered messages in recording order.
    pub fn messages(&self) -> Vec<String> {
        self.0.iter().map(ToString::to_string).collect()
    }

    /// Take the underlying list.
    pub fn into_vec(self) -> Vec<ShapeError> {
        self.0
    }
}

impl From<ShapeError> for ShapeErrors {
    fn from(error: ShapeError) -> Self {
        ShapeErrors(vec![error])
    }
}

impl From<Vec<ShapeError>> for ShapeErrors {
    fn from(errors: Vec<ShapeError>) -> Self {
        ShapeErrors(errors)
    }
}

impl FromIterator<ShapeError> for ShapeErrors {
    fn from_iter<I: IntoIterator<Item = ShapeError>>(iter: I) -> Self {
        ShapeErrors(iter.into_iter().collect())
    }
}

impl IntoIterator for ShapeErrors {
    type Item = ShapeError;
    type IntoIter = std::vec::IntoIter<ShapeError>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl Semigroup for ShapeErrors {
    fn combine(mut self, other: Self) -> Self {
        self.0.extend(other.0);
        self
    }
}

impl fmt::Display for ShapeErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, error) in self.0.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{}", error)?;
        }
        Ok(())
    }
}

impl StdError for ShapeErrors {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_value_error_display() {
        assert_eq!(
            EmptyValueError.to_string(),
            "attempted to extract a value from an absent container"
        );
    }

    #[test]
    fn test_extract_success_error_keeps_failure() {
        let err = ExtractSuccessError::new("boom");
        assert_eq!(err.failure(), &"boom");
        assert!(err.to_string().contains("\"boom\""));
        assert_eq!(err.into_failure(), "boom");
    }

    #[test]
    fn test_extract_failure_error_keeps_success() {
        let err = ExtractFailureError::new(42);
        assert_eq!(err.success(), &42);
        assert!(err.to_string().ends_with("42"));
    }

    #[test]
    fn test_shape_error_positional() {
        assert_eq!(
            ShapeError::at_index(2, "not a number").to_string(),
            "[2]: not a number"
        );
    }

    #[test]
    fn test_shape_error_without_path() {
        assert_eq!(ShapeError::new("bad").to_string(), "bad");
    }

    #[test]
    fn test_shape_errors_nested_paths() {
        let errors: ShapeErrors = vec![
            ShapeError::at_key("street", "required"),
            ShapeError::at_index(0, "too long").nest("lines"),
        ]
        .into();

        let nested = errors.nest("address").nest("user");
        assert_eq!(
            nested.messages(),
            vec![
                "[user.address.street]: required".to_string(),
                "[user.address.lines.0]: too long".to_string(),
            ]
        );
    }

    #[test]
    fn test_shape_errors_combine_preserves_order() {
        let a = ShapeErrors::from(ShapeError::at_index(0, "a"));
        let b = ShapeErrors::from(ShapeError::at_index(3, "b"));
        let combined = a.combine(b);
        assert_eq!(combined.len(), 2);
        assert_eq!(combined.to_string(), "[0]: a\n[3]: b");
    }
}
