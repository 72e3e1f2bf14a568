//! # Eddy
//!
//! Composable optional, fallible and deferred containers, and a way to write
//! chains of them as straight-line code.
//!
//! ## The containers
//!
//! | Type | Holds |
//! |---|---|
//! | [`Optional<A>`] | `Present(A)` or `Absent` |
//! | [`Fallible<A, E>`] | `Success(A)` or `Failure(E)` |
//! | [`Deferred<A>`] | an `A` available after a suspension |
//! | [`DeferredOptional<A>`] | a deferred `Optional<A>` |
//! | [`DeferredFallible<A, E>`] | a deferred `Fallible<A, E>` |
//!
//! All five share one algebra: `map`, `bind`, `map2`/`map3`, `zip`/`zip3`, and
//! collectors that turn many containers into one. `bind` short-circuits on the
//! first absence or failure. The deferred families also accept *shapes*:
//! a binder may hand back a raw value, the sync container, a plain `Deferred`
//! or a boxed future, and it is [normalized](composed) to the canonical type.
//!
//! ## Quick example
//!
//! ```rust
//! use eddy::{chain, DeferredFallible, Fallible};
//!
//! fn lookup(id: u32) -> DeferredFallible<String, String> {
//!     match id {
//!         1 => DeferredFallible::success("ada".to_string()),
//!         _ => DeferredFallible::failure(format!("no user {id}")),
//!     }
//! }
//!
//! # tokio_test::block_on(async {
//! let greeting = chain! {
//!     name <= lookup(1);
//!     let upper = name.to_uppercase();
//!     Fallible::success(format!("hello {upper}"))
//! };
//! assert_eq!(greeting.await, Fallible::success("hello ADA".to_string()));
//!
//! let missing = lookup(2).map(|name| name.len());
//! assert_eq!(missing.await, Fallible::failure("no user 2".to_string()));
//! # });
//! ```
//!
//! ## Computation expressions
//!
//! The [`interpret`] module runs a resumable [`Routine`] that suspends on
//! containers, and offers the fluent [`Do`] builder:
//!
//! ```rust
//! use eddy::{Do, Optional};
//!
//! let area = Do::optional()
//!     .let_(|_| Optional::present(3))
//!     .let_(|_| Optional::present(4))
//!     .return_(|(w, h)| w * h);
//! assert_eq!(area, Optional::present(12));
//! ```
//!
//! ## Features
//!
//! - `serde`: `Serialize`/`Deserialize` for `Optional`, `Fallible` and the shape errors
//! - `proptest`: `Arbitrary` for `Optional` and `Fallible`

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]

pub mod bridge;
pub mod composed;
pub mod deferred;
pub mod error;
pub mod fallible;
pub mod interpret;
pub mod optional;
pub mod semigroup;
pub mod testing;
pub mod trace;

// Re-exports
pub use composed::{DeferredFallible, DeferredOptional, FallibleShape, OptionalShape, Payload};
pub use deferred::{Deferred, DeferredShape, SharedDeferred};
pub use error::{EmptyValueError, ExtractFailureError, ExtractSuccessError, ShapeError, ShapeErrors};
pub use fallible::Fallible;
pub use interpret::{Do, Routine, Step};
pub use optional::Optional;
pub use semigroup::Semigroup;
pub use trace::Logger;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::chain;
    pub use crate::composed::{DeferredFallible, DeferredOptional, FallibleShape, OptionalShape};
    pub use crate::deferred::{Deferred, DeferredShape};
    pub use crate::error::{EmptyValueError, ShapeError, ShapeErrors};
    pub use crate::fallible::Fallible;
    pub use crate::interpret::{Do, Routine, Step};
    pub use crate::optional::Optional;
    pub use crate::semigroup::Semigroup;
    pub use crate::trace::Logger;
}
