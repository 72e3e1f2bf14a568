//! Deferred containers whose eventual value is an `Optional` or a `Fallible`
//!
//! [`DeferredOptional<A>`] is a `Deferred<Optional<A>>` and
//! [`DeferredFallible<A, E>`] is a `Deferred<Fallible<A, E>>`, each with the
//! usual `map`/`bind`/`map2` algebra. Every operation resolves the inner
//! deferred exactly once, and the payload's tag decides whether the chain
//! continues or short-circuits.
//!
//! # Normalization
//!
//! Binders and constructors accept several input *shapes* and coerce them to
//! the canonical composed type. The accepted shapes form a closed enum per
//! family ([`OptionalShape`], [`FallibleShape`]) and one exhaustive
//! `normalize` applies this precedence:
//!
//! 1. the canonical composed type comes back unchanged
//! 2. a plain `Deferred` has its payload inspected: an inner sync container is
//!    kept as-is, a raw value becomes present/success
//! 3. a native boxed future is adapted to a `Deferred`, then treated as (2)
//! 4. the inner sync container is lifted into an already-resolved deferred
//! 5. a raw value becomes present/success, then is lifted as in (4)
//!
//! Canonical types, `Deferred<Optional<A>>`, `Optional<A>` and
//! `BoxFuture<'static, Optional<A>>` convert with `From`; raw values and
//! raw-payload deferreds use the named constructors on the shape enums.
//!
//! ```
//! use eddy::{DeferredOptional, Deferred, Optional, OptionalShape};
//!
//! # tokio_test::block_on(async {
//! let from_sync = DeferredOptional::from_shape(Optional::present(1));
//! let from_raw = DeferredOptional::from_shape(OptionalShape::raw(1));
//! let from_deferred = DeferredOptional::from_shape(OptionalShape::deferred(Deferred::resolved(1)));
//!
//! assert_eq!(from_sync.await, Optional::present(1));
//! assert_eq!(from_raw.await, Optional::present(1));
//! assert_eq!(from_deferred.await, Optional::present(1));
//! # });
//! ```

mod fallible;
mod optional;
mod payload;

pub use fallible::{DeferredFallible, FallibleShape};
pub use optional::{DeferredOptional, OptionalShape};
pub use payload::Payload;
