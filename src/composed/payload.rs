//! The eventual value of a deferred that is not yet known to be wrapped.

/// What a plain `Deferred` resolves to when fed into normalization: either a
/// raw value or the family's sync container.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Payload<A, C> {
    /// A bare value; becomes present/success.
    Raw(A),
    /// Already the sync container; kept as-is.
    Wrapped(C),
}

impl<A, C> Payload<A, C> {
    /// Resolve to the sync container, lifting a raw value with `lift`.
    pub fn into_container<F>(self, lift: F) -> C
    where
        F: FnOnce(A) -> C,
    {
        match self {
            Payload::Raw(value) => lift(value),
            Payload::Wrapped(container) => container,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Optional;

    #[test]
    fn test_raw_is_lifted() {
        let payload: Payload<i32, Optional<i32>> = Payload::Raw(3);
        assert_eq!(payload.into_container(Optional::present), Optional::present(3));
    }

    #[test]
    fn test_wrapped_is_kept() {
        let payload: Payload<i32, Optional<i32>> = Payload::Wrapped(Optional::absent());
        assert_eq!(payload.into_container(Optional::present), Optional::absent());
    }
}
