//! Flat tuple records for the fluent builders.

/// Append one field to a tuple record.
///
/// `()` grows to `(B,)`, `(T1,)` to `(T1, B)`, and so on up to twelve fields.
pub trait Append<B> {
    /// The record with `B` added at the end.
    type Output;

    /// Add `field` at the end.
    fn append(self, field: B) -> Self::Output;
}

impl<B> Append<B> for () {
    type Output = (B,);

    fn append(self, field: B) -> (B,) {
        (field,)
    }
}

macro_rules! impl_append {
    ($($T:ident),+) => {
        impl<$($T,)+ B> Append<B> for ($($T,)+) {
            type Output = ($($T,)+ B);

            #[allow(non_snake_case)]
            fn append(self, field: B) -> Self::Output {
                let ($($T,)+) = self;
                ($($T,)+ field)
            }
        }
    };
}

impl_append!(T1);
impl_append!(T1, T2);
impl_append!(T1, T2, T3);
impl_append!(T1, T2, T3, T4);
impl_append!(T1, T2, T3, T4, T5);
impl_append!(T1, T2, T3, T4, T5, T6);
impl_append!(T1, T2, T3, T4, T5, T6, T7);
impl_append!(T1, T2, T3, T4, T5, T6, T7, T8);
impl_append!(T1, T2, T3, T4, T5, T6, T7, T8, T9);
impl_append!(T1, T2, T3, T4, T5, T6, T7, T8, T9, T10);
impl_append!(T1, T2, T3, T4, T5, T6, T7, T8, T9, T10, T11);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_append_grows_flat() {
        let record = ().append(1).append("two").append('3');
        assert_eq!(record, (1, "two", '3'));
    }
}
