//! Functor and monad laws for every container, and normalization idempotence

use eddy::{
    Deferred, DeferredFallible, DeferredOptional, DeferredShape, Fallible, FallibleShape, Optional,
    OptionalShape,
};
use proptest::prelude::*;
use tokio_test::block_on;

fn optional_strategy() -> impl Strategy<Value = Optional<i32>> {
    prop_oneof![
        Just(Optional::Absent),
        any::<i32>().prop_map(Optional::Present),
    ]
}

fn fallible_strategy() -> impl Strategy<Value = Fallible<i32, String>> {
    prop_oneof![
        any::<i32>().prop_map(Fallible::Success),
        "[a-z]{1,8}".prop_map(Fallible::Failure),
    ]
}

fn f(n: i32) -> i32 {
    n.wrapping_mul(3)
}

fn g(n: i32) -> i32 {
    n.wrapping_add(7)
}

fn optional_k(n: i32) -> Optional<i32> {
    if n % 3 == 0 {
        Optional::Absent
    } else {
        Optional::Present(n.wrapping_sub(1))
    }
}

fn optional_h(n: i32) -> Optional<i32> {
    if n % 5 == 0 {
        Optional::Absent
    } else {
        Optional::Present(n.wrapping_mul(2))
    }
}

fn fallible_k(n: i32) -> Fallible<i32, String> {
    if n % 3 == 0 {
        Fallible::Failure(format!("k rejected {n}"))
    } else {
        Fallible::Success(n.wrapping_sub(1))
    }
}

fn fallible_h(n: i32) -> Fallible<i32, String> {
    if n % 5 == 0 {
        Fallible::Failure(format!("h rejected {n}"))
    } else {
        Fallible::Success(n.wrapping_mul(2))
    }
}

proptest! {
    // Optional

    #[test]
    fn prop_optional_functor_identity(m in optional_strategy()) {
        prop_assert_eq!(m.map(|x| x), m);
    }

    #[test]
    fn prop_optional_functor_composition(m in optional_strategy()) {
        prop_assert_eq!(m.map(f).map(g), m.map(|x| g(f(x))));
    }

    #[test]
    fn prop_optional_left_identity(a in any::<i32>()) {
        prop_assert_eq!(Optional::present(a).bind(optional_k), optional_k(a));
    }

    #[test]
    fn prop_optional_right_identity(m in optional_strategy()) {
        prop_assert_eq!(m.bind(Optional::present), m);
    }

    #[test]
    fn prop_optional_associativity(m in optional_strategy()) {
        let left = m.bind(optional_k).bind(optional_h);
        let right = m.bind(|x| optional_k(x).bind(optional_h));
        prop_assert_eq!(left, right);
    }

    // Fallible

    #[test]
    fn prop_fallible_functor_identity(m in fallible_strategy()) {
        prop_assert_eq!(m.clone().map(|x| x), m);
    }

    #[test]
    fn prop_fallible_functor_composition(m in fallible_strategy()) {
        prop_assert_eq!(m.clone().map(f).map(g), m.map(|x| g(f(x))));
    }

    #[test]
    fn prop_fallible_left_identity(a in any::<i32>()) {
        prop_assert_eq!(Fallible::success(a).bind(fallible_k), fallible_k(a));
    }

    #[test]
    fn prop_fallible_right_identity(m in fallible_strategy()) {
        prop_assert_eq!(m.clone().bind(Fallible::success), m);
    }

    #[test]
    fn prop_fallible_associativity(m in fallible_strategy()) {
        let left = m.clone().bind(fallible_k).bind(fallible_h);
        let right = m.bind(|x| fallible_k(x).bind(fallible_h));
        prop_assert_eq!(left, right);
    }

    // Deferred

    #[test]
    fn prop_deferred_functor_laws(a in any::<i32>()) {
        prop_assert_eq!(block_on(Deferred::resolved(a).map(|x| x)), a);
        prop_assert_eq!(
            block_on(Deferred::resolved(a).map(f).map(g)),
            block_on(Deferred::resolved(a).map(|x| g(f(x))))
        );
    }

    #[test]
    fn prop_deferred_monad_laws(a in any::<i32>()) {
        let k = |n: i32| Deferred::resolved(f(n));
        let h = |n: i32| Deferred::resolved(g(n));

        prop_assert_eq!(block_on(Deferred::resolved(a).bind(k)), block_on(k(a)));
        prop_assert_eq!(block_on(Deferred::resolved(a).bind(Deferred::resolved)), a);
        prop_assert_eq!(
            block_on(Deferred::resolved(a).bind(k).bind(h)),
            block_on(Deferred::resolved(a).bind(move |x| k(x).bind(h)))
        );
    }

    // DeferredOptional

    #[test]
    fn prop_deferred_optional_functor_laws(m in optional_strategy()) {
        prop_assert_eq!(block_on(m.to_deferred().map(|x| x)), m);
        prop_assert_eq!(
            block_on(m.to_deferred().map(f).map(g)),
            block_on(m.to_deferred().map(|x| g(f(x))))
        );
    }

    #[test]
    fn prop_deferred_optional_monad_laws(a in any::<i32>(), m in optional_strategy()) {
        let k = |n: i32| optional_k(n).to_deferred();
        let h = |n: i32| optional_h(n).to_deferred();

        prop_assert_eq!(block_on(DeferredOptional::present(a).bind(k)), optional_k(a));
        prop_assert_eq!(block_on(m.to_deferred().bind(DeferredOptional::present)), m);
        prop_assert_eq!(
            block_on(m.to_deferred().bind(k).bind(h)),
            block_on(m.to_deferred().bind(move |x| k(x).bind(h)))
        );
    }

    // DeferredFallible

    #[test]
    fn prop_deferred_fallible_functor_laws(m in fallible_strategy()) {
        prop_assert_eq!(block_on(m.clone().to_deferred().map(|x| x)), m.clone());
        prop_assert_eq!(
            block_on(m.clone().to_deferred().map(f).map(g)),
            block_on(m.to_deferred().map(|x| g(f(x))))
        );
    }

    #[test]
    fn prop_deferred_fallible_monad_laws(a in any::<i32>(), m in fallible_strategy()) {
        let k = |n: i32| fallible_k(n).to_deferred();
        let h = |n: i32| fallible_h(n).to_deferred();

        prop_assert_eq!(block_on(DeferredFallible::success(a).bind(k)), fallible_k(a));
        prop_assert_eq!(block_on(m.clone().to_deferred().bind(DeferredFallible::success)), m.clone());
        prop_assert_eq!(
            block_on(m.clone().to_deferred().bind(k).bind(h)),
            block_on(m.to_deferred().bind(move |x| k(x).bind(h)))
        );
    }

    // Normalization

    #[test]
    fn prop_optional_normalization_idempotent(m in optional_strategy()) {
        let once = DeferredOptional::from_shape(m);
        let twice = DeferredOptional::from_shape(DeferredOptional::from_shape(once));
        prop_assert_eq!(block_on(twice), m);
    }

    #[test]
    fn prop_fallible_normalization_idempotent(m in fallible_strategy()) {
        let once = DeferredFallible::from_shape(m.clone());
        let twice = DeferredFallible::from_shape(DeferredFallible::from_shape(once));
        prop_assert_eq!(block_on(twice), m);
    }

    #[test]
    fn prop_every_optional_shape_agrees(a in any::<i32>()) {
        let shapes: Vec<OptionalShape<i32>> = vec![
            OptionalShape::raw(a),
            Optional::present(a).into(),
            OptionalShape::deferred(Deferred::resolved(a)),
            Deferred::resolved(Optional::present(a)).into(),
            OptionalShape::future(async move { a }),
            DeferredOptional::present(a).into(),
        ];
        for shape in shapes {
            prop_assert_eq!(block_on(shape.normalize()), Optional::present(a));
        }
    }

    #[test]
    fn prop_every_fallible_shape_agrees(a in any::<i32>()) {
        let shapes: Vec<FallibleShape<i32, String>> = vec![
            FallibleShape::raw(a),
            Fallible::success(a).into(),
            Ok(a).into(),
            FallibleShape::deferred(Deferred::resolved(a)),
            Deferred::resolved(Fallible::success(a)).into(),
            FallibleShape::future(async move { a }),
            DeferredFallible::success(a).into(),
        ];
        for shape in shapes {
            prop_assert_eq!(block_on(shape.normalize()), Fallible::success(a));
        }
    }

    #[test]
    fn prop_deferred_normalization_idempotent(a in any::<i32>()) {
        let raw = DeferredShape::raw(a).normalize();
        let again = Deferred::from_shape(Deferred::from_shape(raw));
        prop_assert_eq!(block_on(again), a);
    }
}

#[cfg(feature = "proptest")]
mod arbitrary_containers {
    use super::*;

    proptest! {
        #[test]
        fn prop_optional_laws_over_arbitrary(m in any::<Optional<i32>>()) {
            prop_assert_eq!(m.map(|x| x), m);
            prop_assert_eq!(m.bind(Optional::present), m);
            prop_assert_eq!(
                m.bind(optional_k).bind(optional_h),
                m.bind(|x| optional_k(x).bind(optional_h))
            );
        }

        #[test]
        fn prop_fallible_laws_over_arbitrary(m in any::<Fallible<i32, String>>()) {
            prop_assert_eq!(m.clone().map(|x| x), m.clone());
            prop_assert_eq!(m.clone().bind(Fallible::success), m.clone());
            prop_assert_eq!(
                m.clone().bind(fallible_k).bind(fallible_h),
                m.bind(|x| fallible_k(x).bind(fallible_h))
            );
        }

        #[test]
        fn prop_deferred_fallible_normalizes_arbitrary(m in any::<Fallible<i32, String>>()) {
            prop_assert_eq!(block_on(DeferredFallible::from_shape(m.clone())), m);
        }
    }
}
