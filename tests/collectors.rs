//! Fail-fast and accumulating collectors across families

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use eddy::fallible::{collect, hoard_all, hoard_indexed, sequence_all};
use eddy::{assert_failures, deferred, optional};
use eddy::{Deferred, DeferredFallible, DeferredOptional, Fallible, Optional, ShapeErrors};

fn inputs() -> Vec<Fallible<i32, &'static str>> {
    vec![
        Fallible::success(5),
        Fallible::failure("one"),
        Fallible::failure("two"),
    ]
}

#[test]
fn test_hoard_returns_every_failure_in_order() {
    assert_failures!(Fallible::hoard(inputs()), vec!["one", "two"]);
}

#[test]
fn test_sequence_returns_the_first_failure() {
    assert_eq!(Fallible::sequence_vec(inputs()), Fallible::failure("one"));
}

#[test]
fn test_bind_chain_stops_after_failure() {
    let evaluated = AtomicUsize::new(0);
    let step = |value: Fallible<i32, &'static str>| {
        evaluated.fetch_add(1, Ordering::SeqCst);
        value
    };

    let result = step(Fallible::success(5))
        .bind(|a| step(Fallible::failure("oops")).map(move |b: i32| a + b))
        .bind(|ab| step(Fallible::success(15)).map(move |c| ab + c));

    assert_eq!(result, Fallible::failure("oops"));
    assert_eq!(evaluated.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn test_deferred_fallible_bind_chain_stops_after_failure() {
    let evaluated = Arc::new(AtomicUsize::new(0));
    let step = {
        let evaluated = evaluated.clone();
        move |value: Fallible<i32, String>| {
            evaluated.fetch_add(1, Ordering::SeqCst);
            value.to_deferred()
        }
    };
    let (second, third) = (step.clone(), step.clone());

    let result = step(Fallible::success(5))
        .bind(move |a| second(Fallible::failure("oops".to_string())).map(move |b| a + b))
        .bind(move |ab| third(Fallible::success(15)).map(move |c| ab + c));

    assert_eq!(result.await, Fallible::failure("oops".to_string()));
    assert_eq!(evaluated.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn test_deferred_optional_bind_chain_stops_after_absence() {
    let evaluated = Arc::new(AtomicUsize::new(0));
    let step = {
        let evaluated = evaluated.clone();
        move |value: Optional<i32>| {
            evaluated.fetch_add(1, Ordering::SeqCst);
            value.to_deferred()
        }
    };
    let (second, third) = (step.clone(), step.clone());

    let result = step(Optional::present(5))
        .bind(move |a| second(Optional::absent()).map(move |b| a + b))
        .bind(move |ab| third(Optional::present(15)).map(move |c| ab + c));

    assert_eq!(result.await, Optional::absent());
    assert_eq!(evaluated.load(Ordering::SeqCst), 2);
}

#[test]
fn test_keyed_collect_into_map() {
    let record = vec![
        ("name", Fallible::<String, String>::success("ada".to_string())),
        ("email", Fallible::success("ada@example.com".to_string())),
    ];
    let collected: Fallible<BTreeMap<_, _>, ShapeErrors> = collect(record);
    let map = collected.unwrap();
    assert_eq!(map["name"], "ada");
    assert_eq!(map.len(), 2);
}

#[test]
fn test_keyed_collect_prefixes_every_failure() {
    let record = vec![
        ("name", Fallible::<&str, &str>::failure("required")),
        ("age", Fallible::success("30")),
        ("email", Fallible::failure("must contain @")),
    ];
    let collected: Fallible<Vec<(&str, &str)>, ShapeErrors> = collect(record);
    assert_eq!(
        collected.unwrap_failure().messages(),
        vec!["[name]: required", "[email]: must contain @"]
    );
}

#[test]
fn test_indexed_hoard_locates_failures() {
    let result = hoard_indexed(vec![
        Fallible::<i32, _>::failure("not a number"),
        Fallible::success(2),
        Fallible::failure("negative"),
    ]);
    assert_eq!(
        result.unwrap_failure().to_string(),
        "[0]: not a number\n[2]: negative"
    );
}

#[test]
fn test_tuple_collectors() {
    assert_eq!(
        optional::all((Optional::present(1), Optional::present("a"), Optional::present('c'))),
        Optional::present((1, "a", 'c'))
    );
    assert_eq!(
        optional::all((Optional::present(1), Optional::<&str>::absent())),
        Optional::absent()
    );
    assert_eq!(
        sequence_all((Fallible::<_, &str>::success(1), Fallible::<u8, _>::failure("x"))),
        Fallible::failure("x")
    );
    assert_eq!(
        hoard_all((
            Fallible::<i32, _>::failure("a"),
            Fallible::<i32, _>::success(1),
            Fallible::<i32, _>::failure("b"),
        )),
        Fallible::failure(vec!["a", "b"])
    );
}

#[test]
fn test_optional_sequence_into_any_collection() {
    let set: Optional<std::collections::BTreeSet<i32>> =
        Optional::sequence(vec![Optional::present(3), Optional::present(1), Optional::present(3)]);
    assert_eq!(set, Optional::present([1, 3].into_iter().collect()));
}

fn after<A: Send + 'static>(ms: u64, value: A) -> Deferred<A> {
    Deferred::sleep(Duration::from_millis(ms)).map(move |_| value)
}

#[tokio::test]
async fn test_deferred_sequence_keeps_input_order() {
    let result = Deferred::sequence_vec(vec![after(30, 1), after(10, 2), after(20, 3)]).await;
    assert_eq!(result, vec![1, 2, 3]);
}

#[tokio::test]
async fn test_deferred_tuple_join() {
    let result = deferred::all((after(20, "slow"), after(1, 2), after(10, 'x'))).await;
    assert_eq!(result, ("slow", 2, 'x'));
}

#[tokio::test]
async fn test_deferred_fallible_hoard_runs_everything() {
    let finished = Arc::new(AtomicUsize::new(0));
    let track = |ms: u64, value: Fallible<i32, String>| {
        let finished = finished.clone();
        DeferredFallible::new(after(ms, value).map(move |value| {
            finished.fetch_add(1, Ordering::SeqCst);
            value
        }))
    };

    let result = DeferredFallible::hoard(vec![
        track(5, Fallible::success(5)),
        track(15, Fallible::failure("one".to_string())),
        track(1, Fallible::failure("two".to_string())),
    ])
    .await;

    assert_failures!(result, vec!["one".to_string(), "two".to_string()]);
    assert_eq!(finished.load(Ordering::SeqCst), 3);
}

#[tokio::test]
async fn test_deferred_optional_sequence_of_mixed_shapes() {
    let result = DeferredOptional::sequence_vec(vec![
        DeferredOptional::new(after(10, Optional::present(1))),
        DeferredOptional::present(2),
        Optional::present(3).to_deferred(),
    ])
    .await;
    assert_eq!(result, Optional::present(vec![1, 2, 3]));
}
