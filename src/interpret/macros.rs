//! `chain!`: do-notation over `bind`.

/// Write a sequence of binds as linear code.
///
/// - `pattern <= container;` binds the container's payload to `pattern`
/// - `let pattern = expr;` is an ordinary binding
/// - the last line is the final container
///
/// `x <= c; rest` expands to `c.bind(move |x| chain!(rest))`, so the macro
/// works with every container that has a `bind`, and each step may produce a
/// payload of a different type. For the deferred families the binder's
/// result is normalized as usual, so the last line may be any accepted shape.
///
/// # Examples
///
/// ```
/// use eddy::{chain, Fallible};
///
/// let result: Fallible<String, &str> = chain! {
///     count <= Fallible::success(3);
///     let doubled = count * 2;
///     label <= Fallible::success("items");
///     Fallible::success(format!("{doubled} {label}"))
/// };
/// assert_eq!(result, Fallible::success("6 items".to_string()));
/// ```
///
/// ```
/// use eddy::{chain, DeferredOptional, Optional};
///
/// # tokio_test::block_on(async {
/// let result = chain! {
///     a <= DeferredOptional::present(1);
///     b <= DeferredOptional::<i32>::absent();
///     DeferredOptional::present(a + b)
/// };
/// assert_eq!(result.await, Optional::absent());
/// # });
/// ```
#[macro_export]
macro_rules! chain {
    (let $pattern:ident = $expr:expr ; $($rest:tt)+) => {
        {
            let $pattern = $expr;
            $crate::chain!($($rest)+)
        }
    };

    (let ($($pattern:tt)*) = $expr:expr ; $($rest:tt)+) => {
        {
            let ($($pattern)*) = $expr;
            $crate::chain!($($rest)+)
        }
    };

    (_ <= $container:expr ; $($rest:tt)+) => {
        $container.bind(move |_| {
            $crate::chain!($($rest)+)
        })
    };

    ($pattern:ident <= $container:expr ; $($rest:tt)+) => {
        $container.bind(move |$pattern| {
            $crate::chain!($($rest)+)
        })
    };

    (($($pattern:tt)*) <= $container:expr ; $($rest:tt)+) => {
        $container.bind(move |($($pattern)*)| {
            $crate::chain!($($rest)+)
        })
    };

    ($result:expr) => {
        $result
    };
}
