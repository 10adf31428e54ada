//! The `pipe!` macro for left-to-right stage application.
//!
//! This module provides the [`pipe!`] macro, which feeds a value through a
//! series of [`Stage`](crate::compose::Stage)s in the order they are written.

/// Pipes a value through a series of stages from left to right.
///
/// `pipe!(x, f, g, h)` is equivalent to `h.apply(g.apply(f.apply(x)))`.
///
/// Every stage is applied exactly once, in order. Stages may be plain
/// functions and closures (anything implementing [`FnOnce`]) or deferred
/// operators from [`stage`](crate::compose::stage), and the two kinds mix
/// freely. Because stages over sequences are lazy, nothing is pulled until a
/// terminal stage (an aggregation) runs.
///
/// # Relationship with compose!
///
/// `pipe!(x, f, g, h)` is equivalent to `compose!(f, g, h).apply(x)`.
///
/// While [`compose!`](crate::compose!) builds a reusable stage, `pipe!`
/// immediately applies the stages to a value.
///
/// # Syntax
///
/// - `pipe!(x)` - Returns `x` unchanged
/// - `pipe!(x, f)` - Returns `f` applied to `x`
/// - `pipe!(x, f, g)` - Returns `g` applied to the result of `f`
/// - `pipe!(x, f, g, h, ...)` - Continues left to right
///
/// # Asynchronous pipelines
///
/// Once an `async_*` stage has run, the value flowing through the pipeline
/// is an asynchronous sequence, and only `async_*` stages accept it. After
/// an asynchronous aggregation the value is a future; continue with
/// [`stage::awaited`](crate::compose::stage::awaited) or `.await` the result.
///
/// # Examples
///
/// ## Sequence pipeline
///
/// ```
/// use seqflow::pipe;
/// use seqflow::compose::stage;
///
/// let odd_squares: Vec<i32> = pipe!(
///     1..,
///     stage::filter(|value: &i32| value % 2 == 1),
///     stage::map(|value: i32| value * value),
///     stage::take(3),
///     stage::collect_array(),
/// );
/// assert_eq!(odd_squares, vec![1, 9, 25]);
/// ```
///
/// ## Mixing plain functions and stages
///
/// ```
/// use seqflow::pipe;
/// use seqflow::compose::stage;
///
/// fn words(text: &str) -> Vec<String> {
///     text.split_whitespace().map(str::to_owned).collect()
/// }
///
/// let shouted = pipe!(
///     "lazy pull based",
///     words,
///     stage::map(|word: String| word.to_uppercase()),
///     stage::join("-"),
/// );
/// assert_eq!(shouted, "LAZY-PULL-BASED");
/// ```
///
/// ## Asynchronous pipeline
///
/// ```
/// use seqflow::pipe;
/// use seqflow::callback::{lift, lift_ref};
/// use seqflow::compose::stage;
///
/// # futures::executor::block_on(async {
/// let found = pipe!(
///     vec![3, 8, 12, 7],
///     stage::async_map(lift(|value: i32| value * 2)),
///     stage::async_find(lift_ref(|value: &i32| *value > 15)),
/// )
/// .await;
/// assert_eq!(found, Some(16));
/// # });
/// ```
#[macro_export]
macro_rules! pipe {
    // Value only: return as is
    ($value:expr) => {
        $value
    };

    // Single stage: apply it
    ($value:expr, $stage:expr $(,)?) => {
        $crate::compose::Stage::apply($stage, $value)
    };

    // Multiple stages: apply left to right recursively
    ($value:expr, $stage:expr, $($remaining_stages:expr),+ $(,)?) => {
        $crate::pipe!($crate::compose::Stage::apply($stage, $value), $($remaining_stages),+)
    };
}
