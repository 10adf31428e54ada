//! The `compose!` macro for building reusable pipelines.
//!
//! This module provides the [`compose!`] macro, which chains
//! [`Stage`](crate::compose::Stage)s into a single stage that applies them
//! from left to right.

/// Composes stages from left to right into one [`Composed`] stage.
///
/// `compose!(f, g, h).apply(x)` is equivalent to `pipe!(x, f, g, h)`.
///
/// Stages read in data-flow order: the leftmost stage receives the input.
/// The result is itself a stage, so it can be applied later, nested inside
/// another `compose!`, or used as a step of [`pipe!`](crate::pipe!). When all
/// parts are [`Clone`], [`Composed::call`] runs it on any number of inputs.
///
/// # Laws
///
/// The composition operation satisfies the following laws:
///
/// - **Associativity**: `compose!(f, compose!(g, h))` and
///   `compose!(compose!(f, g), h)` produce the same output
/// - **Left Identity**: `compose!(Identity, f)` produces the same output as `f`
/// - **Right Identity**: `compose!(f, Identity)` produces the same output as `f`
///
/// # Syntax
///
/// - `compose!(f)` - A stage equivalent to `f`
/// - `compose!(f, g)` - Applies `f`, then `g`
/// - `compose!(f, g, h, ...)` - Composes any number of stages
///
/// # Examples
///
/// ## Reusable sequence pipeline
///
/// ```
/// use seqflow::compose;
/// use seqflow::compose::stage;
///
/// let shout = compose!(
///     stage::filter(|word: &&str| !word.is_empty()),
///     stage::map(|word: &str| word.to_uppercase()),
///     stage::join(" "),
/// );
/// assert_eq!(shout.call(vec!["lazy", "", "pull"]), "LAZY PULL");
/// assert_eq!(shout.call(vec!["based"]), "BASED");
/// ```
///
/// ## Composed stages inside a pipe
///
/// ```
/// use seqflow::{compose, pipe};
/// use seqflow::compose::stage;
///
/// let window = compose!(stage::drop(2), stage::take(3));
/// let total = pipe!(1..=10, window, stage::reduce(|sum: i32, value: i32| sum + value, 0));
/// assert_eq!(total, 3 + 4 + 5);
/// ```
///
/// ## Verifying associativity
///
/// ```
/// use seqflow::compose;
/// use seqflow::compose::Stage;
///
/// fn f(x: i32) -> i32 { x + 1 }
/// fn g(x: i32) -> i32 { x * 2 }
/// fn h(x: i32) -> i32 { x - 3 }
///
/// let left = compose!(f, compose!(g, h));
/// let right = compose!(compose!(f, g), h);
///
/// assert_eq!(left.apply(10), right.apply(10));
/// ```
///
/// [`Composed`]: crate::compose::Composed
/// [`Composed::call`]: crate::compose::Composed::call
#[macro_export]
macro_rules! compose {
    // Single stage: compose with identity so the result is always `Composed`
    ($stage:expr $(,)?) => {
        $crate::compose::Composed::new($crate::compose::Identity, $stage)
    };

    // Two stages: first, then second
    ($first_stage:expr, $second_stage:expr $(,)?) => {
        $crate::compose::Composed::new($first_stage, $second_stage)
    };

    // Three or more stages: the first stage followed by the rest
    ($first_stage:expr, $($remaining_stages:expr),+ $(,)?) => {
        $crate::compose::Composed::new($first_stage, $crate::compose!($($remaining_stages),+))
    };
}

#[cfg(test)]
mod tests {
    use crate::compose::{Stage, stage};
    use rstest::rstest;

    #[rstest]
    fn test_compose_single() {
        let double = |value: i32| value * 2;
        assert_eq!(compose!(double).apply(5), 10);
    }

    #[rstest]
    fn test_compose_runs_left_to_right() {
        let add_one = |value: i32| value + 1;
        let double = |value: i32| value * 2;
        // add_one(5) = 6, double(6) = 12
        assert_eq!(compose!(add_one, double).apply(5), 12);
    }

    #[rstest]
    fn test_compose_matches_pipe() {
        let square = |value: i32| value * value;
        let double = |value: i32| value * 2;
        let add_one = |value: i32| value + 1;
        assert_eq!(
            compose!(square, double, add_one).apply(3),
            crate::pipe!(3, square, double, add_one)
        );
    }

    #[rstest]
    fn test_composed_pipeline_is_reusable() {
        let first_even = compose!(stage::filter(|value: &u8| value % 2 == 0), stage::head());
        assert_eq!(first_even.call(vec![1, 3, 4, 6]), Some(4));
        assert_eq!(first_even.call(vec![1, 3]), None);
    }
}
