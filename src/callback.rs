//! Lifting synchronous callbacks into deferred ones.
//!
//! The asynchronous operators take callbacks that return a [`Future`]. A
//! callback that has its answer immediately can either return an `async`
//! block, [`std::future::ready`], or be wrapped by one of the helpers in this
//! module:
//!
//! - [`lift`]: `A -> B` becomes `A -> Ready<B>` (mappers)
//! - [`lift_ref`]: `&A -> B` becomes `&A -> Ready<B>` (predicates, tap functions)
//! - [`lift2`]: `(A, B) -> C` becomes `(A, B) -> Ready<C>` (reducers)
//!
//! Both forms are awaited the same way by the operators, so synchronous and
//! deferred callbacks are interchangeable.
//!
//! # Examples
//!
//! ```rust
//! use seqflow::callback::{lift, lift_ref};
//! use seqflow::transform::{async_filter, async_map};
//! use futures::StreamExt;
//!
//! # futures::executor::block_on(async {
//! let doubled = async_map(lift(|value: i32| value * 2), vec![1, 2, 3]);
//! let large = async_filter(lift_ref(|value: &i32| *value > 2), doubled);
//! assert_eq!(large.collect::<Vec<_>>().await, vec![4, 6]);
//! # });
//! ```

use std::future::{Ready, ready};

/// Lifts a unary function into one returning an immediately ready future.
#[inline]
pub fn lift<A, B, F>(mut function: F) -> impl FnMut(A) -> Ready<B>
where
    F: FnMut(A) -> B,
{
    move |argument| ready(function(argument))
}

/// Lifts a function taking its argument by reference.
///
/// The returned closure is higher-ranked over the reference lifetime, which
/// is what predicates and tap functions require.
#[inline]
pub fn lift_ref<A, B, F>(mut function: F) -> impl FnMut(&A) -> Ready<B>
where
    A: ?Sized,
    F: FnMut(&A) -> B,
{
    move |argument: &A| ready(function(argument))
}

/// Lifts a binary function, typically a reducer.
#[inline]
pub fn lift2<A, B, C, F>(mut function: F) -> impl FnMut(A, B) -> Ready<C>
where
    F: FnMut(A, B) -> C,
{
    move |first, second| ready(function(first, second))
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::executor::block_on;
    use rstest::rstest;

    #[rstest]
    fn test_lift_wraps_result() {
        let mut double = lift(|value: i32| value * 2);
        assert_eq!(block_on(double(21)), 42);
    }

    #[rstest]
    fn test_lift_ref_accepts_any_lifetime() {
        let mut is_even = lift_ref(|value: &i32| value % 2 == 0);
        let values = [1, 2];
        assert!(!block_on(is_even(&values[0])));
        assert!(block_on(is_even(&values[1])));
    }

    #[rstest]
    fn test_lift2_wraps_reducer() {
        let mut add = lift2(|accumulator: i32, value: i32| accumulator + value);
        assert_eq!(block_on(add(1, 2)), 3);
    }

    #[rstest]
    fn test_lift_keeps_state_between_calls() {
        let mut calls = 0;
        let mut counter = lift(|()| {
            calls += 1;
            calls
        });
        assert_eq!(block_on(counter(())), 1);
        assert_eq!(block_on(counter(())), 2);
    }
}
