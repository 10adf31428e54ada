#![cfg(feature = "compose")]
//! Integration tests for the compose module.
//!
//! These tests verify that the composition layer works together with the
//! operators in realistic pipelines. They cover combinations of:
//!
//! - `pipe!` and `compose!` macros
//! - deferred stages from `compose::stage`
//! - plain functions and closures used as stages
//! - the sync-to-async upgrade and `stage::awaited`

use std::cell::Cell;

use seqflow::compose::{Identity, Stage, pipeline, stage};
use seqflow::structural::{Depth, range};
use seqflow::transform::{filter, map};
use seqflow::{compose, nested, pipe};

// =============================================================================
// Deferred application equals direct application
// =============================================================================

#[test]
fn test_filter_then_map_stage_equals_nested_calls() {
    let is_odd = |value: &i64| value % 2 != 0;
    let square = |value: i64| value * value;

    let piped: Vec<i64> = pipe!(range(0, 10), stage::filter(is_odd), stage::map(square)).collect();
    let direct: Vec<i64> = map(square, filter(is_odd, range(0, 10))).collect();

    assert_eq!(piped, direct);
    assert_eq!(piped, vec![1, 9, 25, 49, 81]);
}

#[test]
fn test_pipeline_function_matches_pipe_macro() {
    let by_pipe = pipe!(vec![3, 1, 2], stage::reduce(|total: i32, value: i32| total.max(value), 0));
    let by_function = pipeline(
        vec![3, 1, 2],
        stage::reduce(|total: i32, value: i32| total.max(value), 0),
    );
    assert_eq!(by_pipe, by_function);
}

// =============================================================================
// Complex Pipeline Scenarios
// =============================================================================

#[test]
fn test_word_frequency_pipeline() {
    fn words(text: &str) -> Vec<String> {
        text.split_whitespace().map(str::to_lowercase).collect()
    }

    let long_words = pipe!(
        "The quick brown fox jumps over the lazy dog",
        words,
        stage::filter(|word: &String| word.len() > 3),
        stage::map(|word: String| (word.clone(), word.len())),
        stage::collect_object(),
    );

    assert_eq!(long_words.len(), 5);
    assert_eq!(long_words.get("quick"), Some(&5));
    assert_eq!(long_words.keys().next().map(String::as_str), Some("brown"));
}

#[test]
fn test_pipeline_over_nested_input() {
    let total = pipe!(
        vec![nested!([1, [2, 3]]), nested!(4)],
        stage::flatten(Depth::Infinite),
        stage::map(|value: seqflow::structural::Nested<i32>| value.into_leaf().unwrap_or(0)),
        stage::reduce(|sum: i32, value: i32| sum + value, 0),
    );
    assert_eq!(total, 10);
}

#[test]
fn test_fallible_pipeline_reports_first_error() {
    fn parse(text: &str) -> Result<i32, String> {
        text.parse().map_err(|_| format!("not a number: {text}"))
    }

    let parsed = pipe!(
        vec!["1", "2", "x", "y"],
        stage::map(parse),
        stage::try_reduce(|sum: i32, value: i32| Ok(sum + value), 0),
    );
    assert_eq!(parsed, Err(String::from("not a number: x")));
}

#[test]
fn test_pipe_never_pulls_beyond_what_is_needed() {
    let pulls = Cell::new(0);
    let source = range(1, None).inspect(|_| pulls.set(pulls.get() + 1));

    let first_large = pipe!(
        source,
        stage::map(|value: i64| value * 3),
        stage::find(|value: &i64| *value > 10),
    );

    assert_eq!(first_large, Some(12));
    assert_eq!(pulls.get(), 4);
}

// =============================================================================
// Reusable composed pipelines
// =============================================================================

#[test]
fn test_composed_pipeline_runs_on_many_inputs() {
    let summary = compose!(
        stage::drop_while(|value: &i32| *value < 0),
        stage::take(3),
        stage::join("+"),
    );

    assert_eq!(summary.call(vec![-2, -1, 4, 5, 6, 7]), "4+5+6");
    assert_eq!(summary.call(vec![1]), "1");
    assert_eq!(summary.call(Vec::new()), "");
}

#[test]
fn test_composition_identity_laws() {
    let head = stage::head();
    let input = || vec!['q', 'r'];

    assert_eq!(compose!(Identity, head).apply(input()), head.apply(input()));
    assert_eq!(compose!(head, Identity).apply(input()), head.apply(input()));
}

#[test]
fn test_composed_stages_nest_inside_pipe() {
    let evens = compose!(stage::filter(|value: &i64| value % 2 == 0), stage::take(2));
    let result: Vec<i64> = pipe!(range(5, None), evens, stage::collect_array());
    assert_eq!(result, vec![6, 8]);
}

// =============================================================================
// Asynchronous pipelines
// =============================================================================

#[cfg(feature = "async")]
mod asynchronous {
    use super::*;
    use futures::StreamExt;
    use seqflow::callback::{lift, lift2, lift_ref};

    #[tokio::test]
    async fn test_chain_upgrades_at_first_async_stage() {
        let values: Vec<i32> = pipe!(
            vec![1, 2, 3, 4],
            stage::filter(|value: &i32| *value != 3),
            stage::async_map(lift(|value: i32| value * 100)),
            stage::async_take(2),
        )
        .collect()
        .await;
        assert_eq!(values, vec![100, 200]);
    }

    #[tokio::test]
    async fn test_awaited_continues_after_aggregation() {
        let label = pipe!(
            futures::stream::iter(vec!["a", "bb", "ccc"]),
            stage::async_filter(lift_ref(|word: &&str| word.len() > 1)),
            stage::async_count(),
            stage::awaited(|count: usize| format!("{count} long words")),
        )
        .await;
        assert_eq!(label, "2 long words");
    }

    #[tokio::test]
    async fn test_async_pipeline_with_deferred_callbacks() {
        let total = pipe!(
            range(1, 4),
            stage::async_map(|value: i64| async move { value * 2 }),
            stage::async_reduce(lift2(|sum: i64, value: i64| sum + value), 0),
        )
        .await;
        assert_eq!(total, 12);
    }

    #[tokio::test]
    async fn test_async_try_pipeline_stops_at_error() {
        let outcome = pipe!(
            vec![Ok(1), Err("stop"), Ok(2)],
            stage::async_try_reduce(|sum: i32, value: i32| async move { Ok(sum + value) }, 0),
        )
        .await;
        assert_eq!(outcome, Err("stop"));
    }
}
