//! Integration tests for the transform operators.
//!
//! Covers map, tap, filter and scan, in particular their laziness: nothing
//! is pulled until the result is consumed, and one output element never
//! costs more than the source elements it needs.

use std::cell::Cell;

use rstest::rstest;
use seqflow::bounding::take;
use seqflow::structural::range;
use seqflow::transform::{filter, map, scan, tap};

/// A source counting how many elements have been pulled from it.
fn counted<'a>(values: Vec<i32>, pulls: &'a Cell<usize>) -> impl Iterator<Item = i32> + 'a {
    values.into_iter().inspect(move |_| pulls.set(pulls.get() + 1))
}

// =============================================================================
// map
// =============================================================================

#[rstest]
#[case(vec![], vec![])]
#[case(vec![1], vec![10])]
#[case(vec![1, 2, 3], vec![10, 20, 30])]
fn test_map_applies_function_in_order(#[case] input: Vec<i32>, #[case] expected: Vec<i32>) {
    let output: Vec<i32> = map(|value: i32| value * 10, input).collect();
    assert_eq!(output, expected);
}

#[rstest]
fn test_map_is_lazy() {
    let pulls = Cell::new(0);
    let mapped = map(|value: i32| value + 1, counted(vec![1, 2, 3], &pulls));
    assert_eq!(pulls.get(), 0);

    let first: Vec<i32> = take(1, mapped).collect();
    assert_eq!(first, vec![2]);
    assert_eq!(pulls.get(), 1);
}

#[rstest]
fn test_map_over_infinite_range() {
    let evens: Vec<i64> = take(4, map(|value: i64| value * 2, range(0, None))).collect();
    assert_eq!(evens, vec![0, 2, 4, 6]);
}

// =============================================================================
// tap
// =============================================================================

#[rstest]
fn test_tap_sees_every_consumed_element_once() {
    let mut seen = Vec::new();
    let values: Vec<&str> = tap(|value: &&str| seen.push(value.len()), vec!["ab", "c"]).collect();
    assert_eq!(values, vec!["ab", "c"]);
    assert_eq!(seen, vec![2, 1]);
}

#[rstest]
fn test_tap_only_sees_pulled_elements() {
    let calls = Cell::new(0);
    let tapped = tap(|_: &i64| calls.set(calls.get() + 1), range(0, None));
    assert_eq!(take(3, tapped).count(), 3);
    assert_eq!(calls.get(), 3);
}

// =============================================================================
// filter
// =============================================================================

#[rstest]
#[case(vec![], vec![])]
#[case(vec![1, 3], vec![])]
#[case(vec![1, 2, 3, 4], vec![2, 4])]
fn test_filter_keeps_matching_elements(#[case] input: Vec<i32>, #[case] expected: Vec<i32>) {
    let output: Vec<i32> = filter(|value: &i32| value % 2 == 0, input).collect();
    assert_eq!(output, expected);
}

#[rstest]
fn test_filter_pulls_until_a_match() {
    let pulls = Cell::new(0);
    let mut evens = filter(|value: &i32| value % 2 == 0, counted(vec![1, 3, 4, 5, 6], &pulls));
    assert_eq!(evens.next(), Some(4));
    assert_eq!(pulls.get(), 3);
}

// =============================================================================
// scan
// =============================================================================

#[rstest]
fn test_scan_yields_running_totals() {
    let totals: Vec<i32> = scan(|total: i32, value: i32| total + value, 0, vec![1, 2, 3, 4]).collect();
    assert_eq!(totals, vec![1, 3, 6, 10]);
}

#[rstest]
fn test_scan_of_empty_sequence_yields_nothing() {
    let totals: Vec<i32> = scan(|total: i32, value: i32| total + value, 100, Vec::new()).collect();
    assert!(totals.is_empty());
}

#[rstest]
fn test_scan_accumulator_may_change_type() {
    let prefixes: Vec<String> = scan(
        |mut prefix: String, letter: char| {
            prefix.push(letter);
            prefix
        },
        String::new(),
        "abc".chars(),
    )
    .collect();
    assert_eq!(prefixes, vec!["a", "ab", "abc"]);
}
