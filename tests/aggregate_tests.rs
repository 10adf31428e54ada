//! Integration tests for the aggregation operators.
//!
//! Aggregations are terminal: they pull their source until the result is
//! known. The searching ones (every, some, find and the `try_*` variants)
//! must stop as soon as the outcome is decided.

use std::cell::Cell;
use std::collections::BTreeMap;

use rstest::rstest;
use seqflow::aggregate::{
    collect_array, collect_map, collect_object, collect_set, count, every, find, join, reduce,
    some, try_collect_array, try_collect_map, try_collect_object, try_collect_set, try_count,
    try_every, try_find, try_join, try_reduce, try_some,
};
use seqflow::structural::{empty, range};

fn counted<'a, T: 'a>(values: Vec<T>, pulls: &'a Cell<usize>) -> impl Iterator<Item = T> + 'a {
    values.into_iter().inspect(move |_| pulls.set(pulls.get() + 1))
}

// =============================================================================
// reduce and count
// =============================================================================

#[rstest]
#[case(vec![], 0)]
#[case(vec![7], 1)]
#[case(vec![1, 2, 3], 3)]
fn test_count_matches_counting_reduce(#[case] input: Vec<i32>, #[case] expected: usize) {
    assert_eq!(count(input.clone()), expected);
    assert_eq!(reduce(|total: usize, _: i32| total + 1, 0, input), expected);
}

#[rstest]
fn test_reduce_of_empty_is_initial() {
    assert_eq!(reduce(|total: i32, value: i32| total * value, 42, empty()), 42);
}

#[rstest]
fn test_reduce_folds_left_to_right() {
    let text = reduce(|text: String, part: &str| text + part, String::from(">"), vec!["a", "b"]);
    assert_eq!(text, ">ab");
}

// =============================================================================
// every, some and find
// =============================================================================

#[rstest]
fn test_vacuous_truth() {
    assert!(every(|_: &i32| false, empty()));
    assert!(!some(|_: &i32| true, empty()));
    assert_eq!(find(|_: &i32| true, empty()), None);
}

#[rstest]
fn test_every_stops_at_first_failure() {
    let pulls = Cell::new(0);
    assert!(!every(|value: &i32| *value < 2, counted(vec![1, 2, 3, 4], &pulls)));
    assert_eq!(pulls.get(), 2);
}

#[rstest]
fn test_some_stops_at_first_match() {
    let pulls = Cell::new(0);
    assert!(some(|value: &i32| *value == 2, counted(vec![1, 2, 3, 4], &pulls)));
    assert_eq!(pulls.get(), 2);
}

#[rstest]
fn test_find_on_infinite_sequence() {
    assert_eq!(find(|value: &i64| value * value > 50, range(0, None)), Some(8));
}

// =============================================================================
// Collectors and join
// =============================================================================

#[rstest]
fn test_collectors() {
    assert_eq!(collect_array(range(0, 3)), vec![0, 1, 2]);
    assert_eq!(collect_set(vec![1, 1, 2]).len(), 2);

    let map = collect_map(vec![(1, "one"), (2, "two"), (1, "uno")]);
    assert_eq!(map.get(&1), Some(&"uno"));
    assert_eq!(map.len(), 2);

    let object = collect_object(vec![("z", 26), ("a", 1)]);
    let expected: BTreeMap<String, i32> =
        [(String::from("a"), 1), (String::from("z"), 26)].into_iter().collect();
    assert_eq!(object, expected);
}

#[rstest]
#[case(vec![], "")]
#[case(vec!["foo"], "foo")]
#[case(vec!["foo", "bar", "baz"], "foo,bar,baz")]
fn test_join(#[case] input: Vec<&str>, #[case] expected: &str) {
    assert_eq!(join(",", input), expected);
}

#[rstest]
fn test_join_of_numbers_with_long_separator() {
    assert_eq!(join(" -> ", range(1, 4)), "1 -> 2 -> 3");
}

// =============================================================================
// Fallible aggregations
// =============================================================================

#[rstest]
fn test_try_reduce_without_errors() {
    let values: Vec<Result<i32, String>> = vec![Ok(1), Ok(2), Ok(3)];
    assert_eq!(try_reduce(|total: i32, value: i32| Ok(total + value), 0, values), Ok(6));
}

#[rstest]
fn test_try_reduce_stops_at_source_error() {
    let pulls = Cell::new(0);
    let calls = Cell::new(0);
    let values = counted(vec![Ok(1), Err("broken"), Ok(3)], &pulls);
    let result = try_reduce(
        |total: i32, value: i32| {
            calls.set(calls.get() + 1);
            Ok(total + value)
        },
        0,
        values,
    );
    assert_eq!(result, Err("broken"));
    assert_eq!(pulls.get(), 2);
    assert_eq!(calls.get(), 1);
}

#[rstest]
fn test_try_reduce_stops_at_reducer_error() {
    let pulls = Cell::new(0);
    let values: Vec<Result<u8, &str>> = vec![Ok(200), Ok(100), Ok(1)];
    let result = try_reduce(
        |total: u8, value: u8| total.checked_add(value).ok_or("overflow"),
        0,
        counted(values, &pulls),
    );
    assert_eq!(result, Err("overflow"));
    assert_eq!(pulls.get(), 2);
}

#[rstest]
fn test_try_searches_decide_before_late_errors() {
    let values = || vec![Ok(1), Ok(5), Err("late")];
    assert_eq!(try_some(|value: &i32| Ok(*value > 3), values()), Ok(true));
    assert_eq!(try_every(|value: &i32| Ok(*value < 3), values()), Ok(false));
    assert_eq!(try_find(|value: &i32| Ok(*value > 3), values()), Ok(Some(5)));
}

#[rstest]
fn test_try_searches_report_early_errors() {
    let values = || vec![Ok(1), Err("early"), Ok(5)];
    assert_eq!(try_some(|value: &i32| Ok(*value > 3), values()), Err("early"));
    assert_eq!(try_every(|value: &i32| Ok(*value > 0), values()), Err("early"));
}

#[rstest]
fn test_try_predicate_error_is_returned() {
    let values: Vec<Result<i32, String>> = vec![Ok(1), Ok(2)];
    let result = try_every(
        |value: &i32| if *value == 2 { Err(format!("rejected {value}")) } else { Ok(true) },
        values,
    );
    assert_eq!(result, Err(String::from("rejected 2")));
}

#[rstest]
fn test_try_collect_array() {
    assert_eq!(try_collect_array(vec![Ok::<_, ()>(1), Ok(2)]), Ok(vec![1, 2]));
    assert_eq!(try_collect_array(vec![Ok(1), Err('x'), Ok(2)]), Err('x'));
}

#[rstest]
fn test_failing_source_is_not_counted_or_joined() {
    let values = || vec![Ok(1), Err("broken"), Ok(2)];
    assert_eq!(try_count(values()), Err("broken"));
    assert_eq!(try_join(",", values()), Err("broken"));
    assert_eq!(try_collect_set(values()), Err("broken"));
}

#[rstest]
fn test_fallible_collectors_stop_pulling_at_first_error() {
    let pulls = Cell::new(0);
    let pairs = counted(vec![Ok(("a", 1)), Err("broken"), Ok(("b", 2))], &pulls);
    assert_eq!(try_collect_map(pairs), Err("broken"));
    assert_eq!(pulls.get(), 2);

    let pulls = Cell::new(0);
    let pairs = counted(vec![Ok(("a", 1)), Ok(("b", 2)), Err("late")], &pulls);
    assert_eq!(try_collect_object(pairs), Err("late"));
    assert_eq!(pulls.get(), 3);
}

#[rstest]
#[case(vec![], 0)]
#[case(vec![Ok(5), Ok(6)], 2)]
fn test_try_count_without_errors(#[case] input: Vec<Result<i32, ()>>, #[case] expected: usize) {
    assert_eq!(try_count(input), Ok(expected));
}
