//! Integration tests for the structural operators.

use std::cell::Cell;

use rstest::rstest;
use seqflow::bounding::take;
use seqflow::error::SequenceError;
use seqflow::nested;
use seqflow::sequence::boxed;
use seqflow::structural::{Depth, Nested, concat, concat_all, empty, flatten, range, zip};

// =============================================================================
// flatten
// =============================================================================

fn sample() -> Vec<Nested<i32>> {
    vec![nested!(1), nested!([2, [3, [4]]]), nested!([])]
}

#[rstest]
fn test_flatten_depth_zero_is_identity() {
    let output: Vec<_> = flatten(sample(), Depth::Finite(0)).collect();
    assert_eq!(output, sample());
}

#[rstest]
fn test_flatten_default_depth_removes_one_level() {
    let output: Vec<_> = flatten(sample(), Depth::default()).collect();
    assert_eq!(output, vec![nested!(1), nested!(2), nested!([3, [4]])]);
}

#[rstest]
#[case(Depth::Finite(2), vec![nested!(1), nested!(2), nested!(3), nested!([4])])]
#[case(Depth::Finite(3), vec![nested!(1), nested!(2), nested!(3), nested!(4)])]
#[case(Depth::Infinite, vec![nested!(1), nested!(2), nested!(3), nested!(4)])]
fn test_flatten_depths(#[case] depth: Depth, #[case] expected: Vec<Nested<i32>>) {
    let output: Vec<_> = flatten(sample(), depth).collect();
    assert_eq!(output, expected);
}

#[rstest]
fn test_flatten_is_lazy_over_its_source() {
    let pulls = Cell::new(0);
    let source = vec![nested!([1, 2]), nested!([3])]
        .into_iter()
        .inspect(|_| pulls.set(pulls.get() + 1));
    let first: Vec<_> = take(2, flatten(source, Depth::Infinite)).collect();
    assert_eq!(first, vec![nested!(1), nested!(2)]);
    assert_eq!(pulls.get(), 1);
}

#[rstest]
fn test_leaf_is_not_iterable() {
    assert_eq!(
        Nested::leaf("text").try_into_iter().unwrap_err(),
        SequenceError::NotIterable { argument: "nested" }
    );
}

// =============================================================================
// zip
// =============================================================================

#[rstest]
fn test_zip_is_driven_by_first_sequence() {
    let longer_first: Vec<_> = zip(vec![1, 2, 3], vec!['a', 'b']).collect();
    assert_eq!(longer_first, vec![(1, Some('a')), (2, Some('b')), (3, None)]);

    let longer_second: Vec<_> = zip(vec![1, 2], vec!['a', 'b', 'c']).collect();
    assert_eq!(longer_second, vec![(1, Some('a')), (2, Some('b'))]);
}

#[rstest]
fn test_zip_does_not_pull_second_past_first() {
    let pulls = Cell::new(0);
    let second = range(0, None).inspect(|_| pulls.set(pulls.get() + 1));
    assert_eq!(zip(vec!["x", "y"], second).count(), 2);
    assert_eq!(pulls.get(), 2);
}

#[rstest]
fn test_zip_with_infinite_first_is_bounded_by_take() {
    let pairs: Vec<_> = take(3, zip(range(1, None), vec!["one"])).collect();
    assert_eq!(pairs, vec![(1, Some("one")), (2, None), (3, None)]);
}

// =============================================================================
// concat and concat_all
// =============================================================================

#[rstest]
fn test_concat_keeps_order() {
    let all: Vec<i32> = concat(vec![1, 2], vec![3]).collect();
    assert_eq!(all, vec![1, 2, 3]);
}

#[rstest]
fn test_concat_does_not_touch_second_early() {
    let pulls = Cell::new(0);
    let second = vec![9].into_iter().inspect(|_| pulls.set(pulls.get() + 1));
    let first_two: Vec<i32> = take(2, concat(vec![1, 2], second)).collect();
    assert_eq!(first_two, vec![1, 2]);
    assert_eq!(pulls.get(), 0);
}

#[rstest]
fn test_concat_all_of_mixed_sources() {
    let sources = vec![boxed(vec![1, 2]), boxed(empty()), boxed(range(3, 5))];
    let all: Vec<i64> = concat_all(sources).collect();
    assert_eq!(all, vec![1, 2, 3, 4]);
}

#[rstest]
fn test_concat_all_of_nothing() {
    assert_eq!(concat_all(Vec::<Vec<u8>>::new()).count(), 0);
}

// =============================================================================
// range and empty
// =============================================================================

#[rstest]
#[case(0, Some(3), vec![0, 1, 2])]
#[case(3, Some(3), vec![])]
#[case(5, Some(2), vec![])]
#[case(-2, Some(1), vec![-2, -1, 0])]
fn test_range_is_half_open(#[case] from: i64, #[case] to: Option<i64>, #[case] expected: Vec<i64>) {
    assert_eq!(range(from, to).collect::<Vec<_>>(), expected);
}

#[rstest]
fn test_range_size_hint_is_exact() {
    assert_eq!(range(2, 7).size_hint(), (5, Some(5)));
    assert_eq!(range(i64::MAX - 2, None).size_hint(), (3, Some(3)));
}

#[rstest]
fn test_infinite_range_stops_at_maximum() {
    let tail: Vec<i64> = range(i64::MAX - 1, None).collect();
    assert_eq!(tail, vec![i64::MAX - 1, i64::MAX]);
}

#[rstest]
fn test_empty_yields_nothing() {
    assert_eq!(empty::<String>().next(), None);
}
