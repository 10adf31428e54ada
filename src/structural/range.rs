//! Source operators: `range`, `empty` and `async_empty`.

use std::iter::FusedIterator;

/// Yields consecutive integers starting at `from`.
///
/// With an upper bound the range is half-open and yields `from..to`. Without
/// one it is unbounded and must be limited by the caller, for instance with
/// [`take`](crate::bounding::take). An infinite range stops at
/// [`i64::MAX`] instead of overflowing.
///
/// # Examples
///
/// ```rust
/// use seqflow::bounding::take;
/// use seqflow::structural::range;
///
/// assert_eq!(range(1, 4).collect::<Vec<_>>(), vec![1, 2, 3]);
/// assert_eq!(range(5, 5).count(), 0);
/// assert_eq!(take(2, range(-1, None)).collect::<Vec<_>>(), vec![-1, 0]);
/// ```
pub fn range(from: i64, to: impl Into<Option<i64>>) -> Range {
    Range {
        next: Some(from),
        end: to.into(),
    }
}

/// Iterator returned by [`range`].
#[derive(Debug, Clone, PartialEq, Eq)]
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct Range {
    next: Option<i64>,
    end: Option<i64>,
}

impl Iterator for Range {
    type Item = i64;

    fn next(&mut self) -> Option<i64> {
        let current = self.next?;
        if self.end.is_some_and(|end| current >= end) {
            self.next = None;
            return None;
        }
        self.next = current.checked_add(1);
        Some(current)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let Some(next) = self.next else {
            return (0, Some(0));
        };
        let remaining = match self.end {
            Some(end) if end <= next => Some(0),
            Some(end) => Some(end.abs_diff(next)),
            None => i64::MAX.abs_diff(next).checked_add(1),
        };
        match remaining.and_then(|remaining| usize::try_from(remaining).ok()) {
            Some(remaining) => (remaining, Some(remaining)),
            None => (usize::MAX, None),
        }
    }
}

impl FusedIterator for Range {}

/// A sequence that yields nothing.
///
/// # Examples
///
/// ```rust
/// use seqflow::structural::empty;
///
/// assert_eq!(empty::<i32>().next(), None);
/// ```
pub const fn empty<T>() -> std::iter::Empty<T> {
    std::iter::empty()
}

/// An asynchronous sequence that yields nothing.
#[cfg(feature = "async")]
pub fn async_empty<T>() -> futures::stream::Empty<T> {
    futures::stream::empty()
}
