//! `scan` and `async_scan`.

use std::fmt;
use std::iter::Fuse;

#[cfg(feature = "async")]
use std::future::Future;
#[cfg(feature = "async")]
use std::pin::Pin;
#[cfg(feature = "async")]
use std::task::{Context, Poll, ready};

#[cfg(feature = "async")]
use futures::stream::{self, Stream, StreamExt};
#[cfg(feature = "async")]
use pin_project_lite::pin_project;

#[cfg(feature = "async")]
use crate::sequence::IntoAsyncSequence;

/// Yields the running accumulation of `sequence`.
///
/// For every element the accumulator is replaced by
/// `reducer(accumulator, element)` and a clone of the new accumulator is
/// yielded. Unlike [`reduce`](crate::aggregate::reduce), the result of every
/// step is observable and the sequence is not consumed to its end.
///
/// # Examples
///
/// ```rust
/// use seqflow::transform::scan;
///
/// let sums: Vec<i32> = scan(|total, value| total + value, 0, vec![1, 2, 3]).collect();
/// assert_eq!(sums, vec![1, 3, 6]);
/// ```
pub fn scan<S, B, F>(reducer: F, initial: B, sequence: S) -> Scan<S::IntoIter, B, F>
where
    S: IntoIterator,
    B: Clone,
    F: FnMut(B, S::Item) -> B,
{
    Scan {
        source: sequence.into_iter().fuse(),
        reducer,
        accumulator: Some(initial),
    }
}

/// Iterator returned by [`scan`].
#[derive(Clone)]
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct Scan<I, B, F> {
    source: Fuse<I>,
    reducer: F,
    accumulator: Option<B>,
}

impl<I: fmt::Debug, B: fmt::Debug, F> fmt::Debug for Scan<I, B, F> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("Scan")
            .field("source", &self.source)
            .field("accumulator", &self.accumulator)
            .finish_non_exhaustive()
    }
}

impl<I, B, F> Iterator for Scan<I, B, F>
where
    I: Iterator,
    B: Clone,
    F: FnMut(B, I::Item) -> B,
{
    type Item = B;

    fn next(&mut self) -> Option<B> {
        let item = self.source.next()?;
        let accumulator = (self.reducer)(self.accumulator.take()?, item);
        self.accumulator = Some(accumulator.clone());
        Some(accumulator)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.source.size_hint()
    }
}

/// Yields the running accumulation of `sequence` using a deferred reducer.
///
/// Each reducer future is awaited before the next element is pulled.
#[cfg(feature = "async")]
pub fn async_scan<M, S, B, F, Fut>(
    reducer: F,
    initial: B,
    sequence: S,
) -> AsyncScan<S::IntoStream, B, F, Fut>
where
    S: IntoAsyncSequence<M>,
    B: Clone,
    F: FnMut(B, S::Item) -> Fut,
    Fut: Future<Output = B>,
{
    AsyncScan {
        source: sequence.into_async_sequence().fuse(),
        reducer,
        accumulator: Some(initial),
        pending: None,
    }
}

#[cfg(feature = "async")]
pin_project! {
    /// Stream returned by [`async_scan`].
    #[must_use = "streams do nothing unless polled"]
    pub struct AsyncScan<S, B, F, Fut> {
        #[pin]
        source: stream::Fuse<S>,
        reducer: F,
        accumulator: Option<B>,
        #[pin]
        pending: Option<Fut>,
    }
}

#[cfg(feature = "async")]
impl<S, B, F, Fut> Stream for AsyncScan<S, B, F, Fut>
where
    S: Stream,
    B: Clone,
    F: FnMut(B, S::Item) -> Fut,
    Fut: Future<Output = B>,
{
    type Item = B;

    fn poll_next(self: Pin<&mut Self>, context: &mut Context<'_>) -> Poll<Option<B>> {
        let mut this = self.project();
        loop {
            if let Some(pending) = this.pending.as_mut().as_pin_mut() {
                let accumulator = ready!(pending.poll(context));
                this.pending.set(None);
                *this.accumulator = Some(accumulator.clone());
                return Poll::Ready(Some(accumulator));
            }
            match ready!(this.source.as_mut().poll_next(context)) {
                Some(item) => match this.accumulator.take() {
                    Some(accumulator) => this.pending.set(Some((this.reducer)(accumulator, item))),
                    None => return Poll::Ready(None),
                },
                None => return Poll::Ready(None),
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let pending = usize::from(self.pending.is_some());
        let (lower, upper) = self.source.size_hint();
        (
            lower.saturating_add(pending),
            upper.and_then(|upper| upper.checked_add(pending)),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn test_scan_yields_once_per_element() {
        let result: Vec<String> = scan(
            |mut text: String, value: char| {
                text.push(value);
                text
            },
            String::new(),
            "abc".chars(),
        )
        .collect();
        assert_eq!(result, vec!["a", "ab", "abc"]);
    }

    #[rstest]
    fn test_scan_on_empty_yields_nothing() {
        let mut result = scan(|total: i32, value: i32| total + value, 10, Vec::new());
        assert_eq!(result.next(), None);
    }
}
