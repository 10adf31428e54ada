//! `map` and `async_map`.

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

/// Lazily applies `function` to every element of `sequence`.
///
/// Nothing is pulled from `sequence` until the returned iterator is pulled,
/// and exactly one upstream element is pulled per output element.
///
/// # Examples
///
/// ```rust
/// use seqflow::transform::map;
///
/// let doubled: Vec<i32> = map(|value| value * 2, vec![1, 2, 3]).collect();
/// assert_eq!(doubled, vec![2, 4, 6]);
/// ```
pub fn map<S, B, F>(function: F, sequence: S) -> Map<S::IntoIter, F>
where
    S: IntoIterator,
    F: FnMut(S::Item) -> B,
{
    Map {
        source: sequence.into_iter().fuse(),
        function,
    }
}

/// Iterator returned by [`map`].
#[derive(Clone)]
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct Map<I, F> {
    source: Fuse<I>,
    function: F,
}

impl<I: fmt::Debug, F> fmt::Debug for Map<I, F> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("Map")
            .field("source", &self.source)
            .finish_non_exhaustive()
    }
}

impl<I, B, F> Iterator for Map<I, F>
where
    I: Iterator,
    F: FnMut(I::Item) -> B,
{
    type Item = B;

    #[inline]
    fn next(&mut self) -> Option<B> {
        self.source.next().map(&mut self.function)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.source.size_hint()
    }
}

/// Lazily applies a deferred `function` to every element of `sequence`.
///
/// `sequence` may be synchronous or asynchronous. The future returned by
/// `function` for an element is awaited before the next element is pulled.
///
/// # Examples
///
/// ```rust
/// use seqflow::transform::async_map;
/// use futures::StreamExt;
///
/// # futures::executor::block_on(async {
/// let words = vec![String::from("a"), String::from("bcd")];
/// let lengths = async_map(|word: String| async move { word.len() }, words);
/// assert_eq!(lengths.collect::<Vec<_>>().await, vec![1, 3]);
/// # });
/// ```
#[cfg(feature = "async")]
pub fn async_map<M, S, F, Fut>(function: F, sequence: S) -> AsyncMap<S::IntoStream, F, Fut>
where
    S: IntoAsyncSequence<M>,
    F: FnMut(S::Item) -> Fut,
    Fut: Future,
{
    AsyncMap {
        source: sequence.into_async_sequence().fuse(),
        function,
        pending: None,
    }
}

#[cfg(feature = "async")]
pin_project! {
    /// Stream returned by [`async_map`].
    #[must_use = "streams do nothing unless polled"]
    pub struct AsyncMap<S, F, Fut> {
        #[pin]
        source: stream::Fuse<S>,
        function: F,
        #[pin]
        pending: Option<Fut>,
    }
}

#[cfg(feature = "async")]
impl<S, F, Fut> Stream for AsyncMap<S, F, Fut>
where
    S: Stream,
    F: FnMut(S::Item) -> Fut,
    Fut: Future,
{
    type Item = Fut::Output;

    fn poll_next(self: Pin<&mut Self>, context: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let mut this = self.project();
        loop {
            if let Some(pending) = this.pending.as_mut().as_pin_mut() {
                let output = ready!(pending.poll(context));
                this.pending.set(None);
                return Poll::Ready(Some(output));
            }
            match ready!(this.source.as_mut().poll_next(context)) {
                Some(item) => this.pending.set(Some((this.function)(item))),
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
    use std::cell::Cell;

    #[rstest]
    fn test_map_applies_function_in_order() {
        let result: Vec<String> = map(|value: i32| value.to_string(), 1..=3).collect();
        assert_eq!(result, vec!["1", "2", "3"]);
    }

    #[rstest]
    fn test_map_is_lazy() {
        let calls = Cell::new(0);
        let mut mapped = map(
            |value: i32| {
                calls.set(calls.get() + 1);
                value
            },
            vec![1, 2, 3],
        );
        assert_eq!(calls.get(), 0);
        assert_eq!(mapped.next(), Some(1));
        assert_eq!(calls.get(), 1);
    }

    #[rstest]
    fn test_map_size_hint_follows_source() {
        let mapped = map(|value: i32| value, vec![1, 2, 3]);
        assert_eq!(mapped.size_hint(), (3, Some(3)));
    }

    #[cfg(feature = "async")]
    #[rstest]
    fn test_async_map_awaits_deferred_results() {
        use futures::executor::block_on;

        let source = futures::stream::iter(vec![1, 2]);
        let mapped = async_map(|value: i32| async move { value + 1 }, source);
        assert_eq!(block_on(mapped.collect::<Vec<_>>()), vec![2, 3]);
    }
}
