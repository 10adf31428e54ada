//! `take` and `async_take`.

use std::iter::Fuse;

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

/// Yields at most `count` elements of `sequence`.
///
/// After the `count`-th element has been yielded the source is never pulled
/// again, so the element following the boundary stays available to whoever
/// owns the source. If the source ends earlier, every available element is
/// yielded and the iterator ends normally.
///
/// # Examples
///
/// ```rust
/// use seqflow::bounding::take;
/// use seqflow::structural::range;
///
/// let first: Vec<i64> = take(3, range(10, None)).collect();
/// assert_eq!(first, vec![10, 11, 12]);
///
/// let mut source = vec![1, 2, 3, 4].into_iter();
/// let taken: Vec<i32> = take(2, source.by_ref()).collect();
/// assert_eq!(taken, vec![1, 2]);
/// assert_eq!(source.next(), Some(3));
/// ```
pub fn take<S: IntoIterator>(count: usize, sequence: S) -> Take<S::IntoIter> {
    Take {
        source: sequence.into_iter().fuse(),
        remaining: count,
    }
}

/// Iterator returned by [`take`].
#[derive(Debug, Clone)]
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct Take<I> {
    source: Fuse<I>,
    remaining: usize,
}

impl<I: Iterator> Iterator for Take<I> {
    type Item = I::Item;

    fn next(&mut self) -> Option<I::Item> {
        if self.remaining == 0 {
            return None;
        }
        let Some(item) = self.source.next() else {
            self.remaining = 0;
            return None;
        };
        self.remaining -= 1;
        if self.remaining == 0 {
            tracing::trace!("take boundary reached");
        }
        Some(item)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        if self.remaining == 0 {
            return (0, Some(0));
        }
        let (lower, upper) = self.source.size_hint();
        (
            lower.min(self.remaining),
            Some(upper.map_or(self.remaining, |upper| upper.min(self.remaining))),
        )
    }
}

/// Yields at most `count` elements of a synchronous or asynchronous
/// `sequence`, never pulling past the boundary.
#[cfg(feature = "async")]
pub fn async_take<M, S>(count: usize, sequence: S) -> AsyncTake<S::IntoStream>
where
    S: IntoAsyncSequence<M>,
{
    AsyncTake {
        source: sequence.into_async_sequence().fuse(),
        remaining: count,
    }
}

#[cfg(feature = "async")]
pin_project! {
    /// Stream returned by [`async_take`].
    #[derive(Debug)]
    #[must_use = "streams do nothing unless polled"]
    pub struct AsyncTake<S> {
        #[pin]
        source: stream::Fuse<S>,
        remaining: usize,
    }
}

#[cfg(feature = "async")]
impl<S: Stream> Stream for AsyncTake<S> {
    type Item = S::Item;

    fn poll_next(self: Pin<&mut Self>, context: &mut Context<'_>) -> Poll<Option<S::Item>> {
        let this = self.project();
        if *this.remaining == 0 {
            return Poll::Ready(None);
        }
        let Some(item) = ready!(this.source.poll_next(context)) else {
            *this.remaining = 0;
            return Poll::Ready(None);
        };
        *this.remaining -= 1;
        if *this.remaining == 0 {
            tracing::trace!("take boundary reached");
        }
        Poll::Ready(Some(item))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        if self.remaining == 0 {
            return (0, Some(0));
        }
        let (lower, upper) = self.source.size_hint();
        (
            lower.min(self.remaining),
            Some(upper.map_or(self.remaining, |upper| upper.min(self.remaining))),
        )
    }
}
