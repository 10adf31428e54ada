//! `drop` and `async_drop`.

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

/// Discards the first `count` elements of `sequence` and yields the rest.
///
/// The discarded elements are pulled lazily, on the first pull of the
/// returned iterator.
///
/// # Examples
///
/// ```rust
/// use seqflow::bounding::drop;
///
/// let rest: Vec<i32> = drop(2, vec![1, 2, 3, 4]).collect();
/// assert_eq!(rest, vec![3, 4]);
///
/// let nothing: Vec<i32> = drop(10, vec![1, 2]).collect();
/// assert!(nothing.is_empty());
/// ```
pub fn drop<S: IntoIterator>(count: usize, sequence: S) -> Skip<S::IntoIter> {
    Skip {
        source: sequence.into_iter().fuse(),
        remaining: count,
    }
}

/// Iterator returned by [`drop`].
#[derive(Debug, Clone)]
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct Skip<I> {
    source: Fuse<I>,
    remaining: usize,
}

impl<I: Iterator> Iterator for Skip<I> {
    type Item = I::Item;

    fn next(&mut self) -> Option<I::Item> {
        while self.remaining > 0 {
            self.remaining -= 1;
            self.source.next()?;
        }
        self.source.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let (lower, upper) = self.source.size_hint();
        (
            lower.saturating_sub(self.remaining),
            upper.map(|upper| upper.saturating_sub(self.remaining)),
        )
    }
}

/// Discards the first `count` elements of a synchronous or asynchronous
/// `sequence` and yields the rest.
#[cfg(feature = "async")]
pub fn async_drop<M, S>(count: usize, sequence: S) -> AsyncSkip<S::IntoStream>
where
    S: IntoAsyncSequence<M>,
{
    AsyncSkip {
        source: sequence.into_async_sequence().fuse(),
        remaining: count,
    }
}

#[cfg(feature = "async")]
pin_project! {
    /// Stream returned by [`async_drop`].
    #[derive(Debug)]
    #[must_use = "streams do nothing unless polled"]
    pub struct AsyncSkip<S> {
        #[pin]
        source: stream::Fuse<S>,
        remaining: usize,
    }
}

#[cfg(feature = "async")]
impl<S: Stream> Stream for AsyncSkip<S> {
    type Item = S::Item;

    fn poll_next(self: Pin<&mut Self>, context: &mut Context<'_>) -> Poll<Option<S::Item>> {
        let mut this = self.project();
        while *this.remaining > 0 {
            if ready!(this.source.as_mut().poll_next(context)).is_none() {
                *this.remaining = 0;
                return Poll::Ready(None);
            }
            *this.remaining -= 1;
        }
        this.source.poll_next(context)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let (lower, upper) = self.source.size_hint();
        (
            lower.saturating_sub(self.remaining),
            upper.map(|upper| upper.saturating_sub(self.remaining)),
        )
    }
}
