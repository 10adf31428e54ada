//! `tap` and `async_tap`.

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

/// Calls `function` on every element for its side effect and yields the
/// element unchanged.
///
/// # Examples
///
/// ```rust
/// use seqflow::transform::tap;
///
/// let mut seen = Vec::new();
/// let values: Vec<i32> = tap(|value: &i32| seen.push(*value), vec![1, 2]).collect();
/// assert_eq!(values, vec![1, 2]);
/// assert_eq!(seen, vec![1, 2]);
/// ```
pub fn tap<S, F>(function: F, sequence: S) -> Tap<S::IntoIter, F>
where
    S: IntoIterator,
    F: FnMut(&S::Item),
{
    Tap {
        source: sequence.into_iter().fuse(),
        function,
    }
}

/// Iterator returned by [`tap`].
#[derive(Clone)]
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct Tap<I, F> {
    source: Fuse<I>,
    function: F,
}

impl<I: fmt::Debug, F> fmt::Debug for Tap<I, F> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("Tap")
            .field("source", &self.source)
            .finish_non_exhaustive()
    }
}

impl<I, F> Iterator for Tap<I, F>
where
    I: Iterator,
    F: FnMut(&I::Item),
{
    type Item = I::Item;

    #[inline]
    fn next(&mut self) -> Option<I::Item> {
        let item = self.source.next()?;
        (self.function)(&item);
        Some(item)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.source.size_hint()
    }
}

/// Calls a deferred `function` on every element and yields the element
/// unchanged once the side effect has completed.
///
/// The side effect for an element always completes before the next element
/// is pulled from upstream.
#[cfg(feature = "async")]
pub fn async_tap<M, S, F, Fut>(function: F, sequence: S) -> AsyncTap<S::IntoStream, S::Item, F, Fut>
where
    S: IntoAsyncSequence<M>,
    F: FnMut(&S::Item) -> Fut,
    Fut: Future<Output = ()>,
{
    AsyncTap {
        source: sequence.into_async_sequence().fuse(),
        function,
        held: None,
        pending: None,
    }
}

#[cfg(feature = "async")]
pin_project! {
    /// Stream returned by [`async_tap`].
    #[must_use = "streams do nothing unless polled"]
    pub struct AsyncTap<S, T, F, Fut> {
        #[pin]
        source: stream::Fuse<S>,
        function: F,
        held: Option<T>,
        #[pin]
        pending: Option<Fut>,
    }
}

#[cfg(feature = "async")]
impl<S, T, F, Fut> Stream for AsyncTap<S, T, F, Fut>
where
    S: Stream<Item = T>,
    F: FnMut(&T) -> Fut,
    Fut: Future<Output = ()>,
{
    type Item = T;

    fn poll_next(self: Pin<&mut Self>, context: &mut Context<'_>) -> Poll<Option<T>> {
        let mut this = self.project();
        loop {
            if let Some(pending) = this.pending.as_mut().as_pin_mut() {
                ready!(pending.poll(context));
                this.pending.set(None);
                if let Some(item) = this.held.take() {
                    return Poll::Ready(Some(item));
                }
            }
            match ready!(this.source.as_mut().poll_next(context)) {
                Some(item) => {
                    this.pending.set(Some((this.function)(&item)));
                    *this.held = Some(item);
                }
                None => return Poll::Ready(None),
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let held = usize::from(self.held.is_some());
        let (lower, upper) = self.source.size_hint();
        (
            lower.saturating_add(held),
            upper.and_then(|upper| upper.checked_add(held)),
        )
    }
}
