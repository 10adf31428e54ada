//! `take_while` and `async_take_while`.

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

/// Yields elements while `predicate` holds.
///
/// The first element failing the predicate is consumed from the source and
/// discarded; it is never yielded and never offered again. From then on the
/// iterator is exhausted.
///
/// # Examples
///
/// ```rust
/// use seqflow::bounding::take_while;
///
/// let mut source = vec![1, 2, 5, 3].into_iter();
/// let small: Vec<i32> = take_while(|value: &i32| *value < 4, source.by_ref()).collect();
/// assert_eq!(small, vec![1, 2]);
/// // `5` was consumed by the failed check.
/// assert_eq!(source.next(), Some(3));
/// ```
pub fn take_while<S, P>(predicate: P, sequence: S) -> TakeWhile<S::IntoIter, P>
where
    S: IntoIterator,
    P: FnMut(&S::Item) -> bool,
{
    TakeWhile {
        source: sequence.into_iter().fuse(),
        predicate,
        done: false,
    }
}

/// Iterator returned by [`take_while`].
#[derive(Clone)]
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct TakeWhile<I, P> {
    source: Fuse<I>,
    predicate: P,
    done: bool,
}

impl<I: fmt::Debug, P> fmt::Debug for TakeWhile<I, P> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("TakeWhile")
            .field("source", &self.source)
            .field("done", &self.done)
            .finish_non_exhaustive()
    }
}

impl<I, P> Iterator for TakeWhile<I, P>
where
    I: Iterator,
    P: FnMut(&I::Item) -> bool,
{
    type Item = I::Item;

    fn next(&mut self) -> Option<I::Item> {
        if self.done {
            return None;
        }
        let Some(item) = self.source.next() else {
            self.done = true;
            return None;
        };
        if (self.predicate)(&item) {
            Some(item)
        } else {
            tracing::trace!("take_while predicate failed, sequence closed");
            self.done = true;
            None
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        if self.done {
            (0, Some(0))
        } else {
            (0, self.source.size_hint().1)
        }
    }
}

/// Yields elements while a deferred `predicate` resolves to `true`.
///
/// Shares the consumption policy of [`take_while`]: the failing element is
/// pulled and discarded.
#[cfg(feature = "async")]
pub fn async_take_while<M, S, P, Fut>(
    predicate: P,
    sequence: S,
) -> AsyncTakeWhile<S::IntoStream, S::Item, P, Fut>
where
    S: IntoAsyncSequence<M>,
    P: FnMut(&S::Item) -> Fut,
    Fut: Future<Output = bool>,
{
    AsyncTakeWhile {
        source: sequence.into_async_sequence().fuse(),
        predicate,
        held: None,
        pending: None,
        done: false,
    }
}

#[cfg(feature = "async")]
pin_project! {
    /// Stream returned by [`async_take_while`].
    #[must_use = "streams do nothing unless polled"]
    pub struct AsyncTakeWhile<S, T, P, Fut> {
        #[pin]
        source: stream::Fuse<S>,
        predicate: P,
        held: Option<T>,
        #[pin]
        pending: Option<Fut>,
        done: bool,
    }
}

#[cfg(feature = "async")]
impl<S, T, P, Fut> Stream for AsyncTakeWhile<S, T, P, Fut>
where
    S: Stream<Item = T>,
    P: FnMut(&T) -> Fut,
    Fut: Future<Output = bool>,
{
    type Item = T;

    fn poll_next(self: Pin<&mut Self>, context: &mut Context<'_>) -> Poll<Option<T>> {
        let mut this = self.project();
        if *this.done {
            return Poll::Ready(None);
        }
        if this.pending.is_none() {
            match ready!(this.source.as_mut().poll_next(context)) {
                Some(item) => {
                    this.pending.set(Some((this.predicate)(&item)));
                    *this.held = Some(item);
                }
                None => {
                    *this.done = true;
                    return Poll::Ready(None);
                }
            }
        }
        let Some(pending) = this.pending.as_mut().as_pin_mut() else {
            return Poll::Ready(None);
        };
        let keep = ready!(pending.poll(context));
        this.pending.set(None);
        let item = this.held.take();
        if keep {
            Poll::Ready(item)
        } else {
            tracing::trace!("take_while predicate failed, sequence closed");
            *this.done = true;
            Poll::Ready(None)
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        if self.done {
            return (0, Some(0));
        }
        let held = usize::from(self.held.is_some());
        let upper = self.source.size_hint().1;
        (0, upper.and_then(|upper| upper.checked_add(held)))
    }
}
