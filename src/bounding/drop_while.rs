//! `drop_while` and `async_drop_while`.

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

/// Discards elements while `predicate` holds, then yields everything.
///
/// The first element failing the predicate is yielded, and every element
/// after it is yielded without consulting the predicate again.
///
/// # Examples
///
/// ```rust
/// use seqflow::bounding::drop_while;
///
/// let rest: Vec<i32> = drop_while(|value: &i32| *value < 3, vec![1, 2, 3, 1, 4]).collect();
/// assert_eq!(rest, vec![3, 1, 4]);
/// ```
pub fn drop_while<S, P>(predicate: P, sequence: S) -> SkipWhile<S::IntoIter, P>
where
    S: IntoIterator,
    P: FnMut(&S::Item) -> bool,
{
    SkipWhile {
        source: sequence.into_iter().fuse(),
        predicate,
        dropping: true,
    }
}

/// Iterator returned by [`drop_while`].
#[derive(Clone)]
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct SkipWhile<I, P> {
    source: Fuse<I>,
    predicate: P,
    dropping: bool,
}

impl<I: fmt::Debug, P> fmt::Debug for SkipWhile<I, P> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("SkipWhile")
            .field("source", &self.source)
            .field("dropping", &self.dropping)
            .finish_non_exhaustive()
    }
}

impl<I, P> Iterator for SkipWhile<I, P>
where
    I: Iterator,
    P: FnMut(&I::Item) -> bool,
{
    type Item = I::Item;

    fn next(&mut self) -> Option<I::Item> {
        if !self.dropping {
            return self.source.next();
        }
        loop {
            let item = self.source.next()?;
            if !(self.predicate)(&item) {
                self.dropping = false;
                return Some(item);
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let (lower, upper) = self.source.size_hint();
        if self.dropping { (0, upper) } else { (lower, upper) }
    }
}

/// Discards elements while a deferred `predicate` resolves to `true`, then
/// yields everything.
#[cfg(feature = "async")]
pub fn async_drop_while<M, S, P, Fut>(
    predicate: P,
    sequence: S,
) -> AsyncSkipWhile<S::IntoStream, S::Item, P, Fut>
where
    S: IntoAsyncSequence<M>,
    P: FnMut(&S::Item) -> Fut,
    Fut: Future<Output = bool>,
{
    AsyncSkipWhile {
        source: sequence.into_async_sequence().fuse(),
        predicate,
        held: None,
        pending: None,
        dropping: true,
    }
}

#[cfg(feature = "async")]
pin_project! {
    /// Stream returned by [`async_drop_while`].
    #[must_use = "streams do nothing unless polled"]
    pub struct AsyncSkipWhile<S, T, P, Fut> {
        #[pin]
        source: stream::Fuse<S>,
        predicate: P,
        held: Option<T>,
        #[pin]
        pending: Option<Fut>,
        dropping: bool,
    }
}

#[cfg(feature = "async")]
impl<S, T, P, Fut> Stream for AsyncSkipWhile<S, T, P, Fut>
where
    S: Stream<Item = T>,
    P: FnMut(&T) -> Fut,
    Fut: Future<Output = bool>,
{
    type Item = T;

    fn poll_next(self: Pin<&mut Self>, context: &mut Context<'_>) -> Poll<Option<T>> {
        let mut this = self.project();
        loop {
            if let Some(pending) = this.pending.as_mut().as_pin_mut() {
                let drop_item = ready!(pending.poll(context));
                this.pending.set(None);
                let item = this.held.take();
                if !drop_item {
                    *this.dropping = false;
                    return Poll::Ready(item);
                }
            }
            if !*this.dropping {
                return this.source.as_mut().poll_next(context);
            }
            match ready!(this.source.as_mut().poll_next(context)) {
                Some(item) => {
                    this.pending.set(Some((this.predicate)(&item)));
                    *this.held = Some(item);
                }
                None => return Poll::Ready(None),
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let held = usize::from(self.held.is_some());
        let (lower, upper) = self.source.size_hint();
        let upper = upper.and_then(|upper| upper.checked_add(held));
        if self.dropping { (0, upper) } else { (lower, upper) }
    }
}
