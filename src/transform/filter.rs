//! `filter` and `async_filter`.

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

/// Yields only the elements for which `predicate` holds.
///
/// Rejected elements are pulled and dropped immediately; nothing is
/// buffered.
///
/// # Examples
///
/// ```rust
/// use seqflow::transform::filter;
///
/// let even: Vec<i32> = filter(|value: &i32| value % 2 == 0, 1..=6).collect();
/// assert_eq!(even, vec![2, 4, 6]);
/// ```
pub fn filter<S, P>(predicate: P, sequence: S) -> Filter<S::IntoIter, P>
where
    S: IntoIterator,
    P: FnMut(&S::Item) -> bool,
{
    Filter {
        source: sequence.into_iter().fuse(),
        predicate,
    }
}

/// Iterator returned by [`filter`].
#[derive(Clone)]
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct Filter<I, P> {
    source: Fuse<I>,
    predicate: P,
}

impl<I: fmt::Debug, P> fmt::Debug for Filter<I, P> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("Filter")
            .field("source", &self.source)
            .finish_non_exhaustive()
    }
}

impl<I, P> Iterator for Filter<I, P>
where
    I: Iterator,
    P: FnMut(&I::Item) -> bool,
{
    type Item = I::Item;

    fn next(&mut self) -> Option<I::Item> {
        loop {
            let item = self.source.next()?;
            if (self.predicate)(&item) {
                return Some(item);
            }
        }
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, self.source.size_hint().1)
    }
}

/// Yields only the elements for which a deferred `predicate` resolves to
/// `true`.
///
/// # Examples
///
/// ```rust
/// use seqflow::transform::async_filter;
/// use futures::StreamExt;
///
/// # futures::executor::block_on(async {
/// let large = async_filter(|value: &i32| std::future::ready(*value > 1), vec![1, 2, 3]);
/// assert_eq!(large.collect::<Vec<_>>().await, vec![2, 3]);
/// # });
/// ```
#[cfg(feature = "async")]
pub fn async_filter<M, S, P, Fut>(
    predicate: P,
    sequence: S,
) -> AsyncFilter<S::IntoStream, S::Item, P, Fut>
where
    S: IntoAsyncSequence<M>,
    P: FnMut(&S::Item) -> Fut,
    Fut: Future<Output = bool>,
{
    AsyncFilter {
        source: sequence.into_async_sequence().fuse(),
        predicate,
        held: None,
        pending: None,
    }
}

#[cfg(feature = "async")]
pin_project! {
    /// Stream returned by [`async_filter`].
    #[must_use = "streams do nothing unless polled"]
    pub struct AsyncFilter<S, T, P, Fut> {
        #[pin]
        source: stream::Fuse<S>,
        predicate: P,
        held: Option<T>,
        #[pin]
        pending: Option<Fut>,
    }
}

#[cfg(feature = "async")]
impl<S, T, P, Fut> Stream for AsyncFilter<S, T, P, Fut>
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
                let keep = ready!(pending.poll(context));
                this.pending.set(None);
                let item = this.held.take();
                if keep && item.is_some() {
                    return Poll::Ready(item);
                }
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
        let upper = self.source.size_hint().1;
        (0, upper.and_then(|upper| upper.checked_add(held)))
    }
}
