//! `zip` and `async_zip`.

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

/// Pairs the elements of `first` with the elements of `second`.
///
/// Iteration is driven by `first`: the zipped sequence ends when `first`
/// ends, and `second` is only pulled after `first` produced an element. Once
/// `second` is exhausted it is never pulled again and the right-hand side of
/// every remaining pair is `None`.
///
/// # Examples
///
/// ```rust
/// use seqflow::structural::zip;
///
/// let pairs: Vec<_> = zip(vec![1, 2, 3], vec!["a", "b"]).collect();
/// assert_eq!(pairs, vec![(1, Some("a")), (2, Some("b")), (3, None)]);
///
/// let pairs: Vec<_> = zip(vec![1, 2], vec!["a", "b", "c"]).collect();
/// assert_eq!(pairs, vec![(1, Some("a")), (2, Some("b"))]);
/// ```
pub fn zip<A, B>(first: A, second: B) -> Zip<A::IntoIter, B::IntoIter>
where
    A: IntoIterator,
    B: IntoIterator,
{
    Zip {
        first: first.into_iter().fuse(),
        second: second.into_iter().fuse(),
    }
}

/// Iterator returned by [`zip`].
#[derive(Debug, Clone)]
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct Zip<A, B> {
    first: Fuse<A>,
    second: Fuse<B>,
}

impl<A: Iterator, B: Iterator> Iterator for Zip<A, B> {
    type Item = (A::Item, Option<B::Item>);

    fn next(&mut self) -> Option<Self::Item> {
        let left = self.first.next()?;
        Some((left, self.second.next()))
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.first.size_hint()
    }
}

/// Pairs the elements of two synchronous or asynchronous sequences.
///
/// The sources may be of different kinds. Termination follows [`zip`]: it is
/// driven by `first`, and `second` is padded with `None`.
///
/// # Examples
///
/// ```rust
/// use seqflow::structural::async_zip;
/// use futures::StreamExt;
///
/// # futures::executor::block_on(async {
/// let pairs: Vec<_> = async_zip(futures::stream::iter(vec![1, 2]), vec!['x'])
///     .collect()
///     .await;
/// assert_eq!(pairs, vec![(1, Some('x')), (2, None)]);
/// # });
/// ```
#[cfg(feature = "async")]
pub fn async_zip<MA, MB, A, B>(first: A, second: B) -> AsyncZip<A::IntoStream, B::IntoStream>
where
    A: IntoAsyncSequence<MA>,
    B: IntoAsyncSequence<MB>,
{
    AsyncZip {
        first: first.into_async_sequence().fuse(),
        second: second.into_async_sequence().fuse(),
        held: None,
    }
}

#[cfg(feature = "async")]
pin_project! {
    /// Stream returned by [`async_zip`].
    #[must_use = "streams do nothing unless polled"]
    pub struct AsyncZip<A, B>
    where
        A: Stream,
    {
        #[pin]
        first: stream::Fuse<A>,
        #[pin]
        second: stream::Fuse<B>,
        held: Option<A::Item>,
    }
}

#[cfg(feature = "async")]
impl<A, B> Stream for AsyncZip<A, B>
where
    A: Stream,
    B: Stream,
{
    type Item = (A::Item, Option<B::Item>);

    fn poll_next(self: Pin<&mut Self>, context: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let mut this = self.project();
        if this.held.is_none() {
            match ready!(this.first.as_mut().poll_next(context)) {
                Some(left) => *this.held = Some(left),
                None => return Poll::Ready(None),
            }
        }
        let right = ready!(this.second.as_mut().poll_next(context));
        Poll::Ready(this.held.take().map(|left| (left, right)))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let held = usize::from(self.held.is_some());
        let (lower, upper) = self.first.size_hint();
        (
            lower.saturating_add(held),
            upper.and_then(|upper| upper.checked_add(held)),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn test_zip_pads_shorter_second() {
        let pairs: Vec<_> = zip(vec![1, 2, 3], vec!["a", "b"]).collect();
        assert_eq!(pairs, vec![(1, Some("a")), (2, Some("b")), (3, None)]);
    }

    #[rstest]
    fn test_zip_stops_with_first() {
        let pairs: Vec<_> = zip(vec![1, 2], vec!["a", "b", "c"]).collect();
        assert_eq!(pairs, vec![(1, Some("a")), (2, Some("b"))]);
    }

    #[rstest]
    fn test_zip_does_not_pull_second_after_first_ends() {
        let mut second = vec![10, 20, 30].into_iter();
        let pairs: Vec<_> = zip(vec![1], second.by_ref()).collect();
        assert_eq!(pairs, vec![(1, Some(10))]);
        assert_eq!(second.next(), Some(20));
    }

    #[rstest]
    fn test_zip_never_pulls_exhausted_second_again() {
        let mut calls = 0;
        let second = std::iter::from_fn(|| {
            calls += 1;
            if calls == 1 { None } else { Some(calls) }
        });
        let pairs: Vec<_> = zip(vec![1, 2, 3], second).collect();
        assert_eq!(pairs, vec![(1, None), (2, None), (3, None)]);
        assert_eq!(calls, 1);
    }

    #[cfg(feature = "async")]
    #[rstest]
    fn test_async_zip_mixes_kinds() {
        let pairs: Vec<_> = futures::executor::block_on(
            async_zip(vec![1, 2, 3], futures::stream::iter(vec!['a', 'b'])).collect(),
        );
        assert_eq!(pairs, vec![(1, Some('a')), (2, Some('b')), (3, None)]);
    }
}
