//! `concat`, `concat_all` and their asynchronous twins.

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

/// Yields every element of `first`, then every element of `second`.
///
/// `second` is untouched until `first` is exhausted.
///
/// # Examples
///
/// ```rust
/// use seqflow::structural::concat;
///
/// let all: Vec<i32> = concat(vec![1, 2], 3..5).collect();
/// assert_eq!(all, vec![1, 2, 3, 4]);
/// ```
pub fn concat<A, B>(first: A, second: B) -> Concat<A::IntoIter, B::IntoIter>
where
    A: IntoIterator,
    B: IntoIterator<Item = A::Item>,
{
    Concat {
        first: first.into_iter().fuse(),
        second: second.into_iter().fuse(),
    }
}

/// Iterator returned by [`concat`].
#[derive(Debug, Clone)]
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct Concat<A, B> {
    first: Fuse<A>,
    second: Fuse<B>,
}

impl<A, B> Iterator for Concat<A, B>
where
    A: Iterator,
    B: Iterator<Item = A::Item>,
{
    type Item = A::Item;

    #[inline]
    fn next(&mut self) -> Option<A::Item> {
        self.first.next().or_else(|| self.second.next())
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let (first_lower, first_upper) = self.first.size_hint();
        let (second_lower, second_upper) = self.second.size_hint();
        let upper = match (first_upper, second_upper) {
            (Some(first), Some(second)) => first.checked_add(second),
            _ => None,
        };
        (first_lower.saturating_add(second_lower), upper)
    }
}

/// Yields the elements of every sequence in `sequences`, one sequence after
/// the other.
///
/// Each source is only converted into an iterator when the previous one is
/// exhausted. Sources of different concrete types can be combined by
/// erasing them with [`boxed`](crate::sequence::boxed).
///
/// # Examples
///
/// ```rust
/// use seqflow::structural::concat_all;
///
/// let all: Vec<i32> = concat_all(vec![vec![1], vec![], vec![2, 3]]).collect();
/// assert_eq!(all, vec![1, 2, 3]);
/// ```
pub fn concat_all<O>(sequences: O) -> ConcatAll<O::IntoIter, <O::Item as IntoIterator>::IntoIter>
where
    O: IntoIterator,
    O::Item: IntoIterator,
{
    ConcatAll {
        sources: sequences.into_iter().fuse(),
        current: None,
    }
}

/// Iterator returned by [`concat_all`].
#[derive(Debug, Clone)]
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct ConcatAll<O, C> {
    sources: Fuse<O>,
    current: Option<C>,
}

impl<O, C> Iterator for ConcatAll<O, C>
where
    O: Iterator,
    O::Item: IntoIterator<IntoIter = C>,
    C: Iterator,
{
    type Item = C::Item;

    fn next(&mut self) -> Option<C::Item> {
        loop {
            if let Some(current) = self.current.as_mut() {
                if let Some(item) = current.next() {
                    return Some(item);
                }
                self.current = None;
            }
            self.current = Some(self.sources.next()?.into_iter());
        }
    }
}

/// Yields every element of `first`, then every element of `second`; either
/// source may be synchronous or asynchronous.
///
/// # Examples
///
/// ```rust
/// use seqflow::structural::async_concat;
/// use futures::StreamExt;
///
/// # futures::executor::block_on(async {
/// let all: Vec<i32> = async_concat(vec![1, 2], futures::stream::iter(vec![3]))
///     .collect()
///     .await;
/// assert_eq!(all, vec![1, 2, 3]);
/// # });
/// ```
#[cfg(feature = "async")]
pub fn async_concat<MA, MB, A, B>(
    first: A,
    second: B,
) -> AsyncConcat<A::IntoStream, B::IntoStream>
where
    A: IntoAsyncSequence<MA>,
    B: IntoAsyncSequence<MB, Item = A::Item>,
{
    AsyncConcat {
        first: first.into_async_sequence().fuse(),
        second: second.into_async_sequence().fuse(),
    }
}

#[cfg(feature = "async")]
pin_project! {
    /// Stream returned by [`async_concat`].
    #[derive(Debug)]
    #[must_use = "streams do nothing unless polled"]
    pub struct AsyncConcat<A, B> {
        #[pin]
        first: stream::Fuse<A>,
        #[pin]
        second: stream::Fuse<B>,
    }
}

#[cfg(feature = "async")]
impl<A, B> Stream for AsyncConcat<A, B>
where
    A: Stream,
    B: Stream<Item = A::Item>,
{
    type Item = A::Item;

    fn poll_next(self: Pin<&mut Self>, context: &mut Context<'_>) -> Poll<Option<A::Item>> {
        let this = self.project();
        if let Some(item) = ready!(this.first.poll_next(context)) {
            return Poll::Ready(Some(item));
        }
        this.second.poll_next(context)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let (first_lower, first_upper) = self.first.size_hint();
        let (second_lower, second_upper) = self.second.size_hint();
        let upper = match (first_upper, second_upper) {
            (Some(first), Some(second)) => first.checked_add(second),
            _ => None,
        };
        (first_lower.saturating_add(second_lower), upper)
    }
}

/// Converts a source into its stream.
#[cfg(feature = "async")]
pub type IntoStreamFn<M, S> = fn(S) -> <S as IntoAsyncSequence<M>>::IntoStream;

/// Yields the elements of every synchronous or asynchronous sequence in
/// `sequences`, one sequence after the other.
///
/// The sources must share a type; use
/// [`Adapted`](crate::sequence::Adapted) or a boxed stream to mix kinds.
///
/// # Examples
///
/// ```rust
/// use seqflow::sequence::Adapted;
/// use seqflow::structural::async_concat_all;
/// use futures::StreamExt;
///
/// # futures::executor::block_on(async {
/// let sources = vec![
///     Adapted::iter(vec![1, 2]),
///     Adapted::stream(futures::stream::iter(vec![3])),
/// ];
/// let all: Vec<i32> = async_concat_all(sources).collect().await;
/// assert_eq!(all, vec![1, 2, 3]);
/// # });
/// ```
#[cfg(feature = "async")]
#[allow(clippy::type_complexity)]
pub fn async_concat_all<M, O, S>(
    sequences: O,
) -> AsyncConcatAll<std::iter::Map<O::IntoIter, IntoStreamFn<M, S>>, S::IntoStream>
where
    O: IntoIterator<Item = S>,
    S: IntoAsyncSequence<M>,
{
    let convert: IntoStreamFn<M, S> = <S as IntoAsyncSequence<M>>::into_async_sequence;
    AsyncConcatAll {
        sources: sequences.into_iter().map(convert).fuse(),
        current: None,
    }
}

#[cfg(feature = "async")]
pin_project! {
    /// Stream returned by [`async_concat_all`].
    #[must_use = "streams do nothing unless polled"]
    pub struct AsyncConcatAll<O, S> {
        sources: Fuse<O>,
        #[pin]
        current: Option<S>,
    }
}

#[cfg(feature = "async")]
impl<O, S> Stream for AsyncConcatAll<O, S>
where
    O: Iterator<Item = S>,
    S: Stream,
{
    type Item = S::Item;

    fn poll_next(self: Pin<&mut Self>, context: &mut Context<'_>) -> Poll<Option<S::Item>> {
        let mut this = self.project();
        loop {
            if let Some(current) = this.current.as_mut().as_pin_mut() {
                if let Some(item) = ready!(current.poll_next(context)) {
                    return Poll::Ready(Some(item));
                }
                this.current.set(None);
            }
            match this.sources.next() {
                Some(source) => this.current.set(Some(source)),
                None => return Poll::Ready(None),
            }
        }
    }
}
