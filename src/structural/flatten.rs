//! `flatten` and `async_flatten`.

use std::iter::Fuse;

use smallvec::SmallVec;

#[cfg(feature = "async")]
use std::pin::Pin;
#[cfg(feature = "async")]
use std::task::{Context, Poll, ready};

#[cfg(feature = "async")]
use futures::stream::{self, Stream, StreamExt};
#[cfg(feature = "async")]
use pin_project_lite::pin_project;

use super::nested::{Depth, Nested};
#[cfg(feature = "async")]
use super::nested::AsyncNested;
#[cfg(feature = "async")]
use crate::sequence::{Adapted, BoxAsyncSequence, BoxSequence, IntoAsyncSequence};

/// Removes up to `depth` levels of nesting from `sequence`.
///
/// Every [`Nested::Node`] met while the depth budget is positive is expanded
/// in place, its children being flattened with one level less. Leaves, and
/// nodes reached once the budget is spent, are yielded unchanged.
///
/// # Examples
///
/// ```rust
/// use seqflow::nested;
/// use seqflow::structural::{Depth, flatten};
///
/// let values = vec![nested!(1), nested!([2, [3, 4]])];
///
/// let one_level: Vec<_> = flatten(values.clone(), Depth::default()).collect();
/// assert_eq!(one_level, vec![nested!(1), nested!(2), nested!([3, 4])]);
///
/// let all: Vec<i32> = flatten(values, Depth::Infinite)
///     .filter_map(|value| value.into_leaf())
///     .collect();
/// assert_eq!(all, vec![1, 2, 3, 4]);
/// ```
pub fn flatten<S, T>(sequence: S, depth: impl Into<Depth>) -> Flatten<S::IntoIter, T>
where
    S: IntoIterator<Item = Nested<T>>,
{
    Flatten {
        source: sequence.into_iter().fuse(),
        depth: depth.into(),
        levels: SmallVec::new(),
    }
}

/// Iterator returned by [`flatten`].
#[derive(Debug, Clone)]
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct Flatten<I, T> {
    source: Fuse<I>,
    depth: Depth,
    levels: SmallVec<[(std::vec::IntoIter<Nested<T>>, Depth); 4]>,
}

impl<I, T> Iterator for Flatten<I, T>
where
    I: Iterator<Item = Nested<T>>,
{
    type Item = Nested<T>;

    fn next(&mut self) -> Option<Nested<T>> {
        loop {
            let (item, depth) = match self.levels.last_mut() {
                Some((children, depth)) => {
                    let depth = *depth;
                    match children.next() {
                        Some(child) => (child, depth),
                        None => {
                            self.levels.pop();
                            continue;
                        }
                    }
                }
                None => (self.source.next()?, self.depth),
            };
            match item {
                Nested::Node(children) if depth.allows_descent() => {
                    self.levels.push((children.into_iter(), depth.descend()));
                }
                other => return Some(other),
            }
        }
    }
}

#[cfg(feature = "async")]
type Level<'a, T> = (
    Adapted<BoxSequence<'a, AsyncNested<'a, T>>, BoxAsyncSequence<'a, AsyncNested<'a, T>>>,
    Depth,
);

/// Removes up to `depth` levels of nesting from a synchronous or
/// asynchronous `sequence`.
///
/// Both nested synchronous sequences and nested asynchronous sequences are
/// expanded. Children are pulled one at a time, in order.
///
/// # Examples
///
/// ```rust
/// use seqflow::structural::{AsyncNested, Depth, async_flatten};
/// use futures::StreamExt;
///
/// # futures::executor::block_on(async {
/// let values = vec![
///     AsyncNested::leaf(1),
///     AsyncNested::stream(futures::stream::iter(vec![
///         AsyncNested::leaf(2),
///         AsyncNested::iter(vec![AsyncNested::leaf(3)]),
///     ])),
/// ];
/// let all: Vec<i32> = async_flatten(values, Depth::Infinite)
///     .filter_map(|value| async move { value.into_leaf() })
///     .collect()
///     .await;
/// assert_eq!(all, vec![1, 2, 3]);
/// # });
/// ```
#[cfg(feature = "async")]
pub fn async_flatten<'a, M, S, T>(
    sequence: S,
    depth: impl Into<Depth>,
) -> AsyncFlatten<'a, S::IntoStream, T>
where
    S: IntoAsyncSequence<M, Item = AsyncNested<'a, T>>,
{
    AsyncFlatten {
        source: sequence.into_async_sequence().fuse(),
        depth: depth.into(),
        levels: SmallVec::new(),
    }
}

#[cfg(feature = "async")]
pin_project! {
    /// Stream returned by [`async_flatten`].
    #[must_use = "streams do nothing unless polled"]
    pub struct AsyncFlatten<'a, S, T> {
        #[pin]
        source: stream::Fuse<S>,
        depth: Depth,
        levels: SmallVec<[Level<'a, T>; 4]>,
    }
}

#[cfg(feature = "async")]
impl<'a, S, T> Stream for AsyncFlatten<'a, S, T>
where
    S: Stream<Item = AsyncNested<'a, T>>,
{
    type Item = AsyncNested<'a, T>;

    fn poll_next(self: Pin<&mut Self>, context: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let mut this = self.project();
        loop {
            let (item, depth) = match this.levels.last_mut() {
                Some((children, depth)) => {
                    let depth = *depth;
                    match ready!(children.poll_next_unpin(context)) {
                        Some(child) => (child, depth),
                        None => {
                            this.levels.pop();
                            continue;
                        }
                    }
                }
                None => match ready!(this.source.as_mut().poll_next(context)) {
                    Some(item) => (item, *this.depth),
                    None => return Poll::Ready(None),
                },
            };
            match item {
                AsyncNested::Stream(children) if depth.allows_descent() => {
                    this.levels.push((Adapted::stream(children), depth.descend()));
                }
                AsyncNested::Iter(children) if depth.allows_descent() => {
                    this.levels.push((Adapted::iter(children), depth.descend()));
                }
                other => return Poll::Ready(Some(other)),
            }
        }
    }
}
