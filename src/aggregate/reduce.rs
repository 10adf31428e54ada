//! `reduce`, `count` and their asynchronous twins.

#[cfg(feature = "async")]
use std::future::{self, Future, Ready};
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

/// Folds every element of `sequence` into an accumulator, starting from
/// `initial`.
///
/// # Examples
///
/// ```rust
/// use seqflow::aggregate::reduce;
///
/// let sum = reduce(|total, value| total + value, 0, vec![1, 2, 3]);
/// assert_eq!(sum, 6);
///
/// let untouched = reduce(|total: i32, value: i32| total + value, 7, Vec::new());
/// assert_eq!(untouched, 7);
/// ```
pub fn reduce<S, B, F>(reducer: F, initial: B, sequence: S) -> B
where
    S: IntoIterator,
    F: FnMut(B, S::Item) -> B,
{
    sequence.into_iter().fold(initial, reducer)
}

/// Counts the elements of `sequence`, pulling it to exhaustion.
///
/// # Examples
///
/// ```rust
/// use seqflow::aggregate::count;
/// use seqflow::structural::range;
///
/// assert_eq!(count(range(0, 5)), 5);
/// ```
pub fn count<S: IntoIterator>(sequence: S) -> usize {
    reduce(|total, _| total + 1, 0, sequence)
}

/// Folds a synchronous or asynchronous `sequence` with a deferred `reducer`.
///
/// Each reducer future is awaited before the next element is pulled.
///
/// # Examples
///
/// ```rust
/// use seqflow::aggregate::async_reduce;
///
/// # futures::executor::block_on(async {
/// let add = |total: i32, value: i32| async move { total + value };
/// let sum = async_reduce(add, 0, vec![1, 2, 3]).await;
/// assert_eq!(sum, 6);
/// # });
/// ```
#[cfg(feature = "async")]
pub fn async_reduce<M, S, B, F, Fut>(
    reducer: F,
    initial: B,
    sequence: S,
) -> AsyncFold<S::IntoStream, F, B, Fut>
where
    S: IntoAsyncSequence<M>,
    F: FnMut(B, S::Item) -> Fut,
    Fut: Future<Output = B>,
{
    AsyncFold::new(sequence.into_async_sequence(), reducer, initial)
}

/// Counts the elements of a synchronous or asynchronous `sequence`.
///
/// # Examples
///
/// ```rust
/// use seqflow::aggregate::async_count;
///
/// # futures::executor::block_on(async {
/// assert_eq!(async_count(futures::stream::iter(vec!['a', 'b'])).await, 2);
/// # });
/// ```
#[cfg(feature = "async")]
pub fn async_count<M, S>(sequence: S) -> AsyncCount<S::IntoStream>
where
    S: IntoAsyncSequence<M>,
{
    let increment: fn(usize, S::Item) -> Ready<usize> = |total, _| future::ready(total + 1);
    AsyncFold::new(sequence.into_async_sequence(), increment, 0)
}

/// Future returned by [`async_count`].
#[cfg(feature = "async")]
pub type AsyncCount<S> =
    AsyncFold<S, fn(usize, <S as Stream>::Item) -> Ready<usize>, usize, Ready<usize>>;

#[cfg(feature = "async")]
pin_project! {
    /// Future returned by [`async_reduce`].
    ///
    /// # Panics
    ///
    /// Polling again after the future has completed panics.
    #[must_use = "futures do nothing unless you `.await` or poll them"]
    pub struct AsyncFold<S, F, B, Fut> {
        #[pin]
        source: stream::Fuse<S>,
        reducer: F,
        accumulator: Option<B>,
        #[pin]
        pending: Option<Fut>,
    }
}

#[cfg(feature = "async")]
impl<S: Stream, F, B, Fut> AsyncFold<S, F, B, Fut> {
    pub(crate) fn new(source: S, reducer: F, initial: B) -> Self {
        Self {
            source: source.fuse(),
            reducer,
            accumulator: Some(initial),
            pending: None,
        }
    }
}

#[cfg(feature = "async")]
impl<S, F, B, Fut> Future for AsyncFold<S, F, B, Fut>
where
    S: Stream,
    F: FnMut(B, S::Item) -> Fut,
    Fut: Future<Output = B>,
{
    type Output = B;

    fn poll(self: Pin<&mut Self>, context: &mut Context<'_>) -> Poll<B> {
        let mut this = self.project();
        loop {
            if let Some(pending) = this.pending.as_mut().as_pin_mut() {
                let next = ready!(pending.poll(context));
                this.pending.set(None);
                *this.accumulator = Some(next);
            }
            let Some(accumulator) = this.accumulator.take() else {
                panic!("`AsyncFold` polled after completion");
            };
            match this.source.as_mut().poll_next(context) {
                Poll::Pending => {
                    *this.accumulator = Some(accumulator);
                    return Poll::Pending;
                }
                Poll::Ready(Some(item)) => {
                    this.pending.set(Some((this.reducer)(accumulator, item)));
                }
                Poll::Ready(None) => return Poll::Ready(accumulator),
            }
        }
    }
}
