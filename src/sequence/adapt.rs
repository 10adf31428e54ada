//! Cross-mode adaptation between synchronous and asynchronous sequences.

use std::pin::Pin;
use std::task::{Context, Poll};

use futures::Stream;
use futures::stream::{FusedStream, LocalBoxStream};
use pin_project_lite::pin_project;

/// A type-erased asynchronous sequence.
pub type BoxAsyncSequence<'a, T> = LocalBoxStream<'a, T>;

/// Marker selecting the synchronous implementation of [`IntoAsyncSequence`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct FromIter;

/// Marker selecting the asynchronous implementation of [`IntoAsyncSequence`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct FromStream;

/// Conversion into an asynchronous sequence.
///
/// Implemented for every [`IntoIterator`] (with the marker [`FromIter`]) and
/// for every [`Stream`] (with the marker [`FromStream`]). The marker is
/// inferred by the compiler, so operators can declare a single parameter
/// that accepts either kind of input:
///
/// ```rust
/// use seqflow::sequence::IntoAsyncSequence;
/// use futures::StreamExt;
///
/// async fn first<M, S: IntoAsyncSequence<M>>(sequence: S) -> Option<S::Item> {
///     let mut stream = Box::pin(sequence.into_async_sequence());
///     stream.next().await
/// }
///
/// # futures::executor::block_on(async {
/// assert_eq!(first(vec![1, 2]).await, Some(1));
/// assert_eq!(first(futures::stream::iter(["a"])).await, Some("a"));
/// # });
/// ```
///
/// A type implementing both [`Iterator`] and [`Stream`] is ambiguous; wrap it
/// in [`Adapted`] to choose the capability explicitly.
pub trait IntoAsyncSequence<Marker> {
    /// The element type of the sequence.
    type Item;

    /// The stream the input is converted into.
    type IntoStream: Stream<Item = Self::Item>;

    /// Performs the conversion.
    fn into_async_sequence(self) -> Self::IntoStream;
}

impl<I: IntoIterator> IntoAsyncSequence<FromIter> for I {
    type Item = <I as IntoIterator>::Item;
    type IntoStream = IterStream<<I as IntoIterator>::IntoIter>;

    #[inline]
    fn into_async_sequence(self) -> Self::IntoStream {
        IterStream::new(self.into_iter())
    }
}

impl<S: Stream> IntoAsyncSequence<FromStream> for S {
    type Item = S::Item;
    type IntoStream = S;

    #[inline]
    fn into_async_sequence(self) -> Self::IntoStream {
        self
    }
}

pin_project! {
    /// A synchronous sequence viewed as an asynchronous one.
    ///
    /// Every pull completes immediately. Once the iterator reports its end,
    /// it is never pulled again.
    #[derive(Debug, Clone)]
    #[must_use = "streams do nothing unless polled"]
    pub struct IterStream<I> {
        iterator: I,
        exhausted: bool,
    }
}

impl<I> IterStream<I> {
    /// Wraps an iterator.
    #[inline]
    pub const fn new(iterator: I) -> Self {
        Self {
            iterator,
            exhausted: false,
        }
    }

    /// Returns the wrapped iterator.
    #[inline]
    pub fn into_inner(self) -> I {
        self.iterator
    }
}

impl<I: Iterator> Stream for IterStream<I> {
    type Item = I::Item;

    fn poll_next(self: Pin<&mut Self>, _context: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let this = self.project();
        if *this.exhausted {
            return Poll::Ready(None);
        }
        let next = this.iterator.next();
        if next.is_none() {
            *this.exhausted = true;
        }
        Poll::Ready(next)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        if self.exhausted {
            (0, Some(0))
        } else {
            self.iterator.size_hint()
        }
    }
}

impl<I: Iterator> FusedStream for IterStream<I> {
    fn is_terminated(&self) -> bool {
        self.exhausted
    }
}

pin_project! {
    /// A sequence whose kind is only known at runtime.
    ///
    /// `Adapted` is the tagged union of the two pulling capabilities. Both
    /// kinds are driven through the [`Stream`] interface, which lets values
    /// of either kind be stored side by side (for example as the sources of
    /// [`async_concat_all`](crate::structural::async_concat_all)).
    ///
    /// # Examples
    ///
    /// ```rust
    /// use seqflow::sequence::Adapted;
    /// use futures::StreamExt;
    ///
    /// # futures::executor::block_on(async {
    /// let sources = vec![
    ///     Adapted::iter(vec![1, 2]),
    ///     Adapted::stream(futures::stream::iter(vec![3])),
    /// ];
    /// let mut all = Vec::new();
    /// for mut source in sources {
    ///     while let Some(item) = source.next().await {
    ///         all.push(item);
    ///     }
    /// }
    /// assert_eq!(all, vec![1, 2, 3]);
    /// # });
    /// ```
    #[derive(Debug)]
    #[must_use = "streams do nothing unless polled"]
    pub struct Adapted<I, S> {
        #[pin]
        source: Source<I, S>,
    }
}

pin_project! {
    #[derive(Debug)]
    #[project = SourceProjection]
    enum Source<I, S> {
        Iter {
            #[pin]
            inner: IterStream<I>,
        },
        Stream {
            #[pin]
            inner: S,
        },
    }
}

impl<I, S> Adapted<I, S> {
    /// Adapts a synchronous sequence.
    pub fn iter<Sequence>(sequence: Sequence) -> Self
    where
        Sequence: IntoIterator<IntoIter = I>,
    {
        Self {
            source: Source::Iter {
                inner: IterStream::new(sequence.into_iter()),
            },
        }
    }

    /// Adapts an asynchronous sequence.
    pub const fn stream(stream: S) -> Self {
        Self {
            source: Source::Stream { inner: stream },
        }
    }

    /// Returns `true` if the source is asynchronous.
    pub const fn is_stream(&self) -> bool {
        matches!(self.source, Source::Stream { .. })
    }
}

impl<I, S> Stream for Adapted<I, S>
where
    I: Iterator,
    S: Stream<Item = I::Item>,
{
    type Item = I::Item;

    fn poll_next(self: Pin<&mut Self>, context: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        match self.project().source.project() {
            SourceProjection::Iter { inner } => inner.poll_next(context),
            SourceProjection::Stream { inner } => inner.poll_next(context),
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match &self.source {
            Source::Iter { inner } => inner.size_hint(),
            Source::Stream { inner } => inner.size_hint(),
        }
    }
}

static_assertions::assert_impl_all!(IterStream<std::vec::IntoIter<i32>>: Unpin, Send, Sync);
static_assertions::assert_impl_all!(
    Adapted<std::vec::IntoIter<i32>, futures::stream::Iter<std::vec::IntoIter<i32>>>: Unpin
);

#[cfg(test)]
mod tests {
    use super::*;
    use futures::StreamExt;
    use futures::executor::block_on;
    use rstest::rstest;

    #[rstest]
    fn test_iter_stream_yields_in_order() {
        let collected: Vec<i32> = block_on(IterStream::new(vec![1, 2, 3].into_iter()).collect());
        assert_eq!(collected, vec![1, 2, 3]);
    }

    #[rstest]
    fn test_iter_stream_does_not_pull_after_exhaustion() {
        let mut calls = 0;
        let source = std::iter::from_fn(|| {
            calls += 1;
            if calls == 2 { Some(calls) } else { None }
        });
        let mut stream = IterStream::new(source);
        block_on(async {
            assert_eq!(stream.next().await, None);
            assert_eq!(stream.next().await, None);
            assert!(stream.is_terminated());
        });
        drop(stream);
        assert_eq!(calls, 1);
    }

    #[rstest]
    fn test_vector_adapts_through_iter_marker() {
        let stream = vec!["a", "b"].into_async_sequence();
        let collected: Vec<&str> = block_on(stream.collect());
        assert_eq!(collected, vec!["a", "b"]);
    }

    #[rstest]
    fn test_stream_adapts_to_itself() {
        let stream = futures::stream::iter(1..=3).into_async_sequence();
        let collected: Vec<i32> = block_on(stream.collect());
        assert_eq!(collected, vec![1, 2, 3]);
    }

    #[rstest]
    fn test_adapted_reports_its_kind() {
        let from_iter: Adapted<std::vec::IntoIter<i32>, futures::stream::Empty<i32>> =
            Adapted::iter(vec![1]);
        let from_stream: Adapted<std::vec::IntoIter<i32>, _> =
            Adapted::stream(futures::stream::empty::<i32>());
        assert!(!from_iter.is_stream());
        assert!(from_stream.is_stream());
    }

    #[rstest]
    fn test_adapted_drives_either_kind() {
        let from_iter: Adapted<_, futures::stream::Empty<u8>> = Adapted::iter(vec![1_u8, 2]);
        assert_eq!(from_iter.size_hint(), (2, Some(2)));
        assert_eq!(block_on(from_iter.collect::<Vec<_>>()), vec![1, 2]);

        let from_stream: Adapted<std::vec::IntoIter<u8>, _> =
            Adapted::stream(futures::stream::iter(vec![3_u8]));
        assert_eq!(block_on(from_stream.collect::<Vec<_>>()), vec![3]);
    }
}
