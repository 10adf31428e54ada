//! Short-circuiting search: `every`, `some`, `find` and their asynchronous
//! twins.

#[cfg(feature = "async")]
use std::future::Future;
#[cfg(feature = "async")]
use std::pin::Pin;
#[cfg(feature = "async")]
use std::task::{Context, Poll, ready};

#[cfg(feature = "async")]
use futures::future::{FutureExt, Map};
#[cfg(feature = "async")]
use futures::stream::{self, Stream, StreamExt};
#[cfg(feature = "async")]
use pin_project_lite::pin_project;

#[cfg(feature = "async")]
use crate::sequence::IntoAsyncSequence;

/// Returns `true` if `predicate` holds for every element of `sequence`.
///
/// Pulling stops at the first element failing the predicate. An empty
/// sequence satisfies any predicate.
///
/// # Examples
///
/// ```rust
/// use seqflow::aggregate::every;
/// use seqflow::structural::empty;
///
/// assert!(every(|value: &i32| *value > 0, vec![1, 2, 3]));
/// assert!(!every(|value: &i32| *value > 1, vec![1, 2, 3]));
/// assert!(every(|_: &i32| false, empty()));
/// ```
pub fn every<S, P>(mut predicate: P, sequence: S) -> bool
where
    S: IntoIterator,
    P: FnMut(&S::Item) -> bool,
{
    find(|item| !predicate(item), sequence).is_none()
}

/// Returns `true` if `predicate` holds for at least one element of
/// `sequence`.
///
/// Pulling stops at the first element satisfying the predicate. An empty
/// sequence never satisfies it.
///
/// # Examples
///
/// ```rust
/// use seqflow::aggregate::some;
///
/// assert!(some(|value: &i32| *value == 2, vec![1, 2, 3]));
/// assert!(!some(|_: &i32| true, Vec::new()));
/// ```
pub fn some<S, P>(predicate: P, sequence: S) -> bool
where
    S: IntoIterator,
    P: FnMut(&S::Item) -> bool,
{
    find(predicate, sequence).is_some()
}

/// Returns the first element of `sequence` satisfying `predicate`.
///
/// Nothing after the matching element is pulled.
///
/// # Examples
///
/// ```rust
/// use seqflow::aggregate::find;
///
/// assert_eq!(find(|word: &&str| word.len() > 1, vec!["a", "bc", "de"]), Some("bc"));
/// assert_eq!(find(|word: &&str| word.is_empty(), vec!["a"]), None);
/// ```
pub fn find<S, P>(mut predicate: P, sequence: S) -> Option<S::Item>
where
    S: IntoIterator,
    P: FnMut(&S::Item) -> bool,
{
    for item in sequence {
        if predicate(&item) {
            tracing::trace!("search decided early");
            return Some(item);
        }
    }
    None
}

/// Returns `true` if a deferred `predicate` resolves to `true` for every
/// element of a synchronous or asynchronous `sequence`.
///
/// # Examples
///
/// ```rust
/// use seqflow::aggregate::async_every;
///
/// # futures::executor::block_on(async {
/// let positive = async_every(|value: &i32| std::future::ready(*value > 0), vec![1, 2]);
/// assert!(positive.await);
/// # });
/// ```
#[cfg(feature = "async")]
pub fn async_every<M, S, P, Fut>(
    predicate: P,
    sequence: S,
) -> AsyncEvery<S::IntoStream, S::Item, P, Fut>
where
    S: IntoAsyncSequence<M>,
    P: FnMut(&S::Item) -> Fut,
    Fut: Future<Output = bool>,
{
    let decide: fn(Option<S::Item>) -> bool = |failing| failing.is_none();
    AsyncFind::new(sequence.into_async_sequence(), predicate, false).map(decide)
}

/// Returns `true` if a deferred `predicate` resolves to `true` for at least
/// one element of a synchronous or asynchronous `sequence`.
#[cfg(feature = "async")]
pub fn async_some<M, S, P, Fut>(
    predicate: P,
    sequence: S,
) -> AsyncSome<S::IntoStream, S::Item, P, Fut>
where
    S: IntoAsyncSequence<M>,
    P: FnMut(&S::Item) -> Fut,
    Fut: Future<Output = bool>,
{
    let decide: fn(Option<S::Item>) -> bool = |found| found.is_some();
    AsyncFind::new(sequence.into_async_sequence(), predicate, true).map(decide)
}

/// Returns the first element of a synchronous or asynchronous `sequence`
/// for which a deferred `predicate` resolves to `true`.
///
/// # Examples
///
/// ```rust
/// use seqflow::aggregate::async_find;
///
/// # futures::executor::block_on(async {
/// let words = futures::stream::iter(vec!["a", "bc"]);
/// let found = async_find(|word: &&str| std::future::ready(word.len() == 2), words).await;
/// assert_eq!(found, Some("bc"));
/// # });
/// ```
#[cfg(feature = "async")]
pub fn async_find<M, S, P, Fut>(
    predicate: P,
    sequence: S,
) -> AsyncFind<S::IntoStream, S::Item, P, Fut>
where
    S: IntoAsyncSequence<M>,
    P: FnMut(&S::Item) -> Fut,
    Fut: Future<Output = bool>,
{
    AsyncFind::new(sequence.into_async_sequence(), predicate, true)
}

/// Future returned by [`async_every`].
#[cfg(feature = "async")]
pub type AsyncEvery<S, T, P, Fut> = Map<AsyncFind<S, T, P, Fut>, fn(Option<T>) -> bool>;

/// Future returned by [`async_some`].
#[cfg(feature = "async")]
pub type AsyncSome<S, T, P, Fut> = Map<AsyncFind<S, T, P, Fut>, fn(Option<T>) -> bool>;

#[cfg(feature = "async")]
pin_project! {
    /// Future returned by [`async_find`].
    ///
    /// Resolves to the first element whose predicate verdict equals the
    /// expected one, or `None` once the source is exhausted.
    #[must_use = "futures do nothing unless you `.await` or poll them"]
    pub struct AsyncFind<S, T, P, Fut> {
        #[pin]
        source: stream::Fuse<S>,
        predicate: P,
        held: Option<T>,
        #[pin]
        pending: Option<Fut>,
        expected: bool,
    }
}

#[cfg(feature = "async")]
impl<S: Stream, T, P, Fut> AsyncFind<S, T, P, Fut> {
    fn new(source: S, predicate: P, expected: bool) -> Self {
        Self {
            source: source.fuse(),
            predicate,
            held: None,
            pending: None,
            expected,
        }
    }
}

#[cfg(feature = "async")]
impl<S, T, P, Fut> Future for AsyncFind<S, T, P, Fut>
where
    S: Stream<Item = T>,
    P: FnMut(&T) -> Fut,
    Fut: Future<Output = bool>,
{
    type Output = Option<T>;

    fn poll(self: Pin<&mut Self>, context: &mut Context<'_>) -> Poll<Option<T>> {
        let mut this = self.project();
        loop {
            if let Some(pending) = this.pending.as_mut().as_pin_mut() {
                let verdict = ready!(pending.poll(context));
                this.pending.set(None);
                let item = this.held.take();
                if verdict == *this.expected {
                    tracing::trace!("search decided early");
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
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn counting_source(pulls: &mut usize) -> impl Iterator<Item = usize> + '_ {
        std::iter::from_fn(move || {
            *pulls += 1;
            Some(*pulls)
        })
    }

    #[rstest]
    #[case(vec![], true)]
    #[case(vec![2, 4], true)]
    #[case(vec![2, 3, 4], false)]
    fn test_every_even(#[case] input: Vec<i32>, #[case] expected: bool) {
        assert_eq!(every(|value: &i32| value % 2 == 0, input), expected);
    }

    #[rstest]
    #[case(vec![], false)]
    #[case(vec![1, 3], false)]
    #[case(vec![1, 2], true)]
    fn test_some_even(#[case] input: Vec<i32>, #[case] expected: bool) {
        assert_eq!(some(|value: &i32| value % 2 == 0, input), expected);
    }

    #[rstest]
    fn test_every_stops_at_first_failure() {
        let mut pulls = 0;
        assert!(!every(|value: &usize| *value < 3, counting_source(&mut pulls)));
        assert_eq!(pulls, 3);
    }

    #[rstest]
    fn test_find_stops_at_match() {
        let mut pulls = 0;
        assert_eq!(find(|value: &usize| *value == 4, counting_source(&mut pulls)), Some(4));
        assert_eq!(pulls, 4);
    }

    #[cfg(feature = "async")]
    #[rstest]
    fn test_async_some_stops_at_match() {
        let mut pulls = 0;
        let found = futures::executor::block_on(async_some(
            |value: &usize| std::future::ready(*value == 2),
            counting_source(&mut pulls),
        ));
        assert!(found);
        assert_eq!(pulls, 2);
    }

    #[cfg(feature = "async")]
    #[rstest]
    fn test_async_every_is_vacuously_true() {
        let result = futures::executor::block_on(async_every(
            |_: &i32| std::future::ready(false),
            futures::stream::empty(),
        ));
        assert!(result);
    }
}
