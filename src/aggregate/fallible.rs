//! Fallible aggregation over sequences of `Result`s.
//!
//! A failure, whether yielded by the source or returned by a callback,
//! stops pulling immediately and is handed back to the caller unchanged.

use std::collections::{BTreeMap, HashMap, HashSet};
use std::fmt;
use std::hash::Hash;

#[cfg(feature = "async")]
use std::future::{self, Future, Ready};
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

use super::collect::JoinAccumulator;
#[cfg(feature = "async")]
use crate::sequence::IntoAsyncSequence;

fn stopped<E>(error: E) -> E {
    tracing::trace!("aggregation stopped by an error");
    error
}

/// Folds a sequence of `Result`s with a fallible `reducer`.
///
/// # Errors
///
/// Returns the first `Err` yielded by `sequence` or returned by `reducer`.
/// Nothing is pulled after it.
///
/// # Examples
///
/// ```rust
/// use seqflow::aggregate::try_reduce;
///
/// let checked_sum = |total: u8, value: u8| total.checked_add(value).ok_or("overflow");
///
/// assert_eq!(try_reduce(checked_sum, 0, vec![Ok(1), Ok(2)]), Ok(3));
/// assert_eq!(try_reduce(checked_sum, 0, vec![Ok(200), Ok(100)]), Err("overflow"));
/// assert_eq!(try_reduce(checked_sum, 0, vec![Ok(1), Err("bad input")]), Err("bad input"));
/// ```
pub fn try_reduce<S, T, E, B, F>(mut reducer: F, initial: B, sequence: S) -> Result<B, E>
where
    S: IntoIterator<Item = Result<T, E>>,
    F: FnMut(B, T) -> Result<B, E>,
{
    let mut accumulator = initial;
    for item in sequence {
        accumulator = reducer(accumulator, item.map_err(stopped)?).map_err(stopped)?;
    }
    Ok(accumulator)
}

/// Returns `true` if a fallible `predicate` holds for every element.
///
/// # Errors
///
/// Returns the first `Err` met before the result is decided.
pub fn try_every<S, T, E, P>(mut predicate: P, sequence: S) -> Result<bool, E>
where
    S: IntoIterator<Item = Result<T, E>>,
    P: FnMut(&T) -> Result<bool, E>,
{
    try_find(|item| predicate(item).map(|holds| !holds), sequence)
        .map(|failing| failing.is_none())
}

/// Returns `true` if a fallible `predicate` holds for at least one element.
///
/// # Errors
///
/// Returns the first `Err` met before the result is decided.
pub fn try_some<S, T, E, P>(predicate: P, sequence: S) -> Result<bool, E>
where
    S: IntoIterator<Item = Result<T, E>>,
    P: FnMut(&T) -> Result<bool, E>,
{
    try_find(predicate, sequence).map(|found| found.is_some())
}

/// Returns the first element satisfying a fallible `predicate`.
///
/// # Errors
///
/// Returns the first `Err` met before a match is found.
///
/// # Examples
///
/// ```rust
/// use seqflow::aggregate::try_find;
///
/// let sequence: Vec<Result<i32, String>> = vec![Ok(1), Ok(4), Err("late".into())];
/// assert_eq!(try_find(|value: &i32| Ok(*value > 3), sequence), Ok(Some(4)));
/// ```
pub fn try_find<S, T, E, P>(mut predicate: P, sequence: S) -> Result<Option<T>, E>
where
    S: IntoIterator<Item = Result<T, E>>,
    P: FnMut(&T) -> Result<bool, E>,
{
    for item in sequence {
        let item = item.map_err(stopped)?;
        if predicate(&item).map_err(stopped)? {
            tracing::trace!("search decided early");
            return Ok(Some(item));
        }
    }
    Ok(None)
}

/// Collects a sequence of `Result`s into a vector.
///
/// # Errors
///
/// Returns the first `Err` in the sequence.
pub fn try_collect_array<S, T, E>(sequence: S) -> Result<Vec<T>, E>
where
    S: IntoIterator<Item = Result<T, E>>,
{
    sequence.into_iter().collect::<Result<_, _>>().map_err(stopped)
}

/// Counts a sequence of `Result`s.
///
/// # Errors
///
/// Returns the first `Err` in the sequence; nothing is pulled after it.
///
/// # Examples
///
/// ```rust
/// use seqflow::aggregate::try_count;
///
/// assert_eq!(try_count(vec![Ok::<_, ()>('a'), Ok('b')]), Ok(2));
/// assert_eq!(try_count(vec![Ok(1), Err("broken"), Ok(2)]), Err("broken"));
/// ```
pub fn try_count<S, T, E>(sequence: S) -> Result<usize, E>
where
    S: IntoIterator<Item = Result<T, E>>,
{
    sequence
        .into_iter()
        .try_fold(0, |count, item| item.map(|_| count + 1))
        .map_err(stopped)
}

/// Collects a sequence of `Result`s into a set.
///
/// # Errors
///
/// Returns the first `Err` in the sequence.
pub fn try_collect_set<S, T, E>(sequence: S) -> Result<HashSet<T>, E>
where
    S: IntoIterator<Item = Result<T, E>>,
    T: Eq + Hash,
{
    sequence.into_iter().collect::<Result<_, _>>().map_err(stopped)
}

/// Collects fallible key-value pairs into a map; a later pair replaces an
/// earlier one with the same key.
///
/// # Errors
///
/// Returns the first `Err` in the sequence.
pub fn try_collect_map<S, K, V, E>(sequence: S) -> Result<HashMap<K, V>, E>
where
    S: IntoIterator<Item = Result<(K, V), E>>,
    K: Eq + Hash,
{
    sequence.into_iter().collect::<Result<_, _>>().map_err(stopped)
}

/// Collects fallible pairs with textual keys into an ordered string-keyed
/// record.
///
/// # Errors
///
/// Returns the first `Err` in the sequence.
pub fn try_collect_object<S, K, V, E>(sequence: S) -> Result<BTreeMap<String, V>, E>
where
    S: IntoIterator<Item = Result<(K, V), E>>,
    K: Into<String>,
{
    sequence
        .into_iter()
        .map(|item| item.map(|(key, value)| (key.into(), value)))
        .collect::<Result<_, _>>()
        .map_err(stopped)
}

/// Joins the textual forms of a sequence of `Result`s with `separator`.
///
/// # Errors
///
/// Returns the first `Err` in the sequence; the partial text is discarded.
///
/// # Examples
///
/// ```rust
/// use seqflow::aggregate::try_join;
///
/// assert_eq!(try_join(", ", vec![Ok::<_, String>(1), Ok(2)]), Ok(String::from("1, 2")));
/// assert_eq!(try_join(", ", vec![Ok(1), Err("missing")]), Err("missing"));
/// ```
pub fn try_join<S, T, E>(separator: &str, sequence: S) -> Result<String, E>
where
    S: IntoIterator<Item = Result<T, E>>,
    T: fmt::Display,
{
    sequence
        .into_iter()
        .try_fold(JoinAccumulator::new(separator), |joined, item| {
            item.map(|item| joined.push(item))
        })
        .map(JoinAccumulator::finish)
        .map_err(stopped)
}

/// Folds a synchronous or asynchronous sequence of `Result`s with a deferred
/// fallible `reducer`.
///
/// The returned future resolves to the first `Err` yielded by the sequence
/// or by a reducer future; nothing is pulled after it.
///
/// # Examples
///
/// ```rust
/// use seqflow::aggregate::async_try_reduce;
///
/// # futures::executor::block_on(async {
/// let sequence = futures::stream::iter(vec![Ok(1), Err("broken"), Ok(3)]);
/// let add = |total: i32, value: i32| async move { Ok(total + value) };
/// assert_eq!(async_try_reduce(add, 0, sequence).await, Err("broken"));
/// # });
/// ```
#[cfg(feature = "async")]
pub fn async_try_reduce<M, S, T, E, B, F, Fut>(
    reducer: F,
    initial: B,
    sequence: S,
) -> AsyncTryFold<S::IntoStream, F, B, Fut>
where
    S: IntoAsyncSequence<M, Item = Result<T, E>>,
    F: FnMut(B, T) -> Fut,
    Fut: Future<Output = Result<B, E>>,
{
    AsyncTryFold::new(sequence.into_async_sequence(), reducer, initial)
}

/// Returns `true` if a deferred fallible `predicate` holds for every element.
#[cfg(feature = "async")]
pub fn async_try_every<M, S, T, E, P, Fut>(
    predicate: P,
    sequence: S,
) -> AsyncTryEvery<S::IntoStream, T, E, P, Fut>
where
    S: IntoAsyncSequence<M, Item = Result<T, E>>,
    P: FnMut(&T) -> Fut,
    Fut: Future<Output = Result<bool, E>>,
{
    let decide: fn(Result<Option<T>, E>) -> Result<bool, E> =
        |failing| failing.map(|failing| failing.is_none());
    AsyncTryFind::new(sequence.into_async_sequence(), predicate, false).map(decide)
}

/// Returns `true` if a deferred fallible `predicate` holds for at least one
/// element.
#[cfg(feature = "async")]
pub fn async_try_some<M, S, T, E, P, Fut>(
    predicate: P,
    sequence: S,
) -> AsyncTrySome<S::IntoStream, T, E, P, Fut>
where
    S: IntoAsyncSequence<M, Item = Result<T, E>>,
    P: FnMut(&T) -> Fut,
    Fut: Future<Output = Result<bool, E>>,
{
    let decide: fn(Result<Option<T>, E>) -> Result<bool, E> =
        |found| found.map(|found| found.is_some());
    AsyncTryFind::new(sequence.into_async_sequence(), predicate, true).map(decide)
}

/// Returns the first element satisfying a deferred fallible `predicate`.
#[cfg(feature = "async")]
pub fn async_try_find<M, S, T, E, P, Fut>(
    predicate: P,
    sequence: S,
) -> AsyncTryFind<S::IntoStream, T, P, Fut>
where
    S: IntoAsyncSequence<M, Item = Result<T, E>>,
    P: FnMut(&T) -> Fut,
    Fut: Future<Output = Result<bool, E>>,
{
    AsyncTryFind::new(sequence.into_async_sequence(), predicate, true)
}

/// Collects a synchronous or asynchronous sequence of `Result`s into a
/// vector.
#[cfg(feature = "async")]
pub fn async_try_collect_array<M, S, T, E>(
    sequence: S,
) -> AsyncTryCollectArray<S::IntoStream, T, E>
where
    S: IntoAsyncSequence<M, Item = Result<T, E>>,
{
    let push: fn(Vec<T>, T) -> Ready<Result<Vec<T>, E>> = |mut array, item| {
        array.push(item);
        future::ready(Ok(array))
    };
    AsyncTryFold::new(sequence.into_async_sequence(), push, Vec::new())
}

/// Counts a synchronous or asynchronous sequence of `Result`s.
///
/// # Examples
///
/// ```rust
/// use seqflow::aggregate::async_try_count;
///
/// # futures::executor::block_on(async {
/// let sequence = futures::stream::iter(vec![Ok(1), Err("broken"), Ok(2)]);
/// assert_eq!(async_try_count(sequence).await, Err("broken"));
/// # });
/// ```
#[cfg(feature = "async")]
pub fn async_try_count<M, S, T, E>(sequence: S) -> AsyncTryCollect<S::IntoStream, T, E, usize>
where
    S: IntoAsyncSequence<M, Item = Result<T, E>>,
{
    let step: fn(usize, T) -> Ready<Result<usize, E>> = |count, _| future::ready(Ok(count + 1));
    AsyncTryFold::new(sequence.into_async_sequence(), step, 0)
}

/// Collects a synchronous or asynchronous sequence of `Result`s into a set.
#[cfg(feature = "async")]
pub fn async_try_collect_set<M, S, T, E>(
    sequence: S,
) -> AsyncTryCollect<S::IntoStream, T, E, HashSet<T>>
where
    S: IntoAsyncSequence<M, Item = Result<T, E>>,
    T: Eq + Hash,
{
    let step: fn(HashSet<T>, T) -> Ready<Result<HashSet<T>, E>> = |mut set, item| {
        set.insert(item);
        future::ready(Ok(set))
    };
    AsyncTryFold::new(sequence.into_async_sequence(), step, HashSet::new())
}

/// Collects synchronous or asynchronous fallible key-value pairs into a map.
#[cfg(feature = "async")]
pub fn async_try_collect_map<M, S, K, V, E>(
    sequence: S,
) -> AsyncTryCollect<S::IntoStream, (K, V), E, HashMap<K, V>>
where
    S: IntoAsyncSequence<M, Item = Result<(K, V), E>>,
    K: Eq + Hash,
{
    let step: fn(HashMap<K, V>, (K, V)) -> Ready<Result<HashMap<K, V>, E>> =
        |mut map, (key, value)| {
            map.insert(key, value);
            future::ready(Ok(map))
        };
    AsyncTryFold::new(sequence.into_async_sequence(), step, HashMap::new())
}

/// Collects synchronous or asynchronous fallible pairs with textual keys
/// into an ordered string-keyed record.
#[cfg(feature = "async")]
pub fn async_try_collect_object<M, S, K, V, E>(
    sequence: S,
) -> AsyncTryCollect<S::IntoStream, (K, V), E, BTreeMap<String, V>>
where
    S: IntoAsyncSequence<M, Item = Result<(K, V), E>>,
    K: Into<String>,
{
    let step: fn(BTreeMap<String, V>, (K, V)) -> Ready<Result<BTreeMap<String, V>, E>> =
        |mut object, (key, value)| {
            object.insert(key.into(), value);
            future::ready(Ok(object))
        };
    AsyncTryFold::new(sequence.into_async_sequence(), step, BTreeMap::new())
}

/// Joins the textual forms of a synchronous or asynchronous sequence of
/// `Result`s.
#[cfg(feature = "async")]
pub fn async_try_join<M, S, T, E>(separator: &str, sequence: S) -> AsyncTryJoin<S::IntoStream, T, E>
where
    S: IntoAsyncSequence<M, Item = Result<T, E>>,
    T: fmt::Display,
{
    let step: fn(JoinAccumulator, T) -> Ready<Result<JoinAccumulator, E>> =
        |joined, item| future::ready(Ok(joined.push(item)));
    let finish: fn(Result<JoinAccumulator, E>) -> Result<String, E> =
        |joined| joined.map(JoinAccumulator::finish);
    AsyncTryFold::new(
        sequence.into_async_sequence(),
        step,
        JoinAccumulator::new(separator),
    )
    .map(finish)
}

/// Future returned by [`async_try_every`].
#[cfg(feature = "async")]
pub type AsyncTryEvery<S, T, E, P, Fut> =
    Map<AsyncTryFind<S, T, P, Fut>, fn(Result<Option<T>, E>) -> Result<bool, E>>;

/// Future returned by [`async_try_some`].
#[cfg(feature = "async")]
pub type AsyncTrySome<S, T, E, P, Fut> =
    Map<AsyncTryFind<S, T, P, Fut>, fn(Result<Option<T>, E>) -> Result<bool, E>>;

/// Future returned by the fallible asynchronous collectors: a fallible
/// fold into `C` whose step is synchronous.
#[cfg(feature = "async")]
pub type AsyncTryCollect<S, T, E, C> =
    AsyncTryFold<S, fn(C, T) -> Ready<Result<C, E>>, C, Ready<Result<C, E>>>;

/// Future returned by [`async_try_collect_array`].
#[cfg(feature = "async")]
pub type AsyncTryCollectArray<S, T, E> = AsyncTryCollect<S, T, E, Vec<T>>;

/// Future returned by [`async_try_join`].
#[cfg(feature = "async")]
pub type AsyncTryJoin<S, T, E> = Map<
    AsyncTryCollect<S, T, E, JoinAccumulator>,
    fn(Result<JoinAccumulator, E>) -> Result<String, E>,
>;

#[cfg(feature = "async")]
pin_project! {
    /// Future returned by [`async_try_reduce`].
    ///
    /// # Panics
    ///
    /// Polling again after the future has completed panics.
    #[must_use = "futures do nothing unless you `.await` or poll them"]
    pub struct AsyncTryFold<S, F, B, Fut> {
        #[pin]
        source: stream::Fuse<S>,
        reducer: F,
        accumulator: Option<B>,
        #[pin]
        pending: Option<Fut>,
    }
}

#[cfg(feature = "async")]
impl<S: Stream, F, B, Fut> AsyncTryFold<S, F, B, Fut> {
    fn new(source: S, reducer: F, initial: B) -> Self {
        Self {
            source: source.fuse(),
            reducer,
            accumulator: Some(initial),
            pending: None,
        }
    }
}

#[cfg(feature = "async")]
impl<S, T, E, F, B, Fut> Future for AsyncTryFold<S, F, B, Fut>
where
    S: Stream<Item = Result<T, E>>,
    F: FnMut(B, T) -> Fut,
    Fut: Future<Output = Result<B, E>>,
{
    type Output = Result<B, E>;

    fn poll(self: Pin<&mut Self>, context: &mut Context<'_>) -> Poll<Result<B, E>> {
        let mut this = self.project();
        loop {
            if let Some(pending) = this.pending.as_mut().as_pin_mut() {
                let next = ready!(pending.poll(context));
                this.pending.set(None);
                *this.accumulator = Some(next.map_err(stopped)?);
            }
            let Some(accumulator) = this.accumulator.take() else {
                panic!("`AsyncTryFold` polled after completion");
            };
            match this.source.as_mut().poll_next(context) {
                Poll::Pending => {
                    *this.accumulator = Some(accumulator);
                    return Poll::Pending;
                }
                Poll::Ready(Some(item)) => {
                    let item = item.map_err(stopped)?;
                    this.pending.set(Some((this.reducer)(accumulator, item)));
                }
                Poll::Ready(None) => return Poll::Ready(Ok(accumulator)),
            }
        }
    }
}

#[cfg(feature = "async")]
pin_project! {
    /// Future returned by [`async_try_find`].
    #[must_use = "futures do nothing unless you `.await` or poll them"]
    pub struct AsyncTryFind<S, T, P, Fut> {
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
impl<S: Stream, T, P, Fut> AsyncTryFind<S, T, P, Fut> {
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
impl<S, T, E, P, Fut> Future for AsyncTryFind<S, T, P, Fut>
where
    S: Stream<Item = Result<T, E>>,
    P: FnMut(&T) -> Fut,
    Fut: Future<Output = Result<bool, E>>,
{
    type Output = Result<Option<T>, E>;

    fn poll(self: Pin<&mut Self>, context: &mut Context<'_>) -> Poll<Result<Option<T>, E>> {
        let mut this = self.project();
        loop {
            if let Some(pending) = this.pending.as_mut().as_pin_mut() {
                let verdict = ready!(pending.poll(context));
                this.pending.set(None);
                let item = this.held.take();
                if verdict.map_err(stopped)? == *this.expected {
                    tracing::trace!("search decided early");
                    return Poll::Ready(Ok(item));
                }
            }
            match ready!(this.source.as_mut().poll_next(context)) {
                Some(item) => {
                    let item = item.map_err(stopped)?;
                    this.pending.set(Some((this.predicate)(&item)));
                    *this.held = Some(item);
                }
                None => return Poll::Ready(Ok(None)),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn test_try_reduce_stops_at_source_error() {
        let mut pulls = 0;
        let source = std::iter::from_fn(|| {
            pulls += 1;
            Some(if pulls == 2 { Err("second") } else { Ok(pulls) })
        });
        let result = try_reduce(|total: i32, value: i32| Ok(total + value), 0, source);
        assert_eq!(result, Err("second"));
        assert_eq!(pulls, 2);
    }

    #[rstest]
    fn test_try_reduce_stops_at_reducer_error() {
        let mut calls = 0;
        let result = try_reduce(
            |total: i32, value: i32| {
                calls += 1;
                if value == 2 { Err(value) } else { Ok(total + value) }
            },
            0,
            vec![Ok(1), Ok(2), Ok(3)],
        );
        assert_eq!(result, Err(2));
        assert_eq!(calls, 2);
    }

    #[rstest]
    #[case(vec![Ok(2), Ok(4)], Ok(true))]
    #[case(vec![Ok(2), Ok(3), Err("never reached")], Ok(false))]
    #[case(vec![Ok(2), Err("early")], Err("early"))]
    #[case(vec![], Ok(true))]
    fn test_try_every(
        #[case] input: Vec<Result<i32, &'static str>>,
        #[case] expected: Result<bool, &'static str>,
    ) {
        assert_eq!(try_every(|value: &i32| Ok(value % 2 == 0), input), expected);
    }

    #[rstest]
    fn test_try_some_propagates_predicate_error() {
        let input: Vec<Result<i32, String>> = vec![Ok(1)];
        let result = try_some(|_: &i32| Err(String::from("predicate failed")), input);
        assert_eq!(result, Err(String::from("predicate failed")));
    }

    #[rstest]
    fn test_try_collect_array() {
        let all: Result<Vec<i32>, ()> = try_collect_array(vec![Ok(1), Ok(2)]);
        assert_eq!(all, Ok(vec![1, 2]));
        assert_eq!(try_collect_array(vec![Ok(1), Err(()), Ok(3)]), Err(()));
    }

    fn counted<'a, T: 'a>(
        values: Vec<T>,
        pulls: &'a std::cell::Cell<usize>,
    ) -> impl Iterator<Item = T> + 'a {
        values.into_iter().inspect(move |_| pulls.set(pulls.get() + 1))
    }

    #[rstest]
    fn test_try_count_stops_at_first_error() {
        let pulls = std::cell::Cell::new(0);
        let result = try_count(counted(vec![Ok(1), Err("broken"), Ok(2)], &pulls));
        assert_eq!(result, Err("broken"));
        assert_eq!(pulls.get(), 2);
        assert_eq!(try_count(Vec::<Result<u8, ()>>::new()), Ok(0));
    }

    #[rstest]
    fn test_try_join_stops_at_first_error() {
        let pulls = std::cell::Cell::new(0);
        let result = try_join(",", counted(vec![Ok("a"), Err(7), Ok("b")], &pulls));
        assert_eq!(result, Err(7));
        assert_eq!(pulls.get(), 2);
        assert_eq!(try_join::<_, _, ()>(",", vec![Ok("a"), Ok("b")]), Ok(String::from("a,b")));
    }

    #[rstest]
    fn test_try_collect_set_stops_at_first_error() {
        let pulls = std::cell::Cell::new(0);
        let result = try_collect_set(counted(vec![Ok(1), Ok(1), Err('x'), Ok(2)], &pulls));
        assert_eq!(result, Err('x'));
        assert_eq!(pulls.get(), 3);
        assert_eq!(try_collect_set(vec![Ok::<_, ()>(1), Ok(1)]).map(|set| set.len()), Ok(1));
    }

    #[rstest]
    fn test_try_collect_map_stops_at_first_error() {
        let pulls = std::cell::Cell::new(0);
        let result = try_collect_map(counted(vec![Ok(("a", 1)), Err("broken"), Ok(("b", 2))], &pulls));
        assert_eq!(result, Err("broken"));
        assert_eq!(pulls.get(), 2);
        let map = try_collect_map(vec![Ok::<_, ()>(("a", 1)), Ok(("a", 2))]);
        assert_eq!(map.map(|map| map.get("a").copied()), Ok(Some(2)));
    }

    #[rstest]
    fn test_try_collect_object_stops_at_first_error() {
        let pulls = std::cell::Cell::new(0);
        let result = try_collect_object(counted(vec![Err(0), Ok(("a", 1))], &pulls));
        assert_eq!(result, Err(0));
        assert_eq!(pulls.get(), 1);
        let object = try_collect_object(vec![Ok::<_, ()>(("z", 26)), Ok(("a", 1))]);
        assert_eq!(
            object.map(|object| object.into_keys().collect::<Vec<_>>()),
            Ok(vec![String::from("a"), String::from("z")])
        );
    }

    #[cfg(feature = "async")]
    #[rstest]
    fn test_async_try_count_and_join_stop_at_first_error() {
        use futures::executor::block_on;

        let pulls = std::cell::Cell::new(0);
        let source = futures::stream::iter(counted(vec![Ok(1), Err("broken"), Ok(2)], &pulls));
        assert_eq!(block_on(async_try_count(source)), Err("broken"));
        assert_eq!(pulls.get(), 2);

        assert_eq!(block_on(async_try_join("-", vec![Ok(1), Err("late")])), Err("late"));
        assert_eq!(
            block_on(async_try_join::<_, _, _, ()>("-", vec![Ok(1), Ok(2)])),
            Ok(String::from("1-2"))
        );
    }

    #[cfg(feature = "async")]
    #[rstest]
    fn test_async_try_collectors_stop_at_first_error() {
        use futures::executor::block_on;

        let pulls = std::cell::Cell::new(0);
        let source = futures::stream::iter(counted(vec![Ok(1), Err('x'), Ok(3)], &pulls));
        assert_eq!(block_on(async_try_collect_set(source)), Err('x'));
        assert_eq!(pulls.get(), 2);

        let pairs = vec![Ok(("a", 1)), Err("broken"), Ok(("b", 2))];
        assert_eq!(block_on(async_try_collect_map(pairs.clone())), Err("broken"));
        assert_eq!(block_on(async_try_collect_object(pairs)), Err("broken"));

        let object = block_on(async_try_collect_object(vec![Ok::<_, ()>(("k", true))]));
        assert_eq!(object.map(|object| object.get("k").copied()), Ok(Some(true)));
    }

    #[cfg(feature = "async")]
    #[rstest]
    fn test_async_try_find_over_stream() {
        let source = futures::stream::iter(vec![Ok::<_, ()>(1), Ok(5), Ok(9)]);
        let found = futures::executor::block_on(async_try_find(
            |value: &i32| std::future::ready(Ok(*value > 4)),
            source,
        ));
        assert_eq!(found, Ok(Some(5)));
    }

    #[cfg(feature = "async")]
    #[rstest]
    fn test_async_try_collect_array_stops_at_error() {
        let source = vec![Ok(1), Err("bad"), Ok(3)];
        let collected = futures::executor::block_on(async_try_collect_array(source));
        assert_eq!(collected, Err("bad"));
    }
}
