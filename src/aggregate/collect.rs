//! Collectors and `join`.

use std::collections::{BTreeMap, HashMap, HashSet};
use std::fmt::{self, Write};
use std::hash::Hash;

#[cfg(feature = "async")]
use std::future::{self, Ready};

#[cfg(feature = "async")]
use futures::future::{FutureExt, Map};
#[cfg(feature = "async")]
use futures::stream::Stream;

#[cfg(feature = "async")]
use super::reduce::AsyncFold;
#[cfg(feature = "async")]
use crate::sequence::IntoAsyncSequence;

/// Collects `sequence` into a vector, preserving order.
pub fn collect_array<S: IntoIterator>(sequence: S) -> Vec<S::Item> {
    sequence.into_iter().collect()
}

/// Collects `sequence` into a set, dropping duplicates.
///
/// # Examples
///
/// ```rust
/// use seqflow::aggregate::collect_set;
///
/// let set = collect_set(vec![1, 2, 1]);
/// assert_eq!(set.len(), 2);
/// ```
pub fn collect_set<S>(sequence: S) -> HashSet<S::Item>
where
    S: IntoIterator,
    S::Item: Eq + Hash,
{
    sequence.into_iter().collect()
}

/// Collects key-value pairs into a map; a later pair replaces an earlier one
/// with the same key.
pub fn collect_map<S, K, V>(sequence: S) -> HashMap<K, V>
where
    S: IntoIterator<Item = (K, V)>,
    K: Eq + Hash,
{
    sequence.into_iter().collect()
}

/// Collects pairs with textual keys into an ordered string-keyed record.
///
/// # Examples
///
/// ```rust
/// use seqflow::aggregate::collect_object;
///
/// let record = collect_object(vec![("b", 2), ("a", 1), ("b", 3)]);
/// assert_eq!(record.get("a"), Some(&1));
/// assert_eq!(record.get("b"), Some(&3));
/// assert_eq!(record.keys().collect::<Vec<_>>(), vec!["a", "b"]);
/// ```
pub fn collect_object<S, K, V>(sequence: S) -> BTreeMap<String, V>
where
    S: IntoIterator<Item = (K, V)>,
    K: Into<String>,
{
    sequence
        .into_iter()
        .map(|(key, value)| (key.into(), value))
        .collect()
}

/// Concatenates the textual forms of every element of `sequence`, with
/// `separator` between consecutive elements.
///
/// Every element is pulled exactly once. An empty sequence gives an empty
/// string.
///
/// # Examples
///
/// ```rust
/// use seqflow::aggregate::join;
/// use seqflow::structural::empty;
///
/// assert_eq!(join(",", empty::<&str>()), "");
/// assert_eq!(join(",", vec!["foo"]), "foo");
/// assert_eq!(join(",", vec!["foo", "bar", "baz"]), "foo,bar,baz");
/// assert_eq!(join(" + ", 1..4), "1 + 2 + 3");
/// ```
pub fn join<S>(separator: &str, sequence: S) -> String
where
    S: IntoIterator,
    S::Item: fmt::Display,
{
    sequence
        .into_iter()
        .fold(JoinAccumulator::new(separator), JoinAccumulator::push)
        .finish()
}

/// Running state of a [`join`].
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct JoinAccumulator {
    separator: String,
    output: String,
    started: bool,
}

impl JoinAccumulator {
    /// Starts an empty join.
    pub fn new(separator: &str) -> Self {
        Self {
            separator: separator.to_owned(),
            output: String::new(),
            started: false,
        }
    }

    /// Appends one element, preceded by the separator unless it is the first.
    #[must_use]
    pub fn push<T: fmt::Display>(mut self, item: T) -> Self {
        if self.started {
            self.output.push_str(&self.separator);
        }
        self.started = true;
        // Writing into a `String` cannot fail.
        let _ = write!(self.output, "{item}");
        self
    }

    /// Returns the joined text.
    pub fn finish(self) -> String {
        self.output
    }
}

/// Future returned by the asynchronous collectors: a fold whose step is
/// synchronous.
#[cfg(feature = "async")]
pub type AsyncCollect<S, C> = AsyncFold<S, fn(C, <S as Stream>::Item) -> Ready<C>, C, Ready<C>>;

/// Future returned by [`async_join`].
#[cfg(feature = "async")]
pub type AsyncJoin<S> = Map<AsyncCollect<S, JoinAccumulator>, fn(JoinAccumulator) -> String>;

#[cfg(feature = "async")]
fn collect_with<S, C>(
    stream: S,
    initial: C,
    step: fn(C, S::Item) -> Ready<C>,
) -> AsyncCollect<S, C>
where
    S: Stream,
{
    AsyncFold::new(stream, step, initial)
}

/// Collects a synchronous or asynchronous `sequence` into a vector.
///
/// # Examples
///
/// ```rust
/// use seqflow::aggregate::async_collect_array;
///
/// # futures::executor::block_on(async {
/// let collected = async_collect_array(futures::stream::iter(1..4)).await;
/// assert_eq!(collected, vec![1, 2, 3]);
/// # });
/// ```
#[cfg(feature = "async")]
pub fn async_collect_array<M, S>(sequence: S) -> AsyncCollect<S::IntoStream, Vec<S::Item>>
where
    S: IntoAsyncSequence<M>,
{
    collect_with(sequence.into_async_sequence(), Vec::new(), |mut array, item| {
        array.push(item);
        future::ready(array)
    })
}

/// Collects a synchronous or asynchronous `sequence` into a set.
#[cfg(feature = "async")]
pub fn async_collect_set<M, S>(sequence: S) -> AsyncCollect<S::IntoStream, HashSet<S::Item>>
where
    S: IntoAsyncSequence<M>,
    S::Item: Eq + Hash,
{
    collect_with(sequence.into_async_sequence(), HashSet::new(), |mut set, item| {
        set.insert(item);
        future::ready(set)
    })
}

/// Collects synchronous or asynchronous key-value pairs into a map.
#[cfg(feature = "async")]
pub fn async_collect_map<M, S, K, V>(sequence: S) -> AsyncCollect<S::IntoStream, HashMap<K, V>>
where
    S: IntoAsyncSequence<M, Item = (K, V)>,
    K: Eq + Hash,
{
    collect_with(sequence.into_async_sequence(), HashMap::new(), |mut map, (key, value)| {
        map.insert(key, value);
        future::ready(map)
    })
}

/// Collects synchronous or asynchronous pairs with textual keys into an
/// ordered string-keyed record.
#[cfg(feature = "async")]
pub fn async_collect_object<M, S, K, V>(
    sequence: S,
) -> AsyncCollect<S::IntoStream, BTreeMap<String, V>>
where
    S: IntoAsyncSequence<M, Item = (K, V)>,
    K: Into<String>,
{
    collect_with(
        sequence.into_async_sequence(),
        BTreeMap::new(),
        |mut object, (key, value)| {
            object.insert(key.into(), value);
            future::ready(object)
        },
    )
}

/// Joins the textual forms of a synchronous or asynchronous `sequence`.
///
/// # Examples
///
/// ```rust
/// use seqflow::aggregate::async_join;
///
/// # futures::executor::block_on(async {
/// let joined = async_join("-", futures::stream::iter(vec!['a', 'b'])).await;
/// assert_eq!(joined, "a-b");
/// # });
/// ```
#[cfg(feature = "async")]
pub fn async_join<M, S>(separator: &str, sequence: S) -> AsyncJoin<S::IntoStream>
where
    S: IntoAsyncSequence<M>,
    S::Item: fmt::Display,
{
    let finish: fn(JoinAccumulator) -> String = JoinAccumulator::finish;
    collect_with(
        sequence.into_async_sequence(),
        JoinAccumulator::new(separator),
        |joined, item| future::ready(joined.push(item)),
    )
    .map(finish)
}
