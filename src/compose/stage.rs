//! Deferred operator applications.
//!
//! Every operator of the crate has a constructor here that takes the
//! operator's configuration (callbacks, counts, initial values) and returns
//! a [`Stage`] waiting for the sequence. Applying the stage is exactly the
//! same as calling the operator directly:
//!
//! ```rust
//! use seqflow::compose::{Stage, stage};
//! use seqflow::transform::map;
//!
//! let deferred: Vec<i32> = stage::map(|value: i32| value + 1).apply(vec![1, 2]).collect();
//! let direct: Vec<i32> = map(|value: i32| value + 1, vec![1, 2]).collect();
//! assert_eq!(deferred, direct);
//! ```
//!
//! Stages are meant to be chained with [`pipe!`](crate::pipe) and
//! [`compose!`](crate::compose).
//!
//! # Callback types
//!
//! A stage is built before the sequence it will run on is known, so the
//! compiler cannot deduce callback parameter types at construction. Annotate
//! closure parameters (`|value: &i32| ...`); this matters most for callbacks
//! taking references.
//!
//! # Asynchronous stages
//!
//! The `async_*` stages accept synchronous and asynchronous sequences alike,
//! so a chain becomes asynchronous at its first asynchronous stage and stays
//! so. An asynchronous aggregation produces a future; follow it with
//! [`awaited`] to keep working on the resolved value.
//!
//! ```rust
//! use seqflow::pipe;
//! use seqflow::callback::{lift, lift2};
//! use seqflow::compose::stage;
//!
//! # futures::executor::block_on(async {
//! let total = pipe!(
//!     vec![1, 2, 3],
//!     stage::map(|value: i32| value * 10),
//!     stage::async_map(lift(|value: i32| value + 1)),
//!     stage::async_reduce(lift2(|total: i32, value: i32| total + value), 0),
//!     stage::awaited(|total: i32| total.to_string()),
//! )
//! .await;
//! assert_eq!(total, "63");
//! # });
//! ```

use std::fmt;

#[cfg(feature = "async")]
use std::future::Future;
#[cfg(feature = "async")]
use std::marker::PhantomData;
#[cfg(feature = "async")]
use std::pin::Pin;

#[cfg(feature = "async")]
use futures::future::{FutureExt, Map};
#[cfg(feature = "async")]
use futures::stream::{Stream, StreamExt, StreamFuture};

use super::pipeline::Stage;
#[cfg(feature = "async")]
use super::pipeline::Awaited;
use crate::structural::{Depth, Nested};
#[cfg(feature = "async")]
use crate::sequence::IntoAsyncSequence;
#[cfg(feature = "async")]
use crate::structural::AsyncNested;

/// Declares a stage constructor, its stage type and the [`Stage`]
/// implementation forwarding to the operator.
///
/// The stage type is named after the constructor (`take_while` declares
/// `TakeWhileStage`). The operator is called with the stage's fields, in
/// declaration order, followed by the input sequence. `awaiting Fut` records
/// a callback future type that only appears under a higher-ranked bound.
macro_rules! stage {
    (
        $(#[$attribute:meta])*
        fn $constructor:ident$(<$($parameter:ident),+>)?($($field:ident: $field_type:ty),*)
            $(awaiting $phantom:ident)?;
        impl<$($generic:ident),+> Stage<$input:ident, $marker:ty>
        where [$($bound:tt)+]
        {
            type Output = $output:ty;
            => $operator:path;
        }
    ) => {
        paste::paste! {
            $(#[$attribute])*
            pub fn $constructor$(<$($parameter),+>)?(
                $($field: $field_type),*
            ) -> [<$constructor:camel Stage>]$(<$($parameter),+>)? {
                [<$constructor:camel Stage>] {
                    $($field,)*
                    $(future: PhantomData::<fn() -> $phantom>,)?
                }
            }

            #[doc = concat!("Stage returned by [`", stringify!($constructor), "`].")]
            #[must_use = "stages do nothing unless applied"]
            pub struct [<$constructor:camel Stage>]$(<$($parameter),+>)? {
                $($field: $field_type,)*
                $(future: PhantomData<fn() -> $phantom>,)?
            }

            impl$(<$($parameter),+>)? Clone for [<$constructor:camel Stage>]$(<$($parameter),+>)?
            where
                $($field_type: Clone,)*
            {
                fn clone(&self) -> Self {
                    Self {
                        $($field: Clone::clone(&self.$field),)*
                        $(future: PhantomData::<fn() -> $phantom>,)?
                    }
                }
            }

            impl$(<$($parameter),+>)? fmt::Debug for [<$constructor:camel Stage>]$(<$($parameter),+>)? {
                fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
                    formatter
                        .debug_struct(stringify!([<$constructor:camel Stage>]))
                        .finish_non_exhaustive()
                }
            }

            impl<$($generic),+> Stage<$input, $marker> for [<$constructor:camel Stage>]$(<$($parameter),+>)?
            where
                $($bound)+
            {
                type Output = $output;

                #[inline]
                fn apply(self, input: $input) -> Self::Output {
                    $operator($(self.$field,)* input)
                }
            }
        }
    };
}

// Transform

stage! {
    /// Deferred [`map`](crate::transform::map).
    fn map<F>(function: F);
    impl<S, B, F> Stage<S, ()>
    where [S: IntoIterator, F: FnMut(S::Item) -> B]
    {
        type Output = crate::transform::Map<S::IntoIter, F>;
        => crate::transform::map;
    }
}

stage! {
    /// Deferred [`tap`](crate::transform::tap).
    fn tap<F>(function: F);
    impl<S, F> Stage<S, ()>
    where [S: IntoIterator, F: FnMut(&S::Item)]
    {
        type Output = crate::transform::Tap<S::IntoIter, F>;
        => crate::transform::tap;
    }
}

stage! {
    /// Deferred [`filter`](crate::transform::filter).
    fn filter<P>(predicate: P);
    impl<S, P> Stage<S, ()>
    where [S: IntoIterator, P: FnMut(&S::Item) -> bool]
    {
        type Output = crate::transform::Filter<S::IntoIter, P>;
        => crate::transform::filter;
    }
}

stage! {
    /// Deferred [`scan`](crate::transform::scan).
    fn scan<F, B>(reducer: F, initial: B);
    impl<S, B, F> Stage<S, ()>
    where [S: IntoIterator, B: Clone, F: FnMut(B, S::Item) -> B]
    {
        type Output = crate::transform::Scan<S::IntoIter, B, F>;
        => crate::transform::scan;
    }
}

// Bounding

stage! {
    /// Deferred [`take`](crate::bounding::take).
    fn take(count: usize);
    impl<S> Stage<S, ()>
    where [S: IntoIterator]
    {
        type Output = crate::bounding::Take<S::IntoIter>;
        => crate::bounding::take;
    }
}

stage! {
    /// Deferred [`take_while`](crate::bounding::take_while).
    fn take_while<P>(predicate: P);
    impl<S, P> Stage<S, ()>
    where [S: IntoIterator, P: FnMut(&S::Item) -> bool]
    {
        type Output = crate::bounding::TakeWhile<S::IntoIter, P>;
        => crate::bounding::take_while;
    }
}

stage! {
    /// Deferred [`drop`](crate::bounding::drop).
    fn drop(count: usize);
    impl<S> Stage<S, ()>
    where [S: IntoIterator]
    {
        type Output = crate::bounding::Skip<S::IntoIter>;
        => crate::bounding::drop;
    }
}

stage! {
    /// Deferred [`drop_while`](crate::bounding::drop_while).
    fn drop_while<P>(predicate: P);
    impl<S, P> Stage<S, ()>
    where [S: IntoIterator, P: FnMut(&S::Item) -> bool]
    {
        type Output = crate::bounding::SkipWhile<S::IntoIter, P>;
        => crate::bounding::drop_while;
    }
}

/// Deferred [`head`](crate::bounding::head): pulls the first element of the
/// input and discards the rest.
pub const fn head() -> HeadStage {
    HeadStage
}

/// Stage returned by [`head`].
#[derive(Debug, Clone, Copy, Default)]
#[must_use = "stages do nothing unless applied"]
pub struct HeadStage;

impl<S: IntoIterator> Stage<S> for HeadStage {
    type Output = Option<S::Item>;

    fn apply(self, input: S) -> Option<S::Item> {
        crate::bounding::head(&mut input.into_iter())
    }
}

// Structural

/// Deferred [`flatten`](crate::structural::flatten).
pub fn flatten(depth: impl Into<Depth>) -> FlattenStage {
    FlattenStage {
        depth: depth.into(),
    }
}

/// Stage returned by [`flatten`].
#[derive(Debug, Clone, Copy, Default)]
#[must_use = "stages do nothing unless applied"]
pub struct FlattenStage {
    depth: Depth,
}

impl<S, T> Stage<S> for FlattenStage
where
    S: IntoIterator<Item = Nested<T>>,
{
    type Output = crate::structural::Flatten<S::IntoIter, T>;

    fn apply(self, input: S) -> Self::Output {
        crate::structural::flatten(input, self.depth)
    }
}

/// Deferred [`zip`](crate::structural::zip): pairs the input with `second`.
pub const fn zip<B>(second: B) -> ZipStage<B> {
    ZipStage { second }
}

/// Stage returned by [`zip`].
#[derive(Debug, Clone)]
#[must_use = "stages do nothing unless applied"]
pub struct ZipStage<B> {
    second: B,
}

impl<A, B> Stage<A> for ZipStage<B>
where
    A: IntoIterator,
    B: IntoIterator,
{
    type Output = crate::structural::Zip<A::IntoIter, B::IntoIter>;

    fn apply(self, input: A) -> Self::Output {
        crate::structural::zip(input, self.second)
    }
}

/// Deferred [`concat`](crate::structural::concat): appends `second` to the
/// input.
pub const fn concat<B>(second: B) -> ConcatStage<B> {
    ConcatStage { second }
}

/// Stage returned by [`concat`].
#[derive(Debug, Clone)]
#[must_use = "stages do nothing unless applied"]
pub struct ConcatStage<B> {
    second: B,
}

impl<A, B> Stage<A> for ConcatStage<B>
where
    A: IntoIterator,
    B: IntoIterator<Item = A::Item>,
{
    type Output = crate::structural::Concat<A::IntoIter, B::IntoIter>;

    fn apply(self, input: A) -> Self::Output {
        crate::structural::concat(input, self.second)
    }
}

stage! {
    /// Deferred [`concat_all`](crate::structural::concat_all).
    fn concat_all();
    impl<O> Stage<O, ()>
    where [O: IntoIterator, O::Item: IntoIterator]
    {
        type Output = crate::structural::ConcatAll<O::IntoIter, <O::Item as IntoIterator>::IntoIter>;
        => crate::structural::concat_all;
    }
}

// Aggregation

stage! {
    /// Deferred [`reduce`](crate::aggregate::reduce).
    fn reduce<F, B>(reducer: F, initial: B);
    impl<S, B, F> Stage<S, ()>
    where [S: IntoIterator, F: FnMut(B, S::Item) -> B]
    {
        type Output = B;
        => crate::aggregate::reduce;
    }
}

stage! {
    /// Deferred [`every`](crate::aggregate::every).
    fn every<P>(predicate: P);
    impl<S, P> Stage<S, ()>
    where [S: IntoIterator, P: FnMut(&S::Item) -> bool]
    {
        type Output = bool;
        => crate::aggregate::every;
    }
}

stage! {
    /// Deferred [`some`](crate::aggregate::some).
    fn some<P>(predicate: P);
    impl<S, P> Stage<S, ()>
    where [S: IntoIterator, P: FnMut(&S::Item) -> bool]
    {
        type Output = bool;
        => crate::aggregate::some;
    }
}

stage! {
    /// Deferred [`find`](crate::aggregate::find).
    fn find<P>(predicate: P);
    impl<S, P> Stage<S, ()>
    where [S: IntoIterator, P: FnMut(&S::Item) -> bool]
    {
        type Output = Option<S::Item>;
        => crate::aggregate::find;
    }
}

stage! {
    /// Deferred [`count`](crate::aggregate::count).
    fn count();
    impl<S> Stage<S, ()>
    where [S: IntoIterator]
    {
        type Output = usize;
        => crate::aggregate::count;
    }
}

stage! {
    /// Deferred [`collect_array`](crate::aggregate::collect_array).
    fn collect_array();
    impl<S> Stage<S, ()>
    where [S: IntoIterator]
    {
        type Output = Vec<S::Item>;
        => crate::aggregate::collect_array;
    }
}

stage! {
    /// Deferred [`collect_set`](crate::aggregate::collect_set).
    fn collect_set();
    impl<S> Stage<S, ()>
    where [S: IntoIterator, S::Item: Eq + std::hash::Hash]
    {
        type Output = std::collections::HashSet<S::Item>;
        => crate::aggregate::collect_set;
    }
}

stage! {
    /// Deferred [`collect_map`](crate::aggregate::collect_map).
    fn collect_map();
    impl<S, K, V> Stage<S, ()>
    where [S: IntoIterator<Item = (K, V)>, K: Eq + std::hash::Hash]
    {
        type Output = std::collections::HashMap<K, V>;
        => crate::aggregate::collect_map;
    }
}

stage! {
    /// Deferred [`collect_object`](crate::aggregate::collect_object).
    fn collect_object();
    impl<S, K, V> Stage<S, ()>
    where [S: IntoIterator<Item = (K, V)>, K: Into<String>]
    {
        type Output = std::collections::BTreeMap<String, V>;
        => crate::aggregate::collect_object;
    }
}

/// Deferred [`join`](crate::aggregate::join).
pub fn join(separator: impl Into<String>) -> JoinStage {
    JoinStage {
        separator: separator.into(),
    }
}

/// Stage returned by [`join`].
#[derive(Debug, Clone, PartialEq, Eq)]
#[must_use = "stages do nothing unless applied"]
pub struct JoinStage {
    separator: String,
}

impl<S> Stage<S> for JoinStage
where
    S: IntoIterator,
    S::Item: fmt::Display,
{
    type Output = String;

    fn apply(self, input: S) -> String {
        crate::aggregate::join(&self.separator, input)
    }
}

stage! {
    /// Deferred [`try_reduce`](crate::aggregate::try_reduce).
    fn try_reduce<F, B>(reducer: F, initial: B);
    impl<S, T, E, B, F> Stage<S, ()>
    where [S: IntoIterator<Item = Result<T, E>>, F: FnMut(B, T) -> Result<B, E>]
    {
        type Output = Result<B, E>;
        => crate::aggregate::try_reduce;
    }
}

stage! {
    /// Deferred [`try_every`](crate::aggregate::try_every).
    fn try_every<P>(predicate: P);
    impl<S, T, E, P> Stage<S, ()>
    where [S: IntoIterator<Item = Result<T, E>>, P: FnMut(&T) -> Result<bool, E>]
    {
        type Output = Result<bool, E>;
        => crate::aggregate::try_every;
    }
}

stage! {
    /// Deferred [`try_some`](crate::aggregate::try_some).
    fn try_some<P>(predicate: P);
    impl<S, T, E, P> Stage<S, ()>
    where [S: IntoIterator<Item = Result<T, E>>, P: FnMut(&T) -> Result<bool, E>]
    {
        type Output = Result<bool, E>;
        => crate::aggregate::try_some;
    }
}

stage! {
    /// Deferred [`try_find`](crate::aggregate::try_find).
    fn try_find<P>(predicate: P);
    impl<S, T, E, P> Stage<S, ()>
    where [S: IntoIterator<Item = Result<T, E>>, P: FnMut(&T) -> Result<bool, E>]
    {
        type Output = Result<Option<T>, E>;
        => crate::aggregate::try_find;
    }
}

stage! {
    /// Deferred [`try_collect_array`](crate::aggregate::try_collect_array).
    fn try_collect_array();
    impl<S, T, E> Stage<S, ()>
    where [S: IntoIterator<Item = Result<T, E>>]
    {
        type Output = Result<Vec<T>, E>;
        => crate::aggregate::try_collect_array;
    }
}

stage! {
    /// Deferred [`try_count`](crate::aggregate::try_count).
    fn try_count();
    impl<S, T, E> Stage<S, ()>
    where [S: IntoIterator<Item = Result<T, E>>]
    {
        type Output = Result<usize, E>;
        => crate::aggregate::try_count;
    }
}

stage! {
    /// Deferred [`try_collect_set`](crate::aggregate::try_collect_set).
    fn try_collect_set();
    impl<S, T, E> Stage<S, ()>
    where [S: IntoIterator<Item = Result<T, E>>, T: Eq + std::hash::Hash]
    {
        type Output = Result<std::collections::HashSet<T>, E>;
        => crate::aggregate::try_collect_set;
    }
}

stage! {
    /// Deferred [`try_collect_map`](crate::aggregate::try_collect_map).
    fn try_collect_map();
    impl<S, K, V, E> Stage<S, ()>
    where [S: IntoIterator<Item = Result<(K, V), E>>, K: Eq + std::hash::Hash]
    {
        type Output = Result<std::collections::HashMap<K, V>, E>;
        => crate::aggregate::try_collect_map;
    }
}

stage! {
    /// Deferred [`try_collect_object`](crate::aggregate::try_collect_object).
    fn try_collect_object();
    impl<S, K, V, E> Stage<S, ()>
    where [S: IntoIterator<Item = Result<(K, V), E>>, K: Into<String>]
    {
        type Output = Result<std::collections::BTreeMap<String, V>, E>;
        => crate::aggregate::try_collect_object;
    }
}

/// Deferred [`try_join`](crate::aggregate::try_join).
pub fn try_join(separator: impl Into<String>) -> TryJoinStage {
    TryJoinStage {
        separator: separator.into(),
    }
}

/// Stage returned by [`try_join`].
#[derive(Debug, Clone, PartialEq, Eq)]
#[must_use = "stages do nothing unless applied"]
pub struct TryJoinStage {
    separator: String,
}

impl<S, T, E> Stage<S> for TryJoinStage
where
    S: IntoIterator<Item = Result<T, E>>,
    T: fmt::Display,
{
    type Output = Result<String, E>;

    fn apply(self, input: S) -> Result<String, E> {
        crate::aggregate::try_join(&self.separator, input)
    }
}

// Asynchronous transform

#[cfg(feature = "async")]
stage! {
    /// Deferred [`async_map`](crate::transform::async_map).
    fn async_map<F>(function: F);
    impl<M, S, F, Fut> Stage<S, M>
    where [S: IntoAsyncSequence<M>, F: FnMut(S::Item) -> Fut, Fut: Future]
    {
        type Output = crate::transform::AsyncMap<S::IntoStream, F, Fut>;
        => crate::transform::async_map;
    }
}

#[cfg(feature = "async")]
stage! {
    /// Deferred [`async_tap`](crate::transform::async_tap).
    fn async_tap<F, Fut>(function: F) awaiting Fut;
    impl<M, S, F, Fut> Stage<S, M>
    where [S: IntoAsyncSequence<M>, F: FnMut(&S::Item) -> Fut, Fut: Future<Output = ()>]
    {
        type Output = crate::transform::AsyncTap<S::IntoStream, S::Item, F, Fut>;
        => crate::transform::async_tap;
    }
}

#[cfg(feature = "async")]
stage! {
    /// Deferred [`async_filter`](crate::transform::async_filter).
    fn async_filter<P, Fut>(predicate: P) awaiting Fut;
    impl<M, S, P, Fut> Stage<S, M>
    where [S: IntoAsyncSequence<M>, P: FnMut(&S::Item) -> Fut, Fut: Future<Output = bool>]
    {
        type Output = crate::transform::AsyncFilter<S::IntoStream, S::Item, P, Fut>;
        => crate::transform::async_filter;
    }
}

#[cfg(feature = "async")]
stage! {
    /// Deferred [`async_scan`](crate::transform::async_scan).
    fn async_scan<F, B>(reducer: F, initial: B);
    impl<M, S, B, F, Fut> Stage<S, M>
    where [S: IntoAsyncSequence<M>, B: Clone, F: FnMut(B, S::Item) -> Fut, Fut: Future<Output = B>]
    {
        type Output = crate::transform::AsyncScan<S::IntoStream, B, F, Fut>;
        => crate::transform::async_scan;
    }
}

// Asynchronous bounding

#[cfg(feature = "async")]
stage! {
    /// Deferred [`async_take`](crate::bounding::async_take).
    fn async_take(count: usize);
    impl<M, S> Stage<S, M>
    where [S: IntoAsyncSequence<M>]
    {
        type Output = crate::bounding::AsyncTake<S::IntoStream>;
        => crate::bounding::async_take;
    }
}

#[cfg(feature = "async")]
stage! {
    /// Deferred [`async_take_while`](crate::bounding::async_take_while).
    fn async_take_while<P, Fut>(predicate: P) awaiting Fut;
    impl<M, S, P, Fut> Stage<S, M>
    where [S: IntoAsyncSequence<M>, P: FnMut(&S::Item) -> Fut, Fut: Future<Output = bool>]
    {
        type Output = crate::bounding::AsyncTakeWhile<S::IntoStream, S::Item, P, Fut>;
        => crate::bounding::async_take_while;
    }
}

#[cfg(feature = "async")]
stage! {
    /// Deferred [`async_drop`](crate::bounding::async_drop).
    fn async_drop(count: usize);
    impl<M, S> Stage<S, M>
    where [S: IntoAsyncSequence<M>]
    {
        type Output = crate::bounding::AsyncSkip<S::IntoStream>;
        => crate::bounding::async_drop;
    }
}

#[cfg(feature = "async")]
stage! {
    /// Deferred [`async_drop_while`](crate::bounding::async_drop_while).
    fn async_drop_while<P, Fut>(predicate: P) awaiting Fut;
    impl<M, S, P, Fut> Stage<S, M>
    where [S: IntoAsyncSequence<M>, P: FnMut(&S::Item) -> Fut, Fut: Future<Output = bool>]
    {
        type Output = crate::bounding::AsyncSkipWhile<S::IntoStream, S::Item, P, Fut>;
        => crate::bounding::async_drop_while;
    }
}

/// Future returned by applying an [`AsyncHeadStage`].
#[cfg(feature = "async")]
pub type AsyncHead<S> = Map<
    StreamFuture<Pin<Box<S>>>,
    fn((Option<<S as Stream>::Item>, Pin<Box<S>>)) -> Option<<S as Stream>::Item>,
>;

/// Deferred [`async_head`](crate::bounding::async_head): resolves to the
/// first element of the input and discards the rest.
#[cfg(feature = "async")]
pub const fn async_head() -> AsyncHeadStage {
    AsyncHeadStage
}

/// Stage returned by [`async_head`].
#[cfg(feature = "async")]
#[derive(Debug, Clone, Copy, Default)]
#[must_use = "stages do nothing unless applied"]
pub struct AsyncHeadStage;

#[cfg(feature = "async")]
impl<M, S> Stage<S, M> for AsyncHeadStage
where
    S: IntoAsyncSequence<M>,
{
    type Output = AsyncHead<S::IntoStream>;

    fn apply(self, input: S) -> Self::Output {
        let first: fn((Option<S::Item>, Pin<Box<S::IntoStream>>)) -> Option<S::Item> =
            |(first, _rest)| first;
        StreamExt::into_future(Box::pin(input.into_async_sequence())).map(first)
    }
}

// Asynchronous structural

/// Deferred [`async_flatten`](crate::structural::async_flatten).
#[cfg(feature = "async")]
pub fn async_flatten(depth: impl Into<Depth>) -> AsyncFlattenStage {
    AsyncFlattenStage {
        depth: depth.into(),
    }
}

/// Stage returned by [`async_flatten`].
#[cfg(feature = "async")]
#[derive(Debug, Clone, Copy, Default)]
#[must_use = "stages do nothing unless applied"]
pub struct AsyncFlattenStage {
    depth: Depth,
}

#[cfg(feature = "async")]
impl<'a, M, S, T> Stage<S, M> for AsyncFlattenStage
where
    S: IntoAsyncSequence<M, Item = AsyncNested<'a, T>>,
{
    type Output = crate::structural::AsyncFlatten<'a, S::IntoStream, T>;

    fn apply(self, input: S) -> Self::Output {
        crate::structural::async_flatten(input, self.depth)
    }
}

/// Deferred [`async_zip`](crate::structural::async_zip): pairs the input
/// with `second`.
#[cfg(feature = "async")]
pub const fn async_zip<B>(second: B) -> AsyncZipStage<B> {
    AsyncZipStage { second }
}

/// Stage returned by [`async_zip`].
#[cfg(feature = "async")]
#[derive(Debug, Clone)]
#[must_use = "stages do nothing unless applied"]
pub struct AsyncZipStage<B> {
    second: B,
}

#[cfg(feature = "async")]
impl<MA, MB, A, B> Stage<A, (MA, MB)> for AsyncZipStage<B>
where
    A: IntoAsyncSequence<MA>,
    B: IntoAsyncSequence<MB>,
{
    type Output = crate::structural::AsyncZip<A::IntoStream, B::IntoStream>;

    fn apply(self, input: A) -> Self::Output {
        crate::structural::async_zip(input, self.second)
    }
}

/// Deferred [`async_concat`](crate::structural::async_concat): appends
/// `second` to the input.
#[cfg(feature = "async")]
pub const fn async_concat<B>(second: B) -> AsyncConcatStage<B> {
    AsyncConcatStage { second }
}

/// Stage returned by [`async_concat`].
#[cfg(feature = "async")]
#[derive(Debug, Clone)]
#[must_use = "stages do nothing unless applied"]
pub struct AsyncConcatStage<B> {
    second: B,
}

#[cfg(feature = "async")]
impl<MA, MB, A, B> Stage<A, (MA, MB)> for AsyncConcatStage<B>
where
    A: IntoAsyncSequence<MA>,
    B: IntoAsyncSequence<MB, Item = A::Item>,
{
    type Output = crate::structural::AsyncConcat<A::IntoStream, B::IntoStream>;

    fn apply(self, input: A) -> Self::Output {
        crate::structural::async_concat(input, self.second)
    }
}

#[cfg(feature = "async")]
stage! {
    /// Deferred [`async_concat_all`](crate::structural::async_concat_all).
    fn async_concat_all();
    impl<M, O, S> Stage<O, M>
    where [O: IntoIterator<Item = S>, S: IntoAsyncSequence<M>]
    {
        type Output = crate::structural::AsyncConcatAll<
            std::iter::Map<O::IntoIter, crate::structural::IntoStreamFn<M, S>>,
            S::IntoStream,
        >;
        => crate::structural::async_concat_all;
    }
}

// Asynchronous aggregation

#[cfg(feature = "async")]
stage! {
    /// Deferred [`async_reduce`](crate::aggregate::async_reduce).
    fn async_reduce<F, B>(reducer: F, initial: B);
    impl<M, S, B, F, Fut> Stage<S, M>
    where [S: IntoAsyncSequence<M>, F: FnMut(B, S::Item) -> Fut, Fut: Future<Output = B>]
    {
        type Output = crate::aggregate::AsyncFold<S::IntoStream, F, B, Fut>;
        => crate::aggregate::async_reduce;
    }
}

#[cfg(feature = "async")]
stage! {
    /// Deferred [`async_every`](crate::aggregate::async_every).
    fn async_every<P, Fut>(predicate: P) awaiting Fut;
    impl<M, S, P, Fut> Stage<S, M>
    where [S: IntoAsyncSequence<M>, P: FnMut(&S::Item) -> Fut, Fut: Future<Output = bool>]
    {
        type Output = crate::aggregate::AsyncEvery<S::IntoStream, S::Item, P, Fut>;
        => crate::aggregate::async_every;
    }
}

#[cfg(feature = "async")]
stage! {
    /// Deferred [`async_some`](crate::aggregate::async_some).
    fn async_some<P, Fut>(predicate: P) awaiting Fut;
    impl<M, S, P, Fut> Stage<S, M>
    where [S: IntoAsyncSequence<M>, P: FnMut(&S::Item) -> Fut, Fut: Future<Output = bool>]
    {
        type Output = crate::aggregate::AsyncSome<S::IntoStream, S::Item, P, Fut>;
        => crate::aggregate::async_some;
    }
}

#[cfg(feature = "async")]
stage! {
    /// Deferred [`async_find`](crate::aggregate::async_find).
    fn async_find<P, Fut>(predicate: P) awaiting Fut;
    impl<M, S, P, Fut> Stage<S, M>
    where [S: IntoAsyncSequence<M>, P: FnMut(&S::Item) -> Fut, Fut: Future<Output = bool>]
    {
        type Output = crate::aggregate::AsyncFind<S::IntoStream, S::Item, P, Fut>;
        => crate::aggregate::async_find;
    }
}

#[cfg(feature = "async")]
stage! {
    /// Deferred [`async_count`](crate::aggregate::async_count).
    fn async_count();
    impl<M, S> Stage<S, M>
    where [S: IntoAsyncSequence<M>]
    {
        type Output = crate::aggregate::AsyncCount<S::IntoStream>;
        => crate::aggregate::async_count;
    }
}

#[cfg(feature = "async")]
stage! {
    /// Deferred [`async_collect_array`](crate::aggregate::async_collect_array).
    fn async_collect_array();
    impl<M, S> Stage<S, M>
    where [S: IntoAsyncSequence<M>]
    {
        type Output = crate::aggregate::AsyncCollect<S::IntoStream, Vec<S::Item>>;
        => crate::aggregate::async_collect_array;
    }
}

#[cfg(feature = "async")]
stage! {
    /// Deferred [`async_collect_set`](crate::aggregate::async_collect_set).
    fn async_collect_set();
    impl<M, S> Stage<S, M>
    where [S: IntoAsyncSequence<M>, S::Item: Eq + std::hash::Hash]
    {
        type Output =
            crate::aggregate::AsyncCollect<S::IntoStream, std::collections::HashSet<S::Item>>;
        => crate::aggregate::async_collect_set;
    }
}

#[cfg(feature = "async")]
stage! {
    /// Deferred [`async_collect_map`](crate::aggregate::async_collect_map).
    fn async_collect_map();
    impl<M, S, K, V> Stage<S, M>
    where [S: IntoAsyncSequence<M, Item = (K, V)>, K: Eq + std::hash::Hash]
    {
        type Output = crate::aggregate::AsyncCollect<S::IntoStream, std::collections::HashMap<K, V>>;
        => crate::aggregate::async_collect_map;
    }
}

#[cfg(feature = "async")]
stage! {
    /// Deferred [`async_collect_object`](crate::aggregate::async_collect_object).
    fn async_collect_object();
    impl<M, S, K, V> Stage<S, M>
    where [S: IntoAsyncSequence<M, Item = (K, V)>, K: Into<String>]
    {
        type Output =
            crate::aggregate::AsyncCollect<S::IntoStream, std::collections::BTreeMap<String, V>>;
        => crate::aggregate::async_collect_object;
    }
}

/// Deferred [`async_join`](crate::aggregate::async_join).
#[cfg(feature = "async")]
pub fn async_join(separator: impl Into<String>) -> AsyncJoinStage {
    AsyncJoinStage {
        separator: separator.into(),
    }
}

/// Stage returned by [`async_join`].
#[cfg(feature = "async")]
#[derive(Debug, Clone, PartialEq, Eq)]
#[must_use = "stages do nothing unless applied"]
pub struct AsyncJoinStage {
    separator: String,
}

#[cfg(feature = "async")]
impl<M, S> Stage<S, M> for AsyncJoinStage
where
    S: IntoAsyncSequence<M>,
    S::Item: fmt::Display,
{
    type Output = crate::aggregate::AsyncJoin<S::IntoStream>;

    fn apply(self, input: S) -> Self::Output {
        crate::aggregate::async_join(&self.separator, input)
    }
}

#[cfg(feature = "async")]
stage! {
    /// Deferred [`async_try_reduce`](crate::aggregate::async_try_reduce).
    fn async_try_reduce<F, B>(reducer: F, initial: B);
    impl<M, S, T, E, B, F, Fut> Stage<S, M>
    where [
        S: IntoAsyncSequence<M, Item = Result<T, E>>,
        F: FnMut(B, T) -> Fut,
        Fut: Future<Output = Result<B, E>>,
    ]
    {
        type Output = crate::aggregate::AsyncTryFold<S::IntoStream, F, B, Fut>;
        => crate::aggregate::async_try_reduce;
    }
}

#[cfg(feature = "async")]
stage! {
    /// Deferred [`async_try_every`](crate::aggregate::async_try_every).
    fn async_try_every<P, Fut>(predicate: P) awaiting Fut;
    impl<M, S, T, E, P, Fut> Stage<S, M>
    where [
        S: IntoAsyncSequence<M, Item = Result<T, E>>,
        P: FnMut(&T) -> Fut,
        Fut: Future<Output = Result<bool, E>>,
    ]
    {
        type Output = crate::aggregate::AsyncTryEvery<S::IntoStream, T, E, P, Fut>;
        => crate::aggregate::async_try_every;
    }
}

#[cfg(feature = "async")]
stage! {
    /// Deferred [`async_try_some`](crate::aggregate::async_try_some).
    fn async_try_some<P, Fut>(predicate: P) awaiting Fut;
    impl<M, S, T, E, P, Fut> Stage<S, M>
    where [
        S: IntoAsyncSequence<M, Item = Result<T, E>>,
        P: FnMut(&T) -> Fut,
        Fut: Future<Output = Result<bool, E>>,
    ]
    {
        type Output = crate::aggregate::AsyncTrySome<S::IntoStream, T, E, P, Fut>;
        => crate::aggregate::async_try_some;
    }
}

#[cfg(feature = "async")]
stage! {
    /// Deferred [`async_try_find`](crate::aggregate::async_try_find).
    fn async_try_find<P, Fut>(predicate: P) awaiting Fut;
    impl<M, S, T, E, P, Fut> Stage<S, M>
    where [
        S: IntoAsyncSequence<M, Item = Result<T, E>>,
        P: FnMut(&T) -> Fut,
        Fut: Future<Output = Result<bool, E>>,
    ]
    {
        type Output = crate::aggregate::AsyncTryFind<S::IntoStream, T, P, Fut>;
        => crate::aggregate::async_try_find;
    }
}

#[cfg(feature = "async")]
stage! {
    /// Deferred [`async_try_collect_array`](crate::aggregate::async_try_collect_array).
    fn async_try_collect_array();
    impl<M, S, T, E> Stage<S, M>
    where [S: IntoAsyncSequence<M, Item = Result<T, E>>]
    {
        type Output = crate::aggregate::AsyncTryCollectArray<S::IntoStream, T, E>;
        => crate::aggregate::async_try_collect_array;
    }
}

#[cfg(feature = "async")]
stage! {
    /// Deferred [`async_try_count`](crate::aggregate::async_try_count).
    fn async_try_count();
    impl<M, S, T, E> Stage<S, M>
    where [S: IntoAsyncSequence<M, Item = Result<T, E>>]
    {
        type Output = crate::aggregate::AsyncTryCollect<S::IntoStream, T, E, usize>;
        => crate::aggregate::async_try_count;
    }
}

#[cfg(feature = "async")]
stage! {
    /// Deferred [`async_try_collect_set`](crate::aggregate::async_try_collect_set).
    fn async_try_collect_set();
    impl<M, S, T, E> Stage<S, M>
    where [S: IntoAsyncSequence<M, Item = Result<T, E>>, T: Eq + std::hash::Hash]
    {
        type Output =
            crate::aggregate::AsyncTryCollect<S::IntoStream, T, E, std::collections::HashSet<T>>;
        => crate::aggregate::async_try_collect_set;
    }
}

#[cfg(feature = "async")]
stage! {
    /// Deferred [`async_try_collect_map`](crate::aggregate::async_try_collect_map).
    fn async_try_collect_map();
    impl<M, S, K, V, E> Stage<S, M>
    where [S: IntoAsyncSequence<M, Item = Result<(K, V), E>>, K: Eq + std::hash::Hash]
    {
        type Output = crate::aggregate::AsyncTryCollect<
            S::IntoStream,
            (K, V),
            E,
            std::collections::HashMap<K, V>,
        >;
        => crate::aggregate::async_try_collect_map;
    }
}

#[cfg(feature = "async")]
stage! {
    /// Deferred [`async_try_collect_object`](crate::aggregate::async_try_collect_object).
    fn async_try_collect_object();
    impl<M, S, K, V, E> Stage<S, M>
    where [S: IntoAsyncSequence<M, Item = Result<(K, V), E>>, K: Into<String>]
    {
        type Output = crate::aggregate::AsyncTryCollect<
            S::IntoStream,
            (K, V),
            E,
            std::collections::BTreeMap<String, V>,
        >;
        => crate::aggregate::async_try_collect_object;
    }
}

/// Deferred [`async_try_join`](crate::aggregate::async_try_join).
#[cfg(feature = "async")]
pub fn async_try_join(separator: impl Into<String>) -> AsyncTryJoinStage {
    AsyncTryJoinStage {
        separator: separator.into(),
    }
}

/// Stage returned by [`async_try_join`].
#[cfg(feature = "async")]
#[derive(Debug, Clone, PartialEq, Eq)]
#[must_use = "stages do nothing unless applied"]
pub struct AsyncTryJoinStage {
    separator: String,
}

#[cfg(feature = "async")]
impl<M, S, T, E> Stage<S, M> for AsyncTryJoinStage
where
    S: IntoAsyncSequence<M, Item = Result<T, E>>,
    T: fmt::Display,
{
    type Output = crate::aggregate::AsyncTryJoin<S::IntoStream, T, E>;

    fn apply(self, input: S) -> Self::Output {
        crate::aggregate::async_try_join(&self.separator, input)
    }
}

/// Wraps `stage` so that it runs on the resolved output of a future.
///
/// Placed after an asynchronous aggregation, it lets a pipeline keep
/// working on the aggregated value; the result is again a future.
///
/// # Examples
///
/// ```rust
/// use seqflow::pipe;
/// use seqflow::compose::stage;
///
/// # futures::executor::block_on(async {
/// let doubled = pipe!(
///     futures::stream::iter(vec![1, 2, 3]),
///     stage::async_count(),
///     stage::awaited(|total: usize| total * 2),
/// );
/// assert_eq!(doubled.await, 6);
/// # });
/// ```
#[cfg(feature = "async")]
pub const fn awaited<S>(stage: S) -> Awaited<S> {
    Awaited::new(stage)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nested;
    use rstest::rstest;

    #[rstest]
    fn test_deferred_map_equals_direct_map() {
        let deferred: Vec<i32> = map(|value: i32| value * 3).apply(vec![1, 2]).collect();
        let direct: Vec<i32> = crate::transform::map(|value: i32| value * 3, vec![1, 2]).collect();
        assert_eq!(deferred, direct);
    }

    #[rstest]
    fn test_stages_are_cloneable_when_callbacks_are() {
        let original = filter(|value: &i32| *value > 1);
        let copy = original.clone();
        assert_eq!(original.apply(vec![1, 2]).count(), 1);
        assert_eq!(copy.apply(vec![2, 3]).count(), 2);
    }

    #[rstest]
    fn test_head_stage_takes_first() {
        assert_eq!(head().apply(vec!['x', 'y']), Some('x'));
        assert_eq!(head().apply(Vec::<char>::new()), None);
    }

    #[rstest]
    fn test_flatten_and_zip_stages() {
        let flattened: Vec<_> = flatten(Depth::Infinite)
            .apply(vec![nested!([1, [2]])])
            .filter_map(Nested::into_leaf)
            .collect();
        assert_eq!(flattened, vec![1, 2]);

        let zipped: Vec<_> = zip(vec!["a"]).apply(vec![1, 2]).collect();
        assert_eq!(zipped, vec![(1, Some("a")), (2, None)]);
    }

    #[rstest]
    fn test_join_stage_owns_separator() {
        let stage = join(String::from("/"));
        assert_eq!(stage.clone().apply(vec!["usr", "lib"]), "usr/lib");
        assert_eq!(stage.apply(Vec::<&str>::new()), "");
    }

    #[rstest]
    fn test_try_reduce_stage_propagates_error() {
        let stage = try_reduce(|total: i32, value: i32| Ok(total + value), 0);
        assert_eq!(stage.apply(vec![Ok(1), Err("no")]), Err("no"));
    }

    #[rstest]
    fn test_fallible_count_and_join_stages_surface_errors() {
        assert_eq!(try_count().apply(vec![Ok(1), Err("broken"), Ok(2)]), Err("broken"));
        assert_eq!(try_join("+").apply(vec![Ok::<_, ()>(1), Ok(2)]), Ok(String::from("1+2")));
        assert_eq!(try_collect_map().apply(vec![Ok(("a", 1)), Err('x')]), Err('x'));
    }

    #[cfg(feature = "async")]
    #[rstest]
    fn test_async_fallible_stages_surface_errors() {
        use futures::executor::block_on;

        let source = || futures::stream::iter(vec![Ok("a"), Err(3), Ok("b")]);
        assert_eq!(block_on(async_try_count().apply(source())), Err(3));
        assert_eq!(block_on(async_try_join(",").apply(source())), Err(3));
        assert_eq!(block_on(async_try_collect_set().apply(source())), Err(3));
    }

    #[cfg(feature = "async")]
    #[rstest]
    fn test_async_head_stage() {
        let first = futures::executor::block_on(async_head().apply(vec![7, 8]));
        assert_eq!(first, Some(7));
    }

    #[cfg(feature = "async")]
    #[rstest]
    fn test_async_filter_stage_accepts_stream() {
        let stage = async_filter(|value: &i32| std::future::ready(value % 2 == 1));
        let odd: Vec<i32> =
            futures::executor::block_on(stage.apply(futures::stream::iter(1..6)).collect());
        assert_eq!(odd, vec![1, 3, 5]);
    }
}
