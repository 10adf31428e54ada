//! Aggregation operators: terminal operations that consume a sequence and
//! produce a single value.
//!
//! Synchronous aggregations return the value directly; the asynchronous
//! twins return a named future that resolves to it. Searching aggregations
//! ([`every`], [`some`], [`find`] and their variants) stop pulling as soon
//! as the outcome is known.
//!
//! Sequences that may fail are sequences of [`Result`]s. The `try_*`
//! operators propagate the first failure, from the source or from a
//! callback, and stop pulling immediately.
//!
//! # Examples
//!
//! ```rust
//! use seqflow::aggregate::{count, every, join, reduce};
//!
//! let words = vec!["lazy", "pull", "based"];
//! assert_eq!(count(words.clone()), 3);
//! assert!(every(|word: &&str| word.len() >= 4, words.clone()));
//! assert_eq!(reduce(|total: usize, word: &str| total + word.len(), 0, words.clone()), 13);
//! assert_eq!(join(" ", words), "lazy pull based");
//! ```

mod collect;
mod fallible;
mod reduce;
mod search;

pub use collect::{
    JoinAccumulator, collect_array, collect_map, collect_object, collect_set, join,
};
pub use fallible::{
    try_collect_array, try_collect_map, try_collect_object, try_collect_set, try_count, try_every,
    try_find, try_join, try_reduce, try_some,
};
pub use reduce::{count, reduce};
pub use search::{every, find, some};

#[cfg(feature = "async")]
pub use collect::{
    AsyncCollect, AsyncJoin, async_collect_array, async_collect_map, async_collect_object,
    async_collect_set, async_join,
};
#[cfg(feature = "async")]
pub use fallible::{
    AsyncTryCollect, AsyncTryCollectArray, AsyncTryEvery, AsyncTryFind, AsyncTryFold, AsyncTryJoin,
    AsyncTrySome, async_try_collect_array, async_try_collect_map, async_try_collect_object,
    async_try_collect_set, async_try_count, async_try_every, async_try_find, async_try_join,
    async_try_reduce, async_try_some,
};
#[cfg(feature = "async")]
pub use reduce::{AsyncCount, AsyncFold, async_count, async_reduce};
#[cfg(feature = "async")]
pub use search::{AsyncEvery, AsyncFind, AsyncSome, async_every, async_find, async_some};
