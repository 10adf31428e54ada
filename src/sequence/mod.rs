//! The sequence abstraction and the adaptation layer.
//!
//! A *synchronous sequence* is any [`Iterator`]: a single-pass, pull-based,
//! possibly infinite producer. An *asynchronous sequence* is any
//! [`Stream`](futures::Stream): the same contract, except that every pull is
//! a suspension point.
//!
//! Synchronous operators accept anything that implements [`IntoIterator`].
//! Asynchronous operators accept anything that implements
//! [`IntoAsyncSequence`], which covers both plain collections and iterators
//! (adapted through [`IterStream`]) and streams. The kind of the input is
//! resolved once, when the operator is constructed; no per-element checks
//! take place.
//!
//! # Exhaustion
//!
//! Every adapter in this crate fuses its upstream source: once a source
//! reports the end of the sequence it is never pulled again, even when the
//! source itself would resume.
//!
//! # Examples
//!
//! ```rust
//! use seqflow::sequence::IntoAsyncSequence;
//! use futures::StreamExt;
//!
//! # futures::executor::block_on(async {
//! // A plain vector is accepted where an asynchronous sequence is expected.
//! let mut stream = vec![1, 2, 3].into_async_sequence();
//! assert_eq!(stream.next().await, Some(1));
//!
//! // So is a stream.
//! let mut stream = futures::stream::iter(vec![4, 5]).into_async_sequence();
//! assert_eq!(stream.next().await, Some(4));
//! # });
//! ```

#[cfg(feature = "async")]
mod adapt;

#[cfg(feature = "async")]
pub use adapt::{Adapted, BoxAsyncSequence, FromIter, FromStream, IntoAsyncSequence, IterStream};

/// A type-erased synchronous sequence.
pub type BoxSequence<'a, T> = Box<dyn Iterator<Item = T> + 'a>;

/// Erases the concrete type of a synchronous sequence.
///
/// Useful when sequences of different types have to be stored side by side,
/// for instance as the sources of [`concat_all`](crate::structural::concat_all).
///
/// # Examples
///
/// ```rust
/// use seqflow::sequence::boxed;
///
/// let sources = vec![boxed(vec![1, 2]), boxed(3..5)];
/// let all: Vec<i32> = sources.into_iter().flatten().collect();
/// assert_eq!(all, vec![1, 2, 3, 4]);
/// ```
pub fn boxed<'a, S>(sequence: S) -> BoxSequence<'a, S::Item>
where
    S: IntoIterator,
    S::IntoIter: 'a,
{
    Box::new(sequence.into_iter())
}
