//! Bounding and windowing operators.
//!
//! These operators decide how much of a sequence is consumed. They pull
//! exactly what they need and nothing more:
//!
//! - [`take`] never pulls the element after its boundary.
//! - [`take_while`] consumes (and discards) the first element failing its
//!   predicate, then closes.
//! - [`drop`] and [`drop_while`] pull and discard a prefix lazily.
//! - [`head`] pulls a single element and leaves the rest untouched.
//!
//! Requesting more elements than a sequence holds is never an error: the
//! available elements are yielded and the sequence ends normally.
//!
//! # Examples
//!
//! ```rust
//! use seqflow::bounding::{drop, take};
//!
//! // Elements [2, 5) of the sequence.
//! let window: Vec<i32> = take(3, drop(2, 0..10)).collect();
//! assert_eq!(window, vec![2, 3, 4]);
//! ```

mod drop;
mod drop_while;
mod head;
mod take;
mod take_while;

pub use drop::{Skip, drop};
pub use drop_while::{SkipWhile, drop_while};
pub use head::head;
pub use take::{Take, take};
pub use take_while::{TakeWhile, take_while};

#[cfg(feature = "async")]
pub use drop::{AsyncSkip, async_drop};
#[cfg(feature = "async")]
pub use drop_while::{AsyncSkipWhile, async_drop_while};
#[cfg(feature = "async")]
pub use head::async_head;
#[cfg(feature = "async")]
pub use take::{AsyncTake, async_take};
#[cfg(feature = "async")]
pub use take_while::{AsyncTakeWhile, async_take_while};
