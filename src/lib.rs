//! # seqflow
//!
//! Lazy, pull-based sequence operators with synchronous and asynchronous
//! variants, and a composition layer to chain them.
//!
//! ## Overview
//!
//! Every operator consumes a sequence and either returns a new lazy
//! sequence or aggregates it into a single value. Synchronous sequences are
//! [`Iterator`]s; asynchronous sequences are
//! [`Stream`](futures::Stream)s, and every asynchronous operator also
//! accepts a synchronous input. Elements are pulled one at a time, on
//! demand, and an operator never pulls more than it needs.
//!
//! - **Transform**: map, tap, filter, scan
//! - **Bounding**: take, take_while, drop, drop_while, head
//! - **Structural**: flatten, zip, concat, concat_all, range, empty
//! - **Aggregation**: reduce, every, some, find, count, collectors, join, and
//!   the fallible `try_*` family
//! - **Composition**: `pipe!`, `compose!` and deferred stages
//! - **Settling**: awaiting collections of futures
//!
//! ## Feature Flags
//!
//! - `compose`: Pipeline composition (`pipe!`, `compose!`, stages)
//! - `async`: Asynchronous operators, callback lifting and settling helpers
//! - `full`: Enable all features
//!
//! ## Example
//!
//! ```rust
//! use seqflow::prelude::*;
//!
//! let squares = pipe!(
//!     range(1, None),
//!     stage::map(|value: i64| value * value),
//!     stage::take_while(|value: &i64| *value < 50),
//!     stage::join(", "),
//! );
//! assert_eq!(squares, "1, 4, 9, 16, 25, 36, 49");
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
// Note: Disabling redundant_closure_for_method_calls due to clippy 0.1.92 panic bug
#![allow(clippy::redundant_closure_for_method_calls)]

/// Prelude module for convenient imports.
///
/// Re-exports the operators, the sequence abstraction and, when enabled,
/// the composition layer.
///
/// # Usage
///
/// ```rust
/// use seqflow::prelude::*;
/// ```
pub mod prelude {
    pub use crate::aggregate::*;
    pub use crate::bounding::*;
    pub use crate::error::SequenceError;
    pub use crate::sequence::*;
    pub use crate::structural::*;
    pub use crate::transform::*;

    #[cfg(feature = "async")]
    pub use crate::callback::*;

    #[cfg(feature = "compose")]
    pub use crate::compose::{Composed, Identity, Stage, pipeline, stage};

    #[cfg(feature = "compose")]
    pub use crate::{compose, pipe};
}

pub mod aggregate;
pub mod bounding;
pub mod error;
pub mod sequence;
pub mod structural;
pub mod transform;

#[cfg(feature = "async")]
pub mod callback;

#[cfg(feature = "async")]
pub mod settle;

#[cfg(feature = "compose")]
pub mod compose;
