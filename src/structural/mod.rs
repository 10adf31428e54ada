//! Structural operators: reshaping and combining sequences.
//!
//! | Operator | Synchronous | Asynchronous |
//! |---|---|---|
//! | Remove nesting | [`flatten`] | [`async_flatten`] |
//! | Pair elements | [`zip`] | [`async_zip`] |
//! | Chain two sequences | [`concat`] | [`async_concat`] |
//! | Chain many sequences | [`concat_all`] | [`async_concat_all`] |
//! | Count up | [`range`] | |
//! | Nothing at all | [`empty`] | [`async_empty`] |
//!
//! Nested input is modelled explicitly with [`Nested`] and [`AsyncNested`],
//! so whether an element is a collection is decided by its variant rather
//! than by probing it at runtime. Strings are plain leaves.
//!
//! # Examples
//!
//! ```rust
//! use seqflow::structural::{concat, range, zip};
//!
//! let pairs: Vec<_> = zip(concat(range(0, 2), range(10, 11)), vec!['a', 'b']).collect();
//! assert_eq!(pairs, vec![(0, Some('a')), (1, Some('b')), (10, None)]);
//! ```

mod concat;
mod flatten;
mod nested;
mod range;
mod zip;

pub use concat::{Concat, ConcatAll, concat, concat_all};
pub use flatten::{Flatten, flatten};
pub use nested::{Depth, Nested};
pub use range::{Range, empty, range};
pub use zip::{Zip, zip};

#[cfg(feature = "async")]
pub use concat::{AsyncConcat, AsyncConcatAll, IntoStreamFn, async_concat, async_concat_all};
#[cfg(feature = "async")]
pub use flatten::{AsyncFlatten, async_flatten};
#[cfg(feature = "async")]
pub use nested::AsyncNested;
#[cfg(feature = "async")]
pub use range::async_empty;
#[cfg(feature = "async")]
pub use zip::{AsyncZip, async_zip};
