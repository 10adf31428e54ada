//! Per-element transformations.
//!
//! Every operator here is lazy and order-preserving: an element is pulled
//! from upstream only when the consumer asks for the next output.
//!
//! | Operator | Synchronous | Asynchronous |
//! |---|---|---|
//! | transform each element | [`map`] | [`async_map`] |
//! | side effect per element | [`tap`] | [`async_tap`] |
//! | keep matching elements | [`filter`] | [`async_filter`] |
//! | running accumulation | [`scan`] | [`async_scan`] |
//!
//! # Examples
//!
//! ```rust
//! use seqflow::transform::{filter, map, scan};
//!
//! let running: Vec<i32> = scan(
//!     |total, value| total + value,
//!     0,
//!     map(|value: i32| value * 10, filter(|value: &i32| value % 2 == 1, 1..=5)),
//! )
//! .collect();
//! assert_eq!(running, vec![10, 40, 90]);
//! ```

mod filter;
mod map;
mod scan;
mod tap;

pub use filter::{Filter, filter};
pub use map::{Map, map};
pub use scan::{Scan, scan};
pub use tap::{Tap, tap};

#[cfg(feature = "async")]
pub use filter::{AsyncFilter, async_filter};
#[cfg(feature = "async")]
pub use map::{AsyncMap, async_map};
#[cfg(feature = "async")]
pub use scan::{AsyncScan, async_scan};
#[cfg(feature = "async")]
pub use tap::{AsyncTap, async_tap};
