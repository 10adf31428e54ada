//! Pipeline composition.
//!
//! This module lets sequence operators be chained in data-flow order without
//! naming intermediate values, and without any intermediate collection.
//!
//! # Overview
//!
//! The module provides the following utilities:
//!
//! - [`Stage`]: One step of a pipeline, implemented by every `FnOnce` and by
//!   every deferred operator
//! - [`pipe!`]: Applies stages to a value from left to right
//! - [`compose!`]: Builds a reusable stage from stages, left to right
//! - [`stage`]: Deferred constructors for every operator of the crate
//!
//! # Helper Items
//!
//! - [`pipeline`]: The function form of a single-stage [`pipe!`]
//! - [`Identity`]: The stage that returns its input unchanged
//! - [`Composed`]: Two stages applied one after the other
//!
//! # Examples
//!
//! ## Pipeline
//!
//! ```
//! use seqflow::pipe;
//! use seqflow::compose::stage;
//!
//! let labels = pipe!(
//!     vec![3, 1, 4, 1, 5],
//!     stage::filter(|value: &i32| *value > 1),
//!     stage::map(|value: i32| format!("#{value}")),
//!     stage::join(" "),
//! );
//! assert_eq!(labels, "#3 #4 #5");
//! ```
//!
//! ## Deferred application is direct application
//!
//! ```
//! use seqflow::compose::{Stage, stage};
//! use seqflow::transform::{filter, map};
//!
//! let is_even = |value: &i32| value % 2 == 0;
//! let halve = |value: i32| value / 2;
//!
//! let piped: Vec<i32> = seqflow::pipe!(0..10, stage::filter(is_even), stage::map(halve))
//!     .collect();
//! let direct: Vec<i32> = map(halve, filter(is_even, 0..10)).collect();
//! assert_eq!(piped, direct);
//! ```
//!
//! # Pipelines and laziness
//!
//! Stages over sequences return lazy adapters, so a pipeline ending in a
//! sequence stage has pulled nothing yet. Pulling starts when the result is
//! iterated (or polled) or when a terminal stage such as
//! [`stage::count`] or [`stage::collect_array`] runs.
//!
//! ```text
//! pipe!(x, f, g, h) = h.apply(g.apply(f.apply(x)))
//! compose!(f, g, h).apply(x) = pipe!(x, f, g, h)
//! ```
//!
//! # Laws
//!
//! ## Composition Laws
//!
//! - **Associativity**: `compose!(f, compose!(g, h))` and
//!   `compose!(compose!(f, g), h)` produce the same output
//! - **Left Identity**: `compose!(Identity, f)` produces the same output as `f`
//! - **Right Identity**: `compose!(f, Identity)` produces the same output as `f`
//!
//! ## Deferred Application
//!
//! - **Equivalence**: `stage::op(args).apply(seq)` equals `op(args, seq)` for
//!   every operator `op`

mod compose_macro;
mod pipe_macro;
mod pipeline;
pub mod stage;

pub use pipeline::{Composed, Identity, Stage, pipeline};

#[cfg(feature = "async")]
pub use pipeline::{Awaited, AwaitedApply};

// Re-export macros at module level for convenience
pub use crate::compose;
pub use crate::pipe;
