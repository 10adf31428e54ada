//! Error types for sequence adaptation.
//!
//! Operators never invent failures of their own: a failing callback or a
//! failing source surfaces through the caller's own error type via the
//! `try_*` operators. The only error the crate defines is the contract
//! violation raised when a value that cannot be iterated is asked for its
//! sequence.

use std::error::Error;
use std::fmt;

/// Errors raised by the adaptation layer.
///
/// # Examples
///
/// ```rust
/// use seqflow::error::SequenceError;
///
/// let error = SequenceError::NotIterable { argument: "nested" };
/// assert_eq!(format!("{error}"), "nested is not iterable");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SequenceError {
    /// A value without any iteration capability was used as a sequence.
    ///
    /// This is a programming error, not a recoverable condition.
    NotIterable {
        /// The name of the offending argument.
        argument: &'static str,
    },
}

impl SequenceError {
    pub(crate) fn not_iterable(argument: &'static str) -> Self {
        tracing::trace!(argument, "value is not iterable");
        Self::NotIterable { argument }
    }
}

impl fmt::Display for SequenceError {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotIterable { argument } => write!(formatter, "{argument} is not iterable"),
        }
    }
}

impl Error for SequenceError {}
