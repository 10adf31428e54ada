//! Possibly-nested values and flattening depth.

use std::fmt;

use crate::error::SequenceError;

#[cfg(feature = "async")]
use crate::sequence::{Adapted, BoxAsyncSequence, BoxSequence};

/// How many levels of nesting [`flatten`](super::flatten) removes.
///
/// The default is one level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Depth {
    /// Remove at most this many levels. `Finite(0)` is a passthrough.
    Finite(usize),
    /// Remove every level of nesting.
    Infinite,
}

impl Depth {
    /// Returns `true` if another level of nesting may be removed.
    #[inline]
    pub const fn allows_descent(self) -> bool {
        match self {
            Self::Finite(levels) => levels > 0,
            Self::Infinite => true,
        }
    }

    /// The budget left for the children of a flattened element.
    #[inline]
    #[must_use]
    pub const fn descend(self) -> Self {
        match self {
            Self::Finite(levels) => Self::Finite(levels.saturating_sub(1)),
            Self::Infinite => Self::Infinite,
        }
    }
}

impl Default for Depth {
    fn default() -> Self {
        Self::Finite(1)
    }
}

impl From<usize> for Depth {
    fn from(levels: usize) -> Self {
        Self::Finite(levels)
    }
}

/// A value that is either a plain element or a nested collection.
///
/// Strings and every other non-collection value are [`Nested::Leaf`]s, so
/// text is never split into characters by flattening.
///
/// The [`nested!`](crate::nested) macro builds values from bracket syntax.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Nested<T> {
    /// A plain element.
    Leaf(T),
    /// A nested collection.
    Node(Vec<Nested<T>>),
}

impl<T> Nested<T> {
    /// Wraps a plain element.
    #[inline]
    pub const fn leaf(value: T) -> Self {
        Self::Leaf(value)
    }

    /// Builds a nested collection.
    pub fn node<I>(children: I) -> Self
    where
        I: IntoIterator<Item = Self>,
    {
        Self::Node(children.into_iter().collect())
    }

    /// Returns `true` if the value can be iterated.
    #[inline]
    pub const fn is_nestable(&self) -> bool {
        matches!(self, Self::Node(_))
    }

    /// Returns the plain element, if this is a leaf.
    pub fn into_leaf(self) -> Option<T> {
        match self {
            Self::Leaf(value) => Some(value),
            Self::Node(_) => None,
        }
    }

    /// Returns the children of a nested collection.
    ///
    /// # Errors
    ///
    /// Returns [`SequenceError::NotIterable`] if the value is a leaf.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use seqflow::nested;
    /// use seqflow::error::SequenceError;
    ///
    /// let children: Vec<_> = nested!([1, 2]).try_into_iter().unwrap().collect();
    /// assert_eq!(children, vec![nested!(1), nested!(2)]);
    ///
    /// assert_eq!(
    ///     nested!(1).try_into_iter().unwrap_err(),
    ///     SequenceError::NotIterable { argument: "nested" },
    /// );
    /// ```
    pub fn try_into_iter(self) -> Result<std::vec::IntoIter<Self>, SequenceError> {
        match self {
            Self::Node(children) => Ok(children.into_iter()),
            Self::Leaf(_) => Err(SequenceError::not_iterable("nested")),
        }
    }
}

impl<T> FromIterator<Self> for Nested<T> {
    fn from_iter<I: IntoIterator<Item = Self>>(iterator: I) -> Self {
        Self::node(iterator)
    }
}

/// Builds a [`Nested`] value from bracket syntax.
///
/// A bracketed list becomes a [`Nested::Node`]; anything else becomes a
/// [`Nested::Leaf`]. Elements must be single token trees, so wrap compound
/// expressions such as negative numbers in parentheses.
///
/// # Examples
///
/// ```rust
/// use seqflow::nested;
/// use seqflow::structural::Nested;
///
/// let value = nested!([1, [2, (-3)]]);
/// assert_eq!(
///     value,
///     Nested::Node(vec![
///         Nested::Leaf(1),
///         Nested::Node(vec![Nested::Leaf(2), Nested::Leaf(-3)]),
///     ]),
/// );
/// ```
#[macro_export]
macro_rules! nested {
    ([$($element:tt),* $(,)?]) => {
        $crate::structural::Nested::Node(vec![$($crate::nested!($element)),*])
    };
    ($leaf:expr) => {
        $crate::structural::Nested::Leaf($leaf)
    };
}

/// A possibly-nested value for [`async_flatten`](super::async_flatten).
///
/// Both synchronous collections ([`AsyncNested::Iter`]) and asynchronous
/// sequences ([`AsyncNested::Stream`]) count as nestable.
#[cfg(feature = "async")]
pub enum AsyncNested<'a, T> {
    /// A plain element.
    Leaf(T),
    /// A nested synchronous sequence.
    Iter(BoxSequence<'a, AsyncNested<'a, T>>),
    /// A nested asynchronous sequence.
    Stream(BoxAsyncSequence<'a, AsyncNested<'a, T>>),
}

#[cfg(feature = "async")]
impl<'a, T> AsyncNested<'a, T> {
    /// Wraps a plain element.
    #[inline]
    pub const fn leaf(value: T) -> Self {
        Self::Leaf(value)
    }

    /// Wraps a nested synchronous sequence.
    pub fn iter<I>(children: I) -> Self
    where
        I: IntoIterator<Item = Self>,
        I::IntoIter: 'a,
    {
        Self::Iter(Box::new(children.into_iter()))
    }

    /// Wraps a nested asynchronous sequence.
    pub fn stream<S>(children: S) -> Self
    where
        S: futures::Stream<Item = Self> + 'a,
    {
        Self::Stream(Box::pin(children))
    }

    /// Lifts a synchronous [`Nested`] value.
    pub fn from_nested(value: Nested<T>) -> Self
    where
        T: 'a,
    {
        match value {
            Nested::Leaf(value) => Self::Leaf(value),
            Nested::Node(children) => Self::iter(children.into_iter().map(Self::from_nested)),
        }
    }

    /// Returns `true` if the value can be iterated.
    #[inline]
    pub const fn is_nestable(&self) -> bool {
        !matches!(self, Self::Leaf(_))
    }

    /// Returns the plain element, if this is a leaf.
    pub fn into_leaf(self) -> Option<T> {
        match self {
            Self::Leaf(value) => Some(value),
            Self::Iter(_) | Self::Stream(_) => None,
        }
    }

    /// Returns the nested sequence, adapted to a single pulling interface.
    ///
    /// # Errors
    ///
    /// Returns [`SequenceError::NotIterable`] if the value is a leaf.
    #[allow(clippy::type_complexity)]
    pub fn try_into_sequence(
        self,
    ) -> Result<Adapted<BoxSequence<'a, Self>, BoxAsyncSequence<'a, Self>>, SequenceError> {
        match self {
            Self::Stream(stream) => Ok(Adapted::stream(stream)),
            Self::Iter(iterator) => Ok(Adapted::iter(iterator)),
            Self::Leaf(_) => Err(SequenceError::not_iterable("nested")),
        }
    }
}

#[cfg(feature = "async")]
impl<T: fmt::Debug> fmt::Debug for AsyncNested<'_, T> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Leaf(value) => formatter.debug_tuple("Leaf").field(value).finish(),
            Self::Iter(_) => formatter.write_str("Iter(..)"),
            Self::Stream(_) => formatter.write_str("Stream(..)"),
        }
    }
}

#[cfg(feature = "async")]
impl<'a, T: 'a> From<Nested<T>> for AsyncNested<'a, T> {
    fn from(value: Nested<T>) -> Self {
        Self::from_nested(value)
    }
}
