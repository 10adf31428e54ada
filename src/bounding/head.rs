//! `head` and `async_head`.

#[cfg(feature = "async")]
use futures::stream::StreamExt;

#[cfg(feature = "async")]
use crate::sequence::IntoAsyncSequence;

/// Pulls exactly one element from `sequence`.
///
/// Returns `None` if the sequence is already exhausted. The sequence is
/// borrowed, not consumed: subsequent pulls continue from the second
/// element.
///
/// # Examples
///
/// ```rust
/// use seqflow::bounding::head;
///
/// let mut sequence = vec![1, 2, 3].into_iter();
/// assert_eq!(head(&mut sequence), Some(1));
/// assert_eq!(sequence.collect::<Vec<_>>(), vec![2, 3]);
///
/// assert_eq!(head(&mut std::iter::empty::<i32>()), None);
/// ```
#[inline]
pub fn head<I>(sequence: &mut I) -> Option<I::Item>
where
    I: Iterator + ?Sized,
{
    sequence.next()
}

/// Pulls exactly one element from a synchronous or asynchronous `sequence`.
///
/// Like [`head`], the remainder stays usable when a mutable reference is
/// passed: `&mut iterator` and `&mut stream` are both accepted.
///
/// # Examples
///
/// ```rust
/// use seqflow::bounding::async_head;
/// use futures::StreamExt;
///
/// # futures::executor::block_on(async {
/// let mut sequence = futures::stream::iter(vec!["a", "b"]);
/// assert_eq!(async_head(&mut sequence).await, Some("a"));
/// assert_eq!(sequence.next().await, Some("b"));
/// assert_eq!(async_head(&mut sequence).await, None);
///
/// let mut numbers = vec![1, 2, 3].into_iter();
/// assert_eq!(async_head(&mut numbers).await, Some(1));
/// assert_eq!(numbers.collect::<Vec<_>>(), vec![2, 3]);
/// # });
/// ```
#[cfg(feature = "async")]
pub async fn async_head<M, S>(sequence: S) -> Option<S::Item>
where
    S: IntoAsyncSequence<M>,
{
    let mut stream = std::pin::pin!(sequence.into_async_sequence());
    stream.next().await
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn test_head_leaves_remainder() {
        let mut sequence = 1..4;
        assert_eq!(head(&mut sequence), Some(1));
        assert_eq!(sequence.collect::<Vec<_>>(), vec![2, 3]);
    }

    #[cfg(feature = "async")]
    #[rstest]
    fn test_async_head_of_sync_iterator_leaves_remainder() {
        let mut sequence = vec![1, 2, 3].into_iter();
        let first = futures::executor::block_on(async_head(&mut sequence));
        assert_eq!(first, Some(1));
        assert_eq!(sequence.collect::<Vec<_>>(), vec![2, 3]);
    }

    #[cfg(feature = "async")]
    #[rstest]
    fn test_async_head_of_exhausted_iterator() {
        let mut sequence = std::iter::empty::<char>();
        assert_eq!(futures::executor::block_on(async_head(&mut sequence)), None);
    }
}
