//! Settling collections of futures.
//!
//! These helpers await every future of a collection and gather the results.
//! Futures are awaited one after the other, in iteration order: the next
//! future is not polled until the previous one has resolved.
//!
//! # Examples
//!
//! ```rust
//! use seqflow::settle::{all, all_values};
//!
//! async fn fetch(id: u32) -> u32 {
//!     id * 100
//! }
//!
//! # futures::executor::block_on(async {
//! let values = all(vec![fetch(1), fetch(2)]).await;
//! assert_eq!(values, vec![100, 200]);
//!
//! let record = all_values(vec![("b", fetch(2)), ("a", fetch(1))]).await;
//! assert_eq!(record.into_iter().collect::<Vec<_>>(), vec![("a", 100), ("b", 200)]);
//! # });
//! ```

use std::collections::BTreeMap;
use std::future::IntoFuture;

/// Awaits every future of `futures` in order and collects their outputs.
pub async fn all<I>(futures: I) -> Vec<<I::Item as IntoFuture>::Output>
where
    I: IntoIterator,
    I::Item: IntoFuture,
{
    let futures = futures.into_iter();
    let mut values = Vec::with_capacity(futures.size_hint().0);
    for future in futures {
        values.push(future.await);
    }
    values
}

/// Awaits the value of every key-future pair and collects the results into
/// an ordered map.
///
/// When a key occurs more than once, the value awaited last is kept; every
/// future is still awaited.
pub async fn all_values<I, K, F>(entries: I) -> BTreeMap<K, F::Output>
where
    I: IntoIterator<Item = (K, F)>,
    K: Ord,
    F: IntoFuture,
{
    let mut values = BTreeMap::new();
    for (key, future) in entries {
        values.insert(key, future.await);
    }
    values
}

/// Awaits the value of every key-future pair and returns the settled pairs
/// in iteration order.
///
/// # Examples
///
/// ```rust
/// use seqflow::settle::entries;
///
/// # futures::executor::block_on(async {
/// let settled = entries(vec![("z", std::future::ready(26)), ("a", std::future::ready(1))]).await;
/// assert_eq!(settled, vec![("z", 26), ("a", 1)]);
/// # });
/// ```
pub async fn entries<I, K, F>(entries: I) -> Vec<(K, F::Output)>
where
    I: IntoIterator<Item = (K, F)>,
    F: IntoFuture,
{
    let entries = entries.into_iter();
    let mut settled = Vec::with_capacity(entries.size_hint().0);
    for (key, future) in entries {
        settled.push((key, future.await));
    }
    settled
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::executor::block_on;
    use rstest::rstest;
    use std::cell::RefCell;

    #[rstest]
    fn test_all_of_nothing() {
        let values = block_on(all(Vec::<std::future::Ready<u8>>::new()));
        assert!(values.is_empty());
    }

    #[rstest]
    fn test_all_awaits_in_order() {
        let log = RefCell::new(Vec::new());
        let record = |label: &'static str| {
            let log = &log;
            async move {
                log.borrow_mut().push(label);
                label.len()
            }
        };
        let lengths = block_on(all(vec![record("one"), record("three")]));
        assert_eq!(lengths, vec![3, 5]);
        assert_eq!(*log.borrow(), vec!["one", "three"]);
    }

    #[rstest]
    fn test_all_values_keeps_last_duplicate() {
        let settled = block_on(all_values(vec![
            ("key", std::future::ready(1)),
            ("key", std::future::ready(2)),
        ]));
        assert_eq!(settled.get("key"), Some(&2));
        assert_eq!(settled.len(), 1);
    }

    #[rstest]
    fn test_entries_keeps_duplicates_in_order() {
        let settled = block_on(entries(vec![
            ("key", std::future::ready(1)),
            ("key", std::future::ready(2)),
        ]));
        assert_eq!(settled, vec![("key", 1), ("key", 2)]);
    }
}
