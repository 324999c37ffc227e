//! Counting by key

use std::collections::HashMap;
use std::hash::Hash;

/// Counts per key, remembering the order keys were first seen.
///
/// Records without a key are not counted under any key; they are tracked in
/// [`unattributed`](Tally::unattributed) so callers can report them.
#[derive(Debug, Clone)]
pub struct Tally<K> {
    counts: HashMap<K, usize>,
    order: Vec<K>,
    unattributed: usize,
}

impl<K> Default for Tally<K> {
    fn default() -> Self {
        Self {
            counts: HashMap::new(),
            order: Vec::new(),
            unattributed: 0,
        }
    }
}

/// Equal when the same keys were seen in the same order with the same counts.
impl<K: Eq + Hash> PartialEq for Tally<K> {
    fn eq(&self, other: &Self) -> bool {
        self.order == other.order
            && self.counts == other.counts
            && self.unattributed == other.unattributed
    }
}

impl<K: Eq + Hash> Eq for Tally<K> {}

impl<K: Eq + Hash + Clone> Tally<K> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Counts one record under `key`, or as unattributed when there is none.
    pub fn record(&mut self, key: Option<K>) {
        let Some(key) = key else {
            self.unattributed += 1;
            return;
        };
        match self.counts.get_mut(&key) {
            Some(count) => *count += 1,
            None => {
                self.order.push(key.clone());
                self.counts.insert(key, 1);
            }
        }
    }

    /// Count for `key`; zero when never seen.
    pub fn get(&self, key: &K) -> usize {
        self.counts.get(key).copied().unwrap_or(0)
    }

    /// Sum of all attributed counts.
    pub fn total(&self) -> usize {
        self.counts.values().sum()
    }

    /// Records that had no key.
    pub fn unattributed(&self) -> usize {
        self.unattributed
    }

    /// Number of distinct keys.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// `(key, count)` pairs in first-seen order.
    pub fn iter(&self) -> impl Iterator<Item = (&K, usize)> {
        self.order.iter().map(|key| (key, self.get(key)))
    }
}

/// Counts `records` by the key `key_of` extracts.
///
/// Every record with a key adds exactly one to that key, so the tally total
/// equals the number of keyed records.
pub fn tally_by_key<T, K, F>(records: &[T], key_of: F) -> Tally<K>
where
    K: Eq + Hash + Clone,
    F: Fn(&T) -> Option<K>,
{
    let mut tally = Tally::new();
    for record in records {
        tally.record(key_of(record));
    }
    if tally.unattributed() > 0 {
        log::debug!(
            "{} of {} records had no key and were left out of the tally",
            tally.unattributed(),
            records.len()
        );
    }
    tally
}

/// Secondary order for equal counts in [`top_n`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TieBreak {
    /// Key seen first wins.
    FirstSeen,
    KeyAscending,
    KeyDescending,
}

/// The `n` largest counts, descending, ties ordered by `tie_break`.
pub fn top_n<K>(tally: &Tally<K>, n: usize, tie_break: TieBreak) -> Vec<(K, usize)>
where
    K: Eq + Hash + Clone + Ord,
{
    let mut entries: Vec<(K, usize)> = tally.iter().map(|(k, c)| (k.clone(), c)).collect();
    entries.sort_by(|(ka, ca), (kb, cb)| {
        cb.cmp(ca).then_with(|| match tie_break {
            // Stable sort over first-seen order
            TieBreak::FirstSeen => std::cmp::Ordering::Equal,
            TieBreak::KeyAscending => ka.cmp(kb),
            TieBreak::KeyDescending => kb.cmp(ka),
        })
    });
    entries.truncate(n);
    entries
}

/// `count` as a percentage of `total`, within `[0, 100]`.
///
/// A zero (or non-finite) total yields 0 instead of NaN.
pub fn percentage_of(count: f64, total: f64) -> f64 {
    if total <= 0.0 || !total.is_finite() || !count.is_finite() {
        return 0.0;
    }
    (count / total * 100.0).clamp(0.0, 100.0)
}

/// Rounds to one decimal place, the precision percentages are shown with.
pub fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unattributed_are_counted_separately() {
        let keys = [Some("a"), None, Some("b"), Some("a"), None];
        let tally = tally_by_key(&keys, |k| *k);
        assert_eq!(tally.get(&"a"), 2);
        assert_eq!(tally.get(&"b"), 1);
        assert_eq!(tally.get(&"c"), 0);
        assert_eq!(tally.total(), 3);
        assert_eq!(tally.unattributed(), 2);
    }

    #[test]
    fn test_equality_includes_order_and_unattributed() {
        let a = tally_by_key(&[Some("x"), Some("y"), None], |k| *k);
        let b = tally_by_key(&[Some("x"), Some("y"), None], |k| *k);
        assert_eq!(a, b);

        let reordered = tally_by_key(&[Some("y"), Some("x"), None], |k| *k);
        assert_ne!(a, reordered);

        let keyed_only = tally_by_key(&[Some("x"), Some("y")], |k| *k);
        assert_ne!(a, keyed_only);
    }

    #[test]
    fn test_iter_is_first_seen_order() {
        let tally = tally_by_key(&["z", "a", "z", "m"], |k| Some(*k));
        let keys: Vec<_> = tally.iter().map(|(k, _)| *k).collect();
        assert_eq!(keys, ["z", "a", "m"]);
    }

    #[test]
    fn test_top_n_tie_breaks() {
        let tally = tally_by_key(&["b", "a", "c", "c", "b", "a"], |k| Some(k.to_string()));
        let first_seen: Vec<_> = top_n(&tally, 3, TieBreak::FirstSeen)
            .into_iter()
            .map(|(k, _)| k)
            .collect();
        assert_eq!(first_seen, ["b", "a", "c"]);

        let ascending: Vec<_> = top_n(&tally, 2, TieBreak::KeyAscending)
            .into_iter()
            .map(|(k, _)| k)
            .collect();
        assert_eq!(ascending, ["a", "b"]);

        let descending = top_n(&tally, 1, TieBreak::KeyDescending);
        assert_eq!(descending, [("c".to_string(), 2)]);
    }

    #[test]
    fn test_percentage_of_zero_total() {
        assert_eq!(percentage_of(0.0, 0.0), 0.0);
        assert_eq!(percentage_of(12.0, 0.0), 0.0);
        assert_eq!(percentage_of(1.0, 4.0), 25.0);
        assert_eq!(percentage_of(5.0, 4.0), 100.0);
    }

    #[test]
    fn test_round1() {
        assert_eq!(round1(28.4999), 28.5);
        assert_eq!(round1(21.73), 21.7);
    }
}
