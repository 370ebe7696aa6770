//! Sparse coordinate → value map queried by nearest key.

use std::collections::BTreeMap;

/// A sparse axis: distinct integer coordinates bound to values.
///
/// An `Axe` is built once (by calibration) and only read afterwards.
/// Lookups never require an exact match: [`Axe::nearest`] returns the value
/// of the key with the smallest absolute distance, the lower key winning
/// ties.
///
/// # Examples
///
/// ```
/// use edt_rust::core::axe::Axe;
///
/// let axe: Axe<u32> = [(100, 8), (500, 9)].into_iter().collect();
/// assert_eq!(axe.nearest(280), Some(&8));
/// assert_eq!(axe.nearest(320), Some(&9));
/// assert_eq!(axe.nearest(300), Some(&8));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Axe<V> {
    entries: BTreeMap<i32, V>,
}

impl<V> Default for Axe<V> {
    fn default() -> Self {
        Self {
            entries: BTreeMap::new(),
        }
    }
}

impl<V> Axe<V> {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn insert(&mut self, key: i32, value: V) {
        self.entries.insert(key, value);
    }

    /// Value of the key closest to `x`.
    pub fn nearest(&self, x: i32) -> Option<&V> {
        let below = self.entries.range(..=x).next_back();
        let above = self.entries.range(x..).next();
        match (below, above) {
            (Some((bk, bv)), Some((ak, av))) => {
                if (x - bk) <= (ak - x) {
                    Some(bv)
                } else {
                    Some(av)
                }
            }
            (Some((_, v)), None) | (None, Some((_, v))) => Some(v),
            (None, None) => None,
        }
    }

    pub fn get(&self, key: i32) -> Option<&V> {
        self.entries.get(&key)
    }

    pub fn contains_key(&self, key: i32) -> bool {
        self.entries.contains_key(&key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Keys in increasing order.
    pub fn keys(&self) -> impl Iterator<Item = i32> + '_ {
        self.entries.keys().copied()
    }

    /// Entries in increasing key order.
    pub fn iter(&self) -> impl Iterator<Item = (i32, &V)> + '_ {
        self.entries.iter().map(|(k, v)| (*k, v))
    }

    /// Last entry (largest key).
    pub fn last(&self) -> Option<(i32, &V)> {
        self.entries.iter().next_back().map(|(k, v)| (*k, v))
    }
}

impl<V> FromIterator<(i32, V)> for Axe<V> {
    fn from_iter<I: IntoIterator<Item = (i32, V)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nearest_on_empty_axe() {
        let axe: Axe<u32> = Axe::new();
        assert_eq!(axe.nearest(10), None);
    }

    #[test]
    fn test_nearest_outside_bounds() {
        let axe: Axe<&str> = [(50, "a"), (90, "b")].into_iter().collect();
        assert_eq!(axe.nearest(-100), Some(&"a"));
        assert_eq!(axe.nearest(10_000), Some(&"b"));
        assert_eq!(axe.nearest(50), Some(&"a"));
    }

    #[test]
    fn test_tie_goes_to_lower_key() {
        let axe: Axe<u32> = [(0, 1), (10, 2)].into_iter().collect();
        assert_eq!(axe.nearest(5), Some(&1));
        assert_eq!(axe.nearest(6), Some(&2));
    }

    #[test]
    fn test_keys_are_sorted() {
        let axe: Axe<u32> = [(300, 3), (100, 1), (200, 2)].into_iter().collect();
        assert_eq!(axe.keys().collect::<Vec<_>>(), vec![100, 200, 300]);
        assert_eq!(axe.last(), Some((300, &3)));
    }
}
