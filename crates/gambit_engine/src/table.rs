//! Memo tables owned by a searcher.

use std::collections::HashMap;
use std::hash::Hash;

use gambit_core::{Position, MATE_UPPER};
use tracing::debug;

/// Bounds on the true score of a position: `lower <= score <= upper`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Entry {
    pub lower: i32,
    pub upper: i32,
}

impl Default for Entry {
    /// Nothing known yet.
    fn default() -> Self {
        Self {
            lower: -MATE_UPPER,
            upper: MATE_UPPER,
        }
    }
}

/// Score table key: bounds depend on the remaining depth and on whether the
/// search was rooted at this position.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ScoreKey {
    pub pos: Position,
    pub depth: i32,
    pub root: bool,
}

/// Hash map that is emptied completely once it grows past its capacity.
///
/// The clear happens before the insert that would overflow, so the value
/// just stored is always present afterwards.
#[derive(Debug, Clone)]
pub struct BoundedTable<K, V> {
    name: &'static str,
    map: HashMap<K, V>,
    capacity: usize,
    clears: u64,
}

impl<K: Hash + Eq, V> BoundedTable<K, V> {
    pub fn new(name: &'static str, capacity: usize) -> Self {
        Self {
            name,
            map: HashMap::new(),
            capacity,
            clears: 0,
        }
    }

    pub fn get(&self, key: &K) -> Option<&V> {
        self.map.get(key)
    }

    pub fn insert(&mut self, key: K, value: V) {
        if self.map.len() > self.capacity {
            debug!(table = self.name, entries = self.map.len(), "table full, clearing");
            self.map.clear();
            self.clears += 1;
        }
        self.map.insert(key, value);
    }

    pub fn clear(&mut self) {
        self.map.clear();
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// How many times the table overflowed and was emptied.
    pub fn overflow_clears(&self) -> u64 {
        self.clears
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clears_only_past_capacity() {
        let mut table = BoundedTable::new("test", 2);
        table.insert(1, 'a');
        table.insert(2, 'b');
        table.insert(3, 'c');
        // Three entries: the third insert saw len 2, which is not over capacity
        assert_eq!(table.len(), 3);
        assert_eq!(table.overflow_clears(), 0);

        table.insert(4, 'd');
        assert_eq!(table.len(), 1);
        assert_eq!(table.get(&4), Some(&'d'));
        assert_eq!(table.get(&1), None);
        assert_eq!(table.overflow_clears(), 1);
    }

    #[test]
    fn test_overwrite_does_not_grow() {
        let mut table = BoundedTable::new("test", 1);
        table.insert("k", 1);
        table.insert("k", 2);
        assert_eq!(table.len(), 1);
        assert_eq!(table.get(&"k"), Some(&2));
    }

    #[test]
    fn test_default_entry_is_uninformative() {
        let e = Entry::default();
        assert_eq!(e.lower, -MATE_UPPER);
        assert_eq!(e.upper, MATE_UPPER);
    }
}
