// SPDX-FileCopyrightText: 2026 Adserve Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Insertion-ordered string-keyed map used for component collections and
//! batch dispatch results.

use std::collections::HashMap;

/// A string-keyed map that iterates in insertion order.
///
/// Re-inserting an existing key replaces its value but keeps the key at its
/// original position.
#[derive(Debug, Clone)]
pub struct ComponentMap<V> {
    entries: Vec<(String, V)>,
    positions: HashMap<String, usize>,
}

impl<V> ComponentMap<V> {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            positions: HashMap::new(),
        }
    }

    /// Insert a value, returning the previous value for the key if any.
    pub fn insert(&mut self, key: impl Into<String>, value: V) -> Option<V> {
        let key = key.into();
        match self.positions.get(&key) {
            Some(&idx) => Some(std::mem::replace(&mut self.entries[idx].1, value)),
            None => {
                self.positions.insert(key.clone(), self.entries.len());
                self.entries.push((key, value));
                None
            }
        }
    }

    pub fn get(&self, key: &str) -> Option<&V> {
        self.positions.get(key).map(|&idx| &self.entries[idx].1)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.positions.contains_key(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    pub fn values(&self) -> impl Iterator<Item = &V> {
        self.entries.iter().map(|(_, v)| v)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &V)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<V> Default for ComponentMap<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> IntoIterator for ComponentMap<V> {
    type Item = (String, V);
    type IntoIter = std::vec::IntoIter<(String, V)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl<K: Into<String>, V> FromIterator<(K, V)> for ComponentMap<V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = Self::new();
        for (k, v) in iter {
            map.insert(k, v);
        }
        map
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn iterates_in_insertion_order() {
        let map: ComponentMap<u32> = [("zebra", 1), ("alpha", 2), ("middle", 3)]
            .into_iter()
            .collect();
        let keys: Vec<&str> = map.keys().collect();
        assert_eq!(keys, vec!["zebra", "alpha", "middle"]);
    }

    #[test]
    fn reinsert_keeps_position_and_replaces_value() {
        let mut map = ComponentMap::new();
        map.insert("a", 1);
        map.insert("b", 2);
        assert_eq!(map.insert("a", 10), Some(1));

        let pairs: Vec<(&str, &i32)> = map.iter().collect();
        assert_eq!(pairs, vec![("a", &10), ("b", &2)]);
        assert_eq!(map.len(), 2);
    }

    #[test]
    fn get_and_contains() {
        let mut map = ComponentMap::new();
        assert!(map.is_empty());
        map.insert("ox_click", "click");
        assert!(map.contains_key("ox_click"));
        assert_eq!(map.get("ox_click"), Some(&"click"));
        assert_eq!(map.get("missing"), None);
    }
}
