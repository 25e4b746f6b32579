//! Utility traits shared by the map implementations and their callers

use crate::ChainedHashMap;
use std::{
    collections::HashMap,
    hash::{BuildHasher, Hash},
};

/// Read-only view of a key-value map.
///
/// The routines in [`crate::hashing_problems`] are written against this trait so they work
/// over a [`ChainedHashMap`] as well as over the standard library's `HashMap`.
pub trait MapLookup<K, V> {
    /// Returns the value stored for `key`
    fn lookup(&self, key: &K) -> Option<&V>;

    /// Returns true if the map holds an entry for `key`
    fn contains(&self, key: &K) -> bool {
        self.lookup(key).is_some()
    }

    /// Returns the key-value pairs of the map, in no particular order
    fn entries(&self) -> Box<dyn Iterator<Item = (&K, &V)> + '_>;
}

impl<K, V> MapLookup<K, V> for ChainedHashMap<K, V>
where
    K: Eq + Hash,
{
    fn lookup(&self, key: &K) -> Option<&V> {
        self.get(key)
    }

    fn contains(&self, key: &K) -> bool {
        self.contains_key(key)
    }

    fn entries(&self) -> Box<dyn Iterator<Item = (&K, &V)> + '_> {
        Box::new(self.iter())
    }
}

impl<K, V, S> MapLookup<K, V> for HashMap<K, V, S>
where
    K: Eq + Hash,
    S: BuildHasher,
{
    fn lookup(&self, key: &K) -> Option<&V> {
        self.get(key)
    }

    fn entries(&self) -> Box<dyn Iterator<Item = (&K, &V)> + '_> {
        Box::new(self.iter())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sorted_values<M: MapLookup<String, i32>>(map: &M) -> Vec<i32> {
        let mut values: Vec<i32> = map.entries().map(|(_, v)| *v).collect();
        values.sort_unstable();
        values
    }

    #[test]
    fn test_chained_and_std_agree() {
        let data = vec![("a".to_string(), 1), ("b".to_string(), 2), ("c".to_string(), 3)];
        let chained: ChainedHashMap<_, _> = data.clone().into_iter().collect();
        let std_map: HashMap<_, _> = data.into_iter().collect();

        assert_eq!(sorted_values(&chained), vec![1, 2, 3]);
        assert_eq!(sorted_values(&std_map), vec![1, 2, 3]);

        let key = "b".to_string();
        assert_eq!(chained.lookup(&key), std_map.lookup(&key));
        assert!(MapLookup::contains(&chained, &key));
        assert!(MapLookup::contains(&std_map, &key));
    }

    #[test]
    fn test_contains_missing_key() {
        let mut map = ChainedHashMap::new();
        map.insert("a".to_string(), 1);

        assert!(!MapLookup::contains(&map, &"b".to_string()));
        assert_eq!(map.lookup(&"b".to_string()), None);
    }
}
