use std::array;
use std::fmt;

use crate::LinkedList;

pub const DEFAULT_BUCKETS: usize = 32;

/// String-keyed table with separate chaining; each bucket is a
/// [`LinkedList`] of `(key, value)` entries.
pub struct HashTable<V, const N: usize = DEFAULT_BUCKETS> {
    buckets: [LinkedList<(String, V)>; N],
    len: usize,
}

impl<V, const N: usize> Default for HashTable<V, N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V, const N: usize> HashTable<V, N> {
    pub fn new() -> Self {
        const { assert!(N > 0, "a hash table needs at least one bucket") };
        Self {
            buckets: array::from_fn(|_| LinkedList::new()),
            len: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Sum of the key's bytes, reduced modulo the bucket count.
    pub fn hash(&self, key: &str) -> usize {
        Self::bucket_of(key)
    }

    /// Inserts or overwrites, returning the previous value.
    pub fn set(&mut self, key: &str, value: V) -> Option<V> {
        let bucket = &mut self.buckets[Self::bucket_of(key)];
        if let Some((_, slot)) = bucket.find_by_mut(|(k, _)| k == key) {
            return Some(std::mem::replace(slot, value));
        }
        bucket.append((key.to_owned(), value));
        self.len += 1;
        None
    }

    pub fn get(&self, key: &str) -> Option<&V> {
        self.buckets[Self::bucket_of(key)]
            .find_by(|(k, _)| k == key)
            .map(|(_, v)| v)
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut V> {
        self.buckets[Self::bucket_of(key)]
            .find_by_mut(|(k, _)| k == key)
            .map(|(_, v)| v)
    }

    pub fn get_or_insert_with<F>(&mut self, key: &str, make: F) -> &mut V
    where
        F: FnOnce() -> V,
    {
        if !self.has(key) {
            self.len += 1;
        }
        let bucket = &mut self.buckets[Self::bucket_of(key)];
        &mut bucket
            .find_or_append_with(|(k, _)| k == key, || (key.to_owned(), make()))
            .1
    }

    pub fn has(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn remove(&mut self, key: &str) -> Option<V> {
        let removed = self.buckets[Self::bucket_of(key)]
            .remove_first_by(|(k, _)| k == key)
            .map(|(_, v)| v);
        if removed.is_some() {
            self.len -= 1;
        }
        removed
    }

    /// Keys in bucket order.
    pub fn keys(&self) -> Vec<&str> {
        self.iter().map(|(k, _)| k).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &V)> {
        self.buckets
            .iter()
            .flat_map(|bucket| bucket.iter().map(|(k, v)| (k.as_str(), v)))
    }

    pub fn buckets(&self) -> &[LinkedList<(String, V)>; N] {
        &self.buckets
    }

    fn bucket_of(key: &str) -> usize {
        let sum = key.bytes().fold(0_u64, |acc, b| acc.wrapping_add(u64::from(b)));
        (sum % N as u64) as usize
    }
}

impl<V: fmt::Display, const N: usize> fmt::Display for HashTable<V, N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (key, value)) in self.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            write!(f, "{key}:{value}")?;
        }
        Ok(())
    }
}

impl<V: fmt::Debug, const N: usize> fmt::Debug for HashTable<V, N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::HashTable;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};
    use std::collections::HashMap;

    #[test]
    fn hashes_by_byte_sum() {
        let table = HashTable::<i32>::new();
        assert_eq!(table.buckets().len(), 32);
        assert_eq!(table.hash("a"), 97 % 32);
        assert_eq!(table.hash("abc"), (97 + 98 + 99) % 32);
        assert_eq!(table.hash(""), 0);
    }

    #[test]
    fn set_get_and_collide() {
        let mut table = HashTable::<&str, 3>::new();
        assert_eq!(table.hash("a"), 1);
        assert_eq!(table.hash("b"), 2);
        assert_eq!(table.hash("c"), 0);
        assert_eq!(table.hash("d"), 1);

        table.set("a", "sky");
        table.set("d", "ocean");
        table.set("c", "earth");
        assert_eq!(table.len(), 3);
        assert!(table.has("a"));
        assert!(!table.has("x"));

        let bucket_one = table.buckets()[1].to_string_with(|(k, v)| format!("{k}:{v}"));
        assert_eq!(bucket_one, "a:sky,d:ocean");
        assert_eq!(table.buckets()[0].len(), 1);
        assert!(table.buckets()[2].is_empty());

        assert_eq!(table.get("a"), Some(&"sky"));
        assert_eq!(table.get("d"), Some(&"ocean"));
        assert_eq!(table.get("x"), None);

        assert_eq!(table.remove("a"), Some("sky"));
        assert_eq!(table.remove("a"), None);
        assert_eq!(table.get("a"), None);
        assert_eq!(table.get("d"), Some(&"ocean"));

        assert_eq!(table.set("d", "ocean-new"), Some("ocean"));
        assert_eq!(table.get("d"), Some(&"ocean-new"));
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn keys_and_rendering() {
        let mut table = HashTable::<i32, 3>::new();
        table.set("a", 1);
        table.set("b", 2);
        table.set("c", 3);
        let mut keys = table.keys();
        keys.sort_unstable();
        assert_eq!(keys, vec!["a", "b", "c"]);
        assert_eq!(table.to_string(), "c:3,a:1,b:2");
    }

    #[test]
    fn get_or_insert_counts_new_keys() {
        let mut table = HashTable::<u32>::new();
        *table.get_or_insert_with("x", || 0) += 1;
        *table.get_or_insert_with("x", || 0) += 1;
        *table.get_or_insert_with("y", || 10) += 1;
        assert_eq!(table.get("x"), Some(&2));
        assert_eq!(table.get("y"), Some(&11));
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn random_ops_match_hash_map() {
        let mut rng = StdRng::seed_from_u64(0x5EED_2026);
        let mut table = HashTable::<u32, 7>::new();
        let mut oracle = HashMap::new();
        for _ in 0..5_000 {
            let key = format!("k{}", rng.random_range(0..64));
            match rng.random_range(0..3) {
                0 => {
                    let value = rng.random::<u32>();
                    assert_eq!(table.set(&key, value), oracle.insert(key.clone(), value));
                }
                1 => assert_eq!(table.remove(&key), oracle.remove(&key)),
                _ => assert_eq!(table.get(&key), oracle.get(&key)),
            }
            assert_eq!(table.len(), oracle.len());
        }
    }
}
