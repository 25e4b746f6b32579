use std::{
    borrow::Borrow,
    collections::{HashSet, hash_map::DefaultHasher},
    fmt,
    hash::{Hash, Hasher},
    iter, mem, slice,
};

/// Number of buckets a map starts with when no capacity is given
const DEFAULT_INITIAL_CAPACITY: usize = 10;
/// Ratio of entries to buckets above which the bucket array doubles
const DEFAULT_LOAD_FACTOR_THRESHOLD: f64 = 0.7;
/// Smallest accepted load factor threshold, which keeps growth under 200 buckets per entry
const MIN_LOAD_FACTOR_THRESHOLD: f64 = 0.01;

/// Owning link to the next node of a collision chain
type Link<K, V> = Option<Box<Node<K, V>>>;

/// A key-value pair stored in a collision chain
#[derive(Debug)]
struct Node<K, V> {
    /// The key in the key-value pair
    key: K,
    /// The value associated with the key
    value: V,
    /// The rest of the chain
    next: Link<K, V>,
}

/// A hash table resolving collisions by separate chaining.
///
/// Every bucket holds the head of a singly linked chain of entries whose keys
/// hash to that bucket. New entries are prepended to their chain. Once the
/// ratio of entries to buckets exceeds the load factor threshold, the bucket
/// array doubles and every node is re-linked into its new chain without being
/// reallocated, which keeps insertion amortized O(1).
///
/// Removal never shrinks the bucket array.
///
/// Note: This implementation is not thread-safe. Wrap it in a lock to share it between threads.
pub struct ChainedHashMap<K, V> {
    /// Heads of the collision chains; the length of this vector is the capacity
    buckets: Vec<Link<K, V>>,
    /// Current number of entries across all chains
    size: usize,
    /// Load factor above which an insertion doubles the bucket array
    load_factor_threshold: f64,
}

/// Walks a chain starting at `head`.
fn chain<K, V>(head: &Link<K, V>) -> impl Iterator<Item = &Node<K, V>> {
    iter::successors(head.as_deref(), |node| node.next.as_deref())
}

/// Allocates `capacity` empty chains.
fn empty_buckets<K, V>(capacity: usize) -> Vec<Link<K, V>> {
    iter::repeat_with(|| None).take(capacity).collect()
}

/// Hashes a key with the default hasher.
fn hash_of<Q: ?Sized + Hash>(key: &Q) -> u64 {
    let mut hasher = DefaultHasher::new();
    key.hash(&mut hasher);
    hasher.finish()
}

/// Reduces a hash to a bucket index in `0..capacity`.
#[allow(clippy::cast_possible_truncation)]
fn index_for(hash: u64, capacity: usize) -> usize {
    // the remainder is below `capacity`, so narrowing back to usize is lossless
    hash.checked_rem(capacity as u64).unwrap_or(0) as usize
}

/// Accepts a load factor threshold if it is usable, falling back to the default otherwise.
///
/// Positive thresholds below 0.01 are raised to 0.01.
fn sanitize_threshold(threshold: f64) -> f64 {
    if threshold.is_finite() && threshold > 0.0 {
        threshold.max(MIN_LOAD_FACTOR_THRESHOLD)
    } else {
        DEFAULT_LOAD_FACTOR_THRESHOLD
    }
}

impl<K, V> Default for ChainedHashMap<K, V>
where
    K: Eq + Hash,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> Extend<(K, V)> for ChainedHashMap<K, V>
where
    K: Eq + Hash,
{
    fn extend<T: IntoIterator<Item = (K, V)>>(&mut self, iter: T) {
        for (k, v) in iter {
            self.insert(k, v);
        }
    }
}

impl<K, V> FromIterator<(K, V)> for ChainedHashMap<K, V>
where
    K: Eq + Hash,
{
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut map = Self::new();
        map.extend(iter);
        map
    }
}

impl<K, V> ChainedHashMap<K, V>
where
    K: Eq + Hash,
{
    /// Creates an empty `ChainedHashMap` with 10 buckets and a load factor threshold of 0.7
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(DEFAULT_INITIAL_CAPACITY, DEFAULT_LOAD_FACTOR_THRESHOLD)
    }

    /// Creates an empty `ChainedHashMap` with the given number of buckets
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self::with_config(capacity, DEFAULT_LOAD_FACTOR_THRESHOLD)
    }

    /// Creates an empty `ChainedHashMap` with the given number of buckets and load factor threshold.
    ///
    /// A capacity of zero is raised to one bucket. A threshold that is not a positive finite
    /// number is replaced by the default of 0.7, and a threshold below 0.01 is raised to 0.01.
    #[must_use]
    pub fn with_config(initial_capacity: usize, load_factor_threshold: f64) -> Self {
        Self {
            buckets: empty_buckets(initial_capacity.max(1)),
            size: 0,
            load_factor_threshold: sanitize_threshold(load_factor_threshold),
        }
    }

    /// Computes the bucket a key belongs to under the current capacity
    fn bucket_index<Q: ?Sized + Hash>(&self, key: &Q) -> usize {
        index_for(hash_of(key), self.buckets.len())
    }

    /// Finds the node holding `key`
    fn find<Q>(&self, key: &Q) -> Option<&Node<K, V>>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let head = self.buckets.get(self.bucket_index(key))?;
        chain(head).find(|node| node.key.borrow() == key)
    }

    /// Returns the link that owns the node holding `key`, or the empty tail of its chain
    fn link_mut<Q>(&mut self, key: &Q) -> Option<&mut Link<K, V>>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let index = self.bucket_index(key);
        let mut link = self.buckets.get_mut(index)?;
        while link.as_ref().is_some_and(|node| node.key.borrow() != key) {
            link = &mut link.as_mut()?.next;
        }
        Some(link)
    }

    /// Returns a reference to the value stored for `key`
    #[must_use]
    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.find(key).map(|node| &node.value)
    }

    /// Returns a mutable reference to the value stored for `key`
    pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.link_mut(key)?.as_deref_mut().map(|node| &mut node.value)
    }

    /// Returns true if the map holds an entry for `key`
    #[must_use]
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.get(key).is_some()
    }

    /// Returns true if any entry holds `value`. This scans every chain.
    #[must_use]
    pub fn contains_value(&self, value: &V) -> bool
    where
        V: PartialEq,
    {
        self.values().any(|stored| stored == value)
    }

    /// Inserts a key-value pair into the map.
    ///
    /// If the key is already present its value is overwritten in place and the previous
    /// value is returned. Otherwise the entry is prepended to its chain, and the bucket
    /// array doubles before returning if the load factor now exceeds the threshold.
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        if let Some(stored) = self.get_mut(&key) {
            return Some(mem::replace(stored, value));
        }

        let index = self.bucket_index(&key);
        if let Some(head) = self.buckets.get_mut(index) {
            let next = head.take();
            *head = Some(Box::new(Node { key, value, next }));
            self.size = self.size.saturating_add(1);
        }

        while self.exceeds_threshold() {
            self.grow();
        }

        None
    }

    /// Removes the entry for `key`, returning its value
    pub fn remove<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let link = self.link_mut(key)?;
        let node = link.take()?;
        let Node { value, next, .. } = *node;
        *link = next;
        self.size = self.size.saturating_sub(1);
        Some(value)
    }

    /// Removes the entry for `key` only if its value equals `expected`.
    ///
    /// Returns whether the entry was removed.
    pub fn remove_if_eq<Q>(&mut self, key: &Q, expected: &V) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
        V: PartialEq,
    {
        if self.get(key) != Some(expected) {
            return false;
        }
        self.remove(key).is_some()
    }

    /// Overwrites the value for `key` if the key is present, returning the previous value.
    ///
    /// An absent key is left absent.
    pub fn replace<Q>(&mut self, key: &Q, value: V) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.get_mut(key).map(|stored| mem::replace(stored, value))
    }

    /// Overwrites the value for `key` only if its current value equals `expected`.
    ///
    /// Returns whether the value was replaced.
    pub fn replace_if_eq<Q>(&mut self, key: &Q, expected: &V, value: V) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
        V: PartialEq,
    {
        match self.get_mut(key) {
            Some(stored) if *stored == *expected => {
                *stored = value;
                true
            }
            _ => false,
        }
    }

    /// Collects the keys currently in the map
    #[must_use]
    pub fn key_set(&self) -> HashSet<&K> {
        self.keys().collect()
    }

    /// Collects the key-value pairs currently in the map
    #[must_use]
    pub fn entry_set(&self) -> HashSet<(&K, &V)>
    where
        V: Hash + Eq,
    {
        self.iter().collect()
    }

    /// Returns true if the load factor is above the threshold
    fn exceeds_threshold(&self) -> bool {
        self.load_factor() > self.load_factor_threshold
    }

    /// Doubles the bucket array and re-links every node into its new chain
    fn grow(&mut self) {
        let new_capacity = self.buckets.len().saturating_mul(2);
        let old_buckets = mem::replace(&mut self.buckets, empty_buckets(new_capacity));

        for mut link in old_buckets {
            while let Some(mut node) = link {
                link = node.next.take();
                let index = index_for(hash_of(&node.key), new_capacity);
                if let Some(head) = self.buckets.get_mut(index) {
                    node.next = head.take();
                    *head = Some(node);
                }
            }
        }
    }

    /// Sets the load factor threshold, falling back to 0.7 for values that are not positive
    /// and finite and raising values below 0.01 to 0.01. The new threshold is applied on the
    /// next insertion.
    pub fn set_load_factor_threshold(&mut self, threshold: f64) {
        self.load_factor_threshold = sanitize_threshold(threshold);
    }
}

impl<K, V> ChainedHashMap<K, V> {
    /// Returns the number of entries in the map
    #[must_use]
    pub fn len(&self) -> usize {
        self.size
    }

    /// Returns true if the map holds no entries
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Returns the number of buckets
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.buckets.len()
    }

    /// Returns the current ratio of entries to buckets
    #[must_use]
    #[allow(clippy::arithmetic_side_effects, clippy::cast_precision_loss)]
    pub fn load_factor(&self) -> f64 {
        self.size as f64 / self.buckets.len() as f64
    }

    /// Returns the load factor above which an insertion doubles the bucket array
    #[must_use]
    pub fn load_factor_threshold(&self) -> f64 {
        self.load_factor_threshold
    }

    /// Removes every entry while keeping the current number of buckets
    pub fn clear(&mut self) {
        self.unlink_all();
        self.size = 0;
    }

    /// Drops every chain one node at a time, so long chains do not recurse on drop
    fn unlink_all(&mut self) {
        for bucket in &mut self.buckets {
            let mut link = bucket.take();
            while let Some(mut node) = link {
                link = node.next.take();
            }
        }
    }

    /// Returns an iterator over the key-value pairs, in no particular order
    #[must_use]
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter { buckets: self.buckets.iter(), chain: None, remaining: self.size }
    }

    /// Returns an iterator over the keys, in no particular order
    pub fn keys(&self) -> impl Iterator<Item = &K> {
        self.iter().map(|(k, _)| k)
    }

    /// Returns an iterator over the values, in no particular order
    pub fn values(&self) -> impl Iterator<Item = &V> {
        self.iter().map(|(_, v)| v)
    }

    /// Returns the length of every chain, one per bucket
    pub fn chain_lengths(&self) -> impl Iterator<Item = usize> {
        self.buckets.iter().map(|head| chain(head).count())
    }
}

impl<K, V> Drop for ChainedHashMap<K, V> {
    fn drop(&mut self) {
        self.unlink_all();
    }
}

impl<K, V> Clone for ChainedHashMap<K, V>
where
    K: Clone,
    V: Clone,
{
    fn clone(&self) -> Self {
        let buckets = self
            .buckets
            .iter()
            .map(|head| {
                let nodes: Vec<&Node<K, V>> = chain(head).collect();
                nodes.into_iter().rev().fold(None, |next, node| {
                    Some(Box::new(Node { key: node.key.clone(), value: node.value.clone(), next }))
                })
            })
            .collect();

        Self { buckets, size: self.size, load_factor_threshold: self.load_factor_threshold }
    }
}

impl<K, V> fmt::Debug for ChainedHashMap<K, V>
where
    K: fmt::Debug,
    V: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<'a, K, V> IntoIterator for &'a ChainedHashMap<K, V> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Iterator over the key-value pairs of a `ChainedHashMap`
#[derive(Debug, Clone)]
pub struct Iter<'a, K, V> {
    /// Buckets whose chains have not been visited yet
    buckets: slice::Iter<'a, Link<K, V>>,
    /// Remainder of the chain currently being walked
    chain: Option<&'a Node<K, V>>,
    /// Number of entries not yet yielded
    remaining: usize,
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(node) = self.chain {
                self.chain = node.next.as_deref();
                self.remaining = self.remaining.saturating_sub(1);
                return Some((&node.key, &node.value));
            }
            self.chain = self.buckets.next()?.as_deref();
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V> ExactSizeIterator for Iter<'_, K, V> {}
