//! # Chained Hash Map
//!
//! A Rust implementation of a hash table that resolves collisions by separate chaining.
//!
//! This crate provides:
//!
//! - `ChainedHashMap`: a single-threaded map whose buckets hold singly linked chains and whose
//!   bucket array doubles once the load factor exceeds a configurable threshold
//! - `hashing_problems`: small algorithms (keyed averaging, odd-key filtering and pair
//!   difference counting) written against the `MapLookup` trait
//!
//! ## Basic Usage
//!
//! ```rust
//! use chainmap::ChainedHashMap;
//!
//! // Create a new hash map
//! let mut map = ChainedHashMap::new();
//!
//! // Insert values
//! map.insert("apple".to_string(), 1);
//! map.insert("banana".to_string(), 2);
//!
//! // Retrieve values
//! assert_eq!(map.get("apple"), Some(&1));
//!
//! // Update values, getting the previous one back
//! assert_eq!(map.insert("apple".to_string(), 10), Some(1));
//! assert_eq!(map.get("apple"), Some(&10));
//!
//! // Conditional updates only apply when the current value matches
//! assert!(!map.replace_if_eq("apple", &1, 20));
//! assert!(map.replace_if_eq("apple", &10, 20));
//!
//! // Remove values
//! assert!(!map.remove_if_eq("apple", &10));
//! assert_eq!(map.remove("apple"), Some(20));
//! assert_eq!(map.get("apple"), None);
//! ```
//!
//! ## Configuration
//!
//! ```rust
//! use chainmap::ChainedHashMap;
//!
//! // 4 buckets, doubling once there are more than 3 entries per 4 buckets
//! let mut map = ChainedHashMap::with_config(4, 0.75);
//! for i in 0..4 {
//!     map.insert(i, i * i);
//! }
//! assert_eq!(map.capacity(), 8);
//! assert!(map.load_factor() <= map.load_factor_threshold());
//! ```

/// Module implementing a single-threaded hash map with separate chaining
mod chained_hashmap;
/// Algorithms layered over hash lookups
pub mod hashing_problems;
/// Utility traits for the hash maps
mod utils;

pub use chained_hashmap::{ChainedHashMap, Iter};
pub use utils::MapLookup;
