//! Small algorithms built on top of hash lookups.
//!
//! Each routine only looks keys up, tests membership or walks the entries, so they accept
//! anything implementing [`MapLookup`].

use crate::{ChainedHashMap, utils::MapLookup};

/// Averages the values of every key in `keys` that is present in `map`.
///
/// Each occurrence in `keys` counts, so a key listed twice contributes its value twice.
/// Returns `NaN` when none of the keys are present.
///
/// ```rust
/// use chainmap::{ChainedHashMap, hashing_problems::average_of_present};
///
/// let map: ChainedHashMap<i32, i32> = [(1, 10), (2, 20), (7, 99)].into_iter().collect();
/// assert!((average_of_present(&map, &[1, 2, 7, 8]) - 43.0).abs() < f64::EPSILON);
/// assert!(average_of_present(&map, &[8, 9]).is_nan());
/// ```
pub fn average_of_present<M>(map: &M, keys: &[i32]) -> f64
where
    M: MapLookup<i32, i32> + ?Sized,
{
    let (sum, count) = keys
        .iter()
        .filter_map(|key| map.lookup(key))
        .fold((0.0_f64, 0_u32), |(sum, count), &value| {
            (sum + f64::from(value), count.saturating_add(1))
        });

    if count == 0 { f64::NAN } else { sum / f64::from(count) }
}

/// Returns true if `n` is odd, negative numbers included
const fn is_odd(n: i32) -> bool {
    n.rem_euclid(2) == 1
}

/// Collects the values whose key is odd, in the map's iteration order
pub fn odd_key_values<V, M>(map: &M) -> Vec<V>
where
    V: Clone,
    M: MapLookup<i32, V> + ?Sized,
{
    map.entries().filter(|(key, _)| is_odd(**key)).map(|(_, value)| value.clone()).collect()
}

/// Counts pairs whose difference is `k` in a single forward pass.
///
/// Every value is checked against the distinct values seen before it: once for
/// `value - k` and once for `value + k`, and only then recorded as seen. Repeated
/// values are therefore only matched against earlier distinct values, and with
/// `k == 0` each repeat of an already seen value counts twice.
///
/// ```rust
/// use chainmap::hashing_problems::count_pair_differences;
///
/// assert_eq!(count_pair_differences(&[1, 4, 5, 7, 8, 9], 4), 3);
/// ```
// operands are widened from i32, so the i64 arithmetic cannot overflow
#[allow(clippy::arithmetic_side_effects)]
pub fn count_pair_differences(numbers: &[i32], k: i32) -> usize {
    let mut seen: ChainedHashMap<i64, ()> = ChainedHashMap::new();
    let k = i64::from(k);
    let mut count: usize = 0;

    for &number in numbers {
        let number = i64::from(number);
        if seen.contains_key(&(number - k)) {
            count = count.saturating_add(1);
        }
        if seen.contains_key(&(number + k)) {
            count = count.saturating_add(1);
        }
        seen.insert(number, ());
    }

    count
}
