//! Deduplication of attribute values into a pool of unique values.
//!
//! Writers that share normals or UVs between faces run two passes over the
//! mesh: the first inserts every referenced value, the second resolves each
//! reference against the finished pool with `insert_if_missing == false`.
//! Because the pool is complete before the second pass starts, indices handed
//! out during resolution always agree with the order values were written.

use std::collections::HashMap;
use std::hash::Hash;

use num_traits::Float;

/// A value that can be deduplicated by exact equality.
///
/// The key must be equal for two values exactly when the values compare
/// equal, so floating point values are keyed by their decoded bit patterns.
pub trait AttributeValue: Copy + PartialEq {
    type Key: Hash + Eq;

    fn attribute_key(&self) -> Self::Key;
}

impl<T: Float, const N: usize> AttributeValue for [T; N] {
    type Key = [(u64, i16, i8); N];

    fn attribute_key(&self) -> Self::Key {
        // Adding zero folds -0.0 onto 0.0 so both share one entry.
        self.map(|c| (c + T::zero()).integer_decode())
    }
}

/// Pool of unique attribute values with stable index lookup.
#[derive(Debug, Clone)]
pub struct AttributeCompressor<T: AttributeValue> {
    unique_values: Vec<T>,
    index_map: HashMap<T::Key, usize>,
}

impl<T: AttributeValue> Default for AttributeCompressor<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: AttributeValue> AttributeCompressor<T> {
    pub fn new() -> Self {
        Self {
            unique_values: Vec::new(),
            index_map: HashMap::new(),
        }
    }

    /// Appends `value` to the pool unless an equal value is already present.
    pub fn insert_value(&mut self, value: T) {
        self.get_index_for_value(value, true);
    }

    /// Returns the index of the value equal to `value`.
    ///
    /// When no such value exists it is appended if `insert_if_missing` is
    /// set, otherwise `None` is returned.
    pub fn get_index_for_value(&mut self, value: T, insert_if_missing: bool) -> Option<usize> {
        let key = value.attribute_key();
        if let Some(&index) = self.index_map.get(&key) {
            return Some(index);
        }
        if !insert_if_missing {
            return None;
        }
        let index = self.unique_values.len();
        self.unique_values.push(value);
        self.index_map.insert(key, index);
        Some(index)
    }

    /// Looks up `value` without modifying the pool.
    pub fn find_index(&self, value: &T) -> Option<usize> {
        self.index_map.get(&value.attribute_key()).copied()
    }

    pub fn unique_values(&self) -> &[T] {
        &self.unique_values
    }

    pub fn len(&self) -> usize {
        self.unique_values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.unique_values.is_empty()
    }

    /// Consumes the compressor, returning the unique values in insertion order.
    pub fn into_unique_values(self) -> Vec<T> {
        self.unique_values
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_duplicate_values_share_an_entry() {
        let mut compressor = AttributeCompressor::<[f64; 3]>::new();
        compressor.insert_value([0.0, 0.0, 1.0]);
        compressor.insert_value([1.0, 0.0, 0.0]);
        compressor.insert_value([0.0, 0.0, 1.0]);

        assert_eq!(compressor.len(), 2);
        assert_eq!(compressor.unique_values(), &[[0.0, 0.0, 1.0], [1.0, 0.0, 0.0]]);
        assert_eq!(compressor.get_index_for_value([0.0, 0.0, 1.0], false), Some(0));
        assert_eq!(compressor.get_index_for_value([1.0, 0.0, 0.0], false), Some(1));
    }

    #[test]
    fn test_lookup_without_insert() {
        let mut compressor = AttributeCompressor::<[f32; 2]>::new();
        compressor.insert_value([0.5, 0.5]);

        assert_eq!(compressor.get_index_for_value([0.25, 0.5], false), None);
        assert_eq!(compressor.len(), 1);

        assert_eq!(compressor.get_index_for_value([0.25, 0.5], true), Some(1));
        assert_eq!(compressor.len(), 2);
    }

    #[test]
    fn test_equality_is_exact() {
        let mut compressor = AttributeCompressor::<[f64; 2]>::new();
        compressor.insert_value([0.1, 0.2]);
        compressor.insert_value([0.1 + 1e-12, 0.2]);
        assert_eq!(compressor.len(), 2);
    }

    #[test]
    fn test_negative_zero_matches_zero() {
        let mut compressor = AttributeCompressor::<[f64; 3]>::new();
        compressor.insert_value([0.0, 0.0, 1.0]);
        assert_eq!(compressor.find_index(&[-0.0, 0.0, 1.0]), Some(0));
    }

    proptest! {
        #[test]
        fn prop_pool_holds_each_value_once(values in proptest::collection::vec((0u8..4, 0u8..4), 0..64)) {
            let values: Vec<[f64; 2]> = values
                .into_iter()
                .map(|(u, v)| [f64::from(u) * 0.25, f64::from(v) * 0.25])
                .collect();

            let mut compressor = AttributeCompressor::new();
            for v in &values {
                compressor.insert_value(*v);
            }

            let pool = compressor.unique_values().to_vec();
            for (i, a) in pool.iter().enumerate() {
                for b in &pool[i + 1..] {
                    prop_assert_ne!(a, b);
                }
            }
            for v in &values {
                let index = compressor.get_index_for_value(*v, false);
                prop_assert!(index.is_some());
                prop_assert_eq!(pool[index.unwrap_or_default()], *v);
            }
            prop_assert_eq!(compressor.len(), pool.len());
        }
    }
}
