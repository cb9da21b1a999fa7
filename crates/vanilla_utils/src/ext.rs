//! Opt-in method syntax over the free functions in [`crate::arrays`].
//!
//! Nothing here changes how slices behave until the traits are brought into scope.

use std::hash::Hash;

use indexmap::IndexMap;

use crate::arrays;

/// Aggregates over `f64` slices.
pub trait NumericSliceExt {
    /// See [`arrays::sum`].
    fn sum_values(&self) -> f64;
    /// See [`arrays::max`].
    fn max_value(&self) -> f64;
    /// See [`arrays::min`].
    fn min_value(&self) -> f64;
}

impl NumericSliceExt for [f64] {
    fn sum_values(&self) -> f64 {
        arrays::sum(self)
    }

    fn max_value(&self) -> f64 {
        arrays::max(self)
    }

    fn min_value(&self) -> f64 {
        arrays::min(self)
    }
}

/// Grouping over any cloneable slice.
pub trait GroupByExt<T> {
    /// See [`arrays::group_by`].
    fn group_by_key<K, F>(&self, key: F) -> IndexMap<K, Vec<T>>
    where
        K: Hash + Eq,
        F: Fn(&T) -> K;
}

impl<T: Clone> GroupByExt<T> for [T] {
    fn group_by_key<K, F>(&self, key: F) -> IndexMap<K, Vec<T>>
    where
        K: Hash + Eq,
        F: Fn(&T) -> K,
    {
        arrays::group_by(self, key)
    }
}
