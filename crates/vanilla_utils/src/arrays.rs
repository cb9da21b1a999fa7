//! Slice helpers: aggregates, grouping, de-duplication, chunking, flattening and shuffling.
//!
//! Every helper returns a new collection and leaves its input untouched.

use std::{collections::HashSet, hash::Hash};

use indexmap::IndexMap;
use serde_json::Value;

use crate::random::random_index;

/// Sum of all values; `0.0` for an empty slice.
pub fn sum(values: &[f64]) -> f64 {
    values.iter().sum()
}

/// Largest value; negative infinity for an empty slice.
pub fn max(values: &[f64]) -> f64 {
    values.iter().copied().fold(f64::NEG_INFINITY, f64::max)
}

/// Smallest value; positive infinity for an empty slice.
pub fn min(values: &[f64]) -> f64 {
    values.iter().copied().fold(f64::INFINITY, f64::min)
}

/// Buckets values by a derived key.
///
/// Buckets appear in first-seen key order and keep the input order inside each bucket.
pub fn group_by<T, K, F>(values: &[T], key: F) -> IndexMap<K, Vec<T>>
where
    T: Clone,
    K: Hash + Eq,
    F: Fn(&T) -> K,
{
    let mut groups: IndexMap<K, Vec<T>> = IndexMap::new();
    for value in values {
        groups.entry(key(value)).or_default().push(value.clone());
    }
    groups
}

/// Drops repeated values, keeping the first occurrence of each.
pub fn unique<T: Clone + Eq + Hash>(values: &[T]) -> Vec<T> {
    unique_by(values, |value| value.clone())
}

/// Drops values whose derived key was already seen; the first occurrence wins.
pub fn unique_by<T, K, F>(values: &[T], key: F) -> Vec<T>
where
    T: Clone,
    K: Hash + Eq,
    F: Fn(&T) -> K,
{
    let mut seen = HashSet::new();
    values
        .iter()
        .filter(|value| seen.insert(key(value)))
        .cloned()
        .collect()
}

/// Splits into consecutive chunks of `size`; the last chunk may be shorter.
///
/// A `size` of zero yields no chunks.
pub fn chunk<T: Clone>(values: &[T], size: usize) -> Vec<Vec<T>> {
    if size == 0 {
        return Vec::new();
    }
    values.chunks(size).map(<[T]>::to_vec).collect()
}

/// Flattens nested JSON arrays up to `depth` levels.
pub fn flatten(values: &[Value], depth: usize) -> Vec<Value> {
    let mut flat = Vec::with_capacity(values.len());
    flatten_into(values, depth, &mut flat);
    flat
}

/// Flattens nested JSON arrays at every depth.
pub fn flatten_deep(values: &[Value]) -> Vec<Value> {
    flatten(values, usize::MAX)
}

fn flatten_into(values: &[Value], depth: usize, out: &mut Vec<Value>) {
    for value in values {
        match value {
            Value::Array(inner) if depth > 0 => flatten_into(inner, depth - 1, out),
            other => out.push(other.clone()),
        }
    }
}

/// Returns a Fisher-Yates shuffled copy.
pub fn shuffle<T: Clone>(values: &[T]) -> Vec<T> {
    let mut shuffled = values.to_vec();
    for index in (1..shuffled.len()).rev() {
        let other = random_index(index + 1);
        shuffled.swap(index, other);
    }
    shuffled
}

/// Splits into `(matching, rest)`, preserving relative order on both sides.
pub fn partition<T, F>(values: &[T], predicate: F) -> (Vec<T>, Vec<T>)
where
    T: Clone,
    F: Fn(&T) -> bool,
{
    values.iter().cloned().partition(|value| predicate(value))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    #[test]
    fn aggregates_and_empty_edges() {
        assert_eq!(sum(&[1.0, 2.0, 3.0]), 6.0);
        assert_eq!(max(&[1.0, 2.0, 3.0]), 3.0);
        assert_eq!(min(&[1.0, 2.0, 3.0]), 1.0);
        assert_eq!(sum(&[]), 0.0);
        assert_eq!(max(&[]), f64::NEG_INFINITY);
        assert_eq!(min(&[]), f64::INFINITY);
    }

    #[test]
    fn group_by_keeps_insertion_order() {
        let groups = group_by(&[1.1, 1.2, 2.1], |value: &f64| value.floor() as i64);
        let buckets: Vec<_> = groups.into_iter().collect();
        assert_eq!(buckets, vec![(1, vec![1.1, 1.2]), (2, vec![2.1])]);

        let words = group_by(&["bb", "a", "cc", "d"], |word| word.len());
        assert_eq!(words.keys().copied().collect::<Vec<_>>(), vec![2, 1]);
    }

    #[test]
    fn unique_and_unique_by_keep_first_occurrence() {
        assert_eq!(unique(&[1, 2, 2, 3, 1]), vec![1, 2, 3]);
        assert_eq!(unique::<i32>(&[]), Vec::<i32>::new());

        let rows = [(1, "first"), (1, "second"), (2, "third")];
        assert_eq!(
            unique_by(&rows, |(id, _)| *id),
            vec![(1, "first"), (2, "third")]
        );
    }

    #[test]
    fn chunk_allows_trailing_partial() {
        assert_eq!(
            chunk(&[1, 2, 3, 4, 5], 2),
            vec![vec![1, 2], vec![3, 4], vec![5]]
        );
        assert_eq!(chunk::<i32>(&[], 2), Vec::<Vec<i32>>::new());
        assert_eq!(chunk(&[1, 2], 0), Vec::<Vec<i32>>::new());
    }

    #[test]
    fn flatten_respects_depth() {
        let nested = [json!([1, 2]), json!([3, [4]])];
        assert_eq!(flatten(&nested, 1), vec![json!(1), json!(2), json!(3), json!([4])]);
        assert_eq!(flatten(&nested, 2), vec![json!(1), json!(2), json!(3), json!(4)]);
        assert_eq!(flatten(&nested, 0), nested.to_vec());
        assert_eq!(
            flatten_deep(&[json!([1, [2, [3, [4]]]])]),
            vec![json!(1), json!(2), json!(3), json!(4)]
        );
    }

    #[test]
    fn shuffle_is_a_permutation_and_leaves_input_alone() {
        let input = [1, 2, 3, 4, 5];
        let mut shuffled = shuffle(&input);
        assert_eq!(shuffled.len(), 5);
        shuffled.sort_unstable();
        assert_eq!(shuffled, input.to_vec());
        assert_eq!(input, [1, 2, 3, 4, 5]);
        assert_eq!(shuffle::<u8>(&[]), Vec::<u8>::new());
    }

    #[test]
    fn partition_is_stable() {
        assert_eq!(
            partition(&[1, 2, 3, 4], |value| value % 2 == 0),
            (vec![2, 4], vec![1, 3])
        );
    }
}
