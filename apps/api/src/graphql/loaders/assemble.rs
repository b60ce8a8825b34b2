//! Re-association of fetched rows to requested keys
//!
//! A store query returns rows in whatever order it likes and omits keys with
//! no rows. These helpers rebuild the one-entry-per-key result that
//! [`BatchFetch`](super::BatchFetch) requires.

use std::collections::HashMap;
use std::hash::Hash;

/// One row per key by primary key; keys without a row map to `None`
pub fn index_by<K, V>(keys: &[K], rows: Vec<V>, key_of: impl Fn(&V) -> K) -> Vec<Option<V>>
where
    K: Eq + Hash,
{
    let mut by_key: HashMap<K, V> = rows.into_iter().map(|row| (key_of(&row), row)).collect();
    keys.iter().map(|key| by_key.remove(key)).collect()
}

/// All rows per key by foreign key; keys without rows get an empty group
pub fn group_by<K, V>(keys: &[K], rows: Vec<V>, key_of: impl Fn(&V) -> K) -> Vec<Option<Vec<V>>>
where
    K: Eq + Hash + Clone,
{
    let mut groups: HashMap<K, Vec<V>> = keys.iter().map(|key| (key.clone(), Vec::new())).collect();
    for row in rows {
        if let Some(group) = groups.get_mut(&key_of(&row)) {
            group.push(row);
        }
    }
    keys.iter()
        .map(|key| Some(groups.remove(key).unwrap_or_default()))
        .collect()
}

/// Aggregate per key; keys absent from `counts` count zero
pub fn counts_for<K>(keys: &[K], counts: Vec<(K, i64)>) -> Vec<Option<i64>>
where
    K: Eq + Hash,
{
    let counts: HashMap<K, i64> = counts.into_iter().collect();
    keys.iter()
        .map(|key| Some(counts.get(key).copied().unwrap_or(0)))
        .collect()
}
