use std::collections::BTreeMap;

/// Count records per key, ascending by key.
pub fn count_by<R, K, F>(records: &[R], key: F) -> Vec<(K, usize)>
where
    K: Ord,
    F: Fn(&R) -> K,
{
    let mut counts: BTreeMap<K, usize> = BTreeMap::new();
    for r in records {
        *counts.entry(key(r)).or_default() += 1;
    }
    counts.into_iter().collect()
}
