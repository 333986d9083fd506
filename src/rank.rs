use std::cmp::Ordering;

/// Stable descending sort by aggregate value, truncated to `limit`.
///
/// Ties keep their first-seen order because the sort is stable and the input
/// arrives in encounter order. The input is left untouched.
pub fn rank_desc<K: Clone>(entries: &[(K, f64)], limit: Option<usize>) -> Vec<(K, f64)> {
    let mut ranked = entries.to_vec();
    ranked.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(Ordering::Equal));
    if let Some(n) = limit {
        ranked.truncate(n);
    }
    ranked
}

/// Ascending sort by key, keeping only a prefix of the sorted sequence.
///
/// Used by the chronological views, where the cap is a prefix of the year
/// axis rather than a value-based top-N.
pub fn sort_asc_prefix<K, V>(entries: &[(K, V)], limit: Option<usize>) -> Vec<(K, V)>
where
    K: Ord + Clone,
    V: Clone,
{
    let mut sorted = entries.to_vec();
    sorted.sort_by(|a, b| a.0.cmp(&b.0));
    if let Some(n) = limit {
        sorted.truncate(n);
    }
    sorted
}
