use std::collections::HashMap;
use std::hash::Hash;

use crate::record::{NumericField, Record};

/// How a group of records collapses into one value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reducer {
    /// Group size.
    Count,
    /// Arithmetic sum of a numeric field; absent values contribute nothing.
    Sum(NumericField),
    /// Arithmetic mean over the present values of a numeric field.
    ///
    /// A group where no record carries the field is omitted from the output
    /// entirely, so rankings never compare against an undefined mean.
    Mean(NumericField),
}

#[derive(Debug, Default)]
struct Accumulator {
    count: u64,
    sum: f64,
    contributing: u64,
}

/// Partition records by a key and reduce each partition.
///
/// `key_fn` returning `None` drops the record from this grouping; callers that
/// bucket absent values substitute their sentinel before returning a key.
/// Output keys appear in first-seen order, which downstream ranking relies on
/// for stable tie-breaking.
pub fn group_by<K, F>(records: &[&Record], key_fn: F, reducer: Reducer) -> Vec<(K, f64)>
where
    K: Eq + Hash + Clone,
    F: Fn(&Record) -> Option<K>,
{
    let mut order: Vec<K> = Vec::new();
    let mut groups: HashMap<K, Accumulator> = HashMap::new();

    for &record in records {
        let Some(key) = key_fn(record) else { continue };

        // Track key order (first appearance)
        if !groups.contains_key(&key) {
            order.push(key.clone());
        }
        let entry = groups.entry(key).or_default();

        entry.count += 1;
        if let Reducer::Sum(field) | Reducer::Mean(field) = reducer {
            if let Some(value) = record.numeric(field) {
                entry.sum += value;
                entry.contributing += 1;
            }
        }
    }

    order
        .into_iter()
        .filter_map(|key| {
            let acc = &groups[&key];
            let value = match reducer {
                Reducer::Count => acc.count as f64,
                Reducer::Sum(_) => acc.sum,
                Reducer::Mean(_) => {
                    if acc.contributing == 0 {
                        return None;
                    }
                    acc.sum / acc.contributing as f64
                }
            };
            Some((key, value))
        })
        .collect()
}
