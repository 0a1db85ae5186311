//! Per-key counts and percentages for summary cards and charts.

use std::collections::{HashMap, HashSet};

use serde::Serialize;
use serde::ser::SerializeMap;

use super::Record;

/// Count and share of one group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GroupStat {
    pub count: usize,
    pub percent: u32,
}

/// Groups in first-seen order.
///
/// Serializes as a JSON object `{key: {count, percent}}` keeping group order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Summary {
    groups: Vec<(String, GroupStat)>,
    total: usize,
    ungrouped: usize,
}

impl Summary {
    /// Number of input records.
    pub fn total(&self) -> usize {
        self.total
    }

    /// Records that produced no key.
    pub fn ungrouped(&self) -> usize {
        self.ungrouped
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    pub fn get(&self, key: &str) -> Option<GroupStat> {
        self.groups
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, stat)| *stat)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, GroupStat)> {
        self.groups.iter().map(|(k, stat)| (k.as_str(), *stat))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.groups.iter().map(|(k, _)| k.as_str())
    }

    /// Sum of all group counts.
    pub fn counted(&self) -> usize {
        self.groups.iter().map(|(_, stat)| stat.count).sum()
    }

    /// Groups ordered by descending count, ties keeping first-seen order.
    pub fn ranked(&self) -> Vec<(&str, GroupStat)> {
        let mut ranked: Vec<_> = self.iter().collect();
        ranked.sort_by(|a, b| b.1.count.cmp(&a.1.count));
        ranked
    }
}

impl Serialize for Summary {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.groups.len()))?;
        for (key, stat) in &self.groups {
            map.serialize_entry(key, stat)?;
        }
        map.end()
    }
}

/// `count / total * 100`, rounded half up. Zero total gives zero.
pub fn percent_of(count: usize, total: usize) -> u32 {
    if total == 0 {
        return 0;
    }
    let scaled = count as u128 * 100;
    let total = total as u128;
    ((scaled * 2 + total) / (total * 2)) as u32
}

/// Group records by the keys `key_fn` yields.
///
/// A record yielding several keys is counted once under each distinct key; a
/// record yielding none is counted as ungrouped.
pub fn aggregate<R, K, I, F>(records: &[R], key_fn: F) -> Summary
where
    F: Fn(&R) -> I,
    I: IntoIterator<Item = K>,
    K: Into<String>,
{
    let mut order: Vec<String> = Vec::new();
    let mut counts: HashMap<String, usize> = HashMap::new();
    let mut ungrouped = 0;

    for record in records {
        let mut seen: HashSet<String> = HashSet::new();
        for key in key_fn(record) {
            let key: String = key.into();
            if !seen.insert(key.clone()) {
                continue;
            }
            match counts.get_mut(&key) {
                Some(count) => *count += 1,
                None => {
                    counts.insert(key.clone(), 1);
                    order.push(key);
                }
            }
        }
        if seen.is_empty() {
            ungrouped += 1;
        }
    }

    let total = records.len();
    let groups = order
        .into_iter()
        .map(|key| {
            let count = counts.get(&key).copied().unwrap_or_default();
            let stat = GroupStat {
                count,
                percent: percent_of(count, total),
            };
            (key, stat)
        })
        .collect();

    Summary {
        groups,
        total,
        ungrouped,
    }
}

/// Group records by a named field.
pub fn aggregate_by_field<R: Record>(records: &[R], field: &str) -> Summary {
    aggregate(records, |record| {
        record
            .field(field)
            .map(|value| value.values().map(str::to_string).collect::<Vec<_>>())
            .unwrap_or_default()
    })
}
