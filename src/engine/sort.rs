//! Column sorting for filtered tables.

use std::cmp::Ordering;

use super::Record;

/// Sort column and direction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortOrder {
    pub field: String,
    pub descending: bool,
}

impl SortOrder {
    pub fn ascending(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            descending: false,
        }
    }

    pub fn descending(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            descending: true,
        }
    }
}

/// Stable sort by one field.
///
/// Finite numbers sort numerically and before any text; text compares
/// lowercased. Records without the field go last in either direction.
pub fn sort_records<R: Record>(records: &mut [&R], order: &SortOrder) {
    records.sort_by_cached_key(|record| {
        let key = record.field(&order.field).map(|v| SortKey::new(&v.display()));
        (key.is_none(), Directed(key, order.descending))
    });
}

/// Totally ordered sort value.
#[derive(Debug, Clone)]
enum SortKey {
    Number(f64),
    Text(String),
}

impl SortKey {
    fn new(value: &str) -> Self {
        match value.trim().parse::<f64>() {
            Ok(n) if n.is_finite() => SortKey::Number(n),
            _ => SortKey::Text(value.to_lowercase()),
        }
    }
}

impl PartialEq for SortKey {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for SortKey {}

impl PartialOrd for SortKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for SortKey {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (SortKey::Number(l), SortKey::Number(r)) => l.total_cmp(r),
            (SortKey::Number(_), SortKey::Text(_)) => Ordering::Less,
            (SortKey::Text(_), SortKey::Number(_)) => Ordering::Greater,
            (SortKey::Text(l), SortKey::Text(r)) => l.cmp(r),
        }
    }
}

/// A key plus direction; `true` reverses.
#[derive(Debug, PartialEq, Eq)]
struct Directed(Option<SortKey>, bool);

impl PartialOrd for Directed {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Directed {
    fn cmp(&self, other: &Self) -> Ordering {
        let ordering = self.0.cmp(&other.0);
        if self.1 { ordering.reverse() } else { ordering }
    }
}
