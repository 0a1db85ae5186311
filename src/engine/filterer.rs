//! Stable record filtering.

use serde::Serialize;

use super::{Predicate, Record};

/// Records that passed a predicate, in their original order.
#[derive(Debug, Clone)]
pub struct Filtered<'a, R> {
    /// Matching records
    pub records: Vec<&'a R>,
    /// Number of records the predicate was evaluated against
    pub scanned: usize,
}

impl<'a, R> Filtered<'a, R> {
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// True when nothing matched; callers render their empty state.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Clone the matching records out.
    pub fn to_owned_records(&self) -> Vec<R>
    where
        R: Clone,
    {
        self.records.iter().map(|r| (*r).clone()).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &'a R> + '_ {
        self.records.iter().copied()
    }
}

impl<R: Serialize> Serialize for Filtered<'_, R> {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.records.iter())
    }
}

/// Keep the records the predicate accepts, preserving relative order.
pub fn filter<'a, R: Record>(records: &'a [R], predicate: &Predicate) -> Filtered<'a, R> {
    let matched: Vec<&R> = if predicate.accepts_all() {
        records.iter().collect()
    } else {
        records.iter().filter(|r| predicate.matches(*r)).collect()
    };

    log::debug!(
        "Filtered {} {} record(s) down to {}",
        records.len(),
        R::ENTITY,
        matched.len()
    );

    Filtered {
        records: matched,
        scanned: records.len(),
    }
}
