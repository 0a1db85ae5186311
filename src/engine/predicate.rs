//! Compiling a filter state into a record predicate.

use std::collections::BTreeSet;

use super::{FilterState, Record};

/// A compiled filter state.
///
/// A record passes when it satisfies the query, every exact-value selection
/// and every any-of selection. Missing fields never match.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Predicate {
    needle: Option<String>,
    equals: Vec<(String, String)>,
    any_of: Vec<(String, BTreeSet<String>)>,
}

impl Predicate {
    /// Build the predicate for the given state.
    pub fn from_state(state: &FilterState) -> Self {
        Self {
            needle: state.active_query().map(str::to_lowercase),
            equals: state
                .active_values()
                .map(|(field, value)| (field.to_string(), value.to_string()))
                .collect(),
            any_of: state
                .active_selections()
                .map(|(field, values)| (field.to_string(), values.clone()))
                .collect(),
        }
    }

    /// Whether this predicate accepts every record.
    pub fn accepts_all(&self) -> bool {
        self.needle.is_none() && self.equals.is_empty() && self.any_of.is_empty()
    }

    /// Check a single record.
    pub fn matches<R: Record + ?Sized>(&self, record: &R) -> bool {
        if let Some(needle) = &self.needle {
            if !Self::matches_query(record, needle) {
                return false;
            }
        }
        for (field, expected) in &self.equals {
            let Some(value) = record.field(field) else {
                return false;
            };
            if !value.values().any(|v| v == expected.as_str()) {
                return false;
            }
        }
        for (field, accepted) in &self.any_of {
            let Some(value) = record.field(field) else {
                return false;
            };
            if !value.values().any(|v| accepted.contains(v)) {
                return false;
            }
        }
        true
    }

    /// Turn the predicate into a plain closure.
    pub fn into_fn<R: Record>(self) -> impl Fn(&R) -> bool {
        move |record: &R| self.matches(record)
    }

    fn matches_query<R: Record + ?Sized>(record: &R, needle: &str) -> bool {
        R::SEARCHABLE.iter().any(|name| {
            record
                .field(name)
                .is_some_and(|value| value.values().any(|v| v.to_lowercase().contains(needle)))
        })
    }
}

impl From<&FilterState> for Predicate {
    fn from(state: &FilterState) -> Self {
        Self::from_state(state)
    }
}
