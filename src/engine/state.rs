//! Filter state owned by a listing view.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

/// Sentinel single-valued selection meaning "no filter".
pub const ALL: &str = "all";

/// The user's current filter selections for one listing view.
///
/// Serializes with camelCase keys (`query`, `singleValued`, `multiValued`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterState {
    /// Free-text search string
    #[serde(default)]
    pub query: String,

    /// Field name to exact value; "all" disables the filter
    #[serde(default)]
    pub single_valued: BTreeMap<String, String>,

    /// Field name to accepted values; an empty set disables the filter
    #[serde(default)]
    pub multi_valued: BTreeMap<String, BTreeSet<String>>,
}

impl FilterState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the free-text query.
    pub fn with_query(mut self, query: impl Into<String>) -> Self {
        self.query = query.into();
        self
    }

    /// Require `field` to equal `value` exactly.
    pub fn with_value(mut self, field: impl Into<String>, value: impl Into<String>) -> Self {
        self.set_value(field, value);
        self
    }

    /// Require `field` to intersect `values`.
    pub fn with_any_of<I, S>(mut self, field: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.multi_valued
            .entry(field.into())
            .or_default()
            .extend(values.into_iter().map(Into::into));
        self
    }

    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
    }

    pub fn set_value(&mut self, field: impl Into<String>, value: impl Into<String>) {
        self.single_valued.insert(field.into(), value.into());
    }

    /// Toggle membership of `value` in a multi-valued selection.
    ///
    /// Returns `true` if the value is selected afterwards.
    pub fn toggle(&mut self, field: &str, value: &str) -> bool {
        let selection = self.multi_valued.entry(field.to_string()).or_default();
        if selection.remove(value) {
            false
        } else {
            selection.insert(value.to_string());
            true
        }
    }

    /// Drop any selection on `field`.
    pub fn clear(&mut self, field: &str) {
        self.single_valued.remove(field);
        self.multi_valued.remove(field);
    }

    /// Reset to the identity state that accepts every record.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// The query as typed, or `None` when it is empty.
    pub fn active_query(&self) -> Option<&str> {
        (!self.query.is_empty()).then_some(self.query.as_str())
    }

    /// Single-valued selections that actually constrain records.
    pub fn active_values(&self) -> impl Iterator<Item = (&str, &str)> {
        self.single_valued
            .iter()
            .filter(|(_, value)| !is_unfiltered(value))
            .map(|(field, value)| (field.as_str(), value.as_str()))
    }

    /// Multi-valued selections that actually constrain records.
    pub fn active_selections(&self) -> impl Iterator<Item = (&str, &BTreeSet<String>)> {
        self.multi_valued
            .iter()
            .filter(|(_, values)| !values.is_empty())
            .map(|(field, values)| (field.as_str(), values))
    }

    /// Whether this state accepts every record.
    pub fn is_default(&self) -> bool {
        self.active_query().is_none()
            && self.active_values().next().is_none()
            && self.active_selections().next().is_none()
    }

    /// Every field name the state refers to.
    pub fn field_names(&self) -> BTreeSet<&str> {
        self.single_valued
            .keys()
            .chain(self.multi_valued.keys())
            .map(String::as_str)
            .collect()
    }
}

fn is_unfiltered(value: &str) -> bool {
    value.eq_ignore_ascii_case(ALL)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_state_is_identity() {
        let state = FilterState::new()
            .with_query("")
            .with_value("status", "all")
            .with_value("department", "All")
            .with_any_of("roomId", Vec::<String>::new());
        assert!(state.is_default());
    }

    #[test]
    fn test_active_parts() {
        let state = FilterState::new()
            .with_query("raj")
            .with_value("status", "Current")
            .with_value("year", "all")
            .with_any_of("activities", ["sports"]);

        assert_eq!(state.active_query(), Some("raj"));
        assert_eq!(
            state.active_values().collect::<Vec<_>>(),
            vec![("status", "Current")]
        );
        assert_eq!(state.active_selections().count(), 1);
        assert!(!state.is_default());
    }

    #[test]
    fn test_query_is_used_as_typed() {
        let state = FilterState::new().with_query("patel ");
        assert_eq!(state.active_query(), Some("patel "));

        let blank = FilterState::new().with_query(" ");
        assert!(!blank.is_default());
    }

    #[test]
    fn test_empty_selection_value_still_filters() {
        let state = FilterState::new().with_value("section", "");
        assert_eq!(state.active_values().collect::<Vec<_>>(), vec![("section", "")]);
    }

    #[test]
    fn test_toggle_and_clear() {
        let mut state = FilterState::new();
        assert!(state.toggle("roomId", "R101"));
        assert!(state.toggle("roomId", "R102"));
        assert!(!state.toggle("roomId", "R101"));
        assert_eq!(state.multi_valued["roomId"].len(), 1);

        state.clear("roomId");
        assert!(state.is_default());
    }

    #[test]
    fn test_deserialize_camel_case_shape() {
        let json = r#"{
            "query": "raj",
            "singleValued": { "status": "Current" },
            "multiValued": { "activities": ["sports", "music"] }
        }"#;
        let state: FilterState = serde_json::from_str(json).unwrap();
        assert_eq!(state.query, "raj");
        assert_eq!(state.single_valued["status"], "Current");
        assert_eq!(state.multi_valued["activities"].len(), 2);

        let empty: FilterState = serde_json::from_str("{}").unwrap();
        assert!(empty.is_default());
    }
}
