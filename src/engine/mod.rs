//! Generic filter/search engine shared by every listing page.
//!
//! - `FilterState`: the user's current selections
//! - `Predicate`: compiled form of a filter state
//! - `filter`: stable, order-preserving record filtering
//! - `aggregate` / `aggregate_by_field`: per-key counts and percentages
//! - `sort_records` / `paginate`: table presentation helpers
//! - `SearchIndex`: cross-entity token index for the global search box
//!
//! Every record type plugs in through the [`Record`] trait.

mod aggregate;
mod filterer;
mod index;
mod page;
mod predicate;
mod sort;
mod state;

use std::borrow::Cow;

pub use aggregate::{GroupStat, Summary, aggregate, aggregate_by_field, percent_of};
pub use filterer::{Filtered, filter};
pub use index::{IndexConfig, RecordRef, SearchIndex, SearchIndexBuilder};
pub use page::{Page, Paged, paginate};
pub use predicate::Predicate;
pub use sort::{SortOrder, sort_records};
pub use state::{ALL, FilterState};

/// The value of a single record field as seen by the engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue<'a> {
    /// A scalar value (names, ids, enum labels, numbers rendered as text)
    Text(Cow<'a, str>),
    /// A multi-valued field such as activity tags
    List(Vec<Cow<'a, str>>),
}

impl<'a> FieldValue<'a> {
    /// Borrowed text value.
    pub fn text(value: &'a str) -> Self {
        Self::Text(Cow::Borrowed(value))
    }

    /// Owned text value, for fields rendered on the fly (numbers, dates).
    pub fn owned(value: impl Into<String>) -> Self {
        Self::Text(Cow::Owned(value.into()))
    }

    /// List value borrowed from a slice of strings.
    pub fn list(values: &'a [String]) -> Self {
        Self::List(values.iter().map(|v| Cow::Borrowed(v.as_str())).collect())
    }

    /// Iterate over every value held by this field.
    pub fn values(&self) -> Box<dyn Iterator<Item = &str> + '_> {
        match self {
            Self::Text(value) => Box::new(std::iter::once(value.as_ref())),
            Self::List(values) => Box::new(values.iter().map(|v| v.as_ref())),
        }
    }

    /// Render the field for display; lists are comma-joined.
    pub fn display(&self) -> String {
        self.values().collect::<Vec<_>>().join(", ")
    }
}

/// A record that can be filtered, searched, sorted and aggregated.
///
/// Field names are the dataset's camelCase keys (`rollNo`, `facultyId`, ...).
pub trait Record {
    /// Entity label used in search references and log output.
    const ENTITY: &'static str;

    /// Every field name `field` answers for.
    const FIELDS: &'static [&'static str];

    /// Fields the free-text query is matched against.
    const SEARCHABLE: &'static [&'static str];

    /// Record identity.
    fn id(&self) -> &str;

    /// Look up a field by name. `None` for absent values and unknown names.
    fn field(&self, name: &str) -> Option<FieldValue<'_>>;

    /// Whether `name` is one of this record type's fields.
    fn has_field(name: &str) -> bool {
        Self::FIELDS.contains(&name)
    }
}

impl<R: Record> Record for &R {
    const ENTITY: &'static str = R::ENTITY;
    const FIELDS: &'static [&'static str] = R::FIELDS;
    const SEARCHABLE: &'static [&'static str] = R::SEARCHABLE;

    fn id(&self) -> &str {
        (**self).id()
    }

    fn field(&self, name: &str) -> Option<FieldValue<'_>> {
        (**self).field(name)
    }
}

#[cfg(test)]
pub(crate) mod testing {
    //! Minimal record type for engine tests.

    use super::{FieldValue, Record};

    #[derive(Debug, Clone, PartialEq)]
    pub struct Item {
        pub id: String,
        pub name: String,
        pub dept: Option<String>,
        pub tags: Vec<String>,
        pub score: Option<u32>,
    }

    pub fn item(id: &str, name: &str, dept: Option<&str>, tags: &[&str]) -> Item {
        Item {
            id: id.to_string(),
            name: name.to_string(),
            dept: dept.map(str::to_string),
            tags: tags.iter().map(|t| t.to_string()).collect(),
            score: None,
        }
    }

    impl Record for Item {
        const ENTITY: &'static str = "item";
        const FIELDS: &'static [&'static str] = &["id", "name", "dept", "tags", "score"];
        const SEARCHABLE: &'static [&'static str] = &["name", "id"];

        fn id(&self) -> &str {
            &self.id
        }

        fn field(&self, name: &str) -> Option<FieldValue<'_>> {
            match name {
                "id" => Some(FieldValue::text(&self.id)),
                "name" => Some(FieldValue::text(&self.name)),
                "dept" => self.dept.as_deref().map(FieldValue::text),
                "tags" => Some(FieldValue::list(&self.tags)),
                "score" => self.score.map(|s| FieldValue::owned(s.to_string())),
                _ => None,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_value_display() {
        let tags = vec!["sports".to_string(), "music".to_string()];
        assert_eq!(FieldValue::list(&tags).display(), "sports, music");
        assert_eq!(FieldValue::text("CSE").display(), "CSE");
    }

    #[test]
    fn test_has_field() {
        assert!(testing::Item::has_field("dept"));
        assert!(!testing::Item::has_field("department"));
    }
}
