//! News items and campus events.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::engine::{FieldValue, Record};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NewsStatus {
    Published,
    Upcoming,
}

impl NewsStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            NewsStatus::Published => "Published",
            NewsStatus::Upcoming => "Upcoming",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NewsKind {
    News,
    Event,
}

impl NewsKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            NewsKind::News => "News",
            NewsKind::Event => "Event",
        }
    }
}

/// A news post or an event announcement.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewsEvent {
    pub id: String,

    pub title: String,

    #[serde(default)]
    pub description: String,

    pub date: NaiveDate,

    pub status: NewsStatus,

    #[serde(rename = "type")]
    pub kind: NewsKind,

    /// Free-form category (e.g., "Academic", "Sports", "Cultural")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

impl NewsEvent {
    /// Events dated on or after `today`.
    pub fn is_upcoming_event(&self, today: NaiveDate) -> bool {
        self.kind == NewsKind::Event && self.date >= today
    }
}

impl Record for NewsEvent {
    const ENTITY: &'static str = "news";
    const FIELDS: &'static [&'static str] =
        &["id", "title", "description", "date", "status", "type", "category"];
    const SEARCHABLE: &'static [&'static str] = &["title", "id"];

    fn id(&self) -> &str {
        &self.id
    }

    fn field(&self, name: &str) -> Option<FieldValue<'_>> {
        match name {
            "id" => Some(FieldValue::text(&self.id)),
            "title" => Some(FieldValue::text(&self.title)),
            "description" => Some(FieldValue::text(&self.description)),
            "date" => Some(FieldValue::owned(self.date.format("%Y-%m-%d").to_string())),
            "status" => Some(FieldValue::text(self.status.as_str())),
            "type" => Some(FieldValue::text(self.kind.as_str())),
            "category" => self.category.as_deref().map(FieldValue::text),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_type_key_and_date() {
        let item: NewsEvent = serde_json::from_str(
            r#"{
                "id": "N001",
                "title": "Annual Sports Meet",
                "date": "2024-02-15",
                "status": "Upcoming",
                "type": "Event",
                "category": "Sports"
            }"#,
        )
        .unwrap();
        assert_eq!(item.kind, NewsKind::Event);
        assert_eq!(item.field("type").unwrap().display(), "Event");
        assert_eq!(item.field("date").unwrap().display(), "2024-02-15");

        let before = NaiveDate::from_ymd_opt(2024, 2, 1).unwrap();
        let after = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        assert!(item.is_upcoming_event(before));
        assert!(!item.is_upcoming_event(after));
    }
}
