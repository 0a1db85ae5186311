//! Faculty records with their optional academic history.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::engine::{FieldValue, Record};

/// Employment status of a faculty member.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FacultyStatus {
    Active,
    Inactive,
}

impl FacultyStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            FacultyStatus::Active => "Active",
            FacultyStatus::Inactive => "Inactive",
        }
    }
}

/// A faculty member.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Faculty {
    pub id: String,

    pub name: String,

    /// Staff code shown on the faculty card (e.g., "FAC-CSE-07")
    pub faculty_id: String,

    pub department: String,

    /// Highest qualification (e.g., "Ph.D", "M.Tech")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub qualification: Option<String>,

    pub status: FacultyStatus,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub designation: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub degrees: Vec<Degree>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub research: Vec<Research>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub patents: Vec<Patent>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub leave: Vec<LeaveRecord>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Degree {
    pub degree: String,
    pub institution: String,
    pub year: u16,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Research {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub journal: Option<String>,
    pub year: u16,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Patent {
    pub title: String,
    /// Filing status as recorded (e.g., "Granted", "Filed")
    pub status: String,
    pub year: u16,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LeaveRecord {
    pub from: NaiveDate,
    pub to: NaiveDate,
    #[serde(default)]
    pub reason: String,
}

impl LeaveRecord {
    /// Inclusive length in days.
    pub fn days(&self) -> i64 {
        (self.to - self.from).num_days() + 1
    }
}

impl Faculty {
    /// Whether the faculty member is on leave on `date`.
    pub fn on_leave(&self, date: NaiveDate) -> bool {
        self.leave.iter().any(|l| l.from <= date && date <= l.to)
    }
}

impl Record for Faculty {
    const ENTITY: &'static str = "faculty";
    const FIELDS: &'static [&'static str] = &[
        "id",
        "name",
        "facultyId",
        "department",
        "qualification",
        "status",
        "designation",
        "email",
        "patents",
        "publications",
    ];
    const SEARCHABLE: &'static [&'static str] = &["name", "facultyId", "id"];

    fn id(&self) -> &str {
        &self.id
    }

    fn field(&self, name: &str) -> Option<FieldValue<'_>> {
        match name {
            "id" => Some(FieldValue::text(&self.id)),
            "name" => Some(FieldValue::text(&self.name)),
            "facultyId" => Some(FieldValue::text(&self.faculty_id)),
            "department" => Some(FieldValue::text(&self.department)),
            "qualification" => self.qualification.as_deref().map(FieldValue::text),
            "status" => Some(FieldValue::text(self.status.as_str())),
            "designation" => self.designation.as_deref().map(FieldValue::text),
            "email" => self.email.as_deref().map(FieldValue::text),
            "patents" => Some(FieldValue::owned(self.patents.len().to_string())),
            "publications" => Some(FieldValue::owned(self.research.len().to_string())),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Faculty {
        serde_json::from_str(
            r#"{
                "id": "F001",
                "name": "Dr. Lakshmi Rao",
                "facultyId": "FAC-CSE-01",
                "department": "cse",
                "qualification": "Ph.D",
                "status": "Active",
                "research": [{ "title": "Graph mining", "year": 2021 }],
                "leave": [{ "from": "2024-03-04", "to": "2024-03-08", "reason": "Conference" }]
            }"#,
        )
        .unwrap()
    }

    #[test]
    fn test_nested_records() {
        let faculty = sample();
        assert_eq!(faculty.research.len(), 1);
        assert!(faculty.patents.is_empty());
        assert_eq!(faculty.leave[0].days(), 5);
        assert_eq!(faculty.field("publications").unwrap().display(), "1");
    }

    #[test]
    fn test_on_leave() {
        let faculty = sample();
        let day = |d: u32| NaiveDate::from_ymd_opt(2024, 3, d).unwrap();
        assert!(faculty.on_leave(day(4)));
        assert!(faculty.on_leave(day(8)));
        assert!(!faculty.on_leave(day(9)));
    }

    #[test]
    fn test_absent_optional_fields() {
        let mut faculty = sample();
        faculty.qualification = None;
        assert!(faculty.field("qualification").is_none());
        assert!(faculty.field("email").is_none());
    }
}
