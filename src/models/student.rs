//! Student records.

use serde::{Deserialize, Serialize};

use crate::engine::{FieldValue, Record};

/// Enrollment status of a student.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StudentStatus {
    Current,
    Alumni,
}

impl StudentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            StudentStatus::Current => "Current",
            StudentStatus::Alumni => "Alumni",
        }
    }
}

/// A student as listed in the student directory.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Student {
    pub id: String,

    pub name: String,

    /// College roll number
    pub roll_no: String,

    /// University registration number
    pub reg_no: String,

    /// Department code (e.g., "cse", "ece")
    pub department: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub section: Option<String>,

    /// Year of study, 1-based
    pub year: u8,

    pub status: StudentStatus,

    /// Extracurricular activity tags
    #[serde(default)]
    pub activities: Vec<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cgpa: Option<f32>,
}

impl Record for Student {
    const ENTITY: &'static str = "student";
    const FIELDS: &'static [&'static str] = &[
        "id",
        "name",
        "rollNo",
        "regNo",
        "department",
        "section",
        "year",
        "status",
        "activities",
        "cgpa",
    ];
    const SEARCHABLE: &'static [&'static str] = &["name", "rollNo", "regNo", "id"];

    fn id(&self) -> &str {
        &self.id
    }

    fn field(&self, name: &str) -> Option<FieldValue<'_>> {
        match name {
            "id" => Some(FieldValue::text(&self.id)),
            "name" => Some(FieldValue::text(&self.name)),
            "rollNo" => Some(FieldValue::text(&self.roll_no)),
            "regNo" => Some(FieldValue::text(&self.reg_no)),
            "department" => Some(FieldValue::text(&self.department)),
            "section" => self.section.as_deref().map(FieldValue::text),
            "year" => Some(FieldValue::owned(self.year.to_string())),
            "status" => Some(FieldValue::text(self.status.as_str())),
            "activities" => Some(FieldValue::list(&self.activities)),
            "cgpa" => self.cgpa.map(|cgpa| FieldValue::owned(cgpa.to_string())),
            _ => None,
        }
    }
}
