use std::fmt;
use std::str::FromStr;

use crate::engine::{Record, Summary, aggregate_by_field};
use crate::error::AppError;
use crate::models::{Dataset, Faculty, NewsEvent, Room, Student, TimetableSlot};

/// The collections a command can address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Entity {
    Students,
    Faculty,
    News,
    Timetable,
    Rooms,
}

impl Entity {
    pub const ALL: [Entity; 5] = [
        Entity::Students,
        Entity::Faculty,
        Entity::News,
        Entity::Timetable,
        Entity::Rooms,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Entity::Students => "students",
            Entity::Faculty => "faculty",
            Entity::News => "news",
            Entity::Timetable => "timetable",
            Entity::Rooms => "rooms",
        }
    }

    /// Record label used for templates and search references.
    pub fn record_label(&self) -> &'static str {
        match self {
            Entity::Students => Student::ENTITY,
            Entity::Faculty => Faculty::ENTITY,
            Entity::News => NewsEvent::ENTITY,
            Entity::Timetable => TimetableSlot::ENTITY,
            Entity::Rooms => Room::ENTITY,
        }
    }

    /// Field names records of this collection answer for.
    pub fn fields(&self) -> &'static [&'static str] {
        match self {
            Entity::Students => Student::FIELDS,
            Entity::Faculty => Faculty::FIELDS,
            Entity::News => NewsEvent::FIELDS,
            Entity::Timetable => TimetableSlot::FIELDS,
            Entity::Rooms => Room::FIELDS,
        }
    }

    pub fn has_field(&self, name: &str) -> bool {
        self.fields().contains(&name)
    }

    pub fn len(&self, dataset: &Dataset) -> usize {
        match self {
            Entity::Students => dataset.students.len(),
            Entity::Faculty => dataset.faculty.len(),
            Entity::News => dataset.news.len(),
            Entity::Timetable => dataset.timetable.len(),
            Entity::Rooms => dataset.rooms.len(),
        }
    }

    /// Summarize the whole collection by `field`.
    pub fn summarize(&self, dataset: &Dataset, field: &str) -> Summary {
        match self {
            Entity::Students => aggregate_by_field(&dataset.students, field),
            Entity::Faculty => aggregate_by_field(&dataset.faculty, field),
            Entity::News => aggregate_by_field(&dataset.news, field),
            Entity::Timetable => aggregate_by_field(&dataset.timetable, field),
            Entity::Rooms => aggregate_by_field(&dataset.rooms, field),
        }
    }
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Entity {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim().to_lowercase();
        Entity::ALL
            .into_iter()
            .find(|e| e.as_str() == name || e.record_label() == name)
            .ok_or_else(|| AppError::validation(format!("unknown collection '{s}'")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::fixtures;

    #[test]
    fn test_parse_entity() {
        assert_eq!("students".parse::<Entity>().unwrap(), Entity::Students);
        assert_eq!(" Room ".parse::<Entity>().unwrap(), Entity::Rooms);
        assert_eq!("slot".parse::<Entity>().unwrap(), Entity::Timetable);
        assert!("courses".parse::<Entity>().is_err());
    }

    #[test]
    fn test_fields_and_counts() {
        let dataset = fixtures::dataset();
        assert!(Entity::Students.has_field("rollNo"));
        assert!(!Entity::Rooms.has_field("rollNo"));
        assert_eq!(Entity::Rooms.len(&dataset), 4);
        assert_eq!(
            Entity::Rooms.summarize(&dataset, "type").get("Classroom").unwrap().count,
            2
        );
    }
}
