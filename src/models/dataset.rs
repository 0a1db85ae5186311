//! The in-memory collections a dashboard session works on.

use std::collections::{HashMap, HashSet};
use std::fmt;

use crate::engine::{Record, SearchIndex};
use crate::models::{Faculty, NewsEvent, Room, Student, TimetableSlot};

/// Every collection the dashboard shows.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    pub students: Vec<Student>,
    pub faculty: Vec<Faculty>,
    pub news: Vec<NewsEvent>,
    pub timetable: Vec<TimetableSlot>,
    pub rooms: Vec<Room>,
}

/// A data quality problem. Reported, never enforced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DatasetIssue {
    DuplicateId { entity: &'static str, id: String },
    EmptyTimeRange { slot: String },
    UnknownFaculty { slot: String, faculty_id: String },
    UnknownRoom { slot: String, room_id: String },
}

impl fmt::Display for DatasetIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DatasetIssue::DuplicateId { entity, id } => {
                write!(f, "duplicate {entity} id '{id}'")
            }
            DatasetIssue::EmptyTimeRange { slot } => {
                write!(f, "slot '{slot}' ends at or before its start")
            }
            DatasetIssue::UnknownFaculty { slot, faculty_id } => {
                write!(f, "slot '{slot}' refers to unknown faculty '{faculty_id}'")
            }
            DatasetIssue::UnknownRoom { slot, room_id } => {
                write!(f, "slot '{slot}' refers to unknown room '{room_id}'")
            }
        }
    }
}

impl Dataset {
    /// Record counts per entity, in display order.
    pub fn counts(&self) -> [(&'static str, usize); 5] {
        [
            (Student::ENTITY, self.students.len()),
            (Faculty::ENTITY, self.faculty.len()),
            (NewsEvent::ENTITY, self.news.len()),
            (TimetableSlot::ENTITY, self.timetable.len()),
            (Room::ENTITY, self.rooms.len()),
        ]
    }

    pub fn is_empty(&self) -> bool {
        self.counts().iter().all(|(_, n)| *n == 0)
    }

    pub fn faculty_by_id(&self) -> HashMap<&str, &Faculty> {
        self.faculty.iter().map(|f| (f.faculty_id.as_str(), f)).collect()
    }

    pub fn room(&self, id: &str) -> Option<&Room> {
        self.rooms.iter().find(|r| r.id == id)
    }

    /// Build the global search index over every collection.
    pub fn search_index(&self) -> SearchIndex {
        let mut builder = SearchIndex::builder();
        builder
            .add_records(&self.students)
            .add_records(&self.faculty)
            .add_records(&self.news)
            .add_records(&self.timetable)
            .add_records(&self.rooms);
        builder.build()
    }

    /// Look for data quality problems.
    ///
    /// Timetable slots refer to faculty by `facultyId` and to rooms by `id`.
    pub fn check(&self) -> Vec<DatasetIssue> {
        let mut issues = Vec::new();
        issues.extend(duplicate_ids(&self.students));
        issues.extend(duplicate_ids(&self.faculty));
        issues.extend(duplicate_ids(&self.news));
        issues.extend(duplicate_ids(&self.timetable));
        issues.extend(duplicate_ids(&self.rooms));

        let faculty_ids: HashSet<&str> =
            self.faculty.iter().map(|f| f.faculty_id.as_str()).collect();
        let room_ids: HashSet<&str> = self.rooms.iter().map(|r| r.id.as_str()).collect();

        for slot in &self.timetable {
            if !slot.is_well_formed() {
                issues.push(DatasetIssue::EmptyTimeRange {
                    slot: slot.id.clone(),
                });
            }
            if !faculty_ids.contains(slot.faculty_id.as_str()) {
                issues.push(DatasetIssue::UnknownFaculty {
                    slot: slot.id.clone(),
                    faculty_id: slot.faculty_id.clone(),
                });
            }
            if !room_ids.contains(slot.room_id.as_str()) {
                issues.push(DatasetIssue::UnknownRoom {
                    slot: slot.id.clone(),
                    room_id: slot.room_id.clone(),
                });
            }
        }

        issues
    }
}

fn duplicate_ids<R: Record>(records: &[R]) -> Vec<DatasetIssue> {
    let mut seen = HashSet::new();
    let mut reported = HashSet::new();
    let mut issues = Vec::new();
    for record in records {
        let id = record.id();
        if !seen.insert(id) && reported.insert(id) {
            issues.push(DatasetIssue::DuplicateId {
                entity: R::ENTITY,
                id: id.to_string(),
            });
        }
    }
    issues
}
