// src/models/mod.rs

//! Domain models for the dashboard.
//!
//! One module per entity, plus the configuration and the dataset that
//! bundles every collection together.

mod config;
mod dataset;
mod faculty;
mod news;
mod student;
mod timetable;

// Re-export all public types
pub use config::{Config, DataConfig, DisplayConfig, SessionConfig, Templates};
pub use dataset::{Dataset, DatasetIssue};
pub use faculty::{Degree, Faculty, FacultyStatus, LeaveRecord, Patent, Research};
pub use news::{NewsEvent, NewsKind, NewsStatus};
pub use student::{Student, StudentStatus};
pub use timetable::{Day, Room, RoomStatus, TimetableSlot};

#[cfg(test)]
pub(crate) mod fixtures {
    //! The sample dataset shipped in `data/`, for tests.

    use super::Dataset;

    pub fn dataset() -> Dataset {
        Dataset {
            students: serde_json::from_str(include_str!("../../data/students.json")).unwrap(),
            faculty: serde_json::from_str(include_str!("../../data/faculty.json")).unwrap(),
            news: serde_json::from_str(include_str!("../../data/news.json")).unwrap(),
            timetable: serde_json::from_str(include_str!("../../data/timetable.json")).unwrap(),
            rooms: serde_json::from_str(include_str!("../../data/rooms.json")).unwrap(),
        }
    }
}
