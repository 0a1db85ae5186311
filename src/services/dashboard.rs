//! Dashboard overview cards.
//!
//! Computed from the full, unfiltered collections.

use chrono::NaiveDate;
use serde::Serialize;

use crate::engine::{Summary, aggregate_by_field, percent_of};
use crate::models::{
    Dataset, FacultyStatus, NewsEvent, NewsStatus, RoomStatus, StudentStatus,
};

/// A headline number with a share of its total.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Card {
    pub count: usize,
    pub percent: u32,
}

impl Card {
    fn of(count: usize, total: usize) -> Self {
        Self {
            count,
            percent: percent_of(count, total),
        }
    }
}

/// Everything the landing page shows.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Overview {
    pub total_students: usize,
    pub current_students: Card,
    pub alumni: Card,
    pub total_faculty: usize,
    pub active_faculty: Card,
    pub faculty_on_leave: usize,
    pub published_news: usize,
    pub upcoming_events: Vec<UpcomingEvent>,
    pub total_rooms: usize,
    pub available_rooms: Card,
    pub total_seats: u64,
    pub students_by_department: Summary,
    pub faculty_by_qualification: Summary,
    pub faculty_by_department: Summary,
    pub rooms_by_type: Summary,
}

/// An event on the "coming up" card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UpcomingEvent {
    pub id: String,
    pub title: String,
    pub date: NaiveDate,
}

impl From<&NewsEvent> for UpcomingEvent {
    fn from(event: &NewsEvent) -> Self {
        Self {
            id: event.id.clone(),
            title: event.title.clone(),
            date: event.date,
        }
    }
}

impl Overview {
    /// Compute the overview as of `today`.
    pub fn compute(dataset: &Dataset, today: NaiveDate) -> Self {
        let students = &dataset.students;
        let faculty = &dataset.faculty;
        let rooms = &dataset.rooms;

        let current = students
            .iter()
            .filter(|s| s.status == StudentStatus::Current)
            .count();
        let alumni = students
            .iter()
            .filter(|s| s.status == StudentStatus::Alumni)
            .count();
        let active = faculty
            .iter()
            .filter(|f| f.status == FacultyStatus::Active)
            .count();
        let available = rooms
            .iter()
            .filter(|r| r.status == RoomStatus::Available)
            .count();

        let mut upcoming: Vec<&NewsEvent> = dataset
            .news
            .iter()
            .filter(|n| n.is_upcoming_event(today))
            .collect();
        upcoming.sort_by_key(|n| n.date);

        Self {
            total_students: students.len(),
            current_students: Card::of(current, students.len()),
            alumni: Card::of(alumni, students.len()),
            total_faculty: faculty.len(),
            active_faculty: Card::of(active, faculty.len()),
            faculty_on_leave: faculty.iter().filter(|f| f.on_leave(today)).count(),
            published_news: dataset
                .news
                .iter()
                .filter(|n| n.status == NewsStatus::Published)
                .count(),
            upcoming_events: upcoming.into_iter().map(UpcomingEvent::from).collect(),
            total_rooms: rooms.len(),
            available_rooms: Card::of(available, rooms.len()),
            total_seats: rooms.iter().map(|r| u64::from(r.capacity)).sum(),
            students_by_department: aggregate_by_field(students, "department"),
            faculty_by_qualification: aggregate_by_field(faculty, "qualification"),
            faculty_by_department: aggregate_by_field(faculty, "department"),
            rooms_by_type: aggregate_by_field(rooms, "type"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::fixtures;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_overview_cards() {
        let overview = Overview::compute(&fixtures::dataset(), day(2024, 2, 1));
        assert_eq!(overview.total_students, 5);
        assert_eq!(overview.current_students, Card { count: 4, percent: 80 });
        assert_eq!(overview.alumni, Card { count: 1, percent: 20 });
        assert_eq!(overview.active_faculty, Card { count: 3, percent: 75 });
        assert_eq!(overview.available_rooms, Card { count: 2, percent: 50 });
        assert_eq!(overview.total_seats, 300);
        assert_eq!(overview.published_news, 2);

        let upcoming: Vec<&str> = overview.upcoming_events.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(upcoming, vec!["N001", "N003"]);
    }

    #[test]
    fn test_overview_summaries() {
        let overview = Overview::compute(&fixtures::dataset(), day(2024, 3, 1));
        let phd = overview.faculty_by_qualification.get("Ph.D").unwrap();
        assert_eq!(phd.count, 2);
        assert_eq!(phd.percent, 50);
        assert_eq!(overview.students_by_department.counted(), 5);
        assert_eq!(overview.upcoming_events.len(), 1);
        assert_eq!(overview.faculty_on_leave, 0);

        let during_conference = Overview::compute(&fixtures::dataset(), day(2024, 3, 5));
        assert_eq!(during_conference.faculty_on_leave, 1);
    }

    #[test]
    fn test_empty_dataset() {
        let overview = Overview::compute(&Dataset::default(), day(2024, 1, 1));
        assert_eq!(overview.current_students, Card { count: 0, percent: 0 });
        assert!(overview.students_by_department.is_empty());
        assert!(overview.upcoming_events.is_empty());
    }
}
