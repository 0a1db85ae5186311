//! Timetable slots and rooms.

use std::fmt;

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};

use crate::engine::{FieldValue, Record};

/// Teaching day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Day {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
}

impl Day {
    pub const ALL: [Day; 6] = [
        Day::Monday,
        Day::Tuesday,
        Day::Wednesday,
        Day::Thursday,
        Day::Friday,
        Day::Saturday,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Day::Monday => "Monday",
            Day::Tuesday => "Tuesday",
            Day::Wednesday => "Wednesday",
            Day::Thursday => "Thursday",
            Day::Friday => "Friday",
            Day::Saturday => "Saturday",
        }
    }
}

impl fmt::Display for Day {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One assignment of a faculty member, a section and a room to a time range.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TimetableSlot {
    pub id: String,

    pub day: Day,

    #[serde(with = "hhmm")]
    pub start_time: NaiveTime,

    #[serde(with = "hhmm")]
    pub end_time: NaiveTime,

    pub faculty_id: String,

    pub section_id: String,

    pub room_id: String,

    /// Course code taught in this slot
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
}

impl TimetableSlot {
    /// Whether the two slots share any instant on the same day.
    ///
    /// Touching ranges (one ends when the other starts) do not overlap.
    pub fn overlaps(&self, other: &TimetableSlot) -> bool {
        self.day == other.day
            && self.start_time < other.end_time
            && other.start_time < self.end_time
    }

    /// Whether the end time is after the start time.
    pub fn is_well_formed(&self) -> bool {
        self.end_time > self.start_time
    }

    pub fn duration_minutes(&self) -> i64 {
        (self.end_time - self.start_time).num_minutes()
    }
}

impl Record for TimetableSlot {
    const ENTITY: &'static str = "slot";
    const FIELDS: &'static [&'static str] = &[
        "id",
        "day",
        "startTime",
        "endTime",
        "facultyId",
        "sectionId",
        "roomId",
        "subject",
    ];
    const SEARCHABLE: &'static [&'static str] = &["subject", "id"];

    fn id(&self) -> &str {
        &self.id
    }

    fn field(&self, name: &str) -> Option<FieldValue<'_>> {
        match name {
            "id" => Some(FieldValue::text(&self.id)),
            "day" => Some(FieldValue::text(self.day.as_str())),
            "startTime" => Some(FieldValue::owned(hhmm::format(&self.start_time))),
            "endTime" => Some(FieldValue::owned(hhmm::format(&self.end_time))),
            "facultyId" => Some(FieldValue::text(&self.faculty_id)),
            "sectionId" => Some(FieldValue::text(&self.section_id)),
            "roomId" => Some(FieldValue::text(&self.room_id)),
            "subject" => self.subject.as_deref().map(FieldValue::text),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RoomStatus {
    Available,
    Occupied,
    Maintenance,
}

impl RoomStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            RoomStatus::Available => "Available",
            RoomStatus::Occupied => "Occupied",
            RoomStatus::Maintenance => "Maintenance",
        }
    }
}

/// A bookable room.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Room {
    pub id: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Room type as labelled on campus (e.g., "Classroom", "Lab", "Seminar Hall")
    #[serde(rename = "type")]
    pub room_type: String,

    pub capacity: u32,

    pub status: RoomStatus,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub building: Option<String>,
}

impl Record for Room {
    const ENTITY: &'static str = "room";
    const FIELDS: &'static [&'static str] =
        &["id", "name", "type", "capacity", "status", "building"];
    const SEARCHABLE: &'static [&'static str] = &["name", "id"];

    fn id(&self) -> &str {
        &self.id
    }

    fn field(&self, name: &str) -> Option<FieldValue<'_>> {
        match name {
            "id" => Some(FieldValue::text(&self.id)),
            "name" => self.name.as_deref().map(FieldValue::text),
            "type" => Some(FieldValue::text(&self.room_type)),
            "capacity" => Some(FieldValue::owned(self.capacity.to_string())),
            "status" => Some(FieldValue::text(self.status.as_str())),
            "building" => self.building.as_deref().map(FieldValue::text),
            _ => None,
        }
    }
}

/// `HH:MM` (de)serialization for slot times.
pub(crate) mod hhmm {
    use chrono::NaiveTime;
    use serde::{Deserialize, Deserializer, Serializer};

    const FORMAT: &str = "%H:%M";

    pub fn format(time: &NaiveTime) -> String {
        time.format(FORMAT).to_string()
    }

    pub fn serialize<S: Serializer>(time: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&format(time))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveTime, D::Error> {
        let raw = String::deserialize(deserializer)?;
        NaiveTime::parse_from_str(raw.trim(), FORMAT).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn slot(id: &str, day: Day, start: &str, end: &str) -> TimetableSlot {
        TimetableSlot {
            id: id.to_string(),
            day,
            start_time: NaiveTime::parse_from_str(start, "%H:%M").unwrap(),
            end_time: NaiveTime::parse_from_str(end, "%H:%M").unwrap(),
            faculty_id: "F001".to_string(),
            section_id: "CSE-3A".to_string(),
            room_id: "R101".to_string(),
            subject: None,
        }
    }

    #[test]
    fn test_overlaps() {
        let a = slot("a", Day::Monday, "09:00", "10:00");
        let b = slot("b", Day::Monday, "09:30", "10:30");
        let c = slot("c", Day::Monday, "10:00", "11:00");
        let d = slot("d", Day::Tuesday, "09:00", "10:00");
        assert!(a.overlaps(&b));
        assert!(!a.overlaps(&c));
        assert!(!a.overlaps(&d));
    }

    #[test]
    fn test_time_serde() {
        let json = r#"{
            "id": "T1", "day": "Wednesday", "startTime": "09:00", "endTime": "09:50",
            "facultyId": "F001", "sectionId": "CSE-3A", "roomId": "R101", "subject": "CS301"
        }"#;
        let parsed: TimetableSlot = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.duration_minutes(), 50);
        assert!(parsed.is_well_formed());
        assert_eq!(parsed.field("startTime").unwrap().display(), "09:00");

        let back = serde_json::to_value(&parsed).unwrap();
        assert_eq!(back["endTime"], "09:50");

        let bad = json.replace("09:50", "9.50am");
        assert!(serde_json::from_str::<TimetableSlot>(&bad).is_err());
    }

    #[test]
    fn test_room_fields() {
        let room: Room = serde_json::from_str(
            r#"{ "id": "R201", "type": "Seminar Hall", "capacity": 120, "status": "Maintenance" }"#,
        )
        .unwrap();
        assert_eq!(room.field("type").unwrap().display(), "Seminar Hall");
        assert_eq!(room.field("capacity").unwrap().display(), "120");
        assert!(room.field("name").is_none());
    }
}
