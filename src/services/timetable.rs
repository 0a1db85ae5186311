//! Timetable views: per-day grid and clash detection.

use std::collections::{BTreeMap, HashMap};
use std::fmt;

use serde::Serialize;

use crate::models::{Day, TimetableSlot};

/// The resource two clashing slots both claim.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum ConflictKind {
    Room,
    Faculty,
    Section,
}

impl ConflictKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ConflictKind::Room => "room",
            ConflictKind::Faculty => "faculty",
            ConflictKind::Section => "section",
        }
    }

    fn resource<'a>(&self, slot: &'a TimetableSlot) -> &'a str {
        match self {
            ConflictKind::Room => &slot.room_id,
            ConflictKind::Faculty => &slot.faculty_id,
            ConflictKind::Section => &slot.section_id,
        }
    }
}

/// Two slots that overlap in time and share a resource.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Conflict {
    pub kind: ConflictKind,
    /// The shared room, faculty or section id
    pub resource: String,
    pub day: Day,
    pub first: String,
    pub second: String,
}

impl fmt::Display for Conflict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} double-booked on {}: {} and {}",
            self.kind.as_str(),
            self.resource,
            self.day,
            self.first,
            self.second
        )
    }
}

/// Find every pair of overlapping slots that share a room, faculty or section.
///
/// Slots are grouped per (day, resource) and swept in start-time order.
/// Output is ordered by kind, then day, then slot order within the sweep.
pub fn find_conflicts(slots: &[TimetableSlot]) -> Vec<Conflict> {
    let mut conflicts = Vec::new();

    for kind in [ConflictKind::Room, ConflictKind::Faculty, ConflictKind::Section] {
        let mut groups: BTreeMap<(Day, &str), Vec<&TimetableSlot>> = BTreeMap::new();
        for slot in slots.iter().filter(|s| s.is_well_formed()) {
            groups
                .entry((slot.day, kind.resource(slot)))
                .or_default()
                .push(slot);
        }

        for ((day, resource), mut group) in groups {
            group.sort_by_key(|s| s.start_time);
            for (i, first) in group.iter().enumerate() {
                for second in &group[i + 1..] {
                    if second.start_time >= first.end_time {
                        break;
                    }
                    conflicts.push(Conflict {
                        kind,
                        resource: resource.to_string(),
                        day,
                        first: first.id.clone(),
                        second: second.id.clone(),
                    });
                }
            }
        }
    }

    if !conflicts.is_empty() {
        log::debug!("Found {} timetable conflict(s)", conflicts.len());
    }
    conflicts
}

/// Slots grouped by day, each day sorted by start time.
pub fn week_grid<'a>(slots: &[&'a TimetableSlot]) -> BTreeMap<Day, Vec<&'a TimetableSlot>> {
    let mut grid: BTreeMap<Day, Vec<&TimetableSlot>> = BTreeMap::new();
    for slot in slots {
        grid.entry(slot.day).or_default().push(*slot);
    }
    for day_slots in grid.values_mut() {
        day_slots.sort_by_key(|s| s.start_time);
    }
    grid
}

/// Teaching minutes per faculty member.
pub fn teaching_load<'a>(
    slots: impl IntoIterator<Item = &'a TimetableSlot>,
) -> HashMap<&'a str, i64> {
    let mut load: HashMap<&str, i64> = HashMap::new();
    for slot in slots.into_iter().filter(|s| s.is_well_formed()) {
        *load.entry(slot.faculty_id.as_str()).or_default() += slot.duration_minutes();
    }
    load
}
