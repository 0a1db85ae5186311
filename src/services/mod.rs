//! Service layer for the dashboard.
//!
//! This module contains the page-level logic for:
//! - Listing pages over one collection (`Directory`)
//! - Timetable grid and clash detection (`find_conflicts`)
//! - Landing page cards (`Overview`)

mod dashboard;
mod directory;
mod timetable;

pub use dashboard::{Card, Overview, UpcomingEvent};
pub use directory::{Directory, Listing};
pub use timetable::{Conflict, ConflictKind, find_conflicts, teaching_load, week_grid};
