//! Command entry points.
//!
//! - `run_list`: one page of a filtered, sorted listing
//! - `run_summary`: per-key counts for one field of a collection
//! - `run_overview`: landing page cards
//! - `run_search`: global token search across every collection
//! - `run_conflicts`: timetable clash report
//! - `run_week`: per-day timetable grid with teaching load
//! - `run_validate` / `run_info`: configuration and dataset diagnostics
//!
//! Entry points that produce output write it to the given writer so that
//! the binary can point them at stdout and tests at a buffer.

mod entity;
mod list;
mod report;
mod validate;

pub use entity::Entity;
pub use list::{ListRequest, run_list};
pub use report::{run_conflicts, run_overview, run_search, run_summary, run_week};
pub use validate::{ValidationReport, run_info, run_validate};
