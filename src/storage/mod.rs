//! Dataset sources.
//!
//! Datasets are read-only: the dashboard loads them once per run and never
//! writes them back.
//!
//! ## Directory Structure
//!
//! ```text
//! data/
//! ├── config.toml       # Dashboard configuration
//! ├── students.json
//! ├── faculty.json
//! ├── news.json
//! ├── timetable.json
//! └── rooms.json
//! ```

pub mod local;

use crate::error::Result;
use crate::models::Dataset;

// Re-export for convenience
pub use local::LocalStorage;

/// Trait for dataset backends.
pub trait DatasetStorage {
    /// Load every collection.
    fn load_dataset(&self) -> Result<Dataset>;

    /// Human-readable location, for log output.
    fn location(&self) -> String;
}
