//! Application configuration structures.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};
use crate::session::Role;

/// Root application configuration, read from `config.toml` in the data directory.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Dataset file names
    #[serde(default)]
    pub data: DataConfig,

    /// Listing and table presentation
    #[serde(default)]
    pub display: DisplayConfig,

    /// Dashboard operator
    #[serde(default)]
    pub session: SessionConfig,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Load configuration or return default if loading fails.
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        Self::load(&path).unwrap_or_else(|e| {
            log::warn!(
                "Config load failed from {:?}: {}. Using defaults.",
                path.as_ref(),
                e
            );
            Self::default()
        })
    }

    /// Validate configuration values for basic sanity.
    pub fn validate(&self) -> Result<()> {
        if self.display.page_size == 0 {
            return Err(AppError::validation("display.page_size must be > 0"));
        }
        if self.display.empty_message.trim().is_empty() {
            return Err(AppError::validation("display.empty_message is empty"));
        }
        for (name, template) in self.display.templates.entries() {
            if template.trim().is_empty() {
                return Err(AppError::validation(format!(
                    "display.templates.{name} is empty"
                )));
            }
        }
        for (name, file) in self.data.entries() {
            if file.trim().is_empty() {
                return Err(AppError::validation(format!("data.{name} is empty")));
            }
        }
        if self.session.user.trim().is_empty() {
            return Err(AppError::validation("session.user is empty"));
        }
        Ok(())
    }
}

/// File names of the entity datasets, relative to the data directory.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataConfig {
    #[serde(default = "defaults::students_file")]
    pub students: String,

    #[serde(default = "defaults::faculty_file")]
    pub faculty: String,

    #[serde(default = "defaults::news_file")]
    pub news: String,

    #[serde(default = "defaults::timetable_file")]
    pub timetable: String,

    #[serde(default = "defaults::rooms_file")]
    pub rooms: String,
}

impl DataConfig {
    pub fn entries(&self) -> [(&'static str, &str); 5] {
        [
            ("students", self.students.as_str()),
            ("faculty", self.faculty.as_str()),
            ("news", self.news.as_str()),
            ("timetable", self.timetable.as_str()),
            ("rooms", self.rooms.as_str()),
        ]
    }
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            students: defaults::students_file(),
            faculty: defaults::faculty_file(),
            news: defaults::news_file(),
            timetable: defaults::timetable_file(),
            rooms: defaults::rooms_file(),
        }
    }
}

/// Presentation settings for listings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DisplayConfig {
    /// Rows per table page
    #[serde(default = "defaults::page_size")]
    pub page_size: usize,

    /// Shown when a filtered listing has no rows
    #[serde(default = "defaults::empty_message")]
    pub empty_message: String,

    /// Row templates with `{field}` placeholders
    #[serde(default)]
    pub templates: Templates,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            page_size: defaults::page_size(),
            empty_message: defaults::empty_message(),
            templates: Templates::default(),
        }
    }
}

/// Row templates per entity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Templates {
    #[serde(default = "defaults::student_template")]
    pub student: String,

    #[serde(default = "defaults::faculty_template")]
    pub faculty: String,

    #[serde(default = "defaults::news_template")]
    pub news: String,

    #[serde(default = "defaults::slot_template")]
    pub slot: String,

    #[serde(default = "defaults::room_template")]
    pub room: String,
}

impl Templates {
    /// Template for the given entity label.
    pub fn for_entity(&self, entity: &str) -> Option<&str> {
        self.entries()
            .into_iter()
            .find(|(name, _)| *name == entity)
            .map(|(_, template)| template)
    }

    fn entries(&self) -> [(&'static str, &str); 5] {
        [
            ("student", self.student.as_str()),
            ("faculty", self.faculty.as_str()),
            ("news", self.news.as_str()),
            ("slot", self.slot.as_str()),
            ("room", self.room.as_str()),
        ]
    }
}

impl Default for Templates {
    fn default() -> Self {
        Self {
            student: defaults::student_template(),
            faculty: defaults::faculty_template(),
            news: defaults::news_template(),
            slot: defaults::slot_template(),
            room: defaults::room_template(),
        }
    }
}

/// The operator a dashboard session is opened for.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    #[serde(default = "defaults::user")]
    pub user: String,

    #[serde(default = "defaults::role")]
    pub role: Role,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            user: defaults::user(),
            role: defaults::role(),
        }
    }
}

mod defaults {
    use crate::session::Role;

    // Data defaults
    pub fn students_file() -> String {
        "students.json".into()
    }
    pub fn faculty_file() -> String {
        "faculty.json".into()
    }
    pub fn news_file() -> String {
        "news.json".into()
    }
    pub fn timetable_file() -> String {
        "timetable.json".into()
    }
    pub fn rooms_file() -> String {
        "rooms.json".into()
    }

    // Display defaults
    pub fn page_size() -> usize {
        20
    }
    pub fn empty_message() -> String {
        "No records found.".into()
    }
    pub fn student_template() -> String {
        "{rollNo}  {name} [{department} Y{year} {section}] {status}".into()
    }
    pub fn faculty_template() -> String {
        "{facultyId}  {name} [{department}] {qualification} {status}".into()
    }
    pub fn news_template() -> String {
        "{date}  {title} ({type}, {status})".into()
    }
    pub fn slot_template() -> String {
        "{day} {startTime}-{endTime}  {subject} {sectionId} @ {roomId} by {facultyId}".into()
    }
    pub fn room_template() -> String {
        "{id}  {name} [{type}, {capacity} seats] {status}".into()
    }

    // Session defaults
    pub fn user() -> String {
        "admin".into()
    }
    pub fn role() -> Role {
        Role::Admin
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validate_default_config_ok() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn validate_rejects_zero_page_size() {
        let mut config = Config::default();
        config.display.page_size = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_rejects_blank_template() {
        let mut config = Config::default();
        config.display.templates.room = "  ".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn partial_toml_uses_defaults() {
        let config: Config = toml::from_str(
            r#"
            [display]
            page_size = 5

            [session]
            user = "registrar"
            role = "Staff"
            "#,
        )
        .unwrap();
        assert_eq!(config.display.page_size, 5);
        assert_eq!(config.display.empty_message, "No records found.");
        assert_eq!(config.data.students, "students.json");
        assert_eq!(config.session.role, Role::Staff);
    }

    #[test]
    fn template_lookup() {
        let templates = Templates::default();
        assert!(templates.for_entity("slot").unwrap().contains("{roomId}"));
        assert!(templates.for_entity("unknown").is_none());
    }
}
