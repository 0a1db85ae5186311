use crate::error::Result;
use crate::models::{Config, Dataset, DatasetIssue};
use crate::services::{Conflict, find_conflicts};
use crate::session::Session;
use crate::storage::DatasetStorage;

/// Data problems found by `run_validate`.
#[derive(Debug, Clone, Default)]
pub struct ValidationReport {
    pub issues: Vec<DatasetIssue>,
    pub conflicts: Vec<Conflict>,
}

impl ValidationReport {
    /// No dataset issues and no timetable clashes.
    pub fn is_clean(&self) -> bool {
        self.issues.is_empty() && self.conflicts.is_empty()
    }
}

/// Validate the configuration and report data quality problems.
///
/// An invalid configuration is an error. Dataset issues and timetable
/// clashes are logged as warnings and returned.
pub fn run_validate(config: &Config, dataset: &Dataset) -> Result<ValidationReport> {
    log::info!("Validating configuration...");

    if let Err(e) = config.validate() {
        log::error!("Config validation failed: {}", e);
        return Err(e);
    }
    log::info!(
        "✓ Config OK (page size {}, operator {})",
        config.display.page_size,
        config.session.user
    );

    let issues = dataset.check();
    for issue in &issues {
        log::warn!("{}", issue);
    }

    let conflicts = find_conflicts(&dataset.timetable);
    for conflict in &conflicts {
        log::warn!("{}", conflict);
    }

    let report = ValidationReport { issues, conflicts };
    if report.is_clean() {
        log::info!("✓ Dataset OK");
    } else {
        log::warn!(
            "{} dataset issue(s), {} timetable conflict(s)",
            report.issues.len(),
            report.conflicts.len()
        );
    }
    Ok(report)
}

/// Log where data comes from, who is signed in and what was loaded.
pub fn run_info(storage: &dyn DatasetStorage, dataset: &Dataset, session: &Session) {
    let operator = session.operator();
    log::info!("Data directory: {}", storage.location());
    log::info!(
        "Operator: {} ({}), signed in at {}",
        operator.name,
        operator.role.as_str(),
        session.started_at().format("%Y-%m-%d %H:%M:%S UTC")
    );

    if dataset.is_empty() {
        log::info!("No records loaded.");
        return;
    }
    for (entity, count) in dataset.counts() {
        log::info!("  {:<10} {}", entity, count);
    }

    let index = dataset.search_index();
    log::info!(
        "Search index: {} records, {} tokens",
        index.record_count,
        index.token_count()
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;
    use crate::models::fixtures;

    #[test]
    fn test_validate_sample_data() {
        let report = run_validate(&Config::default(), &fixtures::dataset()).unwrap();
        assert!(report.is_clean());
    }

    #[test]
    fn test_validate_reports_issues_without_failing() {
        let mut dataset = fixtures::dataset();
        let duplicate = dataset.rooms[0].clone();
        dataset.rooms.push(duplicate);
        dataset.timetable[0].room_id = "X999".to_string();

        let report = run_validate(&Config::default(), &dataset).unwrap();
        assert!(!report.is_clean());
        assert_eq!(report.issues.len(), 2);
        assert!(report.issues.contains(&DatasetIssue::UnknownRoom {
            slot: "T001".to_string(),
            room_id: "X999".to_string(),
        }));
    }

    #[test]
    fn test_timetable_clash_makes_report_unclean() {
        let mut dataset = fixtures::dataset();
        let mut clash = dataset.timetable[0].clone();
        clash.id = "T100".to_string();
        dataset.timetable.push(clash);

        let report = run_validate(&Config::default(), &dataset).unwrap();
        assert!(report.issues.is_empty());
        assert!(!report.conflicts.is_empty());
        assert!(!report.is_clean());
    }

    #[test]
    fn test_invalid_config_fails() {
        let mut config = Config::default();
        config.display.page_size = 0;
        let err = run_validate(&config, &fixtures::dataset()).unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }
}
