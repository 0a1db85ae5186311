use std::io::Write;

use chrono::NaiveDate;

use crate::engine::{FilterState, Record, RecordRef, Summary};
use crate::error::Result;
use crate::models::{Dataset, DisplayConfig, Templates};
use crate::pipeline::Entity;
use crate::services::{Conflict, Directory, Overview, find_conflicts, teaching_load, week_grid};
use crate::session::Session;
use crate::utils::render;

/// Print counts and percentages of `field` over a whole collection.
pub fn run_summary<W: Write>(
    dataset: &Dataset,
    entity: Entity,
    field: &str,
    json: bool,
    out: &mut W,
) -> Result<Summary> {
    if !entity.has_field(field) {
        log::warn!("{entity} have no field '{field}'; every record is ungrouped");
    }
    let summary = entity.summarize(dataset, field);

    if json {
        serde_json::to_writer_pretty(&mut *out, &summary)?;
        writeln!(out)?;
        return Ok(summary);
    }

    writeln!(out, "{entity} by {field} ({} records)", summary.total())?;
    for (key, stat) in summary.iter() {
        writeln!(out, "  {key:<24} {:>5}  {:>3}%", stat.count, stat.percent)?;
    }
    if summary.ungrouped() > 0 {
        writeln!(out, "  {:<24} {:>5}", "(none)", summary.ungrouped())?;
    }
    Ok(summary)
}

/// Print the landing page cards as of `today`.
pub fn run_overview<W: Write>(
    dataset: &Dataset,
    session: &Session,
    today: NaiveDate,
    json: bool,
    out: &mut W,
) -> Result<Overview> {
    let overview = Overview::compute(dataset, today);

    if json {
        serde_json::to_writer_pretty(&mut *out, &overview)?;
        writeln!(out)?;
        return Ok(overview);
    }

    let operator = session.operator();
    writeln!(out, "Signed in as {} ({})", operator.name, operator.role.as_str())?;
    writeln!(
        out,
        "Students: {} ({} current {}%, {} alumni {}%)",
        overview.total_students,
        overview.current_students.count,
        overview.current_students.percent,
        overview.alumni.count,
        overview.alumni.percent
    )?;
    writeln!(
        out,
        "Faculty: {} ({} active {}%, {} on leave today)",
        overview.total_faculty,
        overview.active_faculty.count,
        overview.active_faculty.percent,
        overview.faculty_on_leave
    )?;
    writeln!(
        out,
        "News: {} published, {} upcoming events",
        overview.published_news,
        overview.upcoming_events.len()
    )?;
    writeln!(
        out,
        "Rooms: {} ({} available {}%), {} seats",
        overview.total_rooms,
        overview.available_rooms.count,
        overview.available_rooms.percent,
        overview.total_seats
    )?;
    write_breakdown(out, "Students by department", &overview.students_by_department)?;
    write_breakdown(out, "Faculty by qualification", &overview.faculty_by_qualification)?;

    if !overview.upcoming_events.is_empty() {
        writeln!(out, "Upcoming:")?;
        for event in &overview.upcoming_events {
            writeln!(out, "  {}  {}", event.date, event.title)?;
        }
    }
    Ok(overview)
}

fn write_breakdown<W: Write>(out: &mut W, label: &str, summary: &Summary) -> Result<()> {
    let parts: Vec<String> = summary
        .iter()
        .map(|(key, stat)| format!("{key} {} ({}%)", stat.count, stat.percent))
        .collect();
    if parts.is_empty() {
        writeln!(out, "{label}: -")?;
    } else {
        writeln!(out, "{label}: {}", parts.join(", "))?;
    }
    Ok(())
}

/// Print every record containing all of `terms`.
pub fn run_search<W: Write>(
    dataset: &Dataset,
    terms: &str,
    display: &DisplayConfig,
    out: &mut W,
) -> Result<Vec<RecordRef>> {
    let index = dataset.search_index();
    log::debug!(
        "Search index: {} records, {} tokens",
        index.record_count,
        index.token_count()
    );

    let hits = index.lookup(terms);
    if hits.is_empty() {
        writeln!(out, "{}", display.empty_message)?;
        return Ok(hits);
    }
    for hit in &hits {
        match describe(dataset, &display.templates, hit) {
            Some(row) => writeln!(out, "{hit}  {row}")?,
            None => writeln!(out, "{hit}")?,
        }
    }
    Ok(hits)
}

fn describe(dataset: &Dataset, templates: &Templates, hit: &RecordRef) -> Option<String> {
    let template = templates.for_entity(&hit.entity)?;
    let id = hit.id.as_str();
    match hit.entity.as_str() {
        "student" => find_rendered(&dataset.students, id, template),
        "faculty" => find_rendered(&dataset.faculty, id, template),
        "news" => find_rendered(&dataset.news, id, template),
        "slot" => find_rendered(&dataset.timetable, id, template),
        "room" => find_rendered(&dataset.rooms, id, template),
        _ => None,
    }
}

fn find_rendered<R: Record>(records: &[R], id: &str, template: &str) -> Option<String> {
    records
        .iter()
        .find(|r| r.id() == id)
        .map(|r| render(r, template))
}

/// Print timetable clashes.
pub fn run_conflicts<W: Write>(dataset: &Dataset, json: bool, out: &mut W) -> Result<Vec<Conflict>> {
    let conflicts = find_conflicts(&dataset.timetable);

    if json {
        serde_json::to_writer_pretty(&mut *out, &conflicts)?;
        writeln!(out)?;
    } else if conflicts.is_empty() {
        writeln!(out, "No timetable conflicts.")?;
    } else {
        for conflict in &conflicts {
            writeln!(out, "{conflict}")?;
        }
    }
    Ok(conflicts)
}

/// Print the weekly grid of the slots matching `state`, then teaching load.
/// Returns the number of slots shown.
pub fn run_week<W: Write>(
    dataset: &Dataset,
    state: &FilterState,
    display: &DisplayConfig,
    out: &mut W,
) -> Result<usize> {
    let mut directory = Directory::new(&dataset.timetable, display.page_size);
    directory.set_state(state.clone());
    let slots = directory.filtered().records;

    if slots.is_empty() {
        writeln!(out, "{}", display.empty_message)?;
        return Ok(0);
    }

    let faculty = dataset.faculty_by_id();
    let faculty_name = |id: &str| -> String {
        faculty
            .get(id)
            .map_or_else(|| id.to_string(), |f| f.name.clone())
    };

    for (day, day_slots) in week_grid(&slots) {
        writeln!(out, "{day}")?;
        for slot in day_slots {
            let room = dataset
                .room(&slot.room_id)
                .and_then(|r| r.name.as_deref())
                .unwrap_or(&slot.room_id);
            writeln!(
                out,
                "  {}-{}  {:<8} {:<8} {} @ {}",
                slot.start_time.format("%H:%M"),
                slot.end_time.format("%H:%M"),
                slot.subject.as_deref().unwrap_or("-"),
                slot.section_id,
                faculty_name(&slot.faculty_id),
                room
            )?;
        }
    }

    let mut load: Vec<(String, i64)> = teaching_load(slots.iter().copied())
        .into_iter()
        .map(|(id, minutes)| (faculty_name(id), minutes))
        .collect();
    load.sort();

    writeln!(out, "Teaching load:")?;
    for (name, minutes) in load {
        writeln!(out, "  {name:<24} {}h{:02}m", minutes / 60, minutes % 60)?;
    }
    Ok(slots.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::fixtures;
    use crate::session::{Operator, Role};

    fn text(buf: Vec<u8>) -> String {
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_summary_text() {
        let mut buf = Vec::new();
        let summary =
            run_summary(&fixtures::dataset(), Entity::Students, "department", false, &mut buf).unwrap();
        assert_eq!(summary.len(), 3);

        let out = text(buf);
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines[0], "students by department (5 records)");
        assert!(lines[1].starts_with("  cse"));
        assert!(lines[1].ends_with("3   60%"));
    }

    #[test]
    fn test_summary_unknown_field_is_all_ungrouped() {
        let mut buf = Vec::new();
        let summary =
            run_summary(&fixtures::dataset(), Entity::Rooms, "floor", true, &mut buf).unwrap();
        assert!(summary.is_empty());
        assert_eq!(summary.ungrouped(), 4);
        assert_eq!(text(buf).trim(), "{}");
    }

    #[test]
    fn test_overview_text() {
        let session = Session::begin(Operator {
            name: "registrar".to_string(),
            role: Role::Staff,
        });
        let today = NaiveDate::from_ymd_opt(2024, 2, 1).unwrap();
        let mut buf = Vec::new();
        run_overview(&fixtures::dataset(), &session, today, false, &mut buf).unwrap();

        let out = text(buf);
        assert!(out.starts_with("Signed in as registrar (Staff)\n"));
        assert!(out.contains("Students: 5 (4 current 80%, 1 alumni 20%)"));
        assert!(out.contains("Rooms: 4 (2 available 50%), 300 seats"));
        assert!(out.contains("  2024-02-15  Annual Sports Meet"));
    }

    #[test]
    fn test_week_grid_for_one_section() {
        let state = FilterState::new().with_value("sectionId", "CSE-3A");
        let mut buf = Vec::new();
        let shown =
            run_week(&fixtures::dataset(), &state, &DisplayConfig::default(), &mut buf).unwrap();
        assert_eq!(shown, 2);

        let out = text(buf);
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines[0], "Monday");
        assert_eq!(
            lines[1],
            "  09:00-09:50  CS301    CSE-3A   Dr. Anil Patel @ Room 101"
        );
        assert!(lines[2].starts_with("  10:00-10:50  CS302"));
        assert_eq!(lines[3], "Teaching load:");
        assert!(lines[4].starts_with("  Dr. Anil Patel"));
        assert!(lines[4].ends_with("0h50m"));
    }

    #[test]
    fn test_week_without_matches() {
        let state = FilterState::new().with_value("day", "Saturday");
        let mut buf = Vec::new();
        let shown =
            run_week(&fixtures::dataset(), &state, &DisplayConfig::default(), &mut buf).unwrap();
        assert_eq!(shown, 0);
        assert_eq!(text(buf), "No records found.\n");
    }

    #[test]
    fn test_search_resolves_rows() {
        let dataset = fixtures::dataset();
        let mut buf = Vec::new();
        let hits = run_search(&dataset, "Patel", &DisplayConfig::default(), &mut buf).unwrap();
        assert_eq!(hits.len(), 2);

        let out = text(buf);
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines[0], "faculty:F001  FAC-CSE-01  Dr. Anil Patel [cse] Ph.D Active");
        assert_eq!(lines[1], "student:S001  21CS001  Raj Patel [cse Y3 A] Current");
    }

    #[test]
    fn test_search_without_hits() {
        let mut buf = Vec::new();
        let hits =
            run_search(&fixtures::dataset(), "zzz", &DisplayConfig::default(), &mut buf).unwrap();
        assert!(hits.is_empty());
        assert_eq!(text(buf), "No records found.\n");
    }

    #[test]
    fn test_conflicts_report() {
        let mut dataset = fixtures::dataset();
        let mut buf = Vec::new();
        assert!(run_conflicts(&dataset, false, &mut buf).unwrap().is_empty());
        assert_eq!(text(buf), "No timetable conflicts.\n");

        let mut clash = dataset.timetable[0].clone();
        clash.id = "T100".to_string();
        clash.faculty_id = "FAC-EEE-01".to_string();
        clash.section_id = "ECE-2A".to_string();
        dataset.timetable.push(clash);

        let mut buf = Vec::new();
        let conflicts = run_conflicts(&dataset, false, &mut buf).unwrap();
        assert_eq!(conflicts.len(), 1);
        assert_eq!(text(buf), "room R101 double-booked on Monday: T001 and T100\n");
    }
}
