use std::io::Write;

use serde::Serialize;

use crate::engine::{FilterState, Record, SortOrder};
use crate::error::Result;
use crate::models::{Dataset, DisplayConfig};
use crate::pipeline::Entity;
use crate::services::Directory;
use crate::utils::render;

/// One listing request: the page's filters plus table presentation.
#[derive(Debug, Clone)]
pub struct ListRequest {
    pub state: FilterState,
    pub sort: Option<SortOrder>,
    /// 1-based
    pub page: usize,
    pub json: bool,
}

impl Default for ListRequest {
    fn default() -> Self {
        Self {
            state: FilterState::default(),
            sort: None,
            page: 1,
            json: false,
        }
    }
}

/// Print one page of a filtered listing. Returns the number of matching records.
pub fn run_list<W: Write>(
    dataset: &Dataset,
    entity: Entity,
    request: &ListRequest,
    display: &DisplayConfig,
    out: &mut W,
) -> Result<usize> {
    match entity {
        Entity::Students => list(&dataset.students, request, display, out),
        Entity::Faculty => list(&dataset.faculty, request, display, out),
        Entity::News => list(&dataset.news, request, display, out),
        Entity::Timetable => list(&dataset.timetable, request, display, out),
        Entity::Rooms => list(&dataset.rooms, request, display, out),
    }
}

fn list<R, W>(records: &[R], request: &ListRequest, display: &DisplayConfig, out: &mut W) -> Result<usize>
where
    R: Record + Serialize,
    W: Write,
{
    let mut directory = Directory::new(records, display.page_size);
    directory.set_state(request.state.clone());
    directory.set_sort(request.sort.clone());

    let listing = directory.listing(request.page);
    log::debug!(
        "{} listing: {} of {} match, page {}/{}",
        R::ENTITY,
        listing.matched,
        listing.total,
        listing.page,
        listing.total_pages
    );

    if request.json {
        serde_json::to_writer_pretty(&mut *out, &listing)?;
        writeln!(out)?;
        return Ok(listing.matched);
    }

    if listing.is_empty() {
        writeln!(out, "{}", display.empty_message)?;
        return Ok(0);
    }

    let template = display.templates.for_entity(R::ENTITY).unwrap_or("{id}");
    for record in &listing.filtered_records {
        writeln!(out, "{}", render(*record, template))?;
    }
    writeln!(
        out,
        "-- page {} of {} ({} matching, {} total)",
        listing.page, listing.total_pages, listing.matched, listing.total
    )?;
    Ok(listing.matched)
}
