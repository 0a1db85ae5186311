//! A listing page over one collection.
//!
//! Every page (students, faculty, news, timetable, rooms) is a `Directory`
//! over its record type. The directory owns the page's filter state; two
//! directories never share one.

use serde::Serialize;

use crate::engine::{
    FilterState, Filtered, Page, Paged, Predicate, Record, SortOrder, Summary, aggregate_by_field,
    filter, paginate, sort_records,
};

/// What a listing page renders.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Listing<'a, R> {
    /// Records on the requested page
    pub filtered_records: Vec<&'a R>,
    /// Records matching the filter across all pages
    pub matched: usize,
    /// Records in the collection
    pub total: usize,
    pub page: usize,
    pub total_pages: usize,
}

impl<R> Listing<'_, R> {
    /// True when the filter matched nothing; render the empty state.
    pub fn is_empty(&self) -> bool {
        self.matched == 0
    }
}

/// Filterable, sortable, paged view of a collection.
#[derive(Debug)]
pub struct Directory<'a, R> {
    records: &'a [R],
    state: FilterState,
    sort: Option<SortOrder>,
    page_size: usize,
}

impl<'a, R: Record> Directory<'a, R> {
    pub fn new(records: &'a [R], page_size: usize) -> Self {
        Self {
            records,
            state: FilterState::default(),
            sort: None,
            page_size: page_size.max(1),
        }
    }

    pub fn state(&self) -> &FilterState {
        &self.state
    }

    /// Mutable access for incremental changes (typing, toggling a chip).
    pub fn state_mut(&mut self) -> &mut FilterState {
        &mut self.state
    }

    /// Replace the whole filter state.
    pub fn set_state(&mut self, state: FilterState) {
        for field in state.field_names() {
            if !R::has_field(field) {
                log::warn!(
                    "{} records have no field '{}'; it will match nothing",
                    R::ENTITY,
                    field
                );
            }
        }
        self.state = state;
    }

    pub fn set_sort(&mut self, sort: Option<SortOrder>) {
        if let Some(order) = &sort {
            if !R::has_field(&order.field) {
                log::warn!(
                    "{} records have no field '{}' to sort by",
                    R::ENTITY,
                    order.field
                );
            }
        }
        self.sort = sort;
    }

    /// Clear filters and sorting.
    pub fn reset(&mut self) {
        self.state.reset();
        self.sort = None;
    }

    /// Records passing the current filter, in collection order.
    pub fn filtered(&self) -> Filtered<'a, R> {
        filter(self.records, &Predicate::from_state(&self.state))
    }

    /// Records passing the current filter, sorted if a sort order is set.
    pub fn matching(&self) -> Vec<&'a R> {
        let mut records = self.filtered().records;
        if let Some(order) = &self.sort {
            sort_records(&mut records, order);
        }
        records
    }

    /// Render one page of the current view. Recomputed on every call.
    pub fn listing(&self, page: usize) -> Listing<'a, R> {
        let paged: Paged<&'a R> = paginate(self.matching(), Page::new(page, self.page_size));
        Listing {
            filtered_records: paged.items,
            matched: paged.total_items,
            total: self.records.len(),
            page: paged.page,
            total_pages: paged.total_pages,
        }
    }

    /// Summary of the records matching the current filter.
    pub fn summary_by(&self, field: &str) -> Summary {
        aggregate_by_field(&self.filtered().records, field)
    }

    /// Summary over the whole collection, ignoring the filter.
    pub fn collection_summary_by(&self, field: &str) -> Summary {
        aggregate_by_field(self.records, field)
    }

    /// Distinct values of `field`, in first-seen order, for populating a
    /// filter drop-down.
    pub fn options(&self, field: &str) -> Vec<String> {
        self.collection_summary_by(field)
            .keys()
            .map(str::to_string)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Student, fixtures};

    fn ids<R: Record>(records: &[&R]) -> Vec<String> {
        records.iter().map(|r| r.id().to_string()).collect()
    }

    #[test]
    fn test_default_lists_everything() {
        let dataset = fixtures::dataset();
        let directory = Directory::new(&dataset.students, 20);
        let listing = directory.listing(1);
        assert_eq!(listing.matched, dataset.students.len());
        assert_eq!(ids(&listing.filtered_records), vec!["S001", "S002", "S003", "S004", "S005"]);
    }

    #[test]
    fn test_filter_sort_and_page() {
        let dataset = fixtures::dataset();
        let mut directory = Directory::new(&dataset.students, 2);
        directory.set_state(FilterState::new().with_value("department", "cse"));
        directory.set_sort(Some(SortOrder::descending("cgpa")));

        let first = directory.listing(1);
        assert_eq!(first.matched, 3);
        assert_eq!(first.total_pages, 2);
        assert_eq!(ids(&first.filtered_records), vec!["S002", "S001"]);

        let second = directory.listing(2);
        assert_eq!(ids(&second.filtered_records), vec!["S004"]);
    }

    #[test]
    fn test_incremental_state_changes_recompute() {
        let dataset = fixtures::dataset();
        let mut directory = Directory::new(&dataset.students, 20);
        directory.state_mut().set_query("raj");
        assert_eq!(directory.filtered().len(), 1);

        directory.state_mut().set_query("");
        directory.state_mut().toggle("activities", "sports");
        assert_eq!(ids(&directory.filtered().records), vec!["S001", "S004"]);

        directory.reset();
        assert_eq!(directory.filtered().len(), 5);
    }

    #[test]
    fn test_unknown_department_renders_empty_state() {
        let dataset = fixtures::dataset();
        let mut directory: Directory<'_, Student> = Directory::new(&dataset.students, 20);
        directory.set_state(FilterState::new().with_value("department", "mech"));
        let listing = directory.listing(1);
        assert!(listing.is_empty());
        assert!(listing.filtered_records.is_empty());
        assert_eq!(listing.total, 5);
    }

    #[test]
    fn test_summaries_and_options() {
        let dataset = fixtures::dataset();
        let mut directory = Directory::new(&dataset.students, 20);
        assert_eq!(directory.options("department"), vec!["cse", "ece", "eee"]);

        directory.set_state(FilterState::new().with_value("status", "Current"));
        let filtered = directory.summary_by("department");
        assert_eq!(filtered.total(), 4);
        assert_eq!(filtered.get("cse").unwrap().count, 2);
        assert_eq!(filtered.get("cse").unwrap().percent, 50);

        let full = directory.collection_summary_by("department");
        assert_eq!(full.get("cse").unwrap().count, 3);
        assert_eq!(full.get("cse").unwrap().percent, 60);
    }

    #[test]
    fn test_listing_serializes_camel_case() {
        let dataset = fixtures::dataset();
        let directory = Directory::new(&dataset.rooms, 20);
        let json = serde_json::to_value(directory.listing(1)).unwrap();
        assert_eq!(json["filteredRecords"].as_array().unwrap().len(), 4);
        assert_eq!(json["totalPages"], 1);
    }
}
