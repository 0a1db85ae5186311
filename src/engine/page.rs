//! Table paging.

use serde::Serialize;

/// A 1-based page request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    pub number: usize,
    pub size: usize,
}

impl Page {
    pub fn new(number: usize, size: usize) -> Self {
        Self {
            number: number.max(1),
            size: size.max(1),
        }
    }
}

/// One page of items plus the paging context a table footer needs.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Paged<T> {
    pub items: Vec<T>,
    pub page: usize,
    pub page_size: usize,
    pub total_items: usize,
    pub total_pages: usize,
}

impl<T> Paged<T> {
    pub fn is_last(&self) -> bool {
        self.page >= self.total_pages
    }
}

/// Cut `items` down to the requested page. Pages past the end are empty.
pub fn paginate<T>(items: Vec<T>, page: Page) -> Paged<T> {
    let total_items = items.len();
    let total_pages = total_items.div_ceil(page.size);
    let start = (page.number - 1).saturating_mul(page.size);

    let items = items.into_iter().skip(start).take(page.size).collect();

    Paged {
        items,
        page: page.number,
        page_size: page.size,
        total_items,
        total_pages,
    }
}
