//! Page-based pagination shared by list endpoints
//!
//! Search endpoints return a fixed number of items per page. The requested
//! page is clamped into range rather than rejected, so asking for a page
//! past the end returns the last page.
//!
//! # Example
//!
//! ```rust
//! use newsroom_service::pagination::{pages_number, resolve_page, ITEMS_ON_PAGE};
//!
//! assert_eq!(pages_number(25, ITEMS_ON_PAGE), 3);
//! assert_eq!(resolve_page(5, 3), 3);
//! assert_eq!(resolve_page(1, 0), 1);
//! ```

use serde::{Deserialize, Serialize};

/// Number of items returned per page
pub const ITEMS_ON_PAGE: u32 = 10;

/// Pagination metadata carried in search responses
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct Pagination {
    /// Page actually returned (1-indexed)
    pub current_page: u32,
    /// Total number of pages for the query
    pub pages_number: u32,
    /// Page size
    pub items_on_page: u32,
}

impl Pagination {
    /// Build metadata for a resolved page
    pub fn new(current_page: u32, pages_number: u32) -> Self {
        Self {
            current_page,
            pages_number,
            items_on_page: ITEMS_ON_PAGE,
        }
    }
}

/// One page of results plus the numbers needed to describe it
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    /// Items on this page, in result order
    pub items: Vec<T>,
    /// Total number of pages for the query
    pub pages_number: u32,
    /// Page that was returned after clamping
    pub current_page: u32,
}

impl<T> Page<T> {
    /// Empty result set: no pages, current page 1
    pub fn empty() -> Self {
        Self {
            items: Vec::new(),
            pages_number: 0,
            current_page: 1,
        }
    }

    /// Wire metadata for this page
    pub fn pagination(&self) -> Pagination {
        Pagination::new(self.current_page, self.pages_number)
    }
}

/// Number of pages needed for `total` items, `ceil(total / per_page)`
pub fn pages_number(total: u64, per_page: u32) -> u32 {
    let per_page = u64::from(per_page.max(1));
    let pages = total.div_ceil(per_page);
    u32::try_from(pages).unwrap_or(u32::MAX)
}

/// Clamp a requested page into `[1, max(pages_number, 1)]`
pub fn resolve_page(requested: u32, pages_number: u32) -> u32 {
    requested.clamp(1, pages_number.max(1))
}

/// Page requested on the wire, where zero or negative means "unset"
pub fn requested_page(raw: i64) -> u32 {
    if raw <= 0 {
        1
    } else {
        u32::try_from(raw).unwrap_or(u32::MAX)
    }
}

/// Row offset of the first item on `page`
pub fn offset(page: u32, per_page: u32) -> u64 {
    u64::from(page.saturating_sub(1)) * u64::from(per_page)
}

/// Slice an already ordered result set into the requested page
///
/// Used by in-memory stores; SQL stores push the same arithmetic into
/// `LIMIT`/`OFFSET`.
pub fn paginate<T>(items: Vec<T>, requested: u32) -> Page<T> {
    let pages = pages_number(items.len() as u64, ITEMS_ON_PAGE);
    let current_page = resolve_page(requested, pages);
    let skip = usize::try_from(offset(current_page, ITEMS_ON_PAGE)).unwrap_or(usize::MAX);

    Page {
        items: items
            .into_iter()
            .skip(skip)
            .take(ITEMS_ON_PAGE as usize)
            .collect(),
        pages_number: pages,
        current_page,
    }
}
