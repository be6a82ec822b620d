//! Pagination types for list queries.

use serde::{Deserialize, Serialize};

/// Default page size.
const DEFAULT_PAGE_SIZE: u64 = 25;
/// Maximum page size.
const MAX_PAGE_SIZE: u64 = 100;

/// Request parameters for paginated queries.
///
/// Deserialized requests are clamped the same way as [`PageRequest::new`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "RawPageRequest")]
pub struct PageRequest {
    /// Page number (1-based).
    pub page: u64,
    /// Number of items per page.
    pub page_size: u64,
}

/// Wire form of [`PageRequest`] before clamping.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawPageRequest {
    #[serde(default = "default_page")]
    page: u64,
    #[serde(default = "default_page_size")]
    page_size: u64,
}

impl From<RawPageRequest> for PageRequest {
    fn from(raw: RawPageRequest) -> Self {
        Self::new(raw.page, raw.page_size)
    }
}

impl PageRequest {
    /// Create a new page request.
    pub fn new(page: u64, page_size: u64) -> Self {
        Self {
            page: page.max(1),
            page_size: page_size.clamp(1, MAX_PAGE_SIZE),
        }
    }

    /// Number of items to skip.
    pub fn offset(&self) -> u64 {
        self.page.saturating_sub(1).saturating_mul(self.page_size)
    }

    /// Maximum number of items on the page.
    pub fn limit(&self) -> u64 {
        self.page_size
    }

    /// Slice one page out of an already filtered and ordered list.
    pub fn paginate<T: Serialize>(&self, items: Vec<T>) -> PageResponse<T> {
        let total_items = items.len() as u64;
        let page_items = items
            .into_iter()
            .skip(usize::try_from(self.offset()).unwrap_or(usize::MAX))
            .take(usize::try_from(self.limit()).unwrap_or(usize::MAX))
            .collect();
        PageResponse::new(page_items, self.page, self.page_size, total_items)
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: 1,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

/// Paginated response wrapper.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageResponse<T: Serialize> {
    /// The items on this page.
    pub items: Vec<T>,
    /// Current page number (1-based).
    pub page: u64,
    /// Number of items per page.
    pub page_size: u64,
    /// Total number of items across all pages.
    pub total_items: u64,
    /// Total number of pages.
    pub total_pages: u64,
    /// Whether there is a next page.
    pub has_next: bool,
    /// Whether there is a previous page.
    pub has_previous: bool,
}

impl<T: Serialize> PageResponse<T> {
    /// Create a new paginated response.
    pub fn new(items: Vec<T>, page: u64, page_size: u64, total_items: u64) -> Self {
        let total_pages = if total_items == 0 {
            1
        } else {
            total_items.div_ceil(page_size.max(1))
        };
        Self {
            items,
            page,
            page_size,
            total_items,
            total_pages,
            has_next: page < total_pages,
            has_previous: page > 1,
        }
    }

    /// Convert the items, keeping the paging fields.
    pub fn map<U: Serialize>(self, f: impl FnMut(T) -> U) -> PageResponse<U> {
        PageResponse {
            items: self.items.into_iter().map(f).collect(),
            page: self.page,
            page_size: self.page_size,
            total_items: self.total_items,
            total_pages: self.total_pages,
            has_next: self.has_next,
            has_previous: self.has_previous,
        }
    }
}

fn default_page() -> u64 {
    1
}

fn default_page_size() -> u64 {
    DEFAULT_PAGE_SIZE
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_request_clamps() {
        let page = PageRequest::new(0, 1_000);
        assert_eq!(page.page, 1);
        assert_eq!(page.page_size, MAX_PAGE_SIZE);
    }

    #[test]
    fn test_paginate_middle_page() {
        let page = PageRequest::new(2, 3).paginate((1..=8).collect::<Vec<u32>>());
        assert_eq!(page.items, vec![4, 5, 6]);
        assert_eq!(page.total_items, 8);
        assert_eq!(page.total_pages, 3);
        assert!(page.has_next);
        assert!(page.has_previous);
    }

    #[test]
    fn test_deserialized_request_is_clamped() {
        let page: PageRequest =
            serde_json::from_str(r#"{"page":0,"pageSize":0}"#).expect("deserialize");
        assert_eq!(page.page, 1);
        assert_eq!(page.page_size, 1);

        let page: PageRequest = serde_json::from_str(r#"{"pageSize":500}"#).expect("deserialize");
        assert_eq!(page.page, 1);
        assert_eq!(page.page_size, MAX_PAGE_SIZE);
    }

    #[test]
    fn test_huge_page_is_empty_not_overflow() {
        let request = PageRequest {
            page: u64::MAX,
            page_size: MAX_PAGE_SIZE,
        };
        assert_eq!(request.offset(), u64::MAX);
        let page = request.paginate(vec![1, 2, 3]);
        assert!(page.items.is_empty());
        assert!(!page.has_next);
    }

    #[test]
    fn test_zero_page_size_response() {
        let page = PageResponse::new(Vec::<u32>::new(), 1, 0, 4);
        assert_eq!(page.total_pages, 4);
    }

    #[test]
    fn test_paginate_empty() {
        let page = PageRequest::default().paginate(Vec::<u32>::new());
        assert!(page.items.is_empty());
        assert_eq!(page.total_pages, 1);
        assert!(!page.has_next);
    }
}
