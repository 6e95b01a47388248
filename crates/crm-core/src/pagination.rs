//! Paging types for list queries and API responses

use serde::{Deserialize, Serialize};

pub const DEFAULT_PAGE_SIZE: i64 = 20;
pub const MAX_PAGE_SIZE: i64 = 100;

/// Paging parameters (from query string)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginationParams {
    /// Page number (1-indexed)
    #[serde(default = "default_page_number")]
    pub page_number: i64,

    /// Items per page
    #[serde(default = "default_page_size")]
    pub page_size: i64,
}

fn default_page_number() -> i64 {
    1
}

fn default_page_size() -> i64 {
    DEFAULT_PAGE_SIZE
}

impl Default for PaginationParams {
    fn default() -> Self {
        Self {
            page_number: 1,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl PaginationParams {
    pub fn new(page_number: i64, page_size: i64) -> Self {
        Self {
            page_number,
            page_size,
        }
    }

    /// Calculate the SQL offset, saturating for pages far past the end
    pub fn offset(&self) -> i64 {
        (self.page_number.max(1) - 1).saturating_mul(self.limit())
    }

    /// Calculate the SQL limit
    pub fn limit(&self) -> i64 {
        self.page_size.clamp(1, MAX_PAGE_SIZE)
    }
}

/// One page of a result set with paging metadata
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PagedResult<T> {
    pub items: Vec<T>,
    pub page_number: i64,
    pub page_size: i64,
    pub total_count: i64,
    pub total_pages: i64,
    pub has_previous_page: bool,
    pub has_next_page: bool,
}

impl<T> PagedResult<T> {
    pub fn new(items: Vec<T>, total_count: i64, params: PaginationParams) -> Self {
        let page_size = params.limit();
        let page_number = params.page_number.max(1);
        let total_pages = (total_count + page_size - 1) / page_size;

        Self {
            items,
            page_number,
            page_size,
            total_count,
            total_pages,
            has_previous_page: page_number > 1,
            has_next_page: page_number < total_pages,
        }
    }

    pub fn empty(params: PaginationParams) -> Self {
        Self::new(Vec::new(), 0, params)
    }

    /// Map the items, keeping the paging metadata
    pub fn map<U, F: FnMut(T) -> U>(self, f: F) -> PagedResult<U> {
        PagedResult {
            items: self.items.into_iter().map(f).collect(),
            page_number: self.page_number,
            page_size: self.page_size,
            total_count: self.total_count,
            total_pages: self.total_pages,
            has_previous_page: self.has_previous_page,
            has_next_page: self.has_next_page,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pagination_default() {
        let p = PaginationParams::default();
        assert_eq!(p.limit(), 20);
        assert_eq!(p.offset(), 0);
    }

    #[test]
    fn test_pagination_page() {
        let p = PaginationParams::new(3, 10);
        assert_eq!(p.limit(), 10);
        assert_eq!(p.offset(), 20);
    }

    #[test]
    fn test_pagination_clamps_page_size() {
        let p = PaginationParams::new(1, 5_000);
        assert_eq!(p.limit(), MAX_PAGE_SIZE);
    }

    #[test]
    fn test_offset_saturates_on_huge_page_number() {
        let p = PaginationParams::new(i64::MAX, MAX_PAGE_SIZE);
        assert_eq!(p.offset(), i64::MAX);

        let result = PagedResult::<u8>::empty(p);
        assert_eq!(result.total_pages, 0);
        assert!(!result.has_next_page);
    }

    #[test]
    fn test_paged_result() {
        let items = vec![1, 2, 3, 4, 5];
        let result = PagedResult::new(items, 50, PaginationParams::new(2, 5));

        assert_eq!(result.page_number, 2);
        assert_eq!(result.total_pages, 10);
        assert!(result.has_next_page);
        assert!(result.has_previous_page);
    }

    #[test]
    fn test_paged_result_last_page() {
        let result = PagedResult::new(vec!["a"], 21, PaginationParams::new(3, 10));
        assert_eq!(result.total_pages, 3);
        assert!(!result.has_next_page);

        let mapped = result.map(|s| s.len());
        assert_eq!(mapped.items, vec![1]);
        assert_eq!(mapped.total_count, 21);
    }

    #[test]
    fn test_serializes_camel_case() {
        let result = PagedResult::new(vec![1], 1, PaginationParams::default());
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["totalCount"], 1);
        assert_eq!(json["hasNextPage"], false);
    }
}
