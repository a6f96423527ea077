//! Page-number pagination utilities.

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Default page size when the caller does not supply one.
pub const DEFAULT_PAGE_SIZE: u32 = 20;

/// Upper bound on page size, enforced during validation.
pub const MAX_PAGE_SIZE: u32 = 200;

/// Query parameters for paginated listings.
///
/// Pages are 1-based. A missing page defaults to 1, a missing page size
/// to [`DEFAULT_PAGE_SIZE`].
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct PageParams {
    #[validate(range(min = 1, message = "page must be at least 1"))]
    pub page: Option<u32>,

    #[validate(range(
        min = 1,
        max = 200,
        message = "pageSize must be between 1 and 200"
    ))]
    pub page_size: Option<u32>,
}

impl Default for PageParams {
    fn default() -> Self {
        Self {
            page: None,
            page_size: None,
        }
    }
}

impl PageParams {
    /// Effective 1-based page number.
    pub fn page(&self) -> u32 {
        self.page.unwrap_or(1)
    }

    /// Effective page size.
    pub fn page_size(&self) -> u32 {
        self.page_size.unwrap_or(DEFAULT_PAGE_SIZE)
    }

    /// SQL OFFSET for the effective page.
    pub fn offset(&self) -> i64 {
        (self.page() as i64 - 1) * self.page_size() as i64
    }

    /// SQL LIMIT for the effective page.
    pub fn limit(&self) -> i64 {
        self.page_size() as i64
    }
}

/// Pagination metadata echoed back in list responses.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageInfo {
    pub page: u32,
    pub page_size: u32,
    pub total: i64,
    pub total_pages: u32,
}

impl PageInfo {
    /// Build page info from the effective params and a total row count.
    pub fn new(params: &PageParams, total: i64) -> Self {
        Self {
            page: params.page(),
            page_size: params.page_size(),
            total,
            total_pages: total_pages(total, params.page_size()),
        }
    }
}

/// A page of results together with its pagination metadata.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Paginated<T> {
    pub data: Vec<T>,
    pub pagination: PageInfo,
}

/// Number of pages needed to hold `total` rows at `page_size` rows per page.
///
/// Zero rows yield zero pages.
pub fn total_pages(total: i64, page_size: u32) -> u32 {
    if total <= 0 || page_size == 0 {
        return 0;
    }
    ((total as f64) / (page_size as f64)).ceil() as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let params = PageParams::default();
        assert_eq!(params.page(), 1);
        assert_eq!(params.page_size(), DEFAULT_PAGE_SIZE);
        assert_eq!(params.offset(), 0);
        assert_eq!(params.limit(), DEFAULT_PAGE_SIZE as i64);
    }

    #[test]
    fn test_offset_for_later_pages() {
        let params = PageParams {
            page: Some(3),
            page_size: Some(8),
        };
        assert_eq!(params.offset(), 16);
        assert_eq!(params.limit(), 8);
    }

    #[test]
    fn test_total_pages_exact_fit() {
        assert_eq!(total_pages(16, 8), 2);
    }

    #[test]
    fn test_total_pages_with_partial_last_page() {
        // 20 rows at page size 8: pages of 8, 8, 4.
        assert_eq!(total_pages(20, 8), 3);
    }

    #[test]
    fn test_total_pages_zero_rows() {
        assert_eq!(total_pages(0, 8), 0);
    }

    #[test]
    fn test_total_pages_single_row() {
        assert_eq!(total_pages(1, 50), 1);
    }

    #[test]
    fn test_page_info_new() {
        let params = PageParams {
            page: Some(3),
            page_size: Some(8),
        };
        let info = PageInfo::new(&params, 20);
        assert_eq!(info.page, 3);
        assert_eq!(info.page_size, 8);
        assert_eq!(info.total, 20);
        assert_eq!(info.total_pages, 3);
    }

    #[test]
    fn test_page_params_validation_rejects_zero_page() {
        use validator::Validate;
        let params = PageParams {
            page: Some(0),
            page_size: None,
        };
        assert!(params.validate().is_err());
    }

    #[test]
    fn test_page_params_validation_rejects_oversized_page_size() {
        use validator::Validate;
        let params = PageParams {
            page: None,
            page_size: Some(MAX_PAGE_SIZE + 1),
        };
        assert!(params.validate().is_err());
    }

    #[test]
    fn test_paginated_serializes_camel_case() {
        let params = PageParams::default();
        let page = Paginated {
            data: vec![1, 2, 3],
            pagination: PageInfo::new(&params, 3),
        };
        let json = serde_json::to_string(&page).unwrap();
        assert!(json.contains("\"totalPages\":1"));
        assert!(json.contains("\"pageSize\":20"));
    }
}
