//! Page requests and the page envelope returned by every list endpoint.

use serde::{Deserialize, Serialize};

use crate::config::PaginationConfig;
use crate::error::ApiError;

/// Raw `?page=&size=` query parameters before validation
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct PageParams {
    pub page: Option<i64>,
    pub size: Option<i64>,
}

/// A validated, zero-based page request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: u32,
    pub size: u32,
}

impl PageRequest {
    pub const DEFAULT_PAGE: u32 = 0;
    pub const DEFAULT_SIZE: u32 = 10;

    pub fn new(page: u32, size: u32) -> Self {
        Self { page, size }
    }

    /// Validate query parameters against the configured bounds
    pub fn from_params(params: PageParams, limits: &PaginationConfig) -> Result<Self, ApiError> {
        let page = params.page.unwrap_or(i64::from(Self::DEFAULT_PAGE));
        let size = params.size.unwrap_or(i64::from(limits.default_size));

        if page < 0 || page > i64::from(u32::MAX) {
            return Err(ApiError::bad_request(format!("page must be zero or positive, got {}", page)));
        }
        if size < 1 || size > i64::from(limits.max_size) {
            return Err(ApiError::bad_request(format!(
                "size must be between 1 and {}, got {}",
                limits.max_size, size
            )));
        }

        Ok(Self::new(page as u32, size as u32))
    }

    pub fn offset(&self) -> u64 {
        u64::from(self.page) * u64::from(self.size)
    }

    pub fn limit(&self) -> u64 {
        u64::from(self.size)
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::new(Self::DEFAULT_PAGE, Self::DEFAULT_SIZE)
    }
}

/// One page of rows plus the total row count, as returned by repositories
#[derive(Debug, Clone)]
pub struct PageSlice<T> {
    pub items: Vec<T>,
    pub total: u64,
}

/// Pagination envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageModel<T> {
    pub page: u32,
    pub size: u32,
    pub total_elements: u64,
    pub total_pages: u64,
    pub elements: Vec<T>,
}

impl<T> PageModel<T> {
    pub fn new(request: &PageRequest, slice: PageSlice<T>) -> Self {
        let size = u64::from(request.size.max(1));
        Self {
            page: request.page,
            size: request.size,
            total_elements: slice.total,
            total_pages: slice.total.div_ceil(size),
            elements: slice.items,
        }
    }
}
