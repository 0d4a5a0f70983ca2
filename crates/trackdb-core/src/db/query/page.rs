//! Module: query::page
//! Responsibility: page requests, their validation against configured
//! limits, and the row window they select.

use crate::{DEFAULT_MAX_PAGE_SIZE, DEFAULT_PAGE_SIZE};
use serde::{Deserialize, Serialize};
use thiserror::Error as ThisError;

///
/// PageError
///

#[derive(Clone, Copy, Debug, Eq, PartialEq, ThisError)]
pub enum PageError {
    #[error("page must be at least 1, got {page}")]
    PageOutOfRange { page: u32 },

    #[error("page size must be at least 1, got {page_size}")]
    PageSizeOutOfRange { page_size: u32 },

    #[error("page size {page_size} exceeds the maximum of {max}")]
    PageSizeExceedsMax { page_size: u32, max: u32 },
}

///
/// QueryLimits
///
/// Bounds applied to every page request.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct QueryLimits {
    pub max_page_size: u32,
    pub default_page_size: u32,
}

impl QueryLimits {
    #[must_use]
    pub const fn new(max_page_size: u32, default_page_size: u32) -> Self {
        Self {
            max_page_size,
            default_page_size,
        }
    }
}

impl Default for QueryLimits {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_PAGE_SIZE, DEFAULT_PAGE_SIZE)
    }
}

///
/// PaginationSpec
///
/// One-based page number plus an optional page size, as supplied by a
/// caller. An omitted size falls back to the configured default when the
/// request is planned.
///

#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(default, deny_unknown_fields, rename_all = "camelCase")]
pub struct PaginationSpec {
    pub page: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_size: Option<u32>,
}

impl PaginationSpec {
    #[must_use]
    pub const fn new(page: u32, page_size: u32) -> Self {
        Self {
            page,
            page_size: Some(page_size),
        }
    }

    /// Page `page` at whatever size the limits default to.
    #[must_use]
    pub const fn at(page: u32) -> Self {
        Self {
            page,
            page_size: None,
        }
    }

    /// Requested size, or the configured default when none was given.
    #[must_use]
    pub const fn page_size_or_default(&self, limits: &QueryLimits) -> u32 {
        match self.page_size {
            Some(page_size) => page_size,
            None => limits.default_page_size,
        }
    }

    /// Copy of this request with the page size filled in from `limits`.
    #[must_use]
    pub const fn resolve(&self, limits: &QueryLimits) -> Self {
        Self::new(self.page, self.page_size_or_default(limits))
    }

    /// Check the request against `limits`. Out-of-range input is rejected,
    /// never clamped.
    pub const fn validate(&self, limits: &QueryLimits) -> Result<(), PageError> {
        let page_size = self.page_size_or_default(limits);

        if self.page < 1 {
            return Err(PageError::PageOutOfRange { page: self.page });
        }
        if page_size < 1 {
            return Err(PageError::PageSizeOutOfRange { page_size });
        }
        if page_size > limits.max_page_size {
            return Err(PageError::PageSizeExceedsMax {
                page_size,
                max: limits.max_page_size,
            });
        }

        Ok(())
    }

    /// Validate and compute the row window for this page.
    pub const fn window(&self, limits: &QueryLimits) -> Result<PageWindow, PageError> {
        if let Err(err) = self.validate(limits) {
            return Err(err);
        }
        let page_size = self.page_size_or_default(limits);

        Ok(PageWindow {
            offset: (self.page as u64 - 1) * page_size as u64,
            limit: page_size,
        })
    }
}

impl Default for PaginationSpec {
    fn default() -> Self {
        Self::at(1)
    }
}

///
/// PageWindow
///
/// Half-open row range `[offset, offset + limit)` over the ordered
/// result sequence.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct PageWindow {
    pub offset: u64,
    pub limit: u32,
}

impl PageWindow {
    /// Exclusive end of the window.
    #[must_use]
    pub const fn end(&self) -> u64 {
        self.offset.saturating_add(self.limit as u64)
    }
}

/// Number of pages needed for `total_count` rows, zero when there are none.
#[must_use]
pub const fn total_pages(total_count: u64, page_size: u32) -> u64 {
    if page_size == 0 {
        return 0;
    }

    total_count.div_ceil(page_size as u64)
}
