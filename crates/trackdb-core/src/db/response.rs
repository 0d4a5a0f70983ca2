//! Module: response
//! Responsibility: the paginated result envelope returned to callers.
//! Does not own: query execution or pagination planning.

use crate::db::query::total_pages;
use serde::{Deserialize, Serialize};

///
/// PageInfo
///
/// Metadata describing where a page sits in the full result set.
///

#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageInfo {
    pub page: u32,
    pub page_size: u32,
    pub total_pages: u64,
    pub total_count: u64,
}

impl PageInfo {
    #[must_use]
    pub const fn new(page: u32, page_size: u32, total_count: u64) -> Self {
        Self {
            page,
            page_size,
            total_pages: total_pages(total_count, page_size),
            total_count,
        }
    }

    #[must_use]
    pub const fn has_next_page(&self) -> bool {
        (self.page as u64) < self.total_pages
    }

    #[must_use]
    pub const fn has_previous_page(&self) -> bool {
        self.page > 1
    }
}

///
/// PaginatedResult
///
/// One page of rows plus its page metadata.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginatedResult<T> {
    pub data: Vec<T>,
    pub pagination: PageInfo,
}

impl<T> PaginatedResult<T> {
    #[must_use]
    pub const fn new(data: Vec<T>, pagination: PageInfo) -> Self {
        Self { data, pagination }
    }

    #[must_use]
    pub const fn len(&self) -> usize {
        self.data.len()
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Transform every row, keeping page metadata.
    #[must_use]
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> PaginatedResult<U> {
        PaginatedResult {
            data: self.data.into_iter().map(f).collect(),
            pagination: self.pagination,
        }
    }

    #[must_use]
    pub fn into_data(self) -> Vec<T> {
        self.data
    }
}
