use core::num::NonZeroU32;

use serde::{Deserialize, Serialize};

/// Backend resource holding mortality records.
pub const MORTALITY_RESOURCE: &str = "mortalite/";

pub const DEFAULT_PAGE_SIZE: u32 = 100;

#[derive(
    Debug,
    thiserror::Error,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
)]
pub enum QueryError {
    #[error("page numbers start at 1")]
    ZeroPage,
    #[error("page size must be at least 1")]
    ZeroPageSize,
}

/// One page of mortality records, optionally restricted to a single year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MortalityQuery {
    page: NonZeroU32,
    page_size: NonZeroU32,
    year: Option<NonZeroU32>,
}

impl Default for MortalityQuery {
    fn default() -> Self {
        Self {
            page: NonZeroU32::MIN,
            page_size: NonZeroU32::new(DEFAULT_PAGE_SIZE).unwrap_or(NonZeroU32::MIN),
            year: None,
        }
    }
}

impl MortalityQuery {
    pub fn new(page: u32, page_size: u32) -> Result<Self, QueryError> {
        Ok(Self {
            page: NonZeroU32::new(page).ok_or(QueryError::ZeroPage)?,
            page_size: NonZeroU32::new(page_size).ok_or(QueryError::ZeroPageSize)?,
            year: None,
        })
    }

    /// Sets the year filter. `Some(0)` is not a year and means "no filter".
    #[must_use]
    pub fn with_year(mut self, year: Option<u32>) -> Self {
        self.year = year.and_then(NonZeroU32::new);
        self
    }

    #[must_use]
    pub fn with_page(mut self, page: NonZeroU32) -> Self {
        self.page = page;
        self
    }

    pub fn page(&self) -> u32 {
        self.page.get()
    }

    pub fn page_size(&self) -> u32 {
        self.page_size.get()
    }

    pub fn year(&self) -> Option<NonZeroU32> {
        self.year
    }

    /// Zero-based index of the first record of the page.
    pub fn offset(&self) -> u64 {
        u64::from(self.page.get() - 1) * u64::from(self.page_size.get())
    }

    /// Path relative to the routing prefix,
    /// e.g. `mortalite/?offset=50&limit=50&year=2020`.
    pub fn path(&self) -> String {
        let (offset, limit) = (self.offset(), self.page_size);
        match self.year {
            Some(year) => format!("{MORTALITY_RESOURCE}?offset={offset}&limit={limit}&year={year}"),
            None => format!("{MORTALITY_RESOURCE}?offset={offset}&limit={limit}"),
        }
    }
}

/// Path of the record count, relative to the routing prefix.
pub fn mortality_count_path(year: Option<NonZeroU32>) -> String {
    match year {
        Some(year) => format!("{MORTALITY_RESOURCE}count/?year={year}"),
        None => format!("{MORTALITY_RESOURCE}count/"),
    }
}

/// Number of pages needed to show `count` records, at least one.
pub fn total_pages(count: u64, page_size: u32) -> u32 {
    let pages = count.div_ceil(u64::from(page_size.max(1))).max(1);
    u32::try_from(pages).unwrap_or(u32::MAX)
}
