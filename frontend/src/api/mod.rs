use std::{future::Future, num::NonZeroU32};

use common::{total_pages, CountrySummary, Locale, MortalityQuery, MortalityRecord};
use serde::{Deserialize, Serialize};

pub use error::ApiError;

pub mod config;
pub mod dummy;
pub mod error;
pub mod real;
pub mod transport;

/// One rendered page of the mortality table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MortalityPage {
    pub data: Box<[MortalityRecord]>,
    pub page: u32,
    pub total_pages: u32,
}

/// Fetches the page `query` points to, along with the total page count for
/// its year filter. Issues two requests, count first.
pub fn static_mortality_page(
    api: &impl Api,
    query: MortalityQuery,
) -> impl Future<Output = Result<MortalityPage, ApiError>> + Send + Sync {
    let api = api.clone();
    async move {
        let count = api.count_mortality(query.year()).await?;
        let data = api.fetch_mortality_page(query).await?;
        Ok(MortalityPage {
            data,
            page: query.page(),
            total_pages: total_pages(count, query.page_size()),
        })
    }
}

pub fn static_list_countries(
    api: &impl Api,
) -> impl Future<Output = Result<Box<[CountrySummary]>, ApiError>> + Send + Sync {
    let api = api.clone();
    async move { api.list_countries().await }
}

pub trait Api: Clone + Send + Sync + 'static {
    /// Locale the client was bound to at construction.
    fn locale(&self) -> Locale;

    /// `GET <prefix>mortalite/?offset=..&limit=..[&year=..]`, exactly one request.
    ///
    /// Records come back in backend order, untouched.
    fn fetch_mortality_page(
        &self,
        query: MortalityQuery,
    ) -> impl Future<Output = Result<Box<[MortalityRecord]>, ApiError>> + Send + Sync;

    fn count_mortality(
        &self,
        year: Option<NonZeroU32>,
    ) -> impl Future<Output = Result<u64, ApiError>> + Send + Sync;

    fn list_countries(
        &self,
    ) -> impl Future<Output = Result<Box<[CountrySummary]>, ApiError>> + Send + Sync;
}
