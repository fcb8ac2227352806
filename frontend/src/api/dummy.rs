use std::{
    num::NonZeroU32,
    sync::{Arc, Mutex, MutexGuard},
    time::Duration,
};

use common::{CountryId, CountrySummary, Locale, MortalityQuery, MortalityRecord};
use fastrand::Rng as FastRng;
use leptos::logging;
use serde_json::json;

use super::{error::ApiError, Api};

const COUNTRIES: [(&str, &str); 5] = [
    ("France", "Europe"),
    ("United States", "Americas"),
    ("Switzerland", "Europe"),
    ("South Africa", "Africa"),
    ("Thailand", "Asia"),
];

const YEARS: core::ops::RangeInclusive<i32> = 2000..=2022;

#[derive(Debug)]
struct Data {
    rng: FastRng,
    countries: Vec<CountrySummary>,
    /// ordered by id, like a table scan
    mortality: Vec<MortalityRecord>,
    failure_rate: f32,
}

impl Data {
    fn new(seed: u64, failure_rate: f32) -> Self {
        let mut rng = FastRng::with_seed(seed);
        let countries = COUNTRIES
            .iter()
            .zip(1..)
            .map(|(&(nom, region), id)| CountrySummary {
                id: CountryId(id),
                nom: nom.to_owned(),
                region: Some(region.to_owned()),
            })
            .collect::<Vec<_>>();

        let mut mortality = Vec::new();
        for year in YEARS {
            for country in &countries {
                mortality.push(MortalityRecord(json!({
                    "id": mortality.len() + 1,
                    "id_pays": country.id,
                    "nom_pays": country.nom,
                    "annee": year,
                    "valeur": f64::from(rng.u32(1_000..200_000)) / 100.0,
                    "id_unite": 1,
                })));
            }
        }

        Self {
            rng,
            countries,
            mortality,
            failure_rate,
        }
    }

    fn server_failure(&mut self) -> Result<(), ApiError> {
        if self.rng.f32() < self.failure_rate {
            logging::warn!("Don't worry, it's a simulated error");
            return Err(ApiError::Status { status: 500 });
        }

        Ok(())
    }

    fn filtered(&self, year: Option<NonZeroU32>) -> impl Iterator<Item = &MortalityRecord> {
        self.mortality.iter().filter(move |record| {
            year.map_or(true, |year| record.annee() == Some(i64::from(year.get())))
        })
    }
}

/// In-memory stand-in for a backend, following the same offset/limit/year
/// semantics.
#[derive(Debug, Clone)]
pub struct DummyApi {
    data: Arc<Mutex<Data>>,
    locale: Locale,
    latency: Duration,
}

impl Default for DummyApi {
    fn default() -> Self {
        Self::new(Locale::default())
    }
}

impl DummyApi {
    /// Slow and unreliable in debug builds, to exercise loading and error states.
    pub fn new(locale: Locale) -> Self {
        if cfg!(debug_assertions) {
            Self::with_behaviour(locale, Duration::from_millis(200), 0.05)
        } else {
            Self::with_behaviour(locale, Duration::ZERO, 0.0)
        }
    }

    /// `failure_rate` is the share of requests answered with a 500.
    pub fn with_behaviour(locale: Locale, latency: Duration, failure_rate: f32) -> Self {
        Self {
            data: Arc::new(Mutex::new(Data::new(42, failure_rate))),
            locale,
            latency,
        }
    }

    async fn server_response(&self) {
        // imitate slow server response
        if !self.latency.is_zero() {
            wasmtimer::tokio::sleep(self.latency).await;
        }
    }

    fn lock_data(&self) -> Result<MutexGuard<'_, Data>, ApiError> {
        self.data.lock().map_err(|_| ApiError::Unknown)
    }
}

impl Api for DummyApi {
    fn locale(&self) -> Locale {
        self.locale.clone()
    }

    async fn fetch_mortality_page(
        &self,
        query: MortalityQuery,
    ) -> Result<Box<[MortalityRecord]>, ApiError> {
        logging::log!("Dummy GET {}", query.path());
        self.server_response().await;
        let mut data = self.lock_data()?;
        data.server_failure()?;

        let offset = usize::try_from(query.offset()).unwrap_or(usize::MAX);
        let limit = usize::try_from(query.page_size()).unwrap_or(usize::MAX);
        Ok(data
            .filtered(query.year())
            .skip(offset)
            .take(limit)
            .cloned()
            .collect())
    }

    async fn count_mortality(&self, year: Option<NonZeroU32>) -> Result<u64, ApiError> {
        self.server_response().await;
        let mut data = self.lock_data()?;
        data.server_failure()?;

        Ok(data.filtered(year).count() as u64)
    }

    async fn list_countries(&self) -> Result<Box<[CountrySummary]>, ApiError> {
        self.server_response().await;
        let mut data = self.lock_data()?;
        data.server_failure()?;

        Ok(data.countries.iter().cloned().collect())
    }
}
