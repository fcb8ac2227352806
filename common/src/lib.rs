use derive_more::{Display, From, Into};
use serde::{Deserialize, Serialize};
use serde_json::Value;

mod locale;
pub use locale::{
    LanguageCode, Locale, LocaleError, Resolution, RoutingPrefix, LOCALE_STORAGE_KEY,
};

mod query;
pub use query::{
    mortality_count_path, total_pages, MortalityQuery, QueryError, DEFAULT_PAGE_SIZE,
    MORTALITY_RESOURCE,
};

/// Backend resource listing countries.
pub const COUNTRY_LIST_RESOURCE: &str = "payslist/";

#[derive(
    Debug, Serialize, Deserialize, From, Into, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord,
    Display,
)]
#[serde(transparent)]
pub struct CountryId(pub i64);

/// mortalite/?offset=..&limit=..
///
/// Kept exactly as the backend sent it, accessors only read the fields the
/// views display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, From, Into)]
#[serde(transparent)]
pub struct MortalityRecord(pub Value);

impl MortalityRecord {
    pub fn as_json(&self) -> &Value {
        &self.0
    }

    pub fn field(&self, name: &str) -> Option<&Value> {
        self.0.get(name).filter(|value| !value.is_null())
    }

    pub fn id(&self) -> Option<i64> {
        self.field("id")?.as_i64()
    }

    pub fn id_pays(&self) -> Option<CountryId> {
        self.field("id_pays")?.as_i64().map(CountryId)
    }

    pub fn nom_pays(&self) -> Option<&str> {
        self.field("nom_pays")?.as_str()
    }

    pub fn annee(&self) -> Option<i64> {
        self.field("annee")?.as_i64()
    }

    pub fn valeur(&self) -> Option<f64> {
        self.field("valeur")?.as_f64()
    }

    /// Identity for keyed lists: the backend id, or the record itself when it
    /// has none.
    pub fn key(&self) -> String {
        self.id().map_or_else(|| self.0.to_string(), |id| id.to_string())
    }
}

/// mortalite/count/
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MortalityCount {
    pub count: u64,
}

/// payslist/
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountrySummary {
    pub id: CountryId,
    pub nom: String,
    #[serde(default)]
    pub region: Option<String>,
}
