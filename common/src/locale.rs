use core::{fmt, str::FromStr};

use derive_more::Display;
use serde::{Deserialize, Serialize};

/// Key under which the selected locale token lives in browser storage.
pub const LOCALE_STORAGE_KEY: &str = "selectedCountry";

const SWISS_PREFIX: &str = "ch_";

#[derive(
    Debug,
    thiserror::Error,
    Clone,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
)]
pub enum LocaleError {
    #[error("locale token is empty")]
    Empty,
    #[error("unknown locale token {0:?}")]
    Unknown(String),
    #[error("swiss locale token {0:?} has no usable language segment")]
    InvalidLanguage(String),
}

/// Language segment of a swiss locale, e.g. `de` in `ch_de`.
///
/// Never empty and made of ASCII alphanumerics only, so it is always safe to
/// splice into a url path.
#[derive(
    Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Display,
)]
#[serde(try_from = "String", into = "String")]
pub struct LanguageCode(String);

impl LanguageCode {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for LanguageCode {
    type Error = LocaleError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        if !value.is_empty() && value.bytes().all(|b| b.is_ascii_alphanumeric()) {
            Ok(Self(value))
        } else {
            Err(LocaleError::InvalidLanguage(format!("{SWISS_PREFIX}{value}")))
        }
    }
}

impl FromStr for LanguageCode {
    type Err = LocaleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::try_from(s.to_owned())
    }
}

/// Country (and, for Switzerland, language) the backend is selected by.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Locale {
    #[default]
    France,
    UnitedStates,
    Switzerland(LanguageCode),
}

/// Routing prefix every request of a client is built upon, e.g. `/api/ch/de/`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Display)]
pub struct RoutingPrefix(String);

impl RoutingPrefix {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for RoutingPrefix {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Outcome of resolving a stored token. `rejected` is set whenever a present
/// token could not be used and the default locale was picked instead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    pub locale: Locale,
    pub rejected: Option<LocaleError>,
}

impl Locale {
    /// Tokens served by the deployment, in selector order.
    pub const KNOWN: [&'static str; 5] = ["fr", "us", "ch_fr", "ch_en", "ch_de"];

    pub fn known() -> impl Iterator<Item = Locale> {
        Self::KNOWN.into_iter().filter_map(|token| token.parse().ok())
    }

    /// Resolves an optional stored token, falling back to [`Locale::France`].
    ///
    /// Absence is not an error, anything else that fails to parse is reported
    /// in [`Resolution::rejected`].
    pub fn resolve(token: Option<&str>) -> Resolution {
        match token.map(str::parse::<Locale>) {
            None | Some(Err(LocaleError::Empty)) => Resolution {
                locale: Self::default(),
                rejected: None,
            },
            Some(Ok(locale)) => Resolution {
                locale,
                rejected: None,
            },
            Some(Err(err)) => Resolution {
                locale: Self::default(),
                rejected: Some(err),
            },
        }
    }

    /// Token form, as persisted in storage. Parses back into `self`.
    pub fn token(&self) -> String {
        self.to_string()
    }

    pub fn routing_prefix(&self) -> RoutingPrefix {
        RoutingPrefix(match self {
            Locale::France => "/api/fr/".to_owned(),
            Locale::UnitedStates => "/api/us/".to_owned(),
            Locale::Switzerland(lang) => format!("/api/ch/{lang}/"),
        })
    }

    /// Human readable label for selectors.
    pub fn label(&self) -> String {
        match self {
            Locale::France => "France".to_owned(),
            Locale::UnitedStates => "United States".to_owned(),
            Locale::Switzerland(lang) => format!("Switzerland ({lang})"),
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Locale::France => f.write_str("fr"),
            Locale::UnitedStates => f.write_str("us"),
            Locale::Switzerland(lang) => write!(f, "{SWISS_PREFIX}{lang}"),
        }
    }
}

impl FromStr for Locale {
    type Err = LocaleError;

    fn from_str(token: &str) -> Result<Self, Self::Err> {
        match token {
            "" => Err(LocaleError::Empty),
            "fr" => Ok(Locale::France),
            "us" => Ok(Locale::UnitedStates),
            _ if token.starts_with(SWISS_PREFIX) => {
                // second `_`-separated segment, anything after a further `_` is ignored
                let lang = token.split('_').nth(1).unwrap_or_default();
                LanguageCode::try_from(lang.to_owned())
                    .map(Locale::Switzerland)
                    .map_err(|_| LocaleError::InvalidLanguage(token.to_owned()))
            }
            _ => Err(LocaleError::Unknown(token.to_owned())),
        }
    }
}

impl TryFrom<String> for Locale {
    type Error = LocaleError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Locale> for String {
    fn from(value: Locale) -> Self {
        value.token()
    }
}

impl From<LanguageCode> for String {
    fn from(value: LanguageCode) -> Self {
        value.0
    }
}

#[cfg(test)]
mod test {
    use super::{LanguageCode, Locale, LocaleError};

    fn prefix(token: Option<&str>) -> String {
        Locale::resolve(token).locale.routing_prefix().to_string()
    }

    #[test]
    fn known_countries() {
        assert_eq!(prefix(Some("fr")), "/api/fr/");
        assert_eq!(prefix(Some("us")), "/api/us/");
    }

    #[test]
    fn swiss_languages() {
        assert_eq!(prefix(Some("ch_fr")), "/api/ch/fr/");
        assert_eq!(prefix(Some("ch_en")), "/api/ch/en/");
        assert_eq!(prefix(Some("ch_de")), "/api/ch/de/");
        // not limited to the deployed languages
        assert_eq!(prefix(Some("ch_it")), "/api/ch/it/");
        // only the second segment counts
        assert_eq!(prefix(Some("ch_de_extra")), "/api/ch/de/");
    }

    #[test]
    fn fallback() {
        assert_eq!(prefix(None), "/api/fr/");
        assert_eq!(prefix(Some("")), "/api/fr/");
        assert_eq!(prefix(Some("xx")), "/api/fr/");
        assert_eq!(prefix(Some("FR")), "/api/fr/");
        assert_eq!(prefix(Some("ch_")), "/api/fr/");
        assert_eq!(prefix(Some("ch__de")), "/api/fr/");
        assert_eq!(prefix(Some("ch_a/b")), "/api/fr/");
    }

    #[test]
    fn fallback_is_reported() {
        assert_eq!(Locale::resolve(None).rejected, None);
        assert_eq!(Locale::resolve(Some("")).rejected, None);
        assert_eq!(Locale::resolve(Some("us")).rejected, None);
        assert_eq!(
            Locale::resolve(Some("xx")).rejected,
            Some(LocaleError::Unknown("xx".to_string()))
        );
        assert_eq!(
            Locale::resolve(Some("ch_")).rejected,
            Some(LocaleError::InvalidLanguage("ch_".to_string()))
        );
    }

    #[test]
    fn token_round_trip() {
        for locale in Locale::known() {
            assert_eq!(locale.token().parse::<Locale>(), Ok(locale.clone()));
        }
        assert_eq!(
            Locale::known().map(|l| l.token()).collect::<Vec<_>>(),
            Locale::KNOWN
        );
    }

    #[test]
    fn prefixes_come_from_locales() {
        for locale in Locale::known() {
            let prefix = locale.routing_prefix();
            assert!(prefix.as_str().starts_with("/api/"));
            assert!(prefix.as_str().ends_with('/'));
            assert!(!prefix.as_str().contains("//"));
        }
    }

    #[test]
    fn serde_uses_token() {
        let locale = Locale::Switzerland("de".parse::<LanguageCode>().unwrap());
        let json = serde_json::to_string(&locale).unwrap();
        assert_eq!(json, "\"ch_de\"");
        assert_eq!(serde_json::from_str::<Locale>(&json).unwrap(), locale);
        assert!(serde_json::from_str::<Locale>("\"ch_\"").is_err());
    }
}
