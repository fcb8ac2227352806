use common::{Locale, RoutingPrefix};

use super::transport::HttpRequest;

pub const JSON_CONTENT_TYPE: (&str, &str) = ("Content-Type", "application/json");

/// Everything a client needs to address the backend of one locale.
///
/// The routing prefix is computed once, from the locale the config was built
/// for, and never changes afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    origin: String,
    locale: Locale,
    prefix: RoutingPrefix,
    headers: Vec<(String, String)>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self::for_locale(Locale::default())
    }
}

impl ApiConfig {
    pub fn for_locale(locale: Locale) -> Self {
        let (name, value) = JSON_CONTENT_TYPE;
        Self {
            origin: String::new(),
            prefix: locale.routing_prefix(),
            locale,
            headers: vec![(name.to_owned(), value.to_owned())],
        }
    }

    /// Sends requests to another host than the one serving the page.
    #[must_use]
    pub fn with_origin(mut self, origin: impl Into<String>) -> Self {
        let origin = origin.into();
        self.origin = origin.trim_end_matches('/').to_owned();
        self
    }

    pub fn locale(&self) -> &Locale {
        &self.locale
    }

    pub fn prefix(&self) -> &RoutingPrefix {
        &self.prefix
    }

    pub fn headers(&self) -> &[(String, String)] {
        &self.headers
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}{path}", self.origin, self.prefix)
    }

    pub fn request(&self, path: &str) -> HttpRequest {
        HttpRequest {
            url: self.url(path),
            headers: self.headers.clone(),
        }
    }
}

#[cfg(test)]
mod test {
    use common::Locale;

    use super::ApiConfig;

    #[test]
    fn urls() {
        let config = ApiConfig::for_locale("ch_de".parse::<Locale>().unwrap());
        assert_eq!(config.prefix().as_str(), "/api/ch/de/");
        assert_eq!(config.url("payslist/"), "/api/ch/de/payslist/");

        let config = ApiConfig::default().with_origin("http://localhost:3000/");
        assert_eq!(config.locale(), &Locale::France);
        assert_eq!(
            config.url("mortalite/count/"),
            "http://localhost:3000/api/fr/mortalite/count/"
        );
    }

    #[test]
    fn json_header() {
        let request = ApiConfig::default().request("payslist/");
        assert_eq!(
            request.headers,
            vec![("Content-Type".to_string(), "application/json".to_string())]
        );
    }
}
