use std::{future::Future, num::NonZeroU32, sync::Arc};

use common::{
    mortality_count_path, CountrySummary, Locale, MortalityCount, MortalityQuery,
    MortalityRecord, COUNTRY_LIST_RESOURCE,
};
use leptos::logging;
use serde::de::DeserializeOwned;

use super::{
    config::ApiConfig,
    error::ApiError,
    transport::{GlooTransport, Transport},
    Api,
};

#[derive(Debug)]
struct Inner<T> {
    config: ApiConfig,
    transport: T,
}

impl<T: Transport> Inner<T> {
    async fn get_json<R: DeserializeOwned>(&self, path: String) -> Result<R, ApiError> {
        let request = self.config.request(&path);
        let url = request.url.clone();
        logging::log!("GET {url}");

        let response = self.transport.get(request).await.inspect_err(|err| {
            logging::warn!("GET {url}: {err}");
        })?;
        if !response.is_success() {
            logging::warn!("GET {url}: status {}", response.status);
            return Err(ApiError::Status {
                status: response.status,
            });
        }

        serde_json::from_str(&response.body).map_err(|err| {
            logging::warn!("GET {url}: undecodable body: {err}");
            ApiError::Decode(err.to_string())
        })
    }
}

/// Client talking to the backend selected by its [`ApiConfig`].
#[derive(Debug)]
pub struct RealApi<T = GlooTransport> {
    inner: Arc<Inner<T>>,
}

impl<T> Clone for RealApi<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl RealApi {
    pub fn for_locale(locale: Locale) -> Self {
        Self::new(ApiConfig::for_locale(locale), GlooTransport)
    }
}

impl<T: Transport> RealApi<T> {
    pub fn new(config: ApiConfig, transport: T) -> Self {
        logging::log!(
            "api bound to locale {}, prefix {}",
            config.locale(),
            config.prefix()
        );
        Self {
            inner: Arc::new(Inner { config, transport }),
        }
    }

    pub fn config(&self) -> &ApiConfig {
        &self.inner.config
    }
}

impl<T: Transport> Api for RealApi<T> {
    fn locale(&self) -> Locale {
        self.inner.config.locale().clone()
    }

    fn fetch_mortality_page(
        &self,
        query: MortalityQuery,
    ) -> impl Future<Output = Result<Box<[MortalityRecord]>, ApiError>> + Send + Sync {
        let inner = Arc::clone(&self.inner);
        async move { inner.get_json(query.path()).await }
    }

    fn count_mortality(
        &self,
        year: Option<NonZeroU32>,
    ) -> impl Future<Output = Result<u64, ApiError>> + Send + Sync {
        let inner = Arc::clone(&self.inner);
        async move {
            let MortalityCount { count } = inner.get_json(mortality_count_path(year)).await?;
            Ok(count)
        }
    }

    fn list_countries(
        &self,
    ) -> impl Future<Output = Result<Box<[CountrySummary]>, ApiError>> + Send + Sync {
        let inner = Arc::clone(&self.inner);
        async move { inner.get_json(COUNTRY_LIST_RESOURCE.to_owned()).await }
    }
}

#[cfg(test)]
mod test {
    use std::{
        collections::VecDeque,
        future::{ready, Future},
        num::NonZeroU32,
        sync::{Arc, Mutex},
    };

    use common::{Locale, MortalityQuery};
    use futures::executor::block_on;
    use serde_json::Value;

    use super::RealApi;
    use crate::api::{
        config::ApiConfig,
        static_mortality_page,
        transport::{HttpRequest, HttpResponse, Transport},
        Api, ApiError,
    };

    /// Answers requests from a queue and remembers what was asked.
    #[derive(Debug, Clone, Default)]
    struct Recorder {
        requests: Arc<Mutex<Vec<HttpRequest>>>,
        responses: Arc<Mutex<VecDeque<Result<HttpResponse, ApiError>>>>,
    }

    impl Recorder {
        fn respond(&self, status: u16, body: &str) -> &Self {
            self.responses.lock().unwrap().push_back(Ok(HttpResponse {
                status,
                body: body.to_string(),
            }));
            self
        }

        fn fail(&self, err: ApiError) -> &Self {
            self.responses.lock().unwrap().push_back(Err(err));
            self
        }

        fn urls(&self) -> Vec<String> {
            self.requests
                .lock()
                .unwrap()
                .iter()
                .map(|request| request.url.clone())
                .collect()
        }
    }

    impl Transport for Recorder {
        fn get(
            &self,
            request: HttpRequest,
        ) -> impl Future<Output = Result<HttpResponse, ApiError>> + Send + Sync {
            self.requests.lock().unwrap().push(request);
            let response = self
                .responses
                .lock()
                .unwrap()
                .pop_front()
                .expect("unexpected request");
            ready(response)
        }
    }

    fn api(token: &str, recorder: &Recorder) -> RealApi<Recorder> {
        let locale = Locale::resolve(Some(token)).locale;
        RealApi::new(ApiConfig::for_locale(locale), recorder.clone())
    }

    const RECORDS: &str = r#"[
        {"id": 7, "id_pays": 1, "nom_pays": "France", "annee": 2020, "valeur": 1.5, "id_unite": null},
        {"id": 3, "id_pays": 2, "annee": 2019, "valeur": 4.25}
    ]"#;

    #[test]
    fn first_page() {
        let recorder = Recorder::default();
        recorder.respond(200, RECORDS);
        let records = block_on(api("fr", &recorder).fetch_mortality_page(MortalityQuery::default()))
            .unwrap();

        assert_eq!(recorder.urls(), ["/api/fr/mortalite/?offset=0&limit=100"]);
        // passed through in backend order
        assert_eq!(
            records.iter().map(|r| r.id()).collect::<Vec<_>>(),
            vec![Some(7), Some(3)]
        );
    }

    #[test]
    fn records_pass_through() {
        let body = r#"[
            {"id": 1, "id_pays": 1, "annee": 2020, "valeur": null, "region": "EU"},
            {"id_pays": 1, "annee": 2020, "valeur": 3.0}
        ]"#;
        let recorder = Recorder::default();
        recorder.respond(200, body);
        let records = block_on(api("fr", &recorder).fetch_mortality_page(MortalityQuery::default()))
            .unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].field("region"), Some(&Value::from("EU")));
        assert_eq!(records[1].id(), None);
        assert_eq!(
            serde_json::to_value(&records).unwrap(),
            serde_json::from_str::<Value>(body).unwrap()
        );
    }

    #[test]
    fn year_filtered_page() {
        let recorder = Recorder::default();
        recorder.respond(200, "[]");
        let query = MortalityQuery::new(2, 50).unwrap().with_year(Some(2020));
        let records = block_on(api("ch_de", &recorder).fetch_mortality_page(query)).unwrap();

        assert!(records.is_empty());
        assert_eq!(
            recorder.urls(),
            ["/api/ch/de/mortalite/?offset=50&limit=50&year=2020"]
        );
    }

    #[test]
    fn zero_year_is_no_filter() {
        let recorder = Recorder::default();
        recorder.respond(200, "[]");
        let query = MortalityQuery::default().with_year(Some(0));
        block_on(api("us", &recorder).fetch_mortality_page(query)).unwrap();

        assert_eq!(recorder.urls(), ["/api/us/mortalite/?offset=0&limit=100"]);
    }

    #[test]
    fn unknown_locale_uses_fallback_prefix() {
        let recorder = Recorder::default();
        recorder.respond(200, "[]");
        let api = api("xx", &recorder);
        block_on(api.fetch_mortality_page(MortalityQuery::default())).unwrap();

        assert_eq!(api.locale(), Locale::France);
        assert_eq!(recorder.urls(), ["/api/fr/mortalite/?offset=0&limit=100"]);
    }

    #[test]
    fn sends_json_content_type() {
        let recorder = Recorder::default();
        recorder.respond(200, "[]");
        block_on(api("fr", &recorder).list_countries()).unwrap();

        let requests = recorder.requests.lock().unwrap();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].url, "/api/fr/payslist/");
        assert!(requests[0]
            .headers
            .iter()
            .any(|(name, value)| name == "Content-Type" && value == "application/json"));
    }

    #[test]
    fn server_error_is_not_an_empty_page() {
        let recorder = Recorder::default();
        recorder.respond(500, "Internal Server Error");
        let result = block_on(api("fr", &recorder).fetch_mortality_page(MortalityQuery::default()));

        assert_eq!(result, Err(ApiError::Status { status: 500 }));
    }

    #[test]
    fn network_error_propagates() {
        let recorder = Recorder::default();
        recorder.fail(ApiError::Network("connection refused".to_string()));
        let result = block_on(api("fr", &recorder).fetch_mortality_page(MortalityQuery::default()));

        assert_eq!(
            result,
            Err(ApiError::Network("connection refused".to_string()))
        );
        // no retry
        assert_eq!(recorder.urls().len(), 1);
    }

    #[test]
    fn malformed_body() {
        let recorder = Recorder::default();
        recorder.respond(200, r#"{"not": "a list"}"#);
        let result = block_on(api("fr", &recorder).fetch_mortality_page(MortalityQuery::default()));

        assert!(matches!(result, Err(ApiError::Decode(_))));
    }

    #[test]
    fn count() {
        let recorder = Recorder::default();
        recorder
            .respond(200, r#"{"count": 250}"#)
            .respond(200, r#"{"count": 12}"#);
        let api = api("us", &recorder);

        assert_eq!(block_on(api.count_mortality(None)), Ok(250));
        assert_eq!(block_on(api.count_mortality(NonZeroU32::new(2001))), Ok(12));
        assert_eq!(
            recorder.urls(),
            [
                "/api/us/mortalite/count/",
                "/api/us/mortalite/count/?year=2001"
            ]
        );
    }

    #[test]
    fn page_with_total() {
        let recorder = Recorder::default();
        recorder
            .respond(200, r#"{"count": 250}"#)
            .respond(200, RECORDS);
        let query = MortalityQuery::new(3, 100).unwrap();
        let page = block_on(static_mortality_page(&api("fr", &recorder), query)).unwrap();

        assert_eq!(page.page, 3);
        assert_eq!(page.total_pages, 3);
        assert_eq!(page.data.len(), 2);
        assert_eq!(
            recorder.urls(),
            [
                "/api/fr/mortalite/count/",
                "/api/fr/mortalite/?offset=200&limit=100"
            ]
        );
    }

    #[test]
    fn failed_count_skips_page() {
        let recorder = Recorder::default();
        recorder.respond(502, "");
        let result = block_on(static_mortality_page(
            &api("fr", &recorder),
            MortalityQuery::default(),
        ));

        assert_eq!(result, Err(ApiError::Status { status: 502 }));
        assert_eq!(recorder.urls().len(), 1);
    }
}
