use std::future::Future;

use send_wrapper::SendWrapper;

use super::error::ApiError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub url: String,
    pub headers: Vec<(String, String)>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Something able to perform a GET request.
///
/// Network level failures are reported as [`ApiError::Network`]; any response,
/// whatever its status, is returned as is.
pub trait Transport: Send + Sync + 'static {
    fn get(
        &self,
        request: HttpRequest,
    ) -> impl Future<Output = Result<HttpResponse, ApiError>> + Send + Sync;
}

/// Browser `fetch`, through `gloo-net`.
#[derive(Debug, Clone, Copy, Default)]
pub struct GlooTransport;

impl Transport for GlooTransport {
    fn get(
        &self,
        HttpRequest { url, headers }: HttpRequest,
    ) -> impl Future<Output = Result<HttpResponse, ApiError>> + Send + Sync {
        // js futures are !Send, but the browser only ever has the one thread
        SendWrapper::new(async move {
            let mut builder = gloo_net::http::Request::get(&url);
            for (name, value) in &headers {
                builder = builder.header(name, value);
            }
            let response = builder
                .send()
                .await
                .map_err(|err| ApiError::Network(err.to_string()))?;
            let status = response.status();
            let body = response
                .text()
                .await
                .map_err(|err| ApiError::Network(err.to_string()))?;
            Ok(HttpResponse { status, body })
        })
    }
}
