//! HTTP dispatch seam beneath the transport.
//!
//! Client-side (hydrate): real HTTP calls via `gloo-net`.
//! Server-side (SSR): the browser backend reports itself unavailable, since
//! the auth API is only called from the browser.

use super::transport::TransportError;

/// HTTP methods used by the auth API.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Method {
    #[default]
    Get,
    Post,
}

impl Method {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
        }
    }
}

/// Fully resolved request handed to a backend.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HttpRequest {
    pub method: Method,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
}

impl HttpRequest {
    /// Case-insensitive header lookup.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

/// Status line and full body text of a completed exchange.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    pub body: String,
}

/// Sends one request and awaits the complete body.
///
/// Implementations return `Err` only for transport-level failures (DNS,
/// refused connection, aborted fetch). Any HTTP status, including 5xx, is a
/// successful exchange.
#[allow(async_fn_in_trait)]
pub trait HttpBackend {
    async fn send(&self, request: HttpRequest) -> Result<RawResponse, TransportError>;
}

/// `fetch`-backed implementation used by the browser build.
#[derive(Clone, Copy, Debug, Default)]
pub struct BrowserBackend;

impl HttpBackend for BrowserBackend {
    async fn send(&self, request: HttpRequest) -> Result<RawResponse, TransportError> {
        #[cfg(feature = "hydrate")]
        {
            let mut builder = match request.method {
                Method::Get => gloo_net::http::Request::get(&request.url),
                Method::Post => gloo_net::http::Request::post(&request.url),
            };
            for (name, value) in &request.headers {
                builder = builder.header(name, value);
            }
            let built = match request.body {
                Some(body) => builder.body(body),
                None => builder.build(),
            }
            .map_err(|e| TransportError::Network(e.to_string()))?;

            let response = built
                .send()
                .await
                .map_err(|e| TransportError::Network(e.to_string()))?;
            let status = response.status();
            let body = response
                .text()
                .await
                .map_err(|e| TransportError::Network(e.to_string()))?;
            Ok(RawResponse { status, body })
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = request;
            Err(TransportError::Unavailable)
        }
    }
}
