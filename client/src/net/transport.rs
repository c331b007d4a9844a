//! Request pipeline for the authentication API.
//!
//! SYSTEM CONTEXT
//! ==============
//! Every API call goes through `Transport::request`: the path is joined onto
//! the trusted base URL and checked against it, the stored session token is
//! attached as a bearer header, and the body is parsed as JSON with a raw-text
//! fallback.
//!
//! ERROR HANDLING
//! ==============
//! `request` never fails. Rejected URLs and transport errors come back as an
//! `ApiResponse` with `status == 0` and a `detail` message, so handlers render
//! a message instead of matching on error types.

#[cfg(test)]
#[path = "transport_test.rs"]
mod transport_test;

use std::sync::Arc;

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use url::Url;

use super::backend::{HttpBackend, HttpRequest, Method};
use crate::state::session::TokenStore;

/// Detail reported when the backend could not complete the exchange.
pub const NETWORK_ERROR_DETAIL: &str = "Network error occurred";
/// Detail reported when a path would escape the trusted base URL.
pub const INVALID_URL_DETAIL: &str = "Invalid request URL";
/// Maximum number of raw-text body characters surfaced to the UI.
const MAX_TEXT_CHARS: usize = 200;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TransportError {
    #[error("invalid request URL: {0}")]
    InvalidUrl(String),
    #[error("network error: {0}")]
    Network(String),
    #[error("request encoding failed: {0}")]
    Encode(String),
    #[error("HTTP transport is not available outside the browser")]
    Unavailable,
}

/// Response body: parsed JSON when possible, otherwise the raw text.
#[derive(Clone, Debug, PartialEq)]
pub enum ResponseData {
    Json(Value),
    Text(String),
}

impl ResponseData {
    /// An empty body is treated as an empty JSON object.
    pub fn parse(body: &str) -> Self {
        if body.is_empty() {
            return Self::Json(Value::Object(serde_json::Map::new()));
        }
        serde_json::from_str(body).map_or_else(|_| Self::Text(body.to_owned()), Self::Json)
    }

    pub fn as_json(&self) -> Option<&Value> {
        match self {
            Self::Json(value) => Some(value),
            Self::Text(_) => None,
        }
    }
}

/// Normalized result of one API call.
#[derive(Clone, Debug, PartialEq)]
pub struct ApiResponse {
    pub ok: bool,
    pub status: u16,
    pub data: ResponseData,
}

impl ApiResponse {
    /// Failure that never reached the server.
    pub fn local_failure(detail: &str) -> Self {
        Self {
            ok: false,
            status: 0,
            data: ResponseData::Json(serde_json::json!({ "detail": detail })),
        }
    }

    /// Top-level string field of a JSON object body.
    pub fn json_field(&self, name: &str) -> Option<&str> {
        self.data.as_json()?.get(name)?.as_str()
    }

    /// Decode a JSON body into `T`.
    pub fn decode<T: DeserializeOwned>(&self) -> Option<T> {
        let value = self.data.as_json()?;
        T::deserialize(value).ok()
    }

    /// Server-provided `detail`: a plain string, or a list of validation
    /// errors whose `msg` fields are joined.
    pub fn detail(&self) -> Option<String> {
        match self.data.as_json()?.get("detail")? {
            Value::String(text) if !text.is_empty() => Some(text.clone()),
            Value::Array(items) => {
                let messages = items
                    .iter()
                    .filter_map(|item| item.get("msg").and_then(Value::as_str))
                    .collect::<Vec<_>>();
                (!messages.is_empty()).then(|| messages.join("; "))
            }
            _ => None,
        }
    }

    /// User-facing error text: `detail`, else a non-empty raw-text body,
    /// else `fallback`.
    pub fn error_message(&self, fallback: &str) -> String {
        if let Some(detail) = self.detail() {
            return detail;
        }
        match &self.data {
            ResponseData::Text(text) if !text.trim().is_empty() => {
                text.trim().chars().take(MAX_TEXT_CHARS).collect()
            }
            _ => fallback.to_owned(),
        }
    }
}

/// Per-call request options.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RequestOptions {
    pub method: Method,
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
}

impl RequestOptions {
    pub fn get() -> Self {
        Self::default()
    }

    pub fn post_empty() -> Self {
        Self { method: Method::Post, ..Self::default() }
    }

    /// POST with `body` encoded as JSON.
    ///
    /// # Errors
    ///
    /// Returns `TransportError::Encode` if `body` cannot be serialized.
    pub fn post_json<T: Serialize>(body: &T) -> Result<Self, TransportError> {
        let encoded = serde_json::to_string(body).map_err(|e| TransportError::Encode(e.to_string()))?;
        Ok(Self { method: Method::Post, headers: Vec::new(), body: Some(encoded) })
    }

    #[must_use]
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }
}

/// Callback toggled around every dispatched request.
pub type LoadingIndicator = Arc<dyn Fn(bool) + Send + Sync>;

/// Shows the indicator on creation and hides it on drop, so the hide step
/// runs on every exit path.
struct LoadingGuard<'a> {
    indicator: Option<&'a LoadingIndicator>,
}

impl<'a> LoadingGuard<'a> {
    fn show(indicator: Option<&'a LoadingIndicator>) -> Self {
        if let Some(indicator) = indicator {
            indicator(true);
        }
        Self { indicator }
    }
}

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        if let Some(indicator) = self.indicator {
            indicator(false);
        }
    }
}

/// True for `.` and `..` path segments, including percent-encoded forms.
fn is_dot_segment(segment: &str) -> bool {
    let decoded = segment.to_ascii_lowercase().replace("%2e", ".");
    decoded == "." || decoded == ".."
}

/// Join `path` onto `base_url`, failing closed if the result could reach
/// anything other than the base URL's origin and prefix.
///
/// The returned URL is the normalized form a browser would request.
///
/// # Errors
///
/// Returns `TransportError::InvalidUrl` when `path` is not root-relative,
/// carries a scheme, authority, or dot segment, or the normalized URL leaves
/// the base URL's origin or path prefix.
pub fn resolve_url(base_url: &str, path: &str) -> Result<String, TransportError> {
    let invalid = || TransportError::InvalidUrl(path.to_owned());
    if !path.starts_with('/') || path.starts_with("//") || path.contains("://") || path.contains('\\') {
        return Err(invalid());
    }
    let path_only = path.split(['?', '#']).next().unwrap_or_default();
    if path_only.split('/').any(is_dot_segment) {
        return Err(invalid());
    }
    let base = Url::parse(base_url).map_err(|_| TransportError::InvalidUrl(base_url.to_owned()))?;
    let full = Url::parse(&format!("{base_url}{path}")).map_err(|_| invalid())?;

    let same_origin = full.scheme() == base.scheme()
        && full.host_str() == base.host_str()
        && full.port_or_known_default() == base.port_or_known_default();
    let no_userinfo = full.username().is_empty() && full.password().is_none();
    let prefix = base.as_str().trim_end_matches('/');
    let within_prefix = full
        .as_str()
        .strip_prefix(prefix)
        .is_some_and(|rest| rest.is_empty() || rest.starts_with(['/', '?', '#']));
    if !same_origin || !no_userinfo || !within_prefix {
        return Err(invalid());
    }
    Ok(full.into())
}

/// Default JSON content type, then caller headers (same name replaces), then
/// the bearer token when one is stored.
fn merge_headers(caller: &[(String, String)], token: Option<&str>) -> Vec<(String, String)> {
    let mut headers = vec![("Content-Type".to_owned(), "application/json".to_owned())];
    for (name, value) in caller {
        headers.retain(|(key, _)| !key.eq_ignore_ascii_case(name));
        headers.push((name.clone(), value.clone()));
    }
    if let Some(token) = token {
        headers.retain(|(key, _)| !key.eq_ignore_ascii_case("Authorization"));
        headers.push(("Authorization".to_owned(), format!("Bearer {token}")));
    }
    headers
}

/// API client bound to one trusted base URL and one session store.
#[derive(Clone)]
pub struct Transport<B, S> {
    base_url: String,
    backend: B,
    store: S,
    indicator: Option<LoadingIndicator>,
}

impl<B: HttpBackend, S: TokenStore> Transport<B, S> {
    pub fn new(base_url: impl Into<String>, backend: B, store: S) -> Self {
        let base_url = base_url.into().trim().trim_end_matches('/').to_owned();
        Self { base_url, backend, store, indicator: None }
    }

    #[must_use]
    pub fn with_loading_indicator(mut self, indicator: LoadingIndicator) -> Self {
        self.indicator = Some(indicator);
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn set_base_url(&mut self, base_url: &str) {
        self.base_url = base_url.trim().trim_end_matches('/').to_owned();
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Resolve the URL and headers for one call without dispatching it.
    ///
    /// # Errors
    ///
    /// Returns `TransportError::InvalidUrl` if `path` escapes the base URL.
    pub fn build_request(&self, path: &str, options: RequestOptions) -> Result<HttpRequest, TransportError> {
        let url = resolve_url(&self.base_url, path)?;
        let token = self.store.get_token().filter(|token| !token.is_empty());
        Ok(HttpRequest {
            method: options.method,
            url,
            headers: merge_headers(&options.headers, token.as_deref()),
            body: options.body,
        })
    }

    /// Issue one request and normalize the outcome.
    pub async fn request(&self, path: &str, options: RequestOptions) -> ApiResponse {
        let request = match self.build_request(path, options) {
            Ok(request) => request,
            Err(e) => {
                log::warn!("refusing to dispatch request: {e}");
                return ApiResponse::local_failure(INVALID_URL_DETAIL);
            }
        };

        let _loading = LoadingGuard::show(self.indicator.as_ref());
        log::debug!("{} {}", request.method.as_str(), request.url);
        match self.backend.send(request).await {
            Ok(raw) => ApiResponse {
                ok: (200..300).contains(&raw.status),
                status: raw.status,
                data: ResponseData::parse(&raw.body),
            },
            Err(e) => {
                log::error!("API request to {path} failed: {e}");
                ApiResponse::local_failure(NETWORK_ERROR_DETAIL)
            }
        }
    }

    pub async fn get(&self, path: &str) -> ApiResponse {
        self.request(path, RequestOptions::get()).await
    }

    pub async fn post_empty(&self, path: &str) -> ApiResponse {
        self.request(path, RequestOptions::post_empty()).await
    }

    pub async fn post_json<T: Serialize>(&self, path: &str, body: &T) -> ApiResponse {
        match RequestOptions::post_json(body) {
            Ok(options) => self.request(path, options).await,
            Err(e) => {
                log::error!("could not encode body for {path}: {e}");
                ApiResponse::local_failure("Failed to encode request")
            }
        }
    }
}
