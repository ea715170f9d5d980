//! HTTP transport boundary.
//!
//! Everything above this module works against the [`Transport`] trait; the
//! grid sync logic never constructs a request itself. The default
//! implementation, [`HttpTransport`], is a blocking reqwest client with the
//! Basic credentials from [`Config`] attached as a default header. Tests
//! substitute scripted transports.

use std::time::Duration;

use base64::Engine;

use crate::config::Config;
use crate::error::{Error, Result};

/// One HTTP response as seen by the sync layer: status, body, and the only
/// header it ever inspects (`Content-Range`, for pagination).
#[derive(Debug, Clone)]
pub struct TransportResponse {
    /// HTTP status code.
    pub status: u16,
    /// Response body.
    pub body: String,
    /// `Content-Range` header value, when the service sent one.
    pub content_range: Option<String>,
}

impl TransportResponse {
    /// Whether the status is in the 2xx range.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Authenticated HTTP verbs against the configured base URL.
///
/// Paths are relative to the base URL. Implementations attach credentials;
/// callers never see or handle auth. Timeouts are the transport's concern
/// and surface as [`Error::Timeout`].
pub trait Transport {
    /// Issue a GET with query parameters.
    fn get(&self, path: &str, query: &[(&str, String)]) -> Result<TransportResponse>;

    /// Issue a POST with a body of the given content type.
    fn post(&self, path: &str, body: String, content_type: &'static str) -> Result<TransportResponse>;

    /// Issue a PUT with a body of the given content type.
    fn put(&self, path: &str, body: String, content_type: &'static str) -> Result<TransportResponse>;
}

/// Blocking reqwest-backed [`Transport`].
pub struct HttpTransport {
    client: reqwest::blocking::Client,
    base_url: String,
}

impl HttpTransport {
    /// Build a transport from client configuration.
    ///
    /// Credentials are encoded once into a default `Authorization: Basic`
    /// header; every request reuses the same underlying connection pool.
    pub fn new(config: &Config) -> Result<Self> {
        let mut headers = reqwest::header::HeaderMap::new();
        headers.insert(
            reqwest::header::USER_AGENT,
            config
                .user_agent
                .parse()
                .map_err(|e| Error::InvalidConfig(format!("Invalid user agent: {e}")))?,
        );

        let credentials = base64::engine::general_purpose::STANDARD
            .encode(format!("{}:{}", config.user, config.password));
        headers.insert(
            reqwest::header::AUTHORIZATION,
            format!("Basic {credentials}")
                .parse()
                .map_err(|e| Error::InvalidConfig(format!("Invalid credentials: {e}")))?,
        );

        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .default_headers(headers)
            .build()
            .map_err(|e| Error::Network(format!("Failed to build client: {e}")))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    fn execute(&self, request: reqwest::blocking::RequestBuilder) -> Result<TransportResponse> {
        let response = request.send().map_err(|e| {
            if e.is_timeout() {
                Error::Timeout
            } else {
                Error::Network(e.to_string())
            }
        })?;

        let status = response.status().as_u16();
        let content_range = response
            .headers()
            .get(reqwest::header::CONTENT_RANGE)
            .and_then(|v| v.to_str().ok())
            .map(String::from);
        let body = response
            .text()
            .map_err(|e| Error::Network(format!("Failed to read response body: {e}")))?;

        Ok(TransportResponse {
            status,
            body,
            content_range,
        })
    }
}

impl Transport for HttpTransport {
    fn get(&self, path: &str, query: &[(&str, String)]) -> Result<TransportResponse> {
        tracing::debug!("GET {path}");
        let mut request = self.client.get(self.url(path));
        if !query.is_empty() {
            request = request.query(query);
        }
        self.execute(request)
    }

    fn post(&self, path: &str, body: String, content_type: &'static str) -> Result<TransportResponse> {
        tracing::debug!("POST {path}");
        let request = self
            .client
            .post(self.url(path))
            .header(reqwest::header::CONTENT_TYPE, content_type)
            .body(body);
        self.execute(request)
    }

    fn put(&self, path: &str, body: String, content_type: &'static str) -> Result<TransportResponse> {
        tracing::debug!("PUT {path}");
        let request = self
            .client
            .put(self.url(path))
            .header(reqwest::header::CONTENT_TYPE, content_type)
            .body(body);
        self.execute(request)
    }
}
