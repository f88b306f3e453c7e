use std::collections::BTreeMap;
use std::future::Future;
use std::pin::Pin;
use std::time::Duration;

use thiserror::Error;
use tracing::warn;

use crate::config::DEFAULT_TIMEOUT_MS;

const USER_AGENT: &str = concat!("tickchart/", env!("CARGO_PKG_VERSION"));

/// GET request sent by a provider adapter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub url: String,
    pub headers: BTreeMap<String, String>,
    pub timeout_ms: u64,
}

impl HttpRequest {
    pub fn get(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            headers: BTreeMap::new(),
            timeout_ms: DEFAULT_TIMEOUT_MS,
        }
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers
            .insert(name.into().to_ascii_lowercase(), value.into());
        self
    }

    pub fn with_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }
}

/// Status and body of a completed exchange.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn ok_json(body: impl Into<String>) -> Self {
        Self::new(200, body)
    }

    pub const fn is_success(&self) -> bool {
        matches!(self.status, 200..=299)
    }
}

/// Transport-level HTTP error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct HttpError {
    message: String,
}

impl HttpError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Transport used by provider adapters; swapped for a canned client in tests.
pub trait HttpClient: Send + Sync {
    fn execute<'a>(
        &'a self,
        request: HttpRequest,
    ) -> Pin<Box<dyn Future<Output = Result<HttpResponse, HttpError>> + Send + 'a>>;
}

/// HTTP transport backed by reqwest.
///
/// Keeps a cookie store so Yahoo's consent cookies survive between requests.
#[derive(Debug, Clone)]
pub struct ReqwestHttpClient {
    inner: reqwest::Client,
}

impl ReqwestHttpClient {
    pub fn new() -> Self {
        let built = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .cookie_store(true)
            .build();
        Self {
            inner: client_or_default(built),
        }
    }

    pub fn with_client(inner: reqwest::Client) -> Self {
        Self { inner }
    }
}

/// Falls back to reqwest's stock client, which has no cookie store and no
/// tickchart user agent, when the configured one cannot be built.
fn client_or_default(built: Result<reqwest::Client, reqwest::Error>) -> reqwest::Client {
    built.unwrap_or_else(|error| {
        warn!(error = %error, "failed to build http client; using reqwest defaults");
        reqwest::Client::default()
    })
}

impl Default for ReqwestHttpClient {
    fn default() -> Self {
        Self::new()
    }
}

impl HttpClient for ReqwestHttpClient {
    fn execute<'a>(
        &'a self,
        request: HttpRequest,
    ) -> Pin<Box<dyn Future<Output = Result<HttpResponse, HttpError>> + Send + 'a>> {
        Box::pin(async move {
            let outgoing = request.headers.iter().fold(
                self.inner
                    .get(request.url.as_str())
                    .timeout(Duration::from_millis(request.timeout_ms)),
                |outgoing, (name, value)| outgoing.header(name.as_str(), value.as_str()),
            );

            let response = outgoing.send().await.map_err(transport_error)?;
            let status = response.status().as_u16();
            let body = response.text().await.map_err(|e| {
                HttpError::new(format!("could not read body of {}: {e}", request.url))
            })?;

            Ok(HttpResponse::new(status, body))
        })
    }
}

fn transport_error(error: reqwest::Error) -> HttpError {
    let what = if error.is_timeout() {
        "timed out"
    } else if error.is_connect() {
        "could not connect"
    } else {
        "request failed"
    };
    HttpError::new(format!("{what}: {error}"))
}
