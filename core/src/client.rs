//! Base-URL clients for JSON APIs.
//!
//! # Design
//! `BaseClient` owns nothing but the parsed base URL. `JsonClient` layers
//! envelope handling on top: every request method returns `Option<Value>`
//! and reports failures through `tracing` instead of `Err`, so callers only
//! branch on "got data" versus "didn't". Each failure is logged together
//! with a curl command reproducing the request.

use std::time::Duration;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, error, Level};
use url::Url;

use crate::curl;
use crate::envelope;
use crate::error::ClientError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::transport::{Transport, UreqTransport};

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Holds the base URL that request paths are resolved against.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BaseClient {
    base_url: Url,
}

impl BaseClient {
    pub fn new(base_url: &str) -> Result<Self, ClientError> {
        let base_url = Url::parse(base_url).map_err(|e| ClientError::invalid_url(base_url, e))?;
        Ok(Self { base_url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Resolve `path` against the base URL. Relative paths land under the
    /// base; a path with its own scheme replaces it.
    pub fn join(&self, path: &str) -> Result<Url, ClientError> {
        self.base_url
            .join(path)
            .map_err(|e| ClientError::invalid_url(path, e))
    }
}

/// Settings for building a `JsonClient` from configuration files.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct ClientConfig {
    pub base_url: String,
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

/// Per-request overrides.
#[derive(Debug, Clone, Default)]
pub struct RequestOptions {
    pub timeout: Option<Duration>,
    pub headers: Vec<(String, String)>,
}

impl RequestOptions {
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }
}

/// Client for envelope-style JSON APIs.
#[derive(Debug, Clone)]
pub struct JsonClient<T = UreqTransport> {
    base: BaseClient,
    transport: T,
    timeout: Duration,
}

impl JsonClient<UreqTransport> {
    pub fn new(base_url: &str) -> Result<Self, ClientError> {
        Self::with_transport(base_url, UreqTransport::new())
    }

    pub fn from_config(config: &ClientConfig) -> Result<Self, ClientError> {
        let client = Self::new(&config.base_url)?;
        Ok(match config.timeout_secs {
            Some(secs) => client.with_timeout(Duration::from_secs(secs)),
            None => client,
        })
    }
}

impl<T: Transport> JsonClient<T> {
    pub fn with_transport(base_url: &str, transport: T) -> Result<Self, ClientError> {
        Ok(Self {
            base: BaseClient::new(base_url)?,
            transport,
            timeout: DEFAULT_TIMEOUT,
        })
    }

    /// Replace the default timeout applied when a request sets none.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn base_url(&self) -> &Url {
        self.base.base_url()
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub fn build_url(&self, path: &str) -> Result<Url, ClientError> {
        self.base.join(path)
    }

    /// Assemble the request `request` would send, without sending it.
    pub fn build_request<B>(
        &self,
        method: HttpMethod,
        path: &str,
        body: Option<&B>,
        options: &RequestOptions,
    ) -> Result<HttpRequest, ClientError>
    where
        B: Serialize + ?Sized,
    {
        let url = self.build_url(path)?;
        let mut headers = options.headers.clone();
        let body = match body {
            Some(body) => {
                let has_content_type = headers
                    .iter()
                    .any(|(name, _)| name.eq_ignore_ascii_case("content-type"));
                if !has_content_type {
                    headers.push(("Content-type".to_string(), "application/json".to_string()));
                }
                Some(serde_json::to_string(body)?)
            }
            None => None,
        };
        Ok(HttpRequest {
            method,
            url: url.into(),
            headers,
            body,
            timeout: options.timeout.unwrap_or(self.timeout),
        })
    }

    /// Send a request and return the decoded envelope, or `None` after
    /// logging why there is nothing to return.
    pub fn request<B>(
        &self,
        method: HttpMethod,
        path: &str,
        body: Option<&B>,
        options: &RequestOptions,
    ) -> Option<Value>
    where
        B: Serialize + ?Sized,
    {
        let request = match self.build_request(method, path, body, options) {
            Ok(request) => request,
            Err(e) => {
                error!("cannot build {} request for {}: {}", method, path, e);
                return None;
            }
        };

        let response = match self.transport.execute(&request) {
            Ok(response) => response,
            Err(e) => {
                error!("{e}");
                log_request_as_curl(&request, Level::ERROR);
                return None;
            }
        };

        match load_json(&response) {
            Some(data) => {
                log_request_as_curl(&request, Level::DEBUG);
                Some(data)
            }
            None => {
                log_response_body(&response);
                log_request_as_curl(&request, Level::ERROR);
                None
            }
        }
    }

    pub fn get(&self, path: &str, options: &RequestOptions) -> Option<Value> {
        self.request::<()>(HttpMethod::Get, path, None, options)
    }

    pub fn post<B>(&self, path: &str, body: Option<&B>, options: &RequestOptions) -> Option<Value>
    where
        B: Serialize + ?Sized,
    {
        self.request(HttpMethod::Post, path, body, options)
    }

    pub fn put<B>(&self, path: &str, body: Option<&B>, options: &RequestOptions) -> Option<Value>
    where
        B: Serialize + ?Sized,
    {
        self.request(HttpMethod::Put, path, body, options)
    }

    pub fn patch<B>(&self, path: &str, body: Option<&B>, options: &RequestOptions) -> Option<Value>
    where
        B: Serialize + ?Sized,
    {
        self.request(HttpMethod::Patch, path, body, options)
    }

    pub fn delete(&self, path: &str, options: &RequestOptions) -> Option<Value> {
        self.request::<()>(HttpMethod::Delete, path, None, options)
    }

    /// `get`, then deserialize the envelope into `D`.
    pub fn get_as<D: DeserializeOwned>(&self, path: &str, options: &RequestOptions) -> Option<D> {
        decode_into(path, self.get(path, options)?)
    }

    /// `post`, then deserialize the envelope into `D`.
    pub fn post_as<B, D>(&self, path: &str, body: Option<&B>, options: &RequestOptions) -> Option<D>
    where
        B: Serialize + ?Sized,
        D: DeserializeOwned,
    {
        decode_into(path, self.post(path, body, options)?)
    }
}

/// Validate a response and decode its envelope.
///
/// Returns `None` for a non-200 status, a body that is not JSON, or an
/// envelope whose `code` is truthy. A JSON value that is not an object is
/// logged as the wrong type but still returned.
pub fn load_json(response: &HttpResponse) -> Option<Value> {
    if response.status != 200 {
        error!("status_code {} from {}", response.status, response.url);
        return None;
    }
    let data: Value = match serde_json::from_slice(&response.body) {
        Ok(data) => data,
        Err(e) => {
            error!("bad json from {}: {}", response.url, e);
            return None;
        }
    };
    if !data.is_object() {
        error!("wrong response type ({}) from {}", envelope::kind(&data), response.url);
    }
    if let Some(code) = envelope::failure_code(&data) {
        error!("non-zero code ({}) from {}", code, response.url);
        return None;
    }
    Some(data)
}

fn decode_into<D: DeserializeOwned>(path: &str, data: Value) -> Option<D> {
    match serde_json::from_value(data) {
        Ok(decoded) => Some(decoded),
        Err(e) => {
            error!("unexpected response shape from {}: {}", path, e);
            None
        }
    }
}

fn log_request_as_curl(request: &HttpRequest, level: Level) {
    if level == Level::ERROR {
        if tracing::enabled!(Level::ERROR) {
            error!("{}", curl::to_curl(request));
        }
    } else if tracing::enabled!(Level::DEBUG) {
        debug!("{}", curl::to_curl(request));
    }
}

fn log_response_body(response: &HttpResponse) {
    if tracing::enabled!(Level::ERROR) {
        error!("{}", response.body_preview());
    }
}
