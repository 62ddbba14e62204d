//! The seam between the clients and the HTTP library.
//!
//! # Design
//! `Transport` turns an `HttpRequest` into an `HttpResponse` and nothing
//! more: non-2xx statuses come back as data, redirects are followed, the
//! request's timeout is honored, and bodies are read whole with no size cap. Interpreting the response is the client's
//! job. Tests swap in a canned transport so client logic runs without a
//! network.

use tracing::debug;
use ureq::ResponseExt;

use crate::error::ClientError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};

/// Executes one request synchronously.
pub trait Transport {
    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, ClientError>;
}

impl<T: Transport + ?Sized> Transport for &T {
    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, ClientError> {
        (**self).execute(request)
    }
}

/// Blocking transport backed by a `ureq::Agent`.
#[derive(Debug, Clone)]
pub struct UreqTransport {
    agent: ureq::Agent,
}

impl UreqTransport {
    pub fn new() -> Self {
        let agent = ureq::Agent::config_builder()
            .http_status_as_error(false)
            .build()
            .new_agent();
        Self::with_agent(agent)
    }

    /// Use a caller-configured agent. It should have
    /// `http_status_as_error(false)` set, otherwise error statuses surface
    /// as `ClientError::Transport`.
    pub fn with_agent(agent: ureq::Agent) -> Self {
        Self { agent }
    }

    fn prepare<B>(builder: ureq::RequestBuilder<B>, request: &HttpRequest) -> ureq::RequestBuilder<B> {
        let mut builder = builder
            .config()
            .timeout_global(Some(request.timeout))
            .build();
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        builder
    }
}

impl Default for UreqTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl Transport for UreqTransport {
    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, ClientError> {
        let url = request.url.as_str();
        let body = request.body.as_deref().map(str::as_bytes);

        let result = match (request.method, body) {
            (HttpMethod::Get, None) => Self::prepare(self.agent.get(url), request).call(),
            (HttpMethod::Get, Some(body)) => Self::prepare(self.agent.get(url), request)
                .force_send_body()
                .send(body),
            (HttpMethod::Delete, None) => Self::prepare(self.agent.delete(url), request).call(),
            (HttpMethod::Delete, Some(body)) => Self::prepare(self.agent.delete(url), request)
                .force_send_body()
                .send(body),
            (HttpMethod::Post, Some(body)) => Self::prepare(self.agent.post(url), request).send(body),
            (HttpMethod::Post, None) => Self::prepare(self.agent.post(url), request).send_empty(),
            (HttpMethod::Put, Some(body)) => Self::prepare(self.agent.put(url), request).send(body),
            (HttpMethod::Put, None) => Self::prepare(self.agent.put(url), request).send_empty(),
            (HttpMethod::Patch, Some(body)) => Self::prepare(self.agent.patch(url), request).send(body),
            (HttpMethod::Patch, None) => Self::prepare(self.agent.patch(url), request).send_empty(),
        };

        let mut response = result.map_err(|e| ClientError::transport(url, e.to_string()))?;

        let status = response.status().as_u16();
        let final_url = response.get_uri().to_string();
        let headers = response
            .headers()
            .iter()
            .filter_map(|(name, value)| {
                value
                    .to_str()
                    .ok()
                    .map(|value| (name.as_str().to_string(), value.to_string()))
            })
            .collect();
        let body = response
            .body_mut()
            .with_config()
            .limit(u64::MAX)
            .read_to_vec()
            .map_err(|e| ClientError::Body {
                url: final_url.clone(),
                message: e.to_string(),
            })?;

        debug!("{} {} -> {} ({} bytes)", request.method, url, status, body.len());

        Ok(HttpResponse {
            status,
            url: final_url,
            headers,
            body,
        })
    }
}
