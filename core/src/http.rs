//! HTTP transport types.
//!
//! # Design
//! Requests and responses are plain data. Clients build an `HttpRequest`,
//! hand it to a `Transport`, and inspect the returned `HttpResponse`; status
//! codes are data, never errors. The same `HttpRequest` value feeds the
//! curl-equivalent dump, so what gets logged is exactly what was sent.

use std::fmt;
use std::time::Duration;

/// Characters of response body kept when a body is written to the log.
pub const BODY_PREVIEW_LIMIT: usize = 255;

/// HTTP method for a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl HttpMethod {
    pub fn as_str(self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Patch => "PATCH",
            HttpMethod::Delete => "DELETE",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An HTTP request described as plain data.
#[derive(Debug, Clone)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub url: String,
    pub headers: Vec<(String, String)>,
    /// JSON text, when the request carries a body.
    pub body: Option<String>,
    pub timeout: Duration,
}

/// An HTTP response described as plain data.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    /// Final URL after any redirects the transport followed.
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: Vec<u8>,
}

impl HttpResponse {
    /// The body decoded as UTF-8.
    pub fn text(&self) -> Result<&str, std::str::Utf8Error> {
        std::str::from_utf8(&self.body)
    }

    /// Leading part of the body for logging: up to `BODY_PREVIEW_LIMIT`
    /// characters of text, or that many raw bytes (escaped) when the body is
    /// not UTF-8.
    pub fn body_preview(&self) -> String {
        match self.text() {
            Ok(text) => text.chars().take(BODY_PREVIEW_LIMIT).collect(),
            Err(_) => {
                let end = self.body.len().min(BODY_PREVIEW_LIMIT);
                self.body[..end].escape_ascii().to_string()
            }
        }
    }

    /// First header value matching `name`, compared case-insensitively.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}
