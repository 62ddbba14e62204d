//! Error types for the client layer.
//!
//! # Design
//! `JsonClient` request methods never return these: they log and yield
//! `None`. `ClientError` surfaces from construction, from the service
//! registry, and from `DocumentClient`, which hands transport failures back
//! to its caller unmodified.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClientError {
    /// A base URL could not be parsed, or a path could not be joined onto it.
    #[error("invalid url {url}: {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    /// The request payload could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    Serialize(#[from] serde_json::Error),

    /// The request never produced a response (connection refused, timeout,
    /// too many redirects, ...).
    #[error("request to {url} failed: {message}")]
    Transport { url: String, message: String },

    /// A response arrived but its body could not be read.
    #[error("failed to read response body from {url}: {message}")]
    Body { url: String, message: String },

    /// No base URL is registered under this service name.
    #[error("unknown service: {0}")]
    UnknownService(String),

    /// The service table could not be parsed.
    #[error("invalid service configuration: {0}")]
    Config(#[from] toml::de::Error),
}

impl ClientError {
    pub(crate) fn invalid_url(url: impl Into<String>, source: url::ParseError) -> Self {
        ClientError::InvalidUrl {
            url: url.into(),
            source,
        }
    }

    pub(crate) fn transport(url: impl Into<String>, message: impl Into<String>) -> Self {
        ClientError::Transport {
            url: url.into(),
            message: message.into(),
        }
    }
}
