//! Convenience clients for JSON-over-HTTP APIs.
//!
//! # Overview
//! `JsonClient` resolves paths against a base URL, sends JSON bodies, and
//! validates the `{"code": ..., ...}` envelope most upstream services wrap
//! their replies in. Failures are logged through `tracing`, each followed by
//! a curl command that reproduces the request, and the caller receives
//! `None`. `DocumentClient` posts to template-rendering endpoints and hands
//! back raw bytes, propagating errors instead.
//!
//! # Design
//! - Clients are immutable after construction and hold only a base URL, a
//!   timeout and a transport.
//! - Requests and responses cross the `Transport` seam as plain data, so the
//!   envelope logic is testable without a network.
//! - The library never installs a tracing subscriber; that is the
//!   application's call.

pub mod client;
pub mod curl;
pub mod document;
pub mod envelope;
pub mod error;
pub mod http;
pub mod prefix;
pub mod services;
pub mod transport;

pub use client::{BaseClient, ClientConfig, JsonClient, RequestOptions, DEFAULT_TIMEOUT};
pub use document::DocumentClient;
pub use error::ClientError;
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use prefix::{check_exclusive_prefixes, check_inclusive_prefixes};
pub use services::ServiceRegistry;
pub use transport::{Transport, UreqTransport};
