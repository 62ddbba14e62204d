//! Named upstream services and the clients that talk to them.
//!
//! # Design
//! A `ServiceRegistry` is a plain name → base URL table, usually read from a
//! TOML `[services]`-style table. `client` is the factory: each call builds a
//! fresh `JsonClient`, nothing is cached.

use std::collections::BTreeMap;

use serde::Deserialize;

use crate::client::{BaseClient, JsonClient};
use crate::error::ClientError;

#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct ServiceRegistry {
    services: BTreeMap<String, String>,
}

impl ServiceRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a TOML table of `name = "base url"` entries.
    pub fn from_toml_str(s: &str) -> Result<Self, ClientError> {
        Ok(toml::from_str(s)?)
    }

    pub fn insert(&mut self, name: impl Into<String>, base_url: impl Into<String>) {
        self.services.insert(name.into(), base_url.into());
    }

    pub fn base_url(&self, name: &str) -> Result<&str, ClientError> {
        self.services
            .get(name)
            .map(String::as_str)
            .ok_or_else(|| ClientError::UnknownService(name.to_string()))
    }

    /// Build a `JsonClient` for the named service.
    pub fn client(&self, name: &str) -> Result<JsonClient, ClientError> {
        JsonClient::new(self.base_url(name)?)
    }

    /// The service's base URL, joined with `path` when one is given.
    pub fn service_url(&self, name: &str, path: Option<&str>) -> Result<String, ClientError> {
        let base_url = self.base_url(name)?;
        match path {
            None | Some("") => Ok(base_url.to_string()),
            Some(path) => Ok(BaseClient::new(base_url)?.join(path)?.into()),
        }
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for ServiceRegistry {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            services: iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
        }
    }
}
