//! Client for template-rendering services that answer with a document.
//!
//! Unlike `JsonClient`, nothing here is swallowed: join, serialization and
//! transport failures reach the caller as `ClientError`, and the response
//! body comes back as-is whatever its status.

use serde::Serialize;
use tracing::info;
use url::Url;

use crate::client::{BaseClient, DEFAULT_TIMEOUT};
use crate::error::ClientError;
use crate::http::{HttpMethod, HttpRequest};
use crate::transport::{Transport, UreqTransport};

#[derive(Debug, Clone)]
pub struct DocumentClient<T = UreqTransport> {
    base: BaseClient,
    transport: T,
}

impl DocumentClient<UreqTransport> {
    pub fn new(base_url: &str) -> Result<Self, ClientError> {
        Self::with_transport(base_url, UreqTransport::new())
    }
}

impl<T: Transport> DocumentClient<T> {
    pub fn with_transport(base_url: &str, transport: T) -> Result<Self, ClientError> {
        Ok(Self {
            base: BaseClient::new(base_url)?,
            transport,
        })
    }

    pub fn base_url(&self) -> &Url {
        self.base.base_url()
    }

    /// Render `template_path` with `data` and return the document bytes.
    pub fn generate<D>(&self, template_path: &str, data: &D) -> Result<Vec<u8>, ClientError>
    where
        D: Serialize + ?Sized,
    {
        self.generate_with_url(template_path, data)
            .map(|(document, _)| document)
    }

    /// Like `generate`, also returning the URL the document was finally
    /// served from after redirects.
    pub fn generate_with_url<D>(
        &self,
        template_path: &str,
        data: &D,
    ) -> Result<(Vec<u8>, Url), ClientError>
    where
        D: Serialize + ?Sized,
    {
        let url = self.base.join(template_path)?;
        let request = HttpRequest {
            method: HttpMethod::Post,
            url: url.to_string(),
            headers: vec![("Content-type".to_string(), "application/json".to_string())],
            body: Some(serde_json::to_string(data)?),
            timeout: DEFAULT_TIMEOUT,
        };
        info!("initial url: {url}");

        let response = self.transport.execute(&request)?;
        info!(
            "redirected url: {} ({})",
            response.url,
            response.header("content-type").unwrap_or("no content type")
        );

        let final_url =
            Url::parse(&response.url).map_err(|e| ClientError::invalid_url(&response.url, e))?;
        Ok((response.body, final_url))
    }
}
