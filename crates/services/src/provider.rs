use std::env;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use tracing::{debug, instrument};

use quiz_core::model::SourceUrl;

use crate::error::FetchError;

/// Supplies the raw quiz document for a source.
///
/// One call, one completion. Retrying is up to the implementation; callers never retry.
#[async_trait]
pub trait DataProvider: Send + Sync {
    /// Fetch the document at `source`.
    ///
    /// # Errors
    ///
    /// Returns `FetchError` if the document cannot be retrieved.
    async fn fetch(&self, source: &SourceUrl) -> Result<Vec<u8>, FetchError>;
}

#[derive(Clone, Debug)]
pub struct HttpProviderConfig {
    pub timeout: Duration,
}

impl Default for HttpProviderConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(15),
        }
    }
}

impl HttpProviderConfig {
    /// Reads `IQUIZ_HTTP_TIMEOUT_SECS`, falling back to the default timeout.
    #[must_use]
    pub fn from_env() -> Self {
        let timeout = env::var("IQUIZ_HTTP_TIMEOUT_SECS")
            .ok()
            .and_then(|value| value.trim().parse::<u64>().ok())
            .filter(|secs| *secs > 0)
            .map_or_else(|| Self::default().timeout, Duration::from_secs);
        Self { timeout }
    }
}

/// `DataProvider` backed by a plain HTTP GET.
#[derive(Clone, Debug)]
pub struct HttpDataProvider {
    client: Client,
}

impl HttpDataProvider {
    /// Build a provider with its own HTTP client.
    ///
    /// # Errors
    ///
    /// Returns `FetchError::Http` if the client cannot be initialised.
    pub fn new(config: &HttpProviderConfig) -> Result<Self, FetchError> {
        let client = Client::builder().timeout(config.timeout).build()?;
        Ok(Self { client })
    }

    /// Build a provider configured from the environment.
    ///
    /// # Errors
    ///
    /// Returns `FetchError::Http` if the client cannot be initialised.
    pub fn from_env() -> Result<Self, FetchError> {
        Self::new(&HttpProviderConfig::from_env())
    }
}

#[async_trait]
impl DataProvider for HttpDataProvider {
    #[instrument(skip_all, fields(source = %source))]
    async fn fetch(&self, source: &SourceUrl) -> Result<Vec<u8>, FetchError> {
        let response = self.client.get(source.as_str()).send().await?;

        if !response.status().is_success() {
            return Err(FetchError::HttpStatus(response.status()));
        }

        let body = response.bytes().await?;
        debug!(bytes = body.len(), "fetched quiz document");
        Ok(body.to_vec())
    }
}
