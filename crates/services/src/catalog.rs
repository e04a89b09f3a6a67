use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{info, instrument, warn};

use quiz_core::model::{SourceUrl, Topic, TopicList};
use quiz_core::{Clock, parse_document};
use storage::repository::{
    DocumentCacheRepository, PreferenceRepository, SOURCE_URL_KEY, Storage,
};

use crate::error::CatalogError;
use crate::provider::DataProvider;

/// Where a loaded topic list came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogOrigin {
    /// Fetched just now from the source.
    Network,
    /// Served from the offline cache after the fetch failed.
    Cache { saved_at: DateTime<Utc> },
}

/// A decoded topic list together with its provenance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadedCatalog {
    pub source: SourceUrl,
    pub topics: Vec<Topic>,
    pub origin: CatalogOrigin,
}

/// Loads the quiz catalog: resolves the source, fetches, decodes, and keeps the
/// offline cache current.
///
/// This service owns:
/// - the time source (`Clock`) used to stamp cached documents
/// - the data provider
/// - preference and cache repositories
#[derive(Clone)]
pub struct CatalogService {
    clock: Clock,
    provider: Arc<dyn DataProvider>,
    preferences: Arc<dyn PreferenceRepository>,
    documents: Arc<dyn DocumentCacheRepository>,
}

impl CatalogService {
    #[must_use]
    pub fn new(
        clock: Clock,
        provider: Arc<dyn DataProvider>,
        preferences: Arc<dyn PreferenceRepository>,
        documents: Arc<dyn DocumentCacheRepository>,
    ) -> Self {
        Self {
            clock,
            provider,
            preferences,
            documents,
        }
    }

    #[must_use]
    pub fn from_storage(clock: Clock, provider: Arc<dyn DataProvider>, storage: &Storage) -> Self {
        Self::new(
            clock,
            provider,
            Arc::clone(&storage.preferences),
            Arc::clone(&storage.documents),
        )
    }

    /// The stored source URL, or the built-in default when none is stored.
    ///
    /// A stored value that no longer parses is ignored.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::Storage` if preferences cannot be read.
    pub async fn source_url(&self) -> Result<SourceUrl, CatalogError> {
        let stored = self.preferences.get_preference(SOURCE_URL_KEY).await?;
        let Some(raw) = stored else {
            return Ok(SourceUrl::default());
        };
        match SourceUrl::parse(&raw) {
            Ok(url) => Ok(url),
            Err(err) => {
                warn!(stored = %raw, error = %err, "ignoring invalid stored source URL");
                Ok(SourceUrl::default())
            }
        }
    }

    /// Validate and remember a new source URL.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::SourceUrl` if `raw` is not an http(s) URL, or
    /// `CatalogError::Storage` if it cannot be saved.
    pub async fn set_source_url(&self, raw: &str) -> Result<SourceUrl, CatalogError> {
        let url = SourceUrl::parse(raw)?;
        self.preferences
            .set_preference(SOURCE_URL_KEY, url.as_str())
            .await?;
        info!(source = %url, "source URL updated");
        Ok(url)
    }

    /// Fetch and decode the catalog, falling back to the cache if the fetch fails.
    ///
    /// A document that fails to decode is never written to the cache.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::Decode` if the fetched (or cached) document is
    /// invalid, and `CatalogError::Fetch` if the fetch failed and nothing is cached.
    #[instrument(skip(self))]
    pub async fn load(&self) -> Result<LoadedCatalog, CatalogError> {
        let source = self.source_url().await?;

        let fetch_err = match self.provider.fetch(&source).await {
            Ok(bytes) => {
                let topics = parse_document(&bytes)?;
                if let Err(err) = self.documents.save_document(&bytes, self.clock.now()).await {
                    warn!(error = %err, "failed to refresh document cache");
                }
                info!(source = %source, topics = topics.len(), "catalog loaded from network");
                return Ok(LoadedCatalog {
                    source,
                    topics,
                    origin: CatalogOrigin::Network,
                });
            }
            Err(err) => err,
        };

        warn!(source = %source, error = %fetch_err, "fetch failed, trying offline cache");
        let cached = match self.documents.load_document().await {
            Ok(Some(cached)) => cached,
            Ok(None) => return Err(fetch_err.into()),
            Err(err) => {
                warn!(error = %err, "failed to read document cache");
                return Err(fetch_err.into());
            }
        };

        let topics = parse_document(&cached.bytes)?;
        info!(
            topics = topics.len(),
            saved_at = %cached.saved_at,
            "catalog loaded from cache"
        );
        Ok(LoadedCatalog {
            source,
            topics,
            origin: CatalogOrigin::Cache {
                saved_at: cached.saved_at,
            },
        })
    }

    /// Reload into `list`, leaving it untouched on any error.
    ///
    /// # Errors
    ///
    /// Same as [`CatalogService::load`].
    pub async fn refresh(&self, list: &mut TopicList) -> Result<CatalogOrigin, CatalogError> {
        let loaded = self.load().await?;
        list.replace(loaded.topics);
        Ok(loaded.origin)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use quiz_core::time::fixed_now;
    use storage::repository::InMemoryRepository;

    use crate::error::FetchError;

    struct Unreachable;

    #[async_trait]
    impl DataProvider for Unreachable {
        async fn fetch(&self, _source: &SourceUrl) -> Result<Vec<u8>, FetchError> {
            Err(FetchError::Unavailable("offline".into()))
        }
    }

    fn service(repo: &InMemoryRepository) -> CatalogService {
        CatalogService::new(
            Clock::fixed(fixed_now()),
            Arc::new(Unreachable),
            Arc::new(repo.clone()),
            Arc::new(repo.clone()),
        )
    }

    #[tokio::test]
    async fn source_defaults_when_unset() {
        let repo = InMemoryRepository::new();
        let url = service(&repo).source_url().await.unwrap();
        assert_eq!(url, SourceUrl::default());
    }

    #[tokio::test]
    async fn invalid_stored_source_falls_back_to_default() {
        let repo = InMemoryRepository::new();
        repo.set_preference(SOURCE_URL_KEY, "not a url").await.unwrap();
        let url = service(&repo).source_url().await.unwrap();
        assert_eq!(url, SourceUrl::default());
    }

    #[tokio::test]
    async fn set_source_url_validates_and_persists() {
        let repo = InMemoryRepository::new();
        let svc = service(&repo);

        let err = svc.set_source_url("ftp://example.com/q.json").await.unwrap_err();
        assert!(matches!(err, CatalogError::SourceUrl(_)));
        assert_eq!(repo.get_preference(SOURCE_URL_KEY).await.unwrap(), None);

        let url = svc.set_source_url("https://example.com/q.json").await.unwrap();
        assert_eq!(svc.source_url().await.unwrap(), url);
    }

    #[tokio::test]
    async fn offline_without_cache_reports_fetch_error() {
        let repo = InMemoryRepository::new();
        let err = service(&repo).load().await.unwrap_err();
        assert!(matches!(err, CatalogError::Fetch(FetchError::Unavailable(_))));
    }
}
