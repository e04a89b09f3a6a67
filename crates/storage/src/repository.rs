use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use thiserror::Error;

/// Preference key holding the last-used quiz source URL.
pub const SOURCE_URL_KEY: &str = "source_url";

/// Errors surfaced by storage adapters.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StorageError {
    #[error("connection error: {0}")]
    Connection(String),

    #[error("serialization error: {0}")]
    Serialization(String),
}

/// Last known-good quiz document, stored as received.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CachedDocument {
    pub bytes: Vec<u8>,
    pub saved_at: DateTime<Utc>,
}

/// Key/value store for user preferences such as the quiz source URL.
#[async_trait]
pub trait PreferenceRepository: Send + Sync {
    /// Read a preference.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend cannot be read.
    async fn get_preference(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Write a preference, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the value cannot be stored.
    async fn set_preference(&self, key: &str, value: &str) -> Result<(), StorageError>;
}

/// Single-slot cache holding the most recent raw quiz document.
#[async_trait]
pub trait DocumentCacheRepository: Send + Sync {
    /// Replace the cached document.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the document cannot be stored.
    async fn save_document(
        &self,
        bytes: &[u8],
        saved_at: DateTime<Utc>,
    ) -> Result<(), StorageError>;

    /// Load the cached document, if one was ever saved.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend cannot be read.
    async fn load_document(&self) -> Result<Option<CachedDocument>, StorageError>;
}

/// Simple in-memory repository implementation for testing and prototyping.
#[derive(Clone, Default)]
pub struct InMemoryRepository {
    preferences: Arc<Mutex<HashMap<String, String>>>,
    document: Arc<Mutex<Option<CachedDocument>>>,
}

impl InMemoryRepository {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PreferenceRepository for InMemoryRepository {
    async fn get_preference(&self, key: &str) -> Result<Option<String>, StorageError> {
        let guard = self
            .preferences
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        Ok(guard.get(key).cloned())
    }

    async fn set_preference(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut guard = self
            .preferences
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        guard.insert(key.to_owned(), value.to_owned());
        Ok(())
    }
}

#[async_trait]
impl DocumentCacheRepository for InMemoryRepository {
    async fn save_document(
        &self,
        bytes: &[u8],
        saved_at: DateTime<Utc>,
    ) -> Result<(), StorageError> {
        let mut guard = self
            .document
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        *guard = Some(CachedDocument {
            bytes: bytes.to_vec(),
            saved_at,
        });
        Ok(())
    }

    async fn load_document(&self) -> Result<Option<CachedDocument>, StorageError> {
        let guard = self
            .document
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        Ok(guard.clone())
    }
}

/// Aggregates the preference and cache repositories behind trait objects for easy backend swapping.
#[derive(Clone)]
pub struct Storage {
    pub preferences: Arc<dyn PreferenceRepository>,
    pub documents: Arc<dyn DocumentCacheRepository>,
}

impl Storage {
    #[must_use]
    pub fn in_memory() -> Self {
        let repo = InMemoryRepository::new();
        let preferences: Arc<dyn PreferenceRepository> = Arc::new(repo.clone());
        let documents: Arc<dyn DocumentCacheRepository> = Arc::new(repo);
        Self {
            preferences,
            documents,
        }
    }
}
