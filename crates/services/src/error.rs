//! Shared error types for the services crate.

use thiserror::Error;

use quiz_core::model::{SourceUrlError, TopicId};
use quiz_core::DecodeError;
use storage::repository::StorageError;

/// Errors emitted by a `DataProvider`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum FetchError {
    #[error("quiz source returned status {0}")]
    HttpStatus(reqwest::StatusCode),
    #[error(transparent)]
    Http(#[from] reqwest::Error),
    #[error("quiz source unavailable: {0}")]
    Unavailable(String),
}

/// Errors emitted by `CatalogService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum CatalogError {
    #[error("could not fetch quiz: {0}")]
    Fetch(#[from] FetchError),
    #[error("could not load quiz: {0}")]
    Decode(#[from] DecodeError),
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error(transparent)]
    SourceUrl(#[from] SourceUrlError),
}

/// Errors emitted when starting a session.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SessionStartError {
    #[error("no topic with id {0}")]
    UnknownTopic(TopicId),
}
