#![forbid(unsafe_code)]

pub mod catalog;
pub mod error;
pub mod provider;
pub mod sessions;

pub use quiz_core::Clock;

pub use catalog::{CatalogOrigin, CatalogService, LoadedCatalog};
pub use error::{CatalogError, FetchError, SessionStartError};
pub use provider::{DataProvider, HttpDataProvider, HttpProviderConfig};
pub use sessions::{Intent, SessionProgress, SessionStarter, SessionView, apply_intent};
