use std::fmt;

use thiserror::Error;
use url::Url;

/// Source used when the user has never picked one.
pub const DEFAULT_SOURCE_URL: &str = "http://tednewardsandbox.site44.com/questions.json";

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SourceUrlError {
    #[error("source URL cannot be empty")]
    Empty,

    #[error("invalid source URL: {0}")]
    Invalid(String),

    #[error("unsupported URL scheme: {0}")]
    UnsupportedScheme(String),
}

/// Absolute `http`/`https` location of a quiz document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceUrl(Url);

impl SourceUrl {
    /// Parse and validate a user-supplied URL.
    ///
    /// # Errors
    ///
    /// Returns `SourceUrlError` if the value is blank, not a URL, or not http(s).
    pub fn parse(raw: &str) -> Result<Self, SourceUrlError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(SourceUrlError::Empty);
        }
        let url = Url::parse(trimmed).map_err(|err| SourceUrlError::Invalid(err.to_string()))?;
        match url.scheme() {
            "http" | "https" => Ok(Self(url)),
            other => Err(SourceUrlError::UnsupportedScheme(other.to_string())),
        }
    }

    /// The built-in source, `DEFAULT_SOURCE_URL`.
    ///
    /// # Panics
    ///
    /// Panics if the built-in constant stops being a valid URL.
    #[must_use]
    pub fn default_source() -> Self {
        Self(Url::parse(DEFAULT_SOURCE_URL).expect("default source URL should be valid"))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    #[must_use]
    pub fn as_url(&self) -> &Url {
        &self.0
    }
}

impl Default for SourceUrl {
    fn default() -> Self {
        Self::default_source()
    }
}

impl fmt::Display for SourceUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
