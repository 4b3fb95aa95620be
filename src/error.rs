use std::path::PathBuf;
use thiserror::Error;

/// A mandatory grammar component did not match.
///
/// Raised by the extraction primitives in [`crate::patterns`] when the
/// protocol, complete domain or root domain cannot be found. Optional
/// components (path, query, fragment) never produce this error.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExtractionError {
    #[error("Extraction of protocol failed for URL: {0}")]
    Protocol(String),

    #[error("Extraction of complete domain failed for URL: {0}")]
    CompleteDomain(String),

    #[error("Extraction of root domain failed for domain: {0}")]
    RootDomain(String),
}

/// Construction of a [`crate::ParsedUrl`] failed.
///
/// Batch callers are expected to log the offending input and carry on with
/// the next one.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MalformedUrlError {
    /// The cleaned input is not fully matched by the whole-URL grammar.
    #[error("Malformed URL: {0}")]
    Grammar(String),

    /// The suffix of the root domain is not in the reference set.
    #[error("Invalid top-level domain '{tld}' in URL: {url}")]
    TopLevelDomain { tld: String, url: String },

    /// The whole-URL grammar matched but a mandatory sub-grammar did not.
    #[error("Inconsistent decomposition of URL {url}: {source}")]
    Decomposition {
        url: String,
        #[source]
        source: ExtractionError,
    },
}

impl MalformedUrlError {
    /// The input the error refers to.
    pub fn url(&self) -> &str {
        match self {
            MalformedUrlError::Grammar(url) => url,
            MalformedUrlError::TopLevelDomain { url, .. } => url,
            MalformedUrlError::Decomposition { url, .. } => url,
        }
    }
}

/// Loading or installing the top-level domain reference set failed.
#[derive(Error, Debug)]
pub enum TldLoadError {
    #[error("Failed to read top-level domain list {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Top-level domain list contains no entries")]
    Empty,

    #[error("Top-level domain reference set is already initialized")]
    AlreadyInitialized,
}
