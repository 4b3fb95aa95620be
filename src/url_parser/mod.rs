//! Validated, decomposed URLs.
//!
//! A [`ParsedUrl`] only exists once its input was cleaned, fully matched by
//! the whole-URL grammar and its top-level domain was found in the reference
//! set. See [`ParsedUrl::parse`] for the construction steps.

mod parser;
mod url_collection;
mod url_validator;


pub use url_collection::{FoundUrl, UrlCollection};
pub use url_validator::{validate_grammar, validate_top_level_domain};

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

/// Protocols accepted by the URL grammar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Protocol {
    Http,
    Https,
    Ftp,
}

impl Protocol {
    pub fn as_str(&self) -> &'static str {
        match self {
            Protocol::Http => "http",
            Protocol::Https => "https",
            Protocol::Ftp => "ftp",
        }
    }
}

impl fmt::Display for Protocol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned for tokens outside `http`, `https` and `ftp`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownProtocol(pub String);

impl fmt::Display for UnknownProtocol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown protocol: {}", self.0)
    }
}

impl std::error::Error for UnknownProtocol {}

impl FromStr for Protocol {
    type Err = UnknownProtocol;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "http" => Ok(Protocol::Http),
            "https" => Ok(Protocol::Https),
            "ftp" => Ok(Protocol::Ftp),
            _ => Err(UnknownProtocol(s.to_string())),
        }
    }
}

/// A URL that passed cleaning, grammar validation and TLD validation.
///
/// `protocol`, the domains and the top-level domain are always present;
/// path, query and fragment identifier are independently optional.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct ParsedUrl {
    url: String,
    protocol: Protocol,
    complete_domain: String,
    root_domain: String,
    top_level_domain: String,
    path: Option<String>,
    query: Option<String>,
    fragment_identifier: Option<String>,
}

impl ParsedUrl {
    /// The cleaned URL text.
    pub fn as_str(&self) -> &str {
        &self.url
    }

    pub fn protocol(&self) -> Protocol {
        self.protocol
    }

    /// Host including subdomains, e.g. `meta.stackoverflow.com`.
    pub fn complete_domain(&self) -> &str {
        &self.complete_domain
    }

    /// Last two host segments, e.g. `stackoverflow.com`.
    pub fn root_domain(&self) -> &str {
        &self.root_domain
    }

    pub fn top_level_domain(&self) -> &str {
        &self.top_level_domain
    }

    /// Path without leading and trailing slashes.
    pub fn path(&self) -> Option<&str> {
        self.path.as_deref()
    }

    /// Query string without the leading `?`.
    pub fn query(&self) -> Option<&str> {
        self.query.as_deref()
    }

    /// Fragment identifier without the leading `#`.
    pub fn fragment_identifier(&self) -> Option<&str> {
        self.fragment_identifier.as_deref()
    }
}

impl fmt::Display for ParsedUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.url)
    }
}

impl AsRef<str> for ParsedUrl {
    fn as_ref(&self) -> &str {
        &self.url
    }
}
