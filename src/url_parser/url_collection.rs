use std::collections::BTreeSet;
use std::ops::Range;

use serde::Serialize;
use tracing::{debug, warn};

use super::ParsedUrl;
use crate::patterns::{self, URL};

/// A URL candidate found in a block of text.
#[derive(Debug, Clone, Serialize)]
pub struct FoundUrl {
    /// Byte range of the candidate in the scanned content.
    pub span: Range<usize>,
    /// The candidate exactly as it appeared in the content.
    pub raw: String,
    /// Whether the candidate sits inside Markdown inline code.
    pub in_inline_code: bool,
    /// Whether the host is an IPv4 literal.
    pub is_ip_address: bool,
    /// The constructed URL, if the candidate was valid.
    pub url: Option<ParsedUrl>,
    /// Why construction failed, if it did.
    pub error: Option<String>,
}

/// All URLs found in one block of Markdown or source text.
///
/// Tracks:
/// - Every candidate matched by the URL grammar, valid or not
/// - All unique root domains of the valid ones
#[derive(Debug, Clone, Default, Serialize)]
pub struct UrlCollection {
    found: Vec<FoundUrl>,
    unique_domains: BTreeSet<String>,
}

impl UrlCollection {
    /// Creates an empty collection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Searches `content` for URLs and constructs each candidate.
    ///
    /// Malformed candidates are kept with their error message; they never
    /// stop the scan.
    pub fn from_content(content: &str) -> Self {
        let mut collection = Self::new();

        for candidate in URL.find_iter(content) {
            let span = candidate.range();
            let raw = candidate.as_str();
            let in_inline_code = patterns::is_in_inline_code(span.clone(), content);

            let (url, error) = match ParsedUrl::parse(raw) {
                Ok(Some(url)) => (Some(url), None),
                Ok(None) => continue,
                Err(e) => {
                    warn!("Skipping malformed URL '{}': {}", raw, e);
                    (None, Some(e.to_string()))
                }
            };

            collection.push(FoundUrl {
                span,
                raw: raw.to_string(),
                in_inline_code,
                is_ip_address: patterns::is_ip_address(raw),
                url,
                error,
            });
        }

        debug!(
            "Found {} URL candidates ({} valid) in {} bytes of content",
            collection.found.len(),
            collection.valid_urls().count(),
            content.len()
        );
        collection
    }

    /// Adds a candidate, registering its root domain if it is valid.
    pub fn push(&mut self, found: FoundUrl) {
        if let Some(url) = &found.url {
            self.unique_domains.insert(url.root_domain().to_lowercase());
        }
        self.found.push(found);
    }

    /// All candidates in the order they appeared.
    pub fn found(&self) -> &[FoundUrl] {
        &self.found
    }

    /// Successfully constructed URLs.
    pub fn valid_urls(&self) -> impl Iterator<Item = &ParsedUrl> {
        self.found.iter().filter_map(|f| f.url.as_ref())
    }

    /// Valid URLs outside inline code, i.e. actual links in the prose.
    pub fn links(&self) -> impl Iterator<Item = &ParsedUrl> {
        self.found
            .iter()
            .filter(|f| !f.in_inline_code)
            .filter_map(|f| f.url.as_ref())
    }

    /// Candidates that could not be constructed.
    pub fn malformed(&self) -> impl Iterator<Item = &FoundUrl> {
        self.found.iter().filter(|f| f.url.is_none())
    }

    /// Root domains of all valid URLs, lower-cased.
    pub fn unique_domains(&self) -> &BTreeSet<String> {
        &self.unique_domains
    }

    /// Valid URLs whose root domain equals `root_domain` (case-insensitive).
    pub fn find_urls_with_domain(&self, root_domain: &str) -> Vec<&ParsedUrl> {
        self.valid_urls()
            .filter(|url| url.root_domain().eq_ignore_ascii_case(root_domain))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.found.len()
    }

    pub fn is_empty(&self) -> bool {
        self.found.is_empty()
    }
}

impl From<&str> for UrlCollection {
    fn from(content: &str) -> Self {
        UrlCollection::from_content(content)
    }
}
