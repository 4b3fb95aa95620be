//! Recognition and canonicalization of links to a Q&A site's posts.
//!
//! Questions, answers and comments can be linked in several surface forms
//! (`/q/<id>`, `/questions/<id>/<slug>`, `/a/<id>`, `.../<slug>#<id>`,
//! `...#comment<id>_<id>`). [`SiteLinks`] finds such links in a line of text
//! and rewrites them to one canonical form per post.

mod rules;

pub use rules::{LinkKind, LinkRule};

use std::ops::Range;

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::{debug, info, warn};

use crate::url_parser::ParsedUrl;

/// Host the process-wide default rule set is compiled for.
pub const DEFAULT_SITE: &str = "stackoverflow.com";

static DEFAULT_SITE_LINKS: Lazy<SiteLinks> = Lazy::new(|| {
    SiteLinks::new(DEFAULT_SITE).expect("default site link patterns are valid")
});

/// A site link found in a line, with its byte range in that line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiteLink {
    pub span: Range<usize>,
    pub url: ParsedUrl,
}

/// Compiled link patterns and normalization rules for one site.
#[derive(Debug, Clone)]
pub struct SiteLinks {
    host: String,
    link: Regex,
    search_link: Regex,
    rules: Vec<LinkRule>,
}

impl SiteLinks {
    /// Compiles the patterns for `host`, e.g. `stackoverflow.com`.
    pub fn new(host: &str) -> Result<Self, regex::Error> {
        let host = host.trim().to_lowercase();
        let prefix = rules::link_prefix(&host);
        let unanchored = prefix.replacen('^', "", 1);

        Ok(Self {
            link: Regex::new(&format!(r#"({}[^\s)."`]*)"#, unanchored))?,
            search_link: Regex::new(&format!("({}search[^:]+)", unanchored))?,
            rules: rules::build_rules(&host)?,
            host,
        })
    }

    /// The shared instance for [`DEFAULT_SITE`].
    pub fn default_site() -> &'static SiteLinks {
        &DEFAULT_SITE_LINKS
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    /// Normalization rules in the order they are tried.
    pub fn rules(&self) -> &[LinkRule] {
        &self.rules
    }

    /// Finds the first site link in `line` and constructs it.
    ///
    /// Returns `None` if the line has no link (logged at info level) or if
    /// the candidate cannot be constructed (logged as a warning).
    pub fn find_link(&self, line: &str) -> Option<ParsedUrl> {
        let Some(candidate) = self.link.find(line) else {
            info!("No {} link found in: {}", self.host, line);
            return None;
        };
        self.construct(candidate.as_str())
    }

    /// Finds and constructs every site link in `content`.
    pub fn find_all(&self, content: &str) -> Vec<SiteLink> {
        self.link
            .find_iter(content)
            .filter_map(|candidate| {
                self.construct(candidate.as_str()).map(|url| SiteLink {
                    span: candidate.range(),
                    url,
                })
            })
            .collect()
    }

    // Search links like /search?q=user:123+[rust] carry a raw colon in the
    // query that the URL grammar rejects; retry with everything before it.
    fn construct(&self, candidate: &str) -> Option<ParsedUrl> {
        let outer = match ParsedUrl::parse(candidate) {
            Ok(url) => return url,
            Err(e) => e,
        };

        let Some(search) = self.search_link.find(candidate) else {
            warn!("{}", outer);
            return None;
        };

        debug!("Retrying search link {} as {}", candidate, search.as_str());
        match ParsedUrl::parse(search.as_str()) {
            Ok(url) => url,
            Err(inner) => {
                warn!("{}", inner);
                None
            }
        }
    }

    /// The rule that would normalize `url`, if any.
    pub fn classify(&self, url: &ParsedUrl) -> Option<LinkKind> {
        self.rules
            .iter()
            .find(|rule| rule.is_match(url.as_str()))
            .map(LinkRule::kind)
    }

    /// Rewrites `url` into the canonical link of the post it points to.
    ///
    /// Returns `None` for valid links that do not point to a post, such as
    /// user profiles, searches or tag listings.
    pub fn normalize(&self, url: &ParsedUrl) -> Option<ParsedUrl> {
        let canonical = self
            .rules
            .iter()
            .find_map(|rule| rule.apply(url.as_str(), &self.host));

        let Some(canonical) = canonical else {
            info!("Normalization of link failed: {}", url);
            return None;
        };

        match ParsedUrl::parse(&canonical) {
            Ok(Some(normalized)) => Some(normalized),
            Ok(None) => None,
            Err(e) => {
                warn!("Canonical link {} for {} is invalid: {}", canonical, url, e);
                None
            }
        }
    }
}

/// Finds the first link to [`DEFAULT_SITE`] in `line`.
pub fn find_target_site_link(line: &str) -> Option<ParsedUrl> {
    SiteLinks::default_site().find_link(line)
}

/// Canonicalizes a link to [`DEFAULT_SITE`].
pub fn normalize_target_site_link(url: &ParsedUrl) -> Option<ParsedUrl> {
    SiteLinks::default_site().normalize(url)
}
