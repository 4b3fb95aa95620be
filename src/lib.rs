//! Finds URLs in Markdown and source text, validates and decomposes them, and
//! canonicalizes links to a Q&A site's questions, answers and comments.

pub mod config;
pub mod error;
pub mod patterns;
pub mod pipeline;
pub mod site_links;
pub mod tld;
pub mod url_parser;
pub mod utils;

pub use error::{ExtractionError, MalformedUrlError, TldLoadError};
pub use patterns::clean;
pub use site_links::{find_target_site_link, normalize_target_site_link, LinkKind, SiteLinks};
pub use tld::TldSet;
pub use url_parser::{FoundUrl, ParsedUrl, Protocol, UrlCollection};
