use std::ops::Range;

use tracing::trace;

use super::{COMPLETE_DOMAIN, COMPONENTS, IPV4, PROTOCOL, ROOT_DOMAIN};
use crate::error::ExtractionError;
use crate::url_parser::Protocol;

const TRAILING_PUNCTUATION: [char; 4] = ['.', ',', ':', ';'];
const TRAILING_ENTITIES: [&str; 2] = ["&#xA", "&#xD"];

/// Extracts the leading protocol token.
pub fn extract_protocol(url: &str) -> Result<Protocol, ExtractionError> {
    PROTOCOL
        .captures(url)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse().ok())
        .ok_or_else(|| ExtractionError::Protocol(url.to_string()))
}

/// Extracts the host (including subdomains) directly following `://`.
pub fn extract_complete_domain(url: &str) -> Result<String, ExtractionError> {
    COMPLETE_DOMAIN
        .captures(url)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
        .ok_or_else(|| ExtractionError::CompleteDomain(url.to_string()))
}

/// Extracts the trailing `segment.segment` of a host.
pub fn extract_root_domain(complete_domain: &str) -> Result<String, ExtractionError> {
    ROOT_DOMAIN
        .captures(complete_domain)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
        .ok_or_else(|| ExtractionError::RootDomain(complete_domain.to_string()))
}

/// Top-level domain of a root domain, i.e. the part after its dot.
pub(crate) fn extract_top_level_domain(root_domain: &str) -> Result<String, ExtractionError> {
    ROOT_DOMAIN
        .captures(root_domain)
        .and_then(|caps| caps.get(2))
        .map(|m| m.as_str().to_string())
        .ok_or_else(|| ExtractionError::RootDomain(root_domain.to_string()))
}

/// Extracts the path without leading or trailing slashes.
///
/// Returns `None` when there is no path, when it is blank, or when it only
/// consists of punctuation picked up from the surrounding Markdown. A missing
/// path must stay distinguishable from a malformed URL, since it ends up as a
/// NULL column downstream.
pub fn extract_path(url: &str) -> Option<String> {
    let caps = COMPONENTS.captures(url)?;
    let path = caps.get(1)?.as_str().trim_matches('/');

    if path.trim().is_empty() {
        return None;
    }
    if matches!(path, "." | "," | ":") {
        return None;
    }

    Some(path.to_string())
}

/// Extracts the query string without the leading `?`.
pub fn extract_query(url: &str) -> Option<String> {
    component(url, 2, '?')
}

/// Extracts the fragment identifier without the leading `#`.
pub fn extract_fragment(url: &str) -> Option<String> {
    component(url, 3, '#')
}

fn component(url: &str, group: usize, delimiter: char) -> Option<String> {
    let caps = COMPONENTS.captures(url)?;
    let value = caps.get(group)?.as_str();
    let value = value.strip_prefix(delimiter).unwrap_or(value);
    if value.trim().is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

/// Strips surrounding whitespace, trailing punctuation and trailing escaped
/// line breaks until nothing changes anymore.
///
/// Returns `None` for empty or blank input.
pub fn clean(url: &str) -> Option<String> {
    let mut cleaned = url.trim();

    loop {
        let before = cleaned.len();

        cleaned = cleaned.trim_end_matches(&TRAILING_PUNCTUATION[..]);
        for entity in TRAILING_ENTITIES {
            while let Some(stripped) = cleaned.strip_suffix(entity) {
                cleaned = stripped;
            }
        }
        cleaned = cleaned.trim_end();

        if cleaned.len() == before {
            break;
        }
    }

    if cleaned.is_empty() {
        return None;
    }
    if cleaned.len() != url.len() {
        trace!("Cleaned URL '{}' to '{}'", url, cleaned);
    }
    Some(cleaned.to_string())
}

/// Whether the host looks like a (possibly malformed) dotted IPv4 literal.
pub fn is_ip_address(url: &str) -> bool {
    IPV4.is_match(url)
}

/// Heuristic for matches inside Markdown inline code: an odd, non-zero
/// number of backticks on both sides of the match.
///
/// `span` is a byte range into `content`, as produced by [`regex::Match::range`].
pub fn is_in_inline_code(span: Range<usize>, content: &str) -> bool {
    let (Some(before), Some(after)) = (content.get(..span.start), content.get(span.end..)) else {
        return false;
    };

    let backticks_before = before.matches('`').count();
    let backticks_after = after.matches('`').count();

    backticks_before > 0
        && backticks_after > 0
        && backticks_before % 2 != 0
        && backticks_after % 2 != 0
}
