//! Regular grammars for URLs embedded in free text.
//!
//! The whole-URL grammar is composed from small fragments (protocol, domain,
//! path, query, fragment identifier) wrapped in optional groups. Every
//! grammar is compiled once on first use and shared for the lifetime of the
//! process.

mod extract;

pub use extract::{
    clean, extract_complete_domain, extract_fragment, extract_path, extract_protocol,
    extract_query, extract_root_domain, is_in_inline_code, is_ip_address,
};
pub(crate) use extract::extract_top_level_domain;

use once_cell::sync::Lazy;
use regex::Regex;

// Basic grammar adapted from https://stackoverflow.com/a/6041965
pub const PROTOCOL_FRAGMENT: &str = "https?|ftp";
pub const DOMAIN_FRAGMENT: &str = r"[A-Za-z0-9_\-]+(?:(?:\.[A-Za-z0-9_\-]+)+)";
const ROOT_DOMAIN_FRAGMENT: &str = r"([A-Za-z0-9_\-]+\.([A-Za-z0-9_\-]+))$";
const ALLOWED_CHARACTERS: &str = r"A-Za-z0-9_\-.,@^=%&:/~+";

// ASCII-only case folding; with Unicode folding `ſ` matches `s` and the
// Kelvin sign matches `k`.
const CASE_INSENSITIVE: &str = "(?i-u)";

fn bracket_expression() -> String {
    format!(r"\([{}]+\)", ALLOWED_CHARACTERS)
}

fn path_fragment() -> String {
    format!(
        "/(?:[{}]+)?(?:{})?",
        ALLOWED_CHARACTERS,
        bracket_expression()
    )
}

fn query_fragment() -> String {
    format!(r"\?[{}\?]*", ALLOWED_CHARACTERS)
}

fn fragment_identifier_fragment() -> String {
    format!(
        "#[{}?#!]+(?:{})?",
        ALLOWED_CHARACTERS,
        bracket_expression()
    )
}

fn non_capturing(regex: &str) -> String {
    format!("(?:{})", regex)
}

fn capturing(regex: &str) -> String {
    format!("({})", regex)
}

fn optional(regex: &str) -> String {
    format!("{}?", regex)
}

/// Unanchored source of the whole-URL grammar, usable for searching text.
pub static URL_REGEX: Lazy<String> = Lazy::new(|| {
    format!(
        "{}://{}{}{}{}",
        non_capturing(PROTOCOL_FRAGMENT),
        DOMAIN_FRAGMENT,
        optional(&non_capturing(&path_fragment())),
        optional(&non_capturing(&query_fragment())),
        optional(&non_capturing(&fragment_identifier_fragment())),
    )
});

/// Searches text for URL candidates.
pub static URL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!("{}{}", CASE_INSENSITIVE, URL_REGEX.as_str()))
        .expect("URL regex is valid")
});

/// Whole-URL grammar anchored at both ends, for validation.
pub static URL_FULL_MATCH: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!("{}^{}$", CASE_INSENSITIVE, non_capturing(URL_REGEX.as_str())))
        .expect("URL_FULL_MATCH regex is valid")
});

pub static PROTOCOL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!("{}^{}", CASE_INSENSITIVE, capturing(PROTOCOL_FRAGMENT)))
        .expect("PROTOCOL regex is valid")
});

pub static COMPLETE_DOMAIN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(
        "{}^{}://{}",
        CASE_INSENSITIVE,
        non_capturing(PROTOCOL_FRAGMENT),
        capturing(DOMAIN_FRAGMENT)
    ))
    .expect("COMPLETE_DOMAIN regex is valid")
});

/// Group 1 is the root domain, group 2 its top-level domain.
pub static ROOT_DOMAIN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!("{}{}", CASE_INSENSITIVE, ROOT_DOMAIN_FRAGMENT))
        .expect("ROOT_DOMAIN regex is valid")
});

/// Groups 1, 2 and 3 are path, query and fragment identifier, each with
/// its leading delimiter.
pub static COMPONENTS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(
        "{}{}://{}{}{}{}",
        CASE_INSENSITIVE,
        non_capturing(PROTOCOL_FRAGMENT),
        DOMAIN_FRAGMENT,
        optional(&capturing(&path_fragment())),
        optional(&capturing(&query_fragment())),
        optional(&capturing(&fragment_identifier_fragment())),
    ))
    .expect("COMPONENTS regex is valid")
});

/// Valid or malformed IPv4 literal as host.
pub static IPV4: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(
        r"{}^{}://[.0-9]+(?:[/?#:]|$)",
        CASE_INSENSITIVE,
        non_capturing(PROTOCOL_FRAGMENT)
    ))
    .expect("IPV4 regex is valid")
});
