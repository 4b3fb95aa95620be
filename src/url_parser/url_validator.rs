use tracing::{debug, warn};

use crate::error::MalformedUrlError;
use crate::patterns::URL_FULL_MATCH;
use crate::tld;

/// Checks that the whole-URL grammar matches all of `url`, not just a part.
pub fn validate_grammar(url: &str) -> Result<(), MalformedUrlError> {
    if URL_FULL_MATCH.is_match(url) {
        Ok(())
    } else {
        debug!("URL does not match grammar: {}", url);
        Err(MalformedUrlError::Grammar(url.to_string()))
    }
}

/// Checks `tld` against the process-wide reference set.
pub fn validate_top_level_domain(tld: &str, url: &str) -> Result<(), MalformedUrlError> {
    if tld::is_valid_top_level_domain(tld) {
        Ok(())
    } else {
        warn!("Invalid top-level domain '{}' in URL: {}", tld, url);
        Err(MalformedUrlError::TopLevelDomain {
            tld: tld.to_string(),
            url: url.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grammar_requires_full_match() {
        assert!(validate_grammar("https://stackoverflow.com/a/1").is_ok());
        assert_eq!(
            validate_grammar("https://stackoverflow.com/a/1 trailing"),
            Err(MalformedUrlError::Grammar(
                "https://stackoverflow.com/a/1 trailing".to_string()
            ))
        );
        assert!(validate_grammar("leading https://stackoverflow.com").is_err());
    }

    #[test]
    fn top_level_domain_is_case_insensitive() {
        assert!(validate_top_level_domain("COM", "https://EXAMPLE.COM").is_ok());
        assert!(validate_top_level_domain("com", "https://example.com").is_ok());
    }

    #[test]
    fn unknown_top_level_domain_is_rejected() {
        let err = validate_top_level_domain("notatld", "https://example.notatld").unwrap_err();
        assert!(matches!(err, MalformedUrlError::TopLevelDomain { ref tld, .. } if tld == "notatld"));
    }
}
