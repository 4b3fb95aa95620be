use tracing::{instrument, trace};

use super::url_validator::{validate_grammar, validate_top_level_domain};
use super::ParsedUrl;
use crate::error::{ExtractionError, MalformedUrlError};
use crate::patterns::{self, extract_top_level_domain};

impl ParsedUrl {
    /// Cleans, validates and decomposes `url`.
    ///
    /// The steps are:
    /// 1. Strip whitespace and trailing punctuation/escaped line breaks until
    ///    a fixed point is reached. Nothing left means there is no URL, which
    ///    is `Ok(None)` rather than an error.
    /// 2. Require the whole-URL grammar to match the entire cleaned text.
    /// 3. Extract protocol and domains, and check the top-level domain against
    ///    the reference set.
    /// 4. Extract the optional path, query and fragment identifier.
    ///
    /// A failing mandatory extraction after a successful grammar match means
    /// the grammars disagree; it is reported as
    /// [`MalformedUrlError::Decomposition`].
    ///
    /// # Arguments
    /// * `url` - Raw URL text, possibly with punctuation from the surrounding prose
    ///
    /// # Returns
    /// * `Result<Option<ParsedUrl>, MalformedUrlError>` - The URL, `None` for empty input, or why it was rejected
    #[instrument(level = "trace", skip_all, fields(url = %url))]
    pub fn parse(url: &str) -> Result<Option<Self>, MalformedUrlError> {
        let Some(cleaned) = patterns::clean(url) else {
            trace!("Nothing left after cleaning");
            return Ok(None);
        };

        validate_grammar(&cleaned)?;
        trace!("Grammar matched, decomposing {}", cleaned);

        Self::decompose(cleaned).map(Some)
    }

    fn decompose(url: String) -> Result<Self, MalformedUrlError> {
        let inconsistent = |source: ExtractionError| MalformedUrlError::Decomposition {
            url: url.clone(),
            source,
        };

        let protocol = patterns::extract_protocol(&url).map_err(inconsistent)?;
        let complete_domain = patterns::extract_complete_domain(&url).map_err(inconsistent)?;
        let root_domain = patterns::extract_root_domain(&complete_domain).map_err(inconsistent)?;
        let top_level_domain = extract_top_level_domain(&root_domain).map_err(inconsistent)?;

        validate_top_level_domain(&top_level_domain, &url)?;

        let path = patterns::extract_path(&url);
        let query = patterns::extract_query(&url);
        let fragment_identifier = patterns::extract_fragment(&url);

        trace!(
            "Decomposed {}: protocol={}, domain={}, path={:?}, query={:?}, fragment={:?}",
            url,
            protocol,
            complete_domain,
            path,
            query,
            fragment_identifier
        );

        Ok(ParsedUrl {
            url,
            protocol,
            complete_domain,
            root_domain,
            top_level_domain,
            path,
            query,
            fragment_identifier,
        })
    }
}
