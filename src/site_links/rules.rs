//! Ordered normalization rules for links to a Q&A site.
//!
//! The first matching rule wins. Comment links also contain a question link,
//! so they have to be tried before the generic question rules.

use std::fmt;

use regex::{Captures, Regex};
use serde::Serialize;

/// The kind of post a link points to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LinkKind {
    Comment,
    ShortAnswer,
    LongAnswer,
    ShortQuestion,
    LongQuestion,
}

impl LinkKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            LinkKind::Comment => "comment",
            LinkKind::ShortAnswer => "short_answer",
            LinkKind::LongAnswer => "long_answer",
            LinkKind::ShortQuestion => "short_question",
            LinkKind::LongQuestion => "long_question",
        }
    }
}

impl fmt::Display for LinkKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Builds the canonical link from the rule's captures and the site host.
type Canonicalizer = fn(&Captures<'_>, &str) -> String;

const HOST_PLACEHOLDER: &str = "{host}";
const LINK_PREFIX: &str = r"(?i)^https?://(?:www\.)?{host}/";

// Priority order matters, see module docs.
const RULES: [(LinkKind, &str, Canonicalizer); 5] = [
    (
        LinkKind::Comment,
        r"questions/([0-9]+)(?:/[^\s/#?]+)?(?:/[0-9]+)?(?:\?[^\s/#]+)?#comment([0-9]+)_([0-9]+)",
        comment_link,
    ),
    (LinkKind::ShortAnswer, r"a/([0-9]+)", answer_link),
    (LinkKind::LongAnswer, r"questions/[0-9]+/[^\s#]+#([0-9]+)", answer_link),
    (LinkKind::ShortQuestion, r"q/([0-9]+)", question_link),
    (LinkKind::LongQuestion, r"questions/([0-9]+)", question_link),
];

fn comment_link(caps: &Captures<'_>, host: &str) -> String {
    format!(
        "https://{}/questions/{}#comment{}_{}",
        host, &caps[1], &caps[2], &caps[3]
    )
}

fn answer_link(caps: &Captures<'_>, host: &str) -> String {
    format!("https://{}/a/{}", host, &caps[1])
}

fn question_link(caps: &Captures<'_>, host: &str) -> String {
    format!("https://{}/q/{}", host, &caps[1])
}

/// One compiled `(pattern, canonicalizer)` pair.
#[derive(Clone)]
pub struct LinkRule {
    kind: LinkKind,
    pattern: Regex,
    canonicalize: Canonicalizer,
}

impl fmt::Debug for LinkRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LinkRule")
            .field("kind", &self.kind)
            .field("pattern", &self.pattern.as_str())
            .finish()
    }
}

impl LinkRule {
    pub fn kind(&self) -> LinkKind {
        self.kind
    }

    pub fn is_match(&self, url: &str) -> bool {
        self.pattern.is_match(url)
    }

    /// Canonical form of `url` on `host`, if this rule matches.
    pub fn apply(&self, url: &str, host: &str) -> Option<String> {
        self.pattern
            .captures(url)
            .map(|caps| (self.canonicalize)(&caps, host))
    }
}

/// Regex prefix matching the protocol, optional `www.` and `host`.
pub(crate) fn link_prefix(host: &str) -> String {
    LINK_PREFIX.replace(HOST_PLACEHOLDER, &regex::escape(host))
}

/// Compiles all rules for `host`, in priority order.
pub(crate) fn build_rules(host: &str) -> Result<Vec<LinkRule>, regex::Error> {
    let prefix = link_prefix(host);
    RULES
        .iter()
        .map(|(kind, suffix, canonicalize)| -> Result<LinkRule, regex::Error> {
            Ok(LinkRule {
                kind: *kind,
                pattern: Regex::new(&format!("{}{}", prefix, suffix))?,
                canonicalize: *canonicalize,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const HOST: &str = "stackoverflow.com";

    fn rule(kind: LinkKind) -> LinkRule {
        build_rules(HOST)
            .unwrap()
            .into_iter()
            .find(|r| r.kind() == kind)
            .unwrap()
    }

    #[test]
    fn rules_are_in_priority_order() {
        let kinds: Vec<LinkKind> = build_rules(HOST).unwrap().iter().map(|r| r.kind()).collect();
        assert_eq!(
            kinds,
            vec![
                LinkKind::Comment,
                LinkKind::ShortAnswer,
                LinkKind::LongAnswer,
                LinkKind::ShortQuestion,
                LinkKind::LongQuestion,
            ]
        );
    }

    #[test]
    fn comment_rule() {
        let r = rule(LinkKind::Comment);
        assert_eq!(
            r.apply(
                "https://stackoverflow.com/questions/52761212/slug#comment92462603_52761348",
                HOST
            )
            .as_deref(),
            Some("https://stackoverflow.com/questions/52761212#comment92462603_52761348")
        );
        assert_eq!(
            r.apply(
                "http://www.stackoverflow.com/questions/1/slug/2?noredirect=1#COMMENT3_4",
                HOST
            )
            .as_deref(),
            Some("https://stackoverflow.com/questions/1#comment3_4")
        );
        assert!(!r.is_match("https://stackoverflow.com/questions/1/slug#2"));
        // canonical form is a fixed point
        assert!(r.is_match("https://stackoverflow.com/questions/1#comment3_4"));
    }

    #[test]
    fn short_answer_rule() {
        let r = rule(LinkKind::ShortAnswer);
        assert_eq!(
            r.apply("https://stackoverflow.com/a/53022912/4200", HOST).as_deref(),
            Some("https://stackoverflow.com/a/53022912")
        );
        assert!(!r.is_match("https://stackoverflow.com/about"));
    }

    #[test]
    fn long_answer_rule() {
        let r = rule(LinkKind::LongAnswer);
        assert_eq!(
            r.apply(
                "https://stackoverflow.com/questions/52761212/slug/52761348#52761348",
                HOST
            )
            .as_deref(),
            Some("https://stackoverflow.com/a/52761348")
        );
        assert!(!r.is_match("https://stackoverflow.com/questions/52761212/slug"));
    }

    #[test]
    fn question_rules() {
        assert_eq!(
            rule(LinkKind::ShortQuestion)
                .apply("https://stackoverflow.com/q/4315190/12", HOST)
                .as_deref(),
            Some("https://stackoverflow.com/q/4315190")
        );
        let long = rule(LinkKind::LongQuestion);
        assert_eq!(
            long.apply("https://stackoverflow.com/questions/4315190", HOST).as_deref(),
            Some("https://stackoverflow.com/q/4315190")
        );
        assert!(!long.is_match("https://stackoverflow.com/questions/tagged/rust"));
    }

    #[test]
    fn post_ids_are_ascii_digits() {
        for r in build_rules(HOST).unwrap() {
            assert!(r.apply("https://stackoverflow.com/q/\u{0661}\u{0662}\u{0663}", HOST).is_none());
            assert!(r.apply("https://stackoverflow.com/a/\u{0967}\u{0968}", HOST).is_none());
        }
        assert!(rule(LinkKind::LongQuestion)
            .apply("https://stackoverflow.com/questions/\u{0967}\u{0968}/slug", HOST)
            .is_none());
    }

    #[test]
    fn rules_are_anchored_to_the_host() {
        let r = rule(LinkKind::ShortAnswer);
        assert!(!r.is_match("https://meta.stackoverflow.com/a/1"));
        assert!(!r.is_match("https://example.com/?next=https://stackoverflow.com/a/1"));
        assert!(!r.is_match("https://stackoverflowXcom/a/1"));
    }
}
