//! Source-site URL parsing.
//!
//! Extracts a canonical (language, title) pair from a Wikipedia article
//! URL. Non-matching input is an expected case, not an error: the result
//! is an explicit `Option`, never a sentinel value.

use regex::Regex;

/// Accepts `http` or `https`, a two-letter language subdomain, and the
/// `/wiki/` article path. Deliberately unanchored: a URL pasted with
/// surrounding text still matches.
const WIKI_URL_PATTERN: &str = r"https?://([a-z]{2})\.wikipedia\.org/wiki/(.+)";

/// A canonical (language, title) pair extracted from an article URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WikiUrl {
    pub lang: String,

    /// Percent-decoded, with underscores replaced by spaces.
    pub title: String,
}

/// Parse a Wikipedia article URL.
///
/// Returns `None` when the input does not match the article-URL shape or
/// the title's percent-encoding is malformed. Callers must handle the
/// absent case; there is no error here.
pub fn parse_wikipedia_url(input: &str) -> Option<WikiUrl> {
    let pattern = Regex::new(WIKI_URL_PATTERN).ok()?;
    let captures = pattern.captures(input)?;

    let lang = captures.get(1)?.as_str().to_string();
    let raw_title = captures.get(2)?.as_str().replace('_', " ");
    let title = urlencoding::decode(&raw_title).ok()?.into_owned();

    Some(WikiUrl { lang, title })
}
