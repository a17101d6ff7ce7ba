//! Derived-view calculators: pure functions over already-fetched records.
//!
//! No I/O happens here. Everything is recomputed on demand from the wire
//! records and discarded with them; nothing is persisted.
//!
//! Client-derived aggregates are kept strictly apart from the server's
//! `total_*` fields: the two may legitimately diverge and are never merged.

use serde::Serialize;

use crate::types::{CitationAnalysis, CitedArticle, Section, StructuredArticle};

/// Default number of entries in a citation ranking.
pub const DEFAULT_MOST_CITED_LIMIT: usize = 5;

/// Default character budget for a section preview.
pub const DEFAULT_PREVIEW_LENGTH: usize = 500;

/// Default number of citation positions shown before eliding.
pub const DEFAULT_POSITION_LIMIT: usize = 5;

/// Sentinel shown when a section carries no citation positions.
pub const NO_CITATIONS_MESSAGE: &str = "No citations found";

const ELLIPSIS: &str = "...";

/// Client-side word count: the number of `' '`-separated fragments.
///
/// A deliberate approximation: runs of spaces inflate the count,
/// punctuation is not special-cased, and empty text counts as one
/// fragment. Display code depends on these exact numbers; do not switch
/// to `split_whitespace`.
pub fn word_count(text: &str) -> u64 {
    text.split(' ').count() as u64
}

/// Read-model summary of one article.
///
/// `total_sections`/`total_citations`/`total_references` pass the server's
/// authoritative counts through; `total_words` is the client-side
/// approximation. The two ratio fields are display strings, pre-formatted
/// with their division-by-zero guards applied.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ArticleStats {
    pub title: String,
    pub language: String,
    pub total_sections: u64,
    pub total_citations: u64,
    pub total_references: u64,
    pub total_words: u64,

    /// `total_citations / total_sections` to one decimal, `"0"` when the
    /// article has no sections.
    pub average_citations_per_section: String,

    /// References per thousand derived words to two decimals, `"0"` when
    /// the derived word count is zero.
    pub reference_density: String,
}

/// Compute the per-article statistics summary.
pub fn article_stats(article: &StructuredArticle) -> ArticleStats {
    let total_words: u64 = article
        .sections
        .iter()
        .map(|s| word_count(&s.clean_content))
        .sum();

    let average_citations_per_section = if article.total_sections > 0 {
        format!(
            "{:.1}",
            article.total_citations as f64 / article.total_sections as f64
        )
    } else {
        "0".to_string()
    };

    let reference_density = if total_words > 0 {
        format!(
            "{:.2}",
            article.total_references as f64 / total_words as f64 * 1000.0
        )
    } else {
        "0".to_string()
    };

    ArticleStats {
        title: article.title.clone(),
        language: article.lang.clone(),
        total_sections: article.total_sections,
        total_citations: article.total_citations,
        total_references: article.total_references,
        total_words,
        average_citations_per_section,
        reference_density,
    }
}

/// Filter sections by a case-insensitive substring of title or content.
///
/// An empty or whitespace-only term returns every section. The filter is
/// stable: relative order is always preserved.
pub fn search_sections<'a>(article: &'a StructuredArticle, term: &str) -> Vec<&'a Section> {
    if term.trim().is_empty() {
        return article.sections.iter().collect();
    }

    let needle = term.to_lowercase();
    article
        .sections
        .iter()
        .filter(|section| {
            section.title.to_lowercase().contains(&needle)
                || section.clean_content.to_lowercase().contains(&needle)
        })
        .collect()
}

/// Rank the analysis's cited articles by count, descending.
///
/// The sort is stable, so ties keep the order the server sent them in.
pub fn most_cited_articles(analysis: &CitationAnalysis, limit: usize) -> Vec<CitedArticle> {
    let mut ranked = analysis.most_cited_articles.clone();
    ranked.sort_by(|a, b| b.count.cmp(&a.count));
    ranked.truncate(limit);
    ranked
}

/// Section content capped at `max_length` characters.
///
/// Truncation is by raw character count and may cut mid-word; the marker is
/// appended only when something was cut.
pub fn format_section_content(section: &Section, max_length: usize) -> String {
    let content = &section.clean_content;
    if content.chars().count() <= max_length {
        return content.clone();
    }
    let truncated: String = content.chars().take(max_length).collect();
    format!("{truncated}{ELLIPSIS}")
}

/// Citation positions as one readable line.
///
/// Empty input yields the [`NO_CITATIONS_MESSAGE`] sentinel; otherwise the
/// first `limit` positions joined by `", "`, with a trailing marker when
/// more exist.
pub fn format_citation_positions(positions: &[String], limit: usize) -> String {
    if positions.is_empty() {
        return NO_CITATIONS_MESSAGE.to_string();
    }

    let shown = positions
        .iter()
        .take(limit)
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join(", ");

    if positions.len() > limit {
        format!("{shown}{ELLIPSIS}")
    } else {
        shown
    }
}
