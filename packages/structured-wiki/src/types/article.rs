//! Wire records for the structured-article backend.
//!
//! Shapes mirror the backend's response models exactly. All records are
//! immutable values: fetched, read, and replaced wholesale, never mutated.
//!
//! The `total_*` fields on [`StructuredArticle`] are server-computed and
//! authoritative. They are kept even when they disagree with the lengths of
//! the local sequences; the client never recomputes them. Client-derived
//! aggregates live in [`crate::view`] under separate names.

use serde::{Deserialize, Serialize};

/// One outbound reference inside a section's content.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Citation {
    pub label: String,
    pub url: Option<String>,
}

/// One bibliographic entry for the whole article.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reference {
    pub label: String,
    pub id: Option<String>,
    pub url: Option<String>,
}

impl Reference {
    /// Whether this entry carries a resolvable link.
    pub fn has_url(&self) -> bool {
        self.url.as_deref().is_some_and(|u| !u.is_empty())
    }
}

/// A titled slice of an article.
///
/// `title` doubles as the selection key. Duplicate titles make selection
/// ambiguous; the first match wins and this is not corrected client-side.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Section {
    pub title: String,

    /// Unprocessed source text.
    pub raw_content: String,

    /// Normalized text used for word counts and display.
    pub clean_content: String,

    /// Inline citations, in content order. Absent in the payload decodes
    /// as empty.
    #[serde(default)]
    pub citations: Vec<Citation>,

    /// Markers for where citations occur in the content.
    #[serde(default)]
    pub citation_position: Vec<String>,
}

impl Section {
    pub fn has_citations(&self) -> bool {
        !self.citations.is_empty()
    }
}

/// A full article decomposed into sections, with server-computed totals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StructuredArticle {
    pub title: String,

    /// Language code, e.g. "en".
    pub lang: String,

    /// Origin identifier reported by the backend.
    pub source: String,

    /// Ordered; the first section is the default selection.
    pub sections: Vec<Section>,

    pub references: Vec<Reference>,

    /// Server-authoritative; may disagree with `sections.len()`.
    pub total_sections: u64,
    pub total_citations: u64,
    pub total_references: u64,
}

impl StructuredArticle {
    /// Look up a section by its title key. First match wins on duplicates.
    pub fn find_section(&self, title: &str) -> Option<&Section> {
        self.sections.iter().find(|s| s.title == title)
    }

    /// Title of the default selection (the first section), if any.
    pub fn default_section_title(&self) -> Option<&str> {
        self.sections.first().map(|s| s.title.as_str())
    }
}

/// A single section fetched on its own, with server-side counts attached.
///
/// `word_count` here is the server's count and is not interchangeable with
/// the client-side approximation in [`crate::view::word_count`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectionDetail {
    pub title: String,
    pub raw_content: String,
    pub clean_content: String,

    #[serde(default)]
    pub citations: Vec<Citation>,

    #[serde(default)]
    pub citation_position: Vec<String>,

    pub word_count: u64,
    pub citation_count: u64,
}

/// One `{title, count}` pair in a citation ranking.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CitedArticle {
    pub title: String,
    pub count: u64,
}

/// Article-wide citation analysis.
///
/// `most_cited_articles` arrives in server order, which is not necessarily
/// sorted; ranking is a client-side concern.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CitationAnalysis {
    pub citations: Vec<Citation>,
    pub total_citations: u64,

    /// Count of distinct referenced titles.
    pub unique_targets: u64,

    pub most_cited_articles: Vec<CitedArticle>,
}

/// Article-wide reference analysis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReferenceAnalysis {
    pub references: Vec<Reference>,
    pub total_references: u64,
    pub references_with_urls: u64,

    /// Server-computed references-per-thousand-words ratio.
    pub reference_density: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_section_decodes_without_citation_fields() {
        let json = r#"{
            "title": "History",
            "raw_content": "raw",
            "clean_content": "clean"
        }"#;

        let section: Section = serde_json::from_str(json).unwrap();
        assert_eq!(section.title, "History");
        assert!(section.citations.is_empty());
        assert!(section.citation_position.is_empty());
        assert!(!section.has_citations());
    }

    #[test]
    fn test_article_keeps_server_totals() {
        let json = r#"{
            "title": "Scranton",
            "lang": "en",
            "source": "wikipedia",
            "sections": [],
            "references": [],
            "total_sections": 12,
            "total_citations": 40,
            "total_references": 7
        }"#;

        let article: StructuredArticle = serde_json::from_str(json).unwrap();
        // Totals disagree with the empty local sequences; both are kept as-is.
        assert_eq!(article.total_sections, 12);
        assert!(article.sections.is_empty());
    }

    #[test]
    fn test_find_section_first_match_wins() {
        let section = |title: &str, content: &str| Section {
            title: title.to_string(),
            raw_content: String::new(),
            clean_content: content.to_string(),
            citations: vec![],
            citation_position: vec![],
        };

        let article = StructuredArticle {
            title: "A".to_string(),
            lang: "en".to_string(),
            source: "wikipedia".to_string(),
            sections: vec![section("Intro", "first"), section("Intro", "second")],
            references: vec![],
            total_sections: 2,
            total_citations: 0,
            total_references: 0,
        };

        assert_eq!(article.find_section("Intro").unwrap().clean_content, "first");
        assert_eq!(article.default_section_title(), Some("Intro"));
        assert!(article.find_section("Missing").is_none());
    }

    #[test]
    fn test_reference_has_url() {
        let with = Reference {
            label: "a".to_string(),
            id: None,
            url: Some("https://example.org".to_string()),
        };
        let without = Reference {
            label: "b".to_string(),
            id: None,
            url: None,
        };
        let empty = Reference {
            label: "c".to_string(),
            id: None,
            url: Some(String::new()),
        };

        assert!(with.has_url());
        assert!(!without.has_url());
        assert!(!empty.has_url());
    }
}
