//! Shared fixtures for unit and integration tests.
//!
//! These build small, fully-populated records and a pre-canned
//! [`MockGateway`] so tests exercise the library without network access.

use crate::gateway::MockGateway;
use crate::types::{
    Citation, CitationAnalysis, CitedArticle, Reference, ReferenceAnalysis, Section,
    SectionDetail, StructuredArticle,
};
use crate::view;

/// A section with one citation and a position marker.
pub fn sample_section(title: &str, clean_content: &str) -> Section {
    Section {
        title: title.to_string(),
        raw_content: format!("{clean_content} [1]"),
        clean_content: clean_content.to_string(),
        citations: vec![Citation {
            label: "Delaware".to_string(),
            url: Some("https://en.wikipedia.org/wiki/Delaware".to_string()),
        }],
        citation_position: vec!["paragraph 1".to_string()],
    }
}

/// Wrap sections into an article; server totals reflect the local data.
pub fn article_with_sections(sections: Vec<Section>) -> StructuredArticle {
    let total_citations = sections.iter().map(|s| s.citations.len() as u64).sum();
    StructuredArticle {
        title: "Joe Biden".to_string(),
        lang: "en".to_string(),
        source: "wikipedia".to_string(),
        total_sections: sections.len() as u64,
        total_citations,
        total_references: 5,
        sections,
        references: sample_references(),
    }
}

/// The standard two-section article used across tests.
pub fn sample_article() -> StructuredArticle {
    article_with_sections(vec![
        sample_section("Early life", "Born in Scranton Pennsylvania"),
        sample_section("Presidency", "Sworn in after the election"),
    ])
}

pub fn sample_references() -> Vec<Reference> {
    vec![
        Reference {
            label: "Biography".to_string(),
            id: Some("ref-1".to_string()),
            url: Some("https://example.org/biography".to_string()),
        },
        Reference {
            label: "Archived speech".to_string(),
            id: Some("ref-2".to_string()),
            url: None,
        },
    ]
}

/// Section detail as the backend would serve it for `title`.
pub fn sample_section_detail(title: &str) -> SectionDetail {
    let section = sample_section(title, "Born in Scranton Pennsylvania");
    SectionDetail {
        word_count: view::word_count(&section.clean_content),
        citation_count: section.citations.len() as u64,
        title: section.title,
        raw_content: section.raw_content,
        clean_content: section.clean_content,
        citations: section.citations,
        citation_position: section.citation_position,
    }
}

pub fn sample_citation_analysis() -> CitationAnalysis {
    CitationAnalysis {
        citations: vec![Citation {
            label: "Delaware".to_string(),
            url: Some("https://en.wikipedia.org/wiki/Delaware".to_string()),
        }],
        total_citations: 2,
        unique_targets: 1,
        most_cited_articles: vec![CitedArticle {
            title: "Delaware".to_string(),
            count: 2,
        }],
    }
}

pub fn sample_reference_analysis() -> ReferenceAnalysis {
    ReferenceAnalysis {
        references: sample_references(),
        total_references: 5,
        references_with_urls: 1,
        reference_density: 1.25,
    }
}

/// A mock gateway canned with every record kind for `query`.
pub fn populated_mock(query: &str) -> MockGateway {
    let mock = MockGateway::new()
        .with_article(query, sample_article())
        .with_citations(query, sample_citation_analysis())
        .with_references(query, sample_reference_analysis());
    mock.add_section(query, sample_section_detail("Early life"));
    mock.add_section(query, sample_section_detail("Presidency"));
    mock
}
