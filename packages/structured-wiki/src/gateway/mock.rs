//! Mock gateway for testing.
//!
//! Provides a configurable in-memory implementation of the
//! [`ArticleGateway`] trait: canned per-query responses, per-operation
//! injected failures, optional per-query latency for ordering tests, and
//! call recording for assertions.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use std::time::Duration;

use crate::error::{GatewayError, GatewayResult};
use crate::gateway::ArticleGateway;
use crate::types::{
    ArticleQuery, CitationAnalysis, ReferenceAnalysis, SectionDetail, SectionQuery,
    StructuredArticle,
};

/// The four gateway operations, used to target failure injection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GatewayOp {
    Article,
    Section,
    Citations,
    References,
}

/// How an injected failure should present itself.
#[derive(Debug, Clone, Copy)]
pub enum MockFailure {
    /// Backend reachable, non-success HTTP status.
    Status(u16),
    /// Transport-level failure.
    Unavailable,
}

impl MockFailure {
    fn into_error(self) -> GatewayError {
        match self {
            Self::Status(status) => GatewayError::Request { status },
            Self::Unavailable => GatewayError::Unavailable(Box::new(std::io::Error::new(
                std::io::ErrorKind::ConnectionRefused,
                "connection refused",
            ))),
        }
    }
}

/// Record of a call made to the mock gateway.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GatewayCall {
    Article { query: String },
    Section { query: String, section_title: String },
    Citations { query: String },
    References { query: String },
}

#[derive(Default)]
struct Canned {
    articles: HashMap<String, StructuredArticle>,
    /// Keyed by (query, lowercased section title); the backend matches
    /// section titles case-insensitively.
    sections: HashMap<(String, String), SectionDetail>,
    citations: HashMap<String, CitationAnalysis>,
    references: HashMap<String, ReferenceAnalysis>,
    failures: HashMap<GatewayOp, MockFailure>,
    delays: HashMap<String, Duration>,
}

/// Mock gateway with canned responses.
///
/// Unknown queries answer with HTTP 404, mirroring a backend miss.
///
/// # Example
///
/// ```rust,ignore
/// let mock = MockGateway::new()
///     .with_article("Joe Biden", article)
///     .with_failure(GatewayOp::Citations, MockFailure::Status(500));
/// ```
#[derive(Default)]
pub struct MockGateway {
    canned: Arc<RwLock<Canned>>,
    calls: Arc<RwLock<Vec<GatewayCall>>>,
}

impl MockGateway {
    /// Create a new empty mock gateway.
    pub fn new() -> Self {
        Self::default()
    }

    /// Can an article response for a query (builder).
    pub fn with_article(self, query: impl Into<String>, article: StructuredArticle) -> Self {
        self.add_article(query, article);
        self
    }

    /// Can a section response for a (query, section title) pair (builder).
    pub fn with_section(self, query: impl Into<String>, section: SectionDetail) -> Self {
        self.add_section(query, section);
        self
    }

    /// Can a citation analysis for a query (builder).
    pub fn with_citations(self, query: impl Into<String>, analysis: CitationAnalysis) -> Self {
        self.add_citations(query, analysis);
        self
    }

    /// Can a reference analysis for a query (builder).
    pub fn with_references(self, query: impl Into<String>, analysis: ReferenceAnalysis) -> Self {
        self.add_references(query, analysis);
        self
    }

    /// Inject a failure for one operation (builder).
    pub fn with_failure(self, op: GatewayOp, failure: MockFailure) -> Self {
        self.set_failure(op, failure);
        self
    }

    /// Delay every operation for a query (builder). Used to exercise
    /// request-ordering behavior.
    pub fn with_delay(self, query: impl Into<String>, delay: Duration) -> Self {
        self.canned.write().unwrap().delays.insert(query.into(), delay);
        self
    }

    pub fn add_article(&self, query: impl Into<String>, article: StructuredArticle) {
        self.canned.write().unwrap().articles.insert(query.into(), article);
    }

    pub fn add_section(&self, query: impl Into<String>, section: SectionDetail) {
        let key = (query.into(), section.title.to_lowercase());
        self.canned.write().unwrap().sections.insert(key, section);
    }

    pub fn add_citations(&self, query: impl Into<String>, analysis: CitationAnalysis) {
        self.canned.write().unwrap().citations.insert(query.into(), analysis);
    }

    pub fn add_references(&self, query: impl Into<String>, analysis: ReferenceAnalysis) {
        self.canned.write().unwrap().references.insert(query.into(), analysis);
    }

    pub fn set_failure(&self, op: GatewayOp, failure: MockFailure) {
        self.canned.write().unwrap().failures.insert(op, failure);
    }

    pub fn clear_failure(&self, op: GatewayOp) {
        self.canned.write().unwrap().failures.remove(&op);
    }

    /// All calls recorded so far, in order.
    pub fn calls(&self) -> Vec<GatewayCall> {
        self.calls.read().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.read().unwrap().len()
    }

    /// Clear recorded calls.
    pub fn reset_calls(&self) {
        self.calls.write().unwrap().clear();
    }

    fn record(&self, call: GatewayCall) {
        self.calls.write().unwrap().push(call);
    }

    fn injected_failure(&self, op: GatewayOp) -> Option<GatewayError> {
        self.canned
            .read()
            .unwrap()
            .failures
            .get(&op)
            .map(|f| f.into_error())
    }

    fn delay_for(&self, query: &str) -> Option<Duration> {
        self.canned.read().unwrap().delays.get(query).copied()
    }

    async fn simulate(&self, op: GatewayOp, query: &str) -> GatewayResult<()> {
        if let Some(delay) = self.delay_for(query) {
            tokio::time::sleep(delay).await;
        }
        match self.injected_failure(op) {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

impl Clone for MockGateway {
    fn clone(&self) -> Self {
        Self {
            canned: Arc::clone(&self.canned),
            calls: Arc::clone(&self.calls),
        }
    }
}

#[async_trait]
impl ArticleGateway for MockGateway {
    async fn structured_article(&self, query: &ArticleQuery) -> GatewayResult<StructuredArticle> {
        self.record(GatewayCall::Article {
            query: query.query.clone(),
        });
        self.simulate(GatewayOp::Article, &query.query).await?;
        self.canned
            .read()
            .unwrap()
            .articles
            .get(&query.query)
            .cloned()
            .ok_or(GatewayError::Request { status: 404 })
    }

    async fn structured_section(&self, query: &SectionQuery) -> GatewayResult<SectionDetail> {
        self.record(GatewayCall::Section {
            query: query.query.clone(),
            section_title: query.section_title.clone(),
        });
        self.simulate(GatewayOp::Section, &query.query).await?;
        let key = (query.query.clone(), query.section_title.to_lowercase());
        self.canned
            .read()
            .unwrap()
            .sections
            .get(&key)
            .cloned()
            .ok_or(GatewayError::Request { status: 404 })
    }

    async fn citation_analysis(&self, query: &ArticleQuery) -> GatewayResult<CitationAnalysis> {
        self.record(GatewayCall::Citations {
            query: query.query.clone(),
        });
        self.simulate(GatewayOp::Citations, &query.query).await?;
        self.canned
            .read()
            .unwrap()
            .citations
            .get(&query.query)
            .cloned()
            .ok_or(GatewayError::Request { status: 404 })
    }

    async fn reference_analysis(&self, query: &ArticleQuery) -> GatewayResult<ReferenceAnalysis> {
        self.record(GatewayCall::References {
            query: query.query.clone(),
        });
        self.simulate(GatewayOp::References, &query.query).await?;
        self.canned
            .read()
            .unwrap()
            .references
            .get(&query.query)
            .cloned()
            .ok_or(GatewayError::Request { status: 404 })
    }

    fn name(&self) -> &str {
        "mock"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{sample_article, sample_citation_analysis};

    #[tokio::test]
    async fn test_canned_article_roundtrip() {
        let mock = MockGateway::new().with_article("Joe Biden", sample_article());
        let request = ArticleQuery::new("Joe Biden").with_lang("en");

        let article = mock.structured_article(&request).await.unwrap();
        assert_eq!(article.title, "Joe Biden");
        assert_eq!(
            mock.calls(),
            vec![GatewayCall::Article {
                query: "Joe Biden".to_string()
            }]
        );

        mock.reset_calls();
        assert_eq!(mock.call_count(), 0);
    }

    #[tokio::test]
    async fn test_unknown_query_is_not_found() {
        let mock = MockGateway::new();
        let request = ArticleQuery::new("Missing");

        let err = mock.structured_article(&request).await.unwrap_err();
        assert!(matches!(err, GatewayError::Request { status: 404 }));
    }

    #[tokio::test]
    async fn test_injected_status_failure() {
        let mock = MockGateway::new()
            .with_citations("Joe Biden", sample_citation_analysis())
            .with_failure(GatewayOp::Citations, MockFailure::Status(500));
        let request = ArticleQuery::new("Joe Biden");

        let err = mock.citation_analysis(&request).await.unwrap_err();
        assert!(matches!(err, GatewayError::Request { status: 500 }));

        mock.clear_failure(GatewayOp::Citations);
        assert!(mock.citation_analysis(&request).await.is_ok());
    }

    #[tokio::test]
    async fn test_injected_unavailable_failure() {
        let mock = MockGateway::new().with_failure(GatewayOp::Article, MockFailure::Unavailable);
        let request = ArticleQuery::new("Joe Biden");

        let err = mock.structured_article(&request).await.unwrap_err();
        assert!(matches!(err, GatewayError::Unavailable(_)));
    }

    #[tokio::test]
    async fn test_section_lookup_is_case_insensitive() {
        let mock = MockGateway::new();
        mock.add_section(
            "Joe Biden",
            crate::testing::sample_section_detail("Early life"),
        );

        let request = SectionQuery::new("Joe Biden", "EARLY LIFE");
        let section = mock.structured_section(&request).await.unwrap();
        assert_eq!(section.title, "Early life");
    }
}
