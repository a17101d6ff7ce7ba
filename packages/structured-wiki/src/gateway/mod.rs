//! Remote data gateway: the seam between the viewer and the backend.
//!
//! The backend is an opaque HTTP API exposing four read-only resources per
//! article query. Each operation is a stateless outbound request with no
//! caching and no retry; the four calls for one query are independent and
//! safe to issue concurrently.
//!
//! [`ArticleGateway`] is the injectable abstraction: production code uses
//! [`HttpGateway`], tests substitute [`MockGateway`] without touching the
//! network.

use async_trait::async_trait;

use crate::error::GatewayResult;
use crate::types::{
    ArticleQuery, CitationAnalysis, ReferenceAnalysis, SectionDetail, SectionQuery,
    StructuredArticle,
};

pub mod http;
pub mod mock;

pub use http::HttpGateway;
pub use mock::{GatewayCall, GatewayOp, MockFailure, MockGateway};

/// Gateway to the structured-article backend.
#[async_trait]
pub trait ArticleGateway: Send + Sync {
    /// Fetch a full structured article.
    async fn structured_article(&self, query: &ArticleQuery) -> GatewayResult<StructuredArticle>;

    /// Fetch a single section with server-side counts.
    async fn structured_section(&self, query: &SectionQuery) -> GatewayResult<SectionDetail>;

    /// Fetch the article-wide citation analysis.
    async fn citation_analysis(&self, query: &ArticleQuery) -> GatewayResult<CitationAnalysis>;

    /// Fetch the article-wide reference analysis.
    async fn reference_analysis(&self, query: &ArticleQuery) -> GatewayResult<ReferenceAnalysis>;

    /// Gateway name for logging/debugging.
    fn name(&self) -> &str {
        "unknown"
    }
}
