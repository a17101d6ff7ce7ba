//! Structured Encyclopedia Article Client
//!
//! A client library for a structured-article backend: it fetches
//! multi-shaped article records over HTTP, derives read-only view
//! aggregates from them, and exposes a coherent, atomically-updated read
//! model to a display surface.
//!
//! # Design Philosophy
//!
//! - Stateless pure functions over fetched records, not a stateful service
//! - The gateway is a trait: tests substitute a mock, never the network
//! - Server-computed totals stay authoritative; client-derived aggregates
//!   live under separate names and the two are never merged
//! - All-or-nothing view updates: a failed fetch leaves the previous view
//!   untouched, and stale responses are discarded by a request generation
//!
//! # Usage
//!
//! ```rust,ignore
//! use structured_wiki::{AppConfig, ArticleViewer, HttpGateway};
//!
//! let config = AppConfig::load("config.json")?;
//! let viewer = ArticleViewer::new(HttpGateway::new(config.backend_url()?));
//!
//! viewer.load("Joe Biden", Some("en")).await?;
//! let view = viewer.current().expect("load succeeded");
//! println!("{} sections", view.stats().total_sections);
//! ```
//!
//! # Modules
//!
//! - [`types`] - Wire records, request parameters, and configuration
//! - [`gateway`] - The backend seam: HTTP implementation and test mock
//! - [`view`] - Pure derived-view calculators (stats, search, rankings)
//! - [`wiki_url`] - Source-site URL parsing
//! - [`viewer`] - Orchestration: atomic view-state with generation guard
//! - [`testing`] - Fixtures for tests

pub mod error;
pub mod gateway;
pub mod testing;
pub mod types;
pub mod view;
pub mod viewer;
pub mod wiki_url;

// Re-export core types at crate root
pub use error::{ConfigError, GatewayError, GatewayResult, ViewerError, ViewerResult};
pub use gateway::{ArticleGateway, GatewayCall, GatewayOp, HttpGateway, MockFailure, MockGateway};
pub use types::{
    ApiKey, AppConfig, ArticleQuery, Citation, CitationAnalysis, CitedArticle, Reference,
    ReferenceAnalysis, Section, SectionDetail, SectionQuery, Settings, StructuredArticle,
    DEFAULT_TOOL, DEV_BACKEND_URL,
};
pub use view::{
    article_stats, format_citation_positions, format_section_content, most_cited_articles,
    search_sections, word_count, ArticleStats, DEFAULT_MOST_CITED_LIMIT, DEFAULT_POSITION_LIMIT,
    DEFAULT_PREVIEW_LENGTH, NO_CITATIONS_MESSAGE,
};
pub use viewer::{ArticleViewer, LoadStatus, ViewState};
pub use wiki_url::{parse_wikipedia_url, WikiUrl};
