//! Data types: wire records, request parameters, and configuration.

pub mod article;
pub mod config;
pub mod request;

pub use article::{
    Citation, CitationAnalysis, CitedArticle, Reference, ReferenceAnalysis, Section,
    SectionDetail, StructuredArticle,
};
pub use config::{ApiKey, AppConfig, Settings, DEFAULT_TOOL, DEV_BACKEND_URL};
pub use request::{ArticleQuery, SectionQuery};
