//! HTTP gateway implementation over the backend's REST endpoints.

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};
use url::Url;

use crate::error::{GatewayError, GatewayResult};
use crate::gateway::ArticleGateway;
use crate::types::{
    ArticleQuery, CitationAnalysis, ReferenceAnalysis, SectionDetail, SectionQuery,
    StructuredArticle, DEV_BACKEND_URL,
};

/// Path prefix shared by all structured-wiki endpoints.
const API_PREFIX: &str = "symmetry/v1/wiki";

const ARTICLE_PATH: &str = "structured-article";
const SECTION_PATH: &str = "structured-section";
const CITATIONS_PATH: &str = "citation-analysis";
const REFERENCES_PATH: &str = "reference-analysis";

/// Gateway that fetches records over HTTP.
///
/// The base address comes from the shell's configuration
/// ([`crate::types::AppConfig::backend_url`]); nothing is hardcoded in a
/// production build.
///
/// # Example
///
/// ```rust,ignore
/// use structured_wiki::{AppConfig, HttpGateway};
///
/// let config = AppConfig::load("config.json")?;
/// let gateway = HttpGateway::new(config.backend_url()?);
/// let article = gateway.structured_article(&request).await?;
/// ```
#[derive(Debug, Clone)]
pub struct HttpGateway {
    client: reqwest::Client,
    base_url: Url,
}

impl HttpGateway {
    /// Create a gateway against the given base address.
    pub fn new(base_url: Url) -> Self {
        Self {
            client: reqwest::Client::builder()
                .timeout(std::time::Duration::from_secs(30))
                .build()
                .expect("Failed to create HTTP client"),
            base_url,
        }
    }

    /// Gateway against the development backend on localhost.
    pub fn dev() -> Self {
        let base = Url::parse(DEV_BACKEND_URL).expect("dev backend URL is valid");
        Self::new(base)
    }

    /// Set a custom HTTP client.
    pub fn with_client(mut self, client: reqwest::Client) -> Self {
        self.client = client;
        self
    }

    /// Full endpoint address for a resource path suffix.
    fn endpoint(&self, suffix: &str) -> String {
        format!(
            "{}/{}/{}",
            self.base_url.as_str().trim_end_matches('/'),
            API_PREFIX,
            suffix
        )
    }

    /// GET a resource and decode its JSON body.
    ///
    /// The body is read as text and decoded separately so that a decode
    /// failure is distinguishable from a transport failure. Nothing beyond
    /// the record shape is validated; a structurally wrong but
    /// syntactically valid body is accepted as-is.
    async fn get_json<T: DeserializeOwned>(
        &self,
        suffix: &str,
        params: &[(&'static str, &str)],
    ) -> GatewayResult<T> {
        let url = self.endpoint(suffix);
        debug!(url = %url, "backend fetch starting");

        let response = self
            .client
            .get(&url)
            .query(params)
            .send()
            .await
            .map_err(|e| {
                warn!(url = %url, error = %e, "backend request failed");
                GatewayError::Unavailable(Box::new(e))
            })?;

        let status = response.status();
        if !status.is_success() {
            warn!(url = %url, status = status.as_u16(), "backend returned error status");
            return Err(GatewayError::Request {
                status: status.as_u16(),
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| GatewayError::Unavailable(Box::new(e)))?;

        let record = serde_json::from_str(&body)?;
        debug!(url = %url, bytes = body.len(), "backend fetch completed");
        Ok(record)
    }
}

#[async_trait]
impl ArticleGateway for HttpGateway {
    async fn structured_article(&self, query: &ArticleQuery) -> GatewayResult<StructuredArticle> {
        self.get_json(ARTICLE_PATH, &query.params()).await
    }

    async fn structured_section(&self, query: &SectionQuery) -> GatewayResult<SectionDetail> {
        self.get_json(SECTION_PATH, &query.params()).await
    }

    async fn citation_analysis(&self, query: &ArticleQuery) -> GatewayResult<CitationAnalysis> {
        self.get_json(CITATIONS_PATH, &query.params()).await
    }

    async fn reference_analysis(&self, query: &ArticleQuery) -> GatewayResult<ReferenceAnalysis> {
        self.get_json(REFERENCES_PATH, &query.params()).await
    }

    fn name(&self) -> &str {
        "http"
    }
}
