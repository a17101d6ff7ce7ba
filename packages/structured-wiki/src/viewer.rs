//! Orchestration: one article-view session over the gateway.
//!
//! [`ArticleViewer`] owns the gateway and the single view-state holder the
//! display surface reads from. Loads are all-or-nothing: the four record
//! slots are committed in one write only after every fetch for the query
//! has succeeded, and any failure leaves the previously displayed state
//! untouched while surfacing a single user-visible message.
//!
//! Rapid repeated queries are serialized by a request generation: each
//! load snapshots a fresh generation before fetching, and a load that is
//! no longer current when its responses settle discards them (success and
//! failure alike) instead of overwriting newer state.

use chrono::{DateTime, Utc};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, RwLock};
use tracing::{debug, info, warn};

use crate::error::{ViewerError, ViewerResult};
use crate::gateway::ArticleGateway;
use crate::types::{
    ArticleQuery, CitationAnalysis, CitedArticle, ReferenceAnalysis, Section, SectionDetail,
    SectionQuery, Settings, StructuredArticle,
};
use crate::view::{self, ArticleStats, DEFAULT_MOST_CITED_LIMIT};
use crate::wiki_url::parse_wikipedia_url;

/// The atomic view-state group for one loaded query.
///
/// All four record slots were fetched for the same query and are replaced
/// together; readers never observe a mix of two queries.
#[derive(Debug, Clone)]
pub struct ViewState {
    pub query: String,
    pub lang: Option<String>,

    pub article: StructuredArticle,

    /// Detail for the selected section. `None` only when the article has
    /// no sections.
    pub section: Option<SectionDetail>,

    pub citations: CitationAnalysis,
    pub references: ReferenceAnalysis,

    /// Selection key into `article.sections`; defaults to the first
    /// section's title.
    pub selected_section: Option<String>,

    pub loaded_at: DateTime<Utc>,
}

impl ViewState {
    /// Statistics summary for the loaded article.
    pub fn stats(&self) -> ArticleStats {
        view::article_stats(&self.article)
    }

    /// Sections matching a search term, in article order.
    pub fn search_sections(&self, term: &str) -> Vec<&Section> {
        view::search_sections(&self.article, term)
    }

    /// Citation ranking with the default limit.
    pub fn most_cited(&self) -> Vec<CitedArticle> {
        view::most_cited_articles(&self.citations, DEFAULT_MOST_CITED_LIMIT)
    }

    /// The currently selected section, if the key still resolves.
    pub fn selected(&self) -> Option<&Section> {
        self.selected_section
            .as_deref()
            .and_then(|title| self.article.find_section(title))
    }

    /// Display-capped content of the selected section.
    pub fn selected_preview(&self) -> Option<String> {
        self.selected()
            .map(|section| view::format_section_content(section, view::DEFAULT_PREVIEW_LENGTH))
    }

    /// Readable citation-position line for the selected section.
    pub fn selected_citation_positions(&self) -> Option<String> {
        self.selected().map(|section| {
            view::format_citation_positions(
                &section.citation_position,
                view::DEFAULT_POSITION_LIMIT,
            )
        })
    }
}

/// Outcome of a load attempt that did not fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadStatus {
    /// The view state was replaced with this load's records.
    Applied,

    /// A newer query superseded this load; its records were discarded.
    Superseded,
}

#[derive(Default)]
struct Holder {
    view: Option<Arc<ViewState>>,
    error: Option<String>,
}

/// Orchestrates fetches and owns the view-state holder.
///
/// Generic over the gateway so tests can substitute
/// [`crate::gateway::MockGateway`]; no global state is involved.
pub struct ArticleViewer<G> {
    gateway: G,
    settings: Settings,
    generation: AtomicU64,
    holder: RwLock<Holder>,
}

impl<G> ArticleViewer<G> {
    /// Create a viewer with default [`Settings`].
    pub fn new(gateway: G) -> Self {
        Self::with_settings(gateway, Settings::default())
    }

    /// Create a viewer with explicit settings.
    pub fn with_settings(gateway: G, settings: Settings) -> Self {
        Self {
            gateway,
            settings,
            generation: AtomicU64::new(0),
            holder: RwLock::new(Holder::default()),
        }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Snapshot of the current view state, if a load has succeeded.
    pub fn current(&self) -> Option<Arc<ViewState>> {
        self.holder.read().unwrap().view.clone()
    }

    /// The user-visible message from the most recent failure, cleared by
    /// the next successful load.
    pub fn last_error(&self) -> Option<String> {
        self.holder.read().unwrap().error.clone()
    }

    fn next_generation(&self) -> u64 {
        self.generation.fetch_add(1, Ordering::SeqCst) + 1
    }

    fn is_current(&self, generation: u64) -> bool {
        self.generation.load(Ordering::SeqCst) == generation
    }
}

impl<G: ArticleGateway> ArticleViewer<G> {
    /// Load the full view for a query: article, default-section detail,
    /// citation analysis, and reference analysis.
    ///
    /// The three query-keyed fetches run concurrently; the section detail
    /// depends on the article's first section title and follows. Selection
    /// defaults to the first section.
    pub async fn load(&self, query: &str, lang: Option<&str>) -> ViewerResult<LoadStatus> {
        self.load_inner(query, lang, None).await
    }

    /// Load the full view with a known section selection.
    ///
    /// All four fetches run concurrently since no call depends on another.
    pub async fn load_with_section(
        &self,
        query: &str,
        lang: Option<&str>,
        section_title: &str,
    ) -> ViewerResult<LoadStatus> {
        self.load_inner(query, lang, Some(section_title)).await
    }

    /// Load from a source-site article URL.
    pub async fn load_from_url(&self, url: &str) -> ViewerResult<LoadStatus> {
        let parsed = parse_wikipedia_url(url).ok_or_else(|| {
            let err = ViewerError::InvalidInput {
                reason: "Invalid Wikipedia URL format".to_string(),
            };
            self.record_error(&err);
            err
        })?;
        self.load(&parsed.title, Some(&parsed.lang)).await
    }

    /// Re-select a section of the already-loaded article by title.
    ///
    /// First match wins on duplicate titles. Returns `false` when no
    /// article is loaded or the title is unknown; no network is involved
    /// and the fetched section detail is left as-is.
    pub fn select_section(&self, title: &str) -> bool {
        let mut holder = self.holder.write().unwrap();
        let Some(view) = holder.view.as_ref() else {
            return false;
        };
        let Some(section) = view.article.find_section(title) else {
            return false;
        };

        let selected = section.title.clone();
        let mut updated = (**view).clone();
        updated.selected_section = Some(selected);
        holder.view = Some(Arc::new(updated));
        true
    }

    /// Fetch one section's detail for the current query and make it the
    /// selection.
    ///
    /// Generation-guarded like [`load`](Self::load): if a new query lands
    /// while the fetch is in flight, the result is discarded.
    pub async fn load_section(&self, section_title: &str) -> ViewerResult<LoadStatus> {
        let context = {
            let holder = self.holder.read().unwrap();
            holder
                .view
                .as_ref()
                .map(|view| (view.query.clone(), view.lang.clone()))
        };
        let Some((query, lang)) = context else {
            let err = ViewerError::InvalidInput {
                reason: "No article is loaded".to_string(),
            };
            self.record_error(&err);
            return Err(err);
        };

        let generation = self.generation.load(Ordering::SeqCst);
        let mut request = SectionQuery::new(query, section_title);
        if let Some(lang) = lang {
            request = request.with_lang(lang);
        }

        let result = self.gateway.structured_section(&request).await;

        // The currency check happens under the same lock as the commit so
        // a newer query cannot land in between.
        match result {
            Ok(section) => {
                let mut holder = self.holder.write().unwrap();
                if !self.is_current(generation) {
                    debug!(section = section_title, "discarding superseded section load");
                    return Ok(LoadStatus::Superseded);
                }
                if let Some(view) = holder.view.as_ref() {
                    let mut updated = (**view).clone();
                    updated.selected_section = Some(section.title.clone());
                    updated.section = Some(section);
                    holder.view = Some(Arc::new(updated));
                    holder.error = None;
                }
                Ok(LoadStatus::Applied)
            }
            Err(err) => {
                let mut holder = self.holder.write().unwrap();
                if !self.is_current(generation) {
                    debug!(section = section_title, "discarding superseded section load");
                    return Ok(LoadStatus::Superseded);
                }
                let err = ViewerError::from(err);
                warn!(section = section_title, error = %err, "section load failed");
                holder.error = Some(err.user_message());
                Err(err)
            }
        }
    }

    async fn load_inner(
        &self,
        query: &str,
        lang: Option<&str>,
        section_hint: Option<&str>,
    ) -> ViewerResult<LoadStatus> {
        if query.trim().is_empty() {
            let err = ViewerError::InvalidInput {
                reason: "Query must not be empty".to_string(),
            };
            self.record_error(&err);
            return Err(err);
        }

        let generation = self.next_generation();
        let mut request = ArticleQuery::new(query);
        if let Some(lang) = lang {
            request = request.with_lang(lang);
        }

        debug!(query, generation, tool = %self.settings.tool, "loading article view");
        let result = self.fetch_group(&request, section_hint).await;

        // The currency check happens under the same lock as the commit so
        // a newer query cannot land in between.
        match result {
            Ok((article, section, citations, references)) => {
                let selected_section = section
                    .as_ref()
                    .map(|s| s.title.clone())
                    .or_else(|| article.default_section_title().map(str::to_string));

                let view = ViewState {
                    query: query.to_string(),
                    lang: lang.map(str::to_string),
                    article,
                    section,
                    citations,
                    references,
                    selected_section,
                    loaded_at: Utc::now(),
                };

                let mut holder = self.holder.write().unwrap();
                if !self.is_current(generation) {
                    debug!(query, generation, "discarding superseded load");
                    return Ok(LoadStatus::Superseded);
                }

                info!(
                    query,
                    sections = view.article.sections.len(),
                    "article view loaded"
                );
                holder.view = Some(Arc::new(view));
                holder.error = None;
                Ok(LoadStatus::Applied)
            }
            Err(err) => {
                let mut holder = self.holder.write().unwrap();
                if !self.is_current(generation) {
                    debug!(query, generation, "discarding superseded load");
                    return Ok(LoadStatus::Superseded);
                }

                warn!(query, error = %err, "article view load failed");
                holder.error = Some(err.user_message());
                Err(err)
            }
        }
    }

    /// Fetch the full record group for one query.
    ///
    /// Fails fast on the first error; nothing is committed here.
    async fn fetch_group(
        &self,
        request: &ArticleQuery,
        section_hint: Option<&str>,
    ) -> ViewerResult<(
        StructuredArticle,
        Option<SectionDetail>,
        CitationAnalysis,
        ReferenceAnalysis,
    )> {
        match section_hint {
            Some(title) => {
                let section_request = SectionQuery::from_article(request, title);
                let (article, section, citations, references) = tokio::try_join!(
                    self.gateway.structured_article(request),
                    self.gateway.structured_section(&section_request),
                    self.gateway.citation_analysis(request),
                    self.gateway.reference_analysis(request),
                )?;
                Ok((article, Some(section), citations, references))
            }
            None => {
                let (article, citations, references) = tokio::try_join!(
                    self.gateway.structured_article(request),
                    self.gateway.citation_analysis(request),
                    self.gateway.reference_analysis(request),
                )?;

                // The section slot depends on the article for its title.
                let section = match article.default_section_title() {
                    Some(title) => {
                        let section_request = SectionQuery::from_article(request, title);
                        Some(self.gateway.structured_section(&section_request).await?)
                    }
                    None => None,
                };

                Ok((article, section, citations, references))
            }
        }
    }

    fn record_error(&self, err: &ViewerError) {
        let mut holder = self.holder.write().unwrap();
        holder.error = Some(err.user_message());
    }
}
