//! Request parameter builders for the gateway operations.
//!
//! These produce the ordered query-string pairs the backend expects:
//! `query`, then `lang` when present, then `section_title` for the
//! section variant. Nothing here validates the query text: an empty
//! `query` produces a malformed outbound request and is a caller error.
//! The viewer rejects blank queries before any network call is made.

/// Parameters for the article-scoped operations (article, citation
/// analysis, reference analysis).
#[derive(Debug, Clone, PartialEq)]
pub struct ArticleQuery {
    /// Article title or source-site URL.
    pub query: String,

    /// Language code; the backend defaults to "en" when omitted.
    pub lang: Option<String>,
}

impl ArticleQuery {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            lang: None,
        }
    }

    /// Set the language code.
    pub fn with_lang(mut self, lang: impl Into<String>) -> Self {
        self.lang = Some(lang.into());
        self
    }

    /// Ordered query-string pairs for the outbound request.
    pub fn params(&self) -> Vec<(&'static str, &str)> {
        let mut params = vec![("query", self.query.as_str())];
        if let Some(lang) = &self.lang {
            params.push(("lang", lang.as_str()));
        }
        params
    }
}

/// Parameters for the single-section operation.
#[derive(Debug, Clone, PartialEq)]
pub struct SectionQuery {
    pub query: String,
    pub lang: Option<String>,

    /// Title of the section to retrieve; matched case-insensitively by
    /// the backend.
    pub section_title: String,
}

impl SectionQuery {
    pub fn new(query: impl Into<String>, section_title: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            lang: None,
            section_title: section_title.into(),
        }
    }

    /// Set the language code.
    pub fn with_lang(mut self, lang: impl Into<String>) -> Self {
        self.lang = Some(lang.into());
        self
    }

    /// Build from an [`ArticleQuery`] plus a section title, keeping the
    /// language.
    pub fn from_article(query: &ArticleQuery, section_title: impl Into<String>) -> Self {
        Self {
            query: query.query.clone(),
            lang: query.lang.clone(),
            section_title: section_title.into(),
        }
    }

    /// Ordered query-string pairs for the outbound request.
    pub fn params(&self) -> Vec<(&'static str, &str)> {
        let mut params = vec![("query", self.query.as_str())];
        if let Some(lang) = &self.lang {
            params.push(("lang", lang.as_str()));
        }
        params.push(("section_title", self.section_title.as_str()));
        params
    }
}
