//! Integration tests for the article viewer loop.
//!
//! These tests verify the full view-state workflow over the mock gateway:
//! 1. Load a query (concurrent fetches, default selection)
//! 2. Fail a fetch (all-or-nothing commit, user-visible error)
//! 3. Race two queries (stale responses are discarded)

use std::sync::Arc;
use std::time::Duration;

use structured_wiki::{
    testing::{
        populated_mock, sample_article, sample_citation_analysis, sample_reference_analysis,
        sample_section_detail,
    },
    ArticleViewer, GatewayCall, GatewayOp, LoadStatus, MockFailure, MockGateway, ViewerError,
};

#[tokio::test]
async fn test_load_populates_all_slots_and_default_selection() {
    let mock = populated_mock("Joe Biden");
    let viewer = ArticleViewer::new(mock.clone());

    let status = viewer.load("Joe Biden", Some("en")).await.unwrap();
    assert_eq!(status, LoadStatus::Applied);

    let view = viewer.current().expect("view state committed");
    assert_eq!(view.query, "Joe Biden");
    assert_eq!(view.lang.as_deref(), Some("en"));

    // Default selection is the first section's title.
    assert_eq!(view.selected_section.as_deref(), Some("Early life"));
    assert_eq!(view.section.as_ref().unwrap().title, "Early life");

    let stats = view.stats();
    assert_eq!(stats.total_sections, 2);

    let most_cited = view.most_cited();
    assert_eq!(most_cited[0].title, "Delaware");
    assert_eq!(most_cited[0].count, 2);

    let preview = view.selected_preview().expect("a section is selected");
    assert!(preview.starts_with("Born in Scranton"));
    assert_eq!(
        view.selected_citation_positions().as_deref(),
        Some("paragraph 1")
    );

    assert_eq!(view.references.total_references, 5);
    assert!(viewer.last_error().is_none());

    // One call of each kind went out for the query.
    let calls = mock.calls();
    assert_eq!(calls.len(), 4);
    assert!(calls.contains(&GatewayCall::Section {
        query: "Joe Biden".to_string(),
        section_title: "Early life".to_string(),
    }));
}

#[tokio::test]
async fn test_failed_fetch_commits_nothing() {
    let mock = populated_mock("Joe Biden")
        .with_failure(GatewayOp::Citations, MockFailure::Status(500));
    let viewer = ArticleViewer::new(mock.clone());

    let err = viewer
        .load_with_section("Joe Biden", Some("en"), "Early life")
        .await
        .unwrap_err();

    // The citation-analysis failure surfaces even though the other three
    // operations succeed.
    assert!(matches!(
        err,
        ViewerError::Gateway(structured_wiki::GatewayError::Request { status: 500 })
    ));

    // No slot was written: the update group is atomic.
    assert!(viewer.current().is_none());
    let message = viewer.last_error().expect("failure message recorded");
    assert!(message.contains("500"));
}

#[tokio::test]
async fn test_failed_reload_preserves_previous_view() {
    let mock = populated_mock("Joe Biden");
    let viewer = ArticleViewer::new(mock.clone());
    viewer.load("Joe Biden", Some("en")).await.unwrap();

    // The next query's article fetch dies on the wire.
    mock.set_failure(GatewayOp::Article, MockFailure::Unavailable);
    let err = viewer.load("Kamala Harris", Some("en")).await.unwrap_err();
    assert_eq!(err.user_message(), "The article service is unavailable.");

    // Previously displayed data is untouched.
    let view = viewer.current().expect("previous view retained");
    assert_eq!(view.query, "Joe Biden");
    assert_eq!(viewer.last_error().as_deref(), Some("The article service is unavailable."));

    // A later successful load clears the error state.
    mock.clear_failure(GatewayOp::Article);
    viewer.load("Joe Biden", Some("en")).await.unwrap();
    assert!(viewer.last_error().is_none());
}

#[tokio::test]
async fn test_stale_response_is_discarded() {
    let mock = MockGateway::new()
        .with_article("Slow Article", sample_article())
        .with_citations("Slow Article", sample_citation_analysis())
        .with_references("Slow Article", sample_reference_analysis())
        .with_delay("Slow Article", Duration::from_millis(200));
    mock.add_section("Slow Article", sample_section_detail("Early life"));

    let mut fast_article = sample_article();
    fast_article.title = "Fast Article".to_string();
    mock.add_article("Fast Article", fast_article);
    mock.add_citations("Fast Article", sample_citation_analysis());
    mock.add_references("Fast Article", sample_reference_analysis());
    mock.add_section("Fast Article", sample_section_detail("Early life"));

    let viewer = Arc::new(ArticleViewer::new(mock));

    // First query is slow; a second query lands while it is in flight.
    let slow = {
        let viewer = Arc::clone(&viewer);
        tokio::spawn(async move { viewer.load("Slow Article", Some("en")).await })
    };
    tokio::time::sleep(Duration::from_millis(50)).await;
    let fast_status = viewer.load("Fast Article", Some("en")).await.unwrap();
    assert_eq!(fast_status, LoadStatus::Applied);

    let slow_status = slow.await.unwrap().unwrap();
    assert_eq!(slow_status, LoadStatus::Superseded);

    // The newer query's state won and was not overwritten.
    let view = viewer.current().expect("view state committed");
    assert_eq!(view.query, "Fast Article");
    assert_eq!(view.article.title, "Fast Article");
}

#[tokio::test]
async fn test_stale_failure_does_not_clobber_newer_state() {
    let mock = populated_mock("Fast Article")
        .with_delay("Slow Article", Duration::from_millis(200));
    // "Slow Article" has no canned records: it will 404 after its delay.

    let viewer = Arc::new(ArticleViewer::new(mock));

    let slow = {
        let viewer = Arc::clone(&viewer);
        tokio::spawn(async move { viewer.load("Slow Article", Some("en")).await })
    };
    tokio::time::sleep(Duration::from_millis(50)).await;
    viewer.load("Fast Article", Some("en")).await.unwrap();

    // The stale failure is discarded outright: no error state, no Err.
    let slow_status = slow.await.unwrap().unwrap();
    assert_eq!(slow_status, LoadStatus::Superseded);
    assert!(viewer.last_error().is_none());
    assert_eq!(viewer.current().unwrap().query, "Fast Article");
}

#[tokio::test]
async fn test_empty_query_is_rejected_before_the_network() {
    let mock = MockGateway::new();
    let viewer = ArticleViewer::new(mock.clone());

    let err = viewer.load("   ", Some("en")).await.unwrap_err();
    assert!(matches!(err, ViewerError::InvalidInput { .. }));

    // No gateway call was attempted.
    assert_eq!(mock.call_count(), 0);
    assert!(viewer.current().is_none());
}

#[tokio::test]
async fn test_load_from_url_drives_the_parsed_query() {
    let mock = populated_mock("Joe Biden");
    let viewer = ArticleViewer::new(mock.clone());

    viewer
        .load_from_url("https://en.wikipedia.org/wiki/Joe_Biden")
        .await
        .unwrap();

    let view = viewer.current().expect("view state committed");
    assert_eq!(view.query, "Joe Biden");
    assert_eq!(view.lang.as_deref(), Some("en"));

    let err = viewer.load_from_url("not a url").await.unwrap_err();
    assert!(matches!(err, ViewerError::InvalidInput { .. }));
}

#[tokio::test]
async fn test_article_without_sections_loads_with_empty_selection() {
    let mut article = sample_article();
    article.sections.clear();
    article.total_sections = 0;

    let mock = MockGateway::new()
        .with_article("Empty", article)
        .with_citations("Empty", sample_citation_analysis())
        .with_references("Empty", sample_reference_analysis());
    let viewer = ArticleViewer::new(mock.clone());

    viewer.load("Empty", None).await.unwrap();

    let view = viewer.current().expect("view state committed");
    assert!(view.section.is_none());
    assert!(view.selected_section.is_none());
    assert_eq!(view.stats().average_citations_per_section, "0");

    // No section fetch went out for a sectionless article.
    assert_eq!(mock.call_count(), 3);
}
