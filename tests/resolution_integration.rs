//! Full-surface integration tests: REST layer + pipeline + scrape fallback.
//!
//! The primary source is an in-memory lexicon, the fallback source is a
//! wiremock HTTP server serving canned conjugation pages.

use assert_json_diff::assert_json_eq;
use flecta::backend::{ConjugationBackend, LexiconBackend};
use flecta::config::ResolveConfig;
use flecta::fallback::HttpTableFetcher;
use flecta::pipeline::Pipeline;
use flecta::rest::{self, AppState};
use serde_json::json;
use std::sync::Arc;
use std::time::Instant;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const CONJUGATION_PAGE: &str = r#"
    <html><body>
      <h1>Conjugarea verbului</h1>
      <table class="conjugation">
        <tr><th>Indicativ</th><th>Plural</th></tr>
        <tr><td>vorbesc</td><td>vorbim</td></tr>
        <tr><td>  vorbesc </td><td>persoana a II-a</td></tr>
      </table>
    </body></html>
"#;

/// Spin up the app against a fallback base URL; returns its local base URL.
async fn spawn_app(lexicon: serde_json::Value, fallback_base_url: &str) -> String {
    let mut config = ResolveConfig::default();
    config.fallback_base_url = fallback_base_url.to_string();
    config.fallback_timeout_ms = 2_000;

    let lexicon = LexiconBackend::from_value(lexicon).unwrap();
    let lexicon_verbs = lexicon.len();
    let backend: Arc<dyn ConjugationBackend> = Arc::new(lexicon);
    let fetcher = Arc::new(HttpTableFetcher::new(&config));

    let state = Arc::new(AppState {
        pipeline: Pipeline::new(backend, fetcher, config),
        started_at: Instant::now(),
        lexicon_verbs,
    });

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let app = rest::router(state);
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    format!("http://{addr}")
}

async fn post_verb(base: &str, body: serde_json::Value) -> (u16, serde_json::Value) {
    let client = reqwest::Client::new();
    let response = client
        .post(format!("{base}/conjugate"))
        .json(&body)
        .send()
        .await
        .unwrap();
    let status = response.status().as_u16();
    let json = response.json::<serde_json::Value>().await.unwrap();
    (status, json)
}

#[tokio::test]
async fn primary_hit_returns_sorted_deduped_forms() {
    let fallback = MockServer::start().await;
    // The fallback must never be consulted when the primary has data.
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string(CONJUGATION_PAGE))
        .expect(0)
        .mount(&fallback)
        .await;

    let base = spawn_app(
        json!({ "fi": { "conjugations": ["sunt", "ești", "sunt"] } }),
        &fallback.uri(),
    )
    .await;

    let (status, body) = post_verb(&base, json!({ "verb": "fi" })).await;
    assert_eq!(status, 200);
    assert_json_eq!(body, json!({ "results": ["ești", "sunt"] }));
}

#[tokio::test]
async fn citation_form_particle_is_stripped() {
    let fallback = MockServer::start().await;
    let base = spawn_app(
        json!({ "fi": { "indicativ": { "prezent": { "conjugations": ["eu sunt"] } } } }),
        &fallback.uri(),
    )
    .await;

    let (status, body) = post_verb(&base, json!({ "verb": "  A FI " })).await;
    assert_eq!(status, 200);
    assert_json_eq!(body, json!({ "results": ["eu sunt"] }));
}

#[tokio::test]
async fn empty_verb_is_bad_request() {
    let fallback = MockServer::start().await;
    let base = spawn_app(json!({}), &fallback.uri()).await;

    let (status, body) = post_verb(&base, json!({ "verb": "   " })).await;
    assert_eq!(status, 400);
    assert_json_eq!(body, json!({ "error": "Please enter a verb." }));

    // Missing field behaves like an empty verb.
    let (status, body) = post_verb(&base, json!({})).await;
    assert_eq!(status, 400);
    assert_json_eq!(body, json!({ "error": "Please enter a verb." }));
}

#[tokio::test]
async fn fallback_scrape_fills_in_for_unknown_verbs() {
    let fallback = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/vorbi"))
        .respond_with(ResponseTemplate::new(200).set_body_string(CONJUGATION_PAGE))
        .expect(1)
        .mount(&fallback)
        .await;

    let base = spawn_app(json!({}), &fallback.uri()).await;

    let (status, body) = post_verb(&base, json!({ "verb": "a vorbi" })).await;
    assert_eq!(status, 200);
    // Header cells and the leaked "persoana" label are gone; duplicates
    // collapsed; sorted ascending.
    assert_json_eq!(body, json!({ "results": ["vorbesc", "vorbim"] }));
}

#[tokio::test]
async fn both_sources_empty_is_not_found() {
    let fallback = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/xzq"))
        .respond_with(ResponseTemplate::new(404))
        .expect(1)
        .mount(&fallback)
        .await;

    let base = spawn_app(json!({}), &fallback.uri()).await;

    let (status, body) = post_verb(&base, json!({ "verb": "xzq" })).await;
    assert_eq!(status, 404);
    assert_json_eq!(body, json!({ "error": "Verb 'xzq' not found." }));
}

#[tokio::test]
async fn fallback_page_without_tables_is_not_found() {
    let fallback = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200).set_body_string("<html><body>nimic aici</body></html>"),
        )
        .mount(&fallback)
        .await;

    let base = spawn_app(json!({}), &fallback.uri()).await;

    let (status, _) = post_verb(&base, json!({ "verb": "gol" })).await;
    assert_eq!(status, 404);
}

#[tokio::test]
async fn health_reports_lexicon_size() {
    let fallback = MockServer::start().await;
    let base = spawn_app(
        json!({ "fi": { "conjugations": ["sunt"] }, "avea": { "c": ["am"] } }),
        &fallback.uri(),
    )
    .await;

    let response = reqwest::get(format!("{base}/health")).await.unwrap();
    assert_eq!(response.status().as_u16(), 200);

    let body = response.json::<serde_json::Value>().await.unwrap();
    assert_eq!(body["status"], "ok");
    assert_eq!(body["lexicon_verbs"], 2);
}

#[tokio::test]
async fn paired_rows_resolve_to_composite_forms() {
    let fallback = MockServer::start().await;
    let base = spawn_app(
        json!({ "vorbi": { "conjugations": [["eu", "vorbesc"], ["tu", "vorbești"]] } }),
        &fallback.uri(),
    )
    .await;

    let (status, body) = post_verb(&base, json!({ "verb": "vorbi" })).await;
    assert_eq!(status, 200);
    assert_json_eq!(body, json!({ "results": ["eu vorbesc", "tu vorbești"] }));
}
