//! Integration tests for the HTTP surface, run fully in-process with
//! `tower::ServiceExt::oneshot`, an in-memory store, and the mock AI
//! provider (`AI_TEST_MODE=mock`, no network traffic).

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use serial_test::serial;
use tower::ServiceExt; // for oneshot

use vizzey_feed_engine::store::MemoryStore;

fn build_app() -> Router {
    std::env::set_var("AI_TEST_MODE", "mock");
    vizzey_feed_engine::app_with_store(MemoryStore::shared())
}

async fn request(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(v) => {
            builder = builder.header("content-type", "application/json");
            Body::from(serde_json::to_vec(&v).expect("serialize payload"))
        }
        None => Body::empty(),
    };
    let req = builder.body(body).expect("request build");
    let resp = app.clone().oneshot(req).await.expect("router response");
    let status = resp.status();
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
        .await
        .expect("read body");
    let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, value)
}

#[tokio::test]
#[serial]
async fn health_is_ok() {
    let app = build_app();
    let req = Request::builder()
        .uri("/health")
        .body(Body::empty())
        .expect("request");
    let resp = app.oneshot(req).await.expect("response");
    assert_eq!(resp.status(), StatusCode::OK);
}

#[tokio::test]
#[serial]
async fn feed_serves_one_page_and_load_more_extends_it() {
    let app = build_app();
    let (status, feed) = request(&app, "GET", "/feed", None).await;
    assert_eq!(status, StatusCode::OK);
    let articles = feed["articles"].as_array().expect("articles");
    assert_eq!(articles.len(), 5);
    assert_eq!(feed["pages"], 1);

    let (_, more) = request(&app, "POST", "/feed/more", None).await;
    let extended = more["articles"].as_array().expect("articles");
    assert_eq!(extended.len(), 10);
    // Prefix property: the first page is unchanged.
    assert_eq!(&extended[..5], &articles[..]);
}

#[tokio::test]
#[serial]
async fn toggling_a_country_filters_the_feed() {
    let app = build_app();
    let (status, profile) = request(
        &app,
        "POST",
        "/toggle",
        Some(json!({"kind": "country", "value": "Japan"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(profile["preferred_countries"], json!(["Japan"]));

    let (_, feed) = request(&app, "GET", "/feed", None).await;
    let ids: Vec<&str> = feed["articles"]
        .as_array()
        .expect("articles")
        .iter()
        .map(|a| a["id"].as_str().expect("id"))
        .collect();
    assert_eq!(ids, vec!["3", "16"]);

    // Double toggle restores the unfiltered feed.
    let (_, profile) = request(
        &app,
        "POST",
        "/toggle",
        Some(json!({"kind": "country", "value": "Japan"})),
    )
    .await;
    assert_eq!(profile["preferred_countries"], json!([]));
    let (_, feed) = request(&app, "GET", "/feed", None).await;
    assert_eq!(feed["articles"].as_array().expect("articles").len(), 5);
}

#[tokio::test]
#[serial]
async fn liking_updates_the_liked_shelf() {
    let app = build_app();
    request(
        &app,
        "POST",
        "/toggle",
        Some(json!({"kind": "like", "value": "5"})),
    )
    .await;
    let (_, feed) = request(&app, "GET", "/feed", None).await;
    let liked = feed["liked"].as_array().expect("liked");
    assert_eq!(liked.len(), 1);
    assert_eq!(liked[0]["id"], "5");
}

#[tokio::test]
#[serial]
async fn countries_endpoint_excludes_sentinels() {
    let app = build_app();
    let (status, countries) = request(&app, "GET", "/countries", None).await;
    assert_eq!(status, StatusCode::OK);
    let list = countries.as_array().expect("countries");
    assert!(list.iter().any(|c| c == "Japan"));
    assert!(!list.iter().any(|c| c == "Global" || c == "N/A"));
}

#[tokio::test]
#[serial]
async fn onboarding_complete_persists_the_flag() {
    let app = build_app();
    let (_, before) = request(&app, "GET", "/profile", None).await;
    assert_eq!(before["onboarding_completed"], json!(false));
    let (_, after) = request(&app, "POST", "/onboarding/complete", None).await;
    assert_eq!(after["onboarding_completed"], json!(true));
}

#[tokio::test]
#[serial]
async fn active_article_round_trips_and_validates() {
    let app = build_app();
    let (status, feed) = request(
        &app,
        "POST",
        "/article/active",
        Some(json!({"article_id": "7"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(feed["active_article_id"], json!("7"));

    let (status, _) = request(
        &app,
        "POST",
        "/article/active",
        Some(json!({"article_id": "ghost"})),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (_, cleared) = request(&app, "POST", "/article/active", Some(json!({"article_id": null}))).await;
    assert!(cleared.get("active_article_id").is_none());
}

#[tokio::test]
#[serial]
async fn daily_curation_is_stable_within_a_date() {
    let app = build_app();
    let (status, first) = request(&app, "GET", "/daily", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(first["articles"].as_array().expect("articles").len(), 4);
    assert!(!first["title"].as_str().expect("title").is_empty());

    let (_, second) = request(&app, "GET", "/daily", None).await;
    assert_eq!(first, second, "same date must return the cached curation");
}

#[tokio::test]
#[serial]
async fn analyze_endpoint_answers_with_the_mock() {
    let app = build_app();
    let (status, topic) = request(
        &app,
        "POST",
        "/ai/analyze",
        Some(json!({"question": "Why mass timber?"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(topic["question"], "Why mass timber?");
    assert!(!topic["answer"].as_str().expect("answer").is_empty());
}

#[tokio::test]
#[serial]
async fn chat_endpoint_replies_in_article_context() {
    let app = build_app();
    let (status, chat) = request(
        &app,
        "POST",
        "/ai/chat",
        Some(json!({
            "article_id": "2",
            "history": [
                {"role": "user", "text": "What is parametricism?"},
                {"role": "model", "text": "A design style driven by algorithms."}
            ],
            "message": "Who coined the term?"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert!(!chat["reply"].as_str().expect("reply").is_empty());
}

#[tokio::test]
#[serial]
async fn unknown_article_id_is_a_404() {
    let app = build_app();
    let (status, _) = request(
        &app,
        "POST",
        "/ai/summarize",
        Some(json!({"article_id": "no-such-id"})),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
#[serial]
async fn search_with_unparseable_answer_keeps_the_feed() {
    let app = build_app();
    // The mock returns a plain title, not Headline:/Summary: blocks, so
    // the parser yields nothing and the feed must stay local.
    let (status, resp) = request(
        &app,
        "POST",
        "/search",
        Some(json!({"query": "brutalism in Belgrade"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(resp["replaced"], json!(false));
    assert!(resp["error"].as_str().is_some());
    let (_, feed) = request(&app, "GET", "/feed", None).await;
    assert_eq!(feed["articles"].as_array().expect("articles").len(), 5);
}
