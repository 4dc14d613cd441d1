mod common;

use std::sync::Arc;

use anyhow::anyhow;
use async_trait::async_trait;
use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use echolingo_api::models::question::QuestionRecord;
use echolingo_api::models::Difficulty;
use echolingo_api::store::memory::InMemoryAttemptStore;
use echolingo_api::store::{QuestionCatalog, QuestionFilter};
use tower::ServiceExt;

#[tokio::test]
async fn weakness_recommendation_end_to_end() {
    let user = "learner-2";
    let mut attempts = Vec::new();
    // 4 wrong news answers make news a weakness; 3 correct conversation
    // answers make a strength; 7 total puts the preferred difficulty at medium.
    for _ in 0..4 {
        attempts.push(common::attempt(user, Some("news"), false));
    }
    for _ in 0..3 {
        attempts.push(common::attempt(user, Some("conversation"), true));
    }

    let questions = vec![common::question("q1", Some("news"), Difficulty::Medium)];
    let app = common::create_test_app(attempts, questions);

    let response = app
        .oneshot(
            Request::builder()
                .uri(format!("/api/v1/users/{}/recommendations", user))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json: serde_json::Value = serde_json::from_slice(&body).unwrap();

    let first = &json[0];
    assert_eq!(first["question_id"], "q1");
    assert_eq!(first["reason"], "weakness_improvement");
    // 50 base + 30 reason + 15 difficulty + 20 weak category = 115, clamped.
    assert_eq!(first["recommendation_score"], 100);
    assert!(first["recommendation_reason"]
        .as_str()
        .unwrap()
        .contains("ニュース"));
    let confidence = first["confidence"].as_f64().unwrap();
    assert!((confidence - 0.9).abs() < 1e-9);
}

#[tokio::test]
async fn new_user_gets_exploration_and_backfill() {
    let questions = vec![
        common::question("c1", Some("conversation"), Difficulty::Easy),
        common::question("n1", Some("news"), Difficulty::Easy),
        common::question("s1", Some("story"), Difficulty::Easy),
    ];
    let app = common::create_test_app(Vec::new(), questions);

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/v1/users/newcomer/recommendations")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
    let entries = json.as_array().unwrap();

    // Two unexplored categories are sampled first, the rest is backfill.
    assert_eq!(entries[0]["question_id"], "c1");
    assert_eq!(entries[0]["reason"], "exploration");
    assert_eq!(entries[1]["question_id"], "n1");
    assert_eq!(entries[1]["reason"], "exploration");
    assert_eq!(entries[2]["question_id"], "s1");
    assert_eq!(entries[2]["reason"], "general");
}

#[tokio::test]
async fn recommendations_are_capped_and_unique() {
    let user = "learner-3";
    let mut attempts = Vec::new();
    for _ in 0..4 {
        attempts.push(common::attempt(user, Some("news"), false));
    }
    for _ in 0..3 {
        attempts.push(common::attempt(user, Some("story"), true));
    }

    let questions: Vec<QuestionRecord> = (0..15)
        .map(|i| common::question(&format!("q{}", i), Some("news"), Difficulty::Medium))
        .collect();
    let app = common::create_test_app(attempts, questions);

    let response = app
        .oneshot(
            Request::builder()
                .uri(format!("/api/v1/users/{}/recommendations", user))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
    let entries = json.as_array().unwrap();

    assert!(entries.len() <= 6);
    let mut ids: Vec<&str> = entries
        .iter()
        .map(|e| e["question_id"].as_str().unwrap())
        .collect();
    ids.sort();
    let before = ids.len();
    ids.dedup();
    assert_eq!(ids.len(), before);
}

#[tokio::test]
async fn empty_catalog_yields_an_empty_list() {
    let app = common::create_test_app(Vec::new(), Vec::new());

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/v1/users/anyone/recommendations")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(json, serde_json::json!([]));
}

struct FailingCatalog;

#[async_trait]
impl QuestionCatalog for FailingCatalog {
    async fn find_questions(
        &self,
        _filter: &QuestionFilter,
        _limit: usize,
    ) -> anyhow::Result<Vec<QuestionRecord>> {
        Err(anyhow!("catalog unreachable"))
    }

    async fn ping(&self) -> anyhow::Result<()> {
        Err(anyhow!("catalog unreachable"))
    }
}

#[tokio::test]
async fn catalog_failure_maps_to_internal_error() {
    let app = common::create_test_app_with_stores(
        Arc::new(InMemoryAttemptStore::new(Vec::new())),
        Arc::new(FailingCatalog),
    );

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/v1/users/anyone/recommendations")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
}
