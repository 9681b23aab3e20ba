//! Integration tests for the Phrasecraft HTTP API
//!
//! Drives the full router in-process:
//! - Health check
//! - Scoring with explicit strategy / practice mode
//! - Lesson sanitization (placeholder repair, pass-through, null list)
//! - Per-session phrase picking and reset

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use serde_json::{json, Value};
use tower::ServiceExt;

use phrasecraft::config::AppConfig;
use phrasecraft::routes::build_router;
use phrasecraft::state::AppState;

fn setup_router() -> axum::Router {
    build_router(Arc::new(AppState::with_config(AppConfig::default())))
}

/// Send one request and decode the JSON body (if any).
async fn make_request(app: &axum::Router, method: Method, path: &str, body: Option<Value>) -> (StatusCode, Value) {
    let mut request = Request::builder().method(method).uri(path);
    if body.is_some() {
        request = request.header("content-type", "application/json");
    }
    let request = match body {
        Some(json_body) => request.body(Body::from(json_body.to_string())).unwrap(),
        None => request.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = if bytes.is_empty() { Value::Null } else { serde_json::from_slice(&bytes).unwrap_or(Value::Null) };
    (status, value)
}

#[tokio::test]
async fn test_health_endpoint() {
    let app = setup_router();
    let (status, body) = make_request(&app, Method::GET, "/api/v1/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["ok"], true);
}

#[tokio::test]
async fn test_score_pronunciation_mode() {
    let app = setup_router();
    let (status, body) = make_request(
        &app,
        Method::POST,
        "/api/v1/score",
        Some(json!({ "target": "Buenos días", "spoken": "buenos", "mode": "pronunciation" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["accuracy"], 50);
    assert_eq!(body["grade"], "try_again");
    assert_eq!(body["strategy"], "word_overlap");
}

#[tokio::test]
async fn test_score_strategy_quirk_on_empty_input() {
    let app = setup_router();
    let (_, overlap) = make_request(
        &app,
        Method::POST,
        "/api/v1/score",
        Some(json!({ "target": "", "spoken": "", "strategy": "word_overlap" })),
    )
    .await;
    let (_, weighted) = make_request(
        &app,
        Method::POST,
        "/api/v1/score",
        Some(json!({ "target": "", "spoken": "", "strategy": "weighted" })),
    )
    .await;
    assert_eq!(overlap["accuracy"], 100);
    assert_eq!(weighted["accuracy"], 0);
}

#[tokio::test]
async fn test_score_rejects_missing_fields() {
    let app = setup_router();
    let (status, _) = make_request(&app, Method::POST, "/api/v1/score", Some(json!({ "target": "x" }))).await;
    assert!(status.is_client_error());
}

#[tokio::test]
async fn test_sanitize_repairs_placeholders() {
    let app = setup_router();
    let (status, body) = make_request(
        &app,
        Method::POST,
        "/api/v1/sanitize",
        Some(json!({
            "language": "es",
            "exercises": [
                {
                    "id": "ex-1", "exercise_type": "multiple_choice",
                    "question": "Pick one", "correct_answer": "correct_option",
                    "options": ["option1", "option2"], "lesson_id": "L1"
                },
                {
                    "id": "ex-2", "exercise_type": "match_pairs",
                    "question": "Match", "correct_answer": "", "options": { "pairs": [] }
                },
                {
                    "id": "ex-3", "exercise_type": "speak_answer",
                    "question": "Say it", "correct_answer": "Gracias", "options": null
                }
            ]
        })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["repaired"], 2);
    let exercises = body["exercises"].as_array().expect("exercises array");
    assert_eq!(exercises.len(), 3);

    let mc = &exercises[0];
    assert!(mc["question"].as_str().unwrap().starts_with("Translate:"));
    assert_eq!(mc["options"].as_array().unwrap().len(), 4);
    assert!(mc["options"].as_array().unwrap().contains(&mc["correct_answer"]));
    assert_eq!(mc["lesson_id"], "L1");

    let mp = &exercises[1];
    assert_eq!(mp["question"], "Match the pairs");
    assert_eq!(mp["correct_answer"], "");
    assert_eq!(mp["options"]["pairs"].as_array().unwrap().len(), 4);

    let sa = &exercises[2];
    assert_eq!(sa["correct_answer"], "Gracias");
    assert_eq!(sa["options"], Value::Null);
}

#[tokio::test]
async fn test_sanitize_is_stable_across_calls() {
    let app = setup_router();
    let payload = json!({
        "language": "ja",
        "exercises": [
            { "id": "w", "exercise_type": "word_bank", "question": "", "correct_answer": "", "options": { "words": [] } }
        ]
    });
    let (_, first) = make_request(&app, Method::POST, "/api/v1/sanitize", Some(payload.clone())).await;
    let (_, second) = make_request(&app, Method::POST, "/api/v1/sanitize", Some(payload)).await;
    assert_eq!(first, second);

    // Feeding the output back in changes nothing.
    let again = json!({ "language": "ja", "exercises": first["exercises"].clone() });
    let (_, third) = make_request(&app, Method::POST, "/api/v1/sanitize", Some(again)).await;
    assert_eq!(third["repaired"], 0);
    assert_eq!(third["exercises"], first["exercises"]);
}

#[tokio::test]
async fn test_sanitize_null_list_uses_default_language() {
    let app = setup_router();
    let (status, body) =
        make_request(&app, Method::POST, "/api/v1/sanitize", Some(json!({ "exercises": null }))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["exercises"], json!([]));
    assert_eq!(body["language"], "en");
}

#[tokio::test]
async fn test_phrase_picking_per_session() {
    let app = setup_router();
    let path = "/api/v1/phrase?session=alice&language=fr&category=food";

    let (status, first) = make_request(&app, Method::GET, path, None).await;
    assert_eq!(status, StatusCode::OK);
    let (_, second) = make_request(&app, Method::GET, path, None).await;
    assert_ne!(first["key"], second["key"]);
    assert_eq!(first["category"], "food");

    let (status, body) = make_request(
        &app,
        Method::POST,
        "/api/v1/phrase/reset",
        Some(json!({ "session": "alice", "category": "food" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["session"], "alice");
}

#[tokio::test]
async fn test_phrase_rejects_unknown_category() {
    let app = setup_router();
    let (status, _) =
        make_request(&app, Method::GET, "/api/v1/phrase?session=bob&category=astronomy", None).await;
    assert!(status.is_client_error());
}
