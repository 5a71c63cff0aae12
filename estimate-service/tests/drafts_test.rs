mod common;

use axum::http::StatusCode;
use common::TestApp;
use serde_json::json;

#[tokio::test]
async fn saved_draft_can_be_loaded() {
    let app = TestApp::new();
    let answers = json!({ "1": "売上拡大・集客", "3": ["PC"] });

    let (status, body) = app
        .post_json("/save", json!({ "answers": answers.clone() }))
        .await;
    assert_eq!(status, StatusCode::OK);
    let id = body["id"].as_str().unwrap().to_string();

    let (status, body) = app.get_json(&format!("/load/{}", id)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["answers"], answers);
}

#[tokio::test]
async fn saving_with_known_id_overwrites() {
    let app = TestApp::new();
    let (_, body) = app.post_json("/save", json!({ "answers": {"1": "a"} })).await;
    let id = body["id"].as_str().unwrap().to_string();

    let (_, body) = app
        .post_json("/save", json!({ "id": id, "answers": {"1": "b"} }))
        .await;
    assert_eq!(body["id"], id);

    let (_, loaded) = app.get_json(&format!("/load/{}", id)).await;
    assert_eq!(loaded["answers"], json!({"1": "b"}));
}

#[tokio::test]
async fn loading_unknown_draft_is_not_found() {
    let app = TestApp::new();

    let (status, _) = app.get_json("/load/does-not-exist").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
