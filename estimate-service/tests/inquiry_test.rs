mod common;

use axum::http::StatusCode;
use common::{order_payload, TestApp};
use estimate_service::models::EstimateStatus;
use estimate_service::services::InquiryStore;
use serde_json::json;

#[tokio::test]
async fn submitted_inquiry_is_pending_and_listed() {
    let app = TestApp::new();

    let id = app.submit_inquiry("山田太郎").await;
    assert_eq!(app.store.status_of(id), Some(EstimateStatus::Pending));

    let (status, body) = app.get_json("/api/inquiries").await;
    assert_eq!(status, StatusCode::OK);
    let inquiries = body.as_array().unwrap();
    assert_eq!(inquiries.len(), 1);
    assert_eq!(inquiries[0]["name"], "山田太郎");
    assert_eq!(inquiries[0]["status"], 0);
    assert_eq!(inquiries[0]["screens"], json!([]));
    assert!(inquiries[0]["answers"].as_str().unwrap().contains("社内業務の効率化"));
}

#[tokio::test]
async fn submit_rejects_invalid_email() {
    let app = TestApp::new();

    let (status, body) = app
        .post_json(
            "/submit_inquiry",
            json!({
                "name": "山田",
                "email": "not-an-email",
                "message": "相談です",
                "simulationResult": {"screens": []}
            }),
        )
        .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["error"], "Validation error");
    let (_, list) = app.get_json("/api/inquiries").await;
    assert_eq!(list, json!([]));
}

#[tokio::test]
async fn inquiry_listing_is_newest_first() {
    let app = TestApp::new();
    let first = app.submit_inquiry("一件目").await;
    let second = app.submit_inquiry("二件目").await;

    let (_, body) = app.get_json("/api/inquiries").await;
    let ids: Vec<i64> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|i| i["id"].as_i64().unwrap())
        .collect();
    assert_eq!(ids, vec![second, first]);
}

#[tokio::test]
async fn inquiry_detail_normalizes_missing_fields() {
    let app = TestApp::new();
    let id = app.submit_inquiry("佐藤").await;
    app.store.insert_screen(id, "トップ", None);

    let (status, body) = app.get_json(&format!("/api/inquirydetail/{}", id)).await;

    assert_eq!(status, StatusCode::OK, "{}", body);
    assert_eq!(body["id"], id);
    assert_eq!(body["screens"][0]["title"], "トップ");
    assert_eq!(body["screens"][0]["catchphrase"], "");
    assert_eq!(body["screens"][0]["description"], "");
}

#[tokio::test]
async fn inquiry_detail_unknown_id_is_not_found() {
    let app = TestApp::new();

    let (status, _) = app.get_json("/api/inquirydetail/999").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn accept_order_writes_children_and_marks_accepted() {
    let app = TestApp::new();
    let id = app.submit_inquiry("鈴木").await;

    let (status, body) = app.post_json("/api/accept-order", order_payload(id)).await;

    assert_eq!(status, StatusCode::OK, "{}", body);
    assert_eq!(body["inquiry_id"], id);
    assert_eq!(body["status"], 1);
    assert_eq!(body["screens_created"], 2);
    assert_eq!(body["events_created"], 1);
    assert_eq!(body["entities_created"], 1);
    assert_eq!(body["relations_created"], 1);
    assert_eq!(body["ai_response_saved"], true);
    assert_eq!(app.store.status_of(id), Some(EstimateStatus::Accepted));
}

#[tokio::test]
async fn accept_order_unknown_inquiry_writes_nothing() {
    let app = TestApp::new();
    app.submit_inquiry("高橋").await;

    let (status, _) = app.post_json("/api/accept-order", order_payload(4242)).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(app.store.child_row_count(), 0);
}

#[tokio::test]
async fn resubmitted_order_duplicates_rows_but_keeps_one_ai_response() {
    let app = TestApp::new();
    let id = app.submit_inquiry("伊藤").await;

    app.post_json("/api/accept-order", order_payload(id)).await;
    let (status, _) = app.post_json("/api/accept-order", order_payload(id)).await;
    assert_eq!(status, StatusCode::OK);

    // 4 screens, 2 events, 2 entities, 2 relations and a single AI response.
    assert_eq!(app.store.child_row_count(), 11);

    let mut revised = order_payload(id);
    revised["ai_response"] = json!({"screens": {"ログイン": {"workload": "3"}}, "events": {}});
    app.post_json("/api/accept-order", revised).await;

    let rows = app.store.order_rows(id).await.unwrap();
    assert_eq!(rows.screens.len(), 6);
    let ai = rows.ai_response.unwrap();
    assert_eq!(ai.screens["ログイン"]["workload"], "3");
    assert!(ai.raw_response.is_none());
}

#[tokio::test]
async fn ordered_estimates_show_accepted_inquiries_once_per_screen() {
    let app = TestApp::new();
    let pending = app.submit_inquiry("未受注").await;
    let accepted = app.submit_inquiry("受注").await;

    app.post_json("/api/accept-order", order_payload(accepted))
        .await;
    app.post_json("/api/accept-order", order_payload(accepted))
        .await;

    let (status, body) = app.get_json("/api/ordered_estimates").await;

    assert_eq!(status, StatusCode::OK, "{}", body);
    let rows = body.as_array().unwrap();
    assert!(rows.iter().all(|r| r["id"] != pending));
    let titles: Vec<&str> = rows
        .iter()
        .map(|r| r["screen"]["title"].as_str().unwrap())
        .collect();
    assert_eq!(titles, vec!["ログイン", "一覧"]);
    assert_eq!(rows[0]["screen"]["catchphrase"], "安全にログイン");
}

#[tokio::test]
async fn accept_order_rejects_blank_screen_title() {
    let app = TestApp::new();
    let id = app.submit_inquiry("渡辺").await;

    let (status, _) = app
        .post_json(
            "/api/accept-order",
            json!({ "inquiry_id": id, "screens": [{"title": ""}] }),
        )
        .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(app.store.status_of(id), Some(EstimateStatus::Pending));
}

#[tokio::test]
async fn accept_order_rejects_over_long_event_screen() {
    let app = TestApp::new();
    let id = app.submit_inquiry("中村").await;

    let (status, body) = app
        .post_json(
            "/api/accept-order",
            json!({
                "inquiry_id": id,
                "events": [{"name": "login", "screen": "画".repeat(300), "process": "認証する"}]
            }),
        )
        .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["error"], "Validation error");
    assert_eq!(app.store.child_row_count(), 0);
    assert_eq!(app.store.status_of(id), Some(EstimateStatus::Pending));
}
