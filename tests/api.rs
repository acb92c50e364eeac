mod common;

use axum::{body::Body, http::{header, Request, StatusCode}};
use pretty_assertions::assert_eq;
use serde_json::json;

use common::{body_json, body_text, get, post_json, send, test_app, RecordingGenerator};

#[tokio::test]
async fn generate_returns_extracted_html_and_metadata() {
    let generator = RecordingGenerator::replying("Sure!\n<html><body>Beans</body></html>\nLet me know.");
    let app = test_app(generator.clone());

    let response = send(&app, post_json("/api/generate", json!({
        "prompt": "landing page for a coffee shop",
        "layoutType": "Single Page"
    }))).await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["html"], "<html><body>Beans</body></html>");
    assert_eq!(body["metadata"]["model"], "recording-model");
    assert_eq!(body["metadata"]["prompt"], "landing page for a coffee shop");
    assert!(body["metadata"].get("style").is_none());
    assert_eq!(body["metadata"]["layoutType"], "Single Page");
    assert!(body["metadata"]["generatedAt"].is_string());
    assert_eq!(generator.calls(), 1);
}

#[tokio::test]
async fn generate_without_prompt_is_rejected_before_any_call() {
    let generator = RecordingGenerator::replying("<html></html>");
    let app = test_app(generator.clone());

    let response = send(&app, post_json("/api/generate", json!({ "style": "Retro" }))).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["error"], "Prompt is required");
    assert_eq!(generator.calls(), 0);
}

#[tokio::test]
async fn generate_echoes_prompt_and_labels_as_sent() {
    let generator = RecordingGenerator::replying("<html></html>");
    let app = test_app(generator.clone());

    let response = send(&app, post_json("/api/generate", json!({
        "prompt": "  coffee shop\n",
        "style": " Retro "
    }))).await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["metadata"]["prompt"], "  coffee shop\n");
    assert_eq!(body["metadata"]["style"], " Retro ");
    assert!(body["metadata"].get("layoutType").is_none());
    assert_eq!(generator.calls(), 1);
}

#[tokio::test]
async fn generate_keeps_raw_text_when_model_omits_html_tag() {
    let app = test_app(RecordingGenerator::replying("<main>fragment only</main>"));
    let response = send(&app, post_json("/api/generate", json!({ "prompt": "blog" }))).await;
    assert_eq!(body_json(response).await["html"], "<main>fragment only</main>");
}

#[tokio::test]
async fn upstream_failure_maps_to_500_with_details() {
    let app = test_app(RecordingGenerator::failing("status=429 quota exceeded"));
    let response = send(&app, post_json("/api/generate", json!({ "prompt": "blog" }))).await;
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let body = body_json(response).await;
    assert_eq!(body["error"], "Failed to generate website");
    assert!(body["details"].as_str().unwrap().contains("quota exceeded"));
}

#[tokio::test]
async fn malformed_json_is_a_bad_request() {
    let app = test_app(RecordingGenerator::replying("<html></html>"));
    let request = Request::builder()
        .method("POST")
        .uri("/api/generate")
        .header("content-type", "application/json")
        .body(Body::from("{not json"))
        .unwrap();
    let response = send(&app, request).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(body_json(response).await["error"].as_str().unwrap().starts_with("Invalid request body"));
}

#[tokio::test]
async fn chat_answers_last_message() {
    let generator = RecordingGenerator::replying("Add a testimonials section.");
    let app = test_app(generator.clone());

    let response = send(&app, post_json("/api/chat", json!({
        "messages": [
            { "role": "user", "content": "bakery site" },
            { "role": "user", "content": "what else should it have?" }
        ]
    }))).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await, json!({ "success": true, "message": "Add a testimonials section." }));
    assert_eq!(generator.calls(), 1);
}

#[tokio::test]
async fn chat_without_messages_is_rejected() {
    let generator = RecordingGenerator::replying("unused");
    let app = test_app(generator.clone());
    let response = send(&app, post_json("/api/chat", json!({ "messages": [] }))).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["error"], "Messages required");
    assert_eq!(generator.calls(), 0);
}

#[tokio::test]
async fn publish_then_view_round_trip() {
    let app = test_app(RecordingGenerator::replying("unused"));

    let response = send(&app, post_json("/api/publish", json!({
        "projectId": "project_1",
        "projectName": "Test",
        "html": "<p>hi</p>"
    }))).await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let body = body_json(response).await;
    let deployment = &body["deployment"];
    let id = deployment["id"].as_str().unwrap().to_string();
    assert!(id.starts_with("deploy_"));
    assert_eq!(deployment["status"], "live");
    assert_eq!(deployment["projectId"], "project_1");
    assert_eq!(deployment["url"], format!("https://sites.test/published/{id}"));
    assert!(deployment["deployedAt"].is_string());

    let view = send(&app, get(&format!("/published/{id}"))).await;
    assert_eq!(view.status(), StatusCode::OK);
    let csp = view.headers()[header::CONTENT_SECURITY_POLICY].to_str().unwrap().to_string();
    assert!(csp.starts_with("sandbox"));
    assert!(!csp.contains("allow-same-origin"));
    assert!(view.headers()[header::CONTENT_TYPE].to_str().unwrap().starts_with("text/html"));
    assert_eq!(body_text(view).await, "<p>hi</p>");

    let record = body_json(send(&app, get(&format!("/api/publish/{id}"))).await).await;
    assert_eq!(record["success"], true);
    assert_eq!(record["deployment"]["id"], id.as_str());
    assert_eq!(record["html"], "<p>hi</p>");
    assert_eq!(record["deployment"]["displayName"], "Test");
}

#[tokio::test]
async fn unknown_publication_is_not_found() {
    let app = test_app(RecordingGenerator::replying("unused"));

    let view = send(&app, get("/published/deploy_zzzzzzzzz")).await;
    assert_eq!(view.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(view).await["error"], "Website not found");

    let record = send(&app, get("/api/publish/deploy_zzzzzzzzz")).await;
    assert_eq!(record.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn publish_requires_project_and_html() {
    let app = test_app(RecordingGenerator::replying("unused"));

    let missing_project = send(&app, post_json("/api/publish", json!({ "html": "<p>hi</p>" }))).await;
    assert_eq!(missing_project.status(), StatusCode::BAD_REQUEST);

    let missing_html = send(&app, post_json("/api/publish", json!({ "projectId": "p" }))).await;
    assert_eq!(missing_html.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn published_list_defaults_names_and_hides_html() {
    let app = test_app(RecordingGenerator::replying("unused"));
    send(&app, post_json("/api/publish", json!({ "projectId": "p1", "html": "<p>a</p>" }))).await;
    send(&app, post_json("/api/publish", json!({ "projectId": "p2", "projectName": "Shop", "html": "<p>b</p>" }))).await;

    let body = body_json(send(&app, get("/api/publish")).await).await;
    let deployments = body["deployments"].as_array().unwrap();
    assert_eq!(deployments.len(), 2);
    assert_eq!(body["count"], 2);
    assert!(deployments.iter().all(|d| d.get("html").is_none()));
    assert!(deployments.iter().any(|d| d["displayName"] == "Untitled Project"));
    assert!(deployments.iter().any(|d| d["displayName"] == "Shop"));
}

#[tokio::test]
async fn health_reports_version() {
    let app = test_app(RecordingGenerator::replying("unused"));
    let response = send(&app, get("/api/health")).await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["status"], "ok");
    assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
}
