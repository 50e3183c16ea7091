#![cfg(unix)]

use image_service::functions::{router, AppState, ServiceBinary};
use reqwest::StatusCode;
use serde_json::{json, Value};
use tempfile::{tempdir, TempDir};
use tokio::net::TcpListener;

/// Serve the functions with `script` standing in for the image service.
async fn serve(script: &str) -> (String, TempDir) {
    let dir = tempdir().unwrap();
    let path = dir.path().join("image-service.sh");
    std::fs::write(&path, script).unwrap();
    serve_binary(ServiceBinary::new("/bin/sh").with_args([&path]), dir).await
}

async fn serve_binary(binary: ServiceBinary, dir: TempDir) -> (String, TempDir) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let app = router(AppState::new(binary));
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    (format!("http://{}", addr), dir)
}

async fn post(base: &str, route: &str, body: Value) -> (StatusCode, String) {
    let response = reqwest::Client::new()
        .post(format!("{}{}", base, route))
        .json(&body)
        .send()
        .await
        .unwrap();
    let status = response.status();
    (status, response.text().await.unwrap())
}

#[tokio::test]
async fn upload_relays_service_json() {
    let (base, _dir) = serve(r#"printf '%s' '{"success":true,"url":"x"}'"#).await;

    let request = json!({"content": "abc", "type": "png"});
    let (status, body) = post(&base, "/testImageUpload", request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, r#"{"success":true,"url":"x"}"#);
}

#[tokio::test]
async fn upload_passes_fields_as_arguments() {
    let (base, _dir) = serve(r#"printf '{"success":true,"args":"%s"}' "$*""#).await;

    let (_, body) = post(&base, "/testImageUpload", json!({"content": "abc", "type": "png"})).await;
    let body: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(body["args"], "--upload abc png");

    let (_, body) = post(
        &base,
        "/testImageUpload",
        json!({"content": "abc", "type": "png", "filename": "cat.png"}),
    )
    .await;
    let body: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(body["args"], "--upload abc png cat.png");
}

#[tokio::test]
async fn watermark_passes_paths() {
    let (base, _dir) = serve(r#"printf '{"success":true,"args":"%s"}' "$*""#).await;

    let (status, body) = post(
        &base,
        "/testWatermarkImage",
        json!({"image_path": "images/a.jpg", "watermark_path": "images/logo.png"}),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let body: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(body["args"], "--watermark images/a.jpg images/logo.png");
}

#[tokio::test]
async fn failing_service_is_500() {
    let (base, _dir) = serve("echo 'decode failed' >&2\nexit 1\n").await;

    let request = json!({"content": "abc", "type": "png"});
    let (status, body) = post(&base, "/testImageUpload", request).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(body["success"], false);
    let error = body["error"].as_str().unwrap();
    assert!(error.starts_with("Command failed"), "{}", error);
    assert!(error.contains("decode failed"), "{}", error);
}

#[tokio::test]
async fn unparsable_output_is_500() {
    let (base, _dir) = serve("echo 'all good'").await;

    let (status, body) = post(
        &base,
        "/testWatermarkImage",
        json!({"image_path": "a.png", "watermark_path": "b.png"}),
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(body["success"], false);
    assert!(body["error"].as_str().unwrap().contains("Invalid JSON output"));
}

#[tokio::test]
async fn reported_failure_is_500() {
    let (base, _dir) = serve(r#"printf '%s' '{"success":false,"error":"no such object"}'"#).await;

    let (status, body) = post(
        &base,
        "/testWatermarkImage",
        json!({"image_path": "a.png", "watermark_path": "b.png"}),
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(body, json!({"success": false, "error": "no such object"}));
}

#[tokio::test]
async fn missing_binary_is_500() {
    let dir = tempdir().unwrap();
    let missing = dir.path().join("not-here");
    let (base, _dir) = serve_binary(ServiceBinary::new(missing), dir).await;

    let request = json!({"content": "abc", "type": "png"});
    let (status, body) = post(&base, "/testImageUpload", request).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body.contains("Failed to execute"), "{}", body);
}

#[tokio::test]
async fn health() {
    let (base, _dir) = serve("exit 0").await;

    let response = reqwest::get(format!("{}/health", base)).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}
