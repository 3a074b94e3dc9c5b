//! End-to-end tests for the sentiment endpoint

mod common;

use common::{
    TestClient, TestServer, MIXED_TEXT, NEGATIVE_TEXT, NEUTRAL_TEXT, POSITIVE_TEXT,
};
use reqwest::StatusCode;
use serde_json::Value;

async fn analyze(client: &TestClient, text: &str) -> Value {
    let response = client.analyze(text).await;
    assert_eq!(response.status(), StatusCode::OK);
    response.json().await.unwrap()
}

fn assert_emotions_shape(result: &Value) {
    let emotions = result["emotions"].as_array().unwrap();
    assert_eq!(emotions.len(), 5);

    let mut types: Vec<&str> = emotions
        .iter()
        .map(|e| e["type"].as_str().unwrap())
        .collect();
    types.sort();
    assert_eq!(types, ["anger", "fear", "joy", "sadness", "surprise"]);

    let scores: Vec<f64> = emotions
        .iter()
        .map(|e| e["score"].as_f64().unwrap())
        .collect();
    assert!(scores.iter().all(|s| (0.0..=1.0).contains(s)));
    assert!(scores.windows(2).all(|w| w[0] >= w[1]));
}

#[tokio::test]
async fn test_home_reports_uptime_and_version() {
    let server = TestServer::spawn().await;
    let client = TestClient::new(server.base_url.clone());

    let response = client.get_home().await;
    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = response.json().await.unwrap();
    assert!(body["uptime"].is_string());
    assert!(body["version"].is_string());
}

#[tokio::test]
async fn test_positive_text() {
    let server = TestServer::spawn().await;
    let client = TestClient::new(server.base_url.clone());

    let result = analyze(&client, POSITIVE_TEXT).await;
    assert_eq!(result["sentiment"], "positive");
    assert!(result["score"].as_f64().unwrap() > 0.7);
    assert_eq!(result["emotions"][0]["type"], "joy");
    assert_emotions_shape(&result);
}

#[tokio::test]
async fn test_negative_text() {
    let server = TestServer::spawn().await;
    let client = TestClient::new(server.base_url.clone());

    let result = analyze(&client, NEGATIVE_TEXT).await;
    assert_eq!(result["sentiment"], "negative");
    assert!(result["score"].as_f64().unwrap() < 0.3);
    assert_emotions_shape(&result);
}

#[tokio::test]
async fn test_mixed_text_resolves_positive() {
    let server = TestServer::spawn().await;
    let client = TestClient::new(server.base_url.clone());

    let result = analyze(&client, MIXED_TEXT).await;
    assert_eq!(result["sentiment"], "positive");
    assert!((result["score"].as_f64().unwrap() - 0.8).abs() < 1e-9);
}

#[tokio::test]
async fn test_neutral_and_empty_text() {
    let server = TestServer::spawn().await;
    let client = TestClient::new(server.base_url.clone());

    for text in [NEUTRAL_TEXT, "", "    "] {
        let result = analyze(&client, text).await;
        assert_eq!(result["sentiment"], "neutral", "{text:?}");
        assert_eq!(result["score"], 0.5, "{text:?}");
        assert_emotions_shape(&result);
    }
}

#[tokio::test]
async fn test_same_text_same_result() {
    let server = TestServer::spawn().await;
    let client = TestClient::new(server.base_url.clone());

    let first = analyze(&client, MIXED_TEXT).await;
    let second = analyze(&client, MIXED_TEXT).await;
    assert_eq!(first, second);
}

#[tokio::test]
async fn test_malformed_body_is_rejected() {
    let server = TestServer::spawn().await;
    let client = TestClient::new(server.base_url.clone());

    let response = client.analyze_raw(r#"{"text": 42}"#).await;
    assert!(response.status().is_client_error());

    let response = client.analyze_raw("not json").await;
    assert!(response.status().is_client_error());
}
