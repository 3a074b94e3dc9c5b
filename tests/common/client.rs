//! HTTP client for end-to-end tests
//!
//! This module provides a high-level HTTP client that wraps reqwest
//! and provides methods for all server endpoints.
//!
//! When API routes or request formats change, update only this file.

use super::constants::*;
use reqwest::Response;
use serde_json::json;
use std::time::Duration;

pub struct TestClient {
    /// The underlying reqwest client (public for custom requests in tests)
    pub client: reqwest::Client,
    /// The base URL of the test server
    pub base_url: String,
}

impl TestClient {
    pub fn new(base_url: String) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .expect("Failed to build reqwest client");

        Self { client, base_url }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    // ========================================================================
    // Home
    // ========================================================================

    pub async fn get_home(&self) -> Response {
        self.client
            .get(self.url("/"))
            .send()
            .await
            .expect("Home request failed")
    }

    // ========================================================================
    // Sentiment
    // ========================================================================

    pub async fn analyze(&self, text: &str) -> Response {
        self.client
            .post(self.url("/v1/sentiment/analyze"))
            .json(&json!({ "text": text }))
            .send()
            .await
            .expect("Analyze request failed")
    }

    /// Posts an arbitrary body to the analyze endpoint
    pub async fn analyze_raw(&self, body: &'static str) -> Response {
        self.client
            .post(self.url("/v1/sentiment/analyze"))
            .header("content-type", "application/json")
            .body(body)
            .send()
            .await
            .expect("Analyze request failed")
    }

    // ========================================================================
    // Social
    // ========================================================================

    pub async fn fetch_posts(&self, username: &str, platform: Option<&str>) -> Response {
        let body = match platform {
            Some(platform) => json!({ "username": username, "platform": platform }),
            None => json!({ "username": username }),
        };
        self.client
            .post(self.url("/v1/social/fetch-posts"))
            .json(&body)
            .send()
            .await
            .expect("Fetch posts request failed")
    }

    // ========================================================================
    // Dashboard
    // ========================================================================

    /// `table` is one of overview, topics, emotions, trends, posts
    pub async fn get_dashboard(&self, table: &str) -> Response {
        self.client
            .get(self.url(&format!("/v1/dashboard/{}", table)))
            .send()
            .await
            .expect("Dashboard request failed")
    }
}
