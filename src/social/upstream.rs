//! Upstream posts provider.
//!
//! The provider is optional. Every failure here is recoverable: the analyzer
//! replaces it with simulated data.

use super::models::{Platform, RawPost};
use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum UpstreamError {
    #[error("User {0} not found upstream")]
    NotFound(String),

    #[error("No upstream credentials configured")]
    MissingCredentials,

    #[error("Upstream rejected the credentials (status {0})")]
    Unauthorized(u16),

    #[error("Upstream rate limit reached")]
    RateLimited,

    #[error("Upstream returned status {0}")]
    Status(u16),

    #[error("Failed to reach upstream: {0}")]
    Transport(String),

    #[error("Failed to decode upstream response: {0}")]
    Decode(String),
}

impl UpstreamError {
    /// Failures that are part of normal operation (unknown user, no or bad
    /// credentials) rather than an upstream malfunction.
    pub fn is_expected(&self) -> bool {
        matches!(
            self,
            UpstreamError::NotFound(_)
                | UpstreamError::MissingCredentials
                | UpstreamError::Unauthorized(_)
        )
    }

    pub fn kind(&self) -> &'static str {
        match self {
            UpstreamError::NotFound(_) => "not_found",
            UpstreamError::MissingCredentials => "missing_credentials",
            UpstreamError::Unauthorized(_) => "unauthorized",
            UpstreamError::RateLimited => "rate_limited",
            UpstreamError::Status(_) => "status",
            UpstreamError::Transport(_) => "transport",
            UpstreamError::Decode(_) => "decode",
        }
    }
}

/// Source of a user's recent posts.
#[async_trait]
pub trait PostsSource: Send + Sync {
    async fn fetch_posts(
        &self,
        username: &str,
        platform: Platform,
    ) -> Result<Vec<RawPost>, UpstreamError>;
}

#[derive(Deserialize)]
struct UpstreamPostsResponse {
    #[serde(alias = "data")]
    posts: Vec<RawPost>,
}

/// HTTP client for an upstream posts API.
///
/// Calls `GET {base_url}/users/{username}/posts?platform={platform}` with a
/// bearer token.
pub struct UpstreamClient {
    client: reqwest::Client,
    base_url: String,
    bearer_token: Option<String>,
}

impl UpstreamClient {
    pub fn new(
        base_url: String,
        bearer_token: Option<String>,
        timeout_sec: u64,
    ) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_sec))
            .build()?;

        // Ensure base_url doesn't have trailing slash
        let base_url = base_url.trim_end_matches('/').to_string();
        let bearer_token = bearer_token.filter(|t| !t.trim().is_empty());

        Ok(Self {
            client,
            base_url,
            bearer_token,
        })
    }

    fn posts_url(&self, username: &str, platform: Platform) -> String {
        format!(
            "{}/users/{}/posts?platform={}",
            self.base_url,
            urlencoding::encode(username),
            platform
        )
    }
}

#[async_trait]
impl PostsSource for UpstreamClient {
    async fn fetch_posts(
        &self,
        username: &str,
        platform: Platform,
    ) -> Result<Vec<RawPost>, UpstreamError> {
        let token = self
            .bearer_token
            .as_ref()
            .ok_or(UpstreamError::MissingCredentials)?;

        let response = self
            .client
            .get(self.posts_url(username, platform))
            .bearer_auth(token)
            .send()
            .await
            .map_err(|e| UpstreamError::Transport(e.to_string()))?;

        let status = response.status();
        match status.as_u16() {
            200..=299 => {}
            401 | 403 => return Err(UpstreamError::Unauthorized(status.as_u16())),
            404 => return Err(UpstreamError::NotFound(username.to_string())),
            429 => return Err(UpstreamError::RateLimited),
            code => return Err(UpstreamError::Status(code)),
        }

        let body: UpstreamPostsResponse = response
            .json()
            .await
            .map_err(|e| UpstreamError::Decode(e.to_string()))?;
        Ok(body.posts)
    }
}
