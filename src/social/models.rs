//! Wire shapes of the fetch-posts endpoint.
//!
//! Real and simulated responses share these types, only `_simulated` tells
//! them apart.

use crate::sentiment::{EmotionScore, Sentiment};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Twitter,
    Instagram,
    Facebook,
}

impl Platform {
    pub fn as_str(&self) -> &'static str {
        match self {
            Platform::Twitter => "twitter",
            Platform::Instagram => "instagram",
            Platform::Facebook => "facebook",
        }
    }
}

impl Default for Platform {
    fn default() -> Self {
        Platform::Twitter
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Platform {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "twitter" | "x" => Ok(Platform::Twitter),
            "instagram" => Ok(Platform::Instagram),
            "facebook" => Ok(Platform::Facebook),
            other => Err(other.to_string()),
        }
    }
}

/// Body of a fetch-posts request.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct FetchPostsRequest {
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub platform: Option<String>,
}

/// A post as returned by an upstream provider, before classification.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct RawPost {
    pub id: String,
    #[serde(alias = "text")]
    pub content: String,
    #[serde(alias = "created_at")]
    pub date: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Post {
    pub id: String,
    pub content: String,
    pub date: String,
    pub sentiment: Sentiment,
    pub score: f64,
    pub emotions: Vec<EmotionScore>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SocialUser {
    pub username: String,
    pub name: String,
    pub profile_image_url: String,
}

impl SocialUser {
    pub fn from_username(username: &str) -> Self {
        SocialUser {
            username: username.to_string(),
            name: username.to_string(),
            profile_image_url: format!(
                "https://api.dicebear.com/7.x/avataaars/svg?seed={}",
                urlencoding::encode(username)
            ),
        }
    }
}

/// Share of posts per label. Fields sum to 1.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct SentimentDistribution {
    pub positive: f64,
    pub negative: f64,
    pub neutral: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SocialAnalysis {
    pub platform: Platform,
    pub user: SocialUser,
    pub posts: Vec<Post>,
    pub overall_sentiment: SentimentDistribution,
    pub emotions: Vec<EmotionScore>,
    pub timestamp: String,
    #[serde(rename = "_simulated")]
    pub simulated: bool,
}
