//! Fetch-posts: upstream posts when available, simulated posts otherwise.

mod analyzer;
mod generator;
mod models;
mod upstream;

pub use analyzer::{
    aggregate_emotions, sentiment_distribution, validate, SocialAnalyzer, ValidationError,
    DEFAULT_SIMULATED_POST_COUNT,
};
pub use generator::PostGenerator;
pub use models::{
    FetchPostsRequest, Platform, Post, RawPost, SentimentDistribution, SocialAnalysis, SocialUser,
};
pub use upstream::{PostsSource, UpstreamClient, UpstreamError};
