use super::generator::PostGenerator;
use super::models::{
    FetchPostsRequest, Platform, Post, RawPost, SentimentDistribution, SocialAnalysis, SocialUser,
};
use super::upstream::PostsSource;
use crate::sentiment::{EmotionScore, EmotionType, Sentiment, SentimentClassifier};
use crate::server::metrics;
use chrono::{DateTime, SecondsFormat, Utc};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::sync::{Arc, Mutex, PoisonError};
use thiserror::Error;
use tracing::{debug, info, warn};

pub const DEFAULT_SIMULATED_POST_COUNT: usize = 5;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Username is required")]
    MissingUsername,

    #[error("Unsupported platform: {0}")]
    UnsupportedPlatform(String),
}

/// Trims the username, strips one leading `@` and parses the platform
/// (twitter when absent).
pub fn validate(request: &FetchPostsRequest) -> Result<(String, Platform), ValidationError> {
    let username = request.username.as_deref().unwrap_or("").trim();
    let username = username.strip_prefix('@').unwrap_or(username).trim();
    if username.is_empty() {
        return Err(ValidationError::MissingUsername);
    }

    let platform = match request.platform.as_deref() {
        None => Platform::default(),
        Some(p) if p.trim().is_empty() => Platform::default(),
        Some(p) => p
            .parse::<Platform>()
            .map_err(|_| ValidationError::UnsupportedPlatform(p.to_string()))?,
    };

    Ok((username.to_string(), platform))
}

/// Share of posts per label. No posts counts as fully neutral.
pub fn sentiment_distribution(posts: &[Post]) -> SentimentDistribution {
    if posts.is_empty() {
        return SentimentDistribution {
            positive: 0.0,
            negative: 0.0,
            neutral: 1.0,
        };
    }
    let total = posts.len() as f64;
    let count = |s: Sentiment| posts.iter().filter(|p| p.sentiment == s).count() as f64 / total;
    SentimentDistribution {
        positive: count(Sentiment::Positive),
        negative: count(Sentiment::Negative),
        neutral: count(Sentiment::Neutral),
    }
}

/// Mean score per emotion across posts, normalized to sum to 1 and sorted
/// descending. Uniform when there is nothing to average.
pub fn aggregate_emotions(posts: &[Post]) -> Vec<EmotionScore> {
    let mut sums = [0.0f64; 5];
    for post in posts {
        for entry in &post.emotions {
            if let Some(i) = EmotionType::ALL.iter().position(|t| *t == entry.emotion_type) {
                sums[i] += entry.score;
            }
        }
    }

    let total: f64 = sums.iter().sum();
    let mut aggregated: Vec<EmotionScore> = EmotionType::ALL
        .iter()
        .zip(sums)
        .map(|(emotion_type, sum)| EmotionScore {
            emotion_type: *emotion_type,
            score: if total > 0.0 { sum / total } else { 0.2 },
        })
        .collect();
    aggregated.sort_by(|a, b| b.score.total_cmp(&a.score));
    aggregated
}

/// Answers fetch-posts requests.
///
/// Tries the upstream source when one is configured and falls back to
/// simulated posts otherwise. Either way the posts go through the same
/// classifier and aggregation.
pub struct SocialAnalyzer {
    classifier: SentimentClassifier,
    source: Option<Arc<dyn PostsSource>>,
    generator: PostGenerator,
    rng: Mutex<StdRng>,
    post_count: usize,
}

impl SocialAnalyzer {
    pub fn new(
        classifier: SentimentClassifier,
        source: Option<Arc<dyn PostsSource>>,
        post_count: usize,
        seed: Option<u64>,
    ) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        Self {
            classifier,
            source,
            generator: PostGenerator::default(),
            rng: Mutex::new(rng),
            post_count,
        }
    }

    pub fn has_upstream(&self) -> bool {
        self.source.is_some()
    }

    pub async fn analyze(
        &self,
        request: &FetchPostsRequest,
    ) -> Result<SocialAnalysis, ValidationError> {
        self.analyze_at(request, Utc::now()).await
    }

    pub async fn analyze_at(
        &self,
        request: &FetchPostsRequest,
        now: DateTime<Utc>,
    ) -> Result<SocialAnalysis, ValidationError> {
        let (username, platform) = validate(request)?;

        let (raw_posts, simulated) = match self.fetch_upstream(&username, platform).await {
            Some(posts) => (posts, false),
            None => (self.simulate(now), true),
        };
        metrics::record_social_fetch(if simulated { "simulated" } else { "upstream" });
        debug!(
            "Analyzing {} posts for {} on {} (simulated: {})",
            raw_posts.len(),
            username,
            platform,
            simulated
        );

        let posts: Vec<Post> = raw_posts.into_iter().map(|raw| self.classify_post(raw)).collect();

        Ok(SocialAnalysis {
            platform,
            user: SocialUser::from_username(&username),
            overall_sentiment: sentiment_distribution(&posts),
            emotions: aggregate_emotions(&posts),
            posts,
            timestamp: now.to_rfc3339_opts(SecondsFormat::Millis, true),
            simulated,
        })
    }

    /// `None` means the caller should simulate.
    async fn fetch_upstream(&self, username: &str, platform: Platform) -> Option<Vec<RawPost>> {
        let source = self.source.as_ref()?;
        match source.fetch_posts(username, platform).await {
            Ok(posts) if posts.is_empty() => {
                info!("Upstream returned no posts for {}, simulating", username);
                None
            }
            Ok(posts) => Some(posts),
            Err(err) => {
                if err.is_expected() {
                    info!("Upstream fetch for {} failed: {}, simulating", username, err);
                } else {
                    warn!("Upstream fetch for {} failed: {}, simulating", username, err);
                }
                metrics::record_upstream_error(err.kind());
                None
            }
        }
    }

    fn simulate(&self, now: DateTime<Utc>) -> Vec<RawPost> {
        let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);
        self.generator.generate(&mut *rng, self.post_count, now)
    }

    fn classify_post(&self, raw: RawPost) -> Post {
        let result = self.classifier.classify(&raw.content);
        metrics::record_classification(result.sentiment.as_str());
        Post {
            id: raw.id,
            content: raw.content,
            date: raw.date,
            sentiment: result.sentiment,
            score: result.score,
            emotions: result.emotions.entries().to_vec(),
        }
    }
}
