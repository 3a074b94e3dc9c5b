//! Canned tables behind the demo dashboard.

use crate::sentiment::Sentiment;
use crate::social::Platform;
use serde::Serialize;

/// Percentages per label.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct SentimentOverview {
    pub positive: u32,
    pub negative: u32,
    pub neutral: u32,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct TrendingTopic {
    pub topic: String,
    pub count: u32,
    pub sentiment: Sentiment,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct EmotionShare {
    pub emotion: String,
    pub value: u32,
    pub color: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct TrendPoint {
    pub date: String,
    pub positive: u32,
    pub negative: u32,
    pub neutral: u32,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SocialPost {
    pub id: String,
    pub author: String,
    pub text: String,
    pub platform: Platform,
    pub timestamp: String,
    pub sentiment: Sentiment,
    pub score: f64,
}

/// Read-only dashboard tables, built once and held in server state.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct DashboardData {
    pub overview: SentimentOverview,
    pub topics: Vec<TrendingTopic>,
    pub emotions: Vec<EmotionShare>,
    pub trends: Vec<TrendPoint>,
    pub posts: Vec<SocialPost>,
}

impl DashboardData {
    pub fn demo() -> Self {
        let topic = |topic: &str, count, sentiment| TrendingTopic {
            topic: topic.to_string(),
            count,
            sentiment,
        };
        let emotion = |emotion: &str, value, color: &str| EmotionShare {
            emotion: emotion.to_string(),
            value,
            color: color.to_string(),
        };
        let trend = |date: &str, positive, negative, neutral| TrendPoint {
            date: date.to_string(),
            positive,
            negative,
            neutral,
        };
        let post = |id: &str,
                    author: &str,
                    text: &str,
                    platform,
                    timestamp: &str,
                    sentiment,
                    score| SocialPost {
            id: id.to_string(),
            author: author.to_string(),
            text: text.to_string(),
            platform,
            timestamp: timestamp.to_string(),
            sentiment,
            score,
        };

        DashboardData {
            overview: SentimentOverview {
                positive: 45,
                negative: 30,
                neutral: 25,
            },
            topics: vec![
                topic("#CustomerService", 1250, Sentiment::Positive),
                topic("#ProductLaunch", 980, Sentiment::Positive),
                topic("#AppIssues", 650, Sentiment::Negative),
                topic("#IndustryNews", 450, Sentiment::Neutral),
                topic("#Feedback", 320, Sentiment::Neutral),
            ],
            emotions: vec![
                emotion("Joy", 35, "#f59e0b"),
                emotion("Satisfaction", 25, "#10b981"),
                emotion("Anger", 15, "#dc2626"),
                emotion("Sadness", 10, "#3b82f6"),
                emotion("Surprise", 8, "#8b5cf6"),
                emotion("Other", 7, "#6b7280"),
            ],
            trends: vec![
                trend("Jan", 30, 15, 20),
                trend("Feb", 40, 20, 22),
                trend("Mar", 45, 25, 20),
                trend("Apr", 55, 18, 18),
                trend("May", 50, 25, 16),
                trend("Jun", 45, 30, 22),
                trend("Jul", 65, 20, 25),
            ],
            posts: vec![
                post(
                    "1",
                    "JaneDoe",
                    "Just had an amazing experience with your customer service team! They resolved my issue in minutes. #Impressed",
                    Platform::Twitter,
                    "2025-04-06T14:30:00",
                    Sentiment::Positive,
                    0.92,
                ),
                post(
                    "2",
                    "JohnSmith",
                    "The new update is causing my app to crash every time I try to upload photos. Please fix this ASAP!",
                    Platform::Facebook,
                    "2025-04-06T13:15:00",
                    Sentiment::Negative,
                    0.87,
                ),
                post(
                    "3",
                    "TechEnthusiast",
                    "Looking forward to seeing what features will be included in the next release. Any hints?",
                    Platform::Twitter,
                    "2025-04-06T12:45:00",
                    Sentiment::Neutral,
                    0.76,
                ),
                post(
                    "4",
                    "MarketingPro",
                    "The interface is so intuitive. Makes my workflow so much smoother. Thanks for the thoughtful design!",
                    Platform::Instagram,
                    "2025-04-06T11:20:00",
                    Sentiment::Positive,
                    0.95,
                ),
                post(
                    "5",
                    "FrustatedUser",
                    "Billing issue for the third month in a row. Ready to switch to a competitor if this isn't fixed immediately.",
                    Platform::Facebook,
                    "2025-04-06T10:05:00",
                    Sentiment::Negative,
                    0.89,
                ),
            ],
        }
    }
}
