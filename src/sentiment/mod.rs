//! Lexical sentiment and emotion scoring.

mod classifier;
mod emotions;
mod models;
pub mod rules;

pub use classifier::SentimentClassifier;
pub use emotions::{bias_bands, generate_profile};
pub use models::{
    as_percent, AnalysisInput, CueScores, EmotionProfile, EmotionScore, EmotionType, Sentiment,
    SentimentResult,
};
pub use rules::{Polarity, RuleSet, RuleTables, Strength};

/// Classifies `text` with the built-in rule tables.
pub fn classify(text: &str) -> SentimentResult {
    SentimentClassifier::default().classify(text)
}
