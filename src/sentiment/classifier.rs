use super::emotions::{generate_profile, seeded_rng};
use super::models::{CueScores, Sentiment, SentimentResult};
use super::rules::{Polarity, RuleSet, NEGATION_TRANSFER_RATIO};
use rand::Rng;
use std::sync::Arc;

/// Rule-based sentiment classifier.
///
/// Stateless apart from the immutable [`RuleSet`], cheap to clone and safe to
/// share between threads.
#[derive(Clone, Debug)]
pub struct SentimentClassifier {
    rules: Arc<RuleSet>,
}

impl Default for SentimentClassifier {
    fn default() -> Self {
        Self::new(RuleSet::builtin())
    }
}

impl SentimentClassifier {
    pub fn new(rules: Arc<RuleSet>) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }

    /// Classifies `text`. The emotion jitter is seeded from the text itself,
    /// so the whole result is deterministic.
    pub fn classify(&self, text: &str) -> SentimentResult {
        let normalized = text.to_lowercase();
        let scores = self.score_normalized(&normalized);
        let (sentiment, score) = self.decide(&scores);
        let emotions = generate_profile(sentiment, &mut seeded_rng(&normalized, sentiment));
        SentimentResult {
            sentiment,
            score,
            emotions,
        }
    }

    /// Same as [`classify`](Self::classify) but draws the emotion jitter from `rng`.
    pub fn classify_with_rng<R: Rng + ?Sized>(&self, text: &str, rng: &mut R) -> SentimentResult {
        let scores = self.cue_scores(text);
        let (sentiment, score) = self.decide(&scores);
        SentimentResult {
            sentiment,
            score,
            emotions: generate_profile(sentiment, rng),
        }
    }

    /// Weighted cue totals after negation and contextual phrases.
    pub fn cue_scores(&self, text: &str) -> CueScores {
        self.score_normalized(&text.to_lowercase())
    }

    fn score_normalized(&self, text: &str) -> CueScores {
        let mut positive = 0.0;
        let mut negative = 0.0;

        for cue in &self.rules.cues {
            let hits = cue.regex.find_iter(text).count() as f64;
            if hits == 0.0 {
                continue;
            }
            match cue.polarity {
                Polarity::Positive => positive += cue.weight * hits,
                Polarity::Negative => negative += cue.weight * hits,
            }
        }

        let negations = self
            .rules
            .negation
            .as_ref()
            .map(|re| re.find_iter(text).count())
            .unwrap_or(0);

        if negations > 0 && positive > negative {
            let transfer = (positive * NEGATION_TRANSFER_RATIO).min(negations as f64);
            positive -= transfer;
            negative += transfer;
        }

        for ctx in &self.rules.contexts {
            let hits = ctx.regex.find_iter(text).count() as f64;
            positive += ctx.positive_delta * hits;
            negative += ctx.negative_delta * hits;
        }

        CueScores {
            positive,
            negative,
            negations,
        }
    }

    /// Label and score from cue totals. Equal totals above the threshold
    /// resolve negative.
    fn decide(&self, scores: &CueScores) -> (Sentiment, f64) {
        let total = scores.total();
        if total < self.rules.neutral_threshold || total <= 0.0 {
            return (Sentiment::Neutral, 0.5);
        }
        if scores.positive > scores.negative {
            let score = 0.5 + 0.5 * scores.positive / total;
            (Sentiment::Positive, score.min(1.0))
        } else {
            let score = 0.5 - 0.5 * scores.negative / total;
            (Sentiment::Negative, score.max(0.0))
        }
    }
}
