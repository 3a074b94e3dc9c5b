use serde::{Deserialize, Serialize};
use std::fmt;

/// Overall polarity assigned to a piece of text.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sentiment {
    Positive,
    Negative,
    Neutral,
}

impl Sentiment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Sentiment::Positive => "positive",
            Sentiment::Negative => "negative",
            Sentiment::Neutral => "neutral",
        }
    }
}

impl fmt::Display for Sentiment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EmotionType {
    Joy,
    Sadness,
    Anger,
    Fear,
    Surprise,
}

impl EmotionType {
    pub const ALL: [EmotionType; 5] = [
        EmotionType::Joy,
        EmotionType::Sadness,
        EmotionType::Anger,
        EmotionType::Fear,
        EmotionType::Surprise,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            EmotionType::Joy => "joy",
            EmotionType::Sadness => "sadness",
            EmotionType::Anger => "anger",
            EmotionType::Fear => "fear",
            EmotionType::Surprise => "surprise",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct EmotionScore {
    #[serde(rename = "type")]
    pub emotion_type: EmotionType,
    pub score: f64,
}

/// Five emotion scores, one per [`EmotionType`], sorted by descending score.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<EmotionScore>", into = "Vec<EmotionScore>")]
pub struct EmotionProfile(Vec<EmotionScore>);

impl TryFrom<Vec<EmotionScore>> for EmotionProfile {
    type Error = String;

    /// Accepts exactly one entry per emotion type, scores in [0, 1],
    /// sorted by descending score.
    fn try_from(entries: Vec<EmotionScore>) -> Result<Self, Self::Error> {
        if entries.len() != EmotionType::ALL.len() {
            return Err(format!(
                "expected {} emotion entries, got {}",
                EmotionType::ALL.len(),
                entries.len()
            ));
        }
        for emotion_type in EmotionType::ALL {
            if !entries.iter().any(|e| e.emotion_type == emotion_type) {
                return Err(format!("missing emotion {}", emotion_type.as_str()));
            }
        }
        if let Some(entry) = entries.iter().find(|e| !(0.0..=1.0).contains(&e.score)) {
            return Err(format!(
                "emotion {} score {} is outside [0, 1]",
                entry.emotion_type.as_str(),
                entry.score
            ));
        }
        if entries.windows(2).any(|w| w[0].score < w[1].score) {
            return Err("emotion entries must be sorted by descending score".to_string());
        }
        Ok(EmotionProfile(entries))
    }
}

impl From<EmotionProfile> for Vec<EmotionScore> {
    fn from(profile: EmotionProfile) -> Self {
        profile.0
    }
}

impl EmotionProfile {
    /// Builds a profile from one score per emotion type, in [`EmotionType::ALL`] order.
    /// Scores are clamped to [0, 1]. Equal scores keep the declaration order.
    pub fn from_scores(scores: [f64; 5]) -> Self {
        let mut entries: Vec<EmotionScore> = EmotionType::ALL
            .iter()
            .zip(scores)
            .map(|(emotion_type, score)| EmotionScore {
                emotion_type: *emotion_type,
                score: if score.is_nan() {
                    0.0
                } else {
                    score.clamp(0.0, 1.0)
                },
            })
            .collect();
        entries.sort_by(|a, b| b.score.total_cmp(&a.score));
        EmotionProfile(entries)
    }

    pub fn entries(&self) -> &[EmotionScore] {
        &self.0
    }

    pub fn score_of(&self, emotion_type: EmotionType) -> f64 {
        self.0
            .iter()
            .find(|e| e.emotion_type == emotion_type)
            .map(|e| e.score)
            .unwrap_or(0.0)
    }

    pub fn dominant(&self) -> EmotionType {
        self.0[0].emotion_type
    }
}

#[derive(Clone, Debug, Deserialize)]
pub struct AnalysisInput {
    pub text: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SentimentResult {
    pub sentiment: Sentiment,
    pub score: f64,
    pub emotions: EmotionProfile,
}

/// Weighted cue totals after negation and contextual phrases are applied.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
pub struct CueScores {
    pub positive: f64,
    pub negative: f64,
    pub negations: usize,
}

impl CueScores {
    pub fn total(&self) -> f64 {
        self.positive + self.negative
    }
}

/// Rounds a [0, 1] score to the integer percentage shown by the dashboard.
pub fn as_percent(score: f64) -> u8 {
    (score.clamp(0.0, 1.0) * 100.0).round() as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn profile_is_sorted_and_complete() {
        let profile = EmotionProfile::from_scores([0.1, 0.7, 0.3, 0.0, 0.9]);
        let types: Vec<EmotionType> = profile.entries().iter().map(|e| e.emotion_type).collect();
        assert_eq!(
            types,
            vec![
                EmotionType::Surprise,
                EmotionType::Sadness,
                EmotionType::Anger,
                EmotionType::Joy,
                EmotionType::Fear
            ]
        );
        assert_eq!(profile.dominant(), EmotionType::Surprise);
    }

    #[test]
    fn profile_clamps_out_of_range_scores() {
        let profile = EmotionProfile::from_scores([1.4, -0.2, f64::NAN, 0.5, 0.5]);
        assert_eq!(profile.score_of(EmotionType::Joy), 1.0);
        assert_eq!(profile.score_of(EmotionType::Sadness), 0.0);
        assert_eq!(profile.score_of(EmotionType::Anger), 0.0);
    }

    #[test]
    fn serializes_with_contract_keys() {
        let result = SentimentResult {
            sentiment: Sentiment::Positive,
            score: 0.75,
            emotions: EmotionProfile::from_scores([0.8, 0.1, 0.1, 0.05, 0.3]),
        };
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["sentiment"], "positive");
        assert_eq!(json["score"], 0.75);
        assert_eq!(json["emotions"][0]["type"], "joy");
        assert_eq!(json["emotions"][0]["score"], 0.8);
        assert_eq!(json["emotions"].as_array().unwrap().len(), 5);

        let back: SentimentResult = serde_json::from_value(json).unwrap();
        assert_eq!(back, result);
    }

    #[test]
    fn rejects_malformed_profiles() {
        let parse = |json: &str| serde_json::from_str::<EmotionProfile>(json);

        assert!(parse("[]").is_err());

        let duplicated = r#"[
            {"type": "joy", "score": 0.9}, {"type": "joy", "score": 0.5},
            {"type": "anger", "score": 0.3}, {"type": "fear", "score": 0.2},
            {"type": "surprise", "score": 0.1}
        ]"#;
        assert!(parse(duplicated).is_err());

        let unsorted = r#"[
            {"type": "joy", "score": 0.1}, {"type": "sadness", "score": 0.5},
            {"type": "anger", "score": 0.3}, {"type": "fear", "score": 0.2},
            {"type": "surprise", "score": 0.05}
        ]"#;
        assert!(parse(unsorted).is_err());

        let out_of_range = r#"[
            {"type": "joy", "score": 1.5}, {"type": "sadness", "score": 0.5},
            {"type": "anger", "score": 0.3}, {"type": "fear", "score": 0.2},
            {"type": "surprise", "score": 0.1}
        ]"#;
        assert!(parse(out_of_range).is_err());

        let result = serde_json::from_str::<SentimentResult>(
            r#"{"sentiment": "neutral", "score": 0.5, "emotions": []}"#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn percent_rounding() {
        assert_eq!(as_percent(0.5), 50);
        assert_eq!(as_percent(0.876), 88);
        assert_eq!(as_percent(1.0), 100);
        assert_eq!(as_percent(0.0), 0);
    }
}
