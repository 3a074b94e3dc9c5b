use super::models::{EmotionProfile, Sentiment};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use sha2::{Digest, Sha256};

/// Inclusive score range per emotion, in [`super::EmotionType::ALL`] order
/// (joy, sadness, anger, fear, surprise).
///
/// Joy bands and sadness/anger bands do not overlap between positive and
/// negative, so the directional bias holds for every single draw.
pub fn bias_bands(sentiment: Sentiment) -> [(f64, f64); 5] {
    match sentiment {
        Sentiment::Positive => [
            (0.60, 0.95),
            (0.00, 0.12),
            (0.00, 0.10),
            (0.00, 0.15),
            (0.20, 0.50),
        ],
        Sentiment::Negative => [
            (0.00, 0.12),
            (0.40, 0.80),
            (0.45, 0.85),
            (0.15, 0.45),
            (0.05, 0.30),
        ],
        Sentiment::Neutral => [
            (0.10, 0.28),
            (0.05, 0.25),
            (0.05, 0.20),
            (0.05, 0.20),
            (0.30, 0.55),
        ],
    }
}

/// Draws one score per emotion from the bands of `sentiment`.
pub fn generate_profile<R: Rng + ?Sized>(sentiment: Sentiment, rng: &mut R) -> EmotionProfile {
    let bands = bias_bands(sentiment);
    let mut scores = [0.0; 5];
    for (score, (low, high)) in scores.iter_mut().zip(bands) {
        *score = rng.random_range(low..=high);
    }
    EmotionProfile::from_scores(scores)
}

/// RNG seeded from the normalized text and the label, so a given input
/// always yields the same profile.
pub fn seeded_rng(normalized_text: &str, sentiment: Sentiment) -> StdRng {
    let mut hasher = Sha256::new();
    hasher.update(normalized_text.as_bytes());
    hasher.update([0u8]);
    hasher.update(sentiment.as_str().as_bytes());
    let digest = hasher.finalize();

    let mut seed = [0u8; 32];
    seed.copy_from_slice(&digest);
    StdRng::from_seed(seed)
}
