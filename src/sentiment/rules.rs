//! Declarative cue tables and their compiled form.
//!
//! The tables are plain data: cue phrases tagged with a polarity and a
//! strength, the negation tokens, and contextual phrases carrying fixed
//! deltas. [`RuleSet::compile`] turns them into whole-word regexes once; the
//! classifier only iterates the compiled rules.

use anyhow::{bail, Context, Result};
use lazy_static::lazy_static;
use regex::Regex;
use std::sync::Arc;

pub const DEFAULT_NEUTRAL_THRESHOLD: f64 = 0.15;

/// Share of the positive score that negation may move to the negative side.
pub const NEGATION_TRANSFER_RATIO: f64 = 0.5;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Polarity {
    Positive,
    Negative,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Strength {
    /// First-person declarations and intensified phrases.
    Strong,
    /// Bare keywords.
    Weak,
}

impl Strength {
    pub fn weight(&self) -> f64 {
        match self {
            Strength::Strong => 2.0,
            Strength::Weak => 1.0,
        }
    }
}

const POSITIVE_CUES: &[(&str, Strength)] = &[
    ("really love", Strength::Strong),
    ("absolutely love", Strength::Strong),
    ("love this", Strength::Strong),
    ("love it", Strength::Strong),
    ("i love", Strength::Strong),
    ("so happy", Strength::Strong),
    ("very happy", Strength::Strong),
    ("really happy", Strength::Strong),
    ("so good", Strength::Strong),
    ("really good", Strength::Strong),
    ("so great", Strength::Strong),
    ("highly recommend", Strength::Strong),
    ("best ever", Strength::Strong),
    ("thank you so much", Strength::Strong),
    ("made my day", Strength::Strong),
    ("so excited", Strength::Strong),
    ("so proud", Strength::Strong),
    ("blown away", Strength::Strong),
    ("good", Strength::Weak),
    ("great", Strength::Weak),
    ("excellent", Strength::Weak),
    ("amazing", Strength::Weak),
    ("love", Strength::Weak),
    ("loved", Strength::Weak),
    ("happy", Strength::Weak),
    ("best", Strength::Weak),
    ("wonderful", Strength::Weak),
    ("awesome", Strength::Weak),
    ("fantastic", Strength::Weak),
    ("incredible", Strength::Weak),
    ("brilliant", Strength::Weak),
    ("beautiful", Strength::Weak),
    ("nice", Strength::Weak),
    ("perfect", Strength::Weak),
    ("impressed", Strength::Weak),
    ("intuitive", Strength::Weak),
    ("smooth", Strength::Weak),
    ("smoother", Strength::Weak),
    ("thanks", Strength::Weak),
    ("glad", Strength::Weak),
    ("enjoy", Strength::Weak),
    ("enjoyed", Strength::Weak),
    ("delighted", Strength::Weak),
    ("pleased", Strength::Weak),
    ("proud", Strength::Weak),
    ("excited", Strength::Weak),
    ("accomplished", Strength::Weak),
    ("epic", Strength::Weak),
];

const NEGATIVE_CUES: &[(&str, Strength)] = &[
    ("really hate", Strength::Strong),
    ("i hate", Strength::Strong),
    ("hate this", Strength::Strong),
    ("hate it", Strength::Strong),
    ("not working", Strength::Strong),
    ("doesn't work", Strength::Strong),
    ("stopped working", Strength::Strong),
    ("so disappointed", Strength::Strong),
    ("very disappointed", Strength::Strong),
    ("really disappointed", Strength::Strong),
    ("completely broken", Strength::Strong),
    ("totally broken", Strength::Strong),
    ("worst ever", Strength::Strong),
    ("fed up", Strength::Strong),
    ("so frustrated", Strength::Strong),
    ("so angry", Strength::Strong),
    ("waste of money", Strength::Strong),
    ("waste of time", Strength::Strong),
    ("bad", Strength::Weak),
    ("terrible", Strength::Weak),
    ("awful", Strength::Weak),
    ("horrible", Strength::Weak),
    ("hate", Strength::Weak),
    ("hated", Strength::Weak),
    ("worst", Strength::Weak),
    ("disappointed", Strength::Weak),
    ("disappointing", Strength::Weak),
    ("issue", Strength::Weak),
    ("issues", Strength::Weak),
    ("problem", Strength::Weak),
    ("problems", Strength::Weak),
    ("broken", Strength::Weak),
    ("crash", Strength::Weak),
    ("crashes", Strength::Weak),
    ("crashing", Strength::Weak),
    ("bug", Strength::Weak),
    ("bugs", Strength::Weak),
    ("poor", Strength::Weak),
    ("useless", Strength::Weak),
    ("slow", Strength::Weak),
    ("annoying", Strength::Weak),
    ("frustrated", Strength::Weak),
    ("frustrating", Strength::Weak),
    ("sad", Strength::Weak),
    ("angry", Strength::Weak),
    ("upset", Strength::Weak),
    ("fail", Strength::Weak),
    ("failed", Strength::Weak),
    ("worried", Strength::Weak),
    ("scared", Strength::Weak),
];

const NEGATION_TOKENS: &[&str] = &[
    "not", "no", "never", "can't", "cannot", "won't", "wouldn't", "didn't", "doesn't", "isn't",
    "aren't", "wasn't", "weren't",
];

// (phrase, positive delta, negative delta)
const CONTEXT_PHRASES: &[(&str, f64, f64)] = &[
    ("couldn't be happier", 2.0, 0.0),
    ("could not be happier", 2.0, 0.0),
    ("so bad", 0.0, 1.5),
    ("not bad", 0.5, 0.0),
    ("not good", 0.0, 0.5),
    ("not happy", 0.0, 1.0),
    ("not impressed", 0.0, 1.0),
    ("no problem", 1.0, 0.0),
    ("no issues", 1.0, 0.0),
    ("can't wait", 1.5, 0.0),
];

#[derive(Clone, Debug, PartialEq)]
pub struct CueRule {
    pub phrase: String,
    pub polarity: Polarity,
    pub strength: Strength,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ContextRule {
    pub phrase: String,
    pub positive_delta: f64,
    pub negative_delta: f64,
}

/// Uncompiled rule tables.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RuleTables {
    pub cues: Vec<CueRule>,
    pub negations: Vec<String>,
    pub contexts: Vec<ContextRule>,
}

impl RuleTables {
    pub fn builtin() -> Self {
        let positive = POSITIVE_CUES.iter().map(|(phrase, strength)| CueRule {
            phrase: phrase.to_string(),
            polarity: Polarity::Positive,
            strength: *strength,
        });
        let negative = NEGATIVE_CUES.iter().map(|(phrase, strength)| CueRule {
            phrase: phrase.to_string(),
            polarity: Polarity::Negative,
            strength: *strength,
        });
        RuleTables {
            cues: positive.chain(negative).collect(),
            negations: NEGATION_TOKENS.iter().map(|t| t.to_string()).collect(),
            contexts: CONTEXT_PHRASES
                .iter()
                .map(|(phrase, positive_delta, negative_delta)| ContextRule {
                    phrase: phrase.to_string(),
                    positive_delta: *positive_delta,
                    negative_delta: *negative_delta,
                })
                .collect(),
        }
    }

    /// Appends weak cues, skipping blanks and phrases already in the table.
    pub fn with_extra_cues<S: AsRef<str>>(mut self, polarity: Polarity, phrases: &[S]) -> Self {
        for phrase in phrases {
            let phrase = phrase.as_ref().trim().to_lowercase();
            if phrase.is_empty()
                || self
                    .cues
                    .iter()
                    .any(|c| c.polarity == polarity && c.phrase == phrase)
            {
                continue;
            }
            self.cues.push(CueRule {
                phrase,
                polarity,
                strength: Strength::Weak,
            });
        }
        self
    }
}

#[derive(Debug)]
pub(super) struct CompiledCue {
    pub regex: Regex,
    pub polarity: Polarity,
    pub weight: f64,
}

#[derive(Debug)]
pub(super) struct CompiledContext {
    pub regex: Regex,
    pub positive_delta: f64,
    pub negative_delta: f64,
}

/// Compiled, immutable rules shared by every classification.
#[derive(Debug)]
pub struct RuleSet {
    pub(super) cues: Vec<CompiledCue>,
    pub(super) negation: Option<Regex>,
    pub(super) contexts: Vec<CompiledContext>,
    pub(super) neutral_threshold: f64,
}

/// Whole-word pattern for a literal phrase. Inner whitespace matches any run
/// of whitespace.
fn phrase_pattern(phrase: &str) -> Result<String> {
    let words: Vec<String> = phrase
        .split_whitespace()
        .map(|w| regex::escape(&w.to_lowercase()))
        .collect();
    if words.is_empty() {
        bail!("Empty phrase in rule table");
    }
    Ok(format!(r"\b{}\b", words.join(r"\s+")))
}

fn compile_phrase(phrase: &str) -> Result<Regex> {
    let pattern = phrase_pattern(phrase)?;
    Regex::new(&pattern).with_context(|| format!("Failed to compile rule phrase {:?}", phrase))
}

impl RuleSet {
    pub fn compile(tables: &RuleTables, neutral_threshold: f64) -> Result<Self> {
        if !neutral_threshold.is_finite() || neutral_threshold < 0.0 {
            bail!(
                "Neutral threshold must be a non-negative number, got {}",
                neutral_threshold
            );
        }

        let cues = tables
            .cues
            .iter()
            .map(|cue| {
                Ok(CompiledCue {
                    regex: compile_phrase(&cue.phrase)?,
                    polarity: cue.polarity,
                    weight: cue.strength.weight(),
                })
            })
            .collect::<Result<Vec<_>>>()?;

        let negation = if tables.negations.is_empty() {
            None
        } else {
            let alternatives = tables
                .negations
                .iter()
                .map(|t| {
                    let pattern = phrase_pattern(t)?;
                    // strip the outer \b anchors, they are re-added around the group
                    Ok(pattern[2..pattern.len() - 2].to_string())
                })
                .collect::<Result<Vec<_>>>()?;
            let pattern = format!(r"\b(?:{})\b", alternatives.join("|"));
            Some(Regex::new(&pattern).context("Failed to compile negation tokens")?)
        };

        let contexts = tables
            .contexts
            .iter()
            .map(|ctx| {
                if ctx.positive_delta < 0.0 || ctx.negative_delta < 0.0 {
                    bail!("Contextual phrase {:?} has a negative delta", ctx.phrase);
                }
                Ok(CompiledContext {
                    regex: compile_phrase(&ctx.phrase)?,
                    positive_delta: ctx.positive_delta,
                    negative_delta: ctx.negative_delta,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(RuleSet {
            cues,
            negation,
            contexts,
            neutral_threshold,
        })
    }

    /// Shared instance compiled from the built-in tables.
    pub fn builtin() -> Arc<RuleSet> {
        BUILTIN_RULES.clone()
    }

    pub fn neutral_threshold(&self) -> f64 {
        self.neutral_threshold
    }

    pub fn cue_count(&self) -> usize {
        self.cues.len()
    }
}

lazy_static! {
    static ref BUILTIN_RULES: Arc<RuleSet> = Arc::new(
        RuleSet::compile(&RuleTables::builtin(), DEFAULT_NEUTRAL_THRESHOLD)
            .expect("Built-in rule tables must compile")
    );
}
