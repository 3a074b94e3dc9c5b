mod file_config;

pub use file_config::{ClassifierConfig, FileConfig};

use crate::sentiment::rules::DEFAULT_NEUTRAL_THRESHOLD;
use crate::sentiment::{Polarity, RuleSet, RuleTables};
use crate::server::RequestsLoggingLevel;
use crate::social::DEFAULT_SIMULATED_POST_COUNT;
use anyhow::{bail, Result};
use clap::ValueEnum;

pub const MAX_SIMULATED_POST_COUNT: usize = 50;

/// CLI arguments that can be used for config resolution.
/// This struct mirrors the CLI arguments that can be overridden by TOML config.
#[derive(Debug, Clone)]
pub struct CliConfig {
    pub port: u16,
    pub metrics_port: u16,
    pub logging_level: RequestsLoggingLevel,
    pub request_timeout_sec: u64,
    pub upstream_url: Option<String>,
    pub upstream_timeout_sec: u64,
    pub simulated_post_count: usize,
    pub simulation_seed: Option<u64>,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            port: 3001,
            metrics_port: 9091,
            logging_level: RequestsLoggingLevel::Path,
            request_timeout_sec: 10,
            upstream_url: None,
            upstream_timeout_sec: 5,
            simulated_post_count: DEFAULT_SIMULATED_POST_COUNT,
            simulation_seed: None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    // Core settings
    pub port: u16,
    pub metrics_port: u16,
    pub logging_level: RequestsLoggingLevel,
    pub request_timeout_sec: u64,

    /// Present only when an upstream URL is configured.
    pub upstream: Option<UpstreamSettings>,

    pub simulated_post_count: usize,
    pub simulation_seed: Option<u64>,

    pub classifier: ClassifierSettings,
}

#[derive(Debug, Clone, PartialEq)]
pub struct UpstreamSettings {
    pub url: String,
    pub bearer_token: Option<String>,
    pub timeout_sec: u64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ClassifierSettings {
    pub neutral_threshold: f64,
    pub extra_positive_cues: Vec<String>,
    pub extra_negative_cues: Vec<String>,
}

impl Default for ClassifierSettings {
    fn default() -> Self {
        Self {
            neutral_threshold: DEFAULT_NEUTRAL_THRESHOLD,
            extra_positive_cues: Vec::new(),
            extra_negative_cues: Vec::new(),
        }
    }
}

impl ClassifierSettings {
    /// Built-in tables plus the configured extra cues.
    pub fn build_rules(&self) -> Result<RuleSet> {
        let tables = RuleTables::builtin()
            .with_extra_cues(Polarity::Positive, self.extra_positive_cues.as_slice())
            .with_extra_cues(Polarity::Negative, self.extra_negative_cues.as_slice());
        RuleSet::compile(&tables, self.neutral_threshold)
    }
}

impl AppConfig {
    /// Resolve configuration from CLI arguments and optional TOML file config.
    /// TOML values override CLI values where present.
    pub fn resolve(cli: &CliConfig, file_config: Option<FileConfig>) -> Result<Self> {
        let file = file_config.unwrap_or_default();

        let port = file.port.unwrap_or(cli.port);
        let metrics_port = file.metrics_port.unwrap_or(cli.metrics_port);
        if port == metrics_port && port != 0 {
            bail!("port and metrics_port must differ, both are {}", port);
        }

        let logging_level = match file.logging_level {
            Some(s) => match parse_logging_level(&s) {
                Some(level) => level,
                None => bail!("Invalid logging_level in config file: {:?}", s),
            },
            None => cli.logging_level.clone(),
        };

        let request_timeout_sec = file.request_timeout_sec.unwrap_or(cli.request_timeout_sec);
        if request_timeout_sec == 0 {
            bail!("request_timeout_sec must be greater than 0");
        }

        let upstream_url = file
            .upstream_url
            .or_else(|| cli.upstream_url.clone())
            .filter(|url| !url.trim().is_empty());
        let upstream_timeout_sec = file
            .upstream_timeout_sec
            .unwrap_or(cli.upstream_timeout_sec);
        let upstream = match upstream_url {
            Some(url) => {
                if !url.starts_with("http://") && !url.starts_with("https://") {
                    bail!("upstream_url must be an http(s) URL, got {:?}", url);
                }
                Some(UpstreamSettings {
                    url,
                    bearer_token: file.upstream_bearer_token,
                    timeout_sec: upstream_timeout_sec,
                })
            }
            None => None,
        };

        let simulated_post_count = file
            .simulated_post_count
            .unwrap_or(cli.simulated_post_count);
        if !(1..=MAX_SIMULATED_POST_COUNT).contains(&simulated_post_count) {
            bail!(
                "simulated_post_count must be between 1 and {}, got {}",
                MAX_SIMULATED_POST_COUNT,
                simulated_post_count
            );
        }
        let simulation_seed = file.simulation_seed.or(cli.simulation_seed);

        let classifier_file = file.classifier.unwrap_or_default();
        let neutral_threshold = classifier_file
            .neutral_threshold
            .unwrap_or(DEFAULT_NEUTRAL_THRESHOLD);
        if !neutral_threshold.is_finite() || neutral_threshold < 0.0 {
            bail!(
                "classifier.neutral_threshold must be a non-negative number, got {}",
                neutral_threshold
            );
        }
        let classifier = ClassifierSettings {
            neutral_threshold,
            extra_positive_cues: classifier_file.extra_positive_cues,
            extra_negative_cues: classifier_file.extra_negative_cues,
        };

        Ok(Self {
            port,
            metrics_port,
            logging_level,
            request_timeout_sec,
            upstream,
            simulated_post_count,
            simulation_seed,
            classifier,
        })
    }
}

/// Parses a logging level string into RequestsLoggingLevel.
/// Uses clap's ValueEnum trait for parsing.
fn parse_logging_level(s: &str) -> Option<RequestsLoggingLevel> {
    RequestsLoggingLevel::from_str(s, true).ok()
}
