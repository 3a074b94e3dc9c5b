use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub struct FileConfig {
    // Core settings (can override CLI)
    pub port: Option<u16>,
    pub metrics_port: Option<u16>,
    pub logging_level: Option<String>,
    pub request_timeout_sec: Option<u64>,

    // Upstream posts provider
    pub upstream_url: Option<String>,
    pub upstream_bearer_token: Option<String>,
    pub upstream_timeout_sec: Option<u64>,

    // Simulated posts
    pub simulated_post_count: Option<usize>,
    pub simulation_seed: Option<u64>,

    pub classifier: Option<ClassifierConfig>,
}

#[derive(Debug, Deserialize, Default, Clone)]
#[serde(default)]
pub struct ClassifierConfig {
    pub neutral_threshold: Option<f64>,
    /// Extra weak positive cues appended to the built-in table.
    pub extra_positive_cues: Vec<String>,
    pub extra_negative_cues: Vec<String>,
}

impl FileConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;
        toml::from_str(&content).with_context(|| format!("Failed to parse config file: {:?}", path))
    }
}
