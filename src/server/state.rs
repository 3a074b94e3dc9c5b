use axum::extract::FromRef;

use crate::dashboard::DashboardData;
use crate::sentiment::SentimentClassifier;
use crate::social::SocialAnalyzer;
use std::sync::Arc;
use std::time::Instant;

use super::ServerConfig;

pub type GuardedSocialAnalyzer = Arc<SocialAnalyzer>;
pub type GuardedDashboardData = Arc<DashboardData>;

#[derive(Clone)]
pub struct ServerState {
    pub config: ServerConfig,
    pub start_time: Instant,
    pub classifier: SentimentClassifier,
    pub social_analyzer: GuardedSocialAnalyzer,
    pub dashboard: GuardedDashboardData,
}

impl ServerState {
    pub fn new(
        config: ServerConfig,
        classifier: SentimentClassifier,
        social_analyzer: SocialAnalyzer,
        dashboard: DashboardData,
    ) -> Self {
        Self {
            config,
            start_time: Instant::now(),
            classifier,
            social_analyzer: Arc::new(social_analyzer),
            dashboard: Arc::new(dashboard),
        }
    }
}

impl FromRef<ServerState> for ServerConfig {
    fn from_ref(input: &ServerState) -> Self {
        input.config.clone()
    }
}

impl FromRef<ServerState> for SentimentClassifier {
    fn from_ref(input: &ServerState) -> Self {
        input.classifier.clone()
    }
}

impl FromRef<ServerState> for GuardedSocialAnalyzer {
    fn from_ref(input: &ServerState) -> Self {
        input.social_analyzer.clone()
    }
}

impl FromRef<ServerState> for GuardedDashboardData {
    fn from_ref(input: &ServerState) -> Self {
        input.dashboard.clone()
    }
}
