use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, level_filters::LevelFilter};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use sentimentsense_server::config;
use sentimentsense_server::dashboard::DashboardData;
use sentimentsense_server::sentiment::SentimentClassifier;
use sentimentsense_server::server::{metrics, run_server, RequestsLoggingLevel, ServerConfig};
use sentimentsense_server::social::{PostsSource, SocialAnalyzer, UpstreamClient};

fn parse_path(s: &str) -> Result<PathBuf, String> {
    let path_buf = PathBuf::from(s);
    let original_path = match path_buf.canonicalize() {
        Ok(path) => path,
        Err(msg) => {
            if msg.kind() == std::io::ErrorKind::NotFound {
                path_buf
            } else {
                return Err(format!("Error resolving path '{}': {}", s, msg));
            }
        }
    };
    if original_path.is_absolute() {
        return Ok(original_path);
    }
    let cwd = std::env::current_dir().map_err(|e| format!("Failed to get current dir: {}", e))?;
    Ok(cwd.join(original_path))
}

#[derive(Parser, Debug)]
struct CliArgs {
    /// Path to TOML configuration file. Values in the file override CLI arguments.
    #[clap(long, value_parser = parse_path)]
    pub config: Option<PathBuf>,

    /// The port to listen on.
    #[clap(short, long, default_value_t = 3001)]
    pub port: u16,

    /// The port for the metrics server (Prometheus scraping).
    #[clap(long, default_value_t = 9091)]
    pub metrics_port: u16,

    /// The level of logging to perform on each request.
    #[clap(long, default_value = "path")]
    pub logging_level: RequestsLoggingLevel,

    /// Requests taking longer than this many seconds are aborted.
    #[clap(long, default_value_t = 10)]
    pub request_timeout_sec: u64,

    /// Base URL of the upstream posts provider. Without it every
    /// fetch-posts answer is simulated.
    #[clap(long)]
    pub upstream_url: Option<String>,

    /// Timeout in seconds for upstream requests.
    #[clap(long, default_value_t = 5)]
    pub upstream_timeout_sec: u64,

    /// Number of posts generated when falling back to simulated data.
    #[clap(long, default_value_t = 5)]
    pub simulated_post_count: usize,

    /// Seed for the simulated posts generator. Random when not set.
    #[clap(long)]
    pub simulation_seed: Option<u64>,
}

/// Convert CLI args to CliConfig for config resolution
impl From<&CliArgs> for config::CliConfig {
    fn from(args: &CliArgs) -> Self {
        config::CliConfig {
            port: args.port,
            metrics_port: args.metrics_port,
            logging_level: args.logging_level.clone(),
            request_timeout_sec: args.request_timeout_sec,
            upstream_url: args.upstream_url.clone(),
            upstream_timeout_sec: args.upstream_timeout_sec,
            simulated_post_count: args.simulated_post_count,
            simulation_seed: args.simulation_seed,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli_args = CliArgs::parse();

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::INFO.into())
                .with_env_var("LOG_LEVEL")
                .from_env_lossy(),
        )
        .try_init()?;

    // Load TOML config if provided
    let file_config = match &cli_args.config {
        Some(path) => {
            info!("Loading configuration from {:?}", path);
            Some(config::FileConfig::load(path)?)
        }
        None => None,
    };

    // Resolve final configuration (TOML overrides CLI)
    let cli_config: config::CliConfig = (&cli_args).into();
    let app_config = config::AppConfig::resolve(&cli_config, file_config)?;

    info!("Configuration loaded:");
    info!("  port: {}", app_config.port);
    info!("  metrics_port: {}", app_config.metrics_port);
    info!("  logging_level: {}", app_config.logging_level);
    info!(
        "  neutral_threshold: {}",
        app_config.classifier.neutral_threshold
    );

    // Initialize metrics system
    info!("Initializing metrics...");
    metrics::init_metrics();

    let rules = app_config.classifier.build_rules()?;
    let classifier = SentimentClassifier::new(Arc::new(rules));
    info!(
        "Compiled {} sentiment cues (neutral threshold {})",
        classifier.rules().cue_count(),
        classifier.rules().neutral_threshold()
    );

    // Create upstream client if URL is configured
    let source: Option<Arc<dyn PostsSource>> = match &app_config.upstream {
        Some(upstream) => {
            info!("Upstream posts provider configured at {}", upstream.url);
            if upstream.bearer_token.is_none() {
                info!("No upstream bearer token set, fetch-posts will use simulated data");
            }
            let client = UpstreamClient::new(
                upstream.url.clone(),
                upstream.bearer_token.clone(),
                upstream.timeout_sec,
            )?;
            Some(Arc::new(client) as Arc<dyn PostsSource>)
        }
        None => {
            info!("No upstream posts provider, fetch-posts will use simulated data");
            None
        }
    };

    let social_analyzer = SocialAnalyzer::new(
        classifier.clone(),
        source,
        app_config.simulated_post_count,
        app_config.simulation_seed,
    );
    if !social_analyzer.has_upstream() {
        info!(
            "Serving {} simulated posts per fetch-posts request",
            app_config.simulated_post_count
        );
    }

    let server_config = ServerConfig {
        requests_logging_level: app_config.logging_level.clone(),
        port: app_config.port,
        metrics_port: app_config.metrics_port,
        request_timeout_sec: app_config.request_timeout_sec,
    };

    info!("Ready to serve at port {}!", app_config.port);
    info!("Metrics available at port {}!", app_config.metrics_port);
    run_server(
        server_config,
        classifier,
        social_analyzer,
        DashboardData::demo(),
    )
    .await
}
