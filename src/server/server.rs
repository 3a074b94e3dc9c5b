use anyhow::{Context, Result};
use std::time::Duration;

use tracing::{error, info};

use axum::{
    extract::State,
    http::StatusCode,
    middleware,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;
use tower_http::cors::CorsLayer;
use tower_http::timeout::TimeoutLayer;

#[cfg(feature = "slowdown")]
use super::slowdown_request;
use super::{log_requests, metrics, state::*, ServerConfig};
use crate::dashboard::DashboardData;
use crate::sentiment::{AnalysisInput, SentimentClassifier};
use crate::social::{FetchPostsRequest, SocialAnalyzer};

#[derive(Serialize)]
struct ServerStats {
    pub uptime: String,
    pub version: &'static str,
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

fn format_uptime(duration: Duration) -> String {
    let total_seconds = duration.as_secs();

    let days = total_seconds / 86_400;
    let hours = (total_seconds % 86_400) / 3600;
    let minutes = (total_seconds % 3600) / 60;
    let seconds = total_seconds % 60;

    format!("{}d {:02}:{:02}:{:02}", days, hours, minutes, seconds)
}

async fn home(State(state): State<ServerState>) -> impl IntoResponse {
    let stats = ServerStats {
        uptime: format_uptime(state.start_time.elapsed()),
        version: env!("CARGO_PKG_VERSION"),
    };
    Json(stats)
}

async fn analyze_text(
    State(classifier): State<SentimentClassifier>,
    Json(input): Json<AnalysisInput>,
) -> impl IntoResponse {
    let result = classifier.classify(&input.text);
    metrics::record_classification(result.sentiment.as_str());
    Json(result)
}

async fn fetch_posts(
    State(analyzer): State<GuardedSocialAnalyzer>,
    Json(request): Json<FetchPostsRequest>,
) -> Response {
    match analyzer.analyze(&request).await {
        Ok(analysis) => Json(analysis).into_response(),
        Err(err) => {
            metrics::record_error("validation", "/v1/social/fetch-posts");
            (
                StatusCode::BAD_REQUEST,
                Json(ErrorBody {
                    error: err.to_string(),
                }),
            )
                .into_response()
        }
    }
}

async fn get_overview(State(dashboard): State<GuardedDashboardData>) -> impl IntoResponse {
    Json(dashboard.overview)
}

async fn get_topics(State(dashboard): State<GuardedDashboardData>) -> impl IntoResponse {
    Json(dashboard.topics.clone())
}

async fn get_emotions(State(dashboard): State<GuardedDashboardData>) -> impl IntoResponse {
    Json(dashboard.emotions.clone())
}

async fn get_trends(State(dashboard): State<GuardedDashboardData>) -> impl IntoResponse {
    Json(dashboard.trends.clone())
}

async fn get_posts(State(dashboard): State<GuardedDashboardData>) -> impl IntoResponse {
    Json(dashboard.posts.clone())
}

pub fn make_app(
    config: ServerConfig,
    classifier: SentimentClassifier,
    social_analyzer: SocialAnalyzer,
    dashboard: DashboardData,
) -> Router {
    let request_timeout = Duration::from_secs(config.request_timeout_sec);
    let state = ServerState::new(config, classifier, social_analyzer, dashboard);

    let sentiment_routes: Router = Router::new()
        .route("/analyze", post(analyze_text))
        .with_state(state.clone());

    let social_routes: Router = Router::new()
        .route("/fetch-posts", post(fetch_posts))
        .with_state(state.clone());

    let dashboard_routes: Router = Router::new()
        .route("/overview", get(get_overview))
        .route("/topics", get(get_topics))
        .route("/emotions", get(get_emotions))
        .route("/trends", get(get_trends))
        .route("/posts", get(get_posts))
        .with_state(state.clone());

    let home_router: Router = Router::new()
        .route("/", get(home))
        .with_state(state.clone());

    let mut app: Router = home_router
        .nest("/v1/sentiment", sentiment_routes)
        .nest("/v1/social", social_routes)
        .nest("/v1/dashboard", dashboard_routes)
        .layer(TimeoutLayer::new(request_timeout))
        .layer(CorsLayer::permissive());

    #[cfg(feature = "slowdown")]
    {
        app = app.layer(middleware::from_fn(slowdown_request));
    }
    app = app.layer(middleware::from_fn_with_state(state, log_requests));

    app
}

fn make_metrics_app() -> Router {
    Router::new().route("/metrics", get(metrics::metrics_handler))
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        error!("Failed to listen for Ctrl+C: {}", err);
        std::future::pending::<()>().await;
    }
    info!("Received Ctrl+C, shutting down");
}

pub async fn run_server(
    config: ServerConfig,
    classifier: SentimentClassifier,
    social_analyzer: SocialAnalyzer,
    dashboard: DashboardData,
) -> Result<()> {
    let port = config.port;
    let metrics_port = config.metrics_port;
    let app = make_app(config, classifier, social_analyzer, dashboard);

    let metrics_listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", metrics_port))
        .await
        .with_context(|| format!("Failed to bind metrics port {}", metrics_port))?;
    tokio::spawn(async move {
        if let Err(err) = axum::serve(metrics_listener, make_metrics_app()).await {
            error!("Metrics server stopped: {}", err);
        }
    });

    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", port))
        .await
        .with_context(|| format!("Failed to bind port {}", port))?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server failed")
}
