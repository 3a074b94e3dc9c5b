//! Random slowdown middleware, for exercising the dashboard loading states.
#![cfg_attr(not(feature = "slowdown"), allow(dead_code))]

use axum::body::Body;
use axum::extract::Request;
use axum::middleware::Next;
use axum::response::IntoResponse;
use rand_distr::{Distribution, Normal};
use std::time::Duration;

const MEAN_DELAY_MS: f64 = 1000.0;
const DELAY_STD_DEV_MS: f64 = 2000.0;
const MAX_DELAY_MS: f64 = 8000.0;

/// Delay drawn from a gaussian and clamped to [0, MAX_DELAY_MS].
fn random_delay() -> Duration {
    let millis = match Normal::new(MEAN_DELAY_MS, DELAY_STD_DEV_MS) {
        Ok(normal) => normal.sample(&mut rand::rng()).clamp(0.0, MAX_DELAY_MS),
        Err(_) => MEAN_DELAY_MS,
    };
    Duration::from_millis(millis as u64)
}

/// Middleware that slows down the request for a random amount of time.
pub async fn slowdown_request(request: Request<Body>, next: Next) -> impl IntoResponse {
    tokio::time::sleep(random_delay()).await;
    next.run(request).await
}
