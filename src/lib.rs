//! SentimentSense server library
//!
//! This crate exposes the rule-based sentiment classifier and the HTTP
//! service built around it for integration testing.

pub mod config;
pub mod dashboard;
pub mod sentiment;
pub mod server;
pub mod social;

// Re-export commonly used types for convenience
pub use sentiment::{classify, SentimentClassifier, SentimentResult};
pub use server::{run_server, RequestsLoggingLevel};
