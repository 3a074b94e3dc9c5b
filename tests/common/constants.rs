//! Shared constants for end-to-end tests
//!
//! When test data changes, update only this file.

// ============================================================================
// Timeouts
// ============================================================================

/// Maximum time to wait for a spawned server to answer `/`
pub const SERVER_READY_TIMEOUT_MS: u64 = 5000;

/// Interval between readiness polls
pub const SERVER_READY_POLL_INTERVAL_MS: u64 = 10;

/// Timeout for every request made by the test client
pub const REQUEST_TIMEOUT_SECS: u64 = 10;

// ============================================================================
// Classifier Inputs
// ============================================================================

/// Clearly positive text, classified positive with score above 0.7
pub const POSITIVE_TEXT: &str = "I really love this, it's amazing and wonderful";

/// Clearly negative text, classified negative with score below 0.3
pub const NEGATIVE_TEXT: &str = "This is terrible, I hate it and it's completely broken";

/// Mixed text: positive with score exactly 0.8
pub const MIXED_TEXT: &str = "It's not bad, but not great either";

/// Text without any cue, classified neutral with score 0.5
pub const NEUTRAL_TEXT: &str = "The weather report was published today";

// ============================================================================
// Social
// ============================================================================

/// Username used for fetch-posts requests
pub const TEST_USERNAME: &str = "cricketfan";

/// Seed for the simulated posts generator
pub const SIMULATION_SEED: u64 = 42;

/// Bearer token the mock upstream expects
pub const UPSTREAM_TOKEN: &str = "test-upstream-token";

/// Number of posts in the default simulated answer
pub const SIMULATED_POST_COUNT: usize = 5;
