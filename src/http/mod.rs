//! HTTP client module
//!
//! Provides the authenticated polling client used against the Cube REST
//! API.
//!
//! # Behavior
//!
//! - **Continue-wait long-poll**: a 200 response whose body carries an
//!   `error` field containing "Continue wait" is retried after a fixed
//!   sleep; any other response is terminal
//! - **Strict wait ceiling**: the elapsed accumulator is checked before
//!   each attempt, never mid-flight
//! - **No transport retries**: timeouts and connection errors fail the
//!   call immediately

mod client;

pub use client::{PollingClient, PollingConfig, PollingConfigBuilder};
