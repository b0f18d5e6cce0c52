// Allow common clippy pedantic lints that aren't critical for this codebase
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_lossless)]
#![allow(clippy::too_many_lines)]
#![allow(clippy::ref_option)]
#![allow(clippy::unused_self)]
#![allow(clippy::struct_excessive_bools)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::items_after_statements)]
#![allow(clippy::unnecessary_wraps)]
#![allow(clippy::match_same_arms)]
#![allow(clippy::match_wildcard_for_single_variants)]
#![allow(clippy::needless_pass_by_value)]
#![allow(clippy::unused_async)]

//! # Cube API Client
//!
//! A Rust client for the Cube analytics REST API: signed-token
//! authentication, the `/v1/load` long-poll, and pre-aggregations build
//! polling.
//!
//! ## Features
//!
//! - **Signed tokens**: HS256 JWT over an optional security context, with
//!   a 7-day relative expiry injected when the context has none
//! - **Continue-wait long-poll**: bounded retry loop with a strict
//!   elapsed-time ceiling
//! - **Pre-aggregations builds**: submit a selector, then aggregate
//!   per-job statuses until the batch resolves
//! - **Generated SQL**: optionally augment load results with the SQL the
//!   remote service generated
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use cubejs_client::{CubeClient, CubeConfig, Result};
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let config = CubeConfig::from_yaml_file("cube.yaml")?;
//!     let client = CubeClient::new(&config)?;
//!
//!     let query = serde_json::json!({
//!         "measures": ["Orders.count"],
//!         "dimensions": ["Orders.status"],
//!     });
//!     let data = client.load_query(&query).await?;
//!     println!("{data}");
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                         CubeClient                          │
//! │   load_query(query) → JSON                                  │
//! │   build_pre_aggregations(selector, wait) → BuildOutcome     │
//! └─────────────────────────────────────────────────────────────┘
//!                               │
//! ┌──────────────┬──────────────┴───────┬───────────────────────┐
//! │     Auth     │        HTTP          │         Jobs          │
//! ├──────────────┼──────────────────────┼───────────────────────┤
//! │ HS256 token  │ GET + continue-wait  │ Submitted → Polling   │
//! │ 7d expiry    │ strict wait ceiling  │ → AllDone | Failed    │
//! │ default      │ single-shot POST     │   | NoLiveJobs        │
//! └──────────────┴──────────────────────┴───────────────────────┘
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error types for the client
pub mod error;

/// Common types and type aliases
pub mod types;

/// Signed token building
pub mod auth;

/// Endpoint resolution
pub mod endpoints;

/// HTTP client with the continue-wait polling loop
pub mod http;

/// Job status aggregation for pre-aggregations builds
pub mod jobs;

/// Client configuration
pub mod config;

/// The Cube API client
pub mod client;

/// Command-line interface
pub mod cli;

// ============================================================================
// Re-exports
// ============================================================================

pub use client::{BuildOutcome, CubeClient};
pub use config::CubeConfig;
pub use endpoints::Endpoints;
pub use error::{Error, Result};
pub use types::*;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
