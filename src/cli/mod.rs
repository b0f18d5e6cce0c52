//! CLI module
//!
//! Command-line interface for the Cube client. This is the calling layer:
//! it resolves secrets (flags, config file, environment), assembles the
//! configuration and invokes the client; the core never reads the
//! environment itself.
//!
//! # Commands
//!
//! - `query` - Run a query against the load API
//! - `build` - Trigger a pre-aggregations build

mod commands;
mod runner;

pub use commands::{Cli, Commands, OutputFormat};
pub use runner::{Runner, API_SECRET_ENV_VAR};
