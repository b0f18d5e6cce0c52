//! CLI commands and argument parsing

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Cube analytics API client CLI
#[derive(Parser, Debug)]
#[command(name = "cubejs-client")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Client configuration file (YAML)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Cube Cloud subdomain (takes precedence over --url)
    #[arg(long, global = true)]
    pub subdomain: Option<String>,

    /// Base URL for self-hosted deployments
    #[arg(long, global = true)]
    pub url: Option<String>,

    /// API secret (falls back to the CUBEJS_API_SECRET env var)
    #[arg(long, global = true)]
    pub api_secret: Option<String>,

    /// Inline security context JSON
    #[arg(long, global = true)]
    pub security_context: Option<String>,

    /// Seconds to wait between API calls
    #[arg(long, global = true)]
    pub wait_interval: Option<i64>,

    /// Maximum seconds to wait for the API to respond
    #[arg(long, global = true)]
    pub max_wait: Option<u64>,

    /// Output format
    #[arg(short, long, global = true, default_value = "json")]
    pub format: OutputFormat,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run a query against the load API
    Query {
        /// Inline query JSON (object, or array for a multi-query blend)
        #[arg(long)]
        query: Option<String>,

        /// Query JSON file
        #[arg(long)]
        query_file: Option<PathBuf>,

        /// Include the generated SQL in the result
        #[arg(long)]
        include_sql: bool,
    },

    /// Trigger a pre-aggregations build
    Build {
        /// Inline selector JSON
        #[arg(long)]
        selector: Option<String>,

        /// Selector JSON file
        #[arg(long)]
        selector_file: Option<PathBuf>,

        /// Wait for the build to run to completion
        #[arg(long)]
        wait: bool,
    },
}

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Compact JSON on one line
    Json,
    /// Pretty-printed JSON
    Pretty,
}
