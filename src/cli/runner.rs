//! CLI runner - executes commands

use crate::cli::commands::{Cli, Commands, OutputFormat};
use crate::client::{BuildOutcome, CubeClient};
use crate::config::CubeConfig;
use crate::error::{Error, Result};
use crate::types::{JsonValue, OptionStringExt};
use serde_json::json;
use std::fs;
use std::path::Path;

/// Environment variable the API secret falls back to when neither the
/// flag nor the config file provides one
pub const API_SECRET_ENV_VAR: &str = "CUBEJS_API_SECRET";

/// CLI runner
pub struct Runner {
    cli: Cli,
}

impl Runner {
    /// Create a new runner
    pub fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Run the CLI command
    pub async fn run(&self) -> Result<()> {
        match &self.cli.command {
            Commands::Query {
                query,
                query_file,
                include_sql,
            } => {
                self.query(query.as_deref(), query_file.as_deref(), *include_sql)
                    .await
            }
            Commands::Build {
                selector,
                selector_file,
                wait,
            } => {
                self.build(selector.as_deref(), selector_file.as_deref(), *wait)
                    .await
            }
        }
    }

    /// Assemble the configuration: file first, then flag overrides, then
    /// the environment fallback for the secret
    fn build_config(&self) -> Result<CubeConfig> {
        let mut config = match &self.cli.config {
            Some(path) => CubeConfig::from_yaml_file(path)?,
            None => CubeConfig::default(),
        };

        if let Some(subdomain) = &self.cli.subdomain {
            config.subdomain = Some(subdomain.clone());
        }
        if let Some(url) = &self.cli.url {
            config.base_url = Some(url.clone());
        }
        if let Some(secret) = &self.cli.api_secret {
            config.api_secret = Some(secret.clone());
        }
        if let Some(context) = &self.cli.security_context {
            let value: JsonValue = serde_json::from_str(context)?;
            config.security_context = value
                .as_object()
                .cloned()
                .ok_or_else(|| Error::config("`--security-context` must be a JSON object"))
                .map(Some)?;
        }
        if let Some(wait_interval) = self.cli.wait_interval {
            config.wait_time_between_api_calls = wait_interval;
        }
        if let Some(max_wait) = self.cli.max_wait {
            config.max_wait_time = Some(max_wait);
        }

        // Secret resolution stops at the calling layer; the core only
        // ever sees the plain value
        if config.api_secret.clone().none_if_empty().is_none() {
            if let Ok(secret) = std::env::var(API_SECRET_ENV_VAR) {
                config.api_secret = secret.none_if_empty();
            }
        }

        Ok(config)
    }

    /// Run a load query
    async fn query(
        &self,
        query: Option<&str>,
        query_file: Option<&Path>,
        include_sql: bool,
    ) -> Result<()> {
        let mut config = self.build_config()?;
        config.include_generated_sql |= include_sql;

        let query = read_json_arg(query, query_file)?
            .ok_or_else(|| Error::missing_field("query"))?;

        let client = CubeClient::new(&config)?;
        let data = client.load_query(&query).await?;
        self.print_value(&data);
        Ok(())
    }

    /// Trigger a pre-aggregations build
    async fn build(
        &self,
        selector: Option<&str>,
        selector_file: Option<&Path>,
        wait: bool,
    ) -> Result<()> {
        let mut config = self.build_config()?;
        config.wait_for_job_run_completion |= wait;

        let selector = read_json_arg(selector, selector_file)?
            .ok_or_else(|| Error::missing_field("selector"))?;

        let client = CubeClient::new(&config)?;
        let outcome = client
            .build_pre_aggregations(&selector, config.wait_for_job_run_completion)
            .await?;

        match outcome {
            BuildOutcome::Submitted(tokens) => {
                self.print_value(&json!({"submitted": true, "tokens": tokens}));
            }
            BuildOutcome::Completed => {
                self.print_value(&json!({"completed": true}));
            }
        }
        Ok(())
    }

    /// Print a JSON value in the selected output format
    fn print_value(&self, value: &JsonValue) {
        match self.cli.format {
            OutputFormat::Json => println!("{value}"),
            OutputFormat::Pretty => {
                println!("{}", serde_json::to_string_pretty(value).unwrap_or_default());
            }
        }
    }
}

/// Read a JSON argument given inline or as a file; inline wins
fn read_json_arg(inline: Option<&str>, file: Option<&Path>) -> Result<Option<JsonValue>> {
    match (inline, file) {
        (Some(inline), _) => Ok(Some(serde_json::from_str(inline)?)),
        (None, Some(path)) => {
            let content = fs::read_to_string(path)?;
            Ok(Some(serde_json::from_str(&content)?))
        }
        (None, None) => Ok(None),
    }
}
