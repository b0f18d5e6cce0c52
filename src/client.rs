//! Cube API client
//!
//! Ties the endpoint resolver, credential builder and polling HTTP client
//! together behind the two operations the calling layer uses:
//! [`CubeClient::load_query`] and [`CubeClient::build_pre_aggregations`].
//!
//! A client is built fresh per invocation context: construction validates
//! the configuration, signs the token and resolves the endpoints once.
//! Concurrent invocations share no mutable state.

use crate::auth::api_token;
use crate::config::CubeConfig;
use crate::endpoints::Endpoints;
use crate::error::{Error, Result};
use crate::http::{PollingClient, PollingConfig};
use crate::jobs::{JobBatch, RoundOutcome, StatusMap};
use crate::types::{JsonValue, OptionStringExt};
use serde_json::json;
use tracing::{debug, info};

// ============================================================================
// Build Outcome
// ============================================================================

/// Result of a pre-aggregations build request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BuildOutcome {
    /// Fire-and-forget mode: jobs submitted, these are their tokens
    Submitted(Vec<String>),
    /// Waiting mode: every job reached terminal success
    Completed,
}

impl BuildOutcome {
    /// Check whether the build ran to completion
    pub fn is_completed(&self) -> bool {
        matches!(self, Self::Completed)
    }
}

// ============================================================================
// Client
// ============================================================================

/// Client for the Cube REST API
#[derive(Debug)]
pub struct CubeClient {
    endpoints: Endpoints,
    load_client: PollingClient,
    jobs_client: PollingClient,
    include_generated_sql: bool,
}

impl CubeClient {
    /// Build a client from a validated configuration.
    ///
    /// Fails with a configuration error before any network I/O when the
    /// connection target or secret is missing. The token is signed once
    /// here and reused for every call made through this instance.
    pub fn new(config: &CubeConfig) -> Result<Self> {
        config.validate()?;

        let token = api_token(config.secret()?, config.security_context.as_ref())?;

        let subdomain = config.subdomain.clone().none_if_empty();
        let base_url = config.base_url.clone().none_if_empty();
        let endpoints = Endpoints::resolve(subdomain.as_deref(), base_url.as_deref());
        debug!(base = %endpoints.base, "resolved Cube API endpoints");

        let mut load_config = PollingConfig::builder().wait_interval(config.load_wait_interval());
        if let Some(max_wait) = config.max_wait() {
            load_config = load_config.max_wait(max_wait);
        }

        // The jobs path keeps the raw wait setting and has no ceiling;
        // its termination comes from the batch reaching a terminal state
        let jobs_config = PollingConfig::builder()
            .wait_interval(config.jobs_wait_interval())
            .build();

        Ok(Self {
            endpoints,
            load_client: PollingClient::new(token.clone(), load_config.build()),
            jobs_client: PollingClient::new(token, jobs_config),
            include_generated_sql: config.include_generated_sql,
        })
    }

    /// The resolved endpoints
    pub fn endpoints(&self) -> &Endpoints {
        &self.endpoints
    }

    /// Run a query against the load API and return the JSON response.
    ///
    /// `query` is treated as opaque: an object is a single query, an
    /// array is a multi-query blend handled by the remote service. When
    /// `include_generated_sql` is configured, a second fetch against the
    /// sql endpoint (same params, same continue-wait loop) merges its
    /// `sql` field into the response under key `sql`.
    pub async fn load_query(&self, query: &JsonValue) -> Result<JsonValue> {
        if query.is_null() {
            return Err(Error::missing_field("query"));
        }

        let params = vec![("query".to_string(), serde_json::to_string(query)?)];

        debug!(url = %self.endpoints.load, "running load query");
        let mut data = self.load_client.fetch(&self.endpoints.load, &params).await?;

        if self.include_generated_sql {
            debug!(url = %self.endpoints.sql, "fetching generated SQL");
            let sql = self.load_client.fetch(&self.endpoints.sql, &params).await?;
            if let Some(map) = data.as_object_mut() {
                map.insert("sql".to_string(), sql.get("sql").cloned().unwrap_or(JsonValue::Null));
            }
        }

        Ok(data)
    }

    /// Trigger a pre-aggregations build for `selector`.
    ///
    /// Submits the jobs and, unless `wait` is set, returns their tokens
    /// without polling. In waiting mode the full original token set is
    /// re-queried every round until the batch resolves; a resolved
    /// failure surfaces as an API failure error carrying the offending
    /// status text (or the distinct missing-partitions message).
    pub async fn build_pre_aggregations(
        &self,
        selector: &JsonValue,
        wait: bool,
    ) -> Result<BuildOutcome> {
        if selector.is_null() {
            return Err(Error::missing_field("selector"));
        }

        let body = json!({"action": "post", "selector": selector});
        let response = self.jobs_client.post_json(&self.endpoints.jobs, &body).await?;
        let tokens: Vec<String> = serde_json::from_value(response)?;
        info!(jobs = tokens.len(), "pre-aggregations build submitted");

        let mut batch = JobBatch::new(tokens);
        if !wait {
            return Ok(BuildOutcome::Submitted(batch.into_tokens()));
        }

        loop {
            let body = json!({
                "action": "get",
                "resType": "object",
                "tokens": batch.tokens(),
            });
            let response = self.jobs_client.post_json(&self.endpoints.jobs, &body).await?;
            let statuses: StatusMap = serde_json::from_value(response)?;

            match batch.observe(&statuses) {
                RoundOutcome::AllDone => {
                    info!("pre-aggregations build completed");
                    return Ok(BuildOutcome::Completed);
                }
                RoundOutcome::Failed(status) => return Err(Error::job_failed(status)),
                RoundOutcome::NoLiveJobs => return Err(Error::NoLiveJobs),
                RoundOutcome::Pending => {
                    let pending = batch.pending_tokens(&statuses);
                    debug!(
                        pending = pending.len(),
                        total = batch.tokens().len(),
                        "jobs still running"
                    );
                    self.jobs_client.wait_between_calls().await;
                }
            }
        }
    }
}
