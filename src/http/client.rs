//! Authenticated polling client
//!
//! Issues GET/POST calls with the signed token in the `Authorization`
//! header (raw token, no scheme prefix) and implements the "Continue
//! wait" retry loop for the load and sql endpoints. The jobs endpoint is
//! a single-shot POST; its polling policy lives in the caller.

use crate::error::{Error, Result};
use crate::types::JsonValue;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Client, StatusCode};
use std::time::Duration;
use tracing::{debug, warn};

/// Marker substring of an in-progress load response
const CONTINUE_WAIT: &str = "Continue wait";

/// Configuration for the polling client
#[derive(Debug, Clone)]
pub struct PollingConfig {
    /// Sleep between retries of one continue-wait session
    pub wait_interval: Duration,
    /// Ceiling on the accumulated wait; `None` polls without bound
    pub max_wait: Option<Duration>,
    /// User agent string
    pub user_agent: String,
}

impl Default for PollingConfig {
    fn default() -> Self {
        Self {
            wait_interval: Duration::from_secs(10),
            max_wait: None,
            user_agent: format!("cubejs-client/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl PollingConfig {
    /// Create a new config builder
    pub fn builder() -> PollingConfigBuilder {
        PollingConfigBuilder::default()
    }
}

/// Builder for polling config
#[derive(Default)]
pub struct PollingConfigBuilder {
    config: PollingConfig,
}

impl PollingConfigBuilder {
    /// Set the sleep between retries
    pub fn wait_interval(mut self, interval: Duration) -> Self {
        self.config.wait_interval = interval;
        self
    }

    /// Set the ceiling on accumulated wait time
    pub fn max_wait(mut self, max: Duration) -> Self {
        self.config.max_wait = Some(max);
        self
    }

    /// Set user agent
    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.config.user_agent = agent.into();
        self
    }

    /// Build the config
    pub fn build(self) -> PollingConfig {
        self.config
    }
}

/// HTTP client with the continue-wait polling loop
pub struct PollingClient {
    client: Client,
    token: String,
    config: PollingConfig,
}

impl PollingClient {
    /// Create a polling client that authenticates with `token`.
    ///
    /// The token goes into every request verbatim; the remote API expects
    /// no `Bearer ` prefix.
    pub fn new(token: impl Into<String>, config: PollingConfig) -> Self {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let client = Client::builder()
            .default_headers(headers)
            .user_agent(&config.user_agent)
            .build()
            .expect("Failed to build HTTP client");

        Self {
            client,
            token: token.into(),
            config,
        }
    }

    /// Fetch a JSON document, waiting through "Continue wait" responses.
    ///
    /// Each retry sleeps `wait_interval` and adds exactly that amount to
    /// the elapsed accumulator. The ceiling is checked before each
    /// attempt: one attempt may run at elapsed == max_wait, none after it
    /// is exceeded. Any body-level error other than the continue-wait
    /// marker is returned to the caller as part of the document.
    pub async fn fetch(&self, url: &str, params: &[(String, String)]) -> Result<JsonValue> {
        let mut elapsed = Duration::ZERO;

        loop {
            if let Some(max_wait) = self.config.max_wait {
                if elapsed > max_wait {
                    warn!(url, "wait ceiling of {}s exceeded", max_wait.as_secs());
                    return Err(Error::WaitTimeout {
                        max_wait_secs: max_wait.as_secs(),
                    });
                }
            }

            let response = self
                .client
                .get(url)
                .query(params)
                .header(AUTHORIZATION, &self.token)
                .send()
                .await?;

            let status = response.status();
            if status != StatusCode::OK {
                return Err(Error::api(reason_text(status)));
            }

            let data: JsonValue = response.json().await?;
            if is_continue_wait(&data) {
                debug!(
                    url,
                    "result not ready, retrying in {:?}", self.config.wait_interval
                );
                tokio::time::sleep(self.config.wait_interval).await;
                elapsed += self.config.wait_interval;
                continue;
            }

            return Ok(data);
        }
    }

    /// Send a single-shot POST with a JSON body and parse the response.
    ///
    /// No continue-wait handling: the jobs endpoint answers immediately
    /// and its polling policy belongs to the caller.
    pub async fn post_json(&self, url: &str, body: &JsonValue) -> Result<JsonValue> {
        let response = self
            .client
            .post(url)
            .json(body)
            .header(AUTHORIZATION, &self.token)
            .send()
            .await?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(Error::api(reason_text(status)));
        }

        Ok(response.json().await?)
    }

    /// Sleep between aggregation poll rounds
    pub async fn wait_between_calls(&self) {
        tokio::time::sleep(self.config.wait_interval).await;
    }

    /// The configured wait interval
    pub fn wait_interval(&self) -> Duration {
        self.config.wait_interval
    }
}

impl std::fmt::Debug for PollingClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // The token stays out of debug output
        f.debug_struct("PollingClient")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

/// Check whether a 200 body signals an in-progress query
fn is_continue_wait(data: &JsonValue) -> bool {
    data.get("error")
        .and_then(JsonValue::as_str)
        .is_some_and(|error| error.contains(CONTINUE_WAIT))
}

/// Human-readable reason text for a non-200 status
fn reason_text(status: StatusCode) -> String {
    status
        .canonical_reason()
        .map_or_else(|| status.to_string(), str::to_string)
}
