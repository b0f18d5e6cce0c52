//! Client configuration
//!
//! This module contains the configuration surface recognized by the
//! client, loadable from YAML. Secret resolution (environment variables,
//! secret stores) is the calling layer's responsibility; the core only
//! consumes plain values.

use crate::error::{Error, Result};
use crate::types::{JsonObject, OptionStringExt};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Default seconds between API calls
pub const DEFAULT_WAIT_SECS: i64 = 10;

/// Complete client configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CubeConfig {
    /// Cube Cloud subdomain; takes precedence over `base_url` when both
    /// are given
    #[serde(default)]
    pub subdomain: Option<String>,

    /// Base URL for self-hosted deployments, used verbatim
    #[serde(default)]
    pub base_url: Option<String>,

    /// API secret the token is signed with
    #[serde(default)]
    pub api_secret: Option<String>,

    /// Security context signed into the token; a 7-day relative expiry is
    /// added when the mapping carries no expiry of its own
    #[serde(default)]
    pub security_context: Option<JsonObject>,

    /// Seconds to wait between API calls
    #[serde(default = "default_wait")]
    pub wait_time_between_api_calls: i64,

    /// Ceiling in seconds on the accumulated wait for one load call;
    /// absent means unbounded polling
    #[serde(default)]
    pub max_wait_time: Option<u64>,

    /// Whether load results should be augmented with the generated SQL
    #[serde(default)]
    pub include_generated_sql: bool,

    /// Whether a pre-aggregations build should be waited on to completion
    #[serde(default)]
    pub wait_for_job_run_completion: bool,
}

fn default_wait() -> i64 {
    DEFAULT_WAIT_SECS
}

impl Default for CubeConfig {
    fn default() -> Self {
        Self {
            subdomain: None,
            base_url: None,
            api_secret: None,
            security_context: None,
            wait_time_between_api_calls: DEFAULT_WAIT_SECS,
            max_wait_time: None,
            include_generated_sql: false,
            wait_for_job_run_completion: false,
        }
    }
}

impl CubeConfig {
    /// Load configuration from a YAML file
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&content)
    }

    /// Parse configuration from a YAML string
    pub fn from_yaml_str(content: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(content)?)
    }

    /// Validate the parameter set before any network I/O.
    ///
    /// Empty strings count as missing, matching how the connection target
    /// precedence is applied.
    pub fn validate(&self) -> Result<()> {
        if self.subdomain.clone().none_if_empty().is_none()
            && self.base_url.clone().none_if_empty().is_none()
        {
            return Err(Error::config("Missing both `subdomain` and `base_url`"));
        }
        if self.api_secret.clone().none_if_empty().is_none() {
            return Err(Error::missing_field("api_secret"));
        }
        Ok(())
    }

    /// The resolved API secret; fails as a configuration error when unset
    pub fn secret(&self) -> Result<&str> {
        self.api_secret
            .as_deref()
            .filter(|s| !s.is_empty())
            .ok_or_else(|| Error::missing_field("api_secret"))
    }

    /// Wait interval for the load path; a non-positive setting is coerced
    /// to the default
    pub fn load_wait_interval(&self) -> Duration {
        let secs = if self.wait_time_between_api_calls > 0 {
            self.wait_time_between_api_calls
        } else {
            DEFAULT_WAIT_SECS
        };
        Duration::from_secs(secs as u64)
    }

    /// Wait interval for the jobs path; the raw setting clamped at zero
    pub fn jobs_wait_interval(&self) -> Duration {
        Duration::from_secs(self.wait_time_between_api_calls.max(0) as u64)
    }

    /// Ceiling on the accumulated wait, when one is configured
    pub fn max_wait(&self) -> Option<Duration> {
        self.max_wait_time.map(Duration::from_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Write;

    #[test]
    fn test_config_defaults() {
        let config = CubeConfig::default();
        assert_eq!(config.wait_time_between_api_calls, 10);
        assert!(config.max_wait_time.is_none());
        assert!(!config.include_generated_sql);
        assert!(!config.wait_for_job_run_completion);
    }

    #[test]
    fn test_from_yaml_str_with_defaults() {
        let config = CubeConfig::from_yaml_str(
            r"
subdomain: acme
api_secret: s3cret
",
        )
        .unwrap();

        assert_eq!(config.subdomain.as_deref(), Some("acme"));
        assert_eq!(config.api_secret.as_deref(), Some("s3cret"));
        assert_eq!(config.wait_time_between_api_calls, 10);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_from_yaml_str_full() {
        let config = CubeConfig::from_yaml_str(
            r#"
base_url: http://localhost:4000/cubejs-system
api_secret: s3cret
security_context:
  tenant: t1
wait_time_between_api_calls: 5
max_wait_time: 60
include_generated_sql: true
wait_for_job_run_completion: true
"#,
        )
        .unwrap();

        assert_eq!(
            config.base_url.as_deref(),
            Some("http://localhost:4000/cubejs-system")
        );
        assert_eq!(
            config.security_context.as_ref().unwrap()["tenant"],
            serde_json::json!("t1")
        );
        assert_eq!(config.wait_time_between_api_calls, 5);
        assert_eq!(config.max_wait_time, Some(60));
        assert!(config.include_generated_sql);
        assert!(config.wait_for_job_run_completion);
    }

    #[test]
    fn test_from_yaml_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "subdomain: acme\napi_secret: s3cret").unwrap();

        let config = CubeConfig::from_yaml_file(file.path()).unwrap();
        assert_eq!(config.subdomain.as_deref(), Some("acme"));
    }

    #[test]
    fn test_validate_requires_a_target() {
        let config = CubeConfig {
            api_secret: Some("s3cret".to_string()),
            ..CubeConfig::default()
        };

        let err = config.validate().unwrap_err();
        assert!(err.is_configuration());
        assert!(err
            .to_string()
            .contains("Missing both `subdomain` and `base_url`"));
    }

    #[test]
    fn test_validate_treats_empty_strings_as_missing() {
        let config = CubeConfig {
            subdomain: Some(String::new()),
            base_url: Some(String::new()),
            api_secret: Some("s3cret".to_string()),
            ..CubeConfig::default()
        };

        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_requires_a_secret() {
        let config = CubeConfig {
            subdomain: Some("acme".to_string()),
            ..CubeConfig::default()
        };

        let err = config.validate().unwrap_err();
        assert_eq!(
            err.to_string(),
            "Missing required config field: api_secret"
        );
    }

    #[test]
    fn test_load_wait_interval_coerces_non_positive() {
        let mut config = CubeConfig {
            wait_time_between_api_calls: 0,
            ..CubeConfig::default()
        };
        assert_eq!(config.load_wait_interval(), Duration::from_secs(10));

        config.wait_time_between_api_calls = -5;
        assert_eq!(config.load_wait_interval(), Duration::from_secs(10));

        config.wait_time_between_api_calls = 3;
        assert_eq!(config.load_wait_interval(), Duration::from_secs(3));
    }

    #[test]
    fn test_jobs_wait_interval_keeps_zero() {
        let config = CubeConfig {
            wait_time_between_api_calls: 0,
            ..CubeConfig::default()
        };
        assert_eq!(config.jobs_wait_interval(), Duration::ZERO);
    }

    #[test]
    fn test_max_wait() {
        let config = CubeConfig {
            max_wait_time: Some(30),
            ..CubeConfig::default()
        };
        assert_eq!(config.max_wait(), Some(Duration::from_secs(30)));
        assert_eq!(CubeConfig::default().max_wait(), None);
    }
}
