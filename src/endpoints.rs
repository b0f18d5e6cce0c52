//! Endpoint resolution
//!
//! Computes the three versioned API URLs (load, sql, pre-aggregations
//! jobs) from either a Cube Cloud subdomain or an explicit base URL.
//! Resolution is pure string templating: the base URL is taken verbatim
//! and never validated here. An empty target produces a syntactically
//! wrong URL that surfaces as a downstream network failure.

/// Hosted deployment domain
pub const CUBE_CLOUD_DOMAIN: &str = "cubecloud.dev";

/// Path prefix of the REST API on hosted deployments
pub const CUBE_API_PREFIX: &str = "cubejs-api";

/// Resolved API endpoints for one client instance
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    /// Base URL all three endpoints share
    pub base: String,
    /// Data load endpoint (`/v1/load`)
    pub load: String,
    /// SQL introspection endpoint (`/v1/sql`)
    pub sql: String,
    /// Pre-aggregations jobs endpoint (`/v1/pre-aggregations/jobs`)
    pub jobs: String,
}

impl Endpoints {
    /// Resolve endpoints from a connection target.
    ///
    /// `subdomain` takes precedence when both are given. With a subdomain
    /// the base is `https://{subdomain}.cubecloud.dev/cubejs-api`;
    /// otherwise `base_url` is used verbatim.
    pub fn resolve(subdomain: Option<&str>, base_url: Option<&str>) -> Self {
        let base = match subdomain {
            Some(subdomain) => {
                format!("https://{subdomain}.{CUBE_CLOUD_DOMAIN}/{CUBE_API_PREFIX}")
            }
            None => base_url.unwrap_or_default().to_string(),
        };

        Self {
            load: format!("{base}/v1/load"),
            sql: format!("{base}/v1/sql"),
            jobs: format!("{base}/v1/pre-aggregations/jobs"),
            base,
        }
    }
}
