use std::env;
use std::time::Duration;

use dotenvy::dotenv;

pub const DEFAULT_BASE_URL: &str = "https://app.useanvil.com";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Connection settings for [`crate::AnvilClient`].
#[derive(Clone, Debug)]
pub struct ClientConfig {
    /// Tolerated as `None` here; requests fail with `MissingApiKey` instead.
    pub api_key: Option<String>,
    pub base_url: String,
    pub timeout: Duration,
}

impl ClientConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: Some(api_key.into()),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    pub fn from_env() -> Self {
        dotenv().ok(); // Load .env if present

        Self {
            api_key: env::var("ANVIL_API_KEY").ok(),
            base_url: env::var("ANVIL_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string()),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_api_key(mut self, api_key: Option<String>) -> Self {
        self.api_key = api_key;
        self
    }

    pub fn graphql_endpoint(&self) -> String {
        format!("{}/graphql", self.base())
    }

    pub fn rest_endpoint(&self, path: &str) -> String {
        format!("{}/api/v1/{}", self.base(), path)
    }

    /// Endpoints outside `/api/v1/`, e.g. document downloads.
    pub fn api_endpoint(&self, path: &str) -> String {
        format!("{}/api/{}", self.base(), path)
    }

    /// Loopback base URLs bypass any system proxy.
    pub fn is_loopback(&self) -> bool {
        let rest = self.base_url.split_once("://").map_or(self.base_url.as_str(), |(_, rest)| rest);
        ["localhost", "127.0.0.1", "[::1]"]
            .iter()
            .any(|host| rest.starts_with(host))
    }

    fn base(&self) -> &str {
        self.base_url.trim_end_matches('/')
    }
}
