//! Client configuration
//!
//! Holds the index endpoint and the settings applied to the shared
//! HTTP session.

use std::time::Duration;

use tracing::warn;
use url::Url;

use crate::{Error, Result};

/// The v1 API root of the public cookbook index
pub const V1_API_URL: &str = "https://cookbooks.opscode.com/api/v1/";

/// Connect and read timeout applied to every request
pub const DEFAULT_TIMEOUT: Duration = Duration::from_millis(30_000);

/// Environment variable overriding the index base URL
pub const BASE_URL_ENV: &str = "COOKBOOK_INDEX_URL";

/// Environment variable overriding the request timeout, in seconds
pub const TIMEOUT_ENV: &str = "COOKBOOK_INDEX_TIMEOUT_SECS";

/// Settings for a [`CookbookClient`](crate::CookbookClient)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Root of the index API; lookups go to `<base_url>/cookbooks/<name>`
    pub base_url: Url,

    /// Connect and read timeout
    pub timeout: Duration,

    /// User-Agent header sent with every request
    pub user_agent: String,
}

impl ClientConfig {
    /// Public v1 index, 30 second timeout
    pub fn new() -> Result<Self> {
        Ok(Self {
            base_url: parse_base_url(V1_API_URL)?,
            timeout: DEFAULT_TIMEOUT,
            user_agent: format!("cookbook-index/{}", env!("CARGO_PKG_VERSION")),
        })
    }

    /// Defaults, overridden by `COOKBOOK_INDEX_URL` and
    /// `COOKBOOK_INDEX_TIMEOUT_SECS` when they hold valid values
    pub fn from_env() -> Result<Self> {
        let mut config = Self::new()?;

        if let Ok(raw) = std::env::var(BASE_URL_ENV) {
            match parse_base_url(&raw) {
                Ok(url) => config.base_url = url,
                Err(e) => warn!("Ignoring {}: {}", BASE_URL_ENV, e),
            }
        }

        if let Ok(raw) = std::env::var(TIMEOUT_ENV) {
            match raw.trim().parse::<u64>() {
                Ok(secs) if secs > 0 => config.timeout = Duration::from_secs(secs),
                _ => warn!("Ignoring {}: not a positive number of seconds: {:?}", TIMEOUT_ENV, raw),
            }
        }

        Ok(config)
    }

    /// Point the client at a different index deployment
    pub fn with_base_url(mut self, base_url: &str) -> Result<Self> {
        self.base_url = parse_base_url(base_url)?;
        Ok(self)
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// URL of the lookup resource for a cookbook
    ///
    /// The name is pushed as a single path segment, so characters that
    /// are not valid in a segment are percent-encoded.
    pub fn cookbook_url(&self, name: &str) -> Result<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| Error::InvalidBaseUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .push("cookbooks")
            .push(name);
        Ok(url)
    }
}

/// Parse a base URL, rejecting URLs that cannot carry path segments
fn parse_base_url(raw: &str) -> Result<Url> {
    let url = Url::parse(raw.trim()).map_err(|e| Error::InvalidBaseUrl(format!("{}: {}", raw, e)))?;
    if url.cannot_be_a_base() {
        return Err(Error::InvalidBaseUrl(raw.to_string()));
    }
    Ok(url)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ClientConfig::new().unwrap();
        assert_eq!(config.base_url.as_str(), V1_API_URL);
        assert_eq!(config.timeout, Duration::from_secs(30));
        assert!(config.user_agent.starts_with("cookbook-index/"));
    }

    #[test]
    fn test_cookbook_url_with_trailing_slash() {
        let config = ClientConfig::new().unwrap();
        let url = config.cookbook_url("apache").unwrap();
        assert_eq!(
            url.as_str(),
            "https://cookbooks.opscode.com/api/v1/cookbooks/apache"
        );
    }

    #[test]
    fn test_cookbook_url_without_trailing_slash() {
        let config = ClientConfig::new().unwrap()
            .with_base_url("http://localhost:8080/api/v1")
            .unwrap();
        let url = config.cookbook_url("flume_agent").unwrap();
        assert_eq!(url.as_str(), "http://localhost:8080/api/v1/cookbooks/flume_agent");
    }

    #[test]
    fn test_cookbook_url_encodes_name() {
        let config = ClientConfig::new().unwrap();
        let url = config.cookbook_url("a/b c").unwrap();
        assert!(url.as_str().ends_with("/cookbooks/a%2Fb%20c"));
    }

    #[test]
    fn test_invalid_base_url() {
        assert!(matches!(
            ClientConfig::new().unwrap().with_base_url("not a url"),
            Err(Error::InvalidBaseUrl(_))
        ));
        assert!(matches!(
            ClientConfig::new().unwrap().with_base_url("mailto:someone@example.com"),
            Err(Error::InvalidBaseUrl(_))
        ));
    }

    #[test]
    fn test_builders() {
        let config = ClientConfig::new().unwrap()
            .with_timeout(Duration::from_secs(5))
            .with_user_agent("test-agent");
        assert_eq!(config.timeout, Duration::from_secs(5));
        assert_eq!(config.user_agent, "test-agent");
    }
}
