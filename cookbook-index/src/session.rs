//! Shared HTTP session
//!
//! One blocking reqwest client per [`CookbookClient`](crate::CookbookClient),
//! cloned into every cookbook it produces so version lookups reuse the
//! same connection pool.

use reqwest::blocking::Client;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, CONTENT_TYPE};
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use url::Url;

use crate::{ClientConfig, Error, Result};

/// A status code and body read in full from the index
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    pub body: String,
}

/// JSON-negotiating HTTP session with fixed timeouts
#[derive(Debug, Clone)]
pub struct Session {
    client: Client,
}

impl Session {
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let client = Client::builder()
            .user_agent(config.user_agent.as_str())
            .default_headers(Self::build_headers())
            .connect_timeout(config.timeout)
            .timeout(config.timeout)
            .build()?;
        Ok(Self { client })
    }

    /// Headers for index requests
    fn build_headers() -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers
    }

    /// Issue a GET and read the whole body as text, whatever the status
    pub fn get(&self, url: &Url) -> Result<RawResponse> {
        let response = self.client.get(url.clone()).send()?;
        let status = response.status().as_u16();
        let body = response.text()?;
        Ok(RawResponse { status, body })
    }

    /// Issue a GET that must answer 200 with a JSON body of type `T`
    pub fn get_json<T: DeserializeOwned>(&self, url: &Url) -> Result<T> {
        let response = self.get(url)?;
        if response.status != StatusCode::OK.as_u16() {
            return Err(Error::UnexpectedStatus {
                url: url.to_string(),
                status: response.status,
            });
        }

        serde_json::from_str(&response.body).map_err(|source| Error::Decode {
            url: url.to_string(),
            source,
        })
    }
}
