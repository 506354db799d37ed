//! Cookbook index client
//!
//! Looks a cookbook up by name and sorts the answer into found, not
//! found, or failure. The index signals an unknown cookbook with a 404
//! carrying a JSON error envelope, not the 400 its documentation
//! describes, and it does not label that body as JSON, so the body is
//! read as text and parsed by hand.

use reqwest::StatusCode;
use tracing::{debug, info};

use crate::payload::{CookbookPayload, ErrorEnvelope};
use crate::session::{RawResponse, Session};
use crate::{ClientConfig, Cookbook, Error, Result};

/// Client for the cookbook index
///
/// Owns one HTTP session, shared with every [`Cookbook`] it returns.
/// The session is released by [`close`](Self::close) or on drop.
#[derive(Debug)]
pub struct CookbookClient {
    config: ClientConfig,
    session: Session,
}

impl CookbookClient {
    /// Client for the public index's v1 API
    pub fn new() -> Result<Self> {
        Self::with_config(ClientConfig::new()?)
    }

    /// Client for an alternate index deployment
    pub fn with_base_url(base_url: &str) -> Result<Self> {
        Self::with_config(ClientConfig::new()?.with_base_url(base_url)?)
    }

    pub fn with_config(config: ClientConfig) -> Result<Self> {
        let session = Session::new(&config)?;
        debug!("Cookbook client targeting {}", config.base_url);
        Ok(Self { config, session })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Look up a cookbook by name
    ///
    /// Returns `Ok(None)` when the index does not know the cookbook.
    /// One request per call, with no retries and no caching across calls.
    pub fn get_cookbook(&self, name: &str) -> Result<Option<Cookbook>> {
        let url = self.config.cookbook_url(name)?;
        debug!("Looking up cookbook {} at {}", name, url);

        let response = self.session.get(&url)?;
        let payload = match classify(&url, response)? {
            Some(payload) => payload,
            None => {
                debug!("Cookbook {} not found", name);
                return Ok(None);
            }
        };

        let cookbook = Cookbook::from_payload(payload, self.session.clone());
        info!(
            "Found cookbook {} with {} versions",
            cookbook.name(),
            cookbook.versions().len()
        );
        Ok(Some(cookbook))
    }

    /// Release the HTTP session
    ///
    /// Cookbooks obtained from this client keep their own handle on the
    /// session until they are dropped.
    pub fn close(self) {
        debug!("Closing cookbook client for {}", self.config.base_url);
        drop(self.session);
    }
}

/// Sort a lookup response into a payload, not-found, or an error
pub fn classify(url: &url::Url, response: RawResponse) -> Result<Option<CookbookPayload>> {
    let RawResponse { status, body } = response;

    match StatusCode::from_u16(status) {
        Ok(StatusCode::OK) => serde_json::from_str(&body)
            .map(Some)
            .map_err(|source| Error::Decode {
                url: url.to_string(),
                source,
            }),
        Ok(StatusCode::NOT_FOUND) => {
            let envelope: ErrorEnvelope = match serde_json::from_str(&body) {
                Ok(envelope) => envelope,
                Err(source) => return Err(Error::MalformedErrorBody { body, source }),
            };
            if envelope.is_not_found() {
                Ok(None)
            } else {
                Err(Error::InvalidRequest {
                    code: envelope.error_code,
                    body,
                })
            }
        }
        _ => Err(Error::UnexpectedStatus {
            url: url.to_string(),
            status,
        }),
    }
}
