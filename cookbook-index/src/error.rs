use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Unexpected response from cookbook server: {status} ({url})")]
    UnexpectedStatus { url: String, status: u16 },

    #[error("Failed to parse JSON of response: {body}")]
    MalformedErrorBody {
        body: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid request ({code}); response was: {body}")]
    InvalidRequest { code: String, body: String },

    #[error("Failed to decode response from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Latest version of cookbook {cookbook} ({locator}) is not among its listed versions")]
    LatestVersionUnresolved { cookbook: String, locator: String },

    #[error("Invalid base URL: {0}")]
    InvalidBaseUrl(String),
}

pub type Result<T> = std::result::Result<T, Error>;
