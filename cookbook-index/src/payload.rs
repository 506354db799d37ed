//! Wire types of the cookbook index API
//!
//! Unknown fields are ignored throughout; the index returns far more
//! than the client needs.

use serde::Deserialize;
use url::Url;

/// Error code the index uses for an unknown cookbook
pub const NOT_FOUND_CODE: &str = "NOT_FOUND";

/// Body of `GET <base>/cookbooks/<name>`
#[derive(Debug, Clone, Deserialize)]
pub struct CookbookPayload {
    pub name: String,

    /// Locator of the latest version's detail resource
    pub latest_version: Url,

    /// Locators of every version's detail resource
    #[serde(default)]
    pub versions: Vec<Url>,
}

/// Error envelope returned alongside a 404
#[derive(Debug, Clone, Deserialize)]
pub struct ErrorEnvelope {
    pub error_code: String,

    #[serde(default)]
    pub error_messages: Vec<String>,
}

impl ErrorEnvelope {
    pub fn is_not_found(&self) -> bool {
        self.error_code == NOT_FOUND_CODE
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_cookbook_payload() {
        let json = r#"{
            "name": "flume_agent",
            "maintainer": "someone",
            "latest_version": "http://x/1_0_0",
            "versions": ["http://x/1_0_0", "http://x/0_9_1"]
        }"#;

        let payload: CookbookPayload = serde_json::from_str(json).unwrap();
        assert_eq!(payload.name, "flume_agent");
        assert_eq!(payload.latest_version.as_str(), "http://x/1_0_0");
        assert_eq!(payload.versions.len(), 2);
    }

    #[test]
    fn test_parse_error_envelope() {
        let json = r#"{"error_code": "NOT_FOUND", "error_messages": ["Resource not found"]}"#;
        let envelope: ErrorEnvelope = serde_json::from_str(json).unwrap();
        assert!(envelope.is_not_found());
        assert_eq!(envelope.error_messages, vec!["Resource not found"]);
    }

    #[test]
    fn test_error_envelope_without_messages() {
        let envelope: ErrorEnvelope = serde_json::from_str(r#"{"error_code": "BAD_REQUEST"}"#).unwrap();
        assert!(!envelope.is_not_found());
        assert!(envelope.error_messages.is_empty());
    }
}
