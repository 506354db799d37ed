//! Resolved cookbook version

use std::fmt;

use serde::Deserialize;
use url::Url;

/// One version of a cookbook, as served by its version locator
///
/// Decoded from `{"file": <url>, "version": <string>}`; immutable once
/// resolved.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Version {
    version: String,

    #[serde(rename = "file")]
    file_location: Url,
}

impl Version {
    pub fn new(version: impl Into<String>, file_location: Url) -> Self {
        Self {
            version: version.into(),
            file_location,
        }
    }

    /// Version string, e.g. `1.0.0`
    pub fn version(&self) -> &str {
        &self.version
    }

    /// Location of the downloadable archive
    pub fn file_location(&self) -> &Url {
        &self.file_location
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.version, self.file_location)
    }
}
