//! Cookbook version resolver
//!
//! A [`Cookbook`] is built in one step from the index payload: every
//! version locator is normalized into its canonical version string up
//! front, and the latest locator is matched against them. Version
//! details are fetched lazily and memoized in a [`VersionCache`].

use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

use tracing::{debug, warn};
use url::Url;

use crate::cache::VersionCache;
use crate::locator::canonical_version;
use crate::payload::CookbookPayload;
use crate::session::Session;
use crate::{Error, Result, Version};

/// A cookbook known to the index
#[derive(Debug)]
pub struct Cookbook {
    name: String,
    latest_locator: Url,
    latest_version: Option<String>,
    locators: BTreeMap<String, Url>,
    resolved: VersionCache,
    session: Session,
}

impl Cookbook {
    /// Build a fully initialized cookbook from a decoded index payload
    pub fn from_payload(payload: CookbookPayload, session: Session) -> Self {
        let CookbookPayload {
            name,
            latest_version: latest_locator,
            versions,
        } = payload;

        let mut locators = BTreeMap::new();
        for locator in versions {
            let Some(id) = canonical_version(&locator) else {
                warn!("Skipping version locator of {} without a version segment: {}", name, locator);
                continue;
            };
            locators.insert(id, locator);
        }

        // The latest locator is normalized like every other one and must
        // name a listed version.
        let latest_version =
            canonical_version(&latest_locator).filter(|id| locators.contains_key(id));

        if latest_version.is_none() {
            warn!(
                "Latest version locator of {} is not among its {} listed versions: {}",
                name,
                locators.len(),
                latest_locator
            );
        }

        Self {
            name,
            latest_locator,
            latest_version,
            locators,
            resolved: VersionCache::new(),
            session,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Every canonical version listed by the index; no network access
    pub fn versions(&self) -> BTreeSet<&str> {
        self.locators.keys().map(String::as_str).collect()
    }

    /// Canonical id of the latest version, if its locator was listed
    pub fn latest_version_id(&self) -> Option<&str> {
        self.latest_version.as_deref()
    }

    /// Detail locator of a version
    pub fn locator(&self, id: &str) -> Option<&Url> {
        self.locators.get(id)
    }

    /// Whether a version has already been fetched
    pub fn is_resolved(&self, id: &str) -> bool {
        self.resolved.get(id).is_some()
    }

    /// Resolve a version by canonical id
    ///
    /// Returns `Ok(None)` without touching the network when the id is not
    /// listed. A listed version is fetched once; later calls, including
    /// concurrent ones, share the first result.
    pub fn version(&self, id: &str) -> Result<Option<Arc<Version>>> {
        if let Some(version) = self.resolved.get(id) {
            debug!("Version {} of {} served from cache", id, self.name);
            return Ok(Some(version));
        }

        let Some(locator) = self.locators.get(id) else {
            debug!("Version {} of {} is not listed", id, self.name);
            return Ok(None);
        };

        let version = self.resolved.get_or_try_insert_with(id, || {
            debug!("Resolving version {} of {} from {}", id, self.name, locator);
            self.session.get_json::<Version>(locator)
        })?;
        Ok(Some(version))
    }

    /// Resolve the latest version
    pub fn latest_version(&self) -> Result<Arc<Version>> {
        let unresolved = || Error::LatestVersionUnresolved {
            cookbook: self.name.clone(),
            locator: self.latest_locator.to_string(),
        };

        let id = self.latest_version.as_deref().ok_or_else(unresolved)?;
        self.version(id)?.ok_or_else(unresolved)
    }

    /// Resolve every listed version, in canonical order
    pub fn resolve_all(&self) -> Result<Vec<Arc<Version>>> {
        let mut resolved = Vec::with_capacity(self.locators.len());
        for id in self.locators.keys() {
            if let Some(version) = self.version(id)? {
                resolved.push(version);
            }
        }
        Ok(resolved)
    }
}
