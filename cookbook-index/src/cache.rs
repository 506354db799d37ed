//! Memoizing version cache
//!
//! Each version id owns a slot guarded by its own mutex. The first caller
//! to reach an empty slot resolves it while holding the slot lock, so
//! concurrent callers for the same id wait and then share its result.
//! Different ids resolve independently.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, TryLockError};

use crate::{Result, Version};

type Slot = Arc<Mutex<Option<Arc<Version>>>>;

/// Single-flight cache of resolved versions, keyed by canonical version
#[derive(Debug, Default)]
pub struct VersionCache {
    slots: Mutex<HashMap<String, Slot>>,
}

impl VersionCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cached version, without resolving
    ///
    /// Never waits: a slot that is being resolved reads as empty.
    pub fn get(&self, id: &str) -> Option<Arc<Version>> {
        let slot = self.slots().get(id).cloned()?;
        peek(&slot)
    }

    /// Cached version, or the result of `resolve` stored under `id`
    ///
    /// `resolve` runs at most once per id unless it fails; a failure is
    /// returned to the caller that ran it and leaves the slot empty, so
    /// a later call may try again.
    pub fn get_or_try_insert_with<F>(&self, id: &str, resolve: F) -> Result<Arc<Version>>
    where
        F: FnOnce() -> Result<Version>,
    {
        let slot = {
            let mut slots = self.slots();
            Arc::clone(slots.entry(id.to_string()).or_default())
        };

        let mut resolved = lock(&slot);
        if let Some(version) = resolved.as_ref() {
            return Ok(Arc::clone(version));
        }

        let version = Arc::new(resolve()?);
        *resolved = Some(Arc::clone(&version));
        Ok(version)
    }

    /// Number of resolved versions
    pub fn len(&self) -> usize {
        let slots: Vec<Slot> = self.slots().values().cloned().collect();
        slots.iter().filter(|slot| peek(slot).is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn slots(&self) -> MutexGuard<'_, HashMap<String, Slot>> {
        lock(&self.slots)
    }
}

// A panic inside `resolve` poisons only its slot; the slot still holds
// `None`, which is a valid state to continue from.
fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Contents of a slot, or `None` while another caller is resolving it
fn peek(slot: &Slot) -> Option<Arc<Version>> {
    match slot.try_lock() {
        Ok(resolved) => resolved.clone(),
        Err(TryLockError::Poisoned(poisoned)) => poisoned.into_inner().clone(),
        Err(TryLockError::WouldBlock) => None,
    }
}
