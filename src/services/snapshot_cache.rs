//! Caller-side memo for the dashboard view.
//!
//! Keeps the most recent `(fingerprint, view)` pair. The fingerprint is the
//! SHA-256 of the snapshot's JSON, so any change to any collection misses.

use std::sync::{Mutex, PoisonError};

use sha2::{Digest, Sha256};

use super::dashboard::{self, DashboardSnapshot, DashboardView};
use crate::errors::AppError;

#[derive(Debug, Default)]
pub struct SnapshotCache {
    last: Mutex<Option<(String, DashboardView)>>,
}

impl SnapshotCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the cached view for an unchanged snapshot, otherwise assemble and store.
    pub fn get_or_assemble(&self, snapshot: &DashboardSnapshot) -> Result<DashboardView, AppError> {
        let key = fingerprint(snapshot)?;

        if let Some((cached_key, view)) = self.lock().as_ref() {
            if *cached_key == key {
                tracing::debug!(fingerprint = %key, "Dashboard cache hit");
                return Ok(view.clone());
            }
        }

        let view = dashboard::assemble(snapshot);
        tracing::debug!(fingerprint = %key, "Dashboard cache miss, reassembled");
        *self.lock() = Some((key, view.clone()));
        Ok(view)
    }

    // A panic while holding the lock leaves at worst a stale entry.
    fn lock(&self) -> std::sync::MutexGuard<'_, Option<(String, DashboardView)>> {
        self.last.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Hex SHA-256 over the snapshot's canonical JSON.
pub fn fingerprint(snapshot: &DashboardSnapshot) -> Result<String, AppError> {
    let bytes = serde_json::to_vec(snapshot)?;
    let mut hasher = Sha256::new();
    hasher.update(&bytes);
    Ok(hex::encode(hasher.finalize()))
}
