// Holds the currently published dataset snapshot.
//
// Snapshots are never mutated. A reload builds a complete replacement outside
// the lock and then swaps the `Arc`, so a reader holding the previous snapshot
// keeps a consistent view until it drops it.
use std::path::Path;
use std::sync::Arc;
use tokio::sync::RwLock;

use super::dataset::{DatasetSnapshot, LoadOptions, SourceFingerprint};
use crate::error::EngineError;

#[derive(Default)]
pub struct SnapshotStore {
    current: Option<Arc<DatasetSnapshot>>,
    fingerprint: Option<SourceFingerprint>,
}

impl SnapshotStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> Option<Arc<DatasetSnapshot>> {
        self.current.clone()
    }

    pub fn fingerprint(&self) -> Option<&SourceFingerprint> {
        self.fingerprint.as_ref()
    }

    /// True when the published snapshot was built from exactly this file state.
    pub fn is_fresh(&self, fingerprint: &SourceFingerprint) -> bool {
        self.current.is_some() && self.fingerprint.as_ref() == Some(fingerprint)
    }

    pub fn publish(&mut self, snapshot: DatasetSnapshot, fingerprint: SourceFingerprint) -> Arc<DatasetSnapshot> {
        let snapshot = Arc::new(snapshot);
        self.current = Some(Arc::clone(&snapshot));
        self.fingerprint = Some(fingerprint);
        snapshot
    }
}

/// Outcome of [`refresh`]: the snapshot now published and whether it was rebuilt.
pub struct Refreshed {
    pub snapshot: Arc<DatasetSnapshot>,
    pub rebuilt: bool,
}

/// Makes sure the store holds a snapshot of `path` in its current on-disk state.
///
/// Rebuilds only when the file's fingerprint changed (or `force` is set). A
/// failed rebuild leaves the previously published snapshot untouched.
pub async fn refresh(
    store: &RwLock<SnapshotStore>,
    path: &Path,
    options: &LoadOptions,
    force: bool,
) -> Result<Refreshed, EngineError> {
    let fingerprint = SourceFingerprint::of(path)?;

    if !force {
        let guard = store.read().await;
        if guard.is_fresh(&fingerprint) {
            if let Some(snapshot) = guard.current() {
                tracing::debug!(source = %path.display(), "Dataset snapshot is fresh, skipping rebuild");
                return Ok(Refreshed { snapshot, rebuilt: false });
            }
        }
    }

    let snapshot = DatasetSnapshot::load(path, options).map_err(|e| {
        tracing::error!(source = %path.display(), error = %e, "Dataset load failed; keeping previous snapshot");
        e
    })?;

    let mut guard = store.write().await;
    let snapshot = guard.publish(snapshot, fingerprint);
    tracing::info!(source = %path.display(), "Published new dataset snapshot");
    Ok(Refreshed { snapshot, rebuilt: true })
}
