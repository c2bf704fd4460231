//! Single-writer, many-reader holder for a feed's latest snapshot
//!
//! The owning scheduled feed builds a complete [`Snapshot`] and installs it
//! with [`SnapshotStore::publish`]; readers get a shared handle to whichever
//! snapshot was installed last. The lock only guards the pointer swap, so a
//! reader never observes fields from two different snapshots.

use crate::status::Snapshot;
use std::sync::{Arc, RwLock};

#[derive(Debug, Default)]
pub struct SnapshotStore {
    current: RwLock<Option<Arc<Snapshot>>>,
}

impl SnapshotStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the stored snapshot
    pub fn publish(&self, snapshot: Snapshot) {
        let snapshot = Arc::new(snapshot);
        let mut current = self.current.write().unwrap_or_else(|e| e.into_inner());
        *current = Some(snapshot);
    }

    /// Returns the most recently published snapshot, or `None` before the
    /// first successful cycle
    pub fn read(&self) -> Option<Arc<Snapshot>> {
        self.current
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }
}
