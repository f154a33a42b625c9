// Approved-for-website ID persistence

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Review IDs curated for the public site.
pub type ApprovedIds = BTreeSet<u64>;

#[derive(Debug, Error)]
pub enum ApprovalError {
    #[error("Failed to read approvals from {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Approvals file {path} is not a JSON list of IDs: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to write approvals to {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to serialize approvals: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("Approval store lock poisoned")]
    Poisoned,
}

/// Storage for the approved-ID set. Mutations return the new number of
/// approved IDs. Concurrent writers may race; no store offers transactions.
pub trait ApprovalStore: Send + Sync {
    fn read_all(&self) -> Result<ApprovedIds, ApprovalError>;

    fn add(&self, id: u64) -> Result<usize, ApprovalError>;

    fn remove(&self, id: u64) -> Result<usize, ApprovalError>;

    /// Approve or unapprove every id in `ids`.
    fn bulk_set(&self, ids: &[u64], approved: bool) -> Result<usize, ApprovalError>;
}

fn apply(set: &mut ApprovedIds, ids: &[u64], approved: bool) {
    for id in ids {
        if approved {
            set.insert(*id);
        } else {
            set.remove(id);
        }
    }
}

/// JSON array of IDs on disk. A missing file reads as the bootstrap set.
pub struct FileApprovalStore {
    path: PathBuf,
    bootstrap: ApprovedIds,
}

impl FileApprovalStore {
    pub fn new(path: impl Into<PathBuf>, bootstrap: ApprovedIds) -> Self {
        Self {
            path: path.into(),
            bootstrap,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn write(&self, ids: &ApprovedIds) -> Result<(), ApprovalError> {
        let json = serde_json::to_string_pretty(&ids.iter().collect::<Vec<_>>())?;

        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(|source| ApprovalError::Write {
                path: parent.to_path_buf(),
                source,
            })?;
        }

        // Atomic write: temp file, then rename over the target
        let temp_path = self.path.with_extension("json.tmp");
        std::fs::write(&temp_path, json)
            .and_then(|_| std::fs::rename(&temp_path, &self.path))
            .map_err(|source| ApprovalError::Write {
                path: self.path.clone(),
                source,
            })?;

        debug!("Wrote {} approved IDs to {:?}", ids.len(), self.path);
        Ok(())
    }

    fn update(&self, ids: &[u64], approved: bool) -> Result<usize, ApprovalError> {
        let mut current = self.read_all()?;
        apply(&mut current, ids, approved);
        self.write(&current)?;
        info!(
            "{} {} review(s); {} approved in total",
            if approved { "Approved" } else { "Unapproved" },
            ids.len(),
            current.len()
        );
        Ok(current.len())
    }
}

impl ApprovalStore for FileApprovalStore {
    fn read_all(&self) -> Result<ApprovedIds, ApprovalError> {
        if !self.path.exists() {
            debug!("Approvals file {:?} does not exist, using bootstrap IDs", self.path);
            return Ok(self.bootstrap.clone());
        }

        let data = std::fs::read_to_string(&self.path).map_err(|source| ApprovalError::Read {
            path: self.path.clone(),
            source,
        })?;
        let ids: Vec<u64> = serde_json::from_str(&data).map_err(|source| ApprovalError::Parse {
            path: self.path.clone(),
            source,
        })?;

        Ok(ids.into_iter().collect())
    }

    fn add(&self, id: u64) -> Result<usize, ApprovalError> {
        self.update(&[id], true)
    }

    fn remove(&self, id: u64) -> Result<usize, ApprovalError> {
        self.update(&[id], false)
    }

    fn bulk_set(&self, ids: &[u64], approved: bool) -> Result<usize, ApprovalError> {
        self.update(ids, approved)
    }
}

/// Process-local store for tests and hosts without persistence.
#[derive(Debug, Default)]
pub struct InMemoryApprovalStore {
    ids: Mutex<ApprovedIds>,
}

impl InMemoryApprovalStore {
    pub fn new(initial: ApprovedIds) -> Self {
        Self {
            ids: Mutex::new(initial),
        }
    }
}

impl ApprovalStore for InMemoryApprovalStore {
    fn read_all(&self) -> Result<ApprovedIds, ApprovalError> {
        let ids = self.ids.lock().map_err(|_| ApprovalError::Poisoned)?;
        Ok(ids.clone())
    }

    fn add(&self, id: u64) -> Result<usize, ApprovalError> {
        self.bulk_set(&[id], true)
    }

    fn remove(&self, id: u64) -> Result<usize, ApprovalError> {
        self.bulk_set(&[id], false)
    }

    fn bulk_set(&self, ids: &[u64], approved: bool) -> Result<usize, ApprovalError> {
        let mut current = self.ids.lock().map_err(|_| ApprovalError::Poisoned)?;
        apply(&mut current, ids, approved);
        Ok(current.len())
    }
}

/// Where a snapshot's IDs came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SnapshotSource {
    Store,
    Defaults,
}

/// The approved-ID set for one normalization pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApprovalSnapshot {
    pub ids: ApprovedIds,
    pub source: SnapshotSource,
}

/// Read the store, substituting `defaults` if the read fails. Only reads
/// fall back; mutations report their errors.
pub fn snapshot_or_default(store: &dyn ApprovalStore, defaults: &ApprovedIds) -> ApprovalSnapshot {
    match store.read_all() {
        Ok(ids) => ApprovalSnapshot {
            ids,
            source: SnapshotSource::Store,
        },
        Err(e) => {
            warn!("Using default approved IDs: {}", e);
            ApprovalSnapshot {
                ids: defaults.clone(),
                source: SnapshotSource::Defaults,
            }
        }
    }
}
