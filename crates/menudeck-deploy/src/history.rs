//! Deployment history
//!
//! Records are kept newest first and only ever mutated through
//! [`DeploymentHistory::update_status`], which enforces the lifecycle.

use crate::error::DeployError;
use crate::state_machine::validate_transition;
use chrono::{DateTime, Utc};
use menudeck_model::{ChangeLogEntry, DeploymentId, DeploymentRecord, DeploymentStatus, Environment, StoreId};
use parking_lot::RwLock;

/// First log line of every run
pub const INITIATED_LOG: &str = "Deployment initiated...";

/// Fields supplied when a run starts
#[derive(Debug, Clone)]
pub struct DeploymentDraft {
    pub environment: Environment,
    pub changes: Vec<ChangeLogEntry>,
    pub target_stores: Option<Vec<StoreId>>,
    pub deployed_by: String,
}

/// All deployment runs of this process
#[derive(Debug, Default)]
pub struct DeploymentHistory {
    records: RwLock<Vec<DeploymentRecord>>,
}

impl DeploymentHistory {
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a `pending` record at the front and return its id
    pub fn add_deployment(&self, draft: DeploymentDraft, timestamp: DateTime<Utc>) -> DeploymentId {
        let record = DeploymentRecord {
            id: DeploymentId::new(),
            environment: draft.environment,
            status: DeploymentStatus::Pending,
            timestamp,
            changes_count: draft.changes.len(),
            changes: draft.changes,
            target_stores: draft.target_stores,
            duration_ms: None,
            deployed_by: draft.deployed_by,
            logs: vec![INITIATED_LOG.to_string()],
        };
        let id = record.id;
        self.records.write().insert(0, record);
        id
    }

    /// Move a record to `status`, appending `logs` and optionally setting the duration
    ///
    /// # Errors
    /// - `DeployError::DeploymentNotFound` for an unknown id
    /// - `DeployError::IllegalTransition` if the lifecycle forbids the change
    pub fn update_status(
        &self,
        id: DeploymentId,
        status: DeploymentStatus,
        logs: Vec<String>,
        duration_ms: Option<u64>,
    ) -> Result<(), DeployError> {
        let mut records = self.records.write();
        let record = records
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or(DeployError::DeploymentNotFound(id))?;

        validate_transition(record.status, status)?;

        record.status = status;
        record.logs.extend(logs);
        if duration_ms.is_some() {
            record.duration_ms = duration_ms;
        }
        Ok(())
    }

    #[must_use]
    pub fn get(&self, id: DeploymentId) -> Option<DeploymentRecord> {
        self.records.read().iter().find(|r| r.id == id).cloned()
    }

    /// Most recent run
    #[must_use]
    pub fn latest(&self) -> Option<DeploymentRecord> {
        self.records.read().first().cloned()
    }

    /// Every run, newest first
    #[must_use]
    pub fn records(&self) -> Vec<DeploymentRecord> {
        self.records.read().clone()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.read().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.read().is_empty()
    }
}
