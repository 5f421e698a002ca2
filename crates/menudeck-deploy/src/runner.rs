//! Deployment runner
//!
//! Drives one run through the scripted sequence:
//!
//! 1. Validate the selection (no state touched on failure)
//! 2. Take the single in-flight guard
//! 3. Snapshot pending changes into a `pending` record
//! 4. Walk [`DeployStep::SEQUENCE`], waiting each step's delay on the clock
//! 5. Mark `success`, record the duration, reset counters and the selection
//!
//! A step rejected by the target marks the record `failed` and leaves the
//! pending changes in place.

use crate::changelog::ChangeLog;
use crate::clock::{elapsed_ms, Clock};
use crate::counter::NewProductsCounter;
use crate::error::DeployError;
use crate::history::{DeploymentDraft, DeploymentHistory};
use crate::plan::{DeployStep, StepDelays};
use crate::selection::{DeployRequest, DeploySelection};
use crate::target::DeploymentTarget;
use menudeck_model::{ChangeLogEntry, DeploymentId, DeploymentRecord, DeploymentStatus, Environment};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::Instrument;

/// Runner settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunnerConfig {
    /// Operator recorded as `deployed_by`
    pub deployed_by: String,
    /// Waits between steps
    pub delays: StepDelays,
}

impl RunnerConfig {
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    #[must_use]
    pub fn with_deployed_by(mut self, operator: impl Into<String>) -> Self {
        self.deployed_by = operator.into();
        self
    }

    #[inline]
    #[must_use]
    pub fn with_delays(mut self, delays: StepDelays) -> Self {
        self.delays = delays;
        self
    }
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            deployed_by: "Admin User".to_string(),
            delays: StepDelays::default(),
        }
    }
}

/// Result of a successful run
#[derive(Debug, Clone)]
pub struct DeploymentOutcome {
    /// Final state of the history record
    pub record: DeploymentRecord,
    /// Operator-facing summary line
    pub summary: String,
}

/// Executes deployments against the shared deployment state
pub struct DeploymentRunner {
    changes: Arc<ChangeLog>,
    new_products: Arc<NewProductsCounter>,
    history: Arc<DeploymentHistory>,
    clock: Arc<dyn Clock>,
    target: Arc<dyn DeploymentTarget>,
    config: RunnerConfig,
    in_flight: tokio::sync::Mutex<()>,
}

impl std::fmt::Debug for DeploymentRunner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DeploymentRunner")
            .field("config", &self.config)
            .field("pending_changes", &self.changes.len())
            .field("history_len", &self.history.len())
            .finish_non_exhaustive()
    }
}

impl DeploymentRunner {
    #[must_use]
    pub fn new(
        changes: Arc<ChangeLog>,
        new_products: Arc<NewProductsCounter>,
        history: Arc<DeploymentHistory>,
        clock: Arc<dyn Clock>,
        target: Arc<dyn DeploymentTarget>,
        config: RunnerConfig,
    ) -> Self {
        Self {
            changes,
            new_products,
            history,
            clock,
            target,
            config,
            in_flight: tokio::sync::Mutex::new(()),
        }
    }

    /// Whether a run currently holds the in-flight guard
    #[must_use]
    pub fn is_deploying(&self) -> bool {
        self.in_flight.try_lock().is_err()
    }

    #[inline]
    #[must_use]
    pub fn config(&self) -> &RunnerConfig {
        &self.config
    }

    /// Deploy pending changes to the selected target
    ///
    /// On success the deployed changes are removed from the queue and the
    /// selection is cleared. A production run also resets the new-products
    /// counter.
    ///
    /// # Errors
    /// - Validation errors (`NoEnvironment`, `NoTargetStores`,
    ///   `NoPendingChanges`) before any state is touched
    /// - `DeployError::AlreadyDeploying` if another run is in flight
    /// - `DeployError::StepFailed` if the target rejects a step
    pub async fn deploy(&self, selection: &mut DeploySelection) -> Result<DeploymentOutcome, DeployError> {
        let request = match selection.validate() {
            Ok(request) => request,
            Err(e) => {
                tracing::warn!("deployment rejected: {}", e);
                return Err(e);
            }
        };

        let _guard = self
            .in_flight
            .try_lock()
            .map_err(|_| DeployError::AlreadyDeploying)?;

        let snapshot = self.changes.changes();
        if snapshot.is_empty() {
            tracing::warn!("deployment rejected: no pending changes");
            return Err(DeployError::NoPendingChanges);
        }

        let started = self.clock.now();
        let id = self.history.add_deployment(
            DeploymentDraft {
                environment: request.environment,
                changes: snapshot.clone(),
                target_stores: request.target_stores.clone(),
                deployed_by: self.config.deployed_by.clone(),
            },
            started,
        );

        let span = tracing::info_span!(
            "deployment",
            id = %id,
            environment = %request.environment,
            changes = snapshot.len()
        );

        let record = self
            .run_steps(id, &request, &snapshot, started)
            .instrument(span)
            .await?;

        if request.environment == Environment::Production {
            let cleared = self.new_products.reset();
            tracing::debug!("new products badge cleared ({} products)", cleared);
        }
        self.changes.clear_deployed(&snapshot);
        selection.clear();

        let summary = format!(
            "{} changes deployed to {} in {}.",
            record.changes_count,
            request.target_description(),
            request.environment
        );
        tracing::info!("{}", summary);

        Ok(DeploymentOutcome { record, summary })
    }

    async fn run_steps(
        &self,
        id: DeploymentId,
        request: &DeployRequest,
        snapshot: &[ChangeLogEntry],
        started: chrono::DateTime<chrono::Utc>,
    ) -> Result<DeploymentRecord, DeployError> {
        tracing::info!("deployment started by {}", self.config.deployed_by);

        for step in DeployStep::SEQUENCE {
            let delay = step.delay(&self.config.delays);
            if !delay.is_zero() {
                self.clock.sleep(delay).await;
            }

            self.history.update_status(
                id,
                DeploymentStatus::InProgress,
                step.log_lines(request, snapshot.len()),
                None,
            )?;
            tracing::debug!(step = %step, "step started");

            if let Err(source) = self.target.apply(step, request).await {
                tracing::error!(step = %step, "deployment failed: {}", source);
                let duration = elapsed_ms(started, self.clock.now());
                self.history.update_status(
                    id,
                    DeploymentStatus::Failed,
                    vec![format!("Deployment failed: {}", source.reason)],
                    Some(duration),
                )?;
                return Err(DeployError::StepFailed {
                    deployment: id,
                    source,
                });
            }
        }

        let duration = elapsed_ms(started, self.clock.now());
        self.history.update_status(
            id,
            DeploymentStatus::Success,
            vec![
                "Deployment completed successfully!".to_string(),
                format!("Total duration: {}", format_secs(duration)),
            ],
            Some(duration),
        )?;

        self.history.get(id).ok_or(DeployError::DeploymentNotFound(id))
    }
}

/// `2500` -> `2.50s`
fn format_secs(ms: u64) -> String {
    format!("{}.{:02}s", ms / 1000, (ms % 1000) / 10)
}
