//! Where deployment steps are applied
//!
//! The console has no real store backend; [`SimulatedTarget`] accepts every
//! step. A real integration implements [`DeploymentTarget`] and may fail a
//! step, which marks the run `failed`.

use crate::error::TargetError;
use crate::plan::DeployStep;
use crate::selection::DeployRequest;
use async_trait::async_trait;

/// Receiver of deployment steps
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DeploymentTarget: Send + Sync {
    /// Apply one step of a run
    ///
    /// # Errors
    /// Returns `TargetError` when the step cannot be applied
    async fn apply(&self, step: DeployStep, request: &DeployRequest) -> Result<(), TargetError>;
}

/// Target that accepts every step
#[derive(Debug, Clone, Copy, Default)]
pub struct SimulatedTarget;

#[async_trait]
impl DeploymentTarget for SimulatedTarget {
    async fn apply(&self, step: DeployStep, request: &DeployRequest) -> Result<(), TargetError> {
        tracing::debug!(
            step = %step,
            environment = %request.environment,
            "simulated step applied to {}",
            request.target_description()
        );
        Ok(())
    }
}
