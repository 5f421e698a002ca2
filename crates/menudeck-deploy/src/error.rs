//! Error types for the deployment engine
//!
//! Covers:
//! - Selection validation (no environment, no sandbox stores)
//! - Runner guards (nothing to deploy, run already in flight)
//! - History lookups and illegal status transitions
//! - Step failures reported by a deployment target

use crate::plan::DeployStep;
use menudeck_model::{DeploymentId, DeploymentStatus};

/// Main deployment error type
#[derive(Debug, thiserror::Error)]
pub enum DeployError {
    /// No environment chosen
    #[error("no deployment environment selected")]
    NoEnvironment,

    /// Sandbox deployment without any store
    #[error("no target stores selected for sandbox deployment")]
    NoTargetStores,

    /// Sandbox store not known to the store directory
    #[error("unknown target store: {0}")]
    UnknownStore(String),

    /// Pending change queue is empty
    #[error("no pending changes to deploy")]
    NoPendingChanges,

    /// Another run holds the in-flight guard
    #[error("a deployment is already in progress")]
    AlreadyDeploying,

    /// History has no record with this id
    #[error("deployment not found: {0}")]
    DeploymentNotFound(DeploymentId),

    /// Status change not allowed by the lifecycle
    #[error("illegal status transition: {from} -> {to}")]
    IllegalTransition {
        from: DeploymentStatus,
        to: DeploymentStatus,
    },

    /// Target rejected a step; the record is marked failed
    #[error("deployment {deployment} failed: {source}")]
    StepFailed {
        deployment: DeploymentId,
        #[source]
        source: TargetError,
    },
}

impl DeployError {
    /// Whether the error is an operator input problem (no state was touched)
    #[inline]
    #[must_use]
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::NoEnvironment | Self::NoTargetStores | Self::UnknownStore(_) | Self::NoPendingChanges
        )
    }

    /// Check if the same request may succeed later
    #[inline]
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::AlreadyDeploying | Self::StepFailed { .. })
    }

    /// Short notification title for operators
    #[must_use]
    pub fn title(&self) -> &'static str {
        match self {
            Self::NoEnvironment => "Select Environment",
            Self::NoTargetStores | Self::UnknownStore(_) => "Select Stores",
            Self::NoPendingChanges => "No Changes",
            Self::AlreadyDeploying => "Deployment In Progress",
            Self::StepFailed { .. } => "Deployment Failed",
            Self::DeploymentNotFound(_) | Self::IllegalTransition { .. } => "Deployment Error",
        }
    }

    /// Notification body for operators
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::NoEnvironment => {
                "Please select either Pre-production or Production to deploy.".to_string()
            }
            Self::NoTargetStores => {
                "Please select at least one store for Pre-production deployment.".to_string()
            }
            Self::UnknownStore(id) => format!("Store {id} is not available for deployment."),
            Self::NoPendingChanges => "There are no pending changes to deploy.".to_string(),
            Self::AlreadyDeploying => "Wait for the current deployment to finish.".to_string(),
            other => other.to_string(),
        }
    }
}

/// Failure reported by a deployment target while applying a step
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{step} step failed: {reason}")]
pub struct TargetError {
    pub step: DeployStep,
    pub reason: String,
}

impl TargetError {
    #[inline]
    pub fn new(step: DeployStep, reason: impl Into<String>) -> Self {
        Self {
            step,
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_errors_carry_operator_copy() {
        let err = DeployError::NoEnvironment;
        assert!(err.is_validation());
        assert_eq!(err.title(), "Select Environment");
        assert_eq!(
            err.user_message(),
            "Please select either Pre-production or Production to deploy."
        );

        let err = DeployError::NoTargetStores;
        assert_eq!(err.title(), "Select Stores");
        assert!(err.user_message().contains("at least one store"));
    }

    #[test]
    fn step_failure_is_retryable() {
        let err = DeployError::StepFailed {
            deployment: DeploymentId::new(),
            source: TargetError::new(DeployStep::Distribute, "store unreachable"),
        };
        assert!(err.is_retryable());
        assert!(!err.is_validation());
        assert!(err.to_string().contains("distribute step failed"));
    }

    #[test]
    fn transition_error_display() {
        let err = DeployError::IllegalTransition {
            from: DeploymentStatus::Success,
            to: DeploymentStatus::InProgress,
        };
        assert_eq!(err.to_string(), "illegal status transition: success -> in-progress");
    }
}
