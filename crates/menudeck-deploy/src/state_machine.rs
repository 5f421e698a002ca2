use crate::error::DeployError;
use menudeck_model::DeploymentStatus;

/// Validates a deployment status change.
///
/// `in-progress -> in-progress` is allowed so each step can append its
/// log lines through the same update call.
pub fn validate_transition(from: DeploymentStatus, to: DeploymentStatus) -> Result<(), DeployError> {
    if allowed(from, to) {
        Ok(())
    } else {
        Err(DeployError::IllegalTransition { from, to })
    }
}

#[must_use]
pub fn allowed_transitions(from: DeploymentStatus) -> Vec<DeploymentStatus> {
    use DeploymentStatus::{Failed, InProgress, Pending, Success};
    match from {
        Pending => vec![InProgress, Failed],
        InProgress => vec![InProgress, Success, Failed],
        Success | Failed => vec![],
    }
}

fn allowed(from: DeploymentStatus, to: DeploymentStatus) -> bool {
    allowed_transitions(from).into_iter().any(|s| s == to)
}
