//! Scripted deployment steps
//!
//! A run walks [`DeployStep::SEQUENCE`] in order. Each step waits its
//! configured delay, appends its log lines, then asks the target to apply it.

use crate::selection::DeployRequest;
use menudeck_model::Environment;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Named stage of a deployment run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeployStep {
    /// Check the change snapshot
    Validate,
    /// Assemble the deployment package
    Package,
    /// Push to the target stores
    Distribute,
    /// Apply store configuration
    Configure,
}

impl DeployStep {
    /// Execution order
    pub const SEQUENCE: [DeployStep; 4] = [
        DeployStep::Validate,
        DeployStep::Package,
        DeployStep::Distribute,
        DeployStep::Configure,
    ];

    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            DeployStep::Validate => "validate",
            DeployStep::Package => "package",
            DeployStep::Distribute => "distribute",
            DeployStep::Configure => "configure",
        }
    }

    /// Wait before this step starts
    #[must_use]
    pub fn delay(&self, delays: &StepDelays) -> Duration {
        let ms = match self {
            DeployStep::Validate => 0,
            DeployStep::Package => delays.package_ms,
            DeployStep::Distribute => delays.distribute_ms,
            DeployStep::Configure => delays.configure_ms,
        };
        Duration::from_millis(ms)
    }

    /// Log lines appended when the step starts
    #[must_use]
    pub fn log_lines(&self, request: &DeployRequest, changes_count: usize) -> Vec<String> {
        match self {
            DeployStep::Validate => vec![
                "Validating changes...".to_string(),
                format!("Deploying {changes_count} changes..."),
            ],
            DeployStep::Package => vec!["Building deployment package...".to_string()],
            DeployStep::Distribute => vec![match request.environment {
                Environment::Sandbox => {
                    format!("Deploying to {} store(s)...", request.store_count())
                }
                Environment::Production => "Deploying to all production stores...".to_string(),
            }],
            DeployStep::Configure => vec!["Updating configurations...".to_string()],
        }
    }
}

impl std::fmt::Display for DeployStep {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Fixed waits between steps, in milliseconds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StepDelays {
    pub package_ms: u64,
    pub distribute_ms: u64,
    pub configure_ms: u64,
}

impl StepDelays {
    /// No waiting at all
    #[inline]
    #[must_use]
    pub fn none() -> Self {
        Self {
            package_ms: 0,
            distribute_ms: 0,
            configure_ms: 0,
        }
    }

    #[must_use]
    pub fn total(&self) -> Duration {
        Duration::from_millis(self.package_ms + self.distribute_ms + self.configure_ms)
    }
}

impl Default for StepDelays {
    fn default() -> Self {
        Self {
            package_ms: 1000,
            distribute_ms: 800,
            configure_ms: 700,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use menudeck_model::StoreId;

    #[test]
    fn default_delays_total() {
        assert_eq!(StepDelays::default().total(), Duration::from_millis(2500));
        assert_eq!(DeployStep::Validate.delay(&StepDelays::default()), Duration::ZERO);
    }

    #[test]
    fn distribute_line_depends_on_target() {
        let sandbox = DeployRequest::sandbox(vec![StoreId::from("store-1"), StoreId::from("store-3")]);
        assert_eq!(
            DeployStep::Distribute.log_lines(&sandbox, 4),
            vec!["Deploying to 2 store(s)...".to_string()]
        );

        let production = DeployRequest::production();
        assert_eq!(
            DeployStep::Distribute.log_lines(&production, 4),
            vec!["Deploying to all production stores...".to_string()]
        );
    }

    #[test]
    fn validate_lines_mention_count() {
        let lines = DeployStep::Validate.log_lines(&DeployRequest::production(), 3);
        assert_eq!(lines, vec!["Validating changes...", "Deploying 3 changes..."]);
    }
}
