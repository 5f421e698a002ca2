//! Deployment records
//!
//! A record is created `pending` when a publish starts, walks through
//! `in-progress`, and ends `success` or `failed`. Records are kept for
//! the lifetime of the process and never removed.

use crate::change::ChangeLogEntry;
use crate::error::ParseEnumError;
use crate::ids::{DeploymentId, StoreId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Publish target
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    /// Pre-production, limited to an explicit store subset
    Sandbox,
    /// Every production store
    Production,
}

impl Environment {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Environment::Sandbox => "sandbox",
            Environment::Production => "production",
        }
    }

    /// Name shown to operators
    #[must_use]
    pub fn display_name(&self) -> &'static str {
        match self {
            Environment::Sandbox => "Pre-production",
            Environment::Production => "Production",
        }
    }

    /// Whether the target requires explicit store selection
    #[inline]
    #[must_use]
    pub fn requires_store_selection(&self) -> bool {
        matches!(self, Environment::Sandbox)
    }
}

impl FromStr for Environment {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sandbox" | "pre-production" | "preprod" => Ok(Environment::Sandbox),
            "production" | "prod" => Ok(Environment::Production),
            _ => Err(ParseEnumError::new("environment", s)),
        }
    }
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Deployment lifecycle state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DeploymentStatus {
    Pending,
    InProgress,
    Success,
    Failed,
}

impl DeploymentStatus {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            DeploymentStatus::Pending => "pending",
            DeploymentStatus::InProgress => "in-progress",
            DeploymentStatus::Success => "success",
            DeploymentStatus::Failed => "failed",
        }
    }

    #[inline]
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        matches!(self, DeploymentStatus::Success | DeploymentStatus::Failed)
    }
}

impl std::fmt::Display for DeploymentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// History entry for one deployment run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeploymentRecord {
    pub id: DeploymentId,
    pub environment: Environment,
    pub status: DeploymentStatus,
    pub timestamp: DateTime<Utc>,
    pub changes_count: usize,
    /// Copy of the pending change list at submission time
    pub changes: Vec<ChangeLogEntry>,
    /// Only set for sandbox deployments
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_stores: Option<Vec<StoreId>>,
    /// Wall-clock duration in milliseconds, set on completion
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration_ms: Option<u64>,
    pub deployed_by: String,
    pub logs: Vec<String>,
}

impl DeploymentRecord {
    /// Human-readable target, e.g. `3 store(s)` or `all production stores`
    #[must_use]
    pub fn target_description(&self) -> String {
        match (&self.environment, &self.target_stores) {
            (Environment::Sandbox, Some(stores)) => format!("{} store(s)", stores.len()),
            (Environment::Sandbox, None) => "0 store(s)".to_string(),
            (Environment::Production, _) => "all production stores".to_string(),
        }
    }

    /// Duration in seconds, if the run finished
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn duration_secs(&self) -> Option<f64> {
        self.duration_ms.map(|ms| ms as f64 / 1000.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_wire_name_is_kebab() {
        let json = serde_json::to_string(&DeploymentStatus::InProgress).unwrap();
        assert_eq!(json, "\"in-progress\"");
        assert!(!DeploymentStatus::InProgress.is_terminal());
        assert!(DeploymentStatus::Failed.is_terminal());
    }

    #[test]
    fn environment_parsing_accepts_aliases() {
        assert_eq!("prod".parse::<Environment>().unwrap(), Environment::Production);
        assert_eq!("Pre-production".parse::<Environment>().unwrap(), Environment::Sandbox);
        let err = "staging".parse::<Environment>().unwrap_err();
        assert!(err.to_string().contains("environment"));
    }

    #[test]
    fn target_description() {
        let mut record = DeploymentRecord {
            id: DeploymentId::new(),
            environment: Environment::Sandbox,
            status: DeploymentStatus::Pending,
            timestamp: Utc::now(),
            changes_count: 0,
            changes: Vec::new(),
            target_stores: Some(vec![StoreId::from("store-1"), StoreId::from("store-2")]),
            duration_ms: None,
            deployed_by: "Admin User".to_string(),
            logs: Vec::new(),
        };
        assert_eq!(record.target_description(), "2 store(s)");

        record.environment = Environment::Production;
        record.target_stores = None;
        assert_eq!(record.target_description(), "all production stores");
    }
}
