//! Operator selection of a deployment target
//!
//! [`DeploySelection`] is the editable form state (environment radio plus
//! store checkboxes). [`DeploySelection::validate`] turns it into a
//! [`DeployRequest`] or rejects it without touching anything.

use crate::error::DeployError;
use menudeck_model::{Environment, StoreId};
use serde::{Deserialize, Serialize};

/// In-progress choice of environment and sandbox stores
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeploySelection {
    environment: Option<Environment>,
    stores: Vec<StoreId>,
}

impl DeploySelection {
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn select_environment(&mut self, environment: Environment) {
        self.environment = Some(environment);
    }

    #[inline]
    #[must_use]
    pub fn environment(&self) -> Option<Environment> {
        self.environment
    }

    #[inline]
    #[must_use]
    pub fn stores(&self) -> &[StoreId] {
        &self.stores
    }

    /// Add the store if absent, remove it if present
    pub fn toggle_store(&mut self, store: StoreId) {
        if let Some(idx) = self.stores.iter().position(|s| *s == store) {
            self.stores.remove(idx);
        } else {
            self.stores.push(store);
        }
    }

    /// Select every store in `available`, or clear if all are already selected
    pub fn toggle_all_stores(&mut self, available: &[StoreId]) {
        if self.stores.len() == available.len() && available.iter().all(|s| self.stores.contains(s)) {
            self.stores.clear();
        } else {
            self.stores = available.to_vec();
        }
    }

    /// Reset to nothing selected
    pub fn clear(&mut self) {
        self.environment = None;
        self.stores.clear();
    }

    /// Check preconditions and build a request
    ///
    /// # Errors
    /// - `DeployError::NoEnvironment` if no environment is chosen
    /// - `DeployError::NoTargetStores` for a sandbox with no store
    pub fn validate(&self) -> Result<DeployRequest, DeployError> {
        let environment = self.environment.ok_or(DeployError::NoEnvironment)?;
        match environment {
            Environment::Sandbox if self.stores.is_empty() => Err(DeployError::NoTargetStores),
            Environment::Sandbox => Ok(DeployRequest::sandbox(self.stores.clone())),
            Environment::Production => Ok(DeployRequest::production()),
        }
    }
}

/// Validated deployment target
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeployRequest {
    pub environment: Environment,
    /// Only set for sandbox
    pub target_stores: Option<Vec<StoreId>>,
}

impl DeployRequest {
    #[inline]
    #[must_use]
    pub fn sandbox(stores: Vec<StoreId>) -> Self {
        Self {
            environment: Environment::Sandbox,
            target_stores: Some(stores),
        }
    }

    #[inline]
    #[must_use]
    pub fn production() -> Self {
        Self {
            environment: Environment::Production,
            target_stores: None,
        }
    }

    #[must_use]
    pub fn store_count(&self) -> usize {
        self.target_stores.as_ref().map_or(0, Vec::len)
    }

    /// Target phrase used in summaries
    #[must_use]
    pub fn target_description(&self) -> String {
        match self.environment {
            Environment::Sandbox => format!("{} store(s)", self.store_count()),
            Environment::Production => "all production stores".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stores() -> Vec<StoreId> {
        ["store-1", "store-2", "store-3", "store-4"]
            .into_iter()
            .map(StoreId::from)
            .collect()
    }

    #[test]
    fn missing_environment_rejected() {
        let selection = DeploySelection::new();
        assert!(matches!(selection.validate(), Err(DeployError::NoEnvironment)));
    }

    #[test]
    fn sandbox_requires_store() {
        let mut selection = DeploySelection::new();
        selection.select_environment(Environment::Sandbox);
        assert!(matches!(selection.validate(), Err(DeployError::NoTargetStores)));

        selection.toggle_store(StoreId::from("store-2"));
        let request = selection.validate().unwrap();
        assert_eq!(request.target_stores, Some(vec![StoreId::from("store-2")]));
    }

    #[test]
    fn production_ignores_store_selection() {
        let mut selection = DeploySelection::new();
        selection.toggle_store(StoreId::from("store-1"));
        selection.select_environment(Environment::Production);
        assert_eq!(selection.validate().unwrap(), DeployRequest::production());
    }

    #[test]
    fn toggle_store_twice_removes_it() {
        let mut selection = DeploySelection::new();
        selection.toggle_store(StoreId::from("store-1"));
        selection.toggle_store(StoreId::from("store-1"));
        assert!(selection.stores().is_empty());
    }

    #[test]
    fn toggle_all_selects_then_clears() {
        let all = stores();
        let mut selection = DeploySelection::new();
        selection.toggle_store(StoreId::from("store-3"));

        selection.toggle_all_stores(&all);
        assert_eq!(selection.stores(), all.as_slice());

        selection.toggle_all_stores(&all);
        assert!(selection.stores().is_empty());
    }

    #[test]
    fn clear_resets_everything() {
        let mut selection = DeploySelection::new();
        selection.select_environment(Environment::Sandbox);
        selection.toggle_store(StoreId::from("store-1"));
        selection.clear();
        assert_eq!(selection, DeploySelection::new());
    }
}
