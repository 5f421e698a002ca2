//! Back-office facade
//!
//! Builds every service around one shared [`ChangeLog`], one
//! [`NewProductsCounter`] and one [`Clock`], so edits from any screen end
//! up in the same deployment queue.

use crate::config::BackOfficeConfig;
use crate::error::BackOfficeError;
use menudeck_catalog::{
    EnrichmentService, IconIdentifiers, InMemoryProductRepository, IngredientBoard, ProductRepository,
};
use menudeck_deploy::{
    ChangeLog, Clock, DeployError, DeploySelection, DeploymentHistory, DeploymentOutcome,
    DeploymentRunner, DeploymentTarget, NewProductsCounter, SimulatedTarget, SystemClock,
};
use menudeck_model::{ChangeLogEntry, DeploymentRecord, Environment, NewChange, StoreId};
use menudeck_stores::{InMemoryStoreRepository, StoreChannels, StoreRepository};
use menudeck_upload::{BulkUploader, CannedParser, InMemoryStore, JsonFileStore, KeyValueStore, UploadHistory};
use std::sync::Arc;

/// Collects overrides before the async build
pub struct BackOfficeBuilder {
    config: BackOfficeConfig,
    clock: Option<Arc<dyn Clock>>,
    target: Option<Arc<dyn DeploymentTarget>>,
    stores: Option<Arc<dyn StoreRepository>>,
    products: Option<Arc<dyn ProductRepository>>,
    history_store: Option<Arc<dyn KeyValueStore>>,
}

impl BackOfficeBuilder {
    #[must_use]
    pub fn new(config: BackOfficeConfig) -> Self {
        Self {
            config,
            clock: None,
            target: None,
            stores: None,
            products: None,
            history_store: None,
        }
    }

    #[must_use]
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = Some(clock);
        self
    }

    #[must_use]
    pub fn with_target(mut self, target: Arc<dyn DeploymentTarget>) -> Self {
        self.target = Some(target);
        self
    }

    #[must_use]
    pub fn with_store_repository(mut self, stores: Arc<dyn StoreRepository>) -> Self {
        self.stores = Some(stores);
        self
    }

    #[must_use]
    pub fn with_product_repository(mut self, products: Arc<dyn ProductRepository>) -> Self {
        self.products = Some(products);
        self
    }

    #[must_use]
    pub fn with_history_store(mut self, store: Arc<dyn KeyValueStore>) -> Self {
        self.history_store = Some(store);
        self
    }

    /// Wire the services, loading upload history from storage
    ///
    /// # Errors
    /// Returns `BackOfficeError::Upload` if stored history cannot be read
    pub async fn build(self) -> Result<BackOffice, BackOfficeError> {
        let config = self.config;
        let clock = self.clock.unwrap_or_else(|| Arc::new(SystemClock));
        let target = self.target.unwrap_or_else(|| Arc::new(SimulatedTarget));
        let stores = self
            .stores
            .unwrap_or_else(|| Arc::new(InMemoryStoreRepository::seeded()));
        let products = self
            .products
            .unwrap_or_else(|| Arc::new(InMemoryProductRepository::seeded()));
        let history_store: Arc<dyn KeyValueStore> = match (self.history_store, &config.history_path) {
            (Some(store), _) => store,
            (None, Some(path)) => Arc::new(JsonFileStore::new(path.clone())),
            (None, None) => Arc::new(InMemoryStore::new()),
        };

        let changes = Arc::new(ChangeLog::new(clock.clone()));
        let new_products = Arc::new(NewProductsCounter::new());
        let deployments = Arc::new(DeploymentHistory::new());
        let runner = DeploymentRunner::new(
            changes.clone(),
            new_products.clone(),
            deployments.clone(),
            clock.clone(),
            target,
            config.runner_config(),
        );

        let parser = Arc::new(CannedParser::new(clock.clone()).with_delay(config.upload_parse_delay()));
        let upload_history = Arc::new(UploadHistory::load(history_store).await?);
        let uploads = BulkUploader::new(
            parser,
            upload_history,
            changes.clone(),
            new_products.clone(),
            clock.clone(),
        )
        .with_uploaded_by(config.uploaded_by.clone());

        tracing::debug!(stores = stores.list().len(), "back office ready");
        Ok(BackOffice {
            channels: StoreChannels::new(stores.clone()),
            enrichment: EnrichmentService::new(products, changes.clone()),
            identifiers: IconIdentifiers::new(changes.clone()),
            ingredients: IngredientBoard::new(changes.clone()),
            config,
            clock,
            changes,
            new_products,
            deployments,
            runner,
            stores,
            uploads,
        })
    }
}

pub struct BackOffice {
    config: BackOfficeConfig,
    clock: Arc<dyn Clock>,
    changes: Arc<ChangeLog>,
    new_products: Arc<NewProductsCounter>,
    deployments: Arc<DeploymentHistory>,
    runner: DeploymentRunner,
    stores: Arc<dyn StoreRepository>,
    channels: StoreChannels,
    enrichment: EnrichmentService,
    identifiers: IconIdentifiers,
    ingredients: IngredientBoard,
    uploads: BulkUploader,
}

impl std::fmt::Debug for BackOffice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BackOffice")
            .field("pending_changes", &self.changes.len())
            .field("new_products", &self.new_products.get())
            .field("deployments", &self.deployments.len())
            .finish_non_exhaustive()
    }
}

impl BackOffice {
    #[must_use]
    pub fn builder(config: BackOfficeConfig) -> BackOfficeBuilder {
        BackOfficeBuilder::new(config)
    }

    /// Default wiring: system clock, simulated target, seeded in-memory data
    ///
    /// # Errors
    /// Returns `BackOfficeError::Upload` if stored history cannot be read
    pub async fn new(config: BackOfficeConfig) -> Result<Self, BackOfficeError> {
        Self::builder(config).build().await
    }

    #[inline]
    #[must_use]
    pub fn config(&self) -> &BackOfficeConfig {
        &self.config
    }

    #[inline]
    #[must_use]
    pub fn clock(&self) -> &Arc<dyn Clock> {
        &self.clock
    }

    /// Append an edit intent to the pending queue
    pub fn add_change(&self, change: NewChange) -> ChangeLogEntry {
        self.changes.add_change(change)
    }

    #[must_use]
    pub fn pending_changes(&self) -> Vec<ChangeLogEntry> {
        self.changes.changes()
    }

    #[must_use]
    pub fn has_changes(&self) -> bool {
        self.changes.has_changes()
    }

    #[must_use]
    pub fn change_log(&self) -> &Arc<ChangeLog> {
        &self.changes
    }

    #[must_use]
    pub fn new_products_count(&self) -> usize {
        self.new_products.get()
    }

    /// Deploy the pending queue to the selected target
    ///
    /// Sandbox stores must all exist in the store directory.
    ///
    /// # Errors
    /// - `DeployError::UnknownStore` for a sandbox store not in the directory
    /// - anything [`DeploymentRunner::deploy`] returns
    pub async fn deploy(&self, selection: &mut DeploySelection) -> Result<DeploymentOutcome, BackOfficeError> {
        if selection.environment() == Some(Environment::Sandbox) {
            if let Some(unknown) = selection.stores().iter().find(|s| !self.stores.exists(s)) {
                tracing::warn!(store = %unknown, "deployment rejected: unknown store");
                return Err(DeployError::UnknownStore(unknown.to_string()).into());
            }
        }
        Ok(self.runner.deploy(selection).await?)
    }

    #[must_use]
    pub fn is_deploying(&self) -> bool {
        self.runner.is_deploying()
    }

    /// Deployment history, newest first
    #[must_use]
    pub fn deployments(&self) -> Vec<DeploymentRecord> {
        self.deployments.records()
    }

    /// Every store id in directory order, for the select-all toggle
    #[must_use]
    pub fn store_ids(&self) -> Vec<StoreId> {
        self.stores.list().into_iter().map(|s| s.id).collect()
    }

    #[must_use]
    pub fn stores(&self) -> &Arc<dyn StoreRepository> {
        &self.stores
    }

    #[must_use]
    pub fn channels(&self) -> &StoreChannels {
        &self.channels
    }

    #[must_use]
    pub fn enrichment(&self) -> &EnrichmentService {
        &self.enrichment
    }

    #[must_use]
    pub fn identifiers(&self) -> &IconIdentifiers {
        &self.identifiers
    }

    #[must_use]
    pub fn ingredients(&self) -> &IngredientBoard {
        &self.ingredients
    }

    #[must_use]
    pub fn uploads(&self) -> &BulkUploader {
        &self.uploads
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use menudeck_deploy::ManualClock;
    use menudeck_model::{ChangeAction, ChangeType};

    async fn office() -> BackOffice {
        BackOffice::builder(BackOfficeConfig::default().instant())
            .with_clock(Arc::new(ManualClock::default()))
            .build()
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn unknown_sandbox_store_rejected_before_run() {
        let office = office().await;
        office.add_change(NewChange::new(ChangeType::Recipe, ChangeAction::Created, "Pesto", "New recipe"));

        let mut selection = DeploySelection::new();
        selection.select_environment(Environment::Sandbox);
        selection.toggle_store(StoreId::from("atlantis"));

        let err = office.deploy(&mut selection).await.unwrap_err();
        assert!(err.is_validation());
        assert!(matches!(err, BackOfficeError::Deploy(DeployError::UnknownStore(_))));
        assert!(office.deployments().is_empty());
        assert_eq!(selection.stores().len(), 1);
    }

    #[tokio::test]
    async fn screens_share_one_queue() {
        let office = office().await;
        office
            .enrichment()
            .save_product("1", office.enrichment().product_form("1").unwrap())
            .unwrap();
        office.identifiers().create("Kids", "🧒").unwrap();
        office.ingredients().set_all(true);

        let types: Vec<_> = office.pending_changes().into_iter().map(|c| c.change_type).collect();
        assert_eq!(types, vec![ChangeType::Product, ChangeType::Identifier, ChangeType::Ingredient]);
    }

    #[tokio::test]
    async fn store_ids_follow_directory() {
        let office = office().await;
        let ids = office.store_ids();
        assert_eq!(ids.len(), 25);
        assert_eq!(ids[0], StoreId::from("pavilion"));
    }
}
