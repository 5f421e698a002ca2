//! Saving product and coupon enrichment
//!
//! A save validates the form, writes it to the repository and appends one
//! `updated` entry to the pending change log.

use crate::coupon::CouponEnrichment;
use crate::error::CatalogError;
use crate::product::ProductEnrichment;
use crate::repository::ProductRepository;
use menudeck_deploy::ChangeLog;
use menudeck_model::{ChangeAction, ChangeLogEntry, ChangeType, NewChange};
use std::sync::Arc;

pub struct EnrichmentService {
    repo: Arc<dyn ProductRepository>,
    changes: Arc<ChangeLog>,
}

impl std::fmt::Debug for EnrichmentService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EnrichmentService").finish_non_exhaustive()
    }
}

impl EnrichmentService {
    #[must_use]
    pub fn new(repo: Arc<dyn ProductRepository>, changes: Arc<ChangeLog>) -> Self {
        Self { repo, changes }
    }

    #[must_use]
    pub fn repository(&self) -> &Arc<dyn ProductRepository> {
        &self.repo
    }

    /// Saved enrichment, or a fresh form built from the product
    ///
    /// # Errors
    /// Returns `CatalogError::UnknownProduct` if the id is not in the catalog
    pub fn product_form(&self, id: &str) -> Result<ProductEnrichment, CatalogError> {
        let product = self
            .repo
            .product(id)
            .ok_or_else(|| CatalogError::UnknownProduct(id.to_string()))?;
        Ok(self
            .repo
            .product_enrichment(id)
            .unwrap_or_else(|| ProductEnrichment::for_product(&product)))
    }

    /// # Errors
    /// Returns `CatalogError::UnknownCoupon` if the id is not in the catalog
    pub fn coupon_form(&self, id: &str) -> Result<CouponEnrichment, CatalogError> {
        let coupon = self
            .repo
            .coupon(id)
            .ok_or_else(|| CatalogError::UnknownCoupon(id.to_string()))?;
        Ok(self
            .repo
            .coupon_enrichment(id)
            .unwrap_or_else(|| CouponEnrichment::for_coupon(&coupon)))
    }

    /// Validate and store a product's enrichment, then log the change
    ///
    /// # Errors
    /// - `CatalogError::UnknownProduct` if the id is not in the catalog
    /// - `CatalogError::MissingField` if the title is blank
    pub fn save_product(&self, id: &str, form: ProductEnrichment) -> Result<ChangeLogEntry, CatalogError> {
        let product = self
            .repo
            .product(id)
            .ok_or_else(|| CatalogError::UnknownProduct(id.to_string()))?;
        let form = match form.normalize() {
            Ok(form) => form,
            Err(e) => {
                tracing::warn!(product = id, "enrichment rejected: {}", e);
                return Err(e);
            }
        };

        self.repo.save_product_enrichment(id, form)?;
        let entry = self.changes.add_change(NewChange::new(
            ChangeType::Product,
            ChangeAction::Updated,
            product.name,
            "Updated product enrichment",
        ));
        tracing::info!(product = id, change = %entry.id, "product enrichment saved");
        Ok(entry)
    }

    /// Validate and store a coupon's enrichment, then log the change
    ///
    /// # Errors
    /// - `CatalogError::UnknownCoupon` if the id is not in the catalog
    /// - any validation error from [`CouponEnrichment::validate`]
    pub fn save_coupon(&self, id: &str, form: CouponEnrichment) -> Result<ChangeLogEntry, CatalogError> {
        let coupon = self
            .repo
            .coupon(id)
            .ok_or_else(|| CatalogError::UnknownCoupon(id.to_string()))?;
        if let Err(e) = form.validate() {
            tracing::warn!(coupon = id, "enrichment rejected: {}", e);
            return Err(e);
        }

        self.repo.save_coupon_enrichment(id, form)?;
        let entry = self.changes.add_change(NewChange::new(
            ChangeType::Coupon,
            ChangeAction::Updated,
            coupon.code,
            "Updated coupon enrichment",
        ));
        tracing::info!(coupon = id, change = %entry.id, "coupon enrichment saved");
        Ok(entry)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::InMemoryProductRepository;
    use menudeck_deploy::ManualClock;

    fn service() -> (EnrichmentService, Arc<ChangeLog>) {
        let changes = Arc::new(ChangeLog::new(Arc::new(ManualClock::default())));
        let repo = Arc::new(InMemoryProductRepository::seeded());
        (EnrichmentService::new(repo, changes.clone()), changes)
    }

    #[test]
    fn saving_product_logs_one_change() {
        let (service, changes) = service();
        let mut form = service.product_form("3").unwrap();
        assert_eq!(form.title, "Hawaiian");
        form.add_tag("Bestseller");

        let entry = service.save_product("3", form).unwrap();
        assert_eq!(entry.change_type, ChangeType::Product);
        assert_eq!(entry.action, ChangeAction::Updated);
        assert_eq!(entry.item_name, "Hawaiian");
        assert_eq!(entry.description, "Updated product enrichment");
        assert_eq!(changes.len(), 1);

        assert_eq!(service.product_form("3").unwrap().tags, vec!["Bestseller"]);
    }

    #[test]
    fn repeated_saves_append() {
        let (service, changes) = service();
        let form = service.product_form("1").unwrap();
        service.save_product("1", form.clone()).unwrap();
        service.save_product("1", form).unwrap();
        assert_eq!(changes.len(), 2);
    }

    #[test]
    fn rejected_form_logs_nothing() {
        let (service, changes) = service();
        let mut form = service.coupon_form("1").unwrap();
        form.discount_value = 250.0;

        assert!(service.save_coupon("1", form).is_err());
        assert!(changes.is_empty());
    }

    #[test]
    fn saving_coupon_uses_code_as_item_name() {
        let (service, changes) = service();
        let form = service.coupon_form("2").unwrap();
        let entry = service.save_coupon("2", form).unwrap();
        assert_eq!(entry.change_type, ChangeType::Coupon);
        assert_eq!(entry.item_name, "FIRST50");
        assert_eq!(changes.changes()[0].description, "Updated coupon enrichment");
    }

    #[test]
    fn unknown_product_is_rejected() {
        let (service, changes) = service();
        let err = service
            .save_product("404", ProductEnrichment::default())
            .unwrap_err();
        assert_eq!(err, CatalogError::UnknownProduct("404".into()));
        assert!(changes.is_empty());
    }
}
