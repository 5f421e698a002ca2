//! Menudeck catalog
//!
//! Editing screens that feed the pending change log:
//!
//! - [`EnrichmentService`]: customer-facing metadata for products and coupons
//! - [`IconIdentifiers`]: dietary/flavour badges attached to products
//! - [`IngredientBoard`]: ingredient availability per channel, with an
//!   impact preview before disabling an ingredient that products depend on
//!
//! Every confirmed edit appends a [`menudeck_model::ChangeLogEntry`] to the
//! shared [`menudeck_deploy::ChangeLog`].

#![warn(unreachable_pub)]
#![allow(missing_docs)]

pub mod coupon;
pub mod enrichment;
pub mod error;
pub mod identifiers;
pub mod ingredients;
pub mod product;
pub mod repository;

pub use coupon::{Coupon, CouponEnrichment, DiscountType};
pub use enrichment::EnrichmentService;
pub use error::CatalogError;
pub use identifiers::{IconIdentifier, IconIdentifiers};
pub use ingredients::{
    AvailabilityFilter, AvailabilityUpdate, ImpactPreview, Ingredient, IngredientBoard,
    IngredientChannel, IngredientFilter,
};
pub use product::{Product, ProductEnrichment, ProductType};
pub use repository::{InMemoryProductRepository, ProductRepository};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
