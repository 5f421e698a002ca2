//! Coupons and their enrichment metadata

use crate::error::CatalogError;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiscountType {
    Percentage,
    /// Fixed amount in RM
    Fixed,
}

/// Coupon as listed on the coupon enrichment screen
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Coupon {
    pub id: String,
    pub code: String,
    pub title: String,
    pub discount_type: DiscountType,
    pub discount_value: f64,
    pub valid_from: NaiveDate,
    pub valid_until: NaiveDate,
    pub active: bool,
    pub enriched: bool,
}

/// Marketing metadata edited on the coupon enrichment screen
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CouponEnrichment {
    pub code: String,
    pub title: String,
    pub short_description: String,
    pub long_description: String,
    pub discount_type: DiscountType,
    pub discount_value: f64,
    pub valid_from: NaiveDate,
    pub valid_until: NaiveDate,
    pub terms_and_conditions: String,
}

impl CouponEnrichment {
    /// Starting form for a coupon, descriptions blank
    #[must_use]
    pub fn for_coupon(coupon: &Coupon) -> Self {
        Self {
            code: coupon.code.clone(),
            title: coupon.title.clone(),
            short_description: String::new(),
            long_description: String::new(),
            discount_type: coupon.discount_type,
            discount_value: coupon.discount_value,
            valid_from: coupon.valid_from,
            valid_until: coupon.valid_until,
            terms_and_conditions: String::new(),
        }
    }

    /// `20% OFF` or `RM 50 OFF`
    #[must_use]
    pub fn discount_label(&self) -> String {
        match self.discount_type {
            DiscountType::Percentage => format!("{}% OFF", self.discount_value),
            DiscountType::Fixed => format!("RM {} OFF", self.discount_value),
        }
    }

    /// # Errors
    /// - `CatalogError::MissingField` for a blank code or title
    /// - `CatalogError::InvalidDiscount` for a negative value or a percentage above 100
    /// - `CatalogError::InvalidValidity` if the window ends before it starts
    pub fn validate(&self) -> Result<(), CatalogError> {
        CatalogError::require("code", &self.code)?;
        CatalogError::require("title", &self.title)?;

        let value = self.discount_value;
        let in_range = match self.discount_type {
            DiscountType::Percentage => (0.0..=100.0).contains(&value),
            DiscountType::Fixed => value >= 0.0,
        };
        if !in_range || value.is_nan() {
            return Err(CatalogError::InvalidDiscount { value });
        }

        if self.valid_until < self.valid_from {
            return Err(CatalogError::InvalidValidity {
                from: self.valid_from.to_string(),
                until: self.valid_until.to_string(),
            });
        }
        Ok(())
    }
}
