//! Catalog errors

/// Errors raised by catalog editing
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CatalogError {
    #[error("unknown product: {0}")]
    UnknownProduct(String),

    #[error("unknown coupon: {0}")]
    UnknownCoupon(String),

    #[error("unknown ingredient: {0}")]
    UnknownIngredient(String),

    #[error("unknown icon identifier: {0}")]
    UnknownIdentifier(String),

    /// Required form field left blank
    #[error("{field} is required")]
    MissingField { field: &'static str },

    /// Percentage outside 0-100 or negative amount
    #[error("invalid discount value {value}")]
    InvalidDiscount { value: f64 },

    /// Coupon validity window ends before it starts
    #[error("coupon valid until {until} is before valid from {from}")]
    InvalidValidity { from: String, until: String },

    /// Confirm or cancel called with no impact preview open
    #[error("no ingredient change awaiting confirmation")]
    NothingToConfirm,
}

impl CatalogError {
    /// Whether the error came from operator input
    #[inline]
    #[must_use]
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::MissingField { .. } | Self::InvalidDiscount { .. } | Self::InvalidValidity { .. }
        )
    }

    pub(crate) fn require(field: &'static str, value: &str) -> Result<(), Self> {
        if value.trim().is_empty() {
            return Err(Self::MissingField { field });
        }
        Ok(())
    }
}
