//! Products and their enrichment metadata

use crate::error::CatalogError;
use serde::{Deserialize, Serialize};

/// How a product is sold
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ProductType {
    #[default]
    AlaCarte,
    Combo,
}

/// Core product attributes owned by the ordering platform
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: String,
    pub name: String,
    pub category: String,
    pub product_type: ProductType,
    /// Price in sen
    pub price_cents: u32,
    pub discontinued: bool,
    /// Added by bulk upload and not yet deployed
    #[serde(default)]
    pub is_new: bool,
}

impl Product {
    #[must_use]
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        category: impl Into<String>,
        product_type: ProductType,
        price_cents: u32,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            category: category.into(),
            product_type,
            price_cents,
            discontinued: false,
            is_new: false,
        }
    }

    /// `RM 42.90`
    #[must_use]
    pub fn price_display(&self) -> String {
        format!("RM {}.{:02}", self.price_cents / 100, self.price_cents % 100)
    }
}

/// Marketing metadata edited on the product enrichment screen
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductEnrichment {
    pub title: String,
    pub description: String,
    pub tags: Vec<String>,
    pub max_toppings_ala_carte: u32,
    pub max_toppings_combo: u32,
    pub sold_separately: bool,
    pub hidden_product: bool,
    pub discontinued: bool,
    /// Icon identifier ids
    pub selected_identifiers: Vec<String>,
    pub product_type: ProductType,
    pub selected_recipe: Option<String>,
}

impl Default for ProductEnrichment {
    fn default() -> Self {
        Self {
            title: String::new(),
            description: String::new(),
            tags: Vec::new(),
            max_toppings_ala_carte: 5,
            max_toppings_combo: 3,
            sold_separately: true,
            hidden_product: false,
            discontinued: false,
            selected_identifiers: Vec::new(),
            product_type: ProductType::AlaCarte,
            selected_recipe: None,
        }
    }
}

impl ProductEnrichment {
    /// Starting form for a product: title from its name, everything else default
    #[must_use]
    pub fn for_product(product: &Product) -> Self {
        Self {
            title: product.name.clone(),
            product_type: product.product_type,
            discontinued: product.discontinued,
            ..Self::default()
        }
    }

    /// Add a trimmed tag; blank and duplicate tags are ignored
    pub fn add_tag(&mut self, tag: &str) -> bool {
        let tag = tag.trim();
        if tag.is_empty() || self.tags.iter().any(|t| t == tag) {
            return false;
        }
        self.tags.push(tag.to_string());
        true
    }

    pub fn remove_tag(&mut self, tag: &str) {
        self.tags.retain(|t| t != tag);
    }

    /// Select the identifier if absent, deselect it if present
    pub fn toggle_identifier(&mut self, identifier_id: &str) {
        if let Some(pos) = self.selected_identifiers.iter().position(|i| i == identifier_id) {
            self.selected_identifiers.remove(pos);
        } else {
            self.selected_identifiers.push(identifier_id.to_string());
        }
    }

    /// Trim and de-duplicate tags, then check required fields
    ///
    /// # Errors
    /// Returns `CatalogError::MissingField` if the title is blank
    pub fn normalize(mut self) -> Result<Self, CatalogError> {
        CatalogError::require("title", &self.title)?;
        self.title = self.title.trim().to_string();

        let mut tags: Vec<String> = Vec::with_capacity(self.tags.len());
        for tag in self.tags.drain(..) {
            let tag = tag.trim();
            if !tag.is_empty() && !tags.iter().any(|t| t == tag) {
                tags.push(tag.to_string());
            }
        }
        self.tags = tags;
        Ok(self)
    }
}
