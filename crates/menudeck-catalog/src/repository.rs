//! Product and coupon storage
//!
//! [`ProductRepository`] stands in for the ordering platform's catalog API.
//! [`InMemoryProductRepository`] is backed by `DashMap`s and keeps a
//! sequence number per entry so listings come back in catalog order.

use crate::coupon::{Coupon, CouponEnrichment, DiscountType};
use crate::error::CatalogError;
use crate::product::{Product, ProductEnrichment, ProductType};
use chrono::NaiveDate;
use dashmap::DashMap;
use std::sync::atomic::{AtomicU64, Ordering};

/// Catalog storage seam
pub trait ProductRepository: Send + Sync {
    /// All products in catalog order
    fn products(&self) -> Vec<Product>;

    fn product(&self, id: &str) -> Option<Product>;

    /// Saved enrichment, if the product has been enriched
    fn product_enrichment(&self, id: &str) -> Option<ProductEnrichment>;

    /// # Errors
    /// Returns `CatalogError::UnknownProduct` if the id is not in the catalog
    fn save_product_enrichment(&self, id: &str, enrichment: ProductEnrichment) -> Result<(), CatalogError>;

    /// All coupons in catalog order
    fn coupons(&self) -> Vec<Coupon>;

    fn coupon(&self, id: &str) -> Option<Coupon>;

    fn coupon_enrichment(&self, id: &str) -> Option<CouponEnrichment>;

    /// Save enrichment and mark the coupon enriched
    ///
    /// # Errors
    /// Returns `CatalogError::UnknownCoupon` if the id is not in the catalog
    fn save_coupon_enrichment(&self, id: &str, enrichment: CouponEnrichment) -> Result<(), CatalogError>;

    /// Products in a category (`All` matches every product)
    fn products_in(&self, category: &str) -> Vec<Product> {
        self.products()
            .into_iter()
            .filter(|p| category == "All" || p.category == category)
            .collect()
    }
}

#[derive(Debug, Clone)]
struct Entry<T, E> {
    seq: u64,
    item: T,
    enrichment: Option<E>,
}

/// Process-local catalog
#[derive(Debug, Default)]
pub struct InMemoryProductRepository {
    products: DashMap<String, Entry<Product, ProductEnrichment>>,
    coupons: DashMap<String, Entry<Coupon, CouponEnrichment>>,
    seq: AtomicU64,
}

impl InMemoryProductRepository {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Catalog seeded with the chain's menu and coupon book
    #[must_use]
    pub fn seeded() -> Self {
        let repo = Self::new();
        for product in seed_products() {
            repo.insert_product(product);
        }
        for coupon in seed_coupons() {
            repo.insert_coupon(coupon);
        }
        repo
    }

    pub fn insert_product(&self, product: Product) {
        let seq = self.seq.fetch_add(1, Ordering::Relaxed);
        self.products.insert(
            product.id.clone(),
            Entry {
                seq,
                item: product,
                enrichment: None,
            },
        );
    }

    pub fn insert_coupon(&self, coupon: Coupon) {
        let seq = self.seq.fetch_add(1, Ordering::Relaxed);
        self.coupons.insert(
            coupon.id.clone(),
            Entry {
                seq,
                item: coupon,
                enrichment: None,
            },
        );
    }
}

fn ordered<T: Clone, E>(map: &DashMap<String, Entry<T, E>>) -> Vec<T> {
    let mut entries: Vec<(u64, T)> = map.iter().map(|e| (e.seq, e.item.clone())).collect();
    entries.sort_by_key(|(seq, _)| *seq);
    entries.into_iter().map(|(_, item)| item).collect()
}

impl ProductRepository for InMemoryProductRepository {
    fn products(&self) -> Vec<Product> {
        ordered(&self.products)
    }

    fn product(&self, id: &str) -> Option<Product> {
        self.products.get(id).map(|e| e.item.clone())
    }

    fn product_enrichment(&self, id: &str) -> Option<ProductEnrichment> {
        self.products.get(id).and_then(|e| e.enrichment.clone())
    }

    fn save_product_enrichment(&self, id: &str, enrichment: ProductEnrichment) -> Result<(), CatalogError> {
        let mut entry = self
            .products
            .get_mut(id)
            .ok_or_else(|| CatalogError::UnknownProduct(id.to_string()))?;
        entry.item.discontinued = enrichment.discontinued;
        entry.item.product_type = enrichment.product_type;
        entry.enrichment = Some(enrichment);
        Ok(())
    }

    fn coupons(&self) -> Vec<Coupon> {
        ordered(&self.coupons)
    }

    fn coupon(&self, id: &str) -> Option<Coupon> {
        self.coupons.get(id).map(|e| e.item.clone())
    }

    fn coupon_enrichment(&self, id: &str) -> Option<CouponEnrichment> {
        self.coupons.get(id).and_then(|e| e.enrichment.clone())
    }

    fn save_coupon_enrichment(&self, id: &str, enrichment: CouponEnrichment) -> Result<(), CatalogError> {
        let mut entry = self
            .coupons
            .get_mut(id)
            .ok_or_else(|| CatalogError::UnknownCoupon(id.to_string()))?;
        entry.item.enriched = true;
        entry.enrichment = Some(enrichment);
        Ok(())
    }
}

fn seed_products() -> Vec<Product> {
    use ProductType::{AlaCarte, Combo};
    let rows: [(&str, &str, &str, ProductType, u32, bool); 20] = [
        ("1", "Super Supreme", "Pizza", AlaCarte, 4290, true),
        ("2", "Chicken Supreme", "Pizza", AlaCarte, 4090, true),
        ("3", "Hawaiian", "Pizza", AlaCarte, 3590, false),
        ("4", "Beef Pepperoni", "Pizza", AlaCarte, 3890, false),
        ("5", "Meat Galore", "Pizza", AlaCarte, 4490, false),
        ("6", "Veggie Lover's", "Pizza", AlaCarte, 3690, false),
        ("7", "Chicken Carbonara", "Pasta", AlaCarte, 1890, false),
        ("8", "Beef Bolognese", "Pasta", AlaCarte, 1890, false),
        ("9", "Chicken Wings (6pcs)", "WingStreet", AlaCarte, 1590, false),
        ("10", "Chicken Drumlets (6pcs)", "WingStreet", AlaCarte, 1590, false),
        ("11", "Cheesy Bites", "Sides", AlaCarte, 1290, false),
        ("12", "Garlic Bread", "Sides", AlaCarte, 890, false),
        ("13", "Soup of the Day", "Sides", AlaCarte, 790, false),
        ("14", "Chocolate Lava Cake", "Desserts", AlaCarte, 1290, false),
        ("15", "Tiramisu", "Desserts", AlaCarte, 1190, false),
        ("16", "Pepsi (Regular)", "Beverages", AlaCarte, 490, false),
        ("17", "7UP (Regular)", "Beverages", AlaCarte, 490, false),
        ("18", "Big Box Meal", "Combos", Combo, 2490, false),
        ("19", "Family Box", "Combos", Combo, 5990, false),
        ("20", "Personal Pan Combo", "Combos", Combo, 1690, false),
    ];
    rows.into_iter()
        .map(|(id, name, category, kind, price, is_new)| Product {
            is_new,
            ..Product::new(id, name, category, kind, price)
        })
        .collect()
}

fn seed_coupons() -> Vec<Coupon> {
    use DiscountType::{Fixed, Percentage};
    let rows: [(&str, &str, &str, DiscountType, f64, (i32, u32, u32), (i32, u32, u32), bool, bool); 10] = [
        ("1", "WELCOME20", "Welcome Discount", Percentage, 20.0, (2024, 1, 1), (2024, 12, 31), true, true),
        ("2", "FIRST50", "First Order Bonus", Fixed, 50.0, (2024, 1, 1), (2024, 6, 30), true, false),
        ("3", "PIZZA30", "Pizza Lover Deal", Percentage, 30.0, (2024, 3, 1), (2024, 3, 31), true, true),
        ("4", "FAMILY100", "Family Feast Discount", Fixed, 100.0, (2024, 2, 1), (2024, 12, 31), false, false),
        ("5", "WEEKEND15", "Weekend Special", Percentage, 15.0, (2024, 1, 1), (2024, 12, 31), true, true),
        ("6", "STUDENT25", "Student Discount", Percentage, 25.0, (2024, 1, 1), (2024, 12, 31), true, true),
        ("7", "LUNCH20", "Lunchtime Special", Percentage, 20.0, (2024, 1, 1), (2024, 12, 31), true, false),
        ("8", "BIRTHDAY50", "Birthday Celebration", Fixed, 50.0, (2024, 1, 1), (2024, 12, 31), true, true),
        ("9", "REFER30", "Referral Bonus", Fixed, 30.0, (2024, 1, 1), (2024, 12, 31), true, false),
        ("10", "LOYALTY10", "Loyalty Rewards", Percentage, 10.0, (2024, 1, 1), (2024, 12, 31), true, true),
    ];
    let date = |(y, m, d): (i32, u32, u32)| NaiveDate::from_ymd_opt(y, m, d).unwrap_or_default();
    rows.into_iter()
        .map(|(id, code, title, discount_type, value, from, until, active, enriched)| Coupon {
            id: id.to_string(),
            code: code.to_string(),
            title: title.to_string(),
            discount_type,
            discount_value: value,
            valid_from: date(from),
            valid_until: date(until),
            active,
            enriched,
        })
        .collect()
}
