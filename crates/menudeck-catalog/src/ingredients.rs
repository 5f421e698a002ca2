//! Ingredient availability
//!
//! An ingredient has a master switch plus delivery and takeaway switches.
//! The master switch drives both channels; flipping a channel recomputes the
//! master as `delivery && takeaway`.
//!
//! Disabling an ingredient that products depend on is two-phase:
//! [`IngredientBoard::set_availability`] returns an [`ImpactPreview`] and
//! parks the change until [`IngredientBoard::confirm`] or
//! [`IngredientBoard::cancel`].

use crate::error::CatalogError;
use menudeck_deploy::ChangeLog;
use menudeck_model::{ChangeAction, ChangeType, NewChange};
use parking_lot::{Mutex, RwLock};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IngredientChannel {
    Delivery,
    Takeaway,
}

impl IngredientChannel {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            IngredientChannel::Delivery => "delivery",
            IngredientChannel::Takeaway => "takeaway",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ingredient {
    pub id: String,
    pub name: String,
    pub category: String,
    pub available: bool,
    pub delivery_available: bool,
    pub takeaway_available: bool,
    pub impacted_recipes: Vec<String>,
    pub impacted_products: Vec<String>,
}

impl Ingredient {
    fn set_master(&mut self, available: bool) {
        self.available = available;
        self.delivery_available = available;
        self.takeaway_available = available;
    }

    fn set_channel(&mut self, channel: IngredientChannel, available: bool) {
        match channel {
            IngredientChannel::Delivery => self.delivery_available = available,
            IngredientChannel::Takeaway => self.takeaway_available = available,
        }
        self.available = self.delivery_available && self.takeaway_available;
    }
}

/// What disabling an ingredient would take off the menu
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImpactPreview {
    pub ingredient_id: String,
    pub ingredient_name: String,
    pub recipes: Vec<String>,
    pub products: Vec<String>,
}

/// Result of a master availability request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AvailabilityUpdate {
    Applied(Ingredient),
    /// Parked until confirmed or cancelled
    NeedsConfirmation(ImpactPreview),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AvailabilityFilter {
    #[default]
    All,
    Available,
    Unavailable,
}

/// Search box plus category and status dropdowns
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IngredientFilter {
    /// Matches name or category, case-insensitive
    pub query: String,
    /// `None` means all categories
    pub category: Option<String>,
    pub status: AvailabilityFilter,
}

impl IngredientFilter {
    #[must_use]
    pub fn matches(&self, ingredient: &Ingredient) -> bool {
        let query = self.query.to_lowercase();
        let matches_search = ingredient.name.to_lowercase().contains(&query)
            || ingredient.category.to_lowercase().contains(&query);
        let matches_category = self.category.as_deref().map_or(true, |c| ingredient.category == c);
        let matches_status = match self.status {
            AvailabilityFilter::All => true,
            AvailabilityFilter::Available => ingredient.available,
            AvailabilityFilter::Unavailable => !ingredient.available,
        };
        matches_search && matches_category && matches_status
    }
}

pub struct IngredientBoard {
    items: RwLock<Vec<Ingredient>>,
    pending: Mutex<Option<String>>,
    changes: Arc<ChangeLog>,
}

impl std::fmt::Debug for IngredientBoard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IngredientBoard")
            .field("pending", &*self.pending.lock())
            .finish_non_exhaustive()
    }
}

impl IngredientBoard {
    /// Board seeded with the kitchen's tracked ingredients
    #[must_use]
    pub fn new(changes: Arc<ChangeLog>) -> Self {
        Self::with_ingredients(seed_ingredients(), changes)
    }

    #[must_use]
    pub fn with_ingredients(items: Vec<Ingredient>, changes: Arc<ChangeLog>) -> Self {
        Self {
            items: RwLock::new(items),
            pending: Mutex::new(None),
            changes,
        }
    }

    #[must_use]
    pub fn list(&self) -> Vec<Ingredient> {
        self.items.read().clone()
    }

    #[must_use]
    pub fn get(&self, id: &str) -> Option<Ingredient> {
        self.items.read().iter().find(|i| i.id == id).cloned()
    }

    #[must_use]
    pub fn filter(&self, filter: &IngredientFilter) -> Vec<Ingredient> {
        self.items
            .read()
            .iter()
            .filter(|i| filter.matches(i))
            .cloned()
            .collect()
    }

    /// Distinct categories in first-seen order
    #[must_use]
    pub fn categories(&self) -> Vec<String> {
        let mut categories: Vec<String> = Vec::new();
        for item in self.items.read().iter() {
            if !categories.contains(&item.category) {
                categories.push(item.category.clone());
            }
        }
        categories
    }

    /// Flip the master switch
    ///
    /// Disabling an ingredient with impacted products is parked and returned
    /// as a preview; anything else applies immediately.
    ///
    /// # Errors
    /// Returns `CatalogError::UnknownIngredient` if the id does not exist
    pub fn set_availability(&self, id: &str, available: bool) -> Result<AvailabilityUpdate, CatalogError> {
        let ingredient = self
            .get(id)
            .ok_or_else(|| CatalogError::UnknownIngredient(id.to_string()))?;

        if !available && !ingredient.impacted_products.is_empty() {
            *self.pending.lock() = Some(ingredient.id.clone());
            tracing::debug!(
                ingredient = %ingredient.name,
                products = ingredient.impacted_products.len(),
                "disable awaiting confirmation"
            );
            return Ok(AvailabilityUpdate::NeedsConfirmation(ImpactPreview {
                ingredient_id: ingredient.id,
                ingredient_name: ingredient.name,
                recipes: ingredient.impacted_recipes,
                products: ingredient.impacted_products,
            }));
        }

        self.apply_master(id, available).map(AvailabilityUpdate::Applied)
    }

    /// Preview currently awaiting confirmation
    #[must_use]
    pub fn pending(&self) -> Option<String> {
        self.pending.lock().clone()
    }

    /// Apply the parked disable
    ///
    /// # Errors
    /// - `CatalogError::NothingToConfirm` if no preview is open
    /// - `CatalogError::UnknownIngredient` if the ingredient vanished meanwhile
    pub fn confirm(&self) -> Result<Ingredient, CatalogError> {
        let id = self.pending.lock().take().ok_or(CatalogError::NothingToConfirm)?;
        self.apply_master(&id, false)
    }

    /// Drop the parked disable; returns whether one was open
    pub fn cancel(&self) -> bool {
        let cancelled = self.pending.lock().take();
        if let Some(id) = &cancelled {
            tracing::debug!(ingredient = %id, "disable cancelled");
        }
        cancelled.is_some()
    }

    /// Flip one channel; the master follows `delivery && takeaway`
    ///
    /// # Errors
    /// Returns `CatalogError::UnknownIngredient` if the id does not exist
    pub fn set_channel(
        &self,
        id: &str,
        channel: IngredientChannel,
        available: bool,
    ) -> Result<Ingredient, CatalogError> {
        let updated = self.update(id, |i| i.set_channel(channel, available))?;
        let state = if available { "available" } else { "unavailable" };
        self.record(
            &updated.name,
            format!("Marked {} {} for {}", updated.name, state, channel.as_str()),
        );
        Ok(updated)
    }

    /// Set every ingredient's master and channel switches
    pub fn set_all(&self, available: bool) -> usize {
        let count = {
            let mut items = self.items.write();
            for item in items.iter_mut() {
                item.set_master(available);
            }
            items.len()
        };
        let state = if available { "available" } else { "unavailable" };
        self.record("All ingredients", format!("Marked all {count} ingredients {state}"));
        count
    }

    #[must_use]
    pub fn unavailable(&self) -> Vec<Ingredient> {
        self.items
            .read()
            .iter()
            .filter(|i| !i.available)
            .cloned()
            .collect()
    }

    /// Products off the menu because of unavailable ingredients,
    /// de-duplicated in first-seen order
    #[must_use]
    pub fn total_impacted_products(&self) -> Vec<String> {
        let mut products: Vec<String> = Vec::new();
        for ingredient in self.items.read().iter().filter(|i| !i.available) {
            for product in &ingredient.impacted_products {
                if !products.contains(product) {
                    products.push(product.clone());
                }
            }
        }
        products
    }

    fn apply_master(&self, id: &str, available: bool) -> Result<Ingredient, CatalogError> {
        let updated = self.update(id, |i| i.set_master(available))?;
        let state = if available { "available" } else { "unavailable" };
        self.record(&updated.name, format!("Marked {} {}", updated.name, state));
        Ok(updated)
    }

    fn update(&self, id: &str, f: impl FnOnce(&mut Ingredient)) -> Result<Ingredient, CatalogError> {
        let mut items = self.items.write();
        let item = items
            .iter_mut()
            .find(|i| i.id == id)
            .ok_or_else(|| CatalogError::UnknownIngredient(id.to_string()))?;
        f(item);
        Ok(item.clone())
    }

    fn record(&self, item_name: &str, description: String) {
        tracing::info!(ingredient = item_name, "{}", description);
        self.changes.add_change(NewChange::new(
            ChangeType::Ingredient,
            ChangeAction::Updated,
            item_name,
            description,
        ));
    }
}

fn seed_ingredients() -> Vec<Ingredient> {
    let ingredient = |id: &str, name: &str, category: &str, available: bool, recipes: &[&str], products: &[&str]| {
        Ingredient {
            id: id.to_string(),
            name: name.to_string(),
            category: category.to_string(),
            available,
            delivery_available: available,
            takeaway_available: available,
            impacted_recipes: recipes.iter().map(ToString::to_string).collect(),
            impacted_products: products.iter().map(ToString::to_string).collect(),
        }
    };
    vec![
        ingredient(
            "1",
            "Fresh Mozzarella",
            "Dairy",
            true,
            &["Margherita Pizza Base", "Supreme Pizza Base"],
            &["Margherita Pizza", "Caprese Salad", "Chicken Parmigiana"],
        ),
        ingredient(
            "2",
            "Chicken Breast",
            "Protein",
            false,
            &["Chicken Carbonara Sauce", "Grilled Chicken Recipe"],
            &[
                "Chicken Caesar Salad",
                "Grilled Chicken Sandwich",
                "Chicken Parmigiana",
                "Chicken Wrap",
                "BBQ Chicken Pizza",
                "Chicken Fajita",
                "Chicken Tikka Masala",
                "Buffalo Chicken Wings",
                "Chicken Quesadilla",
                "Chicken Fried Rice",
            ],
        ),
        ingredient(
            "3",
            "Basil Leaves",
            "Herbs",
            true,
            &["Margherita Pizza Base", "Pasta Pesto Recipe"],
            &["Margherita Pizza", "Pasta Pesto", "Caprese Salad"],
        ),
        ingredient(
            "4",
            "Beef Patty",
            "Protein",
            true,
            &["Beef Burger Recipe", "Bolognese Sauce"],
            &["Beef Burger Deluxe", "Bacon Cheeseburger"],
        ),
        ingredient(
            "5",
            "Salmon Fillet",
            "Seafood",
            false,
            &["Grilled Salmon Recipe", "Salmon Sushi Recipe"],
            &["Grilled Salmon", "Salmon Sushi Roll", "Salmon Teriyaki"],
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use menudeck_deploy::ManualClock;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    fn board() -> (IngredientBoard, Arc<ChangeLog>) {
        let changes = Arc::new(ChangeLog::new(Arc::new(ManualClock::default())));
        (IngredientBoard::new(changes.clone()), changes)
    }

    #[test]
    fn disabling_impactful_ingredient_needs_confirmation() {
        let (board, changes) = board();
        let update = board.set_availability("1", false).unwrap();

        let AvailabilityUpdate::NeedsConfirmation(preview) = update else {
            panic!("expected a preview");
        };
        assert_eq!(preview.ingredient_name, "Fresh Mozzarella");
        assert_eq!(preview.products.len(), 3);
        assert!(board.get("1").unwrap().available);
        assert!(changes.is_empty());

        let confirmed = board.confirm().unwrap();
        assert!(!confirmed.available && !confirmed.delivery_available && !confirmed.takeaway_available);
        assert_eq!(changes.changes()[0].description, "Marked Fresh Mozzarella unavailable");
        assert!(board.pending().is_none());
    }

    #[test]
    fn cancel_leaves_ingredient_untouched() {
        let (board, changes) = board();
        board.set_availability("4", false).unwrap();
        assert!(board.cancel());
        assert!(!board.cancel());
        assert!(board.get("4").unwrap().available);
        assert!(changes.is_empty());
        assert_eq!(board.confirm().unwrap_err(), CatalogError::NothingToConfirm);
    }

    #[test]
    fn enabling_applies_immediately() {
        let (board, changes) = board();
        let update = board.set_availability("2", true).unwrap();
        assert!(matches!(update, AvailabilityUpdate::Applied(ref i) if i.available && i.delivery_available));
        assert_eq!(changes.len(), 1);
    }

    #[test]
    fn channel_toggle_recomputes_master() {
        let (board, _) = board();
        let updated = board.set_channel("3", IngredientChannel::Delivery, false).unwrap();
        assert!(!updated.available);
        assert!(updated.takeaway_available);

        let updated = board.set_channel("3", IngredientChannel::Delivery, true).unwrap();
        assert!(updated.available);
    }

    #[test]
    fn impacted_products_are_deduplicated() {
        let (board, _) = board();
        assert_eq!(board.total_impacted_products().len(), 13);

        board.set_availability("1", false).unwrap();
        board.confirm().unwrap();
        // Chicken Parmigiana is already counted via Chicken Breast
        assert_eq!(board.total_impacted_products().len(), 15);
    }

    #[test]
    fn bulk_toggle_sets_everything() {
        let (board, changes) = board();
        assert_eq!(board.set_all(true), 5);
        assert!(board.unavailable().is_empty());
        assert!(board.total_impacted_products().is_empty());
        assert_eq!(changes.changes()[0].description, "Marked all 5 ingredients available");
    }

    #[test]
    fn filter_combines_search_category_status() {
        let (board, _) = board();
        let filter = IngredientFilter {
            query: String::new(),
            category: Some("Protein".into()),
            status: AvailabilityFilter::Available,
        };
        let names: Vec<_> = board.filter(&filter).into_iter().map(|i| i.name).collect();
        assert_eq!(names, vec!["Beef Patty"]);

        let filter = IngredientFilter {
            query: "SEA".into(),
            ..IngredientFilter::default()
        };
        assert_eq!(board.filter(&filter)[0].name, "Salmon Fillet");
        assert_eq!(board.categories(), vec!["Dairy", "Protein", "Herbs", "Seafood"]);
    }

    fn any_channel() -> impl Strategy<Value = IngredientChannel> {
        prop_oneof![Just(IngredientChannel::Delivery), Just(IngredientChannel::Takeaway)]
    }

    proptest! {
        #[test]
        fn prop_master_tracks_channels(ops in proptest::collection::vec((any_channel(), any::<bool>()), 1..16)) {
            let (board, _) = board();
            for (channel, available) in ops {
                let i = board.set_channel("4", channel, available).unwrap();
                prop_assert_eq!(i.available, i.delivery_available && i.takeaway_available);
            }
        }
    }
}
