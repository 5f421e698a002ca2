//! Icon identifiers
//!
//! Small badges (Beef, Spicy, Halal, ...) that enrichment forms attach to
//! products. Create, rename and delete each log an `identifier` change.

use crate::error::CatalogError;
use menudeck_deploy::ChangeLog;
use menudeck_model::{ChangeAction, ChangeLogEntry, ChangeType, NewChange};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use ulid::Ulid;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IconIdentifier {
    pub id: String,
    pub name: String,
    pub icon: String,
}

impl IconIdentifier {
    fn new(id: impl Into<String>, name: impl Into<String>, icon: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            icon: icon.into(),
        }
    }
}

pub struct IconIdentifiers {
    items: RwLock<Vec<IconIdentifier>>,
    changes: Arc<ChangeLog>,
}

impl std::fmt::Debug for IconIdentifiers {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IconIdentifiers")
            .field("count", &self.items.read().len())
            .finish_non_exhaustive()
    }
}

impl IconIdentifiers {
    /// Seeded with the default badge set
    #[must_use]
    pub fn new(changes: Arc<ChangeLog>) -> Self {
        let items = vec![
            IconIdentifier::new("1", "Beef", "🥩"),
            IconIdentifier::new("2", "Chicken", "🍗"),
            IconIdentifier::new("3", "Spicy", "🌶️"),
            IconIdentifier::new("4", "Vegetarian", "🥬"),
            IconIdentifier::new("5", "Seafood", "🦐"),
            IconIdentifier::new("6", "Halal", "☪️"),
            IconIdentifier::new("7", "Gluten Free", "🌾"),
            IconIdentifier::new("8", "Dairy Free", "🥛"),
        ];
        Self {
            items: RwLock::new(items),
            changes,
        }
    }

    #[must_use]
    pub fn list(&self) -> Vec<IconIdentifier> {
        self.items.read().clone()
    }

    /// Case-insensitive name search
    #[must_use]
    pub fn search(&self, query: &str) -> Vec<IconIdentifier> {
        let query = query.to_lowercase();
        self.items
            .read()
            .iter()
            .filter(|i| i.name.to_lowercase().contains(&query))
            .cloned()
            .collect()
    }

    /// # Errors
    /// Returns `CatalogError::MissingField` if name or icon is blank
    pub fn create(&self, name: &str, icon: &str) -> Result<(IconIdentifier, ChangeLogEntry), CatalogError> {
        CatalogError::require("name", name)?;
        CatalogError::require("icon", icon)?;

        let identifier = IconIdentifier::new(Ulid::new().to_string(), name.trim(), icon.trim());
        self.items.write().push(identifier.clone());
        let entry = self.record(
            ChangeAction::Created,
            &identifier.name,
            format!("Created new icon identifier {}", identifier.name),
        );
        Ok((identifier, entry))
    }

    /// # Errors
    /// - `CatalogError::UnknownIdentifier` if the id does not exist
    /// - `CatalogError::MissingField` if name or icon is blank
    pub fn update(&self, id: &str, name: &str, icon: &str) -> Result<ChangeLogEntry, CatalogError> {
        CatalogError::require("name", name)?;
        CatalogError::require("icon", icon)?;
        {
            let mut items = self.items.write();
            let item = items
                .iter_mut()
                .find(|i| i.id == id)
                .ok_or_else(|| CatalogError::UnknownIdentifier(id.to_string()))?;
            item.name = name.trim().to_string();
            item.icon = icon.trim().to_string();
        }
        let name = name.trim();
        Ok(self.record(
            ChangeAction::Updated,
            name,
            format!("Updated icon identifier {name}"),
        ))
    }

    /// # Errors
    /// Returns `CatalogError::UnknownIdentifier` if the id does not exist
    pub fn delete(&self, id: &str) -> Result<ChangeLogEntry, CatalogError> {
        let removed = {
            let mut items = self.items.write();
            let pos = items
                .iter()
                .position(|i| i.id == id)
                .ok_or_else(|| CatalogError::UnknownIdentifier(id.to_string()))?;
            items.remove(pos)
        };
        Ok(self.record(
            ChangeAction::Deleted,
            &removed.name,
            format!("Deleted icon identifier {}", removed.name),
        ))
    }

    fn record(&self, action: ChangeAction, name: &str, description: String) -> ChangeLogEntry {
        let entry = self
            .changes
            .add_change(NewChange::new(ChangeType::Identifier, action, name, description));
        tracing::info!(identifier = name, %action, "icon identifier changed");
        entry
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use menudeck_deploy::ManualClock;

    fn identifiers() -> (IconIdentifiers, Arc<ChangeLog>) {
        let changes = Arc::new(ChangeLog::new(Arc::new(ManualClock::default())));
        (IconIdentifiers::new(changes.clone()), changes)
    }

    #[test]
    fn crud_logs_each_step() {
        let (ids, changes) = identifiers();
        let (created, _) = ids.create("Kids", "🧒").unwrap();
        ids.update(&created.id, "Kids Menu", "🧒").unwrap();
        ids.delete(&created.id).unwrap();

        let descriptions: Vec<_> = changes.changes().into_iter().map(|c| c.description).collect();
        assert_eq!(
            descriptions,
            vec![
                "Created new icon identifier Kids",
                "Updated icon identifier Kids Menu",
                "Deleted icon identifier Kids Menu",
            ]
        );
        assert_eq!(ids.list().len(), 8);
    }

    #[test]
    fn blank_icon_rejected() {
        let (ids, changes) = identifiers();
        let err = ids.create("Kids", " ").unwrap_err();
        assert_eq!(err, CatalogError::MissingField { field: "icon" });
        assert!(changes.is_empty());
    }

    #[test]
    fn search_is_case_insensitive() {
        let (ids, _) = identifiers();
        let found: Vec<_> = ids.search("free").into_iter().map(|i| i.name).collect();
        assert_eq!(found, vec!["Gluten Free", "Dairy Free"]);
    }

    #[test]
    fn unknown_identifier_delete() {
        let (ids, _) = identifiers();
        assert!(matches!(ids.delete("99"), Err(CatalogError::UnknownIdentifier(_))));
    }
}
