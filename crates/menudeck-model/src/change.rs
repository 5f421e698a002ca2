//! Pending change log entries
//!
//! A change is an edit intent recorded by an editing screen (enrichment,
//! ingredient toggles, bulk upload). It is not linked to the edited record;
//! the log only describes what will be published by the next deployment.

use crate::error::ParseEnumError;
use crate::ids::ChangeId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Kind of catalog item a change touches
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeType {
    Product,
    Recipe,
    Identifier,
    Ingredient,
    Coupon,
}

impl ChangeType {
    /// Human-readable label used in deployment summaries
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            ChangeType::Product => "Product",
            ChangeType::Recipe => "Recipe",
            ChangeType::Identifier => "Icon Identifier",
            ChangeType::Ingredient => "Ingredient",
            ChangeType::Coupon => "Coupon",
        }
    }

    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            ChangeType::Product => "product",
            ChangeType::Recipe => "recipe",
            ChangeType::Identifier => "identifier",
            ChangeType::Ingredient => "ingredient",
            ChangeType::Coupon => "coupon",
        }
    }
}

impl FromStr for ChangeType {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "product" => Ok(ChangeType::Product),
            "recipe" => Ok(ChangeType::Recipe),
            "identifier" => Ok(ChangeType::Identifier),
            "ingredient" => Ok(ChangeType::Ingredient),
            "coupon" => Ok(ChangeType::Coupon),
            _ => Err(ParseEnumError::new("change type", s)),
        }
    }
}

impl std::fmt::Display for ChangeType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What happened to the item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeAction {
    Created,
    Updated,
    Deleted,
}

impl ChangeAction {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            ChangeAction::Created => "created",
            ChangeAction::Updated => "updated",
            ChangeAction::Deleted => "deleted",
        }
    }
}

impl FromStr for ChangeAction {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "created" => Ok(ChangeAction::Created),
            "updated" => Ok(ChangeAction::Updated),
            "deleted" => Ok(ChangeAction::Deleted),
            _ => Err(ParseEnumError::new("change action", s)),
        }
    }
}

impl std::fmt::Display for ChangeAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Change as submitted by an editing screen, before id and timestamp
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewChange {
    #[serde(rename = "type")]
    pub change_type: ChangeType,
    pub action: ChangeAction,
    pub item_name: String,
    pub description: String,
}

impl NewChange {
    #[inline]
    #[must_use]
    pub fn new(
        change_type: ChangeType,
        action: ChangeAction,
        item_name: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            change_type,
            action,
            item_name: item_name.into(),
            description: description.into(),
        }
    }
}

/// Recorded change awaiting deployment
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangeLogEntry {
    pub id: ChangeId,
    #[serde(rename = "type")]
    pub change_type: ChangeType,
    pub action: ChangeAction,
    pub item_name: String,
    pub description: String,
    pub timestamp: DateTime<Utc>,
}

impl ChangeLogEntry {
    /// Stamp a submitted change with a fresh id
    #[must_use]
    pub fn record(change: NewChange, timestamp: DateTime<Utc>) -> Self {
        Self {
            id: ChangeId::new(),
            change_type: change.change_type,
            action: change.action,
            item_name: change.item_name,
            description: change.description,
            timestamp,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn change_type_wire_names() {
        let json = serde_json::to_string(&ChangeType::Identifier).unwrap();
        assert_eq!(json, "\"identifier\"");
        assert_eq!(ChangeType::Identifier.label(), "Icon Identifier");
    }

    #[test]
    fn change_type_from_str() {
        assert_eq!("Coupon".parse::<ChangeType>().unwrap(), ChangeType::Coupon);
        assert!("menu".parse::<ChangeType>().is_err());
    }

    #[test]
    fn record_keeps_submitted_fields() {
        let now = Utc::now();
        let entry = ChangeLogEntry::record(
            NewChange::new(ChangeType::Product, ChangeAction::Updated, "Margherita", "Updated product enrichment"),
            now,
        );
        assert_eq!(entry.change_type, ChangeType::Product);
        assert_eq!(entry.item_name, "Margherita");
        assert_eq!(entry.timestamp, now);
    }

    #[test]
    fn entry_serializes_type_field() {
        let entry = ChangeLogEntry::record(
            NewChange::new(ChangeType::Coupon, ChangeAction::Created, "WELCOME20", ""),
            Utc::now(),
        );
        let value: serde_json::Value = serde_json::to_value(&entry).unwrap();
        assert_eq!(value["type"], "coupon");
        assert_eq!(value["itemName"], "WELCOME20");
    }
}
