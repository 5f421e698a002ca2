//! Upload history
//!
//! The stored list is merged with a fixed seed on load: stored entries
//! first, then seed entries, keeping the first occurrence of each id.

use crate::error::UploadError;
use crate::file::UploadKind;
use crate::parser::ParseSummary;
use crate::storage::KeyValueStore;
use chrono::{NaiveDate, NaiveDateTime};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Storage key for the history list
pub const HISTORY_KEY: &str = "bulkUploadHistory";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HistoryStatus {
    Completed,
    Partial,
    Failed,
}

impl HistoryStatus {
    /// Completed when every row succeeded, failed when none did
    #[must_use]
    pub fn from_counts(success: usize, total: usize) -> Self {
        if success == total {
            HistoryStatus::Completed
        } else if success > 0 {
            HistoryStatus::Partial
        } else {
            HistoryStatus::Failed
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadHistoryItem {
    pub id: String,
    pub upload_type: UploadKind,
    pub file_name: String,
    pub upload_date: NaiveDateTime,
    pub uploaded_by: String,
    pub total_items: usize,
    pub success_count: usize,
    pub failed_count: usize,
    pub status: HistoryStatus,
}

impl UploadHistoryItem {
    #[must_use]
    pub fn new(
        id: impl Into<String>,
        upload_type: UploadKind,
        file_name: impl Into<String>,
        upload_date: NaiveDateTime,
        uploaded_by: impl Into<String>,
        summary: ParseSummary,
    ) -> Self {
        Self {
            id: id.into(),
            upload_type,
            file_name: file_name.into(),
            upload_date,
            uploaded_by: uploaded_by.into(),
            total_items: summary.total,
            success_count: summary.success,
            failed_count: summary.failed,
            status: HistoryStatus::from_counts(summary.success, summary.total),
        }
    }
}

pub struct UploadHistory {
    store: Arc<dyn KeyValueStore>,
    items: RwLock<Vec<UploadHistoryItem>>,
}

impl std::fmt::Debug for UploadHistory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UploadHistory")
            .field("items", &self.items.read().len())
            .finish_non_exhaustive()
    }
}

impl UploadHistory {
    /// Read the stored list and merge it with the seed history
    ///
    /// # Errors
    /// Returns an error if the store cannot be read or holds malformed data
    pub async fn load(store: Arc<dyn KeyValueStore>) -> Result<Self, UploadError> {
        let stored: Vec<UploadHistoryItem> = match store.get(HISTORY_KEY).await? {
            Some(value) => serde_json::from_value(value)?,
            None => Vec::new(),
        };
        tracing::debug!(stored = stored.len(), "loaded upload history");
        Ok(Self {
            store,
            items: RwLock::new(merge(stored, seed_history())),
        })
    }

    /// Newest first
    #[must_use]
    pub fn items(&self) -> Vec<UploadHistoryItem> {
        self.items.read().clone()
    }

    #[must_use]
    pub fn for_kind(&self, kind: UploadKind) -> Vec<UploadHistoryItem> {
        self.items
            .read()
            .iter()
            .filter(|i| i.upload_type == kind)
            .cloned()
            .collect()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.read().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.read().is_empty()
    }

    /// Persist the list with `item` prepended, then update the in-memory copy
    ///
    /// # Errors
    /// Returns an error if the store cannot be written; the history is then
    /// left unchanged
    pub async fn record(&self, item: UploadHistoryItem) -> Result<(), UploadError> {
        let mut next = self.items.read().clone();
        next.insert(0, item);
        self.store
            .set(HISTORY_KEY, serde_json::to_value(&next)?)
            .await?;
        *self.items.write() = next;
        Ok(())
    }
}

fn merge(stored: Vec<UploadHistoryItem>, seed: Vec<UploadHistoryItem>) -> Vec<UploadHistoryItem> {
    let mut merged: Vec<UploadHistoryItem> = Vec::with_capacity(stored.len() + seed.len());
    for item in stored.into_iter().chain(seed) {
        if !merged.iter().any(|m| m.id == item.id) {
            merged.push(item);
        }
    }
    merged
}

fn seed_history() -> Vec<UploadHistoryItem> {
    let at = |y, m, d, h, min| {
        NaiveDate::from_ymd_opt(y, m, d)
            .and_then(|date| date.and_hms_opt(h, min, 0))
            .unwrap_or_default()
    };
    let summary = |total, success, failed| ParseSummary { total, success, failed };
    vec![
        UploadHistoryItem::new("1", UploadKind::Menu, "menu-items-january.xlsx", at(2025, 1, 10, 14, 30), "John Smith", summary(45, 45, 0)),
        UploadHistoryItem::new("2", UploadKind::Location, "new-store-locations.csv", at(2025, 1, 8, 9, 15), "Sarah Johnson", summary(12, 10, 2)),
        UploadHistoryItem::new("3", UploadKind::Menu, "seasonal-menu-winter.xlsx", at(2025, 1, 5, 16, 45), "Mike Chen", summary(28, 25, 3)),
        UploadHistoryItem::new("4", UploadKind::Location, "expansion-stores-Q1.xlsx", at(2025, 1, 3, 11, 20), "Emily Davis", summary(8, 8, 0)),
        UploadHistoryItem::new("5", UploadKind::Menu, "breakfast-items.csv", at(2024, 12, 28, 8, 30), "John Smith", summary(15, 0, 15)),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::InMemoryStore;
    use pretty_assertions::assert_eq;

    fn item(id: &str, file: &str) -> UploadHistoryItem {
        UploadHistoryItem::new(
            id,
            UploadKind::Menu,
            file,
            NaiveDate::from_ymd_opt(2025, 2, 1).unwrap().and_hms_opt(12, 0, 0).unwrap(),
            "Current User",
            ParseSummary { total: 8, success: 5, failed: 3 },
        )
    }

    #[test]
    fn status_from_counts() {
        assert_eq!(HistoryStatus::from_counts(8, 8), HistoryStatus::Completed);
        assert_eq!(HistoryStatus::from_counts(5, 8), HistoryStatus::Partial);
        assert_eq!(HistoryStatus::from_counts(0, 8), HistoryStatus::Failed);
    }

    #[test]
    fn seed_statuses_match_counts() {
        let statuses: Vec<_> = seed_history().into_iter().map(|i| i.status).collect();
        assert_eq!(
            statuses,
            vec![
                HistoryStatus::Completed,
                HistoryStatus::Partial,
                HistoryStatus::Partial,
                HistoryStatus::Completed,
                HistoryStatus::Failed,
            ]
        );
    }

    #[test]
    fn merge_prefers_stored_and_dedups() {
        let merged = merge(vec![item("9", "new.csv"), item("2", "edited.csv")], seed_history());
        let ids: Vec<_> = merged.iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, vec!["9", "2", "1", "3", "4", "5"]);
        assert_eq!(merged[1].file_name, "edited.csv");
    }

    #[tokio::test]
    async fn empty_store_loads_seed() {
        let history = UploadHistory::load(Arc::new(InMemoryStore::new())).await.unwrap();
        assert_eq!(history.len(), 5);
        assert_eq!(history.for_kind(UploadKind::Location).len(), 2);
    }

    #[tokio::test]
    async fn recorded_entries_persist_and_reload() {
        let store: Arc<dyn KeyValueStore> = Arc::new(InMemoryStore::new());
        let history = UploadHistory::load(store.clone()).await.unwrap();
        history.record(item("10", "menu.xlsx")).await.unwrap();

        let reloaded = UploadHistory::load(store).await.unwrap();
        assert_eq!(reloaded.len(), 6);
        assert_eq!(reloaded.items()[0].file_name, "menu.xlsx");
    }

    #[tokio::test]
    async fn failed_write_leaves_history_unchanged() {
        let history = UploadHistory::load(Arc::new(crate::storage::ReadOnlyStore)).await.unwrap();
        let err = history.record(item("10", "menu.xlsx")).await.unwrap_err();

        assert!(matches!(err, UploadError::Storage { .. }));
        assert_eq!(history.len(), 5);
        assert!(history.items().iter().all(|i| i.id != "10"));
    }
}
