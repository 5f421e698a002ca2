//! Pending change queue
//!
//! Editing screens append edit intents here; the deployment runner
//! snapshots the queue when a run starts and removes exactly the
//! snapshotted entries once the run succeeds.

use crate::clock::Clock;
use menudeck_model::{ChangeId, ChangeLogEntry, NewChange};
use parking_lot::Mutex;
use std::collections::HashSet;
use std::sync::Arc;

/// Ordered, append-only (until deployed) queue of edit intents
#[derive(Debug)]
pub struct ChangeLog {
    entries: Mutex<Vec<ChangeLogEntry>>,
    clock: Arc<dyn Clock>,
}

impl ChangeLog {
    #[must_use]
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            entries: Mutex::new(Vec::new()),
            clock,
        }
    }

    /// Append a change stamped with a fresh id and the current time
    ///
    /// No deduplication: repeating an edit appends another entry.
    pub fn add_change(&self, change: NewChange) -> ChangeLogEntry {
        let entry = ChangeLogEntry::record(change, self.clock.now());
        tracing::debug!(
            id = %entry.id,
            change_type = %entry.change_type,
            action = %entry.action,
            "change recorded: {}",
            entry.item_name
        );
        self.entries.lock().push(entry.clone());
        entry
    }

    /// Empty the queue, returning how many entries were dropped
    pub fn clear_changes(&self) -> usize {
        let mut entries = self.entries.lock();
        let cleared = entries.len();
        entries.clear();
        cleared
    }

    /// Remove the given entries, keeping anything recorded after the snapshot
    pub fn clear_deployed(&self, deployed: &[ChangeLogEntry]) -> usize {
        let ids: HashSet<ChangeId> = deployed.iter().map(|e| e.id).collect();
        let mut entries = self.entries.lock();
        let before = entries.len();
        entries.retain(|e| !ids.contains(&e.id));
        before - entries.len()
    }

    #[inline]
    #[must_use]
    pub fn has_changes(&self) -> bool {
        !self.entries.lock().is_empty()
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        !self.has_changes()
    }

    /// Snapshot in insertion order
    #[must_use]
    pub fn changes(&self) -> Vec<ChangeLogEntry> {
        self.entries.lock().clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use menudeck_model::{ChangeAction, ChangeType};
    use proptest::prelude::*;

    fn log() -> ChangeLog {
        ChangeLog::new(Arc::new(ManualClock::default()))
    }

    fn product_update(name: &str) -> NewChange {
        NewChange::new(ChangeType::Product, ChangeAction::Updated, name, "Updated product enrichment")
    }

    #[test]
    fn add_change_appends_in_order() {
        let log = log();
        assert!(!log.has_changes());

        let first = log.add_change(product_update("Margherita"));
        let second = log.add_change(product_update("Margherita"));

        assert_ne!(first.id, second.id);
        let changes = log.changes();
        assert_eq!(changes.len(), 2);
        assert_eq!(changes[0].id, first.id);
        assert_eq!(changes[1].id, second.id);
        assert!(log.has_changes());
    }

    #[test]
    fn empty_fields_are_accepted() {
        let log = log();
        log.add_change(NewChange::new(ChangeType::Recipe, ChangeAction::Deleted, "", ""));
        assert_eq!(log.len(), 1);
    }

    #[test]
    fn clear_changes_empties_queue() {
        let log = log();
        log.add_change(product_update("A"));
        log.add_change(product_update("B"));

        assert_eq!(log.clear_changes(), 2);
        assert!(log.is_empty());
    }

    #[test]
    fn clear_deployed_keeps_later_entries() {
        let log = log();
        log.add_change(product_update("A"));
        let snapshot = log.changes();
        let late = log.add_change(product_update("B"));

        assert_eq!(log.clear_deployed(&snapshot), 1);
        let remaining = log.changes();
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].id, late.id);
    }

    proptest! {
        #[test]
        fn prop_each_add_grows_by_one(names in proptest::collection::vec("[a-z]{0,8}", 0..32)) {
            let log = log();
            let mut seen = Vec::new();
            for (i, name) in names.iter().enumerate() {
                let before = log.changes();
                let entry = log.add_change(product_update(name));
                seen.push(entry.id);

                let after = log.changes();
                prop_assert_eq!(after.len(), i + 1);
                prop_assert_eq!(&after[..before.len()], &before[..]);
            }
            let ids: Vec<_> = log.changes().into_iter().map(|e| e.id).collect();
            prop_assert_eq!(ids, seen);
        }
    }
}
