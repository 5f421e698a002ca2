//! Store directory
//!
//! [`StoreRepository`] is the seam for a real store backend. The in-memory
//! implementation keeps insertion order so listings match the seed order.

use crate::error::StoreError;
use crate::hours::OperatingHours;
use crate::seed::chain_stores;
use indexmap::IndexMap;
use menudeck_model::{StoreChannelState, StoreId};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};

/// Directory entry for one store
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreRecord {
    pub id: StoreId,
    pub name: String,
    pub address: String,
}

impl StoreRecord {
    #[must_use]
    pub fn new(id: impl Into<StoreId>, name: impl Into<String>, address: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            address: address.into(),
        }
    }

    /// Case-insensitive match on name or address
    #[must_use]
    pub fn matches(&self, query: &str) -> bool {
        let query = query.to_lowercase();
        self.name.to_lowercase().contains(&query) || self.address.to_lowercase().contains(&query)
    }
}

/// Storage for stores, their channel switches and hours
pub trait StoreRepository: Send + Sync {
    /// All stores, in directory order
    fn list(&self) -> Vec<StoreRecord>;

    fn get(&self, id: &StoreId) -> Option<StoreRecord>;

    #[must_use]
    fn exists(&self, id: &StoreId) -> bool {
        self.get(id).is_some()
    }

    /// Stores whose name or address contains `query`
    fn search(&self, query: &str) -> Vec<StoreRecord> {
        self.list().into_iter().filter(|s| s.matches(query)).collect()
    }

    /// Channel switches; unknown stores read as every channel on
    fn channels(&self, id: &StoreId) -> StoreChannelState;

    /// Overwrite a store's channel switches
    ///
    /// # Errors
    /// Returns `StoreError::UnknownStore` if the store is not in the directory
    fn update_channels(&self, id: &StoreId, state: StoreChannelState) -> Result<(), StoreError>;

    /// Every store's channel switches, in directory order
    fn all_channels(&self) -> Vec<(StoreId, StoreChannelState)>;

    /// Operating hours
    ///
    /// # Errors
    /// Returns `StoreError::UnknownStore` if the store is not in the directory
    fn hours(&self, id: &StoreId) -> Result<OperatingHours, StoreError>;

    /// Overwrite operating hours
    ///
    /// # Errors
    /// Returns `StoreError::UnknownStore` if the store is not in the directory
    fn update_hours(&self, id: &StoreId, hours: OperatingHours) -> Result<(), StoreError>;
}

#[derive(Debug, Clone)]
struct StoreEntry {
    record: StoreRecord,
    channels: StoreChannelState,
    hours: OperatingHours,
}

/// Process-local store directory
#[derive(Debug, Default)]
pub struct InMemoryStoreRepository {
    stores: RwLock<IndexMap<StoreId, StoreEntry>>,
}

impl InMemoryStoreRepository {
    /// Empty directory
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Directory seeded with the chain's stores
    #[must_use]
    pub fn seeded() -> Self {
        let repo = Self::new();
        for (record, channels) in chain_stores() {
            repo.insert(record, channels);
        }
        repo
    }

    /// Add or replace a store, resetting its hours to the default schedule
    pub fn insert(&self, record: StoreRecord, channels: StoreChannelState) {
        let entry = StoreEntry {
            record: record.clone(),
            channels,
            hours: OperatingHours::default(),
        };
        self.stores.write().insert(record.id, entry);
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.stores.read().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.stores.read().is_empty()
    }
}

impl StoreRepository for InMemoryStoreRepository {
    fn list(&self) -> Vec<StoreRecord> {
        self.stores.read().values().map(|e| e.record.clone()).collect()
    }

    fn get(&self, id: &StoreId) -> Option<StoreRecord> {
        self.stores.read().get(id).map(|e| e.record.clone())
    }

    fn channels(&self, id: &StoreId) -> StoreChannelState {
        self.stores
            .read()
            .get(id)
            .map_or_else(StoreChannelState::all_on, |e| e.channels)
    }

    fn update_channels(&self, id: &StoreId, state: StoreChannelState) -> Result<(), StoreError> {
        let mut stores = self.stores.write();
        let entry = stores
            .get_mut(id)
            .ok_or_else(|| StoreError::UnknownStore(id.clone()))?;
        entry.channels = state;
        Ok(())
    }

    fn all_channels(&self) -> Vec<(StoreId, StoreChannelState)> {
        self.stores
            .read()
            .iter()
            .map(|(id, e)| (id.clone(), e.channels))
            .collect()
    }

    fn hours(&self, id: &StoreId) -> Result<OperatingHours, StoreError> {
        self.stores
            .read()
            .get(id)
            .map(|e| e.hours.clone())
            .ok_or_else(|| StoreError::UnknownStore(id.clone()))
    }

    fn update_hours(&self, id: &StoreId, hours: OperatingHours) -> Result<(), StoreError> {
        let mut stores = self.stores.write();
        let entry = stores
            .get_mut(id)
            .ok_or_else(|| StoreError::UnknownStore(id.clone()))?;
        entry.hours = hours;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seeded_directory_keeps_order() {
        let repo = InMemoryStoreRepository::seeded();
        let ids: Vec<_> = repo.list().into_iter().take(3).map(|s| s.id).collect();
        assert_eq!(
            ids,
            vec![StoreId::from("pavilion"), StoreId::from("midvalley"), StoreId::from("1utama")]
        );
    }

    #[test]
    fn unknown_store_reads_all_on() {
        let repo = InMemoryStoreRepository::seeded();
        assert_eq!(repo.channels(&StoreId::from("nowhere")), StoreChannelState::all_on());
        assert!(!repo.channels(&StoreId::from("tropicana")).delivery);
    }

    #[test]
    fn update_unknown_store_fails() {
        let repo = InMemoryStoreRepository::new();
        let err = repo
            .update_channels(&StoreId::from("nowhere"), StoreChannelState::all_on())
            .unwrap_err();
        assert_eq!(err, StoreError::UnknownStore(StoreId::from("nowhere")));
    }

    #[test]
    fn search_matches_name_and_address() {
        let repo = InMemoryStoreRepository::seeded();
        let cyberjaya: Vec<_> = repo.search("cyberjaya").into_iter().map(|s| s.id).collect();
        assert_eq!(cyberjaya, vec![StoreId::from("dpulze"), StoreId::from("tamarind")]);

        let by_name = repo.search("KLCC");
        assert_eq!(by_name.len(), 1);
        assert_eq!(by_name[0].name, "Suria KLCC");
    }
}
