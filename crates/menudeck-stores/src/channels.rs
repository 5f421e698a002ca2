//! Channel toggles
//!
//! Two screens flip channels:
//!
//! - the quick selector, where switching a channel off is temporary (it is
//!   meant to come back at the start of the next business day)
//! - the store status screen, where off means off
//!
//! [`StoreChannels::reopen_temporary_channels`] performs the start-of-day
//! reset; scheduling it is left to the caller.

use crate::error::StoreError;
use crate::repository::StoreRepository;
use menudeck_model::{Channel, ChannelStatus, StoreChannelState, StoreId, StoreStatus};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Screen a toggle came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ToggleSource {
    /// Store selector header: disabling is temporary
    QuickSelector,
    /// Full store status screen: disabling is permanent
    StatusScreen,
}

/// Channel state service over a store repository
#[derive(Clone)]
pub struct StoreChannels {
    repo: Arc<dyn StoreRepository>,
}

impl std::fmt::Debug for StoreChannels {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StoreChannels").finish_non_exhaustive()
    }
}

impl StoreChannels {
    #[must_use]
    pub fn new(repo: Arc<dyn StoreRepository>) -> Self {
        Self { repo }
    }

    #[must_use]
    pub fn repository(&self) -> &Arc<dyn StoreRepository> {
        &self.repo
    }

    /// Current switches for a store (all on if unknown)
    #[must_use]
    pub fn get(&self, store: &StoreId) -> StoreChannelState {
        self.repo.channels(store)
    }

    /// Flip one channel
    ///
    /// Disabling from the quick selector marks the channel temporary;
    /// enabling always clears the mark.
    ///
    /// # Errors
    /// Returns `StoreError::UnknownStore` if the store is not in the directory
    pub fn set_channel(
        &self,
        store: &StoreId,
        channel: Channel,
        enabled: bool,
        source: ToggleSource,
    ) -> Result<StoreChannelState, StoreError> {
        let temporary = !enabled && source == ToggleSource::QuickSelector;
        let mut state = self.repo.channels(store);
        state.set(channel, enabled, temporary);
        self.repo.update_channels(store, state)?;

        if temporary {
            tracing::info!(
                store = %store,
                channel = %channel,
                "{} temporarily disabled until start of business",
                channel.display_name()
            );
        } else {
            tracing::info!(store = %store, channel = %channel, enabled, "channel updated");
        }
        Ok(state)
    }

    /// Set a channel from the status screen's on/off/temporary picker
    ///
    /// # Errors
    /// Returns `StoreError::UnknownStore` if the store is not in the directory
    pub fn set_channel_status(
        &self,
        store: &StoreId,
        channel: Channel,
        status: ChannelStatus,
    ) -> Result<StoreChannelState, StoreError> {
        let mut state = self.repo.channels(store);
        match status {
            ChannelStatus::On => state.set(channel, true, false),
            ChannelStatus::Off => state.set(channel, false, false),
            ChannelStatus::Temporary => state.set(channel, false, true),
        }
        self.repo.update_channels(store, state)?;
        tracing::info!(store = %store, channel = %channel, ?status, "channel status set");
        Ok(state)
    }

    /// Master switch: every channel on or off
    ///
    /// # Errors
    /// Returns `StoreError::UnknownStore` if the store is not in the directory
    pub fn set_store_open(&self, store: &StoreId, open: bool) -> Result<StoreChannelState, StoreError> {
        let mut state = self.repo.channels(store);
        state.set_all(open);
        self.repo.update_channels(store, state)?;
        tracing::info!(store = %store, open, "store operations switched");
        Ok(state)
    }

    #[must_use]
    pub fn store_status(&self, store: &StoreId) -> StoreStatus {
        self.repo.channels(store).store_status()
    }

    #[must_use]
    pub fn channel_status(&self, store: &StoreId, channel: Channel) -> ChannelStatus {
        self.repo.channels(store).status(channel)
    }

    /// Re-enable every temporarily disabled channel across all stores
    ///
    /// Returns the channels that were switched back on.
    pub fn reopen_temporary_channels(&self) -> Vec<(StoreId, Channel)> {
        let mut reopened = Vec::new();
        for (store, mut state) in self.repo.all_channels() {
            let channels = state.temporary_channels();
            if channels.is_empty() {
                continue;
            }
            for channel in &channels {
                state.set(*channel, true, false);
            }
            if let Err(e) = self.repo.update_channels(&store, state) {
                tracing::warn!(store = %store, "could not reopen channels: {}", e);
                continue;
            }
            reopened.extend(channels.into_iter().map(|c| (store.clone(), c)));
        }
        if !reopened.is_empty() {
            tracing::info!("reopened {} temporarily disabled channels", reopened.len());
        }
        reopened
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::InMemoryStoreRepository;
    use proptest::prelude::*;

    fn service() -> StoreChannels {
        StoreChannels::new(Arc::new(InMemoryStoreRepository::seeded()))
    }

    fn pavilion() -> StoreId {
        StoreId::from("pavilion")
    }

    #[test]
    fn quick_selector_off_is_temporary() {
        let channels = service();
        let state = channels
            .set_channel(&pavilion(), Channel::Delivery, false, ToggleSource::QuickSelector)
            .unwrap();

        assert!(!state.delivery);
        assert!(state.delivery_temporary);
        assert_eq!(channels.channel_status(&pavilion(), Channel::Delivery), ChannelStatus::Temporary);
    }

    #[test]
    fn re_enabling_clears_temporary_flag() {
        let channels = service();
        channels
            .set_channel(&pavilion(), Channel::Takeaway, false, ToggleSource::QuickSelector)
            .unwrap();
        let state = channels
            .set_channel(&pavilion(), Channel::Takeaway, true, ToggleSource::QuickSelector)
            .unwrap();

        assert!(state.takeaway);
        assert!(!state.takeaway_temporary);
    }

    #[test]
    fn status_screen_off_is_permanent() {
        let channels = service();
        let state = channels
            .set_channel(&pavilion(), Channel::Curbside, false, ToggleSource::StatusScreen)
            .unwrap();
        assert!(!state.curbside);
        assert!(!state.curbside_temporary);
        assert_eq!(channels.store_status(&pavilion()), StoreStatus::Partial);
    }

    #[test]
    fn master_switch_fans_out() {
        let channels = service();
        channels
            .set_channel(&pavilion(), Channel::Delivery, false, ToggleSource::QuickSelector)
            .unwrap();

        let closed = channels.set_store_open(&pavilion(), false).unwrap();
        assert_eq!(closed, StoreChannelState::new(false, false, false));
        assert_eq!(channels.store_status(&pavilion()), StoreStatus::Closed);

        let open = channels.set_store_open(&pavilion(), true).unwrap();
        assert_eq!(open, StoreChannelState::all_on());
    }

    #[test]
    fn status_picker_maps_to_flags() {
        let channels = service();
        let state = channels
            .set_channel_status(&pavilion(), Channel::Delivery, ChannelStatus::Temporary)
            .unwrap();
        assert!(!state.delivery && state.delivery_temporary);

        let state = channels
            .set_channel_status(&pavilion(), Channel::Delivery, ChannelStatus::Off)
            .unwrap();
        assert!(!state.delivery && !state.delivery_temporary);
    }

    #[test]
    fn unknown_store_is_rejected() {
        let channels = service();
        let err = channels
            .set_channel(&StoreId::from("atlantis"), Channel::Delivery, false, ToggleSource::QuickSelector)
            .unwrap_err();
        assert!(matches!(err, StoreError::UnknownStore(_)));
    }

    #[test]
    fn reopen_only_touches_temporary_channels() {
        let channels = service();
        let klcc = StoreId::from("klcc");
        channels
            .set_channel(&pavilion(), Channel::Delivery, false, ToggleSource::QuickSelector)
            .unwrap();
        channels
            .set_channel(&klcc, Channel::Takeaway, false, ToggleSource::StatusScreen)
            .unwrap();

        let reopened = channels.reopen_temporary_channels();
        assert_eq!(reopened, vec![(pavilion(), Channel::Delivery)]);
        assert_eq!(channels.get(&pavilion()), StoreChannelState::all_on());
        assert!(!channels.get(&klcc).takeaway);
        // seeded permanent closures stay closed
        assert!(!channels.get(&StoreId::from("tropicana")).delivery);
    }

    fn any_channel() -> impl Strategy<Value = Channel> {
        prop_oneof![Just(Channel::Delivery), Just(Channel::Takeaway), Just(Channel::Curbside)]
    }

    proptest! {
        #[test]
        fn prop_quick_toggle_flags(toggles in proptest::collection::vec((any_channel(), any::<bool>()), 1..20)) {
            let channels = service();
            for (channel, enabled) in toggles {
                let state = channels
                    .set_channel(&pavilion(), channel, enabled, ToggleSource::QuickSelector)
                    .unwrap();
                prop_assert_eq!(state.is_enabled(channel), enabled);
                prop_assert_eq!(state.is_temporary(channel), !enabled);
            }
        }
    }
}
