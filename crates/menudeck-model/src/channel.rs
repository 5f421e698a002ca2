//! Store fulfilment channels

use crate::error::ParseEnumError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Fulfilment mode a store can switch on and off
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Channel {
    Delivery,
    Takeaway,
    Curbside,
}

impl Channel {
    /// Every channel, in display order
    pub const ALL: [Channel; 3] = [Channel::Delivery, Channel::Takeaway, Channel::Curbside];

    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Channel::Delivery => "delivery",
            Channel::Takeaway => "takeaway",
            Channel::Curbside => "curbside",
        }
    }

    #[must_use]
    pub fn display_name(&self) -> &'static str {
        match self {
            Channel::Delivery => "Delivery",
            Channel::Takeaway => "Takeaway",
            Channel::Curbside => "Curbside",
        }
    }
}

impl FromStr for Channel {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "delivery" => Ok(Channel::Delivery),
            "takeaway" => Ok(Channel::Takeaway),
            "curbside" => Ok(Channel::Curbside),
            _ => Err(ParseEnumError::new("channel", s)),
        }
    }
}

impl std::fmt::Display for Channel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Three-way channel status shown on the store status screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChannelStatus {
    On,
    Off,
    /// Off until the next business day
    Temporary,
}

/// Aggregate open state derived from the three channels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreStatus {
    Open,
    Partial,
    Closed,
}

impl StoreStatus {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            StoreStatus::Open => "open",
            StoreStatus::Partial => "partial",
            StoreStatus::Closed => "closed",
        }
    }

    #[must_use]
    pub fn describe(&self) -> &'static str {
        match self {
            StoreStatus::Open => "Store is currently open",
            StoreStatus::Partial => "Store is partially open",
            StoreStatus::Closed => "Store is currently closed",
        }
    }
}

impl std::fmt::Display for StoreStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(self.as_str())
    }
}

/// Channel switches for one store
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreChannelState {
    pub delivery: bool,
    pub takeaway: bool,
    pub curbside: bool,
    #[serde(default)]
    pub delivery_temporary: bool,
    #[serde(default)]
    pub takeaway_temporary: bool,
    #[serde(default)]
    pub curbside_temporary: bool,
}

impl StoreChannelState {
    /// State with the given switches and no temporary flags
    #[inline]
    #[must_use]
    pub fn new(delivery: bool, takeaway: bool, curbside: bool) -> Self {
        Self {
            delivery,
            takeaway,
            curbside,
            delivery_temporary: false,
            takeaway_temporary: false,
            curbside_temporary: false,
        }
    }

    #[inline]
    #[must_use]
    pub fn all_on() -> Self {
        Self::new(true, true, true)
    }

    #[must_use]
    pub fn is_enabled(&self, channel: Channel) -> bool {
        match channel {
            Channel::Delivery => self.delivery,
            Channel::Takeaway => self.takeaway,
            Channel::Curbside => self.curbside,
        }
    }

    #[must_use]
    pub fn is_temporary(&self, channel: Channel) -> bool {
        match channel {
            Channel::Delivery => self.delivery_temporary,
            Channel::Takeaway => self.takeaway_temporary,
            Channel::Curbside => self.curbside_temporary,
        }
    }

    /// Overwrite one channel switch and its temporary flag
    pub fn set(&mut self, channel: Channel, enabled: bool, temporary: bool) {
        let (flag, temp) = match channel {
            Channel::Delivery => (&mut self.delivery, &mut self.delivery_temporary),
            Channel::Takeaway => (&mut self.takeaway, &mut self.takeaway_temporary),
            Channel::Curbside => (&mut self.curbside, &mut self.curbside_temporary),
        };
        *flag = enabled;
        *temp = temporary;
    }

    /// Master open/closed switch: every channel to `enabled`, flags cleared
    pub fn set_all(&mut self, enabled: bool) {
        *self = Self::new(enabled, enabled, enabled);
    }

    #[must_use]
    pub fn status(&self, channel: Channel) -> ChannelStatus {
        if self.is_enabled(channel) {
            ChannelStatus::On
        } else if self.is_temporary(channel) {
            ChannelStatus::Temporary
        } else {
            ChannelStatus::Off
        }
    }

    #[must_use]
    pub fn store_status(&self) -> StoreStatus {
        let enabled = Channel::ALL.iter().filter(|c| self.is_enabled(**c)).count();
        match enabled {
            0 => StoreStatus::Closed,
            n if n == Channel::ALL.len() => StoreStatus::Open,
            _ => StoreStatus::Partial,
        }
    }

    /// Whether the master switch reads as open (any channel on)
    #[inline]
    #[must_use]
    pub fn is_open(&self) -> bool {
        self.store_status() != StoreStatus::Closed
    }

    /// Channels currently off with the temporary flag set
    #[must_use]
    pub fn temporary_channels(&self) -> Vec<Channel> {
        Channel::ALL
            .into_iter()
            .filter(|c| !self.is_enabled(*c) && self.is_temporary(*c))
            .collect()
    }
}

impl Default for StoreChannelState {
    fn default() -> Self {
        Self::all_on()
    }
}
