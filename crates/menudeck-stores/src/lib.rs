//! Menudeck store management
//!
//! - [`StoreRepository`]: store directory plus per-store channel state and
//!   operating hours, with an in-memory implementation seeded with the
//!   chain's stores
//! - [`StoreChannels`]: channel toggles from the quick selector and the
//!   store status screen, master open/closed switch, and the start-of-day
//!   reopening of temporarily disabled channels
//! - [`OperatingHours`]: weekly opening hours

#![warn(unreachable_pub)]
#![allow(missing_docs)]

pub mod channels;
pub mod error;
pub mod hours;
pub mod repository;
pub mod seed;

pub use channels::{StoreChannels, ToggleSource};
pub use error::StoreError;
pub use hours::{DayHours, OperatingHours};
pub use repository::{InMemoryStoreRepository, StoreRecord, StoreRepository};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
