//! Menudeck domain model
//!
//! Shared types for the back-office services:
//!
//! - [`ChangeLogEntry`]: an edit intent waiting to be deployed
//! - [`DeploymentRecord`]: one publish run and its scripted log
//! - [`StoreChannelState`]: per-store fulfilment channel switches
//!
//! Services live in their own crates and exchange these types.

#![warn(unreachable_pub)]
#![allow(missing_docs)]

mod change;
mod channel;
mod deployment;
mod error;
mod ids;

pub use change::{ChangeAction, ChangeLogEntry, ChangeType, NewChange};
pub use channel::{Channel, ChannelStatus, StoreChannelState, StoreStatus};
pub use deployment::{DeploymentRecord, DeploymentStatus, Environment};
pub use error::ParseEnumError;
pub use ids::{ChangeId, DeploymentId, StoreId, UploadId};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
