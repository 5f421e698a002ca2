//! Menudeck back office
//!
//! [`BackOffice`] owns one instance of every service and shares the pending
//! change log between the editing screens and the deployment runner.
//! [`BackOfficeConfig`] is loaded from TOML.

#![warn(unreachable_pub)]
#![allow(missing_docs)]

pub mod backoffice;
pub mod config;
pub mod error;

pub use backoffice::{BackOffice, BackOfficeBuilder};
pub use config::{BackOfficeConfig, LogFormat, LoggingConfig};
pub use error::{BackOfficeError, ConfigError};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
