//! Menudeck deployment engine
//!
//! Holds the process-wide deployment state as explicit services:
//!
//! - [`ChangeLog`]: ordered queue of pending edit intents
//! - [`NewProductsCounter`]: badge count of uploaded, undeployed products
//! - [`DeploymentHistory`]: every deployment run, newest first
//! - [`DeploymentRunner`]: validates a [`DeploySelection`] and walks the
//!   scripted step sequence over an injected [`Clock`]
//!
//! # Example
//!
//! ```rust,ignore
//! use menudeck_deploy::{DeploymentRunner, DeploySelection, ManualClock};
//! use menudeck_model::Environment;
//!
//! # async fn example(runner: DeploymentRunner) -> Result<(), Box<dyn std::error::Error>> {
//! let mut selection = DeploySelection::new();
//! selection.select_environment(Environment::Production);
//!
//! let outcome = runner.deploy(&mut selection).await?;
//! println!("{}", outcome.summary);
//! # Ok(())
//! # }
//! ```

#![warn(unreachable_pub)]
#![allow(missing_docs)]

pub mod changelog;
pub mod clock;
pub mod counter;
pub mod error;
pub mod history;
pub mod plan;
pub mod runner;
pub mod selection;
pub mod state_machine;
pub mod target;

pub use changelog::ChangeLog;
pub use clock::{Clock, ManualClock, SystemClock};
pub use counter::NewProductsCounter;
pub use error::{DeployError, TargetError};
pub use history::{DeploymentDraft, DeploymentHistory};
pub use plan::{DeployStep, StepDelays};
pub use runner::{DeploymentOutcome, DeploymentRunner, RunnerConfig};
pub use selection::{DeployRequest, DeploySelection};
pub use target::{DeploymentTarget, SimulatedTarget};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
