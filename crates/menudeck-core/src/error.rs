//! Facade errors

use menudeck_catalog::CatalogError;
use menudeck_deploy::DeployError;
use menudeck_stores::StoreError;
use menudeck_upload::UploadError;
use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("failed to render config: {0}")]
    Render(#[from] toml::ser::Error),
}

/// Any error surfaced by the back office
#[derive(Debug, thiserror::Error)]
pub enum BackOfficeError {
    #[error(transparent)]
    Deploy(#[from] DeployError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error(transparent)]
    Upload(#[from] UploadError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl BackOfficeError {
    /// Whether the error came from operator input and changed nothing
    #[must_use]
    pub fn is_validation(&self) -> bool {
        match self {
            Self::Deploy(e) => e.is_validation(),
            Self::Store(e) => e.is_validation(),
            Self::Catalog(e) => e.is_validation(),
            Self::Upload(e) => e.is_validation(),
            Self::Config(_) => false,
        }
    }
}
