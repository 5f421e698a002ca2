//! Upload errors

use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum UploadError {
    /// Extension is not csv, xls or xlsx
    #[error("unsupported file {file_name:?}: please upload a CSV or Excel file")]
    UnsupportedFile { file_name: String },

    /// Accept or export with no parsed preview
    #[error("no parsed upload to act on")]
    NothingParsed,

    #[error("failed to write workbook: {0}")]
    Workbook(#[from] rust_xlsxwriter::XlsxError),

    #[error("storage I/O error at {path}: {source}")]
    Storage {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed stored data: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl UploadError {
    /// Whether the error came from operator input
    #[inline]
    #[must_use]
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::UnsupportedFile { .. } | Self::NothingParsed)
    }

    pub(crate) fn storage(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Storage {
            path: path.into(),
            source,
        }
    }
}
