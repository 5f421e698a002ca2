//! Menudeck bulk upload
//!
//! - [`UploadFile`]: extension check for `.csv`, `.xls`, `.xlsx`
//! - [`UploadParser`]: turns a file into preview rows; [`CannedParser`]
//!   returns fixed rows after a delay instead of reading the file
//! - [`BulkUploader`]: preview, accept or cancel, and export failed rows
//! - [`UploadHistory`]: accepted uploads persisted through a
//!   [`KeyValueStore`] and merged with the seed history on load
//! - [`export`]: the `Failed Items` workbook and blank templates

#![warn(unreachable_pub)]
#![allow(missing_docs)]

pub mod error;
pub mod export;
pub mod file;
pub mod history;
pub mod parser;
pub mod session;
pub mod storage;

pub use error::UploadError;
pub use export::{ErrorExport, ERROR_SHEET};
pub use file::{UploadFile, UploadKind};
pub use history::{HistoryStatus, UploadHistory, UploadHistoryItem, HISTORY_KEY};
pub use parser::{CannedParser, ItemStatus, ParseSummary, ParsedItem, UploadParser};
pub use session::{AcceptedUpload, BulkUploader};
pub use storage::{InMemoryStore, JsonFileStore, KeyValueStore};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
