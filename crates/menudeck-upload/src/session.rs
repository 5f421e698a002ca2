//! Upload workflow: parse, preview, accept or cancel
//!
//! Accepting a menu upload logs a `product/created` change and bumps the
//! new-products counter. Location uploads only land in history.

use crate::error::UploadError;
use crate::export::{self, ErrorExport};
use crate::file::{UploadFile, UploadKind};
use crate::history::{UploadHistory, UploadHistoryItem};
use crate::parser::{ParseSummary, ParsedItem, UploadParser};
use menudeck_deploy::{ChangeLog, Clock, NewProductsCounter};
use menudeck_model::{ChangeAction, ChangeLogEntry, ChangeType, NewChange, UploadId};
use parking_lot::Mutex;
use std::path::Path;
use std::sync::Arc;

#[derive(Debug, Clone)]
struct Preview {
    kind: UploadKind,
    file: UploadFile,
    items: Vec<ParsedItem>,
}

/// What an accepted upload produced
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AcceptedUpload {
    pub history: UploadHistoryItem,
    /// Present for menu uploads
    pub change: Option<ChangeLogEntry>,
    /// Operator notice
    pub message: String,
}

pub struct BulkUploader {
    parser: Arc<dyn UploadParser>,
    history: Arc<UploadHistory>,
    changes: Arc<ChangeLog>,
    new_products: Arc<NewProductsCounter>,
    clock: Arc<dyn Clock>,
    uploaded_by: String,
    preview: Mutex<Option<Preview>>,
}

impl std::fmt::Debug for BulkUploader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BulkUploader")
            .field("uploaded_by", &self.uploaded_by)
            .field("has_preview", &self.preview.lock().is_some())
            .finish_non_exhaustive()
    }
}

impl BulkUploader {
    #[must_use]
    pub fn new(
        parser: Arc<dyn UploadParser>,
        history: Arc<UploadHistory>,
        changes: Arc<ChangeLog>,
        new_products: Arc<NewProductsCounter>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            parser,
            history,
            changes,
            new_products,
            clock,
            uploaded_by: "Current User".to_string(),
            preview: Mutex::new(None),
        }
    }

    #[inline]
    #[must_use]
    pub fn with_uploaded_by(mut self, name: impl Into<String>) -> Self {
        self.uploaded_by = name.into();
        self
    }

    #[must_use]
    pub fn history(&self) -> &Arc<UploadHistory> {
        &self.history
    }

    /// Parse a file and hold the rows for review, replacing any earlier preview
    ///
    /// # Errors
    /// - `UploadError::UnsupportedFile` for a non-spreadsheet file name
    /// - any error from the parser
    pub async fn upload(&self, kind: UploadKind, file_name: &str) -> Result<ParseSummary, UploadError> {
        let file = match UploadFile::new(file_name) {
            Ok(file) => file,
            Err(e) => {
                tracing::warn!("{}", e);
                return Err(e);
            }
        };
        let items = self.parser.parse(kind, &file).await?;
        let summary = ParseSummary::of(&items);
        tracing::info!(
            file = file.name(),
            %kind,
            success = summary.success,
            failed = summary.failed,
            "upload parsed"
        );
        *self.preview.lock() = Some(Preview { kind, file, items });
        Ok(summary)
    }

    /// Rows awaiting accept or cancel
    #[must_use]
    pub fn preview(&self) -> Option<Vec<ParsedItem>> {
        self.preview.lock().as_ref().map(|p| p.items.clone())
    }

    /// Promote the successful rows
    ///
    /// History is persisted first; the change log, the counter and the
    /// preview are only touched once that write succeeds.
    ///
    /// # Errors
    /// - `UploadError::NothingParsed` with no preview open
    /// - storage errors while persisting history (the preview stays open)
    pub async fn accept(&self) -> Result<AcceptedUpload, UploadError> {
        let preview = self
            .preview
            .lock()
            .clone()
            .filter(|p| !p.items.is_empty())
            .ok_or(UploadError::NothingParsed)?;

        let summary = ParseSummary::of(&preview.items);
        let file_name = preview.file.name().to_string();

        let item = UploadHistoryItem::new(
            UploadId::new().to_string(),
            preview.kind,
            file_name.clone(),
            self.clock.now().naive_utc(),
            self.uploaded_by.clone(),
            summary,
        );
        if let Err(e) = self.history.record(item.clone()).await {
            tracing::warn!(file = %file_name, "upload history not saved: {}", e);
            return Err(e);
        }
        self.preview.lock().take();

        let change = match preview.kind {
            UploadKind::Menu => {
                let entry = self.changes.add_change(NewChange::new(
                    ChangeType::Product,
                    ChangeAction::Created,
                    format!("{} Products", summary.success),
                    format!("Bulk uploaded {} products from {}", summary.success, file_name),
                ));
                self.new_products.add(summary.success);
                Some(entry)
            }
            UploadKind::Location => None,
        };

        let message = match preview.kind {
            UploadKind::Menu => format!(
                "{} items added to Product Master List. Enrich and deploy to make them live.",
                summary.success
            ),
            UploadKind::Location => format!("{} store locations added successfully.", summary.success),
        };
        tracing::info!(kind = %preview.kind, accepted = summary.success, "upload accepted");
        Ok(AcceptedUpload {
            history: item,
            change,
            message,
        })
    }

    /// Discard the preview; returns whether one was open
    pub fn cancel(&self) -> bool {
        let cancelled = self.preview.lock().take().is_some();
        if cancelled {
            tracing::info!("upload cancelled, no items were added");
        }
        cancelled
    }

    /// Export the preview's failed rows into `dir`
    ///
    /// # Errors
    /// - `UploadError::NothingParsed` with no preview open
    /// - `UploadError::Workbook` if the file cannot be written
    pub fn export_errors(&self, dir: &Path) -> Result<ErrorExport, UploadError> {
        let (kind, items) = {
            let preview = self.preview.lock();
            let preview = preview.as_ref().ok_or(UploadError::NothingParsed)?;
            (preview.kind, preview.items.clone())
        };
        export::write_error_workbook(kind, &items, dir, self.clock.now().date_naive())
    }
}
