//! Spreadsheet export
//!
//! The error workbook holds one sheet of failed rows with the kind's
//! column headers. Blank cells become `N/A`, a missing error message
//! becomes `Unknown error`.

use crate::error::UploadError;
use crate::file::UploadKind;
use crate::parser::ParsedItem;
use chrono::NaiveDate;
use rust_xlsxwriter::{Format, Workbook, Worksheet};
use std::path::{Path, PathBuf};

/// Sheet name of the error workbook
pub const ERROR_SHEET: &str = "Failed Items";

const TEMPLATE_SHEET: &str = "Template";

/// Outcome of an error export
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ErrorExport {
    /// Nothing failed, no file written
    NoErrors,
    Written { path: PathBuf, rows: usize },
}

impl ErrorExport {
    /// Notice shown to the operator
    #[must_use]
    pub fn message(&self) -> String {
        match self {
            ErrorExport::NoErrors => "No Errors: All items were parsed successfully.".to_string(),
            ErrorExport::Written { path, rows } => {
                let name = path.file_name().map_or_else(
                    || path.display().to_string(),
                    |n| n.to_string_lossy().into_owned(),
                );
                format!("{rows} failed items exported to {name}")
            }
        }
    }
}

/// `bulk-upload-errors-menu-2025-01-31.xlsx`
#[must_use]
pub fn error_file_name(kind: UploadKind, date: NaiveDate) -> String {
    format!("bulk-upload-errors-{}-{}.xlsx", kind, date.format("%Y-%m-%d"))
}

/// Cell values for each failed row, in column order
#[must_use]
pub fn failed_rows(items: &[ParsedItem]) -> Vec<[String; 5]> {
    let or_na = |value: &str| {
        if value.is_empty() {
            "N/A".to_string()
        } else {
            value.to_string()
        }
    };
    items
        .iter()
        .filter(|item| !item.is_success())
        .map(|item| {
            [
                or_na(&item.name),
                or_na(&item.category),
                or_na(&item.price),
                or_na(&item.description),
                item.error_message
                    .clone()
                    .filter(|m| !m.is_empty())
                    .unwrap_or_else(|| "Unknown error".to_string()),
            ]
        })
        .collect()
}

/// Write failed rows to `dir`, or report that there are none
///
/// # Errors
/// Returns `UploadError::Workbook` if the file cannot be written
pub fn write_error_workbook(
    kind: UploadKind,
    items: &[ParsedItem],
    dir: &Path,
    date: NaiveDate,
) -> Result<ErrorExport, UploadError> {
    let rows = failed_rows(items);
    if rows.is_empty() {
        return Ok(ErrorExport::NoErrors);
    }

    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    sheet.set_name(ERROR_SHEET)?;
    write_header(sheet, &kind.columns())?;
    for (i, row) in rows.iter().enumerate() {
        let r = u32::try_from(i + 1).unwrap_or(u32::MAX);
        for (col, value) in (0u16..).zip(row.iter()) {
            sheet.write_string(r, col, value)?;
        }
    }
    sheet.autofit();

    let path = dir.join(error_file_name(kind, date));
    workbook.save(&path)?;
    tracing::info!(path = %path.display(), rows = rows.len(), "error workbook written");
    Ok(ErrorExport::Written {
        path,
        rows: rows.len(),
    })
}

/// Blank upload template: header row without the error column
///
/// # Errors
/// Returns `UploadError::Workbook` if the file cannot be written
pub fn write_template(kind: UploadKind, dir: &Path) -> Result<PathBuf, UploadError> {
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    sheet.set_name(TEMPLATE_SHEET)?;
    let columns = kind.columns();
    write_header(sheet, &columns[..columns.len() - 1])?;
    sheet.autofit();

    let path = dir.join(format!("bulk-upload-template-{kind}.xlsx"));
    workbook.save(&path)?;
    tracing::info!(path = %path.display(), "template written");
    Ok(path)
}

fn write_header(sheet: &mut Worksheet, columns: &[&str]) -> Result<(), UploadError> {
    let bold = Format::new().set_bold();
    for (col, title) in (0u16..).zip(columns.iter()) {
        sheet.write_string_with_format(0, col, *title, &bold)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::CannedParser;
    use pretty_assertions::assert_eq;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 1, 31).unwrap()
    }

    #[test]
    fn file_name_pattern() {
        assert_eq!(
            error_file_name(UploadKind::Location, date()),
            "bulk-upload-errors-location-2025-01-31.xlsx"
        );
    }

    #[test]
    fn blanks_become_placeholders() {
        let rows = failed_rows(&CannedParser::rows(UploadKind::Menu));
        assert_eq!(rows.len(), 3);
        assert_eq!(
            rows[1],
            [
                "Pepperoni Pizza".to_string(),
                "N/A".to_string(),
                "17.99".to_string(),
                "Loaded with pepperoni".to_string(),
                "Category is required".to_string(),
            ]
        );
        assert_eq!(rows[2][0], "N/A");
    }

    #[test]
    fn missing_message_is_unknown_error() {
        let mut items = CannedParser::rows(UploadKind::Location);
        items[2].error_message = None;
        assert_eq!(failed_rows(&items)[0][4], "Unknown error");
    }

    #[test]
    fn writes_workbook_to_dir() {
        let dir = tempfile::tempdir().unwrap();
        let export =
            write_error_workbook(UploadKind::Menu, &CannedParser::rows(UploadKind::Menu), dir.path(), date())
                .unwrap();

        let ErrorExport::Written { path, rows } = &export else {
            panic!("expected a file");
        };
        assert_eq!(*rows, 3);
        assert!(path.ends_with("bulk-upload-errors-menu-2025-01-31.xlsx"));
        let bytes = std::fs::read(path).unwrap();
        assert_eq!(&bytes[..2], b"PK");
        assert_eq!(export.message(), "3 failed items exported to bulk-upload-errors-menu-2025-01-31.xlsx");
    }

    #[test]
    fn all_success_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let items: Vec<_> = CannedParser::rows(UploadKind::Menu)
            .into_iter()
            .filter(ParsedItem::is_success)
            .collect();
        let export = write_error_workbook(UploadKind::Menu, &items, dir.path(), date()).unwrap();
        assert_eq!(export, ErrorExport::NoErrors);
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn template_has_no_error_column() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_template(UploadKind::Location, dir.path()).unwrap();
        assert!(path.ends_with("bulk-upload-template-location.xlsx"));
        assert!(path.exists());
    }
}
