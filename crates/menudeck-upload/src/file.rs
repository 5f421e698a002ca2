//! Upload kinds and accepted file types

use crate::error::UploadError;
use menudeck_model::ParseEnumError;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::str::FromStr;

const ACCEPTED_EXTENSIONS: [&str; 3] = ["csv", "xlsx", "xls"];

/// What a bulk upload contains
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UploadKind {
    #[default]
    Menu,
    Location,
}

impl UploadKind {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            UploadKind::Menu => "menu",
            UploadKind::Location => "location",
        }
    }

    /// Spreadsheet column headers, in order
    #[must_use]
    pub fn columns(&self) -> [&'static str; 5] {
        match self {
            UploadKind::Menu => ["Product Name", "Category", "Price", "Description", "Error Message"],
            UploadKind::Location => [
                "Store Name",
                "Address",
                "Operating Hours",
                "Description",
                "Error Message",
            ],
        }
    }
}

impl std::fmt::Display for UploadKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for UploadKind {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "menu" => Ok(UploadKind::Menu),
            "location" | "locations" => Ok(UploadKind::Location),
            _ => Err(ParseEnumError::new("upload type", s)),
        }
    }
}

/// A file the operator picked, checked by extension only
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadFile {
    name: String,
}

impl UploadFile {
    /// # Errors
    /// Returns `UploadError::UnsupportedFile` unless the extension is
    /// csv, xlsx or xls (case-insensitive)
    pub fn new(name: impl Into<String>) -> Result<Self, UploadError> {
        let name = name.into();
        let accepted = Path::new(&name)
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase)
            .is_some_and(|ext| ACCEPTED_EXTENSIONS.contains(&ext.as_str()));
        if !accepted {
            return Err(UploadError::UnsupportedFile { file_name: name });
        }
        Ok(Self { name })
    }

    /// File name without directories
    #[must_use]
    pub fn name(&self) -> &str {
        Path::new(&self.name)
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or(&self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spreadsheet_extensions_accepted() {
        for name in ["menu.csv", "menu.XLSX", "stores.xls", "/tmp/uploads/menu.xlsx"] {
            assert!(UploadFile::new(name).is_ok(), "{name}");
        }
        assert_eq!(UploadFile::new("/tmp/uploads/menu.xlsx").unwrap().name(), "menu.xlsx");
    }

    #[test]
    fn other_extensions_rejected() {
        for name in ["menu.pdf", "menu", "csv", "menu.csv.bak"] {
            let err = UploadFile::new(name).unwrap_err();
            assert!(err.is_validation(), "{name}");
        }
    }

    #[test]
    fn columns_follow_kind() {
        assert_eq!(UploadKind::Menu.columns()[0], "Product Name");
        assert_eq!(UploadKind::Location.columns()[2], "Operating Hours");
        assert_eq!("Location".parse::<UploadKind>(), Ok(UploadKind::Location));
    }

    #[test]
    fn unknown_kind_names_the_input() {
        let err = "pricing".parse::<UploadKind>().unwrap_err();
        assert_eq!(err.kind, "upload type");
        assert_eq!(err.value, "pricing");
        assert_eq!(err.to_string(), "unknown upload type: \"pricing\"");
    }
}
