//! Upload parsing
//!
//! Rows carry a generic shape for both kinds: for location uploads
//! `category` holds the address and `price` the operating hours.

use crate::error::UploadError;
use crate::file::{UploadFile, UploadKind};
use async_trait::async_trait;
use menudeck_deploy::Clock;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemStatus {
    Success,
    Failed,
}

/// One previewed row
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParsedItem {
    pub id: String,
    pub name: String,
    pub category: String,
    pub price: String,
    pub description: String,
    pub status: ItemStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
}

impl ParsedItem {
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.status == ItemStatus::Success
    }
}

/// Success/failure counts for a preview
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParseSummary {
    pub total: usize,
    pub success: usize,
    pub failed: usize,
}

impl ParseSummary {
    #[must_use]
    pub fn of(items: &[ParsedItem]) -> Self {
        let success = items.iter().filter(|i| i.is_success()).count();
        Self {
            total: items.len(),
            success,
            failed: items.len() - success,
        }
    }

    /// `5 items parsed successfully, 3 failed. Review the details below.`
    #[must_use]
    pub fn message(&self) -> String {
        format!(
            "{} items parsed successfully, {} failed. Review the details below.",
            self.success, self.failed
        )
    }
}

/// Source of preview rows for an uploaded file
#[async_trait]
pub trait UploadParser: Send + Sync {
    /// # Errors
    /// Implementations return an error if the file cannot be read
    async fn parse(&self, kind: UploadKind, file: &UploadFile) -> Result<Vec<ParsedItem>, UploadError>;
}

/// Returns fixed rows per kind after a simulated processing delay
#[derive(Debug, Clone)]
pub struct CannedParser {
    clock: Arc<dyn Clock>,
    delay: Duration,
}

impl CannedParser {
    /// Processing delay used by the console
    pub const DEFAULT_DELAY: Duration = Duration::from_millis(2000);

    #[must_use]
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            clock,
            delay: Self::DEFAULT_DELAY,
        }
    }

    #[inline]
    #[must_use]
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Rows returned for `kind`
    #[must_use]
    pub fn rows(kind: UploadKind) -> Vec<ParsedItem> {
        match kind {
            UploadKind::Menu => vec![
                row("1", "Classic Burger", "Burgers", "12.99", "Beef patty with lettuce", None),
                row("2", "Veggie Burger", "Burgers", "10.99", "Plant-based patty", None),
                row("3", "Caesar Salad", "Salads", "invalid", "Fresh romaine lettuce", Some("Invalid price format")),
                row("4", "Margherita Pizza", "Pizza", "15.99", "Classic Italian pizza", None),
                row("5", "Pepperoni Pizza", "", "17.99", "Loaded with pepperoni", Some("Category is required")),
                row("6", "Chicken Wings", "Appetizers", "8.99", "Spicy buffalo wings", None),
                row("7", "", "Desserts", "6.99", "Chocolate brownie", Some("Product name is required")),
                row("8", "Ice Cream Sundae", "Desserts", "5.99", "Vanilla ice cream with toppings", None),
            ],
            UploadKind::Location => vec![
                row("1", "Downtown Store", "Main Street 123", "08:00-22:00", "City center location", None),
                row("2", "Mall Branch", "Westfield Mall, Floor 2", "10:00-21:00", "Shopping mall outlet", None),
                row("3", "", "Airport Terminal 1", "06:00-23:00", "Airport location", Some("Store name is required")),
                row("4", "Beach Store", "Seaside Blvd 45", "invalid", "Beachfront location", Some("Invalid time format")),
                row("5", "Suburban Outlet", "Park Avenue 78", "09:00-20:00", "Residential area store", None),
            ],
        }
    }
}

fn row(id: &str, name: &str, category: &str, price: &str, description: &str, error: Option<&str>) -> ParsedItem {
    ParsedItem {
        id: id.to_string(),
        name: name.to_string(),
        category: category.to_string(),
        price: price.to_string(),
        description: description.to_string(),
        status: if error.is_some() {
            ItemStatus::Failed
        } else {
            ItemStatus::Success
        },
        error_message: error.map(str::to_string),
    }
}

#[async_trait]
impl UploadParser for CannedParser {
    async fn parse(&self, kind: UploadKind, file: &UploadFile) -> Result<Vec<ParsedItem>, UploadError> {
        tracing::debug!(file = file.name(), %kind, "parsing upload");
        if !self.delay.is_zero() {
            self.clock.sleep(self.delay).await;
        }
        Ok(Self::rows(kind))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use menudeck_deploy::ManualClock;

    #[test]
    fn canned_counts() {
        let menu = ParseSummary::of(&CannedParser::rows(UploadKind::Menu));
        assert_eq!((menu.total, menu.success, menu.failed), (8, 5, 3));

        let location = ParseSummary::of(&CannedParser::rows(UploadKind::Location));
        assert_eq!((location.total, location.success, location.failed), (5, 3, 2));
        assert_eq!(
            location.message(),
            "3 items parsed successfully, 2 failed. Review the details below."
        );
    }

    #[tokio::test]
    async fn parse_waits_for_the_delay() {
        let clock = Arc::new(ManualClock::default());
        let parser = CannedParser::new(clock.clone());
        let file = UploadFile::new("anything.csv").unwrap();

        let items = parser.parse(UploadKind::Menu, &file).await.unwrap();
        assert_eq!(items.len(), 8);
        assert_eq!(clock.sleeps(), vec![Duration::from_millis(2000)]);
    }
}
