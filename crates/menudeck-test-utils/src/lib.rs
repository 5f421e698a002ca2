//! Testing utilities for the Menudeck workspace
//!
//! Shared fixtures: a back office on a manual clock and canned change entries.

#![allow(missing_docs)]

use chrono::{DateTime, TimeZone, Utc};
use menudeck_core::{BackOffice, BackOfficeConfig};
use menudeck_deploy::ManualClock;
use menudeck_model::{ChangeAction, ChangeType, NewChange};
use std::sync::Arc;

/// 2025-01-31 09:00:00 UTC
pub fn start_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 1, 31, 9, 0, 0).unwrap()
}

pub fn manual_clock() -> Arc<ManualClock> {
    Arc::new(ManualClock::new(start_time()))
}

/// Back office with default delays, driven by a manual clock
pub async fn setup_back_office() -> (BackOffice, Arc<ManualClock>) {
    setup_back_office_with(BackOfficeConfig::default()).await
}

pub async fn setup_back_office_with(config: BackOfficeConfig) -> (BackOffice, Arc<ManualClock>) {
    let clock = manual_clock();
    let office = BackOffice::builder(config)
        .with_clock(clock.clone())
        .build()
        .await
        .unwrap();
    (office, clock)
}

pub fn product_updated(name: &str) -> NewChange {
    NewChange::new(
        ChangeType::Product,
        ChangeAction::Updated,
        name,
        "Updated product enrichment",
    )
}

pub fn coupon_created(code: &str) -> NewChange {
    NewChange::new(
        ChangeType::Coupon,
        ChangeAction::Created,
        code,
        format!("Created coupon {code}"),
    )
}
