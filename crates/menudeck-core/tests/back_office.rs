//! Full back-office sessions: edit, upload, deploy

use menudeck_core::{BackOffice, BackOfficeConfig};
use menudeck_deploy::DeploySelection;
use menudeck_model::{Channel, DeploymentStatus, Environment, StoreId};
use menudeck_stores::ToggleSource;
use menudeck_test_utils::{coupon_created, product_updated, setup_back_office, setup_back_office_with};
use menudeck_upload::{ErrorExport, JsonFileStore, UploadKind};
use pretty_assertions::assert_eq;
use std::sync::Arc;
use std::time::Duration;

#[tokio::test]
async fn two_changes_to_production() {
    let (office, clock) = setup_back_office().await;
    office.add_change(product_updated("Margherita Pizza"));
    office.add_change(coupon_created("WELCOME20"));

    let mut selection = DeploySelection::new();
    selection.select_environment(Environment::Production);
    let outcome = office.deploy(&mut selection).await.unwrap();

    assert_eq!(outcome.record.status, DeploymentStatus::Success);
    assert_eq!(outcome.record.changes_count, 2);
    assert_eq!(outcome.record.duration_ms, Some(2500));
    assert_eq!(outcome.record.deployed_by, "Admin User");
    assert!(office.pending_changes().is_empty());
    assert_eq!(selection, DeploySelection::new());
    assert_eq!(
        clock.sleeps(),
        vec![
            Duration::from_millis(1000),
            Duration::from_millis(800),
            Duration::from_millis(700)
        ]
    );
}

#[tokio::test]
async fn menu_upload_badge_clears_on_production_only() {
    let (office, _) = setup_back_office_with(BackOfficeConfig::default().instant()).await;
    office.uploads().upload(UploadKind::Menu, "spring-menu.xlsx").await.unwrap();
    office.uploads().accept().await.unwrap();
    assert_eq!(office.new_products_count(), 5);

    let mut sandbox = DeploySelection::new();
    sandbox.select_environment(Environment::Sandbox);
    sandbox.toggle_all_stores(&office.store_ids());
    let outcome = office.deploy(&mut sandbox).await.unwrap();
    assert_eq!(outcome.record.target_stores.as_ref().map(Vec::len), Some(25));
    assert_eq!(office.new_products_count(), 5);

    office.add_change(product_updated("Hawaiian"));
    let mut production = DeploySelection::new();
    production.select_environment(Environment::Production);
    office.deploy(&mut production).await.unwrap();
    assert_eq!(office.new_products_count(), 0);
    assert_eq!(office.deployments().len(), 2);
}

#[tokio::test]
async fn upload_history_persists_across_sessions() {
    let dir = tempfile::tempdir().unwrap();
    let config = BackOfficeConfig::default()
        .instant()
        .with_history_path(dir.path().join("menudeck.json"))
        .with_export_dir(dir.path());

    {
        let (office, _) = setup_back_office_with(config.clone()).await;
        office.uploads().upload(UploadKind::Location, "stores.csv").await.unwrap();
        let export = office.uploads().export_errors(&office.config().export_dir).unwrap();
        assert!(matches!(export, ErrorExport::Written { rows: 2, .. }));
        office.uploads().accept().await.unwrap();
    }

    let office = BackOffice::builder(config.clone())
        .with_history_store(Arc::new(JsonFileStore::new(dir.path().join("menudeck.json"))))
        .build()
        .await
        .unwrap();
    let history = office.uploads().history().items();
    assert_eq!(history.len(), 6);
    assert_eq!(history[0].file_name, "stores.csv");
    assert_eq!(history[0].upload_type, UploadKind::Location);
    assert!(!office.has_changes());
}

#[tokio::test]
async fn quick_selector_closure_reopens_next_morning() {
    let (office, _) = setup_back_office().await;
    let store = StoreId::from("sunway");
    office
        .channels()
        .set_channel(&store, Channel::Delivery, false, ToggleSource::QuickSelector)
        .unwrap();

    assert_eq!(office.channels().reopen_temporary_channels(), vec![(store.clone(), Channel::Delivery)]);
    assert!(office.channels().get(&store).delivery);
}
