//! Store status screen walkthrough against the seeded directory

use chrono::{NaiveTime, Weekday};
use menudeck_model::{Channel, StoreId, StoreStatus};
use menudeck_stores::{
    DayHours, InMemoryStoreRepository, StoreChannels, StoreRepository, ToggleSource,
};
use std::sync::Arc;

#[test]
fn closing_and_reopening_a_store_for_the_day() {
    let repo = Arc::new(InMemoryStoreRepository::seeded());
    let channels = StoreChannels::new(repo.clone());
    let store = StoreId::from("midvalley");

    for channel in Channel::ALL {
        channels
            .set_channel(&store, channel, false, ToggleSource::QuickSelector)
            .unwrap();
    }
    assert_eq!(channels.store_status(&store), StoreStatus::Closed);

    let reopened = channels.reopen_temporary_channels();
    assert_eq!(reopened.len(), 3);
    assert_eq!(channels.store_status(&store), StoreStatus::Open);
}

#[test]
fn seeded_partial_stores_show_partial() {
    let repo = Arc::new(InMemoryStoreRepository::seeded());
    let channels = StoreChannels::new(repo.clone());

    let partial: Vec<_> = repo
        .list()
        .into_iter()
        .filter(|s| channels.store_status(&s.id) == StoreStatus::Partial)
        .map(|s| s.id)
        .collect();
    assert_eq!(
        partial,
        vec![
            StoreId::from("tropicana"),
            StoreId::from("subangparade"),
            StoreId::from("tamarind"),
        ]
    );
}

#[test]
fn weekday_hours_copied_across_the_week() {
    let repo = InMemoryStoreRepository::seeded();
    let store = StoreId::from("pavilion");

    let mut hours = repo.hours(&store).unwrap();
    hours
        .update_day(DayHours::parse(Weekday::Mon, true, "08:00", "20:00").unwrap())
        .unwrap();
    hours.copy_to_all(Weekday::Mon);
    repo.update_hours(&store, hours).unwrap();

    let saved = repo.hours(&store).unwrap();
    for day in saved.days() {
        assert_eq!(day.display(), "08:00-20:00");
    }
    let eight_thirty_pm = NaiveTime::from_hms_opt(20, 30, 0).unwrap();
    assert!(!saved.is_open_at(Weekday::Sat, eight_thirty_pm));
}
