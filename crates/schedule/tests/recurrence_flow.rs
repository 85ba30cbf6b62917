//! End-to-end flow: parameters → validated token → populated store
//! instance → persisted object, against the in-memory store.

use chrono::{DateTime, FixedOffset, TimeZone};
use sw_domain::error::Error;
use sw_schedule::{from_store_timestamp, to_store_timestamp, ScheduleBuilder, ScheduleToken};
use sw_store::{ManagementStore, MemoryStore, QueryRequest};

fn start() -> DateTime<FixedOffset> {
    FixedOffset::east_opt(0)
        .unwrap()
        .with_ymd_and_hms(2024, 3, 1, 9, 30, 0)
        .unwrap()
}

#[tokio::test]
async fn a_built_instance_can_be_persisted_and_queried_back() {
    let store = MemoryStore::with_provider_classes();
    let builder = ScheduleBuilder::new(&store);

    let instance = builder
        .recur_monthly_by_weekday(6, 1, 3, 2, 30, 2, true, start())
        .await
        .unwrap();

    // The builder hands back an un-persisted instance; saving is ours.
    let saved = store.put(&instance).await.unwrap();
    let fetched = store.get(&saved.path).await.unwrap();

    assert_eq!(fetched.get_u32("Day"), Some(6));
    assert_eq!(fetched.get_u32("WeekOrder"), Some(2));
    assert_eq!(fetched.get_u32("ForNumberOfMonths"), Some(3));

    let found = store
        .query(QueryRequest::all("ScheduleMonthlyByWeekday"))
        .await
        .unwrap();
    assert_eq!(found.len(), 1);
}

#[tokio::test]
async fn start_times_survive_the_store_round_trip() {
    let store = MemoryStore::with_provider_classes();
    let builder = ScheduleBuilder::new(&store);

    let instance = builder.non_recurring(2, 4, 0, false, start()).await.unwrap();
    let saved = store.put(&instance).await.unwrap();
    let fetched = store.get(&saved.path).await.unwrap();

    let text = fetched.get_str("StartTime").unwrap();
    assert_eq!(from_store_timestamp(text).unwrap(), start());
    assert_eq!(text, to_store_timestamp(start()).unwrap());
}

#[tokio::test]
async fn every_builder_rejects_out_of_range_input_without_a_store_call() {
    let store = MemoryStore::new();
    let builder = ScheduleBuilder::new(&store);
    let t = start();

    let failures = [
        builder.non_recurring(1, 24, 0, true, t).await,
        builder.recur_interval(1, 32, 0, 0, 0, 0, true, t).await,
        builder.recur_monthly_by_date(1, 13, 0, 0, 1, true, t).await,
        builder.recur_monthly_by_weekday(1, 1, 1, 0, 0, 5, true, t).await,
        builder.recur_weekly(0, 1, 1, 0, 0, true, t).await,
    ];
    for result in failures {
        assert!(matches!(result.unwrap_err(), Error::Validation { .. }));
    }
    assert_eq!(store.created_count(), 0);
}

#[tokio::test]
async fn tokens_round_trip_through_json_files() {
    // The CLI writes tokens to disk and instantiates them later; the
    // serde form must reproduce the exact same instance.
    let token = ScheduleToken::recur_interval(1, 0, 0, 6, 0, 0, true, start()).unwrap();
    let text = serde_json::to_string_pretty(&token).unwrap();
    let back: ScheduleToken = serde_json::from_str(&text).unwrap();
    assert_eq!(back, token);

    let store = MemoryStore::with_provider_classes();
    let builder = ScheduleBuilder::new(&store);
    let a = builder.instantiate(&token).await.unwrap();
    let b = builder.instantiate(&back).await.unwrap();
    assert_eq!(a, b);
}
