// PostgreSQL store tests. They run only when TEST_DATABASE_URL points at a
// reachable database and are skipped otherwise.

mod common;

use std::time::Duration as StdDuration;

use chrono::{Duration, NaiveDate, Utc};
use sqlx::postgres::PgPoolOptions;
use uuid::Uuid;

use rehab_tracker::config::run_migrations;
use rehab_tracker::models::{CreateVital, Modality, UpsertJournalEntry, VitalSource};
use rehab_tracker::services::ProgramService;
use rehab_tracker::store::{PostgresStore, RecordStore};

async fn test_store() -> Option<PostgresStore> {
    common::init_test_logging();

    let url = std::env::var("TEST_DATABASE_URL").ok()?;
    let pool = match PgPoolOptions::new()
        .max_connections(5)
        .acquire_timeout(StdDuration::from_secs(5))
        .connect(&url)
        .await
    {
        Ok(pool) => pool,
        Err(err) => {
            eprintln!("Skipping database test, cannot connect: {}", err);
            return None;
        }
    };

    run_migrations(&pool).await.unwrap();
    Some(PostgresStore::new(pool))
}

fn unique_user() -> String {
    format!("test-{}", Uuid::new_v4())
}

#[tokio::test]
async fn test_default_program_is_shared() {
    let Some(store) = test_store().await else { return };

    let service = ProgramService::new(std::sync::Arc::new(store.clone()));
    let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();

    let first = service.initialize(&unique_user(), start).await.unwrap();
    let second = service.initialize(&unique_user(), start).await.unwrap();
    assert_eq!(first.program_id(), second.program_id());

    let phases = service.phases().await.unwrap();
    assert_eq!(phases.len(), 4);
}

#[tokio::test]
async fn test_sessions_round_trip_through_postgres() {
    let Some(store) = test_store().await else { return };

    let service = ProgramService::new(std::sync::Arc::new(store.clone()));
    let user = unique_user();
    let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
    service.initialize(&user, start).await.unwrap();

    let week_four = service.sessions(&user, Some(4)).await.unwrap();
    let modalities: Vec<Modality> = week_four.iter().map(|s| s.modality).collect();
    assert_eq!(
        modalities,
        vec![Modality::Walk, Modality::Bike, Modality::Treadmill, Modality::PoolWalk]
    );
    assert_eq!(week_four[0].date, NaiveDate::from_ymd_opt(2024, 1, 22).unwrap());

    let again = service.initialize(&user, start).await.unwrap();
    assert_eq!(again.program_id(), week_four[0].program_id);
    assert_eq!(service.sessions(&user, None).await.unwrap().len(), 45);
}

#[tokio::test]
async fn test_journal_upsert_keeps_one_row_per_day() {
    let Some(store) = test_store().await else { return };

    let user = unique_user();
    let date = NaiveDate::from_ymd_opt(2024, 2, 10).unwrap();
    let entry = |mood: i32, notes: Option<&str>| UpsertJournalEntry {
        user_id: user.clone(),
        date,
        mood,
        fatigue: 3,
        sleep_quality: 4,
        symptoms: None,
        notes: notes.map(str::to_string),
    };

    let first = store.upsert_journal_entry(entry(2, Some("tired"))).await.unwrap();
    let second = store.upsert_journal_entry(entry(4, None)).await.unwrap();

    assert_eq!(first.id, second.id);
    assert_eq!(second.mood, 4);
    assert_eq!(second.notes, None);
    assert!(second.updated_at >= first.updated_at);

    let entries = store
        .list_journal_entries(&user, date - Duration::days(1))
        .await
        .unwrap();
    assert_eq!(entries.len(), 1);
}

#[tokio::test]
async fn test_vitals_are_appended_and_filtered_by_time() {
    let Some(store) = test_store().await else { return };

    let user = unique_user();
    let now = Utc::now();
    for (hours_ago, heart_rate) in [(30, 62), (2, 71), (1, 74)] {
        store
            .create_vital(CreateVital {
                user_id: user.clone(),
                measured_at: now - Duration::hours(hours_ago),
                systolic: None,
                diastolic: None,
                heart_rate: Some(heart_rate),
                weight_kg: None,
                source: VitalSource::Manual,
            })
            .await
            .unwrap();
    }

    let recent = store
        .list_vitals(&user, now - Duration::hours(3))
        .await
        .unwrap();
    let heart_rates: Vec<Option<i32>> = recent.iter().map(|v| v.heart_rate).collect();
    assert_eq!(heart_rates, vec![Some(71), Some(74)]);

    let latest = store.latest_vital(&user).await.unwrap().unwrap();
    assert_eq!(latest.heart_rate, Some(74));
    assert_eq!(latest.source, VitalSource::Manual);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_initialization_seeds_once() {
    let Some(store) = test_store().await else { return };

    let service = ProgramService::new(std::sync::Arc::new(store.clone()));
    let user = unique_user();
    let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();

    let tasks: Vec<_> = (0..6)
        .map(|_| {
            let service = service.clone();
            let user = user.clone();
            tokio::spawn(async move { service.initialize(&user, start).await })
        })
        .collect();

    let mut created = 0;
    for task in tasks {
        if let rehab_tracker::services::InitOutcome::Created { .. } = task.await.unwrap().unwrap() {
            created += 1;
        }
    }

    assert_eq!(created, 1);
    assert_eq!(service.sessions(&user, None).await.unwrap().len(), 45);
}
