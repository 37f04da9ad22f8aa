//! Readings store behavior against a throwaway SQLite database.

use std::path::PathBuf;

use chrono::{TimeZone, Utc};
use uuid::Uuid;

use airaware::db::Database;
use airaware::models::ReadingCreate;
use airaware::stats::{self, Summary};

/// Opens a database under the OS temp directory and removes the files
/// on drop.
struct TempDb {
    path: PathBuf,
    db: Database,
}

impl TempDb {
    fn new() -> Self {
        let path = std::env::temp_dir().join(format!("airaware-test-{}.sqlite3", Uuid::new_v4()));
        let db = Database::new(path.clone()).expect("failed to open test database");
        Self { path, db }
    }
}

impl Drop for TempDb {
    fn drop(&mut self) {
        for suffix in ["", "-wal", "-shm"] {
            let mut name = self.path.as_os_str().to_owned();
            name.push(suffix);
            std::fs::remove_file(name).ok();
        }
    }
}

fn reading_at(hour: u32, pm25: f64) -> ReadingCreate {
    ReadingCreate {
        pm25,
        pm10: pm25 * 2.0,
        co2: 400.0,
        no2: 10.0,
        so2: 5.0,
        humidity: 60.0,
        temperature: 20.0,
        timestamp: Utc.with_ymd_and_hms(2024, 3, 1, hour, 0, 0).unwrap(),
    }
}

#[tokio::test]
async fn insert_assigns_id_and_get_round_trips() {
    let tmp = TempDb::new();

    let created = tmp.db.insert_reading(reading_at(9, 17.5)).await.unwrap();
    assert!(!created.id.is_empty());

    let fetched = tmp
        .db
        .get_reading(&created.id)
        .await
        .unwrap()
        .expect("inserted reading should be readable");
    assert_eq!(fetched.id, created.id);
    assert_eq!(fetched.pm25, 17.5);
    assert_eq!(fetched.timestamp, created.timestamp);
}

#[tokio::test]
async fn unknown_and_malformed_ids_read_as_absent() {
    let tmp = TempDb::new();

    assert!(tmp
        .db
        .get_reading(&Uuid::new_v4().to_string())
        .await
        .unwrap()
        .is_none());
    assert!(tmp.db.get_reading("not-a-uuid").await.unwrap().is_none());
}

#[tokio::test]
async fn list_pages_in_insertion_order() {
    let tmp = TempDb::new();

    // Insert with descending timestamps so insertion order differs from
    // time order.
    for (hour, pm25) in [(5u32, 1.0), (4, 2.0), (3, 3.0), (2, 4.0), (1, 5.0)] {
        tmp.db.insert_reading(reading_at(hour, pm25)).await.unwrap();
    }

    let page = tmp.db.list_readings(1, 2).await.unwrap();
    assert_eq!(page.len(), 2);
    assert_eq!(page[0].pm25, 2.0);
    assert_eq!(page[1].pm25, 3.0);

    let tail = tmp.db.list_readings(4, 10).await.unwrap();
    assert_eq!(tail.len(), 1);
    assert_eq!(tail[0].pm25, 5.0);

    let beyond = tmp.db.list_readings(100, 10).await.unwrap();
    assert!(beyond.is_empty());
}

#[tokio::test]
async fn recent_sorts_by_timestamp_descending() {
    let tmp = TempDb::new();

    // Insertion order deliberately scrambled relative to time.
    for (hour, pm25) in [(2u32, 1.0), (8, 2.0), (5, 3.0), (11, 4.0)] {
        tmp.db.insert_reading(reading_at(hour, pm25)).await.unwrap();
    }

    let recent = tmp.db.recent_readings(3).await.unwrap();
    assert_eq!(recent.len(), 3);
    assert!(recent
        .windows(2)
        .all(|pair| pair[0].timestamp >= pair[1].timestamp));
    assert_eq!(recent[0].pm25, 4.0);
    assert_eq!(recent[1].pm25, 2.0);

    // Fewer stored than requested returns everything.
    let all = tmp.db.recent_readings(100).await.unwrap();
    assert_eq!(all.len(), 4);
}

#[tokio::test]
async fn aggregate_summarizes_the_series() {
    let tmp = TempDb::new();

    tmp.db.insert_reading(reading_at(1, 10.0)).await.unwrap();
    tmp.db.insert_reading(reading_at(3, 30.0)).await.unwrap();
    tmp.db.insert_reading(reading_at(2, 20.0)).await.unwrap();

    let agg = tmp
        .db
        .aggregate_readings()
        .await
        .unwrap()
        .expect("non-empty store should aggregate");

    assert_eq!(agg.total_records, 3);
    assert_eq!(agg.avg_pm25, 20.0);
    assert_eq!(agg.min_pm25, 10.0);
    assert_eq!(agg.max_pm25, 30.0);
    assert_eq!(agg.min_pm10, 20.0);
    assert_eq!(agg.max_pm10, 60.0);
    assert_eq!(
        agg.first_timestamp,
        Utc.with_ymd_and_hms(2024, 3, 1, 1, 0, 0).unwrap()
    );
    assert_eq!(
        agg.last_timestamp,
        Utc.with_ymd_and_hms(2024, 3, 1, 3, 0, 0).unwrap()
    );
}

#[tokio::test]
async fn empty_store_aggregates_to_no_data() {
    let tmp = TempDb::new();

    let agg = tmp.db.aggregate_readings().await.unwrap();
    assert!(agg.is_none());

    match stats::summarize(agg) {
        Summary::NoData { message } => assert_eq!(message, "No data available"),
        Summary::Data(_) => panic!("expected the no-data summary"),
    }
}

#[tokio::test]
async fn clear_removes_everything() {
    let tmp = TempDb::new();

    for hour in 1..=4 {
        tmp.db.insert_reading(reading_at(hour, 9.0)).await.unwrap();
    }

    let removed = tmp.db.clear_readings().await.unwrap();
    assert_eq!(removed, 4);
    assert!(tmp.db.list_readings(0, 10).await.unwrap().is_empty());
    assert!(tmp.db.aggregate_readings().await.unwrap().is_none());
}
