use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use rusqlite::{params, Row};
use uuid::Uuid;

use crate::db::{helpers::parse_datetime, Database};
use crate::models::{Reading, ReadingCreate};

const READING_COLUMNS: &str =
    "id, pm25, pm10, co2, no2, so2, humidity, temperature, timestamp";

fn reading_from_row(row: &Row<'_>) -> Result<Reading> {
    Ok(Reading {
        id: row.get::<_, String>(0)?,
        pm25: row.get(1)?,
        pm10: row.get(2)?,
        co2: row.get(3)?,
        no2: row.get(4)?,
        so2: row.get(5)?,
        humidity: row.get(6)?,
        temperature: row.get(7)?,
        timestamp: parse_datetime(&row.get::<_, String>(8)?, "timestamp")?,
    })
}

/// Single grouped pass over the full series. `None` when the table is
/// empty, so callers never see averages fabricated from no rows.
#[derive(Debug, Clone)]
pub struct ReadingAggregate {
    pub total_records: i64,
    pub first_timestamp: DateTime<Utc>,
    pub last_timestamp: DateTime<Utc>,
    pub avg_pm25: f64,
    pub avg_pm10: f64,
    pub avg_co2: f64,
    pub avg_no2: f64,
    pub avg_so2: f64,
    pub avg_temperature: f64,
    pub avg_humidity: f64,
    pub min_pm25: f64,
    pub max_pm25: f64,
    pub min_pm10: f64,
    pub max_pm10: f64,
}

impl Database {
    /// Append a reading; the store assigns the id.
    pub async fn insert_reading(&self, reading: ReadingCreate) -> Result<Reading> {
        let record = Reading {
            id: Uuid::new_v4().to_string(),
            pm25: reading.pm25,
            pm10: reading.pm10,
            co2: reading.co2,
            no2: reading.no2,
            so2: reading.so2,
            humidity: reading.humidity,
            temperature: reading.temperature,
            timestamp: reading.timestamp,
        };

        let inserted = record.clone();
        self.execute(move |conn| {
            conn.execute(
                "INSERT INTO readings (id, pm25, pm10, co2, no2, so2, humidity, temperature, timestamp)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
                params![
                    record.id,
                    record.pm25,
                    record.pm10,
                    record.co2,
                    record.no2,
                    record.so2,
                    record.humidity,
                    record.temperature,
                    record.timestamp.to_rfc3339(),
                ],
            )
            .with_context(|| "failed to insert reading")?;
            Ok(())
        })
        .await?;

        Ok(inserted)
    }

    /// Point lookup. Unknown and malformed ids both read as absent.
    pub async fn get_reading(&self, id: &str) -> Result<Option<Reading>> {
        let id = id.to_string();
        self.execute(move |conn| {
            let mut stmt = conn.prepare(&format!(
                "SELECT {READING_COLUMNS} FROM readings WHERE id = ?1"
            ))?;

            let mut rows = stmt.query(params![id])?;
            match rows.next()? {
                Some(row) => Ok(Some(reading_from_row(row)?)),
                None => Ok(None),
            }
        })
        .await
    }

    /// Page through readings in insertion order.
    pub async fn list_readings(&self, skip: i64, limit: i64) -> Result<Vec<Reading>> {
        self.execute(move |conn| {
            let mut stmt = conn.prepare(&format!(
                "SELECT {READING_COLUMNS} FROM readings ORDER BY rowid LIMIT ?1 OFFSET ?2"
            ))?;

            let mut rows = stmt.query(params![limit, skip])?;
            let mut readings = Vec::new();
            while let Some(row) = rows.next()? {
                readings.push(reading_from_row(row)?);
            }

            Ok(readings)
        })
        .await
    }

    /// The most recent `limit` readings, newest first.
    pub async fn recent_readings(&self, limit: i64) -> Result<Vec<Reading>> {
        self.execute(move |conn| {
            let mut stmt = conn.prepare(&format!(
                "SELECT {READING_COLUMNS} FROM readings ORDER BY timestamp DESC LIMIT ?1"
            ))?;

            let mut rows = stmt.query(params![limit])?;
            let mut readings = Vec::new();
            while let Some(row) = rows.next()? {
                readings.push(reading_from_row(row)?);
            }

            Ok(readings)
        })
        .await
    }

    /// Bulk delete, used by the seeding flow only. Returns the number of
    /// rows removed.
    pub async fn clear_readings(&self) -> Result<usize> {
        self.execute(|conn| {
            conn.execute("DELETE FROM readings", [])
                .with_context(|| "failed to clear readings")
        })
        .await
    }

    pub async fn aggregate_readings(&self) -> Result<Option<ReadingAggregate>> {
        self.execute(|conn| {
            let mut stmt = conn.prepare(
                "SELECT COUNT(*),
                        MIN(timestamp), MAX(timestamp),
                        AVG(pm25), AVG(pm10), AVG(co2), AVG(no2), AVG(so2),
                        AVG(temperature), AVG(humidity),
                        MIN(pm25), MAX(pm25), MIN(pm10), MAX(pm10)
                 FROM readings",
            )?;

            let mut rows = stmt.query([])?;
            let row = match rows.next()? {
                Some(row) => row,
                None => return Ok(None),
            };

            let total_records: i64 = row.get(0)?;
            if total_records == 0 {
                return Ok(None);
            }

            Ok(Some(ReadingAggregate {
                total_records,
                first_timestamp: parse_datetime(&row.get::<_, String>(1)?, "first timestamp")?,
                last_timestamp: parse_datetime(&row.get::<_, String>(2)?, "last timestamp")?,
                avg_pm25: row.get(3)?,
                avg_pm10: row.get(4)?,
                avg_co2: row.get(5)?,
                avg_no2: row.get(6)?,
                avg_so2: row.get(7)?,
                avg_temperature: row.get(8)?,
                avg_humidity: row.get(9)?,
                min_pm25: row.get(10)?,
                max_pm25: row.get(11)?,
                min_pm10: row.get(12)?,
                max_pm10: row.get(13)?,
            }))
        })
        .await
    }
}
