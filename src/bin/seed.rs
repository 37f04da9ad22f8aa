//! Clears the readings table and refills it with randomized sensor data
//! for local development: `seed [count]`, one reading per hour counting
//! back from now.

use anyhow::Result;
use chrono::{Duration, Utc};
use log::info;
use rand::Rng;

use airaware::{config::Config, db::Database, models::ReadingCreate};

const DEFAULT_COUNT: usize = 500;

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    let count: usize = match std::env::args().nth(1) {
        Some(arg) => arg.parse()?,
        None => DEFAULT_COUNT,
    };

    let config = Config::from_env()?;
    let db = Database::new(config.db_path.clone())?;

    let removed = db.clear_readings().await?;
    info!("Cleared {removed} existing readings");

    let mut rng = rand::thread_rng();
    let now = Utc::now();

    for i in 0..count {
        let reading = ReadingCreate {
            pm25: rng.gen_range(5.0..150.0),
            pm10: rng.gen_range(10.0..200.0),
            co2: rng.gen_range(350.0..800.0),
            no2: rng.gen_range(5.0..80.0),
            so2: rng.gen_range(2.0..40.0),
            humidity: rng.gen_range(20.0..95.0),
            temperature: rng.gen_range(-5.0..40.0),
            timestamp: now - Duration::hours((count - i) as i64),
        };
        db.insert_reading(reading).await?;
    }

    info!("Seeded {count} readings into {}", config.db_path.display());
    Ok(())
}
