use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::db::ReadingAggregate;

/// Summary statistics over the stored series, or the distinct "no data"
/// shape when the store is empty. Callers must not read numeric fields
/// out of the empty case.
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum Summary {
    NoData { message: &'static str },
    Data(SummaryData),
}

#[derive(Debug, Serialize)]
pub struct SummaryData {
    pub total_records: i64,
    pub date_range: DateRange,
    pub averages: FieldAverages,
    pub ranges: FieldRanges,
}

#[derive(Debug, Serialize)]
pub struct DateRange {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
pub struct FieldAverages {
    pub pm25: f64,
    pub pm10: f64,
    pub co2: f64,
    pub no2: f64,
    pub so2: f64,
    pub temperature: f64,
    pub humidity: f64,
}

/// Min/max only for the two fields that drive the quality label.
#[derive(Debug, Serialize)]
pub struct FieldRanges {
    pub pm25: MinMax,
    pub pm10: MinMax,
}

#[derive(Debug, Serialize)]
pub struct MinMax {
    pub min: f64,
    pub max: f64,
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

pub fn summarize(aggregate: Option<ReadingAggregate>) -> Summary {
    let agg = match aggregate {
        Some(agg) => agg,
        None => {
            return Summary::NoData {
                message: "No data available",
            }
        }
    };

    Summary::Data(SummaryData {
        total_records: agg.total_records,
        date_range: DateRange {
            start: agg.first_timestamp,
            end: agg.last_timestamp,
        },
        averages: FieldAverages {
            pm25: round2(agg.avg_pm25),
            pm10: round2(agg.avg_pm10),
            co2: round2(agg.avg_co2),
            no2: round2(agg.avg_no2),
            so2: round2(agg.avg_so2),
            temperature: round2(agg.avg_temperature),
            humidity: round2(agg.avg_humidity),
        },
        ranges: FieldRanges {
            pm25: MinMax {
                min: agg.min_pm25,
                max: agg.max_pm25,
            },
            pm10: MinMax {
                min: agg.min_pm10,
                max: agg.max_pm10,
            },
        },
    })
}
