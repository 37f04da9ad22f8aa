pub mod comparison;
pub mod forecast;
pub mod reading;

pub use comparison::{AccuracyMetrics, ComparisonSample};
pub use forecast::{AirQualityLabel, FeatureVector, Forecast, FEATURE_DIM};
pub use reading::{Reading, ReadingCreate};
