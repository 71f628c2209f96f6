//! Per-kind threshold tables
//!
//! Each table pairs an ascending list of thresholds with one more bucket than
//! there are thresholds. A value selects the bucket of the first threshold it
//! is strictly below; anything at or above the last threshold falls into the
//! final bucket.

use crate::models::{MetricKind, SeverityBucket};

/// Threshold table for a single metric kind
#[derive(Debug, Clone, Copy)]
pub struct ThresholdTable {
    pub thresholds: &'static [f64],
    pub buckets: &'static [SeverityBucket],
}

impl ThresholdTable {
    /// Index of the bucket whose interval contains `value`
    pub fn ordinal(&self, value: f64) -> usize {
        self.thresholds
            .iter()
            .position(|threshold| value < *threshold)
            .unwrap_or(self.thresholds.len())
    }

    pub fn bucket(&self, value: f64) -> SeverityBucket {
        self.buckets[self.ordinal(value)]
    }
}

use SeverityBucket::*;

pub const TEMPERATURE: ThresholdTable = ThresholdTable {
    thresholds: &[10.0, 20.0, 25.0, 30.0],
    buckets: &[Low, Mild, Comfortable, Warm, Hot],
};

pub const HUMIDITY: ThresholdTable = ThresholdTable {
    thresholds: &[30.0, 50.0, 70.0],
    buckets: &[Low, Comfortable, ModerateHigh, High],
};

pub const WIND_SPEED: ThresholdTable = ThresholdTable {
    thresholds: &[10.0, 20.0, 30.0],
    buckets: &[Soft, Moderate, Strong, VeryStrong],
};

pub const PRESSURE: ThresholdTable = ThresholdTable {
    thresholds: &[1000.0, 1015.0, 1025.0],
    buckets: &[Low, NormalLow, Normal, High],
};

pub const SOLAR_RADIATION: ThresholdTable = ThresholdTable {
    thresholds: &[100.0, 200.0, 400.0],
    buckets: &[Low, Moderate, High, VeryHigh],
};

pub const CLOUD_COVER: ThresholdTable = ThresholdTable {
    thresholds: &[20.0, 40.0, 70.0],
    buckets: &[Clear, PartlyCloudy, MostlyCloudy, Overcast],
};

pub fn table_for(kind: MetricKind) -> &'static ThresholdTable {
    match kind {
        MetricKind::Temperature => &TEMPERATURE,
        MetricKind::Humidity => &HUMIDITY,
        MetricKind::WindSpeed => &WIND_SPEED,
        MetricKind::Pressure => &PRESSURE,
        MetricKind::SolarRadiation => &SOLAR_RADIATION,
        MetricKind::CloudCover => &CLOUD_COVER,
    }
}
