//! Data models for metric readings and advisories
//!
//! Defines the core value types shared by the classifier and the
//! presentation models built on top of it.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::warn;

use crate::error::{AdvisoryError, AdvisoryResult};

/// Supported environmental measurement types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum MetricKind {
    /// Air temperature (°C)
    #[serde(rename = "temperature")]
    Temperature,
    /// Relative humidity (%)
    #[serde(rename = "humidity")]
    Humidity,
    /// Wind speed (km/h)
    #[serde(rename = "wind")]
    WindSpeed,
    /// Atmospheric pressure (hPa)
    #[serde(rename = "pressure")]
    Pressure,
    /// Solar radiation (W/m²)
    #[serde(rename = "solarRadiation")]
    SolarRadiation,
    /// Cloud cover (%)
    #[serde(rename = "cloudCover")]
    CloudCover,
}

impl MetricKind {
    /// All kinds in dashboard order
    pub const ALL: [MetricKind; 6] = [
        MetricKind::Temperature,
        MetricKind::Humidity,
        MetricKind::WindSpeed,
        MetricKind::Pressure,
        MetricKind::SolarRadiation,
        MetricKind::CloudCover,
    ];

    /// Canonical string tag
    pub fn tag(&self) -> &'static str {
        match self {
            MetricKind::Temperature => "temperature",
            MetricKind::Humidity => "humidity",
            MetricKind::WindSpeed => "wind",
            MetricKind::Pressure => "pressure",
            MetricKind::SolarRadiation => "solarRadiation",
            MetricKind::CloudCover => "cloudCover",
        }
    }

    /// Measurement unit symbol
    pub fn unit(&self) -> &'static str {
        match self {
            MetricKind::Temperature => "°C",
            MetricKind::Humidity | MetricKind::CloudCover => "%",
            MetricKind::WindSpeed => "km/h",
            MetricKind::Pressure => "hPa",
            MetricKind::SolarRadiation => "W/m²",
        }
    }

    /// Format a value with this kind's unit (`25°C`, `15 km/h`)
    pub fn format_value(&self, value: f64) -> String {
        match self {
            MetricKind::Temperature | MetricKind::Humidity | MetricKind::CloudCover => {
                format!("{}{}", value, self.unit())
            }
            _ => format!("{} {}", value, self.unit()),
        }
    }

    /// Ordered severity buckets for this kind, lowest intensity first
    pub fn buckets(&self) -> &'static [SeverityBucket] {
        crate::thresholds::table_for(*self).buckets
    }

    /// Rank of `bucket` within this kind, or `None` if the kind does not use it
    pub fn ordinal_of(&self, bucket: SeverityBucket) -> Option<usize> {
        self.buckets().iter().position(|b| *b == bucket)
    }
}

impl fmt::Display for MetricKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for MetricKind {
    type Err = AdvisoryError;

    fn from_str(s: &str) -> AdvisoryResult<Self> {
        match s {
            "temperature" => Ok(MetricKind::Temperature),
            "humidity" => Ok(MetricKind::Humidity),
            "wind" => Ok(MetricKind::WindSpeed),
            "pressure" => Ok(MetricKind::Pressure),
            "solarRadiation" => Ok(MetricKind::SolarRadiation),
            "cloudCover" => Ok(MetricKind::CloudCover),
            other => {
                warn!(tag = %other, "Rejected unknown metric kind");
                Err(AdvisoryError::UnknownMetricKind(other.to_string()))
            }
        }
    }
}

/// Severity category of a reading, ordered per kind by ascending intensity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SeverityBucket {
    Low,
    Mild,
    Comfortable,
    Warm,
    Hot,
    ModerateHigh,
    High,
    Soft,
    Moderate,
    Strong,
    VeryStrong,
    NormalLow,
    Normal,
    VeryHigh,
    Clear,
    PartlyCloudy,
    MostlyCloudy,
    Overcast,
}

impl SeverityBucket {
    pub fn name(&self) -> &'static str {
        match self {
            SeverityBucket::Low => "low",
            SeverityBucket::Mild => "mild",
            SeverityBucket::Comfortable => "comfortable",
            SeverityBucket::Warm => "warm",
            SeverityBucket::Hot => "hot",
            SeverityBucket::ModerateHigh => "moderateHigh",
            SeverityBucket::High => "high",
            SeverityBucket::Soft => "soft",
            SeverityBucket::Moderate => "moderate",
            SeverityBucket::Strong => "strong",
            SeverityBucket::VeryStrong => "veryStrong",
            SeverityBucket::NormalLow => "normalLow",
            SeverityBucket::Normal => "normal",
            SeverityBucket::VeryHigh => "veryHigh",
            SeverityBucket::Clear => "clear",
            SeverityBucket::PartlyCloudy => "partlyCloudy",
            SeverityBucket::MostlyCloudy => "mostlyCloudy",
            SeverityBucket::Overcast => "overcast",
        }
    }
}

impl fmt::Display for SeverityBucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A single measurement handed to the classifier
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Reading {
    pub kind: MetricKind,
    pub value: f64,
}

impl Reading {
    pub fn new(kind: MetricKind, value: f64) -> Self {
        Self { kind, value }
    }

    /// Build a reading from a string tag, failing on unknown kinds
    pub fn from_tag(tag: &str, value: f64) -> AdvisoryResult<Self> {
        Ok(Self::new(tag.parse()?, value))
    }
}

/// Result of classifying a reading
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Advisory {
    pub kind: MetricKind,
    pub bucket: SeverityBucket,
    /// Rank of `bucket` within `kind`, 0 being the lowest intensity
    pub level: usize,
    pub message: String,
}
