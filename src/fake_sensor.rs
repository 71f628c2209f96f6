//! Fake Reading Generator
//!
//! Placeholder data source for the dashboard until a real sensor feed or
//! forecast provider is wired in. Two flavours are offered:
//!
//! - `static_readings` returns the fixed fixture the dashboard was designed
//!   around.
//! - `FakeReadingGenerator` draws values around the same baselines with
//!   normally distributed noise, clamped to a plausible range per metric.
//!
//! Anything that yields `TrendReading`s can replace this module without
//! touching the classifier or the dashboard.

use rand::rngs::StdRng;
use rand::SeedableRng;
use rand_distr::{Distribution, Normal};
use tracing::{debug, info};

use crate::dashboard::TrendReading;
use crate::models::MetricKind;

/// Baseline, noise spread and plausible range for one metric
#[derive(Debug, Clone, Copy)]
struct MetricProfile {
    kind: MetricKind,
    baseline: f64,
    baseline_delta: f64,
    std_dev: f64,
    min: f64,
    max: f64,
}

const PROFILES: [MetricProfile; 6] = [
    MetricProfile {
        kind: MetricKind::Temperature,
        baseline: 25.0,
        baseline_delta: 2.0,
        std_dev: 4.0,
        min: -20.0,
        max: 48.0,
    },
    MetricProfile {
        kind: MetricKind::Humidity,
        baseline: 60.0,
        baseline_delta: -5.0,
        std_dev: 12.0,
        min: 5.0,
        max: 100.0,
    },
    MetricProfile {
        kind: MetricKind::WindSpeed,
        baseline: 15.0,
        baseline_delta: 3.0,
        std_dev: 7.0,
        min: 0.0,
        max: 90.0,
    },
    MetricProfile {
        kind: MetricKind::Pressure,
        baseline: 1012.0,
        baseline_delta: -2.0,
        std_dev: 8.0,
        min: 960.0,
        max: 1050.0,
    },
    MetricProfile {
        kind: MetricKind::SolarRadiation,
        baseline: 300.0,
        baseline_delta: 50.0,
        std_dev: 120.0,
        min: 0.0,
        max: 1100.0,
    },
    MetricProfile {
        kind: MetricKind::CloudCover,
        baseline: 40.0,
        baseline_delta: -10.0,
        std_dev: 25.0,
        min: 0.0,
        max: 100.0,
    },
];

/// The dashboard's fixed fixture: 25°C, 60%, 15 km/h, 1012 hPa, 300 W/m², 40%
pub fn static_readings() -> Vec<TrendReading> {
    PROFILES
        .iter()
        .map(|p| TrendReading::new(p.kind, p.baseline, p.baseline_delta))
        .collect()
}

/// Random reading generator around the fixture baselines
pub struct FakeReadingGenerator {
    rng: StdRng,
    /// Number of batches produced so far
    batches: u64,
}

impl FakeReadingGenerator {
    /// Generator seeded from OS entropy
    pub fn new() -> Self {
        info!("Initializing fake reading generator");
        Self {
            rng: StdRng::from_entropy(),
            batches: 0,
        }
    }

    /// Reproducible generator
    pub fn with_seed(seed: u64) -> Self {
        info!(seed = seed, "Initializing seeded fake reading generator");
        Self {
            rng: StdRng::seed_from_u64(seed),
            batches: 0,
        }
    }

    /// One reading per metric kind, in dashboard order
    pub fn sample(&mut self) -> Vec<TrendReading> {
        self.batches += 1;

        let readings: Vec<TrendReading> = PROFILES
            .iter()
            .map(|profile| {
                // std_dev values are positive constants
                let value_noise = Normal::new(0.0, profile.std_dev)
                    .map(|n| n.sample(&mut self.rng))
                    .unwrap_or(0.0);
                let delta_noise = Normal::new(0.0, profile.std_dev / 4.0)
                    .map(|n| n.sample(&mut self.rng))
                    .unwrap_or(0.0);

                let value = (profile.baseline + value_noise).clamp(profile.min, profile.max);
                let delta = profile.baseline_delta + delta_noise;

                // 1 decimal precision
                TrendReading::new(
                    profile.kind,
                    (value * 10.0).round() / 10.0,
                    (delta * 10.0).round() / 10.0,
                )
            })
            .collect();

        debug!(
            batch = self.batches,
            temperature = readings[0].reading.value,
            humidity = readings[1].reading.value,
            wind = readings[2].reading.value,
            "Generated fake readings"
        );

        readings
    }

    pub fn batches(&self) -> u64 {
        self.batches
    }
}

impl Default for FakeReadingGenerator {
    fn default() -> Self {
        Self::new()
    }
}
