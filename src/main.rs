//! Raphi dashboard snapshot
//!
//! Builds the climate dashboard from fixture readings and prints it as JSON,
//! standing in for the presentation shell during development.
//!
//! ⚠️ DISCLAIMER:
//! Advisories are general guidance, not medical advice.

use anyhow::Context;
use tracing::{info, warn};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use raphi::config::{FixtureMode, Settings};
use raphi::dashboard::DashboardSnapshot;
use raphi::error::ErrorReport;
use raphi::fake_sensor::{static_readings, FakeReadingGenerator};
use raphi::map::sidebar_readings;
use raphi::Classifier;

fn main() -> anyhow::Result<()> {
    // Load .env
    dotenv::dotenv().ok();

    // Logging goes to stderr; stdout carries the snapshot
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info,raphi=debug"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt::layer().json().with_writer(std::io::stderr))
        .init();

    let settings = Settings::from_env().context("Failed to load configuration")?;

    info!("Starting Raphi dashboard snapshot");

    let catalog = settings
        .message_catalog()
        .context("Failed to load advisory catalog")?;
    let classifier = Classifier::new(catalog);
    let map = settings.map_state().context("Invalid map settings")?;

    let readings = match (settings.fixture.mode, settings.fixture.seed) {
        (FixtureMode::Static, _) => static_readings(),
        (FixtureMode::Random, Some(seed)) => FakeReadingGenerator::with_seed(seed).sample(),
        (FixtureMode::Random, None) => FakeReadingGenerator::new().sample(),
    };

    let snapshot = match DashboardSnapshot::build(&classifier, &readings, map, sidebar_readings()) {
        Ok(snapshot) => snapshot,
        Err(err) => {
            let report = ErrorReport::from(&err);
            warn!(correlation_id = %report.correlation_id, "Snapshot generation failed");
            println!("{}", serde_json::to_string_pretty(&report)?);
            return Err(err.into());
        }
    };

    println!("{}", serde_json::to_string_pretty(&snapshot)?);
    Ok(())
}
