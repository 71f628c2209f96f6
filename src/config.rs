//! Configuration management module
//!
//! Loads settings from built-in defaults overlaid by `RAPHI_`-prefixed
//! environment variables, using `__` between section and key
//! (e.g. `RAPHI_FIXTURE__MODE=random`).

use ::config::{Config, Environment};
use serde::Deserialize;
use tracing::{debug, warn};
use validator::Validate;

use crate::catalog::MessageCatalog;
use crate::error::{AdvisoryError, AdvisoryResult};
use crate::map::{MapState, Pollutant};
use crate::validation::describe_errors;

/// Environment variable prefix
pub const ENV_PREFIX: &str = "RAPHI";

/// Advisory catalog settings
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CatalogSettings {
    /// JSON catalog to load instead of the built-in Spanish one
    pub path: Option<String>,
}

/// Where dashboard readings come from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FixtureMode {
    Static,
    Random,
}

/// Reading fixture settings
#[derive(Debug, Clone, Deserialize)]
pub struct FixtureSettings {
    pub mode: FixtureMode,
    /// Seed for reproducible random readings
    pub seed: Option<u64>,
}

/// Initial map view settings
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct MapSettings {
    pub pollutant: String,
    #[validate(range(max = 23, message = "Hour must be between 0 and 23"))]
    pub hour: u8,
}

/// Root configuration structure
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub catalog: CatalogSettings,
    pub fixture: FixtureSettings,
    pub map: MapSettings,
}

impl Settings {
    /// Load settings from defaults and the environment
    pub fn from_env() -> AdvisoryResult<Self> {
        Self::from_env_with_prefix(ENV_PREFIX)
    }

    pub(crate) fn from_env_with_prefix(prefix: &str) -> AdvisoryResult<Self> {
        let settings: Settings = Config::builder()
            .set_default("fixture.mode", "static")?
            .set_default("map.pollutant", "NO2")?
            .set_default("map.hour", 12)?
            .add_source(
                Environment::with_prefix(prefix)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()?;

        if let Err(errors) = settings.map.validate() {
            warn!(errors = %describe_errors(&errors), "Map settings rejected");
            return Err(AdvisoryError::InvalidHour(settings.map.hour));
        }

        debug!(
            fixture_mode = ?settings.fixture.mode,
            catalog = ?settings.catalog.path,
            "Settings loaded"
        );

        Ok(settings)
    }

    /// Catalog named by the settings, or the built-in one
    pub fn message_catalog(&self) -> AdvisoryResult<MessageCatalog> {
        match &self.catalog.path {
            Some(path) => MessageCatalog::from_path(path),
            None => Ok(MessageCatalog::builtin()),
        }
    }

    /// Initial map state described by the settings
    pub fn map_state(&self) -> AdvisoryResult<MapState> {
        let pollutant: Pollutant = self.map.pollutant.parse()?;
        MapState::new(pollutant, self.map.hour)
    }
}
