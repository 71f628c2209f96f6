//! Interactive map state
//!
//! Models what the map view tracks between user interactions: the clicked
//! marker, the selected pollutant layer, the time slider and whether the
//! marker's coordinates were just copied.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::time::Duration;
use tracing::{debug, info, warn};
use validator::Validate;

use crate::error::{AdvisoryError, AdvisoryResult};
use crate::validation::{validate_hour, validate_location, MapConstraints};

/// Default map center (Mexico City)
pub const DEFAULT_CENTER: MapLocation = MapLocation {
    lat: 19.4326,
    lng: -99.1332,
};

pub const DEFAULT_ZOOM: u8 = 11;

pub const DEFAULT_HOUR: u8 = 12;

/// How long the "copied" indicator stays visible after a copy
pub const COPIED_DISPLAY: Duration = Duration::from_millis(2000);

/// Pollutant layers offered by the map
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Pollutant {
    #[serde(rename = "NO2")]
    No2,
    #[serde(rename = "O3")]
    O3,
    #[serde(rename = "HCHO")]
    Hcho,
    #[serde(rename = "AI")]
    Aerosols,
    #[serde(rename = "PM2.5")]
    Pm25,
    #[serde(rename = "PM10")]
    Pm10,
}

impl Pollutant {
    pub const ALL: [Pollutant; 6] = [
        Pollutant::No2,
        Pollutant::O3,
        Pollutant::Hcho,
        Pollutant::Aerosols,
        Pollutant::Pm25,
        Pollutant::Pm10,
    ];

    /// Label shown on the filter buttons
    pub fn display_name(&self) -> &'static str {
        match self {
            Pollutant::No2 => "NO₂",
            Pollutant::O3 => "O₃",
            Pollutant::Hcho => "HCHO",
            Pollutant::Aerosols => "Aerosols (AI)",
            Pollutant::Pm25 => "PM₂.₅",
            Pollutant::Pm10 => "PM₁₀",
        }
    }

    /// ASCII code used in configuration
    pub fn code(&self) -> &'static str {
        match self {
            Pollutant::No2 => "NO2",
            Pollutant::O3 => "O3",
            Pollutant::Hcho => "HCHO",
            Pollutant::Aerosols => "AI",
            Pollutant::Pm25 => "PM2.5",
            Pollutant::Pm10 => "PM10",
        }
    }
}

impl fmt::Display for Pollutant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

impl FromStr for Pollutant {
    type Err = AdvisoryError;

    fn from_str(s: &str) -> AdvisoryResult<Self> {
        let trimmed = s.trim();
        Pollutant::ALL
            .into_iter()
            .find(|p| {
                p.display_name() == trimmed
                    || p.code().eq_ignore_ascii_case(trimmed)
                    || (*p == Pollutant::Pm25 && trimmed.eq_ignore_ascii_case("PM25"))
                    || (*p == Pollutant::Aerosols && trimmed.eq_ignore_ascii_case("aerosols"))
            })
            .ok_or_else(|| AdvisoryError::UnknownPollutant(trimmed.to_string()))
    }
}

/// A point on the map
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Validate)]
pub struct MapLocation {
    #[validate(range(min = -90.0, max = 90.0, message = "Latitude must be between -90 and 90"))]
    pub lat: f64,

    #[validate(range(
        min = -180.0,
        max = 180.0,
        message = "Longitude must be between -180 and 180"
    ))]
    pub lng: f64,
}

impl MapLocation {
    /// Build a validated location
    pub fn new(lat: f64, lng: f64) -> AdvisoryResult<Self> {
        let location = Self { lat, lng };
        validate_location(&location)?;
        Ok(location)
    }

    /// Coordinates with six decimals, as copied to the clipboard
    pub fn coordinates_text(&self) -> String {
        format!("{:.6}, {:.6}", self.lat, self.lng)
    }
}

/// Destination for copied coordinates
pub trait Clipboard {
    /// Write text, returning the reason when the write is refused
    fn write_text(&mut self, text: &str) -> Result<(), String>;
}

/// A single pollutant value shown in the map sidebar
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PollutantReading {
    pub pollutant: Pollutant,
    pub value: f64,
    /// Empty for dimensionless indices
    pub unit: String,
}

impl PollutantReading {
    pub fn new(pollutant: Pollutant, value: f64, unit: &str) -> Self {
        Self {
            pollutant,
            value,
            unit: unit.to_string(),
        }
    }

    pub fn value_text(&self) -> String {
        if self.unit.is_empty() {
            self.value.to_string()
        } else {
            format!("{} {}", self.value, self.unit)
        }
    }
}

/// Current map view state
///
/// Not deserializable: the hour is only set through `new` and `set_hour`,
/// which keep it within the slider range.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapState {
    pub center: MapLocation,
    pub zoom: u8,
    pub pollutant: Pollutant,
    hour: u8,
    clicked: Option<MapLocation>,
    copied: bool,
}

impl MapState {
    pub fn new(pollutant: Pollutant, hour: u8) -> AdvisoryResult<Self> {
        Ok(Self {
            center: DEFAULT_CENTER,
            zoom: DEFAULT_ZOOM,
            pollutant,
            hour: validate_hour(hour)?,
            clicked: None,
            copied: false,
        })
    }

    /// Place the marker at a clicked point
    pub fn click(&mut self, lat: f64, lng: f64) -> AdvisoryResult<&MapLocation> {
        let location = MapLocation::new(lat, lng)?;
        debug!(lat = lat, lng = lng, "Map marker placed");

        self.copied = false;
        Ok(&*self.clicked.insert(location))
    }

    pub fn clicked(&self) -> Option<&MapLocation> {
        self.clicked.as_ref()
    }

    pub fn select_pollutant(&mut self, pollutant: Pollutant) {
        debug!(pollutant = %pollutant.code(), "Pollutant layer selected");
        self.pollutant = pollutant;
    }

    pub fn hour(&self) -> u8 {
        self.hour
    }

    pub fn set_hour(&mut self, hour: u8) -> AdvisoryResult<()> {
        self.hour = validate_hour(hour)?;
        Ok(())
    }

    /// Slider fill as a percentage of the day
    pub fn slider_progress(&self) -> f64 {
        f64::from(self.hour) / f64::from(MapConstraints::HOUR_MAX) * 100.0
    }

    pub fn copied(&self) -> bool {
        self.copied
    }

    /// Copy the marker's coordinates. Returns the copied text, or `None`
    /// when no marker has been placed.
    pub fn copy_coordinates<C: Clipboard>(
        &mut self,
        clipboard: &mut C,
    ) -> AdvisoryResult<Option<String>> {
        let Some(location) = self.clicked else {
            return Ok(None);
        };

        let text = location.coordinates_text();
        if let Err(reason) = clipboard.write_text(&text) {
            warn!(reason = %reason, "Clipboard write rejected");
            self.copied = false;
            return Err(AdvisoryError::ClipboardRejected(reason));
        }

        info!(coordinates = %text, "Coordinates copied");
        self.copied = true;
        Ok(Some(text))
    }

    /// Clear the copied indicator once its display period ends
    pub fn reset_copied(&mut self) {
        self.copied = false;
    }

    /// Clear the copied indicator if `elapsed` has reached [`COPIED_DISPLAY`].
    /// Returns whether the indicator is still shown.
    pub fn expire_copied(&mut self, elapsed: Duration) -> bool {
        if self.copied && elapsed >= COPIED_DISPLAY {
            debug!(elapsed_ms = elapsed.as_millis() as u64, "Copied indicator expired");
            self.reset_copied();
        }
        self.copied
    }
}

impl Default for MapState {
    fn default() -> Self {
        Self {
            center: DEFAULT_CENTER,
            zoom: DEFAULT_ZOOM,
            pollutant: Pollutant::No2,
            hour: DEFAULT_HOUR,
            clicked: None,
            copied: false,
        }
    }
}

/// Sidebar readings shown next to the map
pub fn sidebar_readings() -> Vec<PollutantReading> {
    vec![
        PollutantReading::new(Pollutant::No2, 23.5, "ppb"),
        PollutantReading::new(Pollutant::O3, 45.2, "ppb"),
        PollutantReading::new(Pollutant::Hcho, 1.8, "ppb"),
        PollutantReading::new(Pollutant::Aerosols, 0.7, ""),
        PollutantReading::new(Pollutant::Pm25, 12.0, "μg/m³"),
        PollutantReading::new(Pollutant::Pm10, 25.0, "μg/m³"),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct RecordingClipboard {
        written: Vec<String>,
    }

    impl Clipboard for RecordingClipboard {
        fn write_text(&mut self, text: &str) -> Result<(), String> {
            self.written.push(text.to_string());
            Ok(())
        }
    }

    struct DeniedClipboard;

    impl Clipboard for DeniedClipboard {
        fn write_text(&mut self, _text: &str) -> Result<(), String> {
            Err("permission denied".to_string())
        }
    }

    #[test]
    fn test_default_state() {
        let state = MapState::default();
        assert_eq!(state.center, DEFAULT_CENTER);
        assert_eq!(state.zoom, 11);
        assert_eq!(state.pollutant, Pollutant::No2);
        assert_eq!(state.hour(), 12);
        assert!(state.clicked().is_none());
        assert!(!state.copied());
    }

    #[test]
    fn test_pollutant_parsing() {
        assert_eq!("NO₂".parse::<Pollutant>().unwrap(), Pollutant::No2);
        assert_eq!("no2".parse::<Pollutant>().unwrap(), Pollutant::No2);
        assert_eq!("PM2.5".parse::<Pollutant>().unwrap(), Pollutant::Pm25);
        assert_eq!("PM₂.₅".parse::<Pollutant>().unwrap(), Pollutant::Pm25);
        assert_eq!("Aerosols (AI)".parse::<Pollutant>().unwrap(), Pollutant::Aerosols);
        assert!(matches!(
            "SO2".parse::<Pollutant>(),
            Err(AdvisoryError::UnknownPollutant(_))
        ));
    }

    #[test]
    fn test_coordinates_text() {
        let location = MapLocation::new(19.4326, -99.1332).unwrap();
        assert_eq!(location.coordinates_text(), "19.432600, -99.133200");
    }

    #[test]
    fn test_click_resets_copied() {
        let mut state = MapState::default();
        let mut clipboard = RecordingClipboard::default();

        state.click(19.5, -99.2).unwrap();
        state.copy_coordinates(&mut clipboard).unwrap();
        assert!(state.copied());

        state.click(19.6, -99.1).unwrap();
        assert!(!state.copied());
        assert_eq!(state.clicked().unwrap().lat, 19.6);
    }

    #[test]
    fn test_click_out_of_range_keeps_marker() {
        let mut state = MapState::default();
        state.click(10.0, 10.0).unwrap();

        assert!(state.click(100.0, 10.0).is_err());
        assert_eq!(state.clicked().unwrap().lat, 10.0);
    }

    #[test]
    fn test_copy_without_marker() {
        let mut state = MapState::default();
        let mut clipboard = RecordingClipboard::default();

        assert_eq!(state.copy_coordinates(&mut clipboard).unwrap(), None);
        assert!(clipboard.written.is_empty());
        assert!(!state.copied());
    }

    #[test]
    fn test_copy_coordinates() {
        let mut state = MapState::default();
        let mut clipboard = RecordingClipboard::default();
        state.click(40.416775, -3.70379).unwrap();

        let copied = state.copy_coordinates(&mut clipboard).unwrap();

        assert_eq!(copied.as_deref(), Some("40.416775, -3.703790"));
        assert_eq!(clipboard.written, vec!["40.416775, -3.703790".to_string()]);
        assert!(state.copied());

        state.reset_copied();
        assert!(!state.copied());
    }

    #[test]
    fn test_copied_indicator_expires() {
        assert_eq!(COPIED_DISPLAY, Duration::from_secs(2));

        let mut state = MapState::default();
        let mut clipboard = RecordingClipboard::default();
        state.click(19.5, -99.2).unwrap();
        state.copy_coordinates(&mut clipboard).unwrap();

        assert!(state.expire_copied(Duration::from_millis(1999)));
        assert!(state.copied());

        assert!(!state.expire_copied(COPIED_DISPLAY));
        assert!(!state.copied());
    }

    #[test]
    fn test_state_serializes_private_fields() {
        let mut state = MapState::default();
        state.set_hour(7).unwrap();

        let json = serde_json::to_value(&state).unwrap();
        assert_eq!(json["hour"], 7);
        assert_eq!(json["pollutant"], "NO2");
        assert_eq!(json["copied"], false);
        assert!(json["clicked"].is_null());
    }

    #[test]
    fn test_clipboard_rejection() {
        let mut state = MapState::default();
        state.click(1.0, 2.0).unwrap();

        let result = state.copy_coordinates(&mut DeniedClipboard);

        assert!(matches!(
            result,
            Err(AdvisoryError::ClipboardRejected(reason)) if reason == "permission denied"
        ));
        assert!(!state.copied());
    }

    #[test]
    fn test_time_slider() {
        let mut state = MapState::default();

        state.set_hour(23).unwrap();
        assert_eq!(state.slider_progress(), 100.0);

        state.set_hour(0).unwrap();
        assert_eq!(state.slider_progress(), 0.0);

        assert!(state.set_hour(24).is_err());
        assert_eq!(state.hour(), 0);
    }

    #[test]
    fn test_new_rejects_invalid_hour() {
        assert!(MapState::new(Pollutant::O3, 30).is_err());
        assert_eq!(MapState::new(Pollutant::O3, 6).unwrap().hour(), 6);
    }

    #[test]
    fn test_select_pollutant() {
        let mut state = MapState::default();
        state.select_pollutant(Pollutant::Pm10);
        assert_eq!(state.pollutant, Pollutant::Pm10);
    }

    #[test]
    fn test_sidebar_readings() {
        let readings = sidebar_readings();
        assert_eq!(readings.len(), Pollutant::ALL.len());
        assert_eq!(readings[0].value_text(), "23.5 ppb");
        assert_eq!(readings[3].value_text(), "0.7");
        assert_eq!(readings[4].value_text(), "12 μg/m³");
    }
}
