//! Input validation module
//!
//! Range checks for map coordinates and the time slider, run through
//! `validator` derives with messages collected into a single error.

use tracing::{debug, warn};
use validator::{Validate, ValidationErrors};

use crate::error::{AdvisoryError, AdvisoryResult};
use crate::map::MapLocation;

/// Coordinate and slider limits
pub struct MapConstraints;

impl MapConstraints {
    pub const LAT_MIN: f64 = -90.0;
    pub const LAT_MAX: f64 = 90.0;

    pub const LNG_MIN: f64 = -180.0;
    pub const LNG_MAX: f64 = 180.0;

    /// Time slider covers the hours of one day
    pub const HOUR_MAX: u8 = 23;
}

/// Flatten validator field errors into `field: message` pairs
pub fn describe_errors(errors: &ValidationErrors) -> String {
    let mut messages: Vec<String> = errors
        .field_errors()
        .iter()
        .map(|(field, errors)| {
            let msgs: Vec<&str> = errors
                .iter()
                .filter_map(|e| e.message.as_ref().map(|c| c.as_ref()))
                .collect();
            format!("{}: {}", field, msgs.join(", "))
        })
        .collect();
    messages.sort();
    messages.join("; ")
}

/// Validate a clicked map location
pub fn validate_location(location: &MapLocation) -> AdvisoryResult<()> {
    if !location.lat.is_finite() || !location.lng.is_finite() {
        return Err(AdvisoryError::InvalidLocation(
            "Coordinates must be finite numbers".to_string(),
        ));
    }

    if let Err(validation_errors) = location.validate() {
        let message = describe_errors(&validation_errors);
        warn!(errors = %message, "Map location validation failed");
        return Err(AdvisoryError::InvalidLocation(message));
    }

    validate_latitude(location.lat)?;
    validate_longitude(location.lng)?;

    debug!("Map location validation passed");
    Ok(())
}

fn validate_latitude(lat: f64) -> AdvisoryResult<()> {
    if !(MapConstraints::LAT_MIN..=MapConstraints::LAT_MAX).contains(&lat) {
        return Err(AdvisoryError::InvalidLocation(format!(
            "Latitude {} out of valid range [{}, {}]",
            lat,
            MapConstraints::LAT_MIN,
            MapConstraints::LAT_MAX
        )));
    }

    Ok(())
}

fn validate_longitude(lng: f64) -> AdvisoryResult<()> {
    if !(MapConstraints::LNG_MIN..=MapConstraints::LNG_MAX).contains(&lng) {
        return Err(AdvisoryError::InvalidLocation(format!(
            "Longitude {} out of valid range [{}, {}]",
            lng,
            MapConstraints::LNG_MIN,
            MapConstraints::LNG_MAX
        )));
    }

    Ok(())
}

/// Validate a time slider position
pub fn validate_hour(hour: u8) -> AdvisoryResult<u8> {
    if hour > MapConstraints::HOUR_MAX {
        warn!(hour = hour, "Time slider position out of range");
        return Err(AdvisoryError::InvalidHour(hour));
    }

    Ok(hour)
}
