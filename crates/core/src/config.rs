//! Engine configuration
//!
//! All values have defaults matching the lab's reference behaviour, so
//! `EngineConfig::default()` is what the UI uses. The struct is serde-friendly
//! so a host can ship it as JSON alongside its own settings. A config coming
//! from outside goes through [`EngineConfig::validate`] before an engine
//! accepts it.

use crate::core_types::units::{Celsius, Meters, Percent};
use crate::error::{LabError, LabResult};
use serde::{Deserialize, Serialize};

/// Smallest dew point tolerance that keeps the corrector idempotent.
///
/// The final clamp leaves the dew point 1 °C under the air temperature, so a
/// tighter tolerance would make the opening Magnus check undo it on the next pass.
pub const MIN_DEW_POINT_TOLERANCE: f64 = 1.0;

/// Tunables for [`crate::LabEngine`]
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Number of past runs kept in the history (newest first)
    pub history_capacity: usize,

    /// Station altitude used to reduce station pressure to sea level
    pub station_altitude: Meters,

    /// Maximum deviation between the stored and the Magnus dew point before
    /// the stored value is replaced
    pub dew_point_tolerance: Celsius,

    /// Humidity floor applied before taking the logarithm in the Magnus formula
    pub humidity_floor: Percent,
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            history_capacity: 10,
            station_altitude: Meters::new(500.0),
            dew_point_tolerance: Celsius::new(5.0),
            humidity_floor: Percent::new(1.0),
        }
    }
}

impl EngineConfig {
    /// Set the history capacity (at least one entry is always kept)
    pub fn with_history_capacity(mut self, capacity: usize) -> Self {
        self.history_capacity = capacity.max(1);
        self
    }

    /// Set the station altitude
    pub fn with_station_altitude(mut self, altitude: Meters) -> Self {
        self.station_altitude = altitude;
        self
    }

    /// Check every field against what the formulas and the corrector need.
    ///
    /// # Errors
    /// [`LabError::InvalidConfig`] naming the first offending field.
    pub fn validate(&self) -> LabResult<()> {
        let altitude = *self.station_altitude;
        if !altitude.is_finite() || altitude < 0.0 {
            return Err(LabError::InvalidConfig {
                field: "station_altitude",
                requirement: "must be finite and non-negative",
                value: altitude,
            });
        }

        let tolerance = *self.dew_point_tolerance;
        if !tolerance.is_finite() || tolerance < MIN_DEW_POINT_TOLERANCE {
            return Err(LabError::InvalidConfig {
                field: "dew_point_tolerance",
                requirement: "must be finite and at least 1",
                value: tolerance,
            });
        }

        let floor = *self.humidity_floor;
        let in_range = floor > 0.0 && floor <= 100.0;
        if !in_range {
            return Err(LabError::InvalidConfig {
                field: "humidity_floor",
                requirement: "must be within (0, 100]",
                value: floor,
            });
        }

        Ok(())
    }
}
