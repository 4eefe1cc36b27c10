//! Semantic unit types for type-safe meteorological quantities
//!
//! This module provides newtype wrappers for physical quantities so that a
//! humidity can never be passed where a cloud cover or a pressure is expected.
//!
//! # Design Philosophy
//! - All quantities use f64; the Magnus and Rothfusz formulas are sensitive to
//!   rounding near saturation and at high heat
//! - Implements common traits (Deref, Ord, Display, Add/Sub with Self)
//! - Total ordering via Ord trait (NaN handled as greater than all values)
//! - Private inner fields with constructors
//! - Serde support for serialization (serialised as a bare number)
//!
//! # Usage
//! ```
//! use weather_lab_core::core_types::units::{Celsius, Percent};
//!
//! let temp = Celsius::new(25.04);
//! assert_eq!(temp.round_tenth(), Celsius::new(25.0));
//!
//! let humidity = Percent::new(60.0);
//! assert!((humidity.to_fraction() - 0.6).abs() < 1e-12);
//!
//! // Use standard min/max from Ord trait
//! assert_eq!(Celsius::new(10.0).min(Celsius::new(20.0)), Celsius::new(10.0));
//! ```

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::ops::{Add, Deref, DerefMut, Sub};

/// Implements the shared boilerplate of an f64 quantity: total ordering,
/// `Deref` to the raw value, comparison against bare `f64`, `Add`/`Sub`,
/// conversion from/to `f64` and a `Display` with the given unit suffix.
macro_rules! scalar_unit {
    ($name:ident, $fmt:literal) => {
        impl Eq for $name {}

        impl PartialOrd for $name {
            fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
                Some(self.cmp(other))
            }
        }

        impl Ord for $name {
            fn cmp(&self, other: &Self) -> Ordering {
                self.0.total_cmp(&other.0)
            }
        }

        impl Deref for $name {
            type Target = f64;
            #[inline]
            fn deref(&self) -> &f64 {
                &self.0
            }
        }

        impl DerefMut for $name {
            #[inline]
            fn deref_mut(&mut self) -> &mut f64 {
                &mut self.0
            }
        }

        impl PartialEq<f64> for $name {
            fn eq(&self, other: &f64) -> bool {
                self.0 == *other
            }
        }

        impl PartialOrd<f64> for $name {
            fn partial_cmp(&self, other: &f64) -> Option<Ordering> {
                self.0.partial_cmp(other)
            }
        }

        impl Add for $name {
            type Output = $name;
            fn add(self, rhs: $name) -> $name {
                $name(self.0 + rhs.0)
            }
        }

        impl Sub for $name {
            type Output = $name;
            fn sub(self, rhs: $name) -> $name {
                $name(self.0 - rhs.0)
            }
        }

        impl From<$name> for f64 {
            fn from(v: $name) -> f64 {
                v.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, $fmt, self.0)
            }
        }
    };
}

// ============================================================================
// TEMPERATURE
// ============================================================================

/// Temperature in degrees Celsius
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[repr(transparent)]
pub struct Celsius(f64);

scalar_unit!(Celsius, "{:.1}°C");

impl Celsius {
    /// Celsius to Kelvin conversion offset (0°C = 273.15 K)
    const CELSIUS_KELVIN_OFFSET: f64 = 273.15;

    /// Create a new Celsius temperature. Asserts value >= absolute zero (-273.15°C).
    #[inline]
    #[must_use]
    #[track_caller]
    pub const fn new(value: f64) -> Self {
        assert!(
            value >= -Self::CELSIUS_KELVIN_OFFSET,
            "Celsius::new: value is below absolute zero (-273.15°C)"
        );
        Celsius(value)
    }

    /// Round to one decimal place
    #[inline]
    #[must_use]
    pub fn round_tenth(self) -> Self {
        Celsius((self.0 * 10.0).round() / 10.0)
    }
}

impl From<f64> for Celsius {
    fn from(v: f64) -> Self {
        Celsius::new(v)
    }
}

// ============================================================================
// RATIO TYPES
// ============================================================================

/// A percentage (0-100)
///
/// Used for relative humidity and cloud cover.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[repr(transparent)]
pub struct Percent(f64);

scalar_unit!(Percent, "{:.1}%");

impl Percent {
    /// Create a new percentage
    #[inline]
    #[must_use]
    pub const fn new(value: f64) -> Self {
        Percent(value)
    }

    /// Get the raw f64 value
    #[inline]
    #[must_use]
    pub fn value(self) -> f64 {
        self.0
    }

    /// Convert to fraction (0-1)
    #[inline]
    #[must_use]
    pub fn to_fraction(self) -> f64 {
        self.0 / 100.0
    }
}

impl From<f64> for Percent {
    fn from(v: f64) -> Self {
        Percent(v)
    }
}

// ============================================================================
// PRESSURE
// ============================================================================

/// Atmospheric pressure in hectopascals (numerically equal to millibars)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[repr(transparent)]
pub struct Hectopascals(f64);

scalar_unit!(Hectopascals, "{:.1} hPa");

impl Hectopascals {
    /// Create a new pressure value
    #[inline]
    #[must_use]
    pub const fn new(value: f64) -> Self {
        Hectopascals(value)
    }
}

impl From<f64> for Hectopascals {
    fn from(v: f64) -> Self {
        Hectopascals(v)
    }
}

// ============================================================================
// VELOCITY AND RATE TYPES
// ============================================================================

/// Velocity in kilometers per hour
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[repr(transparent)]
pub struct KilometersPerHour(f64);

scalar_unit!(KilometersPerHour, "{:.1} km/h");

impl KilometersPerHour {
    /// Create a new `KilometersPerHour` value.
    #[inline]
    #[must_use]
    pub const fn new(value: f64) -> Self {
        KilometersPerHour(value)
    }
}

impl From<f64> for KilometersPerHour {
    fn from(v: f64) -> Self {
        KilometersPerHour(v)
    }
}

/// Precipitation rate in millimetres per hour
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[repr(transparent)]
pub struct MillimetersPerHour(f64);

scalar_unit!(MillimetersPerHour, "{:.1} mm/h");

impl MillimetersPerHour {
    /// No precipitation
    pub const DRY: MillimetersPerHour = MillimetersPerHour(0.0);

    /// Create a new precipitation rate
    #[inline]
    #[must_use]
    pub const fn new(value: f64) -> Self {
        MillimetersPerHour(value)
    }

    /// Whether any precipitation is falling
    #[inline]
    #[must_use]
    pub fn is_wet(self) -> bool {
        self.0 > 0.0
    }
}

impl From<f64> for MillimetersPerHour {
    fn from(v: f64) -> Self {
        MillimetersPerHour(v)
    }
}

// ============================================================================
// RADIATION
// ============================================================================

/// Irradiance in watts per square metre
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[repr(transparent)]
pub struct WattsPerSquareMeter(f64);

scalar_unit!(WattsPerSquareMeter, "{:.0} W/m²");

impl WattsPerSquareMeter {
    /// Create a new irradiance value
    #[inline]
    #[must_use]
    pub const fn new(value: f64) -> Self {
        WattsPerSquareMeter(value)
    }
}

impl From<f64> for WattsPerSquareMeter {
    fn from(v: f64) -> Self {
        WattsPerSquareMeter(v)
    }
}

// ============================================================================
// SPATIAL TYPES
// ============================================================================

/// Distance in meters
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[repr(transparent)]
pub struct Meters(f64);

scalar_unit!(Meters, "{:.1} m");

impl Meters {
    /// Create a new distance in meters
    #[inline]
    #[must_use]
    pub const fn new(value: f64) -> Self {
        Meters(value)
    }
}

/// Distance in kilometers
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[repr(transparent)]
pub struct Kilometers(f64);

scalar_unit!(Kilometers, "{:.1} km");

impl Kilometers {
    /// Create a new distance in kilometers
    #[inline]
    #[must_use]
    pub const fn new(value: f64) -> Self {
        Kilometers(value)
    }
}

// ============================================================================
// ANGLE TYPES
// ============================================================================

/// Angle in degrees (wind direction: 0=North, 90=East, 180=South, 270=West)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[repr(transparent)]
pub struct Degrees(f64);

scalar_unit!(Degrees, "{:.0}°");

impl Degrees {
    /// Create a new angle in degrees
    #[inline]
    #[must_use]
    pub const fn new(value: f64) -> Self {
        Degrees(value)
    }

    /// Wrap into [0, 360)
    #[inline]
    #[must_use]
    pub fn normalized(self) -> Self {
        Degrees(self.0.rem_euclid(360.0))
    }

    /// 16-point compass label in French (N, NNE, NE, ... NNO)
    #[must_use]
    pub fn compass_point(self) -> &'static str {
        const POINTS: [&str; 16] = [
            "N", "NNE", "NE", "ENE", "E", "ESE", "SE", "SSE", "S", "SSO", "SO", "OSO", "O",
            "ONO", "NO", "NNO",
        ];
        let index = ((self.normalized().0 / 22.5).round() as usize) % 16;
        POINTS[index]
    }
}

impl From<f64> for Degrees {
    fn from(v: f64) -> Self {
        Degrees(v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_celsius_round_tenth() {
        assert_eq!(Celsius::new(14.94).round_tenth(), Celsius::new(14.9));
        assert_eq!(Celsius::new(-7.96).round_tenth(), Celsius::new(-8.0));
    }

    #[test]
    #[should_panic(expected = "below absolute zero")]
    fn test_celsius_rejects_below_absolute_zero() {
        let _ = Celsius::new(-300.0);
    }

    #[test]
    fn test_ordering_and_raw_comparison() {
        let low = Hectopascals::new(980.0);
        let high = Hectopascals::new(1030.0);
        assert!(low < high);
        assert!(low < 985.0);
        assert_eq!(low.max(high), high);
    }

    #[test]
    fn test_degrees_normalization_and_compass() {
        assert_eq!(*Degrees::new(370.0).normalized(), 10.0);
        assert_eq!(*Degrees::new(-90.0).normalized(), 270.0);
        assert_eq!(Degrees::new(0.0).compass_point(), "N");
        assert_eq!(Degrees::new(90.0).compass_point(), "E");
        assert_eq!(Degrees::new(225.0).compass_point(), "SO");
        assert_eq!(Degrees::new(355.0).compass_point(), "N");
    }

    #[test]
    fn test_display_suffixes() {
        assert_eq!(Celsius::new(21.24).to_string(), "21.2°C");
        assert_eq!(Percent::new(45.0).to_string(), "45.0%");
        assert_eq!(KilometersPerHour::new(30.0).to_string(), "30.0 km/h");
        assert_eq!(Kilometers::new(0.5).to_string(), "0.5 km");
    }

    #[test]
    fn test_precipitation_wetness() {
        assert!(!MillimetersPerHour::DRY.is_wet());
        assert!(MillimetersPerHour::new(0.2).is_wet());
    }
}
