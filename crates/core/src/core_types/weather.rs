//! Meteorological parameter set driven by the lab sliders
//!
//! A [`ParameterSet`] is the complete state the engine evaluates: ten
//! quantities covering temperature, moisture, pressure, wind, cloud and
//! radiation. Every edit goes through [`ParameterSet::set`], which validates
//! the value against the physical domain of its [`ParameterKind`] before
//! anything is mutated.

use crate::core_types::units::{
    Celsius, Degrees, Hectopascals, KilometersPerHour, MillimetersPerHour, Percent,
    WattsPerSquareMeter,
};
use crate::error::{LabError, LabResult};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::RangeInclusive;
use std::str::FromStr;

/// Physical domains accepted by validation.
///
/// Values outside these ranges are rejected with [`LabError::OutOfRange`].
/// The bounds are wider than anything the sliders offer so that synthetic
/// states (sweeps, random draws) are still accepted.
pub mod domains {
    use std::ops::RangeInclusive;

    /// Air temperature (°C)
    pub const TEMPERATURE: RangeInclusive<f64> = -50.0..=55.0;

    /// Relative humidity and cloud cover (%)
    pub const PERCENT: RangeInclusive<f64> = 0.0..=100.0;

    /// Station pressure (hPa), record low to record high
    pub const PRESSURE: RangeInclusive<f64> = 870.0..=1085.0;

    /// Wind speed (km/h)
    pub const WIND_SPEED: RangeInclusive<f64> = 0.0..=250.0;

    /// Wind direction (degrees), 360 wraps to 0
    pub const WIND_DIRECTION: RangeInclusive<f64> = 0.0..=360.0;

    /// Dew point (°C)
    pub const DEW_POINT: RangeInclusive<f64> = -90.0..=55.0;

    /// Precipitation rate (mm/h)
    pub const PRECIPITATION: RangeInclusive<f64> = 0.0..=500.0;

    /// Global horizontal irradiance (W/m²)
    pub const SOLAR_RADIATION: RangeInclusive<f64> = 0.0..=1200.0;

    /// Numeric cloud type codes
    pub const CLOUD_TYPE: RangeInclusive<f64> = 0.0..=6.0;
}

/// Cloud genus shown in the lab
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CloudType {
    /// Clear sky
    #[default]
    None,
    /// Fair-weather heaps
    Cumulus,
    /// Uniform grey layer
    Stratus,
    /// Thick rain-bearing layer
    Nimbostratus,
    /// Thunderstorm tower
    Cumulonimbus,
    /// High ice-crystal filaments
    Cirrus,
    /// Mid-level grey sheet
    Altostratus,
}

impl CloudType {
    /// All cloud types in code order
    pub const ALL: [CloudType; 7] = [
        CloudType::None,
        CloudType::Cumulus,
        CloudType::Stratus,
        CloudType::Nimbostratus,
        CloudType::Cumulonimbus,
        CloudType::Cirrus,
        CloudType::Altostratus,
    ];

    /// Numeric code used by the slider/select inputs and the C API
    #[must_use]
    pub fn code(self) -> u8 {
        match self {
            CloudType::None => 0,
            CloudType::Cumulus => 1,
            CloudType::Stratus => 2,
            CloudType::Nimbostratus => 3,
            CloudType::Cumulonimbus => 4,
            CloudType::Cirrus => 5,
            CloudType::Altostratus => 6,
        }
    }

    /// Resolve a numeric code. Fractional codes are rejected.
    ///
    /// # Errors
    /// Returns [`LabError::UnknownCloudType`] for anything that is not an
    /// integer in `0..=6`.
    pub fn from_code(code: f64) -> LabResult<Self> {
        if code.fract() != 0.0 || !domains::CLOUD_TYPE.contains(&code) {
            return Err(LabError::UnknownCloudType(code));
        }
        Ok(Self::ALL[code as usize])
    }

    /// French display label
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            CloudType::None => "Aucun",
            CloudType::Cumulus => "Cumulus",
            CloudType::Stratus => "Stratus",
            CloudType::Nimbostratus => "Nimbostratus",
            CloudType::Cumulonimbus => "Cumulonimbus",
            CloudType::Cirrus => "Cirrus",
            CloudType::Altostratus => "Altostratus",
        }
    }
}

/// Identifies one adjustable parameter of a [`ParameterSet`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParameterKind {
    Temperature,
    Humidity,
    Pressure,
    WindSpeed,
    WindDirection,
    DewPoint,
    CloudCover,
    Precipitation,
    CloudType,
    SolarRadiation,
}

impl ParameterKind {
    /// Every parameter, in slider order
    pub const ALL: [ParameterKind; 10] = [
        ParameterKind::Temperature,
        ParameterKind::Humidity,
        ParameterKind::Pressure,
        ParameterKind::WindSpeed,
        ParameterKind::WindDirection,
        ParameterKind::DewPoint,
        ParameterKind::CloudCover,
        ParameterKind::Precipitation,
        ParameterKind::CloudType,
        ParameterKind::SolarRadiation,
    ];

    /// Canonical `snake_case` name
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            ParameterKind::Temperature => "temperature",
            ParameterKind::Humidity => "humidity",
            ParameterKind::Pressure => "pressure",
            ParameterKind::WindSpeed => "wind_speed",
            ParameterKind::WindDirection => "wind_direction",
            ParameterKind::DewPoint => "dew_point",
            ParameterKind::CloudCover => "cloud_cover",
            ParameterKind::Precipitation => "precipitation",
            ParameterKind::CloudType => "cloud_type",
            ParameterKind::SolarRadiation => "solar_radiation",
        }
    }

    /// Accepted value range
    #[must_use]
    pub fn domain(self) -> RangeInclusive<f64> {
        match self {
            ParameterKind::Temperature => domains::TEMPERATURE,
            ParameterKind::Humidity | ParameterKind::CloudCover => domains::PERCENT,
            ParameterKind::Pressure => domains::PRESSURE,
            ParameterKind::WindSpeed => domains::WIND_SPEED,
            ParameterKind::WindDirection => domains::WIND_DIRECTION,
            ParameterKind::DewPoint => domains::DEW_POINT,
            ParameterKind::Precipitation => domains::PRECIPITATION,
            ParameterKind::CloudType => domains::CLOUD_TYPE,
            ParameterKind::SolarRadiation => domains::SOLAR_RADIATION,
        }
    }

    /// Check a raw value against this parameter's domain.
    ///
    /// # Errors
    /// [`LabError::NonFinite`] for NaN/infinity, [`LabError::OutOfRange`]
    /// when outside [`ParameterKind::domain`].
    pub fn validate(self, value: f64) -> LabResult<f64> {
        if !value.is_finite() {
            return Err(LabError::NonFinite { parameter: self });
        }
        let domain = self.domain();
        if !domain.contains(&value) {
            return Err(LabError::OutOfRange {
                parameter: self,
                value,
                min: *domain.start(),
                max: *domain.end(),
            });
        }
        Ok(value)
    }
}

impl fmt::Display for ParameterKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ParameterKind {
    type Err = LabError;

    /// Accepts `snake_case`, `camelCase` (as emitted by the UI) and kebab-case names.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .chars()
            .filter(|c| *c != '_' && *c != '-')
            .map(|c| c.to_ascii_lowercase())
            .collect();
        let kind = match normalized.as_str() {
            "temperature" | "temp" => ParameterKind::Temperature,
            "humidity" => ParameterKind::Humidity,
            "pressure" => ParameterKind::Pressure,
            "windspeed" => ParameterKind::WindSpeed,
            "winddirection" => ParameterKind::WindDirection,
            "dewpoint" => ParameterKind::DewPoint,
            "cloudcover" => ParameterKind::CloudCover,
            "precipitation" => ParameterKind::Precipitation,
            "cloudtype" => ParameterKind::CloudType,
            "solarradiation" => ParameterKind::SolarRadiation,
            _ => return Err(LabError::UnknownParameter(s.to_string())),
        };
        Ok(kind)
    }
}

/// Complete meteorological state evaluated by the engine
///
/// # Example
/// ```
/// use weather_lab_core::core_types::{ParameterKind, ParameterSet};
///
/// let mut params = ParameterSet::default();
/// params.set(ParameterKind::Temperature, 31.5).unwrap();
/// assert_eq!(*params.temperature, 31.5);
///
/// // Out-of-domain edits are rejected and leave the state untouched
/// assert!(params.set(ParameterKind::Humidity, 140.0).is_err());
/// assert_eq!(*params.humidity, 60.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ParameterSet {
    /// Air temperature
    pub temperature: Celsius,

    /// Relative humidity
    pub humidity: Percent,

    /// Station pressure
    pub pressure: Hectopascals,

    /// Mean wind speed
    pub wind_speed: KilometersPerHour,

    /// Direction the wind blows from (0=North, 90=East, 180=South, 270=West)
    pub wind_direction: Degrees,

    /// Dew point; never above `temperature` once corrected
    pub dew_point: Celsius,

    /// Fraction of the sky covered by cloud
    pub cloud_cover: Percent,

    /// Precipitation rate
    pub precipitation: MillimetersPerHour,

    /// Dominant cloud genus
    pub cloud_type: CloudType,

    /// Global horizontal irradiance
    pub solar_radiation: WattsPerSquareMeter,
}

impl Default for ParameterSet {
    /// Mild spring afternoon; already consistent.
    fn default() -> Self {
        ParameterSet {
            temperature: Celsius::new(20.0),
            humidity: Percent::new(60.0),
            pressure: Hectopascals::new(1013.0),
            wind_speed: KilometersPerHour::new(10.0),
            wind_direction: Degrees::new(180.0),
            dew_point: Celsius::new(12.0),
            cloud_cover: Percent::new(30.0),
            precipitation: MillimetersPerHour::DRY,
            cloud_type: CloudType::Cumulus,
            solar_radiation: WattsPerSquareMeter::new(600.0),
        }
    }
}

impl ParameterSet {
    /// Read a parameter as a raw number (cloud type as its code)
    #[must_use]
    pub fn get(&self, kind: ParameterKind) -> f64 {
        match kind {
            ParameterKind::Temperature => *self.temperature,
            ParameterKind::Humidity => *self.humidity,
            ParameterKind::Pressure => *self.pressure,
            ParameterKind::WindSpeed => *self.wind_speed,
            ParameterKind::WindDirection => *self.wind_direction,
            ParameterKind::DewPoint => *self.dew_point,
            ParameterKind::CloudCover => *self.cloud_cover,
            ParameterKind::Precipitation => *self.precipitation,
            ParameterKind::CloudType => f64::from(self.cloud_type.code()),
            ParameterKind::SolarRadiation => *self.solar_radiation,
        }
    }

    /// Validate and store a single parameter.
    ///
    /// Does not run the consistency corrector; the engine does that after
    /// every edit.
    ///
    /// # Errors
    /// Any [`LabError`] from [`ParameterKind::validate`] or
    /// [`CloudType::from_code`]. On error the set is unchanged.
    pub fn set(&mut self, kind: ParameterKind, value: f64) -> LabResult<()> {
        let value = kind.validate(value)?;
        match kind {
            ParameterKind::Temperature => self.temperature = Celsius::new(value),
            ParameterKind::Humidity => self.humidity = Percent::new(value),
            ParameterKind::Pressure => self.pressure = Hectopascals::new(value),
            ParameterKind::WindSpeed => self.wind_speed = KilometersPerHour::new(value),
            ParameterKind::WindDirection => {
                self.wind_direction = Degrees::new(value).normalized();
            }
            ParameterKind::DewPoint => self.dew_point = Celsius::new(value),
            ParameterKind::CloudCover => self.cloud_cover = Percent::new(value),
            ParameterKind::Precipitation => self.precipitation = MillimetersPerHour::new(value),
            ParameterKind::CloudType => self.cloud_type = CloudType::from_code(value)?,
            ParameterKind::SolarRadiation => {
                self.solar_radiation = WattsPerSquareMeter::new(value);
            }
        }
        Ok(())
    }

    /// Check every field against its domain.
    ///
    /// Presets and deserialized states bypass [`ParameterSet::set`], so the
    /// engine calls this before accepting them.
    ///
    /// # Errors
    /// The first field that fails validation, in slider order.
    pub fn validate(&self) -> LabResult<()> {
        for kind in ParameterKind::ALL {
            kind.validate(self.get(kind))?;
        }
        Ok(())
    }

    /// Draw a random but plausible state.
    ///
    /// Ranges follow the slider bounds; humidity starts at 5% so the Magnus
    /// formula stays well conditioned. The result is not yet corrected.
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let temperature = rng.random_range(-20.0..=42.0);
        let humidity = rng.random_range(5.0..=100.0);
        let precipitation = if rng.random_bool(0.3) {
            rng.random_range(0.1..=40.0)
        } else {
            0.0
        };
        let cloud_type = CloudType::ALL[rng.random_range(0..CloudType::ALL.len())];

        ParameterSet {
            temperature: Celsius::new(temperature),
            humidity: Percent::new(humidity),
            pressure: Hectopascals::new(rng.random_range(960.0..=1040.0)),
            wind_speed: KilometersPerHour::new(rng.random_range(0.0..=120.0)),
            wind_direction: Degrees::new(rng.random_range(0.0..360.0)),
            dew_point: Celsius::new(temperature - rng.random_range(0.0..=20.0)),
            cloud_cover: Percent::new(rng.random_range(0.0..=100.0)),
            precipitation: MillimetersPerHour::new(precipitation),
            cloud_type,
            solar_radiation: WattsPerSquareMeter::new(rng.random_range(0.0..=1100.0)),
        }
    }
}
