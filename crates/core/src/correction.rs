//! Consistency corrector
//!
//! Enforces cross-parameter plausibility after every edit. The rules run in a
//! fixed order in a single pass; the final dew point clamp supersedes the
//! tolerance check that opens the pass.
//!
//! | # | rule                                                              |
//! |---|-------------------------------------------------------------------|
//! | 1 | dew point off by more than the tolerance → Magnus value (0.1 °C)   |
//! | 2 | wet with less than 30 % cloud → cloud cover raised to 60 %        |
//! | 3 | solar radiation capped at `1200 · (1 − cloud/100)`                |
//! | 4 | > 15 mm/h → Cumulonimbus (T > 25) or Nimbostratus; < 20 % → None  |
//! | 5 | dew point above temperature → `temperature − 1`                   |

use crate::config::EngineConfig;
use crate::core_types::units::{Celsius, Percent, WattsPerSquareMeter};
use crate::core_types::{CloudType, ParameterSet};
use crate::derivation::dew_point_floored;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

/// Clear-sky irradiance ceiling (W/m²)
pub const MAX_SOLAR_RADIATION: f64 = 1200.0;

/// Precipitation can't fall from a sky with less cloud than this (%)
const MIN_WET_CLOUD_COVER: f64 = 30.0;

/// Cloud cover imposed when it rains from a near-clear sky (%)
const WET_CLOUD_COVER: f64 = 60.0;

/// Above this rate (mm/h) the cloud must be a rain-bearing genus
const HEAVY_PRECIPITATION: f64 = 15.0;

/// Below this cover (%) there is no dominant cloud genus
const CLEAR_SKY_COVER: f64 = 20.0;

/// Warm air turns heavy precipitation convective (°C)
const CONVECTIVE_TEMPERATURE: f64 = 25.0;

/// One adjustment made by [`correct`]
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "rule", rename_all = "snake_case")]
pub enum Correction {
    /// Rule 1
    DewPointRecomputed { from: Celsius, to: Celsius },
    /// Rule 2
    CloudCoverRaised { from: Percent, to: Percent },
    /// Rule 3
    SolarRadiationCapped {
        from: WattsPerSquareMeter,
        to: WattsPerSquareMeter,
    },
    /// Rule 4
    CloudTypeForced { from: CloudType, to: CloudType },
    /// Rule 5
    DewPointClamped { from: Celsius, to: Celsius },
}

impl fmt::Display for Correction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Correction::DewPointRecomputed { from, to } => {
                write!(f, "dew point recomputed {from} -> {to}")
            }
            Correction::CloudCoverRaised { from, to } => {
                write!(f, "cloud cover raised {from} -> {to}")
            }
            Correction::SolarRadiationCapped { from, to } => {
                write!(f, "solar radiation capped {from} -> {to}")
            }
            Correction::CloudTypeForced { from, to } => {
                write!(f, "cloud type forced {} -> {}", from.label(), to.label())
            }
            Correction::DewPointClamped { from, to } => {
                write!(f, "dew point clamped {from} -> {to}")
            }
        }
    }
}

/// Apply the consistency rules in order and report what changed.
///
/// Idempotent for any config accepted by [`EngineConfig::validate`]: a second
/// call on the result returns an empty list.
pub fn correct(params: &mut ParameterSet, config: &EngineConfig) -> Vec<Correction> {
    let mut applied = Vec::new();

    // 1. Dew point must agree with temperature and humidity
    let derived = dew_point_floored(params.temperature, params.humidity, config.humidity_floor);
    if (*params.dew_point - *derived).abs() > *config.dew_point_tolerance {
        let to = derived.round_tenth();
        applied.push(Correction::DewPointRecomputed {
            from: params.dew_point,
            to,
        });
        params.dew_point = to;
    }

    // 2. Precipitation needs cloud
    if params.precipitation.is_wet() && params.cloud_cover < MIN_WET_CLOUD_COVER {
        let to = Percent::new(WET_CLOUD_COVER);
        applied.push(Correction::CloudCoverRaised {
            from: params.cloud_cover,
            to,
        });
        params.cloud_cover = to;
    }

    // 3. Cloud blocks sunshine
    let ceiling = MAX_SOLAR_RADIATION * (1.0 - params.cloud_cover.to_fraction());
    if params.solar_radiation > ceiling {
        let to = WattsPerSquareMeter::new(ceiling);
        applied.push(Correction::SolarRadiationCapped {
            from: params.solar_radiation,
            to,
        });
        params.solar_radiation = to;
    }

    // 4. Cloud genus follows precipitation and cover
    let genus = if params.precipitation > HEAVY_PRECIPITATION {
        if params.temperature > CONVECTIVE_TEMPERATURE {
            Some(CloudType::Cumulonimbus)
        } else {
            Some(CloudType::Nimbostratus)
        }
    } else if params.cloud_cover < CLEAR_SKY_COVER {
        Some(CloudType::None)
    } else {
        None
    };
    if let Some(to) = genus.filter(|genus| *genus != params.cloud_type) {
        applied.push(Correction::CloudTypeForced {
            from: params.cloud_type,
            to,
        });
        params.cloud_type = to;
    }

    // 5. Hard clamp, supersedes rule 1
    if params.dew_point > params.temperature {
        let to = Celsius::new(*params.temperature - 1.0);
        applied.push(Correction::DewPointClamped {
            from: params.dew_point,
            to,
        });
        params.dew_point = to;
    }

    for correction in &applied {
        debug!(%correction, "Consistency correction");
    }

    applied
}
