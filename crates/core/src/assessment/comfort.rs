//! Thermal comfort score
//!
//! Starts from 50 and adds or removes points for the apparent temperature,
//! humidity, wind and UV bands, then clamps to 0-100.

use crate::core_types::units::{Celsius, KilometersPerHour, Percent};
use serde::{Deserialize, Serialize};
use std::fmt;

const BASE_SCORE: i32 = 50;

/// Comfort level, ordered from worst to best
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComfortLevel {
    VeryUncomfortable,
    Uncomfortable,
    Average,
    Good,
    VeryGood,
    Excellent,
}

impl ComfortLevel {
    /// Level for a clamped score (thresholds 80/70/60/40/20)
    #[must_use]
    pub fn from_score(score: u8) -> Self {
        match score {
            80.. => ComfortLevel::Excellent,
            70..=79 => ComfortLevel::VeryGood,
            60..=69 => ComfortLevel::Good,
            40..=59 => ComfortLevel::Average,
            20..=39 => ComfortLevel::Uncomfortable,
            _ => ComfortLevel::VeryUncomfortable,
        }
    }

    /// French label
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            ComfortLevel::Excellent => "Excellent",
            ComfortLevel::VeryGood => "Très bon",
            ComfortLevel::Good => "Bon",
            ComfortLevel::Average => "Moyen",
            ComfortLevel::Uncomfortable => "Inconfortable",
            ComfortLevel::VeryUncomfortable => "Très inconfortable",
        }
    }
}

impl fmt::Display for ComfortLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Comfort score with its level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComfortIndex {
    /// 0-100
    pub score: u8,
    pub level: ComfortLevel,
}

fn feels_like_points(feels_like: f64) -> i32 {
    if (18.0..=24.0).contains(&feels_like) {
        30
    } else if (15.0..=27.0).contains(&feels_like) {
        20
    } else if (10.0..=30.0).contains(&feels_like) {
        10
    } else if !(0.0..=40.0).contains(&feels_like) {
        -40
    } else {
        -20
    }
}

fn humidity_points(humidity: f64) -> i32 {
    if (40.0..=60.0).contains(&humidity) {
        15
    } else if (30.0..=70.0).contains(&humidity) {
        5
    } else if !(20.0..=90.0).contains(&humidity) {
        -20
    } else {
        -10
    }
}

fn wind_points(wind: f64) -> i32 {
    if (5.0..=15.0).contains(&wind) {
        10
    } else if wind > 40.0 {
        -25
    } else if wind > 25.0 {
        -15
    } else {
        0
    }
}

fn uv_points(uv: f64) -> i32 {
    if uv > 8.0 {
        -15
    } else if uv > 5.0 {
        -5
    } else {
        0
    }
}

/// Score how pleasant the conditions feel.
///
/// `temperature` is accepted for symmetry with the other assessors; the
/// apparent temperature already carries its effect.
#[must_use]
pub fn comfort_index(
    _temperature: Celsius,
    humidity: Percent,
    wind_speed: KilometersPerHour,
    feels_like: Celsius,
    uv_index: f64,
) -> ComfortIndex {
    let raw = BASE_SCORE
        + feels_like_points(*feels_like)
        + humidity_points(*humidity)
        + wind_points(*wind_speed)
        + uv_points(uv_index);

    let score = raw.clamp(0, 100) as u8;
    ComfortIndex {
        score,
        level: ComfortLevel::from_score(score),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn score(feels: f64, humidity: f64, wind: f64, uv: f64) -> ComfortIndex {
        comfort_index(
            Celsius::new(feels),
            Percent::new(humidity),
            KilometersPerHour::new(wind),
            Celsius::new(feels),
            uv,
        )
    }

    #[test]
    fn test_ideal_conditions_clamp_to_100() {
        // 50 + 30 + 15 + 10 = 105
        let c = score(21.0, 50.0, 10.0, 2.0);
        assert_eq!(c.score, 100);
        assert_eq!(c.level, ComfortLevel::Excellent);
    }

    #[test]
    fn test_hostile_conditions_clamp_to_0() {
        // 50 - 40 - 20 - 25 - 15 = -50
        let c = score(45.0, 95.0, 60.0, 10.0);
        assert_eq!(c.score, 0);
        assert_eq!(c.level, ComfortLevel::VeryUncomfortable);
    }

    #[test]
    fn test_bands() {
        // 50 + 20 + 5 + 0 - 5 = 70
        let c = score(26.0, 65.0, 20.0, 6.0);
        assert_eq!(c.score, 70);
        assert_eq!(c.level, ComfortLevel::VeryGood);

        // 50 + 10 - 10 - 15 + 0 = 35
        let c = score(12.0, 80.0, 30.0, 1.0);
        assert_eq!(c.score, 35);
        assert_eq!(c.level, ComfortLevel::Uncomfortable);

        // 50 - 20 + 15 + 0 = 45
        let c = score(5.0, 50.0, 0.0, 0.0);
        assert_eq!(c.score, 45);
        assert_eq!(c.level, ComfortLevel::Average);
    }

    #[test]
    fn test_level_thresholds() {
        assert_eq!(ComfortLevel::from_score(80), ComfortLevel::Excellent);
        assert_eq!(ComfortLevel::from_score(79), ComfortLevel::VeryGood);
        assert_eq!(ComfortLevel::from_score(60), ComfortLevel::Good);
        assert_eq!(ComfortLevel::from_score(59), ComfortLevel::Average);
        assert_eq!(ComfortLevel::from_score(20), ComfortLevel::Uncomfortable);
        assert_eq!(ComfortLevel::from_score(19), ComfortLevel::VeryUncomfortable);
        assert!(ComfortLevel::Excellent > ComfortLevel::Average);
    }
}
