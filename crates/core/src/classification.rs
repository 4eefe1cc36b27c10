//! Rule-table weather classifier
//!
//! [`CLASSIFICATION_RULES`] is evaluated top to bottom and the first rule
//! returning `Some` decides the [`WeatherType`]. The last rule always matches.

use crate::core_types::ParameterSet;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Classified weather situation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WeatherType {
    Sunny,
    PartlyCloudy,
    Cloudy,
    Rain,
    HeavyRain,
    Storm,
    Snow,
    Frost,
    HotDry,
    HotHumid,
}

impl WeatherType {
    /// Every weather type
    pub const ALL: [WeatherType; 10] = [
        WeatherType::Sunny,
        WeatherType::PartlyCloudy,
        WeatherType::Cloudy,
        WeatherType::Rain,
        WeatherType::HeavyRain,
        WeatherType::Storm,
        WeatherType::Snow,
        WeatherType::Frost,
        WeatherType::HotDry,
        WeatherType::HotHumid,
    ];

    /// `snake_case` identifier, as serialized
    #[must_use]
    pub fn key(self) -> &'static str {
        match self {
            WeatherType::Sunny => "sunny",
            WeatherType::PartlyCloudy => "partly_cloudy",
            WeatherType::Cloudy => "cloudy",
            WeatherType::Rain => "rain",
            WeatherType::HeavyRain => "heavy_rain",
            WeatherType::Storm => "storm",
            WeatherType::Snow => "snow",
            WeatherType::Frost => "frost",
            WeatherType::HotDry => "hot_dry",
            WeatherType::HotHumid => "hot_humid",
        }
    }

    /// Display emoji
    #[must_use]
    pub fn emoji(self) -> &'static str {
        match self {
            WeatherType::Sunny => "☀️",
            WeatherType::PartlyCloudy => "⛅",
            WeatherType::Cloudy => "☁️",
            WeatherType::Rain => "🌧️",
            WeatherType::HeavyRain => "⛈️",
            WeatherType::Storm => "🌩️",
            WeatherType::Snow => "❄️",
            WeatherType::Frost => "🧊",
            WeatherType::HotDry => "🔥",
            WeatherType::HotHumid => "🥵",
        }
    }

    /// French description shown with the result
    #[must_use]
    pub fn description(self) -> &'static str {
        match self {
            WeatherType::Sunny => "Ensoleillé",
            WeatherType::PartlyCloudy => "Partiellement nuageux",
            WeatherType::Cloudy => "Nuageux",
            WeatherType::Rain => "Pluie",
            WeatherType::HeavyRain => "Fortes pluies",
            WeatherType::Storm => "Orage",
            WeatherType::Snow => "Neige",
            WeatherType::Frost => "Gel",
            WeatherType::HotDry => "Chaleur sèche",
            WeatherType::HotHumid => "Chaleur humide",
        }
    }
}

impl fmt::Display for WeatherType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.emoji(), self.description())
    }
}

/// One entry of the classification cascade
#[derive(Clone, Copy)]
pub struct ClassificationRule {
    /// Short name used in logs and tests
    pub name: &'static str,
    /// Returns the weather type when the rule matches
    pub apply: fn(&ParameterSet) -> Option<WeatherType>,
}

impl fmt::Debug for ClassificationRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClassificationRule")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

/// Classification cascade in priority order
pub const CLASSIFICATION_RULES: [ClassificationRule; 10] = [
    ClassificationRule {
        name: "torrential_precipitation",
        apply: |p| (p.precipitation > 20.0).then_some(WeatherType::HeavyRain),
    },
    ClassificationRule {
        name: "moderate_precipitation",
        apply: |p| (p.precipitation > 5.0).then_some(WeatherType::Rain),
    },
    ClassificationRule {
        name: "cold_precipitation",
        apply: |p| {
            (p.precipitation.is_wet() && p.temperature < 2.0).then_some(WeatherType::Snow)
        },
    },
    ClassificationRule {
        name: "low_pressure",
        apply: |p| {
            if p.pressure >= 985.0 {
                None
            } else if p.wind_speed > 50.0 {
                Some(WeatherType::Storm)
            } else if p.humidity > 80.0 {
                Some(WeatherType::HeavyRain)
            } else {
                Some(WeatherType::Rain)
            }
        },
    },
    ClassificationRule {
        name: "below_freezing",
        apply: |p| {
            if p.temperature >= 0.0 {
                None
            } else if p.humidity > 75.0 || p.precipitation.is_wet() {
                Some(WeatherType::Snow)
            } else {
                Some(WeatherType::Frost)
            }
        },
    },
    ClassificationRule {
        name: "extreme_heat",
        apply: |p| {
            if p.temperature <= 35.0 {
                None
            } else if p.humidity < 30.0 {
                Some(WeatherType::HotDry)
            } else {
                Some(WeatherType::HotHumid)
            }
        },
    },
    ClassificationRule {
        name: "overcast",
        apply: |p| (p.cloud_cover > 80.0).then_some(WeatherType::Cloudy),
    },
    ClassificationRule {
        name: "broken_cloud",
        apply: |p| (p.cloud_cover > 40.0).then_some(WeatherType::PartlyCloudy),
    },
    ClassificationRule {
        name: "anticyclone_clear_sky",
        apply: |p| {
            (p.pressure >= 1020.0 && p.cloud_cover < 20.0).then_some(WeatherType::Sunny)
        },
    },
    ClassificationRule {
        name: "fallback",
        apply: |_| Some(WeatherType::PartlyCloudy),
    },
];

/// Name of the first rule that matches `params`
#[must_use]
pub fn matching_rule(params: &ParameterSet) -> &'static str {
    CLASSIFICATION_RULES
        .iter()
        .find(|rule| (rule.apply)(params).is_some())
        .map_or("fallback", |rule| rule.name)
}

/// Classify a parameter set
#[must_use]
pub fn classify(params: &ParameterSet) -> WeatherType {
    CLASSIFICATION_RULES
        .iter()
        .find_map(|rule| (rule.apply)(params))
        .unwrap_or(WeatherType::PartlyCloudy)
}
