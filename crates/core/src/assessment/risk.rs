//! Weather risk ladders
//!
//! Each [`RiskLadder`] watches one metric and contributes at most its most
//! severe matching tier. Unlike the classifier every ladder is evaluated, so
//! the result may hold several risks, in [`RISK_LADDERS`] order, followed by
//! the compound verglas and fog rules.

use crate::core_types::ParameterSet;
use crate::derivation::DerivedQuantities;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Severity, ordered from mildest to worst
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum RiskLevel {
    #[serde(rename = "faible")]
    Low,
    #[serde(rename = "modéré")]
    Moderate,
    #[serde(rename = "élevé")]
    High,
    #[serde(rename = "extrême")]
    Extreme,
}

impl RiskLevel {
    /// French label
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            RiskLevel::Low => "faible",
            RiskLevel::Moderate => "modéré",
            RiskLevel::High => "élevé",
            RiskLevel::Extreme => "extrême",
        }
    }

    /// High or extreme
    #[must_use]
    pub fn is_severe(self) -> bool {
        self >= RiskLevel::High
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// What a risk is about
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskCategory {
    Wind,
    Heat,
    Cold,
    Pressure,
    Precipitation,
    Uv,
    Visibility,
    Ice,
    Fog,
}

impl RiskCategory {
    /// French label
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            RiskCategory::Wind => "Vent",
            RiskCategory::Heat => "Chaleur",
            RiskCategory::Cold => "Froid",
            RiskCategory::Pressure => "Dépression",
            RiskCategory::Precipitation => "Précipitations",
            RiskCategory::Uv => "UV",
            RiskCategory::Visibility => "Visibilité",
            RiskCategory::Ice => "Verglas",
            RiskCategory::Fog => "Brouillard",
        }
    }
}

impl fmt::Display for RiskCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One identified risk
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Risk {
    pub category: RiskCategory,
    pub level: RiskLevel,
    pub description: String,
}

impl fmt::Display for Risk {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}): {}", self.category, self.level, self.description)
    }
}

/// How a tier threshold is compared with the metric
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trigger {
    /// metric ≥ threshold
    AtLeast,
    /// metric ≤ threshold
    AtMost,
    /// metric < threshold
    Below,
}

impl Trigger {
    fn fires(self, metric: f64, threshold: f64) -> bool {
        match self {
            Trigger::AtLeast => metric >= threshold,
            Trigger::AtMost => metric <= threshold,
            Trigger::Below => metric < threshold,
        }
    }
}

/// One rung of a ladder
#[derive(Debug, Clone, Copy)]
pub struct RiskTier {
    pub threshold: f64,
    pub level: RiskLevel,
    pub description: &'static str,
}

const fn tier(threshold: f64, level: RiskLevel, description: &'static str) -> RiskTier {
    RiskTier {
        threshold,
        level,
        description,
    }
}

/// A metric with its tiers, most severe first
#[derive(Clone, Copy)]
pub struct RiskLadder {
    pub category: RiskCategory,
    pub trigger: Trigger,
    pub metric: fn(&ParameterSet, &DerivedQuantities) -> f64,
    pub tiers: &'static [RiskTier],
}

impl fmt::Debug for RiskLadder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RiskLadder")
            .field("category", &self.category)
            .field("trigger", &self.trigger)
            .field("tiers", &self.tiers)
            .finish_non_exhaustive()
    }
}

impl RiskLadder {
    /// Most severe matching tier, if any
    #[must_use]
    pub fn evaluate(&self, params: &ParameterSet, derived: &DerivedQuantities) -> Option<Risk> {
        let metric = (self.metric)(params, derived);
        self.tiers
            .iter()
            .find(|tier| self.trigger.fires(metric, tier.threshold))
            .map(|tier| Risk {
                category: self.category,
                level: tier.level,
                description: tier.description.to_string(),
            })
    }
}

/// Single-metric ladders in output order
pub const RISK_LADDERS: [RiskLadder; 7] = [
    RiskLadder {
        category: RiskCategory::Wind,
        trigger: Trigger::AtLeast,
        metric: |p, _| *p.wind_speed,
        tiers: &[
            tier(118.0, RiskLevel::Extreme, "Vents de force ouragan, dégâts majeurs"),
            tier(89.0, RiskLevel::Extreme, "Tempête violente, chutes d'arbres probables"),
            tier(62.0, RiskLevel::High, "Coup de vent, déplacements dangereux"),
            tier(50.0, RiskLevel::Moderate, "Vent fort, objets légers emportés"),
            tier(39.0, RiskLevel::Low, "Vent assez fort, rafales gênantes"),
        ],
    },
    RiskLadder {
        category: RiskCategory::Heat,
        trigger: Trigger::AtLeast,
        metric: |_, d| *d.heat_index,
        tiers: &[
            tier(54.0, RiskLevel::Extreme, "Coup de chaleur imminent"),
            tier(41.0, RiskLevel::High, "Crampes et épuisement dus à la chaleur probables"),
            tier(32.0, RiskLevel::Moderate, "Fatigue possible en cas d'exposition prolongée"),
        ],
    },
    RiskLadder {
        category: RiskCategory::Cold,
        trigger: Trigger::AtMost,
        metric: |_, d| *d.wind_chill,
        tiers: &[
            tier(-40.0, RiskLevel::Extreme, "Gelures en quelques minutes"),
            tier(-28.0, RiskLevel::High, "Risque de gelures sur la peau exposée"),
            tier(-10.0, RiskLevel::Moderate, "Froid modéré, inconfort en extérieur"),
        ],
    },
    RiskLadder {
        category: RiskCategory::Pressure,
        trigger: Trigger::Below,
        metric: |p, _| *p.pressure,
        tiers: &[
            tier(960.0, RiskLevel::Extreme, "Dépression très creuse, tempête probable"),
            tier(975.0, RiskLevel::High, "Dépression marquée, dégradation rapide"),
            tier(990.0, RiskLevel::Moderate, "Basses pressions, temps perturbé"),
        ],
    },
    RiskLadder {
        category: RiskCategory::Precipitation,
        trigger: Trigger::AtLeast,
        metric: |p, _| *p.precipitation,
        tiers: &[
            tier(50.0, RiskLevel::Extreme, "Pluies diluviennes, crues éclair"),
            tier(25.0, RiskLevel::High, "Fortes pluies, inondations locales possibles"),
            tier(10.0, RiskLevel::Moderate, "Pluie soutenue, chaussées glissantes"),
        ],
    },
    RiskLadder {
        category: RiskCategory::Uv,
        trigger: Trigger::AtLeast,
        metric: |_, d| d.uv_index,
        tiers: &[
            tier(11.0, RiskLevel::Extreme, "Rayonnement UV extrême, brûlures en minutes"),
            tier(8.0, RiskLevel::High, "UV très élevé, protection indispensable"),
            tier(6.0, RiskLevel::Moderate, "UV élevé, protection recommandée"),
        ],
    },
    RiskLadder {
        category: RiskCategory::Visibility,
        trigger: Trigger::Below,
        metric: |_, d| *d.visibility,
        tiers: &[
            tier(1.0, RiskLevel::High, "Visibilité très réduite"),
            tier(5.0, RiskLevel::Moderate, "Visibilité réduite"),
        ],
    },
];

/// Below this air temperature wet surfaces may freeze (°C)
const ICE_TEMPERATURE: f64 = 2.0;

/// Above this humidity fog forms in non-freezing air (%)
const FOG_HUMIDITY: f64 = 95.0;

/// Evaluate every ladder then the compound rules
#[must_use]
pub fn assess_risks(params: &ParameterSet, derived: &DerivedQuantities) -> Vec<Risk> {
    let mut risks: Vec<Risk> = RISK_LADDERS
        .iter()
        .filter_map(|ladder| ladder.evaluate(params, derived))
        .collect();

    if params.temperature < ICE_TEMPERATURE && params.precipitation.is_wet() {
        risks.push(Risk {
            category: RiskCategory::Ice,
            level: RiskLevel::High,
            description: "Précipitations sur sol froid, risque de verglas".to_string(),
        });
    }

    if params.humidity > FOG_HUMIDITY && params.temperature > 0.0 {
        risks.push(Risk {
            category: RiskCategory::Fog,
            level: RiskLevel::Moderate,
            description: "Air saturé, formation de brouillard probable".to_string(),
        });
    }

    risks
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EngineConfig;
    use crate::core_types::units::{
        Celsius, Hectopascals, KilometersPerHour, MillimetersPerHour, Percent,
        WattsPerSquareMeter,
    };
    use crate::derivation::derive;

    /// Default state under a low sun, so UV stays out of the way
    fn calm() -> ParameterSet {
        ParameterSet {
            solar_radiation: WattsPerSquareMeter::new(100.0),
            ..ParameterSet::default()
        }
    }

    fn risks_for(params: &ParameterSet) -> Vec<Risk> {
        let derived = derive(params, &EngineConfig::default());
        assess_risks(params, &derived)
    }

    fn find(risks: &[Risk], category: RiskCategory) -> Option<&Risk> {
        risks.iter().find(|r| r.category == category)
    }

    #[test]
    fn test_calm_state_has_no_risk() {
        assert!(risks_for(&calm()).is_empty());
    }

    #[test]
    fn test_midday_sun_saturates_uv() {
        let risks = risks_for(&ParameterSet::default());
        assert_eq!(risks.len(), 1);
        assert_eq!(risks[0].category, RiskCategory::Uv);
        assert_eq!(risks[0].level, RiskLevel::Extreme);
    }

    #[test]
    fn test_ladder_keeps_only_worst_tier() {
        for (wind, level) in [
            (39.0, RiskLevel::Low),
            (55.0, RiskLevel::Moderate),
            (70.0, RiskLevel::High),
            (100.0, RiskLevel::Extreme),
            (130.0, RiskLevel::Extreme),
        ] {
            let params = ParameterSet {
                wind_speed: KilometersPerHour::new(wind),
                ..calm()
            };
            let risks = risks_for(&params);
            let wind_risks: Vec<_> = risks
                .iter()
                .filter(|r| r.category == RiskCategory::Wind)
                .collect();
            assert_eq!(wind_risks.len(), 1);
            assert_eq!(wind_risks[0].level, level, "wind {wind}");
        }
    }

    #[test]
    fn test_cold_wind_produces_cold_risk() {
        let params = ParameterSet {
            temperature: Celsius::new(-10.0),
            humidity: Percent::new(80.0),
            dew_point: Celsius::new(-12.6),
            wind_speed: KilometersPerHour::new(30.0),
            ..calm()
        };
        let risks = risks_for(&params);
        let cold = find(&risks, RiskCategory::Cold).expect("cold risk");
        assert_eq!(cold.level, RiskLevel::Moderate);
        assert_eq!(cold.category.label(), "Froid");
    }

    #[test]
    fn test_all_matching_ladders_append_in_order() {
        // Stormy: strong wind, deep low, reduced visibility from saturated air
        let params = ParameterSet {
            temperature: Celsius::new(1.0),
            humidity: Percent::new(97.0),
            dew_point: Celsius::new(0.6),
            pressure: Hectopascals::new(955.0),
            wind_speed: KilometersPerHour::new(95.0),
            cloud_cover: Percent::new(100.0),
            precipitation: MillimetersPerHour::new(30.0),
            ..calm()
        };
        let categories: Vec<_> = risks_for(&params).iter().map(|r| r.category).collect();
        assert_eq!(
            categories,
            [
                RiskCategory::Wind,
                RiskCategory::Pressure,
                RiskCategory::Precipitation,
                RiskCategory::Visibility,
                RiskCategory::Ice,
                RiskCategory::Fog,
            ]
        );
    }

    #[test]
    fn test_heat_ladder_uses_heat_index() {
        let params = ParameterSet {
            temperature: Celsius::new(35.0),
            humidity: Percent::new(60.0),
            dew_point: Celsius::new(26.1),
            ..ParameterSet::default()
        };
        let risks = risks_for(&params);
        let heat = find(&risks, RiskCategory::Heat).expect("heat risk");
        assert!(heat.level >= RiskLevel::High);
        assert!(heat.level.is_severe());
    }

    #[test]
    fn test_risk_level_serializes_in_french() {
        assert_eq!(serde_json::to_string(&RiskLevel::Moderate).unwrap(), "\"modéré\"");
        assert_eq!(serde_json::to_string(&RiskLevel::Extreme).unwrap(), "\"extrême\"");
        assert!(!RiskLevel::Moderate.is_severe());
    }
}
