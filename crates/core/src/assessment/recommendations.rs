//! Advisory strings
//!
//! A fixed set per [`WeatherType`], then additive advice for apparent
//! temperature extremes, poor visibility, low comfort and severe risks.
//! Severe risks share a single alert line naming every affected category.

use super::comfort::{ComfortIndex, ComfortLevel};
use super::risk::Risk;
use crate::classification::WeatherType;
use crate::derivation::DerivedQuantities;

/// Base advisories for each weather type
#[must_use]
pub fn weather_advice(weather: WeatherType) -> &'static [&'static str] {
    match weather {
        WeatherType::Sunny => &[
            "Appliquez une crème solaire et portez des lunettes de soleil",
            "Profitez des activités de plein air",
        ],
        WeatherType::PartlyCloudy => &[
            "Conditions agréables pour sortir",
            "Gardez une veste légère à portée de main",
        ],
        WeatherType::Cloudy => &["Luminosité faible, prévoyez un éclairage adapté"],
        WeatherType::Rain => &[
            "Prenez un parapluie ou un imperméable",
            "Réduisez votre vitesse sur route mouillée",
        ],
        WeatherType::HeavyRain => &[
            "Évitez les déplacements non essentiels",
            "Ne traversez pas les zones inondées",
            "Surveillez les bulletins de vigilance",
        ],
        WeatherType::Storm => &[
            "Restez à l'intérieur et éloignez-vous des fenêtres",
            "Rentrez ou fixez les objets extérieurs",
            "Évitez les abris sous les arbres",
        ],
        WeatherType::Snow => &[
            "Équipez votre véhicule de pneus hiver",
            "Habillez-vous en plusieurs couches",
        ],
        WeatherType::Frost => &[
            "Protégez les plantes sensibles du gel",
            "Attention aux plaques de glace le matin",
        ],
        WeatherType::HotDry => &[
            "Buvez de l'eau régulièrement",
            "Évitez tout feu en extérieur, risque d'incendie",
        ],
        WeatherType::HotHumid => &[
            "Restez au frais aux heures les plus chaudes",
            "Limitez les efforts physiques",
        ],
    }
}

/// Apparent temperature above which heat stress advice is added (°C)
const HOT_FEELS_LIKE: f64 = 35.0;

/// Apparent temperature below which cold exposure advice is added (°C)
const COLD_FEELS_LIKE: f64 = -10.0;

/// Visibility below which driving advice is added (km)
const POOR_VISIBILITY_KM: f64 = 2.0;

/// Build the ordered advisory list
#[must_use]
pub fn recommendations(
    weather: WeatherType,
    derived: &DerivedQuantities,
    comfort: &ComfortIndex,
    risks: &[Risk],
) -> Vec<String> {
    let mut advice: Vec<String> = weather_advice(weather)
        .iter()
        .map(|s| (*s).to_string())
        .collect();

    if derived.feels_like > HOT_FEELS_LIKE {
        advice.push("Ressenti très chaud : hydratez-vous et cherchez l'ombre".to_string());
    } else if derived.feels_like < COLD_FEELS_LIKE {
        advice.push("Ressenti glacial : couvrez la tête et les extrémités".to_string());
    }

    if derived.visibility < POOR_VISIBILITY_KM {
        advice.push("Visibilité réduite : allumez vos feux et gardez vos distances".to_string());
    }

    if comfort.level <= ComfortLevel::Uncomfortable {
        advice.push("Conditions peu confortables : limitez le temps passé dehors".to_string());
    }

    let severe: Vec<&Risk> = risks.iter().filter(|r| r.level.is_severe()).collect();
    if let Some(worst) = severe.iter().map(|r| r.level).max() {
        let categories: Vec<String> = severe
            .iter()
            .map(|r| r.category.label().to_lowercase())
            .collect();
        advice.push(format!(
            "Alerte météo ({worst}) : {}. Suivez les consignes de sécurité",
            categories.join(", ")
        ));
    }

    advice
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assessment::risk::{RiskCategory, RiskLevel};
    use crate::core_types::units::{Celsius, Hectopascals, Kilometers};

    fn derived(feels_like: f64, visibility: f64) -> DerivedQuantities {
        DerivedQuantities {
            feels_like: Celsius::new(feels_like),
            heat_index: Celsius::new(feels_like),
            wind_chill: Celsius::new(feels_like),
            visibility: Kilometers::new(visibility),
            uv_index: 3.0,
            sea_level_pressure: Hectopascals::new(1013.25),
            dew_point: Celsius::new(10.0),
        }
    }

    fn comfort(score: u8) -> ComfortIndex {
        ComfortIndex {
            score,
            level: ComfortLevel::from_score(score),
        }
    }

    #[test]
    fn test_weather_advice_comes_first() {
        let advice = recommendations(WeatherType::Storm, &derived(20.0, 30.0), &comfort(70), &[]);
        assert_eq!(advice, weather_advice(WeatherType::Storm));
    }

    #[test]
    fn test_every_weather_type_has_advice() {
        for weather in WeatherType::ALL {
            assert!(!weather_advice(weather).is_empty());
        }
    }

    #[test]
    fn test_additive_advice() {
        let risks = [
            Risk {
                category: RiskCategory::Heat,
                level: RiskLevel::High,
                description: "Crampes".to_string(),
            },
            Risk {
                category: RiskCategory::Uv,
                level: RiskLevel::Moderate,
                description: "UV élevé".to_string(),
            },
        ];
        let advice = recommendations(WeatherType::HotHumid, &derived(42.0, 1.5), &comfort(10), &risks);
        let base = weather_advice(WeatherType::HotHumid).len();

        assert_eq!(advice.len(), base + 4);
        assert!(advice[base].starts_with("Ressenti très chaud"));
        assert!(advice[base + 1].starts_with("Visibilité réduite"));
        assert!(advice[base + 2].starts_with("Conditions peu confortables"));
        assert_eq!(
            advice[base + 3],
            "Alerte météo (élevé) : chaleur. Suivez les consignes de sécurité"
        );
    }

    #[test]
    fn test_single_alert_for_several_severe_risks() {
        let risk = |category, level| Risk {
            category,
            level,
            description: String::new(),
        };
        let risks = [
            risk(RiskCategory::Wind, RiskLevel::High),
            risk(RiskCategory::Uv, RiskLevel::Moderate),
            risk(RiskCategory::Precipitation, RiskLevel::Extreme),
        ];
        let advice = recommendations(WeatherType::Storm, &derived(20.0, 30.0), &comfort(70), &risks);

        let alerts: Vec<_> = advice.iter().filter(|a| a.starts_with("Alerte")).collect();
        assert_eq!(alerts.len(), 1);
        assert!(alerts[0].starts_with("Alerte météo (extrême) : "));
        assert!(alerts[0].contains("vent"));
        assert!(!alerts[0].contains("uv"));
    }

    #[test]
    fn test_no_alert_without_severe_risk() {
        let risks = [Risk {
            category: RiskCategory::Uv,
            level: RiskLevel::Moderate,
            description: String::new(),
        }];
        let advice = recommendations(WeatherType::Sunny, &derived(25.0, 30.0), &comfort(80), &risks);
        assert!(advice.iter().all(|a| !a.starts_with("Alerte")));
    }

    #[test]
    fn test_cold_feels_like_advice() {
        let advice = recommendations(WeatherType::Frost, &derived(-20.0, 30.0), &comfort(45), &[]);
        assert!(advice.iter().any(|a| a.starts_with("Ressenti glacial")));
    }
}
