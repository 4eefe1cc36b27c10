//! Short-term trend statements
//!
//! Independent heuristics evaluated in a fixed order, closed by one
//! statement per weather type.

use crate::classification::WeatherType;
use crate::core_types::ParameterSet;

/// Warm, humid, falling pressure: convective set-up
fn is_unstable(params: &ParameterSet) -> bool {
    params.temperature > 25.0 && params.humidity > 70.0 && params.pressure < 1010.0
}

fn instability_trend(params: &ParameterSet) -> Option<&'static str> {
    is_unstable(params).then_some("Instabilité : orages possibles en fin de journée")
}

fn pressure_trend(params: &ParameterSet) -> Option<&'static str> {
    if params.pressure < 990.0 {
        Some("Dépression active : dégradation marquée dans les prochaines heures")
    } else if params.pressure < 1005.0 {
        Some("Pression basse : temps instable et changeant")
    } else if params.pressure > 1025.0 {
        Some("Anticyclone puissant : temps stable pour plusieurs jours")
    } else if params.pressure > 1015.0 {
        Some("Hautes pressions : amélioration progressive")
    } else {
        None
    }
}

fn cloud_trend(params: &ParameterSet) -> Option<&'static str> {
    if params.cloud_cover > 70.0 && !params.precipitation.is_wet() {
        Some("Ciel chargé : précipitations possibles dans la journée")
    } else if params.precipitation > 10.0 {
        Some("Précipitations soutenues : cumuls importants attendus")
    } else if params.precipitation.is_wet() && params.cloud_cover < 70.0 {
        Some("Averses passagères : éclaircies entre les passages pluvieux")
    } else if params.cloud_cover < 20.0 {
        Some("Ciel dégagé : fortes amplitudes thermiques jour/nuit")
    } else {
        None
    }
}

fn wind_trend(params: &ParameterSet) -> Option<&'static str> {
    if params.wind_speed > 60.0 {
        Some("Vents violents persistants, accalmie lente")
    } else if params.wind_speed > 30.0 {
        Some("Vent soutenu : renouvellement rapide des masses d'air")
    } else if params.wind_speed < 5.0 {
        Some("Air calme : stagnation et brumes matinales possibles")
    } else {
        None
    }
}

fn frost_trend(params: &ParameterSet) -> Option<&'static str> {
    (params.temperature < 3.0 && params.humidity > 80.0)
        .then_some("Risque de gelée blanche ou de givre en fin de nuit")
}

fn fire_trend(params: &ParameterSet) -> Option<&'static str> {
    (params.temperature > 30.0 && params.humidity < 30.0 && params.wind_speed > 20.0)
        .then_some("Risque d'incendie élevé : végétation sèche et vent")
}

fn closing_statement(weather: WeatherType) -> &'static str {
    match weather {
        WeatherType::Sunny => "Tendance : persistance du beau temps",
        WeatherType::PartlyCloudy => "Tendance : alternance de nuages et d'éclaircies",
        WeatherType::Cloudy => "Tendance : ciel gris durable, peu d'évolution",
        WeatherType::Rain => "Tendance : pluie faiblissant progressivement",
        WeatherType::HeavyRain => "Tendance : épisode pluvieux intense avant amélioration",
        WeatherType::Storm => "Tendance : passage orageux suivi d'une baisse des températures",
        WeatherType::Snow => "Tendance : accumulation de neige possible",
        WeatherType::Frost => "Tendance : froid sec persistant",
        WeatherType::HotDry => "Tendance : chaleur sèche durable, sécheresse accrue",
        WeatherType::HotHumid => "Tendance : lourdeur persistante, orages de chaleur possibles",
    }
}

/// Heuristics in output order
const TREND_HEURISTICS: [fn(&ParameterSet) -> Option<&'static str>; 6] = [
    pressure_trend,
    cloud_trend,
    instability_trend,
    wind_trend,
    frost_trend,
    fire_trend,
];

/// Trend statements for `params` classified as `weather`
#[must_use]
pub fn evolution(params: &ParameterSet, weather: WeatherType) -> Vec<String> {
    TREND_HEURISTICS
        .iter()
        .filter_map(|heuristic| heuristic(params))
        .chain(std::iter::once(closing_statement(weather)))
        .map(str::to_string)
        .collect()
}
