//! End-to-end scenarios through `LabEngine`: presets, edits, runs, history
use std::sync::{Arc, Mutex};

use weather_lab_core::core_types::{Celsius, KilometersPerHour, Percent};
use weather_lab_core::{
    EngineConfig, LabEngine, LabError, ParameterKind, ParameterSet, RiskCategory, RiskLevel,
    SimulationResult, WeatherType,
};

#[ctor::ctor]
fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

#[test]
fn test_sunny_preset_runs_sunny() {
    let mut engine = LabEngine::new();
    engine.apply_preset("sunny").unwrap();

    let params = engine.parameters();
    assert_eq!(*params.temperature, 28.0);
    assert_eq!(*params.humidity, 45.0);
    assert_eq!(*params.pressure, 1020.0);
    assert_eq!(*params.cloud_cover, 10.0);
    assert_eq!(*params.precipitation, 0.0);

    let result = engine.run();
    assert_eq!(result.weather_type, WeatherType::Sunny);
    assert_eq!(result.weather_type.description(), "Ensoleillé");
}

#[test]
fn test_every_preset_classifies_as_intended() {
    let mut engine = LabEngine::new();
    for (key, expected) in [
        ("sunny", WeatherType::Sunny),
        ("rainy", WeatherType::Rain),
        ("stormy", WeatherType::Storm),
        ("winter", WeatherType::Snow),
        ("heatwave", WeatherType::HotDry),
    ] {
        engine.apply_preset(key).unwrap();
        assert_eq!(engine.run().weather_type, expected, "preset {key}");
    }
    assert_eq!(engine.history().len(), 5);
}

#[test]
fn test_stormy_preset_risks() {
    let mut engine = LabEngine::new();
    engine.apply_preset("stormy").unwrap();
    let result = engine.run();

    let wind = result
        .risks
        .iter()
        .find(|r| r.category == RiskCategory::Wind)
        .expect("wind risk");
    assert_eq!(wind.level, RiskLevel::High);
    assert!(result
        .risks
        .iter()
        .any(|r| r.category == RiskCategory::Pressure));
    let alerts: Vec<_> = result
        .recommendations
        .iter()
        .filter(|r| r.starts_with("Alerte"))
        .collect();
    assert_eq!(alerts.len(), 1);
    assert!(alerts[0].contains("vent"));
}

#[test]
fn test_heavy_precipitation_outranks_heat() {
    let mut engine = LabEngine::new();
    engine.set_parameter(ParameterKind::Temperature, 30.0).unwrap();
    engine.set_parameter(ParameterKind::Humidity, 10.0).unwrap();
    engine.set_parameter(ParameterKind::Precipitation, 25.0).unwrap();

    let result = engine.run();
    assert_eq!(result.weather_type, WeatherType::HeavyRain);
}

#[test]
fn test_history_keeps_ten_newest_first() {
    let mut engine = LabEngine::new();
    for i in 0..11 {
        engine
            .set_parameter(ParameterKind::Temperature, 10.0 + f64::from(i))
            .unwrap();
        engine.run();
    }

    let history = engine.history();
    assert_eq!(history.len(), 10);

    let sequences: Vec<u64> = history.iter().map(|r| r.sequence).collect();
    assert_eq!(sequences, (2..=11).rev().collect::<Vec<_>>());

    // The first run (10 °C) was evicted; the chart series starts at 11 °C
    let series = history.temperature_humidity_series();
    assert_eq!(series.first().map(|p| p.temperature), Some(11.0));
    assert_eq!(series.last().map(|p| p.temperature), Some(20.0));
}

#[test]
fn test_cold_wind_snow_and_frost_branches() {
    let mut engine = LabEngine::new();
    engine.set_parameter(ParameterKind::Temperature, -10.0).unwrap();
    engine.set_parameter(ParameterKind::Humidity, 80.0).unwrap();
    engine.set_parameter(ParameterKind::WindSpeed, 30.0).unwrap();

    let humid = engine.run();
    assert_eq!(humid.weather_type, WeatherType::Snow);
    let cold = humid
        .risks
        .iter()
        .find(|r| r.category == RiskCategory::Cold)
        .expect("cold risk");
    assert_eq!(cold.category.label(), "Froid");
    assert!(*humid.derived.wind_chill <= -10.0);

    // Falling precipitation keeps it snow
    engine.set_parameter(ParameterKind::Precipitation, 1.0).unwrap();
    assert_eq!(engine.run().weather_type, WeatherType::Snow);

    // Dry and below 75 % humidity: frost
    engine.set_parameter(ParameterKind::Precipitation, 0.0).unwrap();
    engine.set_parameter(ParameterKind::Humidity, 60.0).unwrap();
    let dry = engine.run();
    assert_eq!(dry.weather_type, WeatherType::Frost);
    assert!(dry.risks.iter().any(|r| r.category == RiskCategory::Cold));
}

#[test]
fn test_unknown_preset_keeps_current_state() {
    let mut engine = LabEngine::new();
    engine.apply_preset("rainy").unwrap();
    let before = *engine.parameters();

    let err = engine.apply_preset("tornado").unwrap_err();
    assert_eq!(err, LabError::UnknownPreset("tornado".to_string()));
    assert_eq!(*engine.parameters(), before);
}

#[test]
fn test_observer_sees_what_run_returns() {
    let received: Arc<Mutex<Vec<SimulationResult>>> = Arc::default();
    let sink = Arc::clone(&received);

    let mut engine = LabEngine::new();
    engine.subscribe(Box::new(move |result: &SimulationResult| {
        sink.lock().unwrap().push(result.clone());
    }));

    engine.apply_preset("heatwave").unwrap();
    let returned = engine.run();

    let received = received.lock().unwrap();
    assert_eq!(received.len(), 1);
    assert_eq!(received[0], returned);
}

#[test]
fn test_custom_history_capacity_and_altitude() {
    let config = EngineConfig::default()
        .with_history_capacity(3)
        .with_station_altitude(weather_lab_core::core_types::Meters::new(0.0));
    let mut engine = LabEngine::with_config(config).unwrap();

    for _ in 0..5 {
        engine.run();
    }
    assert_eq!(engine.history().len(), 3);

    // At sea level no reduction is applied
    let latest = engine.history().latest().unwrap();
    assert_eq!(latest.derived.sea_level_pressure, latest.parameters.pressure);
}

#[test]
fn test_result_json_for_renderers() {
    let mut engine = LabEngine::new();
    engine.apply_preset("winter").unwrap();
    let result = engine.run();

    let json = serde_json::to_value(&result).unwrap();
    assert_eq!(json["weather_type"], "snow");
    assert_eq!(json["parameters"]["cloud_type"], "stratus");
    assert!(json["comfort"]["score"].is_u64());
    assert!(json["evolution"].as_array().is_some_and(|e| !e.is_empty()));
}

#[test]
fn test_full_parameter_replacement_is_corrected() {
    let mut engine = LabEngine::new();
    let corrections = engine
        .set_parameters(ParameterSet {
            temperature: Celsius::new(12.0),
            humidity: Percent::new(95.0),
            dew_point: Celsius::new(18.0),
            wind_speed: KilometersPerHour::new(3.0),
            ..ParameterSet::default()
        })
        .unwrap();

    assert!(!corrections.is_empty());
    assert!(engine.parameters().dew_point <= engine.parameters().temperature);
}
