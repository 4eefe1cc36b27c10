use std::process::ExitCode;

use clap::Parser;
use rand::rngs::StdRng;
use rand::SeedableRng;
use weather_lab_core::core_types::Meters;
use weather_lab_core::{EngineConfig, LabEngine, LabResult, ParameterKind, SimulationResult};

/// Weather scenario demo with configurable parameters
#[derive(Parser, Debug)]
#[command(name = "weather-lab-demo")]
#[command(about = "Educational weather scenario engine demo", long_about = None)]
struct Args {
    /// Scenario preset (sunny, rainy, stormy, winter, heatwave)
    #[arg(short = 'p', long)]
    preset: Option<String>,

    /// Draw random parameters from this seed (applied after the preset)
    #[arg(long)]
    seed: Option<u64>,

    /// Temperature in °C
    #[arg(short, long, allow_negative_numbers = true)]
    temperature: Option<f64>,

    /// Relative humidity in %
    #[arg(long)]
    humidity: Option<f64>,

    /// Station pressure in hPa
    #[arg(long)]
    pressure: Option<f64>,

    /// Wind speed in km/h
    #[arg(short, long)]
    wind_speed: Option<f64>,

    /// Wind direction in degrees (0=North, 90=East)
    #[arg(long)]
    wind_direction: Option<f64>,

    /// Dew point in °C
    #[arg(long, allow_negative_numbers = true)]
    dew_point: Option<f64>,

    /// Cloud cover in %
    #[arg(long)]
    cloud_cover: Option<f64>,

    /// Precipitation in mm/h
    #[arg(long)]
    precipitation: Option<f64>,

    /// Cloud type code (0=none, 1=cumulus, 2=stratus, 3=nimbostratus, 4=cumulonimbus, 5=cirrus, 6=altostratus)
    #[arg(long)]
    cloud_type: Option<f64>,

    /// Solar radiation in W/m²
    #[arg(long)]
    solar_radiation: Option<f64>,

    /// Number of runs on the final parameters
    #[arg(short, long, default_value_t = 1)]
    runs: u32,

    /// Number of results kept in history
    #[arg(long, default_value_t = 10)]
    history: usize,

    /// Station altitude in meters, used for the sea-level pressure
    #[arg(long, default_value_t = 500.0)]
    altitude: f64,

    /// Sweep one parameter over a comma separated list of values instead of running
    #[arg(long, requires = "values")]
    sweep: Option<String>,

    /// Values for --sweep
    #[arg(long, value_delimiter = ',', allow_negative_numbers = true)]
    values: Vec<f64>,

    /// Print results as JSON
    #[arg(short, long)]
    json: bool,

    /// List available presets and exit
    #[arg(short, long)]
    list_presets: bool,
}

impl Args {
    fn overrides(&self) -> [(ParameterKind, Option<f64>); 10] {
        [
            (ParameterKind::Temperature, self.temperature),
            (ParameterKind::Humidity, self.humidity),
            (ParameterKind::Pressure, self.pressure),
            (ParameterKind::WindSpeed, self.wind_speed),
            (ParameterKind::WindDirection, self.wind_direction),
            (ParameterKind::CloudType, self.cloud_type),
            (ParameterKind::CloudCover, self.cloud_cover),
            (ParameterKind::Precipitation, self.precipitation),
            (ParameterKind::SolarRadiation, self.solar_radiation),
            // Dew point last so it is checked against the final temperature
            (ParameterKind::DewPoint, self.dew_point),
        ]
    }
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let args = Args::parse();

    let config = EngineConfig::default()
        .with_history_capacity(args.history)
        .with_station_altitude(Meters::new(args.altitude));
    let mut engine = match LabEngine::with_config(config) {
        Ok(engine) => engine,
        Err(err) => {
            eprintln!("Error: {err}");
            return ExitCode::FAILURE;
        }
    };

    if args.list_presets {
        for preset in engine.library().presets() {
            println!("{:<10} {}", preset.key, preset.name);
        }
        return ExitCode::SUCCESS;
    }

    if let Err(err) = prepare(&mut engine, &args) {
        eprintln!("Error: {err}");
        return ExitCode::FAILURE;
    }

    if let Some(name) = &args.sweep {
        return match name.parse::<ParameterKind>() {
            Ok(kind) => {
                print_sweep(&engine, kind, &args.values, args.json);
                ExitCode::SUCCESS
            }
            Err(err) => {
                eprintln!("Error: {err}");
                ExitCode::FAILURE
            }
        };
    }

    if !args.json {
        println!("=== Weather Lab Demo ===\n");
    }

    for _ in 0..args.runs.max(1) {
        let result = engine.run();
        if args.json {
            match serde_json::to_string_pretty(&result) {
                Ok(json) => println!("{json}"),
                Err(err) => {
                    eprintln!("Error: {err}");
                    return ExitCode::FAILURE;
                }
            }
        } else {
            print_report(&result);
        }
    }

    if !args.json && engine.history().len() > 1 {
        println!("=== History (oldest first) ===");
        println!("Run | Temp(°C) | Humidity(%)");
        println!("----|----------|------------");
        for point in engine.history().temperature_humidity_series() {
            println!(
                "{:3} | {:8.1} | {:11.1}",
                point.sequence, point.temperature, point.humidity
            );
        }
    }

    ExitCode::SUCCESS
}

/// Apply preset, random draw and explicit overrides, in that order.
fn prepare(engine: &mut LabEngine, args: &Args) -> LabResult<()> {
    let mut corrections = Vec::new();

    if let Some(key) = &args.preset {
        corrections.extend(engine.apply_preset(key)?);
    }

    if let Some(seed) = args.seed {
        corrections.extend(engine.randomize(&mut StdRng::seed_from_u64(seed)));
    }

    for (kind, value) in args.overrides() {
        if let Some(value) = value {
            corrections.extend(engine.set_parameter(kind, value)?);
        }
    }

    if !args.json {
        for correction in &corrections {
            println!("Corrected: {correction}");
        }
    }
    Ok(())
}

fn print_report(result: &SimulationResult) {
    let params = &result.parameters;
    let derived = &result.derived;

    println!("{}", result.summary());
    println!(
        "Temp: {:.1}°C, Humidity: {:.0}%, Pressure: {:.1} hPa, Wind: {:.0} km/h {} ({:.0}°)",
        *params.temperature,
        *params.humidity,
        *params.pressure,
        *params.wind_speed,
        params.wind_direction.compass_point(),
        *params.wind_direction
    );
    println!(
        "Clouds: {:.0}% {}, Precipitation: {:.1} mm/h, Solar: {:.0} W/m²",
        *params.cloud_cover,
        params.cloud_type.label(),
        *params.precipitation,
        *params.solar_radiation
    );
    println!(
        "Dew point: {:.1}°C, Heat index: {:.1}°C, Wind chill: {:.1}°C",
        *derived.dew_point, *derived.heat_index, *derived.wind_chill
    );
    println!(
        "Visibility: {:.1} km, UV: {:.1}, Sea-level pressure: {:.1} hPa",
        *derived.visibility, derived.uv_index, *derived.sea_level_pressure
    );

    if result.risks.is_empty() {
        println!("\nRisks: none");
    } else {
        println!("\nRisks:");
        for risk in &result.risks {
            println!(
                "  [{}] {}: {}",
                risk.level.label(),
                risk.category.label(),
                risk.description
            );
        }
    }

    println!("\nRecommendations:");
    for line in &result.recommendations {
        println!("  - {line}");
    }

    println!("\nEvolution:");
    for line in &result.evolution {
        println!("  - {line}");
    }
    println!();
}

fn print_sweep(engine: &LabEngine, kind: ParameterKind, values: &[f64], json: bool) {
    let results = engine.sweep(kind, values);

    if json {
        let documents: Vec<serde_json::Value> = values
            .iter()
            .zip(&results)
            .map(|(value, result)| match result {
                Ok(result) => serde_json::json!({ "value": value, "result": result }),
                Err(err) => serde_json::json!({ "value": value, "error": err.to_string() }),
            })
            .collect();
        match serde_json::to_string_pretty(&documents) {
            Ok(text) => println!("{text}"),
            Err(err) => eprintln!("Error: {err}"),
        }
        return;
    }

    println!("=== Sweep over {kind} ===\n");
    println!("   Value | Weather              | Feels like | Comfort | Risks");
    println!("---------|----------------------|------------|---------|------");
    for (value, result) in values.iter().zip(results) {
        match result {
            Ok(result) => println!(
                "{:8.1} | {:<20} | {:8.1}°C | {:7} | {:5}",
                value,
                result.weather_type.description(),
                *result.derived.feels_like,
                result.comfort.score,
                result.risks.len()
            ),
            Err(err) => println!("{value:8.1} | rejected: {err}"),
        }
    }
}
