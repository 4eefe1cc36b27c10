use std::os::raw::c_char;
use std::ptr;

use rand::rngs::StdRng;
use rand::SeedableRng;
use weather_lab_core::{RiskLevel, SimulationResult, WeatherType};

use crate::error::{DefaultWeatherLabError, WeatherLabErrorCode};
use crate::helpers::{
    handle_ffi_result_error, instance_from_ptr, str_from_ptr, track_result, with_engine_mut,
};
use crate::instance::WeatherLabInstance;

/// Classified weather situation, mirrored for C callers.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WeatherLabWeatherType {
    Sunny = 0,
    PartlyCloudy = 1,
    Cloudy = 2,
    Rain = 3,
    HeavyRain = 4,
    Storm = 5,
    Snow = 6,
    Frost = 7,
    HotDry = 8,
    HotHumid = 9,
}

impl From<WeatherType> for WeatherLabWeatherType {
    fn from(weather: WeatherType) -> Self {
        match weather {
            WeatherType::Sunny => Self::Sunny,
            WeatherType::PartlyCloudy => Self::PartlyCloudy,
            WeatherType::Cloudy => Self::Cloudy,
            WeatherType::Rain => Self::Rain,
            WeatherType::HeavyRain => Self::HeavyRain,
            WeatherType::Storm => Self::Storm,
            WeatherType::Snow => Self::Snow,
            WeatherType::Frost => Self::Frost,
            WeatherType::HotDry => Self::HotDry,
            WeatherType::HotHumid => Self::HotHumid,
        }
    }
}

/// Numeric part of a simulation result.
///
/// Text (recommendations, trend statements, risk descriptions) is only
/// available through `weather_lab_get_last_result_json`.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WeatherLabResultSummary {
    /// Run number, starting at 1
    pub sequence: u64,
    pub weather_type: WeatherLabWeatherType,
    pub temperature: f64,
    pub feels_like: f64,
    pub heat_index: f64,
    pub wind_chill: f64,
    pub dew_point: f64,
    /// Kilometres, within [0.1, 50]
    pub visibility_km: f64,
    /// Within [0, 11]
    pub uv_index: f64,
    pub sea_level_pressure: f64,
    /// Within [0, 100]
    pub comfort_score: u8,
    pub risk_count: u32,
    /// -1 when there is no risk, otherwise 0 (low) to 3 (extreme)
    pub max_risk_level: i32,
}

impl From<&SimulationResult> for WeatherLabResultSummary {
    fn from(result: &SimulationResult) -> Self {
        Self {
            sequence: result.sequence,
            weather_type: result.weather_type.into(),
            temperature: *result.parameters.temperature,
            feels_like: *result.derived.feels_like,
            heat_index: *result.derived.heat_index,
            wind_chill: *result.derived.wind_chill,
            dew_point: *result.derived.dew_point,
            visibility_km: *result.derived.visibility,
            uv_index: result.derived.uv_index,
            sea_level_pressure: *result.derived.sea_level_pressure,
            comfort_score: result.comfort.score,
            risk_count: u32::try_from(result.risks.len()).unwrap_or(u32::MAX),
            max_risk_level: result.max_risk_level().map_or(-1, risk_level_code),
        }
    }
}

fn risk_level_code(level: RiskLevel) -> i32 {
    match level {
        RiskLevel::Low => 0,
        RiskLevel::Moderate => 1,
        RiskLevel::High => 2,
        RiskLevel::Extreme => 3,
    }
}

/// Sets one parameter by its `snake_case` name (e.g. `"wind_speed"`), then
/// runs the consistency corrector.
///
/// # Returns
/// - `Ok` when the value was accepted
/// - `UnknownParameter`, `OutOfRange` or `NonFinite` when rejected; the
///   current parameters are left untouched
/// - `NullPointer` / `InvalidString` for bad arguments
///
/// Example (C++)
/// ```cpp
/// if (weather_lab_set_parameter(lab, "humidity", 140.0) != WeatherLabErrorCode::Ok) {
///     printf("%s\n", weather_lab_get_last_error());
/// }
/// ```
#[no_mangle]
pub extern "C" fn weather_lab_set_parameter(
    ptr: *const WeatherLabInstance,
    name: *const c_char,
    value: f64,
) -> WeatherLabErrorCode {
    handle_ffi_result_error(|| {
        let instance = instance_from_ptr(ptr)?;
        let name = str_from_ptr(name, "name")?;
        with_engine_mut(instance, |engine| engine.set_parameter_by_name(name, value))??;
        Ok::<(), DefaultWeatherLabError>(())
    })
}

/// Loads a preset (`"sunny"`, `"rainy"`, `"stormy"`, `"winter"`, `"heatwave"`)
/// into the current parameters.
///
/// An unknown key returns `UnknownPreset` and keeps the current parameters.
#[no_mangle]
pub extern "C" fn weather_lab_apply_preset(
    ptr: *const WeatherLabInstance,
    key: *const c_char,
) -> WeatherLabErrorCode {
    handle_ffi_result_error(|| {
        let instance = instance_from_ptr(ptr)?;
        let key = str_from_ptr(key, "key")?;
        with_engine_mut(instance, |engine| engine.apply_preset(key))??;
        Ok::<(), DefaultWeatherLabError>(())
    })
}

/// Runs the pipeline on the current parameters and records the result in history.
///
/// # Safety
/// - `ptr` must come from `weather_lab_new`.
/// - `out_result` must be a valid, writable pointer, or null to discard the summary.
#[no_mangle]
pub unsafe extern "C" fn weather_lab_run(
    ptr: *const WeatherLabInstance,
    out_result: *mut WeatherLabResultSummary,
) -> WeatherLabErrorCode {
    let summary = match track_result(
        instance_from_ptr(ptr).and_then(|instance| {
            with_engine_mut(instance, |engine| WeatherLabResultSummary::from(&engine.run()))
        }),
    ) {
        Ok(summary) => summary,
        Err(code) => return code,
    };

    if !out_result.is_null() {
        // SAFETY: Non-null was checked above; the caller guarantees it is writable.
        unsafe {
            ptr::write(out_result, summary);
        }
    }
    WeatherLabErrorCode::Ok
}

/// Draws a random parameter set from `seed`, then corrects it.
///
/// The same seed always yields the same parameters.
#[no_mangle]
pub extern "C" fn weather_lab_randomize(
    ptr: *const WeatherLabInstance,
    seed: u64,
) -> WeatherLabErrorCode {
    handle_ffi_result_error(|| {
        let instance = instance_from_ptr(ptr)?;
        with_engine_mut(instance, |engine| {
            engine.randomize(&mut StdRng::seed_from_u64(seed));
        })?;
        Ok::<(), DefaultWeatherLabError>(())
    })
}

/// Empties the run history. Parameters and the run counter are unchanged.
#[no_mangle]
pub extern "C" fn weather_lab_clear_history(ptr: *const WeatherLabInstance) -> WeatherLabErrorCode {
    handle_ffi_result_error(|| {
        let instance = instance_from_ptr(ptr)?;
        with_engine_mut(instance, weather_lab_core::LabEngine::clear_history)?;
        if let Ok(mut cached) = instance.last_json.lock() {
            *cached = None;
        }
        Ok::<(), DefaultWeatherLabError>(())
    })
}
