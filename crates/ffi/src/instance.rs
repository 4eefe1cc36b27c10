use std::ffi::CString;
use std::ptr;
use std::sync::{Mutex, RwLock};

use weather_lab_core::core_types::Meters;
use weather_lab_core::{EngineConfig, LabEngine, LabResult};

use crate::error::{DefaultWeatherLabError, WeatherLabErrorCode};
use crate::helpers::{clear_last_error, track_error};
use crate::queries::WeatherLabSeriesPoint;

/// The weather lab context.
/// Holds one scenario engine: current parameters, preset library and run history.
///
/// # Thread Safety
/// `WeatherLabInstance` is `Send + Sync` and can be shared across threads.
/// The engine is protected by an `RwLock`, so queries (history length,
/// parameter reads) run concurrently while edits and runs take the write
/// lock briefly.
///
/// # Usage
/// ```cpp
/// WeatherLabInstance* lab = nullptr;
/// if (weather_lab_new(&lab) != WeatherLabErrorCode::Ok) {
///     return;
/// }
///
/// weather_lab_apply_preset(lab, "stormy");
///
/// WeatherLabResultSummary summary;
/// weather_lab_run(lab, &summary);
/// printf("%u risk(s)\n", summary.risk_count);
///
/// weather_lab_destroy(lab);
/// ```
pub struct WeatherLabInstance {
    pub(crate) engine: RwLock<LabEngine>,
    /// JSON of the latest result, kept alive for `weather_lab_get_last_result_json`.
    pub(crate) last_json: Mutex<Option<CString>>,
    /// Reused buffer behind `weather_lab_get_history_series`.
    pub(crate) series_snapshot: Mutex<Vec<WeatherLabSeriesPoint>>,
}

impl WeatherLabInstance {
    pub(crate) fn new(config: EngineConfig) -> LabResult<Box<Self>> {
        Ok(Box::new(Self {
            engine: RwLock::new(LabEngine::with_config(config)?),
            last_json: Mutex::new(None),
            series_snapshot: Mutex::new(Vec::new()),
        }))
    }
}

/// Build an instance into `out_instance`, which must be non-null.
unsafe fn create_into(
    config: EngineConfig,
    out_instance: *mut *mut WeatherLabInstance,
) -> WeatherLabErrorCode {
    match WeatherLabInstance::new(config) {
        Ok(instance) => {
            unsafe {
                *out_instance = Box::into_raw(instance);
            }
            clear_last_error();
            WeatherLabErrorCode::Ok
        }
        Err(err) => {
            unsafe {
                // Set to null on error (per documentation contract)
                *out_instance = ptr::null_mut();
            }
            track_error(&DefaultWeatherLabError::from(err))
        }
    }
}

/// Creates a new weather lab instance with the default configuration
/// (history of 10 runs, station altitude 500 m).
///
/// On success `*out_instance` receives an owned pointer that must be released
/// with `weather_lab_destroy`. On error it is set to null.
///
/// # Safety
/// - `out_instance` must be a valid, writable pointer.
///
/// Example (C++)
/// ```cpp
/// WeatherLabInstance* lab = nullptr;
/// WeatherLabErrorCode err = weather_lab_new(&lab);
/// if (err != WeatherLabErrorCode::Ok) {
///     fprintf(stderr, "Failed to create lab: %s\n", weather_lab_get_last_error());
///     return;
/// }
/// // ... use lab ...
/// weather_lab_destroy(lab);
/// ```
#[no_mangle]
pub unsafe extern "C" fn weather_lab_new(
    out_instance: *mut *mut WeatherLabInstance,
) -> WeatherLabErrorCode {
    if out_instance.is_null() {
        return track_error(&DefaultWeatherLabError::null_pointer("out_instance"));
    }

    unsafe { create_into(EngineConfig::default(), out_instance) }
}

/// Creates a weather lab instance with a custom history capacity and station altitude (metres).
///
/// A capacity of zero is raised to one; storage grows with the runs, so a
/// very large capacity only removes the bound. An altitude that is negative
/// or not finite is rejected with `InvalidConfig` and `*out_instance` is set
/// to null.
///
/// # Safety
/// - `out_instance` must be a valid, writable pointer.
#[no_mangle]
pub unsafe extern "C" fn weather_lab_new_with_config(
    history_capacity: usize,
    station_altitude_m: f64,
    out_instance: *mut *mut WeatherLabInstance,
) -> WeatherLabErrorCode {
    if out_instance.is_null() {
        return track_error(&DefaultWeatherLabError::null_pointer("out_instance"));
    }

    let config = EngineConfig::default()
        .with_history_capacity(history_capacity)
        .with_station_altitude(Meters::new(station_altitude_m));
    unsafe { create_into(config, out_instance) }
}

/// Destroys an instance previously created by `weather_lab_new`.
///
/// Behavior:
/// - If `ptr` is null, this function is a no-op.
/// - Otherwise the engine, its history and any cached JSON are dropped.
///
/// # Safety
/// - The pointer MUST have been created by `weather_lab_new` or `weather_lab_new_with_config`.
/// - The pointer MUST NOT have been freed already.
/// - No other thread may use the pointer during or after this call.
#[no_mangle]
pub unsafe extern "C" fn weather_lab_destroy(ptr: *mut WeatherLabInstance) {
    if ptr.is_null() {
        return;
    }

    // SAFETY: The pointer was created by `Box::into_raw` in `weather_lab_new`
    // and has not been freed. Rebuilding the Box drops the instance.
    unsafe {
        drop(Box::from_raw(ptr));
    }
}
