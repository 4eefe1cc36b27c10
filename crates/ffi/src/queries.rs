use std::ffi::CString;
use std::os::raw::c_char;
use std::ptr;

use weather_lab_core::{ParameterKind, SeriesPoint};

use crate::error::{DefaultWeatherLabError, WeatherLabErrorCode};
use crate::helpers::{
    handle_ffi_result_error, instance_from_ptr, str_from_ptr, track_error, with_engine,
};
use crate::instance::WeatherLabInstance;

#[repr(C)]
/// One point of the temperature/humidity chart, oldest run first.
/// Keep this layout stable for C/C++/C# consumers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WeatherLabSeriesPoint {
    /// Run number the point was taken from.
    pub sequence: u64,

    /// Air temperature (Celsius).
    pub temperature: f64,

    /// Relative humidity (percent).
    pub humidity: f64,
}

impl From<SeriesPoint> for WeatherLabSeriesPoint {
    fn from(point: SeriesPoint) -> Self {
        Self {
            sequence: point.sequence,
            temperature: point.temperature,
            humidity: point.humidity,
        }
    }
}

#[no_mangle]
/// Number of results currently held in the run history (at most its capacity).
///
/// # Safety
///
/// - `ptr` must be a valid pointer returned by `weather_lab_new` or null.
/// - `out_len` must be a valid, non-null pointer to a `usize`.
pub unsafe extern "C" fn weather_lab_get_history_len(
    ptr: *const WeatherLabInstance,
    out_len: *mut usize,
) -> WeatherLabErrorCode {
    if out_len.is_null() {
        return track_error(&DefaultWeatherLabError::null_pointer("out_len"));
    }

    handle_ffi_result_error(|| {
        let instance = instance_from_ptr(ptr)?;
        let len = with_engine(instance, |engine| engine.history().len())?;
        unsafe {
            *out_len = len;
        }
        Ok::<(), DefaultWeatherLabError>(())
    })
}

#[no_mangle]
/// Read the current (corrected) value of one parameter by name.
///
/// The cloud type is reported as its numeric code (0 = none, 2 = stratus, 4 = cumulonimbus).
///
/// # Safety
///
/// - `ptr` must be a valid pointer returned by `weather_lab_new` or null.
/// - `name` must be a null-terminated string.
/// - `out_value` must be a valid, non-null pointer to an `f64`.
pub unsafe extern "C" fn weather_lab_get_parameter(
    ptr: *const WeatherLabInstance,
    name: *const c_char,
    out_value: *mut f64,
) -> WeatherLabErrorCode {
    if out_value.is_null() {
        return track_error(&DefaultWeatherLabError::null_pointer("out_value"));
    }

    handle_ffi_result_error(|| {
        let instance = instance_from_ptr(ptr)?;
        let kind = str_from_ptr(name, "name")?.parse::<ParameterKind>()?;
        let value = with_engine(instance, |engine| engine.parameters().get(kind))?;
        unsafe {
            *out_value = value;
        }
        Ok::<(), DefaultWeatherLabError>(())
    })
}

#[no_mangle]
/// Return a borrowed pointer to the temperature/humidity chart series.
///
/// Points are ordered oldest run first. The buffer is owned by the instance
/// and reused between calls.
///
/// - Returns a borrowed pointer via `out_array`. **DO NOT FREE THIS POINTER**.
/// - The pointer is invalidated by the next call to this function or by `weather_lab_destroy`.
///
/// Returns
/// - `WeatherLabErrorCode::Ok` (0) on success, `out_len` may be 0
/// - `WeatherLabErrorCode::NullPointer` if `ptr`, `out_len`, or `out_array` is null
/// - `WeatherLabErrorCode::LockPoisoned` if an internal lock is poisoned
///
/// # Safety
///
/// - `ptr` must be a valid pointer returned by `weather_lab_new` or null.
/// - `out_len` must be a valid, non-null pointer to a `usize`.
/// - `out_array` must be a valid, non-null pointer to a `*const WeatherLabSeriesPoint`.
///
/// # Example Usage (C++)
/// ```cpp
/// uintptr_t len = 0;
/// const WeatherLabSeriesPoint* points = nullptr;
/// if (weather_lab_get_history_series(lab, &len, &points) == WeatherLabErrorCode::Ok) {
///     for (uintptr_t i = 0; i < len; i++) {
///         plot(points[i].temperature, points[i].humidity);
///     }
/// }
/// ```
pub unsafe extern "C" fn weather_lab_get_history_series(
    ptr: *const WeatherLabInstance,
    out_len: *mut usize,
    out_array: *mut *const WeatherLabSeriesPoint,
) -> WeatherLabErrorCode {
    if out_len.is_null() {
        return track_error(&DefaultWeatherLabError::null_pointer("out_len"));
    }

    if out_array.is_null() {
        unsafe {
            *out_len = 0;
        }
        return track_error(&DefaultWeatherLabError::null_pointer("out_array"));
    }

    let result = handle_ffi_result_error(|| {
        let instance = instance_from_ptr(ptr)?;
        let mut snapshot = instance
            .series_snapshot
            .lock()
            .map_err(|_| DefaultWeatherLabError::lock_poisoned("series_snapshot"))?;
        snapshot.clear();

        with_engine(instance, |engine| {
            snapshot.extend(
                engine
                    .history()
                    .temperature_humidity_series()
                    .into_iter()
                    .map(WeatherLabSeriesPoint::from),
            );
        })?;

        unsafe {
            *out_len = snapshot.len();
            *out_array = snapshot.as_ptr();
        }
        Ok::<(), DefaultWeatherLabError>(())
    });

    // Set to null on error (per documentation contract)
    if result != WeatherLabErrorCode::Ok {
        unsafe {
            *out_array = ptr::null();
            *out_len = 0;
        }
    }

    result
}

#[no_mangle]
/// Return the most recent result encoded as JSON.
///
/// The document carries everything a renderer needs: parameters, derived
/// quantities, weather type, comfort, risks, recommendations and trend statements.
///
/// - Returns a borrowed null-terminated string via `out_json`. **DO NOT FREE THIS POINTER**.
/// - The pointer is invalidated by the next call to this function,
///   `weather_lab_clear_history` or `weather_lab_destroy`.
///
/// Returns
/// - `WeatherLabErrorCode::Ok` (0) on success
/// - `WeatherLabErrorCode::NoResult` if the history is empty
/// - `WeatherLabErrorCode::NullPointer` if `ptr` or `out_json` is null
///
/// # Safety
///
/// - `ptr` must be a valid pointer returned by `weather_lab_new` or null.
/// - `out_json` must be a valid, non-null pointer to a `*const c_char`.
pub unsafe extern "C" fn weather_lab_get_last_result_json(
    ptr: *const WeatherLabInstance,
    out_json: *mut *const c_char,
) -> WeatherLabErrorCode {
    if out_json.is_null() {
        return track_error(&DefaultWeatherLabError::null_pointer("out_json"));
    }

    let result = handle_ffi_result_error(|| {
        let instance = instance_from_ptr(ptr)?;
        let json = with_engine(instance, |engine| {
            engine
                .history()
                .latest()
                .map(serde_json::to_string)
        })?
        .ok_or_else(DefaultWeatherLabError::no_result)?
        .map_err(|err| DefaultWeatherLabError::serialization(&err.to_string()))?;

        let json = CString::new(json)
            .map_err(|err| DefaultWeatherLabError::serialization(&err.to_string()))?;

        let mut cached = instance
            .last_json
            .lock()
            .map_err(|_| DefaultWeatherLabError::lock_poisoned("last_json"))?;
        let borrowed = cached.insert(json).as_ptr();
        unsafe {
            *out_json = borrowed;
        }
        Ok::<(), DefaultWeatherLabError>(())
    });

    if result != WeatherLabErrorCode::Ok {
        unsafe {
            *out_json = ptr::null();
        }
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::instance::{weather_lab_destroy, weather_lab_new, weather_lab_new_with_config};
    use crate::simulation::{weather_lab_apply_preset, weather_lab_clear_history, weather_lab_run};
    use std::ffi::{CStr, CString};

    fn new_lab() -> *mut WeatherLabInstance {
        let mut lab = ptr::null_mut();
        assert_eq!(unsafe { weather_lab_new(&mut lab) }, WeatherLabErrorCode::Ok);
        lab
    }

    #[test]
    fn test_history_len_and_series() {
        let mut lab = ptr::null_mut();
        assert_eq!(
            unsafe { weather_lab_new_with_config(3, 0.0, &mut lab) },
            WeatherLabErrorCode::Ok
        );

        for _ in 0..5 {
            assert_eq!(
                unsafe { weather_lab_run(lab, ptr::null_mut()) },
                WeatherLabErrorCode::Ok
            );
        }

        let mut len = 0;
        assert_eq!(
            unsafe { weather_lab_get_history_len(lab, &mut len) },
            WeatherLabErrorCode::Ok
        );
        assert_eq!(len, 3);

        let mut points: *const WeatherLabSeriesPoint = ptr::null();
        assert_eq!(
            unsafe { weather_lab_get_history_series(lab, &mut len, &mut points) },
            WeatherLabErrorCode::Ok
        );
        let series = unsafe { std::slice::from_raw_parts(points, len) };
        let sequences: Vec<u64> = series.iter().map(|p| p.sequence).collect();
        assert_eq!(sequences, vec![3, 4, 5]);

        unsafe { weather_lab_destroy(lab) };
    }

    #[test]
    fn test_get_parameter_after_preset() {
        let lab = new_lab();
        let key = CString::new("winter").unwrap();
        weather_lab_apply_preset(lab, key.as_ptr());

        let name = CString::new("cloudType").unwrap();
        let mut value = f64::NAN;
        assert_eq!(
            unsafe { weather_lab_get_parameter(lab, name.as_ptr(), &mut value) },
            WeatherLabErrorCode::Ok
        );
        // Stratus
        assert_eq!(value, 2.0);

        let unknown = CString::new("ozone").unwrap();
        assert_eq!(
            unsafe { weather_lab_get_parameter(lab, unknown.as_ptr(), &mut value) },
            WeatherLabErrorCode::UnknownParameter
        );

        unsafe { weather_lab_destroy(lab) };
    }

    #[test]
    fn test_last_result_json() {
        let lab = new_lab();
        let mut json: *const c_char = ptr::null();
        assert_eq!(
            unsafe { weather_lab_get_last_result_json(lab, &mut json) },
            WeatherLabErrorCode::NoResult
        );
        assert!(json.is_null());

        let key = CString::new("heatwave").unwrap();
        weather_lab_apply_preset(lab, key.as_ptr());
        unsafe { weather_lab_run(lab, ptr::null_mut()) };

        assert_eq!(
            unsafe { weather_lab_get_last_result_json(lab, &mut json) },
            WeatherLabErrorCode::Ok
        );
        let text = unsafe { CStr::from_ptr(json) }.to_str().unwrap();
        let value: serde_json::Value = serde_json::from_str(text).unwrap();
        assert_eq!(value["sequence"], 1);
        assert_eq!(value["weather_type"], "hot_dry");

        assert_eq!(weather_lab_clear_history(lab), WeatherLabErrorCode::Ok);
        assert_eq!(
            unsafe { weather_lab_get_last_result_json(lab, &mut json) },
            WeatherLabErrorCode::NoResult
        );

        unsafe { weather_lab_destroy(lab) };
    }
}
