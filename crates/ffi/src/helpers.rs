use std::ffi::{CStr, CString};
use std::os::raw::c_char;

use weather_lab_core::LabEngine;

use crate::error::{
    with_last_error_mut, DefaultWeatherLabError, WeatherLabError, WeatherLabErrorCode,
};
use crate::instance::WeatherLabInstance;

/// Set the thread-local error message and code.
/// Internal helper for FFI functions to record failure details.
/// Accepts any type implementing `WeatherLabError` trait.
pub(crate) fn set_last_error(error: &impl WeatherLabError) {
    with_last_error_mut(|(cstring, code)| {
        *cstring = CString::new(error.msg()).ok();
        *code = error.code();
    });
}

/// Track an error by setting it in thread-local storage and returning its code.
/// More efficient than handling results for immediate errors.
#[inline]
pub(crate) fn track_error(error: &impl WeatherLabError) -> WeatherLabErrorCode {
    set_last_error(error);
    error.code()
}

/// Record the outcome of a fallible call and convert its error into a code.
/// Success clears the thread-local error so a stale message never outlives the call.
pub(crate) fn track_result<T, E: WeatherLabError>(
    result: Result<T, E>,
) -> Result<T, WeatherLabErrorCode> {
    match result {
        Ok(value) => {
            clear_last_error();
            Ok(value)
        }
        Err(error) => Err(track_error(&error)),
    }
}

/// Run an FFI body and collapse its result into an error code.
pub(crate) fn handle_ffi_result_error<E, F>(body: F) -> WeatherLabErrorCode
where
    E: WeatherLabError,
    F: FnOnce() -> Result<(), E>,
{
    match track_result(body()) {
        Ok(()) => WeatherLabErrorCode::Ok,
        Err(code) => code,
    }
}

/// Clear the thread-local error message and code.
/// Internal helper called on successful operations.
pub(crate) fn clear_last_error() {
    with_last_error_mut(|(cstring, code)| {
        *cstring = None;
        *code = WeatherLabErrorCode::Ok;
    });
}

/// Borrow an instance from a raw pointer handed across the FFI boundary.
pub(crate) fn instance_from_ptr<'a>(
    ptr: *const WeatherLabInstance,
) -> Result<&'a WeatherLabInstance, DefaultWeatherLabError> {
    // SAFETY: Callers obtain `ptr` from `weather_lab_new` and keep it alive
    // until `weather_lab_destroy`. Null is rejected before dereferencing.
    unsafe { ptr.as_ref() }.ok_or_else(|| DefaultWeatherLabError::null_pointer("ptr"))
}

/// Borrow a UTF-8 string from a null-terminated C string.
pub(crate) fn str_from_ptr<'a>(
    ptr: *const c_char,
    param_name: &str,
) -> Result<&'a str, DefaultWeatherLabError> {
    if ptr.is_null() {
        return Err(DefaultWeatherLabError::null_pointer(param_name));
    }

    // SAFETY: Non-null was checked above; the caller guarantees a valid
    // null-terminated string that outlives this call.
    unsafe { CStr::from_ptr(ptr) }
        .to_str()
        .map_err(|_| DefaultWeatherLabError::invalid_string(param_name))
}

/// Run `f` with shared access to the engine.
pub(crate) fn with_engine<T>(
    instance: &WeatherLabInstance,
    f: impl FnOnce(&LabEngine) -> T,
) -> Result<T, DefaultWeatherLabError> {
    let engine = instance
        .engine
        .read()
        .map_err(|_| DefaultWeatherLabError::lock_poisoned("engine"))?;
    Ok(f(&engine))
}

/// Run `f` with exclusive access to the engine.
pub(crate) fn with_engine_mut<T>(
    instance: &WeatherLabInstance,
    f: impl FnOnce(&mut LabEngine) -> T,
) -> Result<T, DefaultWeatherLabError> {
    let mut engine = instance
        .engine
        .write()
        .map_err(|_| DefaultWeatherLabError::lock_poisoned("engine"))?;
    Ok(f(&mut engine))
}
