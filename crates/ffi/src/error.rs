use std::cell::RefCell;
use std::ffi::CString;
use std::os::raw::c_char;
use std::ptr;

use weather_lab_core::LabError;

/// Common interface for FFI error types.
///
/// Provides a unified way to hand errors across the FFI boundary: a code the
/// caller switches on and a message for diagnostics.
///
/// # Example
/// ```rust,ignore
/// let err = DefaultWeatherLabError::null_pointer("ptr");
/// assert_eq!(err.code(), WeatherLabErrorCode::NullPointer);
/// assert_eq!(err.msg(), "Parameter 'ptr' cannot be null");
/// ```
pub(crate) trait WeatherLabError {
    /// Returns the error code to be returned across the FFI boundary.
    fn code(&self) -> WeatherLabErrorCode;

    /// Returns the human-readable error message.
    fn msg(&self) -> &str;
}

/// Default implementation of `WeatherLabError` for the FFI error scenarios.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct DefaultWeatherLabError {
    code: WeatherLabErrorCode,
    msg: String,
}

impl DefaultWeatherLabError {
    /// Create error for null pointer passed where non-null required.
    ///
    /// # Arguments
    /// * `param_name` - The name of the parameter that was null (e.g., `"out_instance"`, `"ptr"`)
    pub fn null_pointer(param_name: &str) -> Self {
        Self {
            code: WeatherLabErrorCode::NullPointer,
            msg: format!("Parameter '{param_name}' cannot be null"),
        }
    }

    /// Create error for poisoned lock.
    ///
    /// # Arguments
    /// * `lock_name` - The name of the lock that was poisoned (e.g., `"engine"`)
    pub fn lock_poisoned(lock_name: &str) -> Self {
        Self {
            code: WeatherLabErrorCode::LockPoisoned,
            msg: format!("Lock '{lock_name}' was poisoned by a panic in another thread"),
        }
    }

    /// Create error for a C string that is not valid UTF-8.
    pub fn invalid_string(param_name: &str) -> Self {
        Self {
            code: WeatherLabErrorCode::InvalidString,
            msg: format!("Parameter '{param_name}' is not valid UTF-8"),
        }
    }

    /// Create error for a query that needs at least one run.
    pub fn no_result() -> Self {
        Self {
            code: WeatherLabErrorCode::NoResult,
            msg: "No simulation result available, call weather_lab_run first".to_string(),
        }
    }

    /// Create error for a result that could not be encoded.
    pub fn serialization(message: &str) -> Self {
        Self {
            code: WeatherLabErrorCode::Serialization,
            msg: format!("Failed to encode result: {message}"),
        }
    }
}

impl From<LabError> for DefaultWeatherLabError {
    fn from(error: LabError) -> Self {
        let code = match error {
            LabError::OutOfRange { .. } => WeatherLabErrorCode::OutOfRange,
            LabError::NonFinite { .. } => WeatherLabErrorCode::NonFinite,
            LabError::UnknownParameter(_) => WeatherLabErrorCode::UnknownParameter,
            LabError::UnknownPreset(_) => WeatherLabErrorCode::UnknownPreset,
            LabError::UnknownCloudType(_) => WeatherLabErrorCode::UnknownCloudType,
            LabError::InvalidConfig { .. } => WeatherLabErrorCode::InvalidConfig,
        };
        Self {
            code,
            msg: error.to_string(),
        }
    }
}

impl WeatherLabError for DefaultWeatherLabError {
    fn code(&self) -> WeatherLabErrorCode {
        self.code
    }

    fn msg(&self) -> &str {
        &self.msg
    }
}

/// FFI error codes returned by weather lab functions.
/// Follows standard C convention: 0 = success, non-zero = error.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WeatherLabErrorCode {
    /// Operation completed successfully.
    Ok = 0,

    /// Invalid pointer: null pointer passed where non-null required.
    NullPointer = 1,

    /// Lock poisoned: internal synchronization primitive was poisoned by a panic.
    LockPoisoned = 2,

    /// A C string argument is not valid UTF-8.
    InvalidString = 3,

    /// A parameter value lies outside its physical domain.
    OutOfRange = 4,

    /// A parameter value is NaN or infinite.
    NonFinite = 5,

    /// The parameter name is not recognised.
    UnknownParameter = 6,

    /// No preset is registered under the given key.
    UnknownPreset = 7,

    /// The numeric code does not map to a cloud type.
    UnknownCloudType = 8,

    /// The query needs at least one completed run.
    NoResult = 9,

    /// A result could not be encoded as JSON.
    Serialization = 10,

    /// The engine configuration was rejected (for example a negative station altitude).
    InvalidConfig = 11,
}

thread_local! {
    /// Thread-local storage for the most recent FFI error (C string, error code).
    /// Allows callers to retrieve diagnostic information after a failed call.
    /// The CString is stored to prevent memory leaks when returning raw pointers via FFI.
    static LAST_ERROR: RefCell<(Option<CString>, WeatherLabErrorCode)> = const { RefCell::new((None, WeatherLabErrorCode::Ok)) };
}

/// Internal helper to read `LAST_ERROR` thread-local storage (cstring, code).
pub(crate) fn with_last_error<F, R>(f: F) -> R
where
    F: FnOnce(&(Option<CString>, WeatherLabErrorCode)) -> R,
{
    LAST_ERROR.with_borrow(f)
}

/// Internal helper to mutate `LAST_ERROR` thread-local storage (cstring, code).
pub(crate) fn with_last_error_mut<F, R>(f: F) -> R
where
    F: FnOnce(&mut (Option<CString>, WeatherLabErrorCode)) -> R,
{
    LAST_ERROR.with_borrow_mut(f)
}

/// Retrieve the most recent FFI error message as a null-terminated C string.
///
/// Returns:
/// - A borrowed pointer to the error message if an error occurred.
/// - `null` if the last call on this thread succeeded.
///
/// # Thread Safety
/// Error messages are stored per-thread, so each thread has its own
/// independent error state.
///
/// # Lifetime
/// The returned pointer is valid until the next FFI call on this thread.
///
/// **DO NOT FREE THIS POINTER** - it is managed internally.
///
/// Example:
/// ```cpp
/// WeatherLabErrorCode err = weather_lab_set_parameter(lab, "humidity", 140.0);
/// if (err != WeatherLabErrorCode::Ok) {
///     const char* error = weather_lab_get_last_error();
///     if (error) {
///         printf("Edit rejected: %s\n", error);
///     }
/// }
/// ```
#[no_mangle]
pub extern "C" fn weather_lab_get_last_error() -> *const c_char {
    with_last_error(|(cstring, _code)| cstring.as_ref().map_or(ptr::null(), |cs| cs.as_ptr()))
}

/// Retrieve the most recent FFI error code.
///
/// Returns `WeatherLabErrorCode::Ok` (0) if the last call on this thread
/// succeeded, otherwise the code of the failure.
#[no_mangle]
pub extern "C" fn weather_lab_get_last_error_code() -> WeatherLabErrorCode {
    with_last_error(|(_cstring, code)| *code)
}
