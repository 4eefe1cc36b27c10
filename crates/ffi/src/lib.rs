//! C API for the weather lab engine
//!
//! Every entry point returns a [`WeatherLabErrorCode`]; on failure the
//! message is available from [`weather_lab_get_last_error`] on the same thread.
//! The generated header lands at `WeatherLabFFI.h` in the workspace root.

mod error;
mod helpers;
mod instance;
mod queries;
mod simulation;

pub use error::{weather_lab_get_last_error, weather_lab_get_last_error_code, WeatherLabErrorCode};
pub use instance::{
    weather_lab_destroy, weather_lab_new, weather_lab_new_with_config, WeatherLabInstance,
};
pub use queries::{
    weather_lab_get_history_len, weather_lab_get_history_series, weather_lab_get_last_result_json,
    weather_lab_get_parameter, WeatherLabSeriesPoint,
};
pub use simulation::{
    weather_lab_apply_preset, weather_lab_clear_history, weather_lab_randomize, weather_lab_run,
    weather_lab_set_parameter, WeatherLabResultSummary, WeatherLabWeatherType,
};
