//! Error types for the weather lab engine
//!
//! The derivation formulas are total over their validated domain, so the only
//! failures are inputs that never should have reached them: out-of-range or
//! non-finite slider values, names that do not resolve to a parameter,
//! a cloud type or a preset, and engine configurations the corrector cannot
//! work with.

use thiserror::Error;

use crate::core_types::ParameterKind;

/// Errors reported by the engine's inbound operations.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LabError {
    /// A value lies outside the physical domain accepted for its parameter
    #[error("{parameter} must be within [{min}, {max}], got {value}")]
    OutOfRange {
        parameter: ParameterKind,
        value: f64,
        min: f64,
        max: f64,
    },

    /// NaN or infinite input
    #[error("{parameter} must be a finite number")]
    NonFinite { parameter: ParameterKind },

    /// The parameter name does not match any known parameter
    #[error("unknown parameter '{0}'")]
    UnknownParameter(String),

    /// No preset is registered under this key
    #[error("unknown scenario preset '{0}'")]
    UnknownPreset(String),

    /// The numeric code does not map to a cloud type
    #[error("unknown cloud type code {0}")]
    UnknownCloudType(f64),

    /// An [`EngineConfig`](crate::EngineConfig) field the engine cannot run with
    #[error("invalid engine configuration: {field} {requirement}, got {value}")]
    InvalidConfig {
        field: &'static str,
        requirement: &'static str,
        value: f64,
    },
}

/// Convenience alias used throughout the crate
pub type LabResult<T> = Result<T, LabError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages_name_the_parameter() {
        let err = LabError::OutOfRange {
            parameter: ParameterKind::Humidity,
            value: 120.0,
            min: 0.0,
            max: 100.0,
        };
        assert_eq!(err.to_string(), "humidity must be within [0, 100], got 120");

        let err = LabError::UnknownPreset("monsoon".to_string());
        assert_eq!(err.to_string(), "unknown scenario preset 'monsoon'");

        let err = LabError::InvalidConfig {
            field: "dew_point_tolerance",
            requirement: "must be at least 1",
            value: 0.5,
        };
        assert_eq!(
            err.to_string(),
            "invalid engine configuration: dew_point_tolerance must be at least 1, got 0.5"
        );
    }
}
