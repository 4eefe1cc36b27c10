//! Weather Lab Core Library
//!
//! Meteorological scenario engine for an educational weather lab. Derives
//! physical indices (dew point, heat index, wind chill, UV index, visibility,
//! comfort score) from adjustable parameters, classifies the resulting state
//! and produces risks, recommendations and trend statements.
//!
//! ## Pipeline
//!
//! ```text
//! command → ParameterSet edit → consistency corrector
//!         → (run) derivation → classification → assessment
//!         → SimulationResult → run history + observers
//! ```
//!
//! ## Usage
//!
//! ```
//! use weather_lab_core::{LabEngine, ParameterKind, WeatherType};
//!
//! let mut engine = LabEngine::new();
//! engine.apply_preset("winter").unwrap();
//! engine.set_parameter(ParameterKind::WindSpeed, 30.0).unwrap();
//!
//! let result = engine.run();
//! assert_eq!(result.weather_type, WeatherType::Snow);
//! assert!(result.risks.iter().any(|r| r.category.label() == "Froid"));
//! ```

// Core types and utilities
pub mod config;
pub mod core_types;
pub mod error;

// Formulas and rules
pub mod assessment;
pub mod classification;
pub mod correction;
pub mod derivation;

// Engine and its state
pub mod engine;
pub mod history;
pub mod scenario;

// Re-export core types
pub use config::EngineConfig;
pub use core_types::{CloudType, ParameterKind, ParameterSet};
pub use error::{LabError, LabResult};

// Re-export the pipeline
pub use assessment::{
    evaluate, ComfortIndex, ComfortLevel, Risk, RiskCategory, RiskLevel, SimulationResult,
};
pub use classification::{classify, WeatherType};
pub use correction::{correct, Correction};
pub use derivation::{derive, DerivedQuantities};

// Re-export the engine
pub use engine::{sweep, CommandOutcome, LabCommand, LabEngine, ResultObserver};
pub use history::{RunHistory, SeriesPoint};
pub use scenario::{ScenarioLibrary, ScenarioPreset};
