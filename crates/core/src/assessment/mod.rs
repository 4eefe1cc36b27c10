//! Assessment layer
//!
//! Turns a corrected [`ParameterSet`] into a [`SimulationResult`]: derived
//! quantities, classification, comfort score, risks, advisories and trends.
//! Everything here is pure apart from the timestamp.

pub mod comfort;
pub mod evolution;
pub mod recommendations;
pub mod risk;

pub use comfort::{comfort_index, ComfortIndex, ComfortLevel};
pub use evolution::evolution;
pub use recommendations::recommendations;
pub use risk::{assess_risks, Risk, RiskCategory, RiskLevel};

use crate::classification::{classify, WeatherType};
use crate::config::EngineConfig;
use crate::core_types::ParameterSet;
use crate::derivation::{derive, DerivedQuantities};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Outcome of one evaluation, immutable once created
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationResult {
    /// Run number, starting at 1 for each engine
    pub sequence: u64,
    pub timestamp: DateTime<Utc>,
    /// Snapshot of the evaluated parameters
    pub parameters: ParameterSet,
    #[serde(flatten)]
    pub derived: DerivedQuantities,
    pub weather_type: WeatherType,
    pub comfort: ComfortIndex,
    pub risks: Vec<Risk>,
    pub recommendations: Vec<String>,
    pub evolution: Vec<String>,
}

impl SimulationResult {
    /// Most severe risk level present, if any
    #[must_use]
    pub fn max_risk_level(&self) -> Option<RiskLevel> {
        self.risks.iter().map(|r| r.level).max()
    }

    /// One-line summary for logs and the headless demo
    #[must_use]
    pub fn summary(&self) -> String {
        format!(
            "#{} {} | {} (ressenti {}) | confort {} ({}) | {} risque(s)",
            self.sequence,
            self.weather_type,
            self.parameters.temperature,
            self.derived.feels_like.round_tenth(),
            self.comfort.score,
            self.comfort.level,
            self.risks.len()
        )
    }
}

/// Evaluate `params` without touching any engine state.
///
/// `params` is expected to be corrected already; the engine guarantees that.
#[must_use]
pub fn evaluate(params: &ParameterSet, config: &EngineConfig, sequence: u64) -> SimulationResult {
    let derived = derive(params, config);
    let weather_type = classify(params);
    let comfort = comfort_index(
        params.temperature,
        params.humidity,
        params.wind_speed,
        derived.feels_like,
        derived.uv_index,
    );
    let risks = assess_risks(params, &derived);
    let recommendations = recommendations(weather_type, &derived, &comfort, &risks);
    let evolution = evolution(params, weather_type);

    debug!(
        sequence,
        weather = weather_type.key(),
        comfort = comfort.score,
        risks = risks.len(),
        "Evaluated parameter set"
    );

    SimulationResult {
        sequence,
        timestamp: Utc::now(),
        parameters: *params,
        derived,
        weather_type,
        comfort,
        risks,
        recommendations,
        evolution,
    }
}
