//! Weather scenario engine
//!
//! [`LabEngine`] owns the current [`ParameterSet`], the preset library and the
//! run history. Every mutation is validated before it is applied and followed
//! by the consistency corrector, so the stored state is always consistent.
//! Results are returned from [`LabEngine::run`] and published to subscribed
//! [`ResultObserver`]s; the engine never calls into a renderer.

use crate::assessment::{evaluate, SimulationResult};
use crate::config::EngineConfig;
use crate::core_types::{ParameterKind, ParameterSet};
use crate::correction::{correct, Correction};
use crate::error::{LabError, LabResult};
use crate::history::RunHistory;
use crate::scenario::ScenarioLibrary;
use rand::Rng;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

/// Receives every result produced by [`LabEngine::run`]
///
/// `Send + Sync` so an engine can sit behind an `RwLock` shared between threads.
pub trait ResultObserver: Send + Sync {
    fn on_result(&mut self, result: &SimulationResult);
}

impl<F> ResultObserver for F
where
    F: FnMut(&SimulationResult) + Send + Sync,
{
    fn on_result(&mut self, result: &SimulationResult) {
        self(result);
    }
}

/// Inbound command, for hosts that queue UI events
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "command", rename_all = "snake_case")]
pub enum LabCommand {
    SetParameter { parameter: ParameterKind, value: f64 },
    ApplyPreset { key: String },
    Run,
    ClearHistory,
}

/// What a [`LabCommand`] produced
#[derive(Debug, Clone, PartialEq)]
pub enum CommandOutcome {
    /// Parameters changed; lists the corrections applied afterwards
    Updated(Vec<Correction>),
    /// A run completed
    Completed(Box<SimulationResult>),
    /// History emptied
    Cleared,
}

/// The weather lab engine
///
/// # Example
/// ```
/// use weather_lab_core::{LabEngine, WeatherType};
///
/// let mut engine = LabEngine::new();
/// engine.apply_preset("sunny").unwrap();
/// let result = engine.run();
/// assert_eq!(result.weather_type, WeatherType::Sunny);
/// assert_eq!(engine.history().len(), 1);
/// ```
pub struct LabEngine {
    config: EngineConfig,
    parameters: ParameterSet,
    library: ScenarioLibrary,
    history: RunHistory,
    observers: Vec<Box<dyn ResultObserver>>,
    runs: u64,
}

impl Default for LabEngine {
    fn default() -> Self {
        LabEngine::new()
    }
}

impl std::fmt::Debug for LabEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LabEngine")
            .field("config", &self.config)
            .field("parameters", &self.parameters)
            .field("history_len", &self.history.len())
            .field("observers", &self.observers.len())
            .field("runs", &self.runs)
            .finish_non_exhaustive()
    }
}

impl LabEngine {
    /// Engine with the default configuration and built-in presets
    pub fn new() -> Self {
        LabEngine::build(EngineConfig::default())
    }

    /// Engine with a custom configuration
    ///
    /// # Errors
    /// [`LabError::InvalidConfig`] when [`EngineConfig::validate`] rejects it.
    pub fn with_config(config: EngineConfig) -> LabResult<Self> {
        if let Err(err) = config.validate() {
            warn!("Rejected engine configuration: {}", err);
            return Err(err);
        }
        Ok(LabEngine::build(config))
    }

    fn build(config: EngineConfig) -> Self {
        let mut parameters = ParameterSet::default();
        correct(&mut parameters, &config);
        LabEngine {
            config,
            parameters,
            library: ScenarioLibrary::default(),
            history: RunHistory::new(config.history_capacity),
            observers: Vec::new(),
            runs: 0,
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Current (corrected) parameters
    pub fn parameters(&self) -> &ParameterSet {
        &self.parameters
    }

    pub fn history(&self) -> &RunHistory {
        &self.history
    }

    pub fn library(&self) -> &ScenarioLibrary {
        &self.library
    }

    /// Number of runs since construction
    pub fn run_count(&self) -> u64 {
        self.runs
    }

    /// Validate and apply one edit, then correct.
    ///
    /// # Errors
    /// Out-of-domain or non-finite values. The state is left untouched.
    pub fn set_parameter(&mut self, kind: ParameterKind, value: f64) -> LabResult<Vec<Correction>> {
        if let Err(err) = self.parameters.set(kind, value) {
            warn!("Rejected edit: {}", err);
            return Err(err);
        }
        debug!("Set {} = {}", kind, value);
        Ok(correct(&mut self.parameters, &self.config))
    }

    /// [`LabEngine::set_parameter`] with a UI parameter name
    ///
    /// # Errors
    /// [`LabError::UnknownParameter`] plus everything `set_parameter` returns.
    pub fn set_parameter_by_name(&mut self, name: &str, value: f64) -> LabResult<Vec<Correction>> {
        let kind = name.parse::<ParameterKind>().inspect_err(|err| {
            warn!("Rejected edit: {}", err);
        })?;
        self.set_parameter(kind, value)
    }

    /// Replace the whole parameter set, then correct.
    ///
    /// # Errors
    /// The first out-of-domain field. The state is left untouched.
    pub fn set_parameters(&mut self, parameters: ParameterSet) -> LabResult<Vec<Correction>> {
        if let Err(err) = parameters.validate() {
            warn!("Rejected parameter set: {}", err);
            return Err(err);
        }
        self.parameters = parameters;
        Ok(correct(&mut self.parameters, &self.config))
    }

    /// Load a preset by key, then correct.
    ///
    /// # Errors
    /// [`LabError::UnknownPreset`]; the state is left untouched.
    pub fn apply_preset(&mut self, key: &str) -> LabResult<Vec<Correction>> {
        let Some(preset) = self.library.get(key) else {
            warn!("Unknown scenario preset '{}', ignoring", key);
            return Err(LabError::UnknownPreset(key.to_string()));
        };
        info!("Loading scenario preset '{}' ({})", preset.key, preset.name);
        self.parameters = preset.parameters;
        Ok(correct(&mut self.parameters, &self.config))
    }

    /// Draw a random plausible state and correct it
    pub fn randomize<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Vec<Correction> {
        self.parameters = ParameterSet::random(rng);
        debug!("Randomized parameters: {:?}", self.parameters);
        correct(&mut self.parameters, &self.config)
    }

    /// Evaluate the current state, record it and notify observers
    pub fn run(&mut self) -> SimulationResult {
        self.runs += 1;
        let result = evaluate(&self.parameters, &self.config, self.runs);
        info!("Run {}", result.summary());

        self.history.push(result.clone());
        for observer in &mut self.observers {
            observer.on_result(&result);
        }
        result
    }

    pub fn clear_history(&mut self) {
        info!("Clearing {} history entries", self.history.len());
        self.history.clear();
    }

    /// Register an observer notified after every run
    pub fn subscribe(&mut self, observer: Box<dyn ResultObserver>) {
        self.observers.push(observer);
    }

    /// Apply one command
    ///
    /// # Errors
    /// Whatever the underlying operation returns.
    pub fn execute(&mut self, command: LabCommand) -> LabResult<CommandOutcome> {
        match command {
            LabCommand::SetParameter { parameter, value } => {
                self.set_parameter(parameter, value).map(CommandOutcome::Updated)
            }
            LabCommand::ApplyPreset { key } => {
                self.apply_preset(&key).map(CommandOutcome::Updated)
            }
            LabCommand::Run => Ok(CommandOutcome::Completed(Box::new(self.run()))),
            LabCommand::ClearHistory => {
                self.clear_history();
                Ok(CommandOutcome::Cleared)
            }
        }
    }

    /// [`sweep`] around the current parameters
    pub fn sweep(&self, kind: ParameterKind, values: &[f64]) -> Vec<LabResult<SimulationResult>> {
        sweep(&self.parameters, &self.config, kind, values)
    }
}

/// Evaluate `base` with `kind` set to each of `values`, in parallel.
///
/// Each variation is validated and corrected on its own; results come back in
/// input order. Sweep results are not runs: they carry sequence 0 and never
/// enter a history.
pub fn sweep(
    base: &ParameterSet,
    config: &EngineConfig,
    kind: ParameterKind,
    values: &[f64],
) -> Vec<LabResult<SimulationResult>> {
    values
        .par_iter()
        .map(|&value| {
            let mut params = *base;
            params.set(kind, value)?;
            correct(&mut params, config);
            Ok(evaluate(&params, config, 0))
        })
        .collect()
}
