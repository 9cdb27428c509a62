//! Entry points for callers outside the crate (web handlers, CLIs).
//!
//! Each call builds a fresh [`Simulator`] and shares nothing with other
//! calls. The selector is resolved first, so an unknown algorithm is
//! reported before the process list is even parsed.
//!
//! # Example
//!
//! ```
//! use u_procsim::facade;
//!
//! let json = r#"[
//!     {"pid": 1, "arrival_time": 0, "burst_time": 5},
//!     {"pid": 2, "arrival_time": 1, "burst_time": 3}
//! ]"#;
//! let result = facade::simulate_json(json, "rr", Some(2)).unwrap();
//! assert_eq!(result.metrics.makespan, 8);
//! assert_eq!(result.completed.len(), 2);
//! ```

use serde::{Deserialize, Serialize};

use crate::dispatching::Algorithm;
use crate::error::SimulationError;
use crate::models::ProcessDescriptor;
use crate::scheduler::{SimulationConfig, SimulationResult, Simulator};
use crate::validation::parse_descriptors;

/// A complete simulation request, as submitted by a form or API client.
///
/// ```json
/// {"processes": [...], "algorithm": "rr", "quantum": 3, "max_time": 50}
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationRequest {
    /// Raw process entries. Validated individually.
    pub processes: Vec<serde_json::Value>,
    /// `"fcfs"`, `"sjf"` or `"rr"`.
    #[serde(default = "default_selector")]
    pub algorithm: String,
    /// Round Robin quantum. Defaults to 2 when absent or <= 0.
    #[serde(default)]
    pub quantum: Option<i64>,
    #[serde(default)]
    pub max_time: Option<i64>,
    #[serde(default)]
    pub io_enabled: bool,
}

fn default_selector() -> String {
    "fcfs".to_string()
}

impl SimulationRequest {
    /// Creates a request with no processes.
    pub fn new(algorithm: impl Into<String>) -> Self {
        Self {
            processes: Vec::new(),
            algorithm: algorithm.into(),
            quantum: None,
            max_time: None,
            io_enabled: false,
        }
    }

    /// Adds a raw process entry.
    pub fn with_process(mut self, process: serde_json::Value) -> Self {
        self.processes.push(process);
        self
    }

    /// Sets the Round Robin quantum.
    pub fn with_quantum(mut self, quantum: i64) -> Self {
        self.quantum = Some(quantum);
        self
    }

    /// Sets the hard stop tick.
    pub fn with_max_time(mut self, max_time: i64) -> Self {
        self.max_time = Some(max_time);
        self
    }

    /// Sets the I/O flag.
    pub fn with_io_enabled(mut self, io_enabled: bool) -> Self {
        self.io_enabled = io_enabled;
        self
    }

    /// Resolves the selector and options into a run configuration.
    pub fn config(&self) -> Result<SimulationConfig, SimulationError> {
        let algorithm = Algorithm::from_selector(&self.algorithm, self.quantum)?;
        let mut config = SimulationConfig::new(algorithm).with_io_enabled(self.io_enabled);
        config.max_time = self.max_time;
        config.validate()?;
        Ok(config)
    }
}

/// Simulates typed descriptors with the selected algorithm.
pub fn simulate(
    descriptors: &[ProcessDescriptor],
    selector: &str,
    quantum: Option<i64>,
) -> Result<SimulationResult, SimulationError> {
    let algorithm = Algorithm::from_selector(selector, quantum)?;
    Simulator::new(algorithm).run(descriptors)
}

/// Simulates a JSON array of process objects with the selected algorithm.
///
/// # Errors
/// - [`SimulationError::UnknownAlgorithm`] for a bad selector
/// - [`SimulationError::MalformedRequest`] if `processes_json` is not a JSON array
/// - [`SimulationError::Validation`] listing every rejected entry
pub fn simulate_json(
    processes_json: &str,
    selector: &str,
    quantum: Option<i64>,
) -> Result<SimulationResult, SimulationError> {
    let algorithm = Algorithm::from_selector(selector, quantum)?;
    let values: Vec<serde_json::Value> = serde_json::from_str(processes_json)?;
    let descriptors = parse_descriptors(&values)?;
    Simulator::new(algorithm).run(&descriptors)
}

/// Runs a full request.
pub fn run_request(request: &SimulationRequest) -> Result<SimulationResult, SimulationError> {
    let config = request.config()?;
    let descriptors = parse_descriptors(&request.processes)?;
    Simulator::from_config(config)?.run(&descriptors)
}

/// Parses and runs a full JSON request.
pub fn run_request_json(request_json: &str) -> Result<SimulationResult, SimulationError> {
    let request: SimulationRequest = serde_json::from_str(request_json)?;
    run_request(&request)
}
