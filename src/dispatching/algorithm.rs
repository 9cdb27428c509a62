//! Algorithm selection.
//!
//! Maps the selector strings used by callers (`"fcfs"`, `"sjf"`, `"rr"`)
//! onto policy instances. Unknown selectors are rejected here, before any
//! simulation state is built.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::policies::{Fcfs, RoundRobin, Sjf};
use super::SchedulingPolicy;
use crate::error::SimulationError;

/// Round Robin quantum used when none (or a non-positive one) is given.
pub const DEFAULT_QUANTUM: i64 = 2;

/// The built-in scheduling disciplines.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "name", rename_all = "lowercase")]
pub enum Algorithm {
    /// First Come First Served.
    #[default]
    Fcfs,
    /// Shortest Job First, non-preemptive.
    Sjf,
    /// Round Robin with a fixed quantum.
    #[serde(rename = "rr")]
    RoundRobin {
        #[serde(default = "default_quantum")]
        quantum: i64,
    },
}

fn default_quantum() -> i64 {
    DEFAULT_QUANTUM
}

impl Algorithm {
    /// Round Robin, falling back to [`DEFAULT_QUANTUM`] when `quantum <= 0`.
    pub fn round_robin(quantum: i64) -> Self {
        Algorithm::RoundRobin {
            quantum: normalize_quantum(Some(quantum)),
        }
    }

    /// Parses a selector string. `quantum` is only read for `"rr"`.
    ///
    /// Matching ignores case and surrounding whitespace.
    pub fn from_selector(selector: &str, quantum: Option<i64>) -> Result<Self, SimulationError> {
        match selector.trim().to_ascii_lowercase().as_str() {
            "fcfs" => Ok(Algorithm::Fcfs),
            "sjf" => Ok(Algorithm::Sjf),
            "rr" => Ok(Algorithm::RoundRobin {
                quantum: normalize_quantum(quantum),
            }),
            _ => Err(SimulationError::UnknownAlgorithm(selector.to_string())),
        }
    }

    /// Selector string for this algorithm.
    pub fn selector(&self) -> &'static str {
        match self {
            Algorithm::Fcfs => "fcfs",
            Algorithm::Sjf => "sjf",
            Algorithm::RoundRobin { .. } => "rr",
        }
    }

    /// Quantum, for Round Robin.
    pub fn quantum(&self) -> Option<i64> {
        match self {
            Algorithm::RoundRobin { quantum } => Some(*quantum),
            _ => None,
        }
    }

    /// Builds the policy implementing this algorithm.
    pub fn policy(&self) -> Arc<dyn SchedulingPolicy> {
        match *self {
            Algorithm::Fcfs => Arc::new(Fcfs),
            Algorithm::Sjf => Arc::new(Sjf),
            Algorithm::RoundRobin { quantum } => {
                Arc::new(RoundRobin::new(normalize_quantum(Some(quantum))))
            }
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Algorithm::RoundRobin { quantum } => write!(f, "rr(q={quantum})"),
            other => f.write_str(other.selector()),
        }
    }
}

fn normalize_quantum(quantum: Option<i64>) -> i64 {
    match quantum {
        Some(q) if q > 0 => q,
        _ => DEFAULT_QUANTUM,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_selector() {
        assert_eq!(Algorithm::from_selector("fcfs", None).unwrap(), Algorithm::Fcfs);
        assert_eq!(Algorithm::from_selector(" SJF ", None).unwrap(), Algorithm::Sjf);
        assert_eq!(
            Algorithm::from_selector("rr", Some(5)).unwrap(),
            Algorithm::RoundRobin { quantum: 5 }
        );
    }

    #[test]
    fn test_quantum_defaults() {
        assert_eq!(Algorithm::from_selector("rr", None).unwrap().quantum(), Some(2));
        assert_eq!(Algorithm::from_selector("rr", Some(0)).unwrap().quantum(), Some(2));
        assert_eq!(Algorithm::from_selector("rr", Some(-3)).unwrap().quantum(), Some(2));
        assert_eq!(Algorithm::round_robin(-1), Algorithm::RoundRobin { quantum: 2 });
        assert_eq!(Algorithm::from_selector("fcfs", Some(5)).unwrap().quantum(), None);
    }

    #[test]
    fn test_unknown_selector() {
        let err = Algorithm::from_selector("lottery", None).unwrap_err();
        assert!(matches!(err, SimulationError::UnknownAlgorithm(ref s) if s == "lottery"));
    }

    #[test]
    fn test_policy_names() {
        assert_eq!(Algorithm::Fcfs.policy().name(), "FCFS");
        assert_eq!(Algorithm::Sjf.policy().name(), "SJF");
        let rr = Algorithm::round_robin(3).policy();
        assert_eq!(rr.name(), "RR");
        assert!(rr.is_preemptive());
    }

    #[test]
    fn test_serde_representation() {
        let json = serde_json::to_value(Algorithm::round_robin(3)).unwrap();
        assert_eq!(json["name"], "rr");
        assert_eq!(json["quantum"], 3);

        let a: Algorithm = serde_json::from_str(r#"{"name": "rr"}"#).unwrap();
        assert_eq!(a, Algorithm::RoundRobin { quantum: 2 });
        let a: Algorithm = serde_json::from_str(r#"{"name": "sjf"}"#).unwrap();
        assert_eq!(a, Algorithm::Sjf);
    }

    #[test]
    fn test_display() {
        assert_eq!(Algorithm::Fcfs.to_string(), "fcfs");
        assert_eq!(Algorithm::round_robin(4).to_string(), "rr(q=4)");
    }
}
