//! Error types surfaced to callers.
//!
//! Every failure is a rejected input or configuration; a simulation that
//! starts always completes.

use std::fmt;

use crate::validation::ValidationError;

/// Errors returned by the simulator and the facade.
#[derive(Debug, Clone, PartialEq)]
pub enum SimulationError {
    /// Algorithm selector not recognized.
    UnknownAlgorithm(String),
    /// Configuration value out of range.
    InvalidConfig(String),
    /// Request document could not be parsed.
    MalformedRequest(String),
    /// One or more process descriptors were rejected.
    Validation(Vec<ValidationError>),
}

impl fmt::Display for SimulationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SimulationError::UnknownAlgorithm(selector) => {
                write!(
                    f,
                    "unknown scheduling algorithm '{selector}' (expected fcfs, sjf or rr)"
                )
            }
            SimulationError::InvalidConfig(message) => {
                write!(f, "invalid configuration: {message}")
            }
            SimulationError::MalformedRequest(message) => {
                write!(f, "malformed request: {message}")
            }
            SimulationError::Validation(errors) => {
                write!(f, "{} invalid process descriptor(s)", errors.len())?;
                for e in errors {
                    write!(f, "; {e}")?;
                }
                Ok(())
            }
        }
    }
}

impl std::error::Error for SimulationError {}

impl From<Vec<ValidationError>> for SimulationError {
    fn from(errors: Vec<ValidationError>) -> Self {
        SimulationError::Validation(errors)
    }
}

impl From<serde_json::Error> for SimulationError {
    fn from(err: serde_json::Error) -> Self {
        SimulationError::MalformedRequest(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::ValidationErrorKind;

    #[test]
    fn test_display_messages() {
        let e = SimulationError::UnknownAlgorithm("edf".into());
        assert!(e.to_string().contains("'edf'"));

        let e = SimulationError::InvalidConfig("max_time must be >= 0".into());
        assert_eq!(e.to_string(), "invalid configuration: max_time must be >= 0");
    }

    #[test]
    fn test_validation_display_lists_all() {
        let e: SimulationError = vec![
            ValidationError::new(ValidationErrorKind::DuplicatePid, "Duplicate pid: 1"),
            ValidationError::new(ValidationErrorKind::NonPositiveBurst, "Process 2 has burst 0"),
        ]
        .into();
        let msg = e.to_string();
        assert!(msg.starts_with("2 invalid"));
        assert!(msg.contains("Duplicate pid: 1"));
        assert!(msg.contains("burst 0"));
    }

    #[test]
    fn test_from_json_error() {
        let err = serde_json::from_str::<Vec<i64>>("not json").unwrap_err();
        let e: SimulationError = err.into();
        assert!(matches!(e, SimulationError::MalformedRequest(_)));
    }
}
