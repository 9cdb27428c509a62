//! Input validation for simulation runs.
//!
//! Checks process descriptors before any simulation state is built.
//! Detects:
//! - Malformed descriptors (missing or non-numeric fields)
//! - Non-positive pids
//! - Negative arrival times
//! - Non-positive burst times
//! - Duplicate pids
//! - Process sets whose worst-case end tick does not fit in an `i64`
//!
//! All problems are collected and reported together.

use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::models::ProcessDescriptor;

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ValidationErrorKind {
    /// A descriptor is missing a field or has a field of the wrong type.
    MalformedDescriptor,
    /// pid is zero or negative.
    InvalidPid,
    /// arrival_time is negative.
    NegativeArrival,
    /// burst_time is zero or negative.
    NonPositiveBurst,
    /// Two descriptors share the same pid.
    DuplicatePid,
    /// Latest arrival plus total burst time overflows the tick counter.
    TickOverflow,
}

impl ValidationError {
    pub fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

/// Validates process descriptors.
///
/// Checks:
/// 1. pid > 0
/// 2. arrival_time >= 0
/// 3. burst_time > 0
/// 4. No duplicate pids
/// 5. Latest arrival + sum of bursts fits in an `i64`, so the simulation
///    clock cannot overflow
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_descriptors(descriptors: &[ProcessDescriptor]) -> ValidationResult {
    let mut errors = Vec::new();
    let mut pids = HashSet::new();

    for d in descriptors {
        if d.pid <= 0 {
            errors.push(ValidationError::new(
                ValidationErrorKind::InvalidPid,
                format!("Process pid must be positive, got {}", d.pid),
            ));
        }

        if d.arrival_time < 0 {
            errors.push(ValidationError::new(
                ValidationErrorKind::NegativeArrival,
                format!(
                    "Process {} has negative arrival_time {}",
                    d.pid, d.arrival_time
                ),
            ));
        }

        if d.burst_time <= 0 {
            errors.push(ValidationError::new(
                ValidationErrorKind::NonPositiveBurst,
                format!(
                    "Process {} has non-positive burst_time {}",
                    d.pid, d.burst_time
                ),
            ));
        }

        if !pids.insert(d.pid) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicatePid,
                format!("Duplicate pid: {}", d.pid),
            ));
        }
    }

    if horizon(descriptors).is_none() {
        errors.push(ValidationError::new(
            ValidationErrorKind::TickOverflow,
            format!(
                "Latest arrival plus total burst time exceeds the tick range ({})",
                i64::MAX
            ),
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Upper bound on the final clock value. `None` on overflow.
///
/// The clock only idles up to the next arrival and only runs while work is
/// left, so it never passes the latest arrival plus the total burst time.
/// Out-of-range fields are skipped; they are reported separately.
fn horizon(descriptors: &[ProcessDescriptor]) -> Option<i64> {
    let latest_arrival = descriptors
        .iter()
        .map(|d| d.arrival_time)
        .filter(|&a| a >= 0)
        .max()
        .unwrap_or(0);
    descriptors
        .iter()
        .map(|d| d.burst_time)
        .filter(|&b| b > 0)
        .try_fold(latest_arrival, |acc, b| acc.checked_add(b))
}

/// Converts raw JSON entries into descriptors, then validates them.
///
/// Entries that fail to deserialize are reported as
/// [`ValidationErrorKind::MalformedDescriptor`] with their position; the
/// remaining entries are still checked so the caller sees every problem.
pub fn parse_descriptors(
    values: &[serde_json::Value],
) -> Result<Vec<ProcessDescriptor>, Vec<ValidationError>> {
    let mut errors = Vec::new();
    let mut descriptors = Vec::with_capacity(values.len());

    for (i, value) in values.iter().enumerate() {
        match ProcessDescriptor::deserialize(value) {
            Ok(d) => descriptors.push(d),
            Err(e) => errors.push(ValidationError::new(
                ValidationErrorKind::MalformedDescriptor,
                format!("Process #{i}: {e}"),
            )),
        }
    }

    if let Err(mut more) = validate_descriptors(&descriptors) {
        errors.append(&mut more);
    }

    if errors.is_empty() {
        Ok(descriptors)
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample_descriptors() -> Vec<ProcessDescriptor> {
        vec![
            ProcessDescriptor::new(1, 0, 5),
            ProcessDescriptor::new(2, 1, 3),
            ProcessDescriptor::new(3, 4, 1),
        ]
    }

    #[test]
    fn test_valid_input() {
        assert!(validate_descriptors(&sample_descriptors()).is_ok());
        assert!(validate_descriptors(&[]).is_ok());
    }

    #[test]
    fn test_duplicate_pid() {
        let descriptors = vec![ProcessDescriptor::new(1, 0, 5), ProcessDescriptor::new(1, 2, 3)];
        let errors = validate_descriptors(&descriptors).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].kind, ValidationErrorKind::DuplicatePid);
    }

    #[test]
    fn test_invalid_pid() {
        let errors = validate_descriptors(&[ProcessDescriptor::new(0, 0, 5)]).unwrap_err();
        assert!(errors.iter().any(|e| e.kind == ValidationErrorKind::InvalidPid));
    }

    #[test]
    fn test_negative_arrival() {
        let errors = validate_descriptors(&[ProcessDescriptor::new(1, -1, 5)]).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| e.kind == ValidationErrorKind::NegativeArrival));
    }

    #[test]
    fn test_non_positive_burst() {
        let descriptors = vec![ProcessDescriptor::new(1, 0, 0), ProcessDescriptor::new(2, 0, -4)];
        let errors = validate_descriptors(&descriptors).unwrap_err();
        assert_eq!(
            errors
                .iter()
                .filter(|e| e.kind == ValidationErrorKind::NonPositiveBurst)
                .count(),
            2
        );
    }

    #[test]
    fn test_multiple_errors() {
        let descriptors = vec![
            ProcessDescriptor::new(-1, -1, 0),
            ProcessDescriptor::new(-1, 0, 1),
        ];
        let errors = validate_descriptors(&descriptors).unwrap_err();
        // pid×2, arrival, burst, duplicate
        assert_eq!(errors.len(), 5);
    }

    #[test]
    fn test_tick_overflow() {
        let descriptors = vec![ProcessDescriptor::new(1, i64::MAX - 1, 5)];
        let errors = validate_descriptors(&descriptors).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].kind, ValidationErrorKind::TickOverflow);

        // Each burst fits on its own; the sum does not
        let half = i64::MAX / 2 + 1;
        let descriptors = vec![
            ProcessDescriptor::new(1, 0, half),
            ProcessDescriptor::new(2, 0, half),
        ];
        let errors = validate_descriptors(&descriptors).unwrap_err();
        assert_eq!(errors[0].kind, ValidationErrorKind::TickOverflow);
    }

    #[test]
    fn test_tick_range_edge_accepted() {
        let descriptors = vec![
            ProcessDescriptor::new(1, 0, 5),
            ProcessDescriptor::new(2, i64::MAX - 10, 5),
        ];
        assert!(validate_descriptors(&descriptors).is_ok());
    }

    #[test]
    fn test_parse_valid() {
        let values = vec![
            json!({"pid": 1, "arrival_time": 0, "burst_time": 5}),
            json!({"pid": 2, "llegada": 1, "rafaga": 3, "usuario": "usuario2"}),
        ];
        let descriptors = parse_descriptors(&values).unwrap();
        assert_eq!(descriptors.len(), 2);
        assert_eq!(descriptors[1].arrival_time, 1);
        assert_eq!(descriptors[1].metadata["usuario"], "usuario2");
    }

    #[test]
    fn test_parse_missing_field() {
        let values = vec![json!({"pid": 1, "arrival_time": 0})];
        let errors = parse_descriptors(&values).unwrap_err();
        assert_eq!(errors[0].kind, ValidationErrorKind::MalformedDescriptor);
        assert!(errors[0].message.starts_with("Process #0"));
    }

    #[test]
    fn test_parse_non_numeric_field() {
        let values = vec![
            json!({"pid": 1, "arrival_time": "soon", "burst_time": 5}),
            json!({"pid": 2, "arrival_time": 0, "burst_time": 2.5}),
        ];
        let errors = parse_descriptors(&values).unwrap_err();
        assert_eq!(errors.len(), 2);
        assert!(errors
            .iter()
            .all(|e| e.kind == ValidationErrorKind::MalformedDescriptor));
    }

    #[test]
    fn test_parse_collects_both_stages() {
        let values = vec![
            json!({"pid": 1}),
            json!({"pid": 2, "arrival_time": 0, "burst_time": 0}),
        ];
        let errors = parse_descriptors(&values).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| e.kind == ValidationErrorKind::MalformedDescriptor));
        assert!(errors
            .iter()
            .any(|e| e.kind == ValidationErrorKind::NonPositiveBurst));
    }
}
