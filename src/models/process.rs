//! Process descriptor (input) and process control block (runtime record).
//!
//! A [`ProcessDescriptor`] is what the caller supplies; a [`Process`] is the
//! mutable record the simulator builds from it for a single run.
//!
//! # Lifecycle
//!
//! ```text
//! New ──admit──▶ Ready ──dispatch──▶ Running ──(remaining == 0)──▶ Terminated
//!                  ▲                    │
//!                  └──────preempt───────┘
//! ```
//!
//! `Blocked` is reserved for I/O simulation; no policy drives a process into it.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Lifecycle state of a process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProcessState {
    /// Created, not yet arrived.
    New,
    /// Arrived and waiting in the ready queue.
    Ready,
    /// Currently holding the CPU.
    Running,
    /// Waiting on I/O. Reserved.
    Blocked,
    /// Finished. No further mutation.
    Terminated,
}

/// A caller-supplied process description.
///
/// Accepts the short Spanish keys of the legacy web form (`llegada`,
/// `rafaga`, `prioridad`) as aliases. Any other key is kept in `metadata`.
///
/// # Example
/// ```
/// use u_procsim::models::ProcessDescriptor;
///
/// let p: ProcessDescriptor =
///     serde_json::from_str(r#"{"pid": 1, "llegada": 0, "rafaga": 5, "usuario": "ana"}"#).unwrap();
/// assert_eq!(p.burst_time, 5);
/// assert_eq!(p.metadata["usuario"], "ana");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcessDescriptor {
    /// Process identifier (positive, unique within a run).
    pub pid: i64,
    /// Tick at which the process becomes eligible to run.
    #[serde(alias = "llegada", alias = "arrival")]
    pub arrival_time: i64,
    /// Total CPU ticks required.
    #[serde(alias = "rafaga", alias = "burst")]
    pub burst_time: i64,
    /// Optional priority. Carried through, unused by the built-in policies.
    #[serde(default, alias = "prioridad", skip_serializing_if = "Option::is_none")]
    pub priority: Option<i32>,
    /// Opaque caller data.
    #[serde(flatten)]
    pub metadata: BTreeMap<String, serde_json::Value>,
}

impl ProcessDescriptor {
    /// Creates a descriptor.
    pub fn new(pid: i64, arrival_time: i64, burst_time: i64) -> Self {
        Self {
            pid,
            arrival_time,
            burst_time,
            priority: None,
            metadata: BTreeMap::new(),
        }
    }

    /// Sets the priority.
    pub fn with_priority(mut self, priority: i32) -> Self {
        self.priority = Some(priority);
        self
    }

    /// Adds a metadata entry.
    pub fn with_metadata(
        mut self,
        key: impl Into<String>,
        value: impl Into<serde_json::Value>,
    ) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }
}

/// Process control block: the per-run mutable record of one process.
///
/// Only the simulator mutates it. Once `Terminated` it is frozen.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Process {
    pub pid: i64,
    pub state: ProcessState,
    pub arrival_time: i64,
    pub burst_time: i64,
    pub remaining_time: i64,
    pub priority: Option<i32>,
    /// Tick of first dispatch.
    pub start_time: Option<i64>,
    /// Tick at which `remaining_time` reached 0.
    pub finish_time: Option<i64>,
    pub metadata: BTreeMap<String, serde_json::Value>,
}

impl Process {
    /// Builds a fresh record in state `New`.
    pub fn from_descriptor(descriptor: &ProcessDescriptor) -> Self {
        Self {
            pid: descriptor.pid,
            state: ProcessState::New,
            arrival_time: descriptor.arrival_time,
            burst_time: descriptor.burst_time,
            remaining_time: descriptor.burst_time,
            priority: descriptor.priority,
            start_time: None,
            finish_time: None,
            metadata: descriptor.metadata.clone(),
        }
    }

    /// `New → Ready`.
    pub(crate) fn admit(&mut self) {
        debug_assert_eq!(self.state, ProcessState::New);
        self.state = ProcessState::Ready;
    }

    /// `Ready → Running`. Stamps `start_time` on the first dispatch.
    pub(crate) fn dispatch(&mut self, clock: i64) {
        debug_assert_eq!(self.state, ProcessState::Ready);
        self.state = ProcessState::Running;
        if self.start_time.is_none() {
            self.start_time = Some(clock);
        }
    }

    /// Consumes `ticks` of CPU, ending at `clock`. Terminates on zero remaining.
    pub(crate) fn execute(&mut self, ticks: i64, clock: i64) {
        debug_assert_eq!(self.state, ProcessState::Running);
        debug_assert!(ticks > 0 && ticks <= self.remaining_time);
        self.remaining_time -= ticks;
        if self.remaining_time == 0 {
            self.finish_time = Some(clock);
            self.state = ProcessState::Terminated;
        }
    }

    /// `Running → Ready`.
    pub(crate) fn preempt(&mut self) {
        debug_assert_eq!(self.state, ProcessState::Running);
        self.state = ProcessState::Ready;
    }

    /// Whether the process has terminated.
    #[inline]
    pub fn is_terminated(&self) -> bool {
        self.state == ProcessState::Terminated
    }

    /// CPU ticks consumed so far.
    #[inline]
    pub fn executed_time(&self) -> i64 {
        self.burst_time - self.remaining_time
    }

    /// `finish_time - arrival_time`.
    pub fn turnaround_time(&self) -> Option<i64> {
        self.finish_time.map(|f| f - self.arrival_time)
    }

    /// Time spent ready but not running: `turnaround_time - burst_time`.
    ///
    /// Counts every requeue after a Round Robin preemption, not just the
    /// wait before the first dispatch.
    pub fn waiting_time(&self) -> Option<i64> {
        self.turnaround_time().map(|t| t - self.burst_time)
    }

    /// `start_time - arrival_time`.
    pub fn response_time(&self) -> Option<i64> {
        self.start_time.map(|s| s - self.arrival_time)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_descriptor_builder() {
        let d = ProcessDescriptor::new(7, 3, 10)
            .with_priority(2)
            .with_metadata("user", "root");
        assert_eq!(d.pid, 7);
        assert_eq!(d.arrival_time, 3);
        assert_eq!(d.burst_time, 10);
        assert_eq!(d.priority, Some(2));
        assert_eq!(d.metadata["user"], "root");
    }

    #[test]
    fn test_descriptor_aliases() {
        let d: ProcessDescriptor =
            serde_json::from_str(r#"{"pid": 2, "llegada": 1, "rafaga": 3, "prioridad": 4}"#)
                .unwrap();
        assert_eq!(d.arrival_time, 1);
        assert_eq!(d.burst_time, 3);
        assert_eq!(d.priority, Some(4));
        assert!(d.metadata.is_empty());
    }

    #[test]
    fn test_descriptor_missing_field() {
        let err = serde_json::from_str::<ProcessDescriptor>(r#"{"pid": 1, "arrival_time": 0}"#)
            .unwrap_err();
        assert!(err.to_string().contains("burst_time"));
    }

    #[test]
    fn test_lifecycle_to_termination() {
        let mut p = Process::from_descriptor(&ProcessDescriptor::new(1, 2, 4));
        assert_eq!(p.state, ProcessState::New);
        assert_eq!(p.remaining_time, 4);

        p.admit();
        assert_eq!(p.state, ProcessState::Ready);

        p.dispatch(5);
        assert_eq!(p.start_time, Some(5));
        p.execute(2, 7);
        assert_eq!(p.executed_time(), 2);
        assert!(!p.is_terminated());

        p.preempt();
        p.dispatch(9);
        assert_eq!(p.start_time, Some(5)); // first dispatch only
        p.execute(2, 11);

        assert!(p.is_terminated());
        assert_eq!(p.finish_time, Some(11));
        assert_eq!(p.turnaround_time(), Some(9));
        assert_eq!(p.waiting_time(), Some(5));
        assert_eq!(p.response_time(), Some(3));
    }

    #[test]
    fn test_unfinished_has_no_timings() {
        let p = Process::from_descriptor(&ProcessDescriptor::new(1, 0, 3));
        assert_eq!(p.turnaround_time(), None);
        assert_eq!(p.waiting_time(), None);
        assert_eq!(p.response_time(), None);
    }
}
