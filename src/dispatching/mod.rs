//! Scheduling policies and algorithm selection.
//!
//! A [`SchedulingPolicy`] looks at the ready queue and decides which process
//! gets the CPU next and for how long. The simulator owns the queue and the
//! process records; policies only read them.
//!
//! # Usage
//!
//! ```
//! use u_procsim::dispatching::Algorithm;
//!
//! let algorithm = Algorithm::from_selector("rr", Some(4)).unwrap();
//! assert_eq!(algorithm, Algorithm::RoundRobin { quantum: 4 });
//!
//! let policy = algorithm.policy();
//! assert_eq!(policy.name(), "RR");
//! ```
//!
//! # References
//!
//! - Silberschatz, Galvin & Gagne (2018), "Operating System Concepts", Ch. 5
//! - Tanenbaum & Bos (2014), "Modern Operating Systems", Ch. 2.4

mod algorithm;
mod context;
pub mod policies;

pub use algorithm::{Algorithm, DEFAULT_QUANTUM};
pub use context::DispatchContext;

use crate::models::Process;
use std::fmt::Debug;

/// A dispatch decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dispatch {
    /// Position in the ready queue of the process to run.
    pub slot: usize,
    /// Ticks to run it for, clamped to `1..=remaining_time`. Ignored by the
    /// simulator for non-preemptive policies, which always run to completion.
    pub run_for: i64,
}

/// A CPU scheduling discipline.
///
/// `ready` holds arena indices in admission order (arrival order, ties by
/// input order). Implementations must break ties by that order so results
/// stay deterministic.
pub trait SchedulingPolicy: Send + Sync + Debug {
    /// Short name (e.g., "FCFS").
    fn name(&self) -> &'static str;

    /// Picks the next process to run. `None` only when `ready` is empty.
    fn select(
        &self,
        ready: &[usize],
        processes: &[Process],
        context: &DispatchContext,
    ) -> Option<Dispatch>;

    /// Whether a running process can be sent back to the ready queue.
    /// When `false`, every dispatch runs the process to completion.
    fn is_preemptive(&self) -> bool {
        false
    }

    /// Policy description, used in run summaries.
    fn description(&self) -> &'static str {
        self.name()
    }
}
