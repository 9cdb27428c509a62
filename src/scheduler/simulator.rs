//! Discrete-event CPU scheduling simulator.
//!
//! # Algorithm
//!
//! 1. Build one process record per descriptor and queue them by arrival.
//! 2. Admit every process whose arrival time has passed to the ready queue.
//! 3. If nothing is ready, jump the clock to the next arrival (IDLE event).
//! 4. Otherwise ask the policy for a process and a slice, run it (RUN event).
//! 5. Admit arrivals that happened during the slice, then requeue the
//!    process at the tail if it is unfinished.
//! 6. Repeat until every process has terminated or `max_time` is reached.
//!
//! Step 5's order means a process arriving exactly when a quantum expires
//! is queued ahead of the process being preempted.
//!
//! # Complexity
//! O(e * r) where e = timeline events, r = ready queue length.

use std::collections::VecDeque;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::metrics::{process_timings, ProcessTiming, SimulationMetrics};
use crate::dispatching::{Algorithm, Dispatch, DispatchContext, SchedulingPolicy};
use crate::error::SimulationError;
use crate::models::{Process, ProcessDescriptor, Timeline};
use crate::validation::validate_descriptors;

/// Run configuration. Fixed for the whole run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SimulationConfig {
    /// Scheduling discipline.
    #[serde(default)]
    pub algorithm: Algorithm,
    /// Hard stop tick. `None` = run until every process terminates.
    #[serde(default)]
    pub max_time: Option<i64>,
    /// I/O blocking. Accepted but not simulated.
    #[serde(default)]
    pub io_enabled: bool,
}

impl SimulationConfig {
    /// Creates a configuration for the given algorithm.
    pub fn new(algorithm: Algorithm) -> Self {
        Self {
            algorithm,
            ..Default::default()
        }
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

    /// Checks value ranges.
    pub fn validate(&self) -> Result<(), SimulationError> {
        if let Some(max_time) = self.max_time {
            if max_time < 0 {
                return Err(SimulationError::InvalidConfig(format!(
                    "max_time must be >= 0, got {max_time}"
                )));
            }
        }
        Ok(())
    }
}

/// Output of one simulation run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SimulationResult {
    /// Name of the policy that produced the run (e.g., "RR").
    pub algorithm: String,
    /// Execution timeline.
    pub timeline: Timeline,
    /// Completed processes, in completion order.
    pub completed: Vec<ProcessTiming>,
    /// pids that did not finish before `max_time`, in input order.
    pub unfinished: Vec<i64>,
    /// Whether `max_time` cut the run short.
    pub truncated: bool,
    /// Aggregate statistics over `completed`.
    pub metrics: SimulationMetrics,
}

/// CPU scheduling simulator.
///
/// Holds only configuration; each [`run`](Self::run) builds its own state,
/// so one simulator can serve concurrent runs.
///
/// # Example
///
/// ```
/// use u_procsim::dispatching::Algorithm;
/// use u_procsim::models::ProcessDescriptor;
/// use u_procsim::scheduler::Simulator;
///
/// let processes = vec![
///     ProcessDescriptor::new(1, 0, 5),
///     ProcessDescriptor::new(2, 1, 3),
/// ];
/// let result = Simulator::new(Algorithm::Fcfs).run(&processes).unwrap();
///
/// assert_eq!(result.metrics.makespan, 8);
/// assert!((result.metrics.avg_wait - 2.0).abs() < 1e-10);
/// ```
#[derive(Debug, Clone)]
pub struct Simulator {
    config: SimulationConfig,
    policy: Arc<dyn SchedulingPolicy>,
}

impl Simulator {
    /// Creates a simulator for the given algorithm.
    pub fn new(algorithm: Algorithm) -> Self {
        Self {
            policy: algorithm.policy(),
            config: SimulationConfig::new(algorithm),
        }
    }

    /// Creates a simulator from a configuration.
    pub fn from_config(config: SimulationConfig) -> Result<Self, SimulationError> {
        config.validate()?;
        Ok(Self {
            policy: config.algorithm.policy(),
            config,
        })
    }

    /// Replaces the built-in policy with a custom one.
    pub fn with_policy<P: SchedulingPolicy + 'static>(mut self, policy: P) -> Self {
        self.policy = Arc::new(policy);
        self
    }

    /// Sets the hard stop tick.
    pub fn with_max_time(mut self, max_time: i64) -> Self {
        self.config.max_time = Some(max_time);
        self
    }

    /// Sets the I/O flag.
    pub fn with_io_enabled(mut self, io_enabled: bool) -> Self {
        self.config.io_enabled = io_enabled;
        self
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    pub fn policy(&self) -> &dyn SchedulingPolicy {
        self.policy.as_ref()
    }

    /// Validates the input and runs the simulation.
    ///
    /// # Errors
    /// [`SimulationError::InvalidConfig`] for a negative `max_time`,
    /// [`SimulationError::Validation`] for rejected descriptors. Nothing
    /// is simulated in either case.
    pub fn run(
        &self,
        descriptors: &[ProcessDescriptor],
    ) -> Result<SimulationResult, SimulationError> {
        self.config.validate()?;
        validate_descriptors(descriptors)?;

        if self.config.io_enabled {
            log::warn!("io_enabled is set but I/O blocking is not simulated; ignoring");
        }

        let run = Run::new(self.policy.as_ref(), self.config.max_time, descriptors);
        let outcome = run.execute();
        let result = outcome.into_result(self.policy.name());

        log::info!(
            "{} simulation: {} processes, {} completed, makespan {}, {} context switches",
            self.policy.description(),
            descriptors.len(),
            result.metrics.completed,
            result.metrics.makespan,
            result.metrics.context_switches
        );

        Ok(result)
    }
}

/// Per-call simulation state. Queues hold indices into `processes`.
struct Run<'a> {
    policy: &'a dyn SchedulingPolicy,
    limit: Option<i64>,
    processes: Vec<Process>,
    pending: VecDeque<usize>,
    ready: VecDeque<usize>,
    clock: i64,
    terminated: usize,
    timeline: Timeline,
}

struct RunOutcome {
    processes: Vec<Process>,
    timeline: Timeline,
    truncated: bool,
}

impl<'a> Run<'a> {
    fn new(
        policy: &'a dyn SchedulingPolicy,
        limit: Option<i64>,
        descriptors: &[ProcessDescriptor],
    ) -> Self {
        let processes: Vec<Process> = descriptors.iter().map(Process::from_descriptor).collect();

        // Stable: equal arrivals keep input order
        let mut order: Vec<usize> = (0..processes.len()).collect();
        order.sort_by_key(|&i| processes[i].arrival_time);

        Self {
            policy,
            limit,
            processes,
            pending: order.into(),
            ready: VecDeque::new(),
            clock: 0,
            terminated: 0,
            timeline: Timeline::new(),
        }
    }

    fn execute(mut self) -> RunOutcome {
        let mut truncated = false;

        while self.terminated < self.processes.len() {
            if self.limit.is_some_and(|limit| self.clock >= limit) {
                truncated = true;
                break;
            }

            self.admit_arrivals();

            let context = DispatchContext::at_time(self.clock);
            let decision =
                self.policy
                    .select(self.ready.make_contiguous(), &self.processes, &context);

            let progressed = match decision {
                Some(dispatch) => self.dispatch(dispatch),
                None => self.idle(),
            };
            if !progressed {
                break;
            }
        }

        RunOutcome {
            processes: self.processes,
            timeline: self.timeline,
            truncated,
        }
    }

    /// Moves every arrived process from `pending` to the tail of `ready`.
    fn admit_arrivals(&mut self) {
        while let Some(&idx) = self.pending.front() {
            if self.processes[idx].arrival_time > self.clock {
                break;
            }
            self.pending.pop_front();
            self.processes[idx].admit();
            self.ready.push_back(idx);
        }
    }

    /// Ticks left before `max_time`, capped at `ticks`.
    fn bounded(&self, ticks: i64) -> i64 {
        match self.limit {
            Some(limit) => ticks.min(limit - self.clock),
            None => ticks,
        }
    }

    fn idle(&mut self) -> bool {
        let Some(&next) = self.pending.front() else {
            return false;
        };
        let gap = self.bounded(self.processes[next].arrival_time - self.clock);
        if gap <= 0 {
            return false;
        }

        log::debug!("t={}: cpu idle for {} ticks", self.clock, gap);
        self.timeline.push_idle(self.clock, gap);
        self.clock += gap;
        true
    }

    fn dispatch(&mut self, dispatch: Dispatch) -> bool {
        let Some(idx) = self.ready.remove(dispatch.slot) else {
            return false;
        };

        // Non-preemptive policies always run the process to completion
        let remaining = self.processes[idx].remaining_time;
        let requested = if self.policy.is_preemptive() {
            dispatch.run_for.clamp(1, remaining)
        } else {
            remaining
        };
        let slice = self.bounded(requested);
        let start = self.clock;

        let process = &mut self.processes[idx];
        process.dispatch(start);
        self.timeline.push_run(start, process.pid, slice);
        self.clock += slice;
        process.execute(slice, self.clock);

        log::debug!(
            "t={}: {} ran pid {} for {} ticks ({} left)",
            start,
            self.policy.name(),
            process.pid,
            slice,
            process.remaining_time
        );

        // Arrivals during the slice go ahead of the preempted process
        self.admit_arrivals();

        let process = &mut self.processes[idx];
        if process.is_terminated() {
            self.terminated += 1;
        } else {
            process.preempt();
            self.ready.push_back(idx);
        }
        true
    }
}

impl RunOutcome {
    fn into_result(self, algorithm: &str) -> SimulationResult {
        let metrics = SimulationMetrics::calculate(&self.processes, &self.timeline);

        let mut completed = process_timings(&self.processes);
        completed.sort_by_key(|row| row.finish_time);

        let unfinished: Vec<i64> = self
            .processes
            .iter()
            .filter(|p| !p.is_terminated())
            .map(|p| p.pid)
            .collect();

        SimulationResult {
            algorithm: algorithm.to_string(),
            timeline: self.timeline,
            completed,
            truncated: self.truncated && !unfinished.is_empty(),
            unfinished,
            metrics,
        }
    }
}
