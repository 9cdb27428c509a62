//! Simulation performance metrics.
//!
//! Computed once, after the run, from the completed process records and the
//! execution timeline.
//!
//! # Metrics
//!
//! | Metric | Definition |
//! |--------|-----------|
//! | Waiting time | turnaround - burst |
//! | Turnaround time | finish - arrival |
//! | Response time | first dispatch - arrival |
//! | Makespan | Latest finish time |
//! | Throughput | completed / makespan |
//! | CPU Utilization | busy time of completed processes / makespan |
//! | Context Switches | Dispatches after the first (run events - 1) |
//!
//! Averages are taken over completed processes only. Empty input gives 0
//! for everything.
//!
//! # Reference
//! Silberschatz, Galvin & Gagne (2018), "Operating System Concepts", Ch. 5.2

use std::collections::{BTreeMap, HashSet};

use serde::Serialize;

use crate::models::{Process, Timeline};

/// Timing figures for one completed process.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProcessTiming {
    pub pid: i64,
    pub arrival_time: i64,
    pub burst_time: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<i32>,
    pub start_time: i64,
    pub finish_time: i64,
    pub waiting_time: i64,
    pub turnaround_time: i64,
    pub response_time: i64,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub metadata: BTreeMap<String, serde_json::Value>,
}

impl ProcessTiming {
    /// Timing row for a terminated process. `None` if it has not finished.
    pub fn from_process(process: &Process) -> Option<Self> {
        let start_time = process.start_time?;
        let finish_time = process.finish_time?;
        let turnaround_time = finish_time - process.arrival_time;
        Some(Self {
            pid: process.pid,
            arrival_time: process.arrival_time,
            burst_time: process.burst_time,
            priority: process.priority,
            start_time,
            finish_time,
            waiting_time: turnaround_time - process.burst_time,
            turnaround_time,
            response_time: start_time - process.arrival_time,
            metadata: process.metadata.clone(),
        })
    }
}

/// Aggregate simulation statistics.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SimulationMetrics {
    /// Number of completed processes.
    pub completed: usize,
    /// Mean waiting time.
    pub avg_wait: f64,
    /// Mean turnaround time.
    pub avg_turnaround: f64,
    /// Mean response time.
    pub avg_response: f64,
    /// Latest finish time.
    pub makespan: i64,
    /// Completed processes per tick of makespan.
    pub throughput: f64,
    /// Fraction of the makespan spent running completed processes (0.0..=1.0).
    pub cpu_utilization: f64,
    /// Dispatches after the first, self-redispatches included.
    pub context_switches: usize,
}

impl SimulationMetrics {
    /// Computes metrics from the processes and the timeline of a run.
    ///
    /// Processes that have not terminated are ignored, as are their run
    /// intervals when computing utilization.
    pub fn calculate(processes: &[Process], timeline: &Timeline) -> Self {
        let rows: Vec<ProcessTiming> = processes
            .iter()
            .filter_map(ProcessTiming::from_process)
            .collect();

        let completed = rows.len();
        let avg_wait = mean(&rows, |r| r.waiting_time);
        let avg_turnaround = mean(&rows, |r| r.turnaround_time);
        let avg_response = mean(&rows, |r| r.response_time);
        let makespan = rows.iter().map(|r| r.finish_time).max().unwrap_or(0);

        let finished: HashSet<i64> = rows.iter().map(|r| r.pid).collect();
        let busy: i64 = timeline
            .runs()
            .filter(|e| e.pid.is_some_and(|pid| finished.contains(&pid)))
            .map(|e| e.duration)
            .sum();

        let (throughput, cpu_utilization) = if makespan <= 0 {
            (0.0, 0.0)
        } else {
            (
                completed as f64 / makespan as f64,
                busy as f64 / makespan as f64,
            )
        };

        Self {
            completed,
            avg_wait,
            avg_turnaround,
            avg_response,
            makespan,
            throughput,
            cpu_utilization,
            context_switches: timeline.context_switches(),
        }
    }
}

fn mean(rows: &[ProcessTiming], value: impl Fn(&ProcessTiming) -> i64) -> f64 {
    if rows.is_empty() {
        return 0.0;
    }
    rows.iter().map(|r| value(r) as f64).sum::<f64>() / rows.len() as f64
}

/// Timing rows for the terminated processes, in input order.
pub fn process_timings(processes: &[Process]) -> Vec<ProcessTiming> {
    processes
        .iter()
        .filter_map(ProcessTiming::from_process)
        .collect()
}
