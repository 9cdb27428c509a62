//! Simulation engine and metrics.
//!
//! # Algorithm
//!
//! `Simulator` runs an event-by-event loop on a single abstract CPU: admit
//! arrivals, ask the policy what to run, record the interval, repeat. Time
//! is an integer tick counter; idle stretches are skipped in one step.
//!
//! # Metrics
//!
//! `SimulationMetrics` computes waiting, turnaround and response averages,
//! makespan, throughput, CPU utilization and context switches.
//!
//! # References
//!
//! - Silberschatz, Galvin & Gagne (2018), "Operating System Concepts", Ch. 5
//! - Law (2015), "Simulation Modeling and Analysis", Ch. 1.3 (next-event time advance)

mod metrics;
mod simulator;

pub use metrics::{process_timings, ProcessTiming, SimulationMetrics};
pub use simulator::{SimulationConfig, SimulationResult, Simulator};
