//! Discrete-event CPU scheduling simulator.
//!
//! Given a set of processes (arrival time, CPU burst), computes the
//! execution timeline of a single CPU under a chosen scheduling discipline
//! and the resulting performance statistics.
//!
//! # Modules
//!
//! - **`models`**: Domain types: `ProcessDescriptor`, `Process` (PCB),
//!   `ProcessState`, `Timeline`, `TimelineEvent`
//! - **`dispatching`**: `SchedulingPolicy` trait, built-in FCFS / SJF /
//!   Round Robin policies, `Algorithm` selector
//! - **`scheduler`**: `Simulator` engine, `SimulationConfig`,
//!   `SimulationResult`, `SimulationMetrics`
//! - **`validation`**: Input integrity checks (duplicate pids, ranges,
//!   malformed entries)
//! - **`facade`**: JSON and selector-string entry points
//! - **`workload`**: Seeded random workload generation
//!
//! # Determinism
//!
//! Runs are pure functions of their input: no wall clock, no randomness.
//! Equal inputs always give identical timelines and metrics.
//!
//! # References
//!
//! - Silberschatz, Galvin & Gagne (2018), "Operating System Concepts", Ch. 5
//! - Tanenbaum & Bos (2014), "Modern Operating Systems", Ch. 2.4

pub mod dispatching;
pub mod error;
pub mod facade;
pub mod models;
pub mod scheduler;
pub mod validation;
pub mod workload;

pub use error::SimulationError;
