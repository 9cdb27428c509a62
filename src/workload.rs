//! Random workload generation.
//!
//! Produces process sets with uniformly distributed arrivals and bursts for
//! experiments and comparisons between policies. Pass a seeded RNG to get
//! reproducible workloads.
//!
//! # Example
//!
//! ```
//! use rand::rngs::StdRng;
//! use rand::SeedableRng;
//! use u_procsim::workload::WorkloadGenerator;
//!
//! let mut rng = StdRng::seed_from_u64(7);
//! let processes = WorkloadGenerator::new(5).with_burst_range(1, 4).generate(&mut rng);
//! assert_eq!(processes.len(), 5);
//! assert!(processes.iter().all(|p| (1..=4).contains(&p.burst_time)));
//! ```

use rand::Rng;

use crate::models::ProcessDescriptor;

/// Uniform random workload generator.
#[derive(Debug, Clone)]
pub struct WorkloadGenerator {
    count: usize,
    max_arrival: i64,
    min_burst: i64,
    max_burst: i64,
    max_priority: Option<i32>,
}

impl WorkloadGenerator {
    /// Generator for `count` processes, arrivals in `0..=20`, bursts in `1..=10`.
    pub fn new(count: usize) -> Self {
        Self {
            count,
            max_arrival: 20,
            min_burst: 1,
            max_burst: 10,
            max_priority: None,
        }
    }

    /// Latest possible arrival tick. Negative values are treated as 0.
    pub fn with_max_arrival(mut self, max_arrival: i64) -> Self {
        self.max_arrival = max_arrival.max(0);
        self
    }

    /// Burst range (inclusive). Bounds are clamped to at least 1 and ordered.
    pub fn with_burst_range(mut self, min_burst: i64, max_burst: i64) -> Self {
        let lo = min_burst.max(1);
        let hi = max_burst.max(1);
        self.min_burst = lo.min(hi);
        self.max_burst = lo.max(hi);
        self
    }

    /// Also draw a priority in `0..=max_priority`.
    pub fn with_priorities(mut self, max_priority: i32) -> Self {
        self.max_priority = Some(max_priority.max(0));
        self
    }

    /// Generates descriptors with pids `1..=count`, in pid order.
    pub fn generate<R: Rng>(&self, rng: &mut R) -> Vec<ProcessDescriptor> {
        (1..=self.count as i64)
            .map(|pid| {
                let arrival = rng.random_range(0..=self.max_arrival);
                let burst = rng.random_range(self.min_burst..=self.max_burst);
                let mut d = ProcessDescriptor::new(pid, arrival, burst);
                if let Some(max_priority) = self.max_priority {
                    d.priority = Some(rng.random_range(0..=max_priority));
                }
                d
            })
            .collect()
    }
}
