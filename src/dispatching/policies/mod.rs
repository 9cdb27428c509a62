//! Built-in scheduling policies.
//!
//! | Policy | Selection | Slice | Preemptive |
//! |--------|-----------|-------|------------|
//! | FCFS | earliest arrival | whole remaining burst | no |
//! | SJF | shortest remaining burst | whole remaining burst | no |
//! | RR | queue front | `min(quantum, remaining)` | yes |
//!
//! All selections break ties by ready-queue position, which is admission
//! order.
//!
//! # References
//! - Silberschatz, Galvin & Gagne (2018), "Operating System Concepts", Ch. 5.3

use super::{Dispatch, DispatchContext, SchedulingPolicy};
use crate::models::Process;

/// First slot holding the minimum key. Earlier slots win ties.
fn first_min_by_key<K: Ord>(
    ready: &[usize],
    processes: &[Process],
    key: impl Fn(&Process) -> K,
) -> Option<usize> {
    let mut best: Option<(usize, K)> = None;
    for (slot, &idx) in ready.iter().enumerate() {
        let k = key(&processes[idx]);
        if best.as_ref().map_or(true, |(_, best_key)| k < *best_key) {
            best = Some((slot, k));
        }
    }
    best.map(|(slot, _)| slot)
}

/// First Come First Served.
///
/// Runs processes in arrival order, each to completion. Processes arriving
/// on the same tick run in input order.
#[derive(Debug, Clone, Copy)]
pub struct Fcfs;

impl SchedulingPolicy for Fcfs {
    fn name(&self) -> &'static str {
        "FCFS"
    }

    fn select(
        &self,
        ready: &[usize],
        processes: &[Process],
        _context: &DispatchContext,
    ) -> Option<Dispatch> {
        let slot = first_min_by_key(ready, processes, |p| p.arrival_time)?;
        Some(Dispatch {
            slot,
            run_for: processes[ready[slot]].remaining_time,
        })
    }

    fn description(&self) -> &'static str {
        "First Come First Served"
    }
}

/// Shortest Job First (non-preemptive).
///
/// Picks the ready process with the least remaining work and runs it to
/// completion. A shorter job arriving later waits for the running one.
#[derive(Debug, Clone, Copy)]
pub struct Sjf;

impl SchedulingPolicy for Sjf {
    fn name(&self) -> &'static str {
        "SJF"
    }

    fn select(
        &self,
        ready: &[usize],
        processes: &[Process],
        _context: &DispatchContext,
    ) -> Option<Dispatch> {
        let slot = first_min_by_key(ready, processes, |p| p.remaining_time)?;
        Some(Dispatch {
            slot,
            run_for: processes[ready[slot]].remaining_time,
        })
    }

    fn description(&self) -> &'static str {
        "Shortest Job First (non-preemptive)"
    }
}

/// Round Robin.
///
/// Takes the queue front and runs it for at most `quantum` ticks. The
/// simulator requeues unfinished processes at the tail, after admitting
/// any arrivals that happened during the slice.
#[derive(Debug, Clone, Copy)]
pub struct RoundRobin {
    quantum: i64,
}

impl RoundRobin {
    /// Creates a Round Robin policy. `quantum` must be positive.
    pub fn new(quantum: i64) -> Self {
        debug_assert!(quantum > 0);
        Self { quantum }
    }

    pub fn quantum(&self) -> i64 {
        self.quantum
    }
}

impl SchedulingPolicy for RoundRobin {
    fn name(&self) -> &'static str {
        "RR"
    }

    fn select(
        &self,
        ready: &[usize],
        processes: &[Process],
        _context: &DispatchContext,
    ) -> Option<Dispatch> {
        let &idx = ready.first()?;
        Some(Dispatch {
            slot: 0,
            run_for: self.quantum.min(processes[idx].remaining_time),
        })
    }

    fn is_preemptive(&self) -> bool {
        true
    }

    fn description(&self) -> &'static str {
        "Round Robin"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ProcessDescriptor;

    fn make_process(pid: i64, arrival: i64, remaining: i64) -> Process {
        let mut p = Process::from_descriptor(&ProcessDescriptor::new(pid, arrival, remaining));
        p.admit();
        p
    }

    fn arena() -> Vec<Process> {
        vec![
            make_process(1, 0, 6),
            make_process(2, 1, 3),
            make_process(3, 1, 3),
            make_process(4, 2, 8),
        ]
    }

    #[test]
    fn test_fcfs_earliest_arrival() {
        let procs = arena();
        let ctx = DispatchContext::at_time(2);
        let d = Fcfs.select(&[3, 1, 0], &procs, &ctx).unwrap();
        assert_eq!(d.slot, 2);
        assert_eq!(d.run_for, 6);
    }

    #[test]
    fn test_fcfs_tie_by_queue_order() {
        let procs = arena();
        let ctx = DispatchContext::at_time(2);
        let d = Fcfs.select(&[2, 1], &procs, &ctx).unwrap();
        assert_eq!(d.slot, 0); // pid 3 was queued first
    }

    #[test]
    fn test_sjf_shortest_remaining() {
        let procs = arena();
        let ctx = DispatchContext::at_time(2);
        let d = Sjf.select(&[0, 3, 1, 2], &procs, &ctx).unwrap();
        assert_eq!(d.slot, 2); // pid 2, first of the two 3-tick jobs
        assert_eq!(d.run_for, 3);
    }

    #[test]
    fn test_sjf_uses_remaining_not_burst() {
        let mut procs = arena();
        procs[0].remaining_time = 1;
        let ctx = DispatchContext::at_time(5);
        let d = Sjf.select(&[1, 0], &procs, &ctx).unwrap();
        assert_eq!(d.slot, 1);
        assert_eq!(d.run_for, 1);
    }

    #[test]
    fn test_round_robin_front_and_slice() {
        let procs = arena();
        let ctx = DispatchContext::at_time(0);
        let rr = RoundRobin::new(4);

        let d = rr.select(&[3, 1], &procs, &ctx).unwrap();
        assert_eq!(d, Dispatch { slot: 0, run_for: 4 });

        let d = rr.select(&[1, 3], &procs, &ctx).unwrap();
        assert_eq!(d, Dispatch { slot: 0, run_for: 3 }); // remaining < quantum
    }

    #[test]
    fn test_empty_ready_queue() {
        let procs = arena();
        let ctx = DispatchContext::at_time(0);
        assert!(Fcfs.select(&[], &procs, &ctx).is_none());
        assert!(Sjf.select(&[], &procs, &ctx).is_none());
        assert!(RoundRobin::new(2).select(&[], &procs, &ctx).is_none());
    }

    #[test]
    fn test_preemption_flags() {
        assert!(!Fcfs.is_preemptive());
        assert!(!Sjf.is_preemptive());
        assert!(RoundRobin::new(1).is_preemptive());
        assert_eq!(RoundRobin::new(3).quantum(), 3);
    }
}
