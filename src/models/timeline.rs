//! Execution timeline.
//!
//! An ordered log of what the single CPU did: either ran a process for a
//! number of ticks or sat idle. Events are appended in clock order, so each
//! event starts where the previous one ended.

use serde::{Deserialize, Serialize};

/// Kind of timeline event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum EventKind {
    /// The CPU executed a process.
    Run,
    /// No process was ready.
    Idle,
}

/// One contiguous interval of CPU activity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimelineEvent {
    /// Start tick.
    pub tick: i64,
    /// Executing process. `None` for idle intervals.
    pub pid: Option<i64>,
    pub kind: EventKind,
    /// Length in ticks.
    pub duration: i64,
}

impl TimelineEvent {
    /// A run interval.
    pub fn run(tick: i64, pid: i64, duration: i64) -> Self {
        Self {
            tick,
            pid: Some(pid),
            kind: EventKind::Run,
            duration,
        }
    }

    /// An idle interval.
    pub fn idle(tick: i64, duration: i64) -> Self {
        Self {
            tick,
            pid: None,
            kind: EventKind::Idle,
            duration,
        }
    }

    /// End tick (exclusive).
    #[inline]
    pub fn end(&self) -> i64 {
        self.tick + self.duration
    }

    #[inline]
    pub fn is_run(&self) -> bool {
        self.kind == EventKind::Run
    }
}

/// Ordered sequence of timeline events.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Timeline {
    events: Vec<TimelineEvent>,
}

impl Timeline {
    /// Creates an empty timeline.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a run interval.
    pub fn push_run(&mut self, tick: i64, pid: i64, duration: i64) {
        self.push(TimelineEvent::run(tick, pid, duration));
    }

    /// Appends an idle interval.
    pub fn push_idle(&mut self, tick: i64, duration: i64) {
        self.push(TimelineEvent::idle(tick, duration));
    }

    fn push(&mut self, event: TimelineEvent) {
        debug_assert!(event.duration > 0);
        debug_assert!(self.end_tick() <= event.tick);
        self.events.push(event);
    }

    /// All events in order.
    pub fn events(&self) -> &[TimelineEvent] {
        &self.events
    }

    /// Run events only.
    pub fn runs(&self) -> impl Iterator<Item = &TimelineEvent> + '_ {
        self.events.iter().filter(|e| e.is_run())
    }

    /// Run events for one process.
    pub fn runs_for(&self, pid: i64) -> Vec<&TimelineEvent> {
        self.runs().filter(|e| e.pid == Some(pid)).collect()
    }

    /// Total ticks a process spent running.
    pub fn run_time_for(&self, pid: i64) -> i64 {
        self.runs()
            .filter(|e| e.pid == Some(pid))
            .map(|e| e.duration)
            .sum()
    }

    /// Total ticks the CPU was busy.
    pub fn total_run_time(&self) -> i64 {
        self.runs().map(|e| e.duration).sum()
    }

    /// Total ticks the CPU was idle.
    pub fn total_idle_time(&self) -> i64 {
        self.events
            .iter()
            .filter(|e| e.kind == EventKind::Idle)
            .map(|e| e.duration)
            .sum()
    }

    /// End of the last event, or 0.
    pub fn end_tick(&self) -> i64 {
        self.events.last().map(|e| e.end()).unwrap_or(0)
    }

    /// Number of context switches.
    ///
    /// Every run event is a separate dispatch, so each run event after the
    /// first is a switch, including a Round Robin process redispatched to
    /// itself after a full queue cycle. Idle events are not dispatches.
    pub fn context_switches(&self) -> usize {
        self.runs().count().saturating_sub(1)
    }

    /// Number of events.
    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}
