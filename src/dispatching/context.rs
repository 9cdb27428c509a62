//! Dispatch context passed to scheduling policies.

/// Simulator state visible to a policy at decision time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DispatchContext {
    /// Current simulation clock (ticks).
    pub clock: i64,
}

impl DispatchContext {
    /// Creates a context at the given tick.
    pub fn at_time(clock: i64) -> Self {
        Self { clock }
    }
}
