//! Simulation domain models.
//!
//! | Type | Role |
//! |------|------|
//! | `ProcessDescriptor` | Caller input for one process |
//! | `Process` | Per-run process control block |
//! | `Timeline` | Ordered RUN/IDLE event log |

mod process;
mod timeline;

pub use process::{Process, ProcessDescriptor, ProcessState};
pub use timeline::{EventKind, Timeline, TimelineEvent};
