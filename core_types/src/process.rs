//! Process lifecycle vocabulary

use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle state of a simulated process
///
/// A process is in exactly one of the five buckets at any time; `Finished`
/// is terminal and finished processes are retained for inspection only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProcessState {
    New,
    Ready,
    Running,
    Blocked,
    Finished,
}

impl fmt::Display for ProcessState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            ProcessState::New => "New",
            ProcessState::Ready => "Ready",
            ProcessState::Running => "Running",
            ProcessState::Blocked => "Blocked",
            ProcessState::Finished => "Finished",
        };
        write!(f, "{}", text)
    }
}

/// Predicate a condition-blocked process is waiting on
///
/// Countdown blocks carry a timer instead; the two are mutually exclusive.
/// Conditions are re-evaluated once per tick during the wake pass, never
/// signalled directly by the operation that makes them true.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum WaitCondition {
    /// Wakes when the mutex is unheld
    Mutex,
    /// Producer waiting for buffer occupancy to drop below capacity
    BufferSlot,
    /// Consumer waiting for buffer occupancy to rise above zero
    BufferItem,
    /// Wakes when the named resource count is positive
    Resource(String),
}

impl fmt::Display for WaitCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WaitCondition::Mutex => write!(f, "waiting for mutex"),
            WaitCondition::BufferSlot => write!(f, "waiting for empty slot"),
            WaitCondition::BufferItem => write!(f, "waiting for product"),
            WaitCondition::Resource(name) => write!(f, "waiting for resource {}", name),
        }
    }
}
