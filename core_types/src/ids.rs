//! Unique identifiers for simulated entities

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unique identifier for a simulated process
///
/// Pids are small positive integers. The fixed template set owns the low
/// pids and dynamically spawned jobs continue upward from there; a pid is
/// never reused within a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Pid(u32);

impl Pid {
    /// Creates a pid from a raw integer
    pub fn new(raw: u32) -> Self {
        Self(raw)
    }

    /// Returns the raw integer value
    pub fn as_u32(&self) -> u32 {
        self.0
    }

    /// Returns the next pid in monotonic order
    ///
    /// Used by the spawn path to hand out fresh identifiers.
    pub fn next(&self) -> Self {
        Self(self.0 + 1)
    }
}

impl fmt::Display for Pid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "P{}", self.0)
    }
}
