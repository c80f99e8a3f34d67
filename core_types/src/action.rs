//! Scripted process actions
//!
//! Each simulated process carries an immutable list of actions; the engine
//! interprets exactly one per tick. Payloads live on the variant that needs
//! them, so an unknown kind is not a reachable runtime state for scripts
//! built through this type.

use serde::{Deserialize, Serialize};
use std::fmt;

/// What a single scripted step does
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ActionKind {
    /// Pure computation, no side effect on shared state
    Cpu,
    /// Countdown block for the given number of ticks
    Io { duration: u32 },
    /// Reference to a virtual page of the issuing process
    Mem { page: u32 },
    /// Create a file entry at `path`
    FileCreate { path: String, size: u64 },
    /// Write `size` units to the file at `path`, creating it if absent
    FileWrite { path: String, size: u64 },
    /// Read the file at `path`
    FileRead { path: String },
    /// Delete the file at `path`
    FileDelete { path: String },
    /// Occupy the next slot of the shared bounded buffer
    Produce,
    /// Free the oldest occupied slot of the shared bounded buffer
    Consume,
    /// Take one unit of a named counting resource
    ResAcquire { resource: String },
    /// Return one unit of a named counting resource
    ResRelease { resource: String },
}

/// One scripted step of a process
///
/// Actions are built once in a template and cloned into each live process;
/// the engine never mutates them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Action {
    pub kind: ActionKind,
    /// Human-readable description surfaced in the event log
    pub description: String,
}

impl Action {
    pub fn new(kind: ActionKind, description: impl Into<String>) -> Self {
        Self {
            kind,
            description: description.into(),
        }
    }

    pub fn cpu(description: impl Into<String>) -> Self {
        Self::new(ActionKind::Cpu, description)
    }

    pub fn io(description: impl Into<String>, duration: u32) -> Self {
        Self::new(ActionKind::Io { duration }, description)
    }

    pub fn mem(description: impl Into<String>, page: u32) -> Self {
        Self::new(ActionKind::Mem { page }, description)
    }

    pub fn file_create(description: impl Into<String>, path: impl Into<String>, size: u64) -> Self {
        Self::new(
            ActionKind::FileCreate {
                path: path.into(),
                size,
            },
            description,
        )
    }

    pub fn file_write(description: impl Into<String>, path: impl Into<String>, size: u64) -> Self {
        Self::new(
            ActionKind::FileWrite {
                path: path.into(),
                size,
            },
            description,
        )
    }

    pub fn file_read(description: impl Into<String>, path: impl Into<String>) -> Self {
        Self::new(ActionKind::FileRead { path: path.into() }, description)
    }

    pub fn file_delete(description: impl Into<String>, path: impl Into<String>) -> Self {
        Self::new(ActionKind::FileDelete { path: path.into() }, description)
    }

    pub fn produce(description: impl Into<String>) -> Self {
        Self::new(ActionKind::Produce, description)
    }

    pub fn consume(description: impl Into<String>) -> Self {
        Self::new(ActionKind::Consume, description)
    }

    pub fn res_acquire(description: impl Into<String>, resource: impl Into<String>) -> Self {
        Self::new(
            ActionKind::ResAcquire {
                resource: resource.into(),
            },
            description,
        )
    }

    pub fn res_release(description: impl Into<String>, resource: impl Into<String>) -> Self {
        Self::new(
            ActionKind::ResRelease {
                resource: resource.into(),
            },
            description,
        )
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.description)
    }
}
