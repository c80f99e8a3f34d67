//! Read-only state projection
//!
//! Everything the rendering layer may observe crosses this boundary; the
//! engine's internals stay private. Snapshots are plain serializable data,
//! detached from the engine, so a consumer can never mutate live state.

use crate::event_log::LogEntry;
use crate::memory::FrameEntry;
use crate::process::Process;
use core_types::{Pid, ProcessState};
use serde::Serialize;
use services_filesystem::FileEntry;
use std::collections::BTreeMap;

/// Projection of one process
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProcessView {
    pub pid: Pid,
    pub name: String,
    pub state: ProcessState,
    /// Wait reason or remaining countdown while blocked
    pub detail: Option<String>,
    pub queue_level: usize,
    pub current_quantum: u32,
    pub remaining_actions: usize,
    pub memory_pages: u32,
    pub page_table: BTreeMap<u32, usize>,
}

impl From<&Process> for ProcessView {
    fn from(process: &Process) -> Self {
        Self {
            pid: process.pid,
            name: process.name.clone(),
            state: process.state,
            detail: process.wait_detail(),
            queue_level: process.queue_level,
            current_quantum: process.current_quantum,
            remaining_actions: process.remaining_actions(),
            memory_pages: process.memory_pages,
            page_table: process.page_table.clone(),
        }
    }
}

/// Projection of the bounded buffer
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BufferView {
    pub capacity: usize,
    pub used: usize,
    pub slots: Vec<Option<Pid>>,
    pub in_ptr: usize,
    pub out_ptr: usize,
}

/// Full observable state at one tick
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SimSnapshot {
    pub clock: u64,
    /// Every process in the pool, in pid order, whatever its state
    pub processes: Vec<ProcessView>,
    pub running: Option<ProcessView>,
    /// One list per queue level, each in queue order
    pub ready: Vec<Vec<ProcessView>>,
    pub blocked: Vec<ProcessView>,
    pub finished: Vec<ProcessView>,
    pub frames: Vec<Option<FrameEntry>>,
    pub last_access: Option<usize>,
    pub files: BTreeMap<String, FileEntry>,
    pub buffer: BufferView,
    pub mutex_owner: Option<Pid>,
    pub resources: BTreeMap<String, u32>,
    /// Recent tail of the event log, oldest first
    pub log: Vec<LogEntry>,
}

impl SimSnapshot {
    /// Every process view currently placed in a lifecycle bucket; processes
    /// that have not arrived yet appear only in [`SimSnapshot::processes`].
    pub fn all_processes(&self) -> impl Iterator<Item = &ProcessView> {
        self.running
            .iter()
            .chain(self.ready.iter().flatten())
            .chain(self.blocked.iter())
            .chain(self.finished.iter())
    }
}
