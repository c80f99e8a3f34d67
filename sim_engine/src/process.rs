//! The simulated process entity
//!
//! A `Process` is inert data: the engine mutates it from the single tick
//! driver, so no interior synchronization exists here. Blocking and waking
//! are recorded as plain state, never as suspended execution.

use core_types::{Action, Pid, ProcessState, WaitCondition};
use std::collections::BTreeMap;

/// One simulated process
#[derive(Debug, Clone)]
pub struct Process {
    pub pid: Pid,
    pub name: String,
    /// Tick at which the process enters the ready queues
    pub arrival_time: u64,
    /// Private copy of the scripted action sequence, immutable once assigned
    pub actions: Vec<Action>,
    /// Cursor into `actions`
    pub pointer: usize,
    pub state: ProcessState,
    /// Feedback-queue tier, 0 is highest priority
    pub queue_level: usize,
    /// Ticks consumed in the current dispatch
    pub current_quantum: u32,
    /// Ticks remaining for a countdown block; mutually exclusive with `wait`
    pub io_timer: u32,
    /// Condition a blocked process is waiting on
    pub wait: Option<WaitCondition>,
    /// Number of virtual pages the process owns
    pub memory_pages: u32,
    /// Virtual page → physical frame, entries exist only while resident
    pub page_table: BTreeMap<u32, usize>,
}

impl Process {
    pub fn new(
        pid: Pid,
        name: impl Into<String>,
        arrival_time: u64,
        memory_pages: u32,
        actions: Vec<Action>,
    ) -> Self {
        Self {
            pid,
            name: name.into(),
            arrival_time,
            actions,
            pointer: 0,
            state: ProcessState::New,
            queue_level: 0,
            current_quantum: 0,
            io_timer: 0,
            wait: None,
            memory_pages,
            page_table: BTreeMap::new(),
        }
    }

    /// Returns the action the cursor points at, if any remain.
    pub fn next_action(&self) -> Option<&Action> {
        self.actions.get(self.pointer)
    }

    /// Moves the cursor past the current action.
    pub fn advance(&mut self) {
        self.pointer += 1;
    }

    pub fn remaining_actions(&self) -> usize {
        self.actions.len().saturating_sub(self.pointer)
    }

    /// Enters a countdown block for `duration` ticks.
    pub fn block_for_io(&mut self, duration: u32) {
        self.state = ProcessState::Blocked;
        self.io_timer = duration;
        self.wait = None;
        self.current_quantum = 0;
    }

    /// Enters a condition block; the failed action stays under the cursor
    /// so it is retried after the wake.
    pub fn block_on(&mut self, condition: WaitCondition) {
        self.state = ProcessState::Blocked;
        self.wait = Some(condition);
        self.current_quantum = 0;
    }

    /// Returns to the ready state at maximum priority.
    ///
    /// A woken process never keeps a demoted queue level.
    pub fn wake(&mut self) {
        self.state = ProcessState::Ready;
        self.wait = None;
        self.io_timer = 0;
        self.queue_level = 0;
        self.current_quantum = 0;
    }

    pub fn finish(&mut self) {
        self.state = ProcessState::Finished;
        self.current_quantum = 0;
    }

    /// Human-readable blocking detail: the wait reason, or the remaining
    /// countdown for timer blocks.
    pub fn wait_detail(&self) -> Option<String> {
        if self.state != ProcessState::Blocked {
            return None;
        }
        match &self.wait {
            Some(condition) => Some(condition.to_string()),
            None => Some(format!("blocked({})", self.io_timer)),
        }
    }
}
