//! Multi-level feedback ready queues
//!
//! Three FIFO tiers; level 0 is highest priority. Dispatch always drains the
//! lowest-numbered non-empty tier, and quantum expiry demotes a process one
//! tier (clamped at the bottom). There is no aging for processes parked at
//! low tiers.

use crate::config::QUEUE_LEVELS;
use core_types::Pid;
use std::collections::VecDeque;

/// Returns the tier a process lands on after a quantum expiry.
pub fn demoted(level: usize) -> usize {
    (level + 1).min(QUEUE_LEVELS - 1)
}

/// The ready queues of the multi-level feedback scheduler
#[derive(Debug, Clone, Default)]
pub struct ReadyQueues {
    levels: [VecDeque<Pid>; QUEUE_LEVELS],
}

impl ReadyQueues {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a pid to the tail of the given tier, clamped to the range.
    pub fn enqueue(&mut self, level: usize, pid: Pid) {
        self.levels[level.min(QUEUE_LEVELS - 1)].push_back(pid);
    }

    /// Pops the head of the first non-empty tier, scanning 0 upward.
    pub fn pop_highest(&mut self) -> Option<(usize, Pid)> {
        for (level, queue) in self.levels.iter_mut().enumerate() {
            if let Some(pid) = queue.pop_front() {
                return Some((level, pid));
            }
        }
        None
    }

    /// The pids queued at one tier, head first.
    pub fn level(&self, level: usize) -> impl Iterator<Item = Pid> + '_ {
        self.levels[level.min(QUEUE_LEVELS - 1)].iter().copied()
    }

    pub fn len(&self) -> usize {
        self.levels.iter().map(|q| q.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.levels.iter().all(|q| q.is_empty())
    }

    pub fn clear(&mut self) {
        for queue in &mut self.levels {
            queue.clear();
        }
    }
}
