//! Paged memory with FIFO replacement
//!
//! A fixed frame table plus a FIFO ordering of frame indices. The victim is
//! always the frame installed longest ago, irrespective of later hits to it
//! (strict FIFO, not LRU or clock). A fault can always be served: eviction
//! happens before installation, so the manager never runs out of frames.

use crate::process::Process;
use core_types::Pid;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, VecDeque};

/// Occupant of a physical frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrameEntry {
    pub pid: Pid,
    pub page: u32,
}

/// Outcome of a page access
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageAccess {
    pub fault: bool,
    /// Physical frame now holding the page
    pub frame: usize,
    /// Virtual page actually accessed, after normalization
    pub page: u32,
    /// Key displaced by this fault; its owner's page table must be pruned
    /// by the caller, since the manager cannot reach other processes.
    pub evicted: Option<(Pid, u32)>,
}

/// Physical frame table and replacement state
#[derive(Debug, Clone)]
pub struct MemoryManager {
    frame_table: Vec<Option<FrameEntry>>,
    /// Frame indices in installation order; the head is the next victim
    replacement_queue: VecDeque<usize>,
    /// Reverse index `(pid, page)` → frame, consistent with the frame table
    page_locations: HashMap<(Pid, u32), usize>,
    /// Frame touched by the most recent access, for highlighting only
    last_access: Option<usize>,
}

impl MemoryManager {
    pub fn new(frames: usize) -> Self {
        Self {
            frame_table: vec![None; frames],
            replacement_queue: (0..frames).collect(),
            page_locations: HashMap::new(),
            last_access: None,
        }
    }

    /// Translates a virtual page reference into a physical frame.
    ///
    /// Out-of-range scripted references are normalized modulo the process's
    /// page count rather than rejected. On a miss the FIFO victim frame is
    /// recycled; the accessing process's page table is updated here, the
    /// evicted owner's is left to the caller.
    pub fn access_page(&mut self, process: &mut Process, page: u32) -> PageAccess {
        let normalized = page % process.memory_pages.max(1);
        let key = (process.pid, normalized);

        if let Some(&frame) = self.page_locations.get(&key) {
            self.last_access = Some(frame);
            return PageAccess {
                fault: false,
                frame,
                page: normalized,
                evicted: None,
            };
        }

        // The queue always holds every frame index exactly once, so a miss
        // always finds a victim.
        let frame = match self.replacement_queue.pop_front() {
            Some(frame) => frame,
            None => 0,
        };
        let evicted = self.frame_table[frame].map(|entry| (entry.pid, entry.page));
        if let Some(old_key) = evicted {
            self.page_locations.remove(&old_key);
        }

        self.frame_table[frame] = Some(FrameEntry {
            pid: process.pid,
            page: normalized,
        });
        self.page_locations.insert(key, frame);
        self.replacement_queue.push_back(frame);
        self.last_access = Some(frame);
        process.page_table.insert(normalized, frame);

        PageAccess {
            fault: true,
            frame,
            page: normalized,
            evicted,
        }
    }

    pub fn frames(&self) -> &[Option<FrameEntry>] {
        &self.frame_table
    }

    pub fn last_access(&self) -> Option<usize> {
        self.last_access
    }

    pub fn frame_count(&self) -> usize {
        self.frame_table.len()
    }

    pub fn reset(&mut self) {
        let frames = self.frame_table.len();
        self.frame_table = vec![None; frames];
        self.replacement_queue = (0..frames).collect();
        self.page_locations.clear();
        self.last_access = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_types::Action;

    fn proc(pid: u32, pages: u32) -> Process {
        Process::new(Pid::new(pid), format!("p{}", pid), 0, pages, vec![Action::cpu("x")])
    }

    #[test]
    fn test_first_access_faults_into_first_frame() {
        let mut memory = MemoryManager::new(4);
        let mut p = proc(1, 8);

        let access = memory.access_page(&mut p, 0);
        assert!(access.fault);
        assert_eq!(access.frame, 0);
        assert_eq!(access.evicted, None);
        assert_eq!(p.page_table.get(&0), Some(&0));
        assert_eq!(memory.last_access(), Some(0));
    }

    #[test]
    fn test_resident_page_hits_without_eviction() {
        let mut memory = MemoryManager::new(4);
        let mut p = proc(1, 8);

        memory.access_page(&mut p, 3);
        let access = memory.access_page(&mut p, 3);
        assert!(!access.fault);
        assert_eq!(access.frame, 0);
        assert_eq!(access.evicted, None);
    }

    #[test]
    fn test_out_of_range_page_is_normalized() {
        let mut memory = MemoryManager::new(4);
        let mut p = proc(1, 4);

        let access = memory.access_page(&mut p, 9);
        assert_eq!(access.page, 1);
        assert_eq!(p.page_table.get(&1), Some(&access.frame));
    }

    #[test]
    fn test_zero_page_process_normalizes_to_page_zero() {
        let mut memory = MemoryManager::new(4);
        let mut p = proc(1, 0);

        let access = memory.access_page(&mut p, 7);
        assert_eq!(access.page, 0);
    }

    #[test]
    fn test_eviction_follows_installation_order() {
        let mut memory = MemoryManager::new(2);
        let mut p = proc(1, 8);

        memory.access_page(&mut p, 0);
        memory.access_page(&mut p, 1);
        // A hit must not refresh page 0's position in the replacement order.
        memory.access_page(&mut p, 0);

        let access = memory.access_page(&mut p, 2);
        assert!(access.fault);
        assert_eq!(access.evicted, Some((Pid::new(1), 0)));

        let access = memory.access_page(&mut p, 3);
        assert_eq!(access.evicted, Some((Pid::new(1), 1)));
    }

    #[test]
    fn test_reverse_index_matches_frame_table() {
        let mut memory = MemoryManager::new(2);
        let mut a = proc(1, 4);
        let mut b = proc(2, 4);

        memory.access_page(&mut a, 0);
        memory.access_page(&mut b, 0);
        memory.access_page(&mut a, 1);

        for (frame, slot) in memory.frames().iter().enumerate() {
            let entry = slot.expect("both frames occupied");
            let located = memory.page_locations.get(&(entry.pid, entry.page));
            assert_eq!(located, Some(&frame));
        }
        assert_eq!(memory.page_locations.len(), 2);
    }

    #[test]
    fn test_reset_restores_empty_state() {
        let mut memory = MemoryManager::new(3);
        let mut p = proc(1, 4);
        memory.access_page(&mut p, 0);

        memory.reset();
        assert!(memory.frames().iter().all(|slot| slot.is_none()));
        assert_eq!(memory.last_access(), None);

        let access = memory.access_page(&mut p, 2);
        assert_eq!(access.frame, 0);
    }
}
