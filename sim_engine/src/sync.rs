//! Synchronization engine
//!
//! One mutex slot, one bounded circular buffer, and a set of named counting
//! resources. These are simulated domain objects, not real concurrency
//! primitives: the single tick driver is the only mutator, so a failed
//! attempt simply reports the condition the caller must wait on, with no
//! state changed before the block. Conditions are only re-evaluated by the
//! wake pass on later ticks; releasing never signals a waiter directly.

use core_types::{Pid, WaitCondition};
use std::collections::BTreeMap;

/// Fixed-capacity circular buffer with per-slot ownership markers
#[derive(Debug, Clone)]
pub struct BoundedBuffer {
    slots: Vec<Option<Pid>>,
    count: usize,
    in_ptr: usize,
    out_ptr: usize,
}

impl BoundedBuffer {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: vec![None; capacity],
            count: 0,
            in_ptr: 0,
            out_ptr: 0,
        }
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    pub fn len(&self) -> usize {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    pub fn is_full(&self) -> bool {
        self.count == self.slots.len()
    }

    pub fn slots(&self) -> &[Option<Pid>] {
        &self.slots
    }

    pub fn in_ptr(&self) -> usize {
        self.in_ptr
    }

    pub fn out_ptr(&self) -> usize {
        self.out_ptr
    }

    /// Occupies the next slot in circular order. Caller checks fullness.
    fn push(&mut self, pid: Pid) -> usize {
        let slot = self.in_ptr;
        self.slots[slot] = Some(pid);
        self.in_ptr = (self.in_ptr + 1) % self.slots.len();
        self.count += 1;
        slot
    }

    /// Frees the oldest occupied slot in circular order. Caller checks emptiness.
    fn pop(&mut self) -> usize {
        let slot = self.out_ptr;
        self.slots[slot] = None;
        self.out_ptr = (self.out_ptr + 1) % self.slots.len();
        self.count -= 1;
        slot
    }
}

/// Mutex, bounded buffer, and counting resources under one roof
#[derive(Debug, Clone)]
pub struct SyncEngine {
    mutex_owner: Option<Pid>,
    buffer: BoundedBuffer,
    resources: BTreeMap<String, u32>,
}

impl SyncEngine {
    pub fn new(buffer_capacity: usize, resources: &[(String, u32)]) -> Self {
        Self {
            mutex_owner: None,
            buffer: BoundedBuffer::with_capacity(buffer_capacity),
            resources: resources.iter().cloned().collect(),
        }
    }

    /// Takes the mutex. Reentrant for the current holder.
    pub fn acquire_mutex(&mut self, pid: Pid) -> Result<(), WaitCondition> {
        match self.mutex_owner {
            Some(owner) if owner != pid => Err(WaitCondition::Mutex),
            _ => {
                self.mutex_owner = Some(pid);
                Ok(())
            }
        }
    }

    /// Clears ownership, but only for the current holder.
    pub fn release_mutex(&mut self, pid: Pid) {
        if self.mutex_owner == Some(pid) {
            self.mutex_owner = None;
        }
    }

    /// Produce one item under the mutex.
    ///
    /// Returns the occupied slot index, or the condition to wait on. A full
    /// buffer releases the mutex before reporting, so the blocked producer
    /// never parks while holding it.
    pub fn try_produce(&mut self, pid: Pid) -> Result<usize, WaitCondition> {
        self.acquire_mutex(pid)?;
        if self.buffer.is_full() {
            self.release_mutex(pid);
            return Err(WaitCondition::BufferSlot);
        }
        let slot = self.buffer.push(pid);
        self.release_mutex(pid);
        Ok(slot)
    }

    /// Consume the oldest item under the mutex. Mirrors [`Self::try_produce`].
    pub fn try_consume(&mut self, pid: Pid) -> Result<usize, WaitCondition> {
        self.acquire_mutex(pid)?;
        if self.buffer.is_empty() {
            self.release_mutex(pid);
            return Err(WaitCondition::BufferItem);
        }
        let slot = self.buffer.pop();
        self.release_mutex(pid);
        Ok(slot)
    }

    /// Takes one unit of a named resource; returns the remaining count.
    ///
    /// A name that was never configured counts as zero and blocks forever
    /// unless some process releases into it.
    pub fn try_acquire_resource(&mut self, name: &str) -> Result<u32, WaitCondition> {
        match self.resources.get_mut(name) {
            Some(count) if *count > 0 => {
                *count -= 1;
                Ok(*count)
            }
            _ => Err(WaitCondition::Resource(name.to_string())),
        }
    }

    /// Returns one unit unconditionally; returns the new count.
    ///
    /// Ownership is not tracked beyond the count, so a double release can
    /// push the count past its initial value.
    pub fn release_resource(&mut self, name: &str) -> u32 {
        let count = self.resources.entry(name.to_string()).or_insert(0);
        *count += 1;
        *count
    }

    /// Evaluates a wake predicate against current state.
    pub fn is_satisfied(&self, condition: &WaitCondition) -> bool {
        match condition {
            WaitCondition::Mutex => self.mutex_owner.is_none(),
            WaitCondition::BufferSlot => !self.buffer.is_full(),
            WaitCondition::BufferItem => !self.buffer.is_empty(),
            WaitCondition::Resource(name) => {
                self.resources.get(name).copied().unwrap_or(0) > 0
            }
        }
    }

    pub fn mutex_owner(&self) -> Option<Pid> {
        self.mutex_owner
    }

    pub fn buffer(&self) -> &BoundedBuffer {
        &self.buffer
    }

    pub fn resources(&self) -> &BTreeMap<String, u32> {
        &self.resources
    }
}
