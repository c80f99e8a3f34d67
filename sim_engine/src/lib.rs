//! # Simulation Engine
//!
//! This crate provides a deterministic, step-driven simulation of core
//! operating-system mechanisms: process scheduling, paged memory, and
//! inter-process synchronization.
//!
//! ## Purpose
//!
//! The engine lets an observer advance time one tick at a time and inspect
//! the resulting state:
//! - Runs under `cargo test`
//! - Deterministic (controlled time, no real concurrency)
//! - Fast (no real I/O or context switches)
//! - Inspectable (all state crosses the [`SimSnapshot`] boundary)
//!
//! ## Philosophy
//!
//! **All blocking is data.** There is no real parallelism to race against:
//! exactly one scripted action executes per tick, belonging to the single
//! running process, and every suspension is recorded as plain state (a
//! countdown timer or a named wait condition). The whole engine is one owned
//! aggregate mutated by one logical caller, so no internal locking exists;
//! the "mutex" and "resources" here are simulated domain objects.
//!
//! ## Per-tick order
//!
//! `step()` is strictly: arrivals → wake blocked → dispatch → execute one
//! action → periodic spawn. Replays from the same template set are
//! bit-for-bit reproducible.

pub mod config;
pub mod event_log;
pub mod memory;
pub mod process;
pub mod scheduler;
pub mod snapshot;
pub mod sync;
pub mod templates;

pub use config::{ConfigError, SimConfig, QUEUE_LEVELS};
pub use event_log::{EventLog, LogEntry, LogLevel};
pub use memory::{FrameEntry, MemoryManager, PageAccess};
pub use process::Process;
pub use scheduler::ReadyQueues;
pub use snapshot::{BufferView, ProcessView, SimSnapshot};
pub use sync::{BoundedBuffer, SyncEngine};
pub use templates::{default_templates, spawn_templates, ProcessTemplate};

use core_types::{ActionKind, Pid, ProcessState, WaitCondition};
use scheduler::demoted;
use services_filesystem::FileSystem;
use std::collections::BTreeMap;

/// The simulation engine
///
/// Owns every process ever created in the current run plus the memory,
/// synchronization, and file-system state they contend over. Drive it with
/// [`Simulation::step`] and observe it with [`Simulation::snapshot`].
pub struct Simulation {
    config: SimConfig,
    clock: u64,
    /// Arena of all processes, keyed by pid; nothing outlives a reset
    processes: BTreeMap<Pid, Process>,
    ready: ReadyQueues,
    running: Option<Pid>,
    blocked: Vec<Pid>,
    finished: Vec<Pid>,
    memory: MemoryManager,
    sync: SyncEngine,
    file_system: FileSystem,
    log: EventLog,
    templates: Vec<ProcessTemplate>,
    spawn_catalog: Vec<ProcessTemplate>,
    next_pid: Pid,
    spawn_rotation: usize,
}

impl Simulation {
    /// Creates an engine with the default configuration and template set.
    pub fn new() -> Self {
        Self::build(
            SimConfig::default(),
            templates::default_templates(),
            templates::spawn_templates(),
        )
    }

    /// Creates an engine with a custom configuration.
    pub fn with_config(config: SimConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::build(
            config,
            templates::default_templates(),
            templates::spawn_templates(),
        ))
    }

    /// Creates an engine with custom configuration and templates.
    ///
    /// An empty spawn catalog simply disables dynamic load injection, the
    /// same as `spawn_interval: None`.
    pub fn with_templates(
        config: SimConfig,
        templates: Vec<ProcessTemplate>,
        spawn_catalog: Vec<ProcessTemplate>,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::build(config, templates, spawn_catalog))
    }

    fn build(
        config: SimConfig,
        templates: Vec<ProcessTemplate>,
        spawn_catalog: Vec<ProcessTemplate>,
    ) -> Self {
        let memory = MemoryManager::new(config.frames);
        let sync = SyncEngine::new(config.buffer_capacity, &config.resources);
        let log = EventLog::with_capacity(config.log_capacity);
        let mut sim = Self {
            config,
            clock: 0,
            processes: BTreeMap::new(),
            ready: ReadyQueues::new(),
            running: None,
            blocked: Vec::new(),
            finished: Vec::new(),
            memory,
            sync,
            file_system: FileSystem::new(),
            log,
            templates,
            spawn_catalog,
            next_pid: Pid::new(1),
            spawn_rotation: 0,
        };
        sim.reset();
        sim
    }

    /// Discards all mutable state and re-clones the pool from the templates.
    pub fn reset(&mut self) {
        self.clock = 0;
        self.processes.clear();
        self.ready.clear();
        self.blocked.clear();
        self.finished.clear();
        self.running = None;
        self.memory = MemoryManager::new(self.config.frames);
        self.sync = SyncEngine::new(self.config.buffer_capacity, &self.config.resources);
        self.file_system.reset();
        self.log = EventLog::with_capacity(self.config.log_capacity);
        self.spawn_rotation = 0;

        let mut pid = Pid::new(1);
        for template in &self.templates {
            let process = Process::new(
                pid,
                template.name.clone(),
                template.arrival_time,
                template.memory_pages,
                template.actions.clone(),
            );
            self.processes.insert(pid, process);
            pid = pid.next();
        }
        self.next_pid = pid;
    }

    /// Advances the clock by one tick and runs the full per-tick sequence.
    pub fn step(&mut self) {
        self.clock += 1;
        self.admit_arrivals();
        self.wake_blocked();
        self.dispatch_if_idle();
        match self.running {
            Some(pid) => self.run_action(pid),
            None => self.log_info(None, "CPU idle"),
        }
        self.maybe_spawn();
    }

    /// Returns the read-only projection of the current state.
    pub fn snapshot(&self) -> SimSnapshot {
        let view = |pid: Pid| self.processes.get(&pid).map(ProcessView::from);
        SimSnapshot {
            clock: self.clock,
            processes: self.processes.values().map(ProcessView::from).collect(),
            running: self.running.and_then(view),
            ready: (0..QUEUE_LEVELS)
                .map(|level| self.ready.level(level).filter_map(view).collect())
                .collect(),
            blocked: self.blocked.iter().copied().filter_map(view).collect(),
            finished: self.finished.iter().copied().filter_map(view).collect(),
            frames: self.memory.frames().to_vec(),
            last_access: self.memory.last_access(),
            files: self.file_system.files().clone(),
            buffer: BufferView {
                capacity: self.sync.buffer().capacity(),
                used: self.sync.buffer().len(),
                slots: self.sync.buffer().slots().to_vec(),
                in_ptr: self.sync.buffer().in_ptr(),
                out_ptr: self.sync.buffer().out_ptr(),
            },
            mutex_owner: self.sync.mutex_owner(),
            resources: self.sync.resources().clone(),
            log: self.log.recent(self.config.log_tail),
        }
    }

    pub fn clock(&self) -> u64 {
        self.clock
    }

    pub fn running(&self) -> Option<Pid> {
        self.running
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    /// Number of processes created so far in this run (templates + spawned).
    pub fn processes_created(&self) -> usize {
        self.processes.len()
    }

    pub fn process_state(&self, pid: Pid) -> Option<ProcessState> {
        self.processes.get(&pid).map(|p| p.state)
    }

    // ---- per-tick phases -------------------------------------------------

    fn admit_arrivals(&mut self) {
        let arrivals: Vec<Pid> = self
            .processes
            .values()
            .filter(|p| p.state == ProcessState::New && p.arrival_time <= self.clock)
            .map(|p| p.pid)
            .collect();
        for pid in arrivals {
            let name = match self.processes.get_mut(&pid) {
                Some(process) => {
                    process.state = ProcessState::Ready;
                    process.queue_level = 0;
                    process.name.clone()
                }
                None => continue,
            };
            self.ready.enqueue(0, pid);
            self.log_info(Some(pid), format!("{} arrived, entered the ready queue", name));
        }
    }

    /// Re-evaluates every blocked process: condition blocks against their
    /// wake predicate, countdown blocks against their timer. This pass is
    /// the only place conditions are tested; releases never signal.
    fn wake_blocked(&mut self) {
        let blocked = std::mem::take(&mut self.blocked);
        for pid in blocked {
            let woke = match self.processes.get_mut(&pid) {
                Some(process) => match process.wait.clone() {
                    Some(condition) => {
                        if self.sync.is_satisfied(&condition) {
                            process.wake();
                            Some(format!("no longer {}", condition))
                        } else {
                            None
                        }
                    }
                    None => {
                        if process.io_timer > 0 {
                            process.io_timer -= 1;
                        }
                        if process.io_timer == 0 {
                            process.wake();
                            Some("I/O complete, back to the ready queue".to_string())
                        } else {
                            None
                        }
                    }
                },
                None => None,
            };
            match woke {
                Some(message) => {
                    self.ready.enqueue(0, pid);
                    self.log_info(Some(pid), message);
                }
                None => self.blocked.push(pid),
            }
        }
    }

    fn dispatch_if_idle(&mut self) {
        if self.running.is_some() {
            return;
        }
        if let Some((level, pid)) = self.ready.pop_highest() {
            let name = match self.processes.get_mut(&pid) {
                Some(process) => {
                    process.state = ProcessState::Running;
                    process.queue_level = level;
                    process.current_quantum = 0;
                    process.name.clone()
                }
                None => return,
            };
            self.running = Some(pid);
            self.log_info(Some(pid), format!("dispatched {} from Q{}", name, level));
        }
    }

    /// Interprets exactly one scripted action of the running process.
    fn run_action(&mut self, pid: Pid) {
        let action = match self.processes.get(&pid).and_then(|p| p.next_action().cloned()) {
            Some(action) => action,
            None => {
                // Dispatched with nothing left to do.
                self.complete(pid);
                return;
            }
        };

        self.log_info(Some(pid), action.description.clone());

        match action.kind {
            ActionKind::Cpu => {}
            ActionKind::Io { duration } => {
                // The cursor moves past the action before the block so the
                // same I/O is not replayed after the wake.
                if let Some(process) = self.processes.get_mut(&pid) {
                    process.advance();
                    process.block_for_io(duration);
                }
                self.blocked.push(pid);
                self.running = None;
                self.log_info(Some(pid), format!("blocked for {} ticks of I/O", duration));
                return;
            }
            ActionKind::Mem { page } => self.execute_memory(pid, page),
            ActionKind::FileCreate { path, size } => {
                let message = self.file_system.create(&path, pid, size);
                self.log_info(Some(pid), message);
            }
            ActionKind::FileWrite { path, size } => {
                let message = self.file_system.write(&path, pid, size);
                self.log_info(Some(pid), message);
            }
            ActionKind::FileRead { path } => {
                let message = self.file_system.read(&path, pid);
                self.log_info(Some(pid), message);
            }
            ActionKind::FileDelete { path } => {
                let message = self.file_system.delete(&path, pid);
                self.log_info(Some(pid), message);
            }
            ActionKind::Produce => match self.sync.try_produce(pid) {
                Ok(slot) => {
                    let used = self.sync.buffer().len();
                    let capacity = self.sync.buffer().capacity();
                    self.log_info(
                        Some(pid),
                        format!("produced into slot {} ({}/{})", slot, used, capacity),
                    );
                }
                Err(condition) => {
                    self.block_on_condition(pid, condition);
                    return;
                }
            },
            ActionKind::Consume => match self.sync.try_consume(pid) {
                Ok(slot) => {
                    let used = self.sync.buffer().len();
                    let capacity = self.sync.buffer().capacity();
                    self.log_info(
                        Some(pid),
                        format!("consumed from slot {} ({}/{})", slot, used, capacity),
                    );
                }
                Err(condition) => {
                    self.block_on_condition(pid, condition);
                    return;
                }
            },
            ActionKind::ResAcquire { resource } => {
                match self.sync.try_acquire_resource(&resource) {
                    Ok(remaining) => self.log_info(
                        Some(pid),
                        format!("acquired resource {} ({} left)", resource, remaining),
                    ),
                    Err(condition) => {
                        self.block_on_condition(pid, condition);
                        return;
                    }
                }
            }
            ActionKind::ResRelease { resource } => {
                let count = self.sync.release_resource(&resource);
                self.log_info(
                    Some(pid),
                    format!("released resource {} (count {})", resource, count),
                );
            }
        }

        self.finish_tick_for(pid);
    }

    /// Cursor advance, completion check, and quantum accounting after a
    /// successfully executed action.
    fn finish_tick_for(&mut self, pid: Pid) {
        let done = match self.processes.get_mut(&pid) {
            Some(process) => {
                process.advance();
                process.remaining_actions() == 0
            }
            None => return,
        };
        if done {
            self.complete(pid);
            return;
        }

        let demoted_to = match self.processes.get_mut(&pid) {
            Some(process) => {
                process.current_quantum += 1;
                if process.current_quantum >= self.config.quantum_for(process.queue_level) {
                    process.queue_level = demoted(process.queue_level);
                    process.current_quantum = 0;
                    process.state = ProcessState::Ready;
                    Some(process.queue_level)
                } else {
                    None
                }
            }
            None => None,
        };
        if let Some(level) = demoted_to {
            self.ready.enqueue(level, pid);
            self.running = None;
            self.log_info(Some(pid), format!("quantum expired, re-queued at Q{}", level));
        }
    }

    fn execute_memory(&mut self, pid: Pid, page: u32) {
        let access = match self.processes.get_mut(&pid) {
            Some(process) => self.memory.access_page(process, page),
            None => return,
        };
        if access.fault {
            if let Some((owner_pid, owner_page)) = access.evicted {
                if let Some(owner) = self.processes.get_mut(&owner_pid) {
                    owner.page_table.remove(&owner_page);
                }
            }
            let mut message = format!(
                "page fault on page {}, loaded into frame {}",
                access.page, access.frame
            );
            if let Some((owner_pid, owner_page)) = access.evicted {
                message.push_str(&format!(", evicted {}.{}", owner_pid, owner_page));
            }
            self.log_info(Some(pid), message);
        } else {
            self.log_info(
                Some(pid),
                format!("hit frame {} for page {}", access.frame, access.page),
            );
        }
    }

    fn block_on_condition(&mut self, pid: Pid, condition: WaitCondition) {
        let text = condition.to_string();
        if let Some(process) = self.processes.get_mut(&pid) {
            process.block_on(condition);
        }
        self.blocked.push(pid);
        self.running = None;
        self.log_info(Some(pid), format!("blocked: {}", text));
    }

    fn complete(&mut self, pid: Pid) {
        if let Some(process) = self.processes.get_mut(&pid) {
            process.finish();
        }
        self.finished.push(pid);
        self.running = None;
        self.log_info(Some(pid), "finished all actions");
    }

    fn maybe_spawn(&mut self) {
        let interval = match self.config.spawn_interval {
            Some(interval) => interval,
            None => return,
        };
        if self.spawn_catalog.is_empty() || self.clock % interval != 0 {
            return;
        }

        let template = self.spawn_catalog[self.spawn_rotation % self.spawn_catalog.len()].clone();
        self.spawn_rotation += 1;

        let pid = self.next_pid;
        self.next_pid = pid.next();
        let name = format!("{}-{}", template.name, pid.as_u32());
        let mut process = Process::new(
            pid,
            name.clone(),
            self.clock,
            template.memory_pages,
            template.actions,
        );
        process.state = ProcessState::Ready;
        self.processes.insert(pid, process);
        self.ready.enqueue(0, pid);
        self.log_info(Some(pid), format!("spawned {} at Q0", name));
    }

    fn log_info(&mut self, source: Option<Pid>, message: impl Into<String>) {
        let mut entry = LogEntry::new(self.clock, LogLevel::Info, message);
        entry.source = source;
        self.log.record(entry);
    }
}

impl Default for Simulation {
    fn default() -> Self {
        Self::new()
    }
}
