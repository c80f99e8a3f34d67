//! Structured event log
//!
//! Every observable outcome of a tick lands here; the engine never prints.
//! The log is a bounded ring buffer, so a long-running simulation cannot
//! grow without bound, and snapshots expose only a recent tail.

use core_types::Pid;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::fmt;

/// Log level
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum LogLevel {
    Debug,
    Info,
    Warn,
    Error,
}

/// A structured log entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEntry {
    /// Simulation tick the event happened on
    pub tick: u64,
    pub level: LogLevel,
    /// Process the event concerns, if any
    pub source: Option<Pid>,
    pub message: String,
}

impl LogEntry {
    pub fn new(tick: u64, level: LogLevel, message: impl Into<String>) -> Self {
        Self {
            tick,
            level,
            source: None,
            message: message.into(),
        }
    }

    pub fn with_source(mut self, source: Pid) -> Self {
        self.source = Some(source);
        self
    }
}

impl fmt::Display for LogEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.source {
            Some(pid) => write!(f, "[t={}] {}: {}", self.tick, pid, self.message),
            None => write!(f, "[t={}] {}", self.tick, self.message),
        }
    }
}

/// Bounded ring buffer of log entries
///
/// Recording past capacity drops the oldest entry.
#[derive(Debug, Clone)]
pub struct EventLog {
    capacity: usize,
    entries: VecDeque<LogEntry>,
}

impl EventLog {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            capacity,
            entries: VecDeque::new(),
        }
    }

    pub fn record(&mut self, entry: LogEntry) {
        if self.entries.len() == self.capacity {
            self.entries.pop_front();
        }
        self.entries.push_back(entry);
    }

    /// Returns the most recent `n` entries, oldest first.
    pub fn recent(&self, n: usize) -> Vec<LogEntry> {
        let skip = self.entries.len().saturating_sub(n);
        self.entries.iter().skip(skip).cloned().collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &LogEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(tick: u64, message: &str) -> LogEntry {
        LogEntry::new(tick, LogLevel::Info, message)
    }

    #[test]
    fn test_log_level_ordering() {
        assert!(LogLevel::Debug < LogLevel::Info);
        assert!(LogLevel::Info < LogLevel::Warn);
        assert!(LogLevel::Warn < LogLevel::Error);
    }

    #[test]
    fn test_record_and_recent() {
        let mut log = EventLog::with_capacity(8);
        log.record(entry(1, "a"));
        log.record(entry(1, "b"));
        log.record(entry(2, "c"));

        let tail = log.recent(2);
        assert_eq!(tail.len(), 2);
        assert_eq!(tail[0].message, "b");
        assert_eq!(tail[1].message, "c");
    }

    #[test]
    fn test_recent_larger_than_log_returns_all() {
        let mut log = EventLog::with_capacity(8);
        log.record(entry(1, "only"));
        assert_eq!(log.recent(10).len(), 1);
    }

    #[test]
    fn test_ring_drops_oldest_at_capacity() {
        let mut log = EventLog::with_capacity(3);
        for i in 0..5 {
            log.record(entry(i, &format!("m{}", i)));
        }
        assert_eq!(log.len(), 3);
        let all: Vec<String> = log.iter().map(|e| e.message.clone()).collect();
        assert_eq!(all, vec!["m2", "m3", "m4"]);
    }

    #[test]
    fn test_display_includes_tick_and_source() {
        let plain = entry(4, "CPU idle");
        assert_eq!(format!("{}", plain), "[t=4] CPU idle");

        let sourced = entry(5, "page fault").with_source(Pid::new(2));
        assert_eq!(format!("{}", sourced), "[t=5] P2: page fault");
    }

    #[test]
    fn test_clear_empties_log() {
        let mut log = EventLog::with_capacity(4);
        log.record(entry(1, "x"));
        log.clear();
        assert!(log.is_empty());
    }
}
