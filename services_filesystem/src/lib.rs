//! # File System Service
//!
//! This crate implements the in-memory file bookkeeping the simulator's
//! scripted file actions operate on.
//!
//! ## Philosophy
//!
//! - **Bookkeeping, not storage**: entries track owner and size; there is no
//!   real content.
//! - **Outcomes are descriptions**: every operation returns a human-readable
//!   message for the event log. Reading or deleting a missing path reports
//!   failure in the message rather than raising.
//! - **Deterministic iteration**: entries are kept in path order so snapshot
//!   consumers render identically across runs.

use core_types::Pid;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One file entry: owner, size, and a content-length marker
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileEntry {
    /// Process that created the entry (unchanged by later writers)
    pub owner: Pid,
    pub size: u64,
    /// Units appended by write operations; creation leaves it at zero
    pub content_len: u64,
}

/// In-memory path → entry mapping
#[derive(Debug, Clone, Default)]
pub struct FileSystem {
    files: BTreeMap<String, FileEntry>,
}

impl FileSystem {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an entry at `path`, replacing any existing one.
    pub fn create(&mut self, path: &str, owner: Pid, size: u64) -> String {
        let existed = self
            .files
            .insert(
                path.to_string(),
                FileEntry {
                    owner,
                    size,
                    content_len: 0,
                },
            )
            .is_some();
        if existed {
            format!("{} recreated file {}, replacing previous data", owner, path)
        } else {
            format!("{} created file {} ({}KB)", owner, path, size)
        }
    }

    /// Appends `size` units to the entry at `path`, creating it if absent.
    pub fn write(&mut self, path: &str, owner: Pid, size: u64) -> String {
        match self.files.get_mut(path) {
            Some(entry) => {
                entry.size += size;
                entry.content_len += size;
                format!("{} extended file {} by {}KB", owner, path, size)
            }
            None => {
                self.files.insert(
                    path.to_string(),
                    FileEntry {
                        owner,
                        size,
                        content_len: size,
                    },
                );
                format!("{} wrote {}KB to new file {}", owner, size, path)
            }
        }
    }

    pub fn read(&self, path: &str, owner: Pid) -> String {
        match self.files.get(path) {
            Some(entry) => format!("{} read file {} ({}KB)", owner, path, entry.size),
            None => format!("{} failed to read {}: no such file", owner, path),
        }
    }

    pub fn delete(&mut self, path: &str, owner: Pid) -> String {
        if self.files.remove(path).is_some() {
            format!("{} deleted file {}", owner, path)
        } else {
            format!("{} failed to delete {}: no such file", owner, path)
        }
    }

    /// Read-only view of all entries, in path order.
    pub fn files(&self) -> &BTreeMap<String, FileEntry> {
        &self.files
    }

    pub fn reset(&mut self) {
        self.files.clear();
    }
}
