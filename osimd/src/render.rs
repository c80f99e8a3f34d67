//! Snapshot rendering
//!
//! Pure projection from [`SimSnapshot`] to text, so tests can assert on
//! frames without capturing stdout.

use core_types::Pid;
use sim_engine::{ProcessView, SimSnapshot};
use std::fmt::Write as _;

fn pid_cell(slot: &Option<Pid>) -> String {
    match slot {
        Some(pid) => format!("{}", pid),
        None => "-".to_string(),
    }
}

fn process_line(view: &ProcessView) -> String {
    let detail = match &view.detail {
        Some(detail) => format!(" [{}]", detail),
        None => String::new(),
    };
    format!(
        "{} {} ({}, Q{}, q={}, remaining {}){}",
        view.pid,
        view.name,
        view.state,
        view.queue_level,
        view.current_quantum,
        view.remaining_actions,
        detail
    )
}

/// Renders one snapshot as a multi-line text frame.
pub fn render_text(snapshot: &SimSnapshot) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "=== t={} ===", snapshot.clock);
    match &snapshot.running {
        Some(view) => {
            let _ = writeln!(out, "running: {}", process_line(view));
        }
        None => {
            let _ = writeln!(out, "running: -");
        }
    }

    for (level, queue) in snapshot.ready.iter().enumerate() {
        let entries: Vec<String> = queue.iter().map(process_line).collect();
        let _ = writeln!(out, "Q{}: [{}]", level, entries.join(", "));
    }

    let blocked: Vec<String> = snapshot.blocked.iter().map(process_line).collect();
    let _ = writeln!(out, "blocked: [{}]", blocked.join(", "));
    let finished: Vec<String> = snapshot
        .finished
        .iter()
        .map(|view| format!("{} {}", view.pid, view.name))
        .collect();
    let _ = writeln!(out, "finished: [{}]", finished.join(", "));

    let frames: Vec<String> = snapshot
        .frames
        .iter()
        .map(|slot| match slot {
            Some(entry) => format!("{}.{}", entry.pid, entry.page),
            None => "-".to_string(),
        })
        .collect();
    let last = match snapshot.last_access {
        Some(frame) => frame.to_string(),
        None => "-".to_string(),
    };
    let _ = writeln!(out, "frames: [{}] last={}", frames.join("|"), last);

    let slots: Vec<String> = snapshot.buffer.slots.iter().map(pid_cell).collect();
    let _ = writeln!(
        out,
        "buffer: {}/{} [{}] in={} out={}",
        snapshot.buffer.used,
        snapshot.buffer.capacity,
        slots.join("|"),
        snapshot.buffer.in_ptr,
        snapshot.buffer.out_ptr
    );

    let _ = writeln!(out, "mutex: {}", pid_cell(&snapshot.mutex_owner));

    let resources: Vec<String> = snapshot
        .resources
        .iter()
        .map(|(name, count)| format!("{}={}", name, count))
        .collect();
    let _ = writeln!(out, "resources: {}", resources.join(" "));

    for (path, entry) in &snapshot.files {
        let _ = writeln!(out, "file: {} owner={} size={}KB", path, entry.owner, entry.size);
    }

    for entry in &snapshot.log {
        let _ = writeln!(out, "  {}", entry);
    }

    out
}

/// Renders one snapshot as a single JSON line.
pub fn render_json(snapshot: &SimSnapshot) -> Result<String, serde_json::Error> {
    serde_json::to_string(snapshot)
}
