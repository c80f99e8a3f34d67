//! Scenario Test Utilities
//!
//! Shared helpers for the engine's end-to-end scenario tests.
//!
//! ## Test Philosophy
//!
//! - **Determinism**: every scenario scripts its workload; no timing, no
//!   randomness, no wall clock
//! - **Observe through the boundary**: assertions read [`SimSnapshot`]
//!   projections the same way a rendering layer would
//! - **Invariants over traces**: the structural properties (conservation,
//!   memory consistency, buffer bounds) are asserted after every tick, not
//!   just at the end

use core_types::{Pid, ProcessState};
use sim_engine::{ProcessView, SimConfig, SimSnapshot, Simulation};
use std::collections::BTreeSet;

/// A config with dynamic load injection disabled, for scripted scenarios.
pub fn quiet_config() -> SimConfig {
    SimConfig {
        spawn_interval: None,
        ..SimConfig::default()
    }
}

/// Builds an engine over the given templates with no spawn catalog.
pub fn scripted_sim(
    config: SimConfig,
    templates: Vec<sim_engine::ProcessTemplate>,
) -> Simulation {
    Simulation::with_templates(config, templates, Vec::new())
        .expect("scenario configuration must be valid")
}

pub fn step_n(sim: &mut Simulation, n: u64) {
    for _ in 0..n {
        sim.step();
    }
}

/// Finds one process view in a snapshot, whatever its state.
pub fn view_of(snapshot: &SimSnapshot, pid: Pid) -> Option<ProcessView> {
    snapshot.processes.iter().find(|view| view.pid == pid).cloned()
}

/// Asserts the structural invariants that must hold after every tick.
pub fn assert_invariants(sim: &Simulation) {
    let snapshot = sim.snapshot();

    // Conservation: every created pid is in exactly one lifecycle bucket
    // (New processes have not arrived and sit outside the buckets).
    let in_buckets = snapshot.running.iter().count()
        + snapshot.ready.iter().map(|q| q.len()).sum::<usize>()
        + snapshot.blocked.len()
        + snapshot.finished.len();
    let unarrived = snapshot
        .processes
        .iter()
        .filter(|view| view.state == ProcessState::New)
        .count();
    assert_eq!(
        in_buckets + unarrived,
        snapshot.processes.len(),
        "tick {}: lifecycle buckets out of balance",
        snapshot.clock
    );

    let mut seen = BTreeSet::new();
    for view in snapshot.all_processes() {
        assert!(
            seen.insert(view.pid),
            "tick {}: {} appears in more than one bucket",
            snapshot.clock,
            view.pid
        );
    }

    // Memory consistency: frame table and page tables agree both ways.
    for (frame, slot) in snapshot.frames.iter().enumerate() {
        if let Some(entry) = slot {
            let owner = view_of(&snapshot, entry.pid)
                .unwrap_or_else(|| panic!("frame {} owned by unknown {}", frame, entry.pid));
            assert_eq!(
                owner.page_table.get(&entry.page),
                Some(&frame),
                "tick {}: frame {} not reflected in {}'s page table",
                snapshot.clock,
                frame,
                entry.pid
            );
        }
    }
    for view in &snapshot.processes {
        for (&page, &frame) in &view.page_table {
            let slot = snapshot.frames.get(frame).and_then(|s| s.as_ref());
            assert!(
                slot.map(|e| e.pid == view.pid && e.page == page).unwrap_or(false),
                "tick {}: {}'s page {} claims frame {} but the frame disagrees",
                snapshot.clock,
                view.pid,
                page,
                frame
            );
        }
    }

    // Buffer bounds.
    assert!(
        snapshot.buffer.used <= snapshot.buffer.capacity,
        "tick {}: buffer overfilled",
        snapshot.clock
    );
    let occupied = snapshot.buffer.slots.iter().filter(|s| s.is_some()).count();
    assert_eq!(occupied, snapshot.buffer.used);
}
