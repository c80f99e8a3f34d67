//! Scheduling scenario tests
//!
//! Multi-level feedback behavior observed through the snapshot boundary:
//! round-robin under a one-tick quantum, demotion on expiry, wake-to-top
//! priority, and terminal finishing.

use core_types::{Action, Pid, ProcessState};
use sim_engine::{ProcessTemplate, SimConfig, Simulation};
use tests_scenarios::{assert_invariants, quiet_config, scripted_sim, step_n, view_of};

fn cpu_job(name: &str, arrival: u64, count: usize) -> ProcessTemplate {
    ProcessTemplate::new(
        name,
        arrival,
        2,
        (0..count).map(|_| Action::cpu("compute")).collect(),
    )
}

#[test]
fn two_cpu_jobs_alternate_in_strict_round_robin() {
    let config = SimConfig {
        quanta: [1, 1, 1],
        spawn_interval: None,
        ..SimConfig::default()
    };
    let mut sim = scripted_sim(config, vec![cpu_job("a", 0, 4), cpu_job("b", 0, 4)]);

    // With a one-tick quantum at every level, each tick runs one action of
    // one job and demotes it; both jobs demote identically, so the dispatch
    // order must strictly alternate until both finish.
    let mut dispatch_order = Vec::new();
    for _ in 0..8 {
        sim.step();
        let snapshot = sim.snapshot();
        if let Some(entry) = snapshot
            .log
            .iter()
            .find(|e| e.tick == snapshot.clock && e.message.starts_with("dispatched"))
        {
            dispatch_order.push(entry.source.expect("dispatch entries carry a pid"));
        }
        assert_invariants(&sim);
    }
    assert_eq!(
        dispatch_order,
        vec![
            Pid::new(1),
            Pid::new(2),
            Pid::new(1),
            Pid::new(2),
            Pid::new(1),
            Pid::new(2),
            Pid::new(1),
            Pid::new(2)
        ]
    );
    assert_eq!(sim.process_state(Pid::new(1)), Some(ProcessState::Finished));
    assert_eq!(sim.process_state(Pid::new(2)), Some(ProcessState::Finished));
}

#[test]
fn quantum_expiry_demotes_one_level_at_a_time() {
    let mut sim = scripted_sim(quiet_config(), vec![cpu_job("solo", 0, 12)]);

    // Tick 1 runs at level 0 (quantum 1) and demotes to level 1.
    sim.step();
    let view = view_of(&sim.snapshot(), Pid::new(1)).unwrap();
    assert_eq!(view.state, ProcessState::Ready);
    assert_eq!(view.queue_level, 1);
    assert_eq!(view.current_quantum, 0);

    // Ticks 2-3 run at level 1 (quantum 2) and demote to level 2.
    step_n(&mut sim, 2);
    let view = view_of(&sim.snapshot(), Pid::new(1)).unwrap();
    assert_eq!(view.queue_level, 2);

    // Ticks 4-7 run at level 2 (quantum 4); the level is already the
    // lowest, so expiry re-queues at level 2.
    step_n(&mut sim, 4);
    let view = view_of(&sim.snapshot(), Pid::new(1)).unwrap();
    assert_eq!(view.state, ProcessState::Ready);
    assert_eq!(view.queue_level, 2);
}

#[test]
fn woken_process_returns_to_level_zero() {
    let template = ProcessTemplate::new(
        "sleeper",
        0,
        2,
        vec![
            Action::cpu("warm up"),
            Action::cpu("warm up"),
            Action::cpu("warm up"),
            Action::io("nap", 2),
            Action::cpu("wind down"),
        ],
    );
    let mut sim = scripted_sim(quiet_config(), vec![template]);

    // Three cpu actions demote the job to level 2 before it blocks.
    step_n(&mut sim, 4);
    let view = view_of(&sim.snapshot(), Pid::new(1)).unwrap();
    assert_eq!(view.state, ProcessState::Blocked);

    // The wake puts it back at level 0, not its demoted level.
    step_n(&mut sim, 2);
    let view = view_of(&sim.snapshot(), Pid::new(1)).unwrap();
    assert_ne!(view.state, ProcessState::Blocked);
    assert_eq!(view.queue_level, 0);
}

#[test]
fn finished_job_never_reenters_any_queue() {
    let mut sim = scripted_sim(quiet_config(), vec![cpu_job("a", 0, 1), cpu_job("b", 0, 2)]);

    step_n(&mut sim, 1);
    assert_eq!(
        sim.process_state(Pid::new(1)),
        Some(ProcessState::Finished)
    );

    for _ in 0..10 {
        sim.step();
        let snapshot = sim.snapshot();
        let finished_count = snapshot
            .finished
            .iter()
            .filter(|v| v.pid == Pid::new(1))
            .count();
        assert_eq!(finished_count, 1);
        assert!(snapshot.ready.iter().flatten().all(|v| v.pid != Pid::new(1)));
        assert!(snapshot.running.iter().all(|v| v.pid != Pid::new(1)));
        assert_invariants(&sim);
    }
}

#[test]
fn dynamic_spawn_keeps_the_system_loaded() {
    let config = SimConfig {
        spawn_interval: Some(4),
        ..SimConfig::default()
    };
    let mut sim = Simulation::with_config(config).unwrap();

    step_n(&mut sim, 20);
    // Five templates plus one injection per four ticks.
    assert_eq!(sim.processes_created(), 10);
    assert_invariants(&sim);

    // Spawned pids continue monotonically after the template pids.
    for raw in 6..=10 {
        assert!(sim.process_state(Pid::new(raw)).is_some());
    }
}

#[test]
fn invariants_hold_across_a_long_default_run() {
    let mut sim = Simulation::new();
    for _ in 0..120 {
        sim.step();
        assert_invariants(&sim);
    }
}

#[test]
fn reset_rebuilds_the_template_pool() {
    let mut sim = Simulation::new();
    step_n(&mut sim, 25);
    assert!(sim.processes_created() > 5);

    sim.reset();
    assert_eq!(sim.clock(), 0);
    assert_eq!(sim.processes_created(), 5);
    let snapshot = sim.snapshot();
    assert!(snapshot.processes.iter().all(|v| v.state == ProcessState::New));
    assert!(snapshot.files.is_empty());
    assert!(snapshot.log.is_empty());

    // A reset run replays identically to a fresh engine.
    let mut fresh = Simulation::new();
    step_n(&mut sim, 15);
    step_n(&mut fresh, 15);
    assert_eq!(sim.snapshot(), fresh.snapshot());
}
