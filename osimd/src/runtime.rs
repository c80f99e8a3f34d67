//! Host runtime
//!
//! The loop that ties arguments, engine, and rendering together. One
//! engine step per iteration; no wall-clock pacing.

use crate::render::{render_json, render_text};
use crate::scenario::{Scenario, ScenarioError};
use sim_engine::{ConfigError, SimConfig, Simulation};
use std::path::PathBuf;
use thiserror::Error;

/// Host runtime error types
#[derive(Debug, Error)]
pub enum HostRuntimeError {
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("scenario error: {0}")]
    Scenario(#[from] ScenarioError),

    #[error("render error: {0}")]
    Render(#[from] serde_json::Error),
}

/// Host runtime configuration
#[derive(Debug, Clone)]
pub struct HostRuntimeConfig {
    /// Number of ticks to run
    pub max_steps: u64,
    /// Emit one JSON line per tick instead of text frames
    pub json: bool,
    /// Disable dynamic load injection
    pub no_spawn: bool,
    /// Optional scenario file replacing the built-in templates
    pub scenario: Option<PathBuf>,
}

impl Default for HostRuntimeConfig {
    fn default() -> Self {
        Self {
            max_steps: 32,
            json: false,
            no_spawn: false,
            scenario: None,
        }
    }
}

/// Host runtime
pub struct HostRuntime {
    config: HostRuntimeConfig,
    sim: Simulation,
}

impl HostRuntime {
    /// Creates a runtime, loading the scenario file if one was given.
    pub fn new(config: HostRuntimeConfig) -> Result<Self, HostRuntimeError> {
        let sim = match &config.scenario {
            Some(path) => {
                let scenario = Scenario::load(path)?;
                let mut sim_config = scenario.sim_config();
                if config.no_spawn {
                    sim_config.spawn_interval = None;
                }
                Simulation::with_templates(
                    sim_config,
                    scenario.templates.clone(),
                    scenario.spawn_templates.clone(),
                )?
            }
            None => {
                let mut sim_config = SimConfig::default();
                if config.no_spawn {
                    sim_config.spawn_interval = None;
                }
                Simulation::with_config(sim_config)?
            }
        };
        Ok(Self { config, sim })
    }

    /// Advances one tick and returns the rendered frame.
    pub fn step_frame(&mut self) -> Result<String, HostRuntimeError> {
        self.sim.step();
        let snapshot = self.sim.snapshot();
        if self.config.json {
            Ok(render_json(&snapshot)?)
        } else {
            Ok(render_text(&snapshot))
        }
    }

    /// Runs to `max_steps`, printing one frame per tick.
    pub fn run(&mut self) -> Result<(), HostRuntimeError> {
        for _ in 0..self.config.max_steps {
            let frame = self.step_frame()?;
            println!("{}", frame);
        }
        Ok(())
    }

    pub fn simulation(&self) -> &Simulation {
        &self.sim
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write as _;

    #[test]
    fn test_runtime_steps_the_engine() {
        let mut runtime = HostRuntime::new(HostRuntimeConfig::default()).unwrap();
        runtime.step_frame().unwrap();
        runtime.step_frame().unwrap();
        assert_eq!(runtime.simulation().clock(), 2);
    }

    #[test]
    fn test_no_spawn_disables_injection() {
        let config = HostRuntimeConfig {
            no_spawn: true,
            max_steps: 8,
            ..HostRuntimeConfig::default()
        };
        let mut runtime = HostRuntime::new(config).unwrap();
        for _ in 0..8 {
            runtime.step_frame().unwrap();
        }
        // Only the five built-in templates, nothing injected at ticks 4/8.
        assert_eq!(runtime.simulation().processes_created(), 5);
    }

    #[test]
    fn test_json_mode_emits_json_lines() {
        let config = HostRuntimeConfig {
            json: true,
            ..HostRuntimeConfig::default()
        };
        let mut runtime = HostRuntime::new(config).unwrap();
        let frame = runtime.step_frame().unwrap();
        let value: serde_json::Value = serde_json::from_str(&frame).unwrap();
        assert_eq!(value["clock"], 1);
    }

    #[test]
    fn test_scenario_file_replaces_templates() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(
            br#"{
                "config": { "spawn_interval": 0 },
                "templates": [
                    {
                        "name": "solo",
                        "memory_pages": 1,
                        "actions": [ { "kind": "Cpu", "description": "compute" } ]
                    }
                ]
            }"#,
        )
        .unwrap();

        let config = HostRuntimeConfig {
            scenario: Some(file.path().to_path_buf()),
            ..HostRuntimeConfig::default()
        };
        let mut runtime = HostRuntime::new(config).unwrap();
        runtime.step_frame().unwrap();
        assert_eq!(runtime.simulation().processes_created(), 1);
    }

    #[test]
    fn test_missing_scenario_file_is_an_error() {
        let config = HostRuntimeConfig {
            scenario: Some(PathBuf::from("/no/such/file.json")),
            ..HostRuntimeConfig::default()
        };
        assert!(matches!(
            HostRuntime::new(config),
            Err(HostRuntimeError::Scenario(_))
        ));
    }
}
