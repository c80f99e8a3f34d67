//! Scenario files
//!
//! A scenario is a JSON document carrying engine configuration overrides and
//! custom job templates, so the daemon can demonstrate a hand-written
//! workload instead of the built-in catalog.

use serde::Deserialize;
use sim_engine::{ProcessTemplate, SimConfig};
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Scenario loading error
#[derive(Debug, Error)]
pub enum ScenarioError {
    #[error("failed to read scenario file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse scenario file: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("scenario defines no templates")]
    NoTemplates,
}

/// Configuration overrides; absent fields keep engine defaults
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ScenarioConfig {
    pub frames: Option<usize>,
    pub quanta: Option<[u32; 3]>,
    pub buffer_capacity: Option<usize>,
    /// Spawn period in ticks; 0 disables spawning
    pub spawn_interval: Option<u64>,
    pub resources: Option<Vec<(String, u32)>>,
}

/// A parsed scenario file
#[derive(Debug, Clone, Deserialize)]
pub struct Scenario {
    #[serde(default)]
    pub config: ScenarioConfig,
    pub templates: Vec<ProcessTemplate>,
    #[serde(default)]
    pub spawn_templates: Vec<ProcessTemplate>,
}

impl Scenario {
    /// Loads and validates a scenario from disk.
    pub fn load(path: &Path) -> Result<Self, ScenarioError> {
        let text = fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    /// Parses a scenario from JSON text.
    pub fn from_json(text: &str) -> Result<Self, ScenarioError> {
        let scenario: Scenario = serde_json::from_str(text)?;
        if scenario.templates.is_empty() {
            return Err(ScenarioError::NoTemplates);
        }
        Ok(scenario)
    }

    /// Applies the overrides on top of the engine defaults.
    pub fn sim_config(&self) -> SimConfig {
        let mut config = SimConfig::default();
        if let Some(frames) = self.config.frames {
            config.frames = frames;
        }
        if let Some(quanta) = self.config.quanta {
            config.quanta = quanta;
        }
        if let Some(capacity) = self.config.buffer_capacity {
            config.buffer_capacity = capacity;
        }
        if let Some(interval) = self.config.spawn_interval {
            config.spawn_interval = if interval == 0 { None } else { Some(interval) };
        }
        if let Some(resources) = &self.config.resources {
            config.resources = resources.clone();
        }
        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write as _;

    const MINIMAL: &str = r#"{
        "config": { "frames": 4, "spawn_interval": 0 },
        "templates": [
            {
                "name": "job",
                "memory_pages": 2,
                "actions": [
                    { "kind": "Cpu", "description": "compute" },
                    { "kind": { "Mem": { "page": 1 } }, "description": "touch page" }
                ]
            }
        ]
    }"#;

    #[test]
    fn test_parse_minimal_scenario() {
        let scenario = Scenario::from_json(MINIMAL).unwrap();
        assert_eq!(scenario.templates.len(), 1);
        assert_eq!(scenario.templates[0].actions.len(), 2);

        let config = scenario.sim_config();
        assert_eq!(config.frames, 4);
        assert_eq!(config.spawn_interval, None);
        // Untouched fields keep their defaults.
        assert_eq!(config.quanta, [1, 2, 4]);
    }

    #[test]
    fn test_empty_templates_rejected() {
        let text = r#"{ "templates": [] }"#;
        assert!(matches!(
            Scenario::from_json(text),
            Err(ScenarioError::NoTemplates)
        ));
    }

    #[test]
    fn test_malformed_json_reports_parse_error() {
        assert!(matches!(
            Scenario::from_json("{ not json"),
            Err(ScenarioError::Parse(_))
        ));
    }

    #[test]
    fn test_load_from_disk() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(MINIMAL.as_bytes()).unwrap();

        let scenario = Scenario::load(file.path()).unwrap();
        assert_eq!(scenario.templates[0].name, "job");
    }

    #[test]
    fn test_missing_file_reports_io_error() {
        let result = Scenario::load(Path::new("/no/such/scenario.json"));
        assert!(matches!(result, Err(ScenarioError::Io(_))));
    }
}
