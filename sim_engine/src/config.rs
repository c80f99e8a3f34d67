//! Engine configuration

use thiserror::Error;

/// Number of ready-queue priority tiers
pub const QUEUE_LEVELS: usize = 3;

/// Simulation configuration
///
/// Every knob has a default tuned for a small observable system; `validate`
/// rejects the degenerate values the engine cannot run with.
#[derive(Debug, Clone)]
pub struct SimConfig {
    /// Number of physical memory frames
    pub frames: usize,
    /// Per-level quantum table; higher levels get longer slices
    pub quanta: [u32; QUEUE_LEVELS],
    /// Bounded producer/consumer buffer slots
    pub buffer_capacity: usize,
    /// Dynamic load injection period in ticks; `None` disables spawning
    pub spawn_interval: Option<u64>,
    /// Named counting resources with their initial counts
    pub resources: Vec<(String, u32)>,
    /// Event log ring-buffer capacity
    pub log_capacity: usize,
    /// Number of log entries exposed through snapshots
    pub log_tail: usize,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            frames: 8,
            quanta: [1, 2, 4],
            buffer_capacity: 4,
            spawn_interval: Some(4),
            resources: vec![("printer".to_string(), 1), ("scanner".to_string(), 2)],
            log_capacity: 256,
            log_tail: 8,
        }
    }
}

impl SimConfig {
    /// Checks the configuration for values the engine cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.frames == 0 {
            return Err(ConfigError::ZeroFrames);
        }
        for (level, quantum) in self.quanta.iter().enumerate() {
            if *quantum == 0 {
                return Err(ConfigError::ZeroQuantum(level));
            }
        }
        if self.buffer_capacity == 0 {
            return Err(ConfigError::ZeroBufferCapacity);
        }
        if self.log_capacity == 0 {
            return Err(ConfigError::ZeroLogCapacity);
        }
        if self.spawn_interval == Some(0) {
            return Err(ConfigError::ZeroSpawnInterval);
        }
        Ok(())
    }

    /// Returns the quantum for a queue level, clamping out-of-range levels.
    pub fn quantum_for(&self, level: usize) -> u32 {
        self.quanta[level.min(QUEUE_LEVELS - 1)]
    }
}

/// Configuration validation error
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("frame count must be positive")]
    ZeroFrames,
    #[error("quantum for level {0} must be positive")]
    ZeroQuantum(usize),
    #[error("buffer capacity must be positive")]
    ZeroBufferCapacity,
    #[error("log capacity must be positive")]
    ZeroLogCapacity,
    #[error("spawn interval must be positive when set")]
    ZeroSpawnInterval,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(SimConfig::default().validate().is_ok());
    }

    #[test]
    fn test_zero_frames_rejected() {
        let config = SimConfig {
            frames: 0,
            ..SimConfig::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::ZeroFrames));
    }

    #[test]
    fn test_zero_quantum_rejected() {
        let config = SimConfig {
            quanta: [1, 0, 4],
            ..SimConfig::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::ZeroQuantum(1)));
    }

    #[test]
    fn test_zero_spawn_interval_rejected() {
        let config = SimConfig {
            spawn_interval: Some(0),
            ..SimConfig::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::ZeroSpawnInterval));
    }

    #[test]
    fn test_disabled_spawning_is_valid() {
        let config = SimConfig {
            spawn_interval: None,
            ..SimConfig::default()
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_quantum_for_clamps_level() {
        let config = SimConfig::default();
        assert_eq!(config.quantum_for(0), 1);
        assert_eq!(config.quantum_for(2), 4);
        assert_eq!(config.quantum_for(9), 4);
    }
}
