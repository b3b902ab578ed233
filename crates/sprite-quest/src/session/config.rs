use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// When a completed project or quiz level moves on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdvanceMode {
    /// Only when the learner asks (the game's "next" control or `next()`).
    #[default]
    Manual,
    /// Automatically, `auto_advance_delay_ms` after the win.
    AfterCompletion,
}

/// Session configuration. Every field has a default, so a partial JSON
/// object is enough.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QuestConfig {
    /// Delay before an informational level advances on its own (default: 100).
    pub informational_delay_ms: u64,
    pub advance_mode: AdvanceMode,
    /// Delay used by `AdvanceMode::AfterCompletion` (default: 0, next tick).
    pub auto_advance_delay_ms: u64,
    /// How long the level-up celebration stays up (default: 4000).
    pub celebration_ms: u64,
    /// How long the restart celebration stays up (default: 3000).
    pub restart_celebration_ms: u64,
    /// Seed for games with random setups (default: 42).
    pub rng_seed: u64,
    /// Maximum number of sound events per tick (default: 32).
    pub max_sounds: usize,
    /// Maximum number of quest events per tick (default: 32).
    pub max_events: usize,
}

impl Default for QuestConfig {
    fn default() -> Self {
        Self {
            informational_delay_ms: 100,
            advance_mode: AdvanceMode::Manual,
            auto_advance_delay_ms: 0,
            celebration_ms: 4000,
            restart_celebration_ms: 3000,
            rng_seed: 42,
            max_sounds: 32,
            max_events: 32,
        }
    }
}

impl QuestConfig {
    /// Parse a config from a JSON string. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_sounds == 0 {
            return Err(ConfigError::ZeroCapacity { field: "max_sounds" });
        }
        if self.max_events == 0 {
            return Err(ConfigError::ZeroCapacity { field: "max_events" });
        }
        Ok(())
    }

    pub fn informational_delay(&self) -> Duration {
        Duration::from_millis(self.informational_delay_ms)
    }

    pub fn auto_advance_delay(&self) -> Duration {
        Duration::from_millis(self.auto_advance_delay_ms)
    }

    pub fn celebration(&self) -> Duration {
        Duration::from_millis(self.celebration_ms)
    }

    pub fn restart_celebration(&self) -> Duration {
        Duration::from_millis(self.restart_celebration_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_object_gives_defaults() {
        let config = QuestConfig::from_json("{}").unwrap();
        assert_eq!(config, QuestConfig::default());
        assert_eq!(config.informational_delay(), Duration::from_millis(100));
        assert_eq!(config.advance_mode, AdvanceMode::Manual);
    }

    #[test]
    fn partial_object_overrides_fields() {
        let config =
            QuestConfig::from_json(r#"{"advance_mode":"after_completion","celebration_ms":1500}"#)
                .unwrap();
        assert_eq!(config.advance_mode, AdvanceMode::AfterCompletion);
        assert_eq!(config.celebration(), Duration::from_millis(1500));
        assert_eq!(config.restart_celebration_ms, 3000);
    }

    #[test]
    fn zero_buffers_are_rejected() {
        let err = QuestConfig::from_json(r#"{"max_events":0}"#).unwrap_err();
        assert!(matches!(err, ConfigError::ZeroCapacity { field: "max_events" }));
    }

    #[test]
    fn malformed_json_is_a_parse_error() {
        let err = QuestConfig::from_json(r#"{"advance_mode":"sometimes"}"#).unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }
}
