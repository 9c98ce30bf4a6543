// Copyright 2025 Cowboy AI, LLC.

//! Tracker configuration

use crate::errors::{PropertyError, PropertyResult};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// How a current value is seeded from a reach target
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum SeedStrategy {
    /// Start from the property's default value, or the zero of its kind
    #[default]
    Default,
    /// Start from the target itself, i.e. already reached
    Target,
}

/// Configuration for a [`ProgressTracker`](crate::ProgressTracker)
///
/// ```rust
/// use cim_progress::{SeedStrategy, TrackerConfig};
///
/// let config = TrackerConfig::from_json(r#"{ "label": "onboarding" }"#).unwrap();
/// assert_eq!(config.label, "onboarding");
/// assert_eq!(config.seed, SeedStrategy::Default);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct TrackerConfig {
    /// Label carried into logs and progress reports
    pub label: String,
    /// Seeding of the derived current values
    pub seed: SeedStrategy,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            label: "progress".to_string(),
            seed: SeedStrategy::Default,
        }
    }
}

impl TrackerConfig {
    /// Create a configuration with `label` and default seeding
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            ..Self::default()
        }
    }

    /// Use `seed` for derived current values
    pub fn with_seed(mut self, seed: SeedStrategy) -> Self {
        self.seed = seed;
        self
    }

    /// Parse a configuration from JSON; missing fields take their defaults
    pub fn from_json(json: &str) -> PropertyResult<Self> {
        let config: TrackerConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Check the configuration is usable
    pub fn validate(&self) -> PropertyResult<()> {
        if self.label.trim().is_empty() {
            return Err(PropertyError::ValidationError(
                "tracker label cannot be empty".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_defaults() {
        let config = TrackerConfig::default();
        assert_eq!(config.label, "progress");
        assert_eq!(config.seed, SeedStrategy::Default);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_from_json() {
        let config = TrackerConfig::from_json(r#"{ "label": "quests", "seed": "target" }"#).unwrap();
        assert_eq!(
            config,
            TrackerConfig::new("quests").with_seed(SeedStrategy::Target)
        );

        let config = TrackerConfig::from_json("{}").unwrap();
        assert_eq!(config, TrackerConfig::default());
    }

    #[test]
    fn test_invalid_json() {
        let err = TrackerConfig::from_json(r#"{ "seed": "sideways" }"#).unwrap_err();
        assert!(matches!(err, PropertyError::SerializationError(_)));

        let err = TrackerConfig::from_json(r#"{ "label": "  " }"#).unwrap_err();
        assert!(err.is_validation_error());
    }

    #[test]
    fn test_schema_generation() {
        let schema = schemars::schema_for!(TrackerConfig);
        let json = serde_json::to_string(&schema).unwrap();
        assert!(json.contains("label"));
        assert!(json.contains("seed"));
    }
}
