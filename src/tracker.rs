// Copyright 2025 Cowboy AI, LLC.

//! Progress tracking over a set of reach targets
//!
//! A [`ProgressTracker`] owns the targets, the current values derived from
//! them, and a [`TrackerConfig`]. It answers "are we there yet?" and renders
//! a serializable [`ProgressReport`].

use crate::config::TrackerConfig;
use crate::errors::PropertyResult;
use crate::value::ValueType;
use crate::values::{Values, ValuesHolder};
use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::{debug, info};

/// Progress towards one reach target
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ProgressEntry {
    /// Property name
    pub property: String,
    /// Value to reach
    pub target: serde_json::Value,
    /// Tracked value, absent when nothing tracks the target
    pub current: Option<serde_json::Value>,
    /// Whether the tracked value reached the target
    pub reached: bool,
}

/// Snapshot of a tracker's progress
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ProgressReport {
    /// Tracker label
    pub label: String,
    /// Whether every target was reached
    pub complete: bool,
    /// One entry per target, in declaration order
    pub entries: Vec<ProgressEntry>,
    /// When the snapshot was taken
    pub generated_at: DateTime<Utc>,
}

impl ProgressReport {
    /// Number of targets already reached
    pub fn reached_count(&self) -> usize {
        self.entries.iter().filter(|entry| entry.reached).count()
    }

    /// Serialize the report as JSON
    pub fn to_json(&self) -> PropertyResult<String> {
        Ok(serde_json::to_string(self)?)
    }
}

/// Tracks current values against a fixed set of targets
///
/// # Examples
///
/// ```rust
/// use cim_progress::{
///     value_ops, ConstantValue, ProgressTracker, PropertyFactory, ReachValue, TrackerConfig,
///     Values, ValuesHolder,
/// };
///
/// let factory = PropertyFactory::new();
/// let online = factory.create_with_value("online", false).unwrap();
/// let users = factory.create_with_value("users", 0u32).unwrap();
///
/// let targets = Values::builder()
///     .with(ConstantValue::new(online.clone(), true))
///     .with(ReachValue::new(users.clone(), 2))
///     .build()
///     .unwrap();
/// let tracker = ProgressTracker::new(targets, TrackerConfig::new("signups")).unwrap();
///
/// for _ in 0..2 {
///     tracker
///         .optional()
///         .match_constant(&online, &true)
///         .get_current_value(&users)
///         .into_iter()
///         .for_each(value_ops::apply(value_ops::increment_u32()));
/// }
///
/// assert!(tracker.is_complete());
/// assert_eq!(tracker.report().reached_count(), 1);
/// ```
#[derive(Debug)]
pub struct ProgressTracker {
    config: TrackerConfig,
    reach: Values,
    current: Values,
    completed: AtomicBool,
}

impl ProgressTracker {
    /// Track `reach` targets, deriving current values as configured
    pub fn new(reach: Values, config: TrackerConfig) -> PropertyResult<Self> {
        config.validate()?;
        let current = reach.create_current_values_with(config.seed)?;
        debug!(
            label = %config.label,
            targets = reach.count(ValueType::Reach),
            "Created progress tracker"
        );
        Ok(Self {
            config,
            reach,
            current,
            completed: AtomicBool::new(false),
        })
    }

    /// Track `reach` targets with the default configuration
    pub fn with_defaults(reach: Values) -> PropertyResult<Self> {
        Self::new(reach, TrackerConfig::default())
    }

    /// Tracker configuration
    pub fn config(&self) -> &TrackerConfig {
        &self.config
    }

    /// The targets
    pub fn reach_values(&self) -> &Values {
        &self.reach
    }

    /// The tracked values
    pub fn current_values(&self) -> &Values {
        &self.current
    }

    /// Whether every target has been reached
    pub fn is_complete(&self) -> bool {
        let complete = self.current.is_complete(&self.reach);
        if complete && !self.completed.swap(true, Ordering::Relaxed) {
            info!(label = %self.config.label, "All targets reached");
        }
        complete
    }

    /// Names of the targets not reached yet
    pub fn missing_targets(&self) -> Vec<&str> {
        self.current.missing_targets(&self.reach)
    }

    /// Snapshot the progress of every target
    pub fn report(&self) -> ProgressReport {
        let entries: Vec<ProgressEntry> = self
            .reach
            .iter_kind(ValueType::Reach)
            .map(|target| {
                let current = self.current.current_for(target);
                ProgressEntry {
                    property: target.property_name().to_string(),
                    target: target.to_json(),
                    current: current.map(|value| value.to_json()),
                    reached: current.is_some_and(|value| target.is_reached_by(value)),
                }
            })
            .collect();

        ProgressReport {
            label: self.config.label.clone(),
            complete: entries.iter().all(|entry| entry.reached),
            entries,
            generated_at: Utc::now(),
        }
    }
}

impl ValuesHolder for ProgressTracker {
    fn values(&self) -> &Values {
        &self.current
    }
}
