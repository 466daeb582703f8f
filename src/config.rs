//! Planner tuning knobs.
//!
//! Stored as a plain JSON object on disk, every field optional:
//! ```json
//! {
//!   "capacity": 4,
//!   "window_minutes": 30,
//!   "overlap_minutes": 120
//! }
//! ```

use anyhow::{Context, Result, ensure};
use chrono::TimeDelta;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlannerConfig {
    /// Seats per vehicle; also the largest group a single driver takes.
    pub capacity: usize,
    /// How far after a group's anchor another guest may still join it.
    pub window_minutes: i64,
    /// Same-day arrival/departure gap at or below which pickup and dropoff
    /// runs need their own drivers.
    pub overlap_minutes: i64,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            capacity: 4,
            window_minutes: 30,
            overlap_minutes: 120,
        }
    }
}

impl PlannerConfig {
    /// Loads and validates the config from a JSON file at `path`.
    pub fn load(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("reading planner config '{path}'"))?;
        let config: Self = serde_json::from_str(&content)
            .with_context(|| format!("parsing planner config '{path}'"))?;
        config.validate()?;
        Ok(config)
    }

    /// Applies command-line overrides on top of the loaded values.
    pub fn with_overrides(
        mut self,
        capacity: Option<usize>,
        window_minutes: Option<i64>,
        overlap_minutes: Option<i64>,
    ) -> Self {
        if let Some(capacity) = capacity {
            self.capacity = capacity;
        }
        if let Some(window_minutes) = window_minutes {
            self.window_minutes = window_minutes;
        }
        if let Some(overlap_minutes) = overlap_minutes {
            self.overlap_minutes = overlap_minutes;
        }
        self
    }

    pub fn validate(&self) -> Result<()> {
        ensure!(self.capacity > 0, "capacity must be at least 1");
        ensure!(
            self.window_minutes > 0,
            "window_minutes must be positive, got {}",
            self.window_minutes
        );
        ensure!(
            self.overlap_minutes >= 0,
            "overlap_minutes must not be negative, got {}",
            self.overlap_minutes
        );
        ensure!(
            TimeDelta::try_minutes(self.window_minutes).is_some(),
            "window_minutes is out of range, got {}",
            self.window_minutes
        );
        ensure!(
            TimeDelta::try_minutes(self.overlap_minutes).is_some(),
            "overlap_minutes is out of range, got {}",
            self.overlap_minutes
        );
        Ok(())
    }

    /// Saturates at [`TimeDelta::MAX`] for values `validate` rejects.
    pub fn window(&self) -> TimeDelta {
        TimeDelta::try_minutes(self.window_minutes).unwrap_or(TimeDelta::MAX)
    }

    pub fn overlap_gap(&self) -> TimeDelta {
        TimeDelta::try_minutes(self.overlap_minutes).unwrap_or(TimeDelta::MAX)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::fs;

    fn temp_path(name: &str) -> String {
        format!("{}/{}", env::temp_dir().display(), name)
    }

    #[test]
    fn test_defaults() {
        let config = PlannerConfig::default();
        assert_eq!(config.capacity, 4);
        assert_eq!(config.window(), TimeDelta::minutes(30));
        assert_eq!(config.overlap_gap(), TimeDelta::hours(2));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_load_fills_missing_fields() {
        let path = temp_path("shuttle_planner_test_config.json");
        fs::write(&path, r#"{ "capacity": 6 }"#).unwrap();

        let config = PlannerConfig::load(&path).unwrap();
        assert_eq!(config.capacity, 6);
        assert_eq!(config.window_minutes, 30);
        assert_eq!(config.overlap_minutes, 120);

        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_load_rejects_invalid_values() {
        let path = temp_path("shuttle_planner_test_bad_config.json");
        fs::write(&path, r#"{ "capacity": 0 }"#).unwrap();

        assert!(PlannerConfig::load(&path).is_err());

        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_load_missing_file() {
        assert!(PlannerConfig::load("/nonexistent/planner.json").is_err());
    }

    #[test]
    fn test_overrides() {
        let config = PlannerConfig::default().with_overrides(Some(8), None, Some(60));
        assert_eq!(config.capacity, 8);
        assert_eq!(config.window_minutes, 30);
        assert_eq!(config.overlap_minutes, 60);
    }

    #[test]
    fn test_validate_window() {
        let config = PlannerConfig::default().with_overrides(None, Some(0), None);
        assert!(config.validate().is_err());
        let config = PlannerConfig::default().with_overrides(None, None, Some(-5));
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_out_of_range_minutes() {
        let config = PlannerConfig::default().with_overrides(None, Some(i64::MAX), None);
        assert!(config.validate().is_err());
        assert_eq!(config.window(), TimeDelta::MAX);

        let config = PlannerConfig::default().with_overrides(None, None, Some(i64::MAX));
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_load_rejects_out_of_range_window() {
        let path = temp_path("shuttle_planner_test_huge_window.json");
        fs::write(&path, r#"{ "window_minutes": 9223372036854775807 }"#).unwrap();

        assert!(PlannerConfig::load(&path).is_err());

        fs::remove_file(&path).unwrap();
    }
}
