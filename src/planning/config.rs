// src/planning/config.rs

use crate::error::{Error, Result};
use serde::Deserialize;
use std::path::Path;

/// Tunable parameters of the replenishment calculation.
///
/// A TOML file may set any subset of the fields; the rest keep their defaults.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PlannerConfig {
    /// Exponential smoothing factor (0.1 = very stable, 0.9 = reactive).
    pub smoothing_alpha: f64,
    /// Z-score for the safety-stock service level (1.65 ~ 95%).
    pub service_level_z: f64,
    /// Number of trailing weeks fed to the forecaster.
    pub history_weeks: usize,
    /// Cover above this many days is flagged as excess.
    pub excess_cover_days: f64,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            smoothing_alpha: 0.3,
            service_level_z: 1.65,
            history_weeks: 8,
            excess_cover_days: 90.0,
        }
    }
}

impl PlannerConfig {
    pub fn from_toml_str(s: &str) -> Result<Self> {
        let config: Self = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let s = std::fs::read_to_string(path)?;
        Self::from_toml_str(&s)
    }

    pub fn validate(&self) -> Result<()> {
        if !(self.smoothing_alpha > 0.0 && self.smoothing_alpha <= 1.0) {
            return Err(Error::Config(format!(
                "smoothing_alpha must be in (0, 1], got {}",
                self.smoothing_alpha
            )));
        }
        if self.history_weeks == 0 {
            return Err(Error::Config("history_weeks must be at least 1".into()));
        }
        if !(self.service_level_z >= 0.0) {
            return Err(Error::Config(format!(
                "service_level_z must be non-negative, got {}",
                self.service_level_z
            )));
        }
        if !(self.excess_cover_days >= 0.0) {
            return Err(Error::Config(format!(
                "excess_cover_days must be non-negative, got {}",
                self.excess_cover_days
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_yields_defaults() {
        let config = PlannerConfig::from_toml_str("").unwrap();
        assert_eq!(config, PlannerConfig::default());
        assert_eq!(config.smoothing_alpha, 0.3);
        assert_eq!(config.service_level_z, 1.65);
        assert_eq!(config.history_weeks, 8);
    }

    #[test]
    fn partial_file_overrides_only_given_fields() {
        let config = PlannerConfig::from_toml_str("service_level_z = 2.33\n").unwrap();
        assert_eq!(config.service_level_z, 2.33);
        assert_eq!(config.smoothing_alpha, 0.3);
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let err = PlannerConfig::from_toml_str("alpha = 0.5\n").unwrap_err();
        assert!(matches!(err, Error::ConfigParse(_)));
    }

    #[test]
    fn out_of_range_alpha_is_rejected() {
        let err = PlannerConfig::from_toml_str("smoothing_alpha = 1.5\n").unwrap_err();
        assert!(matches!(err, Error::Config(_)));

        let err = PlannerConfig::from_toml_str("history_weeks = 0\n").unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn loads_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("planner.toml");
        std::fs::write(&path, "excess_cover_days = 60.0\n").unwrap();

        let config = PlannerConfig::load(&path).unwrap();
        assert_eq!(config.excess_cover_days, 60.0);
    }
}
