//! Scheduler settings loaded from an optional TOML file.
//!
//! Keys missing from the file take the defaults of the weekly policy:
//! two people per shift, five working days per worker, and a supervisor
//! who may step in on up to five days.

use serde::Deserialize;
use std::path::Path;

use crate::error::{Result, SchedulerError};

/// How supervisor capacity is consumed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SupervisorCapacity {
    /// Capacity counts distinct days; further slots on an already claimed
    /// day are free.
    #[default]
    DistinctDays,
    /// Every slot the supervisor covers uses one unit of capacity.
    PerAssignment,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SchedulerConfig {
    /// Target number of entries per slot.
    pub min_staff: usize,

    /// Maximum distinct days a worker may be scheduled in one week.
    pub max_days_per_worker: usize,

    /// Supervisor capacity, interpreted according to `supervisor_capacity`.
    pub supervisor_max_days: usize,

    pub supervisor_capacity: SupervisorCapacity,

    /// Name shown for supervisor entries in reports.
    pub supervisor_label: String,

    /// Fixed seed for the random fill; entropy when absent.
    pub seed: Option<u64>,

    /// Password guarding the upload and generate endpoints.
    pub admin_password: Option<String>,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            min_staff: 2,
            max_days_per_worker: 5,
            supervisor_max_days: 5,
            supervisor_capacity: SupervisorCapacity::DistinctDays,
            supervisor_label: "Manager".to_string(),
            seed: None,
            admin_password: None,
        }
    }
}

impl SchedulerConfig {
    /// Loads settings from `path`, or the defaults when no path is given.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let config = match path {
            Some(path) => {
                let contents = std::fs::read_to_string(path)?;
                Self::from_toml(&contents)?
            }
            None => Self::default(),
        };
        config.validate()?;
        Ok(config)
    }

    pub fn from_toml(contents: &str) -> Result<Self> {
        let config: SchedulerConfig = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.min_staff == 0 {
            return Err(SchedulerError::Config(
                "min_staff must be at least 1".to_string(),
            ));
        }
        if self.max_days_per_worker > 7 {
            return Err(SchedulerError::Config(format!(
                "max_days_per_worker is {}, but a week has 7 days",
                self.max_days_per_worker
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = SchedulerConfig::default();
        assert_eq!(config.min_staff, 2);
        assert_eq!(config.max_days_per_worker, 5);
        assert_eq!(config.supervisor_max_days, 5);
        assert_eq!(config.supervisor_capacity, SupervisorCapacity::DistinctDays);
        assert_eq!(config.supervisor_label, "Manager");
        assert!(config.seed.is_none());
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = SchedulerConfig::from_toml(
            "seed = 7\nsupervisor_capacity = \"per_assignment\"\nsupervisor_label = \"Lead\"\n",
        )
        .unwrap();
        assert_eq!(config.seed, Some(7));
        assert_eq!(config.supervisor_capacity, SupervisorCapacity::PerAssignment);
        assert_eq!(config.supervisor_label, "Lead");
        assert_eq!(config.min_staff, 2);
    }

    #[test]
    fn test_zero_min_staff_rejected() {
        let err = SchedulerConfig::from_toml("min_staff = 0").unwrap_err();
        assert!(matches!(err, SchedulerError::Config(_)));
    }

    #[test]
    fn test_bad_toml_is_config_error() {
        let err = SchedulerConfig::from_toml("min_staff = \"two\"").unwrap_err();
        assert!(matches!(err, SchedulerError::Config(_)));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "min_staff = 3").unwrap();
        let config = SchedulerConfig::load(Some(file.path())).unwrap();
        assert_eq!(config.min_staff, 3);

        assert_eq!(SchedulerConfig::load(None).unwrap().min_staff, 2);
    }
}
