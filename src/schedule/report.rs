use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::types::{ScheduleState, SlotKey};

/// A finished schedule together with its staffing warnings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleReport {
    pub generated_at: DateTime<Utc>,
    pub seed: Option<u64>,
    pub schedule: ScheduleState,
    /// Slots covered by the supervisor alone
    pub supervisor_only: Vec<SlotKey>,
    /// Slots with the unfilled marker
    pub unfilled: Vec<SlotKey>,
}

impl ScheduleReport {
    pub fn new(schedule: ScheduleState, seed: Option<u64>) -> Self {
        Self {
            generated_at: Utc::now(),
            seed,
            supervisor_only: schedule.supervisor_only_slots(),
            unfilled: schedule.unfilled_slots(),
            schedule,
        }
    }

    pub fn has_warnings(&self) -> bool {
        !self.supervisor_only.is_empty() || !self.unfilled.is_empty()
    }
}
