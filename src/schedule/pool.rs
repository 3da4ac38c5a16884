use std::collections::{BTreeMap, BTreeSet};

use super::types::{Day, ShiftType};
use crate::config::{SchedulerConfig, SupervisorCapacity};

/// A worker with ranked per-day preferences and the days assigned in the current run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Worker {
    pub identity: String,
    /// Shifts per day, most preferred first
    pub preferences: BTreeMap<Day, Vec<ShiftType>>,
    pub assigned_days: BTreeSet<Day>,
}

impl Worker {
    pub fn new(identity: impl Into<String>) -> Self {
        Self {
            identity: identity.into(),
            preferences: BTreeMap::new(),
            assigned_days: BTreeSet::new(),
        }
    }

    /// Adds the ranked shifts for one day
    pub fn with_preferences(mut self, day: Day, shifts: &[ShiftType]) -> Self {
        self.preferences.insert(day, shifts.to_vec());
        self
    }

    /// Membership only; rank does not matter here
    pub fn prefers_shift(&self, day: Day, shift: ShiftType) -> bool {
        self.preferences
            .get(&day)
            .is_some_and(|shifts| shifts.contains(&shift))
    }
}

/// Fallback staffing source consulted when no worker is eligible
#[derive(Debug, Clone, Default)]
pub struct Supervisor {
    pub assigned_days: BTreeSet<Day>,
    pub assignments: usize,
}

/// Caps applied to workers and the supervisor during a run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PoolLimits {
    pub max_days_per_worker: usize,
    pub supervisor_max_days: usize,
    pub supervisor_capacity: SupervisorCapacity,
}

impl Default for PoolLimits {
    fn default() -> Self {
        Self::from(&SchedulerConfig::default())
    }
}

impl From<&SchedulerConfig> for PoolLimits {
    fn from(config: &SchedulerConfig) -> Self {
        Self {
            max_days_per_worker: config.max_days_per_worker,
            supervisor_max_days: config.supervisor_max_days,
            supervisor_capacity: config.supervisor_capacity,
        }
    }
}

/// Workers in input order plus the supervisor
#[derive(Debug, Clone, Default)]
pub struct WorkerPool {
    workers: Vec<Worker>,
    supervisor: Supervisor,
    limits: PoolLimits,
}

impl WorkerPool {
    pub fn new(workers: Vec<Worker>) -> Self {
        Self::with_limits(workers, PoolLimits::default())
    }

    pub fn with_limits(workers: Vec<Worker>, limits: PoolLimits) -> Self {
        Self {
            workers,
            supervisor: Supervisor::default(),
            limits,
        }
    }

    pub fn workers(&self) -> &[Worker] {
        &self.workers
    }

    pub fn supervisor(&self) -> &Supervisor {
        &self.supervisor
    }

    pub fn limits(&self) -> PoolLimits {
        self.limits
    }

    pub fn len(&self) -> usize {
        self.workers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.workers.is_empty()
    }

    /// Clears every worker's and the supervisor's assigned days
    pub fn reset_assignments(&mut self) {
        for worker in &mut self.workers {
            worker.assigned_days.clear();
        }
        self.supervisor = Supervisor::default();
    }

    pub fn is_eligible(&self, worker: &Worker, day: Day) -> bool {
        worker.assigned_days.len() < self.limits.max_days_per_worker
            && !worker.assigned_days.contains(&day)
    }

    /// Indices of workers that can still take a shift on `day`, in pool order
    pub fn eligible_indices(&self, day: Day) -> Vec<usize> {
        self.workers
            .iter()
            .enumerate()
            .filter(|(_, worker)| self.is_eligible(worker, day))
            .map(|(index, _)| index)
            .collect()
    }

    pub(crate) fn worker(&self, index: usize) -> &Worker {
        &self.workers[index]
    }

    /// Marks `day` as worked and returns the identity to record
    pub(crate) fn assign(&mut self, index: usize, day: Day) -> String {
        let worker = &mut self.workers[index];
        worker.assigned_days.insert(day);
        worker.identity.clone()
    }

    pub fn supervisor_available(&self) -> bool {
        match self.limits.supervisor_capacity {
            SupervisorCapacity::DistinctDays => {
                self.supervisor.assigned_days.len() < self.limits.supervisor_max_days
            }
            SupervisorCapacity::PerAssignment => {
                self.supervisor.assignments < self.limits.supervisor_max_days
            }
        }
    }

    pub(crate) fn assign_supervisor(&mut self, day: Day) {
        self.supervisor.assigned_days.insert(day);
        self.supervisor.assignments += 1;
    }
}
