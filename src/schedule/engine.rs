use rand::rngs::StdRng;
use tracing::{debug, info, warn};

use super::pool::WorkerPool;
use super::random::{create_rng, RandomSource};
use super::types::{ScheduleState, SlotEntry, SlotKey};
use crate::config::SchedulerConfig;

/// State owned by a single generation run
struct RunContext<'a, R: RandomSource> {
    pool: &'a mut WorkerPool,
    rng: &'a mut R,
    schedule: ScheduleState,
    min_staff: usize,
}

impl<R: RandomSource> RunContext<'_, R> {
    /// Fills one slot through the preference, random, supervisor and unfilled tiers
    fn fill_slot(&mut self, key: SlotKey) {
        let day = key.day;
        let mut count = 0;

        // Tier 1: preferring workers in pool order
        for index in 0..self.pool.len() {
            if count == self.min_staff {
                break;
            }
            let worker = self.pool.worker(index);
            if worker.prefers_shift(day, key.shift) && self.pool.is_eligible(worker, day) {
                let identity = self.pool.assign(index, day);
                debug!(slot = %key, worker = %identity, "Assigned by preference");
                self.schedule.push(key, SlotEntry::Worker(identity));
                count += 1;
            }
        }

        while count < self.min_staff {
            // Tier 2: random eligible worker
            let mut candidates = self.pool.eligible_indices(day);
            if !candidates.is_empty() {
                self.rng.shuffle(&mut candidates);
                let identity = self.pool.assign(candidates[0], day);
                debug!(slot = %key, worker = %identity, "Assigned at random");
                self.schedule.push(key, SlotEntry::Worker(identity));
                count += 1;
                continue;
            }

            // Tier 3: supervisor, counted like any other entry
            if self.pool.supervisor_available() {
                self.pool.assign_supervisor(day);
                warn!(slot = %key, "Supervisor covering slot");
                self.schedule.push(key, SlotEntry::Supervisor);
                count += 1;
                continue;
            }

            // Tier 4: nothing left, stop trying this slot
            warn!(slot = %key, assigned = count, "Slot left unfilled");
            self.schedule.push(key, SlotEntry::Unfilled);
            break;
        }
    }
}

/// Runs the weekly assignment pass over a worker pool
pub struct AssignmentEngine<R: RandomSource = StdRng> {
    rng: R,
    min_staff: usize,
}

impl AssignmentEngine<StdRng> {
    /// Engine seeded from `config.seed`, or from entropy when unset
    pub fn from_config(config: &SchedulerConfig) -> Self {
        Self::new(create_rng(config.seed), config.min_staff)
    }
}

impl<R: RandomSource> AssignmentEngine<R> {
    pub fn new(rng: R, min_staff: usize) -> Self {
        Self { rng, min_staff }
    }

    pub fn min_staff(&self) -> usize {
        self.min_staff
    }

    /// Resets the pool and fills every slot of the week in traversal order
    pub fn generate(&mut self, pool: &mut WorkerPool) -> ScheduleState {
        pool.reset_assignments();

        let mut ctx = RunContext {
            pool,
            rng: &mut self.rng,
            schedule: ScheduleState::new(),
            min_staff: self.min_staff,
        };
        for key in SlotKey::all() {
            ctx.fill_slot(key);
        }

        let schedule = ctx.schedule;
        info!(
            workers = ctx.pool.len(),
            supervisor_days = ctx.pool.supervisor().assigned_days.len(),
            supervisor_only = schedule.supervisor_only_slots().len(),
            unfilled = schedule.unfilled_slots().len(),
            "Schedule generated"
        );
        schedule
    }
}
