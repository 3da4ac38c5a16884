pub mod types;
pub mod pool;
pub mod random;
pub mod engine;
pub mod report;

pub use types::{Day, ShiftType, SlotKey, SlotEntry, ScheduleState};
pub use pool::{PoolLimits, Worker, WorkerPool};
pub use random::{create_rng, RandomSource};
pub use engine::AssignmentEngine;
pub use report::ScheduleReport;
