pub mod config;
pub mod display;
pub mod error;
pub mod parser;
pub mod schedule;
pub mod web;

pub use config::{SchedulerConfig, SupervisorCapacity};
pub use error::{Result, SchedulerError};
