//! Normalized per-year weight schedules for deployment and realization

mod deployment;
mod realization;

pub use deployment::deployment_schedule;
pub use realization::realization_schedule;
