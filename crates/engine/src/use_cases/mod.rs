//! Use cases - Orchestration over the schedule domain.

pub mod schedule_manager;

pub use schedule_manager::ScheduleManager;
