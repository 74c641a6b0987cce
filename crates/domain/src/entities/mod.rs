//! Domain entities - Core business objects

mod schedule_entry;

pub use schedule_entry::{ScheduleEntry, ScheduleEntryBuilder};
