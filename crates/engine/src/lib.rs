//! Whereabouts engine library.
//!
//! Loads NPC schedule definitions and answers where each character should
//! be at a given time of the simulated week.
//!
//! ## Structure
//!
//! - `infrastructure/` - Definition parser port, JSON parser, source
//!   discovery, flag conditions and configuration
//! - `use_cases/` - `ScheduleManager`, the two-phase load/query orchestrator

pub mod infrastructure;
pub mod use_cases;

pub use infrastructure::config::EngineConfig;
pub use infrastructure::flags::FlagConditions;
pub use infrastructure::json_definitions::JsonDefinitionParser;
pub use infrastructure::ports::{DefinitionParser, DefinitionSource, EngineError, ParseError};
pub use use_cases::ScheduleManager;
