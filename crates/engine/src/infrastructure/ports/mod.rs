//! Port traits and error types for loading schedules.

mod definitions;
mod error;

pub use definitions::{DefinitionParser, DefinitionSource};
pub use error::{EngineError, ParseError};

#[cfg(test)]
pub use definitions::MockDefinitionParser;
