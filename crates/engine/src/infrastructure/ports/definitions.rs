//! Definition source port.
//!
//! The engine's only contract with a content format is the shape of the
//! schedules a parser returns. Any structured format can implement
//! [`DefinitionParser`].

use std::path::Path;

use whereabouts_domain::Schedule;

use super::error::{EngineError, ParseError};

/// An opaque definition blob plus a name used in diagnostics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DefinitionSource {
    pub name: String,
    pub contents: String,
}

impl DefinitionSource {
    pub fn new(name: impl Into<String>, contents: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            contents: contents.into(),
        }
    }

    /// Read a source from disk, named after its file name.
    pub fn from_path(path: &Path) -> Result<Self, EngineError> {
        let contents = std::fs::read_to_string(path).map_err(|e| EngineError::io(path, e))?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        Ok(Self::new(name, contents))
    }
}

/// Turns one definition source into the schedules it declares.
///
/// A single source may declare schedules for several characters.
#[cfg_attr(test, mockall::automock)]
pub trait DefinitionParser: Send + Sync {
    fn parse(&self, source: &DefinitionSource) -> Result<Vec<Schedule>, ParseError>;
}
