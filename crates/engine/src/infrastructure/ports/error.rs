//! Error types for loading and orchestration.

use std::path::PathBuf;

use whereabouts_domain::DomainError;

/// A definition source could not be turned into schedules.
///
/// Non-fatal: `ScheduleManager::load_all` collects these and keeps loading
/// the remaining sources.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error(
    "{source_name}{}: {message}",
    .location.as_deref().map(|l| format!(" at {l}")).unwrap_or_default()
)]
pub struct ParseError {
    /// Name of the source (usually its file name).
    pub source_name: String,
    /// Path to the malformed rule, e.g. `schedules[0].entries[2]`.
    pub location: Option<String>,
    pub message: String,
}

impl ParseError {
    pub fn new(source_name: impl Into<String>, message: impl ToString) -> Self {
        Self {
            source_name: source_name.into(),
            location: None,
            message: message.to_string(),
        }
    }

    pub fn at(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    /// Downgrade a construction-time validation failure for one rule.
    pub fn from_domain(
        source_name: impl Into<String>,
        location: impl Into<String>,
        error: &DomainError,
    ) -> Self {
        Self::new(source_name, error).at(location)
    }
}

/// Engine-level failures that abort the operation.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// Reading schedule definitions from disk failed.
    #[error("IO error reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// `load_all` was called after the first query.
    #[error("Schedule loading is closed: queries have already been answered")]
    LoadingClosed,

    #[error("Domain error: {0}")]
    Domain(#[from] DomainError),
}

impl EngineError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
