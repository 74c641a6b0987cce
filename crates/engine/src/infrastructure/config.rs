//! Engine configuration

use std::env;
use std::path::PathBuf;

use anyhow::{ensure, Result};

use super::flags::FlagConditions;

/// Engine configuration loaded from environment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    /// Directory holding schedule definition files
    pub schedule_dir: PathBuf,
    /// File extension of definition files, without the leading dot
    pub schedule_extension: String,
    /// Flags raised at startup; `None` means no condition evaluator
    pub flags: Option<Vec<String>>,
}

impl EngineConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let schedule_extension = lookup("SCHEDULE_EXTENSION")
            .unwrap_or_else(|| "json".to_string())
            .trim()
            .trim_start_matches('.')
            .to_string();
        ensure!(
            !schedule_extension.is_empty(),
            "SCHEDULE_EXTENSION must name a file extension"
        );

        Ok(Self {
            schedule_dir: lookup("SCHEDULE_DIR")
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .unwrap_or_else(|| "./schedules".to_string())
                .into(),
            schedule_extension,
            flags: lookup("SCHEDULE_FLAGS").map(|raw| {
                raw.split(',')
                    .map(|s| s.trim().to_string())
                    .filter(|s| !s.is_empty())
                    .collect()
            }),
        })
    }

    /// The evaluator to install, if flags were configured.
    pub fn flag_conditions(&self) -> Option<FlagConditions> {
        self.flags
            .as_ref()
            .map(|flags| FlagConditions::with_flags(flags.iter().cloned()))
    }
}
