//! Definition source discovery on disk.
//!
//! Files are returned sorted by file name so that registration order, and
//! with it override priority, is deterministic across platforms.

use std::path::{Path, PathBuf};

use super::ports::{DefinitionSource, EngineError, ParseError};

/// Files read successfully plus per-file failures.
#[derive(Debug, Default)]
pub struct DiscoveredSources {
    pub sources: Vec<DefinitionSource>,
    pub failures: Vec<ParseError>,
}

/// Every regular file in `dir` with the given extension, sorted by name.
fn definition_paths(dir: &Path, extension: &str) -> Result<Vec<PathBuf>, EngineError> {
    let entries = std::fs::read_dir(dir).map_err(|e| EngineError::io(dir, e))?;

    let mut paths = Vec::new();
    for entry in entries {
        let path = entry.map_err(|e| EngineError::io(dir, e))?.path();
        let matches_extension = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case(extension));
        if path.is_file() && matches_extension {
            paths.push(path);
        }
    }
    paths.sort();
    Ok(paths)
}

/// Read every definition file in `dir`, failing on the first unreadable one.
pub fn read_sources(dir: &Path, extension: &str) -> Result<Vec<DefinitionSource>, EngineError> {
    definition_paths(dir, extension)?
        .iter()
        .map(|path| DefinitionSource::from_path(path))
        .collect()
}

/// Read every definition file in `dir`; an unreadable file becomes a
/// [`ParseError`] for that file instead of aborting discovery.
///
/// Only a missing or unreadable directory is fatal.
pub fn read_sources_lenient(dir: &Path, extension: &str) -> Result<DiscoveredSources, EngineError> {
    let mut discovered = DiscoveredSources::default();
    for path in definition_paths(dir, extension)? {
        match DefinitionSource::from_path(&path) {
            Ok(source) => discovered.sources.push(source),
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "Skipping unreadable schedule file");
                let name = path
                    .file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or_else(|| path.display().to_string());
                discovered.failures.push(ParseError::new(name, e));
            }
        }
    }
    Ok(discovered)
}
