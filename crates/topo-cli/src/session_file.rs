//! Archive-backed sessions
//!
//! Each CLI invocation owns one [`SessionState`]: records are restored from
//! an archive file (if it exists), commands mutate them, and the archive is
//! written back. Entries that could not be imported are carried over
//! unchanged on save.

use std::path::Path;
use topo_archive::{ArchiveCodec, ArchiveError, ImportReport};
use topo_model::{QuadrantId, SessionState};

/// Session errors
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    /// Archive file could not be read or written
    #[error("io error on {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// A quadrant that failed to import has new rows
    #[error("{quadrant} could not be read from {path}; use --force to replace its stored entry")]
    Unrestored { quadrant: QuadrantId, path: String },

    /// Archive could not be opened or produced
    #[error("archive {path}: {source}")]
    Archive {
        path: String,
        #[source]
        source: ArchiveError,
    },
}

impl SessionError {
    fn io(path: &Path, source: std::io::Error) -> Self {
        Self::Io {
            path: path.display().to_string(),
            source,
        }
    }

    fn archive(path: &Path, source: ArchiveError) -> Self {
        Self::Archive {
            path: path.display().to_string(),
            source,
        }
    }
}

/// Session restored from disk
#[derive(Debug)]
pub struct LoadedSession {
    /// Records and goals
    pub state: SessionState,
    /// Import outcome; `None` when the archive did not exist yet
    pub report: Option<ImportReport>,
    previous: Option<Vec<u8>>,
}

impl LoadedSession {
    /// Quadrants whose archived entry was rejected on open
    #[must_use]
    pub fn unrestored(&self) -> Vec<QuadrantId> {
        self.report
            .as_ref()
            .map(|r| r.warnings.iter().map(|w| w.quadrant).collect())
            .unwrap_or_default()
    }

    /// Write the session back to `path`
    ///
    /// Rejected entries are copied over from the archive read on open.
    /// With `force` they are dropped instead and the quadrant is written
    /// from the session like any other.
    ///
    /// # Errors
    /// [`SessionError::Unrestored`] if a rejected quadrant gained rows and
    /// `force` is not set; otherwise as [`save`].
    pub fn save(&self, path: &Path, codec: &ArchiveCodec, force: bool) -> Result<(), SessionError> {
        let retain = if force { Vec::new() } else { self.unrestored() };
        let records = &self.state.records;

        if let Some(quadrant) = retain.iter().copied().find(|q| !records.is_empty(*q)) {
            return Err(SessionError::Unrestored {
                quadrant,
                path: path.display().to_string(),
            });
        }

        let bytes = match &self.previous {
            Some(previous) if !retain.is_empty() => {
                codec.export_retaining(records, previous, &retain)
            }
            _ => codec.export(records),
        }
        .map_err(|e| SessionError::archive(path, e))?;
        write_archive(path, &bytes)
    }
}

/// Open the session stored at `path`
///
/// A missing file yields an empty session. An unreadable container is an
/// error; unreadable entries are reported as warnings and skipped.
///
/// # Errors
/// [`SessionError::Io`] reading the file, [`SessionError::Archive`] for a
/// corrupt container.
pub fn open(path: &Path, codec: &ArchiveCodec, mut state: SessionState) -> Result<LoadedSession, SessionError> {
    if !path.exists() {
        tracing::info!(path = %path.display(), "archive not found, starting empty session");
        return Ok(LoadedSession {
            state,
            report: None,
            previous: None,
        });
    }

    let bytes = std::fs::read(path).map_err(|e| SessionError::io(path, e))?;
    let report = codec
        .import(&bytes, &mut state.records)
        .map_err(|e| SessionError::archive(path, e))?;

    Ok(LoadedSession {
        state,
        report: Some(report),
        previous: Some(bytes),
    })
}

/// Write the session's records to `path`
///
/// # Errors
/// [`SessionError::Archive`] if encoding fails, [`SessionError::Io`] writing.
pub fn save(path: &Path, codec: &ArchiveCodec, state: &SessionState) -> Result<(), SessionError> {
    let bytes = codec
        .export(&state.records)
        .map_err(|e| SessionError::archive(path, e))?;
    write_archive(path, &bytes)
}

fn write_archive(path: &Path, bytes: &[u8]) -> Result<(), SessionError> {
    std::fs::write(path, bytes).map_err(|e| SessionError::io(path, e))?;
    tracing::debug!(path = %path.display(), bytes = bytes.len(), "archive saved");
    Ok(())
}
