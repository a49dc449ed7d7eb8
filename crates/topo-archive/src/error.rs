//! Error types for the archive codec
//!
//! Two levels exist:
//! - [`ArchiveError`]: the whole operation failed and no state was changed
//! - [`ImportWarning`]: one quadrant was skipped, the rest of the import went on

use topo_model::QuadrantId;

/// Fatal archive errors
#[derive(Debug, thiserror::Error)]
pub enum ArchiveError {
    /// Bytes are not a readable ZIP container
    #[error("not a valid archive: {0}")]
    InvalidContainer(#[source] zip::result::ZipError),

    /// Writing the container failed
    #[error("failed to write archive entry {entry}: {source}")]
    Write {
        entry: String,
        #[source]
        source: zip::result::ZipError,
    },

    /// Encoding a table failed
    #[error("failed to encode {entry}: {source}")]
    Encode {
        entry: String,
        #[source]
        source: csv::Error,
    },

    /// A quadrant to carry over from the previous archive also has new rows
    #[error("{quadrant} has new rows but its archived entry could not be imported")]
    RetainConflict { quadrant: QuadrantId },

    /// IO error while building the archive in memory
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl ArchiveError {
    /// Create write error for an entry
    pub fn write(entry: impl Into<String>, source: zip::result::ZipError) -> Self {
        Self::Write {
            entry: entry.into(),
            source,
        }
    }

    /// Create encode error for an entry
    pub fn encode(entry: impl Into<String>, source: csv::Error) -> Self {
        Self::Encode {
            entry: entry.into(),
            source,
        }
    }
}

/// Result type alias for archive operations
pub type ArchiveResult<T> = Result<T, ArchiveError>;

/// Why a quadrant entry was not restored
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TableIssue {
    /// Header has a different number of columns than any known layout
    #[error("expected {expected:?} columns, found {found}")]
    ColumnCount { expected: Vec<usize>, found: usize },

    /// Header has a known width but unrecognized names
    #[error("unrecognized header: {}", .found.join(";"))]
    UnknownHeader { found: Vec<String> },

    /// A data row is wider than the header
    #[error("line {line} has {found} fields, header has {expected}")]
    RowTooWide { line: u64, found: usize, expected: usize },

    /// Entry bytes could not be read or parsed
    #[error("unreadable entry: {0}")]
    Unreadable(String),
}

/// Recoverable problem with one quadrant during import
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{quadrant} kept previous data ({entry}: {issue})")]
pub struct ImportWarning {
    /// Quadrant left at its previous contents
    pub quadrant: QuadrantId,
    /// Archive entry that was rejected
    pub entry: String,
    /// What was wrong with it
    pub issue: TableIssue,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_container_display() {
        let err = ArchiveError::InvalidContainer(zip::result::ZipError::InvalidArchive(
            "no central directory".into(),
        ));
        assert!(err.to_string().starts_with("not a valid archive"));
    }

    #[test]
    fn warning_display() {
        let warning = ImportWarning {
            quadrant: QuadrantId::Q2,
            entry: "quadrant_2.csv".into(),
            issue: TableIssue::ColumnCount {
                expected: vec![6, 4],
                found: 3,
            },
        };
        assert_eq!(
            warning.to_string(),
            "Q2 kept previous data (quadrant_2.csv: expected [6, 4] columns, found 3)"
        );
    }

    #[test]
    fn row_too_wide_display() {
        let issue = TableIssue::RowTooWide {
            line: 4,
            found: 3,
            expected: 2,
        };
        assert_eq!(issue.to_string(), "line 4 has 3 fields, header has 2");
    }
}
