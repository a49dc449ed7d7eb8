//! Topo Archive
//!
//! Portable save/restore of quadrant tables: a ZIP container of
//! semicolon-delimited tables, one entry per non-empty quadrant.
//!
//! # Architecture
//!
//! ```text
//! RecordStore → encode_table (per quadrant) → quadrant_<n>.csv → ZIP bytes
//! ZIP bytes → quadrant_<n>.csv → TableSchema::detect → decode_table → RecordStore::replace
//! ```
//!
//! # Example
//!
//! ```rust,ignore
//! use topo_archive::ArchiveCodec;
//!
//! let codec = ArchiveCodec::new();
//! let bytes = codec.export(&session.records)?;
//!
//! let report = codec.import(&bytes, &mut restored.records)?;
//! for warning in &report.warnings {
//!     eprintln!("{warning}");
//! }
//! ```

#![allow(missing_docs)]
#![warn(unreachable_pub)]

// Core modules
pub mod codec;
pub mod convention;
pub mod error;
pub mod schema;
pub mod table;

// Re-exports for convenience
pub use codec::{
    entry_name, export, import, legacy_entry_name, ArchiveCodec, ArchiveOptions, ImportReport,
};
pub use convention::CompletionConvention;
pub use error::{ArchiveError, ArchiveResult, ImportWarning, TableIssue};
pub use schema::TableSchema;

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
