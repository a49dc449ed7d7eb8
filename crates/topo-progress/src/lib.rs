//! Topo Progress
//!
//! Stateless aggregation from quadrant records and goals to progress figures.
//!
//! # Core Concepts
//!
//! - [`survey_length`] / [`interference_task_count`]: Per-quadrant sums
//! - [`progress_fraction`]: Division that yields [`Progress::Undefined`] for a zero target
//! - [`quadrant_progress`] / [`project_totals`]: Figures against quadrant and overall goals
//! - [`ProgressReport`]: Serializable snapshot of everything above
//!
//! # Example
//!
//! ```rust,ignore
//! use topo_progress::{progress_fraction, survey_length};
//!
//! let meters = survey_length(&session.records, QuadrantId::Q1);
//! let progress = progress_fraction(meters, 7366.0);
//! println!("Q1: {progress}");
//! ```

#![allow(missing_docs)]
#![warn(unreachable_pub)]

mod aggregate;
mod progress;
mod report;

// Re-exports
pub use aggregate::{
    interference_task_count, project_totals, quadrant_progress, survey_length, Figure,
    ProjectTotals, QuadrantProgress, TaskFigures,
};
pub use progress::{progress_fraction, Progress};
pub use report::ProgressReport;

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
