//! Topo Model
//!
//! In-memory data model for tracking topographic survey progress across the
//! four quadrants of a construction site.
//!
//! # Core Concepts
//!
//! - [`QuadrantId`]: One of the four fixed project sectors
//! - [`LinearAssetRow`] / [`TaskRow`]: The two record shapes a quadrant table holds
//! - [`CompletionMark`]: Tagged completion value for interference sub-tasks
//! - [`RecordStore`]: One insertion-ordered table per quadrant
//! - [`GoalConfig`]: Independently editable overall and per-quadrant targets
//! - [`SessionState`]: Owned pairing of records and goals for one user session
//!
//! # Example
//!
//! ```rust,ignore
//! use topo_model::{LinearAssetRow, QuadrantId, SessionState};
//!
//! let mut session = SessionState::new();
//! session.records.append(QuadrantId::Q1, LinearAssetRow::new("VIAL 1", 120.5).into());
//! assert_eq!(session.records.len(QuadrantId::Q1), 1);
//! ```

#![warn(unreachable_pub)]
#![allow(missing_docs)]

// Core modules
mod error;
mod goals;
mod numeric;
mod quadrant;
mod record;
mod session;
mod store;

// Re-exports
pub use error::{ModelError, ModelResult};
pub use goals::{GoalConfig, GoalField, GoalPair, QuadrantGoals};
pub use numeric::{coerce_number, non_negative};
pub use quadrant::{QuadrantId, QuadrantKind};
pub use record::{
    Category, CompletionMark, InterferenceTask, LinearAssetRow, QuadrantRow, QuadrantTable,
    TaskRow,
};
pub use session::SessionState;
pub use store::RecordStore;

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
