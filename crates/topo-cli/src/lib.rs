//! Topo CLI
//!
//! Hosting layer for survey progress sessions: loads goals from an optional
//! TOML config, restores records from an archive file, applies one command
//! and writes the archive back.
//!
//! ```text
//! topo --archive survey.zip add-road --quadrant 1 --label "VIAL 1" --meters 120.5
//! topo --archive survey.zip --config goals.toml summary --json
//! ```

#![allow(missing_docs)]
#![warn(unreachable_pub)]

pub mod commands;
pub mod config;
pub mod session_file;

pub use commands::{
    add_interference, add_road, set_goal, summary, CommandError, OutputFormat, TaskChecks,
};
pub use config::{parse_goal_field, ConfigError, DashboardConfig};
pub use session_file::{LoadedSession, SessionError};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
