//! Dashboard configuration file
//!
//! Optional TOML file carrying goals and archive options:
//!
//! ```toml
//! [goals.overall]
//! target_length_m = 31588
//! target_interference_count = 251
//!
//! [goals.quadrants.q2]
//! target_length_m = 13040
//! target_interference_count = 53
//!
//! [archive]
//! completion = "boolean"
//! accept_legacy_names = true
//! ```
//!
//! Missing sections fall back to the built-in defaults.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use topo_archive::ArchiveOptions;
use topo_model::{GoalConfig, GoalField, ModelError, QuadrantId};

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// IO error reading or writing the file
    #[error("io error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// File is not valid TOML for this layout
    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),

    /// Config could not be rendered as TOML
    #[error("failed to render config: {0}")]
    Render(#[from] toml::ser::Error),

    /// Goal values out of range
    #[error("invalid goals: {0}")]
    Goals(#[from] ModelError),

    /// Unknown goal name on the command line
    #[error("unknown goal '{0}' (expected overall-length, overall-interferences, qN-length or qN-interferences)")]
    UnknownGoal(String),
}

impl ConfigError {
    /// Create IO error for path
    pub fn io_error(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Settings for one dashboard session
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    /// Initial goals
    pub goals: GoalConfig,
    /// Archive codec options
    pub archive: ArchiveOptions,
}

impl DashboardConfig {
    /// Parse from TOML text and validate goals
    ///
    /// # Errors
    /// [`ConfigError::Parse`] for malformed TOML, [`ConfigError::Goals`] for
    /// negative or non-finite goals.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(text)?;
        config.goals.validate()?;
        Ok(config)
    }

    /// Load from a file
    ///
    /// # Errors
    /// See [`Self::from_toml_str`]; also IO errors reading `path`.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|e| ConfigError::io_error(path, e))?;
        let config = Self::from_toml_str(&text)?;
        tracing::debug!(path = %path.display(), "config loaded");
        Ok(config)
    }

    /// Load from `path` if given and present, defaults otherwise
    ///
    /// # Errors
    /// See [`Self::load`].
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(p) if p.exists() => Self::load(p),
            Some(p) => {
                tracing::info!(path = %p.display(), "config not found, using defaults");
                Ok(Self::default())
            }
            None => Ok(Self::default()),
        }
    }

    /// Write as TOML
    ///
    /// # Errors
    /// [`ConfigError::Render`] or IO errors writing `path`.
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let text = toml::to_string_pretty(self)?;
        std::fs::write(path, text).map_err(|e| ConfigError::io_error(path, e))
    }
}

/// Parse a goal name such as `overall-length` or `q3-interferences`
///
/// # Errors
/// [`ConfigError::UnknownGoal`] for anything else.
pub fn parse_goal_field(name: &str) -> Result<GoalField, ConfigError> {
    let unknown = || ConfigError::UnknownGoal(name.to_string());
    let lowered = name.trim().to_lowercase();

    match lowered.as_str() {
        "overall-length" => return Ok(GoalField::OverallLength),
        "overall-interferences" => return Ok(GoalField::OverallInterferences),
        _ => {}
    }

    let (quadrant, measure) = lowered.split_once('-').ok_or_else(unknown)?;
    let quadrant: QuadrantId = quadrant.parse().map_err(|_| unknown())?;
    match measure {
        "length" => Ok(GoalField::QuadrantLength(quadrant)),
        "interferences" => Ok(GoalField::QuadrantInterferences(quadrant)),
        _ => Err(unknown()),
    }
}
