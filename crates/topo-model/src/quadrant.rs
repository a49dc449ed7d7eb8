//! Quadrant identifiers
//!
//! The project is split into four fixed sectors. Each sector keeps one table
//! whose row shape is decided by its [`QuadrantKind`].

use crate::error::ModelError;
use serde::{Deserialize, Serialize};
use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

/// One of the four project sectors (1-based)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct QuadrantId(u8);

impl QuadrantId {
    /// Number of quadrants in a project
    pub const COUNT: usize = 4;

    /// Quadrant 1
    pub const Q1: Self = Self(1);
    /// Quadrant 2
    pub const Q2: Self = Self(2);
    /// Quadrant 3
    pub const Q3: Self = Self(3);
    /// Quadrant 4
    pub const Q4: Self = Self(4);

    /// Create quadrant id from its 1-based number
    pub fn new(number: u8) -> Result<Self, ModelError> {
        if (1..=4).contains(&number) {
            Ok(Self(number))
        } else {
            Err(ModelError::invalid_quadrant(number.to_string()))
        }
    }

    /// All quadrants in ascending order
    #[inline]
    #[must_use]
    pub fn all() -> [Self; Self::COUNT] {
        [Self::Q1, Self::Q2, Self::Q3, Self::Q4]
    }

    /// 1-based quadrant number
    #[inline]
    #[must_use]
    pub fn number(self) -> u8 {
        self.0
    }

    /// 0-based index for array storage
    #[inline]
    #[must_use]
    pub fn index(self) -> usize {
        usize::from(self.0 - 1)
    }

    /// Row shape this quadrant holds
    ///
    /// Quadrants 1 and 4 track roads only; 2 and 3 also track interferences.
    #[inline]
    #[must_use]
    pub fn kind(self) -> QuadrantKind {
        match self.0 {
            2 | 3 => QuadrantKind::Task,
            _ => QuadrantKind::LinearAsset,
        }
    }
}

impl TryFrom<u8> for QuadrantId {
    type Error = ModelError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<QuadrantId> for u8 {
    fn from(id: QuadrantId) -> Self {
        id.0
    }
}

impl Display for QuadrantId {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "Q{}", self.0)
    }
}

impl FromStr for QuadrantId {
    type Err = ModelError;

    /// Accepts `3`, `Q3` or `q3`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let digits = trimmed
            .strip_prefix('Q')
            .or_else(|| trimmed.strip_prefix('q'))
            .unwrap_or(trimmed);
        digits
            .parse::<u8>()
            .map_err(|_| ModelError::invalid_quadrant(s))
            .and_then(Self::new)
    }
}

/// Row shape held by a quadrant table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuadrantKind {
    /// Road/drainage segments with surveyed meters
    LinearAsset,
    /// Mixed road and interference entries
    Task,
}

impl Display for QuadrantKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::LinearAsset => write!(f, "linear-asset"),
            Self::Task => write!(f, "task"),
        }
    }
}
