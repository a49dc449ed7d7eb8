//! Survey targets
//!
//! Goals are plain mutable numbers. The per-quadrant pairs and the overall
//! pair are edited independently and never reconciled with each other.

use crate::error::{ModelError, ModelResult};
use crate::quadrant::QuadrantId;
use serde::{Deserialize, Serialize};
use std::fmt::{self, Display, Formatter};

/// Target pair: surveyed meters and interference count
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GoalPair {
    /// Meters of road/drainage to survey
    pub target_length_m: f64,
    /// Interferences to process
    pub target_interference_count: f64,
}

impl GoalPair {
    /// Create goal pair
    #[inline]
    #[must_use]
    pub fn new(target_length_m: f64, target_interference_count: f64) -> Self {
        Self {
            target_length_m,
            target_interference_count,
        }
    }
}

/// Per-quadrant goal pairs
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QuadrantGoals {
    pub q1: GoalPair,
    pub q2: GoalPair,
    pub q3: GoalPair,
    pub q4: GoalPair,
}

impl Default for QuadrantGoals {
    fn default() -> Self {
        Self {
            q1: GoalPair::new(7366.0, 0.0),
            q2: GoalPair::new(13040.0, 53.0),
            q3: GoalPair::new(0.0, 111.0),
            q4: GoalPair::new(11182.0, 0.0),
        }
    }
}

impl QuadrantGoals {
    /// Goal pair for a quadrant
    #[inline]
    #[must_use]
    pub fn get(&self, quadrant: QuadrantId) -> &GoalPair {
        match quadrant.number() {
            1 => &self.q1,
            2 => &self.q2,
            3 => &self.q3,
            _ => &self.q4,
        }
    }

    /// Mutable goal pair for a quadrant
    #[inline]
    pub fn get_mut(&mut self, quadrant: QuadrantId) -> &mut GoalPair {
        match quadrant.number() {
            1 => &mut self.q1,
            2 => &mut self.q2,
            3 => &mut self.q3,
            _ => &mut self.q4,
        }
    }
}

/// Addressable goal value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GoalField {
    /// Project-wide surveyed meters
    OverallLength,
    /// Project-wide interference count
    OverallInterferences,
    /// Surveyed meters for one quadrant
    QuadrantLength(QuadrantId),
    /// Interference count for one quadrant
    QuadrantInterferences(QuadrantId),
}

impl Display for GoalField {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::OverallLength => write!(f, "overall length"),
            Self::OverallInterferences => write!(f, "overall interferences"),
            Self::QuadrantLength(q) => write!(f, "{q} length"),
            Self::QuadrantInterferences(q) => write!(f, "{q} interferences"),
        }
    }
}

/// Overall and per-quadrant targets
///
/// Defaults carry the project's initial figures: 31588 m and 251
/// interferences overall. The quadrant splits are not required to add up.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GoalConfig {
    /// Project-wide targets
    pub overall: GoalPair,
    /// Per-quadrant targets
    pub quadrants: QuadrantGoals,
}

impl Default for GoalConfig {
    fn default() -> Self {
        Self {
            overall: GoalPair::new(31588.0, 251.0),
            quadrants: QuadrantGoals::default(),
        }
    }
}

impl GoalConfig {
    /// Create goals with the project defaults
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// With overall targets
    #[inline]
    #[must_use]
    pub fn with_overall(mut self, overall: GoalPair) -> Self {
        self.overall = overall;
        self
    }

    /// With targets for one quadrant
    #[inline]
    #[must_use]
    pub fn with_quadrant(mut self, quadrant: QuadrantId, pair: GoalPair) -> Self {
        *self.quadrants.get_mut(quadrant) = pair;
        self
    }

    /// Targets for one quadrant
    #[inline]
    #[must_use]
    pub fn quadrant(&self, quadrant: QuadrantId) -> &GoalPair {
        self.quadrants.get(quadrant)
    }

    /// Current value of a goal
    #[must_use]
    pub fn get(&self, field: GoalField) -> f64 {
        match field {
            GoalField::OverallLength => self.overall.target_length_m,
            GoalField::OverallInterferences => self.overall.target_interference_count,
            GoalField::QuadrantLength(q) => self.quadrant(q).target_length_m,
            GoalField::QuadrantInterferences(q) => self.quadrant(q).target_interference_count,
        }
    }

    /// Edit a goal
    ///
    /// # Errors
    /// [`ModelError::InvalidGoal`] if `value` is negative or not finite; the
    /// previous value is kept.
    pub fn set(&mut self, field: GoalField, value: f64) -> ModelResult<()> {
        if !value.is_finite() || value < 0.0 {
            return Err(ModelError::InvalidGoal { field, value });
        }

        let slot = match field {
            GoalField::OverallLength => &mut self.overall.target_length_m,
            GoalField::OverallInterferences => &mut self.overall.target_interference_count,
            GoalField::QuadrantLength(q) => &mut self.quadrants.get_mut(q).target_length_m,
            GoalField::QuadrantInterferences(q) => {
                &mut self.quadrants.get_mut(q).target_interference_count
            }
        };
        *slot = value;
        tracing::debug!(%field, value, "goal updated");
        Ok(())
    }

    /// All addressable goal fields
    #[must_use]
    pub fn fields() -> Vec<GoalField> {
        let mut fields = vec![GoalField::OverallLength, GoalField::OverallInterferences];
        for q in QuadrantId::all() {
            fields.push(GoalField::QuadrantLength(q));
            fields.push(GoalField::QuadrantInterferences(q));
        }
        fields
    }

    /// Check every value is finite and non-negative
    ///
    /// Used after deserializing goals from an external source.
    ///
    /// # Errors
    /// [`ModelError::InvalidGoal`] naming the first offending field.
    pub fn validate(&self) -> ModelResult<()> {
        for field in Self::fields() {
            let value = self.get(field);
            if !value.is_finite() || value < 0.0 {
                return Err(ModelError::InvalidGoal { field, value });
            }
        }
        Ok(())
    }
}
