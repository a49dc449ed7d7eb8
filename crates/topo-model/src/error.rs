//! Error types for the record model
//!
//! Only programming and configuration mistakes surface as errors here.
//! Malformed user data is tolerated and coerced at read time instead.

use crate::goals::GoalField;
use crate::quadrant::{QuadrantId, QuadrantKind};

/// Record model errors
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ModelError {
    /// Quadrant number outside 1..=4
    #[error("invalid quadrant: {0} (expected 1-4)")]
    InvalidQuadrant(String),

    /// Goal value negative or not a finite number
    #[error("invalid goal for {field}: {value}")]
    InvalidGoal {
        /// The goal being edited
        field: GoalField,
        /// Rejected value
        value: f64,
    },

    /// Table shape does not fit the quadrant
    #[error("quadrant {quadrant} holds {expected} rows, got {actual} rows")]
    ShapeMismatch {
        quadrant: QuadrantId,
        expected: QuadrantKind,
        actual: QuadrantKind,
    },
}

impl ModelError {
    /// Create invalid quadrant error
    pub fn invalid_quadrant(raw: impl Into<String>) -> Self {
        Self::InvalidQuadrant(raw.into())
    }

    /// Create shape mismatch error
    #[inline]
    #[must_use]
    pub fn shape_mismatch(
        quadrant: QuadrantId,
        expected: QuadrantKind,
        actual: QuadrantKind,
    ) -> Self {
        Self::ShapeMismatch {
            quadrant,
            expected,
            actual,
        }
    }
}

/// Result type alias for model operations
pub type ModelResult<T> = Result<T, ModelError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_quadrant_display() {
        let err = ModelError::invalid_quadrant("7");
        assert_eq!(err.to_string(), "invalid quadrant: 7 (expected 1-4)");
    }

    #[test]
    fn shape_mismatch_display() {
        let err = ModelError::shape_mismatch(
            QuadrantId::Q1,
            QuadrantKind::LinearAsset,
            QuadrantKind::Task,
        );
        assert_eq!(
            err.to_string(),
            "quadrant Q1 holds linear-asset rows, got task rows"
        );
    }

    #[test]
    fn invalid_goal_display() {
        let err = ModelError::InvalidGoal {
            field: GoalField::OverallLength,
            value: -1.0,
        };
        assert!(err.to_string().contains("overall length"));
    }
}
