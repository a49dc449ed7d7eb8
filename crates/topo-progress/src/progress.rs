//! Progress fractions
//!
//! A fraction against a zero target has no meaning, so it is represented as
//! [`Progress::Undefined`] instead of `0`, `NaN` or infinity.

use serde::{Deserialize, Serialize};
use std::fmt::{self, Display, Formatter};

/// Completed share of a target
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", content = "fraction", rename_all = "snake_case")]
pub enum Progress {
    /// `value / target`, may exceed `1.0`
    Defined(f64),
    /// Target is zero (or not a usable number)
    Undefined,
}

impl Progress {
    /// Fraction if defined
    #[inline]
    #[must_use]
    pub fn fraction(self) -> Option<f64> {
        match self {
            Self::Defined(f) => Some(f),
            Self::Undefined => None,
        }
    }

    /// Fraction as a percentage if defined
    #[inline]
    #[must_use]
    pub fn percent(self) -> Option<f64> {
        self.fraction().map(|f| f * 100.0)
    }

    /// Whether a target was available
    #[inline]
    #[must_use]
    pub fn is_defined(self) -> bool {
        matches!(self, Self::Defined(_))
    }
}

impl Display for Progress {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self.percent() {
            Some(pct) => write!(f, "{pct:.1}%"),
            None => write!(f, "N/A"),
        }
    }
}

/// Share of `target` reached by `value`
///
/// Returns [`Progress::Undefined`] when `target` is not a positive finite
/// number or `value` is not finite. Never panics.
#[must_use]
pub fn progress_fraction(value: f64, target: f64) -> Progress {
    if !(target.is_finite() && target > 0.0) || !value.is_finite() {
        return Progress::Undefined;
    }
    let fraction = value / target;
    if fraction.is_finite() {
        Progress::Defined(fraction)
    } else {
        Progress::Undefined
    }
}
