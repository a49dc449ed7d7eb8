//! Per-session state
//!
//! The hosting layer keeps one [`SessionState`] per user session; nothing in
//! this crate is global.

use crate::goals::GoalConfig;
use crate::store::RecordStore;
use serde::{Deserialize, Serialize};

/// Records and goals belonging to one session
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SessionState {
    /// Entered records
    pub records: RecordStore,
    /// Editable targets
    pub goals: GoalConfig,
}

impl SessionState {
    /// Fresh session: empty tables and default goals
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Fresh session with the given goals
    #[inline]
    #[must_use]
    pub fn with_goals(goals: GoalConfig) -> Self {
        Self {
            records: RecordStore::new(),
            goals,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::goals::GoalPair;
    use crate::quadrant::QuadrantId;
    use crate::record::LinearAssetRow;

    #[test]
    fn sessions_are_isolated() {
        let mut a = SessionState::new();
        let b = SessionState::new();
        a.records
            .append(QuadrantId::Q1, LinearAssetRow::new("VIAL 1", 5.0).into());
        assert_eq!(a.records.total_rows(), 1);
        assert_eq!(b.records.total_rows(), 0);
    }

    #[test]
    fn with_goals_starts_empty() {
        let goals = GoalConfig::new().with_overall(GoalPair::new(100.0, 10.0));
        let session = SessionState::with_goals(goals);
        assert_eq!(session.goals.overall.target_length_m, 100.0);
        assert_eq!(session.records.total_rows(), 0);
    }
}
