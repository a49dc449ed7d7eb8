//! Progress report snapshot
//!
//! Collects every quadrant's figures and the project totals from one
//! [`SessionState`] so a host can print or serialize them in one go.

use crate::aggregate::{project_totals, quadrant_progress, Figure, ProjectTotals, QuadrantProgress};
use serde::{Deserialize, Serialize};
use std::fmt::{self, Display, Formatter};
use topo_model::{InterferenceTask, QuadrantId, QuadrantKind, SessionState};

/// All progress figures for a session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgressReport {
    /// One entry per quadrant, ascending
    pub quadrants: Vec<QuadrantProgress>,
    /// Project-wide figures
    pub project: ProjectTotals,
    /// Rows across all tables
    pub total_rows: usize,
}

impl ProgressReport {
    /// Build report from current session contents
    #[must_use]
    pub fn build(session: &SessionState) -> Self {
        let quadrants = QuadrantId::all()
            .iter()
            .map(|q| quadrant_progress(&session.records, &session.goals, *q))
            .collect();

        Self {
            quadrants,
            project: project_totals(&session.records, &session.goals),
            total_rows: session.records.total_rows(),
        }
    }

    /// Figures for one quadrant
    #[must_use]
    pub fn quadrant(&self, quadrant: QuadrantId) -> Option<&QuadrantProgress> {
        self.quadrants.iter().find(|p| p.quadrant == quadrant)
    }
}

fn write_figure(f: &mut Formatter<'_>, name: &str, unit: &str, figure: &Figure) -> fmt::Result {
    writeln!(
        f,
        "  {name:<14} {:>10.1}/{:<10.0}{unit:<2} {}",
        figure.value, figure.target, figure.progress
    )
}

impl Display for ProgressReport {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        writeln!(f, "Project ({} rows)", self.total_rows)?;
        write_figure(f, "Survey", "m", &self.project.length)?;
        for task in InterferenceTask::ALL {
            write_figure(f, task.label(), "", self.project.tasks.get(task))?;
        }

        for quadrant in &self.quadrants {
            writeln!(f)?;
            writeln!(f, "{} ({})", quadrant.quadrant, quadrant.kind)?;
            write_figure(f, "Survey", "m", &quadrant.length)?;
            if quadrant.kind == QuadrantKind::Task {
                for task in InterferenceTask::ALL {
                    write_figure(f, task.label(), "", quadrant.tasks.get(task))?;
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::progress::Progress;
    use topo_model::LinearAssetRow;

    #[test]
    fn build_covers_all_quadrants() {
        let report = ProgressReport::build(&SessionState::new());
        assert_eq!(report.quadrants.len(), 4);
        assert_eq!(report.total_rows, 0);
        assert_eq!(report.project.length.progress, Progress::Defined(0.0));
        assert_eq!(
            report.quadrant(QuadrantId::Q3).unwrap().length.progress,
            Progress::Undefined
        );
    }

    #[test]
    fn display_marks_undefined() {
        let mut session = SessionState::new();
        session
            .records
            .append(QuadrantId::Q1, LinearAssetRow::new("VIAL 1", 100.0).into());
        let text = ProgressReport::build(&session).to_string();

        assert!(text.starts_with("Project (1 rows)"));
        assert!(text.contains("Q1 (linear-asset)"));
        assert!(text.contains("Q3 (task)"));
        // Q3 has no length goal
        assert!(text.contains("N/A"));
    }

    #[test]
    fn serializes_progress_status() {
        let report = ProgressReport::build(&SessionState::new());
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["quadrants"][2]["length"]["progress"]["status"], "undefined");
        assert_eq!(json["project"]["length"]["progress"]["status"], "defined");
    }
}
