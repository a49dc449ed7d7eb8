//! Subcommand implementations
//!
//! Everything here works on an in-memory [`SessionState`]; reading and
//! writing files is left to the binary.

use crate::config::{parse_goal_field, ConfigError, DashboardConfig};
use topo_model::{
    CompletionMark, InterferenceTask, LinearAssetRow, ModelError, QuadrantId, QuadrantKind,
    QuadrantRow, SessionState, TaskRow,
};
use topo_progress::ProgressReport;

/// Command errors
#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    /// Interferences only live in task quadrants
    #[error("{quadrant} holds {kind} rows; interferences need a task quadrant")]
    NotTaskQuadrant {
        quadrant: QuadrantId,
        kind: QuadrantKind,
    },

    /// Goal name or value rejected
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Report could not be serialized
    #[error("failed to render report: {0}")]
    Render(#[from] serde_json::Error),
}

impl From<ModelError> for CommandError {
    fn from(err: ModelError) -> Self {
        Self::Config(ConfigError::Goals(err))
    }
}

/// Report output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Aligned text
    #[default]
    Text,
    /// Pretty-printed JSON
    Json,
}

/// Render the session's progress report
///
/// # Errors
/// [`CommandError::Render`] if JSON serialization fails.
pub fn summary(state: &SessionState, format: OutputFormat) -> Result<String, CommandError> {
    let report = ProgressReport::build(state);
    match format {
        OutputFormat::Text => Ok(report.to_string()),
        OutputFormat::Json => Ok(serde_json::to_string_pretty(&report)?),
    }
}

/// Append a road segment to `quadrant`
///
/// Linear-asset quadrants get a plain row; task quadrants get a road entry.
/// Returns `false` when the label is blank and nothing was added.
pub fn add_road(state: &mut SessionState, quadrant: QuadrantId, label: &str, meters: f64) -> bool {
    let row: QuadrantRow = match quadrant.kind() {
        QuadrantKind::LinearAsset => LinearAssetRow::new(label, meters).into(),
        QuadrantKind::Task => TaskRow::road(label, meters).into(),
    };
    state.records.append(quadrant, row)
}

/// Completed sub-tasks for a new interference
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TaskChecks {
    /// Obstruction located
    pub localization: bool,
    /// Radar scan done
    pub geo_radar: bool,
    /// Surveyed
    pub survey: bool,
}

impl TaskChecks {
    fn get(self, task: InterferenceTask) -> bool {
        match task {
            InterferenceTask::Localization => self.localization,
            InterferenceTask::GeoRadar => self.geo_radar,
            InterferenceTask::Survey => self.survey,
        }
    }
}

/// Append an interference with checkbox marks to a task quadrant
///
/// # Errors
/// [`CommandError::NotTaskQuadrant`] for Q1 and Q4.
pub fn add_interference(
    state: &mut SessionState,
    quadrant: QuadrantId,
    description: &str,
    checks: TaskChecks,
) -> Result<bool, CommandError> {
    let kind = quadrant.kind();
    if kind != QuadrantKind::Task {
        return Err(CommandError::NotTaskQuadrant { quadrant, kind });
    }

    let row = InterferenceTask::ALL
        .into_iter()
        .fold(TaskRow::interference(description), |row, task| {
            row.with_mark(task, CompletionMark::Boolean(checks.get(task)))
        });
    Ok(state.records.append(quadrant, row.into()))
}

/// Change one goal in both the config and the live session
///
/// # Errors
/// Unknown goal name, or a negative / non-finite value.
pub fn set_goal(
    config: &mut DashboardConfig,
    state: &mut SessionState,
    name: &str,
    value: f64,
) -> Result<(), CommandError> {
    let field = parse_goal_field(name)?;
    config.goals.set(field, value)?;
    state.goals.set(field, value)?;
    tracing::info!(goal = %field, value, "goal updated");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use topo_progress::{interference_task_count, survey_length, Progress};

    #[test]
    fn road_goes_to_matching_shape() {
        let mut state = SessionState::new();
        assert!(add_road(&mut state, QuadrantId::Q1, "VIAL 1", 120.5));
        assert!(add_road(&mut state, QuadrantId::Q2, "VIA 9", 30.0));
        assert!(!add_road(&mut state, QuadrantId::Q4, "  ", 10.0));

        assert_eq!(survey_length(&state.records, QuadrantId::Q1), 120.5);
        assert_eq!(survey_length(&state.records, QuadrantId::Q2), 30.0);
        assert!(state.records.is_empty(QuadrantId::Q4));
    }

    #[test]
    fn interference_marks_counted() {
        let mut state = SessionState::new();
        let checks = TaskChecks {
            localization: true,
            geo_radar: true,
            survey: false,
        };
        assert!(add_interference(&mut state, QuadrantId::Q3, "INT-30", checks).unwrap());

        let count = |task| interference_task_count(&state.records, QuadrantId::Q3, task);
        assert_eq!(count(InterferenceTask::Localization), 1.0);
        assert_eq!(count(InterferenceTask::GeoRadar), 1.0);
        assert_eq!(count(InterferenceTask::Survey), 0.0);
    }

    #[test]
    fn interference_rejected_on_linear_quadrant() {
        let mut state = SessionState::new();
        let err = add_interference(&mut state, QuadrantId::Q4, "INT", TaskChecks::default())
            .unwrap_err();
        assert!(matches!(err, CommandError::NotTaskQuadrant { .. }));
    }

    #[test]
    fn set_goal_updates_session_and_config() {
        let mut config = DashboardConfig::default();
        let mut state = SessionState::with_goals(config.goals);

        set_goal(&mut config, &mut state, "q3-length", 500.0).unwrap();
        assert_eq!(config.goals.quadrant(QuadrantId::Q3).target_length_m, 500.0);
        assert_eq!(state.goals, config.goals);

        let report = ProgressReport::build(&state);
        let q3 = report.quadrant(QuadrantId::Q3).unwrap();
        assert_eq!(q3.length.progress, Progress::Defined(0.0));
    }

    #[test]
    fn set_goal_rejects_negative() {
        let mut config = DashboardConfig::default();
        let mut state = SessionState::new();
        assert!(set_goal(&mut config, &mut state, "overall-length", -3.0).is_err());
        assert!(set_goal(&mut config, &mut state, "q9-length", 3.0).is_err());
        assert_eq!(config, DashboardConfig::default());
    }

    #[test]
    fn json_summary_has_four_quadrants() {
        let text = summary(&SessionState::new(), OutputFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value["quadrants"].as_array().unwrap().len(), 4);
    }
}
