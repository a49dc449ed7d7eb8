//! Aggregation over quadrant tables
//!
//! Every function here is pure and recomputes from the current tables; there
//! is nothing to cache or invalidate. Malformed rows contribute zero.

use crate::progress::{progress_fraction, Progress};
use serde::{Deserialize, Serialize};
use topo_model::{
    GoalConfig, GoalPair, InterferenceTask, QuadrantId, QuadrantKind, QuadrantTable, RecordStore,
};

/// Surveyed meters recorded in a quadrant
///
/// Linear-asset tables count every row; task tables count only `Road` rows.
#[must_use]
pub fn survey_length(store: &RecordStore, quadrant: QuadrantId) -> f64 {
    match store.table(quadrant) {
        QuadrantTable::LinearAsset(rows) => rows.iter().map(|r| r.length()).sum(),
        QuadrantTable::Task(rows) => rows.iter().map(|r| r.road_length()).sum(),
    }
}

/// Completed units of one interference sub-task in a quadrant
///
/// Sums [`topo_model::CompletionMark::tally`] over `Interference` rows.
/// Linear-asset quadrants always report zero.
#[must_use]
pub fn interference_task_count(
    store: &RecordStore,
    quadrant: QuadrantId,
    task: InterferenceTask,
) -> f64 {
    match store.table(quadrant) {
        QuadrantTable::LinearAsset(_) => 0.0,
        QuadrantTable::Task(rows) => rows
            .iter()
            .filter(|r| r.is_interference())
            .map(|r| r.mark(task).tally())
            .sum(),
    }
}

/// A value measured against its target
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Figure {
    pub value: f64,
    pub target: f64,
    pub progress: Progress,
}

impl Figure {
    /// Measure `value` against `target`
    #[inline]
    #[must_use]
    pub fn new(value: f64, target: f64) -> Self {
        Self {
            value,
            target,
            progress: progress_fraction(value, target),
        }
    }
}

/// One figure per interference sub-task, all against the same target
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TaskFigures {
    pub localization: Figure,
    pub geo_radar: Figure,
    pub survey: Figure,
}

impl TaskFigures {
    fn from_counts(count: impl Fn(InterferenceTask) -> f64, target: f64) -> Self {
        Self {
            localization: Figure::new(count(InterferenceTask::Localization), target),
            geo_radar: Figure::new(count(InterferenceTask::GeoRadar), target),
            survey: Figure::new(count(InterferenceTask::Survey), target),
        }
    }

    /// Figure for a sub-task
    #[inline]
    #[must_use]
    pub fn get(&self, task: InterferenceTask) -> &Figure {
        match task {
            InterferenceTask::Localization => &self.localization,
            InterferenceTask::GeoRadar => &self.geo_radar,
            InterferenceTask::Survey => &self.survey,
        }
    }
}

/// Progress of a single quadrant against its own goals
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct QuadrantProgress {
    pub quadrant: QuadrantId,
    pub kind: QuadrantKind,
    /// Surveyed meters
    pub length: Figure,
    /// Interference sub-tasks
    pub tasks: TaskFigures,
}

/// Compute a quadrant's figures against its goal pair
#[must_use]
pub fn quadrant_progress(
    store: &RecordStore,
    goals: &GoalConfig,
    quadrant: QuadrantId,
) -> QuadrantProgress {
    let GoalPair {
        target_length_m,
        target_interference_count,
    } = *goals.quadrant(quadrant);

    QuadrantProgress {
        quadrant,
        kind: store.table(quadrant).kind(),
        length: Figure::new(survey_length(store, quadrant), target_length_m),
        tasks: TaskFigures::from_counts(
            |task| interference_task_count(store, quadrant, task),
            target_interference_count,
        ),
    }
}

/// Project-wide sums against the overall goals
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProjectTotals {
    /// Surveyed meters across all quadrants
    pub length: Figure,
    /// Interference sub-tasks across all quadrants
    pub tasks: TaskFigures,
}

/// Sum every quadrant and measure against the overall goals
///
/// Quadrant goals play no part here; only [`GoalConfig::overall`] is used.
#[must_use]
pub fn project_totals(store: &RecordStore, goals: &GoalConfig) -> ProjectTotals {
    let total_length: f64 = QuadrantId::all()
        .iter()
        .map(|q| survey_length(store, *q))
        .sum();
    let total_tasks = |task| {
        QuadrantId::all()
            .iter()
            .map(|q| interference_task_count(store, *q, task))
            .sum::<f64>()
    };

    ProjectTotals {
        length: Figure::new(total_length, goals.overall.target_length_m),
        tasks: TaskFigures::from_counts(total_tasks, goals.overall.target_interference_count),
    }
}
