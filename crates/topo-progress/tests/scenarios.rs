use pretty_assertions::assert_eq;
use proptest::prelude::*;
use topo_model::{
    GoalConfig, GoalField, GoalPair, InterferenceTask, LinearAssetRow, QuadrantId, RecordStore,
    SessionState, TaskRow,
};
use topo_progress::{
    interference_task_count, progress_fraction, project_totals, quadrant_progress, survey_length,
    Progress, ProgressReport,
};
use topo_test_utils::{arb_label, populated_session};

#[test]
fn test_two_roads_in_q1() {
    let mut store = RecordStore::new();
    store.append(QuadrantId::Q1, LinearAssetRow::new("VIAL 1", 120.5).into());
    store.append(QuadrantId::Q1, LinearAssetRow::new("VIAL 2", 300.0).into());

    let meters = survey_length(&store, QuadrantId::Q1);
    assert_eq!(meters, 420.5);

    let fraction = progress_fraction(meters, 7366.0).fraction().unwrap();
    assert!((fraction - 420.5 / 7366.0).abs() < 1e-12);
    assert!((fraction - 0.0571).abs() < 1e-4);
}

#[test]
fn test_single_localization_in_q2() {
    let mut store = RecordStore::new();
    store.append(
        QuadrantId::Q2,
        TaskRow::interference_task("INT-01", InterferenceTask::Localization, 1.0).into(),
    );

    assert_eq!(
        interference_task_count(&store, QuadrantId::Q2, InterferenceTask::Localization),
        1.0
    );
    assert_eq!(
        interference_task_count(&store, QuadrantId::Q2, InterferenceTask::GeoRadar),
        0.0
    );
}

#[test]
fn test_empty_project_progress_is_defined_zero() {
    let goals = GoalConfig::new().with_overall(GoalPair::new(31588.0, 251.0));
    let totals = project_totals(&RecordStore::new(), &goals);

    assert_eq!(totals.length.value, 0.0);
    assert_eq!(totals.length.progress, Progress::Defined(0.0));
    assert_eq!(totals.tasks.survey.progress, Progress::Defined(0.0));
}

#[test]
fn test_goal_edit_applies_to_next_query() {
    let mut session = SessionState::new();
    session
        .records
        .append(QuadrantId::Q3, TaskRow::road("VIA 30", 25.0).into());

    let before = quadrant_progress(&session.records, &session.goals, QuadrantId::Q3);
    assert_eq!(before.length.progress, Progress::Undefined);

    session
        .goals
        .set(GoalField::QuadrantLength(QuadrantId::Q3), 100.0)
        .unwrap();
    let after = quadrant_progress(&session.records, &session.goals, QuadrantId::Q3);
    assert_eq!(after.length.progress, Progress::Defined(0.25));
}

#[test]
fn test_quadrant_goals_do_not_feed_totals() {
    let mut session = populated_session();
    let before = project_totals(&session.records, &session.goals);
    for q in QuadrantId::all() {
        session.goals.set(GoalField::QuadrantLength(q), 1.0).unwrap();
    }
    let after = project_totals(&session.records, &session.goals);
    assert_eq!(before, after);
}

#[test]
fn test_populated_report() {
    let report = ProgressReport::build(&populated_session());
    assert_eq!(report.total_rows, 8);
    assert_eq!(report.project.length.value, 420.5 + 150.0 + 1000.0);
    assert_eq!(report.project.tasks.localization.value, 3.0);
    assert_eq!(report.project.tasks.geo_radar.value, 2.0);
    assert_eq!(report.project.tasks.survey.value, 0.0);

    let q2 = report.quadrant(QuadrantId::Q2).unwrap();
    assert_eq!(q2.length.value, 150.0);
    assert_eq!(q2.tasks.localization.target, 53.0);
}

proptest! {
    #[test]
    fn prop_append_counts_length_once(
        label in arb_label(),
        meters in 0.0f64..50_000.0,
        existing in prop::collection::vec(0.0f64..1_000.0, 0..6),
    ) {
        let mut store = RecordStore::new();
        for (i, m) in existing.iter().enumerate() {
            store.append(QuadrantId::Q4, LinearAssetRow::new(format!("V{i}"), *m).into());
        }
        let before = survey_length(&store, QuadrantId::Q4);

        prop_assert!(store.append(QuadrantId::Q4, LinearAssetRow::new(label, meters).into()));
        let after = survey_length(&store, QuadrantId::Q4);
        prop_assert!((after - before - meters).abs() < 1e-6);
    }

    #[test]
    fn prop_blank_label_leaves_count(meters in 0.0f64..1_000.0, blanks in "[ ]{0,4}") {
        let mut store = RecordStore::new();
        prop_assert!(!store.append(QuadrantId::Q1, LinearAssetRow::new(blanks, meters).into()));
        prop_assert_eq!(store.len(QuadrantId::Q1), 0);
        prop_assert_eq!(survey_length(&store, QuadrantId::Q1), 0.0);
    }
}
