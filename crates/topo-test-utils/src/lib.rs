//! Testing utilities for the topo workspace
//!
//! Shared fixtures, builders and proptest strategies.

#![allow(missing_docs)]

use proptest::prelude::*;
use topo_model::{
    CompletionMark, InterferenceTask, LinearAssetRow, QuadrantId, QuadrantTable, RecordStore,
    SessionState, TaskRow,
};

pub fn linear_rows(entries: &[(&str, f64)]) -> Vec<LinearAssetRow> {
    entries
        .iter()
        .map(|(label, meters)| LinearAssetRow::new(*label, *meters))
        .collect()
}

/// Interference with checkbox marks for localization, geo-radar and survey
pub fn checklist_interference(description: &str, done: [bool; 3]) -> TaskRow {
    InterferenceTask::ALL
        .into_iter()
        .zip(done)
        .fold(TaskRow::interference(description), |row, (task, flag)| {
            row.with_mark(task, CompletionMark::Boolean(flag))
        })
}

/// Store with rows in all four quadrants
///
/// Q1: 420.5 m, Q2: 150 m + two interferences, Q3: one interference
/// with status-text marks, Q4: 1000 m.
pub fn populated_store() -> RecordStore {
    let mut store = RecordStore::new();
    store
        .replace(
            QuadrantId::Q1,
            linear_rows(&[("VIAL 1", 120.5), ("VIAL 2", 300.0)]).into(),
        )
        .unwrap();
    store
        .replace(
            QuadrantId::Q2,
            vec![
                TaskRow::road("VIA Q2-A", 100.0),
                TaskRow::road("VIA Q2-B", 50.0),
                checklist_interference("INT-01", [true, true, false]),
                checklist_interference("INT-02", [true, false, false]),
            ]
            .into(),
        )
        .unwrap();
    store
        .replace(
            QuadrantId::Q3,
            vec![TaskRow::interference("INT-30")
                .with_mark(
                    InterferenceTask::Localization,
                    CompletionMark::StatusText("OK".into()),
                )
                .with_mark(
                    InterferenceTask::GeoRadar,
                    CompletionMark::StatusText("2024-05-02".into()),
                )]
            .into(),
        )
        .unwrap();
    store
        .replace(QuadrantId::Q4, linear_rows(&[("VIAL 40", 1000.0)]).into())
        .unwrap();
    store
}

pub fn populated_session() -> SessionState {
    SessionState {
        records: populated_store(),
        ..SessionState::new()
    }
}

pub fn arb_label() -> impl Strategy<Value = String> {
    "[A-Z][A-Z0-9 -]{0,10}[A-Z0-9]"
}

/// Any non-blank status text, including text that reads like a number or
/// a boolean
pub fn arb_status_text() -> impl Strategy<Value = String> {
    prop_oneof![
        "(OK|HECHO|[0-2][0-9]/[01][0-9]/20[0-9]{2})",
        "-?[0-9]{1,3}(\\.[0-9]{1,2})?",
        "(true|false|True|FALSE|verdadero|falso)",
        " ?'?\\PC{1,10} ?",
    ]
    .prop_filter("status text must not be blank", |s| !s.trim().is_empty())
}

pub fn arb_mark() -> impl Strategy<Value = CompletionMark> {
    prop_oneof![
        Just(CompletionMark::Unset),
        any::<bool>().prop_map(CompletionMark::Boolean),
        (-2i32..5).prop_map(|n| CompletionMark::Count(f64::from(n))),
        arb_status_text().prop_map(CompletionMark::StatusText),
    ]
}

pub fn arb_linear_row() -> impl Strategy<Value = LinearAssetRow> {
    (arb_label(), 0u32..100_000).prop_map(|(label, centimeters)| {
        LinearAssetRow::new(label, f64::from(centimeters) / 100.0)
    })
}

pub fn arb_task_row() -> impl Strategy<Value = TaskRow> {
    prop_oneof![
        (arb_label(), 0u32..100_000)
            .prop_map(|(label, cm)| TaskRow::road(label, f64::from(cm) / 100.0)),
        (arb_label(), arb_mark(), arb_mark(), arb_mark()).prop_map(|(label, loc, geo, lev)| {
            TaskRow::interference(label)
                .with_mark(InterferenceTask::Localization, loc)
                .with_mark(InterferenceTask::GeoRadar, geo)
                .with_mark(InterferenceTask::Survey, lev)
        }),
    ]
}

/// Store with zero to five rows per quadrant
pub fn arb_store() -> impl Strategy<Value = RecordStore> {
    (
        prop::collection::vec(arb_linear_row(), 0..5),
        prop::collection::vec(arb_task_row(), 0..5),
        prop::collection::vec(arb_task_row(), 0..5),
        prop::collection::vec(arb_linear_row(), 0..5),
    )
        .prop_map(|(q1, q2, q3, q4)| {
            let tables: [QuadrantTable; 4] = [q1.into(), q2.into(), q3.into(), q4.into()];
            let mut store = RecordStore::new();
            for (q, table) in QuadrantId::all().into_iter().zip(tables) {
                store.replace(q, table).unwrap();
            }
            store
        })
}
