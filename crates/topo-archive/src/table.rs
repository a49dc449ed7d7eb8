//! Semicolon-delimited quadrant tables
//!
//! One table per quadrant: a header row naming the layout's columns, then
//! one record per row in insertion order.

use crate::convention::{encode_mark, format_number, CompletionConvention};
use crate::error::TableIssue;
use crate::schema::TableSchema;
use topo_model::{
    coerce_number, Category, InterferenceTask, LinearAssetRow, QuadrantKind,
    QuadrantTable, TaskRow,
};

/// Field delimiter used by every archive table
pub const DELIMITER: u8 = b';';

/// Encode a table in its canonical layout
///
/// # Errors
/// The underlying [`csv::Error`] if writing fails.
pub fn encode_table(table: &QuadrantTable) -> Result<Vec<u8>, csv::Error> {
    let schema = TableSchema::canonical(table.kind());
    let mut writer = csv::WriterBuilder::new()
        .delimiter(DELIMITER)
        .from_writer(Vec::new());

    writer.write_record(schema.columns())?;

    match table {
        QuadrantTable::LinearAsset(rows) => {
            for row in rows {
                writer.write_record([row.label.clone(), format_number(row.length_m)])?;
            }
        }
        QuadrantTable::Task(rows) => {
            for row in rows {
                writer
                    .write_record([
                        row.description.clone(),
                        row.category.map(|c| c.label().to_string()).unwrap_or_default(),
                        format_number(row.quantity),
                        encode_mark(&row.localization),
                        encode_mark(&row.geo_radar),
                        encode_mark(&row.survey),
                    ])?;
            }
        }
    }

    writer
        .into_inner()
        .map_err(|e| csv::Error::from(e.into_error()))
}

/// Row cells with missing trailing cells read as blank
struct Cells(Vec<String>);

impl Cells {
    fn get(&self, index: usize) -> &str {
        self.0.get(index).map_or("", String::as_str)
    }

    fn number(&self, index: usize) -> Option<f64> {
        coerce_number(self.get(index))
    }
}

fn decode_linear(cells: &Cells) -> LinearAssetRow {
    LinearAssetRow {
        label: cells.get(0).to_string(),
        length_m: cells.number(1),
    }
}

fn decode_checklist(cells: &Cells, convention: CompletionConvention) -> TaskRow {
    TaskRow {
        description: cells.get(0).to_string(),
        category: Category::parse(cells.get(1)),
        quantity: cells.number(2),
        localization: convention.decode(cells.get(3)),
        geo_radar: convention.decode(cells.get(4)),
        survey: convention.decode(cells.get(5)),
    }
}

fn decode_per_subtask(cells: &Cells, convention: CompletionConvention) -> TaskRow {
    let mut row = TaskRow {
        description: cells.get(0).to_string(),
        category: Category::parse(cells.get(1)),
        quantity: cells.number(3),
        ..TaskRow::default()
    };
    if row.is_interference() {
        if let Some(task) = InterferenceTask::parse(cells.get(2)) {
            row.set_mark(task, convention.decode(cells.get(3)));
        }
    }
    row
}

fn decode_field_sheet(cells: &Cells, convention: CompletionConvention) -> TaskRow {
    let interference = cells.get(1);
    let description = if interference.trim().is_empty() {
        cells.get(0)
    } else {
        interference
    };
    TaskRow::interference(description)
        .with_mark(InterferenceTask::Localization, convention.decode(cells.get(3)))
        .with_mark(InterferenceTask::GeoRadar, convention.decode(cells.get(4)))
        .with_mark(InterferenceTask::Survey, convention.decode(cells.get(5)))
}

/// Decode a table for a quadrant of the given kind
///
/// The layout is detected from the header. `convention` overrides the
/// layout's default completion convention when set. Cells that are not
/// valid UTF-8 are decoded lossily.
///
/// # Errors
/// A [`TableIssue`] when the header fits no layout of this kind, a row is
/// wider than the header, or the bytes are not parseable.
pub fn decode_table(
    kind: QuadrantKind,
    bytes: &[u8],
    convention: Option<CompletionConvention>,
) -> Result<(TableSchema, QuadrantTable), TableIssue> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(DELIMITER)
        .flexible(true)
        .from_reader(bytes);

    let header: Vec<String> = reader
        .byte_headers()
        .map_err(|e| TableIssue::Unreadable(e.to_string()))?
        .iter()
        .map(|field| String::from_utf8_lossy(field).into_owned())
        .collect();
    let schema = TableSchema::detect(kind, &header)?;
    let convention = convention.unwrap_or_else(|| schema.default_convention());

    let mut rows = Vec::new();
    for record in reader.byte_records() {
        let record = record.map_err(|e| TableIssue::Unreadable(e.to_string()))?;
        if record.len() > header.len() {
            return Err(TableIssue::RowTooWide {
                line: record.position().map_or(0, csv::Position::line),
                found: record.len(),
                expected: header.len(),
            });
        }
        let cells = Cells(
            record
                .iter()
                .map(|field| String::from_utf8_lossy(field).into_owned())
                .collect(),
        );
        rows.push(cells);
    }

    let table = match schema {
        TableSchema::LinearAsset => {
            QuadrantTable::LinearAsset(rows.iter().map(decode_linear).collect())
        }
        TableSchema::TaskChecklist => QuadrantTable::Task(
            rows.iter()
                .map(|c| decode_checklist(c, convention))
                .collect(),
        ),
        TableSchema::TaskPerSubtask => QuadrantTable::Task(
            rows.iter()
                .map(|c| decode_per_subtask(c, convention))
                .collect(),
        ),
        TableSchema::TaskFieldSheet => QuadrantTable::Task(
            rows.iter()
                .map(|c| decode_field_sheet(c, convention))
                .collect(),
        ),
    };
    Ok((schema, table))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use topo_model::CompletionMark;

    fn decode(kind: QuadrantKind, text: &str) -> Result<(TableSchema, QuadrantTable), TableIssue> {
        decode_table(kind, text.as_bytes(), None)
    }

    #[test]
    fn encode_linear_layout() {
        let table: QuadrantTable = vec![
            LinearAssetRow::new("VIAL 1", 120.5),
            LinearAssetRow::new("VIAL; 2", 300.0),
        ]
        .into();
        let text = String::from_utf8(encode_table(&table).unwrap()).unwrap();
        assert_eq!(text, "Vial;Levantamiento (m)\nVIAL 1;120.5\n\"VIAL; 2\";300\n");
    }

    #[test]
    fn encode_checklist_layout() {
        let table: QuadrantTable = vec![
            TaskRow::road("VIA 7", 12.0),
            TaskRow::interference("INT-01")
                .with_mark(InterferenceTask::Localization, CompletionMark::Boolean(true)),
        ]
        .into();
        let text = String::from_utf8(encode_table(&table).unwrap()).unwrap();
        assert_eq!(
            text,
            "Descripción;Tipo;Valor;Localización;Georradar;Levantamiento\n\
             VIA 7;Vía;12;;;\n\
             INT-01;Interferencia;1;True;;\n"
        );
    }

    #[test]
    fn decode_dashboard_export() {
        // Floats and checkbox booleans as saved by the dashboard
        let text = "Descripción;Tipo;Valor;Localización;Georradar;Levantamiento\n\
                    VIA 1;Vía;250.0;;;\n\
                    INT-7;Interferencia;1;True;False;False\n";
        let (schema, table) = decode(QuadrantKind::Task, text).unwrap();
        assert_eq!(schema, TableSchema::TaskChecklist);

        let QuadrantTable::Task(rows) = table else {
            panic!("expected task rows");
        };
        assert_eq!(rows[0], TaskRow::road("VIA 1", 250.0));
        assert_eq!(rows[1].localization, CompletionMark::Boolean(true));
        assert_eq!(rows[1].geo_radar, CompletionMark::Boolean(false));
    }

    #[test]
    fn decode_per_subtask_rows() {
        let text = "description;category;task;quantity\n\
                    INT-01;Interference;Localization;1\n\
                    INT-01;Interference;Geo-radar;0\n\
                    VIA 2;Road;;80\n";
        let (schema, table) = decode(QuadrantKind::Task, text).unwrap();
        assert_eq!(schema, TableSchema::TaskPerSubtask);

        let QuadrantTable::Task(rows) = table else {
            panic!("expected task rows");
        };
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].localization, CompletionMark::Count(1.0));
        assert_eq!(rows[1].geo_radar, CompletionMark::Count(0.0));
        assert_eq!(rows[2].road_length(), 80.0);
    }

    #[test]
    fn decode_field_sheet_status_text() {
        let text = "Subcampo;Interferencia;Tensión;Localización;Georradar;Levantamiento\n\
                    SC-1;Tubería 8in;;OK;12/03/2024;\n\
                    SC-2;;13.8kV;0;;\n";
        let (schema, table) = decode(QuadrantKind::Task, text).unwrap();
        assert_eq!(schema, TableSchema::TaskFieldSheet);

        let QuadrantTable::Task(rows) = table else {
            panic!("expected task rows");
        };
        assert_eq!(rows[0].description, "Tubería 8in");
        assert!(rows[0].is_interference());
        assert_eq!(rows[0].geo_radar, CompletionMark::StatusText("12/03/2024".into()));
        assert_eq!(rows[1].description, "SC-2");
        assert_eq!(rows[1].localization, CompletionMark::StatusText("0".into()));
        assert_eq!(rows[1].survey, CompletionMark::Unset);
    }

    #[test]
    fn convention_override_applies() {
        let text = "Descripción;Tipo;Valor;Localización;Georradar;Levantamiento\n\
                    INT-1;Interferencia;1;x;;\n";
        let (_, table) = decode_table(
            QuadrantKind::Task,
            text.as_bytes(),
            Some(CompletionConvention::Boolean),
        )
        .unwrap();
        let QuadrantTable::Task(rows) = table else {
            panic!("expected task rows");
        };
        assert_eq!(rows[0].localization, CompletionMark::Boolean(true));
    }

    #[test]
    fn short_rows_read_as_blank() {
        let text = "Vial;Levantamiento (m)\nVIAL 3\nVIAL 4;abc\n";
        let (_, table) = decode(QuadrantKind::LinearAsset, text).unwrap();
        let QuadrantTable::LinearAsset(rows) = table else {
            panic!("expected linear rows");
        };
        assert_eq!(rows[0].length_m, None);
        assert_eq!(rows[1].length_m, None);
    }

    #[test]
    fn wide_row_is_rejected() {
        let text = "Vial;Levantamiento (m)\nVIAL 3;1;extra\n";
        let err = decode(QuadrantKind::LinearAsset, text).unwrap_err();
        assert!(matches!(err, TableIssue::RowTooWide { found: 3, expected: 2, .. }));
    }

    #[test]
    fn latin1_cells_are_decoded_lossily() {
        let mut bytes = b"Vial;Levantamiento (m)\nV\xCDA 1;10\n".to_vec();
        bytes.extend_from_slice(b"VIAL 2;5\n");
        let (_, table) = decode_table(QuadrantKind::LinearAsset, &bytes, None).unwrap();
        assert_eq!(table.len(), 2);
    }
}
