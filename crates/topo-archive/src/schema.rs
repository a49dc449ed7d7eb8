//! Recognized table layouts
//!
//! Export always writes the canonical layout of a quadrant kind. Import
//! accepts any layout of the matching kind, detected from the header row.

use crate::convention::CompletionConvention;
use crate::error::TableIssue;
use topo_model::QuadrantKind;

/// Column layout of one archive table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TableSchema {
    /// `Vial;Levantamiento (m)`
    LinearAsset,
    /// One row per entry, one column per interference sub-task
    TaskChecklist,
    /// One row per sub-task: `Descripción;Tipo;Tarea;Valor`
    TaskPerSubtask,
    /// Field-crew sheet: every row an interference, status text per sub-task
    TaskFieldSheet,
}

impl TableSchema {
    /// Every known layout
    pub const ALL: [Self; 4] = [
        Self::LinearAsset,
        Self::TaskChecklist,
        Self::TaskPerSubtask,
        Self::TaskFieldSheet,
    ];

    /// Layout written on export
    #[inline]
    #[must_use]
    pub fn canonical(kind: QuadrantKind) -> Self {
        match kind {
            QuadrantKind::LinearAsset => Self::LinearAsset,
            QuadrantKind::Task => Self::TaskChecklist,
        }
    }

    /// Quadrant kind this layout fills
    #[inline]
    #[must_use]
    pub fn kind(self) -> QuadrantKind {
        match self {
            Self::LinearAsset => QuadrantKind::LinearAsset,
            _ => QuadrantKind::Task,
        }
    }

    /// Column names as written in archives
    #[must_use]
    pub fn columns(self) -> &'static [&'static str] {
        match self {
            Self::LinearAsset => &["Vial", "Levantamiento (m)"],
            Self::TaskChecklist => &[
                "Descripción",
                "Tipo",
                "Valor",
                "Localización",
                "Georradar",
                "Levantamiento",
            ],
            Self::TaskPerSubtask => &["Descripción", "Tipo", "Tarea", "Valor"],
            Self::TaskFieldSheet => &[
                "Subcampo",
                "Interferencia",
                "Tensión",
                "Localización",
                "Georradar",
                "Levantamiento",
            ],
        }
    }

    /// English column names accepted in place of [`Self::columns`]
    fn aliases(self) -> &'static [&'static str] {
        match self {
            Self::LinearAsset => &["label", "length_m"],
            Self::TaskChecklist => &[
                "description",
                "category",
                "quantity",
                "localization",
                "geo-radar",
                "survey",
            ],
            Self::TaskPerSubtask => &["description", "category", "task", "quantity"],
            Self::TaskFieldSheet => &[
                "subfield",
                "interference",
                "voltage",
                "localization",
                "geo-radar",
                "survey",
            ],
        }
    }

    /// Convention used for completion cells unless overridden
    #[inline]
    #[must_use]
    pub fn default_convention(self) -> CompletionConvention {
        match self {
            Self::LinearAsset | Self::TaskChecklist => CompletionConvention::Inferred,
            Self::TaskPerSubtask => CompletionConvention::Count,
            Self::TaskFieldSheet => CompletionConvention::StatusText,
        }
    }

    fn matches(self, header: &[String]) -> bool {
        let columns = self.columns();
        let aliases = self.aliases();
        header.len() == columns.len()
            && header.iter().enumerate().all(|(i, name)| {
                let name = name.trim().trim_start_matches('\u{feff}').to_lowercase();
                name == columns[i].to_lowercase() || name == aliases[i]
            })
    }

    /// Detect the layout of a header row for a quadrant kind
    ///
    /// # Errors
    /// [`TableIssue::ColumnCount`] when no layout of this kind has as many
    /// columns, [`TableIssue::UnknownHeader`] when widths fit but names do not.
    pub fn detect(kind: QuadrantKind, header: &[String]) -> Result<Self, TableIssue> {
        let candidates: Vec<Self> = Self::ALL.into_iter().filter(|s| s.kind() == kind).collect();

        if let Some(schema) = candidates.iter().copied().find(|s| s.matches(header)) {
            return Ok(schema);
        }

        let mut widths: Vec<usize> = candidates.iter().map(|s| s.columns().len()).collect();
        widths.sort_unstable();
        widths.dedup();
        if widths.contains(&header.len()) {
            Err(TableIssue::UnknownHeader {
                found: header.to_vec(),
            })
        } else {
            Err(TableIssue::ColumnCount {
                expected: widths,
                found: header.len(),
            })
        }
    }
}
