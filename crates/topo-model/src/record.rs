//! Record shapes held by quadrant tables
//!
//! Two shapes exist: [`LinearAssetRow`] for road-only quadrants and
//! [`TaskRow`] for quadrants that mix road entries with interferences.
//! Numeric fields are stored as `Option<f64>` so malformed input can be kept
//! verbatim-as-absent and coerced to zero only when aggregated.

use crate::numeric::non_negative;
use crate::quadrant::QuadrantKind;
use serde::{Deserialize, Serialize};
use std::fmt::{self, Display, Formatter};

/// Entry category inside a task table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    /// Road or drainage segment, quantity in meters
    Road,
    /// Underground obstruction with three sub-tasks
    Interference,
}

impl Category {
    /// Label written to archive tables
    #[inline]
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Road => "Vía",
            Self::Interference => "Interferencia",
        }
    }

    /// Parse a category cell, case-insensitive
    ///
    /// Unknown text yields `None`; such rows never count toward any figure.
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_lowercase().as_str() {
            "vía" | "via" | "road" => Some(Self::Road),
            "interferencia" | "interference" => Some(Self::Interference),
            _ => None,
        }
    }
}

impl Display for Category {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Sequential sub-tasks performed on every interference
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InterferenceTask {
    /// Locating the obstruction
    Localization,
    /// Ground-penetrating radar scan
    GeoRadar,
    /// Final topographic survey
    Survey,
}

impl InterferenceTask {
    /// All sub-tasks in execution order
    pub const ALL: [Self; 3] = [Self::Localization, Self::GeoRadar, Self::Survey];

    /// Column / cell label used in archive tables
    #[inline]
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Localization => "Localización",
            Self::GeoRadar => "Georradar",
            Self::Survey => "Levantamiento",
        }
    }

    /// Parse a task cell, accepting Spanish and English spellings
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_lowercase().as_str() {
            "localización" | "localizacion" | "localization" => Some(Self::Localization),
            "georradar" | "geo-radar" | "georadar" | "geo_radar" => Some(Self::GeoRadar),
            "levantamiento" | "survey" => Some(Self::Survey),
            _ => None,
        }
    }
}

impl Display for InterferenceTask {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Completion value of one interference sub-task
///
/// Different revisions of the field sheets recorded completion as checkboxes,
/// as 0/1 counts, or as free text such as `OK` or a date. Each convention is a
/// variant with its own completion rule.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum CompletionMark {
    /// Nothing recorded
    #[default]
    Unset,
    /// Checkbox
    Boolean(bool),
    /// Numeric count of completed units
    Count(f64),
    /// Free-text status
    StatusText(String),
}

impl CompletionMark {
    /// Whether the sub-task is done under this mark's convention
    #[must_use]
    pub fn is_complete(&self) -> bool {
        match self {
            Self::Unset => false,
            Self::Boolean(done) => *done,
            Self::Count(n) => non_negative(Some(*n)) > 0.0,
            Self::StatusText(text) => !text.trim().is_empty(),
        }
    }

    /// Contribution of this mark to a task count
    ///
    /// Counts are summed, with negative or non-finite counts read as zero;
    /// every other complete mark counts once.
    #[must_use]
    pub fn tally(&self) -> f64 {
        match self {
            Self::Count(n) => non_negative(Some(*n)),
            other if other.is_complete() => 1.0,
            _ => 0.0,
        }
    }
}

/// Road/drainage segment in a linear-asset quadrant
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinearAssetRow {
    /// Segment name (`Vial`)
    pub label: String,
    /// Surveyed meters, absent when not numeric
    pub length_m: Option<f64>,
}

impl LinearAssetRow {
    /// Create row with a surveyed length
    #[inline]
    #[must_use]
    pub fn new(label: impl Into<String>, length_m: f64) -> Self {
        Self {
            label: label.into(),
            length_m: Some(length_m),
        }
    }

    /// Surveyed meters after coercion
    #[inline]
    #[must_use]
    pub fn length(&self) -> f64 {
        non_negative(self.length_m)
    }
}

/// Entry in a task quadrant: either a road segment or an interference
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TaskRow {
    /// Identifier or description
    pub description: String,
    /// Road or interference; `None` when the cell was unrecognized
    pub category: Option<Category>,
    /// Meters for road entries; informational for interferences
    pub quantity: Option<f64>,
    /// Localization sub-task
    pub localization: CompletionMark,
    /// Geo-radar sub-task
    pub geo_radar: CompletionMark,
    /// Final survey sub-task
    pub survey: CompletionMark,
}

impl TaskRow {
    /// Road entry with surveyed meters
    #[must_use]
    pub fn road(description: impl Into<String>, meters: f64) -> Self {
        Self {
            description: description.into(),
            category: Some(Category::Road),
            quantity: Some(meters),
            ..Self::default()
        }
    }

    /// Interference entry with every sub-task unset
    #[must_use]
    pub fn interference(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            category: Some(Category::Interference),
            quantity: Some(1.0),
            ..Self::default()
        }
    }

    /// Interference entry recording one sub-task with a numeric quantity
    #[must_use]
    pub fn interference_task(
        description: impl Into<String>,
        task: InterferenceTask,
        quantity: f64,
    ) -> Self {
        Self::interference(description).with_mark(task, CompletionMark::Count(quantity))
    }

    /// Set a sub-task mark, builder style
    #[inline]
    #[must_use]
    pub fn with_mark(mut self, task: InterferenceTask, mark: CompletionMark) -> Self {
        self.set_mark(task, mark);
        self
    }

    /// Mark for a sub-task
    #[inline]
    #[must_use]
    pub fn mark(&self, task: InterferenceTask) -> &CompletionMark {
        match task {
            InterferenceTask::Localization => &self.localization,
            InterferenceTask::GeoRadar => &self.geo_radar,
            InterferenceTask::Survey => &self.survey,
        }
    }

    /// Replace a sub-task mark
    pub fn set_mark(&mut self, task: InterferenceTask, mark: CompletionMark) {
        match task {
            InterferenceTask::Localization => self.localization = mark,
            InterferenceTask::GeoRadar => self.geo_radar = mark,
            InterferenceTask::Survey => self.survey = mark,
        }
    }

    /// Whether this row counts toward survey length
    #[inline]
    #[must_use]
    pub fn is_road(&self) -> bool {
        self.category == Some(Category::Road)
    }

    /// Whether this row counts toward interference tasks
    #[inline]
    #[must_use]
    pub fn is_interference(&self) -> bool {
        self.category == Some(Category::Interference)
    }

    /// Surveyed meters after coercion; zero unless a road entry
    #[inline]
    #[must_use]
    pub fn road_length(&self) -> f64 {
        if self.is_road() {
            non_negative(self.quantity)
        } else {
            0.0
        }
    }
}

/// A single row of either shape
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "shape", rename_all = "snake_case")]
pub enum QuadrantRow {
    LinearAsset(LinearAssetRow),
    Task(TaskRow),
}

impl QuadrantRow {
    /// Shape of this row
    #[inline]
    #[must_use]
    pub fn kind(&self) -> QuadrantKind {
        match self {
            Self::LinearAsset(_) => QuadrantKind::LinearAsset,
            Self::Task(_) => QuadrantKind::Task,
        }
    }

    /// Primary text field (label or description)
    #[inline]
    #[must_use]
    pub fn label(&self) -> &str {
        match self {
            Self::LinearAsset(row) => &row.label,
            Self::Task(row) => &row.description,
        }
    }
}

impl From<LinearAssetRow> for QuadrantRow {
    fn from(row: LinearAssetRow) -> Self {
        Self::LinearAsset(row)
    }
}

impl From<TaskRow> for QuadrantRow {
    fn from(row: TaskRow) -> Self {
        Self::Task(row)
    }
}

/// Full contents of one quadrant, in insertion order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "shape", content = "rows", rename_all = "snake_case")]
pub enum QuadrantTable {
    LinearAsset(Vec<LinearAssetRow>),
    Task(Vec<TaskRow>),
}

impl QuadrantTable {
    /// Empty table of the given shape
    #[inline]
    #[must_use]
    pub fn empty(kind: QuadrantKind) -> Self {
        match kind {
            QuadrantKind::LinearAsset => Self::LinearAsset(Vec::new()),
            QuadrantKind::Task => Self::Task(Vec::new()),
        }
    }

    /// Shape of this table
    #[inline]
    #[must_use]
    pub fn kind(&self) -> QuadrantKind {
        match self {
            Self::LinearAsset(_) => QuadrantKind::LinearAsset,
            Self::Task(_) => QuadrantKind::Task,
        }
    }

    /// Number of rows
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            Self::LinearAsset(rows) => rows.len(),
            Self::Task(rows) => rows.len(),
        }
    }

    /// Whether the table has no rows
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl From<Vec<LinearAssetRow>> for QuadrantTable {
    fn from(rows: Vec<LinearAssetRow>) -> Self {
        Self::LinearAsset(rows)
    }
}

impl From<Vec<TaskRow>> for QuadrantTable {
    fn from(rows: Vec<TaskRow>) -> Self {
        Self::Task(rows)
    }
}
