//! Completion cell conventions
//!
//! Field sheets recorded sub-task completion as checkboxes, 0/1 counts or
//! free-text status. A [`CompletionConvention`] says which of these a column
//! uses; `Inferred` reads each cell on its own.
//!
//! Status text that `Inferred` would read as a boolean or a number is written
//! with a leading [`TEXT_MARKER`], the way spreadsheets force a cell to text.

use serde::{Deserialize, Serialize};
use topo_model::{coerce_number, CompletionMark};

/// How completion cells are decoded
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CompletionConvention {
    /// Per cell: boolean word, then number, then status text
    #[default]
    Inferred,
    /// Checkbox columns
    Boolean,
    /// Numeric columns
    Count,
    /// Free-text status columns
    StatusText,
}

/// Prefix that forces a completion cell to be read as status text
pub const TEXT_MARKER: char = '\'';

fn parse_bool_word(cell: &str) -> Option<bool> {
    match cell.to_lowercase().as_str() {
        "true" | "verdadero" => Some(true),
        "false" | "falso" => Some(false),
        _ => None,
    }
}

impl CompletionConvention {
    /// Decode one cell; blank cells are always [`CompletionMark::Unset`]
    ///
    /// Under `Inferred` and `StatusText` a cell starting with [`TEXT_MARKER`]
    /// is status text, kept verbatim after the marker.
    #[must_use]
    pub fn decode(self, cell: &str) -> CompletionMark {
        if matches!(self, Self::Inferred | Self::StatusText) {
            if let Some(text) = cell.trim_start().strip_prefix(TEXT_MARKER) {
                return CompletionMark::StatusText(text.to_string());
            }
        }

        let cell = cell.trim();
        if cell.is_empty() {
            return CompletionMark::Unset;
        }

        match self {
            Self::Inferred => parse_bool_word(cell)
                .map(CompletionMark::Boolean)
                .or_else(|| coerce_number(cell).map(CompletionMark::Count))
                .unwrap_or_else(|| CompletionMark::StatusText(cell.to_string())),
            Self::Boolean => match cell.to_lowercase().as_str() {
                "1" | "x" | "si" | "sí" | "yes" => CompletionMark::Boolean(true),
                "0" | "no" => CompletionMark::Boolean(false),
                other => parse_bool_word(other).map_or(CompletionMark::Unset, CompletionMark::Boolean),
            },
            Self::Count => coerce_number(cell).map_or(CompletionMark::Unset, CompletionMark::Count),
            Self::StatusText => CompletionMark::StatusText(cell.to_string()),
        }
    }
}

/// Encode a mark so that [`CompletionConvention::Inferred`] reads it back
#[must_use]
pub fn encode_mark(mark: &CompletionMark) -> String {
    match mark {
        CompletionMark::Unset => String::new(),
        CompletionMark::Boolean(true) => "True".to_string(),
        CompletionMark::Boolean(false) => "False".to_string(),
        CompletionMark::Count(n) => format_number(Some(*n)),
        CompletionMark::StatusText(text) => encode_status_text(text),
    }
}

fn encode_status_text(text: &str) -> String {
    let reads_back = text == text.trim()
        && !text.starts_with(TEXT_MARKER)
        && CompletionConvention::Inferred.decode(text) == CompletionMark::StatusText(text.to_string());
    if reads_back {
        text.to_string()
    } else {
        format!("{TEXT_MARKER}{text}")
    }
}

/// Numeric cell text; absent and non-finite values become blank
#[must_use]
pub fn format_number(value: Option<f64>) -> String {
    match value {
        Some(v) if v.is_finite() => v.to_string(),
        _ => String::new(),
    }
}
