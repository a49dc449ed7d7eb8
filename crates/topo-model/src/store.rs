//! Per-quadrant record tables
//!
//! [`RecordStore`] owns exactly one [`QuadrantTable`] per quadrant. Rows are
//! only ever appended one at a time or replaced wholesale.

use crate::error::{ModelError, ModelResult};
use crate::quadrant::QuadrantId;
use crate::record::{QuadrantRow, QuadrantTable};
use serde::{Deserialize, Serialize};

/// Record tables for the four quadrants
///
/// Serialized as the array of tables in quadrant order. Deserializing checks
/// each table's row shape against its quadrant, like [`RecordStore::replace`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(
    try_from = "[QuadrantTable; QuadrantId::COUNT]",
    into = "[QuadrantTable; QuadrantId::COUNT]"
)]
pub struct RecordStore {
    tables: [QuadrantTable; QuadrantId::COUNT],
}

impl Default for RecordStore {
    fn default() -> Self {
        Self::new()
    }
}

impl RecordStore {
    /// Create store with one empty table per quadrant
    #[must_use]
    pub fn new() -> Self {
        Self {
            tables: QuadrantId::all().map(|q| QuadrantTable::empty(q.kind())),
        }
    }

    /// Append a row to a quadrant
    ///
    /// Returns `false` without touching the table when the label is blank or
    /// the row shape does not belong in this quadrant.
    pub fn append(&mut self, quadrant: QuadrantId, row: QuadrantRow) -> bool {
        if row.label().trim().is_empty() {
            tracing::debug!(%quadrant, "ignoring row with empty label");
            return false;
        }

        match (&mut self.tables[quadrant.index()], row) {
            (QuadrantTable::LinearAsset(rows), QuadrantRow::LinearAsset(row)) => rows.push(row),
            (QuadrantTable::Task(rows), QuadrantRow::Task(row)) => rows.push(row),
            (table, row) => {
                tracing::debug!(
                    %quadrant,
                    expected = %table.kind(),
                    actual = %row.kind(),
                    "ignoring row of foreign shape"
                );
                return false;
            }
        }
        true
    }

    /// Replace a quadrant's table wholesale
    ///
    /// Rows are stored as given; blank labels and absent values are kept and
    /// only neutralized when aggregated.
    ///
    /// # Errors
    /// [`ModelError::ShapeMismatch`] if `table` has the wrong row shape. The
    /// existing table is left untouched.
    pub fn replace(&mut self, quadrant: QuadrantId, table: QuadrantTable) -> ModelResult<()> {
        let expected = quadrant.kind();
        if table.kind() != expected {
            return Err(ModelError::shape_mismatch(quadrant, expected, table.kind()));
        }
        tracing::debug!(%quadrant, rows = table.len(), "replacing quadrant table");
        self.tables[quadrant.index()] = table;
        Ok(())
    }

    /// Table for a quadrant
    #[inline]
    #[must_use]
    pub fn table(&self, quadrant: QuadrantId) -> &QuadrantTable {
        &self.tables[quadrant.index()]
    }

    /// Row count for a quadrant
    #[inline]
    #[must_use]
    pub fn len(&self, quadrant: QuadrantId) -> usize {
        self.table(quadrant).len()
    }

    /// Whether a quadrant has no rows
    #[inline]
    #[must_use]
    pub fn is_empty(&self, quadrant: QuadrantId) -> bool {
        self.table(quadrant).is_empty()
    }

    /// Total rows across all quadrants
    #[must_use]
    pub fn total_rows(&self) -> usize {
        self.tables.iter().map(QuadrantTable::len).sum()
    }

    /// Iterate quadrants with their tables
    pub fn iter(&self) -> impl Iterator<Item = (QuadrantId, &QuadrantTable)> {
        QuadrantId::all().into_iter().zip(self.tables.iter())
    }
}

impl TryFrom<[QuadrantTable; QuadrantId::COUNT]> for RecordStore {
    type Error = ModelError;

    fn try_from(tables: [QuadrantTable; QuadrantId::COUNT]) -> ModelResult<Self> {
        let mut store = Self::new();
        for (quadrant, table) in QuadrantId::all().into_iter().zip(tables) {
            store.replace(quadrant, table)?;
        }
        Ok(store)
    }
}

impl From<RecordStore> for [QuadrantTable; QuadrantId::COUNT] {
    fn from(store: RecordStore) -> Self {
        store.tables
    }
}
