//! Archive export and import
//!
//! An archive is a ZIP container holding one `quadrant_<n>.csv` entry per
//! non-empty quadrant. Import restores each quadrant independently: a bad
//! entry costs only that quadrant, a bad container costs nothing.

use crate::convention::CompletionConvention;
use crate::error::{ArchiveError, ArchiveResult, ImportWarning, TableIssue};
use crate::table::{decode_table, encode_table};
use serde::{Deserialize, Serialize};
use std::io::{Cursor, Read, Seek, Write};
use topo_model::{QuadrantId, QuadrantTable, RecordStore};
use zip::result::ZipError;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipArchive, ZipWriter};

/// Archive entry name for a quadrant
#[inline]
#[must_use]
pub fn entry_name(quadrant: QuadrantId) -> String {
    format!("quadrant_{}.csv", quadrant.number())
}

/// Entry name used by archives saved from the early dashboard
#[inline]
#[must_use]
pub fn legacy_entry_name(quadrant: QuadrantId) -> String {
    format!("cuadrante_{}.csv", quadrant.number())
}

/// Codec settings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArchiveOptions {
    /// Completion convention forced on every task table; `None` uses each
    /// layout's default
    pub completion: Option<CompletionConvention>,
    /// Also look for `cuadrante_<n>.csv` entries
    pub accept_legacy_names: bool,
}

impl Default for ArchiveOptions {
    fn default() -> Self {
        Self {
            completion: None,
            accept_legacy_names: true,
        }
    }
}

impl ArchiveOptions {
    /// Create default options
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// With forced completion convention
    #[inline]
    #[must_use]
    pub fn with_completion(mut self, convention: CompletionConvention) -> Self {
        self.completion = Some(convention);
        self
    }

    /// With legacy entry names accepted or ignored
    #[inline]
    #[must_use]
    pub fn with_legacy_names(mut self, accept: bool) -> Self {
        self.accept_legacy_names = accept;
        self
    }
}

/// Outcome of an import
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportReport {
    /// Quadrants whose tables were replaced
    pub restored: Vec<QuadrantId>,
    /// Quadrants with no entry in the archive
    pub missing: Vec<QuadrantId>,
    /// Quadrants skipped because their entry was rejected
    pub warnings: Vec<ImportWarning>,
}

impl ImportReport {
    /// Whether every present entry was restored
    #[inline]
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.warnings.is_empty()
    }

    /// Whether a quadrant was restored
    #[inline]
    #[must_use]
    pub fn restored(&self, quadrant: QuadrantId) -> bool {
        self.restored.contains(&quadrant)
    }
}

/// Reads and writes quadrant archives
#[derive(Debug, Clone, Copy, Default)]
pub struct ArchiveCodec {
    options: ArchiveOptions,
}

impl ArchiveCodec {
    /// Create codec with default options
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create codec with options
    #[inline]
    #[must_use]
    pub fn with_options(options: ArchiveOptions) -> Self {
        Self { options }
    }

    /// Current options
    #[inline]
    #[must_use]
    pub fn options(&self) -> &ArchiveOptions {
        &self.options
    }

    /// Package every non-empty quadrant into a ZIP archive
    ///
    /// # Errors
    /// [`ArchiveError`] if a table cannot be encoded or the container cannot
    /// be written.
    pub fn export(&self, store: &RecordStore) -> ArchiveResult<Vec<u8>> {
        self.export_retaining(store, &[], &[])
    }

    /// Package `store`, carrying over the `retain` quadrants from `previous`
    ///
    /// Retained entries are copied without being decoded, under their
    /// current entry name. This keeps entries that failed to import from
    /// being dropped when the session is saved again. A retained quadrant
    /// with no entry in `previous` is simply left out.
    ///
    /// # Errors
    /// [`ArchiveError::RetainConflict`] if a retained quadrant has rows in
    /// `store`, [`ArchiveError::InvalidContainer`] if `previous` cannot be
    /// opened, otherwise as [`Self::export`].
    pub fn export_retaining(
        &self,
        store: &RecordStore,
        previous: &[u8],
        retain: &[QuadrantId],
    ) -> ArchiveResult<Vec<u8>> {
        if let Some(quadrant) = retain.iter().copied().find(|q| !store.is_empty(*q)) {
            return Err(ArchiveError::RetainConflict { quadrant });
        }
        let mut previous = if retain.is_empty() {
            None
        } else {
            Some(ZipArchive::new(Cursor::new(previous)).map_err(ArchiveError::InvalidContainer)?)
        };

        let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
        let file_options =
            SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

        let mut entries = 0usize;
        for (quadrant, table) in store.iter() {
            let name = entry_name(quadrant);

            if retain.contains(&quadrant) {
                let Some(archive) = previous.as_mut() else {
                    continue;
                };
                let Some(index) = self.entry_index(archive, quadrant) else {
                    continue;
                };
                let file = archive
                    .by_index_raw(index)
                    .map_err(|e| ArchiveError::write(&name, e))?;
                writer
                    .raw_copy_file_rename(file, name.as_str())
                    .map_err(|e| ArchiveError::write(&name, e))?;
                tracing::warn!(%quadrant, "carried over entry that could not be imported");
                entries += 1;
                continue;
            }

            if table.is_empty() {
                continue;
            }
            let bytes = encode_table(table).map_err(|e| ArchiveError::encode(&name, e))?;

            writer
                .start_file(name.as_str(), file_options)
                .map_err(|e| ArchiveError::write(&name, e))?;
            writer.write_all(&bytes)?;
            entries += 1;
        }

        let bytes = writer
            .finish()
            .map_err(|e| ArchiveError::write("central directory", e))?
            .into_inner();
        tracing::info!(entries, bytes = bytes.len(), "archive exported");
        Ok(bytes)
    }

    /// Restore quadrants from an archive
    ///
    /// Every present entry is decoded before anything is replaced. Quadrants
    /// whose entry is rejected keep their previous rows and are listed in
    /// [`ImportReport::warnings`]; quadrants without an entry are untouched.
    ///
    /// # Errors
    /// [`ArchiveError::InvalidContainer`] if `bytes` is not a ZIP archive. The
    /// store is unchanged in that case.
    pub fn import(&self, bytes: &[u8], store: &mut RecordStore) -> ArchiveResult<ImportReport> {
        let mut archive =
            ZipArchive::new(Cursor::new(bytes)).map_err(ArchiveError::InvalidContainer)?;

        let mut report = ImportReport::default();
        let mut staged: Vec<(QuadrantId, QuadrantTable)> = Vec::new();

        for quadrant in QuadrantId::all() {
            let Some((name, contents)) = self.read_entry(&mut archive, quadrant) else {
                report.missing.push(quadrant);
                continue;
            };

            let decoded = contents.and_then(|raw| {
                decode_table(quadrant.kind(), &raw, self.options.completion)
            });
            match decoded {
                Ok((schema, table)) => {
                    tracing::debug!(%quadrant, ?schema, rows = table.len(), "entry decoded");
                    staged.push((quadrant, table));
                }
                Err(issue) => {
                    let warning = ImportWarning {
                        quadrant,
                        entry: name,
                        issue,
                    };
                    tracing::warn!("{warning}");
                    report.warnings.push(warning);
                }
            }
        }

        for (quadrant, table) in staged {
            // Tables are decoded for the quadrant's own kind
            if let Err(e) = store.replace(quadrant, table) {
                tracing::warn!(%quadrant, "restore rejected: {e}");
                report.warnings.push(ImportWarning {
                    quadrant,
                    entry: entry_name(quadrant),
                    issue: TableIssue::Unreadable(e.to_string()),
                });
                continue;
            }
            report.restored.push(quadrant);
        }

        tracing::info!(
            restored = report.restored.len(),
            missing = report.missing.len(),
            skipped = report.warnings.len(),
            "archive imported"
        );
        Ok(report)
    }

    /// Find and read a quadrant's entry
    ///
    /// `None` if the archive has no entry for the quadrant; otherwise the
    /// entry name and its bytes, or the reason they could not be read.
    fn read_entry<R: Read + Seek>(
        &self,
        archive: &mut ZipArchive<R>,
        quadrant: QuadrantId,
    ) -> Option<(String, Result<Vec<u8>, TableIssue>)> {
        for name in self.candidate_names(quadrant) {
            let result = match archive.by_name(&name) {
                Ok(mut file) => {
                    let mut buf = Vec::new();
                    file.read_to_end(&mut buf)
                        .map(|_| buf)
                        .map_err(|e| TableIssue::Unreadable(e.to_string()))
                }
                Err(ZipError::FileNotFound) => continue,
                Err(e) => Err(TableIssue::Unreadable(e.to_string())),
            };
            return Some((name, result));
        }
        None
    }

    /// Entry names tried for a quadrant, in order of preference
    fn candidate_names(&self, quadrant: QuadrantId) -> Vec<String> {
        let mut names = vec![entry_name(quadrant)];
        if self.options.accept_legacy_names {
            names.push(legacy_entry_name(quadrant));
        }
        names
    }

    fn entry_index<R: Read + Seek>(
        &self,
        archive: &ZipArchive<R>,
        quadrant: QuadrantId,
    ) -> Option<usize> {
        self.candidate_names(quadrant)
            .iter()
            .find_map(|name| archive.index_for_name(name))
    }
}

/// Export with default options
///
/// # Errors
/// See [`ArchiveCodec::export`].
pub fn export(store: &RecordStore) -> ArchiveResult<Vec<u8>> {
    ArchiveCodec::new().export(store)
}

/// Import with default options
///
/// # Errors
/// See [`ArchiveCodec::import`].
pub fn import(bytes: &[u8], store: &mut RecordStore) -> ArchiveResult<ImportReport> {
    ArchiveCodec::new().import(bytes, store)
}

#[cfg(test)]
mod tests {
    use super::*;
    use topo_model::{LinearAssetRow, TaskRow};

    fn archive_with(entries: &[(&str, &str)]) -> Vec<u8> {
        let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
        for (name, body) in entries {
            writer
                .start_file(*name, SimpleFileOptions::default())
                .unwrap();
            writer.write_all(body.as_bytes()).unwrap();
        }
        writer.finish().unwrap().into_inner()
    }

    fn entry_names(bytes: &[u8]) -> Vec<String> {
        let archive = ZipArchive::new(Cursor::new(bytes)).unwrap();
        let mut names: Vec<String> = archive.file_names().map(ToString::to_string).collect();
        names.sort();
        names
    }

    #[test]
    fn entry_names_are_deterministic() {
        assert_eq!(entry_name(QuadrantId::Q3), "quadrant_3.csv");
        assert_eq!(legacy_entry_name(QuadrantId::Q3), "cuadrante_3.csv");
    }

    #[test]
    fn export_skips_empty_quadrants() {
        let mut store = RecordStore::new();
        store.append(QuadrantId::Q1, LinearAssetRow::new("VIAL 1", 1.0).into());
        store.append(QuadrantId::Q3, TaskRow::road("VIA", 2.0).into());

        let bytes = export(&store).unwrap();
        assert_eq!(entry_names(&bytes), vec!["quadrant_1.csv", "quadrant_3.csv"]);
    }

    #[test]
    fn export_empty_store_has_no_entries() {
        let bytes = export(&RecordStore::new()).unwrap();
        assert!(entry_names(&bytes).is_empty());
    }

    #[test]
    fn import_rejects_non_archive() {
        let mut store = RecordStore::new();
        store.append(QuadrantId::Q1, LinearAssetRow::new("VIAL 1", 1.0).into());
        let before = store.clone();

        let err = import(b"definitely not a zip", &mut store).unwrap_err();
        assert!(matches!(err, ArchiveError::InvalidContainer(_)));
        assert_eq!(store, before);
    }

    #[test]
    fn import_missing_entries_leave_tables() {
        let mut store = RecordStore::new();
        store.append(QuadrantId::Q4, LinearAssetRow::new("KEEP", 9.0).into());

        let bytes = archive_with(&[("quadrant_1.csv", "Vial;Levantamiento (m)\nNEW;3\n")]);
        let report = import(&bytes, &mut store).unwrap();

        assert_eq!(report.restored, vec![QuadrantId::Q1]);
        assert_eq!(
            report.missing,
            vec![QuadrantId::Q2, QuadrantId::Q3, QuadrantId::Q4]
        );
        assert!(report.is_clean());
        assert_eq!(store.len(QuadrantId::Q1), 1);
        assert_eq!(store.len(QuadrantId::Q4), 1);
    }

    #[test]
    fn import_schema_mismatch_keeps_old_rows() {
        let mut store = RecordStore::new();
        store.append(QuadrantId::Q1, LinearAssetRow::new("OLD", 5.0).into());

        let bytes = archive_with(&[("quadrant_1.csv", "Vial;Metros;Extra\nX;1;2\n")]);
        let report = import(&bytes, &mut store).unwrap();

        assert!(!report.is_clean());
        assert_eq!(report.warnings[0].quadrant, QuadrantId::Q1);
        assert!(matches!(
            report.warnings[0].issue,
            TableIssue::ColumnCount { found: 3, .. }
        ));
        let QuadrantTable::LinearAsset(rows) = store.table(QuadrantId::Q1) else {
            panic!("Q1 should hold linear-asset rows");
        };
        assert_eq!(rows[0].label, "OLD");
    }

    #[test]
    fn export_retaining_copies_rejected_entry() {
        let broken = "Descripción;Tipo;Valor;Localización;Georradar;Levantamiento\nINT;Interferencia;1;True;;;;extra\n";
        let previous = archive_with(&[("cuadrante_2.csv", broken)]);

        let mut store = RecordStore::new();
        let report = import(&previous, &mut store).unwrap();
        assert_eq!(report.warnings.len(), 1);
        store.append(QuadrantId::Q1, LinearAssetRow::new("VIAL 1", 4.0).into());

        let bytes = ArchiveCodec::new()
            .export_retaining(&store, &previous, &[QuadrantId::Q2])
            .unwrap();
        assert_eq!(entry_names(&bytes), vec!["quadrant_1.csv", "quadrant_2.csv"]);

        let mut archive = ZipArchive::new(Cursor::new(bytes.as_slice())).unwrap();
        let mut carried = String::new();
        archive
            .by_name("quadrant_2.csv")
            .unwrap()
            .read_to_string(&mut carried)
            .unwrap();
        assert_eq!(carried, broken);
    }

    #[test]
    fn export_retaining_refuses_new_rows_in_retained_quadrant() {
        let previous = archive_with(&[("quadrant_2.csv", "bad")]);
        let mut store = RecordStore::new();
        store.append(QuadrantId::Q2, TaskRow::road("VIA", 1.0).into());

        let err = ArchiveCodec::new()
            .export_retaining(&store, &previous, &[QuadrantId::Q2])
            .unwrap_err();
        assert!(matches!(
            err,
            ArchiveError::RetainConflict {
                quadrant: QuadrantId::Q2
            }
        ));
    }

    #[test]
    fn import_legacy_names() {
        let bytes = archive_with(&[("cuadrante_2.csv", "Descripción;Tipo;Valor;Localización;Georradar;Levantamiento\nVIA;Vía;10.0;;;\n")]);

        let mut store = RecordStore::new();
        let report = import(&bytes, &mut store).unwrap();
        assert!(report.restored(QuadrantId::Q2));

        let mut store = RecordStore::new();
        let strict = ArchiveCodec::with_options(ArchiveOptions::new().with_legacy_names(false));
        let report = strict.import(&bytes, &mut store).unwrap();
        assert!(report.restored.is_empty());
        assert_eq!(report.missing.len(), 4);
    }

    #[test]
    fn import_prefers_current_name() {
        let bytes = archive_with(&[
            ("cuadrante_1.csv", "Vial;Levantamiento (m)\nLEGACY;1\n"),
            ("quadrant_1.csv", "Vial;Levantamiento (m)\nCURRENT;2\n"),
        ]);
        let mut store = RecordStore::new();
        import(&bytes, &mut store).unwrap();

        let QuadrantTable::LinearAsset(rows) = store.table(QuadrantId::Q1) else {
            panic!("Q1 should hold linear-asset rows");
        };
        assert_eq!(rows[0].label, "CURRENT");
    }
}
