use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use ledger_types::AssetRecord;
use tracing::info;

use crate::{error::ExportError, loader::LazyCodec, rows::export_rows};

pub const SHEET_TITLE: &str = "Depreciacion";

/// `Reporte_Depreciacion_<YYYY-MM-DD>.xlsx`
pub fn report_file_name(date: NaiveDate) -> String {
    format!("Reporte_Depreciacion_{}.xlsx", date.format("%Y-%m-%d"))
}

/// A spreadsheet written to disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportArtifact {
    pub path: PathBuf,
    pub file_name: String,
    pub rows: usize,
    pub bytes: usize,
}

impl ExportArtifact {
    pub fn status_text(&self) -> String {
        format!("Reporte exportado: {}", self.file_name)
    }
}

pub struct Exporter {
    codec: LazyCodec,
    output_dir: PathBuf,
}

impl Exporter {
    pub fn new(codec: LazyCodec, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            codec,
            output_dir: output_dir.into(),
        }
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    pub const fn codec(&self) -> &LazyCodec {
        &self.codec
    }

    /// Writes `assets` to `<output_dir>/Reporte_Depreciacion_<today>.xlsx`.
    ///
    /// An empty selection is rejected before the codec is touched.
    pub async fn export<'a>(
        &self,
        assets: impl IntoIterator<Item = &'a AssetRecord>,
        today: NaiveDate,
    ) -> Result<ExportArtifact, ExportError> {
        let rows = export_rows(assets)?;
        let codec = self.codec.get().await.map_err(ExportError::CodecLoad)?;
        let bytes = codec.encode(SHEET_TITLE, &rows)?;

        let file_name = report_file_name(today);
        let path = self.output_dir.join(&file_name);
        tokio::fs::write(&path, &bytes)
            .await
            .map_err(|source| ExportError::Io {
                path: path.clone(),
                source,
            })?;

        info!(
            rows = rows.len(),
            bytes = bytes.len(),
            path = %path.display(),
            "Exported asset report"
        );
        Ok(ExportArtifact {
            path,
            file_name,
            rows: rows.len(),
            bytes: bytes.len(),
        })
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use ledger_types::ErrorKind;

    use super::*;
    use crate::codec::XlsxCodecLoader;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, 7).unwrap()
    }

    fn exporter(dir: &Path) -> Exporter {
        Exporter::new(LazyCodec::new(Arc::new(XlsxCodecLoader)), dir)
    }

    #[test]
    fn test_report_file_name() {
        assert_eq!(
            report_file_name(date()),
            "Reporte_Depreciacion_2025-03-07.xlsx"
        );
    }

    #[tokio::test]
    async fn test_export_writes_artifact() {
        let dir = tempfile::tempdir().unwrap();
        let assets: Vec<AssetRecord> = ["AF-1", "AF-2"].into_iter().map(AssetRecord::new).collect();

        let artifact = exporter(dir.path()).export(&assets, date()).await.unwrap();

        assert_eq!(artifact.rows, 2);
        assert_eq!(artifact.file_name, "Reporte_Depreciacion_2025-03-07.xlsx");
        assert_eq!(artifact.path, dir.path().join(&artifact.file_name));
        let written = std::fs::read(&artifact.path).unwrap();
        assert_eq!(written.len(), artifact.bytes);
        assert!(written.starts_with(b"PK"));
        assert_eq!(
            artifact.status_text(),
            "Reporte exportado: Reporte_Depreciacion_2025-03-07.xlsx"
        );
    }

    #[tokio::test]
    async fn test_empty_selection_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let exporter = exporter(dir.path());

        let err = exporter.export(std::iter::empty(), date()).await.unwrap_err();

        assert_eq!(err.kind(), ErrorKind::ExportPrecondition);
        assert!(!exporter.codec().is_loaded());
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[tokio::test]
    async fn test_missing_directory_is_export_failure() {
        let dir = tempfile::tempdir().unwrap();
        let exporter = exporter(&dir.path().join("missing"));

        let err = exporter
            .export(&[AssetRecord::new("AF-1")], date())
            .await
            .unwrap_err();

        assert!(matches!(err, ExportError::Io { .. }));
        assert_eq!(err.kind(), ErrorKind::ExportFailure);
    }
}
