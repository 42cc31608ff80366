use std::sync::Arc;

use async_trait::async_trait;
use rust_decimal::prelude::ToPrimitive;
use rust_xlsxwriter::{Format, Workbook, Worksheet};

use crate::{
    error::{CodecError, CodecLoadError},
    rows::{CellValue, EXPORT_COLUMNS, ExportRow},
};

/// Serializes export rows into a binary spreadsheet.
pub trait SpreadsheetCodec: Send + Sync {
    fn encode(&self, sheet_title: &str, rows: &[ExportRow]) -> Result<Vec<u8>, CodecError>;
}

/// Produces a ready-to-use codec. Loading may be slow or fail.
#[async_trait]
pub trait CodecLoader: Send + Sync {
    async fn load(&self) -> Result<Arc<dyn SpreadsheetCodec>, CodecLoadError>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct XlsxCodec;

impl SpreadsheetCodec for XlsxCodec {
    fn encode(&self, sheet_title: &str, rows: &[ExportRow]) -> Result<Vec<u8>, CodecError> {
        let mut workbook = Workbook::new();
        let mut worksheet = Worksheet::new();
        worksheet.set_name(sheet_title)?;

        let header = Format::new().set_bold();
        for (col, title) in EXPORT_COLUMNS.iter().enumerate() {
            worksheet.write_string_with_format(0, col as u16, *title, &header)?;
        }

        for (idx, row) in rows.iter().enumerate() {
            let line = (idx + 1) as u32;
            for (col, cell) in row.cells().iter().enumerate() {
                let col = col as u16;
                match cell {
                    CellValue::Text(text) => {
                        worksheet.write_string(line, col, text.as_str())?;
                    }
                    CellValue::Number(value) => {
                        worksheet.write_number(line, col, value.to_f64().unwrap_or_default())?;
                    }
                }
            }
        }

        workbook.push_worksheet(worksheet);
        Ok(workbook.save_to_buffer()?)
    }
}

/// Loads [`XlsxCodec`] off the async runtime and checks it can produce a
/// workbook before handing it out.
#[derive(Debug, Clone, Copy, Default)]
pub struct XlsxCodecLoader;

#[async_trait]
impl CodecLoader for XlsxCodecLoader {
    async fn load(&self) -> Result<Arc<dyn SpreadsheetCodec>, CodecLoadError> {
        tokio::task::spawn_blocking(|| {
            let codec = XlsxCodec;
            codec
                .encode("Check", &[])
                .map_err(CodecLoadError::SelfCheck)?;
            Ok(Arc::new(codec) as Arc<dyn SpreadsheetCodec>)
        })
        .await?
    }
}

#[cfg(test)]
mod tests {
    use ledger_types::AssetRecord;

    use super::*;
    use crate::rows::export_rows;

    const ZIP_MAGIC: &[u8] = b"PK";

    #[test]
    fn test_encode_produces_workbook() {
        let assets: Vec<AssetRecord> = (0..3)
            .map(|i| AssetRecord::new(format!("AF-{i}")))
            .collect();
        let rows = export_rows(&assets).unwrap();

        let bytes = XlsxCodec.encode("Depreciacion", &rows).unwrap();

        assert!(bytes.starts_with(ZIP_MAGIC));
    }

    #[test]
    fn test_invalid_sheet_title_is_rejected() {
        // Sheet names may not contain '[' or ']'.
        let result = XlsxCodec.encode("[bad]", &[]);
        assert!(matches!(result, Err(CodecError::Xlsx(_))));
    }

    #[tokio::test]
    async fn test_loader_yields_working_codec() {
        let codec = XlsxCodecLoader.load().await.unwrap();
        let bytes = codec.encode("Depreciacion", &[]).unwrap();
        assert!(bytes.starts_with(ZIP_MAGIC));
    }
}
