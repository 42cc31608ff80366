//! Export of the filtered asset list to an xlsx workbook.
//!
//! Rows are flattened by [`export_rows`], serialized by a
//! [`SpreadsheetCodec`] obtained lazily through [`LazyCodec`] and written to
//! disk by [`Exporter`].

pub mod codec;
pub mod error;
pub mod loader;
pub mod rows;
pub mod service;

pub use codec::{CodecLoader, SpreadsheetCodec, XlsxCodec, XlsxCodecLoader};
pub use error::{CodecError, CodecLoadError, ExportError};
pub use loader::LazyCodec;
pub use rows::{CellValue, EXPORT_COLUMNS, ExportRow, export_rows};
pub use service::{ExportArtifact, Exporter, SHEET_TITLE, report_file_name};
