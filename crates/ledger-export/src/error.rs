use std::{path::PathBuf, sync::Arc, time::Duration};

use ledger_types::ErrorKind;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CodecError {
    #[error("Workbook error: {0}")]
    Xlsx(#[from] rust_xlsxwriter::XlsxError),
}

#[derive(Debug, Error)]
pub enum CodecLoadError {
    #[error("Codec initialization task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
    #[error("Codec self-check failed: {0}")]
    SelfCheck(#[source] CodecError),
    #[error("Codec load timed out after {0:?}")]
    Timeout(Duration),
    #[error("Codec unavailable: {0}")]
    Unavailable(String),
}

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("Nothing to export: the filtered list is empty")]
    EmptySelection,
    #[error("Failed to load spreadsheet codec: {0}")]
    CodecLoad(Arc<CodecLoadError>),
    #[error("Failed to encode spreadsheet: {0}")]
    Encode(#[from] CodecError),
    #[error("Failed to write {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl ExportError {
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::EmptySelection => ErrorKind::ExportPrecondition,
            Self::CodecLoad(_) => ErrorKind::CodecLoadFailure,
            Self::Encode(_) | Self::Io { .. } => ErrorKind::ExportFailure,
        }
    }

    /// Text shown on the status line when an export fails.
    pub const fn status_text(&self) -> &'static str {
        match self.kind() {
            ErrorKind::ExportPrecondition => "No hay activos para exportar.",
            ErrorKind::CodecLoadFailure => "No se pudo cargar el exportador de Excel.",
            _ => "Error al generar el reporte.",
        }
    }
}
