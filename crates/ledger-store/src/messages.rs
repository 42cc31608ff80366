//! Operator-facing status texts.

use ledger_types::{ErrorKind, Month};

pub const LOAD_FAILED: &str = "Error conectando con Backend.";
pub const RECOMPUTE_FAILED: &str = "Error al calcular.";
pub const RECOMPUTE_UNREACHABLE: &str = "Error de conexión.";

pub fn recompute_ready(month: Month) -> String {
    format!("Vista preliminar de {} generada.", month.label())
}

pub const fn recompute_failed(kind: ErrorKind) -> &'static str {
    match kind {
        ErrorKind::NetworkFailure => RECOMPUTE_UNREACHABLE,
        _ => RECOMPUTE_FAILED,
    }
}
