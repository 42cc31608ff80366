use ledger_types::{AssetRecord, Month};

use crate::error::ClientError;

/// Remote computation service owning the depreciation arithmetic.
///
/// Both calls return the complete working set; the client never patches
/// individual records.
#[async_trait::async_trait]
pub trait AssetService: Send + Sync {
    /// Fetches the full asset list (`GET /api/activos`).
    async fn list_assets(&self) -> Result<Vec<AssetRecord>, ClientError>;

    /// Projects depreciation through `month` and returns the recomputed list
    /// (`POST /api/activos/calcular/{month}`).
    async fn recompute_through(&self, month: Month) -> Result<Vec<AssetRecord>, ClientError>;
}
