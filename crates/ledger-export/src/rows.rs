use ledger_types::{AssetRecord, Month, format_rate};
use rust_decimal::Decimal;

use crate::error::ExportError;

/// Column headers, in export order.
pub const EXPORT_COLUMNS: [&str; 21] = [
    "Código",
    "CeCo",
    "Descripción",
    "Valor Histórico",
    "% Depreciación",
    "Dep. Acum. Inicio",
    "Ene",
    "Feb",
    "Mar",
    "Abr",
    "May",
    "Jun",
    "Jul",
    "Ago",
    "Set",
    "Oct",
    "Nov",
    "Dic",
    "Total Año",
    "Total Acumulado",
    "Costo Neto",
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CellValue {
    Text(String),
    Number(Decimal),
}

/// One flat row, its cells aligned with [`EXPORT_COLUMNS`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportRow {
    cells: Vec<CellValue>,
}

impl ExportRow {
    fn from_asset(asset: &AssetRecord) -> Self {
        let text = |value: Option<&String>| CellValue::Text(value.cloned().unwrap_or_default());
        let amount = |value: Option<Decimal>| CellValue::Number(value.unwrap_or_default());

        let mut cells = Vec::with_capacity(EXPORT_COLUMNS.len());
        cells.push(CellValue::Text(asset.code.clone()));
        cells.push(text(asset.cost_center.as_ref()));
        cells.push(text(asset.description.as_ref()));
        cells.push(amount(asset.historical_value));
        cells.push(CellValue::Text(format_rate(asset.depreciation_rate)));
        cells.push(amount(asset.opening_accumulated_depreciation));
        cells.extend(
            Month::ALL
                .iter()
                .map(|&month| amount(asset.monthly_depreciation.get(month))),
        );
        cells.push(amount(asset.total_depreciation_current_year));
        cells.push(amount(asset.total_accumulated_depreciation));
        cells.push(amount(asset.net_cost));

        Self { cells }
    }

    pub fn cells(&self) -> &[CellValue] {
        &self.cells
    }

    /// `(header, value)` pairs in column order.
    pub fn entries(&self) -> impl Iterator<Item = (&'static str, &CellValue)> + '_ {
        EXPORT_COLUMNS.iter().copied().zip(&self.cells)
    }

    pub fn get(&self, header: &str) -> Option<&CellValue> {
        self.entries()
            .find(|(name, _)| *name == header)
            .map(|(_, value)| value)
    }
}

/// Flattens the filtered (not paginated) list into export rows, one per
/// asset in list order. An empty list is rejected.
pub fn export_rows<'a>(
    assets: impl IntoIterator<Item = &'a AssetRecord>,
) -> Result<Vec<ExportRow>, ExportError> {
    let rows: Vec<ExportRow> = assets.into_iter().map(ExportRow::from_asset).collect();
    if rows.is_empty() {
        return Err(ExportError::EmptySelection);
    }
    Ok(rows)
}
