use ledger_types::AssetRecord;
use rust_decimal::Decimal;

/// The five KPI figures shown above the table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct KpiTotals {
    pub opening_accumulated: Decimal,
    pub current_year_total: Decimal,
    pub accumulated_total: Decimal,
    pub historical_value: Decimal,
    pub net_cost: Decimal,
}

impl KpiTotals {
    fn add(&mut self, asset: &AssetRecord) {
        self.opening_accumulated += asset.opening_accumulated_depreciation.unwrap_or_default();
        self.current_year_total += asset.total_depreciation_current_year.unwrap_or_default();
        self.accumulated_total += asset.total_accumulated_depreciation.unwrap_or_default();
        self.historical_value += asset.historical_value.unwrap_or_default();
        self.net_cost += asset.net_cost.unwrap_or_default();
    }
}

/// Sums each KPI field over `assets`, counting absent values as zero.
pub fn aggregate<'a>(assets: impl IntoIterator<Item = &'a AssetRecord>) -> KpiTotals {
    assets.into_iter().fold(KpiTotals::default(), |mut totals, asset| {
        totals.add(asset);
        totals
    })
}
