use std::ops::Index;

use rust_decimal::Decimal;

use crate::month::Month;

/// Realized depreciation for each month of the current year, January first.
/// `None` marks a month the remote service has not projected yet.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MonthlyDepreciation([Option<Decimal>; 12]);

impl MonthlyDepreciation {
    pub const fn new(values: [Option<Decimal>; 12]) -> Self {
        Self(values)
    }

    pub const fn get(&self, month: Month) -> Option<Decimal> {
        self.0[month.index()]
    }

    pub const fn set(&mut self, month: Month, value: Option<Decimal>) {
        self.0[month.index()] = value;
    }

    /// Iterates `(month, value)` pairs in calendar order.
    pub fn iter(&self) -> impl Iterator<Item = (Month, Option<Decimal>)> + '_ {
        Month::ALL.iter().map(|m| (*m, self.get(*m)))
    }
}

impl Index<Month> for MonthlyDepreciation {
    type Output = Option<Decimal>;

    fn index(&self, month: Month) -> &Self::Output {
        &self.0[month.index()]
    }
}

/// One depreciable asset line, as computed by the remote service.
///
/// The derived totals (`total_depreciation_current_year`,
/// `total_accumulated_depreciation`, `net_cost`) are trusted as given: the
/// client aggregates and displays them but never re-derives them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AssetRecord {
    pub code: String,
    pub cost_center: Option<String>,
    pub description: Option<String>,
    /// Fraction in `[0, 1]`.
    pub depreciation_rate: Option<Decimal>,
    pub opening_accumulated_depreciation: Option<Decimal>,
    pub monthly_depreciation: MonthlyDepreciation,
    pub total_depreciation_current_year: Option<Decimal>,
    pub total_accumulated_depreciation: Option<Decimal>,
    pub historical_value: Option<Decimal>,
    pub net_cost: Option<Decimal>,
}

impl AssetRecord {
    pub fn new(code: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            ..Self::default()
        }
    }

    /// Case-insensitive substring match on the code or the cost center.
    /// `needle` must already be lowercased.
    pub fn matches_lowercase(&self, needle: &str) -> bool {
        self.code.to_lowercase().contains(needle)
            || self
                .cost_center
                .as_deref()
                .is_some_and(|cc| cc.to_lowercase().contains(needle))
    }
}

/// An immutable working set of assets in server response order.
///
/// Lists are never edited in place: every refresh or recompute builds a new
/// list with a higher `version`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AssetList {
    version: u64,
    records: Vec<AssetRecord>,
}

impl AssetList {
    pub const fn new(version: u64, records: Vec<AssetRecord>) -> Self {
        Self { version, records }
    }

    /// The empty list held before the first successful load.
    pub const fn empty() -> Self {
        Self {
            version: 0,
            records: Vec::new(),
        }
    }

    pub const fn version(&self) -> u64 {
        self.version
    }

    pub fn records(&self) -> &[AssetRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal::dec;

    use super::*;

    #[test]
    fn test_monthly_depreciation_access() {
        let mut monthly = MonthlyDepreciation::default();
        monthly.set(Month::Jun, Some(dec!(12.5)));

        assert_eq!(monthly.get(Month::Jun), Some(dec!(12.5)));
        assert_eq!(monthly[Month::Jan], None);
        let realized: Vec<Month> = monthly
            .iter()
            .filter_map(|(m, v)| v.map(|_| m))
            .collect();
        assert_eq!(realized, vec![Month::Jun]);
    }

    #[test]
    fn test_matches_code_or_cost_center() {
        let asset = AssetRecord {
            cost_center: Some("CC1-Lima".to_string()),
            ..AssetRecord::new("MAQ-0042")
        };

        assert!(asset.matches_lowercase("maq"));
        assert!(asset.matches_lowercase("cc1"));
        assert!(asset.matches_lowercase("lima"));
        assert!(!asset.matches_lowercase("cc2"));
    }

    #[test]
    fn test_missing_cost_center_never_matches() {
        let asset = AssetRecord::new("VEH-1");
        assert!(!asset.matches_lowercase("cc"));
    }
}
