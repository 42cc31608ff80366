use std::fmt;

use rust_decimal::Decimal;

use crate::{asset::AssetRecord, month::Month};

/// A range violation found on a record. Records are trusted as served, so
/// issues are reported and logged, never used to drop data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationIssue {
    RateOutOfRange(Decimal),
    NegativeAmount {
        field: &'static str,
        value: Decimal,
    },
    NegativeMonthly {
        month: Month,
        value: Decimal,
    },
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::RateOutOfRange(rate) => write!(f, "depreciation rate {rate} outside [0, 1]"),
            Self::NegativeAmount { field, value } => write!(f, "{field} is negative ({value})"),
            Self::NegativeMonthly { month, value } => {
                write!(f, "{month} depreciation is negative ({value})")
            }
        }
    }
}

impl AssetRecord {
    pub fn validate(&self) -> Vec<ValidationIssue> {
        let mut issues = Vec::new();

        if let Some(rate) = self.depreciation_rate
            && !(Decimal::ZERO..=Decimal::ONE).contains(&rate)
        {
            issues.push(ValidationIssue::RateOutOfRange(rate));
        }

        let amounts = [
            (
                "opening accumulated depreciation",
                self.opening_accumulated_depreciation,
            ),
            ("historical value", self.historical_value),
        ];
        for (field, value) in amounts {
            if let Some(value) = value
                && value < Decimal::ZERO
            {
                issues.push(ValidationIssue::NegativeAmount { field, value });
            }
        }

        for (month, value) in self.monthly_depreciation.iter() {
            if let Some(value) = value
                && value < Decimal::ZERO
            {
                issues.push(ValidationIssue::NegativeMonthly { month, value });
            }
        }

        issues
    }
}

/// Summary of the issues found across a fetched list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationReport {
    pub records_with_issues: usize,
    pub total_issues: usize,
    /// Codes of the first offending records, capped at `SAMPLE_SIZE`.
    pub sample_codes: Vec<String>,
}

impl ValidationReport {
    pub const SAMPLE_SIZE: usize = 5;

    pub fn from_records(records: &[AssetRecord]) -> Self {
        let mut report = Self::default();
        for record in records {
            let issues = record.validate();
            if issues.is_empty() {
                continue;
            }
            report.records_with_issues += 1;
            report.total_issues += issues.len();
            if report.sample_codes.len() < Self::SAMPLE_SIZE {
                report.sample_codes.push(record.code.clone());
            }
        }
        report
    }

    pub const fn is_clean(&self) -> bool {
        self.records_with_issues == 0
    }
}
