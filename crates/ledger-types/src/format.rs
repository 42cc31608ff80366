use rust_decimal::{Decimal, RoundingStrategy};

/// Placeholder rendered for an absent amount.
pub const MISSING: &str = "-";

/// Renders an amount with two decimals and `,` thousands separators
/// (`1234567.891` becomes `1,234,567.89`). Absent amounts render as `-`.
pub fn format_money(amount: Option<Decimal>) -> String {
    let Some(amount) = amount else {
        return MISSING.to_string();
    };

    let mut rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(2);
    let plain = rounded.abs().to_string();
    let (int_part, frac_part) = plain.split_once('.').unwrap_or((plain.as_str(), "00"));

    let grouped = group_thousands(int_part);

    let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
        "-"
    } else {
        ""
    };
    format!("{sign}{grouped}.{frac_part}")
}

/// Renders a record count with `,` thousands separators.
pub fn format_count(count: usize) -> String {
    group_thousands(&count.to_string())
}

fn group_thousands(digits: &str) -> String {
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, digit) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }
    grouped
}

/// Renders a depreciation rate fraction as a whole percentage (`0.125` becomes
/// `13%`). Absent rates render as `0%`.
pub fn format_rate(rate: Option<Decimal>) -> String {
    let pct = rate.unwrap_or_default() * Decimal::ONE_HUNDRED;
    let pct = pct
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .normalize();
    format!("{pct}%")
}

#[cfg(test)]
mod tests {
    use rust_decimal::dec;

    use super::*;

    #[test]
    fn test_format_money() {
        assert_eq!(format_money(None), "-");
        assert_eq!(format_money(Some(dec!(0))), "0.00");
        assert_eq!(format_money(Some(dec!(12.5))), "12.50");
        assert_eq!(format_money(Some(dec!(999.999))), "1,000.00");
        assert_eq!(format_money(Some(dec!(1234567.891))), "1,234,567.89");
        assert_eq!(format_money(Some(dec!(-4321.005))), "-4,321.01");
    }

    #[test]
    fn test_format_count() {
        assert_eq!(format_count(0), "0");
        assert_eq!(format_count(999), "999");
        assert_eq!(format_count(12_500), "12,500");
        assert_eq!(format_count(1_000_000), "1,000,000");
    }

    #[test]
    fn test_format_rate() {
        assert_eq!(format_rate(None), "0%");
        assert_eq!(format_rate(Some(dec!(0.1))), "10%");
        assert_eq!(format_rate(Some(dec!(0.125))), "13%");
        assert_eq!(format_rate(Some(dec!(1))), "100%");
    }
}
