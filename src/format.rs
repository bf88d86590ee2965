//! Display formatting for presentation layers
//!
//! String shaping only; every value arrives already computed. Rates are
//! fractions (0.045 = 4.5%) and currency is in absolute units, matching the
//! parameter contract.

/// Whole-unit currency with thousands separators: `$1,234,568`, `-$500`
pub fn currency(value: f64) -> String {
    let rounded = value.round();
    let negative = rounded < 0.0;
    let digits = format!("{:.0}", rounded.abs());

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    if negative {
        format!("-${}", grouped)
    } else {
        format!("${}", grouped)
    }
}

/// Compact currency for chart axes and summaries: `$100.0M`, `$1.5B`
pub fn currency_compact(value: f64) -> String {
    let abs = value.abs();
    let sign = if value < 0.0 { "-" } else { "" };
    if abs >= 1e9 {
        format!("{}${:.1}B", sign, abs / 1e9)
    } else if abs >= 1e6 {
        format!("{}${:.1}M", sign, abs / 1e6)
    } else if abs >= 1e3 {
        format!("{}${:.1}K", sign, abs / 1e3)
    } else {
        format!("{}${:.0}", sign, abs)
    }
}

/// Fraction as a percentage with two decimals: `0.1736` -> `17.36%`
pub fn percent(fraction: f64) -> String {
    format!("{:.2}%", fraction * 100.0)
}

/// Investment multiple: `2.5` -> `2.50x`
pub fn multiple(value: f64) -> String {
    format!("{:.2}x", value)
}

/// Signed basis points, whole numbers: `142.4` -> `+142 bps`
pub fn bps(value: f64) -> String {
    if value >= 0.0 {
        format!("+{:.0} bps", value)
    } else {
        format!("{:.0} bps", value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_currency_groups_thousands() {
        assert_eq!(currency(1_234_567.89), "$1,234,568");
        assert_eq!(currency(0.0), "$0");
        assert_eq!(currency(999.0), "$999");
        assert_eq!(currency(-500.4), "-$500");
        assert_eq!(currency(100_000_000.0), "$100,000,000");
    }

    #[test]
    fn test_currency_compact_scales() {
        assert_eq!(currency_compact(100_000_000.0), "$100.0M");
        assert_eq!(currency_compact(1_500_000_000.0), "$1.5B");
        assert_eq!(currency_compact(25_300.0), "$25.3K");
        assert_eq!(currency_compact(12.0), "$12");
        assert_eq!(currency_compact(-2_000_000.0), "-$2.0M");
    }

    #[test]
    fn test_percent_and_multiple() {
        assert_eq!(percent(0.1736), "17.36%");
        assert_eq!(percent(0.0), "0.00%");
        assert_eq!(multiple(2.5), "2.50x");
    }

    #[test]
    fn test_bps_carries_sign() {
        assert_eq!(bps(142.4), "+142 bps");
        assert_eq!(bps(0.0), "+0 bps");
        assert_eq!(bps(-17.8), "-18 bps");
    }
}
