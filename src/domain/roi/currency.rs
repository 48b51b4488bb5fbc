//! Number formatting for ROI display.

/// Rounds half away from zero to `decimals` places and formats with exactly
/// that many places.
pub fn fixed(value: f64, decimals: u32) -> String {
    let factor = 10f64.powi(decimals as i32);
    let rounded = (value * factor).round() / factor;
    // avoid "-0.0"
    let rounded = if rounded == 0.0 { 0.0 } else { rounded };
    format!("{:.*}", decimals as usize, rounded)
}

/// Formats absolute currency units.
///
/// - at least 1,000,000: `$X.YM USD`
/// - at least 1,000: `$XK`
/// - anything smaller (including negatives): `$` plus the grouped number
pub fn format_currency(value: f64) -> String {
    if !value.is_finite() {
        return "N/A".to_string();
    }
    if value >= 1_000_000.0 {
        format!("${}M USD", fixed(value / 1_000_000.0, 1))
    } else if value >= 1_000.0 {
        format!("${}K", fixed(value / 1_000.0, 0))
    } else {
        format!("${}", group_thousands(value))
    }
}

/// Comma-grouped number with up to three decimals, trailing zeros dropped.
pub fn group_thousands(value: f64) -> String {
    let rounded = (value * 1000.0).round() / 1000.0;
    let negative = rounded < 0.0;
    let text = format!("{:.3}", rounded.abs());
    let (int_part, frac_part) = text.split_once('.').unwrap_or((text.as_str(), ""));
    let frac_part = frac_part.trim_end_matches('0');

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3 + 2);
    if negative {
        grouped.push('-');
    }
    for (i, digit) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }
    if !frac_part.is_empty() {
        grouped.push('.');
        grouped.push_str(frac_part);
    }
    grouped
}

/// `three_year_npv` -> `Three Year Npv`
pub fn title_case(snake: &str) -> String {
    let spaced = snake.replace('_', " ");
    let mut out = String::with_capacity(spaced.len());
    let mut prev_is_word = false;
    for c in spaced.chars() {
        if !prev_is_word && c.is_alphanumeric() {
            out.extend(c.to_uppercase());
        } else {
            out.push(c);
        }
        prev_is_word = c.is_alphanumeric();
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn small_values_render_grouped_without_suffix() {
        assert_eq!(format_currency(500.0), "$500");
        assert_eq!(format_currency(0.0), "$0");
        assert_eq!(format_currency(999.5), "$999.5");
    }

    #[test]
    fn thousands_render_with_k_and_no_decimals() {
        assert_eq!(format_currency(45_000.0), "$45K");
        assert_eq!(format_currency(1_000.0), "$1K");
        assert_eq!(format_currency(45_500.0), "$46K");
    }

    #[test]
    fn millions_render_with_one_decimal_and_usd() {
        assert_eq!(format_currency(2_500_000.0), "$2.5M USD");
        assert_eq!(format_currency(1_000_000.0), "$1.0M USD");
    }

    #[test]
    fn negative_values_fall_through_to_grouping() {
        assert_eq!(format_currency(-250_000.0), "$-250,000");
        assert_eq!(format_currency(-12.25), "$-12.25");
    }

    #[test]
    fn grouping_inserts_commas_every_three_digits() {
        assert_eq!(group_thousands(1_234_567.891), "1,234,567.891");
        assert_eq!(group_thousands(100.0), "100");
        assert_eq!(group_thousands(1000.0), "1,000");
    }

    #[test]
    fn fixed_rounds_half_away_from_zero() {
        assert_eq!(fixed(2.5, 0), "3");
        assert_eq!(fixed(12.25, 1), "12.3");
        assert_eq!(fixed(-0.01, 1), "0.0");
    }

    #[test]
    fn title_case_converts_snake_names() {
        assert_eq!(title_case("monthly_claims_volume"), "Monthly Claims Volume");
        assert_eq!(title_case("fte_count"), "Fte Count");
    }

    proptest! {
        #[test]
        fn currency_suffix_matches_magnitude(value in 0.0f64..1.0e9) {
            let formatted = format_currency(value);
            prop_assert!(formatted.starts_with('$'));
            if value >= 1_000_000.0 {
                prop_assert!(formatted.ends_with("M USD"));
            } else if value >= 1_000.0 {
                prop_assert!(formatted.ends_with('K'));
            } else {
                prop_assert!(!formatted.ends_with('K') && !formatted.ends_with("USD"));
            }
        }
    }
}
