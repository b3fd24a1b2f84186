use chrono::{TimeZone, Utc};
use proptest::prelude::*;
use vantage_domain::services::chart::compute_domain;
use vantage_domain::services::numeric::{format, parse_exact};
use vantage_domain::value_objects::display_mode::DisplayMode;
use vantage_domain::value_objects::equity_point::EquityPoint;
use vantage_domain::value_objects::numeric_input::NumericInput;

fn series(equity: &[f64], initial_balance: f64) -> Vec<EquityPoint> {
    equity
        .iter()
        .copied()
        .enumerate()
        .map(|(idx, e)| EquityPoint {
            timestamp: Utc.timestamp_opt(1_700_000_000 + idx as i64 * 60, 0).unwrap(),
            total_equity: e,
            pnl: e - initial_balance,
            pnl_pct: 0.0,
            cycle_number: idx as u64,
        })
        .collect()
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 128,
        .. ProptestConfig::default()
    })]

    #[test]
    fn hex_and_decimal_spellings_format_identically(n in 0u64..(1u64 << 63)) {
        let hex = format!("0x{n:x}");
        let from_hex = format(&NumericInput::from(hex.as_str())).expect("hex formats");
        let from_int = format(&NumericInput::from(n)).expect("int formats");
        prop_assert_eq!(from_hex, from_int);
    }

    #[test]
    fn decimal_strings_parse_without_precision_loss(int_part in 0u64..1_000_000_000, frac in 0u64..1_000_000_000) {
        let raw = format!("{int_part}.{frac:09}");
        let parsed = parse_exact(&NumericInput::Decimal(raw.clone())).expect("parses");
        prop_assert_eq!(parsed.to_string(), raw);
    }

    #[test]
    fn thousands_bucket_always_carries_k_suffix(n in 1_000u64..999_995) {
        let formatted = format(&NumericInput::from(n)).expect("formats");
        prop_assert!(formatted.ends_with('K'), "{} -> {}", n, formatted);
    }

    #[test]
    fn tiny_values_compress_below_naive_length(x in 1e-12f64..1e-5) {
        let formatted = format(&NumericInput::Number(x)).expect("formats");
        prop_assert!(formatted.starts_with("0.0"));
        prop_assert!(formatted.chars().count() < x.to_string().chars().count());
    }

    #[test]
    fn dollar_domain_strictly_contains_data_and_baseline(
        equity in prop::collection::vec(1.01f64..1_000_000.0, 1..200),
        initial_balance in 10.0f64..1_000_000.0,
    ) {
        let chart = compute_domain(&series(&equity, initial_balance), DisplayMode::Dollar, initial_balance)
            .expect("chart");
        let lo = equity.iter().copied().fold(initial_balance, f64::min);
        let hi = equity.iter().copied().fold(initial_balance, f64::max);
        prop_assert!(chart.domain[0] < lo);
        prop_assert!(chart.domain[1] > hi);
        prop_assert!(chart.domain[0] < initial_balance && initial_balance < chart.domain[1]);
    }

    #[test]
    fn percent_domain_strictly_contains_data_and_zero(
        equity in prop::collection::vec(1.01f64..1_000_000.0, 1..200),
        initial_balance in 10.0f64..1_000_000.0,
    ) {
        let chart = compute_domain(&series(&equity, initial_balance), DisplayMode::Percent, initial_balance)
            .expect("chart");
        let lo = chart.points.iter().map(|p| p.value).fold(0.0, f64::min);
        let hi = chart.points.iter().map(|p| p.value).fold(0.0, f64::max);
        prop_assert!(chart.domain[0] < lo);
        prop_assert!(chart.domain[1] > hi);
        prop_assert!(chart.domain[0] < 0.0 && 0.0 < chart.domain[1]);
    }
}
