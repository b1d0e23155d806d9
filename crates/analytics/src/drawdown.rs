/// Peak-relative drawdown summary for an equity series.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Drawdown {
    /// Most negative `equity / peak - 1` seen, as a fraction (`-0.1` = 10% down).
    pub max_drawdown: f64,
    /// Longest run of consecutive points strictly below their running peak.
    ///
    /// Counted in events, not calendar days.
    pub max_duration: usize,
}

/// Per-point drawdown fractions against the running peak.
///
/// A running peak of exactly zero yields `0.0` for that point instead of a
/// division by zero.
pub fn drawdown_series(equity: &[f64]) -> Vec<f64> {
    let mut peak = f64::NEG_INFINITY;
    equity
        .iter()
        .map(|&value| {
            peak = peak.max(value);
            if peak == 0.0 {
                return 0.0;
            }
            let drawdown = value / peak - 1.0;
            if drawdown.is_finite() { drawdown } else { 0.0 }
        })
        .collect()
}

pub fn analyze_drawdown(equity: &[f64]) -> Drawdown {
    let mut result = Drawdown::default();
    let mut run = 0usize;

    for drawdown in drawdown_series(equity) {
        result.max_drawdown = result.max_drawdown.min(drawdown);
        if drawdown < 0.0 {
            run += 1;
            result.max_duration = result.max_duration.max(run);
        } else {
            run = 0;
        }
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn empty_series_has_no_drawdown() {
        assert_eq!(analyze_drawdown(&[]), Drawdown::default());
    }

    #[test]
    fn dip_and_recovery() {
        let series = drawdown_series(&[100.0, 90.0, 95.0, 110.0]);
        assert!((series[1] + 0.10).abs() < 1e-12);
        assert!((series[2] + 0.05).abs() < 1e-12);
        assert_eq!(series[3], 0.0);

        let result = analyze_drawdown(&[100.0, 90.0, 95.0, 110.0]);
        assert!((result.max_drawdown + 0.10).abs() < 1e-12);
        assert_eq!(result.max_duration, 2);
    }

    #[test]
    fn duration_is_the_longest_run_not_the_deepest() {
        // Run of three shallow dips, then a single deep one.
        let result = analyze_drawdown(&[100.0, 99.0, 98.0, 99.0, 120.0, 60.0, 130.0]);
        assert_eq!(result.max_duration, 3);
        assert!((result.max_drawdown + 0.5).abs() < 1e-12);
    }

    #[test]
    fn unrecovered_tail_counts_towards_duration() {
        let result = analyze_drawdown(&[50.0, 40.0, 30.0, 45.0]);
        assert_eq!(result.max_duration, 3);
    }

    #[test]
    fn zero_peak_is_guarded() {
        let result = analyze_drawdown(&[0.0, 0.0, 0.0]);
        assert_eq!(result, Drawdown::default());
        assert!(drawdown_series(&[0.0, -5.0]).iter().all(|d| d.is_finite()));
    }

    proptest! {
        #[test]
        fn non_decreasing_series_never_draws_down(
            mut equity in prop::collection::vec(0.01f64..1_000_000.0, 0..200)
        ) {
            equity.sort_by(f64::total_cmp);
            prop_assert_eq!(analyze_drawdown(&equity), Drawdown::default());
        }

        #[test]
        fn positive_equity_drawdown_is_bounded(
            equity in prop::collection::vec(0.01f64..1_000_000.0, 1..200)
        ) {
            let result = analyze_drawdown(&equity);
            prop_assert!((-1.0..=0.0).contains(&result.max_drawdown));
            prop_assert!(result.max_duration < equity.len());
        }
    }
}
