use core_types::{EquityPoint, SECONDS_PER_DAY};

pub const DAYS_PER_YEAR: f64 = 365.25;

/// Growth figures for an equity curve, as fractions (`0.1` = +10%).
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ReturnStats {
    pub total_return: f64,
    pub cagr: f64,
    /// Whole days between the first and last point, never less than one.
    pub elapsed_days: i64,
    pub years: f64,
}

/// Total return and CAGR between the first and last point of the curve.
///
/// Fewer than two points leave every figure at zero. A first equity of exactly
/// zero also yields zero for both returns.
pub fn compute_returns(curve: &[EquityPoint]) -> ReturnStats {
    let (Some(first), Some(last)) = (curve.first(), curve.last()) else {
        return ReturnStats::default();
    };
    if curve.len() < 2 {
        return ReturnStats::default();
    }

    let elapsed_days = last
        .timestamp
        .saturating_sub(first.timestamp)
        .div_euclid(SECONDS_PER_DAY)
        .max(1);
    let years = elapsed_days as f64 / DAYS_PER_YEAR;

    if first.equity == 0.0 {
        return ReturnStats {
            total_return: 0.0,
            cagr: 0.0,
            elapsed_days,
            years,
        };
    }

    let growth = last.equity / first.equity;
    let total_return = finite_or_zero(growth - 1.0);
    let cagr = if years > 0.0 {
        finite_or_zero(growth.powf(1.0 / years) - 1.0)
    } else {
        total_return
    };

    ReturnStats {
        total_return,
        cagr,
        elapsed_days,
        years,
    }
}

pub(crate) fn finite_or_zero(value: f64) -> f64 {
    if value.is_finite() { value } else { 0.0 }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DAY: i64 = SECONDS_PER_DAY;

    fn point(timestamp: i64, equity: f64) -> EquityPoint {
        EquityPoint { timestamp, equity }
    }

    #[test]
    fn needs_two_points() {
        assert_eq!(compute_returns(&[]), ReturnStats::default());
        assert_eq!(compute_returns(&[point(0, 100.0)]), ReturnStats::default());
    }

    #[test]
    fn ten_percent_over_one_day() {
        let stats = compute_returns(&[point(0, 1_000.0), point(DAY, 1_100.0)]);
        assert!((stats.total_return - 0.10).abs() < 1e-12);
        assert_eq!(stats.elapsed_days, 1);
        let expected_cagr = 1.1f64.powf(DAYS_PER_YEAR) - 1.0;
        assert!((stats.cagr - expected_cagr).abs() / expected_cagr < 1e-9);
    }

    #[test]
    fn same_day_span_is_floored_to_one_day() {
        let stats = compute_returns(&[point(0, 100.0), point(3_600, 101.0)]);
        assert_eq!(stats.elapsed_days, 1);
        assert!((stats.years - 1.0 / DAYS_PER_YEAR).abs() < 1e-15);
    }

    #[test]
    fn partial_days_are_floored() {
        let stats = compute_returns(&[point(0, 100.0), point(3 * DAY + 80_000, 100.0)]);
        assert_eq!(stats.elapsed_days, 3);
    }

    #[test]
    fn cagr_over_exactly_one_year_matches_total_return() {
        // 365.25 days cannot be expressed in whole days; four years can.
        let four_years = (4.0 * DAYS_PER_YEAR) as i64 * DAY;
        let stats = compute_returns(&[point(0, 100.0), point(four_years, 200.0)]);
        assert!((stats.years - 4.0).abs() < 1e-12);
        assert!((stats.cagr - (2f64.powf(0.25) - 1.0)).abs() < 1e-12);
    }

    #[test]
    fn zero_starting_equity_falls_back_to_zero() {
        let stats = compute_returns(&[point(0, 0.0), point(DAY, 500.0)]);
        assert_eq!(stats.total_return, 0.0);
        assert_eq!(stats.cagr, 0.0);
    }

    #[test]
    fn sign_flip_keeps_cagr_finite() {
        let stats = compute_returns(&[point(0, 100.0), point(10 * DAY, -50.0)]);
        assert!((stats.total_return + 1.5).abs() < 1e-12);
        assert_eq!(stats.cagr, 0.0);
    }

    #[test]
    fn extreme_timestamp_span_does_not_overflow() {
        let stats = compute_returns(&[point(i64::MIN, 100.0), point(i64::MAX, 110.0)]);
        assert_eq!(stats.elapsed_days, i64::MAX / DAY);
        assert!((stats.total_return - 0.10).abs() < 1e-12);
        assert!(stats.cagr.is_finite());
    }
}
