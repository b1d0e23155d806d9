use crate::returns::finite_or_zero;
use core_types::{EquityPoint, SECONDS_PER_DAY};
use std::collections::BTreeMap;

/// Daily P&L is annualized over calendar days, not trading sessions.
pub const PERIODS_PER_YEAR: f64 = 365.0;

/// Daily-P&L based risk figures.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct RiskRatios {
    pub avg_daily_pnl: f64,
    pub std_daily_pnl: f64,
    pub sharpe: f64,
    pub sortino: f64,
}

/// Buckets the curve by UTC calendar day, keeping the last value of each day,
/// and returns the day-over-day differences in day order.
///
/// Points must be in chronological order: when several share a day the one
/// seen last wins.
pub fn daily_pnl(curve: &[EquityPoint]) -> Vec<f64> {
    let mut day_close: BTreeMap<i64, f64> = BTreeMap::new();
    for point in curve {
        day_close.insert(point.timestamp.div_euclid(SECONDS_PER_DAY), point.equity);
    }

    day_close
        .values()
        .zip(day_close.values().skip(1))
        .map(|(prev, next)| next - prev)
        .collect()
}

pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Bessel-corrected standard deviation; zero for fewer than two samples.
pub fn sample_std(values: &[f64]) -> f64 {
    if values.len() < 2 {
        return 0.0;
    }
    let avg = mean(values);
    let variance = values
        .iter()
        .map(|value| {
            let diff = value - avg;
            diff * diff
        })
        .sum::<f64>()
        / (values.len() as f64 - 1.0);
    variance.sqrt()
}

/// Sharpe and Sortino from a series of daily P&L values (risk-free rate 0).
pub fn compute_risk_ratios(daily: &[f64]) -> RiskRatios {
    if daily.is_empty() {
        return RiskRatios::default();
    }

    let avg_daily_pnl = mean(daily);
    let std_daily_pnl = sample_std(daily);
    let annualized_mean = avg_daily_pnl * PERIODS_PER_YEAR;
    let annualized_std = std_daily_pnl * PERIODS_PER_YEAR.sqrt();

    let sharpe = if annualized_std > 0.0 {
        finite_or_zero(annualized_mean / annualized_std)
    } else {
        0.0
    };

    let downside: Vec<f64> = daily.iter().copied().filter(|pnl| *pnl < 0.0).collect();
    let downside_std = sample_std(&downside);
    let sortino = if downside_std > 0.0 {
        finite_or_zero(annualized_mean / (downside_std * PERIODS_PER_YEAR.sqrt()))
    } else {
        0.0
    };

    RiskRatios {
        avg_daily_pnl: finite_or_zero(avg_daily_pnl),
        std_daily_pnl: finite_or_zero(std_daily_pnl),
        sharpe,
        sortino,
    }
}
