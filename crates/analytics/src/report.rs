use core_types::EquityPoint;
use serde::Serialize;

/// One edge of the window echoed back to the caller.
///
/// When the window held data this is the timestamp of the first/last point;
/// otherwise it is whatever the caller asked for, passed through untouched.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum WindowEdge {
    Observed(#[serde(with = "core_types::time::iso_seconds")] i64),
    Requested(String),
}

/// The fixed-shape KPI result for one ledger window.
///
/// Every field is always present; degenerate inputs leave fields at their
/// zero defaults. Percent-valued fields are in percent (`10.0` = 10%).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct KpiRecord {
    pub currency: String,
    pub trades_count: usize,
    pub total_return_pct: f64,
    pub cagr_pct: f64,
    pub sharpe: f64,
    pub sortino: f64,
    /// Non-positive; `-25.0` is a 25% drawdown.
    pub max_drawdown_pct: f64,
    /// Longest run of consecutive points below peak. Despite the name this is
    /// a count of ledger events, not calendar days.
    pub max_dd_duration_days: usize,
    pub win_rate_pct: f64,
    pub profit_factor: f64,
    pub avg_trade_pnl: f64,
    pub avg_daily_pnl: f64,
    pub std_daily_pnl: f64,
    pub start: Option<WindowEdge>,
    pub end: Option<WindowEdge>,
}

impl KpiRecord {
    /// Creates a zeroed-out record for the given currency.
    pub fn new(currency: impl Into<String>) -> Self {
        Self {
            currency: currency.into(),
            trades_count: 0,
            total_return_pct: 0.0,
            cagr_pct: 0.0,
            sharpe: 0.0,
            sortino: 0.0,
            max_drawdown_pct: 0.0,
            max_dd_duration_days: 0,
            win_rate_pct: 0.0,
            profit_factor: 0.0,
            avg_trade_pnl: 0.0,
            avg_daily_pnl: 0.0,
            std_daily_pnl: 0.0,
            start: None,
            end: None,
        }
    }
}

/// The standalone equity-curve view.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EquityCurveReport {
    pub currency: String,
    pub start: Option<WindowEdge>,
    pub end: Option<WindowEdge>,
    pub points: Vec<EquityPoint>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zeroed_record_serializes_every_field() {
        let json = serde_json::to_value(KpiRecord::new("USD")).unwrap();
        let object = json.as_object().unwrap();
        assert_eq!(object.len(), 15);
        assert_eq!(object["currency"], "USD");
        assert_eq!(object["profit_factor"], 0.0);
        assert!(object["start"].is_null());
        assert!(object["end"].is_null());
    }

    #[test]
    fn window_edges_serialize_as_plain_strings() {
        let observed = serde_json::to_value(WindowEdge::Observed(0)).unwrap();
        let requested = serde_json::to_value(WindowEdge::Requested("garbage".into())).unwrap();
        assert_eq!(observed, "1970-01-01T00:00:00Z");
        assert_eq!(requested, "garbage");
    }
}
