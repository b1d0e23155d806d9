use crate::drawdown::analyze_drawdown;
use crate::equity::build_equity_curve;
use crate::ledger::{TradeEntry, TradePage, TradeQuery};
use crate::report::{EquityCurveReport, KpiRecord, WindowEdge};
use crate::returns::compute_returns;
use crate::risk::{compute_risk_ratios, daily_pnl};
use crate::trade_stats::compute_trade_stats;
use core_types::{EquityPoint, RequestedWindow, TradeSnapshot};
use tracing::debug;

/// Immutable settings the engine needs; built once at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    pub base_currency: String,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            base_currency: "USD".to_string(),
        }
    }
}

/// A stateless calculator turning ledger snapshots into KPIs.
///
/// Every call works only on the slice it is given, so one engine can be shared
/// freely between concurrent requests.
#[derive(Debug, Clone, Default)]
pub struct KpiEngine {
    config: EngineConfig,
}

impl KpiEngine {
    pub fn new(config: EngineConfig) -> Self {
        Self { config }
    }

    pub fn currency(&self) -> &str {
        &self.config.base_currency
    }

    /// The main entry point: computes the full KPI record for a window.
    ///
    /// # Arguments
    ///
    /// * `snapshots` - Ledger events inside the window, ascending by timestamp.
    /// * `requested` - The window as the caller asked for it, echoed back when
    ///   it contains no data.
    pub fn calculate(&self, snapshots: &[TradeSnapshot], requested: &RequestedWindow) -> KpiRecord {
        let curve = build_equity_curve(snapshots);
        let mut record = KpiRecord::new(self.currency());

        if curve.len() >= 2 {
            let returns = compute_returns(&curve);
            record.total_return_pct = returns.total_return * 100.0;
            record.cagr_pct = returns.cagr * 100.0;

            let equity: Vec<f64> = curve.iter().map(|p| p.equity).collect();
            let drawdown = analyze_drawdown(&equity);
            record.max_drawdown_pct = drawdown.max_drawdown * 100.0;
            record.max_dd_duration_days = drawdown.max_duration;

            let daily = daily_pnl(&curve);
            let ratios = compute_risk_ratios(&daily);
            record.avg_daily_pnl = ratios.avg_daily_pnl;
            record.std_daily_pnl = ratios.std_daily_pnl;
            record.sharpe = ratios.sharpe;
            record.sortino = ratios.sortino;
            debug!(
                points = curve.len(),
                days = daily.len() + 1,
                elapsed_days = returns.elapsed_days,
                "Computed curve metrics."
            );
        }

        let trades = compute_trade_stats(snapshots);
        record.trades_count = trades.trades_count;
        record.win_rate_pct = trades.win_rate_pct;
        record.profit_factor = trades.profit_factor;
        record.avg_trade_pnl = trades.avg_trade_pnl;

        (record.start, record.end) = echo_window(&curve, requested);
        record
    }

    /// The equity curve of a window, with the same window echo as `calculate`.
    pub fn equity_curve(
        &self,
        snapshots: &[TradeSnapshot],
        requested: &RequestedWindow,
    ) -> EquityCurveReport {
        let points = build_equity_curve(snapshots);
        let (start, end) = echo_window(&points, requested);
        EquityCurveReport {
            currency: self.currency().to_string(),
            start,
            end,
            points,
        }
    }

    pub fn trade_entry(&self, snapshot: &TradeSnapshot) -> TradeEntry {
        TradeEntry::from_snapshot(snapshot, self.currency())
    }

    /// Filters, sorts and paginates the ledger view of a window.
    pub fn list_trades(&self, snapshots: &[TradeSnapshot], query: &TradeQuery) -> TradePage {
        let mut entries: Vec<TradeEntry> = snapshots
            .iter()
            .map(|snapshot| self.trade_entry(snapshot))
            .filter(|entry| query.status.includes(entry))
            .collect();
        query.sort.apply(&mut entries);
        TradePage::paginate(entries, query.page)
    }
}

/// First/last timestamps of the data actually returned, or the raw requested
/// bounds when there is none.
fn echo_window(
    curve: &[EquityPoint],
    requested: &RequestedWindow,
) -> (Option<WindowEdge>, Option<WindowEdge>) {
    match (curve.first(), curve.last()) {
        (Some(first), Some(last)) => (
            Some(WindowEdge::Observed(first.timestamp)),
            Some(WindowEdge::Observed(last.timestamp)),
        ),
        _ => (
            requested.start.clone().map(WindowEdge::Requested),
            requested.end.clone().map(WindowEdge::Requested),
        ),
    }
}
