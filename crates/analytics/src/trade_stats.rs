use core_types::TradeSnapshot;

/// Statistics over the exit snapshots of a ledger window.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TradeStats {
    pub trades_count: usize,
    pub winning_trades: usize,
    pub losing_trades: usize,
    pub gross_profit: f64,
    /// Absolute value of the summed losing P&L.
    pub gross_loss: f64,
    pub win_rate_pct: f64,
    /// Always finite: zero whenever either side of the ratio is zero.
    pub profit_factor: f64,
    pub avg_trade_pnl: f64,
}

/// Realized P&L of every exit snapshot, in ledger order.
pub fn exit_pnls(snapshots: &[TradeSnapshot]) -> Vec<f64> {
    snapshots
        .iter()
        .filter(|snapshot| snapshot.is_exit())
        .map(|snapshot| snapshot.realized_pnl)
        .collect()
}

pub fn compute_trade_stats(snapshots: &[TradeSnapshot]) -> TradeStats {
    stats_from_pnls(&exit_pnls(snapshots))
}

pub fn stats_from_pnls(pnls: &[f64]) -> TradeStats {
    let mut stats = TradeStats {
        trades_count: pnls.len(),
        ..TradeStats::default()
    };
    if pnls.is_empty() {
        return stats;
    }

    for &pnl in pnls {
        if pnl > 0.0 {
            stats.winning_trades += 1;
            stats.gross_profit += pnl;
        } else if pnl < 0.0 {
            stats.losing_trades += 1;
            stats.gross_loss += pnl.abs();
        }
    }

    stats.win_rate_pct = stats.winning_trades as f64 / stats.trades_count as f64 * 100.0;
    stats.avg_trade_pnl = pnls.iter().sum::<f64>() / stats.trades_count as f64;

    // No wins means no profit factor, however large the losses; no losses would
    // be unbounded, which cannot be serialized, so it is reported as zero too.
    stats.profit_factor = if stats.gross_profit > 0.0 && stats.gross_loss > 0.0 {
        stats.gross_profit / stats.gross_loss
    } else {
        0.0
    };

    stats
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_types::RawSnapshot;
    use proptest::prelude::*;

    fn row(timestamp: i64, action: &str, pnl: Option<f64>) -> TradeSnapshot {
        TradeSnapshot::from(RawSnapshot {
            timestamp,
            action: Some(action.to_string()),
            realized_pnl: pnl,
            ..RawSnapshot::default()
        })
    }

    #[test]
    fn one_win_one_loss() {
        let stats = compute_trade_stats(&[
            row(1, "Buy", None),
            row(2, "Sell", Some(50.0)),
            row(3, "Short", None),
            row(4, "Stop Loss Cover", Some(-30.0)),
        ]);
        assert_eq!(stats.trades_count, 2);
        assert_eq!(stats.win_rate_pct, 50.0);
        assert!((stats.profit_factor - 50.0 / 30.0).abs() < 1e-12);
        assert_eq!(stats.avg_trade_pnl, 10.0);
    }

    #[test]
    fn all_losers_force_zero_profit_factor() {
        let stats = compute_trade_stats(&[row(1, "Sell", Some(-10.0)), row(2, "Cover", Some(-20.0))]);
        assert_eq!(stats.profit_factor, 0.0);
        assert_eq!(stats.win_rate_pct, 0.0);
        assert_eq!(stats.avg_trade_pnl, -15.0);
    }

    #[test]
    fn all_winners_do_not_report_infinity() {
        let stats = stats_from_pnls(&[5.0, 7.0]);
        assert_eq!(stats.profit_factor, 0.0);
        assert_eq!(stats.win_rate_pct, 100.0);
    }

    #[test]
    fn classification_is_exact() {
        let snapshots = [
            row(1, "sell", Some(10.0)),
            row(2, "Time Exit", Some(10.0)),
            row(3, "", Some(10.0)),
            row(4, " Time Exit Cover ", Some(10.0)),
        ];
        assert_eq!(exit_pnls(&snapshots), vec![10.0]);
    }

    #[test]
    fn null_pnl_on_exit_counts_as_flat_trade() {
        let stats = compute_trade_stats(&[row(1, "Sell", None), row(2, "Sell", Some(4.0))]);
        assert_eq!(stats.trades_count, 2);
        assert_eq!(stats.winning_trades, 1);
        assert_eq!(stats.losing_trades, 0);
        assert_eq!(stats.win_rate_pct, 50.0);
        assert_eq!(stats.avg_trade_pnl, 2.0);
    }

    #[test]
    fn no_exits_is_all_zero() {
        let stats = compute_trade_stats(&[row(1, "Buy", None), row(2, "Hold", Some(99.0))]);
        assert_eq!(stats, TradeStats::default());
    }

    proptest! {
        #[test]
        fn profit_factor_is_finite_and_non_negative(
            pnls in prop::collection::vec(-1e12f64..1e12, 0..100)
        ) {
            let stats = stats_from_pnls(&pnls);
            prop_assert!(stats.profit_factor.is_finite());
            prop_assert!(stats.profit_factor >= 0.0);
            prop_assert!((0.0..=100.0).contains(&stats.win_rate_pct));
        }
    }
}
