use core_types::{EquityPoint, TradeSnapshot};

/// Maps every snapshot to its equity value, preserving order and length.
///
/// The caller supplies snapshots already sorted by timestamp; nothing is
/// filtered or reordered here.
pub fn build_equity_curve(snapshots: &[TradeSnapshot]) -> Vec<EquityPoint> {
    snapshots.iter().map(EquityPoint::from).collect()
}
