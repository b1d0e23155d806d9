use crate::error::CoreError;
use std::fmt;
use std::str::FromStr;

/// The closed set of ledger action labels that mark a position being closed.
///
/// Matching is exact and case-sensitive: `"sell"` or `"SELL"` are *not* exits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExitAction {
    Sell,
    Cover,
    StopLossSell,
    StopLossCover,
    TrailingStopSell,
    TrailingStopCover,
    TimeExitSell,
    TimeExitCover,
}

impl ExitAction {
    pub const ALL: [ExitAction; 8] = [
        ExitAction::Sell,
        ExitAction::Cover,
        ExitAction::StopLossSell,
        ExitAction::StopLossCover,
        ExitAction::TrailingStopSell,
        ExitAction::TrailingStopCover,
        ExitAction::TimeExitSell,
        ExitAction::TimeExitCover,
    ];

    /// The exact ledger label for this action.
    pub fn label(&self) -> &'static str {
        match self {
            ExitAction::Sell => "Sell",
            ExitAction::Cover => "Cover",
            ExitAction::StopLossSell => "Stop Loss Sell",
            ExitAction::StopLossCover => "Stop Loss Cover",
            ExitAction::TrailingStopSell => "Trailing Stop Sell",
            ExitAction::TrailingStopCover => "Trailing Stop Cover",
            ExitAction::TimeExitSell => "Time Exit Sell",
            ExitAction::TimeExitCover => "Time Exit Cover",
        }
    }
}

impl FromStr for ExitAction {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ExitAction::ALL
            .into_iter()
            .find(|action| action.label() == s)
            .ok_or_else(|| CoreError::UnknownExitAction(s.to_string()))
    }
}

impl fmt::Display for ExitAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
