//! Account snapshot — the margin-side inputs to the stop-out formula.

use serde::{Deserialize, Serialize};

/// Point-in-time view of the trading account, as the broker reports it.
///
/// All currency amounts are in the account currency. The snapshot is a
/// read-only input: the calculator never mutates it and a fresh one is
/// supplied on every tick.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct AccountSnapshot {
    /// Deposited funds plus realized P/L.
    pub balance: f64,
    /// Balance plus unrealized P/L of all open positions.
    pub equity: f64,
    /// Margin currently locked by open positions.
    pub margin: f64,
    /// Equity minus used margin.
    pub free_margin: f64,
    /// Broker stop-out threshold, in percent of used margin.
    pub stop_out_level: f64,
}

impl AccountSnapshot {
    /// Used margin is only nonzero while positions are open.
    pub fn has_open_positions(&self) -> bool {
        self.margin > 0.0
    }

    /// Margin level in percent (equity / margin * 100), or `None` when flat.
    pub fn margin_level(&self) -> Option<f64> {
        if self.margin > 0.0 {
            Some(self.equity / self.margin * 100.0)
        } else {
            None
        }
    }
}
