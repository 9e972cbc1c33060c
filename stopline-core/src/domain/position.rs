//! Open positions and per-symbol net volume.

use serde::{Deserialize, Serialize};

/// Direction of an open position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TradeSide {
    Buy,
    Sell,
}

/// A single open position as the broker reports it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Position {
    pub symbol: String,
    pub side: TradeSide,
    /// Volume in units (not lots). Always positive; direction lives in `side`.
    pub volume: f64,
    pub entry_price: f64,
}

impl Position {
    pub fn is_long(&self) -> bool {
        self.side == TradeSide::Buy
    }

    /// Volume with sign: positive for longs, negative for shorts.
    pub fn signed_volume(&self) -> f64 {
        match self.side {
            TradeSide::Buy => self.volume,
            TradeSide::Sell => -self.volume,
        }
    }

    /// Unrealized P/L in account currency at the given close-out price.
    pub fn unrealized_pnl(&self, close_price: f64, pip_size: f64, pip_value: f64) -> f64 {
        let pips = (close_price - self.entry_price) / pip_size;
        pips * pip_value * self.signed_volume()
    }
}

/// Signed sum of position volumes for one symbol. Positions on other
/// symbols are ignored.
pub fn net_volume(positions: &[Position], symbol: &str) -> f64 {
    positions
        .iter()
        .filter(|p| p.symbol == symbol)
        .map(Position::signed_volume)
        .sum()
}
