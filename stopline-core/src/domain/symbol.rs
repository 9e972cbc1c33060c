//! Symbol metadata: quotes, pip geometry, price precision.

use serde::{Deserialize, Serialize};

/// Current quote and pip metadata for one instrument.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SymbolInfo {
    pub name: String,
    pub bid: f64,
    pub ask: f64,
    /// Minimum price increment expressed as a price delta (e.g. 0.0001).
    pub pip_size: f64,
    /// Monetary value of one pip for one unit of volume, in account currency.
    pub pip_value: f64,
    /// Decimal places in quoted prices.
    pub digits: u32,
}

impl SymbolInfo {
    pub fn spread(&self) -> f64 {
        self.ask - self.bid
    }

    /// Round a price to the symbol's declared precision.
    pub fn round_price(&self, price: f64) -> f64 {
        let factor = 10f64.powi(self.digits as i32);
        (price * factor).round() / factor
    }

    /// Fixed-point display string with exactly `digits` decimals.
    pub fn format_price(&self, price: f64) -> String {
        format!("{:.*}", self.digits as usize, price)
    }
}
