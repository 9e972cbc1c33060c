//! Bar — chart backdrop unit. The indicator itself never reads OHLC data;
//! bars exist so the chart has something to draw the stop-out line over.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// OHLC bar built from mid prices.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Bar {
    pub open_time: NaiveDateTime,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
}

impl Bar {
    /// Start a new bar at `price`.
    pub fn opening(open_time: NaiveDateTime, price: f64) -> Self {
        Self { open_time, open: price, high: price, low: price, close: price }
    }

    /// Fold one more tick into the bar.
    pub fn update(&mut self, price: f64) {
        self.high = self.high.max(price);
        self.low = self.low.min(price);
        self.close = price;
    }
}
