//! Deterministic broker simulator.
//!
//! Seeded random-walk mid price with a fixed spread, a demo position book,
//! and an account whose equity tracks unrealized P/L, so the stop-out line
//! visibly moves with the market. Same seed, same event stream.

use chrono::{Duration, NaiveDate, NaiveDateTime};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::domain::{AccountSnapshot, Bar, Position, SymbolInfo, TradeSide};
use crate::feed::FeedEvent;

/// Simulator parameters. Presets cover a few common FX symbols; everything
/// is plain data so tests can build exotic setups directly.
#[derive(Debug, Clone)]
pub struct SimConfig {
    pub symbol: String,
    pub digits: u32,
    pub pip_size: f64,
    /// Pip value per unit of volume, in account currency.
    pub pip_value: f64,
    pub start_mid: f64,
    /// Per-tick mid move, in pips (uniform in ±this).
    pub volatility_pips: f64,
    pub spread_pips: f64,
    pub leverage: f64,
    pub balance: f64,
    pub stop_out_level: f64,
    /// Demo book: (side, volume in units).
    pub positions: Vec<(TradeSide, f64)>,
    pub tick_interval_ms: u64,
    pub bar_period_secs: u64,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self::eurusd()
    }
}

impl SimConfig {
    pub fn eurusd() -> Self {
        Self {
            symbol: "EURUSD".into(),
            digits: 5,
            pip_size: 0.0001,
            pip_value: 0.0001,
            start_mid: 1.0865,
            volatility_pips: 1.5,
            spread_pips: 1.2,
            leverage: 100.0,
            balance: 10_000.0,
            stop_out_level: 50.0,
            positions: vec![(TradeSide::Buy, 20_000.0), (TradeSide::Sell, 5_000.0)],
            tick_interval_ms: 100,
            bar_period_secs: 5,
        }
    }

    pub fn usdjpy() -> Self {
        Self {
            symbol: "USDJPY".into(),
            digits: 3,
            pip_size: 0.01,
            pip_value: 0.0001, // yen pip value converted to USD, per unit
            start_mid: 157.25,
            volatility_pips: 1.5,
            spread_pips: 1.5,
            ..Self::eurusd()
        }
    }

    /// Look up a preset by (case-insensitive) symbol name.
    pub fn preset(name: &str) -> Option<Self> {
        match name.to_uppercase().as_str() {
            "EURUSD" => Some(Self::eurusd()),
            "USDJPY" => Some(Self::usdjpy()),
            _ => None,
        }
    }

    fn gross_volume(&self) -> f64 {
        self.positions.iter().map(|(_, v)| v).sum()
    }
}

/// The simulator. Owns the RNG, the sim clock, and the in-progress bar.
#[derive(Debug)]
pub struct BrokerSim {
    config: SimConfig,
    rng: StdRng,
    mid: f64,
    clock: NaiveDateTime,
    bar: Bar,
    positions: Vec<Position>,
    /// Margin locked at position open; held constant while the book is.
    margin: f64,
}

impl BrokerSim {
    pub fn new(config: SimConfig, seed: u64) -> Self {
        let start = NaiveDate::from_ymd_opt(2025, 6, 2)
            .expect("valid date")
            .and_hms_opt(9, 30, 0)
            .expect("valid time");
        let positions: Vec<Position> = config
            .positions
            .iter()
            .map(|&(side, volume)| Position {
                symbol: config.symbol.clone(),
                side,
                volume,
                entry_price: config.start_mid,
            })
            .collect();
        let margin = config.start_mid * config.gross_volume() / config.leverage;
        Self {
            rng: StdRng::seed_from_u64(seed),
            mid: config.start_mid,
            clock: start,
            bar: Bar::opening(start, config.start_mid),
            positions,
            margin,
            config,
        }
    }

    pub fn positions(&self) -> &[Position] {
        &self.positions
    }

    pub fn tick_interval_ms(&self) -> u64 {
        self.config.tick_interval_ms
    }

    /// Advance one tick: move the mid, roll the bar if its period elapsed,
    /// and emit the new quote + account snapshot. A completed bar is emitted
    /// before the tick that opens its successor.
    pub fn next_tick(&mut self) -> Vec<FeedEvent> {
        let mut events = Vec::with_capacity(2);

        self.clock += Duration::milliseconds(self.config.tick_interval_ms as i64);
        let step: f64 = self.rng.gen_range(-1.0..=1.0);
        self.mid += step * self.config.volatility_pips * self.config.pip_size;
        // Keep the walk away from zero so pip arithmetic stays meaningful.
        self.mid = self.mid.max(self.config.pip_size * 10.0);

        let bar_period = Duration::seconds(self.config.bar_period_secs as i64);
        if self.clock - self.bar.open_time >= bar_period {
            events.push(FeedEvent::Bar(self.bar));
            self.bar = Bar::opening(self.clock, self.mid);
        } else {
            self.bar.update(self.mid);
        }

        let symbol = self.symbol_info();
        let account = self.account(&symbol);
        events.push(FeedEvent::Tick { symbol, account, positions: self.positions.clone() });
        events
    }

    fn symbol_info(&self) -> SymbolInfo {
        let half_spread = self.config.spread_pips * self.config.pip_size / 2.0;
        let factor = 10f64.powi(self.config.digits as i32);
        let round = |p: f64| (p * factor).round() / factor;
        SymbolInfo {
            name: self.config.symbol.clone(),
            bid: round(self.mid - half_spread),
            ask: round(self.mid + half_spread),
            pip_size: self.config.pip_size,
            pip_value: self.config.pip_value,
            digits: self.config.digits,
        }
    }

    fn account(&self, symbol: &SymbolInfo) -> AccountSnapshot {
        let unrealized: f64 = self
            .positions
            .iter()
            .map(|p| {
                // Longs close at bid, shorts at ask.
                let close = if p.is_long() { symbol.bid } else { symbol.ask };
                p.unrealized_pnl(close, symbol.pip_size, symbol.pip_value)
            })
            .sum();
        let equity = self.config.balance + unrealized;
        AccountSnapshot {
            balance: self.config.balance,
            equity,
            margin: self.margin,
            free_margin: equity - self.margin,
            stop_out_level: self.config.stop_out_level,
        }
    }
}
