//! Shared fixtures for TUI tests.

use std::sync::mpsc;

use stopline_core::config::IndicatorConfig;
use stopline_core::domain::{AccountSnapshot, Position, SymbolInfo, TradeSide};
use stopline_core::feed::FeedEvent;

use crate::app::AppState;

pub fn test_app() -> AppState {
    let (feed_tx, _cmd_rx) = mpsc::channel();
    let (_event_tx, feed_rx) = mpsc::channel();
    AppState::new(IndicatorConfig::default(), feed_tx, feed_rx)
}

pub fn test_symbol() -> SymbolInfo {
    SymbolInfo {
        name: "EURUSD".into(),
        bid: 1.08640,
        ask: 1.08650,
        pip_size: 0.0001,
        pip_value: 0.0001,
        digits: 5,
    }
}

pub fn test_account() -> AccountSnapshot {
    AccountSnapshot {
        balance: 10_000.0,
        equity: 9_800.0,
        margin: 217.3,
        free_margin: 9_582.7,
        stop_out_level: 50.0,
    }
}

pub fn test_positions() -> Vec<Position> {
    vec![
        Position {
            symbol: "EURUSD".into(),
            side: TradeSide::Buy,
            volume: 20_000.0,
            entry_price: 1.0850,
        },
        Position {
            symbol: "EURUSD".into(),
            side: TradeSide::Sell,
            volume: 5_000.0,
            entry_price: 1.0880,
        },
    ]
}

pub fn tick_event() -> FeedEvent {
    FeedEvent::Tick {
        symbol: test_symbol(),
        account: test_account(),
        positions: test_positions(),
    }
}
