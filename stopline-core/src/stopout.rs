//! Stop-out price calculation.
//!
//! The one formula this whole indicator exists for: given the account
//! snapshot, the open positions, and the current quote, where does the
//! broker force-liquidate the net position on this symbol?
//!
//! Pure and deterministic — no state, no retries, no failure modes beyond
//! the two result variants.

use serde::{Deserialize, Serialize};

use crate::domain::{net_volume, AccountSnapshot, Position, SymbolInfo};

/// Outcome of a stop-out computation.
///
/// `NoPosition` is a normal result, not an error: it means there is nothing
/// on this symbol that could be stopped out.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum StopOutResult {
    /// Used margin is zero or the net volume on the symbol is zero.
    NoPosition,
    /// Stop-out price, rounded to the symbol's declared digits.
    Price(f64),
}

impl StopOutResult {
    pub fn price(&self) -> Option<f64> {
        match self {
            StopOutResult::Price(p) => Some(*p),
            StopOutResult::NoPosition => None,
        }
    }

    pub fn is_no_position(&self) -> bool {
        matches!(self, StopOutResult::NoPosition)
    }
}

/// Compute the stop-out price for the net position on `symbol`.
///
/// The account's margin level hits the broker's stop-out threshold when
/// equity falls to `stop_out_level% * margin`. The distance from the current
/// close-out price to that point is the allowed loss divided by the pip
/// value of the net position, converted back into a price delta.
///
/// Longs close at bid, shorts at ask. For shorts the line is shifted down by
/// one spread: the position closes at ask, but the stop-out is expressed
/// against the bid side of the expected level. That correction is an
/// approximation carried over from brokers' published mechanics, kept as-is.
pub fn compute(
    account: &AccountSnapshot,
    positions: &[Position],
    symbol: &SymbolInfo,
) -> StopOutResult {
    if !account.has_open_positions() {
        return StopOutResult::NoPosition;
    }

    let net = net_volume(positions, &symbol.name);
    if net == 0.0 {
        return StopOutResult::NoPosition;
    }
    let long = net > 0.0;
    let size = net.abs();

    let equity_at_stop_out = account.stop_out_level / 100.0 * account.margin;
    let max_loss = account.equity - equity_at_stop_out;

    let reference = if long { symbol.bid } else { symbol.ask };

    let pip_value_total = symbol.pip_value * size;
    let movement = if pip_value_total > 0.0 {
        max_loss / pip_value_total * symbol.pip_size
    } else {
        0.0
    };

    let price = if long {
        reference - movement
    } else {
        reference + movement - symbol.spread()
    };

    StopOutResult::Price(symbol.round_price(price))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::TradeSide;

    fn eurusd() -> SymbolInfo {
        SymbolInfo {
            name: "EURUSD".into(),
            bid: 1.08640,
            ask: 1.08650,
            pip_size: 0.0001,
            pip_value: 0.0001,
            digits: 5,
        }
    }

    fn account(equity: f64, margin: f64, stop_out_level: f64) -> AccountSnapshot {
        AccountSnapshot {
            balance: equity,
            equity,
            margin,
            free_margin: equity - margin,
            stop_out_level,
        }
    }

    fn pos(side: TradeSide, volume: f64) -> Position {
        Position { symbol: "EURUSD".into(), side, volume, entry_price: 1.0900 }
    }

    #[test]
    fn zero_margin_means_no_position() {
        let result = compute(&account(10_000.0, 0.0, 50.0), &[pos(TradeSide::Buy, 10_000.0)], &eurusd());
        assert_eq!(result, StopOutResult::NoPosition);
    }

    #[test]
    fn hedged_book_means_no_position() {
        let positions = vec![pos(TradeSide::Buy, 10_000.0), pos(TradeSide::Sell, 10_000.0)];
        let result = compute(&account(10_000.0, 100.0, 50.0), &positions, &eurusd());
        assert_eq!(result, StopOutResult::NoPosition);
    }

    #[test]
    fn positions_on_other_symbols_are_ignored() {
        let other = Position {
            symbol: "GBPUSD".into(),
            side: TradeSide::Buy,
            volume: 50_000.0,
            entry_price: 1.27,
        };
        let result = compute(&account(10_000.0, 100.0, 50.0), &[other], &eurusd());
        assert_eq!(result, StopOutResult::NoPosition);
    }

    #[test]
    fn long_stop_out_sits_below_bid() {
        // equity 10_000, margin 200, level 50% -> max loss 9_900.
        // 10k units at $0.0001/pip/unit -> $1/pip -> 9_900 pips = 0.99.
        let sym = eurusd();
        let result = compute(&account(10_000.0, 200.0, 50.0), &[pos(TradeSide::Buy, 10_000.0)], &sym);
        let price = result.price().unwrap();
        assert!(price < sym.bid);
        assert!((price - (sym.bid - 0.99)).abs() < 1e-9);
    }

    #[test]
    fn short_stop_out_uses_ask_minus_spread() {
        let sym = eurusd();
        let result =
            compute(&account(10_000.0, 200.0, 50.0), &[pos(TradeSide::Sell, 10_000.0)], &sym);
        let price = result.price().unwrap();
        let expected = sym.round_price(sym.ask + 0.99 - sym.spread());
        assert!((price - expected).abs() < 1e-9);
        assert!(price > sym.ask);
    }

    #[test]
    fn mixed_positions_net_before_computing() {
        // 20k long + 5k short = 15k net long -> $1.50/pip.
        let sym = eurusd();
        let positions = vec![pos(TradeSide::Buy, 20_000.0), pos(TradeSide::Sell, 5_000.0)];
        let result = compute(&account(10_000.0, 300.0, 50.0), &positions, &sym);
        let max_loss = 10_000.0 - 150.0;
        let expected = sym.round_price(sym.bid - max_loss / 1.5 * sym.pip_size);
        assert_eq!(result.price().unwrap(), expected);
    }

    #[test]
    fn zero_pip_value_guards_division() {
        let mut sym = eurusd();
        sym.pip_value = 0.0;
        let result = compute(&account(10_000.0, 200.0, 50.0), &[pos(TradeSide::Buy, 10_000.0)], &sym);
        // Movement collapses to zero; the line sits at the reference price.
        assert_eq!(result.price().unwrap(), sym.bid);
    }

    #[test]
    fn result_is_rounded_to_symbol_digits() {
        // Odd position size so the raw price has more than 5 decimals.
        let sym = eurusd();
        let result = compute(&account(10_000.0, 200.0, 50.0), &[pos(TradeSide::Buy, 7_777.0)], &sym);
        let price = result.price().unwrap();
        let scaled = price * 1e5;
        assert!((scaled - scaled.round()).abs() < 1e-6);
    }

    #[test]
    fn losing_account_moves_line_closer() {
        let sym = eurusd();
        let healthy =
            compute(&account(10_000.0, 200.0, 50.0), &[pos(TradeSide::Buy, 10_000.0)], &sym);
        let drawn_down =
            compute(&account(2_000.0, 200.0, 50.0), &[pos(TradeSide::Buy, 10_000.0)], &sym);
        assert!(drawn_down.price().unwrap() > healthy.price().unwrap());
    }

    #[test]
    fn result_serialization_roundtrip() {
        let result = StopOutResult::Price(1.04973);
        let json = serde_json::to_string(&result).unwrap();
        let deser: StopOutResult = serde_json::from_str(&json).unwrap();
        assert_eq!(result, deser);

        let none = StopOutResult::NoPosition;
        let json = serde_json::to_string(&none).unwrap();
        let deser: StopOutResult = serde_json::from_str(&json).unwrap();
        assert_eq!(none, deser);
    }

    #[test]
    fn compute_is_idempotent() {
        let acct = account(8_432.10, 215.5, 20.0);
        let positions = vec![pos(TradeSide::Buy, 12_345.0), pos(TradeSide::Sell, 2_345.0)];
        let sym = eurusd();
        assert_eq!(compute(&acct, &positions, &sym), compute(&acct, &positions, &sym));
    }
}
