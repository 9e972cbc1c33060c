//! Market/account feed — the "host" side of the indicator.
//!
//! The calculator only ever sees snapshots; this module produces them. The
//! one implementation is a deterministic simulator, which stands in for the
//! broker connection the original host platform provides.

pub mod sim;

use crate::domain::{AccountSnapshot, Bar, Position, SymbolInfo};

pub use sim::{BrokerSim, SimConfig};

/// One event from the feed. Events are delivered serially; the receiver is
/// the only mutation context.
#[derive(Debug, Clone, PartialEq)]
pub enum FeedEvent {
    /// Fresh quote plus the account state and open positions implied by it.
    Tick {
        symbol: SymbolInfo,
        account: AccountSnapshot,
        positions: Vec<Position>,
    },
    /// A bar closed (new-bar notification).
    Bar(Bar),
}
