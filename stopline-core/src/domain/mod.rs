//! Domain types for the stop-out line indicator.

pub mod account;
pub mod bar;
pub mod position;
pub mod symbol;

pub use account::AccountSnapshot;
pub use bar::Bar;
pub use position::{net_volume, Position, TradeSide};
pub use symbol::SymbolInfo;
