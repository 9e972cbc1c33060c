//! Stopline Core — stop-out price engine for the terminal indicator.
//!
//! Contents:
//! - Domain types (account snapshot, positions, symbol metadata, bars)
//! - The stop-out price calculator (the computational payload)
//! - Chart overlay state machine (line/label upsert, remove, hide)
//! - Indicator configuration (TOML)
//! - Deterministic broker simulator standing in for the host feed

pub mod config;
pub mod domain;
pub mod feed;
pub mod overlay;
pub mod stopout;

#[cfg(test)]
mod tests {
    use super::*;

    /// Compile-time check: everything that crosses the feed-thread channel
    /// is Send + Sync. Breaks the build immediately if a non-thread-safe
    /// field sneaks into a domain type.
    #[allow(dead_code)]
    fn assert_send_sync() {
        fn require_send<T: Send>() {}
        fn require_sync<T: Sync>() {}

        require_send::<domain::AccountSnapshot>();
        require_sync::<domain::AccountSnapshot>();
        require_send::<domain::Position>();
        require_sync::<domain::Position>();
        require_send::<domain::SymbolInfo>();
        require_sync::<domain::SymbolInfo>();
        require_send::<domain::Bar>();
        require_sync::<domain::Bar>();

        require_send::<stopout::StopOutResult>();
        require_sync::<stopout::StopOutResult>();
        require_send::<overlay::ChartOverlay>();
        require_sync::<overlay::ChartOverlay>();
        require_send::<config::IndicatorConfig>();
        require_sync::<config::IndicatorConfig>();

        require_send::<feed::FeedEvent>();
        require_sync::<feed::FeedEvent>();
        require_send::<feed::BrokerSim>();
        require_sync::<feed::BrokerSim>();
    }
}
