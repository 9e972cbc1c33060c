//! Background feed thread — owns the broker simulator.
//!
//! The main thread never touches the sim; it only drains `FeedEvent`s from
//! the channel. Commands flow the other way.

use std::sync::mpsc::{Receiver, RecvTimeoutError, Sender};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use stopline_core::feed::{BrokerSim, FeedEvent};

/// Commands sent from the TUI to the feed thread.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedCommand {
    SetPaused(bool),
    Shutdown,
}

/// Spawn the feed thread.
pub fn spawn_feed(
    sim: BrokerSim,
    rx: Receiver<FeedCommand>,
    tx: Sender<FeedEvent>,
) -> JoinHandle<()> {
    thread::Builder::new()
        .name("stopline-feed".into())
        .spawn(move || feed_loop(sim, rx, tx))
        .expect("failed to spawn feed thread")
}

fn feed_loop(mut sim: BrokerSim, rx: Receiver<FeedCommand>, tx: Sender<FeedEvent>) {
    let interval = Duration::from_millis(sim.tick_interval_ms());
    let mut paused = false;
    loop {
        // The recv timeout doubles as the tick clock.
        match rx.recv_timeout(interval) {
            Ok(FeedCommand::Shutdown) | Err(RecvTimeoutError::Disconnected) => break,
            Ok(FeedCommand::SetPaused(p)) => paused = p,
            Err(RecvTimeoutError::Timeout) => {
                if paused {
                    continue;
                }
                for event in sim.next_tick() {
                    if tx.send(event).is_err() {
                        return; // UI gone
                    }
                }
            }
        }
    }
}
