//! Application state — single-owner, main-thread only.
//!
//! The feed thread communicates via channels; every mutation happens here,
//! serially, so the last computed stop-out price has exactly one writer.

use std::sync::mpsc::{Receiver, Sender};

use chrono::NaiveDateTime;

use stopline_core::config::IndicatorConfig;
use stopline_core::domain::{net_volume, AccountSnapshot, Bar, Position, SymbolInfo};
use stopline_core::feed::FeedEvent;
use stopline_core::overlay::ChartOverlay;
use stopline_core::stopout::{self, StopOutResult};

use crate::worker::FeedCommand;

/// Bars retained for the chart backdrop.
const MAX_BARS: usize = 600;

/// Which panel is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Panel {
    Chart,
    Account,
    Help,
}

impl Panel {
    pub fn index(self) -> usize {
        match self {
            Panel::Chart => 0,
            Panel::Account => 1,
            Panel::Help => 2,
        }
    }

    pub fn from_index(i: usize) -> Option<Self> {
        match i {
            0 => Some(Panel::Chart),
            1 => Some(Panel::Account),
            2 => Some(Panel::Help),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Panel::Chart => "Chart",
            Panel::Account => "Account",
            Panel::Help => "Help",
        }
    }

    pub fn next(self) -> Panel {
        Panel::from_index((self.index() + 1) % 3).unwrap()
    }

    pub fn prev(self) -> Panel {
        Panel::from_index((self.index() + 2) % 3).unwrap()
    }
}

/// Status message severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusLevel {
    Info,
    Warning,
}

/// Visible slice of the bar history.
///
/// `follow` pins the window to the right edge so new bars scroll in; any
/// manual scroll releases it.
#[derive(Debug, Clone, Copy)]
pub struct Viewport {
    pub first_visible: usize,
    pub visible: usize,
    pub follow: bool,
}

pub const MIN_VISIBLE_BARS: usize = 20;
pub const MAX_VISIBLE_BARS: usize = 400;

impl Default for Viewport {
    fn default() -> Self {
        Self { first_visible: 0, visible: 120, follow: true }
    }
}

impl Viewport {
    fn clamp(&mut self, bar_count: usize) {
        if self.follow {
            self.first_visible = bar_count.saturating_sub(self.visible);
        } else {
            self.first_visible = self.first_visible.min(bar_count.saturating_sub(1));
        }
    }
}

pub struct AppState {
    pub running: bool,
    pub active_panel: Panel,
    pub config: IndicatorConfig,

    // Latest host snapshots (read-only inputs to the calculator).
    pub symbol: Option<SymbolInfo>,
    pub account: Option<AccountSnapshot>,
    pub positions: Vec<Position>,
    pub bars: Vec<Bar>,

    pub viewport: Viewport,
    pub overlay: ChartOverlay,
    pub last_result: StopOutResult,

    pub status_message: Option<(String, StatusLevel)>,
    pub feed_paused: bool,

    pub feed_tx: Sender<FeedCommand>,
    pub feed_rx: Receiver<FeedEvent>,
}

impl AppState {
    pub fn new(
        config: IndicatorConfig,
        feed_tx: Sender<FeedCommand>,
        feed_rx: Receiver<FeedEvent>,
    ) -> Self {
        let overlay = ChartOverlay::new(&config);
        Self {
            running: true,
            active_panel: Panel::Chart,
            config,
            symbol: None,
            account: None,
            positions: Vec::new(),
            bars: Vec::new(),
            viewport: Viewport::default(),
            overlay,
            last_result: StopOutResult::NoPosition,
            status_message: None,
            feed_paused: false,
            feed_tx,
            feed_rx,
        }
    }

    pub fn set_status(&mut self, msg: impl Into<String>) {
        self.status_message = Some((msg.into(), StatusLevel::Info));
    }

    pub fn set_warning(&mut self, msg: impl Into<String>) {
        self.status_message = Some((msg.into(), StatusLevel::Warning));
    }

    /// Ingest one feed event. Both event kinds trigger recomputation, the
    /// same way the original recalculates on new ticks and new bars.
    pub fn handle_feed_event(&mut self, event: FeedEvent) {
        match event {
            FeedEvent::Tick { symbol, account, positions } => {
                self.symbol = Some(symbol);
                self.account = Some(account);
                self.positions = positions;
                self.recompute();
            }
            FeedEvent::Bar(bar) => {
                self.bars.push(bar);
                if self.bars.len() > MAX_BARS {
                    let drop = self.bars.len() - MAX_BARS;
                    self.bars.drain(..drop);
                    if !self.viewport.follow {
                        self.viewport.first_visible =
                            self.viewport.first_visible.saturating_sub(drop);
                    }
                }
                self.viewport.clamp(self.bars.len());
                self.reanchor_label();
                self.recompute();
            }
        }
    }

    /// Run the calculator against the latest snapshots and apply the result
    /// to the overlay. The timer path and the event path both land here.
    pub fn recompute(&mut self) {
        let (Some(symbol), Some(account)) = (&self.symbol, &self.account) else {
            return;
        };
        let result = stopout::compute(account, &self.positions, symbol);
        self.last_result = result;
        let anchor = self.anchor_time();
        self.overlay.apply(result, symbol, anchor);
    }

    /// Open time of the leftmost visible bar, clamped into range.
    pub fn anchor_time(&self) -> Option<NaiveDateTime> {
        if self.bars.is_empty() {
            return None;
        }
        let idx = self.viewport.first_visible.min(self.bars.len() - 1);
        Some(self.bars[idx].open_time)
    }

    fn reanchor_label(&mut self) {
        if let Some(anchor) = self.anchor_time() {
            self.overlay.reanchor(anchor);
        }
    }

    /// Net volume on the charted symbol, for the account panel.
    pub fn net_volume(&self) -> f64 {
        match &self.symbol {
            Some(symbol) => net_volume(&self.positions, &symbol.name),
            None => 0.0,
        }
    }

    // Viewport commands (chart panel keys). Scrolling and zooming reanchor
    // the label, mirroring the scroll/zoom callbacks of the original.

    pub fn scroll_left(&mut self, step: usize) {
        self.viewport.follow = false;
        self.viewport.first_visible = self.viewport.first_visible.saturating_sub(step);
        self.reanchor_label();
    }

    pub fn scroll_right(&mut self, step: usize) {
        let max_first = self.bars.len().saturating_sub(self.viewport.visible);
        self.viewport.first_visible = (self.viewport.first_visible + step).min(max_first);
        if self.viewport.first_visible == max_first {
            self.viewport.follow = true;
        }
        self.reanchor_label();
    }

    pub fn zoom_in(&mut self) {
        self.viewport.visible = (self.viewport.visible / 2).max(MIN_VISIBLE_BARS);
        self.viewport.clamp(self.bars.len());
        self.reanchor_label();
    }

    pub fn zoom_out(&mut self) {
        self.viewport.visible = (self.viewport.visible * 2).min(MAX_VISIBLE_BARS);
        self.viewport.clamp(self.bars.len());
        self.reanchor_label();
    }

    pub fn jump_to_latest(&mut self) {
        self.viewport.follow = true;
        self.viewport.clamp(self.bars.len());
        self.reanchor_label();
    }

    /// Shift+S: toggle line/label visibility without touching the value.
    pub fn toggle_line_visibility(&mut self) {
        self.overlay.toggle_hidden();
        if self.overlay.line().is_some() {
            if self.overlay.is_hidden() {
                self.set_status("Stop-out line hidden (Shift+S to show)");
            } else {
                self.set_status("Stop-out line shown");
            }
        }
    }

    pub fn toggle_feed_paused(&mut self) {
        self.feed_paused = !self.feed_paused;
        let _ = self.feed_tx.send(FeedCommand::SetPaused(self.feed_paused));
        if self.feed_paused {
            self.set_warning("Feed paused");
        } else {
            self.set_status("Feed resumed");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::{test_app, tick_event};
    use chrono::NaiveDate;

    fn t(secs: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 6, 2)
            .unwrap()
            .and_hms_opt(9, 30, secs)
            .unwrap()
    }

    #[test]
    fn panel_cycle_wraps() {
        assert_eq!(Panel::Chart.next(), Panel::Account);
        assert_eq!(Panel::Help.next(), Panel::Chart);
        assert_eq!(Panel::Chart.prev(), Panel::Help);
    }

    #[test]
    fn tick_event_updates_snapshots_and_result() {
        let mut app = test_app();
        app.handle_feed_event(FeedEvent::Bar(Bar::opening(t(0), 1.0865)));
        app.handle_feed_event(tick_event());

        assert!(app.symbol.is_some());
        assert!(app.account.is_some());
        assert!(app.last_result.price().is_some());
        assert_eq!(app.overlay.price(), app.last_result.price());
    }

    #[test]
    fn recompute_without_snapshots_is_noop() {
        let mut app = test_app();
        app.recompute();
        assert_eq!(app.last_result, StopOutResult::NoPosition);
        assert!(app.overlay.line().is_none());
    }

    #[test]
    fn bar_history_is_capped() {
        let mut app = test_app();
        for i in 0..(MAX_BARS + 50) {
            app.handle_feed_event(FeedEvent::Bar(Bar::opening(t((i % 60) as u32), 1.0865)));
        }
        assert_eq!(app.bars.len(), MAX_BARS);
    }

    #[test]
    fn follow_viewport_tracks_right_edge() {
        let mut app = test_app();
        app.viewport.visible = 50;
        for i in 0..200u32 {
            app.handle_feed_event(FeedEvent::Bar(Bar::opening(t(i % 60), 1.0865)));
        }
        assert_eq!(app.viewport.first_visible, 150);
    }

    #[test]
    fn scroll_left_releases_follow_and_scroll_right_restores_it() {
        let mut app = test_app();
        app.viewport.visible = 50;
        for i in 0..200u32 {
            app.handle_feed_event(FeedEvent::Bar(Bar::opening(t(i % 60), 1.0865)));
        }

        app.scroll_left(30);
        assert!(!app.viewport.follow);
        assert_eq!(app.viewport.first_visible, 120);

        app.scroll_right(100);
        assert!(app.viewport.follow);
        assert_eq!(app.viewport.first_visible, 150);
    }

    #[test]
    fn zoom_bounds_are_enforced() {
        let mut app = test_app();
        for _ in 0..6 {
            app.zoom_in();
        }
        assert_eq!(app.viewport.visible, MIN_VISIBLE_BARS);
        for _ in 0..8 {
            app.zoom_out();
        }
        assert_eq!(app.viewport.visible, MAX_VISIBLE_BARS);
    }

    #[test]
    fn scrolling_reanchors_label() {
        let mut app = test_app();
        for i in 0..100u32 {
            app.handle_feed_event(FeedEvent::Bar(Bar::opening(t(i % 60), 1.0865)));
        }
        app.viewport.visible = 50;
        app.jump_to_latest();
        app.handle_feed_event(tick_event());
        let before = app.overlay.label().unwrap().anchor;

        app.scroll_left(20);
        let after = app.overlay.label().unwrap().anchor;
        assert_ne!(before, after);
        assert_eq!(after, app.anchor_time().unwrap());
    }

    #[test]
    fn visibility_toggle_preserves_computed_price() {
        let mut app = test_app();
        app.handle_feed_event(FeedEvent::Bar(Bar::opening(t(0), 1.0865)));
        app.handle_feed_event(tick_event());
        let price = app.overlay.price();

        app.toggle_line_visibility();
        assert!(app.overlay.is_hidden());
        assert_eq!(app.overlay.price(), price);

        app.toggle_line_visibility();
        assert!(!app.overlay.is_hidden());
    }
}
