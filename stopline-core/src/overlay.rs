//! Chart overlay state — the line and label objects driven by the
//! calculator's result.
//!
//! This is the host-independent half of the drawing plumbing: an
//! upsert/remove state machine the renderer reads. A `Price` result upserts
//! both objects, `NoPosition` (or a non-positive price) removes them, and
//! the visibility hotkey flips a hidden flag without touching the computed
//! value.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::config::IndicatorConfig;
use crate::domain::SymbolInfo;
use crate::stopout::StopOutResult;

/// Horizontal line object pinned at the stop-out price.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LineObject {
    pub price: f64,
}

/// Text label object anchored at the leftmost visible bar.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabelObject {
    pub text: String,
    pub anchor: NaiveDateTime,
    pub price: f64,
}

/// Owned overlay state for one indicator session.
#[derive(Debug, Clone, Default)]
pub struct ChartOverlay {
    line: Option<LineObject>,
    label: Option<LabelObject>,
    hidden: bool,
    show_label: bool,
    label_prefix: String,
}

impl ChartOverlay {
    pub fn new(config: &IndicatorConfig) -> Self {
        Self {
            line: None,
            label: None,
            hidden: false,
            show_label: config.show_label,
            label_prefix: config.label_prefix.clone(),
        }
    }

    /// Upsert or remove the line and label for a new computation result.
    ///
    /// `anchor` is the open time of the leftmost visible bar; the label sits
    /// there so it stays readable as the chart scrolls. With no bars on the
    /// chart yet there is no anchor: the line is still upserted and the
    /// label is left as it was.
    pub fn apply(
        &mut self,
        result: StopOutResult,
        symbol: &SymbolInfo,
        anchor: Option<NaiveDateTime>,
    ) {
        match result {
            StopOutResult::NoPosition => self.remove(),
            // The original indicator skips drawing non-positive levels (a
            // large margin surplus on a tiny position can push the raw
            // level below zero).
            StopOutResult::Price(price) if price <= 0.0 => self.remove(),
            StopOutResult::Price(price) => {
                self.line = Some(LineObject { price });
                if self.show_label {
                    if let Some(anchor) = anchor {
                        self.label = Some(LabelObject {
                            text: format!("{}{}", self.label_prefix, symbol.format_price(price)),
                            anchor,
                            price,
                        });
                    }
                }
            }
        }
    }

    /// Move the label after a scroll or zoom, without recomputation.
    pub fn reanchor(&mut self, anchor: NaiveDateTime) {
        if let Some(label) = &mut self.label {
            label.anchor = anchor;
        }
    }

    /// Shift+S: flip visibility of both objects. No-op while nothing is
    /// drawn, matching the hotkey handler in the original.
    pub fn toggle_hidden(&mut self) {
        if self.line.is_some() {
            self.hidden = !self.hidden;
        }
    }

    fn remove(&mut self) {
        self.line = None;
        self.label = None;
        self.hidden = false;
    }

    pub fn line(&self) -> Option<&LineObject> {
        self.line.as_ref()
    }

    pub fn label(&self) -> Option<&LabelObject> {
        self.label.as_ref()
    }

    pub fn is_hidden(&self) -> bool {
        self.hidden
    }

    /// Last drawn price, if a line is currently on the chart.
    pub fn price(&self) -> Option<f64> {
        self.line.map(|l| l.price)
    }
}
