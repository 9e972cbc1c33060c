//! Chart panel — close-price line with the stop-out overlay.
//!
//! Displays:
//! - Close prices of the visible bar window
//! - The stop-out horizontal line in the configured color/style
//! - The price label anchored at the leftmost visible bar
//!
//! Hidden overlays (Shift+S) are kept out of the draw entirely; the
//! computed value still lives in app state.

use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::symbols;
use ratatui::text::Span;
use ratatui::widgets::{Axis, Chart, Dataset, GraphType, Paragraph, Widget};

use stopline_core::config::LineStyle;
use stopline_core::domain::Bar;

use crate::app::AppState;
use crate::theme;

pub struct ChartPanel<'a> {
    app: &'a AppState,
}

impl<'a> ChartPanel<'a> {
    pub fn new(app: &'a AppState) -> Self {
        Self { app }
    }

    fn visible_bars(&self) -> &'a [Bar] {
        let bars = &self.app.bars;
        let first = self.app.viewport.first_visible.min(bars.len());
        let end = (first + self.app.viewport.visible).min(bars.len());
        &bars[first..end]
    }
}

impl Widget for ChartPanel<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let window = self.visible_bars();
        if window.is_empty() {
            Paragraph::new("waiting for market data...")
                .style(theme::muted())
                .render(area, buf);
            return;
        }

        let closes: Vec<(f64, f64)> = window
            .iter()
            .enumerate()
            .map(|(i, bar)| (i as f64, bar.close))
            .collect();
        let x_max = (window.len() - 1).max(1) as f64;

        let overlay = &self.app.overlay;
        let line_visible = overlay.line().is_some() && !overlay.is_hidden();

        // Y bounds from bar extremes, widened to keep the line on screen.
        let mut y_min = window.iter().map(|b| b.low).fold(f64::INFINITY, f64::min);
        let mut y_max = window.iter().map(|b| b.high).fold(f64::NEG_INFINITY, f64::max);
        if line_visible {
            if let Some(price) = overlay.price() {
                y_min = y_min.min(price);
                y_max = y_max.max(price);
            }
        }
        let y_range = y_max - y_min;
        let y_pad = if y_range > 0.0 { y_range * 0.05 } else { y_max.abs().max(1.0) * 0.001 };
        let y_lower = y_min - y_pad;
        let y_upper = y_max + y_pad;

        let config = &self.app.config;
        let line_data = [(0.0, overlay.price().unwrap_or(0.0)), (x_max, overlay.price().unwrap_or(0.0))];

        let mut datasets = vec![Dataset::default()
            .name(self.app.symbol.as_ref().map(|s| s.name.clone()).unwrap_or_default())
            .marker(symbols::Marker::Braille)
            .graph_type(GraphType::Line)
            .style(theme::accent())
            .data(&closes)];

        if line_visible {
            // Terminal cells cannot draw true widths/styles: style picks the
            // marker, width >= 3 renders bold.
            let marker = match config.line_style {
                LineStyle::Solid => symbols::Marker::Braille,
                LineStyle::Dash | LineStyle::Dot => symbols::Marker::Dot,
            };
            let mut style = Style::default().fg(theme::line_color(&config.line_color));
            if config.line_width >= 3 {
                style = style.add_modifier(Modifier::BOLD);
            }
            datasets.push(
                Dataset::default()
                    .name("stop-out")
                    .marker(marker)
                    .graph_type(GraphType::Line)
                    .style(style)
                    .data(&line_data),
            );
        }

        let fmt = |p: f64| match &self.app.symbol {
            Some(sym) => sym.format_price(p),
            None => format!("{p:.5}"),
        };
        let x_labels = vec![
            Span::styled(window[0].open_time.format("%H:%M:%S").to_string(), theme::muted()),
            Span::styled(
                window[window.len() / 2].open_time.format("%H:%M:%S").to_string(),
                theme::muted(),
            ),
            Span::styled(
                window[window.len() - 1].open_time.format("%H:%M:%S").to_string(),
                theme::muted(),
            ),
        ];
        let y_labels = vec![
            Span::styled(fmt(y_lower), theme::muted()),
            Span::styled(fmt((y_lower + y_upper) / 2.0), theme::muted()),
            Span::styled(fmt(y_upper), theme::muted()),
        ];

        let chart = Chart::new(datasets)
            .x_axis(Axis::default().style(theme::muted()).bounds([0.0, x_max]).labels(x_labels))
            .y_axis(
                Axis::default()
                    .style(theme::muted())
                    .bounds([y_lower, y_upper])
                    .labels(y_labels),
            );
        chart.render(area, buf);

        // The Chart widget has no text annotations, so the label is written
        // straight into the buffer at its anchor position, above the line.
        if !line_visible {
            return;
        }
        let Some(label) = overlay.label() else {
            return;
        };

        // Approximate the plot area: the y-axis labels take ~10 columns on
        // the left and the x-axis takes the bottom 2 rows.
        let plot_left = area.x + 10;
        let plot_top = area.y;
        let plot_width = area.width.saturating_sub(10);
        let plot_height = area.height.saturating_sub(2);
        if plot_width == 0 || plot_height == 0 {
            return;
        }

        let anchor_idx = window
            .iter()
            .position(|bar| bar.open_time >= label.anchor)
            .unwrap_or(0);
        let x_frac = anchor_idx as f64 / x_max;
        let y_frac = if (y_upper - y_lower).abs() > 1e-12 {
            (label.price - y_lower) / (y_upper - y_lower)
        } else {
            0.5
        };

        let px = plot_left + (x_frac * (plot_width.saturating_sub(1)) as f64) as u16;
        let mut py = plot_top + plot_height.saturating_sub(1)
            - (y_frac * (plot_height.saturating_sub(1)) as f64) as u16;
        // Label sits above the line when there is room.
        py = py.saturating_sub(1).max(plot_top);

        if px < area.right() && py < plot_top + plot_height {
            let style = Style::default()
                .fg(theme::line_color(&config.line_color))
                .add_modifier(Modifier::BOLD);
            buf.set_string(px, py, &label.text, style);
        }
    }
}
