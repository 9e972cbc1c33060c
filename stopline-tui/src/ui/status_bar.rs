//! Bottom status bar — panel hints, line state, last status message.

use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use crate::app::{AppState, StatusLevel};
use crate::theme;

pub fn render(f: &mut Frame, area: Rect, app: &AppState) {
    let mut spans: Vec<Span> = Vec::new();

    spans.push(Span::styled(" 1:Chart 2:Account 3:Help  Shift+S:line", theme::muted()));
    spans.push(Span::raw(" | "));

    match (app.overlay.price(), app.overlay.is_hidden()) {
        (Some(price), false) => {
            let text = match &app.symbol {
                Some(sym) => format!("stop-out {}", sym.format_price(price)),
                None => format!("stop-out {price}"),
            };
            spans.push(Span::styled(text, theme::warning()));
        }
        (Some(_), true) => spans.push(Span::styled("stop-out hidden", theme::muted())),
        (None, _) => spans.push(Span::styled("no position", theme::muted())),
    }

    if app.feed_paused {
        spans.push(Span::raw(" | "));
        spans.push(Span::styled("PAUSED", theme::negative()));
    }

    if let Some((msg, level)) = &app.status_message {
        spans.push(Span::raw(" | "));
        let style = match level {
            StatusLevel::Info => theme::accent(),
            StatusLevel::Warning => theme::warning(),
        };
        spans.push(Span::styled(msg.as_str(), style));
    }

    f.render_widget(Paragraph::new(Line::from(spans)), area);
}
