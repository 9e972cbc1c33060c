//! Panel 3 — Help: keyboard shortcuts and a note on what the line means.

use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use crate::app::AppState;
use crate::theme;

pub fn render(f: &mut Frame, area: Rect, _app: &AppState) {
    let mut lines: Vec<Line> = Vec::new();

    section(&mut lines, "Global");
    key(&mut lines, "1-3", "Switch to panel by number");
    key(&mut lines, "Tab / Shift+Tab", "Cycle panels forward / back");
    key(&mut lines, "Shift+S", "Hide / show the stop-out line and label");
    key(&mut lines, "q", "Quit");
    lines.push(Line::from(""));

    section(&mut lines, "Panel 1 — Chart");
    key(&mut lines, "h / l, arrows", "Scroll the viewport left / right");
    key(&mut lines, "+ / -", "Zoom in / out");
    key(&mut lines, "g / End", "Jump to the latest bar and follow");
    key(&mut lines, "p", "Pause / resume the feed");
    lines.push(Line::from(""));

    section(&mut lines, "Panel 2 — Account");
    key(&mut lines, "", "Displays account state and open positions");
    lines.push(Line::from(""));

    section(&mut lines, "About the line");
    note(&mut lines, "The stop-out line marks the price at which the broker");
    note(&mut lines, "force-liquidates the net position on this symbol: the");
    note(&mut lines, "point where equity falls to the stop-out percentage of");
    note(&mut lines, "used margin. Longs close at bid, shorts at ask; the");
    note(&mut lines, "short-side line is shifted down by one spread.");

    f.render_widget(Paragraph::new(lines), area);
}

fn section<'a>(lines: &mut Vec<Line<'a>>, title: &str) {
    lines.push(Line::from(Span::styled(title.to_string(), theme::accent_bold())));
}

fn key<'a>(lines: &mut Vec<Line<'a>>, keys: &str, desc: &str) {
    lines.push(Line::from(vec![
        Span::styled(format!("  {keys:>16}  "), theme::accent()),
        Span::styled(desc.to_string(), theme::muted()),
    ]));
}

fn note<'a>(lines: &mut Vec<Line<'a>>, text: &str) {
    lines.push(Line::from(Span::styled(format!("  {text}"), theme::muted())));
}
