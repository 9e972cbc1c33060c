//! Account panel — the numbers behind the line.

use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use stopline_core::domain::TradeSide;
use stopline_core::stopout::StopOutResult;

use crate::app::AppState;
use crate::theme;

pub fn render(f: &mut Frame, area: Rect, app: &AppState) {
    let mut lines: Vec<Line> = Vec::new();

    let (Some(symbol), Some(account)) = (&app.symbol, &app.account) else {
        f.render_widget(
            Paragraph::new("waiting for account data...").style(theme::muted()),
            area,
        );
        return;
    };

    lines.push(Line::from(vec![
        Span::styled(format!("{}  ", symbol.name), theme::accent_bold()),
        Span::styled(
            format!(
                "bid {}  ask {}  spread {:.1} pips",
                symbol.format_price(symbol.bid),
                symbol.format_price(symbol.ask),
                symbol.spread() / symbol.pip_size
            ),
            theme::muted(),
        ),
    ]));
    lines.push(Line::from(""));

    row(&mut lines, "Balance", format!("{:.2}", account.balance), theme::accent());
    row(&mut lines, "Equity", format!("{:.2}", account.equity), theme::accent());
    row(&mut lines, "Used margin", format!("{:.2}", account.margin), theme::accent());
    row(
        &mut lines,
        "Free margin",
        format!("{:.2}", account.free_margin),
        ratatui::style::Style::default().fg(theme::pnl_color(account.free_margin)),
    );
    if let Some(level) = account.margin_level() {
        row(&mut lines, "Margin level", format!("{level:.1}%"), theme::accent());
    }
    row(
        &mut lines,
        "Stop-out level",
        format!("{:.0}% of margin", account.stop_out_level),
        theme::warning(),
    );
    lines.push(Line::from(""));

    // Net exposure on the charted symbol.
    let net = app.net_volume();
    let direction = if net > 0.0 {
        Span::styled("net long", theme::positive())
    } else if net < 0.0 {
        Span::styled("net short", theme::negative())
    } else {
        Span::styled("flat", theme::muted())
    };
    lines.push(Line::from(vec![
        Span::styled(format!("  {:<16}", "Net volume"), theme::muted()),
        Span::styled(format!("{:.0} units ", net.abs()), theme::accent()),
        direction,
    ]));
    lines.push(Line::from(""));

    match app.last_result {
        StopOutResult::Price(price) => {
            row(
                &mut lines,
                "Stop-out price",
                symbol.format_price(price),
                theme::warning(),
            );
            // Distance from the close-out side of the quote.
            let reference = if net > 0.0 { symbol.bid } else { symbol.ask };
            let pips = (reference - price).abs() / symbol.pip_size;
            row(&mut lines, "Distance", format!("{pips:.1} pips"), theme::muted());
        }
        StopOutResult::NoPosition => {
            row(&mut lines, "Stop-out price", "no position".into(), theme::muted());
        }
    }
    lines.push(Line::from(""));

    lines.push(Line::from(Span::styled("Open positions", theme::accent_bold())));
    if app.positions.is_empty() {
        lines.push(Line::from(Span::styled("  (none)", theme::muted())));
    }
    for position in &app.positions {
        let (side, style) = match position.side {
            TradeSide::Buy => ("BUY ", theme::positive()),
            TradeSide::Sell => ("SELL", theme::negative()),
        };
        lines.push(Line::from(vec![
            Span::styled(format!("  {side} "), style),
            Span::styled(
                format!(
                    "{:<8} {:>10.0} units @ {}",
                    position.symbol,
                    position.volume,
                    symbol.format_price(position.entry_price)
                ),
                theme::muted(),
            ),
        ]));
    }

    f.render_widget(Paragraph::new(lines), area);
}

fn row<'a>(lines: &mut Vec<Line<'a>>, name: &str, value: String, style: ratatui::style::Style) {
    lines.push(Line::from(vec![
        Span::styled(format!("  {name:<16}"), theme::muted()),
        Span::styled(value, style),
    ]));
}
