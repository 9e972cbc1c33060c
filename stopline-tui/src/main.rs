//! Stopline TUI — a terminal chart with the account stop-out line.
//!
//! Shows where the broker would force-liquidate the net position on the
//! charted symbol, recomputed on every tick, new bar, and timer interval.
//! Shift+S hides and shows the line without touching the computed value.

mod app;
mod input;
mod theme;
mod ui;
mod worker;

#[cfg(test)]
mod test_helpers;

use std::io::{self, stdout};
use std::path::PathBuf;
use std::sync::mpsc;
use std::time::{Duration, Instant};

use anyhow::{bail, Result};
use clap::Parser;
use crossterm::event::{self, Event};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;

use stopline_core::config::IndicatorConfig;
use stopline_core::feed::{BrokerSim, SimConfig};

use crate::app::AppState;
use crate::worker::FeedCommand;

#[derive(Debug, Parser)]
#[command(name = "stopline", about = "Terminal chart with the stop-out line indicator")]
struct Cli {
    /// Path to the indicator config (TOML). Defaults to ./stopline.toml.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Symbol preset for the simulated feed (EURUSD, USDJPY).
    #[arg(long, default_value = "EURUSD")]
    symbol: String,

    /// Seed for the simulated feed.
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Override the recomputation interval in milliseconds (minimum 50).
    #[arg(long)]
    update_ms: Option<u64>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config_path = cli.config.unwrap_or_else(|| PathBuf::from("stopline.toml"));
    let mut config = IndicatorConfig::load(&config_path)?;
    if let Some(ms) = cli.update_ms {
        config.update_frequency_ms = ms;
        config = config.validate();
    }

    let Some(sim_config) = SimConfig::preset(&cli.symbol) else {
        bail!("unknown symbol preset: {}", cli.symbol);
    };
    let sim = BrokerSim::new(sim_config, cli.seed);

    // Install a panic hook that restores the terminal before printing the panic.
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stderr(), LeaveAlternateScreen);
        default_hook(info);
    }));

    // Feed channels
    let (cmd_tx, cmd_rx) = mpsc::channel();
    let (event_tx, event_rx) = mpsc::channel();
    let feed_handle = worker::spawn_feed(sim, cmd_rx, event_tx);

    let mut app = AppState::new(config, cmd_tx.clone(), event_rx);

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    let result = run_app(&mut terminal, &mut app);

    // Shutdown feed
    let _ = cmd_tx.send(FeedCommand::Shutdown);
    let _ = feed_handle.join();

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut AppState,
) -> Result<()> {
    let interval = Duration::from_millis(app.config.update_frequency_ms);
    let mut next_recompute = Instant::now() + interval;

    loop {
        // 1. Render
        terminal.draw(|f| ui::draw(f, app))?;

        // 2. Drain feed events (non-blocking). Ticks and bars recompute.
        while let Ok(feed_event) = app.feed_rx.try_recv() {
            app.handle_feed_event(feed_event);
        }

        // 3. Poll for input; the timeout is the timer.
        let timeout = next_recompute.saturating_duration_since(Instant::now());
        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                input::handle_key(app, key);
            }
        }

        // 4. Timer recompute at the configured interval.
        if Instant::now() >= next_recompute {
            app.recompute();
            next_recompute = Instant::now() + interval;
        }

        // 5. Check quit
        if !app.running {
            break;
        }
    }
    Ok(())
}
