//! Keyboard input dispatch — global keys first, then panel-specific keys.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::app::{AppState, Panel};

/// Handle a key event.
pub fn handle_key(app: &mut AppState, key: KeyEvent) {
    // Only handle key press events (Windows sends both Press and Release).
    if key.kind != KeyEventKind::Press {
        return;
    }

    // Shift+S: toggle stop-out line visibility, from any panel.
    if let KeyCode::Char(c) = key.code {
        if (c == 'S' || c == 's') && key.modifiers.contains(KeyModifiers::SHIFT) {
            app.toggle_line_visibility();
            return;
        }
    }

    // Global keys.
    match key.code {
        KeyCode::Char('q') => {
            app.running = false;
            return;
        }
        KeyCode::Char('1') => {
            app.active_panel = Panel::Chart;
            return;
        }
        KeyCode::Char('2') => {
            app.active_panel = Panel::Account;
            return;
        }
        KeyCode::Char('3') => {
            app.active_panel = Panel::Help;
            return;
        }
        KeyCode::Tab => {
            if key.modifiers.contains(KeyModifiers::SHIFT) {
                app.active_panel = app.active_panel.prev();
            } else {
                app.active_panel = app.active_panel.next();
            }
            return;
        }
        KeyCode::BackTab => {
            app.active_panel = app.active_panel.prev();
            return;
        }
        _ => {}
    }

    // Panel-specific keys.
    match app.active_panel {
        Panel::Chart => handle_chart_key(app, key),
        Panel::Account => {} // display only
        Panel::Help => {}
    }
}

fn handle_chart_key(app: &mut AppState, key: KeyEvent) {
    match key.code {
        KeyCode::Char('h') | KeyCode::Left => app.scroll_left(10),
        KeyCode::Char('l') | KeyCode::Right => app.scroll_right(10),
        KeyCode::Char('+') | KeyCode::Char('=') => app.zoom_in(),
        KeyCode::Char('-') => app.zoom_out(),
        KeyCode::End | KeyCode::Char('g') => app.jump_to_latest(),
        KeyCode::Char('p') => app.toggle_feed_paused(),
        _ => {}
    }
}
