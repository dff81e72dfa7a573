//! Terminal front end: owns the terminal session and the frame loop, feeding
//! wall-clock time into the engine and keystrokes into its trigger.

use std::io;
use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use rand::rngs::SmallRng;
use rand::SeedableRng;
use ratatui::{
    backend::CrosstermBackend,
    layout::{Alignment, Rect},
    style::{Color, Style},
    widgets::Paragraph,
    Terminal,
};
use tracing::debug;

use crate::config::Config;
use crate::engine::scheduler::{Engine, EnginePhase};
use crate::engine::surface::Rgba;
use crate::engine::terminal::TerminalSurface;
use crate::snapshot::ScoreSnapshot;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum UiAction {
    Trigger,
    Quit,
}

fn key_to_action(key: KeyEvent) -> Option<UiAction> {
    if key.kind != KeyEventKind::Press {
        return None;
    }
    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => Some(UiAction::Quit),
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            Some(UiAction::Quit)
        }
        KeyCode::Char(' ') | KeyCode::Enter | KeyCode::Char('r') => Some(UiAction::Trigger),
        _ => None,
    }
}

/// Main entry point for the reveal screen. Returns once the user quits.
pub async fn run(mut snapshot: ScoreSnapshot, config: Config) -> Result<()> {
    if let Some(fireworks) = config.fireworks {
        snapshot.fireworks = fireworks;
    }
    let mut engine = Engine::new(
        snapshot,
        config.theme.board_theme(),
        config.boot_delay_ms as f64,
        SmallRng::from_entropy(),
    )?;

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_loop(&mut terminal, &mut engine, &config);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn run_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    engine: &mut Engine<SmallRng>,
    config: &Config,
) -> Result<()> {
    let clock = Instant::now();
    let mut surface = TerminalSurface::new(0, 0, Rgba::rgb(0, 0, 0));

    loop {
        let now = clock.elapsed().as_secs_f64() * 1000.0;

        terminal.draw(|f| {
            let area = f.area();
            // The bottom row stays free for the key hint.
            let board = Rect {
                height: area.height.saturating_sub(1),
                ..area
            };
            surface.resize(board.width, board.height);
            engine.on_frame(&mut surface, now);
            f.render_widget(&surface, board);

            let hint = match engine.phase() {
                EnginePhase::Idle => "space: reveal the scores   q: quit",
                EnginePhase::Completed => "space: replay   q: quit",
                _ => "r: restart   q: quit",
            };
            let hint_area = Rect::new(area.x, area.bottom().saturating_sub(1), area.width, 1);
            f.render_widget(
                Paragraph::new(hint)
                    .alignment(Alignment::Center)
                    .style(Style::default().fg(Color::DarkGray)),
                hint_area,
            );
        })?;

        // Poll for keyboard events until the next frame is due
        if event::poll(Duration::from_millis(config.frame_interval_ms))? {
            if let Event::Key(key) = event::read()? {
                match key_to_action(key) {
                    Some(UiAction::Quit) => {
                        debug!("quit requested");
                        break;
                    }
                    Some(UiAction::Trigger) => {
                        debug!("animation trigger at {:.0} ms", now);
                        engine.trigger_animation(now);
                    }
                    None => {}
                }
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyEventState;

    fn press(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent {
            code,
            modifiers,
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        }
    }

    #[test]
    fn test_start_keys_trigger() {
        for code in [KeyCode::Char(' '), KeyCode::Enter, KeyCode::Char('r')] {
            assert_eq!(
                key_to_action(press(code, KeyModifiers::NONE)),
                Some(UiAction::Trigger)
            );
        }
    }

    #[test]
    fn test_quit_keys() {
        assert_eq!(
            key_to_action(press(KeyCode::Char('q'), KeyModifiers::NONE)),
            Some(UiAction::Quit)
        );
        assert_eq!(
            key_to_action(press(KeyCode::Esc, KeyModifiers::NONE)),
            Some(UiAction::Quit)
        );
        assert_eq!(
            key_to_action(press(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            Some(UiAction::Quit)
        );
    }

    #[test]
    fn test_release_events_ignored() {
        let mut key = press(KeyCode::Char(' '), KeyModifiers::NONE);
        key.kind = KeyEventKind::Release;
        assert_eq!(key_to_action(key), None);
    }

    #[test]
    fn test_unbound_keys_ignored() {
        assert_eq!(key_to_action(press(KeyCode::Char('x'), KeyModifiers::NONE)), None);
        assert_eq!(key_to_action(press(KeyCode::Tab, KeyModifiers::NONE)), None);
    }
}
