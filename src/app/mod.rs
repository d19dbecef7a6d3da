//! Application state and event handling

pub mod input;
pub mod state;

use std::io::{self, Stdout};
use std::time::Duration;

use anyhow::Result;
use crossterm::{
    event::{Event, EventStream, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use futures_util::StreamExt;
use ratatui::{Terminal, backend::CrosstermBackend};
use tokio::time::{Instant, MissedTickBehavior};

use crate::config::Config;
use crate::quiz::QuizRun;
use crate::ui;
use input::{Action, key_with_modifier_to_action};
use state::{AppState, Screen};

/// How often the run clock is advanced and the screen redrawn
const TICK_RATE: Duration = Duration::from_millis(100);

/// The main application
pub struct App {
    /// Application configuration
    config: Config,

    /// Current application state
    state: AppState,

    /// Terminal backend
    terminal: Terminal<CrosstermBackend<Stdout>>,
}

impl App {
    /// Create a new application instance for a prepared run
    pub fn new(config: Config, run: QuizRun, skipped: usize) -> Result<Self> {
        let terminal = Self::setup_terminal()?;

        Ok(Self { config, state: AppState::new(run, skipped), terminal })
    }

    /// Set up the terminal for TUI rendering
    fn setup_terminal() -> Result<Terminal<CrosstermBackend<Stdout>>> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend)?;
        Ok(terminal)
    }

    /// Restore the terminal to its original state
    fn restore_terminal(&mut self) -> Result<()> {
        disable_raw_mode()?;
        execute!(self.terminal.backend_mut(), LeaveAlternateScreen)?;
        self.terminal.show_cursor()?;
        Ok(())
    }

    /// Run the application main loop
    pub async fn run(&mut self) -> Result<()> {
        // Set up panic hook to restore terminal
        let original_hook = std::panic::take_hook();
        std::panic::set_hook(Box::new(move |panic_info| {
            let _ = disable_raw_mode();
            let _ = execute!(io::stdout(), LeaveAlternateScreen);
            original_hook(panic_info);
        }));

        let theme = self.config.active_theme();
        let mut events = EventStream::new();
        let mut ticker = tokio::time::interval(TICK_RATE);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        let mut last_tick = Instant::now();

        loop {
            let area = self.terminal.draw(|frame| ui::draw(frame, &self.state, &theme))?.area;
            if self.state.screen() == Screen::Results {
                let max = ui::results::max_review_scroll(&self.state.run, area, &theme);
                self.state.set_review_max_scroll(max);
            }

            tokio::select! {
                // Wall-clock time for the countdown and auto-advance
                now = ticker.tick() => {
                    self.state.tick(now.duration_since(last_tick));
                    last_tick = now;
                }

                event = events.next() => {
                    match event {
                        Some(Ok(Event::Key(key))) if key.kind == KeyEventKind::Press => {
                            if self.handle_key(key) {
                                break;
                            }
                        }
                        Some(Ok(_)) => {}
                        Some(Err(e)) => {
                            tracing::error!("Error reading terminal event: {}", e);
                        }
                        None => break,
                    }
                }
            }
        }

        self.restore_terminal()?;
        Ok(())
    }

    /// Handle a key press, returns true if should exit
    fn handle_key(&mut self, key: KeyEvent) -> bool {
        if self.state.screen() == Screen::NameEntry && !self.state.show_help {
            return self.handle_name_key(key);
        }

        match self.map_key(key) {
            Some(action) => {
                tracing::debug!(?action, "Key action");
                self.state.apply(action)
            }
            None => false,
        }
    }

    /// Text editing on the name entry screen
    fn handle_name_key(&mut self, key: KeyEvent) -> bool {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return true;
        }

        match key.code {
            KeyCode::Esc => return true,
            KeyCode::Enter => self.state.submit_name(),
            KeyCode::Backspace => self.state.name.delete_char(),
            KeyCode::Left => self.state.name.move_left(),
            KeyCode::Right => self.state.name.move_right(),
            KeyCode::Char(c) => self.state.name.insert_char(c),
            _ => {}
        }
        false
    }

    fn map_key(&self, key: KeyEvent) -> Option<Action> {
        let vim_only = matches!(
            key.code,
            KeyCode::Char('j') | KeyCode::Char('k') | KeyCode::Char('h') | KeyCode::Char('l')
        );
        if vim_only && !self.config.vim_mode {
            return None;
        }
        key_with_modifier_to_action(key.code, key.modifiers)
    }
}

impl Drop for App {
    fn drop(&mut self) {
        let _ = self.restore_terminal();
    }
}
