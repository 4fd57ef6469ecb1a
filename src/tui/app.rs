//! TUI Application - terminal setup and the main loop

use std::io::{self, Stdout};
use std::sync::Arc;
use std::time::{Duration, Instant};

use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tokio::sync::mpsc;

use super::context::Context;
use super::events::{Event, EventSource};
use super::runtime::EffectRunner;
use super::shell::Shell;
use super::theme::Theme;
use super::views::{HomeView, Message};
use crate::api::CloudApi;
use crate::error::{NavError, Result};

/// Smallest terminal the layout is usable in
pub const MIN_WIDTH: u16 = 60;
pub const MIN_HEIGHT: u16 = 12;

type Term = Terminal<CrosstermBackend<Stdout>>;

pub struct App {
    shell: Shell,
    theme: Theme,
    runner: EffectRunner,
    messages: Option<mpsc::UnboundedReceiver<Message>>,
    tick_rate: Duration,
}

impl App {
    pub fn new(api: Arc<dyn CloudApi>, context: Context, tick_rate: Duration) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            shell: Shell::new(Box::new(HomeView::new()), context),
            theme: Theme::default(),
            runner: EffectRunner::new(api, tx),
            messages: Some(rx),
            tick_rate,
        }
    }

    /// Take over the terminal until the user quits
    pub async fn run(mut self) -> Result<()> {
        let mut terminal = setup_terminal()?;
        let result = self.main_loop(&mut terminal).await;
        // Restore even when the loop failed
        restore_terminal(&mut terminal)?;
        result
    }

    async fn main_loop(&mut self, terminal: &mut Term) -> Result<()> {
        let size = terminal.size()?;
        if size.width < MIN_WIDTH || size.height < MIN_HEIGHT {
            return Err(NavError::TerminalTooSmall {
                width: size.width,
                height: size.height,
                min_width: MIN_WIDTH,
                min_height: MIN_HEIGHT,
            });
        }
        self.shell.resize(size.width, size.height);

        let messages = self.messages.take().ok_or_else(|| NavError::TuiError {
            reason: "event loop already started".to_string(),
        })?;
        let mut events = EventSource::new(messages, self.tick_rate);
        tracing::info!("browsing project {}", self.shell.context().project_id());

        loop {
            terminal.draw(|frame| self.shell.render(frame, &self.theme, Instant::now()))?;

            let Some(event) = events.next().await else {
                tracing::info!("terminal event stream closed");
                break;
            };
            let effect = match event {
                Event::Key(key) => self.shell.handle_key(key),
                Event::Message(msg) => self.shell.handle_message(msg),
                Event::Resize(w, h) => {
                    self.shell.resize(w, h);
                    None
                }
                Event::Tick => {
                    self.shell.tick(Instant::now());
                    None
                }
            };
            if let Some(effect) = effect {
                self.runner.dispatch(effect);
            }

            if self.shell.should_quit() {
                break;
            }
        }

        Ok(())
    }
}

fn setup_terminal() -> Result<Term> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend)?;
    Ok(terminal)
}

fn restore_terminal(terminal: &mut Term) -> Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}
