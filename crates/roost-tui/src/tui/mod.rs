//! TUI module for the roost CLI
//!
//! This module implements the terminal user interface using ratatui.

use std::io::{self, Stdout};
use std::time::Duration;

use crate::error::{Error, Result};
use crate::tui::app::{App, Classified, KeyOutcome};
use crate::tui::theme::Theme;
use crossterm::event::EventStream;
use futures::StreamExt;
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use ratatui::crossterm::event::{Event, KeyEventKind};
use roost_core::Controller;
use tokio::sync::mpsc;
use tracing::{debug, error, info};

pub mod app;
pub mod render;
pub mod terminal;
pub mod theme;
pub mod widgets;

/// Main TUI application state
pub struct Tui {
    /// Terminal instance
    terminal: Terminal<CrosstermBackend<Stdout>>,
    app: App,
    /// Finished classifications from spawned tasks
    results_rx: mpsc::Receiver<Classified>,
    theme: Theme,
    /// How often to advance the spinner while busy
    tick: Duration,
}

impl Tui {
    /// Put the terminal into TUI mode and create the app
    pub fn new(controller: Controller, theme: Theme, tick: Duration) -> Result<Self> {
        let mut guard = terminal::SetupGuard::new();
        let mut stdout = io::stdout();
        terminal::setup(&mut stdout)?;

        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend)?;
        guard.disarm();

        let (app, results_rx) = App::new(controller, &theme);
        Ok(Self {
            terminal,
            app,
            results_rx,
            theme,
            tick,
        })
    }

    fn draw(&mut self) -> Result<()> {
        let app = &self.app;
        let theme = &self.theme;
        self.terminal.draw(|f| render::render(f, app, theme))?;
        Ok(())
    }

    pub async fn run(&mut self) -> Result<()> {
        info!(target: "tui.run", "Starting TUI");

        let mut events = EventStream::new();
        let mut tick = tokio::time::interval(self.tick.max(Duration::from_millis(10)));
        tick.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

        let mut should_exit = false;
        let mut needs_redraw = true;

        while !should_exit {
            if needs_redraw {
                self.draw()?;
                needs_redraw = false;
            }

            tokio::select! {
                maybe_event = events.next() => {
                    match maybe_event {
                        Some(Ok(Event::Key(key_event))) if key_event.kind == KeyEventKind::Press => {
                            if self.app.handle_key(key_event) == KeyOutcome::Exit {
                                should_exit = true;
                            }
                            needs_redraw = true;
                        }
                        Some(Ok(Event::Paste(data))) => {
                            self.app.handle_paste(&data);
                            needs_redraw = true;
                        }
                        Some(Ok(Event::Resize(..))) => {
                            needs_redraw = true;
                        }
                        Some(Ok(_)) => {}
                        Some(Err(e)) if e.kind() == io::ErrorKind::Interrupted => {
                            debug!(target: "tui.input", "Ignoring interrupted syscall");
                        }
                        Some(Err(e)) => {
                            error!(target: "tui.run", "Fatal input error: {}. Exiting.", e);
                            return Err(Error::Io(e));
                        }
                        None => return Err(Error::InputClosed),
                    }
                }
                Some(classified) = self.results_rx.recv() => {
                    let resolution = self.app.on_classified(classified);
                    debug!(target: "tui.run", ?resolution, "Applied classification");
                    needs_redraw = true;
                }
                _ = tick.tick() => {
                    if self.app.state().is_busy() {
                        self.app.advance_spinner();
                        needs_redraw = true;
                    }
                }
            }
        }

        info!(target: "tui.run", "Exiting TUI");
        Ok(())
    }
}

impl Drop for Tui {
    fn drop(&mut self) {
        terminal::cleanup();
    }
}

/// Restore the terminal before printing panic information
pub fn setup_panic_hook() {
    std::panic::set_hook(Box::new(|panic_info| {
        terminal::cleanup();
        report_panic(panic_info);
    }));
}

#[expect(clippy::print_stderr)]
fn report_panic(panic_info: &std::panic::PanicHookInfo<'_>) {
    // Print panic info to stderr after restoring terminal state
    eprintln!("Application panicked:");
    eprintln!("{panic_info}");
}

/// High-level entry point for running the TUI
pub async fn run_tui(controller: Controller, tick: Duration) -> Result<()> {
    let mut tui = Tui::new(controller, Theme::default(), tick)?;
    tui.run().await
}
