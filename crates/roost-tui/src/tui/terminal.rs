//! Terminal mode bookkeeping.
//!
//! Every mode Roost turns on is tracked in [`TERMINAL_STATE`], so restoring
//! the terminal can run from normal exit, the panic hook or a signal handler
//! without double-disabling anything.

use ratatui::crossterm::{
    event::{DisableBracketedPaste, EnableBracketedPaste},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, SetTitle, disable_raw_mode, enable_raw_mode},
};
use std::io::{self, Write};
use std::sync::atomic::{AtomicBool, Ordering};

/// Modes in the order they are enabled. Cleanup walks them in reverse.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Raw,
    AltScreen,
    BracketedPaste,
}

impl Mode {
    const ALL: [Mode; 3] = [Mode::Raw, Mode::AltScreen, Mode::BracketedPaste];

    fn enable<W: Write>(self, w: &mut W) -> io::Result<()> {
        match self {
            Mode::Raw => enable_raw_mode(),
            Mode::AltScreen => execute!(w, EnterAlternateScreen, SetTitle("Roost")),
            Mode::BracketedPaste => execute!(w, EnableBracketedPaste),
        }
    }

    fn disable<W: Write>(self, w: &mut W) -> io::Result<()> {
        match self {
            Mode::Raw => disable_raw_mode(),
            Mode::AltScreen => execute!(w, LeaveAlternateScreen),
            Mode::BracketedPaste => execute!(w, DisableBracketedPaste),
        }
    }
}

pub struct TerminalState {
    enabled: [AtomicBool; 3],
}

impl TerminalState {
    const fn new() -> Self {
        Self {
            enabled: [
                AtomicBool::new(false),
                AtomicBool::new(false),
                AtomicBool::new(false),
            ],
        }
    }

    fn flag(&self, mode: Mode) -> &AtomicBool {
        &self.enabled[mode as usize]
    }

    pub fn is_enabled(&self, mode: Mode) -> bool {
        self.flag(mode).load(Ordering::Relaxed)
    }
}

pub static TERMINAL_STATE: TerminalState = TerminalState::new();

/// Enable every [`Mode`] in order. A mode is recorded only once enabling it
/// succeeded, so a failure part-way leaves exactly the finished steps to undo.
pub fn setup<W: Write>(w: &mut W) -> io::Result<()> {
    for mode in Mode::ALL {
        mode.enable(w)?;
        TERMINAL_STATE.flag(mode).store(true, Ordering::Relaxed);
    }
    Ok(())
}

/// Disable recorded modes, newest first. Errors are ignored; this runs on
/// the way out.
pub fn cleanup_with_writer<W: Write>(writer: &mut W) {
    for mode in Mode::ALL.into_iter().rev() {
        if TERMINAL_STATE.flag(mode).swap(false, Ordering::Relaxed) {
            let _ = mode.disable(writer);
        }
    }
    let _ = writer.flush();
}

pub fn cleanup() {
    cleanup_with_writer(&mut io::stdout());
}

/// Restores the terminal on drop unless disarmed, for early returns while
/// the TUI is starting.
pub struct SetupGuard {
    armed: bool,
}

impl Default for SetupGuard {
    fn default() -> Self {
        Self::new()
    }
}

impl SetupGuard {
    pub fn new() -> Self {
        Self { armed: true }
    }

    pub fn disarm(&mut self) {
        self.armed = false;
    }
}

impl Drop for SetupGuard {
    fn drop(&mut self) {
        if self.armed {
            cleanup();
        }
    }
}
