//! Terminal-independent application state: the session, both input boxes,
//! the spinner, and the channel that carries classification results back to
//! the event loop.

use ratatui::crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use roost_core::controller::{begin_retry, begin_submit, complete_submit};
use roost_core::{Accepted, ClassifyError, Controller, Intent, Resolution, SessionState, View};
use tokio::sync::mpsc;
use tracing::{debug, warn};

use crate::tui::theme::Theme;
use crate::tui::widgets::InputBox;

/// A finished classification, sent from the spawned task to the event loop
#[derive(Debug)]
pub struct Classified {
    pub accepted: Accepted,
    pub outcome: Result<Intent, ClassifyError>,
}

/// What the event loop should do after a key press
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyOutcome {
    Continue,
    Exit,
}

pub struct App {
    state: SessionState,
    controller: Controller,
    home_input: InputBox,
    chat_input: InputBox,
    spinner_state: usize,
    results_tx: mpsc::Sender<Classified>,
}

impl App {
    pub fn new(controller: Controller, theme: &Theme) -> (Self, mpsc::Receiver<Classified>) {
        // The busy guard keeps at most one classification in flight
        let (results_tx, results_rx) = mpsc::channel(1);
        let app = Self {
            state: SessionState::new(),
            controller,
            home_input: InputBox::new(" Search ", "e.g. 2 bedroom apartment near the park", theme),
            chat_input: InputBox::new(" Message ", "Ask a follow-up…", theme),
            spinner_state: 0,
            results_tx,
        };
        (app, results_rx)
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn home_input(&self) -> &InputBox {
        &self.home_input
    }

    pub fn chat_input(&self) -> &InputBox {
        &self.chat_input
    }

    pub fn spinner_state(&self) -> usize {
        self.spinner_state
    }

    pub fn advance_spinner(&mut self) {
        self.spinner_state = self.spinner_state.wrapping_add(1);
    }

    fn active_input(&mut self) -> Option<&mut InputBox> {
        match self.state.current_view() {
            View::Home => Some(&mut self.home_input),
            View::Chat => Some(&mut self.chat_input),
            View::Listings => None,
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> KeyOutcome {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Esc => return KeyOutcome::Exit,
            KeyCode::Char('c') if ctrl => return KeyOutcome::Exit,
            KeyCode::Char('r') if ctrl => self.retry(),
            KeyCode::Enter => self.submit_active_input(),
            _ => {
                if let Some(input) = self.active_input() {
                    input.input(key);
                }
            }
        }
        KeyOutcome::Continue
    }

    pub fn handle_paste(&mut self, data: &str) {
        if let Some(input) = self.active_input() {
            input.paste(data);
        }
    }

    /// Submit the active input box. The box is cleared whether or not the
    /// submission is accepted.
    fn submit_active_input(&mut self) {
        let Some(input) = self.active_input() else {
            return;
        };
        let text = input.take_submission();

        match begin_submit(&mut self.state, &text) {
            Ok(accepted) => self.dispatch(accepted),
            Err(rejected) => debug!(target: "tui.app", "Ignoring submission: {}", rejected),
        }
    }

    fn retry(&mut self) {
        match begin_retry(&mut self.state) {
            Ok(accepted) => self.dispatch(accepted),
            Err(rejected) => debug!(target: "tui.app", "Ignoring retry: {}", rejected),
        }
    }

    /// Run the classification on its own task; the result comes back through
    /// the results channel.
    fn dispatch(&mut self, accepted: Accepted) {
        self.spinner_state = 0;
        let controller = self.controller.clone();
        let results_tx = self.results_tx.clone();
        tokio::spawn(async move {
            let outcome = controller.classify(accepted.text()).await;
            if results_tx.send(Classified { accepted, outcome }).await.is_err() {
                warn!(target: "tui.app", "Event loop gone before classification finished");
            }
        });
    }

    pub fn on_classified(&mut self, classified: Classified) -> Resolution {
        complete_submit(&mut self.state, classified.accepted, classified.outcome)
    }
}
