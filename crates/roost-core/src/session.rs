//! Session state for a single run of the property-search front end.
//!
//! `SessionState` is only mutated through the reducer functions in
//! [`crate::controller`]. Renderers receive it by shared reference.

use serde::Serialize;
use strum::Display;

/// The screen currently shown. Exactly one is active at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Display)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum View {
    #[default]
    Home,
    Chat,
    Listings,
}

impl View {
    /// Whether this view has an input surface bound to it
    pub fn accepts_input(self) -> bool {
        matches!(self, View::Home | View::Chat)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Display)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum Sender {
    User,
    Bot,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Message {
    pub sender: Sender,
    pub text: String,
    /// Set on the first user message of the session. Rendered in the chat
    /// header instead of the scrolling list.
    pub is_initial_query: bool,
}

impl Message {
    pub fn user(text: impl Into<String>, is_initial_query: bool) -> Self {
        Self {
            sender: Sender::User,
            text: text.into(),
            is_initial_query,
        }
    }

    pub fn bot(text: impl Into<String>) -> Self {
        Self {
            sender: Sender::Bot,
            text: text.into(),
            is_initial_query: false,
        }
    }
}

/// A classification attempt that did not produce an intent
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Failure {
    /// The submitted text, kept so the attempt can be retried
    pub text: String,
    pub reason: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SessionState {
    pub(crate) current_view: View,
    pub(crate) history: Vec<Message>,
    pub(crate) search_query: String,
    pub(crate) is_busy: bool,
    pub(crate) last_failure: Option<Failure>,
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current_view(&self) -> View {
        self.current_view
    }

    pub fn history(&self) -> &[Message] {
        &self.history
    }

    pub fn search_query(&self) -> &str {
        &self.search_query
    }

    pub fn is_busy(&self) -> bool {
        self.is_busy
    }

    pub fn last_failure(&self) -> Option<&Failure> {
        self.last_failure.as_ref()
    }

    /// The message shown in the chat header slot, if any
    pub fn initial_query(&self) -> Option<&Message> {
        self.history.iter().find(|m| m.is_initial_query)
    }

    /// Messages for the scrolling list, in arrival order, without the initial query
    pub fn thread(&self) -> impl Iterator<Item = &Message> + '_ {
        self.history.iter().filter(|m| !m.is_initial_query)
    }

    pub(crate) fn has_initial_query(&self) -> bool {
        self.history.iter().any(|m| m.is_initial_query)
    }
}
