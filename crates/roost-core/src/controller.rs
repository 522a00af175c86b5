//! Submission handling.
//!
//! A submission is split in two reducer steps around the single suspension
//! point: [`begin_submit`] validates input and records the user message,
//! the caller awaits [`Controller::classify`], and [`complete_submit`] applies
//! the outcome. [`Controller::submit`] runs the whole sequence for callers
//! that can await in place.

use std::sync::Arc;
use std::time::Duration;

use thiserror::Error;
use tracing::{debug, info, warn};

use crate::classifier::{ClassifyError, Classifier, Intent, SimulatedClassifier};
use crate::preferences::ClassifierPreferences;
use crate::session::{Failure, Message, SessionState, View};

pub const DEFAULT_TIMEOUT: Duration = Duration::from_millis(5000);

/// Why a submission was ignored. The state is untouched in every case.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Rejected {
    #[error("input is empty")]
    EmptyInput,
    #[error("a classification is already in flight")]
    Busy,
    #[error("the {0} view has no input")]
    NoInputSurface(View),
    #[error("no failed submission to retry")]
    NothingToRetry,
}

/// Ticket for an accepted submission. Consumed by [`complete_submit`].
#[derive(Debug, PartialEq, Eq)]
pub struct Accepted {
    text: String,
}

impl Accepted {
    pub fn text(&self) -> &str {
        &self.text
    }
}

/// What [`complete_submit`] did with the classification outcome
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    ShowListings,
    ShowChat,
    Failed,
}

/// Accept `text` for classification.
///
/// Marks the session busy and appends the user message. Only the first
/// message sent from the home view is flagged as the initial query.
pub fn begin_submit(state: &mut SessionState, text: &str) -> Result<Accepted, Rejected> {
    if text.trim().is_empty() {
        return Err(Rejected::EmptyInput);
    }
    if state.is_busy {
        return Err(Rejected::Busy);
    }
    if !state.current_view.accepts_input() {
        return Err(Rejected::NoInputSurface(state.current_view));
    }

    state.is_busy = true;
    let is_initial_query = state.current_view == View::Home && !state.has_initial_query();
    state.history.push(Message::user(text, is_initial_query));
    state.last_failure = None;

    debug!(
        target: "roost.controller",
        view = %state.current_view,
        is_initial_query,
        "Accepted submission"
    );
    Ok(Accepted {
        text: text.to_string(),
    })
}

/// Re-arm the last failed submission without appending another user message.
pub fn begin_retry(state: &mut SessionState) -> Result<Accepted, Rejected> {
    if state.is_busy {
        return Err(Rejected::Busy);
    }
    let failure = state.last_failure.take().ok_or(Rejected::NothingToRetry)?;

    state.is_busy = true;
    debug!(target: "roost.controller", text = %failure.text, "Retrying submission");
    Ok(Accepted { text: failure.text })
}

/// Apply a classification outcome and clear the busy flag.
pub fn complete_submit(
    state: &mut SessionState,
    accepted: Accepted,
    outcome: Result<Intent, ClassifyError>,
) -> Resolution {
    let resolution = match outcome {
        Ok(Intent::Search { query }) => {
            state.current_view = View::Listings;
            state.search_query = query;
            Resolution::ShowListings
        }
        Ok(Intent::Chat { reply }) => {
            state.current_view = View::Chat;
            state.history.push(Message::bot(reply));
            Resolution::ShowChat
        }
        Err(err) => {
            warn!(target: "roost.controller", "Classification failed: {}", err);
            state.last_failure = Some(Failure {
                text: accepted.text,
                reason: err.to_string(),
            });
            Resolution::Failed
        }
    };
    state.is_busy = false;

    info!(
        target: "roost.controller",
        ?resolution,
        view = %state.current_view,
        "Submission resolved"
    );
    resolution
}

/// Drives classification for accepted submissions, bounded by a timeout.
#[derive(Clone)]
pub struct Controller {
    classifier: Arc<dyn Classifier>,
    timeout: Duration,
}

impl std::fmt::Debug for Controller {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Controller")
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}

impl Controller {
    pub fn new(classifier: Arc<dyn Classifier>, timeout: Duration) -> Self {
        Self {
            classifier,
            timeout,
        }
    }

    /// Controller backed by [`SimulatedClassifier`] configured from preferences
    pub fn simulated(prefs: &ClassifierPreferences) -> Self {
        Self::new(
            Arc::new(SimulatedClassifier::from_preferences(prefs)),
            Duration::from_millis(prefs.timeout_ms),
        )
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Classify `text`, turning an expired deadline into [`ClassifyError::Timeout`].
    pub async fn classify(&self, text: &str) -> Result<Intent, ClassifyError> {
        match tokio::time::timeout(self.timeout, self.classifier.classify(text)).await {
            Ok(outcome) => outcome,
            Err(_) => Err(ClassifyError::Timeout {
                after: self.timeout,
            }),
        }
    }

    /// Submit `text` and wait for the outcome.
    ///
    /// `on_frame` is called with the pending state right after acceptance and
    /// with the final state after resolution.
    pub async fn submit<F>(
        &self,
        state: &mut SessionState,
        text: &str,
        mut on_frame: F,
    ) -> Result<Resolution, Rejected>
    where
        F: FnMut(&SessionState),
    {
        let accepted = begin_submit(state, text)?;
        on_frame(state);
        let outcome = self.classify(accepted.text()).await;
        let resolution = complete_submit(state, accepted, outcome);
        on_frame(state);
        Ok(resolution)
    }

    /// Re-run the last failed classification.
    pub async fn retry<F>(
        &self,
        state: &mut SessionState,
        mut on_frame: F,
    ) -> Result<Resolution, Rejected>
    where
        F: FnMut(&SessionState),
    {
        let accepted = begin_retry(state)?;
        on_frame(state);
        let outcome = self.classify(accepted.text()).await;
        let resolution = complete_submit(state, accepted, outcome);
        on_frame(state);
        Ok(resolution)
    }
}
