use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use roost_core::controller::DEFAULT_TIMEOUT;
use roost_core::{
    ClassifyError, Classifier, Controller, Intent, Rejected, Resolution, Sender, SessionState,
    SimulatedClassifier, View,
};

fn simulated_controller() -> Controller {
    Controller::new(
        Arc::new(SimulatedClassifier::new(Duration::from_millis(1000))),
        DEFAULT_TIMEOUT,
    )
}

/// Never answers
struct StalledClassifier;

#[async_trait]
impl Classifier for StalledClassifier {
    async fn classify(&self, _text: &str) -> Result<Intent, ClassifyError> {
        std::future::pending().await
    }
}

/// Fails the first `failures` calls, then behaves like the simulated classifier
struct FlakyClassifier {
    failures: usize,
    calls: AtomicUsize,
    inner: SimulatedClassifier,
}

#[async_trait]
impl Classifier for FlakyClassifier {
    async fn classify(&self, text: &str) -> Result<Intent, ClassifyError> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst);
        if call < self.failures {
            return Err(ClassifyError::Unavailable("connection refused".to_string()));
        }
        self.inner.classify(text).await
    }
}

#[tokio::test(start_paused = true)]
async fn search_from_home_shows_listings() {
    let controller = simulated_controller();
    let mut state = SessionState::new();
    let input = "find me a 2 bedroom apartment search_properties";

    let resolution = controller.submit(&mut state, input, |_| {}).await.unwrap();

    assert_eq!(resolution, Resolution::ShowListings);
    assert_eq!(state.current_view(), View::Listings);
    assert_eq!(state.search_query(), input);
    assert!(!state.is_busy());
}

#[tokio::test(start_paused = true)]
async fn greeting_from_home_opens_chat() {
    let controller = simulated_controller();
    let mut state = SessionState::new();

    controller.submit(&mut state, "hello", |_| {}).await.unwrap();

    assert_eq!(state.current_view(), View::Chat);
    let history = state.history();
    assert_eq!(history.len(), 2);
    assert_eq!(history[0].sender, Sender::User);
    assert_eq!(history[0].text, "hello");
    assert!(history[0].is_initial_query);
    assert_eq!(history[1].sender, Sender::Bot);
    assert_eq!(history[1].text, "Hi");
}

#[tokio::test(start_paused = true)]
async fn search_from_chat_keeps_earlier_messages() {
    let controller = simulated_controller();
    let mut state = SessionState::new();

    controller.submit(&mut state, "hello", |_| {}).await.unwrap();
    let before: Vec<_> = state.history().to_vec();

    controller
        .submit(&mut state, "another search_properties query", |_| {})
        .await
        .unwrap();

    assert_eq!(state.current_view(), View::Listings);
    assert_eq!(state.search_query(), "another search_properties query");
    assert_eq!(&state.history()[..before.len()], before.as_slice());
    assert_eq!(state.history().len(), before.len() + 1);
    assert!(!state.history()[before.len()].is_initial_query);
}

#[tokio::test(start_paused = true)]
async fn pending_frame_is_busy_with_user_message() {
    let controller = simulated_controller();
    let mut state = SessionState::new();
    let mut frames = Vec::new();

    controller
        .submit(&mut state, "hello", |s| frames.push(s.clone()))
        .await
        .unwrap();

    assert_eq!(frames.len(), 2);
    let pending = &frames[0];
    assert!(pending.is_busy());
    assert_eq!(pending.current_view(), View::Home);
    assert_eq!(pending.history().len(), 1);

    let done = &frames[1];
    assert!(!done.is_busy());
    assert_eq!(done, &state);
}

#[tokio::test(start_paused = true)]
async fn rejected_submissions_render_nothing() {
    let controller = simulated_controller();
    let mut state = SessionState::new();
    let mut frames = 0;

    let result = controller.submit(&mut state, "   ", |_| frames += 1).await;

    assert_eq!(result, Err(Rejected::EmptyInput));
    assert_eq!(frames, 0);
    assert_eq!(state, SessionState::new());
}

#[tokio::test(start_paused = true)]
async fn stalled_classifier_times_out_and_unlocks() {
    let controller = Controller::new(Arc::new(StalledClassifier), Duration::from_millis(300));
    let mut state = SessionState::new();

    let resolution = controller.submit(&mut state, "hello", |_| {}).await.unwrap();

    assert_eq!(resolution, Resolution::Failed);
    assert!(!state.is_busy());
    assert_eq!(state.current_view(), View::Home);
    let failure = state.last_failure().unwrap();
    assert_eq!(failure.reason, "classification timed out after 300ms");

    // The session accepts new input again
    let accepted = roost_core::controller::begin_submit(&mut state, "again");
    assert!(accepted.is_ok());
}

#[tokio::test(start_paused = true)]
async fn retry_recovers_after_failure() {
    let classifier = FlakyClassifier {
        failures: 1,
        calls: AtomicUsize::new(0),
        inner: SimulatedClassifier::new(Duration::from_millis(10)),
    };
    let controller = Controller::new(Arc::new(classifier), DEFAULT_TIMEOUT);
    let mut state = SessionState::new();

    let first = controller
        .submit(&mut state, "cheap search_properties", |_| {})
        .await
        .unwrap();
    assert_eq!(first, Resolution::Failed);
    assert_eq!(
        state.last_failure().map(|f| f.reason.as_str()),
        Some("classifier unavailable: connection refused")
    );

    let second = controller.retry(&mut state, |_| {}).await.unwrap();
    assert_eq!(second, Resolution::ShowListings);
    assert_eq!(state.search_query(), "cheap search_properties");
    assert_eq!(state.history().len(), 1);
    assert!(state.last_failure().is_none());

    assert_eq!(
        controller.retry(&mut state, |_| {}).await,
        Err(Rejected::NothingToRetry)
    );
}

#[tokio::test(start_paused = true)]
async fn exactly_one_initial_query_over_a_session() {
    let controller = simulated_controller();
    let mut state = SessionState::new();

    for text in ["hello", "what areas?", "near the river", "ok search_properties"] {
        controller.submit(&mut state, text, |_| {}).await.unwrap();
    }

    let initial: Vec<_> = state
        .history()
        .iter()
        .enumerate()
        .filter(|(_, m)| m.is_initial_query)
        .collect();
    assert_eq!(initial.len(), 1);
    assert_eq!(initial[0].0, 0);
}

#[test]
fn session_state_serializes_for_headless_output() {
    let state = SessionState::new();
    let json = serde_json::to_value(&state).unwrap();
    assert_eq!(json["current_view"], "home");
    assert_eq!(json["is_busy"], false);
    assert!(json["history"].as_array().unwrap().is_empty());
}
