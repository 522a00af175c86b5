use async_trait::async_trait;
use eyre::{Result, eyre};
use std::io::{self, BufRead, Write};
use tracing::{debug, info};

use super::Command;
use crate::error::Error;
use roost_core::preferences::ClassifierPreferences;
use roost_core::{Controller, SessionState};

/// Feeds messages through the submission handler without a terminal UI and
/// prints the resulting session.
pub struct HeadlessCommand {
    pub messages: Vec<String>,
    pub classifier: ClassifierPreferences,
}

#[async_trait]
impl Command for HeadlessCommand {
    async fn execute(&self) -> Result<()> {
        let messages = if self.messages.is_empty() {
            read_stdin_messages()?
        } else {
            self.messages.clone()
        };
        if messages.is_empty() {
            return Err(eyre!("No input provided via arguments or stdin"));
        }

        let controller = Controller::simulated(&self.classifier);
        let state = run_session(&controller, &messages).await;

        let mut stdout = io::stdout();
        writeln!(stdout, "{}", render_json(&state)?)?;
        Ok(())
    }
}

fn read_stdin_messages() -> Result<Vec<String>> {
    let stdin = io::stdin();
    let mut messages = Vec::new();
    for line in stdin.lock().lines() {
        let line = line.map_err(|e| eyre!("Failed to read from stdin: {}", e))?;
        messages.push(line);
    }
    Ok(messages)
}

/// Submit each message in order, waiting for each classification.
/// Rejected submissions (blank lines, nothing to submit from listings) are
/// skipped, as they would be in the UI.
pub async fn run_session(controller: &Controller, messages: &[String]) -> SessionState {
    info!(
        target: "roost.headless",
        count = messages.len(),
        timeout_ms = controller.timeout().as_millis() as u64,
        "Running headless session"
    );

    let mut state = SessionState::new();
    for text in messages {
        let text = text.trim();
        let result = controller
            .submit(&mut state, text, |frame| {
                debug!(
                    target: "roost.headless",
                    view = %frame.current_view(),
                    busy = frame.is_busy(),
                    messages = frame.history().len(),
                    "frame"
                );
            })
            .await;
        match result {
            Ok(resolution) => debug!(target: "roost.headless", ?resolution, "Resolved {:?}", text),
            Err(rejected) => info!(target: "roost.headless", "Skipped {:?}: {}", text, rejected),
        }
    }
    state
}

fn render_json(state: &SessionState) -> std::result::Result<String, Error> {
    Ok(serde_json::to_string_pretty(state)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use roost_core::View;

    fn instant() -> ClassifierPreferences {
        ClassifierPreferences {
            delay_ms: 0,
            ..ClassifierPreferences::default()
        }
    }

    #[tokio::test]
    async fn chat_then_search() {
        let controller = Controller::simulated(&instant());
        let messages = vec![
            "hello".to_string(),
            "another search_properties query".to_string(),
        ];

        let state = run_session(&controller, &messages).await;

        assert_eq!(state.current_view(), View::Listings);
        assert_eq!(state.search_query(), "another search_properties query");
        assert_eq!(state.history().len(), 3);
    }

    #[tokio::test]
    async fn blank_lines_and_listings_input_are_skipped() {
        let controller = Controller::simulated(&instant());
        let messages = vec![
            "   ".to_string(),
            "search_properties downtown".to_string(),
            "ignored".to_string(),
        ];

        let state = run_session(&controller, &messages).await;

        assert_eq!(state.history().len(), 1);
        assert!(state.history()[0].is_initial_query);
        assert_eq!(state.search_query(), "search_properties downtown");
    }

    #[tokio::test]
    async fn json_output_names_view_and_senders() {
        let controller = Controller::simulated(&instant());
        let state = run_session(&controller, &["hello".to_string()]).await;

        let json: serde_json::Value = serde_json::from_str(&render_json(&state).unwrap()).unwrap();
        assert_eq!(json["current_view"], "chat");
        assert_eq!(json["history"][0]["sender"], "user");
        assert_eq!(json["history"][0]["is_initial_query"], true);
        assert_eq!(json["history"][1]["sender"], "bot");
        assert_eq!(json["history"][1]["text"], "Hi");
        assert_eq!(json["last_failure"], serde_json::Value::Null);
    }
}
