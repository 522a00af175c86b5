//! Intent classification.
//!
//! A [`Classifier`] maps raw user text to either a property search or a chat
//! reply. [`SimulatedClassifier`] stands in for the backend with a fixed delay.

use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;
use tracing::{debug, info};

use crate::preferences::ClassifierPreferences;

/// Outcome of a successful classification
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    /// Show listings for `query`
    Search { query: String },
    /// Stay in the conversation and show `reply`
    Chat { reply: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClassifyError {
    #[error("classification timed out after {}ms", after.as_millis())]
    Timeout { after: Duration },
    #[error("malformed classifier response: {0}")]
    Malformed(String),
    #[error("classifier unavailable: {0}")]
    Unavailable(String),
}

#[async_trait]
pub trait Classifier: Send + Sync {
    async fn classify(&self, text: &str) -> Result<Intent, ClassifyError>;
}

pub const DEFAULT_SEARCH_KEYWORD: &str = "search_properties";
pub const DEFAULT_CHAT_REPLY: &str = "Hi";
pub const DEFAULT_DELAY: Duration = Duration::from_millis(1000);

/// Classifier that answers after a fixed delay, modeling network latency.
///
/// Text containing the search keyword (case-insensitive) is a search for the
/// whole text; anything else gets the canned reply.
#[derive(Debug, Clone)]
pub struct SimulatedClassifier {
    delay: Duration,
    keyword: String,
    reply: String,
}

impl Default for SimulatedClassifier {
    fn default() -> Self {
        Self::new(DEFAULT_DELAY)
    }
}

impl SimulatedClassifier {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            keyword: DEFAULT_SEARCH_KEYWORD.to_string(),
            reply: DEFAULT_CHAT_REPLY.to_string(),
        }
    }

    pub fn from_preferences(prefs: &ClassifierPreferences) -> Self {
        Self::new(Duration::from_millis(prefs.delay_ms))
            .with_keyword(prefs.search_keyword.clone())
            .with_reply(prefs.chat_reply.clone())
    }

    pub fn with_keyword(mut self, keyword: impl Into<String>) -> Self {
        self.keyword = keyword.into();
        self
    }

    pub fn with_reply(mut self, reply: impl Into<String>) -> Self {
        self.reply = reply.into();
        self
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// The decision itself, without the simulated latency
    pub fn decide(&self, text: &str) -> Intent {
        let is_search = !self.keyword.is_empty()
            && text
                .to_lowercase()
                .contains(&self.keyword.to_lowercase());

        if is_search {
            Intent::Search {
                query: text.to_string(),
            }
        } else {
            Intent::Chat {
                reply: self.reply.clone(),
            }
        }
    }
}

#[async_trait]
impl Classifier for SimulatedClassifier {
    async fn classify(&self, text: &str) -> Result<Intent, ClassifyError> {
        info!(target: "roost.classifier", "Sending to classifier: \"{}\"", text);
        tokio::time::sleep(self.delay).await;

        let intent = self.decide(text);
        debug!(target: "roost.classifier", ?intent, "Classified input");
        Ok(intent)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keyword_match_is_case_insensitive() {
        let classifier = SimulatedClassifier::default();
        assert_eq!(
            classifier.decide("Show me SEARCH_PROPERTIES near the park"),
            Intent::Search {
                query: "Show me SEARCH_PROPERTIES near the park".to_string()
            }
        );
    }

    #[test]
    fn other_text_gets_canned_reply() {
        let classifier = SimulatedClassifier::default();
        assert_eq!(
            classifier.decide("hello"),
            Intent::Chat {
                reply: "Hi".to_string()
            }
        );
    }

    #[test]
    fn empty_keyword_never_searches() {
        let classifier = SimulatedClassifier::default().with_keyword("");
        assert!(matches!(classifier.decide("anything"), Intent::Chat { .. }));
    }

    #[test]
    fn preferences_override_keyword_and_reply() {
        let prefs = ClassifierPreferences {
            delay_ms: 5,
            timeout_ms: 100,
            search_keyword: "find".to_string(),
            chat_reply: "Hello there".to_string(),
        };
        let classifier = SimulatedClassifier::from_preferences(&prefs);
        assert_eq!(classifier.delay(), Duration::from_millis(5));
        assert!(matches!(classifier.decide("FIND a flat"), Intent::Search { .. }));
        assert_eq!(
            classifier.decide("hey"),
            Intent::Chat {
                reply: "Hello there".to_string()
            }
        );
    }

    #[tokio::test(start_paused = true)]
    async fn classify_waits_for_the_delay() {
        let classifier = SimulatedClassifier::new(Duration::from_millis(1000));
        let start = tokio::time::Instant::now();
        let intent = classifier.classify("hello").await.unwrap();
        assert!(start.elapsed() >= Duration::from_millis(1000));
        assert!(matches!(intent, Intent::Chat { .. }));
    }

    #[test]
    fn timeout_error_reports_millis() {
        let err = ClassifyError::Timeout {
            after: Duration::from_millis(5000),
        };
        assert_eq!(err.to_string(), "classification timed out after 5000ms");
    }
}
