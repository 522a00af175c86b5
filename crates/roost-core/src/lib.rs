pub mod classifier;
pub mod controller;
pub mod error;
pub mod preferences;
pub mod session;

pub use classifier::{ClassifyError, Classifier, Intent, SimulatedClassifier};
pub use controller::{Accepted, Controller, Rejected, Resolution};
pub use error::{Error, Result};
pub use session::{Failure, Message, Sender, SessionState, View};
