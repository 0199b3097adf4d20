// Intent Submitter Port
// Abstraction over the operating environment's process-communication facility

use crate::domain::RunCommandIntent;
use async_trait::async_trait;
use thiserror::Error;

/// Submission errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SubmissionError {
    #[error("Host not found: {0}")]
    HostNotFound(String),

    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    #[error("Spawn failed: {0}")]
    Spawn(String),

    #[error("Submission rejected (exit code {exit_code:?}): {output}")]
    Rejected {
        exit_code: Option<i32>,
        output: String,
    },

    #[error("Argument {index} cannot be delivered unchanged: {reason}")]
    Unencodable { index: usize, reason: String },

    #[error("Submission timed out after {0}ms")]
    Timeout(u64),

    #[error("IO error: {0}")]
    Io(String),
}

/// Intent Submitter trait
///
/// Implementations:
/// - AmIntentSubmitter: shells out to the Android activity manager
/// - mocks::MockIntentSubmitter: records intents for tests
#[async_trait]
pub trait IntentSubmitter: Send + Sync {
    /// Hand `intent` to the environment for asynchronous delivery.
    ///
    /// Returns once the environment accepted (or refused) the message, not
    /// when the host finished running the command.
    async fn submit(&self, intent: &RunCommandIntent) -> Result<(), SubmissionError>;
}

// ============================================================================
// Mock Implementations for Testing
// ============================================================================

pub mod mocks {
    use super::*;
    use std::sync::{Arc, Mutex};

    /// Mock submitter behavior
    #[derive(Debug, Clone)]
    pub enum MockBehavior {
        /// Always accept
        Accept,
        /// Always refuse with the given error
        Refuse(SubmissionError),
        /// Panic with message (for panic isolation testing)
        Panic(String),
    }

    /// Mock Intent Submitter for testing
    #[derive(Clone)]
    pub struct MockIntentSubmitter {
        behavior: Arc<Mutex<MockBehavior>>,
        submitted: Arc<Mutex<Vec<RunCommandIntent>>>,
    }

    impl MockIntentSubmitter {
        pub fn new(behavior: MockBehavior) -> Self {
            Self {
                behavior: Arc::new(Mutex::new(behavior)),
                submitted: Arc::new(Mutex::new(Vec::new())),
            }
        }
        pub fn new_accepting() -> Self {
            Self::new(MockBehavior::Accept)
        }
        pub fn new_refusing(error: SubmissionError) -> Self {
            Self::new(MockBehavior::Refuse(error))
        }
        pub fn new_panic_inducing(message: impl Into<String>) -> Self {
            Self::new(MockBehavior::Panic(message.into()))
        }
        pub fn set_behavior(&self, behavior: MockBehavior) {
            *self.behavior.lock().unwrap() = behavior;
        }
        /// Every intent that reached `submit`, in call order.
        pub fn submitted(&self) -> Vec<RunCommandIntent> {
            self.submitted.lock().unwrap().clone()
        }
        pub fn call_count(&self) -> usize {
            self.submitted.lock().unwrap().len()
        }
    }

    #[async_trait]
    impl IntentSubmitter for MockIntentSubmitter {
        async fn submit(&self, intent: &RunCommandIntent) -> Result<(), SubmissionError> {
            self.submitted.lock().unwrap().push(intent.clone());

            let behavior = self.behavior.lock().unwrap().clone();

            match behavior {
                MockBehavior::Accept => Ok(()),
                MockBehavior::Refuse(err) => Err(err),
                MockBehavior::Panic(msg) => {
                    panic!("{}", msg);
                }
            }
        }
    }
}
