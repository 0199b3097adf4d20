// Central Error Type for the Dispatch Bridge

use serde::Serialize;
use thiserror::Error;

/// Stable error code carried by every rejection.
pub const DISPATCH_ERROR: &str = "DISPATCH_ERROR";

/// Anything that can go wrong between accepting a request and handing it off
#[derive(Error, Debug)]
pub enum DispatchError {
    #[error("Marshal error: {0}")]
    Marshal(#[from] crate::domain::MarshalError),

    #[error("Submission error: {0}")]
    Submission(#[from] crate::port::SubmissionError),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl DispatchError {
    /// Error code exposed to callers. All variants share one code.
    pub fn code(&self) -> &'static str {
        DISPATCH_ERROR
    }

    pub fn into_rejection(self) -> Rejection {
        Rejection {
            code: self.code().to_string(),
            message: self.to_string(),
        }
    }
}

/// Caller-visible failure: a stable code plus a human-readable message.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize)]
#[error("{code}: {message}")]
pub struct Rejection {
    pub code: String,
    pub message: String,
}

impl Rejection {
    pub fn dispatch(message: impl Into<String>) -> Self {
        Self {
            code: DISPATCH_ERROR.to_string(),
            message: message.into(),
        }
    }
}

/// Result type alias using DispatchError
pub type Result<T> = std::result::Result<T, DispatchError>;
