// Domain Error Types

use thiserror::Error;

/// Raised while turning caller-supplied arguments into plain strings.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MarshalError {
    #[error("Argument at index {index} is not a string (found {found})")]
    NotAString { index: usize, found: &'static str },
}

pub type Result<T> = std::result::Result<T, MarshalError>;
