// Domain Layer - Request shaping and the outbound message

pub mod error;
pub mod intent;
pub mod request;
pub mod target;

// Re-exports
pub use error::MarshalError;
pub use intent::{extra, ExtraValue, RunCommandIntent, SessionAction};
pub use request::{marshal_arguments, RunRequest};
pub use target::DispatchTarget;
