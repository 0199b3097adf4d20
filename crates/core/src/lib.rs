// Termux Bridge Core - Dispatch Logic & Ports
// NO infrastructure dependencies (hexagonal architecture)

pub mod application;
pub mod domain;
pub mod error;
pub mod port;

pub use application::dispatch::{CompletionHandle, DispatchBridge, DispatchOutcome};
pub use error::{DispatchError, Rejection, Result, DISPATCH_ERROR};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
