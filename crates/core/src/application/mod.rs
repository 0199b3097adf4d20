// Application Layer - Use Cases

pub mod dispatch;

// Re-exports
pub use dispatch::{CompletionHandle, DispatchBridge, DispatchOutcome};
