// Port Layer - Interfaces for external dependencies

pub mod host_probe;
pub mod id_provider; // For deterministic testing
pub mod intent_submitter;

// Re-exports
pub use host_probe::{HostProbe, ProbeError};
pub use id_provider::IdProvider;
pub use intent_submitter::{IntentSubmitter, SubmissionError};
