// Host probe port
// reason: async-trait, adapters shell out to the package manager
use async_trait::async_trait;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProbeError {
    #[error("Probe failed to start: {0}")]
    Spawn(String),

    #[error("Probe timed out after {0}ms")]
    Timeout(u64),

    #[error("Probe IO error: {0}")]
    Io(String),
}

/// Read-only check for the external host's presence.
///
/// Never launches or otherwise touches the host.
#[async_trait]
pub trait HostProbe: Send + Sync {
    /// Whether `package` is installed on this device
    ///
    /// # Example
    /// ```text
    /// if !probe.is_installed("com.termux").await? {
    ///     println!("install Termux from F-Droid first");
    /// }
    /// ```
    async fn is_installed(&self, package: &str) -> Result<bool, ProbeError>;
}

// ============================================================================
// Mock Implementations for Testing
// ============================================================================

pub mod mocks {
    use super::*;
    use std::sync::{Arc, Mutex};

    /// Mock HostProbe for testing
    #[derive(Clone)]
    pub struct MockHostProbe {
        installed: Arc<Mutex<Result<bool, ProbeError>>>,
    }
    impl MockHostProbe {
        pub fn new(installed: bool) -> Self {
            Self {
                installed: Arc::new(Mutex::new(Ok(installed))),
            }
        }
        pub fn new_failing(err: ProbeError) -> Self {
            Self {
                installed: Arc::new(Mutex::new(Err(err))),
            }
        }
        pub fn set_installed(&self, installed: bool) {
            *self.installed.lock().unwrap() = Ok(installed);
        }
    }
    #[async_trait]
    impl HostProbe for MockHostProbe {
        async fn is_installed(&self, _package: &str) -> Result<bool, ProbeError> {
            self.installed.lock().unwrap().clone()
        }
    }
}
