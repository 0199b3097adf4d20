// Package manager probe
use async_trait::async_trait;
use std::process::Stdio;
use std::time::Duration;
use tokio::process::Command;
use tokio::time::timeout;
use tracing::debug;

use termux_bridge_core::port::host_probe::{HostProbe, ProbeError};

use crate::constants::{DEFAULT_PM_PATH, DEFAULT_PROBE_TIMEOUT};

/// Checks host installation with `pm path <package>`.
pub struct PackageManagerProbe {
    pm_path: String,
    timeout: Duration,
}

impl Default for PackageManagerProbe {
    fn default() -> Self {
        Self::new(DEFAULT_PM_PATH)
    }
}

impl PackageManagerProbe {
    pub fn new(pm_path: impl Into<String>) -> Self {
        Self {
            pm_path: pm_path.into(),
            timeout: DEFAULT_PROBE_TIMEOUT,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

#[async_trait]
impl HostProbe for PackageManagerProbe {
    async fn is_installed(&self, package: &str) -> Result<bool, ProbeError> {
        let child = Command::new(&self.pm_path)
            .args(["path", package])
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| ProbeError::Spawn(format!("{}: {}", self.pm_path, e)))?;

        let output = match timeout(self.timeout, child.wait_with_output()).await {
            Ok(Ok(output)) => output,
            Ok(Err(e)) => return Err(ProbeError::Io(e.to_string())),
            Err(_) => return Err(ProbeError::Timeout(self.timeout.as_millis() as u64)),
        };

        let installed =
            parse_pm_path_output(output.status.success(), &String::from_utf8_lossy(&output.stdout));
        debug!(package = %package, installed, "Host probe finished");
        Ok(installed)
    }
}

/// Installed packages print one `package:/data/app/...apk` line per split.
fn parse_pm_path_output(success: bool, stdout: &str) -> bool {
    success && stdout.lines().any(|l| l.trim_start().starts_with("package:"))
}
