// Activity manager submitter
// reason: tokio::process for a bounded, non-blocking `am startservice` call
use async_trait::async_trait;
use std::collections::HashMap;
use std::process::Stdio;
use std::time::Duration;
use tokio::process::Command;
use tokio::time::timeout;
use tracing::{debug, info, warn};

use termux_bridge_core::domain::{ExtraValue, RunCommandIntent};
use termux_bridge_core::port::intent_submitter::{IntentSubmitter, SubmissionError};

use crate::constants::{default_env_allowlist, DEFAULT_AM_PATH, DEFAULT_SUBMIT_TIMEOUT};

/// Submits `RUN_COMMAND` intents through `am startservice`.
///
/// Arguments are handed to the child directly (no shell), so empty strings and
/// shell metacharacters reach the host untouched.
pub struct AmIntentSubmitter {
    am_path: String,
    user: Option<u32>,
    timeout: Duration,
    env_allowlist: Vec<String>,
}

impl Default for AmIntentSubmitter {
    fn default() -> Self {
        Self::new(DEFAULT_AM_PATH, default_env_allowlist())
    }
}

impl AmIntentSubmitter {
    /// Create a new submitter
    ///
    /// # Arguments
    /// * `am_path` - activity manager binary (`am` on PATH by default)
    /// * `env_allowlist` - environment variables the child may inherit
    ///
    /// # Example
    /// ```ignore
    /// let submitter = AmIntentSubmitter::new("am", default_env_allowlist())
    ///     .with_user(0)
    ///     .with_timeout(Duration::from_secs(5));
    /// ```
    pub fn new(am_path: impl Into<String>, env_allowlist: Vec<String>) -> Self {
        Self {
            am_path: am_path.into(),
            user: None,
            timeout: DEFAULT_SUBMIT_TIMEOUT,
            env_allowlist,
        }
    }

    /// Target a specific Android user (`--user <id>`)
    pub fn with_user(mut self, user: u32) -> Self {
        self.user = Some(user);
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Filter the daemon's environment down to the allowlist
    fn filter_env(&self, env: impl Iterator<Item = (String, String)>) -> HashMap<String, String> {
        env.filter(|(k, _)| self.env_allowlist.contains(k)).collect()
    }

    /// Command line for `am`, excluding the binary itself.
    ///
    /// # Errors
    /// - SubmissionError::Unencodable if the argument array would not reach
    ///   the host unchanged
    pub fn build_args(&self, intent: &RunCommandIntent) -> Result<Vec<String>, SubmissionError> {
        let mut args = vec!["startservice".to_string()];

        if let Some(user) = self.user {
            args.push("--user".to_string());
            args.push(user.to_string());
        }

        args.push("-n".to_string());
        args.push(intent.target.component());
        args.push("-a".to_string());
        args.push(intent.target.action.to_string());

        for (key, value) in intent.extras() {
            match value {
                ExtraValue::Str(s) => {
                    args.extend(["--es".to_string(), key.to_string(), s]);
                }
                // `am` cannot express an empty string array; the host reads a
                // missing extra as no arguments.
                ExtraValue::StrArray(items) if items.is_empty() => {}
                ExtraValue::StrArray(items) => {
                    args.extend(["--esa".to_string(), key.to_string(), encode_string_array(&items)?]);
                }
                ExtraValue::Bool(b) => {
                    args.extend(["--ez".to_string(), key.to_string(), b.to_string()]);
                }
            }
        }

        Ok(args)
    }

    async fn run_am(&self, args: &[String]) -> Result<std::process::Output, SubmissionError> {
        let child = Command::new(&self.am_path)
            .args(args)
            .env_clear()
            .envs(self.filter_env(std::env::vars()))
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| SubmissionError::Spawn(format!("{}: {}", self.am_path, e)))?;

        match timeout(self.timeout, child.wait_with_output()).await {
            Ok(Ok(output)) => Ok(output),
            Ok(Err(e)) => Err(SubmissionError::Io(e.to_string())),
            Err(_) => Err(SubmissionError::Timeout(self.timeout.as_millis() as u64)),
        }
    }
}

#[async_trait]
impl IntentSubmitter for AmIntentSubmitter {
    async fn submit(&self, intent: &RunCommandIntent) -> Result<(), SubmissionError> {
        let args = self.build_args(intent)?;
        debug!(am = %self.am_path, args = ?args, "Invoking activity manager");

        let output = self.run_am(&args).await?;
        let stdout = String::from_utf8_lossy(&output.stdout);
        let stderr = String::from_utf8_lossy(&output.stderr);

        let result = classify_am_output(output.status.code(), &stdout, &stderr);
        match &result {
            Ok(()) => info!(
                component = %intent.target.component(),
                "Activity manager accepted intent"
            ),
            Err(e) => warn!(error = %e, "Activity manager refused intent"),
        }
        result
    }
}

/// `--esa` value: the items joined with `,`.
///
/// `am` splits the value on commas not preceded by a backslash, keeps the
/// backslash, and drops trailing empty items. Arrays that would not decode
/// back to themselves are refused instead of being delivered altered.
fn encode_string_array(items: &[String]) -> Result<String, SubmissionError> {
    let encoded = items.join(",");
    let decoded = decode_string_array(&encoded);
    if decoded == items {
        return Ok(encoded);
    }

    let index = items
        .iter()
        .zip(decoded.iter().map(Some).chain(std::iter::repeat(None)))
        .position(|(item, got)| got != Some(item))
        .unwrap_or(items.len().saturating_sub(1));
    Err(SubmissionError::Unencodable {
        index,
        reason: unencodable_reason(items, index),
    })
}

/// What `am` hands the host for an `--esa` value.
fn decode_string_array(value: &str) -> Vec<String> {
    let mut parts = Vec::new();
    let mut current = String::new();
    let mut prev = None;
    for c in value.chars() {
        if c == ',' && prev != Some('\\') {
            parts.push(std::mem::take(&mut current));
        } else {
            current.push(c);
        }
        prev = Some(c);
    }

    // No separator at all: the whole value, even when empty
    if parts.is_empty() {
        return vec![current];
    }
    parts.push(current);
    while parts.last().is_some_and(|p| p.is_empty()) {
        parts.pop();
    }
    parts
}

fn unencodable_reason(items: &[String], index: usize) -> String {
    let item = &items[index];
    if item.contains(',') {
        "contains a comma".to_string()
    } else if index > 0 && items[index - 1].ends_with('\\') {
        format!("previous argument {} ends with a backslash", index - 1)
    } else if item.ends_with('\\') && index + 1 < items.len() {
        "ends with a backslash before the next argument".to_string()
    } else if items[index..].iter().all(|i| i.is_empty()) {
        "trailing empty arguments are dropped by the activity manager".to_string()
    } else {
        "does not survive activity manager decoding".to_string()
    }
}

/// Map `am` exit status and output to a submission result.
///
/// Older `am` builds exit 0 even when the service could not be started, so
/// `Error:` lines and exception traces are checked regardless of status.
pub fn classify_am_output(
    exit_code: Option<i32>,
    stdout: &str,
    stderr: &str,
) -> Result<(), SubmissionError> {
    let failure = stdout
        .lines()
        .chain(stderr.lines())
        .map(str::trim)
        .find(|line| line.starts_with("Error") || line.contains("Exception"));

    if let Some(line) = failure {
        let line = line.to_string();
        if line.contains("Permission Denial")
            || line.contains("SecurityException")
            || line.contains("Requires permission")
            || line.contains("Not allowed")
        {
            return Err(SubmissionError::PermissionDenied(line));
        }
        if line.contains("Not found") || line.contains("no service started") {
            return Err(SubmissionError::HostNotFound(line));
        }
        return Err(SubmissionError::Rejected {
            exit_code,
            output: line,
        });
    }

    if exit_code != Some(0) {
        let output = if stderr.trim().is_empty() {
            stdout.trim().to_string()
        } else {
            stderr.trim().to_string()
        };
        return Err(SubmissionError::Rejected { exit_code, output });
    }

    Ok(())
}
