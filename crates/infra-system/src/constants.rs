// Adapter constants (no magic values)
use std::time::Duration;

/// Activity manager binary, resolved through PATH
pub const DEFAULT_AM_PATH: &str = "am";

/// Package manager binary, resolved through PATH
pub const DEFAULT_PM_PATH: &str = "pm";

/// Upper bound on a single `am` invocation (10s)
pub const DEFAULT_SUBMIT_TIMEOUT: Duration = Duration::from_secs(10);

/// Upper bound on a `pm path` lookup (5s)
pub const DEFAULT_PROBE_TIMEOUT: Duration = Duration::from_secs(5);

/// Environment passed to child processes. `am` and `pm` are wrapper scripts
/// around the Android runtime and need the ANDROID_* roots to start.
pub const DEFAULT_ENV_ALLOWLIST: &[&str] = &[
    "PATH",
    "HOME",
    "TMPDIR",
    "LD_LIBRARY_PATH",
    "ANDROID_DATA",
    "ANDROID_ROOT",
    "ANDROID_ART_ROOT",
    "ANDROID_I18N_ROOT",
    "ANDROID_TZDATA_ROOT",
    "BOOTCLASSPATH",
];

pub fn default_env_allowlist() -> Vec<String> {
    DEFAULT_ENV_ALLOWLIST.iter().map(|s| s.to_string()).collect()
}
