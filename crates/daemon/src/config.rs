//! Daemon configuration, read once from the environment at startup.

use anyhow::{Context, Result};
use std::time::Duration;

use termux_bridge_api_rpc::RpcServerConfig;
use termux_bridge_infra_system::constants::{
    DEFAULT_AM_PATH, DEFAULT_PM_PATH, DEFAULT_PROBE_TIMEOUT, DEFAULT_SUBMIT_TIMEOUT,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Pretty,
    Json,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DaemonConfig {
    pub rpc_host: String,
    pub rpc_port: u16,
    pub am_path: String,
    pub pm_path: String,
    /// Android user passed to `am --user`; omitted when unset
    pub user: Option<u32>,
    pub submit_timeout: Duration,
    pub probe_timeout: Duration,
    pub log_format: LogFormat,
}

impl DaemonConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup (environment in production).
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let rpc_defaults = RpcServerConfig::default();
        let rpc_port = parse_or(&lookup, "TERMUX_BRIDGE_RPC_PORT", rpc_defaults.port)?;
        let submit_timeout =
            parse_millis_or(&lookup, "TERMUX_BRIDGE_SUBMIT_TIMEOUT_MS", DEFAULT_SUBMIT_TIMEOUT)?;
        let probe_timeout =
            parse_millis_or(&lookup, "TERMUX_BRIDGE_PROBE_TIMEOUT_MS", DEFAULT_PROBE_TIMEOUT)?;
        let user = match lookup("TERMUX_BRIDGE_USER") {
            Some(raw) => Some(
                raw.parse::<u32>()
                    .with_context(|| format!("TERMUX_BRIDGE_USER is not a user id: {:?}", raw))?,
            ),
            None => None,
        };

        let log_format = match lookup("TERMUX_BRIDGE_LOG_FORMAT").as_deref() {
            Some("json") => LogFormat::Json,
            _ => LogFormat::Pretty,
        };

        Ok(Self {
            rpc_host: lookup("TERMUX_BRIDGE_RPC_HOST").unwrap_or(rpc_defaults.host),
            rpc_port,
            am_path: expand_path(lookup("TERMUX_BRIDGE_AM_PATH"), DEFAULT_AM_PATH),
            pm_path: expand_path(lookup("TERMUX_BRIDGE_PM_PATH"), DEFAULT_PM_PATH),
            user,
            submit_timeout,
            probe_timeout,
            log_format,
        })
    }
}

fn parse_or<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match lookup(key) {
        Some(raw) => raw
            .parse()
            .with_context(|| format!("{} has an invalid value: {:?}", key, raw)),
        None => Ok(default),
    }
}

fn parse_millis_or(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
    default: Duration,
) -> Result<Duration> {
    parse_or(lookup, key, default.as_millis() as u64).map(Duration::from_millis)
}

fn expand_path(raw: Option<String>, default: &str) -> String {
    match raw {
        Some(path) => shellexpand::tilde(&path).into_owned(),
        None => default.to_string(),
    }
}
