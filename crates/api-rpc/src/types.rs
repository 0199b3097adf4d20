//! RPC Request/Response Types

use serde::{Deserialize, Serialize};

/// termux.run_command.v1 - Submit a command to the host
///
/// `arguments` stays loosely typed here; the bridge rejects non-strings.
#[derive(Debug, Deserialize)]
pub struct RunCommandRequest {
    pub path: String,
    #[serde(default)]
    pub arguments: Vec<serde_json::Value>,
    pub workdir: String,
    #[serde(default)]
    pub background: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct RunCommandResponse {
    pub submitted: bool,
}

/// termux.status.v1 - Host installation status
#[derive(Debug, Clone, Serialize)]
pub struct StatusResponse {
    pub package: String,
    pub installed: bool,
}
