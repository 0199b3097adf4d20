//! Termux Bridge CLI - submit commands to the bridge daemon

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use serde::{Deserialize, Serialize};
use serde_json::json;

const DEFAULT_RPC_URL: &str = "http://127.0.0.1:9630";
const TERMUX_HOME: &str = "/data/data/com.termux/files/home";
const TERMUX_FDROID_URL: &str = "https://f-droid.org/en/packages/com.termux/";

#[derive(Parser)]
#[command(name = "termux-bridge")]
#[command(about = "Run commands inside Termux through the bridge daemon", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// RPC server URL
    #[arg(long, env = "TERMUX_BRIDGE_RPC_URL", default_value = DEFAULT_RPC_URL)]
    rpc_url: String,
}

#[derive(Subcommand)]
enum Commands {
    /// Submit a command to Termux
    Run {
        /// Absolute path of the executable inside Termux
        path: String,

        /// Arguments passed to the executable, in order
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        args: Vec<String>,

        /// Working directory for the command
        #[arg(short, long, default_value = TERMUX_HOME)]
        workdir: String,

        /// Run detached instead of in a new terminal session
        #[arg(short, long)]
        background: bool,
    },

    /// Show whether Termux is installed
    Status,
}

#[derive(Serialize)]
struct JsonRpcRequest {
    jsonrpc: String,
    method: String,
    params: serde_json::Value,
    id: u64,
}

#[derive(Deserialize)]
struct JsonRpcResponse {
    result: Option<serde_json::Value>,
    error: Option<JsonRpcError>,
}

#[derive(Deserialize)]
struct JsonRpcError {
    code: i32,
    message: String,
    data: Option<serde_json::Value>,
}

impl JsonRpcError {
    /// Stable string code when the server provided one
    fn label(&self) -> String {
        self.data
            .as_ref()
            .and_then(|d| d.get("code"))
            .and_then(|c| c.as_str())
            .map(str::to_string)
            .unwrap_or_else(|| self.code.to_string())
    }
}

async fn call_rpc(url: &str, method: &str, params: serde_json::Value) -> Result<serde_json::Value> {
    let request = JsonRpcRequest {
        jsonrpc: "2.0".to_string(),
        method: method.to_string(),
        params,
        id: 1,
    };

    let client = reqwest::Client::new();
    let response: JsonRpcResponse = client
        .post(url)
        .json(&request)
        .send()
        .await
        .context("Failed to connect to daemon")?
        .json()
        .await
        .context("Failed to parse response")?;

    if let Some(error) = response.error {
        anyhow::bail!("RPC error ({}): {}", error.label(), error.message);
    }

    response
        .result
        .ok_or_else(|| anyhow::anyhow!("No result in response"))
}

#[tokio::main]
async fn main() -> Result<()> {
    run(Cli::parse()).await
}

async fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Run {
            path,
            args,
            workdir,
            background,
        } => {
            let params = json!({
                "path": path,
                "arguments": args,
                "workdir": workdir,
                "background": background,
            });

            call_rpc(&cli.rpc_url, "termux.run_command.v1", params).await?;

            let mode = if background { "background" } else { "new session" };
            println!("{}", "✓ Command submitted to Termux".green().bold());
            println!("  {} {}", "Path:".bold(), path);
            println!("  {} {}", "Mode:".bold(), mode);
        }

        Commands::Status => {
            println!("{}", "Termux Status".cyan().bold());
            println!();

            match call_rpc(&cli.rpc_url, "termux.status.v1", json!({})).await {
                Ok(status) => {
                    println!("  {} {}", "RPC URL:".bold(), cli.rpc_url);
                    println!("  {} {}", "Package:".bold(), status["package"].as_str().unwrap_or("?"));
                    if status["installed"].as_bool().unwrap_or(false) {
                        println!("  {} {}", "Installed:".bold(), "YES".green());
                    } else {
                        println!("  {} {}", "Installed:".bold(), "NO".red());
                        println!("  Install Termux from {}", TERMUX_FDROID_URL);
                    }
                }
                Err(e) => {
                    println!("  {} {}", "Status:".bold(), "ERROR".red());
                    println!("  {} {}", "Error:".bold(), e);
                    return Err(e);
                }
            }
        }
    }

    Ok(())
}
