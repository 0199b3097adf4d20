//! RPC Method Handlers

use crate::error::{probe_to_rpc_error, rejection_to_rpc_error};
use crate::types::{RunCommandRequest, RunCommandResponse, StatusResponse};
use jsonrpsee::types::ErrorObjectOwned;
use std::sync::Arc;
use termux_bridge_core::port::HostProbe;
use termux_bridge_core::DispatchBridge;

/// RPC Handler with injected dependencies
pub struct RpcHandler {
    bridge: Arc<DispatchBridge>,
    probe: Arc<dyn HostProbe>,
}

impl RpcHandler {
    pub fn new(bridge: Arc<DispatchBridge>, probe: Arc<dyn HostProbe>) -> Self {
        Self { bridge, probe }
    }

    /// termux.run_command.v1
    pub async fn run_command(
        &self,
        params: RunCommandRequest,
    ) -> Result<RunCommandResponse, ErrorObjectOwned> {
        let submitted = self
            .bridge
            .dispatch(
                params.path,
                &params.arguments,
                params.workdir,
                params.background,
            )
            .await
            .map_err(rejection_to_rpc_error)?;

        Ok(RunCommandResponse { submitted })
    }

    /// termux.status.v1
    pub async fn status(&self) -> Result<StatusResponse, ErrorObjectOwned> {
        let package = self.bridge.target().package;
        let installed = self
            .probe
            .is_installed(package)
            .await
            .map_err(probe_to_rpc_error)?;

        Ok(StatusResponse {
            package: package.to_string(),
            installed,
        })
    }
}
