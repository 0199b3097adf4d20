//! JSON-RPC round trips against a live server backed by mock adapters

use std::sync::Arc;

use jsonrpsee::core::client::ClientT;
use jsonrpsee::core::ClientError;
use jsonrpsee::core::params::ObjectParams;
use jsonrpsee::http_client::{HttpClient, HttpClientBuilder};
use jsonrpsee::server::ServerHandle;
use serde_json::{json, Value};

use termux_bridge_api_rpc::error::code;
use termux_bridge_api_rpc::server::{METHOD_RUN_COMMAND, METHOD_STATUS};
use termux_bridge_api_rpc::{RpcServer, RpcServerConfig};
use termux_bridge_core::port::host_probe::mocks::MockHostProbe;
use termux_bridge_core::port::id_provider::SequentialIdProvider;
use termux_bridge_core::port::intent_submitter::mocks::MockIntentSubmitter;
use termux_bridge_core::port::SubmissionError;
use termux_bridge_core::DispatchBridge;

async fn start(submitter: MockIntentSubmitter, host: MockHostProbe) -> (HttpClient, ServerHandle) {
    let bridge = DispatchBridge::new(
        Arc::new(submitter),
        Arc::new(SequentialIdProvider::default()),
    );
    let config = RpcServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
    };
    let (addr, handle) = RpcServer::new(
        config,
        Arc::new(bridge),
        Arc::new(host),
    )
    .start()
    .await
    .unwrap();

    let client = HttpClientBuilder::default()
        .build(format!("http://{}", addr))
        .unwrap();
    (client, handle)
}

fn run_params(path: &str, arguments: Value, background: bool) -> ObjectParams {
    let mut params = ObjectParams::new();
    params.insert("path", path).unwrap();
    params.insert("arguments", arguments).unwrap();
    params.insert("workdir", "/data/data/com.termux/files/home").unwrap();
    params.insert("background", background).unwrap();
    params
}

#[tokio::test]
async fn test_run_command_roundtrip() {
    let submitter = MockIntentSubmitter::new_accepting();
    let (client, handle) = start(submitter.clone(), MockHostProbe::new(true)).await;

    let resp: Value = client
        .request(
            METHOD_RUN_COMMAND,
            run_params("/usr/bin/echo", json!(["hello", "world"]), false),
        )
        .await
        .unwrap();

    assert_eq!(resp, json!({ "submitted": true }));
    assert_eq!(submitter.submitted()[0].arguments, vec!["hello", "world"]);

    handle.stop().unwrap();
}

#[tokio::test]
async fn test_non_string_argument_rejected_over_rpc() {
    let submitter = MockIntentSubmitter::new_accepting();
    let (client, handle) = start(submitter.clone(), MockHostProbe::new(true)).await;

    let err = client
        .request::<Value, _>(
            METHOD_RUN_COMMAND,
            run_params("/usr/bin/echo", json!(["ok", {"nested": true}]), false),
        )
        .await
        .unwrap_err();

    match err {
        ClientError::Call(call) => {
            assert_eq!(call.code(), code::DISPATCH_ERROR);
            let data: Value = serde_json::from_str(call.data().unwrap().get()).unwrap();
            assert_eq!(data["code"], "DISPATCH_ERROR");
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert_eq!(submitter.call_count(), 0);

    handle.stop().unwrap();
}

#[tokio::test]
async fn test_submission_failure_over_rpc() {
    let submitter =
        MockIntentSubmitter::new_refusing(SubmissionError::HostNotFound("com.termux".to_string()));
    let (client, handle) = start(submitter, MockHostProbe::new(false)).await;

    let err = client
        .request::<Value, _>(METHOD_RUN_COMMAND, run_params("/bin/ls", json!([]), true))
        .await
        .unwrap_err();

    assert!(matches!(err, ClientError::Call(ref call) if call.code() == code::DISPATCH_ERROR));

    handle.stop().unwrap();
}

#[tokio::test]
async fn test_status_roundtrip() {
    let (client, handle) = start(MockIntentSubmitter::new_accepting(), MockHostProbe::new(true)).await;

    let resp: Value = client
        .request(METHOD_STATUS, ObjectParams::new())
        .await
        .unwrap();
    assert_eq!(resp, json!({ "package": "com.termux", "installed": true }));

    handle.stop().unwrap();
}

#[tokio::test]
async fn test_status_follows_installation_changes() {
    let host = MockHostProbe::new(false);
    let (client, handle) = start(MockIntentSubmitter::new_accepting(), host.clone()).await;

    let before: Value = client
        .request(METHOD_STATUS, ObjectParams::new())
        .await
        .unwrap();
    assert_eq!(before["installed"], false);

    host.set_installed(true);
    let after: Value = client
        .request(METHOD_STATUS, ObjectParams::new())
        .await
        .unwrap();
    assert_eq!(after["installed"], true);

    handle.stop().unwrap();
}
