//! Dispatch scenarios across core and the system adapters
//!
//! Covers the four reference scenarios plus the `am` adapter end to end
//! with stand-in binaries.

use std::sync::Arc;

use serde_json::json;
use termux_bridge_core::domain::{extra, SessionAction};
use termux_bridge_core::port::id_provider::SequentialIdProvider;
use termux_bridge_core::port::intent_submitter::mocks::{MockBehavior, MockIntentSubmitter};
use termux_bridge_core::port::{IntentSubmitter, SubmissionError};
use termux_bridge_core::{DispatchBridge, DISPATCH_ERROR};
use termux_bridge_infra_system::AmIntentSubmitter;

fn bridge(submitter: Arc<dyn IntentSubmitter>) -> DispatchBridge {
    DispatchBridge::new(submitter, Arc::new(SequentialIdProvider::default()))
}

/// Scenario 1: foreground echo
#[tokio::test]
async fn test_scenario_echo_foreground() {
    let submitter = MockIntentSubmitter::new_accepting();
    let bridge = bridge(Arc::new(submitter.clone()));

    let outcome = bridge
        .dispatch(
            "/usr/bin/echo",
            &[json!("hello"), json!("world")],
            "/home/user",
            false,
        )
        .await;
    assert_eq!(outcome, Ok(true));

    let intent = &submitter.submitted()[0];
    let wire = serde_json::to_value(intent).unwrap();
    assert_eq!(wire["path"], "/usr/bin/echo");
    assert_eq!(wire["arguments"], json!(["hello", "world"]));
    assert_eq!(wire["workdir"], "/home/user");
    assert_eq!(wire["background"], false);
    assert_eq!(wire["sessionAction"], "0");
}

/// Scenario 2: background sleep resolves on submission, not on completion
#[tokio::test]
async fn test_scenario_background_resolves_on_submission() {
    let submitter = MockIntentSubmitter::new_accepting();
    let bridge = bridge(Arc::new(submitter.clone()));

    let outcome = tokio::time::timeout(
        std::time::Duration::from_secs(1),
        bridge.dispatch("/bin/sleep", &[json!("10")], "/tmp", true),
    )
    .await
    .expect("handle should resolve well before the command would finish");

    assert_eq!(outcome, Ok(true));
    assert!(submitter.submitted()[0].background);
}

/// Scenario 3: empty inputs pass through unvalidated
#[tokio::test]
async fn test_scenario_empty_inputs() {
    let submitter = MockIntentSubmitter::new_accepting();
    let bridge = bridge(Arc::new(submitter.clone()));

    assert_eq!(bridge.dispatch("", &[], "", false).await, Ok(true));

    let intent = &submitter.submitted()[0];
    assert!(intent.path.is_empty());
    assert!(intent.workdir.is_empty());
    assert!(intent.arguments.is_empty());
    assert_eq!(intent.session_action, SessionAction::NewSession);
}

/// Scenario 4: environment refuses submission
#[tokio::test]
async fn test_scenario_refused_submission() {
    let submitter = MockIntentSubmitter::new_accepting();
    submitter.set_behavior(MockBehavior::Refuse(SubmissionError::PermissionDenied(
        "Requires permission com.termux.permission.RUN_COMMAND".to_string(),
    )));
    let bridge = bridge(Arc::new(submitter.clone()));

    let rejection = bridge
        .dispatch("/usr/bin/echo", &[json!("x")], "/", false)
        .await
        .unwrap_err();

    assert_eq!(rejection.code, DISPATCH_ERROR);
    assert!(rejection.message.contains("Permission denied"));
}

#[cfg(unix)]
#[tokio::test]
async fn test_am_adapter_with_stand_in_binary() {
    let submitter = AmIntentSubmitter::new("/bin/echo", vec![]).with_user(0);
    let bridge = bridge(Arc::new(submitter));

    let outcome = bridge
        .dispatch(
            "/data/data/com.termux/files/usr/bin/ls",
            &[json!("-la"), json!(""), json!("x\\,y")],
            "/data/data/com.termux/files/home",
            true,
        )
        .await;
    assert_eq!(outcome, Ok(true));
}

#[cfg(unix)]
#[tokio::test]
async fn test_am_adapter_refusal_becomes_rejection() {
    let bridge = bridge(Arc::new(AmIntentSubmitter::new("/bin/false", vec![])));

    let rejection = bridge.dispatch("/bin/ls", &[], "/", false).await.unwrap_err();
    assert_eq!(rejection.code, DISPATCH_ERROR);
}

#[cfg(unix)]
#[tokio::test]
async fn test_am_adapter_unencodable_arguments_rejected() {
    let bridge = bridge(Arc::new(AmIntentSubmitter::new("/bin/echo", vec![])));

    for arguments in [
        vec![json!("x,y")],
        vec![json!("a"), json!("")],
        vec![json!("dir\\"), json!("b")],
    ] {
        let rejection = bridge
            .dispatch("/bin/ls", &arguments, "/", false)
            .await
            .unwrap_err();
        assert_eq!(rejection.code, DISPATCH_ERROR);
        assert!(rejection.message.contains("cannot be delivered unchanged"));
    }
}

#[test]
fn test_am_command_line_for_scenario_one() {
    let submitter = AmIntentSubmitter::default();
    let intent = termux_bridge_core::domain::RunCommandIntent::new(
        termux_bridge_core::domain::DispatchTarget::TERMUX,
        termux_bridge_core::domain::RunRequest::new(
            "/usr/bin/echo",
            vec!["hello".to_string(), "world".to_string()],
            "/home/user",
            false,
        ),
    );

    let args = submitter.build_args(&intent).unwrap();
    let at = |key: &str| args.iter().position(|a| a == key).unwrap();

    assert_eq!(args[at(extra::ARGUMENTS) + 1], "hello,world");
    assert_eq!(args[at(extra::SESSION_ACTION) + 1], "0");
    assert!(at(extra::PATH) < at(extra::ARGUMENTS));
    assert!(at(extra::WORKDIR) < at(extra::BACKGROUND));
}
