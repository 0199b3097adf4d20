// Dispatch Use Case - run-request in, single-shot completion out

mod completion;

pub use completion::{CompletionHandle, DispatchOutcome};

use completion::completion_channel;
use futures::FutureExt;
use serde_json::Value;
use std::any::Any;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use tokio::runtime::Handle;
use tracing::{error, info, info_span, Instrument};

use crate::domain::{DispatchTarget, RunCommandIntent, RunRequest};
use crate::error::{DispatchError, Rejection};
use crate::port::{IdProvider, IntentSubmitter};

/// Command Dispatch Bridge
///
/// Turns a run-request into a `RUN_COMMAND` message, hands it to the
/// [`IntentSubmitter`] and reports the submission outcome exactly once.
/// Whether the host then runs the command successfully is not observable here.
pub struct DispatchBridge {
    target: DispatchTarget,
    submitter: Arc<dyn IntentSubmitter>,
    id_provider: Arc<dyn IdProvider>,
}

impl DispatchBridge {
    /// Bridge addressed at [`DispatchTarget::TERMUX`]
    pub fn new(submitter: Arc<dyn IntentSubmitter>, id_provider: Arc<dyn IdProvider>) -> Self {
        Self {
            target: DispatchTarget::TERMUX,
            submitter,
            id_provider,
        }
    }

    pub fn target(&self) -> DispatchTarget {
        self.target
    }

    /// Start a dispatch and return its completion handle immediately.
    ///
    /// Marshalling runs inline; if an argument is not a string the handle is
    /// already rejected on return and nothing is submitted. Otherwise the
    /// submission is spawned on the current Tokio runtime.
    pub fn dispatch(
        &self,
        path: impl Into<String>,
        arguments: &[Value],
        workdir: impl Into<String>,
        background: bool,
    ) -> CompletionHandle {
        let dispatch_id = self.id_provider.generate_id();
        match RunRequest::from_raw(path, arguments, workdir, background) {
            Ok(request) => self.start(dispatch_id, request),
            Err(e) => CompletionHandle::rejected(reject(&dispatch_id, e.into())),
        }
    }

    /// Typed entry point for callers that already hold a [`RunRequest`].
    pub fn dispatch_request(&self, request: RunRequest) -> CompletionHandle {
        self.start(self.id_provider.generate_id(), request)
    }

    /// `dispatch` and wait for the outcome
    pub async fn run_command(
        &self,
        path: impl Into<String>,
        arguments: &[Value],
        workdir: impl Into<String>,
        background: bool,
    ) -> DispatchOutcome {
        self.dispatch(path, arguments, workdir, background).await
    }

    fn start(&self, dispatch_id: String, request: RunRequest) -> CompletionHandle {
        let intent = RunCommandIntent::new(self.target, request);

        let runtime = match Handle::try_current() {
            Ok(runtime) => runtime,
            Err(e) => {
                let err = DispatchError::Internal(format!("no async runtime available: {}", e));
                return CompletionHandle::rejected(reject(&dispatch_id, err));
            }
        };

        let (resolver, handle) = completion_channel();
        let submitter = self.submitter.clone();
        let span = info_span!("dispatch", dispatch_id = %dispatch_id);
        runtime.spawn(
            async move {
                let outcome = submit_guarded(submitter.as_ref(), &intent)
                    .await
                    .map_err(|err| reject(&dispatch_id, err));
                resolver.resolve(outcome);
            }
            .instrument(span),
        );

        handle
    }
}

/// Submit with panic isolation: a panicking adapter becomes an error.
async fn submit_guarded(
    submitter: &dyn IntentSubmitter,
    intent: &RunCommandIntent,
) -> Result<bool, DispatchError> {
    info!(
        path = %intent.path,
        arg_count = intent.arguments.len(),
        workdir = %intent.workdir,
        background = intent.background,
        "Submitting run command"
    );

    match AssertUnwindSafe(submitter.submit(intent))
        .catch_unwind()
        .await
    {
        Ok(Ok(())) => {
            info!("Run command submitted");
            Ok(true)
        }
        Ok(Err(e)) => Err(e.into()),
        Err(panic) => Err(DispatchError::Internal(format!(
            "submitter panicked: {}",
            panic_message(panic.as_ref())
        ))),
    }
}

fn reject(dispatch_id: &str, err: DispatchError) -> Rejection {
    error!(dispatch_id = %dispatch_id, error = %err, "Dispatch failed");
    err.into_rejection()
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "Unknown panic".to_string()
    }
}
