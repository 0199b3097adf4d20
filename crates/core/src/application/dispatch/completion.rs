// Single-shot completion handle
use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};

use tokio::sync::oneshot;

use crate::error::Rejection;

/// `Ok(true)` once the host accepted the message, `Err` otherwise.
pub type DispatchOutcome = std::result::Result<bool, Rejection>;

/// Create a linked resolver/handle pair.
pub(crate) fn completion_channel() -> (Resolver, CompletionHandle) {
    let (tx, rx) = oneshot::channel();
    (Resolver { tx: Some(tx) }, CompletionHandle { rx })
}

/// Write side of a [`CompletionHandle`].
///
/// `resolve` consumes the resolver, so a second resolution does not type-check.
/// Dropping an unresolved resolver (early return, panic unwinding through the
/// owning task) rejects the handle instead of leaving it pending.
pub(crate) struct Resolver {
    tx: Option<oneshot::Sender<DispatchOutcome>>,
}

impl Resolver {
    pub(crate) fn resolve(mut self, outcome: DispatchOutcome) {
        self.send(outcome);
    }

    fn send(&mut self, outcome: DispatchOutcome) {
        if let Some(tx) = self.tx.take() {
            // Caller may have dropped the handle; nothing to report to then.
            let _ = tx.send(outcome);
        }
    }
}

impl Drop for Resolver {
    fn drop(&mut self) {
        self.send(Err(Rejection::dispatch(
            "dispatch aborted before completion",
        )));
    }
}

/// Future returned by `DispatchBridge::dispatch`.
///
/// Transitions once from pending to resolved or rejected. Dropping it does not
/// cancel a submission already handed to the runtime.
#[derive(Debug)]
pub struct CompletionHandle {
    rx: oneshot::Receiver<DispatchOutcome>,
}

impl CompletionHandle {
    /// Handle that is already rejected.
    pub(crate) fn rejected(rejection: Rejection) -> Self {
        let (resolver, handle) = completion_channel();
        resolver.resolve(Err(rejection));
        handle
    }
}

impl Future for CompletionHandle {
    type Output = DispatchOutcome;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        Pin::new(&mut self.rx).poll(cx).map(|received| {
            received.unwrap_or_else(|_| {
                Err(Rejection::dispatch("completion dropped without resolution"))
            })
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DISPATCH_ERROR;

    #[tokio::test]
    async fn test_resolve_success() {
        let (resolver, handle) = completion_channel();
        resolver.resolve(Ok(true));
        assert_eq!(handle.await, Ok(true));
    }

    #[tokio::test]
    async fn test_dropped_resolver_rejects() {
        let (resolver, handle) = completion_channel();
        drop(resolver);

        let rejection = handle.await.unwrap_err();
        assert_eq!(rejection.code, DISPATCH_ERROR);
        assert!(rejection.message.contains("aborted"));
    }

    #[tokio::test]
    async fn test_resolve_then_drop_keeps_first_outcome() {
        let (resolver, handle) = completion_channel();
        // resolve() consumes; the Drop that follows must not overwrite
        resolver.resolve(Err(Rejection::dispatch("refused")));

        let rejection = handle.await.unwrap_err();
        assert_eq!(rejection.message, "refused");
    }

    #[test]
    fn test_resolve_after_handle_dropped_is_silent() {
        let (resolver, handle) = completion_channel();
        drop(handle);
        resolver.resolve(Ok(true));
    }
}
