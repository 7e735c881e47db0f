//! Per-call timeout and cancellation.

use crate::error::*;
use std::future::{pending, Future};
use std::time::Duration;
use tokio::sync::watch;
use tokio::time::Instant;

/// Carries the limits a single call runs under.
///
/// A `Context` with neither a timeout nor a cancel handle lets the request run
/// until the transport gives up on its own. Dropping the future returned by a
/// client call also aborts the request; `Context` exists for the cases where the
/// caller wants the call to finish with an error instead.
#[derive(Debug, Clone, Default)]
pub struct Context {
    timeout: Option<(Duration, Instant)>,
    cancelled: Option<watch::Receiver<bool>>
}

/// Cancels every call running under the `Context` it was created with.
#[derive(Debug)]
pub struct CancelHandle {
    tx: watch::Sender<bool>
}

impl CancelHandle {
    #[inline]
    pub fn cancel(&self) {
        self.tx.send_replace(true);
    }
}

impl Context {
    #[inline]
    pub fn background() -> Self {
        Context::default()
    }

    /// Fails calls with `DeadlineExceeded` once `timeout` has elapsed, counted
    /// from now. Every call made with this context shares the same deadline.
    #[inline]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some((timeout, Instant::now() + timeout));
        self
    }

    /// Returns a context that fails calls with `Cancelled` once the returned
    /// handle is used.
    pub fn with_cancel(mut self) -> (Self, CancelHandle) {
        let (tx, rx) = watch::channel(false);
        self.cancelled = Some(rx);
        (self, CancelHandle { tx })
    }

    #[inline]
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout.map(|(timeout, _)| timeout)
    }

    #[inline]
    pub fn deadline(&self) -> Option<Instant> {
        self.timeout.map(|(_, deadline)| deadline)
    }

    #[inline]
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.as_ref().map_or(false, |rx| *rx.borrow())
    }

    /// Drives `fut` to completion unless the timeout or the cancel handle fires
    /// first, in which case `fut` is dropped.
    pub(crate) async fn run<T, F>(&self, fut: F) -> Result<T>
        where F: Future<Output = Result<T>> {

        let timeout = self.timeout;
        let deadline = async move {
            match timeout {
                Some((timeout, deadline)) => {
                    tokio::time::sleep_until(deadline).await;
                    timeout
                }
                None => pending().await
            }
        };

        let mut cancelled = self.cancelled.clone();
        let cancel_signal = async move {
            match cancelled.as_mut() {
                Some(rx) => {
                    while !*rx.borrow_and_update() {
                        // All handles dropped: nobody can cancel anymore
                        if rx.changed().await.is_err() {
                            pending::<()>().await;
                        }
                    }
                }
                None => pending().await
            }
        };

        tokio::select! {
            biased;

            _ = cancel_signal => Err(ErrorKind::Cancelled.into()),
            d = deadline => Err(ErrorKind::DeadlineExceeded(d).into()),
            res = fut => res
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    async fn never() -> Result<u8> {
        pending().await
    }

    #[tokio::test]
    async fn background_context_lets_the_call_finish() {
        let ctx = Context::background();

        assert_eq!(ctx.run(async { Ok::<_, Error>(7u8) }).await.unwrap(), 7);
    }

    #[tokio::test]
    async fn timeout_fails_with_deadline_exceeded() {
        let ctx = Context::background().with_timeout(Duration::from_millis(20));

        match ctx.run(never()).await {
            Err(Error(ErrorKind::DeadlineExceeded(d), _)) => assert_eq!(d, Duration::from_millis(20)),
            other => panic!("expected DeadlineExceeded, got {:?}", other)
        }
    }

    #[tokio::test]
    async fn deadline_is_shared_between_calls() {
        let ctx = Context::background().with_timeout(Duration::from_millis(30));

        assert_eq!(ctx.run(async { Ok::<_, Error>(1u8) }).await.unwrap(), 1);
        tokio::time::sleep(Duration::from_millis(50)).await;

        // A later call does not get a fresh 30ms
        match ctx.run(async { Ok::<_, Error>(2u8) }).await {
            Err(Error(ErrorKind::DeadlineExceeded(d), _)) => assert_eq!(d, Duration::from_millis(30)),
            other => panic!("expected DeadlineExceeded, got {:?}", other)
        }
    }

    #[tokio::test]
    async fn cancel_handle_fails_running_call() {
        let (ctx, handle) = Context::background().with_cancel();

        let run = ctx.run(never());
        let cancel = async {
            tokio::time::sleep(Duration::from_millis(10)).await;
            handle.cancel();
        };
        let (result, _) = tokio::join!(run, cancel);

        assert!(ctx.is_cancelled());
        match result {
            Err(Error(ErrorKind::Cancelled, _)) => {}
            other => panic!("expected Cancelled, got {:?}", other)
        }
    }

    #[tokio::test]
    async fn already_cancelled_context_fails_immediately() {
        let (ctx, handle) = Context::background().with_cancel();
        handle.cancel();

        match ctx.run(async { Ok::<_, Error>(1u8) }).await {
            Err(Error(ErrorKind::Cancelled, _)) => {}
            other => panic!("expected Cancelled, got {:?}", other)
        }
    }

    #[tokio::test]
    async fn dropped_handle_never_cancels() {
        let (ctx, handle) = Context::background().with_cancel();
        drop(handle);

        assert_eq!(ctx.run(async { Ok::<_, Error>(3u8) }).await.unwrap(), 3);
    }
}
