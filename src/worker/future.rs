//! The completion future returned by asynchronous renders.
//!
//! [`RenderFuture`] is a one-shot future resolved by a pool thread. The
//! shared slot is written exactly once; polling after completion takes the
//! stored result.

use futures_util::task::AtomicWaker;
use std::future::Future;
use std::pin::Pin;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::task::{Context, Poll};

use crate::domain::error::{FormweaverError, Result};

/// State shared between the submitting side and the completing pool thread.
pub(crate) struct Shared {
    result: Mutex<Option<Result<String>>>,
    waker: AtomicWaker,
    done: AtomicBool,
}

impl Shared {
    pub(crate) fn new() -> Arc<Self> {
        Arc::new(Self {
            result: Mutex::new(None),
            waker: AtomicWaker::new(),
            done: AtomicBool::new(false),
        })
    }

    /// Stores the render outcome and wakes the polling task.
    ///
    /// Must be called exactly once.
    pub(crate) fn complete(&self, result: Result<String>) {
        *self.result.lock().expect("render future slot poisoned") = Some(result);
        self.done.store(true, Ordering::Release);
        self.waker.wake();
    }
}

/// A one-shot future yielding the rendered form markup.
///
/// Resolved on a render pool thread; polling is cheap and executor-agnostic.
pub struct RenderFuture {
    shared: Arc<Shared>,
}

impl RenderFuture {
    pub(crate) fn new(shared: Arc<Shared>) -> Self {
        Self { shared }
    }

    /// A future already resolved with `result`, used when submission to the
    /// pool itself fails.
    pub(crate) fn ready(result: Result<String>) -> Self {
        let shared = Shared::new();
        shared.complete(result);
        Self { shared }
    }
}

impl Future for RenderFuture {
    type Output = Result<String>;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        // Register before the completion check so a wake between the check
        // and the return cannot be lost.
        self.shared.waker.register(cx.waker());
        if !self.shared.done.load(Ordering::Acquire) {
            return Poll::Pending;
        }

        let taken = self
            .shared
            .result
            .lock()
            .expect("render future slot poisoned")
            .take();
        match taken {
            Some(result) => Poll::Ready(result),
            None => Poll::Ready(Err(FormweaverError::Worker(
                "render future polled after completion".to_string(),
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn resolves_with_the_completed_value() {
        let shared = Shared::new();
        let future = RenderFuture::new(Arc::clone(&shared));

        let completer = thread::spawn(move || {
            shared.complete(Ok("<form></form>".to_string()));
        });
        let output = futures_executor::block_on(future).unwrap();
        completer.join().unwrap();
        assert_eq!(output, "<form></form>");
    }

    #[test]
    fn ready_future_resolves_immediately() {
        let future = RenderFuture::ready(Err(FormweaverError::Worker("down".to_string())));
        let err = futures_executor::block_on(future).unwrap_err();
        assert!(matches!(err, FormweaverError::Worker(_)));
    }
}
