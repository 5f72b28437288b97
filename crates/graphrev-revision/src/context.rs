//! Per-request context: who is calling and how long they are willing to wait.

use crate::error::RevisionError;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

/// Shared cancellation flag. Clones observe the same flag.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// Immutable request context passed by reference into every operation.
///
/// [`RequestContext::checkpoint`] runs before each store statement.
#[derive(Debug, Clone)]
pub struct RequestContext {
    actor: String,
    deadline: Option<Instant>,
    cancel: CancelToken,
}

impl RequestContext {
    pub fn new(actor: impl Into<String>) -> Self {
        Self {
            actor: actor.into(),
            deadline: None,
            cancel: CancelToken::new(),
        }
    }

    pub fn with_deadline(mut self, deadline: Instant) -> Self {
        self.deadline = Some(deadline);
        self
    }

    pub fn with_timeout(self, timeout: Duration) -> Self {
        self.with_deadline(Instant::now() + timeout)
    }

    pub fn with_cancel_token(mut self, cancel: CancelToken) -> Self {
        self.cancel = cancel;
        self
    }

    pub fn actor(&self) -> &str {
        &self.actor
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    pub fn cancel_token(&self) -> &CancelToken {
        &self.cancel
    }

    /// Fail if the caller gave up.
    pub fn checkpoint(&self) -> Result<(), RevisionError> {
        if self.cancel.is_cancelled() {
            return Err(RevisionError::Cancelled);
        }
        if let Some(deadline) = self.deadline
            && Instant::now() >= deadline
        {
            return Err(RevisionError::DeadlineExceeded);
        }
        Ok(())
    }

    /// Same actor, no deadline, fresh token. Compensation steps run under it
    /// so a cancelled request can still undo what it already applied.
    pub fn detached(&self) -> Self {
        Self::new(self.actor.clone())
    }
}
