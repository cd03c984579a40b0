//! Delayed redirect with explicit cancellation.
//!
//! A pending redirect is a value, not a timer: the host polls it with its
//! own clock and may cancel it up to the moment it navigates.

use linkmend_core::RedirectTarget;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Cloneable cancellation handle shared with the pending redirect.
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

/// A redirect that becomes due at `fire_at_ms` unless cancelled first.
#[derive(Debug, Clone)]
pub struct PendingRedirect {
    target: RedirectTarget,
    fire_at_ms: u64,
    token: CancelToken,
}

impl PendingRedirect {
    pub fn new(target: RedirectTarget, fire_at_ms: u64) -> Self {
        Self {
            target,
            fire_at_ms,
            token: CancelToken::new(),
        }
    }

    pub fn target(&self) -> &RedirectTarget {
        &self.target
    }

    pub fn fire_at_ms(&self) -> u64 {
        self.fire_at_ms
    }

    /// Handle the host keeps (or hands to UI code) to abort the redirect.
    pub fn token(&self) -> CancelToken {
        self.token.clone()
    }

    /// `Some(target)` exactly when the redirect is due and not cancelled.
    pub fn poll(&self, now_ms: u64) -> Option<&RedirectTarget> {
        if self.token.is_cancelled() || now_ms < self.fire_at_ms {
            None
        } else {
            Some(&self.target)
        }
    }
}
