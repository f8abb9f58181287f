// src/discord/gate.rs
//! One-shot readiness signal for the Discord connection.

use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::Notify;

/// Closed until the channels have been resolved; every sender waits on it
/// before its first call. Once open it stays open.
#[derive(Debug, Default)]
pub struct ReadinessGate {
    open: AtomicBool,
    notify: Notify,
}

impl ReadinessGate {
    pub fn new() -> Self {
        Self::default()
    }

    /// A gate that starts open.
    pub fn opened() -> Self {
        let gate = Self::new();
        gate.open();
        gate
    }

    /// Release every current and future waiter.
    pub fn open(&self) {
        self.open.store(true, Ordering::SeqCst);
        self.notify.notify_waiters();
    }

    pub fn is_open(&self) -> bool {
        self.open.load(Ordering::SeqCst)
    }

    pub async fn wait_ready(&self) {
        loop {
            let notified = self.notify.notified();
            if self.is_open() {
                return;
            }
            notified.await;
        }
    }
}
