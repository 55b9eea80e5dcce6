//! Blocking yes/no confirmation before destructive actions.
//!
//! Every delete goes through a [`ConfirmationGate`]; the port is not called
//! unless the gate answers `true`. The UI shell supplies the real prompt;
//! the doubles here serve tests and headless tooling.

use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;

/// Yes/no prompt collaborator. Must resolve before the delete proceeds.
#[async_trait]
pub trait ConfirmationGate: Send + Sync {
    async fn confirm(&self, message: &str) -> bool;
}

/// Gate that approves everything. Headless tooling and most tests.
pub struct AlwaysConfirm;

#[async_trait]
impl ConfirmationGate for AlwaysConfirm {
    async fn confirm(&self, _message: &str) -> bool {
        true
    }
}

/// Gate that refuses everything, counting how often it was asked.
#[derive(Default)]
pub struct NeverConfirm {
    asked: AtomicUsize,
}

impl NeverConfirm {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of times the gate was consulted.
    pub fn asked(&self) -> usize {
        self.asked.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ConfirmationGate for NeverConfirm {
    async fn confirm(&self, _message: &str) -> bool {
        self.asked.fetch_add(1, Ordering::SeqCst);
        false
    }
}
