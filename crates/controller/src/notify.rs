//! Toast notification bus.
//!
//! A `tokio::sync::broadcast` wrapper so the controllers stay testable
//! without a UI mounted: publishing is fire-and-forget, and any number of
//! subscribers (the toast tray, a test collector) can listen independently.

use tokio::sync::broadcast;

/// Default buffer capacity for the broadcast channel.
const DEFAULT_CAPACITY: usize = 64;

/// Visual flavor of a toast.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ToastVariant {
    #[default]
    Default,
    Destructive,
}

/// One user-facing notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub title: String,
    pub description: String,
    pub variant: ToastVariant,
}

impl Toast {
    pub fn success(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            variant: ToastVariant::Default,
        }
    }

    pub fn failure(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            variant: ToastVariant::Destructive,
        }
    }
}

/// Fan-out channel for [`Toast`]s.
#[derive(Debug, Clone)]
pub struct ToastBus {
    sender: broadcast::Sender<Toast>,
}

impl ToastBus {
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Subscribe to every toast published after this call.
    pub fn subscribe(&self) -> broadcast::Receiver<Toast> {
        self.sender.subscribe()
    }

    /// Publish a toast. Zero receivers is fine; the send error only means
    /// nobody is listening.
    pub fn publish(&self, toast: Toast) {
        let _ = self.sender.send(toast);
    }
}

impl Default for ToastBus {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn subscribers_receive_published_toasts() {
        let bus = ToastBus::default();
        let mut rx = bus.subscribe();
        bus.publish(Toast::success("Saved", "Client created"));
        let toast = rx.recv().await.unwrap();
        assert_eq!(toast.title, "Saved");
        assert_eq!(toast.variant, ToastVariant::Default);
    }

    #[test]
    fn publish_without_subscribers_is_a_no_op() {
        let bus = ToastBus::default();
        bus.publish(Toast::failure("Failed", "network down"));
    }
}
