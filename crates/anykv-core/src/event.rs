//! Change notifications and live subscriptions.

use std::fmt;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tokio_util::sync::CancellationToken;

/// The kind of change an [`Event`] describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventOp {
    /// Records were created.
    Create,
    /// Records were updated or patched.
    Update,
    /// Records were deleted.
    Delete,
}

/// A change notification delivered to a [`EventHandler`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    /// What happened.
    pub op: EventOp,
    /// The key the change was made through.
    pub key: String,
    /// The records after the change (before it, for deletes).
    pub values: Vec<Value>,
}

/// Receives events from a live subscription.
#[async_trait]
pub trait EventHandler: Send + Sync {
    /// Handle one event.
    async fn handle(&self, event: Event);
}

#[async_trait]
impl<F> EventHandler for F
where
    F: Fn(Event) + Send + Sync,
{
    async fn handle(&self, event: Event) {
        self(event);
    }
}

/// Handle to a live subscription. Closing it, or dropping it, ends the
/// subscription.
pub struct Subscription {
    token: CancellationToken,
}

impl Subscription {
    /// Wrap the token the subscription's delivery task watches.
    #[must_use]
    pub fn new(token: CancellationToken) -> Self {
        Self { token }
    }

    /// Terminate the subscription.
    pub fn close(self) {
        self.token.cancel();
    }

    /// Whether the subscription has been terminated.
    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.token.is_cancelled()
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.token.cancel();
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("closed", &self.is_closed())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    #[test]
    fn test_event_wire_shape() {
        let event = Event {
            op: EventOp::Delete,
            key: "user:1".into(),
            values: vec![serde_json::json!({"id": "1"})],
        };
        let wire = serde_json::to_value(&event).unwrap();
        assert_eq!(wire["op"], "delete");
        assert_eq!(wire["key"], "user:1");
    }

    #[tokio::test]
    async fn test_closure_handler() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        let handler = move |e: Event| sink.lock().unwrap().push(e.key);

        handler
            .handle(Event {
                op: EventOp::Create,
                key: "user:1".into(),
                values: vec![],
            })
            .await;
        assert_eq!(*seen.lock().unwrap(), vec!["user:1".to_string()]);
    }

    #[test]
    fn test_subscription_close_and_drop_cancel() {
        let token = CancellationToken::new();
        let sub = Subscription::new(token.clone());
        assert!(!sub.is_closed());
        sub.close();
        assert!(token.is_cancelled());

        let token = CancellationToken::new();
        drop(Subscription::new(token.clone()));
        assert!(token.is_cancelled());
    }
}
