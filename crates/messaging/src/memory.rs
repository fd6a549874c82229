//! In-memory publisher for testing.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use serde::Serialize;
use tokio::sync::RwLock;

use crate::envelope::MessageEnvelope;
use crate::publisher::{MessagePublisher, log_unsent};

/// A message seen by [`InMemoryPublisher`].
#[derive(Debug, Clone, PartialEq)]
pub struct PublishedMessage {
    pub envelope: MessageEnvelope,
    /// False when the publisher was set to fail and the message was only logged.
    pub delivered: bool,
}

/// Records every publish attempt instead of sending it.
#[derive(Debug, Clone)]
pub struct InMemoryPublisher {
    queue: String,
    messages: Arc<RwLock<Vec<PublishedMessage>>>,
    fail_on_publish: Arc<AtomicBool>,
}

impl Default for InMemoryPublisher {
    fn default() -> Self {
        Self::new("transactions")
    }
}

impl InMemoryPublisher {
    /// Creates a publisher addressing `queue`.
    pub fn new(queue: impl Into<String>) -> Self {
        Self {
            queue: queue.into(),
            messages: Arc::default(),
            fail_on_publish: Arc::default(),
        }
    }

    /// Simulates an unreachable channel: later publishes are logged, not delivered.
    pub fn set_fail_on_publish(&self, fail: bool) {
        self.fail_on_publish.store(fail, Ordering::SeqCst);
    }

    /// Returns every publish attempt, delivered or not.
    pub async fn attempts(&self) -> Vec<PublishedMessage> {
        self.messages.read().await.clone()
    }

    /// Returns the bodies of delivered messages.
    pub async fn delivered(&self) -> Vec<serde_json::Value> {
        self.messages
            .read()
            .await
            .iter()
            .filter(|m| m.delivered)
            .map(|m| m.envelope.body.clone())
            .collect()
    }
}

#[async_trait]
impl MessagePublisher for InMemoryPublisher {
    async fn publish<T>(&self, message: &T)
    where
        T: Serialize + Send + Sync,
    {
        let envelope = match MessageEnvelope::new(&self.queue, message) {
            Ok(envelope) => envelope,
            Err(err) => {
                tracing::error!(error = %err, "could not serialize notification");
                return;
            }
        };

        let delivered = !self.fail_on_publish.load(Ordering::SeqCst);
        if !delivered {
            log_unsent(&envelope, "channel unavailable");
        }

        self.messages.write().await.push(PublishedMessage {
            envelope,
            delivered,
        });
    }
}
