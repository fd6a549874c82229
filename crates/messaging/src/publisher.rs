//! Publisher trait and the broker-backed implementation.

use async_trait::async_trait;
use redis::AsyncCommands;
use redis::aio::ConnectionManager;
use serde::Serialize;

use crate::envelope::MessageEnvelope;
use crate::error::MessagingError;
use crate::settings::MessagingSettings;

/// Trait for best-effort message publishing.
///
/// `publish` completes normally whatever happens to the message; failures
/// are the publisher's to log.
#[async_trait]
pub trait MessagePublisher: Send + Sync {
    /// Publishes one message to the publisher's queue.
    async fn publish<T>(&self, message: &T)
    where
        T: Serialize + Send + Sync;
}

/// Publishes notifications to a Redis-list queue, or only logs them.
///
/// The mode is fixed at construction. The `Broker` connection is a
/// multiplexed [`ConnectionManager`] that is cloned per publish and is safe
/// to use from concurrent requests.
#[derive(Clone)]
pub enum NotificationPublisher {
    Broker {
        queue: String,
        connection: ConnectionManager,
    },
    Logging {
        queue: String,
    },
}

impl std::fmt::Debug for NotificationPublisher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Broker { queue, .. } => f.debug_struct("Broker").field("queue", queue).finish(),
            Self::Logging { queue } => f.debug_struct("Logging").field("queue", queue).finish(),
        }
    }
}

impl NotificationPublisher {
    /// Validates the settings and opens the broker channel.
    ///
    /// Unusable settings or a failed connection select `Logging` mode; this
    /// never returns an error.
    #[tracing::instrument(skip(settings), fields(queue = %settings.queue_name))]
    pub async fn connect(settings: &MessagingSettings) -> Self {
        let url = match settings.validate() {
            Ok(url) => url,
            Err(reason) => {
                tracing::info!(%reason, "message broker not configured, notifications will only be logged");
                return Self::logging(&settings.queue_name);
            }
        };

        match open_channel(url.as_str(), settings).await {
            Ok(connection) => {
                tracing::info!("connected to message broker");
                Self::Broker {
                    queue: settings.queue_name.clone(),
                    connection,
                }
            }
            Err(err) => {
                tracing::warn!(error = %err, "could not connect to message broker, notifications will only be logged");
                Self::logging(&settings.queue_name)
            }
        }
    }

    /// Creates a publisher that only logs.
    pub fn logging(queue: impl Into<String>) -> Self {
        Self::Logging {
            queue: queue.into(),
        }
    }

    /// Returns the queue name messages are addressed to.
    pub fn queue(&self) -> &str {
        match self {
            Self::Broker { queue, .. } | Self::Logging { queue } => queue,
        }
    }

    /// Returns true if messages are actually sent to a broker.
    pub fn is_connected(&self) -> bool {
        matches!(self, Self::Broker { .. })
    }

    /// Releases the broker channel.
    pub async fn shutdown(self) {
        if let Self::Broker { queue, connection } = self {
            drop(connection);
            tracing::info!(%queue, "closed message broker channel");
        }
    }

    async fn send(
        &self,
        connection: &ConnectionManager,
        queue: &str,
        envelope: &MessageEnvelope,
    ) -> Result<(), MessagingError> {
        let payload = envelope.to_json()?;
        let mut connection = connection.clone();
        let _: () = connection.rpush(queue, payload).await?;
        Ok(())
    }
}

async fn open_channel(
    url: &str,
    settings: &MessagingSettings,
) -> Result<ConnectionManager, MessagingError> {
    let client = redis::Client::open(url)?;
    let connecting = ConnectionManager::new(client);

    let connection = tokio::time::timeout(settings.connect_timeout, connecting)
        .await
        .map_err(|_| MessagingError::ConnectTimeout(settings.connect_timeout))??;

    Ok(connection)
}

/// Logs a message that was not delivered.
pub(crate) fn log_unsent(envelope: &MessageEnvelope, reason: &str) {
    let body = envelope.body.to_string();
    tracing::info!(
        queue = %envelope.queue,
        message_id = %envelope.message_id,
        content_type = %envelope.content_type,
        %body,
        reason,
        "notification (not sent)"
    );
}

#[async_trait]
impl MessagePublisher for NotificationPublisher {
    async fn publish<T>(&self, message: &T)
    where
        T: Serialize + Send + Sync,
    {
        let envelope = match MessageEnvelope::new(self.queue(), message) {
            Ok(envelope) => envelope,
            Err(err) => {
                tracing::error!(error = %err, queue = self.queue(), "could not serialize notification");
                metrics::counter!("notifications_total", "outcome" => "failed").increment(1);
                return;
            }
        };

        match self {
            Self::Logging { .. } => {
                log_unsent(&envelope, "broker not configured");
                metrics::counter!("notifications_total", "outcome" => "logged").increment(1);
            }
            Self::Broker { queue, connection } => {
                match self.send(connection, queue, &envelope).await {
                    Ok(()) => {
                        tracing::info!(%queue, message_id = %envelope.message_id, "notification sent");
                        metrics::counter!("notifications_total", "outcome" => "sent").increment(1);
                    }
                    Err(err) => {
                        tracing::warn!(error = %err, %queue, "could not send notification");
                        log_unsent(&envelope, "send failed");
                        metrics::counter!("notifications_total", "outcome" => "failed")
                            .increment(1);
                    }
                }
            }
        }
    }
}
