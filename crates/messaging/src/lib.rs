//! Notification publishing for newly created transactions.
//!
//! Publishing is best-effort: [`MessagePublisher::publish`] never returns an
//! error. When the broker is not configured, unreachable, or a send fails,
//! the message is logged instead.
//!
//! The broker transport is a Redis list used as a queue: each message is an
//! envelope pushed with `RPUSH` onto the configured queue name.

pub mod envelope;
pub mod error;
pub mod memory;
pub mod publisher;
pub mod settings;

pub use envelope::{CONTENT_TYPE_JSON, MessageEnvelope};
pub use error::MessagingError;
pub use memory::{InMemoryPublisher, PublishedMessage};
pub use publisher::{MessagePublisher, NotificationPublisher};
pub use settings::{MessagingSettings, UnusableReason};
