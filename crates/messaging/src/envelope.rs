//! Wire envelope for published messages.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Content type tag carried by every envelope.
pub const CONTENT_TYPE_JSON: &str = "application/json";

/// A message as it is put on the queue.
///
/// `message_id` is generated for every publish attempt so receivers can
/// de-duplicate; it is unrelated to any id inside the body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageEnvelope {
    pub message_id: String,
    pub content_type: String,
    pub queue: String,
    pub body: serde_json::Value,
}

impl MessageEnvelope {
    /// Wraps a message bound for `queue`.
    pub fn new<T: Serialize + ?Sized>(
        queue: impl Into<String>,
        message: &T,
    ) -> Result<Self, serde_json::Error> {
        Ok(Self {
            message_id: Uuid::new_v4().to_string(),
            content_type: CONTENT_TYPE_JSON.to_string(),
            queue: queue.into(),
            body: serde_json::to_value(message)?,
        })
    }

    /// Serializes the envelope for the wire.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Serialize)]
    #[serde(rename_all = "camelCase")]
    struct Sample {
        transaction_id: String,
        account_id: String,
    }

    fn sample() -> Sample {
        Sample {
            transaction_id: "tx-1".to_string(),
            account_id: "ACC001".to_string(),
        }
    }

    #[test]
    fn envelope_uses_camel_case_and_json_content_type() {
        let envelope = MessageEnvelope::new("transactions", &sample()).unwrap();
        let json: serde_json::Value = serde_json::from_str(&envelope.to_json().unwrap()).unwrap();

        assert_eq!(json["contentType"], "application/json");
        assert_eq!(json["queue"], "transactions");
        assert_eq!(json["body"]["transactionId"], "tx-1");
        assert_eq!(json["body"]["accountId"], "ACC001");
        assert!(json["messageId"].as_str().is_some());
    }

    #[test]
    fn every_envelope_gets_a_fresh_message_id() {
        let first = MessageEnvelope::new("transactions", &sample()).unwrap();
        let second = MessageEnvelope::new("transactions", &sample()).unwrap();
        assert_ne!(first.message_id, second.message_id);
        assert_ne!(first.message_id, "tx-1");
    }
}
