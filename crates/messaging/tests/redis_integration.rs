//! Redis integration tests
//!
//! These tests start a Redis container and need Docker, so they are ignored
//! by default. Run with:
//!
//! ```bash
//! cargo test -p messaging --test redis_integration -- --ignored --test-threads=1
//! ```

use std::time::Duration;

use messaging::{
    CONTENT_TYPE_JSON, MessageEnvelope, MessagePublisher, MessagingSettings, NotificationPublisher,
};
use redis::AsyncCommands;
use serde::Serialize;
use serial_test::serial;
use testcontainers::{ContainerAsync, runners::AsyncRunner};
use testcontainers_modules::redis::Redis;

const QUEUE: &str = "transactions-test";

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct Created {
    transaction_id: String,
    account_id: String,
}

fn created(id: &str) -> Created {
    Created {
        transaction_id: id.to_string(),
        account_id: "ACC001".to_string(),
    }
}

/// Starts a broker and returns it with its connection string.
async fn start_broker() -> (ContainerAsync<Redis>, String) {
    let container = Redis::default().start().await.unwrap();
    let host = container.get_host().await.unwrap();
    let port = container.get_host_port_ipv4(6379).await.unwrap();
    (container, format!("redis://{host}:{port}"))
}

fn settings_for(connection_string: &str) -> MessagingSettings {
    MessagingSettings {
        connection_string: connection_string.to_string(),
        queue_name: QUEUE.to_string(),
        allow_loopback: true,
        connect_timeout: Duration::from_secs(5),
    }
}

async fn queued(connection_string: &str) -> Vec<String> {
    let client = redis::Client::open(connection_string).unwrap();
    let mut conn = client.get_multiplexed_async_connection().await.unwrap();
    conn.lrange(QUEUE, 0, -1).await.unwrap()
}

#[tokio::test]
#[ignore = "requires Docker"]
#[serial]
async fn published_envelopes_land_on_the_queue() {
    let (_container, connection_string) = start_broker().await;
    let publisher = NotificationPublisher::connect(&settings_for(&connection_string)).await;
    assert!(publisher.is_connected());

    publisher.publish(&created("tx-1")).await;
    publisher.publish(&created("tx-2")).await;

    let raw = queued(&connection_string).await;
    assert_eq!(raw.len(), 2);

    let wire: serde_json::Value = serde_json::from_str(&raw[0]).unwrap();
    assert!(wire["messageId"].is_string());
    assert_eq!(wire["contentType"], CONTENT_TYPE_JSON);
    assert_eq!(wire["queue"], QUEUE);
    assert_eq!(wire["body"]["transactionId"], "tx-1");
    assert_eq!(wire["body"]["accountId"], "ACC001");

    let envelopes: Vec<MessageEnvelope> = raw
        .iter()
        .map(|item| serde_json::from_str(item).unwrap())
        .collect();
    assert_eq!(envelopes[1].body["transactionId"], "tx-2");
    assert_ne!(envelopes[0].message_id, envelopes[1].message_id);
    assert_ne!(envelopes[0].message_id, "tx-1");

    publisher.shutdown().await;
}

#[tokio::test]
#[ignore = "requires Docker"]
#[serial]
async fn publish_returns_after_broker_goes_away() {
    let (container, connection_string) = start_broker().await;
    let publisher = NotificationPublisher::connect(&settings_for(&connection_string)).await;
    assert!(publisher.is_connected());

    publisher.publish(&created("tx-1")).await;
    assert_eq!(queued(&connection_string).await.len(), 1);

    container.stop().await.unwrap();

    tokio::time::timeout(
        Duration::from_secs(30),
        publisher.publish(&created("tx-lost")),
    )
    .await
    .expect("publish should complete while the broker is down");

    // The mode is fixed at construction.
    assert!(publisher.is_connected());
}
