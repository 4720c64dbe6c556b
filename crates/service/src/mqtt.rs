//! MQTT transport wiring.

use rumqttc::{AsyncClient, EventLoop, MqttOptions, QoS};
use std::time::Duration;
use tracing::{debug, error};

use umc_config::MqttSection;

use crate::status::StatusSnapshot;

/// Builds the async client and its event loop from the `mqtt` section.
///
/// The connection itself is established lazily by polling the event loop;
/// the daemon subscribes on every `ConnAck` so a broker restart re-installs
/// the subscription.
#[must_use]
pub fn connect(mqtt: &MqttSection) -> (AsyncClient, EventLoop) {
    let client_id = format!("umcd-{}", std::process::id());
    let mut options = MqttOptions::new(client_id, mqtt.broker.clone(), mqtt.port);
    options.set_keep_alive(Duration::from_secs(5));
    AsyncClient::new(options, 64)
}

/// Publishes status snapshots on the configured topic.
///
/// Publish failures are logged and dropped: status is advisory, and the
/// heartbeat checker covers the silence independently.
#[derive(Debug, Clone)]
pub struct StatusPublisher {
    client: AsyncClient,
    topic: String,
}

impl StatusPublisher {
    /// Creates a publisher for `topic`.
    #[must_use]
    pub fn new(client: AsyncClient, topic: String) -> Self {
        Self { client, topic }
    }

    /// Serializes and publishes one snapshot.
    pub async fn publish(&self, snapshot: &StatusSnapshot) {
        let payload = match serde_json::to_vec(snapshot) {
            Ok(payload) => payload,
            Err(err) => {
                error!(%err, "failed to serialize status snapshot");
                return;
            }
        };
        if let Err(err) = self
            .client
            .publish(self.topic.as_str(), QoS::AtLeastOnce, false, payload)
            .await
        {
            error!(%err, topic = %self.topic, "failed to publish status");
            return;
        }
        debug!(topic = %self.topic, "status published");
    }
}

/// Subscribes to the command topic; called on every `ConnAck`.
pub async fn subscribe_commands(client: &AsyncClient, topic: &str) {
    if let Err(err) = client.subscribe(topic, QoS::AtLeastOnce).await {
        error!(%err, topic, "failed to subscribe to command topic");
    }
}
