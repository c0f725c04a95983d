//! rumqttc-backed [`MessageBus`].
//!
//! [`connect`] splits the connection into two halves: the [`MqttBus`] handle
//! that adapters publish through, and the [`MqttDriver`] that owns the event
//! loop and must be spawned for anything to reach the broker.

use std::error::Error;
use std::time::Duration;

use rumqttc::{AsyncClient, Event, EventLoop, MqttOptions, Packet, QoS};
use tokio::sync::watch;

use wattbridge_app::ports::{BusHealth, MessageBus};
use wattbridge_domain::error::BusError;

use crate::config::MqttConfig;
use crate::error::MqttError;
use crate::health::HealthTracker;

/// Requests buffered between the client handle and the event loop.
pub const REQUEST_CAPACITY: usize = 64;

const RETRY_DELAY: Duration = Duration::from_secs(1);

/// Publishing half of the MQTT connection.
#[derive(Clone)]
pub struct MqttBus {
    client: AsyncClient,
}

impl MessageBus for MqttBus {
    fn publish(&self, topic: &str, payload: Vec<u8>) -> Result<(), BusError> {
        self.client
            .try_publish(topic, QoS::AtLeastOnce, false, payload)
            .map_err(MqttError::from)?;
        Ok(())
    }
}

/// Event loop half of the MQTT connection.
pub struct MqttDriver {
    eventloop: EventLoop,
    tracker: HealthTracker,
    health: watch::Sender<BusHealth>,
}

impl MqttDriver {
    /// Receiver of connection health updates.
    pub fn subscribe(&self) -> watch::Receiver<BusHealth> {
        self.health.subscribe()
    }

    /// Poll the event loop until the connection is declared lost.
    pub async fn run(mut self) {
        loop {
            let outcome = self.eventloop.poll().await;
            let failed = outcome.is_err();
            match outcome {
                Ok(Event::Incoming(Packet::ConnAck(ack))) => {
                    tracing::info!(code = ?ack.code, "connected to MQTT broker");
                    self.tracker.on_connack();
                }
                Ok(Event::Incoming(Packet::Disconnect)) => {
                    tracing::warn!("MQTT broker closed the session");
                    self.tracker.on_disconnect();
                }
                Ok(event) => tracing::trace!(?event, "mqtt event"),
                Err(err) => {
                    tracing::warn!(error = &err as &dyn Error, "MQTT connection error");
                    self.tracker.on_error(&err.to_string());
                }
            }

            self.health.send_if_modified(|current| {
                let next = self.tracker.state();
                if current == next {
                    false
                } else {
                    *current = next.clone();
                    true
                }
            });

            if self.tracker.is_lost() {
                tracing::error!(state = ?self.tracker.state(), "giving up on MQTT broker");
                return;
            }
            if failed {
                tokio::time::sleep(RETRY_DELAY).await;
            }
        }
    }
}

/// Build both halves of a broker connection.
///
/// Nothing touches the network until [`MqttDriver::run`] is polled.
#[must_use]
pub fn connect(config: &MqttConfig) -> (MqttBus, MqttDriver) {
    let mut options = MqttOptions::new(
        config.client_id.as_str(),
        config.broker_host.as_str(),
        config.broker_port,
    );
    options.set_keep_alive(config.keep_alive());

    let (client, eventloop) = AsyncClient::new(options, REQUEST_CAPACITY);
    let (health, _) = watch::channel(BusHealth::Connecting);

    tracing::debug!(
        host = %config.broker_host,
        port = config.broker_port,
        client_id = %config.client_id,
        "MQTT client created"
    );

    (
        MqttBus { client },
        MqttDriver {
            eventloop,
            tracker: HealthTracker::new(config.max_reconnect_attempts),
            health,
        },
    )
}
