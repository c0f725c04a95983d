//! Event publisher — turns cache mutations into bus messages.
//!
//! An [`EventPublisher`] is registered as the [`CacheObserver`] of one
//! [`ChangeCache`](crate::change_cache::ChangeCache). Each notification is
//! serialized as a [`ChangeEvent`] and handed to the [`MessageBus`] before
//! the cache call returns. Publication is fire-and-forget: failures are
//! logged and never reach the caller that mutated the cache.

use std::error::Error;

use serde::Serialize;

use wattbridge_domain::error::BusError;
use wattbridge_domain::event::{ChangeEvent, ChangeKind};

use crate::change_cache::CacheObserver;
use crate::ports::MessageBus;

/// Identity stamped on every published event.
#[derive(Debug, Clone)]
pub struct PublishSettings {
    /// Name of this bridge module, sent as `module` in every payload.
    pub module: String,
    /// Topic prefix (`<namespace>.device.<kind>`).
    pub namespace: String,
}

/// Cache observer that publishes one message per mutation.
pub struct EventPublisher<B> {
    bus: B,
    settings: PublishSettings,
    on_set: ChangeKind,
    on_delete: Option<ChangeKind>,
}

impl<B: MessageBus> EventPublisher<B> {
    /// Publisher for the device identity cache: sets are inserts, deletes
    /// are deletes.
    pub fn for_devices(bus: B, settings: PublishSettings) -> Self {
        Self {
            bus,
            settings,
            on_set: ChangeKind::Insert,
            on_delete: Some(ChangeKind::Delete),
        }
    }

    /// Publisher for the status cache: every set is an update. Status
    /// entries have no delete topic.
    pub fn for_status(bus: B, settings: PublishSettings) -> Self {
        Self {
            bus,
            settings,
            on_set: ChangeKind::Update,
            on_delete: None,
        }
    }

    fn emit<V: Serialize>(&self, kind: ChangeKind, event: &ChangeEvent<V>) {
        let topic = kind.topic(&self.settings.namespace);
        if let Err(err) = self.try_emit(&topic, event) {
            tracing::warn!(
                error = &err as &dyn Error,
                %topic,
                id = %event.id,
                "failed to publish change event"
            );
        }
    }

    fn try_emit<V: Serialize>(&self, topic: &str, event: &ChangeEvent<V>) -> Result<(), BusError> {
        let payload = serde_json::to_vec(event).map_err(BusError::Serialize)?;
        tracing::debug!(
            %topic,
            payload = %String::from_utf8_lossy(&payload),
            "publishing change event"
        );
        self.bus.publish(topic, payload)
    }
}

impl<B: MessageBus, V: Serialize> CacheObserver<V> for EventPublisher<B> {
    fn on_set(&self, key: &str, value: &V) {
        let event = ChangeEvent::set(self.settings.module.as_str(), key, value);
        self.emit(self.on_set, &event);
    }

    fn on_delete(&self, key: &str) {
        let Some(kind) = self.on_delete else {
            tracing::debug!(id = %key, "no topic for deletion, nothing published");
            return;
        };
        let event: ChangeEvent<()> = ChangeEvent::delete(self.settings.module.as_str(), key);
        self.emit(kind, &event);
    }
}
