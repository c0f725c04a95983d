//! Connection health tracking for the MQTT event loop.
//!
//! rumqttc reconnects on its own the next time the event loop is polled
//! after an error. The tracker only counts consecutive failures and decides
//! when retrying is pointless.

use wattbridge_app::ports::BusHealth;

/// Folds event loop outcomes into a [`BusHealth`].
#[derive(Debug)]
pub struct HealthTracker {
    max_attempts: u32,
    failures: u32,
    state: BusHealth,
}

impl HealthTracker {
    /// Start in [`BusHealth::Connecting`], giving up after `max_attempts`
    /// consecutive errors.
    #[must_use]
    pub fn new(max_attempts: u32) -> Self {
        Self {
            max_attempts,
            failures: 0,
            state: BusHealth::Connecting,
        }
    }

    #[must_use]
    pub fn state(&self) -> &BusHealth {
        &self.state
    }

    #[must_use]
    pub fn is_lost(&self) -> bool {
        matches!(self.state, BusHealth::Lost { .. })
    }

    /// The broker acknowledged a connection.
    pub fn on_connack(&mut self) -> &BusHealth {
        if !self.is_lost() {
            self.failures = 0;
            self.state = BusHealth::Connected;
        }
        &self.state
    }

    /// The event loop returned an error.
    pub fn on_error(&mut self, reason: &str) -> &BusHealth {
        if self.is_lost() {
            return &self.state;
        }
        self.failures += 1;
        self.state = if self.failures >= self.max_attempts {
            BusHealth::Lost {
                reason: format!("{reason} (gave up after {} attempts)", self.failures),
            }
        } else {
            BusHealth::Reconnecting {
                attempt: self.failures,
            }
        };
        &self.state
    }

    /// The broker closed the session on purpose.
    pub fn on_disconnect(&mut self) -> &BusHealth {
        self.state = BusHealth::Lost {
            reason: "broker sent DISCONNECT".to_string(),
        };
        &self.state
    }
}
