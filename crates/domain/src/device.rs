//! Device — an identity record for something exposed by the gateway.
//!
//! Devices are created once when the bridge loads and are never deleted in
//! normal operation. The `current` field is not stored: it is filled in by
//! the query layer when joining against the status cache.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::{BridgeError, ValidationError};
use crate::status::StatusSnapshot;

/// Category tag for the energy gateway itself.
pub const ENERGY_GATEWAY: &str = "energy.gateway";

/// Identity record of a device.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Device {
    /// Stable external identifier, unique across the device cache.
    pub id: String,
    pub name: String,
    /// Domain category (e.g. [`ENERGY_GATEWAY`]).
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub location: Location,
    /// Latest status, only present on joined query results.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current: Option<StatusSnapshot>,
}

/// Free-form descriptive attributes of where a device lives.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Location {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timezone: Option<Timezone>,
    /// Any other attributes, kept verbatim.
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

/// Named IANA timezone (e.g. `America/Los_Angeles`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Timezone {
    pub name: String,
}

impl Device {
    /// Create a builder for constructing a [`Device`].
    #[must_use]
    pub fn builder() -> DeviceBuilder {
        DeviceBuilder::default()
    }

    /// Check domain invariants.
    ///
    /// # Errors
    ///
    /// Returns [`BridgeError::Validation`] when `id` is empty.
    pub fn validate(&self) -> Result<(), BridgeError> {
        if self.id.is_empty() {
            return Err(ValidationError::EmptyId.into());
        }
        Ok(())
    }

    /// Return a copy of this record joined with its latest status.
    #[must_use]
    pub fn with_current(mut self, status: StatusSnapshot) -> Self {
        self.current = Some(status);
        self
    }
}

/// Step-by-step builder for [`Device`].
#[derive(Debug, Default)]
pub struct DeviceBuilder {
    id: Option<String>,
    name: Option<String>,
    kind: Option<String>,
    location: Location,
}

impl DeviceBuilder {
    #[must_use]
    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    #[must_use]
    pub fn kind(mut self, kind: impl Into<String>) -> Self {
        self.kind = Some(kind.into());
        self
    }

    #[must_use]
    pub fn timezone(mut self, name: impl Into<String>) -> Self {
        self.location.timezone = Some(Timezone { name: name.into() });
        self
    }

    /// Consume the builder, validate, and return a [`Device`].
    ///
    /// # Errors
    ///
    /// Returns [`BridgeError::Validation`] if `id` is missing or empty.
    pub fn build(self) -> Result<Device, BridgeError> {
        let device = Device {
            id: self.id.unwrap_or_default(),
            name: self.name.unwrap_or_default(),
            kind: self.kind.unwrap_or_else(|| ENERGY_GATEWAY.to_string()),
            location: self.location,
            current: None,
        };
        device.validate()?;
        Ok(device)
    }
}
