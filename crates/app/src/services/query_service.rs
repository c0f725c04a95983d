//! Query service — read-only access to the device and status caches.

use wattbridge_domain::device::Device;
use wattbridge_domain::error::{BridgeError, NotFoundError};
use wattbridge_domain::status::StatusSnapshot;

use crate::change_cache::ChangeCache;

/// Joins the identity and status caches for external consumers.
///
/// Never blocks on, nor triggers, a poll cycle.
#[derive(Clone)]
pub struct QueryService {
    devices: ChangeCache<Device>,
    statuses: ChangeCache<StatusSnapshot>,
}

impl QueryService {
    /// Create a service reading from the given caches.
    pub fn new(devices: ChangeCache<Device>, statuses: ChangeCache<StatusSnapshot>) -> Self {
        Self { devices, statuses }
    }

    /// List every device that has a status, joined with that status.
    ///
    /// Devices that have never been polled successfully are left out.
    #[must_use]
    pub fn list_devices(&self) -> Vec<Device> {
        let devices = self.devices.entries();
        let mut statuses = self
            .statuses
            .mget(devices.iter().map(|(id, _)| id.as_str()));

        devices
            .into_iter()
            .filter_map(|(id, device)| statuses.remove(&id).map(|s| device.with_current(s)))
            .collect()
    }

    /// Latest status snapshot of one device.
    ///
    /// # Errors
    ///
    /// Returns [`BridgeError::NotFound`] when no status was ever stored for
    /// `id`.
    pub fn get_status(&self, id: &str) -> Result<StatusSnapshot, BridgeError> {
        self.statuses.get(id).ok_or_else(|| {
            NotFoundError {
                entity: "Status",
                id: id.to_string(),
            }
            .into()
        })
    }

    /// Reload the device set.
    ///
    /// Identity is only read at startup, so there is nothing to reload; the
    /// call succeeds with no devices.
    ///
    /// # Errors
    ///
    /// Never fails today; the signature leaves room for a real reload.
    pub fn reload(&self) -> Result<Vec<Device>, BridgeError> {
        tracing::debug!("reload requested, nothing to do");
        Ok(Vec::new())
    }
}
