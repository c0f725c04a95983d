//! Gateway reader — composes raw gateway reads into domain records.
//!
//! A status read is four strictly sequential requests:
//!
//! 1. `sitemaster`: is the gateway running
//! 2. `meters/aggregates`: grid, battery, solar and load meters
//! 3. `system_status/grid_status`: grid connectivity
//! 4. `system_status/soe`: battery state of charge
//!
//! Each request is only issued once the previous one has resolved, and the
//! first failure aborts the sequence. A snapshot is returned only when all
//! four reads succeeded, so callers never see a partial record.

use serde::Deserialize;
use serde::de::DeserializeOwned;

use wattbridge_domain::device::{Device, ENERGY_GATEWAY};
use wattbridge_domain::error::{BridgeError, ReadError};
use wattbridge_domain::status::{
    BatteryStatus, DemandStatus, GridStatus, SolarStatus, StatusSnapshot,
};
use wattbridge_domain::time::{Timestamp, now, parse_rfc3339};

use crate::ports::GatewayTransport;

pub const SITE_INFO: &str = "site_info";
pub const SITE_MASTER: &str = "sitemaster";
pub const METER_AGGREGATES: &str = "meters/aggregates";
pub const GRID_STATUS: &str = "system_status/grid_status";
pub const STATE_OF_ENERGY: &str = "system_status/soe";

/// Value of `grid_status` when the site is tied to the grid.
const GRID_CONNECTED: &str = "SystemGridConnected";

#[derive(Debug, Deserialize)]
struct SiteInfo {
    site_name: String,
    timezone: String,
}

#[derive(Debug, Deserialize)]
struct SiteMaster {
    running: bool,
    #[serde(default)]
    connected_to_tesla: bool,
}

#[derive(Debug, Deserialize)]
struct MeterAggregates {
    site: Meter,
    battery: Meter,
    solar: Meter,
    load: Meter,
}

#[derive(Debug, Deserialize)]
struct Meter {
    #[serde(default)]
    last_communication_time: Option<String>,
    energy_imported: f64,
    energy_exported: f64,
    instant_power: f64,
}

#[derive(Debug, Deserialize)]
struct GridState {
    grid_status: String,
}

#[derive(Debug, Deserialize)]
struct StateOfEnergy {
    percentage: f64,
}

/// Reads device identity and status from the gateway.
pub struct GatewayReader<T> {
    transport: T,
    device_id: String,
}

impl<T: GatewayTransport> GatewayReader<T> {
    /// Create a reader for the gateway known as `device_id`.
    pub fn new(transport: T, device_id: impl Into<String>) -> Self {
        Self {
            transport,
            device_id: device_id.into(),
        }
    }

    /// Identifier the gateway's records are keyed by.
    #[must_use]
    pub fn device_id(&self) -> &str {
        &self.device_id
    }

    /// Read the gateway's identity record.
    ///
    /// # Errors
    ///
    /// Returns [`BridgeError::Read`] when the `site_info` read fails and
    /// [`BridgeError::Validation`] when the resulting record is invalid.
    #[tracing::instrument(skip(self), fields(device_id = %self.device_id))]
    pub async fn read_site_info(&self) -> Result<Device, BridgeError> {
        let info: SiteInfo = self.fetch(SITE_INFO).await?;

        Device::builder()
            .id(self.device_id.as_str())
            .name(info.site_name)
            .kind(ENERGY_GATEWAY)
            .timezone(info.timezone)
            .build()
    }

    /// Read a complete status snapshot.
    ///
    /// # Errors
    ///
    /// Returns the [`ReadError`] of the first read that failed; later reads
    /// are not attempted.
    #[tracing::instrument(skip(self), fields(device_id = %self.device_id))]
    pub async fn read_status(&self) -> Result<StatusSnapshot, ReadError> {
        let master: SiteMaster = self.fetch(SITE_MASTER).await?;
        tracing::debug!(
            running = master.running,
            connected = master.connected_to_tesla,
            "site master state"
        );

        let meters: MeterAggregates = self.fetch(METER_AGGREGATES).await?;
        let updated = measurement_time(&meters.battery)?;

        let grid_state: GridState = self.fetch(GRID_STATUS).await?;
        let soe: StateOfEnergy = self.fetch(STATE_OF_ENERGY).await?;

        Ok(StatusSnapshot {
            updated,
            grid: GridStatus {
                imported: meters.site.energy_imported,
                exported: meters.site.energy_exported,
                current: meters.site.instant_power,
                active: grid_state.grid_status == GRID_CONNECTED,
            },
            battery: BatteryStatus {
                imported: meters.battery.energy_imported,
                exported: meters.battery.energy_exported,
                current: meters.battery.instant_power,
                level: soe.percentage,
            },
            solar: SolarStatus {
                exported: meters.solar.energy_exported,
                current: meters.solar.instant_power,
            },
            demand: DemandStatus {
                imported: meters.load.energy_imported,
                current: meters.load.instant_power,
            },
        })
    }

    async fn fetch<D: DeserializeOwned>(&self, path: &'static str) -> Result<D, ReadError> {
        tracing::trace!(path, "gateway read");
        let body = self.transport.get(path).await?;
        serde_json::from_str(&body).map_err(|source| ReadError::Parse {
            path: path.to_string(),
            source,
        })
    }
}

/// Battery meter communication time, or now when the gateway omits it.
fn measurement_time(meter: &Meter) -> Result<Timestamp, ReadError> {
    let Some(text) = meter.last_communication_time.as_deref() else {
        return Ok(now());
    };
    parse_rfc3339(text).map_err(|err| ReadError::Parse {
        path: METER_AGGREGATES.to_string(),
        source: serde::de::Error::custom(format!("last_communication_time: {err}")),
    })
}
