//! Shared test fixtures: a scriptable in-memory gateway.

use std::collections::{HashMap, VecDeque};
use std::future::Future;
use std::sync::{Arc, Mutex};

use tokio::time::Instant;

use wattbridge_domain::error::ReadError;
use wattbridge_domain::status::{
    BatteryStatus, DemandStatus, GridStatus, SolarStatus, StatusSnapshot,
};
use wattbridge_domain::time::parse_rfc3339;

use crate::gateway_reader::{
    GRID_STATUS, METER_AGGREGATES, SITE_INFO, SITE_MASTER, STATE_OF_ENERGY,
};
use crate::ports::GatewayTransport;

/// One scripted answer.
pub(crate) enum Reply {
    Body(String),
    Status(u16),
    Transport(&'static str),
}

/// Gateway that answers with realistic bodies unless a reply was scripted.
///
/// Scripted replies are consumed in order, one per call to their path.
#[derive(Default)]
pub(crate) struct FakeGateway {
    scripted: Mutex<HashMap<String, VecDeque<Reply>>>,
    calls: Mutex<Vec<(String, Instant)>>,
}

impl FakeGateway {
    pub(crate) fn healthy() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub(crate) fn script(&self, path: &str, reply: Reply) {
        self.scripted
            .lock()
            .unwrap()
            .entry(path.to_string())
            .or_default()
            .push_back(reply);
    }

    pub(crate) fn calls(&self) -> Vec<String> {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .map(|(path, _)| path.clone())
            .collect()
    }

    pub(crate) fn call_times(&self, path: &str) -> Vec<Instant> {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|(p, _)| p == path)
            .map(|(_, at)| *at)
            .collect()
    }

    fn answer(&self, path: &str) -> Result<String, ReadError> {
        self.calls
            .lock()
            .unwrap()
            .push((path.to_string(), Instant::now()));

        let scripted = self
            .scripted
            .lock()
            .unwrap()
            .get_mut(path)
            .and_then(VecDeque::pop_front);

        match scripted.unwrap_or_else(|| default_reply(path)) {
            Reply::Body(body) => Ok(body),
            Reply::Status(status) => Err(ReadError::Remote {
                path: path.to_string(),
                status,
            }),
            Reply::Transport(message) => Err(ReadError::Transport {
                path: path.to_string(),
                source: message.into(),
            }),
        }
    }
}

impl GatewayTransport for FakeGateway {
    fn get(&self, path: &str) -> impl Future<Output = Result<String, ReadError>> + Send {
        let result = self.answer(path);
        async { result }
    }
}

fn default_reply(path: &str) -> Reply {
    let body = match path {
        SITE_INFO => serde_json::json!({
            "site_name": "Home Energy Gateway",
            "timezone": "America/Los_Angeles",
            "nominal_system_energy_kWh": 13.5
        }),
        SITE_MASTER => serde_json::json!({
            "running": true,
            "uptime": "166594s,",
            "connected_to_tesla": true
        }),
        METER_AGGREGATES => serde_json::json!({
            "site": {
                "last_communication_time": "2024-03-01T10:15:00.123-08:00",
                "instant_power": -150.5,
                "energy_exported": 300.0,
                "energy_imported": 1200.0
            },
            "battery": {
                "last_communication_time": "2024-03-01T10:15:00.123-08:00",
                "instant_power": 20.0,
                "energy_exported": 640.0,
                "energy_imported": 800.0
            },
            "load": {
                "instant_power": 1969.5,
                "energy_exported": 0.0,
                "energy_imported": 4100.0
            },
            "solar": {
                "instant_power": 2100.0,
                "energy_exported": 5400.0,
                "energy_imported": 0.0
            }
        }),
        GRID_STATUS => serde_json::json!({
            "grid_status": "SystemGridConnected",
            "grid_services_active": false
        }),
        STATE_OF_ENERGY => serde_json::json!({ "percentage": 87.5 }),
        _ => return Reply::Status(404),
    };
    Reply::Body(body.to_string())
}

/// Snapshot the default replies fold into.
pub(crate) fn expected_snapshot() -> StatusSnapshot {
    StatusSnapshot {
        updated: parse_rfc3339("2024-03-01T18:15:00.123Z").unwrap(),
        grid: GridStatus {
            imported: 1200.0,
            exported: 300.0,
            current: -150.5,
            active: true,
        },
        battery: BatteryStatus {
            imported: 800.0,
            exported: 640.0,
            current: 20.0,
            level: 87.5,
        },
        solar: SolarStatus {
            exported: 5400.0,
            current: 2100.0,
        },
        demand: DemandStatus {
            imported: 4100.0,
            current: 1969.5,
        },
    }
}
