//! Status snapshot — the latest measurements read from the gateway.
//!
//! A snapshot replaces the previous one wholesale on every successful poll;
//! no history is kept.

use serde::{Deserialize, Serialize};

use crate::time::Timestamp;

/// Point-in-time measurements for one device.
///
/// Energy totals are in watt-hours and `current` values are instantaneous
/// power in watts, as reported by the gateway.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatusSnapshot {
    /// Time of the most recent underlying measurement.
    pub updated: Timestamp,
    pub grid: GridStatus,
    pub battery: BatteryStatus,
    pub solar: SolarStatus,
    pub demand: DemandStatus,
}

/// Utility grid meter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GridStatus {
    pub imported: f64,
    pub exported: f64,
    pub current: f64,
    /// Whether the site is connected to the grid.
    pub active: bool,
}

/// Battery meter and state of charge.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatteryStatus {
    pub imported: f64,
    pub exported: f64,
    pub current: f64,
    /// State of charge, in percent.
    pub level: f64,
}

/// Solar production meter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SolarStatus {
    pub exported: f64,
    pub current: f64,
}

/// Household consumption meter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DemandStatus {
    pub imported: f64,
    pub current: f64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time::parse_rfc3339;

    fn snapshot() -> StatusSnapshot {
        StatusSnapshot {
            updated: parse_rfc3339("2024-03-01T10:15:00Z").unwrap(),
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

    #[test]
    fn should_serialize_nested_sub_records() {
        let json = serde_json::to_value(snapshot()).unwrap();
        assert_eq!(json["updated"], "2024-03-01T10:15:00Z");
        assert_eq!(json["grid"]["active"], true);
        assert_eq!(json["battery"]["level"], 87.5);
        assert_eq!(json["solar"]["current"], 2100.0);
        assert!(json["solar"].get("imported").is_none());
        assert!(json["demand"].get("exported").is_none());
    }

    #[test]
    fn should_compare_equal_when_all_fields_match() {
        assert_eq!(snapshot(), snapshot());

        let mut other = snapshot();
        other.battery.level = 10.0;
        assert_ne!(snapshot(), other);
    }
}
