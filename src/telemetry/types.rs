//! Telemetry record types serialized to JSONL

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::sensors::SensorData;

/// One telemetry record: the encoded frame plus the readings behind it
#[derive(Debug, Clone, Serialize)]
pub struct TelemetryRecord {
    /// Capture time, UTC
    pub timestamp: DateTime<Utc>,

    /// Uplink port the frame was encoded for
    pub port: u8,

    /// Encoded payload bytes as uppercase hex
    pub payload_hex: String,

    /// The readings that produced the frame, with per-field validity
    pub readings: SensorData,
}

impl TelemetryRecord {
    /// Build a record for one uplink frame, stamped with the current time
    pub fn new(port: u8, payload: &[u8], readings: SensorData) -> Self {
        Self {
            timestamp: Utc::now(),
            port,
            payload_hex: to_hex(payload),
            readings,
        }
    }
}

fn to_hex(bytes: &[u8]) -> String {
    use std::fmt::Write;

    let mut hex = String::with_capacity(bytes.len() * 2);
    for byte in bytes {
        let _ = write!(hex, "{:02X}", byte);
    }
    hex
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_hex() {
        assert_eq!(to_hex(&[]), "");
        assert_eq!(to_hex(&[0x09, 0x29]), "0929");
        assert_eq!(to_hex(&[0x7F, 0x7F, 0xFF]), "7F7FFF");
    }

    #[test]
    fn test_record_serializes_to_json() {
        let record = TelemetryRecord::new(5, &[0x09, 0x29], SensorData::default());
        let json = serde_json::to_string(&record).unwrap();

        assert!(json.contains("\"port\":5"));
        assert!(json.contains("\"payload_hex\":\"0929\""));
        assert!(json.contains("\"battery_mv\""));
    }
}
