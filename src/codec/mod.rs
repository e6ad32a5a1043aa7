//! # Schema Codec Module
//!
//! Schema-driven encode/decode of sensor readings into compact payload bytes.
//!
//! This module handles:
//! - Width-dependent big-endian integer packing (1-4 bytes per sub-value)
//! - Float to fixed-point scaling via per-quantity scale factors
//! - Signed vs unsigned range handling with sign extension on decode
//! - Multi-value field splitting (e.g. latitude + longitude in one field)
//! - Sentinel-based invalid-reading encoding and detection
//!
//! The codec is stateless: both directions are plain functions of a schema,
//! a caller-owned buffer and an explicit cursor offset, so fields can be
//! concatenated into one radio payload in any externally agreed order.

pub mod schema;
pub mod encoder;
pub mod decoder;
pub mod sentinel;

pub use schema::{
    DecodedValue, SensorPortSchema, SensorValue, ValueKind, AIR_PRESSURE_SCHEMA,
    BATTERY_VOLTAGE_SCHEMA, CURRENT_SENSOR_SCHEMA, GAS_RESISTANCE_SCHEMA, LOCATION_SCHEMA,
    RELATIVE_HUMIDITY_SCHEMA, TEMPERATURE_SCHEMA, TIMESTAMP_SCHEMA,
};
