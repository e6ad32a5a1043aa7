//! # Sense Link Library
//!
//! Encode sensor readings into compact fixed-schema payloads for LoRaWAN uplink.
//!
//! This library provides the core functionality for packing heterogeneous,
//! possibly-invalid sensor readings into minimal-size radio payloads and
//! unpacking them symmetrically on the receiving side.

pub mod config;
pub mod error;
pub mod codec;
pub mod port;
pub mod sensors;
pub mod uplink;
pub mod telemetry;
