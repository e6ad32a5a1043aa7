//! # Uplink Module
//!
//! Transmission boundary for encoded payload frames.
//!
//! This module handles:
//! - The [`UplinkSink`] trait the node core transmits through
//! - A tracing-backed sink that logs frames as hex for bench runs
//!
//! The actual radio stack is an external collaborator; swapping it in means
//! implementing [`UplinkSink`] over its transmit call.

pub mod sink;

pub use sink::UplinkSink;

use async_trait::async_trait;
use std::io;
use tracing::{debug, info};

/// Uplink sink that logs frames instead of transmitting them
///
/// Stands in for the radio during bench runs and development: every frame is
/// logged as `port, length, hex bytes` at debug level.
#[derive(Debug, Default)]
pub struct LogUplink {
    frames_sent: u64,
}

impl LogUplink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Frames handed to this sink since creation
    pub fn frames_sent(&self) -> u64 {
        self.frames_sent
    }
}

#[async_trait]
impl UplinkSink for LogUplink {
    async fn send(&mut self, port: u8, payload: &[u8]) -> io::Result<()> {
        self.frames_sent += 1;
        debug!(
            "Uplink frame #{} on port {}: {} bytes {:02X?}",
            self.frames_sent,
            port,
            payload.len(),
            payload
        );

        if self.frames_sent == 1 {
            info!("First uplink frame sent on port {}", port);
        }

        Ok(())
    }
}
