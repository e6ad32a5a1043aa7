//! # Sense Link
//!
//! Encode sensor readings into compact fixed-schema payloads for LoRaWAN uplink.
//!
//! This application samples a sensor source on a fixed interval, packs the
//! readings into the payload layout of the configured uplink port and hands
//! the frame to the uplink sink.

use anyhow::{Context, Result};
use std::path::Path;
use tokio::time::{interval, Duration};
use tracing::{debug, info, warn};

use sense_link::config::Config;
use sense_link::port::{find_port, Payload};
use sense_link::sensors::{SensorSource, SimulatedSensors};
use sense_link::telemetry::{TelemetryLogger, TelemetryRecord};
use sense_link::uplink::{LogUplink, UplinkSink};

/// Configuration file used when no path is given on the command line
const DEFAULT_CONFIG_PATH: &str = "config/default.toml";

/// Number of frames between status log messages
const LOG_INTERVAL_FRAMES: u64 = 10;

/// Main entry point for the Sense Link node
///
/// Initializes the application and runs the uplink loop that periodically
/// encodes one frame of sensor readings for the configured port.
///
/// # Control Flow
///
/// 1. **Initialization**
///    - Set up logging with tracing subscriber
///    - Load configuration (first CLI argument, or `config/default.toml`)
///    - Resolve the configured uplink port schema
///    - Open the telemetry JSONL logger when enabled
///
/// 2. **Main Loop**
///    - Sample the sensor source once per uplink interval
///    - Encode the readings into the port's fixed payload layout
///    - Hand the frame to the uplink sink and append a telemetry record
///    - Log status every few frames
///
/// 3. **Graceful Shutdown**
///    - Ctrl+C stops the loop and logs the total frame count
///
/// # Errors
///
/// Returns error if:
/// - The configuration file exists but cannot be parsed or validated
/// - The configured port number is not in the port table
/// - The telemetry log directory cannot be created
#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    info!("Sense Link v{} starting...", env!("CARGO_PKG_VERSION"));

    let config_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| DEFAULT_CONFIG_PATH.to_string());
    let config = if Path::new(&config_path).exists() {
        Config::load(&config_path).with_context(|| format!("Failed to load {}", config_path))?
    } else {
        warn!("Config file {} not found, using defaults", config_path);
        Config::default()
    };

    let port = find_port(config.uplink.port_number)
        .context("Configured port_number is not a defined uplink port")?;
    info!(
        "Uplink port {}: {} payload bytes every {}s",
        port.port_number,
        port.payload_length(),
        config.uplink.interval_s
    );

    // The simulated source stands in for the hardware acquisition stack
    let mut sensors = SimulatedSensors::new(port);
    let mut uplink = LogUplink::new();

    let mut telemetry = if config.telemetry.enabled {
        Some(TelemetryLogger::new(
            &config.telemetry.log_dir,
            config.telemetry.max_records_per_file,
            config.telemetry.max_files_to_keep,
        )?)
    } else {
        None
    };

    let mut payload = Payload::new();
    let mut frame_interval = interval(Duration::from_secs(config.uplink.interval_s));

    info!("Starting uplink loop");
    info!("Press Ctrl+C to exit");

    let mut frame_count: u64 = 0;

    // Main uplink loop
    loop {
        tokio::select! {
            // Encode and send one frame per interval
            _ = frame_interval.tick() => {
                let data = sensors.sample();
                let len = port.encode_sensor_data(&data, &mut payload)?;

                if let Err(e) = uplink.send(port.port_number, payload.as_bytes()).await {
                    debug!("Failed to send frame: {}", e);
                    continue;
                }

                frame_count += 1;

                if let Some(logger) = telemetry.as_mut() {
                    let record =
                        TelemetryRecord::new(port.port_number, payload.as_bytes(), data);
                    if let Err(e) = logger.append(&record) {
                        warn!("Failed to append telemetry record: {}", e);
                    }
                }

                if frame_count % LOG_INTERVAL_FRAMES == 0 {
                    info!(
                        "Sent {} frames on port {} ({} bytes each)",
                        frame_count, port.port_number, len
                    );
                }
            }

            // Handle Ctrl+C for graceful shutdown
            _ = tokio::signal::ctrl_c() => {
                info!("Received Ctrl+C, shutting down...");
                info!("Total frames sent: {}", frame_count);
                break;
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_interval_constant() {
        // At the default 60s uplink interval this logs every 10 minutes
        assert_eq!(LOG_INTERVAL_FRAMES, 10);
    }

    #[test]
    fn test_default_config_path() {
        assert_eq!(DEFAULT_CONFIG_PATH, "config/default.toml");
    }
}
