//! # Sensor Data Module
//!
//! Plain reading structures produced by acquisition and consumed by the
//! codec, plus the [`SensorSource`] seam behind which the actual hardware
//! lives.
//!
//! Readings can be invalid for a variety of reasons: the sensor errored
//! while taking a reading, the GPS has no fix yet, the device lacks the
//! sensor entirely. Validity travels with every value so the payload encoder
//! can substitute the invalid sentinel instead of a misleading zero.

use serde::Serialize;

use crate::port::PortSchema;

/// A floating point reading with its validity
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct FloatReading {
    pub value: f32,
    pub valid: bool,
}

/// An unsigned integer reading with its validity
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct UintReading {
    pub value: u32,
    pub valid: bool,
}

impl FloatReading {
    /// A reading that acquired successfully
    pub fn valid(value: f32) -> Self {
        Self { value, valid: true }
    }

    /// A reading that failed to acquire
    pub fn invalid() -> Self {
        Self::default()
    }
}

impl UintReading {
    /// A reading that acquired successfully
    pub fn valid(value: u32) -> Self {
        Self { value, valid: true }
    }

    /// A reading that failed to acquire
    pub fn invalid() -> Self {
        Self::default()
    }
}

/// One full set of sensor readings for an uplink frame
///
/// Latitude/longitude and amps/ADC are tracked with independent validity:
/// a payload can legitimately carry a valid latitude next to an invalid
/// longitude, and the decoder reports exactly that.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct SensorData {
    /// Battery voltage: mV
    pub battery_mv: FloatReading,

    /// Temperature: degrees C
    pub temperature: FloatReading,

    /// Relative humidity: %
    pub humidity: FloatReading,

    /// Air pressure: Pa
    pub pressure: UintReading,

    /// Gas resistance, unitless
    pub gas_resistance: UintReading,

    /// Location latitude: degrees
    pub latitude: FloatReading,

    /// Location longitude: degrees
    pub longitude: FloatReading,

    /// Current sensor: A
    pub current_amps: FloatReading,

    /// Current sensor averaged raw ADC reading
    pub current_adc: FloatReading,
}

/// Source of sensor readings
///
/// Hardware acquisition, sensor power management and board-level ADC setup
/// live behind this trait; the codec and uplink layers only ever see the
/// plain [`SensorData`] it returns.
pub trait SensorSource {
    /// Take one reading of every quantity this source provides
    fn sample(&mut self) -> SensorData;
}

/// Samples before the simulated GPS reports a fix
const GPS_WARMUP_SAMPLES: u64 = 5;

/// Deterministic waveform generator standing in for real sensors
///
/// Populates exactly the fields its port schema enables. Values follow slow
/// sine/cosine drifts so consecutive frames differ but runs are repeatable.
/// The simulated GPS leaves location invalid for the first few samples,
/// exercising the invalid-sentinel path end to end.
#[derive(Debug)]
pub struct SimulatedSensors {
    port: &'static PortSchema,
    tick: u64,
}

impl SimulatedSensors {
    /// Create a simulated source for the fields `port` enables
    pub fn new(port: &'static PortSchema) -> Self {
        Self { port, tick: 0 }
    }
}

impl SensorSource for SimulatedSensors {
    fn sample(&mut self) -> SensorData {
        let t = self.tick as f32;
        let mut data = SensorData::default();

        if self.port.send_battery_voltage {
            data.battery_mv = FloatReading::valid(3850.0 + 120.0 * (t / 40.0).sin());
        }

        if self.port.send_temperature {
            data.temperature = FloatReading::valid(21.5 + 4.5 * (t / 24.0).sin());
        }

        if self.port.send_relative_humidity {
            data.humidity = FloatReading::valid(48.0 + 15.0 * (t / 30.0).cos());
        }

        if self.port.send_air_pressure {
            data.pressure = UintReading::valid((101_325.0 + 220.0 * (t / 16.0).sin()) as u32);
        }

        if self.port.send_gas_resistance {
            data.gas_resistance = UintReading::valid((250_000.0 + 8_000.0 * (t / 20.0).cos()) as u32);
        }

        if self.port.send_location && self.tick >= GPS_WARMUP_SAMPLES {
            data.latitude = FloatReading::valid(-33.8688 + 0.0004 * (t / 50.0).sin());
            data.longitude = FloatReading::valid(151.2093 + 0.0004 * (t / 50.0).cos());
        }

        if self.port.send_current_sensor {
            data.current_amps = FloatReading::valid(1.8 + 0.6 * (t / 12.0).sin());
            data.current_adc = FloatReading::valid(512.0 + 40.0 * (t / 12.0).sin());
        }

        self.tick += 1;
        data
    }
}
