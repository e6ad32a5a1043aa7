//! # Uplink Port Module
//!
//! Port definitions and whole-payload assembly.
//!
//! An uplink port selects which sensor fields a frame carries. The wire
//! format has no tags: both ends derive layout purely from the port number,
//! walking the enabled fields in one fixed order (battery, temperature,
//! humidity, pressure, gas, location, current) with the widths given by the
//! per-quantity schemas in [`crate::codec`].
//!
//! Port table:
//!
//! | port | fields |
//! |------|--------|
//! | 1 | battery |
//! | 2 | temperature |
//! | 3 | battery, temperature |
//! | 4 | temperature, humidity |
//! | 5 | battery, temperature, humidity |
//! | 6 | temperature, humidity, pressure |
//! | 7 | battery, temperature, humidity, pressure |
//! | 8 | temperature, humidity, pressure, gas |
//! | 9 | battery, temperature, humidity, pressure, gas |
//! | 50 | location |
//! | 51 | battery, location |
//! | 52 | battery, temperature, humidity, pressure, gas, location |
//! | 60 | current |
//! | 61 | battery, current |

use bytes::BytesMut;

use crate::codec::{
    SensorValue, ValueKind, AIR_PRESSURE_SCHEMA, BATTERY_VOLTAGE_SCHEMA, CURRENT_SENSOR_SCHEMA,
    GAS_RESISTANCE_SCHEMA, LOCATION_SCHEMA, RELATIVE_HUMIDITY_SCHEMA, TEMPERATURE_SCHEMA,
};
use crate::error::{Result, SenseLinkError};
use crate::sensors::{FloatReading, SensorData, UintReading};

/// Maximum uplink payload length in bytes (LoRaWAN application payload
/// capacity at the targeted data rates)
pub const MAX_PAYLOAD_LEN: usize = 222;

/// Fixed-capacity uplink payload buffer with a running write offset
///
/// Created once per transmission event; the port encoder fills it field by
/// field and [`Payload::as_bytes`] exposes exactly the written prefix.
#[derive(Debug)]
pub struct Payload {
    buf: BytesMut,
    len: usize,
}

impl Payload {
    /// Create an empty payload with full uplink capacity
    pub fn new() -> Self {
        Self {
            buf: BytesMut::zeroed(MAX_PAYLOAD_LEN),
            len: 0,
        }
    }

    /// The encoded bytes written so far
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf[..self.len]
    }

    /// Number of encoded bytes
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether no field has been encoded yet
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Discard the current contents for reuse on the next frame
    pub fn clear(&mut self) {
        self.len = 0;
    }
}

impl Default for Payload {
    fn default() -> Self {
        Self::new()
    }
}

/// Which sensor fields one uplink port carries
///
/// Immutable, defined once in the port table below and shared by encoder
/// and decoder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PortSchema {
    /// LoRaWAN-style application port number
    pub port_number: u8,
    pub send_battery_voltage: bool,
    pub send_temperature: bool,
    pub send_relative_humidity: bool,
    pub send_air_pressure: bool,
    pub send_gas_resistance: bool,
    pub send_location: bool,
    pub send_current_sensor: bool,
}

impl PortSchema {
    const fn new(port_number: u8) -> Self {
        Self {
            port_number,
            send_battery_voltage: false,
            send_temperature: false,
            send_relative_humidity: false,
            send_air_pressure: false,
            send_gas_resistance: false,
            send_location: false,
            send_current_sensor: false,
        }
    }

    const fn with_battery(mut self) -> Self {
        self.send_battery_voltage = true;
        self
    }

    const fn with_temperature(mut self) -> Self {
        self.send_temperature = true;
        self
    }

    const fn with_humidity(mut self) -> Self {
        self.send_relative_humidity = true;
        self
    }

    const fn with_pressure(mut self) -> Self {
        self.send_air_pressure = true;
        self
    }

    const fn with_gas(mut self) -> Self {
        self.send_gas_resistance = true;
        self
    }

    const fn with_location(mut self) -> Self {
        self.send_location = true;
        self
    }

    const fn with_current(mut self) -> Self {
        self.send_current_sensor = true;
        self
    }

    /// Total payload bytes this port's enabled fields occupy
    pub fn payload_length(&self) -> usize {
        let mut len = 0;

        if self.send_battery_voltage {
            len += BATTERY_VOLTAGE_SCHEMA.n_bytes as usize;
        }
        if self.send_temperature {
            len += TEMPERATURE_SCHEMA.n_bytes as usize;
        }
        if self.send_relative_humidity {
            len += RELATIVE_HUMIDITY_SCHEMA.n_bytes as usize;
        }
        if self.send_air_pressure {
            len += AIR_PRESSURE_SCHEMA.n_bytes as usize;
        }
        if self.send_gas_resistance {
            len += GAS_RESISTANCE_SCHEMA.n_bytes as usize;
        }
        if self.send_location {
            len += LOCATION_SCHEMA.n_bytes as usize;
        }
        if self.send_current_sensor {
            len += CURRENT_SENSOR_SCHEMA.n_bytes as usize;
        }

        len
    }

    /// Encode one full set of readings into `payload`
    ///
    /// Walks the enabled fields in the fixed wire order, invoking the codec
    /// once per sub-value. The payload is cleared first; on success its
    /// contents are exactly this frame.
    ///
    /// # Arguments
    ///
    /// * `data` - Readings to encode; disabled fields are ignored
    /// * `payload` - Destination buffer, reused across frames
    ///
    /// # Returns
    ///
    /// * `Result<usize>` - Total bytes encoded
    ///
    /// # Errors
    ///
    /// Returns an error if the port's fields would exceed the payload
    /// capacity.
    pub fn encode_sensor_data(&self, data: &SensorData, payload: &mut Payload) -> Result<usize> {
        let needed = self.payload_length();
        if needed > MAX_PAYLOAD_LEN {
            return Err(SenseLinkError::Codec(format!(
                "port {} payload length {} exceeds capacity {}",
                self.port_number, needed, MAX_PAYLOAD_LEN
            )));
        }

        payload.clear();
        let buf = &mut payload.buf[..];
        let mut pos = 0;

        if self.send_battery_voltage {
            pos += BATTERY_VOLTAGE_SCHEMA.encode(
                SensorValue::Float(data.battery_mv.value),
                data.battery_mv.valid,
                buf,
                pos,
            );
        }

        if self.send_temperature {
            pos += TEMPERATURE_SCHEMA.encode(
                SensorValue::Float(data.temperature.value),
                data.temperature.valid,
                buf,
                pos,
            );
        }

        if self.send_relative_humidity {
            pos += RELATIVE_HUMIDITY_SCHEMA.encode(
                SensorValue::Float(data.humidity.value),
                data.humidity.valid,
                buf,
                pos,
            );
        }

        if self.send_air_pressure {
            pos += AIR_PRESSURE_SCHEMA.encode(
                SensorValue::U32(data.pressure.value),
                data.pressure.valid,
                buf,
                pos,
            );
        }

        if self.send_gas_resistance {
            pos += GAS_RESISTANCE_SCHEMA.encode(
                SensorValue::U32(data.gas_resistance.value),
                data.gas_resistance.valid,
                buf,
                pos,
            );
        }

        if self.send_location {
            pos += LOCATION_SCHEMA.encode(
                SensorValue::Float(data.latitude.value),
                data.latitude.valid,
                buf,
                pos,
            );
            pos += LOCATION_SCHEMA.encode(
                SensorValue::Float(data.longitude.value),
                data.longitude.valid,
                buf,
                pos,
            );
        }

        if self.send_current_sensor {
            pos += CURRENT_SENSOR_SCHEMA.encode(
                SensorValue::Float(data.current_amps.value),
                data.current_amps.valid,
                buf,
                pos,
            );
            pos += CURRENT_SENSOR_SCHEMA.encode(
                SensorValue::Float(data.current_adc.value),
                data.current_adc.valid,
                buf,
                pos,
            );
        }

        payload.len = pos;
        Ok(pos)
    }

    /// Decode a received payload back into readings
    ///
    /// Walks the same fixed field order used at encode time. Fields the port
    /// does not carry are left at their invalid defaults.
    ///
    /// # Arguments
    ///
    /// * `buffer` - Received payload bytes
    ///
    /// # Returns
    ///
    /// * `Result<SensorData>` - Decoded readings with per-field validity
    ///
    /// # Errors
    ///
    /// Returns an error if the buffer is shorter than this port's payload
    /// length.
    pub fn decode_payload(&self, buffer: &[u8]) -> Result<SensorData> {
        let needed = self.payload_length();
        if buffer.len() < needed {
            return Err(SenseLinkError::Codec(format!(
                "port {} expects {} payload bytes, got {}",
                self.port_number,
                needed,
                buffer.len()
            )));
        }

        let mut data = SensorData::default();
        let mut pos = 0;

        if self.send_battery_voltage {
            let d = BATTERY_VOLTAGE_SCHEMA.decode(buffer, pos, ValueKind::Float);
            data.battery_mv = FloatReading {
                value: d.value.as_f32(),
                valid: d.valid,
            };
            pos += d.consumed;
        }

        if self.send_temperature {
            let d = TEMPERATURE_SCHEMA.decode(buffer, pos, ValueKind::Float);
            data.temperature = FloatReading {
                value: d.value.as_f32(),
                valid: d.valid,
            };
            pos += d.consumed;
        }

        if self.send_relative_humidity {
            let d = RELATIVE_HUMIDITY_SCHEMA.decode(buffer, pos, ValueKind::Float);
            data.humidity = FloatReading {
                value: d.value.as_f32(),
                valid: d.valid,
            };
            pos += d.consumed;
        }

        if self.send_air_pressure {
            let d = AIR_PRESSURE_SCHEMA.decode(buffer, pos, ValueKind::U32);
            data.pressure = UintReading {
                value: d.value.as_u32(),
                valid: d.valid,
            };
            pos += d.consumed;
        }

        if self.send_gas_resistance {
            let d = GAS_RESISTANCE_SCHEMA.decode(buffer, pos, ValueKind::U32);
            data.gas_resistance = UintReading {
                value: d.value.as_u32(),
                valid: d.valid,
            };
            pos += d.consumed;
        }

        if self.send_location {
            let lat = LOCATION_SCHEMA.decode(buffer, pos, ValueKind::Float);
            data.latitude = FloatReading {
                value: lat.value.as_f32(),
                valid: lat.valid,
            };
            pos += lat.consumed;

            let lng = LOCATION_SCHEMA.decode(buffer, pos, ValueKind::Float);
            data.longitude = FloatReading {
                value: lng.value.as_f32(),
                valid: lng.valid,
            };
            pos += lng.consumed;
        }

        if self.send_current_sensor {
            let amps = CURRENT_SENSOR_SCHEMA.decode(buffer, pos, ValueKind::Float);
            data.current_amps = FloatReading {
                value: amps.value.as_f32(),
                valid: amps.valid,
            };
            pos += amps.consumed;

            let adc = CURRENT_SENSOR_SCHEMA.decode(buffer, pos, ValueKind::Float);
            data.current_adc = FloatReading {
                value: adc.value.as_f32(),
                valid: adc.valid,
            };
            pos += adc.consumed;
        }

        debug_assert_eq!(pos, needed);
        Ok(data)
    }
}

///////////////////////////////////////////////////////////////////////////////

// PORT DEFINITIONS: see the module docs for the table.

pub const PORT1: PortSchema = PortSchema::new(1).with_battery();
pub const PORT2: PortSchema = PortSchema::new(2).with_temperature();
pub const PORT3: PortSchema = PortSchema::new(3).with_battery().with_temperature();
pub const PORT4: PortSchema = PortSchema::new(4).with_temperature().with_humidity();
pub const PORT5: PortSchema = PortSchema::new(5)
    .with_battery()
    .with_temperature()
    .with_humidity();
pub const PORT6: PortSchema = PortSchema::new(6)
    .with_temperature()
    .with_humidity()
    .with_pressure();
pub const PORT7: PortSchema = PortSchema::new(7)
    .with_battery()
    .with_temperature()
    .with_humidity()
    .with_pressure();
pub const PORT8: PortSchema = PortSchema::new(8)
    .with_temperature()
    .with_humidity()
    .with_pressure()
    .with_gas();
pub const PORT9: PortSchema = PortSchema::new(9)
    .with_battery()
    .with_temperature()
    .with_humidity()
    .with_pressure()
    .with_gas();
pub const PORT50: PortSchema = PortSchema::new(50).with_location();
pub const PORT51: PortSchema = PortSchema::new(51).with_battery().with_location();
pub const PORT52: PortSchema = PortSchema::new(52)
    .with_battery()
    .with_temperature()
    .with_humidity()
    .with_pressure()
    .with_gas()
    .with_location();
pub const PORT60: PortSchema = PortSchema::new(60).with_current();
pub const PORT61: PortSchema = PortSchema::new(61).with_battery().with_current();

/// Every defined uplink port
pub const PORT_LIST: &[&PortSchema] = &[
    &PORT1, &PORT2, &PORT3, &PORT4, &PORT5, &PORT6, &PORT7, &PORT8, &PORT9, &PORT50, &PORT51,
    &PORT52, &PORT60, &PORT61,
];

/// Look up a port definition by its port number
pub fn find_port(port_number: u8) -> Option<&'static PortSchema> {
    PORT_LIST
        .iter()
        .copied()
        .find(|p| p.port_number == port_number)
}
