//! # Sensor Port Schema Types and Tables
//!
//! Core definitions for the fixed-schema sensor payload format.
//!
//! Every physical quantity has one immutable [`SensorPortSchema`] describing
//! how its readings are packed into payload bytes: total width, number of
//! sub-values sharing that width, fixed-point scale factor, and signedness.
//! The schema constants below are the single source of truth shared by the
//! encoder and decoder; the wire format carries no tags, so both sides must
//! agree on them.

/// Maximum width of a single packed sub-value in bytes
pub const MAX_VALUE_WIDTH: usize = 4;

/// Packing description for one physical quantity
///
/// `n_bytes` is split equally amongst `n_values` sub-values, each
/// `n_bytes / n_values` bytes wide (1-4 bytes). Fractional quantities are
/// carried as integers by multiplying with `scale_factor` on encode and
/// dividing by it on decode.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SensorPortSchema {
    /// Total length in payload, split equally amongst `n_values`
    pub n_bytes: u8,

    /// Number of sub-values sent for this quantity (e.g. 2 for lat + lng)
    pub n_values: u8,

    /// Fixed-point scale: multiply to encode, divide to decode; 1.0 = none
    pub scale_factor: f32,

    /// Whether the packed integer representation uses a signed range
    pub is_signed: bool,
}

impl SensorPortSchema {
    /// Bytes occupied by each sub-value (`n_bytes / n_values`)
    pub const fn value_width(&self) -> usize {
        (self.n_bytes / self.n_values) as usize
    }
}

/// One logical sensor value, closed over the numeric types the codec packs
///
/// A single enum replaces per-type entry points so the width/signedness
/// contract lives in one encode and one decode path.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SensorValue {
    /// 32-bit signed integer
    Int(i32),

    /// 32-bit float, mapped into an integer range via the schema scale factor
    Float(f32),

    /// 8-bit unsigned integer
    U8(u8),

    /// 16-bit unsigned integer
    U16(u16),

    /// 32-bit unsigned integer
    U32(u32),
}

/// Output type requested from [`SensorPortSchema::decode`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    Int,
    Float,
    U8,
    U16,
    U32,
}

impl SensorValue {
    /// The zero/default value of the given kind, used for invalid readings
    pub fn zero(kind: ValueKind) -> Self {
        match kind {
            ValueKind::Int => SensorValue::Int(0),
            ValueKind::Float => SensorValue::Float(0.0),
            ValueKind::U8 => SensorValue::U8(0),
            ValueKind::U16 => SensorValue::U16(0),
            ValueKind::U32 => SensorValue::U32(0),
        }
    }

    /// Value as `f32`, converting integer variants losslessly where possible
    pub fn as_f32(&self) -> f32 {
        match *self {
            SensorValue::Int(v) => v as f32,
            SensorValue::Float(v) => v,
            SensorValue::U8(v) => v as f32,
            SensorValue::U16(v) => v as f32,
            SensorValue::U32(v) => v as f32,
        }
    }

    /// Value as `u32`, truncating signed/float variants
    pub fn as_u32(&self) -> u32 {
        match *self {
            SensorValue::Int(v) => v as u32,
            SensorValue::Float(v) => v as u32,
            SensorValue::U8(v) => v as u32,
            SensorValue::U16(v) => v as u32,
            SensorValue::U32(v) => v,
        }
    }
}

/// Result of decoding one sub-value from a payload
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DecodedValue {
    /// Decoded value, or the zero of the requested kind when invalid
    pub value: SensorValue,

    /// False when the raw bytes matched the invalid sentinel
    pub valid: bool,

    /// Bytes consumed; equals the encode-side return for the same schema
    pub consumed: usize,
}

///////////////////////////////////////////////////////////////////////////////

// SCHEMA DEFINITIONS: one constant per physical quantity.

/// Timestamp, units: s
pub const TIMESTAMP_SCHEMA: SensorPortSchema = SensorPortSchema {
    n_bytes: 4,
    n_values: 1,
    scale_factor: 1.0,
    is_signed: false,
};

/// Battery voltage, units: mV
pub const BATTERY_VOLTAGE_SCHEMA: SensorPortSchema = SensorPortSchema {
    n_bytes: 2,
    n_values: 1,
    scale_factor: 1.0,
    is_signed: false,
};

/// Temperature, units: degrees C, 2 decimal places
pub const TEMPERATURE_SCHEMA: SensorPortSchema = SensorPortSchema {
    n_bytes: 2,
    n_values: 1,
    scale_factor: 100.0,
    is_signed: true,
};

/// Relative humidity, units: %; percentage (0-100) is scaled to a byte (0-255)
pub const RELATIVE_HUMIDITY_SCHEMA: SensorPortSchema = SensorPortSchema {
    n_bytes: 1,
    n_values: 1,
    scale_factor: 255.0 / 100.0,
    is_signed: false,
};

/// Air pressure, units: Pa
pub const AIR_PRESSURE_SCHEMA: SensorPortSchema = SensorPortSchema {
    n_bytes: 4,
    n_values: 1,
    scale_factor: 1.0,
    is_signed: false,
};

/// Gas resistance, unitless
pub const GAS_RESISTANCE_SCHEMA: SensorPortSchema = SensorPortSchema {
    n_bytes: 4,
    n_values: 1,
    scale_factor: 1.0,
    is_signed: false,
};

/// Location, units: degrees, 4 decimal places; split equally: 4 bytes
/// latitude, 4 bytes longitude
pub const LOCATION_SCHEMA: SensorPortSchema = SensorPortSchema {
    n_bytes: 8,
    n_values: 2,
    scale_factor: 10_000.0,
    is_signed: true,
};

/// Current sensor, units: A, 2 decimal places; second sub-value carries the
/// averaged raw ADC reading
pub const CURRENT_SENSOR_SCHEMA: SensorPortSchema = SensorPortSchema {
    n_bytes: 6,
    n_values: 2,
    scale_factor: 100.0,
    is_signed: true,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schema_widths_divide_evenly() {
        let schemas = [
            TIMESTAMP_SCHEMA,
            BATTERY_VOLTAGE_SCHEMA,
            TEMPERATURE_SCHEMA,
            RELATIVE_HUMIDITY_SCHEMA,
            AIR_PRESSURE_SCHEMA,
            GAS_RESISTANCE_SCHEMA,
            LOCATION_SCHEMA,
            CURRENT_SENSOR_SCHEMA,
        ];

        for schema in schemas {
            assert_eq!(
                schema.n_bytes % schema.n_values,
                0,
                "n_bytes {} not divisible by n_values {}",
                schema.n_bytes,
                schema.n_values
            );
            let width = schema.value_width();
            assert!(
                (1..=MAX_VALUE_WIDTH).contains(&width),
                "sub-value width {} outside supported range",
                width
            );
        }
    }

    #[test]
    fn test_value_width() {
        assert_eq!(TEMPERATURE_SCHEMA.value_width(), 2);
        assert_eq!(RELATIVE_HUMIDITY_SCHEMA.value_width(), 1);
        assert_eq!(LOCATION_SCHEMA.value_width(), 4);
        assert_eq!(CURRENT_SENSOR_SCHEMA.value_width(), 3);
    }

    #[test]
    fn test_humidity_scale_maps_full_range_to_a_byte() {
        // 0-100% must span the byte range once scaled
        let max = (100.0 * RELATIVE_HUMIDITY_SCHEMA.scale_factor).round();
        assert_eq!(max, 255.0);
    }

    #[test]
    fn test_zero_values() {
        assert_eq!(SensorValue::zero(ValueKind::Int), SensorValue::Int(0));
        assert_eq!(SensorValue::zero(ValueKind::Float), SensorValue::Float(0.0));
        assert_eq!(SensorValue::zero(ValueKind::U32), SensorValue::U32(0));
    }

    #[test]
    fn test_value_conversions() {
        assert_eq!(SensorValue::Int(-5).as_f32(), -5.0);
        assert_eq!(SensorValue::U16(1234).as_u32(), 1234);
        assert_eq!(SensorValue::Float(2.0).as_u32(), 2);
    }
}
