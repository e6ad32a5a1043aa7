//! # Payload Encoder
//!
//! Encodes sensor values into fixed-schema payload bytes.
//!
//! One call packs one sub-value: the value is scaled to its fixed-point
//! integer form, truncated to the schema's sub-value width and written
//! big-endian at the caller's offset. Invalid readings are replaced by the
//! reserved sentinel for that width/signedness so the decoder can tell
//! "sensor failed" apart from any real reading.

use super::schema::{SensorPortSchema, SensorValue, MAX_VALUE_WIDTH};
use super::sentinel::sentinel_word;

impl SensorPortSchema {
    /// Encode one sub-value into the payload according to this schema
    ///
    /// Writes `n_bytes / n_values` big-endian bytes starting at `pos`. Bytes
    /// before `pos` are never touched, so successive fields can be
    /// concatenated by advancing the offset with the returned length.
    ///
    /// If `valid` is false the supplied value is ignored entirely and the
    /// reserved invalid sentinel for this width/signedness is written
    /// instead.
    ///
    /// # Arguments
    ///
    /// * `value` - Sensor value to encode
    /// * `valid` - Validity of the given sensor value
    /// * `payload` - Payload buffer for data to be written into
    /// * `pos` - Write offset; used to avoid overwriting earlier fields
    ///
    /// # Returns
    ///
    /// * `usize` - Number of bytes written (`n_bytes / n_values`)
    ///
    /// # Panics
    ///
    /// Panics if `payload` is shorter than `pos + n_bytes / n_values`.
    /// Buffer sizing is the caller's contract; the fixed schema tables and
    /// bounded payload lengths prevent this by construction.
    ///
    /// # Examples
    ///
    /// ```
    /// use sense_link::codec::{SensorValue, TEMPERATURE_SCHEMA};
    ///
    /// let mut payload = [0u8; 8];
    /// let written = TEMPERATURE_SCHEMA.encode(
    ///     SensorValue::Float(23.45),
    ///     true,
    ///     &mut payload,
    ///     0,
    /// );
    /// assert_eq!(written, 2);
    /// assert_eq!(&payload[..2], &[0x09, 0x29]);
    /// ```
    pub fn encode(
        &self,
        value: SensorValue,
        valid: bool,
        payload: &mut [u8],
        pos: usize,
    ) -> usize {
        let width = self.value_width();

        let raw = if valid {
            self.raw_word(value)
        } else {
            sentinel_word(width, self.is_signed)
        };

        // Big-endian, truncated to the low-order `width` bytes
        let be = raw.to_be_bytes();
        payload[pos..pos + width].copy_from_slice(&be[MAX_VALUE_WIDTH - width..]);

        width
    }

    /// Fixed-point integer form of a value, as a 32-bit two's-complement word
    ///
    /// Floats are multiplied by the scale factor in f64 and rounded to
    /// nearest with ties to even, then saturated into the i32 (signed
    /// schemas) or u32 (unsigned schemas) range. The widening matters for
    /// non-integer scale factors like the humidity 255/100: multiplying in
    /// f32 manufactures exact .5 ties out of representation noise (50% would
    /// scale to 127.5 and round up), while the f64 product stays on the
    /// correct side of the midpoint. Integer variants pass through unchanged.
    fn raw_word(&self, value: SensorValue) -> u32 {
        match value {
            SensorValue::Float(v) => {
                let scaled = (v as f64 * self.scale_factor as f64).round_ties_even();
                if self.is_signed {
                    scaled as i32 as u32
                } else {
                    scaled as u32
                }
            }
            SensorValue::Int(v) => v as u32,
            SensorValue::U8(v) => v as u32,
            SensorValue::U16(v) => v as u32,
            SensorValue::U32(v) => v,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::super::schema::*;
    use super::super::sentinel::sentinel_word;

    #[test]
    fn test_encode_temperature() {
        // 23.45 degrees C at 2 decimal places -> raw 2345
        let mut payload = [0u8; 4];
        let written = TEMPERATURE_SCHEMA.encode(SensorValue::Float(23.45), true, &mut payload, 0);

        assert_eq!(written, 2);
        assert_eq!(&payload[..2], &[0x09, 0x29]);
    }

    #[test]
    fn test_encode_negative_temperature() {
        // -12.34 degrees C -> raw -1234 -> two's complement low bytes
        let mut payload = [0u8; 4];
        TEMPERATURE_SCHEMA.encode(SensorValue::Float(-12.34), true, &mut payload, 0);

        assert_eq!(&payload[..2], &[0xFB, 0x2E]);
    }

    #[test]
    fn test_encode_invalid_writes_sentinel() {
        let mut payload = [0u8; 4];
        TEMPERATURE_SCHEMA.encode(SensorValue::Float(23.45), false, &mut payload, 0);

        assert_eq!(&payload[..2], &[0x7F, 0x7F]);
    }

    #[test]
    fn test_encode_invalid_ignores_value() {
        // Whatever value is supplied, invalid readings produce the sentinel
        let values = [
            SensorValue::Float(0.0),
            SensorValue::Float(9999.0),
            SensorValue::Int(-1),
            SensorValue::U32(u32::MAX),
        ];

        for value in values {
            let mut payload = [0u8; 4];
            AIR_PRESSURE_SCHEMA.encode(value, false, &mut payload, 0);
            assert_eq!(&payload[..4], &[0xFF, 0xFF, 0xFF, 0xFF]);
        }
    }

    #[test]
    fn test_encode_humidity_midpoint() {
        // 50% scaled to a byte lands on 0x7F, which is NOT a sentinel at
        // this width/signedness (1-byte unsigned uses 0xFF)
        let mut payload = [0u8; 1];
        RELATIVE_HUMIDITY_SCHEMA.encode(SensorValue::Float(50.0), true, &mut payload, 0);

        assert_eq!(payload[0], 0x7F);
    }

    #[test]
    fn test_encode_humidity_full_scale_collides_with_sentinel() {
        // 100% scales to exactly 0xFF, the 1-byte unsigned sentinel. The
        // wire format inherits this boundary collision; a full-scale reading
        // arrives as "invalid" on the receiving side.
        let mut payload = [0u8; 1];
        RELATIVE_HUMIDITY_SCHEMA.encode(SensorValue::Float(100.0), true, &mut payload, 0);

        assert_eq!(payload[0], 0xFF);
    }

    #[test]
    fn test_encode_temperature_full_scale_collides_with_sentinel() {
        // 327.35 degrees C scales to 0x7F7F, the 2-byte signed sentinel
        let mut payload = [0u8; 2];
        TEMPERATURE_SCHEMA.encode(SensorValue::Float(327.35), true, &mut payload, 0);

        assert_eq!(&payload[..2], &[0x7F, 0x7F]);
    }

    #[test]
    fn test_encode_pressure_u32() {
        let mut payload = [0u8; 4];
        let written = AIR_PRESSURE_SCHEMA.encode(SensorValue::U32(101_325), true, &mut payload, 0);

        assert_eq!(written, 4);
        assert_eq!(&payload[..4], &[0x00, 0x01, 0x8B, 0xCD]);
    }

    #[test]
    fn test_encode_three_byte_current() {
        // 1.5 A at 2 decimal places -> raw 150 in 3 bytes
        let mut payload = [0u8; 3];
        let written = CURRENT_SENSOR_SCHEMA.encode(SensorValue::Float(1.5), true, &mut payload, 0);

        assert_eq!(written, 3);
        assert_eq!(&payload[..3], &[0x00, 0x00, 0x96]);
    }

    #[test]
    fn test_encode_negative_current_three_bytes() {
        // -1.0 A -> raw -100 -> low 3 bytes of two's complement
        let mut payload = [0u8; 3];
        CURRENT_SENSOR_SCHEMA.encode(SensorValue::Float(-1.0), true, &mut payload, 0);

        assert_eq!(&payload[..3], &[0xFF, 0xFF, 0x9C]);
    }

    #[test]
    fn test_encode_width_determinism() {
        // Bytes written depend only on the schema, never on value or validity
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
            let expected = schema.value_width();
            let mut payload = [0u8; 8];

            assert_eq!(
                schema.encode(SensorValue::Float(1.0), true, &mut payload, 0),
                expected
            );
            assert_eq!(
                schema.encode(SensorValue::Float(-42.5), true, &mut payload, 0),
                expected
            );
            assert_eq!(
                schema.encode(SensorValue::U32(0), false, &mut payload, 0),
                expected
            );
        }
    }

    #[test]
    fn test_encode_does_not_disturb_earlier_bytes() {
        let mut payload = [0xAAu8; 8];
        TEMPERATURE_SCHEMA.encode(SensorValue::Float(5.0), true, &mut payload, 4);

        assert_eq!(&payload[..4], &[0xAA, 0xAA, 0xAA, 0xAA]);
        assert_eq!(&payload[6..], &[0xAA, 0xAA]);
    }

    #[test]
    fn test_encode_concatenated_fields_match_independent_encodes() {
        // Field A at offset 0 then field B at offset len(A) must be
        // bit-identical to encoding each on its own
        let mut combined = [0u8; 3];
        let a = TEMPERATURE_SCHEMA.encode(SensorValue::Float(23.45), true, &mut combined, 0);
        RELATIVE_HUMIDITY_SCHEMA.encode(SensorValue::Float(50.0), true, &mut combined, a);

        let mut alone_a = [0u8; 2];
        TEMPERATURE_SCHEMA.encode(SensorValue::Float(23.45), true, &mut alone_a, 0);
        let mut alone_b = [0u8; 1];
        RELATIVE_HUMIDITY_SCHEMA.encode(SensorValue::Float(50.0), true, &mut alone_b, 0);

        assert_eq!(&combined[..2], &alone_a[..]);
        assert_eq!(&combined[2..3], &alone_b[..]);
    }

    #[test]
    fn test_encode_sentinel_exclusivity_in_range() {
        // Sampled in-range temperatures never land on the sentinel word.
        // The boundary collision at full scale (327.35) is pinned down by
        // its own test above.
        let mut t = -40.0f32;
        while t <= 85.0 {
            let mut payload = [0u8; 2];
            TEMPERATURE_SCHEMA.encode(SensorValue::Float(t), true, &mut payload, 0);
            let word = u16::from_be_bytes([payload[0], payload[1]]) as u32;
            assert_ne!(word, sentinel_word(2, true), "collision at {}", t);
            t += 0.05;
        }

        // Humidity below full scale stays off the 1-byte unsigned sentinel
        let mut h = 0.0f32;
        while h <= 99.5 {
            let mut payload = [0u8; 1];
            RELATIVE_HUMIDITY_SCHEMA.encode(SensorValue::Float(h), true, &mut payload, 0);
            assert_ne!(payload[0] as u32, sentinel_word(1, false), "collision at {}", h);
            h += 0.25;
        }
    }
}
