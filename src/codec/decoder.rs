//! # Payload Decoder
//!
//! Decodes fixed-schema payload bytes back into sensor values.
//!
//! One call consumes one sub-value: the schema's width of bytes is
//! reassembled big-endian, compared against the invalid sentinel for that
//! width/signedness, and only then interpreted as the requested output type.
//! Sentinel comparison happens on the raw word before any sign extension or
//! descaling, keeping it width-scoped.

use super::schema::{DecodedValue, SensorPortSchema, SensorValue, ValueKind, MAX_VALUE_WIDTH};
use super::sentinel::sentinel_word;

impl SensorPortSchema {
    /// Decode one sub-value from the buffer according to this schema
    ///
    /// Reads `n_bytes / n_values` bytes starting at `pos` and reassembles
    /// them as a big-endian integer. An exact match against the reserved
    /// sentinel yields `valid = false` with the zero of the requested kind;
    /// any other bit pattern is interpreted per the schema and `kind`.
    ///
    /// The schema's width is expected to match the requested output width;
    /// mismatches are a caller contract violation, not a runtime-detected
    /// error.
    ///
    /// # Arguments
    ///
    /// * `buffer` - Buffer that data will be decoded from
    /// * `pos` - Start decoding from this byte; used to skip earlier fields
    /// * `kind` - Output type to produce
    ///
    /// # Returns
    ///
    /// * `DecodedValue` - Decoded value, validity flag and bytes consumed
    ///
    /// # Panics
    ///
    /// Panics if `buffer` is shorter than `pos + n_bytes / n_values`.
    ///
    /// # Examples
    ///
    /// ```
    /// use sense_link::codec::{SensorValue, ValueKind, TEMPERATURE_SCHEMA};
    ///
    /// let payload = [0x09, 0x29];
    /// let decoded = TEMPERATURE_SCHEMA.decode(&payload, 0, ValueKind::Float);
    /// assert!(decoded.valid);
    /// assert_eq!(decoded.consumed, 2);
    /// assert_eq!(decoded.value, SensorValue::Float(23.45));
    /// ```
    pub fn decode(&self, buffer: &[u8], pos: usize, kind: ValueKind) -> DecodedValue {
        let width = self.value_width();

        // Reassemble big-endian, right-aligned in a 32-bit word
        let mut be = [0u8; MAX_VALUE_WIDTH];
        be[MAX_VALUE_WIDTH - width..].copy_from_slice(&buffer[pos..pos + width]);
        let word = u32::from_be_bytes(be);

        if word == sentinel_word(width, self.is_signed) {
            return DecodedValue {
                value: SensorValue::zero(kind),
                valid: false,
                consumed: width,
            };
        }

        let signed = sign_extend(word, width);

        let value = match kind {
            ValueKind::Float => {
                let raw = if self.is_signed {
                    signed as f32
                } else {
                    word as f32
                };
                SensorValue::Float(raw / self.scale_factor)
            }
            ValueKind::Int => SensorValue::Int(if self.is_signed { signed } else { word as i32 }),
            ValueKind::U8 => SensorValue::U8(word as u8),
            ValueKind::U16 => SensorValue::U16(word as u16),
            ValueKind::U32 => SensorValue::U32(word),
        };

        DecodedValue {
            value,
            valid: true,
            consumed: width,
        }
    }
}

/// Sign-extend a `width`-byte big-endian word to a full i32
fn sign_extend(word: u32, width: usize) -> i32 {
    let shift = (MAX_VALUE_WIDTH - width) as u32 * 8;
    ((word << shift) as i32) >> shift
}
