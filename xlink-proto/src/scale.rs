//! Quantization between normalized values and wire bytes.
//!
//! - Joystick axis: `[-1.0, 1.0]` ↔ `0..=255` via `(v + 1.0) * 127.5`
//! - Trigger: `[0.0, 1.0]` ↔ `0..=255` via `v * 255.0`
//!
//! Encoding rounds to the nearest byte and clamps out-of-range input.

/// Scale factor between a joystick axis and its wire byte.
pub const AXIS_SCALE: f32 = 127.5;

/// Scale factor between a trigger and its wire byte.
pub const TRIGGER_SCALE: f32 = 255.0;

/// Quantize a joystick axis value to a wire byte.
#[inline]
#[must_use]
pub fn axis_to_byte(value: f32) -> u8 {
    let value = value.clamp(-1.0, 1.0);
    // `as u8` saturates, so 255.5 lands on 255
    ((value + 1.0) * AXIS_SCALE + 0.5) as u8
}

/// Decode a joystick wire byte to `[-1.0, 1.0]`.
#[inline]
#[must_use]
pub fn byte_to_axis(byte: u8) -> f32 {
    f32::from(byte) / AXIS_SCALE - 1.0
}

/// Quantize a trigger value to a wire byte.
#[inline]
#[must_use]
pub fn trigger_to_byte(value: f32) -> u8 {
    let value = value.clamp(0.0, 1.0);
    (value * TRIGGER_SCALE + 0.5) as u8
}

/// Decode a trigger wire byte to `[0.0, 1.0]`.
#[inline]
#[must_use]
pub fn byte_to_trigger(byte: u8) -> f32 {
    f32::from(byte) / TRIGGER_SCALE
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;

    #[test]
    fn test_axis_endpoints() {
        assert_eq!(axis_to_byte(-1.0), 0);
        assert_eq!(axis_to_byte(1.0), 255);
        assert_eq!(axis_to_byte(0.0), 128);
    }

    #[test]
    fn test_axis_clamps() {
        assert_eq!(axis_to_byte(-3.0), 0);
        assert_eq!(axis_to_byte(7.5), 255);
    }

    #[test]
    fn test_trigger_endpoints() {
        assert_eq!(trigger_to_byte(0.0), 0);
        assert_eq!(trigger_to_byte(1.0), 255);
        assert_eq!(trigger_to_byte(0.5), 128);
        assert_eq!(trigger_to_byte(-0.2), 0);
    }

    #[test]
    fn test_decode_within_quantization_step() {
        for i in 0..=200 {
            let v = i as f32 / 100.0 - 1.0;
            let back = byte_to_axis(axis_to_byte(v));
            assert!((back - v).abs() <= 1.0 / AXIS_SCALE, "axis {v} -> {back}");
        }
        for i in 0..=100 {
            let v = i as f32 / 100.0;
            let back = byte_to_trigger(trigger_to_byte(v));
            assert!((back - v).abs() <= 1.0 / TRIGGER_SCALE, "trigger {v} -> {back}");
        }
    }
}
