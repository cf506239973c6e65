//! No-std number formatting for the debug text wire format.
//!
//! These functions write directly to byte buffers without heap allocation.

/// Write a u8 as 8 binary digits, most significant bit first.
///
/// Returns the number of bytes written (always 8).
///
/// # Panics
///
/// Panics if `buf.len() < 8`.
#[inline]
pub fn write_binary_u8(buf: &mut [u8], value: u8) -> usize {
    debug_assert!(buf.len() >= 8, "buffer too small for binary u8");
    for (i, slot) in buf[..8].iter_mut().enumerate() {
        *slot = if value & (0x80 >> i) != 0 { b'1' } else { b'0' };
    }
    8
}

/// Write `value` in decimal without leading zeros, returning its width.
///
/// `buf` needs room for three digits.
#[inline]
pub fn write_u8(buf: &mut [u8], value: u8) -> usize {
    debug_assert!(buf.len() >= 3, "buffer too small for u8");

    let digits = [value / 100, value / 10 % 10, value % 10];
    let skip = match value {
        100..=255 => 0,
        10..=99 => 1,
        _ => 2,
    };
    let width = digits.len() - skip;
    for (slot, digit) in buf.iter_mut().zip(&digits[skip..]) {
        *slot = b'0' + digit;
    }
    width
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_binary_u8() {
        let mut buf = [0u8; 8];

        write_binary_u8(&mut buf, 0x00);
        assert_eq!(&buf, b"00000000");

        write_binary_u8(&mut buf, 0xFF);
        assert_eq!(&buf, b"11111111");

        write_binary_u8(&mut buf, 0b0010_0001);
        assert_eq!(&buf, b"00100001");
    }

    #[test]
    fn test_write_u8() {
        let mut buf = [0u8; 3];

        let len = write_u8(&mut buf, 0);
        assert_eq!(&buf[..len], b"0");

        let len = write_u8(&mut buf, 7);
        assert_eq!(&buf[..len], b"7");

        let len = write_u8(&mut buf, 128);
        assert_eq!(&buf[..len], b"128");

        let len = write_u8(&mut buf, 255);
        assert_eq!(&buf[..len], b"255");

        let len = write_u8(&mut buf, 40);
        assert_eq!(&buf[..len], b"40");
    }
}
