//! Packet encoding.
//!
//! A [`Packet`] pairs a [`Header`] with the [`RawState`] it is cut from. Only
//! the groups named by the header are written, in table order:
//!
//! ```text
//! +--------+-------+-------+-------+-------+--------+--------+--------+--------+
//! |   0    |   1   |   2   |   3   |   4   |   5    |   6    |   7    |   8    |
//! +--------+-------+-------+-------+-------+--------+--------+--------+--------+
//! | header | joyLx | joyLy | joyRx | joyRy | trigL  | trigR  | butL   | butR   |
//! +--------+-------+-------+-------+-------+--------+--------+--------+--------+
//! ```
//!
//! # Example
//!
//! ```
//! use xlink_proto::{Header, Packet, RawState, MAX_PACKET_SIZE};
//!
//! let state = RawState::neutral();
//! let mut buf = [0u8; MAX_PACKET_SIZE];
//! let len = Packet::new(Header::LEFT_TRIGGER, &state).encode(&mut buf).unwrap();
//! assert_eq!(&buf[..len], &[0b0000_0100, 0]);
//! ```

use crate::format::{write_binary_u8, write_u8};
use crate::header::{Header, MAX_BODY_LEN};
use crate::types::{RawState, Target};

/// Largest binary packet: header plus a full body.
pub const MAX_PACKET_SIZE: usize = 1 + MAX_BODY_LEN;

/// Largest debug text line.
///
/// Breakdown: header(8) + 6 × (`,` + up to 3 digits)(24) + 2 × (`,` + 8 binary digits)(18) + `\r\n`(2) = 52
pub const MAX_DEBUG_LINE_SIZE: usize = 52;

/// Error type for encoding operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum EncodeError {
    /// The output buffer is too small to hold the packet.
    BufferTooSmall,
    /// The formatter sink rejected the debug line.
    WriteError,
}

impl core::fmt::Display for EncodeError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::BufferTooSmall => write!(f, "buffer too small"),
            Self::WriteError => write!(f, "write error"),
        }
    }
}

/// One packet: a header and the state its body bytes are taken from.
#[derive(Debug, Clone, Copy)]
pub struct Packet<'a> {
    header: Header,
    state: &'a RawState,
}

impl<'a> Packet<'a> {
    /// Unused header bits are dropped so the receiver never sees them.
    #[must_use]
    pub fn new(header: Header, state: &'a RawState) -> Self {
        Self {
            header: header & Header::ALL,
            state,
        }
    }

    #[inline]
    #[must_use]
    pub fn header(&self) -> Header {
        self.header
    }

    /// Total encoded size in bytes.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        1 + self.header.body_len()
    }

    /// Body bytes in wire order, paired with their destination.
    pub fn body(&self) -> impl Iterator<Item = (Target, u8)> + 'a {
        let state = self.state;
        self.header
            .targets()
            .into_iter()
            .map(move |target| (target, state.get(target)))
    }

    /// Encode into `buf`, returning the number of bytes written.
    ///
    /// # Errors
    ///
    /// Returns [`EncodeError::BufferTooSmall`] if `buf` cannot hold [`Packet::len`] bytes.
    pub fn encode(&self, buf: &mut [u8]) -> Result<usize, EncodeError> {
        let len = self.len();
        if buf.len() < len {
            return Err(EncodeError::BufferTooSmall);
        }

        buf[0] = self.header.raw();
        for (slot, (_, value)) in buf[1..len].iter_mut().zip(self.body()) {
            *slot = value;
        }
        Ok(len)
    }

    /// Encode to a `heapless::Vec`.
    ///
    /// # Errors
    ///
    /// Returns [`EncodeError::BufferTooSmall`] if `N` is not large enough.
    pub fn encode_to_vec<const N: usize>(&self) -> Result<heapless::Vec<u8, N>, EncodeError> {
        let mut vec = heapless::Vec::new();
        vec.resize(N, 0)
            .map_err(|_| EncodeError::BufferTooSmall)?;
        let len = self.encode(&mut vec)?;
        vec.truncate(len);
        Ok(vec)
    }

    /// Render the packet as one human readable line.
    ///
    /// The header and button bytes are written as 8 binary digits, analog
    /// bytes as decimals, all comma separated and terminated by `\r\n`:
    ///
    /// ```text
    /// 00010001,128,255,00000100
    /// ```
    ///
    /// # Errors
    ///
    /// Returns [`EncodeError::BufferTooSmall`] if `buf` is shorter than [`MAX_DEBUG_LINE_SIZE`].
    pub fn encode_debug(&self, buf: &mut [u8]) -> Result<usize, EncodeError> {
        if buf.len() < MAX_DEBUG_LINE_SIZE {
            return Err(EncodeError::BufferTooSmall);
        }

        let mut pos = write_binary_u8(buf, self.header.raw());
        for (target, value) in self.body() {
            buf[pos] = b',';
            pos += 1;
            pos += match target {
                Target::Buttons(_) => write_binary_u8(&mut buf[pos..], value),
                Target::Joystick(..) | Target::Trigger(_) => write_u8(&mut buf[pos..], value),
            };
        }
        buf[pos] = b'\r';
        buf[pos + 1] = b'\n';
        Ok(pos + 2)
    }

    /// Render the debug line to a `core::fmt::Write` implementation.
    ///
    /// # Errors
    ///
    /// Returns [`EncodeError::WriteError`] if the write fails.
    pub fn encode_debug_fmt<W: core::fmt::Write>(&self, writer: &mut W) -> Result<(), EncodeError> {
        let mut buf = [0u8; MAX_DEBUG_LINE_SIZE];
        let len = self.encode_debug(&mut buf)?;

        let s = core::str::from_utf8(&buf[..len]).map_err(|_| EncodeError::WriteError)?;
        writer.write_str(s).map_err(|_| EncodeError::WriteError)
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;
    use crate::types::{Axis, Buttons, ControlState, Side};

    fn sample_state() -> RawState {
        let mut state = ControlState::neutral();
        state.joysticks[Side::Left.index()] = [-1.0, 1.0];
        state.joysticks[Side::Right.index()] = [0.0, -1.0];
        state.triggers = [1.0, 0.0];
        state.buttons = [Buttons::UP, Buttons::JOY_BUTTON | Buttons::BUMPER];
        state.quantize()
    }

    #[test]
    fn test_encode_full_packet_layout() {
        let state = sample_state();
        let mut buf = [0u8; MAX_PACKET_SIZE];
        let len = Packet::new(Header::ALL, &state).encode(&mut buf).unwrap();

        assert_eq!(len, MAX_PACKET_SIZE);
        assert_eq!(buf, [0b0011_1111, 0, 255, 128, 0, 255, 0, 0b0000_0100, 0b0011_0000]);
    }

    #[test]
    fn test_encode_sparse_packet() {
        let state = sample_state();
        let mut buf = [0u8; MAX_PACKET_SIZE];
        let header = Header::RIGHT_JOY | Header::LEFT_BUTTONS;
        let len = Packet::new(header, &state).encode(&mut buf).unwrap();

        assert_eq!(&buf[..len], &[0b0001_0010, 128, 0, 0b0000_0100]);
    }

    #[test]
    fn test_encode_empty_header() {
        let state = RawState::neutral();
        let mut buf = [0xAAu8; 4];
        let len = Packet::new(Header::EMPTY, &state).encode(&mut buf).unwrap();
        assert_eq!(&buf[..len], &[0]);
    }

    #[test]
    fn test_unused_header_bits_dropped() {
        let state = RawState::neutral();
        let packet = Packet::new(Header(0b1100_0100), &state);
        assert_eq!(packet.header(), Header::LEFT_TRIGGER);
        assert_eq!(packet.len(), 2);
    }

    #[test]
    fn test_encode_buffer_too_small() {
        let state = RawState::neutral();
        let mut buf = [0u8; 3];
        let result = Packet::new(Header::LEFT_JOY | Header::RIGHT_JOY, &state).encode(&mut buf);
        assert_eq!(result, Err(EncodeError::BufferTooSmall));
    }

    #[test]
    fn test_body_pairs_targets() {
        let state = sample_state();
        let packet = Packet::new(Header::LEFT_JOY, &state);
        let body: std::vec::Vec<_> = packet.body().collect();
        assert_eq!(
            body,
            std::vec![
                (Target::Joystick(Side::Left, Axis::X), 0),
                (Target::Joystick(Side::Left, Axis::Y), 255),
            ]
        );
    }

    #[test]
    fn test_encode_to_vec() {
        let state = sample_state();
        let vec = Packet::new(Header::RIGHT_TRIGGER, &state)
            .encode_to_vec::<MAX_PACKET_SIZE>()
            .unwrap();
        assert_eq!(vec.as_slice(), &[0b0000_1000, 0]);
    }

    #[test]
    fn test_encode_debug_line() {
        let state = sample_state();
        let mut s = std::string::String::new();
        Packet::new(Header::LEFT_JOY | Header::LEFT_BUTTONS, &state)
            .encode_debug_fmt(&mut s)
            .unwrap();
        assert_eq!(s, "00010001,0,255,00000100\r\n");
    }

    #[test]
    fn test_encode_debug_full_fits() {
        let mut state = RawState::neutral();
        state.joysticks = [[255; 2]; 2];
        state.triggers = [255; 2];
        state.buttons = [Buttons::ALL; 2];

        let mut buf = [0u8; MAX_DEBUG_LINE_SIZE];
        let len = Packet::new(Header::ALL, &state).encode_debug(&mut buf).unwrap();
        assert_eq!(len, MAX_DEBUG_LINE_SIZE);
        assert!(buf[..len].ends_with(b",00111111,00111111\r\n"));
    }
}
