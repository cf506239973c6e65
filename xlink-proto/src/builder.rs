//! Builder API for hand-assembling packets.
//!
//! Handy for tests and bench tools that need to put specific bytes on the
//! wire without running a sender.
//!
//! # Example
//!
//! ```
//! use xlink_proto::{Buttons, PacketBuilder, Side};
//!
//! let mut buf = [0u8; 16];
//! let len = PacketBuilder::new()
//!     .left_stick(0, 255)
//!     .buttons(Side::Right, Buttons::BUMPER)
//!     .encode(&mut buf)
//!     .unwrap();
//! assert_eq!(&buf[..len], &[0b0010_0001, 0, 255, 0b0010_0000]);
//! ```

use crate::encode::{EncodeError, Packet};
use crate::header::Header;
use crate::types::{Buttons, RawState, Side, Target};

/// Fluent packet builder. Each setter adds its group to the header.
#[derive(Debug, Clone, Copy, Default)]
#[must_use]
pub struct PacketBuilder {
    header: Header,
    state: RawState,
}

impl PacketBuilder {
    pub fn new() -> Self {
        Self {
            header: Header::EMPTY,
            state: RawState::neutral(),
        }
    }

    /// Every group, taken from `state`.
    pub fn full(state: RawState) -> Self {
        Self {
            header: Header::ALL,
            state,
        }
    }

    pub fn left_stick(self, x: u8, y: u8) -> Self {
        self.stick(Side::Left, x, y)
    }

    pub fn right_stick(self, x: u8, y: u8) -> Self {
        self.stick(Side::Right, x, y)
    }

    pub fn stick(mut self, side: Side, x: u8, y: u8) -> Self {
        self.state.joysticks[side.index()] = [x, y];
        self.header |= Header::joystick(side);
        self
    }

    pub fn trigger(mut self, side: Side, value: u8) -> Self {
        self.state.set(Target::Trigger(side), value);
        self.header |= Header::trigger(side);
        self
    }

    pub fn buttons(mut self, side: Side, buttons: Buttons) -> Self {
        self.state.buttons[side.index()] = buttons;
        self.header |= Header::buttons(side);
        self
    }

    #[must_use]
    pub fn header(&self) -> Header {
        self.header
    }

    /// Encode into `buf`, returning the number of bytes written.
    ///
    /// # Errors
    ///
    /// Returns [`EncodeError::BufferTooSmall`] if `buf` is too small.
    pub fn encode(&self, buf: &mut [u8]) -> Result<usize, EncodeError> {
        Packet::new(self.header, &self.state).encode(buf)
    }
}
