//! Wire format for the handheld controller radio link.
//!
//! This crate is the contract both ends of the link share:
//!
//! - **Types**: [`Side`], [`Axis`], [`Direction`], [`Buttons`], and the two
//!   state images [`ControlState`] (normalized floats) and [`RawState`]
//!   (wire bytes)
//! - **Header**: [`Header`] bits and the [`FIELD_GROUPS`] table mapping each
//!   field group to its header bit and body bytes
//! - **Scaling**: [`axis_to_byte`], [`trigger_to_byte`] and their inverses
//! - **Encoding**: [`Packet`] and [`PacketBuilder`]
//! - **Parsing**: [`FrameParser`], an incremental header-driven parser
//! - **Timing**: the link's fixed intervals in [`timing`]
//!
//! # Protocol Format
//!
//! ```text
//! byte 0: header, bits LSB first
//!   [0] LeftJoy  [1] RightJoy  [2] LeftTrig  [3] RightTrig
//!   [4] LeftButtons  [5] RightButtons  [6,7] unused
//! then, only for set bits and in bit order:
//!   LeftJoy      -> x, y      (0-255, decode x / 127.5 - 1.0)
//!   RightJoy     -> x, y
//!   LeftTrig     -> 1 byte    (0-255, decode x / 255.0)
//!   RightTrig    -> 1 byte
//!   LeftButtons  -> 1 byte    [0]Left [1]Right [2]Up [3]Down [4]JoyButton [5]Bumper
//!   RightButtons -> 1 byte
//! ```
//!
//! Packets are 1 to 9 bytes. There is no checksum, no escaping and no
//! delimiter; the receiver resynchronizes on inter-byte gaps.
//!
//! # Example
//!
//! ```
//! use xlink_proto::{FrameEvent, FrameParser, Header, Packet, RawState, Side, Target};
//!
//! let mut sent = RawState::neutral();
//! sent.triggers[Side::Right.index()] = 200;
//!
//! let mut buf = [0u8; xlink_proto::MAX_PACKET_SIZE];
//! let len = Packet::new(Header::RIGHT_TRIGGER, &sent).encode(&mut buf).unwrap();
//!
//! let mut parser = FrameParser::new();
//! let mut received = RawState::neutral();
//! for &byte in &buf[..len] {
//!     if let FrameEvent::Field(target, value) = parser.push_byte(byte) {
//!         received.set(target, value);
//!     }
//! }
//! assert_eq!(received.get(Target::Trigger(Side::Right)), 200);
//! ```
//!
//! # Features
//!
//! - **`std`**: Enable standard library support (for host testing)
//! - **`defmt`**: Enable defmt formatting (for embedded logging)
//!
//! # No-std Support
//!
//! This crate is `#![no_std]` by default and uses no heap allocations.

#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(feature = "std")]
extern crate std;

pub mod builder;
pub mod encode;
mod format;
pub mod header;
pub mod parser;
pub mod scale;
pub mod timing;
pub mod types;

pub use builder::PacketBuilder;
pub use encode::{EncodeError, Packet, MAX_DEBUG_LINE_SIZE, MAX_PACKET_SIZE};
pub use header::{FieldGroup, GroupLayout, Header, Targets, FIELD_GROUPS, MAX_BODY_LEN};
pub use parser::{FrameEvent, FrameParser};
pub use scale::{axis_to_byte, byte_to_axis, byte_to_trigger, trigger_to_byte};
pub use types::{Axis, Buttons, ControlState, Direction, RawState, Side, Target, AXIS_CENTER};
