//! Platform-agnostic endpoints for the controller radio link.
//!
//! This crate holds everything with state or timing policy. It talks to
//! hardware only through the traits in [`port`], so it runs unchanged on the
//! microcontroller and on the host under test.
//!
//! # Overview
//!
//! - [`port`]: collaborator traits ([`SerialPort`], [`Clock`], [`AnalogInput`])
//!   and the `embedded-io` adapter [`IoPort`]
//! - [`tx`]: controller side ([`Sender`]) that tracks changes and schedules packets
//! - [`rx`]: robot side ([`Receiver`]) that mirrors the controller state
//! - [`debounce`]: resistor-ladder buttons ([`Debouncer`], [`ButtonLadder`])
//! - [`analog`]: stick and trigger calibration
//!
//! # Example
//!
//! ```rust
//! use core::cell::Cell;
//! use xlink_core::{Clock, Receiver, Sender, SerialPort};
//! use xlink_proto::{Direction, Side};
//!
//! #[derive(Default)]
//! struct Wire(std::collections::VecDeque<u8>);
//!
//! impl SerialPort for Wire {
//!     fn byte_available(&mut self) -> bool { !self.0.is_empty() }
//!     fn read_byte(&mut self) -> Option<u8> { self.0.pop_front() }
//!     fn write_byte(&mut self, byte: u8) { self.0.push_back(byte) }
//! }
//!
//! struct Millis(Cell<u32>);
//!
//! impl Clock for Millis {
//!     fn now_millis(&self) -> u32 { self.0.get() }
//! }
//!
//! let clock = Millis(Cell::new(0));
//! let mut sender = Sender::new(Wire::default(), &clock);
//! sender.set_dpad(Direction::Up, true);
//! let _ = sender.update();
//!
//! let (wire, _) = sender.into_parts();
//! let mut receiver = Receiver::new(wire, &clock);
//! receiver.receive_data();
//! assert!(receiver.dpad(Direction::Up));
//! assert!(receiver.connected());
//! assert_eq!(receiver.trigger(Side::Left), 0.0);
//! ```
//!
//! # Features
//!
//! - **`std`**: Enable standard library support (for host testing)
//! - **`defmt`**: Enable defmt formatting and diagnostics (for embedded logging)
//! - **`embedded-io`**: Enable [`IoPort`] over `embedded_io` peripherals
//!
//! # No-std Support
//!
//! This crate is `#![no_std]` by default and uses no heap allocations.

#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(feature = "std")]
extern crate std;

pub mod analog;
pub mod debounce;
pub mod port;
pub mod rx;
pub mod tx;

#[cfg(test)]
mod mock;

pub use analog::{AxisCalibration, TriggerCalibration, ADC_MAX};
pub use debounce::{band_index, ButtonLadder, Debouncer};
#[cfg(feature = "embedded-io")]
pub use port::IoPort;
pub use port::{AnalogInput, Clock, PortError, SerialPort};
pub use rx::Receiver;
pub use tx::{Sender, Transmission, WireFormat};
