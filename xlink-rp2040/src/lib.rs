//! RP2040 firmware for both ends of the XBee controller link.
//!
//! # Overview
//!
//! Two binaries share this library:
//!
//! - **`controller`**: samples sticks, triggers and button ladders, feeds a
//!   [`Sender`] and transmits over the XBee
//! - **`robot`**: drains the XBee into a [`Receiver`] and reports the link
//!   state on the on-board LED
//!
//! See [`board`] for the pin map.
//!
//! # Architecture
//!
//! Each endpoint runs in its own Embassy task driven by a fixed-period
//! [`Ticker`](embassy_time::Ticker): 5 ms for the sender and 1 ms for the
//! receiver, inside the polling bounds the endpoints require. A second task
//! waits on a [`Signal`](embassy_sync::signal::Signal) for link transitions
//! and drives the LED, with "latest value wins" semantics.
//!
//! # Modules
//!
//! - [`board`]: pins, baud rate, ladder thresholds, calibration
//! - [`clock`]: [`EmbassyClock`]
//! - [`sampler`]: muxed ADC front end ([`MuxSampler`], [`Latch`])
//! - [`link`]: status signal and counters shared between tasks
//!
//! # Features
//!
//! - **`dev-panic`** (default): Use `panic-probe` for development (prints panic info via RTT)
//! - **`prod-panic`**: Use `panic-reset` for production (silent watchdog reset)
//! - **`text-wire`**: Controller emits one human readable line per packet
//! - **`xbee-9600`**: Run the UART at 9600 baud for radios at factory settings
//!
//! # Re-exports
//!
//! This crate re-exports the endpoint types from [`xlink_core`] for convenience.

#![no_std]

#[cfg(all(feature = "dev-panic", feature = "prod-panic"))]
compile_error!("Cannot enable both `dev-panic` and `prod-panic` features - they install conflicting panic handlers");

pub mod board;
pub mod clock;
pub mod link;
pub mod sampler;

pub use clock::EmbassyClock;
pub use link::{LinkStats, LinkStatus, StatusSignal, StatusTracker};
pub use sampler::{Frame, Latch, MuxSampler, MuxSelect};
pub use xlink_core::{
    ButtonLadder, Debouncer, IoPort, Receiver, Sender, SerialPort, Transmission, WireFormat,
};
