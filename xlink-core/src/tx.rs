//! Controller-side endpoint: tracks changes and schedules transmissions.
//!
//! Every setter compares the new value with the stored one and, on a change,
//! marks the field's group dirty in a [`Header`]. [`Sender::update`] then
//! decides whether to transmit:
//!
//! - less than [`MIN_INTERVAL_MS`] since the last send: never
//! - more than [`MAX_INTERVAL_MS`] since the last full send: full send
//! - a button group is dirty: send the dirty groups now
//! - an analog group is dirty and [`ANALOG_INTERVAL_MS`] has passed: send the dirty groups
//! - otherwise: nothing
//!
//! A full send is split across two packets. The left half goes out at once
//! and the right half is marked dirty; because it contains a button group it
//! leaves on the first tick after the minimum interval.
//!
//! # Liveness
//!
//! `update()` must run at least once per [`MIN_INTERVAL_MS`]; slower polling
//! delays button presses by the polling period.

use xlink_proto::timing::{
    elapsed, ANALOG_INTERVAL_MS, FLOAT_EPSILON, MAX_INTERVAL_MS, MIN_INTERVAL_MS,
};
use xlink_proto::{
    Axis, Buttons, ControlState, Direction, Header, Packet, Side, MAX_DEBUG_LINE_SIZE,
    MAX_PACKET_SIZE,
};

use crate::port::{Clock, SerialPort};

/// How packets are rendered on the wire.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum WireFormat {
    /// Header-driven binary packets understood by the receiver.
    #[default]
    Binary,
    /// One human readable line per packet, for a serial terminal on the bench.
    DebugText,
}

/// Outcome of one [`Sender::update`] tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[must_use]
pub enum Transmission {
    /// Nothing was sent.
    Idle,
    /// The dirty groups named by the header were sent.
    Partial(Header),
    /// The first half of a full refresh was sent with this header.
    Full(Header),
}

impl Transmission {
    /// Header of the packet sent this tick, if any.
    #[must_use]
    pub fn header(self) -> Option<Header> {
        match self {
            Transmission::Idle => None,
            Transmission::Partial(header) | Transmission::Full(header) => Some(header),
        }
    }
}

/// Controller-side link endpoint.
pub struct Sender<P, C> {
    port: P,
    clock: C,
    state: ControlState,
    dirty: Header,
    last_send: Option<u32>,
    last_full_send: Option<u32>,
    format: WireFormat,
}

impl<P: SerialPort, C: Clock> Sender<P, C> {
    /// Create a sender in the neutral state.
    ///
    /// Nothing has been sent yet, so the first `update()` performs a full send.
    pub fn new(port: P, clock: C) -> Self {
        Self {
            port,
            clock,
            state: ControlState::neutral(),
            dirty: Header::EMPTY,
            last_send: None,
            last_full_send: None,
            format: WireFormat::Binary,
        }
    }

    /// Select how packets are rendered.
    pub fn set_wire_format(&mut self, format: WireFormat) {
        self.format = format;
    }

    #[must_use]
    pub fn wire_format(&self) -> WireFormat {
        self.format
    }

    /// Set a joystick axis, `[-1.0, 1.0]`.
    pub fn set_joystick(&mut self, side: Side, axis: Axis, value: f32) {
        let slot = &mut self.state.joysticks[side.index()][axis.index()];
        if differs(*slot, value) {
            *slot = value;
            self.dirty |= Header::joystick(side);
        }
    }

    /// Set a trigger, `[0.0, 1.0]`.
    pub fn set_trigger(&mut self, side: Side, value: f32) {
        let slot = &mut self.state.triggers[side.index()];
        if differs(*slot, value) {
            *slot = value;
            self.dirty |= Header::trigger(side);
        }
    }

    /// Press or release a joystick button.
    pub fn set_joy_button(&mut self, side: Side, pressed: bool) {
        self.set_buttons(side, Buttons::JOY_BUTTON, pressed);
    }

    /// Press or release one of the face buttons on the right-hand side.
    pub fn set_button(&mut self, dir: Direction, pressed: bool) {
        self.set_buttons(Side::Right, Buttons::from(dir), pressed);
    }

    /// Press or release one of the pad buttons on the left-hand side.
    pub fn set_dpad(&mut self, dir: Direction, pressed: bool) {
        self.set_buttons(Side::Left, Buttons::from(dir), pressed);
    }

    /// Press or release the shoulder bumper on one side.
    pub fn set_bumper(&mut self, side: Side, pressed: bool) {
        self.set_buttons(side, Buttons::BUMPER, pressed);
    }

    /// Press or release every button in `mask` on one side.
    pub fn set_buttons(&mut self, side: Side, mask: Buttons, pressed: bool) {
        let mut next = self.state.buttons[side.index()];
        next.set(mask, pressed);
        self.set_button_byte(side, next);
    }

    /// Replace the whole button byte of one side.
    pub fn set_button_byte(&mut self, side: Side, buttons: Buttons) {
        let slot = &mut self.state.buttons[side.index()];
        if *slot != buttons {
            *slot = buttons;
            self.dirty |= Header::buttons(side);
        }
    }

    /// Run one scheduling tick.
    pub fn update(&mut self) -> Transmission {
        let now = self.clock.now_millis();
        let since_send = since(now, self.last_send);

        // hard floor on transmit rate regardless of urgency
        if since_send <= MIN_INTERVAL_MS {
            return Transmission::Idle;
        }

        if since(now, self.last_full_send) > MAX_INTERVAL_MS {
            return Transmission::Full(self.full_send(now));
        }

        if self.dirty.intersects(Header::NON_ANALOG)
            || (!self.dirty.is_empty() && since_send > ANALOG_INTERVAL_MS)
        {
            return Transmission::Partial(self.send(now));
        }

        Transmission::Idle
    }

    /// Send the left half now and queue the right half for the next tick.
    fn full_send(&mut self, now: u32) -> Header {
        self.dirty |= Header::LEFT_HALF;
        let header = self.send(now);
        self.last_full_send = Some(now);
        self.dirty |= Header::RIGHT_HALF;

        #[cfg(feature = "defmt")]
        defmt::debug!("full send, left half {=u8:08b}", header.raw());

        header
    }

    /// Write the dirty groups and clear the dirty header.
    fn send(&mut self, now: u32) -> Header {
        let header = self.dirty;
        let raw = self.state.quantize();
        let packet = Packet::new(header, &raw);

        match self.format {
            WireFormat::Binary => {
                let mut buf = [0u8; MAX_PACKET_SIZE];
                if let Ok(len) = packet.encode(&mut buf) {
                    self.port.write_all(&buf[..len]);
                }
            }
            WireFormat::DebugText => {
                let mut buf = [0u8; MAX_DEBUG_LINE_SIZE];
                if let Ok(len) = packet.encode_debug(&mut buf) {
                    self.port.write_all(&buf[..len]);
                }
            }
        }

        #[cfg(feature = "defmt")]
        defmt::trace!("sent {=u8:08b} ({} bytes)", header.raw(), packet.len());

        self.dirty = Header::EMPTY;
        self.last_send = Some(now);
        header
    }

    /// Groups changed since they were last sent.
    #[must_use]
    pub fn dirty(&self) -> Header {
        self.dirty
    }

    #[must_use]
    pub fn state(&self) -> &ControlState {
        &self.state
    }

    pub fn port(&self) -> &P {
        &self.port
    }

    pub fn port_mut(&mut self) -> &mut P {
        &mut self.port
    }

    /// Decompose the sender into its port and clock.
    pub fn into_parts(self) -> (P, C) {
        (self.port, self.clock)
    }
}

/// Milliseconds since `last`, saturating when it never happened.
#[inline]
fn since(now: u32, last: Option<u32>) -> u32 {
    last.map_or(u32::MAX, |t| elapsed(now, t))
}

#[inline]
fn differs(current: f32, next: f32) -> bool {
    let delta = current - next;
    delta > FLOAT_EPSILON || delta < -FLOAT_EPSILON
}
