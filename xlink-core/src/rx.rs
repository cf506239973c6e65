//! Robot-side endpoint: mirrors the controller state from the byte stream.
//!
//! [`Receiver::receive_data`] drains every byte waiting on the port through a
//! [`FrameParser`] and writes each field into a [`RawState`] mirror. A gap of
//! more than [`PACKET_TIMEOUT_MS`] since the previous poll that received data
//! abandons any partial packet, so the next byte is read as a header.
//!
//! Values stay readable after the link drops; check [`Receiver::connected`]
//! before trusting them.
//!
//! # Liveness
//!
//! Poll at least once per [`PACKET_TIMEOUT_MS`]. Slower polling can leave
//! several packets queued in one drain, which still parse correctly, but a
//! gap inside one packet is then indistinguishable from the gap between two.
//!
//! # Resynchronization
//!
//! Without a checksum a byte lost mid-packet shifts every later byte onto the
//! wrong field until the next timeout. A stray header byte is taken at face
//! value the same way.

use xlink_proto::timing::{elapsed, CONNECTION_TIMEOUT_MS, PACKET_TIMEOUT_MS};
use xlink_proto::{
    byte_to_axis, byte_to_trigger, Axis, Buttons, Direction, FrameEvent, FrameParser, RawState,
    Side, Target,
};

use crate::port::{Clock, SerialPort};

/// Robot-side link endpoint.
pub struct Receiver<P, C> {
    port: P,
    clock: C,
    parser: FrameParser,
    state: RawState,
    clicks: [Buttons; 2],
    last_receive: Option<u32>,
}

impl<P: SerialPort, C: Clock> Receiver<P, C> {
    /// Create a receiver mirroring the neutral state, not yet connected.
    pub fn new(port: P, clock: C) -> Self {
        Self {
            port,
            clock,
            parser: FrameParser::new(),
            state: RawState::neutral(),
            clicks: [Buttons::NONE; 2],
            last_receive: None,
        }
    }

    /// Drain the port into the mirrored state. Returns the bytes consumed.
    pub fn receive_data(&mut self) -> usize {
        if !self.port.byte_available() {
            return 0;
        }

        let now = self.clock.now_millis();
        let stale = self
            .last_receive
            .map_or(true, |last| elapsed(now, last) > PACKET_TIMEOUT_MS);
        if stale {
            #[cfg(feature = "defmt")]
            if !self.parser.is_expecting_header() {
                defmt::debug!("dropping partial packet, {} bytes missing", self.parser.remaining());
            }
            self.parser.reset();
        }

        let mut count = 0;
        while let Some(byte) = self.port.read_byte() {
            count += 1;
            match self.parser.push_byte(byte) {
                FrameEvent::Header(_header) => {
                    #[cfg(feature = "defmt")]
                    defmt::trace!("header {=u8:08b}", _header.raw());
                }
                FrameEvent::Field(target, value) => self.store(target, value),
            }
        }

        self.last_receive = Some(now);
        count
    }

    fn store(&mut self, target: Target, value: u8) {
        if let Target::Buttons(side) = target {
            let old = self.state.buttons[side.index()];
            self.clicks[side.index()] |= Buttons(value).rising_edges(old);
        }
        self.state.set(target, value);
    }

    /// Poll, then report whether anything arrived within
    /// [`CONNECTION_TIMEOUT_MS`].
    pub fn connected(&mut self) -> bool {
        self.receive_data();
        match self.last_receive {
            Some(last) => elapsed(self.clock.now_millis(), last) < CONNECTION_TIMEOUT_MS,
            None => false,
        }
    }

    /// Joystick axis in `[-1.0, 1.0]`.
    #[must_use]
    pub fn joystick(&self, side: Side, axis: Axis) -> f32 {
        byte_to_axis(self.joystick_raw(side, axis))
    }

    /// Joystick axis as its wire byte, centered on 128.
    #[must_use]
    pub fn joystick_raw(&self, side: Side, axis: Axis) -> u8 {
        self.state.get(Target::Joystick(side, axis))
    }

    /// Joystick axis as a signed byte, centered on 0.
    #[must_use]
    pub fn joystick_i8(&self, side: Side, axis: Axis) -> i8 {
        (i16::from(self.joystick_raw(side, axis)) - 128) as i8
    }

    /// Trigger in `[0.0, 1.0]`.
    #[must_use]
    pub fn trigger(&self, side: Side) -> f32 {
        byte_to_trigger(self.trigger_raw(side))
    }

    #[must_use]
    pub fn trigger_raw(&self, side: Side) -> u8 {
        self.state.get(Target::Trigger(side))
    }

    #[must_use]
    pub fn button_state(&self, side: Side) -> Buttons {
        self.state.buttons[side.index()]
    }

    #[must_use]
    pub fn joy_button(&self, side: Side) -> bool {
        self.button_state(side).contains(Buttons::JOY_BUTTON)
    }

    /// Face button on the right-hand side.
    #[must_use]
    pub fn button(&self, dir: Direction) -> bool {
        self.button_state(Side::Right).contains(Buttons::from(dir))
    }

    /// Pad button on the left-hand side.
    #[must_use]
    pub fn dpad(&self, dir: Direction) -> bool {
        self.button_state(Side::Left).contains(Buttons::from(dir))
    }

    #[must_use]
    pub fn bumper(&self, side: Side) -> bool {
        self.button_state(side).contains(Buttons::BUMPER)
    }

    pub fn joy_button_click(&mut self, side: Side) -> bool {
        self.take_click(side, Buttons::JOY_BUTTON)
    }

    pub fn button_click(&mut self, dir: Direction) -> bool {
        self.take_click(Side::Right, Buttons::from(dir))
    }

    pub fn dpad_click(&mut self, dir: Direction) -> bool {
        self.take_click(Side::Left, Buttons::from(dir))
    }

    pub fn bumper_click(&mut self, side: Side) -> bool {
        self.take_click(side, Buttons::BUMPER)
    }

    /// Report and clear pending presses of `mask` on one side.
    ///
    /// `true` if any bit of `mask` was pressed since it was last taken.
    pub fn take_click(&mut self, side: Side, mask: Buttons) -> bool {
        let clicks = &mut self.clicks[side.index()];
        let hit = clicks.intersects(mask);
        *clicks &= !mask;
        hit
    }

    /// The mirrored wire state.
    #[must_use]
    pub fn state(&self) -> &RawState {
        &self.state
    }

    pub fn port_mut(&mut self) -> &mut P {
        &mut self.port
    }

    pub fn into_parts(self) -> (P, C) {
        (self.port, self.clock)
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;
    use crate::mock::{ManualClock, MockPort};
    use crate::tx::{Sender, Transmission};
    use xlink_proto::timing::MIN_INTERVAL_MS;
    use xlink_proto::{Header, PacketBuilder, MAX_PACKET_SIZE};

    fn receiver() -> (Receiver<MockPort, ManualClock>, ManualClock) {
        let clock = ManualClock::starting_at(100);
        (Receiver::new(MockPort::new(), clock.clone()), clock)
    }

    fn push(rx: &mut Receiver<MockPort, ManualClock>, bytes: &[u8]) {
        rx.port_mut().rx.extend(bytes.iter().copied());
    }

    fn push_packet(rx: &mut Receiver<MockPort, ManualClock>, builder: PacketBuilder) {
        let mut buf = [0u8; MAX_PACKET_SIZE];
        let len = builder.encode(&mut buf).unwrap();
        push(rx, &buf[..len]);
    }

    #[test]
    fn test_initial_state_is_neutral() {
        let (mut rx, _clock) = receiver();
        assert_eq!(rx.state(), &RawState::neutral());
        assert_eq!(rx.joystick_i8(Side::Left, Axis::X), 0);
        assert_eq!(rx.trigger(Side::Right), 0.0);
        assert!(!rx.connected());
        assert_eq!(rx.receive_data(), 0);
    }

    #[test]
    fn test_receive_sparse_packet() {
        let (mut rx, _clock) = receiver();
        push(&mut rx, &[0b0010_0001, 0, 255, 0b0001_0000]);

        assert_eq!(rx.receive_data(), 4);
        assert_eq!(rx.joystick_raw(Side::Left, Axis::X), 0);
        assert_eq!(rx.joystick(Side::Left, Axis::Y), 1.0);
        assert_eq!(rx.joystick_i8(Side::Left, Axis::X), -128);
        assert!(rx.joy_button(Side::Right));
        // untouched groups keep their previous value
        assert_eq!(rx.joystick_raw(Side::Right, Axis::X), 128);
    }

    #[test]
    fn test_click_reported_once() {
        let (mut rx, clock) = receiver();
        let mut results = [false; 3];
        for (i, buttons) in [Buttons::NONE, Buttons::JOY_BUTTON, Buttons::JOY_BUTTON]
            .into_iter()
            .enumerate()
        {
            push_packet(&mut rx, PacketBuilder::new().buttons(Side::Left, buttons));
            rx.receive_data();
            results[i] = rx.joy_button_click(Side::Left);
            clock.advance(20);
        }
        assert_eq!(results, [false, true, false]);
    }

    #[test]
    fn test_click_survives_until_read() {
        let (mut rx, clock) = receiver();
        push_packet(&mut rx, PacketBuilder::new().buttons(Side::Right, Buttons::UP));
        rx.receive_data();
        clock.advance(20);
        // released again before anybody looked
        push_packet(&mut rx, PacketBuilder::new().buttons(Side::Right, Buttons::NONE));
        rx.receive_data();

        assert!(!rx.button(Direction::Up));
        assert!(!rx.button_click(Direction::Down));
        assert!(rx.button_click(Direction::Up));
        assert!(!rx.button_click(Direction::Up));
    }

    #[test]
    fn test_clicks_per_side() {
        let (mut rx, _clock) = receiver();
        push_packet(
            &mut rx,
            PacketBuilder::new()
                .buttons(Side::Left, Buttons::LEFT | Buttons::BUMPER)
                .buttons(Side::Right, Buttons::BUMPER),
        );
        rx.receive_data();

        assert!(rx.dpad(Direction::Left));
        assert!(rx.dpad_click(Direction::Left));
        assert!(!rx.dpad_click(Direction::Right));
        assert!(rx.bumper_click(Side::Left));
        assert!(rx.bumper_click(Side::Right));
        assert!(!rx.bumper_click(Side::Right));
    }

    #[test]
    fn test_partial_packet_across_polls() {
        let (mut rx, clock) = receiver();
        push(&mut rx, &[Header::LEFT_JOY.raw(), 10]);
        rx.receive_data();
        clock.advance(PACKET_TIMEOUT_MS);
        push(&mut rx, &[20]);
        rx.receive_data();

        assert_eq!(rx.joystick_raw(Side::Left, Axis::X), 10);
        assert_eq!(rx.joystick_raw(Side::Left, Axis::Y), 20);
    }

    #[test]
    fn test_timeout_drops_partial_packet() {
        let (mut rx, clock) = receiver();
        push(&mut rx, &[Header::LEFT_JOY.raw(), 10]);
        rx.receive_data();

        // the second joystick byte never arrives; a new packet starts later
        clock.advance(PACKET_TIMEOUT_MS + 1);
        push(&mut rx, &[Header::RIGHT_TRIGGER.raw(), 77]);
        rx.receive_data();

        assert_eq!(rx.joystick_raw(Side::Left, Axis::Y), 128);
        assert_eq!(rx.trigger_raw(Side::Right), 77);
    }

    #[test]
    fn test_stray_header_taken_at_face_value() {
        let (mut rx, _clock) = receiver();
        // a lone byte meant as noise names the left trigger, which swallows
        // the header that follows it
        push(&mut rx, &[Header::LEFT_TRIGGER.raw(), Header::RIGHT_TRIGGER.raw(), 77]);
        rx.receive_data();

        assert_eq!(rx.trigger_raw(Side::Left), Header::RIGHT_TRIGGER.raw());
        assert_eq!(rx.trigger_raw(Side::Right), 0);
    }

    #[test]
    fn test_empty_header_then_packet() {
        let (mut rx, _clock) = receiver();
        push(&mut rx, &[0x00, Header::LEFT_TRIGGER.raw(), 42]);
        assert_eq!(rx.receive_data(), 3);
        assert_eq!(rx.trigger_raw(Side::Left), 42);
    }

    #[test]
    fn test_scan_order_is_bit_order() {
        let (mut rx, _clock) = receiver();
        push(&mut rx, &[0b0010_0001, 1, 2, 0b0000_0010]);
        rx.receive_data();

        assert_eq!(rx.joystick_raw(Side::Left, Axis::X), 1);
        assert_eq!(rx.joystick_raw(Side::Left, Axis::Y), 2);
        assert_eq!(rx.button_state(Side::Right), Buttons::RIGHT);
    }

    #[test]
    fn test_connection_timeout() {
        let (mut rx, clock) = receiver();
        push(&mut rx, &[0x00]);
        assert!(rx.connected());

        clock.advance(CONNECTION_TIMEOUT_MS - 1);
        assert!(rx.connected());
        clock.advance(1);
        assert!(!rx.connected());

        // values stay readable after the link drops
        assert_eq!(rx.state(), &RawState::neutral());
    }

    #[test]
    fn test_round_trip_through_sender() {
        let clock = ManualClock::starting_at(0);
        let mut tx = Sender::new(MockPort::new(), clock.clone());
        let mut rx = Receiver::new(MockPort::new(), clock.clone());

        tx.set_joystick(Side::Left, Axis::X, -0.5);
        tx.set_joystick(Side::Right, Axis::Y, 0.25);
        tx.set_trigger(Side::Left, 0.7);
        tx.set_trigger(Side::Right, 0.01);
        tx.set_dpad(Direction::Down, true);
        tx.set_button(Direction::Left, true);
        tx.set_bumper(Side::Right, true);

        // left half now, right half once the minimum interval has passed
        for _ in 0..2 {
            let sent = tx.update();
            assert_ne!(sent, Transmission::Idle);
            let bytes = tx.port_mut().take_tx();
            rx.port_mut().rx.extend(bytes);
            rx.receive_data();
            clock.advance(MIN_INTERVAL_MS + 1);
        }

        for side in Side::ALL {
            for axis in Axis::ALL {
                let d = rx.joystick(side, axis) - tx.state().joystick(side, axis);
                assert!(d.abs() <= 1.0 / 127.5, "{side:?} {axis:?}");
            }
            let d = rx.trigger(side) - tx.state().trigger(side);
            assert!(d.abs() <= 1.0 / 255.0, "{side:?}");
            assert_eq!(rx.button_state(side), tx.state().buttons(side));
        }
        assert!(rx.dpad_click(Direction::Down));
        assert!(rx.button_click(Direction::Left));
        assert!(rx.connected());
    }
}
