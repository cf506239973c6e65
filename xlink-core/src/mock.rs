//! Host-side test doubles for the collaborator traits.

extern crate std;

use core::cell::Cell;
use std::collections::VecDeque;
use std::rc::Rc;
use std::vec::Vec;

use crate::port::{AnalogInput, Clock, SerialPort};

/// Loopback-style port: tests push into `rx`, endpoints write into `tx`.
#[derive(Default)]
pub struct MockPort {
    pub rx: VecDeque<u8>,
    pub tx: Vec<u8>,
}

impl MockPort {
    pub fn new() -> Self {
        Self::default()
    }

    /// Take everything written so far.
    pub fn take_tx(&mut self) -> Vec<u8> {
        core::mem::take(&mut self.tx)
    }
}

impl SerialPort for MockPort {
    fn byte_available(&mut self) -> bool {
        !self.rx.is_empty()
    }

    fn read_byte(&mut self) -> Option<u8> {
        self.rx.pop_front()
    }

    fn write_byte(&mut self, byte: u8) {
        self.tx.push(byte);
    }
}

/// Clock advanced by hand; clones share the same time.
#[derive(Clone, Default)]
pub struct ManualClock(Rc<Cell<u32>>);

impl ManualClock {
    pub fn starting_at(ms: u32) -> Self {
        Self(Rc::new(Cell::new(ms)))
    }

    pub fn set(&self, ms: u32) {
        self.0.set(ms);
    }

    pub fn advance(&self, ms: u32) {
        self.0.set(self.0.get().wrapping_add(ms));
    }
}

impl Clock for ManualClock {
    fn now_millis(&self) -> u32 {
        self.0.get()
    }
}

/// Analog pin whose reading tests can change through a shared handle.
#[derive(Clone, Default)]
pub struct MockAnalog(Rc<Cell<u16>>);

impl MockAnalog {
    pub fn set(&self, raw: u16) {
        self.0.set(raw);
    }
}

impl AnalogInput for MockAnalog {
    fn read(&mut self) -> u16 {
        self.0.get()
    }
}
