//! Link health shared between the endpoint task and the status task.
//!
//! The endpoint task owns the protocol state; the status task only needs to
//! know when the link comes up or drops, and some counters for the log.

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::signal::Signal;
use portable_atomic::{AtomicU32, Ordering};

#[derive(Debug, Clone, Copy, PartialEq, Eq, defmt::Format)]
pub enum LinkStatus {
    Up,
    Down,
}

impl LinkStatus {
    #[must_use]
    pub fn from_connected(connected: bool) -> Self {
        if connected {
            Self::Up
        } else {
            Self::Down
        }
    }
}

/// Latest link transition; only the most recent one matters.
pub type StatusSignal = Signal<CriticalSectionRawMutex, LinkStatus>;

/// Counters updated by the endpoint task.
pub struct LinkStats {
    bytes: AtomicU32,
    packets: AtomicU32,
    port_errors: AtomicU32,
}

impl LinkStats {
    pub const fn new() -> Self {
        Self {
            bytes: AtomicU32::new(0),
            packets: AtomicU32::new(0),
            port_errors: AtomicU32::new(0),
        }
    }

    pub fn add_bytes(&self, count: usize) {
        self.bytes.fetch_add(count as u32, Ordering::Relaxed);
    }

    pub fn add_packet(&self) {
        self.packets.fetch_add(1, Ordering::Relaxed);
    }

    pub fn set_port_errors(&self, count: u32) {
        self.port_errors.store(count, Ordering::Relaxed);
    }

    /// `(bytes, packets, port errors)` so far.
    pub fn snapshot(&self) -> (u32, u32, u32) {
        (
            self.bytes.load(Ordering::Relaxed),
            self.packets.load(Ordering::Relaxed),
            self.port_errors.load(Ordering::Relaxed),
        )
    }
}

impl Default for LinkStats {
    fn default() -> Self {
        Self::new()
    }
}

/// Tracks the last reported status so only transitions are signalled.
pub struct StatusTracker {
    last: LinkStatus,
}

impl StatusTracker {
    pub const fn new() -> Self {
        Self {
            last: LinkStatus::Down,
        }
    }

    /// Signal `status` if it differs from the last one.
    pub fn update(&mut self, status: LinkStatus, signal: &StatusSignal) {
        if status != self.last {
            self.last = status;
            signal.signal(status);
        }
    }
}

impl Default for StatusTracker {
    fn default() -> Self {
        Self::new()
    }
}
