//! Link timing constants, in milliseconds.
//!
//! Both ends must agree on these; they are not runtime configurable.

/// Hard floor between two transmissions.
pub const MIN_INTERVAL_MS: u32 = 20;

/// Analog-only changes are sent at most this often.
pub const ANALOG_INTERVAL_MS: u32 = 50;

/// A full state refresh is sent at least this often.
pub const MAX_INTERVAL_MS: u32 = 800;

/// A gap this long inside a packet abandons it.
pub const PACKET_TIMEOUT_MS: u32 = 2;

/// No bytes for this long means the link is down.
pub const CONNECTION_TIMEOUT_MS: u32 = 1000;

/// A debounced reading must hold this long before it is reported.
pub const SETTLE_TIME_MS: u32 = 10;

/// Smallest analog change that marks a field dirty.
pub const FLOAT_EPSILON: f32 = 0.003;

/// Milliseconds from `since` to `now` on a wrapping `u32` clock.
#[inline]
#[must_use]
pub const fn elapsed(now: u32, since: u32) -> u32 {
    now.wrapping_sub(since)
}
