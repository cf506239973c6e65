//! [`Clock`] backed by the embassy time driver.

use embassy_time::Instant;
use xlink_core::Clock;

/// Milliseconds since boot, truncated to 32 bits.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmbassyClock;

impl Clock for EmbassyClock {
    #[inline]
    fn now_millis(&self) -> u32 {
        // truncation gives the wrapping counter the endpoints expect
        Instant::now().as_millis() as u32
    }
}
