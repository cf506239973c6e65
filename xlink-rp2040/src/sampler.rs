//! Controller analog front end: two ADC pins behind a 74HC4052 dual mux.
//!
//! One [`MuxSampler::sample`] call walks the four mux channels and reads both
//! ADC pins on each, giving a complete [`Frame`] of eight readings.

use core::cell::Cell;

use embassy_rp::adc::{self, Adc, Channel};
use embassy_time::{Duration, Timer};
use embedded_hal::digital::OutputPin;
use xlink_core::AnalogInput;

use crate::board::MUX_SETTLE_US;

/// Readings from one pass over the mux.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, defmt::Format)]
pub struct Frame {
    /// ADC0 through mux X, indexed by mux channel.
    pub x: [u16; 4],
    /// ADC1 through mux Y, indexed by mux channel.
    pub y: [u16; 4],
}

/// Two select lines of the 74HC4052.
pub struct MuxSelect<A, B> {
    a: A,
    b: B,
}

impl<A: OutputPin, B: OutputPin> MuxSelect<A, B> {
    pub fn new(a: A, b: B) -> Self {
        Self { a, b }
    }

    /// Route mux channel `channel` (0-3) to both outputs.
    pub fn select(&mut self, channel: u8) {
        // GPIO writes on the RP2040 are infallible
        let _ = self.a.set_state((channel & 0b01 != 0).into());
        let _ = self.b.set_state((channel & 0b10 != 0).into());
    }
}

/// Sequences the mux and both ADC channels.
pub struct MuxSampler<'d, A, B> {
    adc: Adc<'d, adc::Async>,
    mux_x: Channel<'d>,
    mux_y: Channel<'d>,
    select: MuxSelect<A, B>,
}

impl<'d, A: OutputPin, B: OutputPin> MuxSampler<'d, A, B> {
    pub fn new(
        adc: Adc<'d, adc::Async>,
        mux_x: Channel<'d>,
        mux_y: Channel<'d>,
        select: MuxSelect<A, B>,
    ) -> Self {
        Self {
            adc,
            mux_x,
            mux_y,
            select,
        }
    }

    /// Read all eight inputs.
    ///
    /// # Errors
    ///
    /// Returns the ADC error of the first failed conversion.
    pub async fn sample(&mut self) -> Result<Frame, adc::Error> {
        let mut frame = Frame::default();
        for channel in 0..4u8 {
            self.select.select(channel);
            Timer::after(Duration::from_micros(MUX_SETTLE_US)).await;
            frame.x[usize::from(channel)] = self.adc.read(&mut self.mux_x).await?;
            frame.y[usize::from(channel)] = self.adc.read(&mut self.mux_y).await?;
        }
        Ok(frame)
    }
}

/// Last sampled value of one input, read back through [`AnalogInput`].
///
/// Lets a [`Debouncer`](xlink_core::Debouncer) work from a muxed frame
/// instead of owning an ADC channel.
#[derive(Debug, Default)]
pub struct Latch(Cell<u16>);

impl Latch {
    pub const fn new() -> Self {
        Self(Cell::new(0))
    }

    pub fn store(&self, raw: u16) {
        self.0.set(raw);
    }
}

impl AnalogInput for &Latch {
    fn read(&mut self) -> u16 {
        self.0.get()
    }
}
