//! Resistor-ladder button reading with a settle-time filter.
//!
//! Several buttons share one analog pin through a resistor ladder; each
//! pressed button pulls the pin into its own voltage band. A [`Debouncer`]
//! turns the noisy reading into a stable band index, and a [`ButtonLadder`]
//! turns the index into [`Buttons`] on the sender.

use xlink_proto::timing::{elapsed, SETTLE_TIME_MS};
use xlink_proto::{Buttons, Side};

use crate::port::{AnalogInput, Clock, SerialPort};
use crate::tx::Sender;

/// Band of `raw` within ascending `thresholds`.
///
/// Readings below the first threshold are `None`. A reading equal to a
/// threshold belongs to the band above it; anything at or above the last
/// threshold is band `thresholds.len() - 1`. Bands past 255 do not fit the
/// index and also read as `None`.
#[must_use]
pub fn band_index(thresholds: &[u16], raw: u16) -> Option<u8> {
    let band = thresholds
        .iter()
        .position(|&t| raw < t)
        .unwrap_or(thresholds.len());
    band.checked_sub(1).and_then(|b| u8::try_from(b).ok())
}

/// Settle-time filter over one ladder pin.
pub struct Debouncer<'t, A, C> {
    input: A,
    clock: C,
    thresholds: &'t [u16],
    last_state: Option<u8>,
    steady: Option<u8>,
    last_change: u32,
}

impl<'t, A: AnalogInput, C: Clock> Debouncer<'t, A, C> {
    /// `thresholds` must be ascending.
    pub fn new(input: A, clock: C, thresholds: &'t [u16]) -> Self {
        debug_assert!(thresholds.windows(2).all(|w| w[0] <= w[1]));
        let last_change = clock.now_millis();
        Self {
            input,
            clock,
            thresholds,
            last_state: None,
            steady: None,
            last_change,
        }
    }

    /// Instantaneous band, unfiltered.
    pub fn read_state(&mut self) -> Option<u8> {
        band_index(self.thresholds, self.input.read())
    }

    /// Sample once and return the steady band.
    ///
    /// A new band is reported only after it has read the same for
    /// [`SETTLE_TIME_MS`]; call on every poll.
    pub fn get_pressed(&mut self) -> Option<u8> {
        let state = self.read_state();
        let now = self.clock.now_millis();

        if state != self.last_state {
            self.last_state = state;
            self.last_change = now;
        } else if state != self.steady && elapsed(now, self.last_change) >= SETTLE_TIME_MS {
            self.steady = state;
        }

        self.steady
    }

    /// Last reported band without sampling.
    #[must_use]
    pub fn steady(&self) -> Option<u8> {
        self.steady
    }
}

/// Band-to-buttons map for one ladder.
///
/// `map[i]` holds the buttons pressed while the ladder reads band `i`.
#[derive(Debug, Clone, Copy)]
pub struct ButtonLadder<'m> {
    side: Side,
    map: &'m [Buttons],
}

impl<'m> ButtonLadder<'m> {
    pub const fn new(side: Side, map: &'m [Buttons]) -> Self {
        Self { side, map }
    }

    #[must_use]
    pub fn side(&self) -> Side {
        self.side
    }

    /// Every button this ladder can report.
    #[must_use]
    pub fn mask(&self) -> Buttons {
        self.map.iter().fold(Buttons::NONE, |acc, &b| acc | b)
    }

    /// Buttons pressed for `band`; out-of-range bands press nothing.
    #[must_use]
    pub fn buttons_for(&self, band: Option<u8>) -> Buttons {
        band.and_then(|b| self.map.get(usize::from(b)))
            .copied()
            .unwrap_or(Buttons::NONE)
    }

    /// Apply a debounced band to the sender.
    ///
    /// Buttons owned by other inputs on the same side are left alone.
    pub fn drive<P: SerialPort, C: Clock>(&self, band: Option<u8>, sender: &mut Sender<P, C>) {
        let pressed = self.buttons_for(band);
        sender.set_buttons(self.side, self.mask() & !pressed, false);
        sender.set_buttons(self.side, pressed, true);
    }
}
