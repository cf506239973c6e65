//! Raw ADC samples to normalized stick and trigger values.

/// Full scale of a 12-bit ADC.
pub const ADC_MAX: u16 = 4095;

/// Calibration for one joystick axis.
///
/// Readings are split at `center` so an off-center pot still reaches both
/// ends; `deadzone` is in raw counts around the center.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AxisCalibration {
    pub min: u16,
    pub center: u16,
    pub max: u16,
    pub deadzone: u16,
    pub invert: bool,
}

impl AxisCalibration {
    /// Full ADC range, ideal center, small deadzone.
    pub const DEFAULT: Self = Self {
        min: 0,
        center: ADC_MAX / 2 + 1,
        max: ADC_MAX,
        deadzone: 32,
        invert: false,
    };

    #[must_use]
    pub const fn inverted(mut self) -> Self {
        self.invert = !self.invert;
        self
    }

    /// Map a raw sample to `[-1.0, 1.0]`.
    #[must_use]
    pub fn normalize(&self, raw: u16) -> f32 {
        let offset = i32::from(raw) - i32::from(self.center);
        let dead = i32::from(self.deadzone);
        if offset.abs() <= dead {
            return 0.0;
        }

        let span = if offset > 0 {
            i32::from(self.max) - i32::from(self.center) - dead
        } else {
            i32::from(self.center) - i32::from(self.min) - dead
        };
        if span <= 0 {
            return 0.0;
        }

        let magnitude = (offset.abs() - dead) as f32 / span as f32;
        let value = if magnitude > 1.0 { 1.0 } else { magnitude };
        if (offset > 0) != self.invert {
            value
        } else {
            -value
        }
    }
}

impl Default for AxisCalibration {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Calibration for one trigger pot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TriggerCalibration {
    /// Reading when released.
    pub min: u16,
    /// Reading when fully pulled.
    pub max: u16,
}

impl TriggerCalibration {
    pub const DEFAULT: Self = Self { min: 0, max: ADC_MAX };

    /// Map a raw sample to `[0.0, 1.0]`. A pot wired backwards (`min > max`) works too.
    #[must_use]
    pub fn normalize(&self, raw: u16) -> f32 {
        let (lo, hi, raw) = (i32::from(self.min), i32::from(self.max), i32::from(raw));
        if lo == hi {
            return 0.0;
        }
        let value = (raw - lo) as f32 / (hi - lo) as f32;
        value.clamp(0.0, 1.0)
    }
}

impl Default for TriggerCalibration {
    fn default() -> Self {
        Self::DEFAULT
    }
}
