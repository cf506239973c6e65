//! Controller state types: Side, Axis, Direction, Buttons, ControlState, RawState.

use core::ops::{BitAnd, BitAndAssign, BitOr, BitOrAssign, Not};

use crate::scale::{axis_to_byte, byte_to_axis, byte_to_trigger, trigger_to_byte};

/// Left or right half of the controller.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Side {
    Left,
    Right,
}

impl Side {
    pub const ALL: [Side; 2] = [Side::Left, Side::Right];

    /// Array slot for per-side storage.
    #[inline]
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Side::Left => 0,
            Side::Right => 1,
        }
    }
}

/// Joystick axis.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Axis {
    X,
    Y,
}

impl Axis {
    pub const ALL: [Axis; 2] = [Axis::X, Axis::Y];

    #[inline]
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Axis::X => 0,
            Axis::Y => 1,
        }
    }
}

/// Direction of a face button or pad button.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Direction {
    Left,
    Right,
    Up,
    Down,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Left,
        Direction::Right,
        Direction::Up,
        Direction::Down,
    ];
}

/// Button state of one controller side as a bitfield.
///
/// Bit layout matches the wire byte:
///
/// | Bit | Button     |
/// |-----|------------|
/// | 0   | Left       |
/// | 1   | Right      |
/// | 2   | Up         |
/// | 3   | Down       |
/// | 4   | JoyButton  |
/// | 5   | Bumper     |
///
/// # Example
///
/// ```
/// use xlink_proto::Buttons;
///
/// let buttons = Buttons::UP | Buttons::BUMPER;
/// assert!(buttons.contains(Buttons::UP));
/// assert!(!buttons.contains(Buttons::DOWN));
/// ```
#[derive(Clone, Copy, Default, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Buttons(pub u8);

impl Buttons {
    pub const LEFT: Self = Self(1 << 0);
    pub const RIGHT: Self = Self(1 << 1);
    pub const UP: Self = Self(1 << 2);
    pub const DOWN: Self = Self(1 << 3);
    pub const JOY_BUTTON: Self = Self(1 << 4);
    pub const BUMPER: Self = Self(1 << 5);

    /// No buttons pressed.
    pub const NONE: Self = Self(0);

    /// Every defined button bit.
    pub const ALL: Self = Self(0b0011_1111);

    /// Button bit for a direction.
    #[inline]
    #[must_use]
    pub const fn direction(dir: Direction) -> Self {
        match dir {
            Direction::Left => Self::LEFT,
            Direction::Right => Self::RIGHT,
            Direction::Up => Self::UP,
            Direction::Down => Self::DOWN,
        }
    }

    /// Check if all of the given button(s) are pressed.
    #[inline]
    #[must_use]
    pub const fn contains(self, button: Buttons) -> bool {
        (self.0 & button.0) == button.0
    }

    /// Check if any of the given button(s) are pressed.
    #[inline]
    #[must_use]
    pub const fn intersects(self, button: Buttons) -> bool {
        (self.0 & button.0) != 0
    }

    /// Set or clear button(s).
    #[inline]
    pub fn set(&mut self, button: Buttons, pressed: bool) {
        if pressed {
            self.0 |= button.0;
        } else {
            self.0 &= !button.0;
        }
    }

    /// Buttons pressed in `self` that were released in `previous`.
    #[inline]
    #[must_use]
    pub const fn rising_edges(self, previous: Buttons) -> Self {
        Self(self.0 & !previous.0)
    }

    #[inline]
    #[must_use]
    pub const fn raw(self) -> u8 {
        self.0
    }

    #[inline]
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }
}

impl From<Direction> for Buttons {
    fn from(dir: Direction) -> Self {
        Self::direction(dir)
    }
}

impl BitOr for Buttons {
    type Output = Self;

    #[inline]
    fn bitor(self, rhs: Self) -> Self::Output {
        Self(self.0 | rhs.0)
    }
}

impl BitOrAssign for Buttons {
    #[inline]
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

impl BitAnd for Buttons {
    type Output = Self;

    #[inline]
    fn bitand(self, rhs: Self) -> Self::Output {
        Self(self.0 & rhs.0)
    }
}

impl BitAndAssign for Buttons {
    #[inline]
    fn bitand_assign(&mut self, rhs: Self) {
        self.0 &= rhs.0;
    }
}

impl Not for Buttons {
    type Output = Self;

    #[inline]
    fn not(self) -> Self::Output {
        Self(!self.0)
    }
}

/// Destination of one body byte of a packet.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Target {
    Joystick(Side, Axis),
    Trigger(Side),
    Buttons(Side),
}

/// Sender-side control state in normalized units.
///
/// - Joystick axes: `[-1.0, 1.0]`
/// - Triggers: `[0.0, 1.0]`
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ControlState {
    pub joysticks: [[f32; 2]; 2],
    pub triggers: [f32; 2],
    pub buttons: [Buttons; 2],
}

impl ControlState {
    /// Sticks centered, triggers released, no buttons pressed.
    #[must_use]
    pub const fn neutral() -> Self {
        Self {
            joysticks: [[0.0; 2]; 2],
            triggers: [0.0; 2],
            buttons: [Buttons::NONE; 2],
        }
    }

    #[inline]
    #[must_use]
    pub fn joystick(&self, side: Side, axis: Axis) -> f32 {
        self.joysticks[side.index()][axis.index()]
    }

    #[inline]
    #[must_use]
    pub fn trigger(&self, side: Side) -> f32 {
        self.triggers[side.index()]
    }

    #[inline]
    #[must_use]
    pub fn buttons(&self, side: Side) -> Buttons {
        self.buttons[side.index()]
    }

    /// Quantize every field to its wire byte.
    #[must_use]
    pub fn quantize(&self) -> RawState {
        let mut raw = RawState::neutral();
        for side in Side::ALL {
            for axis in Axis::ALL {
                raw.joysticks[side.index()][axis.index()] = axis_to_byte(self.joystick(side, axis));
            }
            raw.triggers[side.index()] = trigger_to_byte(self.trigger(side));
            raw.buttons[side.index()] = self.buttons(side);
        }
        raw
    }
}

impl Default for ControlState {
    fn default() -> Self {
        Self::neutral()
    }
}

/// Control state as it travels on the wire: one byte per field.
///
/// The receiver keeps one of these as its mirror of the sender.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RawState {
    pub joysticks: [[u8; 2]; 2],
    pub triggers: [u8; 2],
    pub buttons: [Buttons; 2],
}

/// Wire byte of a centered joystick axis.
pub const AXIS_CENTER: u8 = 128;

impl RawState {
    /// Sticks centered, triggers released, no buttons pressed.
    #[must_use]
    pub const fn neutral() -> Self {
        Self {
            joysticks: [[AXIS_CENTER; 2]; 2],
            triggers: [0; 2],
            buttons: [Buttons::NONE; 2],
        }
    }

    /// Wire byte currently held for `target`.
    #[inline]
    #[must_use]
    pub fn get(&self, target: Target) -> u8 {
        match target {
            Target::Joystick(side, axis) => self.joysticks[side.index()][axis.index()],
            Target::Trigger(side) => self.triggers[side.index()],
            Target::Buttons(side) => self.buttons[side.index()].raw(),
        }
    }

    /// Store a wire byte into `target`.
    #[inline]
    pub fn set(&mut self, target: Target, value: u8) {
        match target {
            Target::Joystick(side, axis) => self.joysticks[side.index()][axis.index()] = value,
            Target::Trigger(side) => self.triggers[side.index()] = value,
            Target::Buttons(side) => self.buttons[side.index()] = Buttons(value),
        }
    }

    /// Decode back to normalized units.
    #[must_use]
    pub fn to_control_state(&self) -> ControlState {
        let mut state = ControlState::neutral();
        for side in Side::ALL {
            for axis in Axis::ALL {
                state.joysticks[side.index()][axis.index()] =
                    byte_to_axis(self.joysticks[side.index()][axis.index()]);
            }
            state.triggers[side.index()] = byte_to_trigger(self.triggers[side.index()]);
            state.buttons[side.index()] = self.buttons[side.index()];
        }
        state
    }
}

impl Default for RawState {
    fn default() -> Self {
        Self::neutral()
    }
}
