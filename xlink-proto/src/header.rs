//! Packet header and the field-group table.
//!
//! Every packet starts with one header byte. Each set bit names a field group
//! whose bytes follow the header, in ascending bit order:
//!
//! | Bit | Group         | Body bytes                 |
//! |-----|---------------|----------------------------|
//! | 0   | Left joystick | joy left X, joy left Y     |
//! | 1   | Right joystick| joy right X, joy right Y   |
//! | 2   | Left trigger  | trigger left               |
//! | 3   | Right trigger | trigger right              |
//! | 4   | Left buttons  | buttons left               |
//! | 5   | Right buttons | buttons right              |
//! | 6-7 | unused        | -                          |
//!
//! [`FIELD_GROUPS`] is the single source of truth for this mapping; both the
//! encoder and the [`FrameParser`](crate::FrameParser) walk it in order.

use core::ops::{BitAnd, BitOr, BitOrAssign, Not};

use heapless::Vec;

use crate::types::{Axis, Side, Target};

/// Largest packet body: two joysticks (4) + two triggers (2) + two button bytes (2).
pub const MAX_BODY_LEN: usize = 8;

/// Ordered body byte destinations derived from a header.
pub type Targets = Vec<Target, MAX_BODY_LEN>;

/// Packet header / dirty-field bitmask.
#[derive(Clone, Copy, Default, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Header(pub u8);

impl Header {
    pub const LEFT_JOY: Self = Self(1 << 0);
    pub const RIGHT_JOY: Self = Self(1 << 1);
    pub const LEFT_TRIGGER: Self = Self(1 << 2);
    pub const RIGHT_TRIGGER: Self = Self(1 << 3);
    pub const LEFT_BUTTONS: Self = Self(1 << 4);
    pub const RIGHT_BUTTONS: Self = Self(1 << 5);

    pub const EMPTY: Self = Self(0);
    pub const ALL: Self = Self(0b0011_1111);

    /// Groups that bypass the analog throttle.
    pub const NON_ANALOG: Self = Self(Self::LEFT_BUTTONS.0 | Self::RIGHT_BUTTONS.0);

    /// First half of a full send.
    pub const LEFT_HALF: Self = Self(Self::LEFT_JOY.0 | Self::LEFT_TRIGGER.0 | Self::LEFT_BUTTONS.0);

    /// Second half of a full send.
    pub const RIGHT_HALF: Self =
        Self(Self::RIGHT_JOY.0 | Self::RIGHT_TRIGGER.0 | Self::RIGHT_BUTTONS.0);

    #[inline]
    #[must_use]
    pub const fn joystick(side: Side) -> Self {
        FieldGroup::Joystick(side).header()
    }

    #[inline]
    #[must_use]
    pub const fn trigger(side: Side) -> Self {
        FieldGroup::Trigger(side).header()
    }

    #[inline]
    #[must_use]
    pub const fn buttons(side: Side) -> Self {
        FieldGroup::Buttons(side).header()
    }

    #[inline]
    #[must_use]
    pub const fn contains(self, other: Header) -> bool {
        (self.0 & other.0) == other.0
    }

    #[inline]
    #[must_use]
    pub const fn intersects(self, other: Header) -> bool {
        (self.0 & other.0) != 0
    }

    #[inline]
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    #[inline]
    #[must_use]
    pub const fn raw(self) -> u8 {
        self.0
    }

    /// Field groups named by this header, in wire order. Unused bits are ignored.
    pub fn groups(self) -> impl Iterator<Item = FieldGroup> {
        FIELD_GROUPS
            .iter()
            .filter(move |layout| self.contains(layout.bit))
            .map(|layout| layout.group)
    }

    /// Number of body bytes that follow this header.
    #[must_use]
    pub fn body_len(self) -> usize {
        self.groups().map(|group| group.targets().len()).sum()
    }

    /// Destination of every body byte, in wire order.
    #[must_use]
    pub fn targets(self) -> Targets {
        let mut targets = Targets::new();
        for group in self.groups() {
            // six groups carry eight bytes in total, so this never overflows
            let _ = targets.extend_from_slice(group.targets());
        }
        targets
    }
}

impl BitOr for Header {
    type Output = Self;

    #[inline]
    fn bitor(self, rhs: Self) -> Self::Output {
        Self(self.0 | rhs.0)
    }
}

impl BitOrAssign for Header {
    #[inline]
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

impl BitAnd for Header {
    type Output = Self;

    #[inline]
    fn bitand(self, rhs: Self) -> Self::Output {
        Self(self.0 & rhs.0)
    }
}

impl Not for Header {
    type Output = Self;

    #[inline]
    fn not(self) -> Self::Output {
        Self(!self.0)
    }
}

/// A group of fields that is marked dirty and transmitted together.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FieldGroup {
    Joystick(Side),
    Trigger(Side),
    Buttons(Side),
}

impl FieldGroup {
    /// Position of this group in [`FIELD_GROUPS`], which is also its header bit index.
    #[inline]
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            FieldGroup::Joystick(Side::Left) => 0,
            FieldGroup::Joystick(Side::Right) => 1,
            FieldGroup::Trigger(Side::Left) => 2,
            FieldGroup::Trigger(Side::Right) => 3,
            FieldGroup::Buttons(Side::Left) => 4,
            FieldGroup::Buttons(Side::Right) => 5,
        }
    }

    /// Table row for this group.
    #[inline]
    #[must_use]
    pub fn layout(self) -> &'static GroupLayout {
        &FIELD_GROUPS[self.index()]
    }

    #[inline]
    #[must_use]
    pub const fn header(self) -> Header {
        Header(1 << self.index())
    }

    #[inline]
    #[must_use]
    pub fn targets(self) -> &'static [Target] {
        self.layout().targets
    }

    /// Analog groups are rate limited by the sender; buttons are not.
    #[inline]
    #[must_use]
    pub const fn is_analog(self) -> bool {
        !matches!(self, FieldGroup::Buttons(_))
    }
}

/// One row of the wire format table.
#[derive(Debug)]
pub struct GroupLayout {
    pub group: FieldGroup,
    pub bit: Header,
    /// Body bytes of this group in wire order; the length is the encoded size.
    pub targets: &'static [Target],
}

/// Field group ↔ header bit ↔ body bytes, in wire order.
pub static FIELD_GROUPS: [GroupLayout; 6] = [
    GroupLayout {
        group: FieldGroup::Joystick(Side::Left),
        bit: Header::LEFT_JOY,
        targets: &[
            Target::Joystick(Side::Left, Axis::X),
            Target::Joystick(Side::Left, Axis::Y),
        ],
    },
    GroupLayout {
        group: FieldGroup::Joystick(Side::Right),
        bit: Header::RIGHT_JOY,
        targets: &[
            Target::Joystick(Side::Right, Axis::X),
            Target::Joystick(Side::Right, Axis::Y),
        ],
    },
    GroupLayout {
        group: FieldGroup::Trigger(Side::Left),
        bit: Header::LEFT_TRIGGER,
        targets: &[Target::Trigger(Side::Left)],
    },
    GroupLayout {
        group: FieldGroup::Trigger(Side::Right),
        bit: Header::RIGHT_TRIGGER,
        targets: &[Target::Trigger(Side::Right)],
    },
    GroupLayout {
        group: FieldGroup::Buttons(Side::Left),
        bit: Header::LEFT_BUTTONS,
        targets: &[Target::Buttons(Side::Left)],
    },
    GroupLayout {
        group: FieldGroup::Buttons(Side::Right),
        bit: Header::RIGHT_BUTTONS,
        targets: &[Target::Buttons(Side::Right)],
    },
];
