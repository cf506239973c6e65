//! Incremental frame parser.
//!
//! Feeds on one byte at a time and never buffers a packet: the header is
//! expanded into a list of [`Target`]s and every following byte is routed to
//! the next one. The parser knows nothing about time; the receiver decides
//! when a partial packet is stale and calls [`FrameParser::reset`].
//!
//! There is no checksum. If a body byte is lost, the remaining bytes land in
//! the wrong fields and the next header is read as body data, until a reset.

use crate::header::{Header, Targets};
use crate::types::Target;

/// What a single byte turned out to be.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FrameEvent {
    /// A header started a new packet.
    Header(Header),
    /// A body byte for the given field.
    Field(Target, u8),
}

/// Header-driven byte stream parser.
#[derive(Debug, Clone, Default)]
pub struct FrameParser {
    targets: Targets,
    cursor: usize,
}

impl FrameParser {
    #[must_use]
    pub fn new() -> Self {
        Self {
            targets: Targets::new(),
            cursor: 0,
        }
    }

    /// Abandon any partial packet; the next byte is read as a header.
    pub fn reset(&mut self) {
        self.targets.clear();
        self.cursor = 0;
    }

    /// `true` between packets.
    #[inline]
    #[must_use]
    pub fn is_expecting_header(&self) -> bool {
        self.cursor == self.targets.len()
    }

    /// Body bytes still owed by the current packet.
    #[inline]
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.targets.len() - self.cursor
    }

    /// Feed one byte.
    pub fn push_byte(&mut self, byte: u8) -> FrameEvent {
        if self.is_expecting_header() {
            let header = Header(byte);
            self.targets = header.targets();
            self.cursor = 0;
            FrameEvent::Header(header)
        } else {
            let target = self.targets[self.cursor];
            self.cursor += 1;
            FrameEvent::Field(target, byte)
        }
    }
}
