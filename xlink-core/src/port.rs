//! Collaborator traits: serial transport, millisecond clock, analog input.
//!
//! The endpoints only ever need "is a byte waiting", "read one byte", "write
//! one byte", "what time is it" and "sample this pin". Everything else about
//! the hardware stays on the other side of these traits.

/// Byte-oriented, non-blocking serial transport.
///
/// Writes are fire-and-forget: the radio gives no backpressure or delivery
/// signal, so implementations swallow (and may log) write failures.
pub trait SerialPort {
    /// Check if at least one byte can be read without blocking.
    fn byte_available(&mut self) -> bool;

    /// Read one byte, or `None` if nothing is waiting.
    fn read_byte(&mut self) -> Option<u8>;

    /// Queue one byte for transmission.
    fn write_byte(&mut self, byte: u8);

    /// Queue a run of bytes for transmission.
    fn write_all(&mut self, bytes: &[u8]) {
        for &byte in bytes {
            self.write_byte(byte);
        }
    }
}

impl<T: SerialPort + ?Sized> SerialPort for &mut T {
    fn byte_available(&mut self) -> bool {
        (**self).byte_available()
    }

    fn read_byte(&mut self) -> Option<u8> {
        (**self).read_byte()
    }

    fn write_byte(&mut self, byte: u8) {
        (**self).write_byte(byte);
    }

    fn write_all(&mut self, bytes: &[u8]) {
        (**self).write_all(bytes);
    }
}

/// Monotonic millisecond clock.
///
/// The counter may wrap; callers compare with
/// [`elapsed`](xlink_proto::timing::elapsed).
pub trait Clock {
    fn now_millis(&self) -> u32;
}

impl<C: Clock + ?Sized> Clock for &C {
    fn now_millis(&self) -> u32 {
        (**self).now_millis()
    }
}

/// Raw analog sample source, returning a value in `[0, ADC_MAX]`.
pub trait AnalogInput {
    fn read(&mut self) -> u16;
}

impl<A: AnalogInput + ?Sized> AnalogInput for &mut A {
    fn read(&mut self) -> u16 {
        (**self).read()
    }
}

/// Transport fault recorded by [`IoPort`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PortError {
    /// Reading or polling the receiver failed.
    Read,
    /// Writing to the transmitter failed.
    Write,
}

impl core::fmt::Display for PortError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Read => write!(f, "serial read error"),
            Self::Write => write!(f, "serial write error"),
        }
    }
}

/// [`SerialPort`] over any `embedded_io` peripheral.
///
/// Faults never reach the protocol; the most recent one is kept for the
/// application to inspect with [`IoPort::take_error`].
#[cfg(feature = "embedded-io")]
pub struct IoPort<T> {
    inner: T,
    last_error: Option<PortError>,
    error_count: u32,
}

#[cfg(feature = "embedded-io")]
impl<T> IoPort<T> {
    #[must_use]
    pub fn new(inner: T) -> Self {
        Self {
            inner,
            last_error: None,
            error_count: 0,
        }
    }

    /// Most recent fault since the last call, if any.
    pub fn take_error(&mut self) -> Option<PortError> {
        self.last_error.take()
    }

    /// Faults seen since construction.
    #[must_use]
    pub fn error_count(&self) -> u32 {
        self.error_count
    }

    fn record<E: embedded_io::Error>(&mut self, error: PortError, cause: E) {
        #[cfg(feature = "defmt")]
        defmt::warn!("{}: {}", error, defmt::Debug2Format(&cause.kind()));
        #[cfg(not(feature = "defmt"))]
        let _ = cause;
        self.last_error = Some(error);
        self.error_count = self.error_count.wrapping_add(1);
    }
}

#[cfg(feature = "embedded-io")]
impl<T> SerialPort for IoPort<T>
where
    T: embedded_io::Read + embedded_io::ReadReady + embedded_io::Write,
{
    fn byte_available(&mut self) -> bool {
        match self.inner.read_ready() {
            Ok(ready) => ready,
            Err(e) => {
                self.record(PortError::Read, e);
                false
            }
        }
    }

    fn read_byte(&mut self) -> Option<u8> {
        // read() blocks on an empty buffer, so only call it when data is waiting
        if !self.byte_available() {
            return None;
        }
        let mut byte = [0u8; 1];
        match self.inner.read(&mut byte) {
            Ok(1) => Some(byte[0]),
            Ok(_) => None,
            Err(e) => {
                self.record(PortError::Read, e);
                None
            }
        }
    }

    fn write_byte(&mut self, byte: u8) {
        self.write_all(&[byte]);
    }

    fn write_all(&mut self, bytes: &[u8]) {
        if let Err(e) = self.inner.write_all(bytes) {
            self.record(PortError::Write, e);
        }
    }
}

#[cfg(all(test, feature = "embedded-io"))]
mod tests {
    extern crate std;

    use super::*;
    use crate::mock::ManualClock;
    use crate::rx::Receiver;
    use crate::tx::{Sender, Transmission};
    use embedded_io::{ErrorKind, ErrorType, Read, ReadReady, Write};
    use std::collections::VecDeque;
    use std::vec::Vec;
    use xlink_proto::{Header, Side};

    /// UART double whose calls can be made to fail.
    #[derive(Default)]
    struct FlakyUart {
        rx: VecDeque<u8>,
        tx: Vec<u8>,
        fail_ready: bool,
        fail_read: bool,
        fail_write: bool,
        short_read: bool,
        reads: usize,
    }

    impl FlakyUart {
        fn with_rx(bytes: &[u8]) -> Self {
            Self {
                rx: bytes.iter().copied().collect(),
                ..Self::default()
            }
        }
    }

    impl ErrorType for FlakyUart {
        type Error = ErrorKind;
    }

    impl ReadReady for FlakyUart {
        fn read_ready(&mut self) -> Result<bool, ErrorKind> {
            if self.fail_ready {
                return Err(ErrorKind::Other);
            }
            Ok(self.short_read || !self.rx.is_empty())
        }
    }

    impl Read for FlakyUart {
        fn read(&mut self, buf: &mut [u8]) -> Result<usize, ErrorKind> {
            self.reads += 1;
            if self.fail_read {
                return Err(ErrorKind::Other);
            }
            if self.short_read {
                return Ok(0);
            }
            // a real UART would block here
            let byte = self.rx.pop_front().expect("read() called with nothing waiting");
            buf[0] = byte;
            Ok(1)
        }
    }

    impl Write for FlakyUart {
        fn write(&mut self, buf: &[u8]) -> Result<usize, ErrorKind> {
            if self.fail_write {
                return Err(ErrorKind::Other);
            }
            self.tx.extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> Result<(), ErrorKind> {
            Ok(())
        }
    }

    #[test]
    fn test_write_failure_is_recorded_once() {
        let mut port = IoPort::new(FlakyUart {
            fail_write: true,
            ..FlakyUart::default()
        });

        port.write_all(&[1, 2, 3]);
        assert_eq!(port.error_count(), 1);
        assert_eq!(port.take_error(), Some(PortError::Write));
        assert_eq!(port.take_error(), None);
        assert_eq!(port.error_count(), 1);
    }

    #[test]
    fn test_write_passes_bytes_through() {
        let mut port = IoPort::new(FlakyUart::default());
        port.write_byte(7);
        port.write_all(&[8, 9]);
        assert_eq!(port.inner.tx, [7, 8, 9]);
        assert_eq!(port.take_error(), None);
    }

    #[test]
    fn test_ready_error_reads_as_nothing_waiting() {
        let mut port = IoPort::new(FlakyUart {
            fail_ready: true,
            ..FlakyUart::with_rx(&[0x04, 99])
        });

        assert!(!port.byte_available());
        assert_eq!(port.read_byte(), None);
        assert_eq!(port.inner.reads, 0);
        assert_eq!(port.take_error(), Some(PortError::Read));
        assert_eq!(port.error_count(), 2);
    }

    #[test]
    fn test_read_only_when_ready() {
        let mut port = IoPort::new(FlakyUart::default());
        assert_eq!(port.read_byte(), None);
        assert_eq!(port.inner.reads, 0);

        port.inner.rx.push_back(42);
        assert_eq!(port.read_byte(), Some(42));
        assert_eq!(port.read_byte(), None);
        assert_eq!(port.inner.reads, 1);
    }

    #[test]
    fn test_empty_read_is_no_byte() {
        let mut port = IoPort::new(FlakyUart {
            short_read: true,
            ..FlakyUart::default()
        });
        assert_eq!(port.read_byte(), None);
        assert_eq!(port.take_error(), None);
    }

    #[test]
    fn test_read_failure_is_no_byte() {
        let mut port = IoPort::new(FlakyUart {
            fail_read: true,
            ..FlakyUart::with_rx(&[1])
        });
        assert_eq!(port.read_byte(), None);
        assert_eq!(port.take_error(), Some(PortError::Read));
    }

    #[test]
    fn test_receiver_over_io_port() {
        let uart = FlakyUart::with_rx(&[Header::RIGHT_TRIGGER.raw(), 200]);
        let mut rx = Receiver::new(IoPort::new(uart), ManualClock::starting_at(0));

        assert_eq!(rx.receive_data(), 2);
        assert_eq!(rx.trigger_raw(Side::Right), 200);
        assert!(rx.connected());
        assert_eq!(rx.port_mut().take_error(), None);
    }

    #[test]
    fn test_sender_ignores_write_failure() {
        let uart = FlakyUart {
            fail_write: true,
            ..FlakyUart::default()
        };
        let mut tx = Sender::new(IoPort::new(uart), ManualClock::starting_at(0));

        assert_eq!(tx.update(), Transmission::Full(Header::LEFT_HALF));
        // the packet counts as sent; only the port knows it was lost
        assert_eq!(tx.dirty(), Header::RIGHT_HALF);
        assert_eq!(tx.port_mut().take_error(), Some(PortError::Write));
    }
}
