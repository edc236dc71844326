// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! USART wrapper for the positioning link.
//!
//! Owns both directions of the port: nonblocking receive through a one-byte
//! pending buffer (so `bytes_available` can answer without consuming), and
//! blocking transmit with a few plain-text helpers for bring-up messages.
//!
//! Note: When using `writeln!`, be sure to include `\r` (CR) in the format
//! string to ensure correct line endings on the terminal.
//!
//! To watch the link from the host machine:
//! ```
//! $ screen /dev/tty.usbmodem* <baud_rate>
//! ```

use core::fmt;
use nb::block;

use stm32f7xx_hal::{
    prelude::*,
    serial::{Instance, Pins, Rx, Serial, Tx},
};

use crate::protocol::receiver::BytePort;

pub struct Usart<U: Instance> {
    tx: Tx<U>,
    rx: Rx<U>,
    pending: Option<u8>,
}

impl<U: Instance> Usart<U> {
    pub fn new<PINS: Pins<U>>(serial: Serial<U, PINS>) -> Self {
        let (tx, rx) = serial.split();
        Self {
            tx,
            rx,
            pending: None,
        }
    }

    /// Poll the receive register into the pending buffer.
    ///
    /// Line errors (overrun, framing, noise) drop the byte; the framed
    /// protocol recovers by resynchronizing on the next header.
    fn poll_rx(&mut self) {
        if self.pending.is_some() {
            return;
        }
        match self.rx.read() {
            Ok(b) => self.pending = Some(b),
            Err(nb::Error::WouldBlock) => {}
            Err(nb::Error::Other(_)) => {}
        }
    }

    #[inline]
    pub fn write_byte(&mut self, b: u8) {
        let _ = block!(self.tx.write(b));
    }

    pub fn write_str(&mut self, s: &str) {
        for &b in s.as_bytes() {
            self.write_byte(b);
        }
    }

    /// Write string and CRLF terminator.
    #[inline]
    pub fn println(&mut self, s: &str) {
        self.write_str(s);
        self.write_str("\r\n");
    }

    /// Block until the hardware TX FIFO/drain is flushed.
    #[inline]
    pub fn flush(&mut self) {
        let _ = block!(self.tx.flush());
    }

    pub fn print_u32(&mut self, mut n: u32) {
        let mut buf = [0u8; 10];
        let mut i = buf.len();
        if n == 0 {
            self.write_byte(b'0');
            return;
        }
        while n > 0 {
            i -= 1;
            buf[i] = b'0' + (n % 10) as u8;
            n /= 10;
        }
        for &b in &buf[i..] {
            self.write_byte(b);
        }
    }
}

impl<U: Instance> BytePort for Usart<U> {
    fn bytes_available(&mut self) -> usize {
        self.poll_rx();
        usize::from(self.pending.is_some())
    }

    fn read_byte(&mut self) -> u8 {
        self.poll_rx();
        self.pending.take().unwrap_or(0)
    }

    fn write_byte(&mut self, byte: u8) {
        Usart::write_byte(self, byte);
    }
}

// Implement `core::fmt::Write` so we can use `write!` / `writeln!` on `Usart`.
impl<U: Instance> fmt::Write for Usart<U> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        Usart::write_str(self, s);
        Ok(())
    }
}
