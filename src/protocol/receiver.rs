// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Cooperative frame receiver for the positioning link.
//!
//! The receiver pulls bytes from a [`BytePort`] one at a time and runs a
//! caller-supplied hook once for every empty poll, so the waits between
//! bytes double as motion-control ticks. One [`Receiver::receive`] call
//! scans for the doubled header under a poll budget, then reads the four
//! payload bytes and hands back the decoded [`Frame`].
//!
//! The receiver itself keeps no timing; pacing lives entirely in the hook.

use crate::protocol::frame::{Frame, HEADER_BYTE, PAYLOAD_LEN};

/// Byte-oriented serial link as the receiver sees it.
pub trait BytePort {
    /// Number of received bytes ready to read without blocking.
    fn bytes_available(&mut self) -> usize;

    /// Pull the next received byte. Only meaningful after
    /// [`bytes_available`](Self::bytes_available) reported at least one.
    fn read_byte(&mut self) -> u8;

    /// Queue one byte for transmission.
    fn write_byte(&mut self, byte: u8);
}

/// Default first-byte scan budget, in polls.
pub const SCAN_LIMIT: u32 = 100;

/// Link tuning knobs.
#[derive(Debug, Clone, Copy)]
pub struct LinkConfig {
    /// Sentinel byte the header doubles.
    pub header: u8,
    /// Polls (reads or empty checks) allowed while scanning for the first
    /// header byte before the attempt times out.
    pub scan_limit: u32,
    /// Polls allowed per in-frame wait (second header byte and each payload
    /// byte). `None` waits forever, stepping the hook each poll.
    pub wait_limit: Option<u32>,
    /// Mirror scan progress as text on the port. Off by default since the
    /// same link carries frames.
    pub trace: bool,
}

impl Default for LinkConfig {
    fn default() -> Self {
        Self {
            header: HEADER_BYTE,
            scan_limit: SCAN_LIMIT,
            wait_limit: None,
            trace: false,
        }
    }
}

/// Link-level receive failures. Both are recoverable; the caller keeps its
/// previous goal and simply tries again next cycle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LinkError {
    /// The header scan budget ran out before a sentinel appeared.
    SyncTimeout,
    /// A bounded in-frame wait expired before the next byte arrived.
    Stalled,
}

/// Header scan position.
enum Scan {
    /// Looking for the first sentinel byte.
    First,
    /// First sentinel seen; the next byte decides the header.
    Second,
}

/// Pull-based frame receiver. Holds only configuration; all scan state is
/// local to a single call.
pub struct Receiver {
    cfg: LinkConfig,
}

impl Receiver {
    pub fn new(cfg: LinkConfig) -> Self {
        Self { cfg }
    }

    #[inline]
    pub fn config(&self) -> &LinkConfig {
        &self.cfg
    }

    /// Scan for the doubled header.
    ///
    /// Every poll for the first byte, empty or not, counts against
    /// `scan_limit`, so a call can neither hang nor consume more than the
    /// budget in noise. Empty polls run `pace` once before rechecking. A
    /// sentinel followed by a non-sentinel drops both bytes and resumes
    /// the first-byte scan with the budget it has left.
    pub fn sync<P, F>(&self, port: &mut P, pace: &mut F) -> Result<(), LinkError>
    where
        P: BytePort,
        F: FnMut(),
    {
        self.trace_str(port, "searching\r\n");

        let mut polls: u32 = 0;
        let mut state = Scan::First;
        loop {
            match state {
                Scan::First => {
                    if polls >= self.cfg.scan_limit {
                        return Err(LinkError::SyncTimeout);
                    }
                    polls += 1;

                    if port.bytes_available() > 0 {
                        if port.read_byte() == self.cfg.header {
                            state = Scan::Second;
                        }
                    } else {
                        self.trace_str(port, ".");
                        pace();
                    }
                }
                Scan::Second => {
                    if self.wait_byte(port, pace)? == self.cfg.header {
                        self.trace_str(port, "header ok\r\n");
                        return Ok(());
                    }
                    self.trace_str(port, "header bad\r\n");
                    state = Scan::First;
                }
            }
        }
    }

    /// Read the four payload bytes after a successful [`sync`](Self::sync).
    ///
    /// Payload bytes are raw; a sentinel value here is data, not a header.
    pub fn read_targets<P, F>(&self, port: &mut P, pace: &mut F) -> Result<Frame, LinkError>
    where
        P: BytePort,
        F: FnMut(),
    {
        let mut payload = [0u8; PAYLOAD_LEN];
        for slot in payload.iter_mut() {
            *slot = self.wait_byte(port, pace)?;
        }
        Ok(Frame::from_payload(payload))
    }

    /// One full inbound attempt: header scan, then payload.
    pub fn receive<P, F>(&self, port: &mut P, pace: &mut F) -> Result<Frame, LinkError>
    where
        P: BytePort,
        F: FnMut(),
    {
        self.sync(port, pace)?;
        self.read_targets(port, pace)
    }

    /// Wait for one byte, running `pace` on every empty poll. The per-byte
    /// poll counter starts fresh on each call.
    fn wait_byte<P, F>(&self, port: &mut P, pace: &mut F) -> Result<u8, LinkError>
    where
        P: BytePort,
        F: FnMut(),
    {
        let mut polls: u32 = 0;
        loop {
            if port.bytes_available() > 0 {
                return Ok(port.read_byte());
            }
            if let Some(limit) = self.cfg.wait_limit {
                if polls >= limit {
                    return Err(LinkError::Stalled);
                }
            }
            polls += 1;

            self.trace_str(port, ".");
            pace();
        }
    }

    fn trace_str<P: BytePort>(&self, port: &mut P, s: &str) {
        if self.cfg.trace {
            for &b in s.as_bytes() {
                port.write_byte(b);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::ScriptPort;

    fn receiver() -> Receiver {
        Receiver::new(LinkConfig::default())
    }

    #[test]
    fn syncs_on_an_immediate_header() {
        let mut port = ScriptPort::bytes(&[0xAA, 0xAA]);
        let mut paces = 0u32;
        let result = receiver().sync(&mut port, &mut || paces += 1);
        assert_eq!(result, Ok(()));
        assert_eq!(paces, 0);
    }

    #[test]
    fn skips_leading_noise() {
        let mut port = ScriptPort::bytes(&[0x12, 0x34, 0x56, 0xAA, 0xAA]);
        let result = receiver().sync(&mut port, &mut || {});
        assert_eq!(result, Ok(()));
        assert_eq!(port.remaining(), 0);
    }

    #[test]
    fn recovers_from_a_false_header() {
        // Sentinel + non-sentinel is dropped, then the real header lands.
        let mut port = ScriptPort::bytes(&[0xAA, 0x51, 0xAA, 0xAA]);
        let result = receiver().sync(&mut port, &mut || {});
        assert_eq!(result, Ok(()));
    }

    #[test]
    fn noise_exhausts_the_scan_budget() {
        let noise = [0x55u8; 150];
        let mut port = ScriptPort::bytes(&noise);
        let result = receiver().sync(&mut port, &mut || {});
        assert_eq!(result, Err(LinkError::SyncTimeout));
        // Exactly the budget's worth of bytes consumed.
        assert_eq!(port.remaining(), 50);
    }

    #[test]
    fn silence_exhausts_the_scan_budget_while_pacing() {
        let mut port = ScriptPort::new();
        let mut paces = 0u32;
        let result = receiver().sync(&mut port, &mut || paces += 1);
        assert_eq!(result, Err(LinkError::SyncTimeout));
        assert_eq!(paces, SCAN_LIMIT);
    }

    #[test]
    fn scan_budget_spans_a_false_header() {
        let cfg = LinkConfig {
            scan_limit: 10,
            ..LinkConfig::default()
        };
        let mut port = ScriptPort::bytes(&[0xAA, 0x51]).then_bytes(&[0x55; 20]);
        let result = Receiver::new(cfg).sync(&mut port, &mut || {});
        assert_eq!(result, Err(LinkError::SyncTimeout));
        // One poll went to the sentinel, nine more to noise; the second
        // header byte rode a separate wait.
        assert_eq!(port.remaining(), 11);
    }

    #[test]
    fn paces_once_per_gap_poll_in_the_scan() {
        let mut port = ScriptPort::new()
            .then_gap(3)
            .then_bytes(&[0xAA, 0xAA]);
        let mut paces = 0u32;
        let result = receiver().sync(&mut port, &mut || paces += 1);
        assert_eq!(result, Ok(()));
        assert_eq!(paces, 3);
    }

    #[test]
    fn paces_while_waiting_for_the_second_header_byte() {
        let mut port = ScriptPort::bytes(&[0xAA]).then_gap(5).then_byte(0xAA);
        let mut paces = 0u32;
        let result = receiver().sync(&mut port, &mut || paces += 1);
        assert_eq!(result, Ok(()));
        assert_eq!(paces, 5);
    }

    #[test]
    fn receives_a_clean_frame() {
        let mut port = ScriptPort::bytes(&[0xAA, 0xAA, 0x32, 0x00, 0x0A, 0x00]);
        let frame = receiver().receive(&mut port, &mut || {});
        assert_eq!(frame, Ok(Frame::new(50, 10)));
    }

    #[test]
    fn noise_then_frame_decodes_the_payload() {
        let mut port =
            ScriptPort::bytes(&[0x00, 0xFF, 0x7E, 0xAA, 0xAA, 0xFE, 0x05, 0x32, 0x00]);
        let frame = receiver().receive(&mut port, &mut || {});
        assert_eq!(frame, Ok(Frame::new(259, 50)));
    }

    #[test]
    fn reads_exactly_one_frame_of_bytes() {
        let mut port = ScriptPort::bytes(&[0xAA, 0xAA, 0x01, 0x00, 0x02, 0x00, 0x77]);
        let frame = receiver().receive(&mut port, &mut || {});
        assert_eq!(frame, Ok(Frame::new(1, 2)));
        // The byte after the payload stays on the line for the next call.
        assert_eq!(port.remaining(), 1);
    }

    #[test]
    fn receives_an_overflow_frame_with_gaps() {
        let mut port = ScriptPort::bytes(&[0xAA])
            .then_gap(1)
            .then_byte(0xAA)
            .then_bytes(&[0xFE])
            .then_gap(2)
            .then_bytes(&[0x05, 0x32])
            .then_gap(1)
            .then_byte(0x00);
        let mut paces = 0u32;
        let frame = receiver().receive(&mut port, &mut || paces += 1);
        assert_eq!(frame, Ok(Frame::new(259, 50)));
        assert_eq!(paces, 4);
    }

    #[test]
    fn sentinel_bytes_in_the_payload_are_data() {
        let mut port = ScriptPort::bytes(&[0xAA; 6]);
        let frame = receiver().receive(&mut port, &mut || {});
        assert_eq!(frame, Ok(Frame::new(170, 170)));
    }

    #[test]
    fn bounded_wait_reports_a_stall() {
        let cfg = LinkConfig {
            wait_limit: Some(8),
            ..LinkConfig::default()
        };
        // Header and one payload byte, then the line goes dead.
        let mut port = ScriptPort::bytes(&[0xAA, 0xAA, 0x32]);
        let mut paces = 0u32;
        let result = Receiver::new(cfg).receive(&mut port, &mut || paces += 1);
        assert_eq!(result, Err(LinkError::Stalled));
        assert_eq!(paces, 8);
    }

    #[test]
    fn unbounded_wait_rides_out_a_long_gap() {
        let mut port = ScriptPort::bytes(&[0xAA, 0xAA])
            .then_gap(500)
            .then_bytes(&[0x32, 0x00, 0x0A, 0x00]);
        let mut paces = 0u32;
        let frame = receiver().receive(&mut port, &mut || paces += 1);
        assert_eq!(frame, Ok(Frame::new(50, 10)));
        assert_eq!(paces, 500);
    }

    #[test]
    fn trace_mirrors_the_scan_on_the_port() {
        let cfg = LinkConfig {
            trace: true,
            ..LinkConfig::default()
        };
        let mut port = ScriptPort::new().then_gap(1).then_bytes(&[0xAA, 0xAA]);
        let result = Receiver::new(cfg).sync(&mut port, &mut || {});
        assert_eq!(result, Ok(()));
        assert_eq!(port.written, b"searching\r\n.header ok\r\n");
    }

    #[test]
    fn trace_reports_a_rejected_header() {
        let cfg = LinkConfig {
            trace: true,
            ..LinkConfig::default()
        };
        let mut port = ScriptPort::bytes(&[0xAA, 0x51, 0xAA, 0xAA]);
        let result = Receiver::new(cfg).sync(&mut port, &mut || {});
        assert_eq!(result, Ok(()));
        assert_eq!(port.written, b"searching\r\nheader bad\r\nheader ok\r\n");
    }

    #[test]
    fn quiet_by_default() {
        let mut port = ScriptPort::new().then_gap(2).then_bytes(&[0xAA, 0xAA]);
        let result = receiver().sync(&mut port, &mut || {});
        assert_eq!(result, Ok(()));
        assert!(port.written.is_empty());
    }
}
