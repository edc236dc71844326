// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Target frame layout for the positioning link.
//!
//! A frame is six bytes: a doubled sentinel header followed by the X and Y
//! angle pairs. The same layout serves both directions; inbound frames carry
//! goals and the outbound echo carries current positions.
//!
//! ```text
//! [0xAA, 0xAA, x_hi, x_lo, y_hi, y_lo]
//! ```
//!
//! There is no checksum. Corruption is recovered by resynchronizing on the
//! next header.

use crate::protocol::angle::{decode_angle, encode_angle, Angle};

/// Sync byte for the protocol, sent twice at the start of every frame.
pub const HEADER_BYTE: u8 = 0xAA;

/// Number of header bytes.
pub const HEADER_LEN: usize = 2;

/// Number of payload bytes (two angle pairs).
pub const PAYLOAD_LEN: usize = 4;

/// Total frame length on the wire.
pub const FRAME_LEN: usize = HEADER_LEN + PAYLOAD_LEN;

/// One decoded target (or position report) pair.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Frame {
    pub x: Angle,
    pub y: Angle,
}

impl Frame {
    pub fn new(x: Angle, y: Angle) -> Self {
        Self { x, y }
    }

    /// Decode the four payload bytes following a valid header.
    pub fn from_payload(payload: [u8; PAYLOAD_LEN]) -> Self {
        Self {
            x: decode_angle(payload[0], payload[1]),
            y: decode_angle(payload[2], payload[3]),
        }
    }

    /// Full wire frame, header included.
    pub fn to_bytes(self) -> [u8; FRAME_LEN] {
        let [x_hi, x_lo] = encode_angle(self.x);
        let [y_hi, y_lo] = encode_angle(self.y);
        [HEADER_BYTE, HEADER_BYTE, x_hi, x_lo, y_hi, y_lo]
    }
}
