// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Two-byte angle code used on the positioning link.
//!
//! An angle in `0..=509` travels as a `(hi, lo)` byte pair. Angles up to 254
//! ride directly in the high byte with a zero low byte. Larger angles set the
//! high byte to the overflow marker (254) and carry the remainder in the low
//! byte, so 509 is the largest encodable value.

/// Logical angle unit carried on the link.
pub type Angle = u16;

/// Largest angle the two-byte code can carry (254 + 255).
pub const ANGLE_MAX: Angle = 509;

/// High byte value marking the overflow form.
const MARK: u8 = 254;

/// Wire form of one angle.
///
/// A high byte of exactly 254 always decodes as the overflow form, so the
/// direct form never carries 254-with-remainder ambiguity: encoding puts 254
/// itself in `Direct(254)`, which round-trips through `Overflow(0)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AngleCode {
    /// Angle below the marker, sent as-is in the high byte.
    Direct(u8),
    /// Marker in the high byte; the low byte carries the amount past 254.
    Overflow(u8),
}

impl AngleCode {
    /// Code for an angle, clamping anything past [`ANGLE_MAX`].
    pub fn from_angle(angle: Angle) -> Self {
        let angle = angle.min(ANGLE_MAX);
        if angle > MARK as Angle {
            AngleCode::Overflow((angle - MARK as Angle) as u8)
        } else {
            AngleCode::Direct(angle as u8)
        }
    }

    /// Code carried by a received `(hi, lo)` pair.
    ///
    /// Total: a high byte of 255 (which the encoder never produces) decodes
    /// as `Direct(255)`, and a stray low byte under a non-marker high byte
    /// is ignored. Range policy is left to the actuator.
    pub fn from_bytes(hi: u8, lo: u8) -> Self {
        if hi == MARK {
            AngleCode::Overflow(lo)
        } else {
            AngleCode::Direct(hi)
        }
    }

    /// The angle this code stands for.
    pub fn angle(self) -> Angle {
        match self {
            AngleCode::Direct(hi) => hi as Angle,
            AngleCode::Overflow(lo) => MARK as Angle + lo as Angle,
        }
    }

    /// The `(hi, lo)` pair this code puts on the wire.
    pub fn to_bytes(self) -> [u8; 2] {
        match self {
            AngleCode::Direct(hi) => [hi, 0],
            AngleCode::Overflow(lo) => [MARK, lo],
        }
    }
}

/// Encode an angle into its wire pair, clamping past [`ANGLE_MAX`].
#[inline]
pub fn encode_angle(angle: Angle) -> [u8; 2] {
    AngleCode::from_angle(angle).to_bytes()
}

/// Decode a received wire pair into an angle.
#[inline]
pub fn decode_angle(hi: u8, lo: u8) -> Angle {
    AngleCode::from_bytes(hi, lo).angle()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_every_encodable_angle() {
        for angle in 0..=ANGLE_MAX {
            let [hi, lo] = encode_angle(angle);
            assert_eq!(decode_angle(hi, lo), angle, "angle {}", angle);
        }
    }

    #[test]
    fn low_angles_ride_in_the_high_byte() {
        assert_eq!(encode_angle(0), [0, 0]);
        assert_eq!(encode_angle(50), [50, 0]);
        assert_eq!(encode_angle(254), [254, 0]);
    }

    #[test]
    fn high_angles_use_the_overflow_marker() {
        assert_eq!(encode_angle(255), [254, 1]);
        assert_eq!(encode_angle(259), [254, 5]);
        assert_eq!(encode_angle(509), [254, 255]);
    }

    #[test]
    fn encode_clamps_past_the_top() {
        assert_eq!(encode_angle(510), [254, 255]);
        assert_eq!(encode_angle(u16::MAX), [254, 255]);
    }

    #[test]
    fn decode_accepts_malformed_pairs() {
        // A high byte the encoder never produces still decodes.
        assert_eq!(decode_angle(255, 7), 255);
        // A stray low byte under a direct high byte is ignored.
        assert_eq!(decode_angle(50, 9), 50);
    }

    #[test]
    fn marker_high_byte_always_means_overflow() {
        assert_eq!(AngleCode::from_angle(254), AngleCode::Direct(254));
        assert_eq!(AngleCode::from_bytes(254, 0), AngleCode::Overflow(0));
        assert_eq!(AngleCode::from_bytes(254, 0).angle(), 254);
    }
}
