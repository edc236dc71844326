// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

pub mod angle;
pub mod frame;
pub mod receiver;

pub use angle::{decode_angle, encode_angle, Angle, AngleCode, ANGLE_MAX};
pub use frame::{Frame, HEADER_BYTE};
pub use receiver::{BytePort, LinkConfig, LinkError, Receiver};
