// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! # Device-Specific Drivers
//!
//! This module contains device-specific drivers that sit above the raw `hw/` layer and below the
//! application logic.
//!
//! ## Existing drivers
//!
//! - [`rc_servo`] – Hobby RC servo on a 50 Hz PWM channel

pub mod rc_servo;

pub use rc_servo::RcServo;
