// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! # PanTilt Firmware
//!
//! Firmware for a two-axis pan/tilt positioner built around an STM32F777 MCU. It receives target
//! angles over a small framed USART protocol and steps both servos toward the latest target
//! whenever the link has nothing to read, so waiting on bytes is also what paces the motion.
//!
//! ## Crate Structure
//!
//! | Module | Purpose |
//! | ------ | -------- |
//! | [`protocol`] | Framed target protocol: angle code, frame layout, cooperative receiver |
//! | [`control`] | Goal tracking and the top-level drive cycle |
//! | [`drivers`] | Device-level drivers (RC servo over PWM) |
//! | [`hw`] | MCU-level wrappers around USART, TIM3 PWM, pins, LEDs |
//!
//! The `hw` module and the firmware binary need the `stm32f777` feature; everything else builds
//! and tests on the host.
//!
//! ## Getting Started
//!
//! Run the host-side tests:
//!
//! ```bash
//! cargo test
//! ```
//!
//! Flash the board:
//!
//! ```bash
//! cargo run --release --features stm32f777 --target thumbv7em-none-eabihf
//! ```
//!
//! ## License
//!
//! Licensed under the **MIT License**.
//! See the `LICENSE` file in the repository root for full terms.
//!
//! © 2025–2026 Christopher Liu

#![cfg_attr(not(test), no_std)]

pub mod control;
pub mod drivers;
#[cfg(feature = "stm32f777")]
pub mod hw;
pub mod protocol;

#[cfg(test)]
mod mock;
