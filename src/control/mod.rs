// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! # Motion Control
//!
//! This module provides the goal-tracking core and the top-level drive cycle.
//!
//! ## Modules
//!
//! - [`tracker`] - Per-axis current/goal state with one-unit drive steps.
//! - [`controller`] - Cooperative cycle tying the link to both actuators.

pub mod controller;
pub mod tracker;

pub use controller::Controller;
pub use tracker::{Actuator, Axis, Tracker};
