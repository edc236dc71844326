// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Top-level drive cycle tying the link to the actuators.
//!
//! The controller owns the serial port, both servos, the delay source and
//! the goal tracker. [`Controller::cycle`] runs one receive attempt with
//! every link wait doubling as a paced drive step, commits the received
//! goal pair, steps once more so motion advances even under back-to-back
//! frames, and optionally echoes the current position. The firmware entry
//! just calls it forever.

use embedded_hal::blocking::delay::DelayMs;

use crate::control::tracker::{Actuator, Tracker};
use crate::protocol::angle::Angle;
use crate::protocol::frame::Frame;
use crate::protocol::receiver::{BytePort, LinkConfig, LinkError, Receiver};

/// Default delay between drive steps, in milliseconds.
pub const STEP_DELAY_MS: u16 = 50;

/// Cooperative two-axis drive controller.
pub struct Controller<P, X, Y, D>
where
    P: BytePort,
    X: Actuator,
    Y: Actuator,
    D: DelayMs<u16>,
{
    port: P,
    x_servo: X,
    y_servo: Y,
    delay: D,
    tracker: Tracker,
    receiver: Receiver,
    step_delay_ms: u16,
    echo: bool,
}

impl<P, X, Y, D> Controller<P, X, Y, D>
where
    P: BytePort,
    X: Actuator,
    Y: Actuator,
    D: DelayMs<u16>,
{
    /// Create a controller starting at position (0, 0) with the position
    /// echo enabled.
    pub fn new(port: P, x_servo: X, y_servo: Y, delay: D, link: LinkConfig) -> Self {
        Self {
            port,
            x_servo,
            y_servo,
            delay,
            tracker: Tracker::new(0, 0),
            receiver: Receiver::new(link),
            step_delay_ms: STEP_DELAY_MS,
            echo: true,
        }
    }

    /// Set the delay between drive steps.
    pub fn with_step_delay(mut self, ms: u16) -> Self {
        self.step_delay_ms = ms;
        self
    }

    /// Enable or disable the per-cycle position echo frame.
    pub fn with_echo(mut self, echo: bool) -> Self {
        self.echo = echo;
        self
    }

    /// Start both axes at a known position instead of (0, 0).
    pub fn with_start_position(mut self, x: Angle, y: Angle) -> Self {
        self.tracker = Tracker::new(x, y);
        self
    }

    #[inline]
    pub fn tracker(&self) -> &Tracker {
        &self.tracker
    }

    /// One controller cycle.
    ///
    /// Runs a full receive attempt, driving one step (plus the step delay)
    /// on every link wait. A decoded frame commits both goals in one go; a
    /// failed attempt leaves the previous goal in place, so the axes keep
    /// tracking it. One more step runs unconditionally, then the current
    /// position goes out as an echo frame when enabled.
    ///
    /// Returns the link outcome so the caller can drive status indicators.
    pub fn cycle(&mut self) -> Result<(), LinkError> {
        let Self {
            port,
            x_servo,
            y_servo,
            delay,
            tracker,
            receiver,
            step_delay_ms,
            echo,
        } = self;
        let step = *step_delay_ms;

        let mut pace = || {
            tracker.drive_step(x_servo, y_servo);
            delay.delay_ms(step);
        };
        let outcome = receiver.receive(port, &mut pace);

        if let Ok(frame) = outcome {
            tracker.set_goal(frame.x, frame.y);
        }

        // Step once per cycle even when frames arrive back to back and the
        // receive path never waited.
        tracker.drive_step(x_servo, y_servo);
        delay.delay_ms(step);

        if *echo {
            let report = Frame::new(tracker.x().current(), tracker.y().current());
            for b in report.to_bytes() {
                port.write_byte(b);
            }
        }

        outcome.map(|_| ())
    }

    /// Tear the controller apart and hand the peripherals back.
    pub fn free(self) -> (P, X, Y, D) {
        (self.port, self.x_servo, self.y_servo, self.delay)
    }
}
