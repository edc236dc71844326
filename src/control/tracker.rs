//! Constant-rate goal tracking for the two positioning axes.
//!
//! The tracker owns the current/goal angle pair for each axis and advances
//! one unit per [`drive_step`](Tracker::drive_step) call, so the rate the
//! caller invokes it at is also the angular velocity. Goals change only
//! through [`set_goal`](Tracker::set_goal), which commits both axes
//! together.

use crate::protocol::angle::Angle;

/// Anything that can be told to go to an angle.
pub trait Actuator {
    /// Command the actuator to the given angle.
    fn move_to(&mut self, angle: Angle);
}

/// Current/goal pair for one axis.
#[derive(Debug, Clone, Copy)]
pub struct Axis {
    current: Angle,
    goal: Angle,
}

impl Axis {
    fn new(start: Angle) -> Self {
        Self {
            current: start,
            goal: start,
        }
    }

    /// One unit toward the goal. Commands the servo only when the axis
    /// actually moved, so an on-target axis stays quiet.
    fn step<A: Actuator>(&mut self, servo: &mut A) -> bool {
        if self.current == self.goal {
            return false;
        }
        if self.current < self.goal {
            self.current += 1;
        } else {
            self.current -= 1;
        }
        servo.move_to(self.current);
        true
    }

    /// Angle the axis stands at, as driven so far.
    #[inline]
    pub fn current(&self) -> Angle {
        self.current
    }

    /// Angle the axis is heading for.
    #[inline]
    pub fn goal(&self) -> Angle {
        self.goal
    }

    #[inline]
    pub fn on_target(&self) -> bool {
        self.current == self.goal
    }
}

/// Both axes of the positioner.
pub struct Tracker {
    x: Axis,
    y: Axis,
}

impl Tracker {
    /// Start both axes at a known position, on target.
    pub fn new(x_start: Angle, y_start: Angle) -> Self {
        Self {
            x: Axis::new(x_start),
            y: Axis::new(y_start),
        }
    }

    /// Commit a new goal pair. Both axes switch in one call, so a drive
    /// step never chases a half-updated target.
    pub fn set_goal(&mut self, x: Angle, y: Angle) {
        self.x.goal = x;
        self.y.goal = y;
    }

    /// One drive step: each axis independently moves one unit toward its
    /// goal. Returns whether anything moved. An axis delta of `d` takes
    /// exactly `d` steps, with no overshoot.
    pub fn drive_step<X, Y>(&mut self, x_servo: &mut X, y_servo: &mut Y) -> bool
    where
        X: Actuator,
        Y: Actuator,
    {
        let x_moved = self.x.step(x_servo);
        let y_moved = self.y.step(y_servo);
        x_moved || y_moved
    }

    #[inline]
    pub fn x(&self) -> &Axis {
        &self.x
    }

    #[inline]
    pub fn y(&self) -> &Axis {
        &self.y
    }

    #[inline]
    pub fn on_target(&self) -> bool {
        self.x.on_target() && self.y.on_target()
    }
}
