// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Hobby RC servo over a PWM channel.
//!
//! Maps a commanded angle in degrees onto a pulse width inside the servo's
//! control band (1000–2000 µs by default) on a 20 ms frame. Angles past the
//! hardware's 180° travel are clamped, which also bounds whatever the link
//! decoded out of a malformed pair.

use embedded_hal::PwmPin;

use crate::control::tracker::Actuator;
use crate::protocol::angle::Angle;

/// Servo PWM frame length in microseconds (50 Hz).
pub const FRAME_US: u16 = 20_000;

/// Default pulse width at 0°.
pub const MIN_PULSE_US: u16 = 1_000;

/// Default pulse width at full travel.
pub const MAX_PULSE_US: u16 = 2_000;

/// Hardware travel range in degrees.
pub const RANGE_DEG: u16 = 180;

/// One RC servo on a PWM channel with duty units spanning the 20 ms frame.
pub struct RcServo<P: PwmPin<Duty = u16>> {
    pwm: P,
    min_pulse_us: u16,
    max_pulse_us: u16,
}

impl<P: PwmPin<Duty = u16>> RcServo<P> {
    /// Take over a PWM channel and enable its output. No pulse is commanded
    /// until the first [`move_to`](Actuator::move_to).
    pub fn new(mut pwm: P) -> Self {
        pwm.enable();
        Self {
            pwm,
            min_pulse_us: MIN_PULSE_US,
            max_pulse_us: MAX_PULSE_US,
        }
    }

    /// Use a non-standard pulse band (some servos want e.g. 600–2400 µs).
    pub fn with_pulse_band(mut self, min_us: u16, max_us: u16) -> Self {
        self.min_pulse_us = min_us;
        self.max_pulse_us = max_us;
        self
    }

    /// Pulse width for an angle, clamped to the hardware travel range.
    fn pulse_us(&self, angle: Angle) -> u16 {
        let deg = u32::from(angle.min(RANGE_DEG));
        let span = u32::from(self.max_pulse_us - self.min_pulse_us);
        self.min_pulse_us + (deg * span / u32::from(RANGE_DEG)) as u16
    }

    /// Duty counts for a pulse width, scaled to the channel's resolution.
    fn duty_for(&self, pulse_us: u16) -> u16 {
        let max = u32::from(self.pwm.get_max_duty());
        (u32::from(pulse_us) * max / u32::from(FRAME_US)) as u16
    }

    /// Consume the driver and return the PWM channel.
    pub fn free(self) -> P {
        self.pwm
    }
}

impl<P: PwmPin<Duty = u16>> Actuator for RcServo<P> {
    fn move_to(&mut self, angle: Angle) {
        let duty = self.duty_for(self.pulse_us(angle));
        self.pwm.set_duty(duty);
    }
}
