//! Scripted test doubles for the capability traits. Compiled only for
//! host-side tests.

use std::collections::VecDeque;

use embedded_hal::blocking::delay::DelayMs;
use embedded_hal::PwmPin;

use crate::control::tracker::Actuator;
use crate::protocol::angle::Angle;
use crate::protocol::receiver::BytePort;

/// Serial port that replays a byte script. `Some(b)` entries are bytes
/// ready to read; each `None` is exactly one empty poll. An exhausted
/// script reads as a permanently silent line. Writes are captured.
pub struct ScriptPort {
    script: VecDeque<Option<u8>>,
    pub written: Vec<u8>,
}

impl ScriptPort {
    /// Empty script: silent forever.
    pub fn new() -> Self {
        Self {
            script: VecDeque::new(),
            written: Vec::new(),
        }
    }

    pub fn bytes(data: &[u8]) -> Self {
        Self::new().then_bytes(data)
    }

    pub fn then_byte(mut self, b: u8) -> Self {
        self.script.push_back(Some(b));
        self
    }

    pub fn then_bytes(mut self, data: &[u8]) -> Self {
        for &b in data {
            self.script.push_back(Some(b));
        }
        self
    }

    /// Script `polls` empty polls before whatever comes next.
    pub fn then_gap(mut self, polls: usize) -> Self {
        for _ in 0..polls {
            self.script.push_back(None);
        }
        self
    }

    /// Unread script entries left over.
    pub fn remaining(&self) -> usize {
        self.script.len()
    }
}

impl BytePort for ScriptPort {
    fn bytes_available(&mut self) -> usize {
        match self.script.front().copied() {
            Some(Some(_)) => 1,
            // One scripted empty poll burns off.
            Some(None) => {
                self.script.pop_front();
                0
            }
            None => 0,
        }
    }

    fn read_byte(&mut self) -> u8 {
        match self.script.pop_front() {
            Some(Some(b)) => b,
            _ => 0,
        }
    }

    fn write_byte(&mut self, byte: u8) {
        self.written.push(byte);
    }
}

/// Actuator that records every commanded angle.
pub struct RecServo {
    pub commands: Vec<Angle>,
}

impl RecServo {
    pub fn new() -> Self {
        Self {
            commands: Vec::new(),
        }
    }
}

impl Actuator for RecServo {
    fn move_to(&mut self, angle: Angle) {
        self.commands.push(angle);
    }
}

/// Delay that does nothing.
pub struct NoDelay;

impl DelayMs<u16> for NoDelay {
    fn delay_ms(&mut self, _ms: u16) {}
}

/// Delay that counts its calls and total requested time.
pub struct CountDelay {
    pub calls: u32,
    pub total_ms: u32,
}

impl CountDelay {
    pub fn new() -> Self {
        Self {
            calls: 0,
            total_ms: 0,
        }
    }
}

impl DelayMs<u16> for CountDelay {
    fn delay_ms(&mut self, ms: u16) {
        self.calls += 1;
        self.total_ms += u32::from(ms);
    }
}

/// PWM channel stub with a configurable resolution.
pub struct MockPwm {
    pub duty: u16,
    pub max: u16,
    pub enabled: bool,
}

impl MockPwm {
    pub fn with_max(max: u16) -> Self {
        Self {
            duty: 0,
            max,
            enabled: false,
        }
    }
}

impl PwmPin for MockPwm {
    type Duty = u16;

    fn disable(&mut self) {
        self.enabled = false;
    }

    fn enable(&mut self) {
        self.enabled = true;
    }

    fn get_duty(&self) -> u16 {
        self.duty
    }

    fn get_max_duty(&self) -> u16 {
        self.max
    }

    fn set_duty(&mut self, duty: u16) {
        self.duty = duty;
    }
}
