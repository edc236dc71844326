//! Link status indication on the three board LEDs (wired active-low).

use embedded_hal::digital::v2::OutputPin;

/// Green = last cycle committed a frame, yellow blinks while the scan keeps
/// timing out, red = a frame stalled mid-reception.
pub struct StatusLeds<G, Y, R>
where
    G: OutputPin,
    Y: OutputPin,
    R: OutputPin,
{
    green: G,
    yellow: Y,
    red: R,
    yellow_on: bool,
}

impl<G, Y, R> StatusLeds<G, Y, R>
where
    G: OutputPin,
    Y: OutputPin,
    R: OutputPin,
{
    /// Wrap the three LED pins, starting with all of them off.
    pub fn new(green: G, yellow: Y, red: R) -> Self {
        let mut leds = Self {
            green,
            yellow,
            red,
            yellow_on: false,
        };
        leds.green.set_high().ok();
        leds.yellow.set_high().ok();
        leds.red.set_high().ok();
        leds
    }

    /// A frame was received and committed.
    pub fn synced(&mut self) {
        self.green.set_low().ok();
        self.set_yellow(false);
        self.red.set_high().ok();
    }

    /// The header scan timed out; blink yellow while searching.
    pub fn searching(&mut self) {
        self.green.set_high().ok();
        let next = !self.yellow_on;
        self.set_yellow(next);
        self.red.set_high().ok();
    }

    /// A bounded in-frame wait expired.
    pub fn stalled(&mut self) {
        self.green.set_high().ok();
        self.set_yellow(false);
        self.red.set_low().ok();
    }

    fn set_yellow(&mut self, on: bool) {
        self.yellow_on = on;
        if on {
            self.yellow.set_low().ok();
        } else {
            self.yellow.set_high().ok();
        }
    }
}
