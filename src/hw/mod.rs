pub mod leds;
pub mod pins;
pub mod pwm;
pub mod usart;

pub use leds::StatusLeds;
pub use pins::BoardPins;
pub use pwm::PwmChannel;
pub use pwm::ServoPwm;
pub use usart::Usart;
