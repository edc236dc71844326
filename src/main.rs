#![no_main]
#![no_std]

use cortex_m::delay::Delay;
use cortex_m_rt::entry;
use panic_halt as _;

use hal::{
    pac,
    prelude::*,
    serial::{Config, Serial},
};
use stm32f7xx_hal as hal;

use pantilt::control::Controller;
use pantilt::drivers::RcServo;
use pantilt::hw::{BoardPins, ServoPwm, StatusLeds, Usart};
use pantilt::protocol::{LinkConfig, LinkError};

/// Link rate the host opens the port at.
const BAUD: u32 = 9_600;

/// Polls allowed mid-frame before the link counts as stalled, about 5 s at
/// the 50 ms step delay.
const WAIT_LIMIT_POLLS: u32 = 100;

#[entry]
fn main() -> ! {
    // Peripherals
    let dp = pac::Peripherals::take().unwrap();
    let cp = cortex_m::Peripherals::take().unwrap();

    // Clocks
    let rcc = dp.RCC.constrain();
    let clocks = rcc.cfgr.freeze();

    // GPIO
    let pins = BoardPins::new(dp.GPIOA, dp.GPIOD);
    let mut leds = StatusLeds::new(pins.leds.green, pins.leds.yellow, pins.leds.red);

    // USART1 link to the host
    let usart_cfg = Config {
        baud_rate: BAUD.bps(),
        ..Default::default()
    };
    let serial = Serial::new(dp.USART1, (pins.usart1.tx, pins.usart1.rx), &clocks, usart_cfg);
    let mut usart = Usart::new(serial);

    // Servo PWM on TIM3 (pins muxed by BoardPins)
    let (pan_ch, tilt_ch) = ServoPwm::tim3(dp.TIM3).split();

    // SysTick delay
    let delay = Delay::new(cp.SYST, clocks.sysclk().raw());

    usart.print_u32(BAUD);
    usart.println(" baud, waiting for targets");

    let link = LinkConfig {
        wait_limit: Some(WAIT_LIMIT_POLLS),
        ..Default::default()
    };
    let mut controller = Controller::new(
        usart,
        RcServo::new(pan_ch),
        RcServo::new(tilt_ch),
        delay,
        link,
    );

    loop {
        match controller.cycle() {
            Ok(()) => leds.synced(),
            Err(LinkError::SyncTimeout) => leds.searching(),
            Err(LinkError::Stalled) => leds.stalled(),
        }
    }
}
